//! Unique-lookup inputs.

use crate::ir::{Entity, UniqueConstraint};

use super::fragment::Fragment;
use super::naming;
use super::zod::{Prim, ZodExpr};
use super::zod_types::field_value;

/// `<M>WhereUniqueInputSchema`. One unique constraint yields its object
/// directly; several yield a union of single-constraint objects, so exactly
/// one constraint identifies the record.
pub fn build_where_unique(entity: &Entity) -> Fragment {
    let mut arms: Vec<ZodExpr> = entity
        .unique_constraints()
        .iter()
        .map(|constraint| constraint_object(entity, constraint))
        .collect();

    let schema = match arms.len() {
        0 => ZodExpr::strict_object(Vec::new()),
        1 => arms.remove(0),
        _ => ZodExpr::union(arms),
    };
    Fragment::new(naming::entity_schema(&entity.name, "WhereUniqueInput"), schema)
}

fn constraint_object(entity: &Entity, constraint: &UniqueConstraint) -> ZodExpr {
    let value_of = |name: &str| {
        entity
            .field(name)
            .and_then(field_value)
            .unwrap_or(ZodExpr::prim(Prim::Any))
    };

    let value = if constraint.is_compound() {
        ZodExpr::strict_object(
            constraint
                .fields
                .iter()
                .map(|name| (name.clone(), value_of(name)))
                .collect(),
        )
    } else {
        constraint
            .fields
            .first()
            .map_or(ZodExpr::prim(Prim::Any), |name| value_of(name))
    };
    ZodExpr::strict_object(vec![(constraint.key.clone(), value)])
}
