//! Base entity shapes and scalar field enumerations.

use crate::ir::{Entity, Multiplicity};

use super::fragment::Fragment;
use super::naming;
use super::zod::ZodExpr;
use super::zod_types::field_value;

/// `<M>Schema`: the record as read back. Non-strict, relations excluded,
/// nullable fields may be null or absent.
pub fn build_base_schema(entity: &Entity) -> Fragment {
    let fields = entity
        .value_fields()
        .filter_map(|field| {
            let value = field_value(field)?;
            let value = match field.multiplicity() {
                Multiplicity::Nullable => value.nullish(),
                Multiplicity::Required | Multiplicity::List => value,
            };
            Some((field.name.clone(), value))
        })
        .collect();
    Fragment::new(naming::entity_schema(&entity.name, ""), ZodExpr::object(fields))
}

/// `<M>ScalarFieldEnumSchema`: names of the entity's scalar and enum fields.
pub fn build_scalar_field_enum(entity: &Entity) -> Fragment {
    let names: Vec<&str> = entity.value_fields().map(|f| f.name.as_str()).collect();
    Fragment::new(
        naming::entity_schema(&entity.name, "ScalarFieldEnum"),
        ZodExpr::enumeration(&names),
    )
}
