//! Update inputs.
//!
//! Every field is optional in an update. Single-valued scalars take either
//! the new value or an operations object; list scalars take a replacement
//! list or `set`/`push`.

use crate::ir::{Entity, Field, FieldKind, Multiplicity};

use super::context::BuildContext;
use super::create::{implied_keys, Variant};
use super::fragment::Fragment;
use super::naming;
use super::zod::{prop, ZodExpr};
use super::zod_types::{field_value, field_value_as};

/// Update value for a scalar or enum field.
pub fn update_value(field: &Field) -> Option<ZodExpr> {
    let value = field_value(field)?;
    let multiplicity = field.multiplicity();

    if multiplicity == Multiplicity::List {
        let single = field_value_as(field, false)?;
        return Some(
            ZodExpr::union(vec![
                value.clone(),
                ZodExpr::strict_object(vec![
                    prop("set", value.clone().optional()),
                    prop("push", ZodExpr::union(vec![value, single]).optional()),
                ]),
            ])
            .optional(),
        );
    }

    let nullable = multiplicity == Multiplicity::Nullable;
    let operations = match &field.kind {
        FieldKind::Scalar(typ) => naming::scalar_update_operations(typ, nullable),
        FieldKind::Enum(name) => Some(naming::enum_update_operations(name, nullable)),
        FieldKind::Relation(_) => None,
    };
    let accepted = match operations {
        Some(ops) => ZodExpr::union(vec![value, ZodExpr::reference(ops)]),
        None => value,
    };
    Some(if nullable {
        accepted.nullable().optional()
    } else {
        accepted.optional()
    })
}

/// Fields of an update shape on `entity`, leaving out the relation `omitted`
/// when the shape is nested under it.
pub fn update_fields(
    ctx: &BuildContext<'_>,
    entity: &Entity,
    variant: Variant,
    omitted: Option<&Field>,
) -> Vec<(String, ZodExpr)> {
    let implied = implied_keys(omitted);
    let mut fields = Vec::new();

    for field in &entity.fields {
        if omitted.is_some_and(|o| o.name == field.name) {
            continue;
        }

        if !field.is_relation() {
            let hidden = match variant {
                Variant::Checked => entity.is_foreign_key(&field.name),
                Variant::Unchecked => implied.contains(&field.name),
            };
            if hidden {
                continue;
            }
            if let Some(value) = update_value(field) {
                fields.push((field.name.clone(), value));
            }
            continue;
        }

        let Some(edge) = ctx.edge(entity, field) else {
            continue;
        };
        let target = &edge.target.name;
        let back = &edge.reverse.name;
        let nested = match (variant, field.multiplicity()) {
            (Variant::Checked, Multiplicity::Required) => {
                naming::without(target, "UpdateOneRequired", back, "NestedInput")
            }
            (Variant::Checked, Multiplicity::Nullable) => {
                naming::without(target, "UpdateOne", back, "NestedInput")
            }
            (Variant::Checked, Multiplicity::List) => {
                naming::without(target, "UpdateMany", back, "NestedInput")
            }
            (Variant::Unchecked, Multiplicity::List) => {
                naming::without(target, "UncheckedUpdateMany", back, "NestedInput")
            }
            (Variant::Unchecked, _) => continue,
        };
        fields.push((field.name.clone(), ZodExpr::reference(nested).optional()));
    }

    fields
}

/// Scalar-only fields of a bulk update.
pub fn update_many_fields(
    entity: &Entity,
    variant: Variant,
    omitted: Option<&Field>,
) -> Vec<(String, ZodExpr)> {
    let implied = implied_keys(omitted);
    entity
        .value_fields()
        .filter(|field| match variant {
            Variant::Checked => !entity.is_foreign_key(&field.name),
            Variant::Unchecked => !implied.contains(&field.name),
        })
        .filter_map(|field| Some((field.name.clone(), update_value(field)?)))
        .collect()
}

/// `<M>UpdateInput`, `<M>UncheckedUpdateInput`, `<M>UpdateManyMutationInput`
/// and `<M>UncheckedUpdateManyInput`.
pub fn build_update_inputs(ctx: &BuildContext<'_>, entity: &Entity) -> Vec<Fragment> {
    let name = |suffix: &str| naming::entity_schema(&entity.name, suffix);
    vec![
        Fragment::new(
            name("UpdateInput"),
            ZodExpr::strict_object(update_fields(ctx, entity, Variant::Checked, None)),
        ),
        Fragment::new(
            name("UncheckedUpdateInput"),
            ZodExpr::strict_object(update_fields(ctx, entity, Variant::Unchecked, None)),
        ),
        Fragment::new(
            name("UpdateManyMutationInput"),
            ZodExpr::strict_object(update_many_fields(entity, Variant::Checked, None)),
        ),
        Fragment::new(
            name("UncheckedUpdateManyInput"),
            ZodExpr::strict_object(update_many_fields(entity, Variant::Unchecked, None)),
        ),
    ]
}
