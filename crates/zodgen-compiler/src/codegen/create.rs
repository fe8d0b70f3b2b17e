//! Create inputs.
//!
//! The checked form takes structured relation inputs and never raw foreign
//! keys; the unchecked form takes raw foreign keys and only list relations.
//! Nested families reuse both with one relation left out.

use crate::ir::{Entity, Field, Multiplicity};

use super::context::BuildContext;
use super::fragment::Fragment;
use super::naming;
use super::zod::{prop, ZodExpr};
use super::zod_types::field_value;

/// Which create form a shape is built for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Variant {
    Checked,
    Unchecked,
}

/// Create value for a scalar or enum field.
pub fn create_value(field: &Field) -> Option<ZodExpr> {
    let value = field_value(field)?;
    Some(match field.multiplicity() {
        Multiplicity::List => {
            ZodExpr::union(vec![value.clone(), ZodExpr::strict_object(vec![prop("set", value)])])
                .optional()
        }
        Multiplicity::Nullable => value.nullable().optional(),
        Multiplicity::Required if field.is_omittable_on_create() => value.optional(),
        Multiplicity::Required => value,
    })
}

/// Foreign keys backing `omitted`, which the parent supplies implicitly.
pub(super) fn implied_keys(omitted: Option<&Field>) -> &[String] {
    omitted
        .and_then(Field::relation_ref)
        .map(|rel| rel.from_fields.as_slice())
        .unwrap_or(&[])
}

/// Fields of a create shape on `entity`, leaving out the relation `omitted`
/// when the shape is nested under it.
pub fn create_fields(
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
            if let Some(value) = create_value(field) {
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
                ZodExpr::reference(naming::without(target, "CreateNestedOne", back, "Input"))
            }
            (Variant::Checked, Multiplicity::Nullable) => {
                ZodExpr::reference(naming::without(target, "CreateNestedOne", back, "Input"))
                    .optional()
            }
            (Variant::Checked, Multiplicity::List) => {
                ZodExpr::reference(naming::without(target, "CreateNestedMany", back, "Input"))
                    .optional()
            }
            (Variant::Unchecked, Multiplicity::List) => ZodExpr::reference(naming::without(
                target,
                "UncheckedCreateNestedMany",
                back,
                "Input",
            ))
            .optional(),
            (Variant::Unchecked, _) => continue,
        };
        fields.push((field.name.clone(), nested));
    }

    fields
}

/// Scalar-only fields of a bulk create, raw foreign keys included.
pub fn create_many_fields(entity: &Entity, omitted: Option<&Field>) -> Vec<(String, ZodExpr)> {
    let implied = implied_keys(omitted);
    entity
        .value_fields()
        .filter(|field| !implied.contains(&field.name))
        .filter_map(|field| Some((field.name.clone(), create_value(field)?)))
        .collect()
}

/// `<M>CreateInput`, `<M>UncheckedCreateInput` and `<M>CreateManyInput`.
pub fn build_create_inputs(ctx: &BuildContext<'_>, entity: &Entity) -> Vec<Fragment> {
    let name = |suffix: &str| naming::entity_schema(&entity.name, suffix);
    vec![
        Fragment::new(
            name("CreateInput"),
            ZodExpr::strict_object(create_fields(ctx, entity, Variant::Checked, None)),
        ),
        Fragment::new(
            name("UncheckedCreateInput"),
            ZodExpr::strict_object(create_fields(ctx, entity, Variant::Unchecked, None)),
        ),
        Fragment::new(
            name("CreateManyInput"),
            ZodExpr::strict_object(create_many_fields(entity, None)),
        ),
    ]
}
