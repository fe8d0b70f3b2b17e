//! Ordering inputs.

use crate::ir::{Entity, Field, Multiplicity};

use super::context::BuildContext;
use super::fragment::Fragment;
use super::naming;
use super::zod::{prop, ZodExpr};

/// Sort direction for one value field. Nullable fields may also say where
/// nulls go.
fn value_sort(field: &Field) -> ZodExpr {
    let direction = ZodExpr::reference(naming::SORT_ORDER);
    match field.multiplicity() {
        Multiplicity::Nullable => ZodExpr::union(vec![
            direction,
            ZodExpr::reference(naming::SORT_ORDER_INPUT),
        ])
        .optional(),
        Multiplicity::Required | Multiplicity::List => direction.optional(),
    }
}

fn direction_per_field<'a>(fields: impl Iterator<Item = &'a Field>) -> ZodExpr {
    ZodExpr::strict_object(
        fields
            .map(|field| {
                (
                    field.name.clone(),
                    ZodExpr::reference(naming::SORT_ORDER).optional(),
                )
            })
            .collect(),
    )
}

/// `<M>OrderByWithRelationInputSchema`: value fields sort directly, single
/// relations sort by the related record, list relations by their size.
pub fn build_order_by_with_relation(entity: &Entity) -> Fragment {
    let fields = entity
        .fields
        .iter()
        .map(|field| {
            let sort = match field.relation_ref() {
                None => value_sort(field),
                Some(rel) if field.is_list => ZodExpr::reference(naming::entity_schema(
                    &rel.target,
                    "OrderByRelationAggregateInput",
                ))
                .optional(),
                Some(rel) => ZodExpr::reference(naming::entity_schema(
                    &rel.target,
                    "OrderByWithRelationInput",
                ))
                .optional(),
            };
            (field.name.clone(), sort)
        })
        .collect();
    Fragment::new(
        naming::entity_schema(&entity.name, "OrderByWithRelationInput"),
        ZodExpr::strict_object(fields),
    )
}

/// `<M>OrderByRelationAggregateInputSchema`, for entities reached through a
/// list relation.
pub fn build_order_by_relation_aggregate(
    ctx: &BuildContext<'_>,
    entity: &Entity,
) -> Option<Fragment> {
    ctx.facts.is_list_relation_target(&entity.name).then(|| {
        Fragment::new(
            naming::entity_schema(&entity.name, "OrderByRelationAggregateInput"),
            ZodExpr::strict_object(vec![prop(
                "_count",
                ZodExpr::reference(naming::SORT_ORDER).optional(),
            )]),
        )
    })
}

/// Per-aggregate ordering inputs. Average and sum exist only for entities
/// with numeric fields.
pub fn build_order_by_aggregates(entity: &Entity) -> Vec<Fragment> {
    let name = |suffix: &str| naming::entity_schema(&entity.name, suffix);
    let mut fragments = vec![Fragment::new(
        name("CountOrderByAggregateInput"),
        direction_per_field(entity.value_fields()),
    )];
    if entity.has_numeric_fields() {
        fragments.push(Fragment::new(
            name("AvgOrderByAggregateInput"),
            direction_per_field(entity.numeric_fields()),
        ));
    }
    fragments.push(Fragment::new(
        name("MaxOrderByAggregateInput"),
        direction_per_field(entity.comparable_fields()),
    ));
    fragments.push(Fragment::new(
        name("MinOrderByAggregateInput"),
        direction_per_field(entity.comparable_fields()),
    ));
    if entity.has_numeric_fields() {
        fragments.push(Fragment::new(
            name("SumOrderByAggregateInput"),
            direction_per_field(entity.numeric_fields()),
        ));
    }
    fragments
}

/// `<M>OrderByWithAggregationInputSchema`, the ordering of grouped results.
pub fn build_order_by_with_aggregation(entity: &Entity) -> Fragment {
    let name = |suffix: &str| naming::entity_schema(&entity.name, suffix);
    let mut fields: Vec<(String, ZodExpr)> = entity
        .value_fields()
        .map(|field| (field.name.clone(), value_sort(field)))
        .collect();

    let numeric = entity.has_numeric_fields();
    for (key, suffix, present) in [
        ("_count", "CountOrderByAggregateInput", true),
        ("_avg", "AvgOrderByAggregateInput", numeric),
        ("_max", "MaxOrderByAggregateInput", true),
        ("_min", "MinOrderByAggregateInput", true),
        ("_sum", "SumOrderByAggregateInput", numeric),
    ] {
        if present {
            fields.push(prop(key, ZodExpr::reference(name(suffix)).optional()));
        }
    }

    Fragment::new(
        name("OrderByWithAggregationInput"),
        ZodExpr::strict_object(fields),
    )
}
