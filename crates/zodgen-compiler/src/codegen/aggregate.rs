//! Aggregate selection inputs.

use crate::ir::{Entity, Field};

use super::fragment::Fragment;
use super::naming;
use super::zod::{prop, Prim, ZodExpr};

fn selected<'a>(fields: impl Iterator<Item = &'a Field>) -> Vec<(String, ZodExpr)> {
    fields
        .map(|field| (field.name.clone(), ZodExpr::prim(Prim::True).optional()))
        .collect()
}

/// `<M>{Count,Avg,Sum,Min,Max}AggregateInputSchema`. Count covers every value
/// field plus `_all`; average and sum exist only for numeric entities.
pub fn build_aggregate_inputs(entity: &Entity) -> Vec<Fragment> {
    let name = |suffix: &str| naming::entity_schema(&entity.name, suffix);

    let mut count = selected(entity.value_fields());
    count.push(prop("_all", ZodExpr::prim(Prim::True).optional()));

    let mut fragments = vec![Fragment::new(
        name("CountAggregateInput"),
        ZodExpr::strict_object(count),
    )];
    if entity.has_numeric_fields() {
        fragments.push(Fragment::new(
            name("AvgAggregateInput"),
            ZodExpr::strict_object(selected(entity.numeric_fields())),
        ));
        fragments.push(Fragment::new(
            name("SumAggregateInput"),
            ZodExpr::strict_object(selected(entity.numeric_fields())),
        ));
    }
    fragments.push(Fragment::new(
        name("MinAggregateInput"),
        ZodExpr::strict_object(selected(entity.comparable_fields())),
    ));
    fragments.push(Fragment::new(
        name("MaxAggregateInput"),
        ZodExpr::strict_object(selected(entity.comparable_fields())),
    ));
    fragments
}
