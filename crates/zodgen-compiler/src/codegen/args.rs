//! Operation argument bundles, one set per entity.

use crate::ir::Entity;

use super::fragment::Fragment;
use super::naming;
use super::select::select_and_include;
use super::zod::{prop, Prim, ZodExpr};

struct Refs<'a> {
    entity: &'a str,
}

impl Refs<'_> {
    fn of(&self, suffix: &str) -> ZodExpr {
        ZodExpr::reference(naming::entity_schema(self.entity, suffix))
    }

    /// Checked or unchecked form of an input.
    fn either(&self, checked: &str, unchecked: &str) -> ZodExpr {
        ZodExpr::union(vec![self.of(checked), self.of(unchecked)])
    }
}

fn count() -> ZodExpr {
    ZodExpr::prim(Prim::Number).optional()
}

/// Where, ordering, cursor and paging shared by the find-many family and
/// aggregation.
fn window(refs: &Refs<'_>) -> Vec<(String, ZodExpr)> {
    vec![
        prop("where", refs.of("WhereInput").optional()),
        prop(
            "orderBy",
            ZodExpr::one_or_many(refs.of("OrderByWithRelationInput")).optional(),
        ),
        prop("cursor", refs.of("WhereUniqueInput").optional()),
        prop("take", count()),
        prop("skip", count()),
    ]
}

fn aggregates(entity: &Entity, refs: &Refs<'_>) -> Vec<(String, ZodExpr)> {
    let mut fields = vec![prop(
        "_count",
        ZodExpr::union(vec![ZodExpr::prim(Prim::True), refs.of("CountAggregateInput")]).optional(),
    )];
    if entity.has_numeric_fields() {
        fields.push(prop("_avg", refs.of("AvgAggregateInput").optional()));
        fields.push(prop("_sum", refs.of("SumAggregateInput").optional()));
    }
    fields.push(prop("_min", refs.of("MinAggregateInput").optional()));
    fields.push(prop("_max", refs.of("MaxAggregateInput").optional()));
    fields
}

/// Every argument bundle for `entity`, in a fixed order.
pub fn build_operation_args(entity: &Entity) -> Vec<Fragment> {
    let refs = Refs {
        entity: &entity.name,
    };
    let name = |suffix: &str| naming::entity_schema(&entity.name, suffix);
    let reading = || select_and_include(entity);
    let with = |mut fields: Vec<(String, ZodExpr)>, rest: Vec<(String, ZodExpr)>| {
        fields.extend(rest);
        ZodExpr::strict_object(fields)
    };

    let unique_lookup = || vec![prop("where", refs.of("WhereUniqueInput"))];
    let find_many = || {
        let mut fields = window(&refs);
        fields.push(prop(
            "distinct",
            ZodExpr::one_or_many(refs.of("ScalarFieldEnum")).optional(),
        ));
        fields
    };

    let mut fragments = Vec::new();
    for suffix in ["FindUniqueArgs", "FindUniqueOrThrowArgs"] {
        fragments.push(Fragment::new(name(suffix), with(reading(), unique_lookup())));
    }
    for suffix in ["FindFirstArgs", "FindFirstOrThrowArgs", "FindManyArgs"] {
        fragments.push(Fragment::new(name(suffix), with(reading(), find_many())));
    }

    fragments.push(Fragment::new(
        name("CreateArgs"),
        with(
            reading(),
            vec![prop("data", refs.either("CreateInput", "UncheckedCreateInput"))],
        ),
    ));
    fragments.push(Fragment::new(
        name("CreateManyArgs"),
        ZodExpr::strict_object(vec![
            prop("data", ZodExpr::one_or_many(refs.of("CreateManyInput"))),
            prop("skipDuplicates", ZodExpr::prim(Prim::Boolean).optional()),
        ]),
    ));
    fragments.push(Fragment::new(
        name("UpdateArgs"),
        with(
            reading(),
            vec![
                prop("data", refs.either("UpdateInput", "UncheckedUpdateInput")),
                prop("where", refs.of("WhereUniqueInput")),
            ],
        ),
    ));
    fragments.push(Fragment::new(
        name("UpdateManyArgs"),
        ZodExpr::strict_object(vec![
            prop(
                "data",
                refs.either("UpdateManyMutationInput", "UncheckedUpdateManyInput"),
            ),
            prop("where", refs.of("WhereInput").optional()),
        ]),
    ));
    fragments.push(Fragment::new(
        name("UpsertArgs"),
        with(
            reading(),
            vec![
                prop("where", refs.of("WhereUniqueInput")),
                prop("create", refs.either("CreateInput", "UncheckedCreateInput")),
                prop("update", refs.either("UpdateInput", "UncheckedUpdateInput")),
            ],
        ),
    ));
    fragments.push(Fragment::new(name("DeleteArgs"), with(reading(), unique_lookup())));
    fragments.push(Fragment::new(
        name("DeleteManyArgs"),
        ZodExpr::strict_object(vec![prop("where", refs.of("WhereInput").optional())]),
    ));

    fragments.push(Fragment::new(
        name("AggregateArgs"),
        with(
            window(&refs),
            aggregates(entity, &refs),
        ),
    ));

    let mut group_by = vec![
        prop("where", refs.of("WhereInput").optional()),
        prop(
            "orderBy",
            ZodExpr::one_or_many(refs.of("OrderByWithAggregationInput")).optional(),
        ),
        prop("by", ZodExpr::one_or_many(refs.of("ScalarFieldEnum"))),
        prop("having", refs.of("ScalarWhereWithAggregatesInput").optional()),
        prop("take", count()),
        prop("skip", count()),
    ];
    group_by.extend(aggregates(entity, &refs));
    fragments.push(Fragment::new(name("GroupByArgs"), ZodExpr::strict_object(group_by)));

    fragments
}
