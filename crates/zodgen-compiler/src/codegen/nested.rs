//! Nested create/update families, one set per relation edge.
//!
//! For an edge `A.f -> B` whose reverse is `B.g`, every fragment is named on
//! `B` and keyed by `g`: the shapes describe a `B` written from inside an
//! `A`, so `g` and the foreign keys behind it are implied.

use crate::ir::{Entity, Field, Multiplicity};

use super::context::{BuildContext, Edge};
use super::create::{create_fields, create_many_fields, Variant};
use super::fragment::Fragment;
use super::naming;
use super::update::{update_fields, update_many_fields};
use super::zod::{prop, Prim, ZodExpr};

struct Names<'a> {
    target: &'a str,
    reverse: &'a str,
}

impl Names<'_> {
    fn without(&self, before: &str, after: &str) -> String {
        naming::without(self.target, before, self.reverse, after)
    }

    fn entity(&self, suffix: &str) -> ZodExpr {
        ZodExpr::reference(naming::entity_schema(self.target, suffix))
    }

    fn create_many(&self, suffix: &str) -> String {
        naming::create_many_for(self.target, self.reverse, suffix)
    }
}

/// Every family fragment for the edge `owner.field`. Empty when the edge has
/// no resolvable reverse.
pub fn build_edge_families(ctx: &BuildContext<'_>, owner: &Entity, field: &Field) -> Vec<Fragment> {
    let Some(edge) = ctx.edge(owner, field) else {
        return Vec::new();
    };
    let names = Names {
        target: &edge.target.name,
        reverse: &edge.reverse.name,
    };

    let mut fragments = create_side(ctx, field, edge, &names);
    fragments.extend(update_side(ctx, field, edge, &names));
    fragments
}

fn create_side(ctx: &BuildContext<'_>, field: &Field, edge: Edge<'_>, names: &Names<'_>) -> Vec<Fragment> {
    let Edge { target, reverse } = edge;
    let checked = names.without("Create", "Input");
    let unchecked = names.without("UncheckedCreate", "Input");
    let connect_or_create = names.without("CreateOrConnect", "Input");
    let where_unique = names.entity("WhereUniqueInput");

    let mut fragments = vec![
        Fragment::new(
            &checked,
            ZodExpr::strict_object(create_fields(ctx, target, Variant::Checked, Some(reverse))),
        ),
        Fragment::new(
            &unchecked,
            ZodExpr::strict_object(create_fields(ctx, target, Variant::Unchecked, Some(reverse))),
        ),
        Fragment::new(
            &connect_or_create,
            ZodExpr::strict_object(vec![
                prop("where", where_unique.clone()),
                prop("create", one_create(&checked, &unchecked)),
            ]),
        ),
    ];

    if !field.is_list {
        fragments.push(Fragment::new(
            names.without("CreateNestedOne", "Input"),
            ZodExpr::strict_object(vec![
                prop("create", one_create(&checked, &unchecked).optional()),
                prop(
                    "connectOrCreate",
                    ZodExpr::reference(&connect_or_create).optional(),
                ),
                prop("connect", where_unique.optional()),
            ]),
        ));
        return fragments;
    }

    let bulk = !reverse.is_list;
    if bulk {
        let row = names.create_many("Input");
        fragments.push(Fragment::new(
            &row,
            ZodExpr::strict_object(create_many_fields(target, Some(reverse))),
        ));
        fragments.push(Fragment::new(
            names.create_many("InputEnvelope"),
            ZodExpr::strict_object(vec![
                prop("data", ZodExpr::one_or_many(ZodExpr::reference(row))),
                prop("skipDuplicates", ZodExpr::prim(Prim::Boolean).optional()),
            ]),
        ));
    }

    let nested_many = || {
        let mut fields = vec![
            prop("create", many_create(&checked, &unchecked).optional()),
            prop(
                "connectOrCreate",
                ZodExpr::one_or_many(ZodExpr::reference(&connect_or_create)).optional(),
            ),
        ];
        if bulk {
            fields.push(prop(
                "createMany",
                ZodExpr::reference(names.create_many("InputEnvelope")).optional(),
            ));
        }
        fields.push(prop(
            "connect",
            ZodExpr::one_or_many(where_unique.clone()).optional(),
        ));
        ZodExpr::strict_object(fields)
    };

    fragments.push(Fragment::new(
        names.without("CreateNestedMany", "Input"),
        nested_many(),
    ));
    fragments.push(Fragment::new(
        names.without("UncheckedCreateNestedMany", "Input"),
        nested_many(),
    ));
    fragments
}

fn update_side(ctx: &BuildContext<'_>, field: &Field, edge: Edge<'_>, names: &Names<'_>) -> Vec<Fragment> {
    let Edge { target, reverse } = edge;
    let checked = names.without("Update", "Input");
    let unchecked = names.without("UncheckedUpdate", "Input");
    let create_checked = names.without("Create", "Input");
    let create_unchecked = names.without("UncheckedCreate", "Input");
    let connect_or_create = names.without("CreateOrConnect", "Input");
    let where_unique = names.entity("WhereUniqueInput");
    let data = ZodExpr::union(vec![
        ZodExpr::reference(&checked),
        ZodExpr::reference(&unchecked),
    ]);

    let mut fragments = vec![
        Fragment::new(
            &checked,
            ZodExpr::strict_object(update_fields(ctx, target, Variant::Checked, Some(reverse))),
        ),
        Fragment::new(
            &unchecked,
            ZodExpr::strict_object(update_fields(ctx, target, Variant::Unchecked, Some(reverse))),
        ),
    ];

    if !field.is_list {
        let where_input = names.entity("WhereInput");
        let upsert = names.without("Upsert", "Input");
        let to_one = names.without("UpdateToOneWithWhere", "Input");
        fragments.push(Fragment::new(
            &upsert,
            ZodExpr::strict_object(vec![
                prop("update", data.clone()),
                prop("create", one_create(&create_checked, &create_unchecked)),
                prop("where", where_input.clone().optional()),
            ]),
        ));
        fragments.push(Fragment::new(
            &to_one,
            ZodExpr::strict_object(vec![
                prop("where", where_input.clone().optional()),
                prop("data", data),
            ]),
        ));

        let mut fields = vec![
            prop(
                "create",
                one_create(&create_checked, &create_unchecked).optional(),
            ),
            prop(
                "connectOrCreate",
                ZodExpr::reference(&connect_or_create).optional(),
            ),
            prop("upsert", ZodExpr::reference(upsert).optional()),
        ];
        let name = if field.multiplicity() == Multiplicity::Nullable {
            let detach = ZodExpr::union(vec![ZodExpr::prim(Prim::Boolean), where_input]).optional();
            fields.push(prop("disconnect", detach.clone()));
            fields.push(prop("delete", detach));
            names.without("UpdateOne", "NestedInput")
        } else {
            names.without("UpdateOneRequired", "NestedInput")
        };
        fields.push(prop("connect", where_unique.optional()));
        fields.push(prop(
            "update",
            ZodExpr::union(vec![
                ZodExpr::reference(to_one),
                ZodExpr::reference(&checked),
                ZodExpr::reference(&unchecked),
            ])
            .optional(),
        ));
        fragments.push(Fragment::new(name, ZodExpr::strict_object(fields)));
        return fragments;
    }

    let upsert = names.without("UpsertWithWhereUnique", "Input");
    let update_one = names.without("UpdateWithWhereUnique", "Input");
    let update_many = names.without("UpdateManyWithWhere", "Input");
    let unchecked_many = names.without("UncheckedUpdateMany", "Input");
    let scalar_where = names.entity("ScalarWhereInput");

    fragments.push(Fragment::new(
        &upsert,
        ZodExpr::strict_object(vec![
            prop("where", where_unique.clone()),
            prop("update", data.clone()),
            prop("create", one_create(&create_checked, &create_unchecked)),
        ]),
    ));
    fragments.push(Fragment::new(
        &update_one,
        ZodExpr::strict_object(vec![
            prop("where", where_unique.clone()),
            prop("data", data),
        ]),
    ));
    fragments.push(Fragment::new(
        &update_many,
        ZodExpr::strict_object(vec![
            prop("where", scalar_where.clone()),
            prop(
                "data",
                ZodExpr::union(vec![
                    names.entity("UpdateManyMutationInput"),
                    ZodExpr::reference(&unchecked_many),
                ]),
            ),
        ]),
    ));
    fragments.push(Fragment::new(
        &unchecked_many,
        ZodExpr::strict_object(update_many_fields(target, Variant::Unchecked, Some(reverse))),
    ));

    let bulk = !reverse.is_list;
    let nested_many = || {
        let many = |name: &str| ZodExpr::one_or_many(ZodExpr::reference(name)).optional();
        let mut fields = vec![
            prop(
                "create",
                many_create(&create_checked, &create_unchecked).optional(),
            ),
            prop("connectOrCreate", many(&connect_or_create)),
            prop("upsert", many(&upsert)),
        ];
        if bulk {
            fields.push(prop(
                "createMany",
                ZodExpr::reference(names.create_many("InputEnvelope")).optional(),
            ));
        }
        for key in ["set", "disconnect", "delete", "connect"] {
            fields.push(prop(key, ZodExpr::one_or_many(where_unique.clone()).optional()));
        }
        fields.push(prop("update", many(&update_one)));
        fields.push(prop("updateMany", many(&update_many)));
        fields.push(prop(
            "deleteMany",
            ZodExpr::one_or_many(scalar_where.clone()).optional(),
        ));
        ZodExpr::strict_object(fields)
    };

    fragments.push(Fragment::new(
        names.without("UpdateMany", "NestedInput"),
        nested_many(),
    ));
    fragments.push(Fragment::new(
        names.without("UncheckedUpdateMany", "NestedInput"),
        nested_many(),
    ));
    fragments
}

/// Checked or unchecked payload for one nested record.
fn one_create(checked: &str, unchecked: &str) -> ZodExpr {
    ZodExpr::union(vec![
        ZodExpr::reference(checked),
        ZodExpr::reference(unchecked),
    ])
}

/// One or many nested records, either form. Array arms come first.
fn many_create(checked: &str, unchecked: &str) -> ZodExpr {
    let checked = ZodExpr::reference(checked);
    let unchecked = ZodExpr::reference(unchecked);
    ZodExpr::union(vec![
        checked.clone().array(),
        unchecked.clone().array(),
        checked,
        unchecked,
    ])
}
