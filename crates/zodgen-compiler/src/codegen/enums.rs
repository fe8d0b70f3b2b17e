//! Enum value schemas and the filter/update fragments for enums in use.

use crate::analysis::Usage;
use crate::ir::{EnumDef, Multiplicity};

use super::fragment::Fragment;
use super::naming;
use super::zod::{prop, Prim, ZodExpr};

/// `<E>Schema`: the closed set of value names, declaration order.
pub fn build_enum_schema(def: &EnumDef) -> Fragment {
    Fragment::new(naming::enum_schema(&def.name), ZodExpr::enumeration(&def.values))
}

/// One filter fragment per multiplicity the enum is used with.
pub fn build_enum_filters(def: &EnumDef, usage: Usage) -> Vec<Fragment> {
    let value = ZodExpr::reference(naming::enum_schema(&def.name));

    naming::used_multiplicities(usage)
        .into_iter()
        .map(|multiplicity| {
            let name = naming::enum_filter(&def.name, multiplicity);
            let shape = match multiplicity {
                Multiplicity::Required => ZodExpr::strict_object(vec![
                    prop("equals", value.clone().optional()),
                    prop("in", value.clone().array().optional()),
                    prop("notIn", value.clone().array().optional()),
                    prop(
                        "not",
                        ZodExpr::union(vec![value.clone(), ZodExpr::reference(&name)]).optional(),
                    ),
                ]),
                Multiplicity::Nullable => ZodExpr::strict_object(vec![
                    prop("equals", value.clone().nullable().optional()),
                    prop("in", value.clone().array().nullable().optional()),
                    prop("notIn", value.clone().array().nullable().optional()),
                    prop(
                        "not",
                        ZodExpr::union(vec![value.clone(), ZodExpr::reference(&name)])
                            .nullable()
                            .optional(),
                    ),
                ]),
                Multiplicity::List => ZodExpr::strict_object(vec![
                    prop("equals", value.clone().array().nullable().optional()),
                    prop("has", value.clone().nullable().optional()),
                    prop("hasEvery", value.clone().array().optional()),
                    prop("hasSome", value.clone().array().optional()),
                    prop("isEmpty", ZodExpr::prim(Prim::Boolean).optional()),
                ]),
            };
            Fragment::new(name, shape)
        })
        .collect()
}

/// `{ set }` update fragments for single-valued enum fields.
pub fn build_enum_update_operations(def: &EnumDef, usage: Usage) -> Vec<Fragment> {
    let value = ZodExpr::reference(naming::enum_schema(&def.name));
    let mut fragments = Vec::new();
    if usage.required {
        fragments.push(Fragment::new(
            naming::enum_update_operations(&def.name, false),
            ZodExpr::strict_object(vec![prop("set", value.clone().optional())]),
        ));
    }
    if usage.nullable {
        fragments.push(Fragment::new(
            naming::enum_update_operations(&def.name, true),
            ZodExpr::strict_object(vec![prop("set", value.nullable().optional())]),
        ));
    }
    fragments
}
