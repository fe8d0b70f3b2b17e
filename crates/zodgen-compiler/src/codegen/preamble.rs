//! Shared primitives every generated file starts with.

use crate::ir::ScalarType;

use super::context::BuildContext;
use super::fragment::Fragment;
use super::naming;
use super::zod::{prop, Prim, ZodExpr};

/// Sort direction, string match mode, null placement and the sort-with-nulls
/// object. The JSON value schemas are added only when some field carries
/// JSON: `JsonValueSchema` admits null inside arrays and records, while the
/// field-level `InputJsonValueSchema` does not, so null on a JSON field
/// comes only from its nullability.
pub fn build_preamble(ctx: &BuildContext<'_>) -> Vec<Fragment> {
    let mut fragments = vec![
        Fragment::new(naming::SORT_ORDER, ZodExpr::enumeration(&["asc", "desc"])),
        Fragment::new(
            naming::QUERY_MODE,
            ZodExpr::enumeration(&["default", "insensitive"]),
        ),
        Fragment::new(naming::NULLS_ORDER, ZodExpr::enumeration(&["first", "last"])),
        Fragment::new(
            naming::SORT_ORDER_INPUT,
            ZodExpr::strict_object(vec![
                prop("sort", ZodExpr::reference(naming::SORT_ORDER)),
                prop("nulls", ZodExpr::reference(naming::NULLS_ORDER).optional()),
            ]),
        ),
    ];

    if ctx.facts.uses_scalar(&ScalarType::Json) {
        let json = ZodExpr::reference(naming::JSON_VALUE);
        fragments.push(Fragment::new(
            naming::JSON_VALUE,
            ZodExpr::union(vec![
                ZodExpr::prim(Prim::String),
                ZodExpr::prim(Prim::Number),
                ZodExpr::prim(Prim::Boolean),
                ZodExpr::prim(Prim::Null),
                json.clone().array(),
                json.clone().record(),
            ]),
        ));
        fragments.push(Fragment::new(
            naming::INPUT_JSON_VALUE,
            ZodExpr::union(vec![
                ZodExpr::prim(Prim::String),
                ZodExpr::prim(Prim::Number),
                ZodExpr::prim(Prim::Boolean),
                json.clone().array(),
                json.record(),
            ]),
        ));
    }

    fragments
}
