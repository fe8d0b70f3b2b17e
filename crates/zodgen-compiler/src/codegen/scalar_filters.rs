//! Per-type scalar filter and field-update fragments.
//!
//! Only the (type, multiplicity) combinations the graph actually uses are
//! emitted; builders reference them under the same condition, read from the
//! same facts.

use crate::analysis::GraphFacts;
use crate::ir::{Multiplicity, ScalarType};

use super::fragment::Fragment;
use super::naming;
use super::zod::{prop, Prim, ZodExpr};
use super::zod_types::map_type;

fn supports_membership(typ: &ScalarType) -> bool {
    !matches!(typ, ScalarType::Boolean | ScalarType::Json)
}

fn supports_ordering(typ: &ScalarType) -> bool {
    matches!(
        typ,
        ScalarType::String
            | ScalarType::Int
            | ScalarType::Float
            | ScalarType::BigInt
            | ScalarType::Decimal
            | ScalarType::DateTime
    )
}

/// Filter fragments for every scalar type and multiplicity in use.
pub fn build_scalar_filters(facts: &GraphFacts) -> Vec<Fragment> {
    let mut fragments = Vec::new();
    for (typ, usage) in &facts.scalar_usage {
        for multiplicity in naming::used_multiplicities(*usage) {
            if let Some(name) = naming::scalar_filter(typ, multiplicity) {
                let shape = filter_shape(typ, multiplicity, &name);
                fragments.push(Fragment::new(name, shape));
            }
        }
    }
    fragments
}

fn filter_shape(typ: &ScalarType, multiplicity: Multiplicity, name: &str) -> ZodExpr {
    let value = map_type(typ, false);
    let values = map_type(typ, true);

    if multiplicity == Multiplicity::List {
        return ZodExpr::strict_object(vec![
            prop("equals", values.clone().nullable().optional()),
            prop("has", value.nullable().optional()),
            prop("hasEvery", values.clone().optional()),
            prop("hasSome", values.optional()),
            prop("isEmpty", ZodExpr::prim(Prim::Boolean).optional()),
        ]);
    }

    let nullable = multiplicity == Multiplicity::Nullable;
    let maybe_null = |expr: ZodExpr| {
        if nullable {
            expr.nullable().optional()
        } else {
            expr.optional()
        }
    };

    let mut fields = vec![prop("equals", maybe_null(value.clone()))];

    if supports_membership(typ) {
        fields.push(prop("in", maybe_null(values.clone())));
        fields.push(prop("notIn", maybe_null(values)));
    }

    if supports_ordering(typ) {
        for op in ["lt", "lte", "gt", "gte"] {
            fields.push(prop(op, value.clone().optional()));
        }
    }

    match typ {
        ScalarType::String => {
            for op in ["contains", "startsWith", "endsWith"] {
                fields.push(prop(op, ZodExpr::prim(Prim::String).optional()));
            }
            fields.push(prop("mode", ZodExpr::reference(naming::QUERY_MODE).optional()));
        }
        ScalarType::Json => {
            fields.push(prop("path", ZodExpr::prim(Prim::String).array().optional()));
            for op in ["string_contains", "string_starts_with", "string_ends_with"] {
                fields.push(prop(op, ZodExpr::prim(Prim::String).optional()));
            }
            fields.push(prop("array_contains", value.clone().nullable().optional()));
            fields.push(prop("not", maybe_null(value)));
            return ZodExpr::strict_object(fields);
        }
        _ => {}
    }

    fields.push(prop(
        "not",
        maybe_null(ZodExpr::union(vec![value, ZodExpr::reference(name)])),
    ));
    ZodExpr::strict_object(fields)
}

/// Field-update fragments for every single-valued scalar type in use.
/// Numeric types also take arithmetic operations.
pub fn build_update_operations(facts: &GraphFacts) -> Vec<Fragment> {
    let mut fragments = Vec::new();
    for (typ, usage) in &facts.scalar_usage {
        for (used, nullable) in [(usage.required, false), (usage.nullable, true)] {
            if !used {
                continue;
            }
            let Some(name) = naming::scalar_update_operations(typ, nullable) else {
                continue;
            };
            let value = map_type(typ, false);
            let set = if nullable {
                value.clone().nullable().optional()
            } else {
                value.clone().optional()
            };
            let mut fields = vec![prop("set", set)];
            if typ.is_numeric() {
                for op in ["increment", "decrement", "multiply", "divide"] {
                    fields.push(prop(op, value.clone().optional()));
                }
            }
            fragments.push(Fragment::new(name, ZodExpr::strict_object(fields)));
        }
    }
    fragments
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::Usage;
    use crate::codegen::zod::ObjectShape;

    fn facts(entries: &[(ScalarType, Usage)]) -> GraphFacts {
        GraphFacts {
            scalar_usage: entries.iter().cloned().collect(),
            ..GraphFacts::default()
        }
    }

    fn shape(fragment: &Fragment) -> &ObjectShape {
        match &fragment.schema {
            ZodExpr::Object(shape) => shape,
            other => panic!("expected object, got {:?}", other),
        }
    }

    const REQUIRED: Usage = Usage {
        required: true,
        nullable: false,
        list: false,
    };

    #[test]
    fn test_only_used_combinations_are_emitted() {
        let nullable_string = Usage {
            nullable: true,
            ..Usage::default()
        };
        let names: Vec<String> = build_scalar_filters(&facts(&[
            (ScalarType::Int, REQUIRED),
            (ScalarType::String, nullable_string),
        ]))
        .into_iter()
        .map(|f| f.name)
        .collect();
        assert_eq!(names, vec!["StringNullableFilterSchema", "IntFilterSchema"]);
    }

    #[test]
    fn test_string_filter_has_text_operators() {
        let fragments = build_scalar_filters(&facts(&[(ScalarType::String, REQUIRED)]));
        let shape = shape(&fragments[0]);
        for key in ["equals", "in", "notIn", "lt", "contains", "startsWith", "endsWith", "mode", "not"] {
            assert!(shape.has_field(key), "missing {}", key);
        }
        assert!(shape.strict);
    }

    #[test]
    fn test_boolean_filter_is_minimal() {
        let fragments = build_scalar_filters(&facts(&[(ScalarType::Boolean, REQUIRED)]));
        assert_eq!(fragments[0].name, "BoolFilterSchema");
        let keys: Vec<&str> = shape(&fragments[0]).fields.iter().map(|(k, _)| k.as_str()).collect();
        assert_eq!(keys, vec!["equals", "not"]);
    }

    #[test]
    fn test_list_filter_shape() {
        let list = Usage {
            list: true,
            ..Usage::default()
        };
        let fragments = build_scalar_filters(&facts(&[(ScalarType::String, list)]));
        assert_eq!(fragments[0].name, "StringNullableListFilterSchema");
        assert!(shape(&fragments[0]).has_field("hasEvery"));
    }

    #[test]
    fn test_unrecognized_types_get_no_fragments() {
        let fragments = build_scalar_filters(&facts(&[(
            ScalarType::Unrecognized("Geometry".into()),
            REQUIRED,
        )]));
        assert!(fragments.is_empty());
    }

    #[test]
    fn test_numeric_update_operations() {
        let fragments = build_update_operations(&facts(&[
            (ScalarType::Int, REQUIRED),
            (ScalarType::String, REQUIRED),
            (ScalarType::Json, REQUIRED),
        ]));
        let names: Vec<&str> = fragments.iter().map(|f| f.name.as_str()).collect();
        assert_eq!(
            names,
            vec![
                "StringFieldUpdateOperationsInputSchema",
                "IntFieldUpdateOperationsInputSchema"
            ]
        );
        assert!(!shape(&fragments[0]).has_field("increment"));
        assert!(shape(&fragments[1]).has_field("increment"));
    }
}
