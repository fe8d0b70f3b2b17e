//! Zod type mapping from field types.

use crate::ir::{Field, FieldKind, ScalarType};
use super::naming;
use super::zod::{Prim, ZodExpr};

/// Maps a primitive type tag to its schema expression.
///
/// Total: unrecognized tags accept anything. Timestamps accept either a
/// native date or an ISO-8601 string; for lists the union is distributed
/// over the list so each arm stays homogeneous.
pub fn map_type(typ: &ScalarType, is_list: bool) -> ZodExpr {
    match typ {
        ScalarType::DateTime if is_list => ZodExpr::union(vec![
            ZodExpr::prim(Prim::Date).array(),
            ZodExpr::prim(Prim::IsoDateTime).array(),
        ]),
        other => {
            let single = map_single(other);
            if is_list {
                single.array()
            } else {
                single
            }
        }
    }
}

fn map_single(typ: &ScalarType) -> ZodExpr {
    match typ {
        ScalarType::String => ZodExpr::prim(Prim::String),
        ScalarType::Int => ZodExpr::prim(Prim::Int),
        ScalarType::Float => ZodExpr::prim(Prim::Number),
        ScalarType::BigInt => ZodExpr::prim(Prim::BigInt),
        ScalarType::Decimal => {
            ZodExpr::union(vec![ZodExpr::prim(Prim::Number), ZodExpr::prim(Prim::String)])
        }
        ScalarType::Boolean => ZodExpr::prim(Prim::Boolean),
        ScalarType::DateTime => {
            ZodExpr::union(vec![ZodExpr::prim(Prim::Date), ZodExpr::prim(Prim::IsoDateTime)])
        }
        ScalarType::Json => ZodExpr::reference(naming::INPUT_JSON_VALUE),
        ScalarType::Bytes => ZodExpr::prim(Prim::Bytes),
        ScalarType::Unrecognized(_) => ZodExpr::prim(Prim::Any),
    }
}

/// Value expression for a scalar or enum field, honoring its list-ness.
/// `None` for relation fields.
pub fn field_value(field: &Field) -> Option<ZodExpr> {
    field_value_as(field, field.is_list)
}

/// Value expression for a scalar or enum field, single or list as asked.
pub fn field_value_as(field: &Field, is_list: bool) -> Option<ZodExpr> {
    match &field.kind {
        FieldKind::Scalar(typ) => Some(map_type(typ, is_list)),
        FieldKind::Enum(name) => {
            let single = ZodExpr::reference(naming::enum_schema(name));
            Some(if is_list { single.array() } else { single })
        }
        FieldKind::Relation(_) => None,
    }
}

/// Converts a camelCase or snake_case name to PascalCase.
pub fn to_pascal_case(s: &str) -> String {
    s.split('_')
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                None => String::new(),
                Some(first) => first.to_uppercase().chain(chars).collect(),
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::codegen::zod::render_standalone;

    fn emit(typ: ScalarType, is_list: bool) -> String {
        render_standalone(&map_type(&typ, is_list))
    }

    #[test]
    fn test_primitive_types() {
        assert_eq!(emit(ScalarType::String, false), "z.string()");
        assert_eq!(emit(ScalarType::Int, false), "z.number().int()");
        assert_eq!(emit(ScalarType::Float, false), "z.number()");
        assert_eq!(emit(ScalarType::BigInt, false), "z.bigint()");
        assert_eq!(emit(ScalarType::Boolean, false), "z.boolean()");
        assert_eq!(emit(ScalarType::Bytes, false), "z.instanceof(Uint8Array)");
        assert_eq!(emit(ScalarType::Decimal, false), "z.union([z.number(), z.string()])");
        assert_eq!(emit(ScalarType::Json, false), "InputJsonValueSchema");
    }

    #[test]
    fn test_datetime_accepts_date_or_iso_string() {
        assert_eq!(
            emit(ScalarType::DateTime, false),
            "z.union([z.date(), z.string().datetime()])"
        );
    }

    #[test]
    fn test_datetime_list_distributes_union() {
        assert_eq!(
            emit(ScalarType::DateTime, true),
            "z.union([z.date().array(), z.string().datetime().array()])"
        );
    }

    #[test]
    fn test_list_wrapping() {
        assert_eq!(emit(ScalarType::String, true), "z.string().array()");
        assert_eq!(emit(ScalarType::Int, true), "z.number().int().array()");
    }

    #[test]
    fn test_unrecognized_falls_back_to_any() {
        assert_eq!(emit(ScalarType::Unrecognized("Geometry".into()), false), "z.any()");
        assert_eq!(emit(ScalarType::Unrecognized("Geometry".into()), true), "z.any().array()");
    }

    #[test]
    fn test_enum_field_value() {
        let field = Field::enumeration("roles", "Role").list();
        assert_eq!(render_standalone(&field_value(&field).unwrap()), "RoleSchema.array()");
        let relation = Field::relation("owner", "Account", "TeamOwner");
        assert!(field_value(&relation).is_none());
    }

    #[test]
    fn test_case_conversions() {
        assert_eq!(to_pascal_case("ownedTeams"), "OwnedTeams");
        assert_eq!(to_pascal_case("owned_teams"), "OwnedTeams");
    }
}
