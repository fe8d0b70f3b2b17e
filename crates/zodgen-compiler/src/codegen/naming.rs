//! Fragment names.
//!
//! Builders cross-reference each other only through these names, never
//! through emitted text.

use crate::analysis::Usage;
use crate::ir::{Multiplicity, ScalarType};
use super::zod_types::to_pascal_case;

pub const SORT_ORDER: &str = "SortOrderSchema";
pub const QUERY_MODE: &str = "QueryModeSchema";
pub const NULLS_ORDER: &str = "NullsOrderSchema";
pub const SORT_ORDER_INPUT: &str = "SortOrderInputSchema";
pub const JSON_VALUE: &str = "JsonValueSchema";
pub const INPUT_JSON_VALUE: &str = "InputJsonValueSchema";

/// `<entity><suffix>Schema`.
pub fn entity_schema(entity: &str, suffix: &str) -> String {
    format!("{}{}Schema", entity, suffix)
}

pub fn enum_schema(name: &str) -> String {
    format!("{}Schema", name)
}

/// Filter fragment for a scalar type used with the given multiplicity.
pub fn scalar_filter(typ: &ScalarType, multiplicity: Multiplicity) -> Option<String> {
    let prefix = typ.fragment_prefix()?;
    Some(match multiplicity {
        Multiplicity::Required => format!("{}FilterSchema", prefix),
        Multiplicity::Nullable => format!("{}NullableFilterSchema", prefix),
        Multiplicity::List => format!("{}NullableListFilterSchema", prefix),
    })
}

/// Filter fragment for an enum used with the given multiplicity.
pub fn enum_filter(name: &str, multiplicity: Multiplicity) -> String {
    match multiplicity {
        Multiplicity::Required => format!("Enum{}FilterSchema", name),
        Multiplicity::Nullable => format!("Enum{}NullableFilterSchema", name),
        Multiplicity::List => format!("Enum{}NullableListFilterSchema", name),
    }
}

/// Update-operations fragment for a single-valued scalar. JSON and
/// unrecognized types have none: they take the value directly.
pub fn scalar_update_operations(typ: &ScalarType, nullable: bool) -> Option<String> {
    if matches!(typ, ScalarType::Json) {
        return None;
    }
    let prefix = typ.fragment_prefix()?;
    Some(if nullable {
        format!("Nullable{}FieldUpdateOperationsInputSchema", prefix)
    } else {
        format!("{}FieldUpdateOperationsInputSchema", prefix)
    })
}

pub fn enum_update_operations(name: &str, nullable: bool) -> String {
    if nullable {
        format!("NullableEnum{}FieldUpdateOperationsInputSchema", name)
    } else {
        format!("Enum{}FieldUpdateOperationsInputSchema", name)
    }
}

/// Multiplicities a usage record calls for, in emission order.
pub fn used_multiplicities(usage: Usage) -> Vec<Multiplicity> {
    let mut out = Vec::new();
    if usage.required {
        out.push(Multiplicity::Required);
    }
    if usage.nullable {
        out.push(Multiplicity::Nullable);
    }
    if usage.list {
        out.push(Multiplicity::List);
    }
    out
}

/// Name of a nested-input fragment on `target` keyed by the reverse field:
/// `<target><before>Without<Reverse><after>Schema`.
pub fn without(target: &str, before: &str, reverse_field: &str, after: &str) -> String {
    format!(
        "{}{}Without{}{}Schema",
        target,
        before,
        to_pascal_case(reverse_field),
        after
    )
}

/// `<target>CreateMany<Reverse><suffix>Schema`.
pub fn create_many_for(target: &str, reverse_field: &str, suffix: &str) -> String {
    format!(
        "{}CreateMany{}{}Schema",
        target,
        to_pascal_case(reverse_field),
        suffix
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_filter_names() {
        assert_eq!(
            scalar_filter(&ScalarType::String, Multiplicity::Nullable).as_deref(),
            Some("StringNullableFilterSchema")
        );
        assert_eq!(
            scalar_filter(&ScalarType::Boolean, Multiplicity::Required).as_deref(),
            Some("BoolFilterSchema")
        );
        assert_eq!(
            scalar_filter(&ScalarType::Unrecognized("x".into()), Multiplicity::Required),
            None
        );
        assert_eq!(enum_filter("Status", Multiplicity::List), "EnumStatusNullableListFilterSchema");
    }

    #[test]
    fn test_update_operation_names() {
        assert_eq!(
            scalar_update_operations(&ScalarType::Int, true).as_deref(),
            Some("NullableIntFieldUpdateOperationsInputSchema")
        );
        assert_eq!(scalar_update_operations(&ScalarType::Json, false), None);
        assert_eq!(enum_update_operations("Role", false), "EnumRoleFieldUpdateOperationsInputSchema");
    }

    #[test]
    fn test_without_names() {
        assert_eq!(
            without("Account", "CreateNestedOne", "ownedTeams", "Input"),
            "AccountCreateNestedOneWithoutOwnedTeamsInputSchema"
        );
        assert_eq!(
            without("Account", "UpdateOneRequired", "ownedTeams", "NestedInput"),
            "AccountUpdateOneRequiredWithoutOwnedTeamsNestedInputSchema"
        );
        assert_eq!(
            create_many_for("Team", "owner", "InputEnvelope"),
            "TeamCreateManyOwnerInputEnvelopeSchema"
        );
    }
}
