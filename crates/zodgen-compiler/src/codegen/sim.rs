//! Evaluates schema trees against JSON values the way the validation library
//! does: union arms in order with the first success winning, objects
//! rejecting arrays, strict objects rejecting unknown keys, and optional
//! wrappers accepting absent keys.

use serde_json::{Map, Value};

use super::fragment::Document;
use super::zod::{ObjectShape, Prim, ZodExpr};

pub struct Interpreter<'a> {
    document: &'a Document,
}

impl<'a> Interpreter<'a> {
    pub fn new(document: &'a Document) -> Self {
        Self { document }
    }

    /// Parses `value` against the named fragment, returning the parsed output.
    pub fn parse(&self, schema: &str, value: &Value) -> Result<Value, String> {
        self.eval(&ZodExpr::reference(schema), value)
    }

    fn eval(&self, expr: &ZodExpr, value: &Value) -> Result<Value, String> {
        match expr {
            ZodExpr::Prim(prim) => eval_prim(*prim, value),
            ZodExpr::Ref(name) => {
                let fragment = self
                    .document
                    .fragment(name)
                    .ok_or_else(|| format!("undefined schema {}", name))?;
                self.eval(&fragment.schema, value)
            }
            ZodExpr::Enum(values) => match value {
                Value::String(s) if values.contains(s) => Ok(value.clone()),
                other => Err(format!("{} is not one of {:?}", other, values)),
            },
            ZodExpr::Object(shape) => self.eval_object(shape, value),
            ZodExpr::Union(arms) => {
                let mut errors = Vec::new();
                for arm in arms {
                    match self.eval(arm, value) {
                        Ok(parsed) => return Ok(parsed),
                        Err(e) => errors.push(e),
                    }
                }
                Err(format!("no union arm matched: {}", errors.join("; ")))
            }
            ZodExpr::Array(item) => match value {
                Value::Array(items) => items
                    .iter()
                    .map(|item_value| self.eval(item, item_value))
                    .collect::<Result<Vec<_>, _>>()
                    .map(Value::Array),
                other => Err(format!("expected array, got {}", other)),
            },
            ZodExpr::Record(item) => match value {
                Value::Object(entries) => {
                    let mut out = Map::new();
                    for (key, entry) in entries {
                        out.insert(key.clone(), self.eval(item, entry)?);
                    }
                    Ok(Value::Object(out))
                }
                other => Err(format!("expected record, got {}", other)),
            },
            ZodExpr::Optional(inner) => self.eval(inner, value),
            ZodExpr::Nullable(inner) | ZodExpr::Nullish(inner) => {
                if value.is_null() {
                    Ok(Value::Null)
                } else {
                    self.eval(inner, value)
                }
            }
        }
    }

    fn eval_object(&self, shape: &ObjectShape, value: &Value) -> Result<Value, String> {
        let Value::Object(entries) = value else {
            return Err(format!("expected object, got {}", value));
        };

        if shape.strict {
            if let Some(unknown) = entries.keys().find(|key| !shape.has_field(key)) {
                return Err(format!("unrecognized key {}", unknown));
            }
        }

        let mut out = Map::new();
        for (key, expr) in &shape.fields {
            match entries.get(key) {
                Some(entry) => {
                    out.insert(key.clone(), self.eval(expr, entry)?);
                }
                None if accepts_absent(expr) => {}
                None => return Err(format!("missing required key {}", key)),
            }
        }
        Ok(Value::Object(out))
    }
}

fn accepts_absent(expr: &ZodExpr) -> bool {
    matches!(expr, ZodExpr::Optional(_) | ZodExpr::Nullish(_))
}

fn eval_prim(prim: Prim, value: &Value) -> Result<Value, String> {
    let ok = match prim {
        Prim::String => value.is_string(),
        Prim::Int => value.as_f64().is_some_and(|n| n.fract() == 0.0),
        Prim::Number => value.is_number(),
        Prim::Boolean => value.is_boolean(),
        Prim::IsoDateTime => value.as_str().is_some_and(is_iso_datetime),
        Prim::Any => true,
        Prim::Null => value.is_null(),
        Prim::True => value == &Value::Bool(true),
        // No JSON value is a bigint, a native date or a byte array.
        Prim::BigInt | Prim::Date | Prim::Bytes => false,
    };
    if ok {
        Ok(value.clone())
    } else {
        Err(format!("{} rejected by {:?}", value, prim))
    }
}

/// `YYYY-MM-DDTHH:MM:SS[.fraction]Z` with field ranges checked. Days are
/// not checked against the month's length.
fn is_iso_datetime(s: &str) -> bool {
    let Some(body) = s.strip_suffix('Z') else {
        return false;
    };
    let (main, fraction) = match body.split_once('.') {
        Some((main, fraction)) => (main, Some(fraction)),
        None => (body, None),
    };
    if let Some(fraction) = fraction {
        if fraction.is_empty() || !fraction.bytes().all(|b| b.is_ascii_digit()) {
            return false;
        }
    }

    let bytes = main.as_bytes();
    if bytes.len() != 19
        || bytes[4] != b'-'
        || bytes[7] != b'-'
        || bytes[10] != b'T'
        || bytes[13] != b':'
        || bytes[16] != b':'
    {
        return false;
    }

    let number = |range: std::ops::Range<usize>| {
        main.get(range)
            .filter(|digits| digits.bytes().all(|b| b.is_ascii_digit()))
            .and_then(|digits| digits.parse::<u32>().ok())
    };
    matches!(
        (
            number(0..4),
            number(5..7),
            number(8..10),
            number(11..13),
            number(14..16),
            number(17..19),
        ),
        (Some(_), Some(1..=12), Some(1..=31), Some(0..=23), Some(0..=59), Some(0..=59))
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::codegen::build_document;
    use crate::codegen::fixtures::workspace_model;
    use crate::ir::{DataModel, Entity, Field, ScalarType};
    use serde_json::json;

    fn document_model() -> DataModel {
        DataModel::new(
            vec![Entity::new(
                "Doc",
                vec![
                    Field::scalar("id", ScalarType::Int).id(),
                    Field::scalar("meta", ScalarType::Json),
                    Field::scalar("title", ScalarType::String),
                ],
            )],
            vec![],
        )
    }

    #[test]
    fn test_and_array_parses_as_array() {
        let document = build_document(&workspace_model());
        let sim = Interpreter::new(&document);
        let parsed = sim
            .parse(
                "AccountWhereInputSchema",
                &json!({ "AND": [{ "email": "a@example.com" }, { "id": { "gt": 3 } }] }),
            )
            .unwrap();
        let and = parsed.get("AND").unwrap();
        assert!(and.is_array());
        assert_eq!(and.as_array().unwrap().len(), 2);
        assert_eq!(and[1], json!({ "id": { "gt": 3 } }));
    }

    #[test]
    fn test_single_and_condition_still_accepted() {
        let document = build_document(&workspace_model());
        let sim = Interpreter::new(&document);
        let parsed = sim
            .parse("AccountWhereInputSchema", &json!({ "AND": { "name": null } }))
            .unwrap();
        assert_eq!(parsed, json!({ "AND": { "name": null } }));
    }

    #[test]
    fn test_strict_inputs_reject_unknown_keys() {
        let document = build_document(&workspace_model());
        let sim = Interpreter::new(&document);
        assert!(sim
            .parse("AccountWhereInputSchema", &json!({ "emial": "typo" }))
            .is_err());
    }

    #[test]
    fn test_base_shape_nullish() {
        let document = build_document(&workspace_model());
        let sim = Interpreter::new(&document);
        let account = json!({
            "id": 1,
            "email": "a@example.com",
            "balance": "10.50",
            "createdAt": "2024-01-01T00:00:00Z",
            "updatedAt": "2024-01-01T00:00:00.000Z",
        });
        assert!(sim.parse("AccountSchema", &account).is_ok());
        assert!(sim.parse("AccountSchema", &json!({ "id": 1 })).is_err());
    }

    #[test]
    fn test_unique_lookup_takes_one_constraint() {
        let document = build_document(&workspace_model());
        let sim = Interpreter::new(&document);
        assert!(sim.parse("AccountWhereUniqueInputSchema", &json!({ "id": 1 })).is_ok());
        assert!(sim
            .parse("AccountWhereUniqueInputSchema", &json!({ "email": "a@example.com" }))
            .is_ok());
        assert!(sim
            .parse("AccountWhereUniqueInputSchema", &json!({ "id": 1, "email": "a@example.com" }))
            .is_err());
    }

    #[test]
    fn test_required_relation_must_be_given_on_create() {
        let document = build_document(&workspace_model());
        let sim = Interpreter::new(&document);
        assert!(sim.parse("TeamCreateInputSchema", &json!({ "title": "Core" })).is_err());
        assert!(sim
            .parse(
                "TeamCreateInputSchema",
                &json!({ "title": "Core", "owner": { "connect": { "id": 1 } } })
            )
            .is_ok());
        assert!(sim
            .parse("TeamUncheckedCreateInputSchema", &json!({ "title": "Core", "ownerId": 1 }))
            .is_ok());
    }

    #[test]
    fn test_nullable_relation_filter_accepts_null() {
        let document = build_document(&workspace_model());
        let sim = Interpreter::new(&document);
        assert!(sim
            .parse("CategoryWhereInputSchema", &json!({ "parent": null }))
            .is_ok());
        assert!(sim
            .parse("CategoryWhereInputSchema", &json!({ "parent": { "is": null } }))
            .is_ok());
    }

    #[test]
    fn test_required_json_field_rejects_null() {
        let document = build_document(&document_model());
        let sim = Interpreter::new(&document);

        let null_meta = json!({ "id": 1, "meta": null, "title": "a" });
        assert!(sim.parse("DocSchema", &null_meta).is_err());
        assert!(sim.parse("DocCreateInputSchema", &null_meta).is_err());
        assert!(sim.parse("DocUpdateInputSchema", &json!({ "meta": null })).is_err());

        let nested_null = json!({ "id": 1, "meta": { "tags": [1, null], "extra": null }, "title": "a" });
        assert!(sim.parse("DocSchema", &nested_null).is_ok());
        assert!(sim.parse("DocCreateInputSchema", &nested_null).is_ok());
        assert!(sim.parse("DocUpdateInputSchema", &json!({ "meta": ["x", 2] })).is_ok());
    }

    #[test]
    fn test_nullable_json_field_accepts_null() {
        let document = build_document(&workspace_model());
        let sim = Interpreter::new(&document);
        assert!(sim
            .parse("TeamUpdateInputSchema", &json!({ "settings": null }))
            .is_ok());
    }

    #[test]
    fn test_iso_datetime_checks_ranges() {
        assert!(is_iso_datetime("2024-01-01T00:00:00Z"));
        assert!(is_iso_datetime("2024-12-31T23:59:59.123Z"));
        assert!(!is_iso_datetime("2024-13-99T99:99:99Z"));
        assert!(!is_iso_datetime("2024-01-01T00:00:00"));
        assert!(!is_iso_datetime("2024-01-01T00:00:00.Z"));
        assert!(!is_iso_datetime("2024-01-01 00:00:00Z"));
    }
}
