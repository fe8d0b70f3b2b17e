//! Structure validation for the data model.
//!
//! Validates that names are unique and that every name a field or constraint
//! refers to is declared.

use std::collections::HashSet;

use crate::diagnostic::CompilerError;
use crate::ir::{DataModel, Entity, FieldKind};

/// Validates the structure of the data model.
pub fn validate_structure(model: &DataModel) -> Result<(), CompilerError> {
    let mut enum_names = HashSet::new();
    for def in &model.enums {
        if !enum_names.insert(def.name.as_str()) {
            return Err(CompilerError::DuplicateEnum {
                name: def.name.clone(),
            });
        }
    }

    let mut entity_names = HashSet::new();
    for entity in &model.entities {
        if !entity_names.insert(entity.name.as_str()) {
            return Err(CompilerError::DuplicateEntity {
                name: entity.name.clone(),
            });
        }
    }

    for entity in &model.entities {
        validate_entity(entity, &entity_names, &enum_names)?;
    }
    Ok(())
}

/// Validates one entity's fields and constraints.
fn validate_entity(
    entity: &Entity,
    entity_names: &HashSet<&str>,
    enum_names: &HashSet<&str>,
) -> Result<(), CompilerError> {
    let mut field_names = HashSet::new();
    for field in &entity.fields {
        if !field_names.insert(field.name.as_str()) {
            return Err(CompilerError::DuplicateField {
                entity: entity.name.clone(),
                field: field.name.clone(),
            });
        }
    }

    let unknown = |field: &str, context: String| CompilerError::UnknownField {
        entity: entity.name.clone(),
        field: field.to_string(),
        context,
    };

    for field in &entity.fields {
        match &field.kind {
            FieldKind::Scalar(_) => {}
            FieldKind::Enum(name) => {
                if !enum_names.contains(name.as_str()) {
                    return Err(CompilerError::UnknownEnum {
                        entity: entity.name.clone(),
                        field: field.name.clone(),
                        enum_name: name.clone(),
                    });
                }
            }
            FieldKind::Relation(rel) => {
                if !entity_names.contains(rel.target.as_str()) {
                    return Err(CompilerError::DanglingRelation {
                        entity: entity.name.clone(),
                        field: field.name.clone(),
                        target: rel.target.clone(),
                    });
                }
                for key in &rel.from_fields {
                    if !field_names.contains(key.as_str()) {
                        return Err(unknown(key, format!("relation '{}'", field.name)));
                    }
                }
            }
        }
    }

    let compound = entity.primary_key.iter().chain(&entity.compound_uniques);
    for key in compound {
        for name in &key.fields {
            if !field_names.contains(name.as_str()) {
                return Err(unknown(name, "a unique constraint".to_string()));
            }
        }
    }

    Ok(())
}
