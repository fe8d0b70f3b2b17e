//! Relation pairing validation.

use crate::analysis::resolve_reverse;
use crate::diagnostic::CompilerError;
use crate::ir::DataModel;

/// Validates that every relation field has a reverse field on its target.
pub fn validate_relations(model: &DataModel) -> Result<(), CompilerError> {
    for entity in &model.entities {
        for field in entity.relation_fields() {
            let Some(rel) = field.relation_ref() else {
                continue;
            };
            // Dangling targets are reported by the structure pass.
            let Some(target) = model.entity(&rel.target) else {
                continue;
            };
            if resolve_reverse(entity, field, target).is_none() {
                return Err(CompilerError::UnpairedRelation {
                    entity: entity.name.clone(),
                    field: field.name.clone(),
                    target: rel.target.clone(),
                    relation: rel.name.clone(),
                });
            }
        }
    }
    Ok(())
}
