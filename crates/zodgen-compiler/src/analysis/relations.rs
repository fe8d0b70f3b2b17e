//! Reverse-relation resolution.
//!
//! Every relation edge `A.f -> B` is paired with the field on `B` that points
//! back at `A` through the same relation name. The nested create/update
//! families on `B` are keyed by that reverse field, so the pairing is computed
//! once per edge and looked up by the builders.

use std::collections::HashMap;

use serde::Serialize;

use crate::ir::{DataModel, Entity, Field};

/// Identity of a field: owning entity plus field name.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct FieldId {
    pub entity: String,
    pub field: String,
}

impl FieldId {
    pub fn new(entity: &str, field: &str) -> Self {
        Self {
            entity: entity.to_string(),
            field: field.to_string(),
        }
    }
}

/// Reverse field for every relation field whose pair could be found.
#[derive(Debug, Clone, Default)]
pub struct RelationIndex {
    reverse: HashMap<FieldId, String>,
}

impl RelationIndex {
    pub fn build(model: &DataModel) -> Self {
        let mut reverse = HashMap::new();

        for entity in &model.entities {
            for field in entity.relation_fields() {
                let Some(rel) = field.relation_ref() else {
                    continue;
                };
                let Some(target) = model.entity(&rel.target) else {
                    continue;
                };
                if let Some(back) = resolve_reverse(entity, field, target) {
                    reverse.insert(FieldId::new(&entity.name, &field.name), back.name.clone());
                }
            }
        }

        Self { reverse }
    }

    /// Name of the field on the target entity that points back through the
    /// same relation.
    pub fn reverse_of(&self, entity: &str, field: &str) -> Option<&str> {
        self.reverse
            .get(&FieldId::new(entity, field))
            .map(String::as_str)
    }

    /// Sorted `(edge, reverse field)` pairs.
    pub fn edges(&self) -> Vec<(&FieldId, &str)> {
        let mut edges: Vec<_> = self
            .reverse
            .iter()
            .map(|(id, back)| (id, back.as_str()))
            .collect();
        edges.sort();
        edges
    }
}

/// Finds the reverse of `owner.field` among `target`'s fields.
///
/// Candidates share the relation name and point back at `owner`; the field
/// itself is excluded, which matters for self-relations. Candidates with the
/// same list-ness as `field` win a tie, then declaration order inside
/// `target`.
pub fn resolve_reverse<'a>(owner: &Entity, field: &Field, target: &'a Entity) -> Option<&'a Field> {
    let rel = field.relation_ref()?;

    let candidates: Vec<&Field> = target
        .relation_fields()
        .filter(|candidate| {
            let Some(back) = candidate.relation_ref() else {
                return false;
            };
            let is_same_field = target.name == owner.name && candidate.name == field.name;
            back.name == rel.name && back.target == owner.name && !is_same_field
        })
        .collect();

    if candidates.len() > 1 {
        if let Some(matching) = candidates.iter().find(|c| c.is_list == field.is_list) {
            return Some(*matching);
        }
    }

    candidates.into_iter().next()
}
