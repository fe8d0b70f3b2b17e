//! Language-agnostic data-model representation.
//!
//! The frontend turns the host's resolved graph into this IR; everything
//! downstream (validation, analysis, code generation) reads it and never
//! mutates it.

mod entity;
mod field;

pub use entity::{CompoundKey, Entity, UniqueConstraint};
pub use field::{Field, FieldKind, Multiplicity, RelationRef, ScalarType};

/// An enum and its value labels in declaration order.
#[derive(Debug, Clone, PartialEq)]
pub struct EnumDef {
    pub name: String,
    pub values: Vec<String>,
}

impl EnumDef {
    pub fn new(name: &str, values: &[&str]) -> Self {
        Self {
            name: name.to_string(),
            values: values.iter().map(|v| v.to_string()).collect(),
        }
    }
}

/// The complete, resolved data model for one generation run.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DataModel {
    pub entities: Vec<Entity>,
    pub enums: Vec<EnumDef>,
}

impl DataModel {
    pub fn new(entities: Vec<Entity>, enums: Vec<EnumDef>) -> Self {
        Self { entities, enums }
    }

    pub fn entity(&self, name: &str) -> Option<&Entity> {
        self.entities.iter().find(|e| e.name == name)
    }
}
