//! Usage facts derived from the whole entity graph.
//!
//! Emission decisions downstream read these instead of re-walking the graph:
//! a fragment that only makes sense for a combination the data model
//! actually uses is emitted only when that combination occurs.

use std::collections::{BTreeMap, BTreeSet};

use serde::Serialize;

use crate::ir::{DataModel, FieldKind, Multiplicity, ScalarType};

/// Positions a type is used in across the graph.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct Usage {
    /// Used on a required, single-valued field.
    pub required: bool,
    /// Used on an optional, single-valued field.
    pub nullable: bool,
    /// Used on a list field.
    pub list: bool,
}

impl Usage {
    fn record(&mut self, multiplicity: Multiplicity) {
        match multiplicity {
            Multiplicity::Required => self.required = true,
            Multiplicity::Nullable => self.nullable = true,
            Multiplicity::List => self.list = true,
        }
    }

    pub fn any(&self) -> bool {
        self.required || self.nullable || self.list
    }
}

/// Write-once facts about the graph, computed at the start of a run.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct GraphFacts {
    /// Entities that are the target of at least one list relation field.
    pub list_relation_targets: BTreeSet<String>,
    /// Entities that are the target of a required single-valued relation.
    pub required_relation_targets: BTreeSet<String>,
    /// Entities that are the target of an optional single-valued relation.
    pub nullable_relation_targets: BTreeSet<String>,
    /// Usage per enum name. Enums never used by a field have no entry.
    pub enum_usage: BTreeMap<String, Usage>,
    /// Usage per scalar type tag.
    #[serde(serialize_with = "serialize_scalar_usage")]
    pub scalar_usage: BTreeMap<ScalarType, Usage>,
}

impl GraphFacts {
    /// Single pass over every field of every entity.
    pub fn analyze(model: &DataModel) -> Self {
        let mut facts = Self::default();

        for entity in &model.entities {
            for field in &entity.fields {
                let multiplicity = field.multiplicity();
                match &field.kind {
                    FieldKind::Relation(rel) => {
                        let targets = match multiplicity {
                            Multiplicity::List => &mut facts.list_relation_targets,
                            Multiplicity::Required => &mut facts.required_relation_targets,
                            Multiplicity::Nullable => &mut facts.nullable_relation_targets,
                        };
                        targets.insert(rel.target.clone());
                    }
                    FieldKind::Enum(name) => {
                        facts
                            .enum_usage
                            .entry(name.clone())
                            .or_default()
                            .record(multiplicity);
                    }
                    FieldKind::Scalar(typ) => {
                        facts
                            .scalar_usage
                            .entry(typ.clone())
                            .or_default()
                            .record(multiplicity);
                    }
                }
            }
        }

        facts
    }

    pub fn is_list_relation_target(&self, entity: &str) -> bool {
        self.list_relation_targets.contains(entity)
    }

    pub fn is_required_relation_target(&self, entity: &str) -> bool {
        self.required_relation_targets.contains(entity)
    }

    pub fn is_nullable_relation_target(&self, entity: &str) -> bool {
        self.nullable_relation_targets.contains(entity)
    }

    pub fn enum_usage(&self, name: &str) -> Usage {
        self.enum_usage.get(name).copied().unwrap_or_default()
    }

    pub fn scalar_usage(&self, typ: &ScalarType) -> Usage {
        self.scalar_usage.get(typ).copied().unwrap_or_default()
    }

    pub fn uses_scalar(&self, typ: &ScalarType) -> bool {
        self.scalar_usage(typ).any()
    }
}

fn serialize_scalar_usage<S>(
    usage: &BTreeMap<ScalarType, Usage>,
    serializer: S,
) -> Result<S::Ok, S::Error>
where
    S: serde::Serializer,
{
    use serde::ser::SerializeMap;

    let mut map = serializer.serialize_map(Some(usage.len()))?;
    for (typ, usage) in usage {
        map.serialize_entry(&typ.to_string(), usage)?;
    }
    map.end()
}
