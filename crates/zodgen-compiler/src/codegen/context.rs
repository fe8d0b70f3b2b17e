//! Read-only inputs shared by every builder.

use crate::analysis::{Analysis, GraphFacts, RelationIndex};
use crate::ir::{DataModel, Entity, Field};

/// The graph plus the facts derived from it.
#[derive(Clone, Copy)]
pub struct BuildContext<'a> {
    pub model: &'a DataModel,
    pub facts: &'a GraphFacts,
    pub relations: &'a RelationIndex,
}

/// A relation field's far side: the target entity and the field on it that
/// points back.
#[derive(Debug, Clone, Copy)]
pub struct Edge<'a> {
    pub target: &'a Entity,
    pub reverse: &'a Field,
}

impl<'a> BuildContext<'a> {
    pub fn new(model: &'a DataModel, analysis: &'a Analysis) -> Self {
        Self {
            model,
            facts: &analysis.facts,
            relations: &analysis.relations,
        }
    }

    /// Resolves the far side of `owner.field`. `None` for scalar fields and
    /// for relations the upstream graph left unpaired.
    pub fn edge(&self, owner: &Entity, field: &Field) -> Option<Edge<'a>> {
        let rel = field.relation_ref()?;
        let target = self.model.entity(&rel.target)?;
        let reverse_name = self.relations.reverse_of(&owner.name, &field.name)?;
        let reverse = target.field(reverse_name)?;
        Some(Edge { target, reverse })
    }
}
