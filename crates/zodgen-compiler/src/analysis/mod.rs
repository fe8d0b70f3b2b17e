//! Graph analysis: facts computed once per run and read by every builder.

mod facts;
mod relations;

pub use facts::{GraphFacts, Usage};
pub use relations::{resolve_reverse, FieldId, RelationIndex};

use crate::ir::DataModel;

/// Everything the builders need to know about the graph beyond the IR itself.
#[derive(Debug, Clone)]
pub struct Analysis {
    pub facts: GraphFacts,
    pub relations: RelationIndex,
}

impl Analysis {
    pub fn run(model: &DataModel) -> Self {
        let facts = GraphFacts::analyze(model);
        let relations = RelationIndex::build(model);
        tracing::debug!(
            list_relation_targets = facts.list_relation_targets.len(),
            enums_used = facts.enum_usage.len(),
            scalar_types_used = facts.scalar_usage.len(),
            relation_edges = relations.edges().len(),
            "analyzed entity graph"
        );
        Self { facts, relations }
    }
}
