//! Validation of the data-model IR.

mod relation;
mod structure;

use crate::diagnostic::CompilerError;
use crate::ir::DataModel;

/// Validates the entire data model. The first violation found is returned.
pub fn validate_model(model: &DataModel) -> Result<(), CompilerError> {
    // Names, references and constraint fields
    structure::validate_structure(model)?;

    // Every relation has a reverse side
    relation::validate_relations(model)?;

    Ok(())
}
