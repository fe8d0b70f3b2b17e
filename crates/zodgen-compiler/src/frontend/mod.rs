//! Input frontend: loads the host's resolved data model into the IR.
//!
//! The host toolchain owns schema parsing and relation resolution. It hands
//! the generator a DMMF JSON document; this module only deserializes that
//! document and maps it onto [`DataModel`].

pub mod dmmf;
mod to_ir;

use std::path::Path;

use crate::diagnostic::CompilerError;
use crate::ir::DataModel;
use dmmf::DmmfDocument;

pub use to_ir::datamodel_to_ir;

/// Reads and parses a DMMF document from disk.
pub fn load_datamodel(path: &Path) -> Result<DataModel, CompilerError> {
    let content =
        std::fs::read_to_string(path).map_err(|e| CompilerError::io(path, e.to_string()))?;

    parse_datamodel(&content, path)
}

/// Parses a DMMF document. `path` is only used for diagnostics.
pub fn parse_datamodel(source: &str, path: &Path) -> Result<DataModel, CompilerError> {
    let document: DmmfDocument =
        serde_json::from_str(source).map_err(|e| CompilerError::MalformedInput {
            path: path.to_path_buf(),
            message: e.to_string(),
            line: e.line(),
            column: e.column(),
        })?;

    let model = datamodel_to_ir(document.into_datamodel());
    tracing::debug!(
        entities = model.entities.len(),
        enums = model.enums.len(),
        "loaded data model"
    );
    Ok(model)
}
