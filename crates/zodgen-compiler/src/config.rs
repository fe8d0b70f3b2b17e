//! Generator configuration.

use std::path::PathBuf;

/// Configuration for the zodgen compiler.
#[derive(Debug, Clone)]
pub struct CompilerConfig {
    /// DMMF JSON document describing the data model.
    pub schema_path: PathBuf,

    /// File the generated schemas are written to.
    pub output: PathBuf,

    /// Skip structural validation (for hosts that guarantee a resolved graph).
    pub skip_validation: bool,
}

impl Default for CompilerConfig {
    fn default() -> Self {
        Self {
            schema_path: PathBuf::from("dmmf.json"),
            output: PathBuf::from("generated/zod/index.ts"),
            skip_validation: false,
        }
    }
}
