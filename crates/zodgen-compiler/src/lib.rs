//! # zodgen Compiler
//!
//! This crate turns a resolved data-model graph (entities, fields, enums and
//! relations, as a DMMF JSON document) into one TypeScript file of Zod
//! schemas: filters, ordering, selection, create/update payloads and
//! operation arguments for every entity.
//!
//! ## Architecture
//!
//! ```text
//! DMMF JSON
//!        │
//!        ▼
//! ┌──────────────┐
//! │   Frontend   │  serde decoding
//! │ (JSON → IR)  │
//! └──────┬───────┘
//!        │
//!        ▼
//! ┌──────────────┐
//! │   Validate   │  Names, references, relation pairing
//! │   (IR)       │
//! └──────┬───────┘
//!        │
//!        ▼
//! ┌──────────────┐
//! │   Analysis   │  Graph facts, reverse relations
//! │   (IR)       │
//! └──────┬───────┘
//!        │
//!        ▼
//! ┌──────────────┐
//! │   Codegen    │  Fragments → one Zod file
//! │  (IR → TS)   │
//! └──────────────┘
//! ```
//!
//! ## Usage
//!
//! ```rust,ignore
//! use zodgen_compiler::{Compiler, CompilerConfig};
//!
//! let config = CompilerConfig {
//!     schema_path: "prisma/dmmf.json".into(),
//!     output: "generated/zod/index.ts".into(),
//!     skip_validation: false,
//! };
//!
//! let compiler = Compiler::new(config);
//! let result = compiler.compile()?;
//! println!("{} schemas", result.fragments);
//! ```

pub mod analysis;
pub mod codegen;
pub mod config;
pub mod diagnostic;
pub mod frontend;
pub mod ir;
pub mod validate;

pub use config::CompilerConfig;
pub use diagnostic::CompilerError;

/// The main compiler struct that orchestrates the generation pipeline.
pub struct Compiler {
    config: CompilerConfig,
}

impl Compiler {
    /// Creates a new compiler with the given configuration.
    pub fn new(config: CompilerConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &CompilerConfig {
        &self.config
    }

    /// Generates the schema file.
    ///
    /// This runs the full pipeline:
    /// 1. Load the data model
    /// 2. Validate it
    /// 3. Generate the schema document
    /// 4. Write the output file
    pub fn compile(&self) -> Result<CompileResult, CompilerError> {
        tracing::info!(schema = %self.config.schema_path.display(), "compiling data model");

        // Phase 1: Load
        let model = frontend::load_datamodel(&self.config.schema_path)?;

        // Phase 2: Validate
        if !self.config.skip_validation {
            validate::validate_model(&model)?;
        }

        // Phase 3: Generate
        let generated = codegen::generate(&model)?;

        // Phase 4: Write output
        self.write_output(&generated)?;

        let result = CompileResult {
            entities: model.entities.len(),
            enums: model.enums.len(),
            fragments: generated.fragments,
        };
        tracing::info!(
            output = %self.config.output.display(),
            entities = result.entities,
            enums = result.enums,
            fragments = result.fragments,
            "wrote schemas"
        );
        Ok(result)
    }

    /// Loads and validates the data model without generating code.
    pub fn check(&self) -> Result<CheckResult, CompilerError> {
        let model = frontend::load_datamodel(&self.config.schema_path)?;
        validate::validate_model(&model)?;
        Ok(CheckResult {
            entities: model.entities.len(),
            enums: model.enums.len(),
        })
    }

    /// Writes the generated file, replacing whatever was there.
    fn write_output(&self, generated: &codegen::GeneratedCode) -> Result<(), CompilerError> {
        let path = &self.config.output;
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)
                .map_err(|e| CompilerError::io(parent, e.to_string()))?;
        }
        std::fs::write(path, &generated.source).map_err(|e| CompilerError::io(path, e.to_string()))
    }
}

/// Result of a successful generation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CompileResult {
    /// Number of entities in the data model.
    pub entities: usize,
    /// Number of enums in the data model.
    pub enums: usize,
    /// Number of schema declarations written.
    pub fragments: usize,
}

/// Result of a successful check.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CheckResult {
    pub entities: usize,
    pub enums: usize,
}
