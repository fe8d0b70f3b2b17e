//! Compiler error types.
#![allow(unused_assignments)]

use std::path::PathBuf;
use miette::Diagnostic;
use thiserror::Error;

/// Errors that can occur during generation.
#[allow(unused_assignments)]
#[derive(Error, Diagnostic, Debug)]
pub enum CompilerError {
    // =========================================================================
    // IO Errors
    // =========================================================================
    #[error("Failed to access '{}': {message}", path.display())]
    #[diagnostic(code(zodgen::io::access_failed))]
    IoError {
        path: PathBuf,
        message: String,
    },

    // =========================================================================
    // Input Errors
    // =========================================================================
    #[error("Malformed data model in '{}' at line {line}, column {column}: {message}", path.display())]
    #[diagnostic(
        code(zodgen::input::malformed),
        help("The input must be a DMMF document: {{ \"datamodel\": {{ \"models\": [...], \"enums\": [...] }} }}")
    )]
    MalformedInput {
        path: PathBuf,
        message: String,
        line: usize,
        column: usize,
    },

    // =========================================================================
    // Structure Errors
    // =========================================================================
    #[error("Duplicate entity name: {name}")]
    #[diagnostic(code(zodgen::structure::duplicate_entity))]
    DuplicateEntity {
        name: String,
    },

    #[error("Duplicate enum name: {name}")]
    #[diagnostic(code(zodgen::structure::duplicate_enum))]
    DuplicateEnum {
        name: String,
    },

    #[error("Entity '{entity}' declares field '{field}' more than once")]
    #[diagnostic(code(zodgen::structure::duplicate_field))]
    DuplicateField {
        entity: String,
        field: String,
    },

    #[error("Field '{entity}.{field}' references unknown entity '{target}'")]
    #[diagnostic(
        code(zodgen::structure::dangling_relation),
        help("Every relation target must be declared in the same data model")
    )]
    DanglingRelation {
        entity: String,
        field: String,
        target: String,
    },

    #[error("Field '{entity}.{field}' references unknown enum '{enum_name}'")]
    #[diagnostic(code(zodgen::structure::unknown_enum))]
    UnknownEnum {
        entity: String,
        field: String,
        enum_name: String,
    },

    #[error("Entity '{entity}' refers to missing field '{field}' in {context}")]
    #[diagnostic(code(zodgen::structure::unknown_field))]
    UnknownField {
        entity: String,
        field: String,
        context: String,
    },

    #[error("Relation field '{entity}.{field}' has no matching field on '{target}' for relation '{relation}'")]
    #[diagnostic(
        code(zodgen::structure::unpaired_relation),
        help("Both sides of a relation must be declared with the same relation name")
    )]
    UnpairedRelation {
        entity: String,
        field: String,
        target: String,
        relation: String,
    },

    // =========================================================================
    // Code Generation Errors
    // =========================================================================
    #[error("Failed to generate schemas: {message}")]
    #[diagnostic(code(zodgen::codegen::generation_failed))]
    CodegenFailed {
        message: String,
    },
}

impl CompilerError {
    /// Creates an IO error.
    pub fn io(path: impl Into<PathBuf>, message: impl Into<String>) -> Self {
        Self::IoError {
            path: path.into(),
            message: message.into(),
        }
    }
}
