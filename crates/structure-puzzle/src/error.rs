//! Error types for the puzzle engine.
//!
//! None of these are fatal. Every one is reported back to the caller as a
//! value and the engine keeps running.

use thiserror::Error;

use crate::operation::OperationKind;
use crate::puzzle::StructureKind;

/// Reasons an operation or lookup was not carried out.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PuzzleError {
    /// A removal or search found nothing to act on.
    #[error("{0} has no element to act on")]
    EmptyStructure(StructureKind),

    /// The operation is not in the level's legal set.
    #[error("operation `{op}` is not allowed in {structure} level {level}")]
    IllegalOperation {
        op: OperationKind,
        structure: StructureKind,
        level: u32,
    },

    #[error("operation `{op}` does not apply to a {structure}")]
    WrongStructure {
        op: OperationKind,
        structure: StructureKind,
    },

    /// A required value was blank or an argument was malformed.
    #[error("invalid input for `{op}`: {reason}")]
    InvalidInput { op: OperationKind, reason: String },

    #[error("no {structure} level with id {id}")]
    LevelNotFound { structure: StructureKind, id: u32 },

    #[error("the session has already finished")]
    SessionFinished,

    #[error("no level is being played")]
    NoActiveSession,

    #[error("unknown structure type `{0}`")]
    UnknownStructure(String),

    #[error("unknown operation `{0}`")]
    UnknownOperation(String),
}

/// Problems found while loading a level catalog.
#[derive(Error, Debug)]
pub enum CatalogError {
    #[error("malformed catalog: {0}")]
    Json(#[from] serde_json::Error),

    #[error("could not read catalog: {0}")]
    Io(#[from] std::io::Error),

    #[error("{structure} level {id}: {reason}")]
    InvalidLevel {
        structure: StructureKind,
        id: u32,
        reason: String,
    },
}
