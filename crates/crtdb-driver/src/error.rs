//! Driver error taxonomy.
//!
//! Nothing here is transient and nothing is retried: every error signals
//! either missing emulation coverage or a mismatch between the statements the
//! engine issues and the package supplied to the emulation, and propagates
//! unrecovered to the process boundary.

use crate::command::QueryType;
use crtdb_context::ContextError;
use crtdb_core::{TableError, ValueError};
use uuid::Uuid;

pub type DriverResult<T> = Result<T, DriverError>;

#[derive(Debug, thiserror::Error)]
pub enum DriverError {
    /// No registered statement shape matched the command text.
    #[error("no statement shape matched {query} execution of: {text}")]
    UnrecognizedStatement { text: String, query: QueryType },

    /// A handler referenced a schema absent from the loaded package context.
    #[error("cannot find schema '{uid}' in the current package context")]
    SchemaNotFound { uid: Uuid },

    /// A named binding was missing from the command's parameter collection.
    #[error("parameter '{name}' was not found on the command")]
    ParameterNotFound { name: String },

    /// A driver capability this emulation intentionally does not provide.
    #[error("{operation} is not supported by the database emulation")]
    Unsupported { operation: &'static str },

    #[error(transparent)]
    Value(#[from] ValueError),

    #[error(transparent)]
    Table(#[from] TableError),

    #[error(transparent)]
    Context(#[from] ContextError),
}
