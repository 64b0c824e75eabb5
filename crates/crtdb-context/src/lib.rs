//! Read-only, file-backed view of the package being processed.
//!
//! A package directory carries a `descriptor.json` document plus one
//! directory per schema under `Schemas/`, each with its own descriptor and a
//! `metadata.json` payload. Several statement handlers answer the engine from
//! this view. Everything is read lazily, exactly once, then treated as
//! read-only for the process lifetime.

mod context;
mod descriptor;

pub use context::{PackageContext, SchemaContext};
pub use descriptor::{DescriptorDocument, PackageDescriptor, SchemaDescriptor};

use std::path::PathBuf;

/// Error raised while reading package or schema metadata.
#[derive(Debug, thiserror::Error)]
pub enum ContextError {
    #[error("cannot read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("malformed descriptor document {path}: {source}")]
    Malformed {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}
