//! Core building blocks for the crtdb database emulation.
//!
//! The crates in this workspace answer, entirely offline, the fixed set of SQL
//! statements the Creatio engine issues while bootstrapping and loading
//! metadata. This foundation crate carries the pieces everything else builds
//! on:
//!
//! - **Structural text matching** (`sqltext` module): whitespace- and
//!   case-insensitive comparison of statement texts against reference shapes
//! - **Values** (`values` module): the column value model of synthetic results
//! - **Tables** (`table` module): in-memory result tables and the
//!   forward-only reader the driver hands back to the engine
//! - **Well-known identifiers** (`wellknown` module): the bootstrap user,
//!   culture and role identifiers the emulation answers with

pub mod sqltext;
pub mod table;
pub mod values;
pub mod wellknown;

pub use sqltext::SqlText;
pub use table::{DataTable, TableError, TableReader};
pub use values::{DbValue, ValueError};
