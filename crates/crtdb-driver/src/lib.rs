//! Mock data-access driver emulating the Creatio database backend.
//!
//! The engine cannot be told to skip its database: it opens a connection,
//! creates commands and walks result cursors through the standard driver
//! contract. This crate implements that contract with no database behind it —
//! every execution is redirected into the [`dispatch::Dispatcher`], which
//! recognizes the statement by structural text comparison and produces a
//! synthetic answer.
//!
//! A statement the dispatcher does not recognize is a fatal
//! [`DriverError::UnrecognizedStatement`]: silently returning empty data
//! would hide a gap in the emulation's coverage.

pub mod command;
pub mod connection;
pub mod dispatch;
pub mod error;
pub mod parameters;
pub mod shapes;

pub use command::{MockCommand, QueryType};
pub use connection::{ConnectionState, MockConnection};
pub use dispatch::{Dispatcher, DispatcherBuilder, RegistryError, RequestShape};
pub use error::{DriverError, DriverResult};
pub use parameters::{Parameter, ParameterCollection};
pub use shapes::{standard_dispatcher, EmulationOptions};
