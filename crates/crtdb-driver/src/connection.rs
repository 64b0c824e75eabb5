//! The mock connection.

use crate::command::MockCommand;
use crate::dispatch::Dispatcher;
use crate::error::{DriverError, DriverResult};
use std::sync::Arc;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConnectionState {
    Closed,
    Open,
}

/// A connection with no socket and no handshake behind it.
///
/// The state machine exists because the engine checks it; opening and closing
/// change nothing else. Transactions are an unsupported operation by
/// contract.
#[derive(Debug)]
pub struct MockConnection {
    state: ConnectionState,
    dispatcher: Arc<Dispatcher>,
}

impl MockConnection {
    /// A new connection in the `Closed` state.
    pub fn new(dispatcher: Arc<Dispatcher>) -> Self {
        MockConnection {
            state: ConnectionState::Closed,
            dispatcher,
        }
    }

    pub fn open(&mut self) {
        self.state = ConnectionState::Open;
    }

    pub fn close(&mut self) {
        self.state = ConnectionState::Closed;
    }

    pub fn state(&self) -> ConnectionState {
        self.state
    }

    /// Name of the emulated database.
    pub fn database(&self) -> &'static str {
        crtdb_core::wellknown::DATABASE_NAME
    }

    pub fn create_command(&self) -> MockCommand {
        MockCommand::new(Arc::clone(&self.dispatcher))
    }

    pub fn begin_transaction(&mut self) -> DriverResult<()> {
        Err(DriverError::Unsupported {
            operation: "transactions",
        })
    }
}
