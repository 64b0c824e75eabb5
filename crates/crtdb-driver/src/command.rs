//! Commands and their three execution modes.

use crate::dispatch::Dispatcher;
use crate::error::DriverResult;
use crate::parameters::ParameterCollection;
use crtdb_core::{DbValue, TableReader};
use std::fmt;
use std::sync::Arc;
use std::time::Duration;
use tracing::trace;

/// How the engine asked for the statement to be executed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QueryType {
    /// Row-count execution: the result is read as an affected-row count.
    NonQuery,
    /// Scalar execution: the result is read as a single value.
    Scalar,
    /// Cursor execution: the full result set is walked.
    Reader,
}

impl fmt::Display for QueryType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            QueryType::NonQuery => "row-count",
            QueryType::Scalar => "scalar",
            QueryType::Reader => "cursor",
        })
    }
}

/// A command bound to the dispatcher instead of a wire protocol.
///
/// Holds text, a timeout the emulation never enforces (execution is purely
/// in-memory), and the parameter collection. All execution modes funnel into
/// the dispatcher's single hook.
#[derive(Debug)]
pub struct MockCommand {
    dispatcher: Arc<Dispatcher>,
    text: String,
    timeout: Duration,
    parameters: ParameterCollection,
}

impl MockCommand {
    pub(crate) fn new(dispatcher: Arc<Dispatcher>) -> Self {
        MockCommand {
            dispatcher,
            text: String::new(),
            timeout: Duration::ZERO,
            parameters: ParameterCollection::new(),
        }
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn set_text(&mut self, text: impl Into<String>) {
        self.text = text.into();
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    pub fn set_timeout(&mut self, timeout: Duration) {
        self.timeout = timeout;
    }

    pub fn parameters(&self) -> &ParameterCollection {
        &self.parameters
    }

    pub fn parameters_mut(&mut self) -> &mut ParameterCollection {
        &mut self.parameters
    }

    /// No-op: there is no server to prepare against.
    pub fn prepare(&self) {
        trace!("`MockCommand::prepare` was called, but no action was taken");
    }

    /// No-op: nothing runs long enough to cancel.
    pub fn cancel(&self) {
        trace!("`MockCommand::cancel` was called, but no action was taken");
    }

    /// Execute in row-count mode: row 0 / column 0 as an integer, 0 if the
    /// synthetic result has no rows.
    pub fn execute_non_query(&self) -> DriverResult<i64> {
        trace!(command = %self.text, "executing row-count statement");
        let table = self
            .dispatcher
            .handle(&self.text, &self.parameters, QueryType::NonQuery)?;
        match table.value(0, 0) {
            Some(value) => Ok(value.as_i64()?),
            None => Ok(0),
        }
    }

    /// Execute in scalar mode: row 0 / column 0, `None` if no rows.
    pub fn execute_scalar(&self) -> DriverResult<Option<DbValue>> {
        trace!(command = %self.text, "executing scalar statement");
        let table = self
            .dispatcher
            .handle(&self.text, &self.parameters, QueryType::Scalar)?;
        Ok(table.value(0, 0).cloned())
    }

    /// Execute in cursor mode: the synthetic result set as a forward-only
    /// reader.
    pub fn execute_reader(&self) -> DriverResult<TableReader> {
        trace!(command = %self.text, "executing cursor statement");
        let table = self
            .dispatcher
            .handle(&self.text, &self.parameters, QueryType::Reader)?;
        Ok(table.into_reader())
    }
}
