//! Statement dispatch and the shape registry.
//!
//! A *shape* pairs the parser that recognizes one statement with the handler
//! that answers it; the pairing is enforced at compile time through the
//! shape's associated `Request` type, so a handler can never receive a
//! request it did not parse itself. The registry is built once by explicit
//! registration and is immutable afterward; shapes are tried in registration
//! order and the first successful parse wins.

use crate::command::QueryType;
use crate::error::{DriverError, DriverResult};
use crate::parameters::ParameterCollection;
use crtdb_core::{DataTable, SqlText};
use std::collections::HashMap;
use std::fmt;
use tracing::debug;

/// One recognized statement shape: a parser from command text and parameters
/// into a typed request, and the handler producing its synthetic answer.
pub trait RequestShape: Send + Sync + 'static {
    /// The typed, extracted representation of one matched statement.
    type Request: fmt::Debug;

    /// Shape name used in diagnostics and dispatch logs.
    fn name(&self) -> &'static str;

    /// The full reference text, for shapes matching by structural equality.
    /// Declared texts are checked pairwise at registry build time so that two
    /// shapes can never claim the same statement.
    fn exact_text(&self) -> Option<&'static str> {
        None
    }

    /// Recognize the command and extract its request, or `None` when the
    /// text does not match this shape.
    fn try_parse(
        &self,
        text: &str,
        parameters: &ParameterCollection,
    ) -> DriverResult<Option<Self::Request>>;

    /// Produce the synthetic answer for a request this shape parsed.
    fn handle(&self, request: Self::Request) -> DriverResult<DataTable>;
}

/// Object-safe view of a [`RequestShape`] used by the registry.
trait ErasedShape: Send + Sync {
    fn name(&self) -> &'static str;
    fn exact_text(&self) -> Option<&'static str>;
    fn try_dispatch(
        &self,
        text: &str,
        parameters: &ParameterCollection,
    ) -> DriverResult<Option<DataTable>>;
}

impl<S: RequestShape> ErasedShape for S {
    fn name(&self) -> &'static str {
        RequestShape::name(self)
    }

    fn exact_text(&self) -> Option<&'static str> {
        RequestShape::exact_text(self)
    }

    fn try_dispatch(
        &self,
        text: &str,
        parameters: &ParameterCollection,
    ) -> DriverResult<Option<DataTable>> {
        let Some(request) = self.try_parse(text, parameters)? else {
            return Ok(None);
        };
        debug!(shape = self.name(), request = ?request, "dispatching recognized statement");
        self.handle(request).map(Some)
    }
}

/// Error raised while building the shape registry.
#[derive(Debug, thiserror::Error)]
pub enum RegistryError {
    /// Two shapes declared structurally equal reference texts; dispatch
    /// would silently depend on registration order, so this is rejected at
    /// build time.
    #[error("shapes '{first}' and '{second}' declare structurally equal reference texts")]
    AmbiguousShapes {
        first: &'static str,
        second: &'static str,
    },
}

/// Explicit, startup-time registration of statement shapes.
#[derive(Default)]
pub struct DispatcherBuilder {
    shapes: Vec<Box<dyn ErasedShape>>,
}

impl DispatcherBuilder {
    pub fn new() -> Self {
        DispatcherBuilder::default()
    }

    /// Register a shape. Registration order is the dispatch order.
    #[must_use]
    pub fn register<S: RequestShape>(mut self, shape: S) -> Self {
        self.shapes.push(Box::new(shape));
        self
    }

    fn shape_names(&self) -> Vec<&'static str> {
        self.shapes.iter().map(|shape| shape.name()).collect()
    }

    pub fn build(self) -> Result<Dispatcher, RegistryError> {
        let mut declared: HashMap<SqlText, &'static str> = HashMap::new();
        for shape in &self.shapes {
            if let Some(text) = shape.exact_text() {
                if let Some(first) = declared.insert(SqlText::new(text), shape.name()) {
                    return Err(RegistryError::AmbiguousShapes {
                        first,
                        second: shape.name(),
                    });
                }
            }
        }
        Ok(Dispatcher {
            shapes: self.shapes,
        })
    }
}

impl fmt::Debug for DispatcherBuilder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DispatcherBuilder")
            .field("shapes", &self.shape_names())
            .finish()
    }
}

/// The immutable shape registry every command execution runs through.
pub struct Dispatcher {
    shapes: Vec<Box<dyn ErasedShape>>,
}

impl Dispatcher {
    /// Resolve and answer one statement.
    ///
    /// Shapes are tried in registration order; the first successful parse
    /// wins. An unmatched statement is fatal: it signals a statement shape
    /// the emulation does not yet cover.
    pub fn handle(
        &self,
        text: &str,
        parameters: &ParameterCollection,
        query: QueryType,
    ) -> DriverResult<DataTable> {
        for shape in &self.shapes {
            if let Some(table) = shape.try_dispatch(text, parameters)? {
                return Ok(table);
            }
        }

        Err(DriverError::UnrecognizedStatement {
            text: text.to_owned(),
            query,
        })
    }

    pub fn shape_names(&self) -> Vec<&'static str> {
        self.shapes.iter().map(|shape| shape.name()).collect()
    }
}

impl fmt::Debug for Dispatcher {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Dispatcher")
            .field("shapes", &self.shape_names())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crtdb_core::DbValue;

    /// Minimal shape answering a fixed text with a fixed one-cell table.
    struct Fixed {
        name: &'static str,
        text: &'static str,
        answer: i64,
    }

    #[derive(Debug)]
    struct FixedRequest;

    impl RequestShape for Fixed {
        type Request = FixedRequest;

        fn name(&self) -> &'static str {
            self.name
        }

        fn exact_text(&self) -> Option<&'static str> {
            Some(self.text)
        }

        fn try_parse(
            &self,
            text: &str,
            _parameters: &ParameterCollection,
        ) -> DriverResult<Option<FixedRequest>> {
            Ok(crtdb_core::sqltext::equals(text, self.text).then_some(FixedRequest))
        }

        fn handle(&self, _request: FixedRequest) -> DriverResult<DataTable> {
            let mut table = DataTable::with_columns(["Value"]);
            table.push_row(vec![DbValue::from(self.answer)])?;
            Ok(table)
        }
    }

    #[test]
    fn first_registered_shape_wins() {
        // Distinguishable exact texts, overlapping only through the second
        // shape never being reached for the first text.
        let dispatcher = DispatcherBuilder::new()
            .register(Fixed {
                name: "A",
                text: "SELECT 1",
                answer: 1,
            })
            .register(Fixed {
                name: "B",
                text: "SELECT 2",
                answer: 2,
            })
            .build()
            .unwrap();

        let parameters = ParameterCollection::new();
        let table = dispatcher
            .handle("select\n1", &parameters, QueryType::Reader)
            .unwrap();
        assert_eq!(table.value(0, 0), Some(&DbValue::from(1)));
    }

    #[test]
    fn unrecognized_statement_is_fatal() {
        let dispatcher = DispatcherBuilder::new().build().unwrap();
        let parameters = ParameterCollection::new();

        let err = dispatcher
            .handle("SELECT nothing", &parameters, QueryType::Scalar)
            .unwrap_err();
        match err {
            DriverError::UnrecognizedStatement { text, query } => {
                assert_eq!(text, "SELECT nothing");
                assert_eq!(query, QueryType::Scalar);
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn duplicate_reference_texts_are_rejected_at_build() {
        let result = DispatcherBuilder::new()
            .register(Fixed {
                name: "A",
                text: "SELECT 1",
                answer: 1,
            })
            .register(Fixed {
                name: "B",
                text: "select  1",
                answer: 2,
            })
            .build();

        match result {
            Err(RegistryError::AmbiguousShapes { first, second }) => {
                assert_eq!(first, "A");
                assert_eq!(second, "B");
            }
            Ok(_) => panic!("structurally equal texts must not build"),
        }
    }

    #[test]
    fn dispatch_is_deterministic() {
        let dispatcher = DispatcherBuilder::new()
            .register(Fixed {
                name: "A",
                text: "SELECT 1",
                answer: 1,
            })
            .build()
            .unwrap();

        let parameters = ParameterCollection::new();
        let first = dispatcher
            .handle("SELECT 1", &parameters, QueryType::Reader)
            .unwrap();
        let second = dispatcher
            .handle("SELECT 1", &parameters, QueryType::Reader)
            .unwrap();
        assert_eq!(first, second);
    }
}
