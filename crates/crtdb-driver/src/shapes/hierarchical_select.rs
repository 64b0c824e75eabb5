//! Hierarchical item expansion.
//!
//! The engine expands hierarchy placeholders through a synthetic
//! `$HierarchicalSelect` source. Nothing in the emulation has a hierarchy to
//! expand, so the answer is always empty.

use crate::dispatch::RequestShape;
use crate::error::DriverResult;
use crate::parameters::ParameterCollection;
use crtdb_core::{sqltext, DataTable};
use tracing::debug;
use uuid::Uuid;

const REFERENCE_TEXT: &str = r#"
SELECT
    "Id",
    "Name",
    "ParentId"
FROM
    "$HierarchicalSelect"
"#;

#[derive(Debug, Default)]
pub struct Shape;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Request {
    pub schema_uid: Uuid,
}

impl RequestShape for Shape {
    type Request = Request;

    fn name(&self) -> &'static str {
        "HierarchicalSelect"
    }

    fn exact_text(&self) -> Option<&'static str> {
        Some(REFERENCE_TEXT)
    }

    fn try_parse(
        &self,
        text: &str,
        parameters: &ParameterCollection,
    ) -> DriverResult<Option<Request>> {
        if !sqltext::equals(text, REFERENCE_TEXT) {
            return Ok(None);
        }

        let schema_uid = parameters.value_of("SchemaUId")?.as_uuid()?;
        Ok(Some(Request { schema_uid }))
    }

    fn handle(&self, request: Request) -> DriverResult<DataTable> {
        debug!(
            schema_uid = %request.schema_uid,
            "hierarchical select answered with no rows"
        );
        Ok(DataTable::empty())
    }
}
