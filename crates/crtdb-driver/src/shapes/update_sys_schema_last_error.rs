//! Schema compilation error report.
//!
//! The only write statement on the supported path: the engine records a
//! schema's last compilation error. There is no database row to update — the
//! error is surfaced in the emulation's log instead, and the engine is told
//! one row was affected.

use crate::dispatch::RequestShape;
use crate::error::DriverResult;
use crate::parameters::ParameterCollection;
use crtdb_core::{sqltext, DataTable};
use tracing::error;
use uuid::Uuid;

const REFERENCE_TEXT: &str = r#"
UPDATE "public"."SysSchema"
SET
    "LastError" = @P2
WHERE
    "Id" = @P1
"#;

#[derive(Debug, Default)]
pub struct Shape;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Request {
    pub schema_id: Uuid,
    pub last_error: String,
}

impl RequestShape for Shape {
    type Request = Request;

    fn name(&self) -> &'static str {
        "UpdateSysSchemaLastError"
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

        let schema_id = parameters.value_of("P1")?.as_uuid()?;
        let last_error = parameters.value_of("P2")?.as_str()?.to_owned();

        Ok(Some(Request {
            schema_id,
            last_error,
        }))
    }

    fn handle(&self, request: Request) -> DriverResult<DataTable> {
        error!(
            schema_id = %request.schema_id,
            last_error = %request.last_error,
            "engine reported a schema error"
        );

        let mut table = DataTable::with_columns(["RowsAffected"]);
        table.push_row(vec![1.into()])?;
        Ok(table)
    }
}
