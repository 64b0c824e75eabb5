//! Owning-package lookup for a schema id.
//!
//! Confirms the loaded package owns the schema and returns the package's
//! `UId`. This emulation issues schema ids equal to schema uids, so the
//! lookup goes through the same context index.

use crate::dispatch::RequestShape;
use crate::error::{DriverError, DriverResult};
use crate::parameters::ParameterCollection;
use crtdb_context::PackageContext;
use crtdb_core::{sqltext, DataTable};
use std::sync::Arc;
use uuid::Uuid;

const REFERENCE_TEXT: &str = r#"
SELECT
    "PackageUId"
FROM
    "public"."VwSysSchemaInWorkspace"
WHERE
    "SysWorkspaceId" = @P1
    AND "Id" = @P2
"#;

pub struct Shape {
    context: Arc<PackageContext>,
}

impl Shape {
    pub fn new(context: Arc<PackageContext>) -> Self {
        Shape { context }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Request {
    pub schema_id: Uuid,
}

impl RequestShape for Shape {
    type Request = Request;

    fn name(&self) -> &'static str {
        "PackageUIdBySchemaId"
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

        let schema_id = parameters.value_of("P2")?.as_uuid()?;
        Ok(Some(Request { schema_id }))
    }

    fn handle(&self, request: Request) -> DriverResult<DataTable> {
        if self.context.schema_by_uid(request.schema_id)?.is_none() {
            return Err(DriverError::SchemaNotFound {
                uid: request.schema_id,
            });
        }

        let mut table = DataTable::with_columns(["PackageUId"]);
        table.push_row(vec![self.context.descriptor()?.uid.into()])?;
        Ok(table)
    }
}

impl std::fmt::Debug for Shape {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PackageUIdBySchemaId").finish_non_exhaustive()
    }
}
