//! Workspace schema lookup by `UId`.
//!
//! The central metadata read: the engine resolves a schema by identifier and
//! manager, and expects its descriptor plus raw metadata back as one row.
//! The answer comes from the loaded package context; an identifier absent
//! from the context is fatal, except for the engine's own default process
//! schema which legitimately lives outside any package.

use crate::dispatch::RequestShape;
use crate::error::{DriverError, DriverResult};
use crate::parameters::ParameterCollection;
use crtdb_context::PackageContext;
use crtdb_core::{sqltext, DataTable};
use std::sync::Arc;
use tracing::debug;
use uuid::Uuid;

const REFERENCE_TEXT: &str = r#"
SELECT
    "Id",
    "UId",
    "Name",
    "ManagerName",
    "MetaData"
FROM
    "public"."VwSysSchemaInWorkspace"
WHERE
    "UId" = @SchemaUId
    AND "ManagerName" = @P1
    AND "VwSysSchemaInWorkspace"."SysWorkspaceId" = @P2
"#;

const PROCESS_SCHEMA_MANAGER: &str = "ProcessSchemaManager";

pub struct Shape {
    context: Arc<PackageContext>,
    default_process_schema_uid: Option<Uuid>,
}

impl Shape {
    pub fn new(context: Arc<PackageContext>, default_process_schema_uid: Option<Uuid>) -> Self {
        Shape {
            context,
            default_process_schema_uid,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Request {
    pub schema_uid: Uuid,
    pub manager_name: String,
}

impl RequestShape for Shape {
    type Request = Request;

    fn name(&self) -> &'static str {
        "VwSysSchemaInWorkspaceByUId"
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
        let manager_name = parameters.value_of("P1")?.as_str()?.to_owned();

        Ok(Some(Request {
            schema_uid,
            manager_name,
        }))
    }

    fn handle(&self, request: Request) -> DriverResult<DataTable> {
        let Some(schema) = self.context.schema_by_uid(request.schema_uid)? else {
            if request.manager_name == PROCESS_SCHEMA_MANAGER
                && Some(request.schema_uid) == self.default_process_schema_uid
            {
                debug!(
                    schema_uid = %request.schema_uid,
                    "default process schema requested, no package row to return"
                );
                return Ok(DataTable::empty());
            }
            return Err(DriverError::SchemaNotFound {
                uid: request.schema_uid,
            });
        };

        let descriptor = schema.descriptor()?;
        let mut table = DataTable::with_columns(["Id", "UId", "Name", "ManagerName", "MetaData"]);
        table.push_row(vec![
            descriptor.uid.into(),
            descriptor.uid.into(),
            descriptor.name.clone().into(),
            descriptor.manager_name.clone().into(),
            schema.metadata()?.into(),
        ])?;
        Ok(table)
    }
}

impl std::fmt::Debug for Shape {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("VwSysSchemaInWorkspaceByUId")
            .field("default_process_schema_uid", &self.default_process_schema_uid)
            .finish_non_exhaustive()
    }
}
