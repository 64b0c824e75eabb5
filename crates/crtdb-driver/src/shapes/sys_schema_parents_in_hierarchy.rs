//! Schema parent chain within the package hierarchy.
//!
//! The engine calls a stored procedure to collect a schema's parents across
//! the package hierarchy. With a single package loaded there is no hierarchy
//! to walk: the answer is the starting schema alone, at level zero.

use crate::dispatch::RequestShape;
use crate::error::{DriverError, DriverResult};
use crate::parameters::ParameterCollection;
use chrono::{DateTime, Utc};
use crtdb_context::PackageContext;
use crtdb_core::{sqltext, DataTable, DbValue};
use std::sync::Arc;
use tracing::debug;
use uuid::Uuid;

const REFERENCE_TEXT: &str = r#"
SELECT *
FROM public."tsp_GetSysSchemaParentsInPackageHierarchyByPackage"(
    @StartSchemaUId,
    @WorkspaceId)
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
    pub start_schema_uid: Uuid,
}

impl RequestShape for Shape {
    type Request = Request;

    fn name(&self) -> &'static str {
        "SysSchemaParentsInPackageHierarchyByPackage"
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

        let start_schema_uid = parameters.value_of("StartSchemaUId")?.as_uuid()?;
        Ok(Some(Request { start_schema_uid }))
    }

    fn handle(&self, request: Request) -> DriverResult<DataTable> {
        debug!(
            schema_uid = %request.start_schema_uid,
            "returning only the starting schema instead of the full package hierarchy"
        );

        let Some(schema) = self.context.schema_by_uid(request.start_schema_uid)? else {
            return Err(DriverError::SchemaNotFound {
                uid: request.start_schema_uid,
            });
        };

        let descriptor = schema.descriptor()?;
        let mut table = DataTable::with_columns([
            "Id",
            "UId",
            "Name",
            "MetaData",
            "ParentId",
            "ModifiedOn",
            "PackageLevel",
            "SchemaLevel",
        ]);
        table.push_row(vec![
            descriptor.uid.into(),
            descriptor.uid.into(),
            descriptor.name.clone().into(),
            schema.metadata()?.into(),
            Uuid::nil().into(),
            DbValue::from(DateTime::<Utc>::UNIX_EPOCH),
            0.into(),
            0.into(),
        ])?;
        Ok(table)
    }
}

impl std::fmt::Debug for Shape {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SysSchemaParentsInPackageHierarchyByPackage")
            .finish_non_exhaustive()
    }
}
