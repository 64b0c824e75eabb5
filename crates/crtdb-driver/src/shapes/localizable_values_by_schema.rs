//! Localized string lookup for a schema.
//!
//! Localization rows accumulate through installations; a fresh offline run
//! has none, and the engine falls back to the resources embedded in the
//! schema metadata itself.

use crate::dispatch::RequestShape;
use crate::error::DriverResult;
use crate::parameters::ParameterCollection;
use crtdb_core::{sqltext, DataTable};
use tracing::debug;
use uuid::Uuid;

const REFERENCE_TEXT: &str = r#"
SELECT
    "LocalizableValue"."SysSchemaId" "SchemaId",
    "SysSchema"."UId" "SchemaUId",
    "SysSchema"."Name" "SchemaName",
    "SysPackage"."Name" "PackageName",
    "LocalizableValue"."SysPackageId" "PackageId",
    "LocalizableValue"."SysCultureId" "CultureId",
    "LocalizableValue"."ModifiedOn" "ModifiedOn",
    "LocalizableValue"."Key" "Key",
    "LocalizableValue"."Value" "Value",
    "LocalizableValue"."ResourceType" "ResourceType",
    "LocalizableValue"."ImageData" "ImageData"
FROM
    "public"."SysLocalizableValue" "LocalizableValue"
    INNER JOIN "public"."SysPackage" ON ("SysPackage"."Id" = "LocalizableValue"."SysPackageId")
    INNER JOIN "public"."SysSchema" ON ("SysSchema"."Id" = "LocalizableValue"."SysSchemaId")
WHERE
    "SysPackage"."SysWorkspaceId" = @P1
    AND "LocalizableValue"."SysPackageId" IN (
SELECT
    "SysPackageId"
FROM
    "public"."SysSchema"
WHERE
    "Id" IN (@P2))
    AND "LocalizableValue"."SysSchemaId" = @P3
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
        "LocalizableValuesBySchemaUId"
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

        let schema_uid = parameters.value_of("P3")?.as_uuid()?;
        Ok(Some(Request { schema_uid }))
    }

    fn handle(&self, request: Request) -> DriverResult<DataTable> {
        debug!(
            schema_uid = %request.schema_uid,
            "no localizable value rows returned"
        );
        Ok(DataTable::empty())
    }
}
