//! User-defined schema property lookup.
//!
//! The engine renders this statement with trailing clauses that vary between
//! call sites, so the shape matches by an anchored prefix plus two contained
//! fragments instead of full equality. No user properties exist offline; the
//! empty answer is the designed default.

use crate::dispatch::RequestShape;
use crate::error::DriverResult;
use crate::parameters::ParameterCollection;
use crtdb_core::{sqltext, DataTable};
use tracing::debug;
use uuid::Uuid;

const PREFIX: &str = r#"
SELECT
    "SysSchemaUserProperty"."Name" "Name",
    "SysSchemaUserProperty"."Value" "Value"
"#;

const FROM_FRAGMENT: &str = r#"
FROM
    "public"."SysSchemaUserProperty" "SysSchemaUserProperty"
"#;

const FILTER_FRAGMENT: &str = r#"
SELECT
    "SysSchema"."Id" "Id"
FROM
    "public"."SysSchema" "SysSchema"
    LEFT OUTER JOIN "public"."SysPackage" "SysPackage" ON ("SysPackage"."Id" = "SysSchema"."SysPackageId")
WHERE
    "SysSchemaUserProperty"."SysSchemaId" = "SysSchema"."Id"
    AND ("SysSchema"."ManagerName" = @P1
    AND "SysPackage"."SysWorkspaceId" = @P2
    AND "SysSchema"."UId" = @P3)
"#;

#[derive(Debug, Default)]
pub struct Shape;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Request {
    pub schema_uid: Uuid,
    pub manager_name: String,
}

impl RequestShape for Shape {
    type Request = Request;

    fn name(&self) -> &'static str {
        "SysSchemaUserPropertyBySchemaUId"
    }

    fn try_parse(
        &self,
        text: &str,
        parameters: &ParameterCollection,
    ) -> DriverResult<Option<Request>> {
        if !sqltext::starts_with(text, PREFIX)
            || !sqltext::contains(text, FROM_FRAGMENT)
            || !sqltext::contains(text, FILTER_FRAGMENT)
        {
            return Ok(None);
        }

        let schema_uid = parameters.value_of("P3")?.as_uuid()?;
        let manager_name = parameters.value_of("P1")?.as_str()?.to_owned();

        Ok(Some(Request {
            schema_uid,
            manager_name,
        }))
    }

    fn handle(&self, request: Request) -> DriverResult<DataTable> {
        debug!(
            schema_uid = %request.schema_uid,
            manager_name = %request.manager_name,
            "no SysSchemaUserProperty rows returned"
        );
        Ok(DataTable::empty())
    }
}
