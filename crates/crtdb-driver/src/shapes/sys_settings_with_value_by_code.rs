//! System-setting value lookup by code.
//!
//! Same designed fallback as the definition lookup: no stored values exist,
//! the engine uses defaults.

use crate::dispatch::RequestShape;
use crate::error::DriverResult;
use crate::parameters::ParameterCollection;
use crtdb_core::{sqltext, DataTable};
use tracing::debug;

const REFERENCE_TEXT: &str = r#"
SELECT
    "Code",
    "ValueTypeName",
    "IsCacheable",
    "Position",
    "SysAdminUnitId",
    "TextValue",
    "IntegerValue",
    "FloatValue",
    "BooleanValue",
    "DateTimeValue",
    "GuidValue",
    "BinaryValue"
FROM
    "public"."SysSettings"
    LEFT OUTER JOIN "public"."SysSettingsValue" ON ("SysSettings"."Id" = "SysSettingsValue"."SysSettingsId")
WHERE
    "SysSettings"."Code" = @P1
ORDER BY
    "Position" ASC
"#;

#[derive(Debug, Default)]
pub struct Shape;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Request {
    pub code: String,
}

impl RequestShape for Shape {
    type Request = Request;

    fn name(&self) -> &'static str {
        "SysSettingsWithValueByCode"
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

        let code = parameters.value_of("P1")?.as_str()?.to_owned();
        Ok(Some(Request { code }))
    }

    fn handle(&self, request: Request) -> DriverResult<DataTable> {
        debug!(
            code = %request.code,
            "no SysSettings value returned, expecting the engine to use the default value"
        );
        Ok(DataTable::empty())
    }
}
