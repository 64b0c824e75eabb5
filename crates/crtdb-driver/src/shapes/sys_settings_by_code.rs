//! System-setting definition lookup by code.
//!
//! No settings exist in an offline installation; the empty answer makes the
//! engine fall back to the setting's built-in default.

use crate::dispatch::RequestShape;
use crate::error::DriverResult;
use crate::parameters::ParameterCollection;
use crtdb_core::{sqltext, DataTable};
use tracing::debug;

const REFERENCE_TEXT: &str = r#"
SELECT
    "Id",
    "Name",
    "Code",
    "Description",
    "ValueTypeName",
    "IsPersonal",
    "IsCacheable",
    "IsSSPAvailable",
    "ReferenceSchemaUId"
FROM
    "public"."SysSettings"
WHERE
    "Code" = @P1
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
        "SysSettingsByCode"
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
            "no SysSettings row returned, expecting the engine to use the default value"
        );
        Ok(DataTable::empty())
    }
}
