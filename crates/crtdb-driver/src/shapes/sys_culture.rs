//! Culture list loaded at engine startup.
//!
//! The emulation reports a single active culture, the stock en-US row.

use crate::dispatch::RequestShape;
use crate::error::DriverResult;
use crate::parameters::ParameterCollection;
use crtdb_core::{sqltext, wellknown, DataTable};

const REFERENCE_TEXT: &str = r#"
SELECT
    "Id",
    "Name",
    "Active"
FROM
    "public"."SysCulture"
"#;

#[derive(Debug, Default)]
pub struct Shape;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Request;

impl RequestShape for Shape {
    type Request = Request;

    fn name(&self) -> &'static str {
        "SysCulture"
    }

    fn exact_text(&self) -> Option<&'static str> {
        Some(REFERENCE_TEXT)
    }

    fn try_parse(
        &self,
        text: &str,
        _parameters: &ParameterCollection,
    ) -> DriverResult<Option<Request>> {
        Ok(sqltext::equals(text, REFERENCE_TEXT).then_some(Request))
    }

    fn handle(&self, _request: Request) -> DriverResult<DataTable> {
        let mut table = DataTable::with_columns(["Id", "Name", "Active"]);
        table.push_row(vec![
            wellknown::CULTURE_EN_US_ID.into(),
            wellknown::CULTURE_EN_US_NAME.into(),
            true.into(),
        ])?;
        Ok(table)
    }
}
