//! The recognized statement shapes.
//!
//! One module per statement the engine issues on its bootstrap and
//! metadata-read path. Each shape owns its reference text — a private
//! contract with one specific engine version, byte-equivalent to what the
//! engine renders modulo whitespace and case — plus the parser extracting
//! the command's parameters into a typed request and the handler producing
//! the synthetic answer.

pub mod hierarchical_select;
pub mod localizable_values_by_schema;
pub mod package_uid_by_schema_id;
pub mod sys_admin_unit_in_role;
pub mod sys_culture;
pub mod sys_schema_parents_in_hierarchy;
pub mod sys_schema_user_property;
pub mod sys_settings_by_code;
pub mod sys_settings_with_value_by_code;
pub mod update_sys_schema_last_error;
pub mod vw_sys_schema_in_workspace;

pub use sys_admin_unit_in_role::SysAdminUnitType;

use crate::dispatch::{Dispatcher, DispatcherBuilder, RegistryError};
use crtdb_context::PackageContext;
use std::sync::Arc;
use uuid::Uuid;

/// Knobs of the emulation that depend on the engine installation rather than
/// the package being processed.
#[derive(Debug, Clone, Default)]
pub struct EmulationOptions {
    /// `UId` of the engine's default process schema. A workspace-schema
    /// lookup for this id under the process schema manager is answered with
    /// an empty result instead of a context lookup failure; `None` disables
    /// the bypass.
    pub default_process_schema_uid: Option<Uuid>,
}

/// Build the dispatcher with the full bootstrap shape set, in its fixed
/// registration order.
pub fn standard_dispatcher(
    context: Arc<PackageContext>,
    options: EmulationOptions,
) -> Result<Dispatcher, RegistryError> {
    DispatcherBuilder::new()
        .register(sys_culture::Shape)
        .register(sys_settings_by_code::Shape)
        .register(sys_settings_with_value_by_code::Shape)
        .register(sys_admin_unit_in_role::Shape)
        .register(vw_sys_schema_in_workspace::Shape::new(
            Arc::clone(&context),
            options.default_process_schema_uid,
        ))
        .register(package_uid_by_schema_id::Shape::new(Arc::clone(&context)))
        .register(sys_schema_parents_in_hierarchy::Shape::new(context))
        .register(sys_schema_user_property::Shape)
        .register(localizable_values_by_schema::Shape)
        .register(hierarchical_select::Shape)
        .register(update_sys_schema_last_error::Shape)
        .build()
}
