//! Descriptor documents.
//!
//! Package and schema descriptors are JSON documents whose payload sits under
//! a top-level `Descriptor` property, with PascalCase field names. Files may
//! start with a UTF-8 byte order mark.

use serde::Deserialize;
use uuid::Uuid;

/// The `$.Descriptor` wrapper every descriptor document uses.
#[derive(Debug, Clone, Deserialize)]
pub struct DescriptorDocument<T> {
    #[serde(rename = "Descriptor")]
    pub descriptor: T,
}

/// Descriptor of the package itself.
#[derive(Debug, Clone, Deserialize)]
pub struct PackageDescriptor {
    #[serde(rename = "UId")]
    pub uid: Uuid,

    #[serde(rename = "Name")]
    pub name: String,

    /// Raw package kind discriminant (0 = general, 1 = assembly).
    #[serde(rename = "Type", default)]
    pub package_type: u32,
}

impl PackageDescriptor {
    pub fn is_assembly(&self) -> bool {
        self.package_type == 1
    }
}

/// Descriptor of one schema inside the package.
#[derive(Debug, Clone, Deserialize)]
pub struct SchemaDescriptor {
    #[serde(rename = "UId")]
    pub uid: Uuid,

    #[serde(rename = "Name")]
    pub name: String,

    /// Name of the schema manager that owns this schema inside the engine,
    /// e.g. `EntitySchemaManager` or `ClientUnitSchemaManager`.
    #[serde(rename = "ManagerName", default)]
    pub manager_name: String,
}

const UTF8_BOM: &[u8] = &[0xef, 0xbb, 0xbf];

/// Strip a leading UTF-8 byte order mark, which Creatio-produced descriptor
/// files frequently carry.
pub(crate) fn trim_bom(bytes: &[u8]) -> &[u8] {
    bytes.strip_prefix(UTF8_BOM).unwrap_or(bytes)
}
