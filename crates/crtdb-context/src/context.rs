//! Lazily-read package and schema contexts.

use crate::descriptor::{trim_bom, DescriptorDocument, PackageDescriptor, SchemaDescriptor};
use crate::ContextError;
use once_cell::sync::OnceCell;
use serde::de::DeserializeOwned;
use std::path::{Path, PathBuf};
use uuid::Uuid;

const DESCRIPTOR_FILE: &str = "descriptor.json";
const METADATA_FILE: &str = "metadata.json";
const SCHEMAS_DIR: &str = "Schemas";

fn read_file(path: &Path) -> Result<Vec<u8>, ContextError> {
    std::fs::read(path).map_err(|source| ContextError::Io {
        path: path.to_path_buf(),
        source,
    })
}

fn read_descriptor<T: DeserializeOwned>(dir: &Path) -> Result<T, ContextError> {
    let path = dir.join(DESCRIPTOR_FILE);
    let bytes = read_file(&path)?;
    let document: DescriptorDocument<T> =
        serde_json::from_slice(trim_bom(&bytes)).map_err(|source| ContextError::Malformed {
            path,
            source,
        })?;
    Ok(document.descriptor)
}

/// The package directory currently being processed.
#[derive(Debug)]
pub struct PackageContext {
    base: PathBuf,
    descriptor: OnceCell<PackageDescriptor>,
    schemas: OnceCell<Vec<SchemaContext>>,
}

impl PackageContext {
    pub fn new(base: impl Into<PathBuf>) -> Self {
        PackageContext {
            base: base.into(),
            descriptor: OnceCell::new(),
            schemas: OnceCell::new(),
        }
    }

    pub fn base_path(&self) -> &Path {
        &self.base
    }

    /// The package descriptor, read from `descriptor.json` on first access.
    pub fn descriptor(&self) -> Result<&PackageDescriptor, ContextError> {
        self.descriptor.get_or_try_init(|| read_descriptor(&self.base))
    }

    /// The package's schema contexts, enumerated from `Schemas/` on first
    /// access. A package without a `Schemas` directory has no schemas.
    pub fn schemas(&self) -> Result<&[SchemaContext], ContextError> {
        self.schemas
            .get_or_try_init(|| self.enumerate_schemas())
            .map(Vec::as_slice)
    }

    /// The schema context with the given descriptor `UId`, if any.
    pub fn schema_by_uid(&self, uid: Uuid) -> Result<Option<&SchemaContext>, ContextError> {
        for schema in self.schemas()? {
            if schema.descriptor()?.uid == uid {
                return Ok(Some(schema));
            }
        }
        Ok(None)
    }

    fn enumerate_schemas(&self) -> Result<Vec<SchemaContext>, ContextError> {
        let schemas_dir = self.base.join(SCHEMAS_DIR);
        if !schemas_dir.is_dir() {
            return Ok(Vec::new());
        }

        let entries = std::fs::read_dir(&schemas_dir).map_err(|source| ContextError::Io {
            path: schemas_dir.clone(),
            source,
        })?;

        let mut dirs: Vec<PathBuf> = entries
            .filter_map(Result::ok)
            .map(|entry| entry.path())
            .filter(|path| path.is_dir())
            .collect();
        // Directory enumeration order is platform-dependent.
        dirs.sort();

        Ok(dirs.into_iter().map(SchemaContext::new).collect())
    }
}

/// One schema directory inside the package.
#[derive(Debug)]
pub struct SchemaContext {
    base: PathBuf,
    descriptor: OnceCell<SchemaDescriptor>,
}

impl SchemaContext {
    pub fn new(base: impl Into<PathBuf>) -> Self {
        SchemaContext {
            base: base.into(),
            descriptor: OnceCell::new(),
        }
    }

    /// The schema descriptor, read on first access.
    pub fn descriptor(&self) -> Result<&SchemaDescriptor, ContextError> {
        self.descriptor.get_or_try_init(|| read_descriptor(&self.base))
    }

    /// The schema's metadata document, read on demand.
    pub fn metadata(&self) -> Result<Vec<u8>, ContextError> {
        read_file(&self.base.join(METADATA_FILE))
    }
}
