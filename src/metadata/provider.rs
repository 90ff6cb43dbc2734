//! # Type Providers
//!
//! A [`TypeProvider`] turns a [`TypeRef`] into its [`TypeDef`]. Failing to
//! resolve is an ordinary outcome (`None`), never an error.

use super::types::{TypeDef, TypeRef};
use crate::{Error, Result};
use serde::Deserialize;
use std::collections::HashMap;

/// Resolves type references to definitions
pub trait TypeProvider {
    /// Definition behind `ty`, if it can be found
    fn resolve(&self, ty: &TypeRef) -> Option<&TypeDef>;
}

impl<P: TypeProvider + ?Sized> TypeProvider for &P {
    fn resolve(&self, ty: &TypeRef) -> Option<&TypeDef> {
        (**self).resolve(ty)
    }
}

#[derive(Deserialize)]
struct MetadataDocument {
    #[serde(default)]
    types: Vec<TypeDef>,
}

/// In-memory type provider keyed by full name
///
/// Generic parameters never resolve; callers go through their constraints.
#[derive(Debug, Clone, Default)]
pub struct MetadataStore {
    types: HashMap<String, TypeDef>,
}

impl MetadataStore {
    /// Creates an empty store
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds or replaces a definition, returning the one it replaced
    pub fn insert(&mut self, def: TypeDef) -> Option<TypeDef> {
        self.types.insert(def.full_name.clone(), def)
    }

    /// Definition by full name
    pub fn get(&self, full_name: &str) -> Option<&TypeDef> {
        self.types.get(full_name)
    }

    /// Number of definitions
    pub fn len(&self) -> usize {
        self.types.len()
    }

    /// Whether the store holds no definitions
    pub fn is_empty(&self) -> bool {
        self.types.is_empty()
    }

    /// All definitions, in no particular order
    pub fn types(&self) -> impl Iterator<Item = &TypeDef> {
        self.types.values()
    }

    /// Load metadata from a JSON file
    pub fn load(path: &str) -> Result<Self> {
        let contents = std::fs::read_to_string(path)
            .map_err(|e| Error::metadata(format!("Failed to read metadata file {}: {}", path, e)))?;

        Self::parse(&contents)
    }

    /// Parse metadata from a JSON string of the form `{ "types": [TypeDef, ...] }`
    pub fn parse(json: &str) -> Result<Self> {
        let document: MetadataDocument = serde_json::from_str(json)
            .map_err(|e| Error::metadata(format!("Failed to parse metadata JSON: {}", e)))?;

        let mut store = Self::new();
        for def in document.types {
            if let Some(previous) = store.insert(def) {
                tracing::warn!("Duplicate type definition {}", previous.full_name);
            }
        }
        Ok(store)
    }
}

impl FromIterator<TypeDef> for MetadataStore {
    fn from_iter<I: IntoIterator<Item = TypeDef>>(iter: I) -> Self {
        let mut store = Self::new();
        for def in iter {
            store.insert(def);
        }
        store
    }
}

impl TypeProvider for MetadataStore {
    fn resolve(&self, ty: &TypeRef) -> Option<&TypeDef> {
        match ty {
            TypeRef::Named(full_name) => self.types.get(full_name),
            TypeRef::GenericParameter { .. } => None,
        }
    }
}
