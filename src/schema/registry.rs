//! Schema registry: load-once storage of schema definitions
//!
//! Schemas arrive either programmatically (`register`) or from the JSON
//! files the external generator emits, one file per type (`load_dir`).
//! Registration happens at startup; after that the registry is only read,
//! so sharing `&SchemaRegistry` across threads needs no locking.
//!
//! Duplicate names are rejected rather than silently replaced: two types
//! with the same name are unsupported, and an explicit error at startup
//! beats an undefined winner at validation time.

use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

use super::errors::RegistryError;
use super::types::{FieldType, Schema};

/// Name-keyed store of schema definitions.
#[derive(Debug, Default)]
pub struct SchemaRegistry {
    schemas: HashMap<String, Schema>,
}

impl SchemaRegistry {
    /// Creates an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a schema. Rejects invalid definitions and duplicate names.
    pub fn register(&mut self, schema: Schema) -> Result<(), RegistryError> {
        schema
            .validate_structure()
            .map_err(RegistryError::InvalidSchema)?;

        if self.schemas.contains_key(&schema.name) {
            return Err(RegistryError::Duplicate(schema.name.clone()));
        }
        self.schemas.insert(schema.name.clone(), schema);
        Ok(())
    }

    /// Gets a schema by name.
    pub fn get(&self, name: &str) -> Option<&Schema> {
        self.schemas.get(name)
    }

    /// Checks whether a schema is registered.
    pub fn contains(&self, name: &str) -> bool {
        self.schemas.contains_key(name)
    }

    /// Number of registered schemas.
    pub fn len(&self) -> usize {
        self.schemas.len()
    }

    /// True when no schema is registered.
    pub fn is_empty(&self) -> bool {
        self.schemas.is_empty()
    }

    /// Names of all registered schemas, in no particular order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.schemas.keys().map(String::as_str)
    }

    /// Loads every `.json` schema file in `dir`, then verifies that all
    /// schema references resolve.
    ///
    /// A missing directory yields an empty registry, not an error: the
    /// generator may simply not have produced anything yet.
    pub fn load_dir(&mut self, dir: &Path) -> Result<(), RegistryError> {
        if !dir.exists() {
            return Ok(());
        }

        let entries = fs::read_dir(dir).map_err(|e| RegistryError::Io {
            path: dir.display().to_string(),
            reason: e.to_string(),
        })?;

        for entry in entries {
            let entry = entry.map_err(|e| RegistryError::Io {
                path: dir.display().to_string(),
                reason: e.to_string(),
            })?;
            let path = entry.path();

            if path.extension().map_or(true, |ext| ext != "json") {
                continue;
            }
            self.load_file(&path)?;
        }

        self.verify()
    }

    /// Loads a single schema file.
    fn load_file(&mut self, path: &Path) -> Result<(), RegistryError> {
        let content = fs::read_to_string(path).map_err(|e| RegistryError::Io {
            path: path.display().to_string(),
            reason: e.to_string(),
        })?;

        let schema: Schema =
            serde_json::from_str(&content).map_err(|e| RegistryError::Malformed {
                path: path.display().to_string(),
                reason: e.to_string(),
            })?;

        self.register(schema)
    }

    /// Verifies that every schema reference points at a registered schema.
    ///
    /// Load order is arbitrary, so dangling references can only be checked
    /// once the full set is in. Callers registering programmatically can
    /// invoke this after the last `register`.
    pub fn verify(&self) -> Result<(), RegistryError> {
        for schema in self.schemas.values() {
            for field in &schema.fields {
                if let Some(target) = ref_target(&field.field_type) {
                    if !self.schemas.contains_key(target) {
                        return Err(RegistryError::DanglingReference {
                            schema: schema.name.clone(),
                            field: field.name.clone(),
                            target: target.to_string(),
                        });
                    }
                }
            }
        }
        Ok(())
    }

    /// Writes a schema to `dir` under the generator's naming convention
    /// (`<name>.json`). The directory is created if needed.
    pub fn save(dir: &Path, schema: &Schema) -> Result<PathBuf, RegistryError> {
        if !dir.exists() {
            fs::create_dir_all(dir).map_err(|e| RegistryError::Io {
                path: dir.display().to_string(),
                reason: e.to_string(),
            })?;
        }

        let path = dir.join(format!("{}.json", schema.name));
        let content =
            serde_json::to_string_pretty(schema).map_err(|e| RegistryError::Malformed {
                path: path.display().to_string(),
                reason: e.to_string(),
            })?;

        fs::write(&path, content).map_err(|e| RegistryError::Io {
            path: path.display().to_string(),
            reason: e.to_string(),
        })?;

        Ok(path)
    }
}

/// The schema name a field type refers to, if any. Arrays are unwrapped
/// to their element type.
fn ref_target(field_type: &FieldType) -> Option<&str> {
    match field_type {
        FieldType::Ref { schema } => Some(schema),
        FieldType::Array { element } => ref_target(element),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use super::super::types::FieldDef;
    use tempfile::TempDir;

    fn post_schema() -> Schema {
        Schema::new(
            "Post",
            vec![
                FieldDef::required("title", FieldType::String),
                FieldDef::optional("description", FieldType::String),
                FieldDef::required("rating", FieldType::Number),
                FieldDef::required("createAt", FieldType::DateTime),
            ],
        )
    }

    fn blog_schema() -> Schema {
        Schema::new(
            "Blog",
            vec![
                FieldDef::required("site", FieldType::String),
                FieldDef::required("about", FieldType::String),
                FieldDef::required("email", FieldType::String),
                FieldDef::required("posts", FieldType::array(FieldType::reference("Post"))),
            ],
        )
    }

    #[test]
    fn test_register_and_get() {
        let mut registry = SchemaRegistry::new();
        registry.register(post_schema()).unwrap();

        assert!(registry.contains("Post"));
        assert_eq!(registry.get("Post").unwrap().fields.len(), 4);
        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn test_duplicate_name_rejected() {
        let mut registry = SchemaRegistry::new();
        registry.register(post_schema()).unwrap();

        let result = registry.register(post_schema());
        assert!(matches!(result, Err(RegistryError::Duplicate(name)) if name == "Post"));
    }

    #[test]
    fn test_invalid_structure_rejected() {
        let mut registry = SchemaRegistry::new();
        let result = registry.register(Schema::new("", vec![]));
        assert!(matches!(result, Err(RegistryError::InvalidSchema(_))));
    }

    #[test]
    fn test_unknown_schema_lookup() {
        let registry = SchemaRegistry::new();
        assert!(registry.get("nonexistent").is_none());
        assert!(!registry.contains("nonexistent"));
        assert!(registry.is_empty());
    }

    #[test]
    fn test_verify_detects_dangling_reference() {
        let mut registry = SchemaRegistry::new();
        registry.register(blog_schema()).unwrap(); // references Post, not loaded

        let result = registry.verify();
        assert!(matches!(
            result,
            Err(RegistryError::DanglingReference { ref target, .. }) if target == "Post"
        ));
    }

    #[test]
    fn test_verify_passes_when_references_resolve() {
        let mut registry = SchemaRegistry::new();
        registry.register(blog_schema()).unwrap();
        registry.register(post_schema()).unwrap();
        assert!(registry.verify().is_ok());
    }

    #[test]
    fn test_save_and_load_dir() {
        let temp_dir = TempDir::new().unwrap();

        SchemaRegistry::save(temp_dir.path(), &post_schema()).unwrap();
        SchemaRegistry::save(temp_dir.path(), &blog_schema()).unwrap();

        let mut registry = SchemaRegistry::new();
        registry.load_dir(temp_dir.path()).unwrap();

        assert_eq!(registry.len(), 2);
        assert!(registry.contains("Post"));
        assert!(registry.contains("Blog"));
    }

    #[test]
    fn test_load_dir_missing_directory_is_empty() {
        let temp_dir = TempDir::new().unwrap();
        let mut registry = SchemaRegistry::new();

        registry.load_dir(&temp_dir.path().join("absent")).unwrap();
        assert!(registry.is_empty());
    }

    #[test]
    fn test_load_dir_skips_non_json_files() {
        let temp_dir = TempDir::new().unwrap();
        fs::write(temp_dir.path().join("notes.txt"), "not a schema").unwrap();
        SchemaRegistry::save(temp_dir.path(), &post_schema()).unwrap();

        let mut registry = SchemaRegistry::new();
        registry.load_dir(temp_dir.path()).unwrap();
        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn test_load_dir_rejects_malformed_file() {
        let temp_dir = TempDir::new().unwrap();
        fs::write(temp_dir.path().join("Broken.json"), "{ not json").unwrap();

        let mut registry = SchemaRegistry::new();
        let result = registry.load_dir(temp_dir.path());
        assert!(matches!(result, Err(RegistryError::Malformed { .. })));
    }

    #[test]
    fn test_load_dir_rejects_dangling_reference() {
        let temp_dir = TempDir::new().unwrap();
        SchemaRegistry::save(temp_dir.path(), &blog_schema()).unwrap();

        let mut registry = SchemaRegistry::new();
        let result = registry.load_dir(temp_dir.path());
        assert!(matches!(result, Err(RegistryError::DanglingReference { .. })));
    }
}
