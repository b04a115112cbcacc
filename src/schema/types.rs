//! Schema type descriptors
//!
//! Supported field types:
//! - string: UTF-8 string
//! - number: finite 64-bit float (integers accepted)
//! - bool: boolean
//! - date-time: string constrained to the `date-time` format
//! - ref: reference to another schema by name
//! - array: homogeneous array with a single element type
//!
//! Fields are kept in declared order: the required-field scan and the
//! per-field checks walk this order, so it is part of the validation
//! contract, not a storage detail.

use serde::{Deserialize, Serialize};

/// Field type tag, matching the `type` discriminator in schema files.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "kebab-case")]
pub enum FieldType {
    /// UTF-8 string
    String,
    /// Finite number (rejects NaN and infinities)
    Number,
    /// Boolean
    Bool,
    /// String carrying the `date-time` format
    DateTime,
    /// Reference to another registered schema
    Ref {
        /// Name of the referenced schema
        schema: String,
    },
    /// Homogeneous array with a single element type
    Array {
        /// Element type (boxed to allow nesting)
        element: Box<FieldType>,
    },
}

impl FieldType {
    /// Shorthand for a named schema reference.
    pub fn reference(schema: impl Into<String>) -> Self {
        FieldType::Ref {
            schema: schema.into(),
        }
    }

    /// Shorthand for an array of the given element type.
    pub fn array(element: FieldType) -> Self {
        FieldType::Array {
            element: Box::new(element),
        }
    }

    /// Returns the value kind this type expects, for error messages.
    ///
    /// `date-time` fields expect a string; the format check is separate.
    pub fn expected_kind(&self) -> &'static str {
        match self {
            FieldType::String | FieldType::DateTime => "string",
            FieldType::Number => "number",
            FieldType::Bool => "boolean",
            FieldType::Ref { .. } => "object",
            FieldType::Array { .. } => "array",
        }
    }
}

/// A single named field in a schema.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldDef {
    /// Field name as it appears in values
    pub name: String,
    /// Field data type
    #[serde(flatten)]
    pub field_type: FieldType,
    /// Whether the field must be present
    pub required: bool,
}

impl FieldDef {
    /// Create a required field.
    pub fn required(name: impl Into<String>, field_type: FieldType) -> Self {
        Self {
            name: name.into(),
            field_type,
            required: true,
        }
    }

    /// Create an optional field.
    pub fn optional(name: impl Into<String>, field_type: FieldType) -> Self {
        Self {
            name: name.into(),
            field_type,
            required: false,
        }
    }
}

/// A complete named schema definition.
///
/// Produced by the external generator as one JSON file per type, or built
/// programmatically. Immutable once registered.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Schema {
    /// Type name this schema validates (registry key)
    pub name: String,
    /// Optional description
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Field definitions, in declared order
    pub fields: Vec<FieldDef>,
    /// Whether keys absent from `fields` are rejected
    #[serde(default = "default_deny_unknown")]
    pub deny_unknown: bool,
}

fn default_deny_unknown() -> bool {
    true
}

impl Schema {
    /// Create a schema that rejects unknown fields (the generator's default).
    pub fn new(name: impl Into<String>, fields: Vec<FieldDef>) -> Self {
        Self {
            name: name.into(),
            description: None,
            fields,
            deny_unknown: true,
        }
    }

    /// Looks up a field by name. Linear scan; schemas are small and the
    /// declared order must be preserved.
    pub fn field(&self, name: &str) -> Option<&FieldDef> {
        self.fields.iter().find(|f| f.name == name)
    }

    /// Validates the schema definition itself (not a value).
    pub fn validate_structure(&self) -> Result<(), String> {
        if self.name.is_empty() {
            return Err("schema name must not be empty".into());
        }
        for (i, field) in self.fields.iter().enumerate() {
            if field.name.is_empty() {
                return Err(format!("field {} has an empty name", i));
            }
            if self.fields[..i].iter().any(|f| f.name == field.name) {
                return Err(format!("duplicate field '{}'", field.name));
            }
        }
        Ok(())
    }
}
