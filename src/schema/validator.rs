//! Schema validator engine
//!
//! A general schema interpreter over `serde_json::Value`. Per invocation,
//! checks run in a fixed order at each structural level:
//!
//! 1. The value must be a JSON object (non-null, non-array)
//! 2. Required fields, in schema declared order
//! 3. Unknown keys, in value insertion order (rejected, not stripped)
//! 4. Per-field type/format checks, in schema declared order; absent
//!    optional fields are valid
//!
//! Fail-fast by default: the first violation ends the walk. Accumulation
//! is an explicit mode and keeps the same ordering, it just keeps going.
//!
//! The engine never mutates the value, performs no I/O, and reads only
//! frozen schemas, so concurrent validation calls are safe.

use serde_json::Value;

use super::errors::{UnknownSchema, ValidationFailure, ValidationResult};
use super::registry::SchemaRegistry;
use super::types::{FieldType, Schema};
use crate::formats;

/// Whether validation stops at the first violation or collects them all.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ValidationMode {
    /// Stop at the first violation (default)
    #[default]
    FailFast,
    /// Collect every violation, depth-first in declaration order
    Accumulate,
}

/// Validates values against registered schemas.
///
/// Borrows the registry: schema references encountered during the walk
/// are resolved through it, so a schema graph (e.g. `Blog` → `Post[]`)
/// validates in one call.
pub struct SchemaValidator<'a> {
    registry: &'a SchemaRegistry,
    mode: ValidationMode,
}

/// Why a walk ended early.
enum Halt {
    /// A violation was recorded in fail-fast mode
    FirstFailure,
    /// A schema reference failed to resolve mid-walk
    MissingSchema(String),
}

/// Records violations and signals when the walk should stop.
struct Collector {
    mode: ValidationMode,
    failures: Vec<ValidationFailure>,
}

impl Collector {
    fn record(&mut self, failure: ValidationFailure) -> Result<(), Halt> {
        self.failures.push(failure);
        match self.mode {
            ValidationMode::FailFast => Err(Halt::FirstFailure),
            ValidationMode::Accumulate => Ok(()),
        }
    }
}

impl<'a> SchemaValidator<'a> {
    /// Creates a fail-fast validator backed by the given registry.
    pub fn new(registry: &'a SchemaRegistry) -> Self {
        Self {
            registry,
            mode: ValidationMode::FailFast,
        }
    }

    /// Creates a validator with an explicit mode.
    pub fn with_mode(registry: &'a SchemaRegistry, mode: ValidationMode) -> Self {
        Self { registry, mode }
    }

    /// Validates a value against the named schema.
    ///
    /// # Errors
    ///
    /// Returns `UnknownSchema` when `schema_name` is not registered or a
    /// schema reference fails to resolve during the walk. That is a
    /// configuration problem, not a verdict on the value; validation
    /// verdicts come back as the `ValidationResult`.
    pub fn validate(
        &self,
        schema_name: &str,
        value: &Value,
    ) -> Result<ValidationResult, UnknownSchema> {
        let schema = self
            .registry
            .get(schema_name)
            .ok_or_else(|| UnknownSchema(schema_name.to_string()))?;

        let mut collector = Collector {
            mode: self.mode,
            failures: Vec::new(),
        };

        match self.check_object(schema, value, "", &mut collector) {
            Ok(()) | Err(Halt::FirstFailure) => {}
            Err(Halt::MissingSchema(name)) => return Err(UnknownSchema(name)),
        }

        if collector.failures.is_empty() {
            Ok(ValidationResult::Valid)
        } else {
            Ok(ValidationResult::Invalid(collector.failures))
        }
    }

    /// Validates one object level against a schema.
    fn check_object(
        &self,
        schema: &Schema,
        value: &Value,
        path: &str,
        out: &mut Collector,
    ) -> Result<(), Halt> {
        let Some(obj) = value.as_object() else {
            return out.record(ValidationFailure::wrong_type(path, "object"));
        };

        // Required fields, declared order. Absent means the key is missing;
        // null is present (and fails the type check later).
        for field in schema.fields.iter().filter(|f| f.required) {
            if !obj.contains_key(&field.name) {
                out.record(ValidationFailure::missing_required(path, &field.name))?;
            }
        }

        // Unknown keys, value insertion order.
        if schema.deny_unknown {
            for key in obj.keys() {
                if schema.field(key).is_none() {
                    out.record(ValidationFailure::unknown_field(path, key))?;
                }
            }
        }

        // Per-field checks, declared order.
        for field in &schema.fields {
            if let Some(field_value) = obj.get(&field.name) {
                let field_path = append_pointer(path, &field.name);
                self.check_value(&field.field_type, field_value, &field_path, out)?;
            }
        }

        Ok(())
    }

    /// Validates one value against a field type.
    fn check_value(
        &self,
        expected: &FieldType,
        value: &Value,
        path: &str,
        out: &mut Collector,
    ) -> Result<(), Halt> {
        match expected {
            FieldType::String => {
                if !value.is_string() {
                    out.record(ValidationFailure::wrong_type(path, "string"))?;
                }
            }
            FieldType::Number => {
                // serde_json numbers are finite by construction; the check
                // also covers u64 values outside the f64-exact range.
                if !value.as_f64().map_or(false, f64::is_finite) {
                    out.record(ValidationFailure::wrong_type(path, "number"))?;
                }
            }
            FieldType::Bool => {
                if !value.is_boolean() {
                    out.record(ValidationFailure::wrong_type(path, "boolean"))?;
                }
            }
            FieldType::DateTime => match value.as_str() {
                None => out.record(ValidationFailure::wrong_type(path, "string"))?,
                Some(text) if !formats::date_time(text) => {
                    out.record(ValidationFailure::format_mismatch(path, "date-time"))?;
                }
                Some(_) => {}
            },
            FieldType::Ref { schema } => {
                let Some(nested) = self.registry.get(schema) else {
                    return Err(Halt::MissingSchema(schema.clone()));
                };
                self.check_object(nested, value, path, out)?;
            }
            FieldType::Array { element } => {
                let Some(items) = value.as_array() else {
                    return out.record(ValidationFailure::wrong_type(path, "array"));
                };
                for (index, item) in items.iter().enumerate() {
                    let item_path = format!("{}/{}", path, index);
                    self.check_value(element, item, &item_path, out)?;
                }
            }
        }
        Ok(())
    }
}

/// Appends a field name to a JSON-pointer path, escaping `~` and `/`
/// per RFC 6901.
fn append_pointer(path: &str, token: &str) -> String {
    if token.contains(['~', '/']) {
        let escaped = token.replace('~', "~0").replace('/', "~1");
        format!("{}/{}", path, escaped)
    } else {
        format!("{}/{}", path, token)
    }
}
