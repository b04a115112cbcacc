//! Type assertion wrapper
//!
//! `ensure_type` asserts that a native value matches its declared schema:
//! the value is round-tripped through the canonical serialization form
//! (`serde_json::Value`), validated by the engine, and handed back
//! untouched on success. The round trip is the point: rich native types
//! (a `chrono` timestamp, say) are forced into the primitive shape the
//! schema describes, so the rules are written once against the serialized
//! shape rather than per in-memory representation.
//!
//! Optional fields must serialize as omitted, not null — use
//! `#[serde(skip_serializing_if = "Option::is_none")]` on them.

use serde::Serialize;
use thiserror::Error;

use crate::schema::{
    RegistryError, Schema, SchemaRegistry, SchemaValidator, UnknownSchema, ValidationFailure,
    ValidationResult,
};

/// A type with a statically known schema.
///
/// Implementing this closes the name→schema mapping at compile time:
/// registration and lookup both go through `T`, so the "validator not
/// found" error class cannot arise for statically-known types. String
/// lookup via [`ensure_type`] remains available for schemas only known
/// at runtime.
pub trait TypedSchema: Serialize {
    /// Registry key for this type's schema.
    const NAME: &'static str;

    /// The schema definition for this type.
    fn schema() -> Schema;
}

impl SchemaRegistry {
    /// Registers the schema of `T`, keyed by `T::NAME`.
    pub fn register_type<T: TypedSchema>(&mut self) -> Result<(), RegistryError> {
        self.register(T::schema())
    }
}

/// Value/schema mismatch detected by [`ensure_type`].
///
/// Carries the engine's failures verbatim plus a JSON rendering for
/// logging.
#[derive(Debug, Clone, Error)]
#[error("value does not match schema '{schema}': {summary}")]
pub struct TypeError {
    /// Schema the value was checked against
    pub schema: String,
    /// Ordered violations, verbatim from the engine
    pub failures: Vec<ValidationFailure>,
    /// JSON rendering of the failures
    pub summary: String,
}

impl TypeError {
    fn new(schema: &str, failures: Vec<ValidationFailure>) -> Self {
        let summary = serde_json::to_string(&failures).unwrap_or_default();
        Self {
            schema: schema.to_string(),
            failures,
            summary,
        }
    }
}

/// Errors from [`ensure_type`].
///
/// `SchemaNotFound` means the deployment is wrong (fix the registry);
/// `Invalid` means the input is wrong (reject or repair it). Callers are
/// expected to handle the two distinctly.
#[derive(Debug, Error)]
pub enum EnsureError {
    /// No schema registered under the requested name
    #[error(transparent)]
    SchemaNotFound(#[from] UnknownSchema),

    /// The value does not match the schema
    #[error(transparent)]
    Invalid(#[from] TypeError),

    /// The value could not be rendered in the canonical serialization form
    #[error("failed to serialize value for validation: {0}")]
    Serialize(#[from] serde_json::Error),
}

/// Validates `value` against the named schema and returns it unchanged.
///
/// The validated copy is the normalized round-trip; the returned value is
/// the original, so callers keep their native types.
pub fn ensure_type<T: Serialize>(
    registry: &SchemaRegistry,
    schema_name: &str,
    value: T,
) -> Result<T, EnsureError> {
    if !registry.contains(schema_name) {
        return Err(UnknownSchema(schema_name.to_string()).into());
    }

    let normalized = serde_json::to_value(&value)?;
    let validator = SchemaValidator::new(registry);

    match validator.validate(schema_name, &normalized)? {
        ValidationResult::Valid => Ok(value),
        ValidationResult::Invalid(failures) => Err(TypeError::new(schema_name, failures).into()),
    }
}

/// Statically-keyed variant of [`ensure_type`].
pub fn ensure<T: TypedSchema>(registry: &SchemaRegistry, value: T) -> Result<T, EnsureError> {
    ensure_type(registry, T::NAME, value)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::{FailureKind, FieldDef, FieldType};
    use chrono::{DateTime, TimeZone, Utc};

    #[derive(Debug, Clone, PartialEq, Serialize)]
    struct Post {
        title: String,
        #[serde(skip_serializing_if = "Option::is_none")]
        description: Option<String>,
        rating: f64,
        #[serde(rename = "createAt")]
        create_at: DateTime<Utc>,
    }

    impl TypedSchema for Post {
        const NAME: &'static str = "Post";

        fn schema() -> Schema {
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
    }

    fn sample_post() -> Post {
        Post {
            title: "Valid Post".into(),
            description: None,
            rating: 5.0,
            create_at: Utc.with_ymd_and_hms(2024, 1, 15, 10, 30, 0).unwrap(),
        }
    }

    fn setup_registry() -> SchemaRegistry {
        let mut registry = SchemaRegistry::new();
        registry.register_type::<Post>().unwrap();
        registry
    }

    #[test]
    fn test_valid_value_returned_unchanged() {
        let registry = setup_registry();
        let post = sample_post();

        let returned = ensure::<Post>(&registry, post.clone()).unwrap();
        assert_eq!(returned, post);
    }

    #[test]
    fn test_native_date_normalizes_to_date_time_string() {
        let post = sample_post();
        let normalized = serde_json::to_value(&post).unwrap();
        let text = normalized["createAt"].as_str().unwrap();
        assert!(crate::formats::date_time(text));
    }

    #[test]
    fn test_absent_option_is_omitted_not_null() {
        let post = sample_post();
        let normalized = serde_json::to_value(&post).unwrap();
        assert!(normalized.get("description").is_none());
    }

    #[test]
    fn test_invalid_value_raises_type_error() {
        let registry = setup_registry();
        let broken = serde_json::json!({ "title": "x", "rating": 1 });

        let err = ensure_type(&registry, "Post", broken).unwrap_err();
        match err {
            EnsureError::Invalid(type_error) => {
                assert_eq!(type_error.schema, "Post");
                assert_eq!(type_error.failures.len(), 1);
                assert_eq!(type_error.failures[0].kind, FailureKind::MissingRequired);
                assert_eq!(type_error.failures[0].expected, "createAt");
                // Summary is the failures as JSON
                let parsed: serde_json::Value =
                    serde_json::from_str(&type_error.summary).unwrap();
                assert_eq!(parsed[0]["expected"], "createAt");
            }
            other => panic!("expected Invalid, got {:?}", other),
        }
    }

    #[test]
    fn test_missing_schema_is_distinct_from_invalid() {
        let registry = SchemaRegistry::new();

        let err = ensure_type(&registry, "Post", sample_post()).unwrap_err();
        assert!(matches!(err, EnsureError::SchemaNotFound(_)));
    }

    #[test]
    fn test_idempotent_on_valid_value() {
        let registry = setup_registry();

        let once = ensure::<Post>(&registry, sample_post()).unwrap();
        let twice = ensure::<Post>(&registry, once.clone()).unwrap();
        assert_eq!(once, twice);
    }
}
