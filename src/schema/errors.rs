//! Validation failures and schema error types
//!
//! Two distinct classes, handled differently by callers:
//! - configuration errors (`UnknownSchema`, `RegistryError`): the
//!   deployment is wrong — a schema is missing, duplicated, or malformed.
//!   Not recoverable by retrying with different input.
//! - validation failures (`ValidationFailure` inside an `Invalid` result):
//!   the input is wrong. Always recoverable by the caller.

use serde::Serialize;
use std::fmt;
use thiserror::Error;

/// Category of a single validation violation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum FailureKind {
    /// A required field is absent
    MissingRequired,
    /// A key not declared by the schema is present
    UnknownField,
    /// A value is of the wrong kind
    WrongType,
    /// A string value does not satisfy its named format
    FormatMismatch,
}

impl FailureKind {
    /// Returns the string representation
    pub fn as_str(&self) -> &'static str {
        match self {
            FailureKind::MissingRequired => "MissingRequired",
            FailureKind::UnknownField => "UnknownField",
            FailureKind::WrongType => "WrongType",
            FailureKind::FormatMismatch => "FormatMismatch",
        }
    }
}

impl fmt::Display for FailureKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// One detected violation: where it is, what it is, what was expected.
///
/// `path` is a JSON pointer into the value (`""` at the root,
/// `/posts/0/createAt` inside nested structures).
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ValidationFailure {
    /// JSON-pointer location of the violation
    pub path: String,
    /// Violation category
    pub kind: FailureKind,
    /// What was expected: a field name, a value kind, or a format name
    pub expected: String,
    /// Human-readable message
    pub message: String,
}

impl ValidationFailure {
    /// A required field is missing from the object at `path`.
    pub fn missing_required(path: impl Into<String>, field: &str) -> Self {
        Self {
            path: path.into(),
            kind: FailureKind::MissingRequired,
            expected: field.to_string(),
            message: format!("must have required property '{}'", field),
        }
    }

    /// An undeclared key is present on the object at `path`.
    pub fn unknown_field(path: impl Into<String>, key: &str) -> Self {
        Self {
            path: path.into(),
            kind: FailureKind::UnknownField,
            expected: key.to_string(),
            message: format!("must not have unknown property '{}'", key),
        }
    }

    /// The value at `path` is not of the expected kind.
    pub fn wrong_type(path: impl Into<String>, expected: &str) -> Self {
        Self {
            path: path.into(),
            kind: FailureKind::WrongType,
            expected: expected.to_string(),
            message: format!("must be {}", expected),
        }
    }

    /// The string at `path` does not satisfy the named format.
    pub fn format_mismatch(path: impl Into<String>, format: &str) -> Self {
        Self {
            path: path.into(),
            kind: FailureKind::FormatMismatch,
            expected: format.to_string(),
            message: format!("must match format \"{}\"", format),
        }
    }
}

impl fmt::Display for ValidationFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.path.is_empty() {
            write!(f, "{}", self.message)
        } else {
            write!(f, "{}: {}", self.path, self.message)
        }
    }
}

/// Outcome of validating a value against a schema.
///
/// Fail-fast validation carries at most one failure; accumulation mode
/// may carry many, in depth-first declaration order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationResult {
    /// The value matches the schema
    Valid,
    /// One or more violations, in detection order
    Invalid(Vec<ValidationFailure>),
}

impl ValidationResult {
    /// True when no violation was detected.
    pub fn is_valid(&self) -> bool {
        matches!(self, ValidationResult::Valid)
    }

    /// The detected violations (empty when valid).
    pub fn failures(&self) -> &[ValidationFailure] {
        match self {
            ValidationResult::Valid => &[],
            ValidationResult::Invalid(failures) => failures,
        }
    }

    /// Consumes the result, returning the violations (empty when valid).
    pub fn into_failures(self) -> Vec<ValidationFailure> {
        match self {
            ValidationResult::Valid => Vec::new(),
            ValidationResult::Invalid(failures) => failures,
        }
    }
}

/// Requested schema has no registered definition.
///
/// A deployment/build mismatch, distinct from validation failure: the
/// input may be fine, the registry is not.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("no schema registered under name '{0}'")]
pub struct UnknownSchema(pub String);

/// Errors raised while building or loading the schema registry.
#[derive(Debug, Error)]
pub enum RegistryError {
    /// A schema with this name is already registered
    #[error("schema '{0}' is already registered")]
    Duplicate(String),

    /// The schema definition itself is invalid
    #[error("invalid schema definition: {0}")]
    InvalidSchema(String),

    /// A field references a schema the registry does not hold
    #[error("schema '{schema}' field '{field}' references unregistered schema '{target}'")]
    DanglingReference {
        /// Schema holding the reference
        schema: String,
        /// Field holding the reference
        field: String,
        /// Name that failed to resolve
        target: String,
    },

    /// A schema file could not be read
    #[error("failed to read schema file '{path}': {reason}")]
    Io {
        /// Offending file path
        path: String,
        /// Underlying I/O error text
        reason: String,
    },

    /// A schema file could not be parsed
    #[error("malformed schema file '{path}': {reason}")]
    Malformed {
        /// Offending file path
        path: String,
        /// Underlying parse error text
        reason: String,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_failure_constructors() {
        let missing = ValidationFailure::missing_required("", "createAt");
        assert_eq!(missing.kind, FailureKind::MissingRequired);
        assert_eq!(missing.expected, "createAt");
        assert_eq!(missing.path, "");
        assert!(missing.message.contains("createAt"));

        let unknown = ValidationFailure::unknown_field("/posts/0", "extra");
        assert_eq!(unknown.kind, FailureKind::UnknownField);
        assert_eq!(unknown.expected, "extra");

        let wrong = ValidationFailure::wrong_type("/rating", "number");
        assert_eq!(wrong.message, "must be number");

        let format = ValidationFailure::format_mismatch("/createAt", "date-time");
        assert_eq!(format.expected, "date-time");
        assert!(format.message.contains("date-time"));
    }

    #[test]
    fn test_failure_display_includes_path() {
        let failure = ValidationFailure::wrong_type("/posts/0/title", "string");
        let text = format!("{}", failure);
        assert!(text.contains("/posts/0/title"));
        assert!(text.contains("must be string"));
    }

    #[test]
    fn test_failure_serializes_to_json() {
        let failure = ValidationFailure::missing_required("", "createAt");
        let json = serde_json::to_string(&failure).unwrap();
        assert!(json.contains("\"kind\":\"MissingRequired\""));
        assert!(json.contains("\"expected\":\"createAt\""));
    }

    #[test]
    fn test_result_accessors() {
        assert!(ValidationResult::Valid.is_valid());
        assert!(ValidationResult::Valid.failures().is_empty());

        let invalid =
            ValidationResult::Invalid(vec![ValidationFailure::wrong_type("", "object")]);
        assert!(!invalid.is_valid());
        assert_eq!(invalid.failures().len(), 1);
        assert_eq!(invalid.into_failures().len(), 1);
    }

    #[test]
    fn test_unknown_schema_display() {
        let err = UnknownSchema("Post".into());
        assert_eq!(err.to_string(), "no schema registered under name 'Post'");
    }

    #[test]
    fn test_registry_error_display() {
        let err = RegistryError::DanglingReference {
            schema: "Blog".into(),
            field: "posts".into(),
            target: "Post".into(),
        };
        let text = err.to_string();
        assert!(text.contains("Blog"));
        assert!(text.contains("posts"));
        assert!(text.contains("Post"));
    }
}
