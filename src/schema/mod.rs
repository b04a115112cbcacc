//! Schema validation subsystem
//!
//! Schemas are loaded once at startup (from the generator's JSON files or
//! programmatic registration) and frozen; the validator interprets them
//! against `serde_json::Value` inputs.
//!
//! # Design Principles
//!
//! - Validation never mutates the value
//! - Unknown fields are rejected, not stripped
//! - Fail-fast by default; accumulation is an explicit mode
//! - Configuration errors (missing schema) are distinct from validation
//!   failures (bad input)

mod errors;
mod registry;
mod types;
mod validator;

pub use errors::{
    FailureKind, RegistryError, UnknownSchema, ValidationFailure, ValidationResult,
};
pub use registry::SchemaRegistry;
pub use types::{FieldDef, FieldType, Schema};
pub use validator::{SchemaValidator, ValidationMode};
