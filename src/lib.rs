//! veritype - runtime schema validation for statically-declared types
//!
//! Schemas describe the serialized shape of a type: its fields, which
//! are required, their types and formats, and that nothing else may be
//! present. The validator interprets those schemas against JSON values;
//! [`ensure::ensure_type`] wraps it into a type assertion that
//! normalizes a native value through serialization, validates it, and
//! returns it unchanged.
//!
//! ```ignore
//! use veritype::ensure::ensure_type;
//! use veritype::schema::SchemaRegistry;
//!
//! let mut registry = SchemaRegistry::new();
//! registry.load_dir("schemas".as_ref())?;
//!
//! let post = ensure_type(&registry, "Post", candidate)?;
//! ```

pub mod ensure;
pub mod formats;
pub mod observability;
pub mod schema;
