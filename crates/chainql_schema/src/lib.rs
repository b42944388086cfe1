//! Schema model for chainql.
//!
//! This crate turns an introspection document into the type graph the
//! code generator walks:
//! - `introspection`: raw serde records for the introspection JSON
//! - `types`: `Type`, `TypeRef`, `Field` and the classification predicates
//! - `schema`: the parsed `Schema` and its builder
//!
//! # Example
//!
//! ```ignore
//! use chainql_schema::Schema;
//!
//! let schema = Schema::from_path("introspection.json")?;
//! for ty in schema.types() {
//!     println!("{} ({})", ty.name, ty.kind);
//! }
//! ```

pub mod error;
pub mod introspection;
pub mod schema;
pub mod types;

pub use error::{SchemaError, SchemaResult};
pub use schema::Schema;
pub use types::{
    id_scalar_name, is_builtin_scalar, is_introspection_type, EnumValue, Field, InputValue, Type,
    TypeKind, TypeRef, BUILTIN_SCALARS,
};
