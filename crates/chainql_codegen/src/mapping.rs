//! GraphQL type references to Rust types.
//!
//! | GraphQL            | Rust                    |
//! |--------------------|-------------------------|
//! | `String`, `ID`     | `String`                |
//! | `Int`              | `i64`                   |
//! | `Float`            | `f64`                   |
//! | `Boolean`          | `bool`                  |
//! | custom scalar      | newtype                 |
//! | enum, input object | generated type          |
//! | `[T]`              | `Vec<T>`                |
//! | nullable `T`       | `Option<T>`             |

use chainql_schema::{is_builtin_scalar, Schema, Type, TypeKind, TypeRef};

use crate::error::{CodegenError, CodegenResult};
use crate::naming;

pub(crate) struct TypeMapper<'a> {
    schema: &'a Schema,
    client_name: &'a str,
}

impl<'a> TypeMapper<'a> {
    pub(crate) fn new(schema: &'a Schema, client_name: &'a str) -> Self {
        Self {
            schema,
            client_name,
        }
    }

    pub(crate) fn schema(&self) -> &'a Schema {
        self.schema
    }

    /// Rust name of a schema type. The root query type becomes the client.
    pub(crate) fn rust_name(&self, graphql_name: &str) -> String {
        if self.schema.is_query_type(graphql_name) {
            self.client_name.to_string()
        } else {
            naming::type_name(graphql_name)
        }
    }

    /// Full mapping, `Option` for nullable layers.
    pub(crate) fn value_type(&self, type_ref: &TypeRef, context: &str) -> CodegenResult<String> {
        match type_ref {
            TypeRef::NonNull(inner) => self.bare_type(inner, context),
            other => Ok(format!("Option<{}>", self.bare_type(other, context)?)),
        }
    }

    /// Mapping with the outermost nullability stripped.
    pub(crate) fn bare_type(&self, type_ref: &TypeRef, context: &str) -> CodegenResult<String> {
        match type_ref {
            TypeRef::NonNull(inner) => self.bare_type(inner, context),
            TypeRef::List(element) => Ok(format!("Vec<{}>", self.value_type(element, context)?)),
            TypeRef::Named { kind, name } => self.named_type(*kind, name, context),
        }
    }

    fn named_type(&self, kind: TypeKind, name: &str, context: &str) -> CodegenResult<String> {
        if kind == TypeKind::Scalar && is_builtin_scalar(name) {
            return Ok(match name {
                "Int" => "i64",
                "Float" => "f64",
                "Boolean" => "bool",
                _ => "String",
            }
            .to_string());
        }

        let ty = self.lookup(name, context)?;
        match ty.kind {
            TypeKind::Scalar | TypeKind::Enum | TypeKind::InputObject | TypeKind::Object => {
                Ok(self.rust_name(name))
            }
            other => Err(CodegenError::unsupported(
                context,
                format!("cannot map {other} type `{name}`"),
            )),
        }
    }

    /// Looks up a referenced type, failing if the schema lacks it.
    pub(crate) fn lookup(&self, name: &str, context: &str) -> CodegenResult<&'a Type> {
        self.schema
            .get_type(name)
            .ok_or_else(|| CodegenError::UnknownType {
                context: context.to_string(),
                name: name.to_string(),
            })
    }

    /// The object a direct (non-list) id-scalar argument stands for.
    pub(crate) fn id_object(&self, type_ref: &TypeRef) -> Option<&'a Type> {
        match type_ref.unwrap_non_null() {
            TypeRef::Named {
                kind: TypeKind::Scalar,
                name,
            } => self.schema.object_for_id_scalar(name),
            _ => None,
        }
    }
}
