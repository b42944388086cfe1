//! Schema model built from an introspection document.

use std::path::Path;

use indexmap::IndexMap;
use tracing::debug;

use crate::error::{SchemaError, SchemaResult};
use crate::introspection::{
    IntrospectionDocument, RawEnumValue, RawField, RawInputValue, RawSchema, RawType, RawTypeRef,
};
use crate::types::{EnumValue, Field, InputValue, Type, TypeKind, TypeRef};

/// A parsed remote type system.
#[derive(Debug, Clone)]
pub struct Schema {
    pub query_type: String,
    pub mutation_type: Option<String>,
    pub subscription_type: Option<String>,
    /// Source order.
    pub types: IndexMap<String, Type>,
}

impl Schema {
    /// Parses an introspection document from a JSON string.
    pub fn from_json(json: &str) -> SchemaResult<Self> {
        let doc: IntrospectionDocument = serde_json::from_str(json)?;
        Self::from_document(doc)
    }

    /// Parses an introspection document from an already decoded value.
    pub fn from_value(value: serde_json::Value) -> SchemaResult<Self> {
        let doc: IntrospectionDocument = serde_json::from_value(value)?;
        Self::from_document(doc)
    }

    /// Reads and parses an introspection document from disk.
    pub fn from_path(path: impl AsRef<Path>) -> SchemaResult<Self> {
        let source = std::fs::read_to_string(path)?;
        Self::from_json(&source)
    }

    fn from_document(doc: IntrospectionDocument) -> SchemaResult<Self> {
        let raw = doc
            .into_container()
            .schema
            .ok_or(SchemaError::MissingSchema)?;
        build_schema(raw)
    }

    /// Gets a type by name.
    pub fn get_type(&self, name: &str) -> Option<&Type> {
        self.types.get(name)
    }

    /// The root query type, if present in `types`.
    pub fn query_type(&self) -> Option<&Type> {
        self.types.get(&self.query_type)
    }

    /// Returns all types in source order.
    pub fn types(&self) -> impl Iterator<Item = &Type> {
        self.types.values()
    }

    /// Whether `name` is the root query type.
    pub fn is_query_type(&self, name: &str) -> bool {
        self.query_type == name
    }

    /// The object whose identity scalar is `scalar` (`ContainerID` -> `Container`).
    pub fn object_for_id_scalar(&self, scalar: &str) -> Option<&Type> {
        let name = scalar.strip_suffix("ID")?;
        self.types.get(name).filter(|t| t.provides_id())
    }
}

fn build_schema(raw: RawSchema) -> SchemaResult<Schema> {
    let raw_types = raw.types.ok_or(SchemaError::MissingTypes)?;

    let mut types = IndexMap::with_capacity(raw_types.len());
    for raw_type in raw_types {
        let ty = build_type(raw_type)?;
        if types.contains_key(&ty.name) {
            return Err(SchemaError::DuplicateType(ty.name));
        }
        types.insert(ty.name.clone(), ty);
    }

    debug!(types = types.len(), "parsed introspection schema");

    Ok(Schema {
        query_type: raw
            .query_type
            .and_then(|t| t.name)
            .unwrap_or_else(|| "Query".to_string()),
        mutation_type: raw.mutation_type.and_then(|t| t.name),
        subscription_type: raw.subscription_type.and_then(|t| t.name),
        types,
    })
}

fn build_type(raw: RawType) -> SchemaResult<Type> {
    let name = raw.name.ok_or_else(|| SchemaError::MissingField {
        context: "type".to_string(),
        field: "name",
    })?;
    let kind_str = raw.kind.ok_or_else(|| SchemaError::MissingField {
        context: format!("type `{name}`"),
        field: "kind",
    })?;
    let kind = TypeKind::parse(&kind_str).ok_or_else(|| SchemaError::UnknownKind {
        context: format!("type `{name}`"),
        kind: kind_str.clone(),
    })?;

    let mut fields = raw
        .fields
        .unwrap_or_default()
        .into_iter()
        .map(|f| build_field(f, &name))
        .collect::<SchemaResult<Vec<_>>>()?;
    fields.sort_by(|a, b| a.name.cmp(&b.name));

    let mut input_fields = raw
        .input_fields
        .unwrap_or_default()
        .into_iter()
        .map(|v| build_input_value(v, &name))
        .collect::<SchemaResult<Vec<_>>>()?;
    input_fields.sort_by(|a, b| a.name.cmp(&b.name));

    let enum_values = raw
        .enum_values
        .unwrap_or_default()
        .into_iter()
        .map(|v| build_enum_value(v, &name))
        .collect::<SchemaResult<Vec<_>>>()?;

    Ok(Type {
        kind,
        name,
        description: raw.description,
        fields,
        input_fields,
        enum_values,
    })
}

fn build_field(raw: RawField, parent: &str) -> SchemaResult<Field> {
    let name = raw.name.ok_or_else(|| SchemaError::MissingField {
        context: format!("field of `{parent}`"),
        field: "name",
    })?;
    let context = format!("{parent}.{name}");
    let type_ref = raw
        .type_
        .ok_or_else(|| SchemaError::MissingField {
            context: context.clone(),
            field: "type",
        })
        .and_then(|t| build_type_ref(t, &context))?;

    // Argument order is significant for generated signatures; keep it.
    let args = raw
        .args
        .into_iter()
        .map(|a| build_input_value(a, &context))
        .collect::<SchemaResult<Vec<_>>>()?;

    Ok(Field {
        name,
        description: raw.description,
        type_ref,
        args,
        is_deprecated: raw.is_deprecated,
        deprecation_reason: raw.deprecation_reason,
        parent: parent.to_string(),
    })
}

fn build_input_value(raw: RawInputValue, owner: &str) -> SchemaResult<InputValue> {
    let name = raw.name.ok_or_else(|| SchemaError::MissingField {
        context: format!("input value of `{owner}`"),
        field: "name",
    })?;
    let context = format!("{owner}.{name}");
    let type_ref = raw
        .type_
        .ok_or_else(|| SchemaError::MissingField {
            context: context.clone(),
            field: "type",
        })
        .and_then(|t| build_type_ref(t, &context))?;

    Ok(InputValue {
        name,
        description: raw.description,
        type_ref,
        default_value: raw.default_value,
    })
}

fn build_enum_value(raw: RawEnumValue, owner: &str) -> SchemaResult<EnumValue> {
    let name = raw.name.ok_or_else(|| SchemaError::MissingField {
        context: format!("enum value of `{owner}`"),
        field: "name",
    })?;
    Ok(EnumValue {
        name,
        description: raw.description,
        is_deprecated: raw.is_deprecated,
        deprecation_reason: raw.deprecation_reason,
    })
}

fn build_type_ref(raw: RawTypeRef, context: &str) -> SchemaResult<TypeRef> {
    let kind_str = raw.kind.ok_or_else(|| SchemaError::MissingField {
        context: context.to_string(),
        field: "kind",
    })?;
    let kind = TypeKind::parse(&kind_str).ok_or_else(|| SchemaError::UnknownKind {
        context: context.to_string(),
        kind: kind_str.clone(),
    })?;

    match kind {
        TypeKind::NonNull | TypeKind::List => {
            let inner = raw.of_type.ok_or(SchemaError::MissingInner {
                context: context.to_string(),
                kind: kind.as_str(),
            })?;
            let inner = build_type_ref(*inner, context)?;
            if kind == TypeKind::NonNull && matches!(inner, TypeRef::NonNull(_)) {
                return Err(SchemaError::NestedNonNull {
                    context: context.to_string(),
                });
            }
            Ok(if kind == TypeKind::NonNull {
                TypeRef::non_null(inner)
            } else {
                TypeRef::list(inner)
            })
        }
        _ => {
            let name = raw.name.ok_or_else(|| SchemaError::MissingField {
                context: context.to_string(),
                field: "name",
            })?;
            Ok(TypeRef::named(kind, name))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const MINIMAL: &str = r#"{
        "__schema": {
            "queryType": {"name": "Query"},
            "types": [
                {
                    "kind": "OBJECT",
                    "name": "Query",
                    "fields": [
                        {"name": "zeta", "args": [], "type": {"kind": "SCALAR", "name": "String"}},
                        {"name": "alpha", "args": [], "type": {"kind": "NON_NULL", "ofType": {"kind": "SCALAR", "name": "Int"}}}
                    ]
                },
                {
                    "kind": "INPUT_OBJECT",
                    "name": "BuildArg",
                    "inputFields": [
                        {"name": "value", "type": {"kind": "NON_NULL", "ofType": {"kind": "SCALAR", "name": "String"}}},
                        {"name": "name", "type": {"kind": "NON_NULL", "ofType": {"kind": "SCALAR", "name": "String"}}}
                    ]
                },
                {
                    "kind": "ENUM",
                    "name": "Protocol",
                    "enumValues": [
                        {"name": "UDP", "isDeprecated": false},
                        {"name": "TCP", "isDeprecated": true, "deprecationReason": "use UDP"}
                    ]
                }
            ]
        }
    }"#;

    #[test]
    fn test_fields_sorted_by_name() {
        let schema = Schema::from_json(MINIMAL).unwrap();
        let query = schema.query_type().unwrap();
        let names: Vec<_> = query.fields.iter().map(|f| f.name.as_str()).collect();
        assert_eq!(names, vec!["alpha", "zeta"]);
        assert!(query.fields.iter().all(|f| f.parent == "Query"));
    }

    #[test]
    fn test_input_fields_sorted_by_name() {
        let schema = Schema::from_json(MINIMAL).unwrap();
        let input = schema.get_type("BuildArg").unwrap();
        let names: Vec<_> = input.input_fields.iter().map(|f| f.name.as_str()).collect();
        assert_eq!(names, vec!["name", "value"]);
    }

    #[test]
    fn test_enum_values_keep_source_order() {
        let schema = Schema::from_json(MINIMAL).unwrap();
        let protocol = schema.get_type("Protocol").unwrap();
        assert_eq!(protocol.enum_values[0].name, "UDP");
        assert_eq!(protocol.enum_values[1].name, "TCP");
        assert!(protocol.enum_values[1].is_deprecated);
        assert_eq!(
            protocol.enum_values[1].deprecation_reason.as_deref(),
            Some("use UDP")
        );
    }

    #[test]
    fn test_missing_schema_is_fatal() {
        let err = Schema::from_json(r#"{"data": {}}"#).unwrap_err();
        assert!(matches!(err, SchemaError::MissingSchema));
    }

    #[test]
    fn test_missing_types_is_fatal() {
        let err = Schema::from_json(r#"{"__schema": {}}"#).unwrap_err();
        assert!(matches!(err, SchemaError::MissingTypes));
    }

    #[test]
    fn test_wrapper_without_inner_is_fatal() {
        let json = r#"{"__schema": {"types": [
            {"kind": "OBJECT", "name": "Query", "fields": [
                {"name": "broken", "args": [], "type": {"kind": "NON_NULL"}}
            ]}
        ]}}"#;
        let err = Schema::from_json(json).unwrap_err();
        assert!(matches!(err, SchemaError::MissingInner { .. }));
    }

    #[test]
    fn test_nested_non_null_is_fatal() {
        let json = r#"{"__schema": {"types": [
            {"kind": "OBJECT", "name": "Query", "fields": [
                {"name": "twice", "args": [], "type": {"kind": "NON_NULL", "ofType":
                    {"kind": "NON_NULL", "ofType": {"kind": "SCALAR", "name": "String"}}}}
            ]}
        ]}}"#;
        let err = Schema::from_json(json).unwrap_err();
        assert!(matches!(err, SchemaError::NestedNonNull { .. }));
    }

    #[test]
    fn test_unknown_kind_is_fatal() {
        let json = r#"{"__schema": {"types": [{"kind": "MYSTERY", "name": "X"}]}}"#;
        let err = Schema::from_json(json).unwrap_err();
        assert!(matches!(err, SchemaError::UnknownKind { .. }));
    }

    #[test]
    fn test_object_for_id_scalar() {
        let json = r#"{"__schema": {"types": [
            {"kind": "SCALAR", "name": "FileID"},
            {"kind": "SCALAR", "name": "NoteID"},
            {"kind": "OBJECT", "name": "File", "fields": [
                {"name": "id", "args": [], "type": {"kind": "NON_NULL", "ofType": {"kind": "SCALAR", "name": "FileID"}}}
            ]},
            {"kind": "OBJECT", "name": "Note", "fields": [
                {"name": "id", "args": [], "type": {"kind": "SCALAR", "name": "String"}}
            ]}
        ]}}"#;
        let schema = Schema::from_json(json).unwrap();

        assert_eq!(schema.object_for_id_scalar("FileID").unwrap().name, "File");
        assert!(schema.object_for_id_scalar("NoteID").is_none());
        assert!(schema.object_for_id_scalar("String").is_none());
    }

    #[test]
    fn test_query_type_defaults() {
        let json = r#"{"__schema": {"types": []}}"#;
        let schema = Schema::from_json(json).unwrap();
        assert_eq!(schema.query_type, "Query");
        assert!(schema.query_type().is_none());
    }
}
