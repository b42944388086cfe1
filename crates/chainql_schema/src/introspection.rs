//! Raw introspection records.
//!
//! These mirror the JSON shape returned by the standard introspection
//! query. Almost everything is optional here; the model builder in
//! [`crate::schema`] decides what is mandatory.

use serde::Deserialize;

/// Top-level document: either `{ "__schema": ... }` or the full response
/// envelope `{ "data": { "__schema": ... } }`.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum IntrospectionDocument {
    Envelope { data: SchemaContainer },
    Bare(SchemaContainer),
}

impl IntrospectionDocument {
    pub fn into_container(self) -> SchemaContainer {
        match self {
            Self::Envelope { data } => data,
            Self::Bare(container) => container,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct SchemaContainer {
    #[serde(rename = "__schema")]
    pub schema: Option<RawSchema>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawSchema {
    pub query_type: Option<RawNamed>,
    pub mutation_type: Option<RawNamed>,
    pub subscription_type: Option<RawNamed>,
    pub types: Option<Vec<RawType>>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RawNamed {
    pub name: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawType {
    pub kind: Option<String>,
    pub name: Option<String>,
    pub description: Option<String>,
    pub fields: Option<Vec<RawField>>,
    pub input_fields: Option<Vec<RawInputValue>>,
    pub enum_values: Option<Vec<RawEnumValue>>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawField {
    pub name: Option<String>,
    pub description: Option<String>,
    #[serde(default)]
    pub args: Vec<RawInputValue>,
    #[serde(rename = "type")]
    pub type_: Option<RawTypeRef>,
    #[serde(default)]
    pub is_deprecated: bool,
    pub deprecation_reason: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawInputValue {
    pub name: Option<String>,
    pub description: Option<String>,
    #[serde(rename = "type")]
    pub type_: Option<RawTypeRef>,
    pub default_value: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawEnumValue {
    pub name: Option<String>,
    pub description: Option<String>,
    #[serde(default)]
    pub is_deprecated: bool,
    pub deprecation_reason: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawTypeRef {
    pub kind: Option<String>,
    pub name: Option<String>,
    pub of_type: Option<Box<RawTypeRef>>,
}
