// Code generated by chainql. DO NOT EDIT.

#![allow(deprecated, unused_imports)]

use super::*;
use chainql_sdk as sdk;

/// The `DirectoryID` scalar type represents an identifier for an object of type Directory.
#[derive(Debug, Clone, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(transparent)]
pub struct DirectoryId(pub String);

impl DirectoryId {
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_inner(self) -> String {
        self.0
    }
}

impl From<String> for DirectoryId {
    fn from(value: String) -> Self {
        Self(value)
    }
}

impl From<&str> for DirectoryId {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

impl AsRef<str> for DirectoryId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for DirectoryId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl sdk::IntoArgValue for DirectoryId {
    fn into_arg_value(self) -> sdk::ArgValue {
        sdk::ArgValue::String(self.0)
    }
}
