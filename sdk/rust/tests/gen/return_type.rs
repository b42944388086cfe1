// Code generated by chainql. DO NOT EDIT.

#![allow(deprecated, unused_imports)]

use super::*;
use chainql_sdk as sdk;

/// Expected return type of an execution
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub enum ReturnType {
    /// A successful execution (exit code 0)
    #[serde(rename = "SUCCESS")]
    Success,
    #[serde(rename = "FAILURE")]
    Failure,
    #[deprecated(note = "Use explicit exit codes")]
    #[serde(rename = "ANY")]
    Any,
}

impl ReturnType {
    /// Wire name of the value.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Success => "SUCCESS",
            Self::Failure => "FAILURE",
            Self::Any => "ANY",
        }
    }
}

impl std::fmt::Display for ReturnType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl sdk::IntoArgValue for ReturnType {
    fn into_arg_value(self) -> sdk::ArgValue {
        sdk::ArgValue::Enum(self.as_str().to_string())
    }
}
