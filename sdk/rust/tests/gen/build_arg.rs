// Code generated by chainql. DO NOT EDIT.

#![allow(deprecated, unused_imports)]

use super::*;
use chainql_sdk as sdk;

/// Key value object that represents a build argument.
#[derive(Debug, Clone, PartialEq)]
pub struct BuildArg {
    /// The build argument name.
    pub name: String,
    /// The build argument value.
    pub value: String,
}

impl BuildArg {
    pub fn new(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
        }
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    pub fn with_value(mut self, value: impl Into<String>) -> Self {
        self.value = value.into();
        self
    }

    /// Encodes this value as an input-object literal. Unset fields are omitted.
    pub fn to_arguments(&self) -> sdk::Arguments {
        sdk::Arguments::builder()
            .add("name", self.name.clone())
            .add("value", self.value.clone())
            .build()
    }
}

impl sdk::IntoArgValue for BuildArg {
    fn into_arg_value(self) -> sdk::ArgValue {
        sdk::ArgValue::Object(self.to_arguments())
    }
}
