// Code generated by chainql. DO NOT EDIT.

#![allow(deprecated, unused_imports)]

use super::*;
use chainql_sdk as sdk;

/// A port exposed by a container.
#[derive(Debug, Clone)]
pub struct Port {
    query: sdk::QueryBuilder,
}

impl Port {
    /// The port description.
    pub async fn description(&self) -> sdk::SdkResult<Option<String>> {
        let query = self.query.select("description");
        query.execute_scalar().await
    }

    /// A unique identifier for this Port.
    pub async fn id(&self) -> sdk::SdkResult<PortId> {
        sdk::Identified::resolve_id(self).await
    }

    /// The port number.
    pub async fn port(&self) -> sdk::SdkResult<i64> {
        let query = self.query.select("port");
        query.execute_scalar().await
    }

    /// The transport layer protocol.
    pub async fn protocol(&self) -> sdk::SdkResult<NetworkProtocol> {
        let query = self.query.select("protocol");
        query.execute_scalar().await
    }
}

impl sdk::Object for Port {
    const TYPE_NAME: &'static str = "Port";

    fn from_query(query: sdk::QueryBuilder) -> Self {
        Self { query }
    }

    fn query(&self) -> &sdk::QueryBuilder {
        &self.query
    }
}

impl sdk::Identified for Port {
    type Id = PortId;

    const LOADER: &'static str = "loadPortFromID";
}

impl sdk::IntoArgValue for Port {
    fn into_arg_value(self) -> sdk::ArgValue {
        sdk::ArgValue::id_of(&self)
    }
}

impl sdk::IntoArgValue for &Port {
    fn into_arg_value(self) -> sdk::ArgValue {
        sdk::ArgValue::id_of(self)
    }
}
