// Code generated by chainql. DO NOT EDIT.

#![allow(deprecated, unused_imports)]

use super::*;
use chainql_sdk as sdk;

/// The root of the DAG.
#[derive(Debug, Clone)]
pub struct Client {
    query: sdk::QueryBuilder,
}

#[derive(Debug, Clone, Default)]
pub struct ClientContainerOpts {
    pub platform: Option<Platform>,
}

impl ClientContainerOpts {
    fn to_arguments(&self) -> sdk::Arguments {
        sdk::Arguments::builder()
            .add_opt("platform", self.platform.clone())
            .build()
    }
}

impl Client {
    pub fn new(connection: sdk::Connection) -> Self {
        Self {
            query: sdk::QueryBuilder::new(connection),
        }
    }

    /// Connects to the engine described by `config`.
    pub async fn connect(config: sdk::ClientConfig) -> sdk::SdkResult<Self> {
        sdk::Connection::connect(config).await.map(Self::new)
    }

    pub fn connection(&self) -> &sdk::Connection {
        self.query.connection()
    }

    /// Creates a scratch container.
    pub fn container(&self) -> Container {
        self.container_opts(ClientContainerOpts::default())
    }

    /// Creates a scratch container.
    pub fn container_opts(&self, opts: ClientContainerOpts) -> Container {
        let query = self.query.chain(
            "container",
            opts.to_arguments(),
        );
        <Container as sdk::Object>::from_query(query)
    }

    /// Creates an empty directory.
    pub fn directory(&self) -> Directory {
        let query = self.query.select("directory");
        <Directory as sdk::Object>::from_query(query)
    }

    /// Load a Container from its ID.
    pub fn load_container_from_id(&self, id: ContainerId) -> Container {
        <Container as sdk::Identified>::load(self.query.connection(), &id)
    }

    /// Load a Directory from its ID.
    pub fn load_directory_from_id(&self, id: DirectoryId) -> Directory {
        <Directory as sdk::Identified>::load(self.query.connection(), &id)
    }

    /// Load a Port from its ID.
    pub fn load_port_from_id(&self, id: PortId) -> Port {
        <Port as sdk::Identified>::load(self.query.connection(), &id)
    }

    /// The engine version.
    pub async fn version(&self) -> sdk::SdkResult<String> {
        let query = self.query.select("version");
        query.execute_scalar().await
    }
}

impl sdk::Object for Client {
    const TYPE_NAME: &'static str = "Query";

    fn from_query(query: sdk::QueryBuilder) -> Self {
        Self { query }
    }

    fn query(&self) -> &sdk::QueryBuilder {
        &self.query
    }
}
