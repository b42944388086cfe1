// Code generated by chainql. DO NOT EDIT.

#![allow(deprecated, unused_imports)]

use super::*;
use chainql_sdk as sdk;

/// An OCI-compatible container, also known as a Docker container.
#[derive(Debug, Clone)]
pub struct Container {
    query: sdk::QueryBuilder,
}

#[derive(Debug, Clone, Default)]
pub struct ContainerWithExecOpts {
    /// Prepend the entrypoint to the command.
    pub use_entrypoint: Option<bool>,
    /// Exit codes this command is allowed to exit with.
    pub expect: Option<ReturnType>,
    /// Content to write to the command's standard input.
    pub stdin: Option<String>,
}

impl ContainerWithExecOpts {
    fn to_arguments(&self) -> sdk::Arguments {
        sdk::Arguments::builder()
            .add_opt("useEntrypoint", self.use_entrypoint.clone())
            .add_opt("expect", self.expect.clone())
            .add_opt("stdin", self.stdin.clone())
            .build()
    }
}

impl Container {
    /// Applies `f` to this value, for composing reusable steps.
    pub fn with(self, f: impl FnOnce(Self) -> Self) -> Self {
        f(self)
    }

    /// Retrieve a directory from the container's root filesystem.
    pub fn directory(&self, path: impl Into<String>) -> Directory {
        let query = self.query.chain(
            "directory",
            sdk::Arguments::builder()
                .add("path", path.into())
                .build(),
        );
        <Directory as sdk::Object>::from_query(query)
    }

    /// Return the container's default arguments.
    pub async fn entrypoint(&self) -> sdk::SdkResult<Vec<String>> {
        let query = self.query.select("entrypoint");
        query.execute_list().await
    }

    /// The exit code of the last executed command.
    pub async fn exit_code(&self) -> sdk::SdkResult<i64> {
        let query = self.query.select("exitCode");
        query.execute_scalar().await
    }

    /// Retrieves the list of exposed ports.
    pub async fn exposed_ports(&self) -> sdk::SdkResult<Vec<Port>> {
        let query = self.query.select("exposedPorts");
        query.execute_object_list().await
    }

    /// Initializes this container from a pulled base image.
    ///
    /// # Arguments
    ///
    /// * `address` - Image's address from its registry.
    pub fn from(&self, address: impl Into<String>) -> Container {
        let query = self.query.chain(
            "from",
            sdk::Arguments::builder()
                .add("address", address.into())
                .build(),
        );
        <Container as sdk::Object>::from_query(query)
    }

    /// A unique identifier for this Container.
    pub async fn id(&self) -> sdk::SdkResult<ContainerId> {
        sdk::Identified::resolve_id(self).await
    }

    /// Retrieves the value of the specified label.
    pub async fn label(&self, name: impl Into<String>) -> sdk::SdkResult<Option<String>> {
        let query = self.query.chain(
            "label",
            sdk::Arguments::builder()
                .add("name", name.into())
                .build(),
        );
        query.execute_scalar().await
    }

    /// Creates a named sub-pipeline.
    #[deprecated(note = "Explicit pipeline creation is now a no-op")]
    pub fn pipeline(&self, name: impl Into<String>) -> Container {
        let query = self.query.chain(
            "pipeline",
            sdk::Arguments::builder()
                .add("name", name.into())
                .build(),
        );
        <Container as sdk::Object>::from_query(query)
    }

    /// The platform this container executes and publishes as.
    pub async fn platform(&self) -> sdk::SdkResult<Platform> {
        let query = self.query.select("platform");
        query.execute_scalar().await
    }

    /// The output stream of the last executed command.
    pub async fn stdout(&self) -> sdk::SdkResult<String> {
        let query = self.query.select("stdout");
        query.execute_scalar().await
    }

    /// Forces evaluation of the pipeline in the engine.
    pub async fn sync(&self) -> sdk::SdkResult<Self> {
        let query = self.query.select("sync");
        query.execute_discard().await?;
        Ok(self.clone())
    }

    /// Apply build arguments.
    pub fn with_build_args(&self, args: Vec<BuildArg>) -> Container {
        let query = self.query.chain(
            "withBuildArgs",
            sdk::Arguments::builder()
                .add("args", args)
                .build(),
        );
        <Container as sdk::Object>::from_query(query)
    }

    /// Return a new container snapshot, with a directory added to its filesystem.
    pub fn with_directory(&self, path: impl Into<String>, source: &Directory) -> Container {
        let query = self.query.chain(
            "withDirectory",
            sdk::Arguments::builder()
                .add("path", path.into())
                .add("source", source)
                .build(),
        );
        <Container as sdk::Object>::from_query(query)
    }

    /// Execute a command in the container, and return a new snapshot of the container state after execution.
    ///
    /// # Arguments
    ///
    /// * `args` - Command to run instead of the container's default command.
    pub fn with_exec(&self, args: Vec<String>) -> Container {
        self.with_exec_opts(args, ContainerWithExecOpts::default())
    }

    /// Execute a command in the container, and return a new snapshot of the container state after execution.
    ///
    /// # Arguments
    ///
    /// * `args` - Command to run instead of the container's default command.
    pub fn with_exec_opts(&self, args: Vec<String>, opts: ContainerWithExecOpts) -> Container {
        let query = self.query.chain(
            "withExec",
            sdk::Arguments::builder()
                .add("args", args)
                .build()
                .merge(&opts.to_arguments()),
        );
        <Container as sdk::Object>::from_query(query)
    }
}

impl sdk::Object for Container {
    const TYPE_NAME: &'static str = "Container";

    fn from_query(query: sdk::QueryBuilder) -> Self {
        Self { query }
    }

    fn query(&self) -> &sdk::QueryBuilder {
        &self.query
    }
}

impl sdk::Identified for Container {
    type Id = ContainerId;

    const LOADER: &'static str = "loadContainerFromID";
}

impl sdk::IntoArgValue for Container {
    fn into_arg_value(self) -> sdk::ArgValue {
        sdk::ArgValue::id_of(&self)
    }
}

impl sdk::IntoArgValue for &Container {
    fn into_arg_value(self) -> sdk::ArgValue {
        sdk::ArgValue::id_of(self)
    }
}
