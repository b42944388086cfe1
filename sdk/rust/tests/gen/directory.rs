// Code generated by chainql. DO NOT EDIT.

#![allow(deprecated, unused_imports)]

use super::*;
use chainql_sdk as sdk;

/// A directory.
#[derive(Debug, Clone)]
pub struct Directory {
    query: sdk::QueryBuilder,
}

#[derive(Debug, Clone, Default)]
pub struct DirectoryEntriesOpts {
    pub path: Option<String>,
}

impl DirectoryEntriesOpts {
    fn to_arguments(&self) -> sdk::Arguments {
        sdk::Arguments::builder()
            .add_opt("path", self.path.clone())
            .build()
    }
}

impl Directory {
    /// Applies `f` to this value, for composing reusable steps.
    pub fn with(self, f: impl FnOnce(Self) -> Self) -> Self {
        f(self)
    }

    /// Returns a list of files and directories at the given path.
    pub async fn entries(&self) -> sdk::SdkResult<Vec<String>> {
        self.entries_opts(DirectoryEntriesOpts::default()).await
    }

    /// Returns a list of files and directories at the given path.
    pub async fn entries_opts(&self, opts: DirectoryEntriesOpts) -> sdk::SdkResult<Vec<String>> {
        let query = self.query.chain(
            "entries",
            opts.to_arguments(),
        );
        query.execute_list().await
    }

    /// A unique identifier for this Directory.
    pub async fn id(&self) -> sdk::SdkResult<DirectoryId> {
        sdk::Identified::resolve_id(self).await
    }

    /// Return a snapshot with a new file added.
    pub fn with_new_file(&self, path: impl Into<String>, contents: impl Into<String>) -> Directory {
        let query = self.query.chain(
            "withNewFile",
            sdk::Arguments::builder()
                .add("path", path.into())
                .add("contents", contents.into())
                .build(),
        );
        <Directory as sdk::Object>::from_query(query)
    }
}

impl sdk::Object for Directory {
    const TYPE_NAME: &'static str = "Directory";

    fn from_query(query: sdk::QueryBuilder) -> Self {
        Self { query }
    }

    fn query(&self) -> &sdk::QueryBuilder {
        &self.query
    }
}

impl sdk::Identified for Directory {
    type Id = DirectoryId;

    const LOADER: &'static str = "loadDirectoryFromID";
}

impl sdk::IntoArgValue for Directory {
    fn into_arg_value(self) -> sdk::ArgValue {
        sdk::ArgValue::id_of(&self)
    }
}

impl sdk::IntoArgValue for &Directory {
    fn into_arg_value(self) -> sdk::ArgValue {
        sdk::ArgValue::id_of(self)
    }
}
