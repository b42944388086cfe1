//! chainql runtime.
//!
//! Generated bindings are thin wrappers around a [`QueryBuilder`]. Each
//! method call appends one field selection; a terminal read sends the whole
//! chain as a single document and decodes the answer.
//!
//! - `querybuilder`: the immutable selection chain and its execution
//! - `arguments`: argument values and their GraphQL literal encoding
//! - `object`: traits implemented by generated object bindings
//! - `client`: configuration, transport seam and [`Connection`]
//! - `http`: the `reqwest` transport
//! - `error`: typed error codes and remote error classification
//! - `testing`: a scripted transport for tests
//!
//! # Example
//!
//! ```ignore
//! use chainql_sdk::{ClientConfig, Connection};
//! use my_bindings::Client;
//!
//! let client = Client::connect(ClientConfig::from_env()?).await?;
//! let out = client
//!     .container()
//!     .from("alpine:3")
//!     .with_exec(vec!["echo".into(), "hi".into()])
//!     .stdout()
//!     .await?;
//! ```

pub mod arguments;
pub mod client;
pub mod error;
pub mod http;
pub mod introspection;
pub mod object;
pub mod querybuilder;
pub mod testing;

pub use arguments::{ArgValue, Arguments, ArgumentsBuilder, IdResolver, IntoArgValue};
pub use client::{ClientConfig, Connection, Credential, GraphQLError, Request, Response, Transport};
pub use error::{
    classify, ErrorCode, ErrorDetail, ExecError, IntoSdkError, ResultExt, SdkError, SdkResult,
};
pub use http::HttpTransport;
pub use introspection::INTROSPECTION_QUERY;
pub use object::{Identified, Object};
pub use querybuilder::{QueryBuilder, QueryPart};
