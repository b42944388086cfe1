//! Lazy query construction and execution.
//!
//! A [`QueryBuilder`] is a persistent stack of field selections. Chaining
//! never touches the network and never mutates the receiver: each call
//! returns a new builder sharing its prefix with the old one. A terminal
//! read folds the stack into one document, sends it, and walks the
//! response back down the same path.
//!
//! ```ignore
//! let stdout: String = QueryBuilder::new(connection)
//!     .chain("from", Arguments::builder().add("address", "alpine:3").build())
//!     .select("stdout")
//!     .execute_scalar()
//!     .await?;
//! // sends: query {from(address:"alpine:3"){stdout}}
//! ```

use std::sync::Arc;

use serde::de::DeserializeOwned;
use serde::Deserialize;
use serde_json::Value;
use tracing::debug;

use crate::arguments::Arguments;
use crate::client::Connection;
use crate::error::{SdkError, SdkResult};
use crate::object::Identified;

/// One field selection with its arguments.
#[derive(Debug, Clone)]
pub struct QueryPart {
    name: String,
    args: Arguments,
}

impl QueryPart {
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn args(&self) -> &Arguments {
        &self.args
    }
}

#[derive(Debug)]
struct Node {
    part: QueryPart,
    prev: Option<Arc<Node>>,
}

/// Immutable chain of field selections awaiting one execution.
#[derive(Debug, Clone)]
pub struct QueryBuilder {
    connection: Connection,
    head: Option<Arc<Node>>,
    leaves: Option<Arc<[String]>>,
    anchor_id: Option<Arc<str>>,
}

impl QueryBuilder {
    /// An empty chain rooted at the query type.
    pub fn new(connection: Connection) -> Self {
        Self {
            connection,
            head: None,
            leaves: None,
            anchor_id: None,
        }
    }

    /// A fresh chain rooted at `loader(id:"...")`, remembering `id`.
    pub fn load(connection: Connection, loader: &str, id: impl Into<String>) -> Self {
        let id: String = id.into();
        let args = Arguments::builder().add("id", id.as_str()).build();
        let mut query = Self::new(connection).push(loader, args);
        query.anchor_id = Some(Arc::from(id));
        query
    }

    pub fn connection(&self) -> &Connection {
        &self.connection
    }

    /// The id this chain was loaded from, if it is still exactly that object.
    pub fn anchor_id(&self) -> Option<&str> {
        self.anchor_id.as_deref()
    }

    /// Terminal sub-fields, if any.
    pub fn leaves(&self) -> Option<&[String]> {
        self.leaves.as_deref()
    }

    pub fn is_empty(&self) -> bool {
        self.head.is_none()
    }

    /// Selections, outermost first.
    pub fn parts(&self) -> Vec<&QueryPart> {
        let mut parts = Vec::new();
        let mut node = self.head.as_deref();
        while let Some(n) = node {
            parts.push(&n.part);
            node = n.prev.as_deref();
        }
        parts.reverse();
        parts
    }

    fn push(&self, name: &str, args: Arguments) -> Self {
        Self {
            connection: self.connection.clone(),
            head: Some(Arc::new(Node {
                part: QueryPart {
                    name: name.to_string(),
                    args,
                },
                prev: self.head.clone(),
            })),
            leaves: None,
            anchor_id: None,
        }
    }

    fn ensure_open(&self, name: &str) -> SdkResult<()> {
        match &self.leaves {
            Some(leaves) => Err(SdkError::structural(format!(
                "cannot select `{name}` after terminal fields [{}]",
                leaves.join(", ")
            ))),
            None => Ok(()),
        }
    }

    /// Appends a selection.
    ///
    /// # Panics
    ///
    /// Panics if this chain already ends in a terminal field set. Use
    /// [`try_chain`](Self::try_chain) to get the error instead.
    pub fn chain(&self, name: &str, args: Arguments) -> Self {
        match self.try_chain(name, args) {
            Ok(query) => query,
            Err(e) => panic!("{e}"),
        }
    }

    /// Appends a selection, failing if the chain is terminal.
    pub fn try_chain(&self, name: &str, args: Arguments) -> SdkResult<Self> {
        self.ensure_open(name)?;
        Ok(self.push(name, args))
    }

    /// Appends a selection without arguments.
    pub fn select(&self, name: &str) -> Self {
        self.chain(name, Arguments::new())
    }

    /// Appends a selection and requests `leaves` beneath it.
    ///
    /// # Panics
    ///
    /// Same as [`chain`](Self::chain).
    pub fn chain_leaves<I, S>(&self, name: &str, args: Arguments, leaves: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        match self.try_chain_leaves(name, args, leaves) {
            Ok(query) => query,
            Err(e) => panic!("{e}"),
        }
    }

    pub fn try_chain_leaves<I, S>(&self, name: &str, args: Arguments, leaves: I) -> SdkResult<Self>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.try_chain(name, args)?.with_leaves(leaves)
    }

    /// Marks the innermost selection as terminal with the given sub-fields.
    pub fn with_leaves<I, S>(&self, leaves: I) -> SdkResult<Self>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let Some(head) = &self.head else {
            return Err(SdkError::structural(
                "cannot attach terminal fields to an empty chain",
            ));
        };
        self.ensure_open(&head.part.name)?;

        let leaves: Vec<String> = leaves.into_iter().map(Into::into).collect();
        if leaves.is_empty() {
            return Err(SdkError::structural("terminal field set is empty"));
        }
        Ok(Self {
            leaves: Some(leaves.into()),
            anchor_id: None,
            ..self.clone()
        })
    }

    /// Folds the chain into one document.
    ///
    /// Object arguments without a known id are resolved here, each with
    /// its own request.
    pub async fn build_document(&self) -> SdkResult<String> {
        let parts = self.parts();
        if parts.is_empty() {
            return Err(SdkError::structural("cannot execute an empty chain"));
        }

        let mut inner = match &self.leaves {
            Some(leaves) => format!("{{{}}}", leaves.join(" ")),
            None => String::new(),
        };
        for part in parts.into_iter().rev() {
            let args = part.args.resolve().await?;
            let mut selection = String::with_capacity(part.name.len() + inner.len() + 2);
            selection.push_str(&part.name);
            if !args.is_empty() {
                selection.push('(');
                args.render(&mut selection)?;
                selection.push(')');
            }
            selection.push_str(&inner);
            inner = format!("{{{selection}}}");
        }

        Ok(format!("query {inner}"))
    }

    /// Sends the chain as one request and returns the whole `data` value.
    pub async fn execute(&self) -> SdkResult<Value> {
        let document = self.build_document().await?;
        debug!(depth = self.parts().len(), "executing query");
        self.connection.send(&document).await
    }

    /// Walks `data` along the chain's field names.
    ///
    /// A null anywhere on the path yields null.
    pub fn decode_path(&self, data: Value) -> SdkResult<Value> {
        let mut current = data;
        for part in self.parts() {
            current = match current {
                Value::Null => return Ok(Value::Null),
                Value::Object(mut map) => map.remove(&part.name).ok_or_else(|| {
                    SdkError::unexpected_shape(format!("response has no field `{}`", part.name))
                })?,
                other => {
                    return Err(SdkError::unexpected_shape(format!(
                        "expected an object at `{}`, found {other}",
                        part.name
                    )))
                }
            };
        }
        Ok(current)
    }

    /// Executes and decodes the innermost value.
    pub async fn execute_scalar<T: DeserializeOwned>(&self) -> SdkResult<T> {
        let data = self.execute().await?;
        let value = self.decode_path(data)?;
        serde_json::from_value(value).map_err(|e| {
            SdkError::deserialize(format!("cannot decode `{}`: {e}", self.path()))
        })
    }

    /// Executes and decodes the innermost value as a list.
    pub async fn execute_list<T: DeserializeOwned>(&self) -> SdkResult<Vec<T>> {
        self.execute_scalar::<Vec<T>>().await
    }

    /// Executes for the side effect only.
    pub async fn execute_discard(&self) -> SdkResult<()> {
        self.execute().await.map(drop)
    }

    /// Executes a list-of-objects selection.
    ///
    /// Requests only the `id` of each element, then returns one binding per
    /// element rooted at `T::LOADER(id:...)`. Null elements are skipped; a
    /// null list is a decode error.
    pub async fn execute_object_list<T: Identified>(&self) -> SdkResult<Vec<T>> {
        self.execute_optional_object_list::<T>()
            .await?
            .ok_or_else(|| SdkError::deserialize(format!("`{}` is null", self.path())))
    }

    /// Like [`execute_object_list`](Self::execute_object_list), but a null
    /// list is `None`.
    pub async fn execute_optional_object_list<T: Identified>(&self) -> SdkResult<Option<Vec<T>>> {
        #[derive(Deserialize)]
        struct IdOnly {
            id: String,
        }

        let with_ids = self.with_leaves(["id"])?;
        let Some(items) = with_ids
            .execute_scalar::<Option<Vec<Option<IdOnly>>>>()
            .await?
        else {
            return Ok(None);
        };

        let bindings: Vec<T> = items
            .into_iter()
            .flatten()
            .map(|item| T::load(&self.connection, &T::Id::from(item.id)))
            .collect();
        debug!(
            count = bindings.len(),
            r#type = T::TYPE_NAME,
            "materialized object list"
        );
        Ok(Some(bindings))
    }

    /// The id of the object this chain selects.
    ///
    /// Uses the anchor id when present, otherwise sends `<chain>{id}`.
    pub async fn resolve_id(&self) -> SdkResult<String> {
        if let Some(id) = &self.anchor_id {
            return Ok(id.to_string());
        }
        self.try_chain("id", Arguments::new())?
            .execute_scalar::<String>()
            .await
    }

    fn path(&self) -> String {
        self.parts()
            .iter()
            .map(|p| p.name.as_str())
            .collect::<Vec<_>>()
            .join(".")
    }
}
