//! Traits implemented by generated object bindings.

use async_trait::async_trait;

use crate::client::Connection;
use crate::error::SdkResult;
use crate::querybuilder::QueryBuilder;

/// A binding for a remote object type: a lazy wrapper around a builder.
pub trait Object: Clone + Send + Sync + Sized {
    /// Remote type name.
    const TYPE_NAME: &'static str;

    fn from_query(query: QueryBuilder) -> Self;

    fn query(&self) -> &QueryBuilder;
}

/// An object with a stable remote identity.
///
/// Such objects can be passed as arguments (encoded as their id) and
/// reconstituted in a later request from that id alone.
#[async_trait]
pub trait Identified: Object {
    /// The id scalar, e.g. `ContainerId`.
    type Id: AsRef<str> + From<String> + Send + Sync;

    /// Root field that loads an instance from its id, e.g. `loadContainerFromID`.
    const LOADER: &'static str;

    /// Rebuilds a binding rooted at `LOADER(id:...)`.
    ///
    /// No request is made; reads on the result issue their own.
    fn load(connection: &Connection, id: &Self::Id) -> Self {
        Self::from_query(QueryBuilder::load(
            connection.clone(),
            Self::LOADER,
            id.as_ref(),
        ))
    }

    /// Returns the object's id, querying for it unless already known.
    async fn resolve_id(&self) -> SdkResult<Self::Id> {
        self.query().resolve_id().await.map(Self::Id::from)
    }
}
