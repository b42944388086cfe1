//! Argument values and their wire encoding.
//!
//! Arguments are inlined into the query document as GraphQL literals:
//!
//! | value                | literal               |
//! |----------------------|-----------------------|
//! | `None` / null        | `null`                |
//! | string, scalar       | `"escaped"`           |
//! | enum                 | `SYMBOL` (bare)       |
//! | input object         | `{key:value,...}`     |
//! | list                 | `[a,b]`               |
//! | object with identity | its id, as a string   |
//!
//! An object argument whose id is not already known is resolved with an
//! extra request while the document is built. That request can fail on its
//! own, and the failure surfaces from the call that triggered it.

use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;

use indexmap::IndexMap;

use crate::error::{ErrorCode, ResultExt, SdkError, SdkResult};
use crate::object::Identified;
use crate::querybuilder::QueryBuilder;

type BoxFuture<T> = Pin<Box<dyn Future<Output = T> + Send>>;

/// Deferred lookup of a remote object's id.
#[derive(Clone)]
pub struct IdResolver(Arc<dyn Fn() -> BoxFuture<SdkResult<String>> + Send + Sync>);

impl IdResolver {
    /// Resolves the id of the object selected by `query`.
    pub fn from_query(query: QueryBuilder) -> Self {
        Self(Arc::new(move || {
            let query = query.clone();
            Box::pin(async move { query.resolve_id().await })
        }))
    }

    pub async fn resolve(&self) -> SdkResult<String> {
        (self.0)().await
    }
}

impl std::fmt::Debug for IdResolver {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("IdResolver(..)")
    }
}

/// A single argument value.
#[derive(Debug, Clone)]
pub enum ArgValue {
    Null,
    Boolean(bool),
    Int(i64),
    Float(f64),
    String(String),
    /// Bare enum symbol.
    Enum(String),
    List(Vec<ArgValue>),
    /// Input-object literal.
    Object(Arguments),
    /// Identity of a remote object, looked up when the document is built.
    Id(IdResolver),
}

impl ArgValue {
    /// Encodes `object` by its id.
    ///
    /// Uses the anchored id when the object was loaded from one; otherwise
    /// the id is fetched with an extra request during document building.
    pub fn id_of<T: Identified>(object: &T) -> Self {
        let query = object.query();
        match query.anchor_id() {
            Some(id) => Self::String(id.to_string()),
            None => Self::Id(IdResolver::from_query(query.clone())),
        }
    }

    /// Replaces every deferred id with its resolved string.
    pub fn resolve(self) -> Pin<Box<dyn Future<Output = SdkResult<ArgValue>> + Send>> {
        Box::pin(async move {
            match self {
                Self::Id(resolver) => Ok(Self::String(resolver.resolve().await?)),
                Self::List(items) => {
                    let mut resolved = Vec::with_capacity(items.len());
                    for item in items {
                        resolved.push(item.resolve().await?);
                    }
                    Ok(Self::List(resolved))
                }
                Self::Object(args) => Ok(Self::Object(args.resolve().await?)),
                other => Ok(other),
            }
        })
    }

    /// Writes the GraphQL literal for this value.
    ///
    /// Deferred ids must have been resolved first.
    pub fn render(&self, out: &mut String) -> SdkResult<()> {
        match self {
            Self::Null => out.push_str("null"),
            Self::Boolean(b) => out.push_str(if *b { "true" } else { "false" }),
            Self::Int(i) => out.push_str(&i.to_string()),
            Self::Float(f) => {
                if !f.is_finite() {
                    return Err(SdkError::serialize(format!(
                        "cannot encode non-finite float {f}"
                    )));
                }
                out.push_str(&f.to_string());
            }
            Self::String(s) => {
                let quoted = serde_json::to_string(s).map_sdk_err(ErrorCode::SerializeError)?;
                out.push_str(&quoted);
            }
            Self::Enum(symbol) => out.push_str(symbol),
            Self::List(items) => {
                out.push('[');
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        out.push(',');
                    }
                    item.render(out)?;
                }
                out.push(']');
            }
            Self::Object(args) => {
                out.push('{');
                args.render(out)?;
                out.push('}');
            }
            Self::Id(_) => {
                return Err(SdkError::internal(
                    "object id argument was not resolved before rendering",
                ))
            }
        }
        Ok(())
    }
}

/// Conversion into an argument value.
///
/// Generated scalars, enums, input objects and id-bearing objects
/// implement this alongside the primitive impls below.
pub trait IntoArgValue {
    fn into_arg_value(self) -> ArgValue;
}

impl IntoArgValue for ArgValue {
    fn into_arg_value(self) -> ArgValue {
        self
    }
}

impl IntoArgValue for bool {
    fn into_arg_value(self) -> ArgValue {
        ArgValue::Boolean(self)
    }
}

macro_rules! int_arg {
    ($($ty:ty),*) => {
        $(
            impl IntoArgValue for $ty {
                fn into_arg_value(self) -> ArgValue {
                    ArgValue::Int(i64::from(self))
                }
            }
        )*
    };
}

int_arg!(i8, i16, i32, i64, u8, u16, u32);

impl IntoArgValue for f32 {
    fn into_arg_value(self) -> ArgValue {
        ArgValue::Float(f64::from(self))
    }
}

impl IntoArgValue for f64 {
    fn into_arg_value(self) -> ArgValue {
        ArgValue::Float(self)
    }
}

impl IntoArgValue for String {
    fn into_arg_value(self) -> ArgValue {
        ArgValue::String(self)
    }
}

impl IntoArgValue for &str {
    fn into_arg_value(self) -> ArgValue {
        ArgValue::String(self.to_string())
    }
}

impl IntoArgValue for &String {
    fn into_arg_value(self) -> ArgValue {
        ArgValue::String(self.clone())
    }
}

impl<T: IntoArgValue> IntoArgValue for Option<T> {
    fn into_arg_value(self) -> ArgValue {
        match self {
            Some(v) => v.into_arg_value(),
            None => ArgValue::Null,
        }
    }
}

impl<T: IntoArgValue> IntoArgValue for Vec<T> {
    fn into_arg_value(self) -> ArgValue {
        ArgValue::List(self.into_iter().map(IntoArgValue::into_arg_value).collect())
    }
}

impl<T: IntoArgValue + Clone> IntoArgValue for &[T] {
    fn into_arg_value(self) -> ArgValue {
        ArgValue::List(self.iter().cloned().map(IntoArgValue::into_arg_value).collect())
    }
}

impl IntoArgValue for Arguments {
    fn into_arg_value(self) -> ArgValue {
        ArgValue::Object(self)
    }
}

impl IntoArgValue for serde_json::Value {
    fn into_arg_value(self) -> ArgValue {
        use serde_json::Value;

        match self {
            Value::Null => ArgValue::Null,
            Value::Bool(b) => ArgValue::Boolean(b),
            Value::Number(n) => match n.as_i64() {
                Some(i) => ArgValue::Int(i),
                None => ArgValue::Float(n.as_f64().unwrap_or(f64::NAN)),
            },
            Value::String(s) => ArgValue::String(s),
            Value::Array(items) => items.into_arg_value(),
            Value::Object(map) => ArgValue::Object(
                map.into_iter()
                    .fold(Arguments::builder(), |b, (k, v)| b.add(k, v))
                    .build(),
            ),
        }
    }
}

/// An ordered, immutable set of named arguments.
#[derive(Debug, Clone, Default)]
pub struct Arguments {
    values: IndexMap<String, ArgValue>,
}

impl Arguments {
    /// An empty argument set.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn builder() -> ArgumentsBuilder {
        ArgumentsBuilder::default()
    }

    pub fn get(&self, name: &str) -> Option<&ArgValue> {
        self.values.get(name)
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.values.keys().map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &ArgValue)> {
        self.values.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Returns a new set containing both; `other` wins on conflicts.
    ///
    /// Keys already present keep their position.
    pub fn merge(&self, other: &Arguments) -> Arguments {
        let mut values = self.values.clone();
        for (k, v) in &other.values {
            values.insert(k.clone(), v.clone());
        }
        Arguments { values }
    }

    /// Resolves every deferred id, recursively.
    pub async fn resolve(&self) -> SdkResult<Arguments> {
        let mut values = IndexMap::with_capacity(self.values.len());
        for (k, v) in &self.values {
            values.insert(k.clone(), v.clone().resolve().await?);
        }
        Ok(Arguments { values })
    }

    /// Writes `name:value` pairs separated by commas.
    pub fn render(&self, out: &mut String) -> SdkResult<()> {
        for (i, (name, value)) in self.values.iter().enumerate() {
            if i > 0 {
                out.push(',');
            }
            out.push_str(name);
            out.push(':');
            value.render(out)?;
        }
        Ok(())
    }
}

/// Accumulates arguments before freezing them into [`Arguments`].
#[derive(Debug, Default)]
pub struct ArgumentsBuilder {
    values: IndexMap<String, ArgValue>,
}

impl ArgumentsBuilder {
    /// Adds (or replaces) an argument.
    pub fn add(mut self, name: impl Into<String>, value: impl IntoArgValue) -> Self {
        self.values.insert(name.into(), value.into_arg_value());
        self
    }

    /// Adds the argument only when `value` is set.
    pub fn add_opt<T: IntoArgValue>(self, name: impl Into<String>, value: Option<T>) -> Self {
        match value {
            Some(v) => self.add(name, v),
            None => self,
        }
    }

    pub fn build(self) -> Arguments {
        Arguments {
            values: self.values,
        }
    }
}
