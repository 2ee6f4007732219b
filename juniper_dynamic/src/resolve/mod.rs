//! Resolution of fields at request time.

mod arguments;
mod info;

use std::{fmt, sync::Arc};

use futures::{
    FutureExt as _,
    future::BoxFuture,
    stream::{BoxStream, StreamExt as _},
};
use tracing::Instrument as _;

use crate::{
    definition::{FieldDefinition, ROOT_KEYWORD, ResolverArgs},
    value::Value,
};

pub(crate) use self::arguments::ArgumentConverter;
pub use self::{
    arguments::Arguments,
    info::{
        Context, FieldNode, Info, Operation, OperationType, PathSegment, ResolveInfo,
        ResponsePath, Variables,
    },
};

/// Error occurring while resolving a field.
///
/// Any [`fmt::Display`]able type converts into a [`FieldError`] carrying its
/// message and no extensions, so `?` works on most errors as is.
#[derive(Clone, Debug, PartialEq)]
pub struct FieldError {
    message: String,
    extensions: Value,
}

impl<T: fmt::Display> From<T> for FieldError {
    fn from(e: T) -> Self {
        Self {
            message: e.to_string(),
            extensions: Value::Null,
        }
    }
}

impl FieldError {
    /// Constructs a new [`FieldError`] with additional data.
    pub fn new<T: fmt::Display>(e: T, extensions: Value) -> Self {
        Self {
            message: e.to_string(),
            extensions,
        }
    }

    /// Returns the error message.
    pub fn message(&self) -> &str {
        &self.message
    }

    /// Returns the additional data of this error, [`Value::Null`] if none.
    pub fn extensions(&self) -> &Value {
        &self.extensions
    }
}

/// Result of resolving a single field.
pub type FieldResult<T> = Result<T, FieldError>;

/// Message reported when a denying permission check provides none.
pub const PERMISSION_DENIED: &str = "Permission denied";

/// Outcome of a resolver.
pub enum Resolution {
    /// Plain value.
    Value(Value),

    /// Value to be awaited by an execution engine.
    Deferred(BoxFuture<'static, FieldResult<Value>>),

    /// Stream of subscription events.
    Stream(BoxStream<'static, FieldResult<Value>>),
}

impl Resolution {
    /// Wraps the provided `future` into a [`Resolution::Deferred`].
    pub fn deferred<F>(future: F) -> Self
    where
        F: Future<Output = FieldResult<Value>> + Send + 'static,
    {
        Self::Deferred(future.boxed())
    }

    /// Wraps the provided `stream` into a [`Resolution::Stream`].
    pub fn stream<S>(stream: S) -> Self
    where
        S: futures::Stream<Item = FieldResult<Value>> + Send + 'static,
    {
        Self::Stream(stream.boxed())
    }

    /// Resolves this [`Resolution`] into its final value, awaiting it if
    /// deferred.
    ///
    /// # Errors
    ///
    /// If the deferred value fails, or this is a [`Resolution::Stream`].
    pub async fn into_value(self) -> FieldResult<Value> {
        match self {
            Self::Value(v) => Ok(v),
            Self::Deferred(f) => f.await,
            Self::Stream(_) => Err("Expected a value, found an event stream".into()),
        }
    }

    /// Returns the plain value, if this is a [`Resolution::Value`].
    pub fn as_value(&self) -> Option<&Value> {
        match self {
            Self::Value(v) => Some(v),
            _ => None,
        }
    }

    /// Returns the event stream, if this is a [`Resolution::Stream`].
    pub fn into_stream(self) -> Option<BoxStream<'static, FieldResult<Value>>> {
        match self {
            Self::Stream(s) => Some(s),
            _ => None,
        }
    }
}

impl fmt::Debug for Resolution {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Value(v) => f.debug_tuple("Value").field(v).finish(),
            Self::Deferred(_) => f.write_str("Deferred(..)"),
            Self::Stream(_) => f.write_str("Stream(..)"),
        }
    }
}

impl<T: Into<Value>> From<T> for Resolution {
    fn from(v: T) -> Self {
        Self::Value(v.into())
    }
}

/// Function an execution engine calls to resolve a field.
pub type ResolveFn = dyn Fn(&Value, &ResolveInfo, &Arguments) -> FieldResult<Resolution> + Send + Sync;

/// Engine-facing field resolver.
#[derive(Clone, derive_more::Debug)]
pub struct Resolver {
    is_default: bool,
    #[debug(skip)]
    func: Arc<ResolveFn>,
}

impl Resolver {
    /// Wraps the provided function into a [`Resolver`].
    pub fn new<F>(func: F) -> Self
    where
        F: Fn(&Value, &ResolveInfo, &Arguments) -> FieldResult<Resolution> + Send + Sync + 'static,
    {
        Self {
            is_default: false,
            func: Arc::new(func),
        }
    }

    /// [`Resolver`] returning the source value unchanged.
    ///
    /// Resolves subscription fields, whose source is the event being
    /// delivered.
    pub fn identity() -> Self {
        Self::new(|source, _, _| Ok(source.clone().into()))
    }

    /// Whether no resolver was declared for the field, so it reads its value
    /// off the source object.
    pub fn is_default(&self) -> bool {
        self.is_default
    }

    /// Resolves the field.
    ///
    /// # Errors
    ///
    /// If a permission check denies access, arguments fail to convert or the
    /// resolver itself fails.
    pub fn resolve(
        &self,
        source: &Value,
        info: &ResolveInfo,
        args: &Arguments,
    ) -> FieldResult<Resolution> {
        (self.func)(source, info, args)
    }
}

/// Builds the engine-facing [`Resolver`] of the given `field`.
pub(crate) fn from_field(field: Arc<FieldDefinition>, arguments: Arc<ArgumentConverter>) -> Resolver {
    let is_default = field.resolver.is_none();
    let adapter = FieldAdapter { field, arguments };
    Resolver {
        is_default,
        func: Arc::new(move |source: &Value, info: &ResolveInfo, args: &Arguments| {
            adapter.resolve(source, info, args)
        }),
    }
}

struct FieldAdapter {
    field: Arc<FieldDefinition>,
    arguments: Arc<ArgumentConverter>,
}

impl FieldAdapter {
    fn resolve(
        &self,
        source: &Value,
        info: &ResolveInfo,
        args: &Arguments,
    ) -> FieldResult<Resolution> {
        let span = tracing::trace_span!(
            "resolve",
            field = %self.field.name,
            path = %info.path,
        );
        let _guard = span.enter();

        let info = Info::new(info, &self.field.type_ref);
        self.check_permissions(source, &info, args)?;

        let resolved = match &self.field.resolver {
            Some(resolver) => resolver.call(self.bind_arguments(source, info, args)?)?,
            None => Self::default_resolve(source, &self.field.name)?,
        };

        Ok(match resolved {
            Resolution::Deferred(future) => Resolution::Deferred(
                future
                    .inspect(|res| {
                        if let Err(e) = res {
                            tracing::debug!(error = e.message(), "deferred resolution failed");
                        }
                    })
                    .instrument(span.clone())
                    .boxed(),
            ),
            Resolution::Stream(stream) => Resolution::Stream(
                stream
                    .inspect(|event| {
                        if let Err(e) = event {
                            tracing::debug!(error = e.message(), "subscription event failed");
                        }
                    })
                    .boxed(),
            ),
            value @ Resolution::Value(_) => value,
        })
    }

    /// Runs the permission checks in order, stopping at the first denial.
    fn check_permissions(&self, source: &Value, info: &Info, args: &Arguments) -> FieldResult<()> {
        for permission in &self.field.permissions {
            if !permission.has_permission(source, info, args) {
                let message = permission.message().unwrap_or(PERMISSION_DENIED);
                tracing::debug!(field = %self.field.name, reason = message, "permission denied");
                return Err(message.into());
            }
        }
        Ok(())
    }

    fn bind_arguments(&self, source: &Value, info: Info, args: &Arguments) -> FieldResult<ResolverArgs> {
        let Some(resolver) = &self.field.resolver else {
            return Ok(ResolverArgs::default());
        };

        let mut bound = ResolverArgs {
            keywords: self
                .arguments
                .convert_arguments(args, &self.field.arguments)?,
            ..ResolverArgs::default()
        };
        if resolver.params.source {
            bound.positional.push(source.clone());
        }
        if resolver.params.root {
            bound.keywords.insert(ROOT_KEYWORD.into(), source.clone());
        }
        if resolver.params.info {
            bound.info = Some(info);
        }
        tracing::trace!(
            resolver = %resolver.name,
            keywords = bound.keywords.len(),
            info = bound.info.is_some(),
            "bound resolver arguments",
        );
        Ok(bound)
    }

    fn default_resolve(source: &Value, name: &str) -> FieldResult<Resolution> {
        let obj = source
            .as_object_value()
            .ok_or_else(|| format!("Cannot read field `{name}` of non-object value: {source}"))?;
        obj.get_field_value(name)
            .cloned()
            .map(Resolution::Value)
            .ok_or_else(|| format!("Object has no field `{name}`").into())
    }
}
