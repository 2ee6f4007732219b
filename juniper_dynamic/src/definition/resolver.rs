use std::sync::Arc;

use arcstr::ArcStr;
use indexmap::IndexMap;

use crate::{
    resolve::{Arguments, FieldResult, Info, Resolution},
    value::Value,
};

/// Keyword a resolver receives the source value under, when it asks for the
/// root.
pub const ROOT_KEYWORD: &str = "root";

/// Which of the source, root and info a resolver wants to receive.
///
/// Declared up-front by the resolver, so binding never needs to inspect the
/// resolver itself.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub struct ResolverParams {
    /// Receives the source value as its first positional argument.
    pub source: bool,

    /// Receives the source value under the [`ROOT_KEYWORD`].
    pub root: bool,

    /// Receives the request-scoped [`Info`].
    pub info: bool,
}

/// Arguments a [`ResolverDefinition`] is invoked with.
#[derive(Clone, Debug, Default)]
pub struct ResolverArgs {
    /// Positional arguments, that is the source value, if asked for.
    pub positional: Vec<Value>,

    /// Keyword arguments keyed by their declared names.
    pub keywords: IndexMap<ArcStr, Value>,

    /// Request-scoped info, if asked for.
    pub info: Option<Info>,
}

impl ResolverArgs {
    /// Source value, if the resolver asked for it.
    pub fn source(&self) -> Option<&Value> {
        self.positional.first()
    }

    /// Root value, if the resolver asked for it.
    pub fn root(&self) -> Option<&Value> {
        self.keywords.get(ROOT_KEYWORD)
    }

    /// Keyword argument with the given declared `name`.
    pub fn get(&self, name: &str) -> Option<&Value> {
        self.keywords.get(name)
    }

    /// Request-scoped info, if the resolver asked for it.
    pub fn info(&self) -> Option<&Info> {
        self.info.as_ref()
    }
}

/// Function computing the value of a field.
pub type ResolverFn = Arc<dyn Fn(ResolverArgs) -> FieldResult<Resolution> + Send + Sync>;

/// User-supplied resolver along with the description of the parameters it
/// accepts.
#[derive(Clone, derive_more::Debug)]
pub struct ResolverDefinition {
    /// Name of the resolver, for diagnostics.
    pub name: ArcStr,

    /// Parameters the resolver accepts.
    pub params: ResolverParams,

    #[debug(skip)]
    func: ResolverFn,
}

impl ResolverDefinition {
    /// Wraps the provided function into a [`ResolverDefinition`] accepting
    /// neither source, root nor info.
    pub fn new<F>(name: impl Into<ArcStr>, func: F) -> Self
    where
        F: Fn(ResolverArgs) -> FieldResult<Resolution> + Send + Sync + 'static,
    {
        Self {
            name: name.into(),
            params: ResolverParams::default(),
            func: Arc::new(func),
        }
    }

    /// Makes the resolver receive the source value positionally.
    #[must_use]
    pub fn with_source(mut self) -> Self {
        self.params.source = true;
        self
    }

    /// Makes the resolver receive the source value as root.
    #[must_use]
    pub fn with_root(mut self) -> Self {
        self.params.root = true;
        self
    }

    /// Makes the resolver receive the request-scoped info.
    #[must_use]
    pub fn with_info(mut self) -> Self {
        self.params.info = true;
        self
    }

    /// Invokes the resolver.
    pub fn call(&self, args: ResolverArgs) -> FieldResult<Resolution> {
        (self.func)(args)
    }
}

/// Check to pass before a field is resolved.
///
/// Checks are stateless, every invocation is independent of any other one.
pub trait Permission: Send + Sync {
    /// Decides whether the field may be resolved for the given `source`.
    fn has_permission(&self, source: &Value, info: &Info, arguments: &Arguments) -> bool;

    /// Message to report on denial, if any.
    fn message(&self) -> Option<&str> {
        None
    }
}

impl<F> Permission for F
where
    F: Fn(&Value, &Info, &Arguments) -> bool + Send + Sync,
{
    fn has_permission(&self, source: &Value, info: &Info, arguments: &Arguments) -> bool {
        self(source, info, arguments)
    }
}
