use std::{any::Any, fmt, sync::Arc};

use arcstr::ArcStr;
use derive_more::with_trait::Display;
use indexmap::IndexMap;
use itertools::Itertools as _;

use crate::{definition::TypeRef, value::Value};

/// Variable values of a request.
pub type Variables = IndexMap<ArcStr, Value>;

/// Opaque user data shared across a whole request.
#[derive(Clone)]
pub struct Context(Arc<dyn Any + Send + Sync>);

impl Context {
    /// Wraps the provided `data` into a [`Context`].
    pub fn new<T: Any + Send + Sync>(data: T) -> Self {
        Self(Arc::new(data))
    }

    /// Returns the wrapped data, if it's of type `T`.
    pub fn downcast_ref<T: Any>(&self) -> Option<&T> {
        self.0.downcast_ref()
    }
}

impl Default for Context {
    fn default() -> Self {
        Self::new(())
    }
}

impl fmt::Debug for Context {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Context(..)")
    }
}

/// Type of an executed operation.
#[derive(Clone, Copy, Debug, Display, Eq, PartialEq)]
pub enum OperationType {
    #[display("query")]
    Query,
    #[display("mutation")]
    Mutation,
    #[display("subscription")]
    Subscription,
}

/// Executed operation.
#[derive(Clone, Debug, PartialEq)]
pub struct Operation {
    /// Type of the operation.
    pub operation_type: OperationType,

    /// Name of the operation, if named.
    pub name: Option<ArcStr>,
}

/// Segment of a [`ResponsePath`].
#[derive(Clone, Debug, Display, Eq, PartialEq)]
pub enum PathSegment {
    /// Field response key.
    Key(ArcStr),

    /// Position in a list.
    Index(usize),
}

/// Path to the currently resolved field in the response.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct ResponsePath(Vec<PathSegment>);

impl ResponsePath {
    /// Creates an empty [`ResponsePath`].
    pub fn new() -> Self {
        Self::default()
    }

    /// Extends this path with the field response `key`.
    #[must_use]
    pub fn key(mut self, key: impl Into<ArcStr>) -> Self {
        self.0.push(PathSegment::Key(key.into()));
        self
    }

    /// Extends this path with the list `index`.
    #[must_use]
    pub fn index(mut self, index: usize) -> Self {
        self.0.push(PathSegment::Index(index));
        self
    }

    /// Segments of this path.
    pub fn segments(&self) -> &[PathSegment] {
        &self.0
    }
}

impl fmt::Display for ResponsePath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.iter().format("."))
    }
}

/// Field selection the executed field originates from.
#[derive(Clone, Debug, PartialEq)]
pub struct FieldNode {
    /// Name of the selected field.
    pub name: ArcStr,

    /// Alias of the selection, if any.
    pub alias: Option<ArcStr>,
}

impl FieldNode {
    /// Key the selection appears in the response under.
    pub fn response_key(&self) -> &ArcStr {
        self.alias.as_ref().unwrap_or(&self.name)
    }
}

/// Per-field information an execution engine supplies when resolving.
#[derive(Clone, Debug)]
pub struct ResolveInfo {
    /// Exposed name of the resolved field.
    pub field_name: ArcStr,

    /// Selections of the resolved field.
    pub field_nodes: Arc<[FieldNode]>,

    /// Request context.
    pub context: Context,

    /// Root value of the operation.
    pub root_value: Value,

    /// Variable values of the request.
    pub variable_values: Arc<Variables>,

    /// Executed operation.
    pub operation: Arc<Operation>,

    /// Path to the resolved field.
    pub path: ResponsePath,
}

impl ResolveInfo {
    /// Creates a new [`ResolveInfo`] for an unnamed operation of the given
    /// type, selecting the field once, without an alias.
    pub fn new(field_name: impl Into<ArcStr>, operation_type: OperationType) -> Self {
        let field_name = field_name.into();
        Self {
            field_nodes: Arc::new([FieldNode {
                name: field_name.clone(),
                alias: None,
            }]),
            path: ResponsePath::new().key(field_name.clone()),
            field_name,
            context: Context::default(),
            root_value: Value::Null,
            variable_values: Arc::default(),
            operation: Arc::new(Operation {
                operation_type,
                name: None,
            }),
        }
    }

    /// Sets the request `context`.
    #[must_use]
    pub fn context(mut self, context: Context) -> Self {
        self.context = context;
        self
    }

    /// Sets the root value of the operation.
    #[must_use]
    pub fn root_value(mut self, value: Value) -> Self {
        self.root_value = value;
        self
    }

    /// Sets the variable values of the request.
    #[must_use]
    pub fn variable_values(mut self, variables: Variables) -> Self {
        self.variable_values = Arc::new(variables);
        self
    }

    /// Sets the path to the resolved field.
    #[must_use]
    pub fn path(mut self, path: ResponsePath) -> Self {
        self.path = path;
        self
    }
}

/// Request-scoped information passed to resolvers and permission checks.
///
/// Everything of the [`ResolveInfo`], plus the declared return type of the
/// field.
#[derive(Clone, Debug)]
pub struct Info {
    /// Exposed name of the resolved field.
    pub field_name: ArcStr,

    /// Selections of the resolved field.
    pub field_nodes: Arc<[FieldNode]>,

    /// Request context.
    pub context: Context,

    /// Root value of the operation.
    pub root_value: Value,

    /// Variable values of the request.
    pub variable_values: Arc<Variables>,

    /// Declared return type of the field.
    pub return_type: TypeRef,

    /// Executed operation.
    pub operation: Arc<Operation>,

    /// Path to the resolved field.
    pub path: ResponsePath,
}

impl Info {
    pub(crate) fn new(info: &ResolveInfo, return_type: &TypeRef) -> Self {
        Self {
            field_name: info.field_name.clone(),
            field_nodes: info.field_nodes.clone(),
            context: info.context.clone(),
            root_value: info.root_value.clone(),
            variable_values: info.variable_values.clone(),
            return_type: return_type.clone(),
            operation: info.operation.clone(),
            path: info.path.clone(),
        }
    }

    /// Returns the request context data, if it's of type `T`.
    pub fn context<T: Any>(&self) -> Option<&T> {
        self.context.downcast_ref()
    }
}
