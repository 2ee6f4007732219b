//! Normalized type-definition model.
//!
//! This is what a declaration front-end hands over to the [`Converter`]: a
//! closed set of definitions referencing each other by name via [`TypeRef`]s,
//! so cyclic type graphs need no cyclic ownership.
//!
//! [`Converter`]: crate::Converter

mod resolver;

use std::{fmt, mem, sync::Arc};

use arcstr::ArcStr;
use indexmap::IndexMap;

use crate::{
    SchemaError,
    resolve::FieldResult,
    schema::model::DirectiveLocation,
    value::{EnumMember, Origin, Value},
};

pub use self::resolver::{
    Permission, ROOT_KEYWORD, ResolverArgs, ResolverDefinition, ResolverFn, ResolverParams,
};

/// Reference to a type, as declared for a field or an argument.
#[derive(Clone, Debug, PartialEq)]
pub enum TypeRef {
    /// Object type with the given name.
    Object(ArcStr),

    /// Input object type with the given name.
    Input(ArcStr),

    /// Interface type with the given name.
    Interface(ArcStr),

    /// Enum type with the given name.
    Enum(ArcStr),

    /// Union type with the given name.
    Union(ArcStr),

    /// Leaf scalar type.
    Scalar(ScalarMarker),

    /// List of the inner type.
    List(Box<TypeRef>),

    /// Non-null inner type.
    NonNull(Box<TypeRef>),
}

impl TypeRef {
    /// Reference to the object type named `name`.
    pub fn object(name: impl Into<ArcStr>) -> Self {
        Self::Object(name.into())
    }

    /// Reference to the input object type named `name`.
    pub fn input(name: impl Into<ArcStr>) -> Self {
        Self::Input(name.into())
    }

    /// Reference to the interface type named `name`.
    pub fn interface(name: impl Into<ArcStr>) -> Self {
        Self::Interface(name.into())
    }

    /// Reference to the enum type named `name`.
    pub fn enumeration(name: impl Into<ArcStr>) -> Self {
        Self::Enum(name.into())
    }

    /// Reference to the union type named `name`.
    pub fn union(name: impl Into<ArcStr>) -> Self {
        Self::Union(name.into())
    }

    /// List of `of_type`.
    pub fn list(of_type: Self) -> Self {
        Self::List(Box::new(of_type))
    }

    /// Non-null `of_type`.
    pub fn non_null(of_type: Self) -> Self {
        Self::NonNull(Box::new(of_type))
    }

    /// Whether this is a list reference.
    pub fn is_list(&self) -> bool {
        matches!(self, Self::List(_))
    }

    /// Whether this is a union reference.
    pub fn is_union(&self) -> bool {
        matches!(self, Self::Union(_))
    }

    /// Element type of a list reference.
    pub fn child(&self) -> Option<&Self> {
        match self {
            Self::List(of_type) => Some(of_type),
            _ => None,
        }
    }
}

impl fmt::Display for TypeRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Object(n) => write!(f, "object {n}"),
            Self::Input(n) => write!(f, "input {n}"),
            Self::Interface(n) => write!(f, "interface {n}"),
            Self::Enum(n) => write!(f, "enum {n}"),
            Self::Union(n) => write!(f, "union {n}"),
            Self::Scalar(s) => write!(f, "scalar {}", s.name()),
            Self::List(t) => write!(f, "[{t}]"),
            Self::NonNull(t) => write!(f, "{t}!"),
        }
    }
}

impl From<ScalarMarker> for TypeRef {
    fn from(marker: ScalarMarker) -> Self {
        Self::Scalar(marker)
    }
}

/// Marker of a leaf type.
#[derive(Clone, Debug)]
pub enum ScalarMarker {
    /// Built-in `Int`.
    Int,

    /// Built-in `Float`.
    Float,

    /// Built-in `String`.
    String,

    /// Built-in `Boolean`.
    Boolean,

    /// Built-in `ID`.
    Id,

    /// User-defined scalar.
    Custom(Arc<ScalarDefinition>),
}

impl ScalarMarker {
    /// Name of the scalar type this marker stands for.
    pub fn name(&self) -> &str {
        match self {
            Self::Int => "Int",
            Self::Float => "Float",
            Self::String => "String",
            Self::Boolean => "Boolean",
            Self::Id => "ID",
            Self::Custom(def) => &def.name,
        }
    }
}

impl PartialEq for ScalarMarker {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::Custom(a), Self::Custom(b)) => Arc::ptr_eq(a, b),
            (a, b) => mem::discriminant(a) == mem::discriminant(b),
        }
    }
}

/// Function converting a [`Value`] between its internal and its schema
/// representation.
pub type ScalarFn = Arc<dyn Fn(&Value) -> FieldResult<Value> + Send + Sync>;

/// Definition of a scalar type.
///
/// Concrete parsing and serialization rules are supplied by the declarer,
/// this crate only carries them over into the schema.
#[derive(Clone, derive_more::Debug)]
pub struct ScalarDefinition {
    /// Name of the scalar.
    pub name: ArcStr,

    /// Description of the scalar.
    pub description: Option<ArcStr>,

    /// URL of the specification describing the scalar's format.
    pub specified_by_url: Option<ArcStr>,

    /// Converts an output value into its response representation.
    #[debug(skip)]
    pub serialize: ScalarFn,

    /// Converts a variable value into its internal representation.
    #[debug(skip)]
    pub parse_value: ScalarFn,

    /// Converts a literal from a query document into its internal
    /// representation.
    #[debug(skip)]
    pub parse_literal: ScalarFn,
}

impl ScalarDefinition {
    /// Creates a new [`ScalarDefinition`] passing values through unchanged in
    /// every direction.
    pub fn new(name: impl Into<ArcStr>) -> Self {
        let identity: ScalarFn = Arc::new(|v: &Value| Ok(v.clone()));
        Self {
            name: name.into(),
            description: None,
            specified_by_url: None,
            serialize: identity.clone(),
            parse_value: identity.clone(),
            parse_literal: identity,
        }
    }

    /// Sets the `description` of this [`ScalarDefinition`].
    #[must_use]
    pub fn description(mut self, description: impl Into<ArcStr>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Sets the specification URL of this [`ScalarDefinition`].
    #[must_use]
    pub fn specified_by_url(mut self, url: impl Into<ArcStr>) -> Self {
        self.specified_by_url = Some(url.into());
        self
    }

    /// Sets the output serialization function.
    #[must_use]
    pub fn serialize<F>(mut self, f: F) -> Self
    where
        F: Fn(&Value) -> FieldResult<Value> + Send + Sync + 'static,
    {
        self.serialize = Arc::new(f);
        self
    }

    /// Sets the variable parsing function.
    #[must_use]
    pub fn parse_value<F>(mut self, f: F) -> Self
    where
        F: Fn(&Value) -> FieldResult<Value> + Send + Sync + 'static,
    {
        self.parse_value = Arc::new(f);
        self
    }

    /// Sets the literal parsing function.
    #[must_use]
    pub fn parse_literal<F>(mut self, f: F) -> Self
    where
        F: Fn(&Value) -> FieldResult<Value> + Send + Sync + 'static,
    {
        self.parse_literal = Arc::new(f);
        self
    }

    /// Wraps this [`ScalarDefinition`] into a [`ScalarMarker`].
    pub fn into_marker(self) -> ScalarMarker {
        ScalarMarker::Custom(Arc::new(self))
    }
}

/// Default value of an input field or an argument.
#[derive(Clone, Debug, Default, PartialEq)]
pub enum DefaultValue {
    /// No default value was declared.
    #[default]
    Unset,

    /// The declaration marks the default as explicitly undefined.
    Undefined,

    /// Declared default value.
    Value(Value),
}

impl DefaultValue {
    /// Returns the default the schema should expose, where [`None`] means
    /// "no default".
    ///
    /// Declared values pass through verbatim, without any coercion.
    pub fn to_schema_default(&self) -> Option<Value> {
        match self {
            Self::Unset | Self::Undefined => None,
            Self::Value(v) => Some(v.clone()),
        }
    }
}

impl From<Value> for DefaultValue {
    fn from(v: Value) -> Self {
        Self::Value(v)
    }
}

/// Kind of a composite [`TypeDefinition`].
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum DefinitionKind {
    /// Output object type.
    Object,

    /// Input object type.
    Input,

    /// Interface type.
    Interface,
}

/// Definition of a composite type: an object, an input object or an
/// interface.
#[derive(Clone, Debug)]
pub struct TypeDefinition {
    /// Name of the type, unique within a single schema build.
    pub name: ArcStr,

    /// Description of the type.
    pub description: Option<ArcStr>,

    /// Kind of the type.
    pub kind: DefinitionKind,

    /// Fields, in declaration order.
    pub fields: Vec<Arc<FieldDefinition>>,

    /// Names of the interfaces this type implements.
    pub interfaces: Vec<ArcStr>,

    /// Host type this definition was declared from.
    pub origin: Origin,
}

impl TypeDefinition {
    /// Defines a new object type.
    pub fn object(name: impl Into<ArcStr>, origin: Origin) -> Self {
        Self::new(name.into(), DefinitionKind::Object, origin)
    }

    /// Defines a new input object type.
    pub fn input(name: impl Into<ArcStr>, origin: Origin) -> Self {
        Self::new(name.into(), DefinitionKind::Input, origin)
    }

    /// Defines a new interface type.
    pub fn interface(name: impl Into<ArcStr>, origin: Origin) -> Self {
        Self::new(name.into(), DefinitionKind::Interface, origin)
    }

    fn new(name: ArcStr, kind: DefinitionKind, origin: Origin) -> Self {
        Self {
            name,
            description: None,
            kind,
            fields: vec![],
            interfaces: vec![],
            origin,
        }
    }

    /// Sets the `description` of this [`TypeDefinition`].
    #[must_use]
    pub fn description(mut self, description: impl Into<ArcStr>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Appends a `field` to this [`TypeDefinition`].
    #[must_use]
    pub fn field(mut self, field: FieldDefinition) -> Self {
        self.fields.push(Arc::new(field));
        self
    }

    /// Declares this [`TypeDefinition`] as implementing the `interface`.
    #[must_use]
    pub fn implements(mut self, interface: impl Into<ArcStr>) -> Self {
        self.interfaces.push(interface.into());
        self
    }
}

/// Definition of a field of a [`TypeDefinition`].
#[derive(Clone, derive_more::Debug)]
pub struct FieldDefinition {
    /// Declared name of the field.
    pub name: ArcStr,

    /// Explicit name to expose the field under, overriding any casing.
    pub graphql_name: Option<ArcStr>,

    /// Description of the field.
    pub description: Option<ArcStr>,

    /// Reason of the field deprecation, if deprecated.
    pub deprecation_reason: Option<ArcStr>,

    /// Declared type of the field.
    pub type_ref: TypeRef,

    /// Whether the field may be null.
    pub is_optional: bool,

    /// Arguments of the field, in declaration order.
    pub arguments: Vec<ArgumentDefinition>,

    /// Checks to pass, in order, before the field is resolved.
    #[debug(skip)]
    pub permissions: Vec<Arc<dyn Permission>>,

    /// Resolver computing the field. Fields without one read the declared
    /// name off their source object.
    pub resolver: Option<ResolverDefinition>,

    /// Whether this is a subscription field producing a stream of events.
    pub is_subscription: bool,

    /// Default value, for fields of input objects.
    pub default_value: DefaultValue,
}

impl FieldDefinition {
    /// Defines a new non-optional field.
    pub fn new(name: impl Into<ArcStr>, type_ref: impl Into<TypeRef>) -> Self {
        Self {
            name: name.into(),
            graphql_name: None,
            description: None,
            deprecation_reason: None,
            type_ref: type_ref.into(),
            is_optional: false,
            arguments: vec![],
            permissions: vec![],
            resolver: None,
            is_subscription: false,
            default_value: DefaultValue::Unset,
        }
    }

    /// Marks this field as optional.
    #[must_use]
    pub fn optional(mut self) -> Self {
        self.is_optional = true;
        self
    }

    /// Sets an explicit exposed name of this field.
    #[must_use]
    pub fn graphql_name(mut self, name: impl Into<ArcStr>) -> Self {
        self.graphql_name = Some(name.into());
        self
    }

    /// Sets the `description` of this field.
    #[must_use]
    pub fn description(mut self, description: impl Into<ArcStr>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Marks this field as deprecated for the given `reason`.
    #[must_use]
    pub fn deprecated(mut self, reason: impl Into<ArcStr>) -> Self {
        self.deprecation_reason = Some(reason.into());
        self
    }

    /// Appends an `argument` to this field.
    #[must_use]
    pub fn argument(mut self, argument: ArgumentDefinition) -> Self {
        self.arguments.push(argument);
        self
    }

    /// Appends a `permission` check to this field.
    #[must_use]
    pub fn permission(mut self, permission: impl Permission + 'static) -> Self {
        self.permissions.push(Arc::new(permission));
        self
    }

    /// Sets the `resolver` of this field.
    #[must_use]
    pub fn resolver(mut self, resolver: ResolverDefinition) -> Self {
        self.resolver = Some(resolver);
        self
    }

    /// Marks this field as a subscription one.
    #[must_use]
    pub fn subscription(mut self) -> Self {
        self.is_subscription = true;
        self
    }

    /// Sets the `default` value of this field.
    #[must_use]
    pub fn default_value(mut self, default: impl Into<DefaultValue>) -> Self {
        self.default_value = default.into();
        self
    }

    /// Whether this field is a list.
    pub fn is_list(&self) -> bool {
        self.type_ref.is_list()
    }

    /// Whether this field is a union.
    pub fn is_union(&self) -> bool {
        self.type_ref.is_union()
    }
}

/// Definition of an argument of a field or a directive.
#[derive(Clone, Debug, PartialEq)]
pub struct ArgumentDefinition {
    /// Declared name of the argument.
    pub name: ArcStr,

    /// Explicit name to expose the argument under, overriding any casing.
    pub graphql_name: Option<ArcStr>,

    /// Declared type of the argument.
    pub type_ref: TypeRef,

    /// Whether the argument may be null or omitted.
    pub is_optional: bool,

    /// Default value of the argument.
    pub default: DefaultValue,

    /// Description of the argument.
    pub description: Option<ArcStr>,
}

impl ArgumentDefinition {
    /// Defines a new non-optional argument without a default value.
    pub fn new(name: impl Into<ArcStr>, type_ref: impl Into<TypeRef>) -> Self {
        Self {
            name: name.into(),
            graphql_name: None,
            type_ref: type_ref.into(),
            is_optional: false,
            default: DefaultValue::Unset,
            description: None,
        }
    }

    /// Marks this argument as optional.
    #[must_use]
    pub fn optional(mut self) -> Self {
        self.is_optional = true;
        self
    }

    /// Sets an explicit exposed name of this argument.
    #[must_use]
    pub fn graphql_name(mut self, name: impl Into<ArcStr>) -> Self {
        self.graphql_name = Some(name.into());
        self
    }

    /// Sets the `default` value of this argument.
    #[must_use]
    pub fn default_value(mut self, default: impl Into<DefaultValue>) -> Self {
        self.default = default.into();
        self
    }

    /// Sets the `description` of this argument.
    #[must_use]
    pub fn description(mut self, description: impl Into<ArcStr>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Whether this argument is a list.
    pub fn is_list(&self) -> bool {
        self.type_ref.is_list()
    }

    /// Whether this argument is a union.
    pub fn is_union(&self) -> bool {
        self.type_ref.is_union()
    }
}

/// Definition of an enum type.
#[derive(Clone, Debug, PartialEq)]
pub struct EnumDefinition {
    /// Name of the enum.
    pub name: ArcStr,

    /// Description of the enum.
    pub description: Option<ArcStr>,

    /// Members of the enum, in declaration order.
    pub values: Vec<EnumValueDefinition>,
}

/// Single member of an [`EnumDefinition`].
#[derive(Clone, Debug, PartialEq)]
pub struct EnumValueDefinition {
    /// Symbolic name of the member.
    pub name: ArcStr,

    /// Underlying value of the member.
    pub value: Value,

    /// Description of the member.
    pub description: Option<ArcStr>,

    /// Reason of the member deprecation, if deprecated.
    pub deprecation_reason: Option<ArcStr>,
}

impl EnumDefinition {
    /// Defines a new enum without members.
    pub fn new(name: impl Into<ArcStr>) -> Self {
        Self {
            name: name.into(),
            description: None,
            values: vec![],
        }
    }

    /// Sets the `description` of this enum.
    #[must_use]
    pub fn description(mut self, description: impl Into<ArcStr>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Appends a member with the given `name` and underlying `value`.
    #[must_use]
    pub fn value(mut self, name: impl Into<ArcStr>, value: impl Into<Value>) -> Self {
        self.values.push(EnumValueDefinition {
            name: name.into(),
            value: value.into(),
            description: None,
            deprecation_reason: None,
        });
        self
    }

    /// Appends a fully specified member.
    #[must_use]
    pub fn member(mut self, member: EnumValueDefinition) -> Self {
        self.values.push(member);
        self
    }

    /// Returns the instance of the member named `name`, if any.
    pub fn instance(&self, name: &str) -> Option<EnumMember> {
        self.values
            .iter()
            .find(|v| v.name.as_str() == name)
            .map(|v| EnumMember::new(self.name.clone(), v.name.clone(), v.value.clone()))
    }
}

/// Function mapping a resolved value to the name of the union member type it
/// belongs to.
pub type UnionTypeResolverFn = Arc<dyn Fn(&Value) -> Option<ArcStr> + Send + Sync>;

/// Definition of a union type.
#[derive(Clone, derive_more::Debug)]
pub struct UnionDefinition {
    /// Name of the union.
    pub name: ArcStr,

    /// Description of the union.
    pub description: Option<ArcStr>,

    /// Names of the member object types.
    pub types: Vec<ArcStr>,

    /// Resolves the member type of a value. When absent, the value's
    /// [`Origin`] is matched against the members' ones.
    #[debug(skip)]
    pub type_resolver: Option<UnionTypeResolverFn>,
}

impl UnionDefinition {
    /// Defines a new union of the given member `types`.
    pub fn new<I, N>(name: impl Into<ArcStr>, types: I) -> Self
    where
        I: IntoIterator<Item = N>,
        N: Into<ArcStr>,
    {
        Self {
            name: name.into(),
            description: None,
            types: types.into_iter().map(Into::into).collect(),
            type_resolver: None,
        }
    }

    /// Sets the `description` of this union.
    #[must_use]
    pub fn description(mut self, description: impl Into<ArcStr>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Sets a custom member type resolver.
    #[must_use]
    pub fn type_resolver<F>(mut self, f: F) -> Self
    where
        F: Fn(&Value) -> Option<ArcStr> + Send + Sync + 'static,
    {
        self.type_resolver = Some(Arc::new(f));
        self
    }
}

/// Definition of a directive.
#[derive(Clone, Debug, PartialEq)]
pub struct DirectiveDefinition {
    /// Name of the directive.
    pub name: ArcStr,

    /// Description of the directive.
    pub description: Option<ArcStr>,

    /// Locations the directive may appear at.
    pub locations: Vec<DirectiveLocation>,

    /// Arguments of the directive.
    pub arguments: Vec<ArgumentDefinition>,
}

impl DirectiveDefinition {
    /// Defines a new directive valid at the given `locations`.
    pub fn new(
        name: impl Into<ArcStr>,
        locations: impl IntoIterator<Item = DirectiveLocation>,
    ) -> Self {
        Self {
            name: name.into(),
            description: None,
            locations: locations.into_iter().collect(),
            arguments: vec![],
        }
    }

    /// Sets the `description` of this directive.
    #[must_use]
    pub fn description(mut self, description: impl Into<ArcStr>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Appends an `argument` to this directive.
    #[must_use]
    pub fn argument(mut self, argument: ArgumentDefinition) -> Self {
        self.arguments.push(argument);
        self
    }
}

/// Any named definition.
#[derive(Clone, Debug)]
pub enum Definition {
    /// Object, input object or interface.
    Type(Arc<TypeDefinition>),

    /// Enum.
    Enum(Arc<EnumDefinition>),

    /// Union.
    Union(Arc<UnionDefinition>),

    /// Scalar.
    Scalar(Arc<ScalarDefinition>),
}

impl Definition {
    /// Name of the defined type.
    pub fn name(&self) -> &ArcStr {
        match self {
            Self::Type(d) => &d.name,
            Self::Enum(d) => &d.name,
            Self::Union(d) => &d.name,
            Self::Scalar(d) => &d.name,
        }
    }

    /// Checks whether both are the very same definition, rather than two
    /// definitions sharing a name.
    pub fn is_same(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::Type(a), Self::Type(b)) => Arc::ptr_eq(a, b),
            (Self::Enum(a), Self::Enum(b)) => Arc::ptr_eq(a, b),
            (Self::Union(a), Self::Union(b)) => Arc::ptr_eq(a, b),
            (Self::Scalar(a), Self::Scalar(b)) => Arc::ptr_eq(a, b),
            _ => false,
        }
    }
}

impl From<TypeDefinition> for Definition {
    fn from(d: TypeDefinition) -> Self {
        Self::Type(Arc::new(d))
    }
}

impl From<EnumDefinition> for Definition {
    fn from(d: EnumDefinition) -> Self {
        Self::Enum(Arc::new(d))
    }
}

impl From<UnionDefinition> for Definition {
    fn from(d: UnionDefinition) -> Self {
        Self::Union(Arc::new(d))
    }
}

impl From<ScalarDefinition> for Definition {
    fn from(d: ScalarDefinition) -> Self {
        Self::Scalar(Arc::new(d))
    }
}

/// Set of named definitions of one schema build.
#[derive(Clone, Debug, Default)]
pub struct Definitions {
    types: IndexMap<ArcStr, Definition>,
}

impl Definitions {
    /// Creates an empty set of definitions.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a `definition`.
    ///
    /// # Errors
    ///
    /// If another definition with the same name is present already.
    pub fn insert(&mut self, definition: impl Into<Definition>) -> Result<(), SchemaError> {
        let definition = definition.into();
        let name = definition.name().clone();
        if self.types.contains_key(&name) {
            return Err(SchemaError::DuplicateTypeName { name });
        }
        self.types.insert(name, definition);
        Ok(())
    }

    /// Same as [`Definitions::insert()`], but in a builder fashion.
    ///
    /// # Errors
    ///
    /// If another definition with the same name is present already.
    pub fn with(mut self, definition: impl Into<Definition>) -> Result<Self, SchemaError> {
        self.insert(definition)?;
        Ok(self)
    }

    /// Returns the definition named `name`, if any.
    pub fn get(&self, name: &str) -> Option<&Definition> {
        self.types.get(name)
    }

    /// Returns the composite [`TypeDefinition`] named `name`, if any.
    pub fn type_definition(&self, name: &str) -> Option<&Arc<TypeDefinition>> {
        match self.get(name)? {
            Definition::Type(d) => Some(d),
            _ => None,
        }
    }

    /// Returns the [`EnumDefinition`] named `name`, if any.
    pub fn enum_definition(&self, name: &str) -> Option<&Arc<EnumDefinition>> {
        match self.get(name)? {
            Definition::Enum(d) => Some(d),
            _ => None,
        }
    }

    /// Returns the [`UnionDefinition`] named `name`, if any.
    pub fn union_definition(&self, name: &str) -> Option<&Arc<UnionDefinition>> {
        match self.get(name)? {
            Definition::Union(d) => Some(d),
            _ => None,
        }
    }

    /// Iterates over all the definitions, in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = &Definition> {
        self.types.values()
    }

    /// Number of definitions.
    pub fn len(&self) -> usize {
        self.types.len()
    }

    /// Whether there are no definitions.
    pub fn is_empty(&self) -> bool {
        self.types.is_empty()
    }
}
