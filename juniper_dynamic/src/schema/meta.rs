//! Types used to describe a `GraphQL` schema

use std::{fmt, sync::Arc};

use arcstr::ArcStr;
use derive_more::with_trait::Display;

use crate::{
    ast::Type,
    definition::ScalarFn,
    resolve::{FieldResult, Resolver},
    value::{ScalarValue, Value},
};

/// Whether an item is deprecated, with context.
#[derive(Clone, Debug, Eq, Hash, PartialEq)]
pub enum DeprecationStatus {
    /// The field/variant is not deprecated.
    Current,
    /// The field/variant is deprecated, with an optional reason
    Deprecated(Option<ArcStr>),
}

impl DeprecationStatus {
    /// If this deprecation status indicates the item is deprecated.
    pub fn is_deprecated(&self) -> bool {
        match self {
            Self::Current => false,
            Self::Deprecated(_) => true,
        }
    }

    /// An optional reason for the deprecation, or none if `Current`.
    pub fn reason(&self) -> Option<&str> {
        match self {
            Self::Current => None,
            Self::Deprecated(rsn) => rsn.as_deref(),
        }
    }
}

impl From<Option<ArcStr>> for DeprecationStatus {
    fn from(reason: Option<ArcStr>) -> Self {
        match reason {
            Some(r) => Self::Deprecated(Some(r)),
            None => Self::Current,
        }
    }
}

/// Kind of a named type.
#[derive(Clone, Copy, Debug, Display, Eq, PartialEq)]
pub enum TypeKind {
    #[display("SCALAR")]
    Scalar,
    #[display("OBJECT")]
    Object,
    #[display("INTERFACE")]
    Interface,
    #[display("UNION")]
    Union,
    #[display("ENUM")]
    Enum,
    #[display("INPUT_OBJECT")]
    InputObject,
}

/// Checks whether a resolved value is an instance of an object type.
pub type IsTypeOfFn = Arc<dyn Fn(&Value) -> bool + Send + Sync>;

/// Maps a resolved value to the name of the concrete type it belongs to.
pub type ResolveTypeFn = Arc<dyn Fn(&Value) -> Option<ArcStr> + Send + Sync>;

/// Scalar type metadata
#[derive(Clone)]
pub struct ScalarMeta {
    #[doc(hidden)]
    pub name: ArcStr,
    #[doc(hidden)]
    pub description: Option<ArcStr>,
    #[doc(hidden)]
    pub specified_by_url: Option<ArcStr>,
    pub(crate) serialize_fn: ScalarFn,
    pub(crate) parse_value_fn: ScalarFn,
    pub(crate) parse_literal_fn: ScalarFn,
}

/// Object type metadata
#[derive(Clone, derive_more::Debug)]
pub struct ObjectMeta {
    #[doc(hidden)]
    pub name: ArcStr,
    #[doc(hidden)]
    pub description: Option<ArcStr>,
    #[doc(hidden)]
    pub fields: Vec<Field>,
    #[doc(hidden)]
    pub interface_names: Vec<ArcStr>,
    #[debug(skip)]
    pub(crate) is_type_of: Option<IsTypeOfFn>,
}

/// Enum type metadata
#[derive(Clone, Debug)]
pub struct EnumMeta {
    #[doc(hidden)]
    pub name: ArcStr,
    #[doc(hidden)]
    pub description: Option<ArcStr>,
    #[doc(hidden)]
    pub values: Vec<EnumValue>,
}

/// Interface type metadata
#[derive(Clone, Debug)]
pub struct InterfaceMeta {
    #[doc(hidden)]
    pub name: ArcStr,
    #[doc(hidden)]
    pub description: Option<ArcStr>,
    #[doc(hidden)]
    pub fields: Vec<Field>,
    #[doc(hidden)]
    pub interface_names: Vec<ArcStr>,
}

/// Union type metadata
#[derive(Clone, derive_more::Debug)]
pub struct UnionMeta {
    #[doc(hidden)]
    pub name: ArcStr,
    #[doc(hidden)]
    pub description: Option<ArcStr>,
    #[doc(hidden)]
    pub of_type_names: Vec<ArcStr>,
    #[debug(skip)]
    pub(crate) resolve_type: ResolveTypeFn,
}

/// Input object metadata
#[derive(Clone, Debug)]
pub struct InputObjectMeta {
    #[doc(hidden)]
    pub name: ArcStr,
    #[doc(hidden)]
    pub description: Option<ArcStr>,
    #[doc(hidden)]
    pub input_fields: Vec<Argument>,
}

/// Generic type metadata
#[derive(Clone, Debug)]
pub enum MetaType {
    #[doc(hidden)]
    Scalar(ScalarMeta),
    #[doc(hidden)]
    Object(ObjectMeta),
    #[doc(hidden)]
    Enum(EnumMeta),
    #[doc(hidden)]
    Interface(InterfaceMeta),
    #[doc(hidden)]
    Union(UnionMeta),
    #[doc(hidden)]
    InputObject(InputObjectMeta),
}

/// Metadata for a field
#[derive(Clone, Debug)]
pub struct Field {
    #[doc(hidden)]
    pub name: ArcStr,
    #[doc(hidden)]
    pub description: Option<ArcStr>,
    #[doc(hidden)]
    pub arguments: Vec<Argument>,
    #[doc(hidden)]
    pub field_type: Type,
    #[doc(hidden)]
    pub deprecation_status: DeprecationStatus,
    /// Resolves the value of this field.
    pub resolve: Resolver,
    /// Produces the event stream of this field, for subscription fields.
    pub subscribe: Option<Resolver>,
}

impl Field {
    /// Builds a new [`Field`] of the given [`Type`] with the given `name`.
    pub fn new(name: ArcStr, field_type: Type, resolve: Resolver) -> Self {
        Self {
            name,
            description: None,
            arguments: vec![],
            field_type,
            deprecation_status: DeprecationStatus::Current,
            resolve,
            subscribe: None,
        }
    }

    /// Returns the [`Argument`] with the given `name`, if any.
    pub fn argument_by_name(&self, name: &str) -> Option<&Argument> {
        self.arguments.iter().find(|a| a.name.as_str() == name)
    }

    /// Returns true if the type is built-in to GraphQL.
    pub fn is_builtin(&self) -> bool {
        // "used exclusively by GraphQL’s introspection system"
        self.name.starts_with("__")
    }
}

/// Metadata for an argument to a field
#[derive(Clone, Debug, PartialEq)]
pub struct Argument {
    #[doc(hidden)]
    pub name: ArcStr,
    #[doc(hidden)]
    pub description: Option<ArcStr>,
    #[doc(hidden)]
    pub arg_type: Type,
    #[doc(hidden)]
    pub default_value: Option<Value>,
}

/// Metadata for a single value in an enum
#[derive(Clone, Debug, PartialEq)]
pub struct EnumValue {
    /// The name of the enum value
    ///
    /// This is the string literal representation of the enum in responses.
    pub name: ArcStr,
    /// The underlying value the enum value stands for.
    pub value: Value,
    /// The optional description of the enum value.
    ///
    /// Note: this is not the description of the enum itself; it's the
    /// description of this enum _value_.
    pub description: Option<ArcStr>,
    /// Whether the field is deprecated or not, with an optional reason.
    pub deprecation_status: DeprecationStatus,
}

impl MetaType {
    /// Access the name of the type
    pub fn name(&self) -> &ArcStr {
        match self {
            Self::Scalar(ScalarMeta { name, .. })
            | Self::Object(ObjectMeta { name, .. })
            | Self::Enum(EnumMeta { name, .. })
            | Self::Interface(InterfaceMeta { name, .. })
            | Self::Union(UnionMeta { name, .. })
            | Self::InputObject(InputObjectMeta { name, .. }) => name,
        }
    }

    /// Access the description of the type, if applicable
    pub fn description(&self) -> Option<&ArcStr> {
        match self {
            Self::Scalar(ScalarMeta { description, .. })
            | Self::Object(ObjectMeta { description, .. })
            | Self::Enum(EnumMeta { description, .. })
            | Self::Interface(InterfaceMeta { description, .. })
            | Self::Union(UnionMeta { description, .. })
            | Self::InputObject(InputObjectMeta { description, .. }) => description.as_ref(),
        }
    }

    /// Accesses the [specification URL][0], if applicable.
    ///
    /// Only custom GraphQL scalars can have a [specification URL][0].
    ///
    /// [0]: https://spec.graphql.org/October2021#sec--specifiedBy
    pub fn specified_by_url(&self) -> Option<&ArcStr> {
        match self {
            Self::Scalar(ScalarMeta {
                specified_by_url, ..
            }) => specified_by_url.as_ref(),
            _ => None,
        }
    }

    /// Construct a `TypeKind` for a given type
    pub fn type_kind(&self) -> TypeKind {
        match self {
            Self::Scalar(_) => TypeKind::Scalar,
            Self::Object(_) => TypeKind::Object,
            Self::Enum(_) => TypeKind::Enum,
            Self::Interface(_) => TypeKind::Interface,
            Self::Union(_) => TypeKind::Union,
            Self::InputObject(_) => TypeKind::InputObject,
        }
    }

    /// Access a field's meta data given its name
    ///
    /// Only objects and interfaces have fields. This method always returns `None` for other types.
    pub fn field_by_name(&self, name: &str) -> Option<&Field> {
        match self {
            Self::Object(ObjectMeta { fields, .. })
            | Self::Interface(InterfaceMeta { fields, .. }) => {
                fields.iter().find(|f| f.name.as_str() == name)
            }
            _ => None,
        }
    }

    /// Access an input field's meta data given its name
    ///
    /// Only input objects have input fields. This method always returns `None` for other types.
    pub fn input_field_by_name(&self, name: &str) -> Option<&Argument> {
        match self {
            Self::InputObject(InputObjectMeta { input_fields, .. }) => {
                input_fields.iter().find(|f| f.name.as_str() == name)
            }
            _ => None,
        }
    }

    /// Names of the interfaces this type implements.
    ///
    /// Only objects and interfaces implement interfaces.
    pub fn interface_names(&self) -> &[ArcStr] {
        match self {
            Self::Object(ObjectMeta {
                interface_names, ..
            })
            | Self::Interface(InterfaceMeta {
                interface_names, ..
            }) => interface_names,
            _ => &[],
        }
    }

    /// Construct a non-null `Type` literal instance based on the metadata
    pub fn as_type(&self) -> Type {
        Type::NonNullNamed(self.name().clone())
    }

    /// Returns true if the type is a composite type
    ///
    /// Objects, interfaces, and unions are composite.
    pub fn is_composite(&self) -> bool {
        matches!(self, Self::Object(_) | Self::Interface(_) | Self::Union(_))
    }

    /// Returns true if the type can occur in leaf positions in queries
    ///
    /// Only enums and scalars are leaf types.
    pub fn is_leaf(&self) -> bool {
        matches!(self, Self::Enum(_) | Self::Scalar(_))
    }

    /// Returns true if the type is abstract
    ///
    /// Only interfaces and unions are abstract types.
    pub fn is_abstract(&self) -> bool {
        matches!(self, Self::Interface(_) | Self::Union(_))
    }

    /// Returns true if the type can be used in input positions, e.g. arguments or variables
    ///
    /// Only scalars, enums, and input objects are input types.
    pub fn is_input(&self) -> bool {
        matches!(self, Self::Scalar(_) | Self::Enum(_) | Self::InputObject(_))
    }

    /// Returns true if the type is built-in to GraphQL.
    pub fn is_builtin(&self) -> bool {
        let name = self.name();
        // "used exclusively by GraphQL’s introspection system"
        name.starts_with("__") ||
        // https://spec.graphql.org/October2021#sec-Scalars
        ["Boolean", "String", "Int", "Float", "ID"].contains(&name.as_str())
    }
}

impl ScalarMeta {
    /// Builds a new [`ScalarMeta`] type with the specified `name`, passing
    /// values through unchanged.
    pub fn new(name: ArcStr) -> Self {
        let identity: ScalarFn = Arc::new(|v: &Value| Ok(v.clone()));
        Self {
            name,
            description: None,
            specified_by_url: None,
            serialize_fn: identity.clone(),
            parse_value_fn: identity.clone(),
            parse_literal_fn: identity,
        }
    }

    /// Sets the `description` of this [`ScalarMeta`] type.
    ///
    /// Overwrites any previously set description.
    #[must_use]
    pub fn description(mut self, description: Option<ArcStr>) -> Self {
        self.description = description;
        self
    }

    /// Sets the [specification URL][0] for this [`ScalarMeta`] type.
    ///
    /// [0]: https://spec.graphql.org/October2021#sec--specifiedBy
    #[must_use]
    pub fn specified_by_url(mut self, url: Option<ArcStr>) -> Self {
        self.specified_by_url = url;
        self
    }

    /// Sets the functions serializing and parsing values of this
    /// [`ScalarMeta`] type.
    #[must_use]
    pub fn conversions(mut self, serialize: ScalarFn, parse_value: ScalarFn, parse_literal: ScalarFn) -> Self {
        self.serialize_fn = serialize;
        self.parse_value_fn = parse_value;
        self.parse_literal_fn = parse_literal;
        self
    }

    /// Serializes an output `value` of this scalar.
    pub fn serialize(&self, value: &Value) -> FieldResult<Value> {
        (self.serialize_fn)(value)
    }

    /// Parses a variable `value` of this scalar.
    pub fn parse_value(&self, value: &Value) -> FieldResult<Value> {
        (self.parse_value_fn)(value)
    }

    /// Parses a literal `value` of this scalar.
    pub fn parse_literal(&self, value: &Value) -> FieldResult<Value> {
        (self.parse_literal_fn)(value)
    }

    /// Wraps this [`ScalarMeta`] type into a generic [`MetaType`].
    pub fn into_meta(self) -> MetaType {
        MetaType::Scalar(self)
    }
}

impl ObjectMeta {
    /// Build a new [`ObjectMeta`] type with the specified `name` and no
    /// fields.
    pub fn new(name: ArcStr) -> Self {
        Self {
            name,
            description: None,
            fields: vec![],
            interface_names: vec![],
            is_type_of: None,
        }
    }

    /// Sets the `description` of this [`ObjectMeta`] type.
    ///
    /// Overwrites any previously set description.
    #[must_use]
    pub fn description(mut self, description: Option<ArcStr>) -> Self {
        self.description = description;
        self
    }

    /// Sets the check whether a value is an instance of this type.
    #[must_use]
    pub fn is_type_of(mut self, is_type_of: Option<IsTypeOfFn>) -> Self {
        self.is_type_of = is_type_of;
        self
    }

    /// Checks whether the `value` is an instance of this type, if the check
    /// is defined.
    pub fn check_type_of(&self, value: &Value) -> Option<bool> {
        self.is_type_of.as_ref().map(|f| f(value))
    }

    /// Wraps this [`ObjectMeta`] type into a generic [`MetaType`].
    pub fn into_meta(self) -> MetaType {
        MetaType::Object(self)
    }
}

impl EnumMeta {
    /// Build a new [`EnumMeta`] type with the specified `name` and possible
    /// `values`.
    pub fn new(name: ArcStr, values: Vec<EnumValue>) -> Self {
        Self {
            name,
            description: None,
            values,
        }
    }

    /// Sets the `description` of this [`EnumMeta`] type.
    ///
    /// Overwrites any previously set description.
    #[must_use]
    pub fn description(mut self, description: Option<ArcStr>) -> Self {
        self.description = description;
        self
    }

    /// Serializes an output `value` into the name of the enum value.
    ///
    /// Accepts either a member of this enum, or a raw value equal to one of
    /// its underlying values or names. Both serialize to the member's name.
    ///
    /// # Errors
    ///
    /// If the `value` is none of the above.
    pub fn serialize(&self, value: &Value) -> FieldResult<Value> {
        match value {
            Value::Enum(member) if member.enum_name == self.name => {
                Ok(Value::scalar(member.name.as_str()))
            }
            Value::Enum(member) => Err(format!(
                "Enum `{}` cannot represent a member of enum `{}`",
                self.name, member.enum_name,
            )
            .into()),
            raw => self
                .values
                .iter()
                .find(|v| v.value == *raw)
                .or_else(|| {
                    self.values.iter().find(|v| {
                        matches!(raw, Value::Scalar(ScalarValue::String(s)) if *s == *v.name)
                    })
                })
                .map(|v| Value::scalar(v.name.as_str()))
                .ok_or_else(|| {
                    format!("Enum `{}` cannot represent value: {raw}", self.name).into()
                }),
        }
    }

    /// Wraps this [`EnumMeta`] type into a generic [`MetaType`].
    pub fn into_meta(self) -> MetaType {
        MetaType::Enum(self)
    }
}

impl InterfaceMeta {
    /// Builds a new [`InterfaceMeta`] type with the specified `name` and no
    /// fields.
    pub fn new(name: ArcStr) -> Self {
        Self {
            name,
            description: None,
            fields: vec![],
            interface_names: vec![],
        }
    }

    /// Sets the `description` of this [`InterfaceMeta`] type.
    ///
    /// Overwrites any previously set description.
    #[must_use]
    pub fn description(mut self, description: Option<ArcStr>) -> Self {
        self.description = description;
        self
    }

    /// Wraps this [`InterfaceMeta`] type into a generic [`MetaType`].
    pub fn into_meta(self) -> MetaType {
        MetaType::Interface(self)
    }
}

impl UnionMeta {
    /// Build a new [`UnionMeta`] type with the specified `name` and no
    /// members.
    pub fn new(name: ArcStr) -> Self {
        Self {
            name,
            description: None,
            of_type_names: vec![],
            resolve_type: Arc::new(|_: &Value| None),
        }
    }

    /// Sets the `description` of this [`UnionMeta`] type.
    ///
    /// Overwrites any previously set description.
    #[must_use]
    pub fn description(mut self, description: Option<ArcStr>) -> Self {
        self.description = description;
        self
    }

    /// Resolves the name of the member type the `value` belongs to.
    pub fn resolve_type(&self, value: &Value) -> Option<ArcStr> {
        (self.resolve_type)(value)
    }

    /// Wraps this [`UnionMeta`] type into a generic [`MetaType`].
    pub fn into_meta(self) -> MetaType {
        MetaType::Union(self)
    }
}

impl InputObjectMeta {
    /// Builds a new [`InputObjectMeta`] type with the specified `name` and no
    /// input fields.
    pub fn new(name: ArcStr) -> Self {
        Self {
            name,
            description: None,
            input_fields: vec![],
        }
    }

    /// Set the `description` of this [`InputObjectMeta`] type.
    ///
    /// Overwrites any previously set description.
    #[must_use]
    pub fn description(mut self, description: Option<ArcStr>) -> Self {
        self.description = description;
        self
    }

    /// Wraps this [`InputObjectMeta`] type into a generic [`MetaType`].
    pub fn into_meta(self) -> MetaType {
        MetaType::InputObject(self)
    }
}

impl fmt::Debug for ScalarMeta {
    fn fmt(&self, fmt: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt.debug_struct("ScalarMeta")
            .field("name", &self.name)
            .field("description", &self.description)
            .field("specified_by_url", &self.specified_by_url)
            .finish_non_exhaustive()
    }
}
