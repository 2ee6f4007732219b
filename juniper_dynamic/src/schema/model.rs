use std::sync::Arc;

use arcstr::ArcStr;
use derive_more::with_trait::Display;

use crate::{SchemaError, value::Value};

use super::{
    meta::{Argument, InterfaceMeta, MetaType, ObjectMeta, UnionMeta},
    registry::TypeMap,
};

/// Metadata for a schema
#[derive(Debug)]
pub struct SchemaType {
    types: TypeMap<Arc<MetaType>>,
    query_type: Arc<MetaType>,
    mutation_type: Option<Arc<MetaType>>,
    subscription_type: Option<Arc<MetaType>>,
    directives: TypeMap<DirectiveType>,
}

crate::sa::assert_impl_all!(SchemaType: Send, Sync);

/// Metadata for a directive
#[derive(Clone, Debug, PartialEq)]
pub struct DirectiveType {
    #[doc(hidden)]
    pub name: ArcStr,
    #[doc(hidden)]
    pub description: Option<ArcStr>,
    #[doc(hidden)]
    pub locations: Vec<DirectiveLocation>,
    #[doc(hidden)]
    pub arguments: Vec<Argument>,
}

/// Location a directive may be used at.
#[derive(Clone, Copy, Debug, Display, Eq, Hash, PartialEq)]
pub enum DirectiveLocation {
    #[display("QUERY")]
    Query,
    #[display("MUTATION")]
    Mutation,
    #[display("SUBSCRIPTION")]
    Subscription,
    #[display("FIELD")]
    Field,
    #[display("FRAGMENT_DEFINITION")]
    FragmentDefinition,
    #[display("FRAGMENT_SPREAD")]
    FragmentSpread,
    #[display("INLINE_FRAGMENT")]
    InlineFragment,
    #[display("VARIABLE_DEFINITION")]
    VariableDefinition,
    #[display("SCHEMA")]
    Schema,
    #[display("SCALAR")]
    Scalar,
    #[display("OBJECT")]
    Object,
    #[display("FIELD_DEFINITION")]
    FieldDefinition,
    #[display("ARGUMENT_DEFINITION")]
    ArgumentDefinition,
    #[display("INTERFACE")]
    Interface,
    #[display("UNION")]
    Union,
    #[display("ENUM")]
    Enum,
    #[display("ENUM_VALUE")]
    EnumValue,
    #[display("INPUT_OBJECT")]
    InputObject,
    #[display("INPUT_FIELD_DEFINITION")]
    InputFieldDefinition,
}

impl SchemaType {
    pub(crate) fn new(
        types: TypeMap<Arc<MetaType>>,
        query_type_name: &str,
        mutation_type_name: Option<&str>,
        subscription_type_name: Option<&str>,
        directives: Vec<DirectiveType>,
    ) -> Result<Self, SchemaError> {
        let root = |name: &str| match types.get(name) {
            Some(t) if matches!(**t, MetaType::Object(_)) => Ok(t.clone()),
            _ => Err(SchemaError::RootNotObject { name: name.into() }),
        };
        let query_type = root(query_type_name)?;
        let mutation_type = mutation_type_name.map(root).transpose()?;
        let subscription_type = subscription_type_name.map(root).transpose()?;

        Ok(Self {
            query_type,
            mutation_type,
            subscription_type,
            directives: directives
                .into_iter()
                .map(|d| (d.name.clone(), d))
                .collect(),
            types,
        })
    }

    /// Returns the named type of this schema, if any.
    pub fn type_by_name(&self, name: &str) -> Option<&Arc<MetaType>> {
        self.types.get(name)
    }

    /// Returns the root query type.
    pub fn query_type(&self) -> &Arc<MetaType> {
        &self.query_type
    }

    /// Returns the root mutation type, if any.
    pub fn mutation_type(&self) -> Option<&Arc<MetaType>> {
        self.mutation_type.as_ref()
    }

    /// Returns the root subscription type, if any.
    pub fn subscription_type(&self) -> Option<&Arc<MetaType>> {
        self.subscription_type.as_ref()
    }

    /// Returns all the named types of this schema, in registration order.
    pub fn type_list(&self) -> Vec<&Arc<MetaType>> {
        self.types.values().collect()
    }

    /// Returns all the directives of this schema.
    pub fn directive_list(&self) -> Vec<&DirectiveType> {
        self.directives.values().collect()
    }

    /// Returns the directive with the given `name`, if any.
    pub fn directive_by_name(&self, name: &str) -> Option<&DirectiveType> {
        self.directives.get(name)
    }

    /// Returns the concrete object types the `abstract_type` may resolve to.
    ///
    /// Empty for non-abstract types.
    pub fn possible_types(&self, abstract_type: &MetaType) -> Vec<&Arc<MetaType>> {
        match abstract_type {
            MetaType::Union(UnionMeta { of_type_names, .. }) => of_type_names
                .iter()
                .filter_map(|t| self.type_by_name(t))
                .collect(),
            MetaType::Interface(InterfaceMeta { name, .. }) => self
                .types
                .values()
                .filter(|t| match &***t {
                    MetaType::Object(ObjectMeta {
                        interface_names, ..
                    }) => interface_names.contains(name),
                    _ => false,
                })
                .collect(),
            _ => vec![],
        }
    }

    /// Checks whether the `possible_type` is one the `abstract_type` may
    /// resolve to.
    pub fn is_possible_type(&self, abstract_type: &MetaType, possible_type: &MetaType) -> bool {
        self.possible_types(abstract_type)
            .into_iter()
            .any(|t| t.name() == possible_type.name())
    }

    /// Resolves the concrete object type a `value` of the `abstract_type`
    /// belongs to.
    ///
    /// Unions ask their bound member resolver, interfaces try the `is_type_of`
    /// checks of their implementors in order. Object types resolve to
    /// themselves.
    pub fn resolve_abstract_type(
        &self,
        abstract_type: &MetaType,
        value: &Value,
    ) -> Option<&Arc<MetaType>> {
        match abstract_type {
            MetaType::Union(u) => u
                .resolve_type(value)
                .and_then(|name| self.type_by_name(&name)),
            MetaType::Interface(_) => self
                .possible_types(abstract_type)
                .into_iter()
                .find(|t| match &***t {
                    MetaType::Object(o) => o.check_type_of(value).unwrap_or(false),
                    _ => false,
                }),
            MetaType::Object(o) => self.type_by_name(&o.name),
            _ => None,
        }
    }
}

impl DirectiveType {
    /// Builds a new [`DirectiveType`] with the given `name`, valid at the
    /// given `locations`.
    pub fn new(name: ArcStr, locations: &[DirectiveLocation], arguments: Vec<Argument>) -> Self {
        Self {
            name,
            description: None,
            locations: locations.to_vec(),
            arguments,
        }
    }

    /// Sets the `description` of this [`DirectiveType`].
    #[must_use]
    pub fn description(mut self, description: Option<ArcStr>) -> Self {
        self.description = description;
        self
    }
}
