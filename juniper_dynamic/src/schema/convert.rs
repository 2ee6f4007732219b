//! Conversion of definitions into schema types.

use std::sync::Arc;

use arcstr::ArcStr;

use crate::{
    SchemaError,
    ast::Type,
    config::SchemaConfig,
    definition::{
        ArgumentDefinition, Definition, DefinitionKind, Definitions, DirectiveDefinition,
        FieldDefinition, TypeDefinition, TypeRef,
    },
    resolve::{self, ArgumentConverter, Resolver},
    util::is_valid_name,
    value::{Origin, Value},
};

use super::{
    meta::{
        Argument, DeprecationStatus, EnumMeta, EnumValue, Field, InputObjectMeta, InterfaceMeta,
        IsTypeOfFn, MetaType, ObjectMeta, ResolveTypeFn, UnionMeta,
    },
    model::DirectiveType,
    registry::Registry,
    scalars::ScalarResolver,
};

/// Converts [`Definitions`] into schema types, registering each named type
/// exactly once.
///
/// A named type is registered as an empty shell before anything it refers to
/// is converted, and populated afterwards, so cyclic definitions terminate.
pub struct Converter<'s> {
    definitions: Arc<Definitions>,
    config: SchemaConfig,
    scalars: &'s dyn ScalarResolver,
    arguments: Arc<ArgumentConverter>,
    registry: Registry,
}

impl<'s> Converter<'s> {
    /// Creates a new [`Converter`] of the given `definitions`.
    pub fn new(
        definitions: Arc<Definitions>,
        config: SchemaConfig,
        scalars: &'s dyn ScalarResolver,
    ) -> Self {
        Self {
            arguments: Arc::new(ArgumentConverter::new(definitions.clone(), config.clone())),
            definitions,
            config,
            scalars,
            registry: Registry::new(),
        }
    }

    /// Returns the [`Definitions`] being converted.
    pub fn definitions(&self) -> &Arc<Definitions> {
        &self.definitions
    }

    /// Returns the [`Registry`] of the types converted so far.
    pub fn registry(&self) -> &Registry {
        &self.registry
    }

    /// Consumes this [`Converter`] returning its [`Registry`].
    pub fn into_registry(self) -> Registry {
        self.registry
    }

    /// Returns the name a field or an argument is exposed under.
    ///
    /// # Errors
    ///
    /// If the resulting name isn't a valid GraphQL name.
    pub fn graphql_name(
        &self,
        declared: &str,
        graphql_name: Option<&str>,
    ) -> Result<ArcStr, SchemaError> {
        let name = ArcStr::from(self.config.exposed_name(declared, graphql_name));
        if is_valid_name(&name) {
            Ok(name)
        } else {
            Err(SchemaError::InvalidName { name })
        }
    }

    /// Converts the `type_ref` into a schema [`Type`], registering every
    /// named type it reaches.
    ///
    /// # Errors
    ///
    /// - [`SchemaError::UnexpectedType`] if the `type_ref` names no definition
    ///   of its kind, or wraps a non-null type into a non-null one.
    /// - [`SchemaError::DuplicateTypeName`] if two distinct definitions share
    ///   a name.
    /// - [`SchemaError::InvalidUnionMember`] if a union has a non-object
    ///   member.
    pub fn convert(&mut self, type_ref: &TypeRef) -> Result<Type, SchemaError> {
        match type_ref {
            TypeRef::Object(name) => self.from_object_type(name),
            TypeRef::Input(name) => self.from_input_object_type(name),
            TypeRef::Interface(name) => self.from_interface(name),
            TypeRef::Enum(name) => self.from_enum(name),
            TypeRef::Union(name) => self.from_union(name),
            TypeRef::Scalar(marker) => self.scalars.resolve(marker, &mut self.registry),
            TypeRef::List(of_type) => Ok(Type::list(self.convert(of_type)?)),
            TypeRef::NonNull(of_type) => {
                let ty = self.convert(of_type)?;
                if ty.is_non_null() {
                    return Err(SchemaError::UnexpectedType {
                        type_ref: type_ref.to_string(),
                    });
                }
                Ok(ty.into_non_null())
            }
        }
    }

    /// Converts the type of a field, making it non-null unless optional.
    ///
    /// # Errors
    ///
    /// See [`Converter::convert()`].
    pub fn convert_field_type(
        &mut self,
        type_ref: &TypeRef,
        is_optional: bool,
    ) -> Result<Type, SchemaError> {
        let ty = self.convert(type_ref)?;
        Ok(if is_optional { ty } else { ty.into_non_null() })
    }

    /// Converts an argument of a field or a directive.
    ///
    /// # Errors
    ///
    /// See [`Converter::convert()`].
    pub fn convert_argument(&mut self, arg: &ArgumentDefinition) -> Result<Argument, SchemaError> {
        Ok(Argument {
            name: self.graphql_name(&arg.name, arg.graphql_name.as_deref())?,
            description: arg.description.clone(),
            arg_type: self.convert_field_type(&arg.type_ref, arg.is_optional)?,
            default_value: arg.default.to_schema_default(),
        })
    }

    /// Converts a directive.
    ///
    /// # Errors
    ///
    /// If the directive's name is invalid, or any of its arguments fails to
    /// convert.
    pub fn convert_directive(
        &mut self,
        directive: &DirectiveDefinition,
    ) -> Result<DirectiveType, SchemaError> {
        if !is_valid_name(&directive.name) {
            return Err(SchemaError::InvalidName {
                name: directive.name.clone(),
            });
        }
        let arguments = directive
            .arguments
            .iter()
            .map(|a| self.convert_argument(a))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(
            DirectiveType::new(directive.name.clone(), &directive.locations, arguments)
                .description(directive.description.clone()),
        )
    }

    /// Returns the composite definition named `name`, if it's of the
    /// `expected` kind.
    fn type_definition(
        &self,
        name: &ArcStr,
        expected: DefinitionKind,
        type_ref: impl FnOnce() -> TypeRef,
    ) -> Result<Arc<TypeDefinition>, SchemaError> {
        match self.definitions.type_definition(name) {
            Some(def) if def.kind == expected => Ok(def.clone()),
            _ => Err(SchemaError::UnexpectedType {
                type_ref: type_ref().to_string(),
            }),
        }
    }

    /// Checks whether the `definition` is registered already.
    fn is_registered(&self, definition: &Definition) -> Result<bool, SchemaError> {
        match self.registry.lookup(definition.name()) {
            None => Ok(false),
            Some(t) if t.definition.is_same(definition) => Ok(true),
            Some(_) => Err(SchemaError::DuplicateTypeName {
                name: definition.name().clone(),
            }),
        }
    }

    fn from_object_type(&mut self, name: &ArcStr) -> Result<Type, SchemaError> {
        let def = self.type_definition(name, DefinitionKind::Object, || {
            TypeRef::Object(name.clone())
        })?;
        let definition = Definition::Type(def.clone());
        if self.is_registered(&definition)? {
            return Ok(Type::named(def.name.clone()));
        }

        let is_type_of = (!def.interfaces.is_empty()).then(|| {
            let origin = def.origin;
            Arc::new(move |v: &Value| is_instance_of(v, origin)) as IsTypeOfFn
        });
        let shell = ObjectMeta::new(def.name.clone())
            .description(def.description.clone())
            .is_type_of(is_type_of);
        self.registry
            .insert(def.name.clone(), definition, shell.into_meta())?;

        let interface_names = self.interface_names(&def)?;
        let fields = self.fields(&def)?;
        if let Some(MetaType::Object(meta)) = self.registry.node_mut(&def.name) {
            meta.interface_names = interface_names;
            meta.fields = fields;
        }
        Ok(Type::named(def.name.clone()))
    }

    fn from_interface(&mut self, name: &ArcStr) -> Result<Type, SchemaError> {
        let def = self.type_definition(name, DefinitionKind::Interface, || {
            TypeRef::Interface(name.clone())
        })?;
        let definition = Definition::Type(def.clone());
        if self.is_registered(&definition)? {
            return Ok(Type::named(def.name.clone()));
        }

        let shell = InterfaceMeta::new(def.name.clone()).description(def.description.clone());
        self.registry
            .insert(def.name.clone(), definition, shell.into_meta())?;

        let interface_names = self.interface_names(&def)?;
        let fields = self.fields(&def)?;
        if let Some(MetaType::Interface(meta)) = self.registry.node_mut(&def.name) {
            meta.interface_names = interface_names;
            meta.fields = fields;
        }
        Ok(Type::named(def.name.clone()))
    }

    fn from_input_object_type(&mut self, name: &ArcStr) -> Result<Type, SchemaError> {
        let def = self.type_definition(name, DefinitionKind::Input, || {
            TypeRef::Input(name.clone())
        })?;
        let definition = Definition::Type(def.clone());
        if self.is_registered(&definition)? {
            return Ok(Type::named(def.name.clone()));
        }

        let shell = InputObjectMeta::new(def.name.clone()).description(def.description.clone());
        self.registry
            .insert(def.name.clone(), definition, shell.into_meta())?;

        let input_fields = def
            .fields
            .iter()
            .map(|f| self.input_field(f))
            .collect::<Result<Vec<_>, _>>()?;
        if let Some(MetaType::InputObject(meta)) = self.registry.node_mut(&def.name) {
            meta.input_fields = input_fields;
        }
        Ok(Type::named(def.name.clone()))
    }

    fn from_enum(&mut self, name: &ArcStr) -> Result<Type, SchemaError> {
        let Some(def) = self.definitions.enum_definition(name).cloned() else {
            return Err(SchemaError::UnexpectedType {
                type_ref: TypeRef::Enum(name.clone()).to_string(),
            });
        };
        let definition = Definition::Enum(def.clone());
        if self.is_registered(&definition)? {
            return Ok(Type::named(def.name.clone()));
        }

        let values = def
            .values
            .iter()
            .map(|v| {
                if !is_valid_name(&v.name) {
                    return Err(SchemaError::InvalidName {
                        name: v.name.clone(),
                    });
                }
                Ok(EnumValue {
                    name: v.name.clone(),
                    value: v.value.clone(),
                    description: v.description.clone(),
                    deprecation_status: v.deprecation_reason.clone().into(),
                })
            })
            .collect::<Result<Vec<_>, _>>()?;
        let meta = EnumMeta::new(def.name.clone(), values).description(def.description.clone());
        self.registry
            .insert(def.name.clone(), definition, meta.into_meta())?;
        Ok(Type::named(def.name.clone()))
    }

    fn from_union(&mut self, name: &ArcStr) -> Result<Type, SchemaError> {
        let Some(def) = self.definitions.union_definition(name).cloned() else {
            return Err(SchemaError::UnexpectedType {
                type_ref: TypeRef::Union(name.clone()).to_string(),
            });
        };
        let definition = Definition::Union(def.clone());
        if self.is_registered(&definition)? {
            return Ok(Type::named(def.name.clone()));
        }

        let shell = UnionMeta::new(def.name.clone()).description(def.description.clone());
        self.registry
            .insert(def.name.clone(), definition, shell.into_meta())?;

        let mut members = Vec::with_capacity(def.types.len());
        for member in &def.types {
            let member_def = match self.definitions.get(member) {
                Some(Definition::Type(d)) if d.kind == DefinitionKind::Object => d.clone(),
                Some(_) => {
                    return Err(SchemaError::InvalidUnionMember {
                        union: def.name.clone(),
                        member: member.clone(),
                    });
                }
                None => {
                    return Err(SchemaError::UnexpectedType {
                        type_ref: TypeRef::Object(member.clone()).to_string(),
                    });
                }
            };
            self.from_object_type(member)?;
            members.push((member_def.name.clone(), member_def.origin));
        }

        let of_type_names = members.iter().map(|(n, _)| n.clone()).collect::<Vec<_>>();
        let resolve_type: ResolveTypeFn = match def.type_resolver.clone() {
            Some(resolver) => {
                let names = of_type_names.clone();
                Arc::new(move |v: &Value| resolver(v).filter(|n| names.contains(n)))
            }
            None => Arc::new(move |v: &Value| {
                members
                    .iter()
                    .find(|(_, origin)| is_instance_of(v, *origin))
                    .map(|(n, _)| n.clone())
            }),
        };
        if let Some(MetaType::Union(meta)) = self.registry.node_mut(&def.name) {
            meta.of_type_names = of_type_names;
            meta.resolve_type = resolve_type;
        }
        Ok(Type::named(def.name.clone()))
    }

    fn interface_names(&mut self, def: &TypeDefinition) -> Result<Vec<ArcStr>, SchemaError> {
        def.interfaces
            .iter()
            .map(|i| self.from_interface(i).map(|t| t.innermost_name().clone()))
            .collect()
    }

    fn fields(&mut self, def: &TypeDefinition) -> Result<Vec<Field>, SchemaError> {
        def.fields.iter().map(|f| self.field(f)).collect()
    }

    fn field(&mut self, field: &Arc<FieldDefinition>) -> Result<Field, SchemaError> {
        let name = self.graphql_name(&field.name, field.graphql_name.as_deref())?;
        let field_type = self.convert_field_type(&field.type_ref, field.is_optional)?;
        let arguments = field
            .arguments
            .iter()
            .map(|a| self.convert_argument(a))
            .collect::<Result<Vec<_>, _>>()?;

        let resolver = resolve::from_field(field.clone(), self.arguments.clone());
        let (resolve, subscribe) = if field.is_subscription {
            (Resolver::identity(), Some(resolver))
        } else {
            (resolver, None)
        };

        Ok(Field {
            name,
            description: field.description.clone(),
            arguments,
            field_type,
            deprecation_status: DeprecationStatus::from(field.deprecation_reason.clone()),
            resolve,
            subscribe,
        })
    }

    fn input_field(&mut self, field: &FieldDefinition) -> Result<Argument, SchemaError> {
        Ok(Argument {
            name: self.graphql_name(&field.name, field.graphql_name.as_deref())?,
            description: field.description.clone(),
            arg_type: self.convert_field_type(&field.type_ref, field.is_optional)?,
            default_value: field.default_value.to_schema_default(),
        })
    }
}

fn is_instance_of(value: &Value, origin: Origin) -> bool {
    value
        .as_object_value()
        .is_some_and(|o| o.is_instance_of(origin))
}
