use std::collections::BTreeMap;

use graphql_parser::{
    Pos,
    query::{Directive as ExternalDirective, Number as ExternalNumber, Type as ExternalType},
    schema::{
        Definition, DirectiveDefinition as ExternalDirectiveDefinition, Document,
        EnumType as ExternalEnum, EnumValue as ExternalEnumValue, Field as ExternalField,
        InputObjectType as ExternalInputObjectType, InputValue as ExternalInputValue,
        InterfaceType as ExternalInterfaceType, ObjectType as ExternalObjectType,
        ScalarType as ExternalScalarType, SchemaDefinition, TypeDefinition as ExternalTypeDefinition,
        UnionType as ExternalUnionType, Value as ExternalValue,
    },
};

use crate::{
    ast::Type,
    schema::{
        meta::{Argument, DeprecationStatus, EnumValue, Field, MetaType},
        model::{DirectiveType, SchemaType},
        translate::SchemaTranslator,
    },
    value::{ScalarValue, Value},
};

/// Directives every schema has, so they're not printed.
const SPECIFIED_DIRECTIVES: [&str; 4] = ["include", "skip", "deprecated", "specifiedBy"];

/// [`SchemaTranslator`] into a [`graphql_parser`] schema [`Document`].
pub struct GraphQLParserTranslator;

impl<'a> From<&'a SchemaType> for Document<'a, String> {
    fn from(input: &'a SchemaType) -> Self {
        GraphQLParserTranslator::translate_schema(input)
    }
}

impl SchemaType {
    /// Returns this [`SchemaType`] as a [`graphql_parser`] schema
    /// [`Document`].
    pub fn as_document(&self) -> Document<'_, String> {
        GraphQLParserTranslator::translate_schema(self)
    }

    /// Returns this [`SchemaType`] in the GraphQL schema definition language.
    pub fn as_sdl(&self) -> String {
        self.as_document().to_string()
    }
}

impl<'a> SchemaTranslator<'a, Document<'a, String>> for GraphQLParserTranslator {
    fn translate_schema(input: &'a SchemaType) -> Document<'a, String> {
        let mut doc = Document::default();

        doc.definitions.push(Definition::SchemaDefinition(SchemaDefinition {
            position: Pos::default(),
            directives: vec![],
            query: Some(input.query_type().name().to_string()),
            mutation: input.mutation_type().map(|t| t.name().to_string()),
            subscription: input.subscription_type().map(|t| t.name().to_string()),
        }));

        doc.definitions.extend(
            input
                .directive_list()
                .into_iter()
                .filter(|d| !SPECIFIED_DIRECTIVES.contains(&d.name.as_str()))
                .map(|d| Definition::DirectiveDefinition(Self::translate_directive(d))),
        );

        doc.definitions.extend(
            input
                .type_list()
                .into_iter()
                .filter(|meta| !meta.is_builtin())
                .map(|meta| Definition::TypeDefinition(Self::translate_meta(meta))),
        );

        doc
    }
}

impl GraphQLParserTranslator {
    fn translate_directive<'a>(input: &DirectiveType) -> ExternalDirectiveDefinition<'a, String> {
        ExternalDirectiveDefinition {
            position: Pos::default(),
            description: input.description.as_ref().map(ToString::to_string),
            name: input.name.to_string(),
            arguments: input
                .arguments
                .iter()
                .map(Self::translate_argument)
                .collect(),
            repeatable: false,
            locations: input
                .locations
                .iter()
                .filter_map(|l| l.to_string().parse().ok())
                .collect(),
        }
    }

    fn translate_argument<'a>(input: &Argument) -> ExternalInputValue<'a, String> {
        ExternalInputValue {
            position: Pos::default(),
            description: input.description.as_ref().map(ToString::to_string),
            name: input.name.to_string(),
            value_type: Self::translate_type(&input.arg_type),
            default_value: input.default_value.as_ref().map(Self::translate_value),
            directives: vec![],
        }
    }

    fn translate_value<'a>(input: &Value) -> ExternalValue<'a, String> {
        match input {
            Value::Null => ExternalValue::Null,
            Value::Scalar(s) => match s {
                ScalarValue::Int(i) => ExternalValue::Int(ExternalNumber::from(*i)),
                ScalarValue::Float(f) => ExternalValue::Float(*f),
                ScalarValue::String(s) => ExternalValue::String(s.clone()),
                ScalarValue::Boolean(b) => ExternalValue::Boolean(*b),
            },
            Value::Enum(m) => ExternalValue::Enum(m.name.to_string()),
            Value::List(l) => ExternalValue::List(l.iter().map(Self::translate_value).collect()),
            Value::Object(o) => ExternalValue::Object(
                o.iter()
                    .map(|(k, v)| (k.to_string(), Self::translate_value(v)))
                    .collect::<BTreeMap<_, _>>(),
            ),
        }
    }

    fn translate_type<'a>(input: &Type) -> ExternalType<'a, String> {
        match input {
            Type::Named(x) => ExternalType::NamedType(x.to_string()),
            Type::List(x) => ExternalType::ListType(Box::new(Self::translate_type(x))),
            Type::NonNullNamed(x) => {
                ExternalType::NonNullType(Box::new(ExternalType::NamedType(x.to_string())))
            }
            Type::NonNullList(x) => ExternalType::NonNullType(Box::new(ExternalType::ListType(
                Box::new(Self::translate_type(x)),
            ))),
        }
    }

    fn translate_meta<'a>(input: &MetaType) -> ExternalTypeDefinition<'a, String> {
        match input {
            MetaType::Scalar(x) => ExternalTypeDefinition::Scalar(ExternalScalarType {
                position: Pos::default(),
                description: x.description.as_ref().map(ToString::to_string),
                name: x.name.to_string(),
                directives: x
                    .specified_by_url
                    .as_ref()
                    .map(|url| {
                        vec![ExternalDirective {
                            position: Pos::default(),
                            name: "specifiedBy".into(),
                            arguments: vec![("url".into(), ExternalValue::String(url.to_string()))],
                        }]
                    })
                    .unwrap_or_default(),
            }),
            MetaType::Enum(x) => ExternalTypeDefinition::Enum(ExternalEnum {
                position: Pos::default(),
                description: x.description.as_ref().map(ToString::to_string),
                name: x.name.to_string(),
                directives: vec![],
                values: x.values.iter().map(Self::translate_enum_value).collect(),
            }),
            MetaType::Union(x) => ExternalTypeDefinition::Union(ExternalUnionType {
                position: Pos::default(),
                description: x.description.as_ref().map(ToString::to_string),
                name: x.name.to_string(),
                directives: vec![],
                types: x.of_type_names.iter().map(ToString::to_string).collect(),
            }),
            MetaType::Interface(x) => ExternalTypeDefinition::Interface(ExternalInterfaceType {
                position: Pos::default(),
                description: x.description.as_ref().map(ToString::to_string),
                name: x.name.to_string(),
                implements_interfaces: x.interface_names.iter().map(ToString::to_string).collect(),
                directives: vec![],
                fields: x
                    .fields
                    .iter()
                    .filter(|f| !f.is_builtin())
                    .map(Self::translate_field)
                    .collect(),
            }),
            MetaType::InputObject(x) => {
                ExternalTypeDefinition::InputObject(ExternalInputObjectType {
                    position: Pos::default(),
                    description: x.description.as_ref().map(ToString::to_string),
                    name: x.name.to_string(),
                    directives: vec![],
                    fields: x
                        .input_fields
                        .iter()
                        .map(Self::translate_argument)
                        .collect(),
                })
            }
            MetaType::Object(x) => ExternalTypeDefinition::Object(ExternalObjectType {
                position: Pos::default(),
                description: x.description.as_ref().map(ToString::to_string),
                name: x.name.to_string(),
                directives: vec![],
                fields: x
                    .fields
                    .iter()
                    .filter(|f| !f.is_builtin())
                    .map(Self::translate_field)
                    .collect(),
                implements_interfaces: x.interface_names.iter().map(ToString::to_string).collect(),
            }),
        }
    }

    fn translate_enum_value<'a>(input: &EnumValue) -> ExternalEnumValue<'a, String> {
        ExternalEnumValue {
            position: Pos::default(),
            name: input.name.to_string(),
            description: input.description.as_ref().map(ToString::to_string),
            directives: generate_directives(&input.deprecation_status),
        }
    }

    fn translate_field<'a>(input: &Field) -> ExternalField<'a, String> {
        ExternalField {
            position: Pos::default(),
            name: input.name.to_string(),
            description: input.description.as_ref().map(ToString::to_string),
            directives: generate_directives(&input.deprecation_status),
            field_type: Self::translate_type(&input.field_type),
            arguments: input
                .arguments
                .iter()
                .map(Self::translate_argument)
                .collect(),
        }
    }
}

fn deprecation_to_directive<'a>(status: &DeprecationStatus) -> Option<ExternalDirective<'a, String>> {
    match status {
        DeprecationStatus::Current => None,
        DeprecationStatus::Deprecated(reason) => Some(ExternalDirective {
            position: Pos::default(),
            name: "deprecated".into(),
            arguments: reason
                .iter()
                .map(|rsn| ("reason".into(), ExternalValue::String(rsn.to_string())))
                .collect(),
        }),
    }
}

// Right now the only directive printed on fields and enum values is `@deprecated`.
fn generate_directives<'a>(status: &DeprecationStatus) -> Vec<ExternalDirective<'a, String>> {
    deprecation_to_directive(status).into_iter().collect()
}
