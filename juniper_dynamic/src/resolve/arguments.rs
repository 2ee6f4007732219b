use std::sync::Arc;

use arcstr::ArcStr;
use indexmap::IndexMap;

use crate::{
    config::SchemaConfig,
    definition::{ArgumentDefinition, Definitions, TypeRef},
    value::{Object, ScalarValue, Value},
};

use super::{FieldError, FieldResult};

/// Field arguments, keyed by their exposed names, as supplied by an
/// execution engine.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Arguments {
    args: IndexMap<ArcStr, Value>,
}

impl Arguments {
    /// Creates empty [`Arguments`].
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds an argument in a builder fashion.
    #[must_use]
    pub fn arg(mut self, name: impl Into<ArcStr>, value: impl Into<Value>) -> Self {
        self.args.insert(name.into(), value.into());
        self
    }

    /// Returns the value of the argument named `name`, if supplied.
    pub fn get(&self, name: &str) -> Option<&Value> {
        self.args.get(name)
    }

    /// Iterates over the supplied arguments.
    pub fn iter(&self) -> impl Iterator<Item = (&ArcStr, &Value)> {
        self.args.iter()
    }

    /// Number of the supplied arguments.
    pub fn len(&self) -> usize {
        self.args.len()
    }

    /// Whether no arguments were supplied.
    pub fn is_empty(&self) -> bool {
        self.args.is_empty()
    }
}

impl<K: Into<ArcStr>, V: Into<Value>> FromIterator<(K, V)> for Arguments {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            args: iter
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }
}

/// Converts engine-supplied [`Arguments`] into the shapes a resolver
/// declares.
#[derive(Debug)]
pub(crate) struct ArgumentConverter {
    definitions: Arc<Definitions>,
    config: SchemaConfig,
}

impl ArgumentConverter {
    pub(crate) fn new(definitions: Arc<Definitions>, config: SchemaConfig) -> Self {
        Self {
            definitions,
            config,
        }
    }

    /// Re-keys the supplied `args` from exposed to declared names, converting
    /// each value into its declared type.
    ///
    /// Arguments not supplied are omitted.
    pub(crate) fn convert_arguments(
        &self,
        args: &Arguments,
        declared: &[ArgumentDefinition],
    ) -> FieldResult<IndexMap<ArcStr, Value>> {
        let mut converted = IndexMap::with_capacity(declared.len());
        for arg in declared {
            let exposed = self
                .config
                .exposed_name(&arg.name, arg.graphql_name.as_deref());
            if let Some(value) = args.get(&exposed) {
                converted.insert(arg.name.clone(), self.convert_value(value, &arg.type_ref)?);
            }
        }
        Ok(converted)
    }

    fn convert_value(&self, value: &Value, type_ref: &TypeRef) -> FieldResult<Value> {
        if value.is_null() {
            return Ok(Value::Null);
        }
        match type_ref {
            TypeRef::NonNull(of_type) => self.convert_value(value, of_type),
            TypeRef::List(of_type) => match value {
                Value::List(items) => items
                    .iter()
                    .map(|item| self.convert_value(item, of_type))
                    .collect::<FieldResult<Vec<_>>>()
                    .map(Value::List),
                single => Ok(Value::List(vec![self.convert_value(single, of_type)?])),
            },
            TypeRef::Input(name) => self.convert_input_object(value, name),
            TypeRef::Enum(name) => self.convert_enum(value, name),
            TypeRef::Object(_)
            | TypeRef::Interface(_)
            | TypeRef::Union(_)
            | TypeRef::Scalar(_) => Ok(value.clone()),
        }
    }

    fn convert_input_object(&self, value: &Value, name: &str) -> FieldResult<Value> {
        let def = self
            .definitions
            .type_definition(name)
            .ok_or_else(|| format!("Unknown input type `{name}`"))?;
        let obj = value
            .as_object_value()
            .ok_or_else(|| format!("Expected `{name}` input object, found: {value}"))?;

        let mut converted = Object::with_capacity(def.fields.len()).with_origin(def.origin);
        for field in &def.fields {
            let exposed = self
                .config
                .exposed_name(&field.name, field.graphql_name.as_deref());
            match obj.get_field_value(&exposed) {
                Some(v) => {
                    converted.add_field(field.name.clone(), self.convert_value(v, &field.type_ref)?);
                }
                None => {
                    if let Some(default) = field.default_value.to_schema_default() {
                        converted.add_field(field.name.clone(), default);
                    }
                }
            }
        }
        Ok(converted.into())
    }

    fn convert_enum(&self, value: &Value, name: &str) -> FieldResult<Value> {
        let def = self
            .definitions
            .enum_definition(name)
            .ok_or_else(|| format!("Unknown enum type `{name}`"))?;
        match value {
            Value::Enum(_) => Ok(value.clone()),
            Value::Scalar(ScalarValue::String(member)) => def
                .instance(member)
                .map(Into::into)
                .ok_or_else(|| {
                    FieldError::from(format!("Enum `{name}` has no member `{member}`"))
                }),
            other => Err(format!("Expected `{name}` enum member, found: {other}").into()),
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use pretty_assertions::assert_eq;

    use crate::{
        config::SchemaConfig,
        definition::{
            ArgumentDefinition, DefaultValue, Definitions, EnumDefinition, FieldDefinition,
            ScalarMarker, TypeDefinition, TypeRef,
        },
        value::{EnumMember, Object, Origin, Value},
    };

    use super::{ArgumentConverter, Arguments};

    struct Filter;

    fn converter() -> ArgumentConverter {
        let defs = Definitions::new()
            .with(EnumDefinition::new("Color").value("RED", 1).value("GREEN", 2))
            .and_then(|d| {
                d.with(
                    TypeDefinition::input("Filter", Origin::of::<Filter>())
                        .field(FieldDefinition::new("name_prefix", ScalarMarker::String))
                        .field(
                            FieldDefinition::new("limit", ScalarMarker::Int)
                                .default_value(Value::scalar(10)),
                        )
                        .field(
                            FieldDefinition::new("offset", ScalarMarker::Int)
                                .optional()
                                .default_value(DefaultValue::Undefined),
                        ),
                )
            })
            .unwrap();
        ArgumentConverter::new(Arc::new(defs), SchemaConfig::default())
    }

    #[test]
    fn rekeys_by_declared_names() {
        let declared = [
            ArgumentDefinition::new("first_name", ScalarMarker::String),
            ArgumentDefinition::new("age", ScalarMarker::Int).optional(),
        ];
        let args = Arguments::new().arg("firstName", "Luke");

        let converted = converter().convert_arguments(&args, &declared).unwrap();

        assert_eq!(converted.len(), 1);
        assert_eq!(converted.get("first_name"), Some(&Value::scalar("Luke")));
    }

    #[test]
    fn instantiates_input_objects() {
        let declared = [ArgumentDefinition::new("filter", TypeRef::input("Filter"))];
        let args = Arguments::new().arg(
            "filter",
            Object::from_iter([("namePrefix", Value::scalar("Sky"))]),
        );

        let converted = converter().convert_arguments(&args, &declared).unwrap();
        let filter = converted["filter"].as_object_value().unwrap();

        assert!(filter.is_instance_of(Origin::of::<Filter>()));
        assert_eq!(
            filter.get_field_value("name_prefix"),
            Some(&Value::scalar("Sky")),
        );
        assert_eq!(filter.get_field_value("limit"), Some(&Value::scalar(10)));
        assert!(!filter.contains_field("offset"));
    }

    #[test]
    fn converts_enum_names_in_lists() {
        let declared = [ArgumentDefinition::new(
            "colors",
            TypeRef::list(TypeRef::enumeration("Color")),
        )];
        let args = Arguments::new().arg(
            "colors",
            Value::list(vec![Value::scalar("GREEN"), Value::Null]),
        );

        let converted = converter().convert_arguments(&args, &declared).unwrap();

        assert_eq!(
            converted["colors"],
            Value::list(vec![
                EnumMember::new("Color", "GREEN", Value::scalar(2)).into(),
                Value::Null,
            ]),
        );
    }

    #[test]
    fn rejects_unknown_enum_members() {
        let declared = [ArgumentDefinition::new("color", TypeRef::enumeration("Color"))];
        let args = Arguments::new().arg("color", "BLUE");

        let err = converter()
            .convert_arguments(&args, &declared)
            .unwrap_err();

        assert_eq!(err.message(), "Enum `Color` has no member `BLUE`");
    }
}
