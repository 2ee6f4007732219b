//! Leaf type resolution.

use std::sync::{Arc, LazyLock};

use crate::{
    SchemaError,
    ast::Type,
    definition::{Definition, ScalarDefinition, ScalarMarker},
    resolve::FieldResult,
    value::{ScalarValue, Value},
};

use super::{meta::ScalarMeta, registry::Registry};

/// Maps [`ScalarMarker`]s to scalar types, registering them on first use.
pub trait ScalarResolver: Send + Sync {
    /// Resolves the `marker` into a scalar [`Type`].
    ///
    /// # Errors
    ///
    /// If the scalar's name is taken by another type.
    fn resolve(&self, marker: &ScalarMarker, registry: &mut Registry) -> Result<Type, SchemaError>;
}

/// [`ScalarResolver`] providing the built-in `Int`, `Float`, `String`,
/// `Boolean` and `ID` scalars, and registering custom ones as declared.
#[derive(Clone, Copy, Debug, Default)]
pub struct BuiltinScalars;

static INT: LazyLock<Arc<ScalarDefinition>> = LazyLock::new(|| {
    Arc::new(
        ScalarDefinition::new("Int")
            .description(
                "The `Int` scalar type represents non-fractional signed whole numeric values. \
                 Int can represent values between -(2^31) and 2^31 - 1.",
            )
            .serialize(serialize_int)
            .parse_value(parse_int)
            .parse_literal(parse_int),
    )
});

static FLOAT: LazyLock<Arc<ScalarDefinition>> = LazyLock::new(|| {
    Arc::new(
        ScalarDefinition::new("Float")
            .description(
                "The `Float` scalar type represents signed double-precision fractional values \
                 as specified by [IEEE 754](https://en.wikipedia.org/wiki/IEEE_floating_point).",
            )
            .serialize(serialize_float)
            .parse_value(parse_float)
            .parse_literal(parse_float),
    )
});

static STRING: LazyLock<Arc<ScalarDefinition>> = LazyLock::new(|| {
    Arc::new(
        ScalarDefinition::new("String")
            .description(
                "The `String` scalar type represents textual data, represented as UTF-8 \
                 character sequences.",
            )
            .serialize(serialize_string)
            .parse_value(parse_string)
            .parse_literal(parse_string),
    )
});

static BOOLEAN: LazyLock<Arc<ScalarDefinition>> = LazyLock::new(|| {
    Arc::new(
        ScalarDefinition::new("Boolean")
            .description("The `Boolean` scalar type represents `true` or `false`.")
            .serialize(serialize_boolean)
            .parse_value(parse_boolean)
            .parse_literal(parse_boolean),
    )
});

static ID: LazyLock<Arc<ScalarDefinition>> = LazyLock::new(|| {
    Arc::new(
        ScalarDefinition::new("ID")
            .description(
                "The `ID` scalar type represents a unique identifier, often used to refetch an \
                 object or as key for a cache.",
            )
            .serialize(serialize_id)
            .parse_value(parse_id)
            .parse_literal(parse_id),
    )
});

impl BuiltinScalars {
    /// Returns the [`ScalarDefinition`] the `marker` stands for.
    pub fn definition(marker: &ScalarMarker) -> Arc<ScalarDefinition> {
        match marker {
            ScalarMarker::Int => INT.clone(),
            ScalarMarker::Float => FLOAT.clone(),
            ScalarMarker::String => STRING.clone(),
            ScalarMarker::Boolean => BOOLEAN.clone(),
            ScalarMarker::Id => ID.clone(),
            ScalarMarker::Custom(def) => def.clone(),
        }
    }
}

impl ScalarResolver for BuiltinScalars {
    fn resolve(&self, marker: &ScalarMarker, registry: &mut Registry) -> Result<Type, SchemaError> {
        let def = Self::definition(marker);
        let definition = Definition::Scalar(def.clone());

        if let Some(existing) = registry.lookup(&def.name) {
            return if existing.definition.is_same(&definition) {
                Ok(Type::named(def.name.clone()))
            } else {
                Err(SchemaError::DuplicateTypeName {
                    name: def.name.clone(),
                })
            };
        }

        let meta = ScalarMeta::new(def.name.clone())
            .description(def.description.clone())
            .specified_by_url(def.specified_by_url.clone())
            .conversions(
                def.serialize.clone(),
                def.parse_value.clone(),
                def.parse_literal.clone(),
            );
        registry.insert(def.name.clone(), definition, meta.into_meta())?;
        Ok(Type::named(def.name.clone()))
    }
}

fn serialize_int(v: &Value) -> FieldResult<Value> {
    let int = match v.as_scalar() {
        Some(ScalarValue::Int(i)) => Some(*i),
        Some(ScalarValue::Float(f))
            if f.fract() == 0.0 && *f >= f64::from(i32::MIN) && *f <= f64::from(i32::MAX) =>
        {
            Some(*f as i32)
        }
        Some(ScalarValue::Boolean(b)) => Some(i32::from(*b)),
        Some(ScalarValue::String(s)) => s.parse().ok(),
        _ => None,
    };
    int.map(Value::scalar)
        .ok_or_else(|| format!("Int cannot represent non-integer value: {v}").into())
}

fn parse_int(v: &Value) -> FieldResult<Value> {
    match v.as_scalar() {
        Some(ScalarValue::Int(_)) => Ok(v.clone()),
        _ => Err(format!("Int cannot represent non-integer value: {v}").into()),
    }
}

fn serialize_float(v: &Value) -> FieldResult<Value> {
    let float = match v.as_scalar() {
        Some(ScalarValue::Boolean(b)) => Some(if *b { 1.0 } else { 0.0 }),
        Some(ScalarValue::String(s)) => s.parse().ok(),
        Some(s) => s.as_float(),
        None => None,
    };
    float
        .filter(|f: &f64| f.is_finite())
        .map(Value::scalar)
        .ok_or_else(|| format!("Float cannot represent non numeric value: {v}").into())
}

fn parse_float(v: &Value) -> FieldResult<Value> {
    v.as_scalar()
        .and_then(ScalarValue::as_float)
        .map(Value::scalar)
        .ok_or_else(|| format!("Float cannot represent non numeric value: {v}").into())
}

fn serialize_string(v: &Value) -> FieldResult<Value> {
    match v.as_scalar() {
        Some(ScalarValue::String(_)) => Ok(v.clone()),
        Some(ScalarValue::Int(i)) => Ok(Value::scalar(i.to_string())),
        Some(ScalarValue::Float(f)) => Ok(Value::scalar(f.to_string())),
        Some(ScalarValue::Boolean(b)) => Ok(Value::scalar(b.to_string())),
        None => Err(format!("String cannot represent value: {v}").into()),
    }
}

fn parse_string(v: &Value) -> FieldResult<Value> {
    match v.as_scalar() {
        Some(ScalarValue::String(_)) => Ok(v.clone()),
        _ => Err(format!("String cannot represent a non string value: {v}").into()),
    }
}

fn serialize_boolean(v: &Value) -> FieldResult<Value> {
    match v.as_scalar() {
        Some(ScalarValue::Boolean(_)) => Ok(v.clone()),
        Some(s @ (ScalarValue::Int(_) | ScalarValue::Float(_))) => {
            Ok(Value::scalar(s.as_float().is_some_and(|f| f != 0.0)))
        }
        _ => Err(format!("Boolean cannot represent a non boolean value: {v}").into()),
    }
}

fn parse_boolean(v: &Value) -> FieldResult<Value> {
    match v.as_scalar() {
        Some(ScalarValue::Boolean(_)) => Ok(v.clone()),
        _ => Err(format!("Boolean cannot represent a non boolean value: {v}").into()),
    }
}

fn serialize_id(v: &Value) -> FieldResult<Value> {
    match v.as_scalar() {
        Some(ScalarValue::String(_)) => Ok(v.clone()),
        Some(ScalarValue::Int(i)) => Ok(Value::scalar(i.to_string())),
        _ => Err(format!("ID cannot represent value: {v}").into()),
    }
}

fn parse_id(v: &Value) -> FieldResult<Value> {
    serialize_id(v)
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use pretty_assertions::assert_eq;

    use crate::{
        SchemaError,
        ast::Type,
        definition::{ScalarDefinition, ScalarMarker},
        schema::{meta::MetaType, registry::Registry},
        value::Value,
    };

    use super::{BuiltinScalars, ScalarResolver as _};

    #[test]
    fn registers_builtins_once() {
        let mut registry = Registry::new();

        assert_eq!(
            BuiltinScalars.resolve(&ScalarMarker::Id, &mut registry),
            Ok(Type::named("ID")),
        );
        assert_eq!(
            BuiltinScalars.resolve(&ScalarMarker::Id, &mut registry),
            Ok(Type::named("ID")),
        );
        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn carries_custom_conversions() {
        let date = ScalarMarker::Custom(Arc::new(
            ScalarDefinition::new("Date")
                .serialize(|v| Ok(Value::scalar(format!("date:{v}")))),
        ));
        let mut registry = Registry::new();

        BuiltinScalars.resolve(&date, &mut registry).unwrap();

        let MetaType::Scalar(meta) = &*registry.lookup("Date").unwrap().node else {
            panic!("`Date` is not a scalar");
        };
        assert_eq!(
            meta.serialize(&Value::scalar(1)),
            Ok(Value::scalar("date:1")),
        );
    }

    #[test]
    fn rejects_distinct_scalars_of_same_name() {
        let mut registry = Registry::new();
        BuiltinScalars
            .resolve(&ScalarDefinition::new("Date").into_marker(), &mut registry)
            .unwrap();

        assert_eq!(
            BuiltinScalars.resolve(&ScalarDefinition::new("Date").into_marker(), &mut registry),
            Err(SchemaError::DuplicateTypeName {
                name: "Date".into(),
            }),
        );
    }

    #[test]
    fn serializes_builtins() {
        let int = BuiltinScalars::definition(&ScalarMarker::Int);
        assert_eq!((int.serialize)(&Value::scalar(2.0)), Ok(Value::scalar(2)));
        assert!((int.serialize)(&Value::scalar(2.5)).is_err());

        let id = BuiltinScalars::definition(&ScalarMarker::Id);
        assert_eq!((id.serialize)(&Value::scalar(7)), Ok(Value::scalar("7")));

        let boolean = BuiltinScalars::definition(&ScalarMarker::Boolean);
        assert_eq!((boolean.serialize)(&Value::scalar(0)), Ok(Value::scalar(false)));
    }
}
