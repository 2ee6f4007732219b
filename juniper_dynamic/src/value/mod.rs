//! Runtime object model the resolvers produce and consume.

mod object;
mod scalar;

use std::{any::TypeId, fmt, hash};

use arcstr::ArcStr;
use serde::ser::{Serialize, SerializeMap as _, SerializeSeq as _, Serializer};

pub use self::{object::Object, scalar::ScalarValue};

/// Identity of a host type.
///
/// Object types carry the [`Origin`] of the host type they were declared
/// from, and [`Object`] values carry the [`Origin`] of the host type they
/// were produced from, so that an implementor of an interface (or a member
/// of a union) can be recognized at response time.
#[derive(Clone, Copy)]
pub struct Origin {
    id: TypeId,
    name: &'static str,
}

impl Origin {
    /// Returns the [`Origin`] of the host type `T`.
    pub fn of<T: ?Sized + 'static>() -> Self {
        Self {
            id: TypeId::of::<T>(),
            name: std::any::type_name::<T>(),
        }
    }

    /// Returns the fully qualified name of the host type.
    pub fn type_name(&self) -> &'static str {
        self.name
    }
}

impl PartialEq for Origin {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for Origin {}

impl hash::Hash for Origin {
    fn hash<H: hash::Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}

impl fmt::Debug for Origin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Origin({})", self.name)
    }
}

/// Instance of a declared enum member.
///
/// Holds both the symbolic `name` of the member, which is what the schema
/// exposes, and the underlying `value` it was declared with.
#[derive(Clone, Debug, PartialEq)]
pub struct EnumMember {
    /// Name of the enum type this member belongs to.
    pub enum_name: ArcStr,

    /// Declared name of the member.
    pub name: ArcStr,

    /// Underlying value of the member.
    pub value: Box<Value>,
}

impl EnumMember {
    /// Creates a new [`EnumMember`] of the `enum_name` enum.
    pub fn new(enum_name: impl Into<ArcStr>, name: impl Into<ArcStr>, value: Value) -> Self {
        Self {
            enum_name: enum_name.into(),
            name: name.into(),
            value: Box::new(value),
        }
    }
}

/// Runtime value flowing through resolvers.
///
/// Resolvers return it, sources and arguments are represented by it, and
/// scalar and enum nodes serialize from it.
#[derive(Clone, Debug, Default, PartialEq)]
pub enum Value {
    /// Absent value.
    #[default]
    Null,

    /// Leaf value.
    Scalar(ScalarValue),

    /// Ordered list of values.
    List(Vec<Value>),

    /// Object, possibly being an instance of some host type.
    Object(Object),

    /// Instance of an enum member.
    Enum(EnumMember),
}

impl Value {
    /// Constructs a null value.
    pub fn null() -> Self {
        Self::Null
    }

    /// Constructs a scalar value.
    pub fn scalar<T: Into<ScalarValue>>(s: T) -> Self {
        Self::Scalar(s.into())
    }

    /// Constructs a list value.
    pub fn list(l: Vec<Self>) -> Self {
        Self::List(l)
    }

    /// Constructs an object value.
    pub fn object(o: Object) -> Self {
        Self::Object(o)
    }

    /// Does this value represent null?
    pub fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }

    /// View the underlying scalar value, if present.
    pub fn as_scalar(&self) -> Option<&ScalarValue> {
        match self {
            Self::Scalar(s) => Some(s),
            _ => None,
        }
    }

    /// View the underlying string value, if present.
    pub fn as_string_value(&self) -> Option<&str> {
        self.as_scalar().and_then(ScalarValue::as_str)
    }

    /// View the underlying object value, if present.
    pub fn as_object_value(&self) -> Option<&Object> {
        match self {
            Self::Object(o) => Some(o),
            _ => None,
        }
    }

    /// View the underlying list value, if present.
    pub fn as_list_value(&self) -> Option<&Vec<Self>> {
        match self {
            Self::List(l) => Some(l),
            _ => None,
        }
    }

    /// View the underlying enum member, if present.
    pub fn as_enum_member(&self) -> Option<&EnumMember> {
        match self {
            Self::Enum(m) => Some(m),
            _ => None,
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Null => write!(f, "null"),
            Self::Scalar(s) => write!(f, "{s}"),
            Self::Enum(m) => write!(f, "{}", m.name),
            Self::List(list) => {
                write!(f, "[")?;
                for (idx, item) in list.iter().enumerate() {
                    if idx > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{item}")?;
                }
                write!(f, "]")
            }
            Self::Object(obj) => {
                write!(f, "{{")?;
                for (idx, (key, value)) in obj.iter().enumerate() {
                    if idx > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "\"{key}\": {value}")?;
                }
                write!(f, "}}")
            }
        }
    }
}

impl From<ScalarValue> for Value {
    fn from(s: ScalarValue) -> Self {
        Self::Scalar(s)
    }
}

impl From<i32> for Value {
    fn from(i: i32) -> Self {
        Self::scalar(i)
    }
}

impl From<f64> for Value {
    fn from(f: f64) -> Self {
        Self::scalar(f)
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Self::scalar(b)
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Self::scalar(s)
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Self::scalar(s)
    }
}

impl From<Object> for Value {
    fn from(o: Object) -> Self {
        Self::Object(o)
    }
}

impl From<Vec<Value>> for Value {
    fn from(l: Vec<Value>) -> Self {
        Self::List(l)
    }
}

impl From<EnumMember> for Value {
    fn from(m: EnumMember) -> Self {
        Self::Enum(m)
    }
}

impl Serialize for Value {
    fn serialize<S: Serializer>(&self, ser: S) -> Result<S::Ok, S::Error> {
        match self {
            Self::Null => ser.serialize_unit(),
            Self::Scalar(s) => s.serialize(ser),
            Self::Enum(m) => ser.serialize_str(&m.name),
            Self::List(l) => {
                let mut seq = ser.serialize_seq(Some(l.len()))?;
                for v in l {
                    seq.serialize_element(v)?;
                }
                seq.end()
            }
            Self::Object(o) => {
                let mut map = ser.serialize_map(Some(o.field_count()))?;
                for (k, v) in o.iter() {
                    map.serialize_entry(k.as_str(), v)?;
                }
                map.end()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::{EnumMember, Object, Origin, Value};

    struct User;
    struct Admin;

    #[test]
    fn origin_identity_is_by_type() {
        assert_eq!(Origin::of::<User>(), Origin::of::<User>());
        assert_ne!(Origin::of::<User>(), Origin::of::<Admin>());
    }

    #[test]
    fn object_remembers_its_origin() {
        let obj = Object::instance_of(Origin::of::<User>()).field("name", "Alice");

        assert!(obj.is_instance_of(Origin::of::<User>()));
        assert!(!obj.is_instance_of(Origin::of::<Admin>()));
        assert_eq!(obj.get_field_value("name"), Some(&Value::scalar("Alice")));
    }

    #[test]
    fn serializes_enum_members_by_name() {
        let value = Value::list(vec![
            EnumMember::new("Color", "RED", Value::scalar(1)).into(),
            Value::Null,
        ]);

        assert_eq!(serde_json::to_string(&value).unwrap(), r#"["RED",null]"#);
    }

    #[test]
    fn serializes_objects_in_field_order() {
        let value = Value::object(
            [("b", Value::scalar(1)), ("a", Value::scalar(true))]
                .into_iter()
                .collect(),
        );

        assert_eq!(serde_json::to_string(&value).unwrap(), r#"{"b":1,"a":true}"#);
    }
}
