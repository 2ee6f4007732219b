use arcstr::ArcStr;
use indexmap::map::{IndexMap, IntoIter};

use super::{Origin, Value};

/// An object value of the runtime object model.
///
/// Keeps its fields in insertion order and optionally remembers the host
/// type it is an instance of, which is what `is_type_of` discrimination
/// checks against.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Object {
    origin: Option<Origin>,
    key_value_list: IndexMap<ArcStr, Value>,
}

impl Object {
    /// Creates a new, untyped [`Object`] with a fixed number of preallocated
    /// slots for field-value pairs.
    pub fn with_capacity(size: usize) -> Self {
        Self {
            origin: None,
            key_value_list: IndexMap::with_capacity(size),
        }
    }

    /// Creates a new empty [`Object`] being an instance of the provided
    /// [`Origin`].
    pub fn instance_of(origin: Origin) -> Self {
        Self {
            origin: Some(origin),
            key_value_list: IndexMap::new(),
        }
    }

    /// Sets the [`Origin`] of this [`Object`].
    #[must_use]
    pub fn with_origin(mut self, origin: Origin) -> Self {
        self.origin = Some(origin);
        self
    }

    /// Returns the [`Origin`] this [`Object`] is an instance of, if any.
    pub fn origin(&self) -> Option<Origin> {
        self.origin
    }

    /// Checks whether this [`Object`] is an instance of the given [`Origin`].
    pub fn is_instance_of(&self, origin: Origin) -> bool {
        self.origin == Some(origin)
    }

    /// Adds a new field with a value, returning the replaced one, if any.
    pub fn add_field(&mut self, key: impl Into<ArcStr>, value: impl Into<Value>) -> Option<Value> {
        self.key_value_list.insert(key.into(), value.into())
    }

    /// Same as [`Object::add_field()`], but in a builder fashion.
    #[must_use]
    pub fn field(mut self, key: impl Into<ArcStr>, value: impl Into<Value>) -> Self {
        self.add_field(key, value);
        self
    }

    /// Checks whether this [`Object`] contains a field with the given name.
    pub fn contains_field(&self, key: &str) -> bool {
        self.key_value_list.contains_key(key)
    }

    /// Returns the value of the field with the given name, if any.
    pub fn get_field_value(&self, key: &str) -> Option<&Value> {
        self.key_value_list.get(key)
    }

    /// Removes the field with the given name, preserving the order of the
    /// remaining fields.
    pub fn remove_field(&mut self, key: &str) -> Option<Value> {
        self.key_value_list.shift_remove(key)
    }

    /// Returns an iterator over all field-value pairs.
    pub fn iter(&self) -> impl Iterator<Item = (&ArcStr, &Value)> {
        self.key_value_list.iter()
    }

    /// Returns the current number of fields.
    pub fn field_count(&self) -> usize {
        self.key_value_list.len()
    }
}

impl IntoIterator for Object {
    type Item = (ArcStr, Value);
    type IntoIter = IntoIter<ArcStr, Value>;

    fn into_iter(self) -> Self::IntoIter {
        self.key_value_list.into_iter()
    }
}

impl<K, V> FromIterator<(K, V)> for Object
where
    K: Into<ArcStr>,
    V: Into<Value>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let iter = iter.into_iter();
        let mut ret = Self::with_capacity(iter.size_hint().0);
        for (k, v) in iter {
            ret.add_field(k, v);
        }
        ret
    }
}
