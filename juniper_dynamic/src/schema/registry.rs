use std::sync::Arc;

use arcstr::ArcStr;
use fnv::FnvBuildHasher;
use indexmap::IndexMap;

use crate::{SchemaError, definition::Definition, util::is_valid_name};

use super::meta::MetaType;

pub(crate) type TypeMap<V> = IndexMap<ArcStr, V, FnvBuildHasher>;

/// Registered type: the definition it was built from, along with its schema
/// node.
#[derive(Clone, Debug)]
pub struct ConcreteType {
    /// Definition the node was built from.
    pub definition: Definition,

    /// Schema node.
    pub node: Arc<MetaType>,
}

/// Registry of the types built so far, keyed by their names.
///
/// Each name maps to exactly one node for a whole schema build, which is
/// what makes cyclic references terminate.
#[derive(Debug, Default)]
pub struct Registry {
    types: TypeMap<ConcreteType>,
}

impl Registry {
    /// Creates an empty [`Registry`].
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the type registered under the given `name`, if any.
    pub fn lookup(&self, name: &str) -> Option<&ConcreteType> {
        self.types.get(name)
    }

    /// Registers the `node` built from the `definition` under the `name`.
    ///
    /// # Errors
    ///
    /// If the `name` is taken already, or isn't a valid GraphQL name.
    pub fn insert(
        &mut self,
        name: ArcStr,
        definition: Definition,
        node: MetaType,
    ) -> Result<&ConcreteType, SchemaError> {
        if !is_valid_name(&name) {
            return Err(SchemaError::InvalidName { name });
        }
        if self.types.contains_key(&name) {
            return Err(SchemaError::DuplicateTypeName { name });
        }
        tracing::debug!(%name, kind = %node.type_kind(), "registered type");
        let entry = self.types.entry(name).or_insert(ConcreteType {
            definition,
            node: Arc::new(node),
        });
        Ok(entry)
    }

    /// Returns the node registered under the given `name` for populating it.
    ///
    /// The node is copied on write if it was handed out already.
    pub(crate) fn node_mut(&mut self, name: &str) -> Option<&mut MetaType> {
        self.types.get_mut(name).map(|t| Arc::make_mut(&mut t.node))
    }

    /// Iterates over the registered types, in registration order.
    pub fn iter(&self) -> impl Iterator<Item = &ConcreteType> {
        self.types.values()
    }

    /// Number of the registered types.
    pub fn len(&self) -> usize {
        self.types.len()
    }

    /// Whether no types are registered.
    pub fn is_empty(&self) -> bool {
        self.types.is_empty()
    }

    pub(crate) fn into_nodes(self) -> TypeMap<Arc<MetaType>> {
        self.types
            .into_iter()
            .map(|(name, t)| (name, t.node))
            .collect()
    }
}
