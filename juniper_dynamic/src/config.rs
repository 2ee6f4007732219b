//! Per-build configuration.

use serde::{Deserialize, Serialize};

use crate::util::to_camel_case;

/// Options of a single schema build.
#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
#[serde(default)]
pub struct SchemaConfig {
    /// Whether declared `snake_case` names of fields and arguments are
    /// exposed as `camelCase`.
    pub auto_camel_case: bool,
}

impl Default for SchemaConfig {
    fn default() -> Self {
        Self {
            auto_camel_case: true,
        }
    }
}

impl SchemaConfig {
    /// Sets whether declared names are automatically camel-cased.
    #[must_use]
    pub fn auto_camel_case(mut self, enabled: bool) -> Self {
        self.auto_camel_case = enabled;
        self
    }

    /// Returns the name a field or argument is exposed under.
    ///
    /// An explicit `graphql_name` always wins over the `declared` one.
    pub fn exposed_name(&self, declared: &str, graphql_name: Option<&str>) -> String {
        match graphql_name {
            Some(name) => name.into(),
            None if self.auto_camel_case => to_camel_case(declared).into_owned(),
            None => declared.into(),
        }
    }
}
