//! Translation of schemas into other representations.

use super::model::SchemaType;

/// Translates a [`SchemaType`] into another schema representation.
pub trait SchemaTranslator<'a, T> {
    /// Translates the `schema`.
    fn translate_schema(schema: &'a SchemaType) -> T;
}

#[cfg(feature = "schema-language")]
pub mod graphql_parser;
