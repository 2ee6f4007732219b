#![doc = include_str!("../README.md")]
#![cfg_attr(docsrs, feature(doc_cfg))]
#![warn(missing_docs)]

#[doc(hidden)]
pub use static_assertions as sa;

mod ast;
pub mod config;
pub mod definition;
pub mod resolve;
pub mod schema;
mod util;
pub mod value;

#[cfg(test)]
mod tests;

use arcstr::ArcStr;
use derive_more::with_trait::{Display, Error};

pub use crate::{
    ast::Type,
    config::SchemaConfig,
    definition::{
        ArgumentDefinition, DefaultValue, Definition, DefinitionKind, Definitions,
        DirectiveDefinition, EnumDefinition, EnumValueDefinition, FieldDefinition, Permission,
        ResolverArgs, ResolverDefinition, ResolverParams, ScalarDefinition, ScalarMarker,
        TypeDefinition, TypeRef, UnionDefinition,
    },
    resolve::{
        Arguments, Context, FieldError, FieldResult, Info, Resolution, ResolveInfo, Resolver,
    },
    schema::{
        BuiltinScalars, Converter, Registry, ScalarResolver, SchemaBuilder,
        meta::{self, MetaType, TypeKind},
        model::{DirectiveLocation, DirectiveType, SchemaType},
    },
    util::{is_valid_name, to_camel_case},
    value::{EnumMember, Object, Origin, ScalarValue, Value},
};

/// Error preventing a schema from being built.
#[derive(Clone, Debug, Display, Eq, Error, PartialEq)]
pub enum SchemaError {
    /// Type reference naming no definition of its kind, or wrapping a
    /// non-null type into a non-null one.
    #[display("Unexpected type `{type_ref}`")]
    UnexpectedType {
        /// Description of the offending type reference.
        type_ref: String,
    },

    /// Two distinct definitions sharing a type name.
    #[display("Type name `{name}` is used by more than one definition")]
    DuplicateTypeName {
        /// The shared name.
        name: ArcStr,
    },

    /// Union member not being an object type.
    #[display("Union `{union}` can only include object types, found `{member}`")]
    InvalidUnionMember {
        /// Name of the union.
        union: ArcStr,
        /// Name of the offending member.
        member: ArcStr,
    },

    /// Name not matching `/^[_a-zA-Z][_a-zA-Z0-9]*$/`.
    #[display("Name `{name}` is not a valid GraphQL name")]
    InvalidName {
        /// The offending name.
        name: ArcStr,
    },

    /// Root operation type not being an object type.
    #[display("Root type `{name}` must be an object type")]
    RootNotObject {
        /// Name of the root type.
        name: ArcStr,
    },

    /// Two directives sharing a name.
    #[display("Directive `@{name}` is defined more than once")]
    DuplicateDirectiveName {
        /// The shared name.
        name: ArcStr,
    },
}
