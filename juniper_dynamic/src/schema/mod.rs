//! Schema construction out of type definitions.

mod builder;
mod convert;
pub mod meta;
pub mod model;
mod registry;
mod scalars;
pub mod translate;

pub use self::{
    builder::SchemaBuilder,
    convert::Converter,
    registry::{ConcreteType, Registry},
    scalars::{BuiltinScalars, ScalarResolver},
};
