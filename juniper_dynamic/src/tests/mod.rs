//! Library tests and fixtures

pub mod fixtures;
mod resolve_tests;
mod subscription_tests;
#[cfg(feature = "schema-language")]
mod translate_tests;
