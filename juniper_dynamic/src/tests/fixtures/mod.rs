//! Definitions the tests build schemas of.

pub mod starwars;
