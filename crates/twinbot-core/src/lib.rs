//! Twinbot core — wire types, configuration, and small shared helpers.

pub mod config;
pub mod types;
pub mod utils;
