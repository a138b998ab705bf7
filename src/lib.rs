//! Shared library for `degree-navigator`
//! Contains the audit parser, prerequisite engine and recommendation filter used by the CLI

pub mod core;
pub mod logger;

pub use crate::core::config;
pub use crate::core::get_version;
