//! Core module for degree audit parsing and prerequisite planning

pub mod audit;
pub mod catalog;
pub mod config;
pub mod models;
pub mod normalize;
pub mod prereq;
pub mod recommend;
pub mod store;
pub mod term;

/// Returns the current version of the `degree-navigator` crate
#[must_use]
pub const fn get_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
