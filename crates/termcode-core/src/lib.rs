//! termcode-core — problem store, solution store, and shared types.
//!
//! This crate defines the data model, the on-disk stores, and the trait
//! seams that the runner and the CLI build on.

pub mod config;
pub mod error;
pub mod layout;
pub mod listing;
pub mod model;
pub mod results;
pub mod solution;
pub mod store;
pub mod traits;
