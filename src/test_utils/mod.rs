//! Shared test utilities for skillbook.

pub mod fixtures;

pub use fixtures::{CatalogFixture, fixed_today};
