//! Storage layer for skillbook
//!
//! JSON files on disk: one store per tier, the legacy combined store, and
//! the manifest that ties the tier stores together.

pub mod layout;
pub mod manifest;
pub mod ordered;
pub mod store;

pub use layout::CatalogLayout;
pub use manifest::{FileRef, Manifest};
pub use ordered::OrderedMap;
pub use store::{CombinedStore, read_combined, read_tier, write_combined, write_tier};
