//! Catalogue types and pure logic

pub mod entry;
pub mod ident;
pub mod reconcile;
pub mod score;
pub mod tabular;
pub mod tier;
pub mod validation;

pub use entry::{BareEntry, Entry};
pub use reconcile::{MergePolicy, Reconciliation, reconcile};
pub use score::{Ratings, Score};
pub use tabular::{RowWarning, TabularBatch, TabularRow};
pub use tier::Tier;
pub use validation::{Finding, Severity, ValidationReport};
