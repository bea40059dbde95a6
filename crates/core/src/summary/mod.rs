//! Order summary domain module.
//!
//! - [`model`] - Summary line and patch types with wire-format tolerant
//!   deserialization
//! - [`store`] - The in-memory summary collection and load state
//!
//! Models are pure data structures; every mutation of the collection goes
//! through [`store::SummaryStore`] so the merge rules live in one place.

pub mod model;
pub mod store;

pub use model::{SummaryLine, SummaryPatch};
pub use store::{LoadingGuard, SummaryStore};
