//! Read-only data stores backing the recommendation engine
//!
//! Both stores are populated once at startup from serialized artifacts and
//! never mutated afterwards, so they can be shared across requests without
//! locking.

pub mod artifacts;
pub mod catalog;
pub mod interactions;

pub use catalog::CatalogIndex;
pub use interactions::InteractionStore;
