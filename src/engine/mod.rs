//! The recommendation engine
//!
//! Owns no mutable state: it reads the interaction store and catalog, and
//! calls into the scoring model. Concurrent requests need no coordination.

mod recommender;

pub use recommender::Recommender;
