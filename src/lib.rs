//! Personalized grocery-product recommendations served from a pre-trained
//! latent-factor model.
//!
//! The [`engine::Recommender`] is the core: it derives the candidate set
//! (catalog minus the user's prior interactions), scores each candidate
//! through a [`model::RatingModel`], ranks deterministically, and truncates
//! to the requested count. The HTTP surface in [`api`] is a thin layer over
//! it.

pub mod api;
pub mod config;
pub mod engine;
pub mod error;
pub mod middleware;
pub mod model;
pub mod models;
pub mod store;
