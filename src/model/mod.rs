use crate::models::{ProductId, UserId};

pub mod svd;

pub use svd::SvdModel;

/// Scoring capability consumed by the recommendation engine
///
/// Implementations estimate how a user would rate a product. Calls are
/// deterministic for a fixed loaded model but potentially costly (a real
/// model inference), so the engine invokes `estimate` exactly once per
/// candidate within a request.
#[cfg_attr(test, mockall::automock)]
#[async_trait::async_trait]
pub trait RatingModel: Send + Sync {
    /// Estimated rating for the (user, product) pair
    async fn estimate(&self, user: UserId, product: ProductId) -> anyhow::Result<f64>;
}
