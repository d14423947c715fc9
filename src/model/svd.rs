use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::models::{ProductId, UserId};

use super::RatingModel;

/// Pre-trained latent-factor model evaluated at request time
///
/// Holds the factor matrices and bias terms produced by an offline SVD-style
/// training run. Prediction follows the usual biased matrix-factorization
/// rule: `est = mean + user_bias + item_bias + user_factors . item_factors`,
/// with the bias and dot-product terms dropped for users or items the model
/// never saw, and the result clamped to the training rating bounds.
///
/// Training is not implemented here; the model is loaded as a serialized
/// artifact.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SvdModel {
    global_mean: f64,
    rating_min: f64,
    rating_max: f64,
    #[serde(default)]
    user_biases: HashMap<u32, f64>,
    #[serde(default)]
    item_biases: HashMap<u32, f64>,
    #[serde(default)]
    user_factors: HashMap<u32, Vec<f64>>,
    #[serde(default)]
    item_factors: HashMap<u32, Vec<f64>>,
}

impl SvdModel {
    /// Creates an empty model with the given global mean and rating bounds
    pub fn new(global_mean: f64, rating_min: f64, rating_max: f64) -> Self {
        Self {
            global_mean,
            rating_min,
            rating_max,
            user_biases: HashMap::new(),
            item_biases: HashMap::new(),
            user_factors: HashMap::new(),
            item_factors: HashMap::new(),
        }
    }

    pub fn set_user_bias(&mut self, user: UserId, bias: f64) {
        self.user_biases.insert(user.0, bias);
    }

    pub fn set_item_bias(&mut self, product: ProductId, bias: f64) {
        self.item_biases.insert(product.0, bias);
    }

    pub fn set_user_factors(&mut self, user: UserId, factors: Vec<f64>) {
        self.user_factors.insert(user.0, factors);
    }

    pub fn set_item_factors(&mut self, product: ProductId, factors: Vec<f64>) {
        self.item_factors.insert(product.0, factors);
    }

    /// Synchronous prediction core shared by the trait impl and tests
    fn predict(&self, user: UserId, product: ProductId) -> f64 {
        let mut estimate = self.global_mean;

        if let Some(bias) = self.user_biases.get(&user.0) {
            estimate += bias;
        }
        if let Some(bias) = self.item_biases.get(&product.0) {
            estimate += bias;
        }
        if let (Some(pu), Some(qi)) = (
            self.user_factors.get(&user.0),
            self.item_factors.get(&product.0),
        ) {
            estimate += pu.iter().zip(qi.iter()).map(|(p, q)| p * q).sum::<f64>();
        }

        estimate.clamp(self.rating_min, self.rating_max)
    }
}

#[async_trait::async_trait]
impl RatingModel for SvdModel {
    async fn estimate(&self, user: UserId, product: ProductId) -> anyhow::Result<f64> {
        Ok(self.predict(user, product))
    }
}
