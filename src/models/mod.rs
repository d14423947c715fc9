use std::fmt::Display;

use serde::{Deserialize, Serialize};

/// Identifier for a user, as found in the interaction data
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UserId(pub u32);

impl Display for UserId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Identifier for a catalog product
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ProductId(pub u32);

impl Display for ProductId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A single recommended product returned to the client
///
/// The rating is the model estimate rounded to two decimals. The aisle label
/// is present only for aisle-scoped queries.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Recommendation {
    pub product: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub aisle: Option<String>,
    pub rating: f64,
}

/// A product the user has already rated, projected through the catalog
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PastInteraction {
    pub product: String,
    pub rating: f64,
}

/// Outcome of a recommendation request
///
/// `NoCandidates` means the user has already interacted with every product in
/// the candidate pool; it is distinct from an empty `Ranked` list, which means
/// the caller asked for zero items.
#[derive(Debug, Clone, PartialEq)]
pub enum RecommendationOutcome {
    Ranked(Vec<Recommendation>),
    NoCandidates,
}

/// Rounds a rating to two decimal places for output projection
///
/// Ranking always uses full-precision estimates; rounding happens only here.
pub fn round_rating(rating: f64) -> f64 {
    (rating * 100.0).round() / 100.0
}
