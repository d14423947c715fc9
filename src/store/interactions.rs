use std::collections::HashMap;

use crate::models::{ProductId, UserId};

/// Read-only mapping from users to the products they have rated
///
/// Built once from the user-item artifact; lookups on missing users return
/// `None` rather than an empty record so callers can tell an unknown user
/// apart from a user with no interactions.
#[derive(Debug, Default)]
pub struct InteractionStore {
    ratings: HashMap<UserId, HashMap<ProductId, f64>>,
}

impl InteractionStore {
    /// Builds the store from raw artifact data keyed by numeric ids
    pub fn from_ratings(raw: HashMap<u32, HashMap<u32, f64>>) -> Self {
        let ratings = raw
            .into_iter()
            .map(|(user, items)| {
                let items = items
                    .into_iter()
                    .map(|(product, rating)| (ProductId(product), rating))
                    .collect();
                (UserId(user), items)
            })
            .collect();
        Self { ratings }
    }

    /// Whether the user appears in the interaction data
    pub fn has_user(&self, user: UserId) -> bool {
        self.ratings.contains_key(&user)
    }

    /// All (product, rating) pairs for a user, `None` if the user is unknown
    pub fn interactions_of(&self, user: UserId) -> Option<&HashMap<ProductId, f64>> {
        self.ratings.get(&user)
    }

    /// Number of users with at least one recorded interaction
    pub fn user_count(&self) -> usize {
        self.ratings.len()
    }
}
