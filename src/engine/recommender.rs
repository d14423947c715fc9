use std::sync::Arc;

use tracing::debug;

use crate::error::{AppError, AppResult};
use crate::model::RatingModel;
use crate::models::{
    round_rating, PastInteraction, ProductId, Recommendation, RecommendationOutcome, UserId,
};
use crate::store::{catalog::normalize_aisle, CatalogIndex, InteractionStore};

/// Generates ranked product recommendations from the pre-trained model
///
/// All dependencies are injected at construction and shared immutably; the
/// engine itself is stateless across requests.
pub struct Recommender {
    model: Arc<dyn RatingModel>,
    interactions: Arc<InteractionStore>,
    catalog: Arc<CatalogIndex>,
}

impl Recommender {
    pub fn new(
        model: Arc<dyn RatingModel>,
        interactions: Arc<InteractionStore>,
        catalog: Arc<CatalogIndex>,
    ) -> Self {
        Self {
            model,
            interactions,
            catalog,
        }
    }

    /// Top-n recommendations over the whole catalog
    ///
    /// Fails with `UnknownUser` for users absent from the interaction data.
    /// Returns `NoCandidates` when the user has already interacted with
    /// every catalog product. `n = 0` yields an empty ranked list.
    pub async fn recommend(&self, user: UserId, n: usize) -> AppResult<RecommendationOutcome> {
        let candidates = self.unseen_products(user, self.catalog.product_ids())?;
        if candidates.is_empty() {
            return Ok(RecommendationOutcome::NoCandidates);
        }

        let ranked = self.score_and_rank(user, candidates, n, None).await?;
        Ok(RecommendationOutcome::Ranked(ranked))
    }

    /// Top-n recommendations restricted to one catalog aisle
    ///
    /// Aisle existence is validated before the user: an unknown aisle wins
    /// over an unknown user so the caller sees the more specific failure.
    pub async fn recommend_in_aisle(
        &self,
        user: UserId,
        aisle: &str,
        n: usize,
    ) -> AppResult<RecommendationOutcome> {
        let label = normalize_aisle(aisle);
        let pool = self.catalog.products_in_aisle(&label);
        if pool.is_empty() {
            return Err(AppError::UnknownAisle(label));
        }

        let candidates = self.unseen_products(user, pool)?;
        if candidates.is_empty() {
            return Ok(RecommendationOutcome::NoCandidates);
        }

        let ranked = self
            .score_and_rank(user, candidates, n, Some(label.as_str()))
            .await?;
        Ok(RecommendationOutcome::Ranked(ranked))
    }

    /// All products the user has already rated, projected through the catalog
    ///
    /// No ranking; ordered by ascending product id for a stable response.
    pub fn past_interactions(&self, user: UserId) -> AppResult<Vec<PastInteraction>> {
        let record = self
            .interactions
            .interactions_of(user)
            .ok_or(AppError::UnknownUser(user))?;

        let mut rated: Vec<(ProductId, f64)> =
            record.iter().map(|(id, rating)| (*id, *rating)).collect();
        rated.sort_by_key(|(id, _)| *id);

        Ok(rated
            .into_iter()
            .filter_map(|(id, rating)| {
                self.catalog.name_of(id).map(|name| PastInteraction {
                    product: name.to_string(),
                    rating: round_rating(rating),
                })
            })
            .collect())
    }

    /// Candidate-set derivation: pool products the user has not interacted with
    fn unseen_products(
        &self,
        user: UserId,
        pool: impl IntoIterator<Item = ProductId>,
    ) -> AppResult<Vec<ProductId>> {
        let seen = self
            .interactions
            .interactions_of(user)
            .ok_or(AppError::UnknownUser(user))?;

        Ok(pool.into_iter().filter(|id| !seen.contains_key(id)).collect())
    }

    /// Scores each candidate once, ranks, truncates, and projects
    ///
    /// Ranking uses full-precision estimates, descending, with ascending
    /// product id as the tie-break; rounding happens only in the projection.
    /// Candidates without a catalog name are dropped after truncation, so the
    /// result may be shorter than `n`.
    async fn score_and_rank(
        &self,
        user: UserId,
        candidates: Vec<ProductId>,
        n: usize,
        aisle: Option<&str>,
    ) -> AppResult<Vec<Recommendation>> {
        let mut scored: Vec<(ProductId, f64)> = Vec::with_capacity(candidates.len());
        for product in candidates {
            let estimate = self.model.estimate(user, product).await?;
            scored.push((product, estimate));
        }

        scored.sort_by(|(a_id, a_est), (b_id, b_est)| {
            b_est
                .total_cmp(a_est)
                .then_with(|| a_id.cmp(b_id))
        });

        debug!(user = %user, scored = scored.len(), n, "ranked candidates");

        Ok(scored
            .into_iter()
            .take(n)
            .filter_map(|(id, estimate)| {
                self.catalog.name_of(id).map(|name| Recommendation {
                    product: name.to_string(),
                    aisle: aisle.map(str::to_string),
                    rating: round_rating(estimate),
                })
            })
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;
    use crate::model::MockRatingModel;

    fn fixture_catalog() -> CatalogIndex {
        let names = HashMap::from([
            (1, "Sea Salt Crackers".to_string()),
            (2, "Trail Mix".to_string()),
            (3, "Pretzel Twists".to_string()),
            (4, "Veggie Chips".to_string()),
        ]);
        let aisles = HashMap::from([
            (1, "snacks".to_string()),
            (2, "snacks".to_string()),
            (3, "snacks".to_string()),
            (4, "snacks".to_string()),
        ]);
        CatalogIndex::from_artifacts(names, aisles)
    }

    fn fixture_interactions() -> InteractionStore {
        let mut raw = HashMap::new();
        raw.insert(7, HashMap::from([(1, 5.0), (2, 3.0)]));
        raw.insert(8, HashMap::from([(1, 4.0), (2, 4.0), (3, 4.0), (4, 4.0)]));
        InteractionStore::from_ratings(raw)
    }

    fn engine_with(model: MockRatingModel) -> Recommender {
        Recommender::new(
            Arc::new(model),
            Arc::new(fixture_interactions()),
            Arc::new(fixture_catalog()),
        )
    }

    fn scripted_model() -> MockRatingModel {
        let mut model = MockRatingModel::new();
        model.expect_estimate().returning(|_, product| match product {
            ProductId(3) => Ok(4.5),
            ProductId(4) => Ok(3.2),
            _ => Ok(1.0),
        });
        model
    }

    #[tokio::test]
    async fn test_recommends_only_unseen_products_ranked_descending() {
        let engine = engine_with(scripted_model());
        let outcome = engine.recommend(UserId(7), 10).await.unwrap();

        let RecommendationOutcome::Ranked(recs) = outcome else {
            panic!("expected ranked outcome");
        };
        assert_eq!(recs.len(), 2);
        assert_eq!(recs[0].product, "Pretzel Twists");
        assert_eq!(recs[0].rating, 4.5);
        assert_eq!(recs[1].product, "Veggie Chips");
        assert_eq!(recs[1].rating, 3.2);
        assert!(recs[0].aisle.is_none());
    }

    #[tokio::test]
    async fn test_unknown_user_rejected() {
        let engine = engine_with(MockRatingModel::new());
        let err = engine.recommend(UserId(999), 10).await.unwrap_err();
        assert!(matches!(err, AppError::UnknownUser(UserId(999))));

        let err = engine
            .recommend_in_aisle(UserId(999), "snacks", 10)
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::UnknownUser(UserId(999))));
    }

    #[tokio::test]
    async fn test_exhausted_catalog_is_no_candidates() {
        let engine = engine_with(MockRatingModel::new());
        let outcome = engine.recommend(UserId(8), 10).await.unwrap();
        assert_eq!(outcome, RecommendationOutcome::NoCandidates);
    }

    #[tokio::test]
    async fn test_zero_n_is_empty_ranked_not_no_candidates() {
        let engine = engine_with(scripted_model());
        let outcome = engine.recommend(UserId(7), 0).await.unwrap();
        assert_eq!(outcome, RecommendationOutcome::Ranked(vec![]));
    }

    #[tokio::test]
    async fn test_truncates_to_n() {
        let engine = engine_with(scripted_model());
        let RecommendationOutcome::Ranked(recs) =
            engine.recommend(UserId(7), 1).await.unwrap()
        else {
            panic!("expected ranked outcome");
        };
        assert_eq!(recs.len(), 1);
        assert_eq!(recs[0].product, "Pretzel Twists");
    }

    #[tokio::test]
    async fn test_each_candidate_scored_exactly_once() {
        let mut model = MockRatingModel::new();
        model
            .expect_estimate()
            .times(2)
            .returning(|_, _| Ok(2.0));
        let engine = engine_with(model);
        // User 7 has two unseen products; truncation to 1 must not skip scoring
        engine.recommend(UserId(7), 1).await.unwrap();
    }

    #[tokio::test]
    async fn test_equal_ratings_tie_break_by_product_id() {
        let mut model = MockRatingModel::new();
        model.expect_estimate().returning(|_, _| Ok(3.0));
        let engine = engine_with(model);

        let RecommendationOutcome::Ranked(recs) =
            engine.recommend(UserId(7), 10).await.unwrap()
        else {
            panic!("expected ranked outcome");
        };
        assert_eq!(recs[0].product, "Pretzel Twists");
        assert_eq!(recs[1].product, "Veggie Chips");
    }

    #[tokio::test]
    async fn test_aisle_filter_normalizes_label() {
        let engine = engine_with(scripted_model());
        let a = engine
            .recommend_in_aisle(UserId(7), " Snacks ", 10)
            .await
            .unwrap();
        let engine = engine_with(scripted_model());
        let b = engine
            .recommend_in_aisle(UserId(7), "snacks", 10)
            .await
            .unwrap();
        assert_eq!(a, b);
    }

    #[tokio::test]
    async fn test_aisle_results_carry_aisle_label() {
        let engine = engine_with(scripted_model());
        let RecommendationOutcome::Ranked(recs) = engine
            .recommend_in_aisle(UserId(7), "Snacks", 10)
            .await
            .unwrap()
        else {
            panic!("expected ranked outcome");
        };
        assert!(recs.iter().all(|r| r.aisle.as_deref() == Some("snacks")));
    }

    #[tokio::test]
    async fn test_unknown_aisle_checked_before_unknown_user() {
        let engine = engine_with(MockRatingModel::new());
        let err = engine
            .recommend_in_aisle(UserId(999), "bakery", 10)
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::UnknownAisle(label) if label == "bakery"));
    }

    #[tokio::test]
    async fn test_products_without_catalog_name_dropped_from_output() {
        let names = HashMap::from([(1, "Sea Salt Crackers".to_string())]);
        // Product 2 has an aisle but no display name
        let aisles = HashMap::from([(1, "snacks".to_string()), (2, "snacks".to_string())]);
        let catalog = CatalogIndex::from_artifacts(names, aisles);

        let mut raw = HashMap::new();
        raw.insert(7, HashMap::new());
        let interactions = InteractionStore::from_ratings(raw);

        let mut model = MockRatingModel::new();
        model.expect_estimate().returning(|_, product| match product {
            ProductId(2) => Ok(5.0),
            _ => Ok(1.0),
        });

        let engine = Recommender::new(Arc::new(model), Arc::new(interactions), Arc::new(catalog));
        let RecommendationOutcome::Ranked(recs) = engine
            .recommend_in_aisle(UserId(7), "snacks", 10)
            .await
            .unwrap()
        else {
            panic!("expected ranked outcome");
        };
        // Product 2 ranked first but has no name, so only product 1 surfaces
        assert_eq!(recs.len(), 1);
        assert_eq!(recs[0].product, "Sea Salt Crackers");
    }

    #[tokio::test]
    async fn test_scoring_fault_surfaces_as_error() {
        let mut model = MockRatingModel::new();
        model
            .expect_estimate()
            .returning(|_, _| Err(anyhow::anyhow!("inference backend unavailable")));
        let engine = engine_with(model);
        let err = engine.recommend(UserId(7), 10).await.unwrap_err();
        assert!(matches!(err, AppError::Scoring(_)));
    }

    #[tokio::test]
    async fn test_past_interactions_projection() {
        let engine = engine_with(MockRatingModel::new());
        let past = engine.past_interactions(UserId(7)).unwrap();
        assert_eq!(past.len(), 2);
        assert_eq!(past[0].product, "Sea Salt Crackers");
        assert_eq!(past[0].rating, 5.0);
        assert_eq!(past[1].product, "Trail Mix");
        assert_eq!(past[1].rating, 3.0);
    }

    #[test]
    fn test_past_interactions_unknown_user() {
        let engine = engine_with(MockRatingModel::new());
        assert!(matches!(
            engine.past_interactions(UserId(999)),
            Err(AppError::UnknownUser(_))
        ));
    }

    #[tokio::test]
    async fn test_ranking_uses_full_precision_before_rounding() {
        // 2.004 and 2.001 both round to 2.0 but must rank 3 above 4
        let mut model = MockRatingModel::new();
        model.expect_estimate().returning(|_, product| match product {
            ProductId(3) => Ok(2.004),
            ProductId(4) => Ok(2.001),
            _ => Ok(0.0),
        });
        let engine = engine_with(model);
        let RecommendationOutcome::Ranked(recs) =
            engine.recommend(UserId(7), 10).await.unwrap()
        else {
            panic!("expected ranked outcome");
        };
        assert_eq!(recs[0].product, "Pretzel Twists");
        assert_eq!(recs[0].rating, 2.0);
        assert_eq!(recs[1].rating, 2.0);
    }
}
