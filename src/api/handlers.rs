use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Deserialize;
use serde_json::json;

use crate::error::{AppError, AppResult};
use crate::models::{PastInteraction, RecommendationOutcome, UserId};

use super::AppState;

// Query parameters arrive as raw strings so that malformed numbers map to
// the InvalidParameter error body instead of a framework rejection.

#[derive(Debug, Deserialize)]
pub struct RecommendParams {
    user_id: Option<String>,
    n: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct AisleRecommendParams {
    user_id: Option<String>,
    aisle: Option<String>,
    n: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct InteractionsParams {
    user_id: Option<String>,
}

const DEFAULT_USER_ID: u32 = 1;
const DEFAULT_N: usize = 10;
const DEFAULT_AISLE: &str = "cookies cakes";

fn parse_user_id(raw: Option<&str>) -> AppResult<UserId> {
    match raw {
        None => Ok(UserId(DEFAULT_USER_ID)),
        Some(s) => s
            .trim()
            .parse::<u32>()
            .map(UserId)
            .map_err(|_| AppError::InvalidParameter(format!("user_id '{}' is not a number", s))),
    }
}

/// Parses the result-count bound; negative values clamp to zero
fn parse_n(raw: Option<&str>) -> AppResult<usize> {
    match raw {
        None => Ok(DEFAULT_N),
        Some(s) => s
            .trim()
            .parse::<i64>()
            .map(|n| n.max(0) as usize)
            .map_err(|_| AppError::InvalidParameter(format!("n '{}' is not a number", s))),
    }
}

fn outcome_response(outcome: RecommendationOutcome, empty_message: &str) -> Response {
    match outcome {
        RecommendationOutcome::Ranked(recs) => (StatusCode::OK, Json(recs)).into_response(),
        RecommendationOutcome::NoCandidates => {
            (StatusCode::OK, Json(json!({ "message": empty_message }))).into_response()
        }
    }
}

/// Health check endpoint
pub async fn health_check() -> StatusCode {
    StatusCode::OK
}

/// Top recommended products for a user across the whole catalog
pub async fn recommend(
    State(state): State<AppState>,
    Query(params): Query<RecommendParams>,
) -> AppResult<Response> {
    let user = parse_user_id(params.user_id.as_deref())?;
    let n = parse_n(params.n.as_deref())?;

    let outcome = state.engine.recommend(user, n).await?;
    Ok(outcome_response(outcome, "No new products to recommend."))
}

/// Recommended products for a user within a single aisle
pub async fn recommend_aisle(
    State(state): State<AppState>,
    Query(params): Query<AisleRecommendParams>,
) -> AppResult<Response> {
    let user = parse_user_id(params.user_id.as_deref())?;
    let n = parse_n(params.n.as_deref())?;
    let aisle = params.aisle.as_deref().unwrap_or(DEFAULT_AISLE);

    let outcome = state.engine.recommend_in_aisle(user, aisle, n).await?;
    Ok(outcome_response(
        outcome,
        "No new products to recommend in this aisle.",
    ))
}

/// Products the user has already rated
pub async fn past_interactions(
    State(state): State<AppState>,
    Query(params): Query<InteractionsParams>,
) -> AppResult<Json<Vec<PastInteraction>>> {
    let user = parse_user_id(params.user_id.as_deref())?;
    Ok(Json(state.engine.past_interactions(user)?))
}
