use actix_web::{web, HttpResponse};
use validator::Validate;
use crate::config::MatchPolicy;
use crate::errors::ApiError;
use crate::models::{MatchRequest, MatchesQuery, MatchesResponse, MATCH_STATUS_PENDING};
use crate::routes::AppState;

pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.route("/match", web::post().to(request_matches))
        .route("/match", web::get().to(get_matches));
}

/// Score the catalog for a user and record the results
///
/// POST /api/v1/match
///
/// Request body:
/// ```json
/// {
///   "userId": "string",
///   "forceReload": false
/// }
/// ```
///
/// The response always carries a `matches` array. `warning` is set when the
/// heuristic scorer stood in for the language model.
async fn request_matches(
    state: web::Data<AppState>,
    req: web::Json<MatchRequest>,
) -> Result<HttpResponse, ApiError> {
    if !state.ensure_store_ready() {
        tracing::error!("Store still empty after forced reinitialization");
        return Err(ApiError::InitializationFailed);
    }

    if req.force_reload {
        tracing::info!("Force reloading sample data from match request");
        state.seeder.seed(&state.store, true);
    }

    if req.validate().is_err() {
        tracing::info!("Match request without userId");
        return Err(ApiError::validation("userId is required"));
    }
    let user_id = req.user_id.as_deref().unwrap_or_default();

    let user = state.store.user_by_id(user_id).ok_or_else(|| {
        tracing::info!("Match request for unknown user: {}", user_id);
        ApiError::NotFound("User not found".to_string())
    })?;

    let pets = state.store.all_pets();
    if pets.is_empty() {
        tracing::info!("No pets available for user {}", user_id);
        return Ok(HttpResponse::Ok().json(MatchesResponse {
            matches: vec![],
            warning: None,
        }));
    }

    let outcome = state.matcher.score(&user, &pets).await;

    if state.policy == MatchPolicy::Replace {
        let removed = state.store.remove_matches_for_user(user_id);
        tracing::debug!("Replaced {} earlier matches for user {}", removed, user_id);
    }

    for scored in &outcome.scores {
        state
            .store
            .record_match(&scored.pet_id, user_id, scored.score, MATCH_STATUS_PENDING);
    }

    let matches = state.store.matches_for_user(user_id);

    tracing::info!(
        "Returning {} matches for user {} ({} scored{})",
        matches.len(),
        user_id,
        outcome.scores.len(),
        if outcome.warning.is_some() { ", heuristic fallback" } else { "" }
    );

    Ok(HttpResponse::Ok().json(MatchesResponse {
        matches,
        warning: outcome.warning,
    }))
}

/// Fetch previously recorded matches
///
/// GET /api/v1/match?userId={userId}
async fn get_matches(
    state: web::Data<AppState>,
    query: web::Query<MatchesQuery>,
) -> Result<HttpResponse, ApiError> {
    if !state.ensure_store_ready() {
        tracing::error!("Store still empty after forced reinitialization");
        return Err(ApiError::InitializationFailed);
    }

    let user_id = match query.user_id.as_deref().map(str::trim) {
        Some(id) if !id.is_empty() => id,
        _ => {
            tracing::info!("Match lookup without userId");
            return Err(ApiError::validation("User ID is required"));
        }
    };

    let matches = state.store.matches_for_user(user_id);
    tracing::info!("Found {} recorded matches for user {}", matches.len(), user_id);

    Ok(HttpResponse::Ok().json(MatchesResponse {
        matches,
        warning: None,
    }))
}
