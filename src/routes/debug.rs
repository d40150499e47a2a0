use actix_web::{web, HttpResponse, Responder};
use crate::errors::JsonError;
use crate::models::{DebugStatusResponse, PetSample, ReseedRequest, ReseedResponse};
use crate::routes::AppState;

const SAMPLE_SIZE: usize = 3;

pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.route("/debug/status", web::get().to(status))
        .route("/debug/reseed", web::post().to(reseed));
}

/// Read-only store introspection
///
/// GET /api/v1/debug/status
async fn status(state: web::Data<AppState>) -> impl Responder {
    let pets = state.store.all_pets();

    HttpResponse::Ok().json(DebugStatusResponse {
        status: "ok".to_string(),
        pet_count: pets.len(),
        initialized: state.initializer.is_initialized(),
        verified: !pets.is_empty(),
        pet_sample: pets.iter().take(SAMPLE_SIZE).map(PetSample::from).collect(),
    })
}

/// Force a reseed, or a forced run of the initializer
///
/// POST /api/v1/debug/reseed
///
/// Request body (optional):
/// ```json
/// { "reinitialize": false }
/// ```
///
/// An empty body means a plain reseed; a malformed one is rejected.
async fn reseed(state: web::Data<AppState>, body: web::Bytes) -> Result<HttpResponse, JsonError> {
    let req = if body.iter().all(u8::is_ascii_whitespace) {
        ReseedRequest::default()
    } else {
        serde_json::from_slice::<ReseedRequest>(&body).map_err(|e| {
            tracing::info!("Rejected reseed body: {}", e);
            JsonError::invalid_body(e)
        })?
    };

    let succeeded = if req.reinitialize {
        tracing::info!("Admin: forcing reinitialization");
        state.initializer.ensure_initialized(true)
    } else {
        tracing::info!("Admin: force reseeding sample data");
        state.seeder.seed(&state.store, true);
        state.initializer.verify()
    };

    Ok(HttpResponse::Ok().json(ReseedResponse {
        initialization: if succeeded { "succeeded" } else { "failed" }.to_string(),
        pet_count: state.store.pet_count(),
    }))
}
