// Route exports
pub mod debug;
pub mod matches;
pub mod pets;
pub mod users;

use actix_web::{web, HttpResponse, Responder};
use std::sync::Arc;
use crate::config::{MatchPolicy, Settings};
use crate::core::Matcher;
use crate::errors::{handle_json_payload_error, handle_query_payload_error};
use crate::models::HealthResponse;
use crate::services::{Initializer, OpenAiClient, OpenAiError, SampleCatalog, Seeder, Store};

/// Application state shared across all handlers
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<Store>,
    pub seeder: Arc<dyn Seeder>,
    pub initializer: Initializer,
    pub matcher: Matcher,
    pub policy: MatchPolicy,
}

impl AppState {
    /// Wire the store, catalog seeder, initializer and matcher from settings
    pub fn from_settings(settings: &Settings) -> Result<Self, OpenAiError> {
        let store = Arc::new(Store::new());
        let seeder: Arc<dyn Seeder> = Arc::new(SampleCatalog);

        let initializer = Initializer::new(
            Arc::clone(&store),
            Arc::clone(&seeder),
            settings.initialization.max_retries,
            settings.initialization.retry_delay(),
        );

        let mut matcher = Matcher::new(settings.scoring.seed);
        match settings.scoring.api_key() {
            Some(api_key) => {
                let client = OpenAiClient::new(
                    settings.scoring.openai_base_url.clone(),
                    api_key.to_string(),
                    settings.scoring.model.clone(),
                    settings.scoring.request_timeout(),
                )?;
                tracing::info!("Delegated scoring enabled (model: {})", settings.scoring.model);
                matcher = matcher.with_delegate(client);
            }
            None => tracing::warn!("No language model API key configured, using heuristic scoring only"),
        }

        Ok(Self {
            store,
            seeder,
            initializer,
            matcher,
            policy: settings.matching.policy,
        })
    }

    /// Make sure pets are available, forcing one reinitialization if the store is empty
    pub fn ensure_store_ready(&self) -> bool {
        if self.initializer.verify() {
            return true;
        }

        tracing::info!("Store verification failed, forcing reinitialization");
        self.initializer.ensure_initialized(true);
        self.initializer.verify()
    }
}

/// Register state, extractor error handlers and all routes
pub fn configure_app(state: AppState) -> impl FnOnce(&mut web::ServiceConfig) {
    move |cfg| {
        cfg.app_data(web::Data::new(state))
            .app_data(web::JsonConfig::default().error_handler(handle_json_payload_error))
            .app_data(web::QueryConfig::default().error_handler(handle_query_payload_error))
            .configure(configure_routes);
    }
}

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/v1")
            .route("/health", web::get().to(health_check))
            .configure(pets::configure)
            .configure(users::configure)
            .configure(matches::configure)
            .configure(debug::configure),
    );
}

/// Health check endpoint
async fn health_check(state: web::Data<AppState>) -> impl Responder {
    let pet_count = state.store.pet_count();
    let status = if pet_count > 0 { "healthy" } else { "degraded" };

    HttpResponse::Ok().json(HealthResponse {
        status: status.to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        timestamp: chrono::Utc::now(),
        pet_count,
    })
}
