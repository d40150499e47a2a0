//! Pet Match - compatibility matching service for pet adoption
//!
//! Adopters submit lifestyle preferences and the service scores every
//! available pet against them, either with fixed heuristic rules or by
//! delegating to a language model, then records and returns ranked matches.

pub mod config;
pub mod core;
pub mod errors;
pub mod models;
pub mod routes;
pub mod services;

// Re-export commonly used types
pub use self::core::{Matcher, ScoreOutcome};
pub use models::{Pet, PetType, User, Lifestyle, Experience, Match, MatchWithPet, PetScore};
pub use routes::{configure_app, AppState};
pub use services::{Initializer, SampleCatalog, Seeder, Store};
