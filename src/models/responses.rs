use serde::{Deserialize, Serialize};
use crate::models::domain::{MatchWithPet, Pet, PetType};

/// Advisory attached to a match response when the heuristic scorer stood in
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MatchWarning {
    pub error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
    pub fallback: String,
}

/// Response for the match endpoints; `matches` is always present
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MatchesResponse {
    pub matches: Vec<MatchWithPet>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub warning: Option<MatchWarning>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PetsResponse {
    pub pets: Vec<Pet>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PetResponse {
    pub pet: Pet,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateUserResponse {
    #[serde(rename = "userId")]
    pub user_id: String,
}

/// Health check response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    pub timestamp: chrono::DateTime<chrono::Utc>,
    #[serde(rename = "petCount")]
    pub pet_count: usize,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PetSample {
    pub id: String,
    pub name: String,
    #[serde(rename = "type")]
    pub pet_type: PetType,
}

impl From<&Pet> for PetSample {
    fn from(pet: &Pet) -> Self {
        Self {
            id: pet.id.clone(),
            name: pet.name.clone(),
            pet_type: pet.pet_type,
        }
    }
}

/// Read-only store introspection
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DebugStatusResponse {
    pub status: String,
    #[serde(rename = "petCount")]
    pub pet_count: usize,
    pub initialized: bool,
    pub verified: bool,
    #[serde(rename = "petSample")]
    pub pet_sample: Vec<PetSample>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReseedResponse {
    pub initialization: String,
    #[serde(rename = "petCount")]
    pub pet_count: usize,
}

/// Error response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub required: Option<Vec<String>>,
}
