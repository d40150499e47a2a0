use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serialize};
use validator::Validate;
use crate::models::domain::{Experience, Lifestyle};

/// A trait list may be submitted as a single label or as a list
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
pub enum OneOrMany {
    One(String),
    Many(Vec<String>),
}

impl OneOrMany {
    pub fn into_vec(self) -> Vec<String> {
        match self {
            OneOrMany::One(label) => vec![label],
            OneOrMany::Many(labels) => labels,
        }
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum NumberOrString {
    Number(f64),
    Text(String),
}

/// Accept a JSON number or a string holding one, e.g. `2` or `"2.5"`
fn lenient_number<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    match Option::<NumberOrString>::deserialize(deserializer)? {
        None => Ok(None),
        Some(NumberOrString::Number(n)) => Ok(Some(n)),
        Some(NumberOrString::Text(text)) => text
            .trim()
            .parse::<f64>()
            .ok()
            .filter(|n| n.is_finite())
            .map(Some)
            .ok_or_else(|| D::Error::custom(format!("expected a number, got '{}'", text))),
    }
}

/// Request to list a new pet
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct CreatePetRequest {
    #[validate(required, length(min = 1))]
    pub name: Option<String>,
    #[validate(required, length(min = 1))]
    #[serde(rename = "type")]
    pub pet_type: Option<String>,
    #[serde(default)]
    pub breed: Option<String>,
    #[validate(required, range(min = 0.0, message = "age must be a non-negative number"))]
    #[serde(default, deserialize_with = "lenient_number")]
    pub age: Option<f64>,
    #[validate(required, length(min = 1))]
    pub description: Option<String>,
    #[serde(default, rename = "imageUrl")]
    pub image_url: Option<String>,
    #[validate(required)]
    pub personality: Option<OneOrMany>,
}

impl CreatePetRequest {
    pub const REQUIRED_FIELDS: [&'static str; 5] = ["name", "type", "age", "description", "personality"];
}

/// Request to submit an adopter profile
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct CreateUserRequest {
    #[validate(required, length(min = 1))]
    pub name: Option<String>,
    #[validate(required, length(min = 1))]
    pub email: Option<String>,
    #[validate(required, length(min = 1))]
    pub preferences: Option<Vec<String>>,
    #[validate(required)]
    pub lifestyle: Option<Lifestyle>,
    #[validate(required)]
    pub experience: Option<Experience>,
}

impl CreateUserRequest {
    pub const REQUIRED_FIELDS: [&'static str; 5] = ["name", "email", "preferences", "lifestyle", "experience"];
}

/// Request to score the catalog for a user
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct MatchRequest {
    #[validate(required, length(min = 1))]
    #[serde(alias = "user_id", rename = "userId")]
    pub user_id: Option<String>,
    #[serde(default, rename = "forceReload")]
    pub force_reload: bool,
}

/// Query for previously recorded matches
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MatchesQuery {
    #[serde(alias = "user_id", rename = "userId")]
    pub user_id: Option<String>,
}

/// Administrative reseed request
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ReseedRequest {
    /// Run the full initializer with force instead of only reseeding
    #[serde(default)]
    pub reinitialize: bool,
}
