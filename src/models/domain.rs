use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Category of an adoptable animal
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PetType {
    Dog,
    Cat,
    Rabbit,
    Hamster,
    Bird,
    Other,
}

impl PetType {
    pub const ALL: [PetType; 6] = [
        PetType::Dog,
        PetType::Cat,
        PetType::Rabbit,
        PetType::Hamster,
        PetType::Bird,
        PetType::Other,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            PetType::Dog => "Dog",
            PetType::Cat => "Cat",
            PetType::Rabbit => "Rabbit",
            PetType::Hamster => "Hamster",
            PetType::Bird => "Bird",
            PetType::Other => "Other",
        }
    }

    /// Parse a type name as submitted by clients (exact name, case-insensitive)
    pub fn parse(name: &str) -> Option<Self> {
        let name = name.trim();
        Self::ALL
            .into_iter()
            .find(|t| t.as_str().eq_ignore_ascii_case(name))
    }

    /// Rabbits, hamsters and birds count as "Small animals"
    pub fn is_small_animal(&self) -> bool {
        matches!(self, PetType::Rabbit | PetType::Hamster | PetType::Bird)
    }

    /// Fallback image used when a pet is listed without one
    pub fn default_image_url(&self) -> &'static str {
        match self {
            PetType::Dog => "https://images.unsplash.com/photo-1543466835-00a7907e9de1?q=80&w=400&auto=format&fit=crop",
            PetType::Cat => "https://images.unsplash.com/photo-1543852786-1cf6624b9987?q=80&w=400&auto=format&fit=crop",
            PetType::Rabbit => "https://images.unsplash.com/photo-1535241749838-299277b6305f?q=80&w=400&auto=format&fit=crop",
            PetType::Hamster => "https://images.unsplash.com/photo-1425082661705-1834bfd09dca?q=80&w=400&auto=format&fit=crop",
            PetType::Bird => "https://images.unsplash.com/photo-1501720804996-ae418d1ba820?q=80&w=400&auto=format&fit=crop",
            PetType::Other => "https://images.unsplash.com/photo-1517849845537-4d257902454a?q=80&w=400&auto=format&fit=crop",
        }
    }
}

impl fmt::Display for PetType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// How active the prospective adopter's daily life is
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Lifestyle {
    #[serde(rename = "Very Active")]
    VeryActive,
    Active,
    Moderate,
    Relaxed,
    Sedentary,
}

impl Lifestyle {
    pub fn as_str(&self) -> &'static str {
        match self {
            Lifestyle::VeryActive => "Very Active",
            Lifestyle::Active => "Active",
            Lifestyle::Moderate => "Moderate",
            Lifestyle::Relaxed => "Relaxed",
            Lifestyle::Sedentary => "Sedentary",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Experience {
    #[serde(rename = "First-time owner")]
    FirstTimeOwner,
    #[serde(rename = "Some experience")]
    SomeExperience,
    Experienced,
    Professional,
}

impl Experience {
    pub fn as_str(&self) -> &'static str {
        match self {
            Experience::FirstTimeOwner => "First-time owner",
            Experience::SomeExperience => "Some experience",
            Experience::Experienced => "Experienced",
            Experience::Professional => "Professional",
        }
    }
}

/// Adoptable animal
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Pet {
    pub id: String,
    pub name: String,
    #[serde(rename = "type")]
    pub pet_type: PetType,
    pub breed: Option<String>,
    pub age: f64,
    pub description: String,
    #[serde(rename = "imageUrl", skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
    pub personality: Vec<String>,
}

impl Pet {
    /// True when any of the pet's traits appears in `traits`
    pub fn has_any_trait(&self, traits: &[&str]) -> bool {
        self.personality.iter().any(|t| traits.contains(&t.as_str()))
    }
}

/// Pet fields supplied at creation; the store assigns the id
#[derive(Debug, Clone)]
pub struct NewPet {
    pub name: String,
    pub pet_type: PetType,
    pub breed: Option<String>,
    pub age: f64,
    pub description: String,
    pub image_url: Option<String>,
    pub personality: Vec<String>,
}

/// Prospective adopter's submitted profile
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    pub id: String,
    pub name: String,
    pub email: String,
    pub preferences: Vec<String>,
    pub lifestyle: Lifestyle,
    pub experience: Experience,
}

impl User {
    pub fn prefers(&self, label: &str) -> bool {
        self.preferences.iter().any(|p| p == label)
    }
}

#[derive(Debug, Clone)]
pub struct NewUser {
    pub name: String,
    pub email: String,
    pub preferences: Vec<String>,
    pub lifestyle: Lifestyle,
    pub experience: Experience,
}

/// Scored association between a user and a pet
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Match {
    pub id: String,
    #[serde(rename = "petId")]
    pub pet_id: String,
    #[serde(rename = "userId")]
    pub user_id: String,
    pub score: f64,
    pub status: String,
    #[serde(rename = "createdAt")]
    pub created_at: DateTime<Utc>,
}

/// Match row joined with its pet; `pet` is `None` when the id no longer resolves
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MatchWithPet {
    #[serde(flatten)]
    pub record: Match,
    pub pet: Option<Pet>,
}

/// Compatibility score for one pet
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PetScore {
    #[serde(rename = "petId")]
    pub pet_id: String,
    pub score: f64,
}

pub const MATCH_STATUS_PENDING: &str = "pending";
