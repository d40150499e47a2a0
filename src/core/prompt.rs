use serde::Deserialize;
use std::collections::HashSet;
use crate::core::scoring::round_score;
use crate::models::{Pet, PetScore, User};

/// Build the compatibility prompt sent to the language model
pub fn build_prompt(user: &User, pets: &[Pet]) -> String {
    let mut sections = Vec::with_capacity(pets.len() + 2);

    sections.push(format!(
        "Given a user with the following preferences and characteristics:\n\
         - Preferences: {}\n\
         - Lifestyle: {}\n\
         - Pet experience: {}\n\
         \nPlease analyze the compatibility with these pets and provide a compatibility score (0-1) for each:\n",
        user.preferences.join(", "),
        user.lifestyle.as_str(),
        user.experience.as_str(),
    ));
    sections.extend(pets.iter().map(describe_pet));
    sections.push(
        "\nProvide the response as a JSON object with a \"matches\" property containing \
         an array of objects with \"petId\" and \"score\" properties."
            .to_string(),
    );

    sections.concat()
}

fn describe_pet(pet: &Pet) -> String {
    format!(
        "\nPet ID: {}\nType: {}\nBreed: {}\nAge: {}\nPersonality traits: {}\nDescription: {}\n",
        pet.id,
        pet.pet_type,
        pet.breed.as_deref().unwrap_or("Unknown"),
        pet.age,
        pet.personality.join(", "),
        pet.description,
    )
}

#[derive(Debug, Deserialize)]
struct ReplyBody {
    matches: Vec<ReplyEntry>,
}

#[derive(Debug, Deserialize)]
struct ReplyEntry {
    #[serde(rename = "petId")]
    pet_id: String,
    score: f64,
}

/// Parse the model's JSON reply into per-pet scores
///
/// Entries naming unknown pets, repeating a pet, or scoring outside [0, 1]
/// are dropped. Returns `None` when the reply is not the expected shape or
/// nothing usable remains.
pub fn parse_reply(content: &str, pets: &[Pet]) -> Option<Vec<PetScore>> {
    let body: ReplyBody = serde_json::from_str(content).ok()?;

    let known: HashSet<&str> = pets.iter().map(|p| p.id.as_str()).collect();
    let mut seen = HashSet::new();

    let scores: Vec<PetScore> = body
        .matches
        .into_iter()
        .filter(|entry| (0.0..=1.0).contains(&entry.score))
        .filter(|entry| known.contains(entry.pet_id.as_str()))
        .filter(|entry| seen.insert(entry.pet_id.clone()))
        .map(|entry| PetScore {
            pet_id: entry.pet_id,
            score: round_score(entry.score),
        })
        .collect();

    if scores.is_empty() {
        None
    } else {
        Some(scores)
    }
}
