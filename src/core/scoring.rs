use rand::Rng;
use crate::models::{Lifestyle, Pet, PetScore, PetType, User};

pub const BASE_SCORE: f64 = 0.5;
pub const TYPE_BONUS: f64 = 0.15;
pub const ACTIVITY_BONUS: f64 = 0.10;
pub const MAX_JITTER: f64 = 0.15;
pub const MIN_SCORE: f64 = 0.30;
pub const MAX_SCORE: f64 = 0.95;

const ACTIVE_TRAITS: [&str; 3] = ["Energetic", "Active", "Playful"];
const MODERATE_TRAITS: [&str; 3] = ["Friendly", "Social", "Gentle"];
const RELAXED_TRAITS: [&str; 3] = ["Calm", "Quiet", "Independent"];

/// Score every pet with the heuristic rules
///
/// Scoring formula:
/// score = round2(clamp(
///     0.5 +                        # base
///     0.15 * type_preferred +      # pet type named in preferences
///     0.10 * activity_aligned +    # lifestyle tier meets a matching trait
///     jitter,                      # uniform in [0, 0.15)
///     0.30, 0.95))
pub fn heuristic_scores<R: Rng + ?Sized>(user: &User, pets: &[Pet], rng: &mut R) -> Vec<PetScore> {
    pets.iter()
        .map(|pet| PetScore {
            pet_id: pet.id.clone(),
            score: heuristic_score(user, pet, rng),
        })
        .collect()
}

/// Heuristic score for a single pet
#[inline]
pub fn heuristic_score<R: Rng + ?Sized>(user: &User, pet: &Pet, rng: &mut R) -> f64 {
    let jitter = rng.random_range(0.0..MAX_JITTER);
    finalize_score(rule_score(user, pet) + jitter)
}

/// Deterministic part of the heuristic: base plus rule bonuses
pub fn rule_score(user: &User, pet: &Pet) -> f64 {
    let mut score = BASE_SCORE;

    if prefers_type(user, pet.pet_type) {
        score += TYPE_BONUS;
    }

    if activity_aligned(user.lifestyle, pet) {
        score += ACTIVITY_BONUS;
    }

    score
}

/// Clamp to [0.30, 0.95] and round to two decimals
#[inline]
pub fn finalize_score(raw: f64) -> f64 {
    round_score(raw.clamp(MIN_SCORE, MAX_SCORE))
}

#[inline]
pub fn round_score(score: f64) -> f64 {
    (score * 100.0).round() / 100.0
}

/// The exact type name, or the plural group labels offered by the profile form
fn prefers_type(user: &User, pet_type: PetType) -> bool {
    user.prefers(pet_type.as_str())
        || (pet_type == PetType::Dog && user.prefers("Dogs"))
        || (pet_type == PetType::Cat && user.prefers("Cats"))
        || (pet_type.is_small_animal() && user.prefers("Small animals"))
}

/// Tiers are exclusive; only the tier selected by the lifestyle is checked
fn activity_aligned(lifestyle: Lifestyle, pet: &Pet) -> bool {
    match lifestyle {
        Lifestyle::VeryActive | Lifestyle::Active => pet.has_any_trait(&ACTIVE_TRAITS),
        Lifestyle::Moderate => pet.has_any_trait(&MODERATE_TRAITS),
        Lifestyle::Relaxed | Lifestyle::Sedentary => pet.has_any_trait(&RELAXED_TRAITS),
    }
}
