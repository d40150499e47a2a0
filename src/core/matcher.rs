use rand::rngs::StdRng;
use rand::SeedableRng;
use std::collections::HashMap;
use std::sync::{Arc, Mutex, PoisonError};
use crate::core::prompt::{build_prompt, parse_reply};
use crate::core::scoring::{heuristic_score, heuristic_scores};
use crate::models::{MatchWarning, Pet, PetScore, User};
use crate::services::OpenAiClient;

const HEURISTIC_FALLBACK: &str = "Using default matching algorithm instead";

/// Result of scoring the catalog for one user
#[derive(Debug, Clone)]
pub struct ScoreOutcome {
    /// One entry per pet, in catalog order
    pub scores: Vec<PetScore>,
    /// Present whenever the heuristic scorer stood in for the language model
    pub warning: Option<MatchWarning>,
}

/// Compatibility scoring orchestrator
///
/// Delegates to the language model when a client is configured and falls
/// back to the heuristic rules on any failure. The jitter RNG is shared and
/// can be seeded for reproducible scores.
#[derive(Clone)]
pub struct Matcher {
    rng: Arc<Mutex<StdRng>>,
    delegate: Option<OpenAiClient>,
}

impl Matcher {
    /// Heuristic-only matcher; `seed` fixes the jitter sequence
    pub fn new(seed: Option<u64>) -> Self {
        let rng = match seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_os_rng(),
        };

        Self {
            rng: Arc::new(Mutex::new(rng)),
            delegate: None,
        }
    }

    pub fn with_delegate(mut self, client: OpenAiClient) -> Self {
        self.delegate = Some(client);
        self
    }

    pub fn is_delegated(&self) -> bool {
        self.delegate.is_some()
    }

    /// Score every pet with the heuristic rules
    pub fn heuristic(&self, user: &User, pets: &[Pet]) -> Vec<PetScore> {
        let mut rng = self.rng.lock().unwrap_or_else(PoisonError::into_inner);
        heuristic_scores(user, pets, &mut *rng)
    }

    /// Score every pet, always producing one entry per pet
    pub async fn score(&self, user: &User, pets: &[Pet]) -> ScoreOutcome {
        let Some(client) = &self.delegate else {
            tracing::debug!("Using heuristic matching (no language model configured)");
            return self.fallback(user, pets, "Language model not configured", None);
        };

        let prompt = build_prompt(user, pets);
        tracing::debug!("Requesting delegated scores for {} pets from {}", pets.len(), client.model());

        let content = match client.complete_json(&prompt).await {
            Ok(content) => content,
            Err(e) => {
                tracing::warn!("Language model call failed for user {}: {}", user.id, e);
                return self.fallback(
                    user,
                    pets,
                    "Failed to generate AI-powered matches",
                    Some(e.to_string()),
                );
            }
        };

        match parse_reply(&content, pets) {
            Some(scores) => ScoreOutcome {
                scores: self.complete(user, pets, scores),
                warning: None,
            },
            None => {
                tracing::warn!("Unusable language model reply for user {}", user.id);
                self.fallback(
                    user,
                    pets,
                    "Failed to parse AI-powered matches",
                    Some("Reply did not contain usable pet scores".to_string()),
                )
            }
        }
    }

    fn fallback(&self, user: &User, pets: &[Pet], error: &str, details: Option<String>) -> ScoreOutcome {
        ScoreOutcome {
            scores: self.heuristic(user, pets),
            warning: Some(MatchWarning {
                error: error.to_string(),
                details,
                fallback: HEURISTIC_FALLBACK.to_string(),
            }),
        }
    }

    /// Order delegated scores by catalog and fill pets the model skipped
    fn complete(&self, user: &User, pets: &[Pet], delegated: Vec<PetScore>) -> Vec<PetScore> {
        let mut by_id: HashMap<String, f64> = delegated
            .into_iter()
            .map(|s| (s.pet_id, s.score))
            .collect();

        let mut rng = self.rng.lock().unwrap_or_else(PoisonError::into_inner);
        pets.iter()
            .map(|pet| PetScore {
                pet_id: pet.id.clone(),
                score: by_id
                    .remove(&pet.id)
                    .unwrap_or_else(|| heuristic_score(user, pet, &mut *rng)),
            })
            .collect()
    }
}

impl Default for Matcher {
    fn default() -> Self {
        Self::new(None)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::scoring::{MAX_SCORE, MIN_SCORE};
    use crate::models::{Experience, Lifestyle, PetType};
    use std::time::Duration;

    fn create_user() -> User {
        User {
            id: "u1".to_string(),
            name: "Kim".to_string(),
            email: "kim@example.com".to_string(),
            preferences: vec!["Dogs".to_string()],
            lifestyle: Lifestyle::Active,
            experience: Experience::Experienced,
        }
    }

    fn create_pets() -> Vec<Pet> {
        ["a", "b", "c"]
            .iter()
            .map(|id| Pet {
                id: id.to_string(),
                name: format!("Pet {}", id),
                pet_type: PetType::Dog,
                breed: None,
                age: 3.0,
                description: "Good dog".to_string(),
                image_url: None,
                personality: vec!["Playful".to_string()],
            })
            .collect()
    }

    fn delegated_matcher(url: String) -> Matcher {
        let client = OpenAiClient::new(
            url,
            "key".to_string(),
            "gpt-3.5-turbo".to_string(),
            Duration::from_secs(5),
        )
        .unwrap();
        Matcher::new(Some(1)).with_delegate(client)
    }

    fn completion_body(content: &str) -> String {
        serde_json::json!({
            "choices": [{"message": {"role": "assistant", "content": content}}]
        })
        .to_string()
    }

    #[tokio::test]
    async fn test_heuristic_only_warns() {
        let matcher = Matcher::new(Some(3));
        let outcome = matcher.score(&create_user(), &create_pets()).await;

        assert_eq!(outcome.scores.len(), 3);
        assert_eq!(outcome.warning.unwrap().error, "Language model not configured");
    }

    #[test]
    fn test_seeded_matchers_agree() {
        let user = create_user();
        let pets = create_pets();

        let first = Matcher::new(Some(99)).heuristic(&user, &pets);
        let second = Matcher::new(Some(99)).heuristic(&user, &pets);

        assert_eq!(first, second);
    }

    #[tokio::test]
    async fn test_delegated_scores_used_and_gaps_filled() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("POST", "/chat/completions")
            .with_status(200)
            .with_body(completion_body(r#"{"matches": [{"petId": "c", "score": 0.12}, {"petId": "a", "score": 0.99}]}"#))
            .create_async()
            .await;

        let matcher = delegated_matcher(server.url());
        let outcome = matcher.score(&create_user(), &create_pets()).await;

        assert!(outcome.warning.is_none());
        let ids: Vec<&str> = outcome.scores.iter().map(|s| s.pet_id.as_str()).collect();
        assert_eq!(ids, vec!["a", "b", "c"]);
        assert_eq!(outcome.scores[0].score, 0.99);
        assert_eq!(outcome.scores[2].score, 0.12);
        assert!(outcome.scores[1].score >= MIN_SCORE && outcome.scores[1].score <= MAX_SCORE);
    }

    #[tokio::test]
    async fn test_transport_failure_falls_back() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("POST", "/chat/completions")
            .with_status(500)
            .with_body("boom")
            .create_async()
            .await;

        let matcher = delegated_matcher(server.url());
        let outcome = matcher.score(&create_user(), &create_pets()).await;

        let warning = outcome.warning.unwrap();
        assert_eq!(warning.error, "Failed to generate AI-powered matches");
        assert!(warning.details.unwrap().contains("500"));
        assert_eq!(outcome.scores.len(), 3);
        assert!(outcome.scores.iter().all(|s| s.score >= MIN_SCORE && s.score <= MAX_SCORE));
    }

    #[tokio::test]
    async fn test_unparseable_reply_falls_back() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("POST", "/chat/completions")
            .with_status(200)
            .with_body(completion_body("I think they are all great"))
            .create_async()
            .await;

        let matcher = delegated_matcher(server.url());
        let outcome = matcher.score(&create_user(), &create_pets()).await;

        assert_eq!(outcome.warning.unwrap().error, "Failed to parse AI-powered matches");
        assert_eq!(outcome.scores.len(), 3);
    }
}
