use chrono::Utc;
use std::sync::{PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};
use uuid::Uuid;
use crate::models::{Match, MatchWithPet, NewPet, NewUser, Pet, User};

/// Process-lifetime entity store
///
/// Holds pets, users and matches as plain lists. Created once in `main` and
/// shared with every handler through `AppState`. There is no uniqueness
/// constraint on matches: the same (user, pet) pair may be recorded many times.
#[derive(Debug, Default)]
pub struct Store {
    pets: RwLock<Vec<Pet>>,
    users: RwLock<Vec<User>>,
    matches: RwLock<Vec<Match>>,
}

// Poisoned guards are recovered; every write below is a single Vec operation.
fn read<T>(lock: &RwLock<T>) -> RwLockReadGuard<'_, T> {
    lock.read().unwrap_or_else(PoisonError::into_inner)
}

fn write<T>(lock: &RwLock<T>) -> RwLockWriteGuard<'_, T> {
    lock.write().unwrap_or_else(PoisonError::into_inner)
}

fn generate_id() -> String {
    Uuid::new_v4().simple().to_string()
}

impl Store {
    pub fn new() -> Self {
        Self::default()
    }

    // Pets

    pub fn create_pet(&self, pet: NewPet) -> Pet {
        let pet = Pet {
            id: generate_id(),
            name: pet.name,
            pet_type: pet.pet_type,
            breed: pet.breed,
            age: pet.age,
            description: pet.description,
            image_url: pet.image_url,
            personality: pet.personality,
        };
        write(&self.pets).push(pet.clone());
        pet
    }

    /// Snapshot of every pet, in insertion order
    pub fn all_pets(&self) -> Vec<Pet> {
        read(&self.pets).clone()
    }

    pub fn pet_count(&self) -> usize {
        read(&self.pets).len()
    }

    pub fn pet_by_id(&self, id: &str) -> Option<Pet> {
        read(&self.pets).iter().find(|p| p.id == id).cloned()
    }

    /// Remove every pet; users and matches are left alone
    pub fn clear_pets(&self) {
        write(&self.pets).clear();
    }

    // Users

    pub fn create_user(&self, user: NewUser) -> User {
        let user = User {
            id: generate_id(),
            name: user.name,
            email: user.email,
            preferences: user.preferences,
            lifestyle: user.lifestyle,
            experience: user.experience,
        };
        write(&self.users).push(user.clone());
        user
    }

    pub fn user_by_id(&self, id: &str) -> Option<User> {
        read(&self.users).iter().find(|u| u.id == id).cloned()
    }

    pub fn user_count(&self) -> usize {
        read(&self.users).len()
    }

    // Matches

    /// Append a match row unconditionally
    pub fn record_match(&self, pet_id: &str, user_id: &str, score: f64, status: &str) -> Match {
        let record = Match {
            id: generate_id(),
            pet_id: pet_id.to_string(),
            user_id: user_id.to_string(),
            score,
            status: status.to_string(),
            created_at: Utc::now(),
        };
        write(&self.matches).push(record.clone());
        record
    }

    /// Drop every match recorded for `user_id`, returning how many were removed
    pub fn remove_matches_for_user(&self, user_id: &str) -> usize {
        let mut matches = write(&self.matches);
        let before = matches.len();
        matches.retain(|m| m.user_id != user_id);
        before - matches.len()
    }

    /// Matches for a user joined to their pets, highest score first
    ///
    /// A match whose pet no longer resolves carries `pet: None`.
    pub fn matches_for_user(&self, user_id: &str) -> Vec<MatchWithPet> {
        let pets = read(&self.pets);
        let mut joined: Vec<MatchWithPet> = read(&self.matches)
            .iter()
            .filter(|m| m.user_id == user_id)
            .map(|m| MatchWithPet {
                record: m.clone(),
                pet: pets.iter().find(|p| p.id == m.pet_id).cloned(),
            })
            .collect();
        drop(pets);

        joined.sort_by(|a, b| b.record.score.total_cmp(&a.record.score));
        joined
    }
}
