use crate::models::{NewPet, PetType};
use crate::services::store::Store;

/// Populates a store with pets
///
/// `seed(store, false)` must leave a non-empty store untouched;
/// `seed(store, true)` replaces the pets (users and matches are kept).
pub trait Seeder: Send + Sync {
    fn seed(&self, store: &Store, force: bool);
}

/// Built-in catalog of twelve pets across all six types
#[derive(Debug, Clone, Copy, Default)]
pub struct SampleCatalog;

impl SampleCatalog {
    pub const SIZE: usize = 12;

    /// The catalog entries, in insertion order
    pub fn pets() -> Vec<NewPet> {
        vec![
            // Dogs
            sample(
                "Max",
                PetType::Dog,
                "Golden Retriever",
                3.0,
                "Max is a friendly and energetic Golden Retriever who loves outdoor activities. He gets along well with children and other pets. He's trained and responds well to basic commands.",
                "https://images.unsplash.com/photo-1552053831-71594a27632d?q=80&w=624&auto=format&fit=crop",
                &["Friendly", "Energetic", "Loyal"],
            ),
            sample(
                "Rocky",
                PetType::Dog,
                "German Shepherd",
                4.0,
                "Rocky is a loyal and protective German Shepherd with excellent training. He's great with families and makes an excellent watchdog. He needs regular exercise and mental stimulation.",
                "https://images.unsplash.com/photo-1605897472359-85e4b94d685d?q=80&w=624&auto=format&fit=crop",
                &["Loyal", "Protective", "Intelligent"],
            ),
            sample(
                "Bella",
                PetType::Dog,
                "Beagle",
                2.0,
                "Bella is a curious and playful Beagle who loves to explore. She has a friendly disposition and gets along well with everyone. She enjoys playing fetch and going for walks.",
                "https://images.unsplash.com/photo-1587300003388-59208cc962cb?q=80&w=624&auto=format&fit=crop",
                &["Friendly", "Playful", "Curious"],
            ),
            sample(
                "Charlie",
                PetType::Dog,
                "French Bulldog",
                2.0,
                "Charlie is a charming French Bulldog with a lot of personality. He's affectionate, adaptable, and does well in apartments. He loves cuddles and short walks.",
                "https://images.unsplash.com/photo-1583337130417-3346a1be7dee?q=80&w=624&auto=format&fit=crop",
                &["Affectionate", "Playful", "Calm"],
            ),
            // Cats
            sample(
                "Luna",
                PetType::Cat,
                "Siamese",
                2.0,
                "Luna is a quiet and independent Siamese cat. She's very clean and enjoys peaceful environments. While she's not overly demanding of attention, she forms strong bonds with her owners.",
                "https://images.unsplash.com/photo-1574158622682-e40e69881006?q=80&w=624&auto=format&fit=crop",
                &["Quiet", "Independent", "Affectionate"],
            ),
            sample(
                "Oliver",
                PetType::Cat,
                "Maine Coon",
                3.0,
                "Oliver is a gentle giant with a sociable personality. This Maine Coon loves being around people and isn't shy about seeking attention. He's good with children and other pets.",
                "https://images.unsplash.com/photo-1533738363-b7f9aef128ce?q=80&w=624&auto=format&fit=crop",
                &["Gentle", "Sociable", "Intelligent"],
            ),
            sample(
                "Milo",
                PetType::Cat,
                "Tabby",
                1.0,
                "Milo is a playful tabby cat with lots of energy. He loves interactive toys and climbing. He's young and adaptable, making him a great addition to most homes.",
                "https://images.unsplash.com/photo-1526336024174-e58f5cdd8e13?q=80&w=624&auto=format&fit=crop",
                &["Playful", "Curious", "Energetic"],
            ),
            // Small animals
            sample(
                "Coco",
                PetType::Rabbit,
                "Holland Lop",
                1.0,
                "Coco is a calm and affectionate Holland Lop rabbit. She enjoys being handled and is litter-trained. She's ideal for someone looking for a gentle small pet.",
                "https://images.unsplash.com/photo-1535241749838-299277b6305f?q=80&w=624&auto=format&fit=crop",
                &["Calm", "Affectionate", "Social"],
            ),
            sample(
                "Nibbles",
                PetType::Hamster,
                "Syrian",
                1.0,
                "Nibbles is an active and curious Syrian hamster. He's fun to watch as he explores his habitat and enjoys running on his wheel. He's a great starter pet for responsible children.",
                "https://images.unsplash.com/photo-1425082661705-1834bfd09dca?q=80&w=624&auto=format&fit=crop",
                &["Active", "Curious", "Independent"],
            ),
            sample(
                "Tiki",
                PetType::Bird,
                "Budgerigar",
                2.0,
                "Tiki is a colorful and cheerful budgie who loves to chirp and sing. He can learn to mimic words with patient training. He brings life and joy to any home.",
                "https://images.unsplash.com/photo-1501720804996-ae418d1ba820?q=80&w=624&auto=format&fit=crop",
                &["Social", "Vocal", "Intelligent"],
            ),
            // Other
            sample(
                "Pepper",
                PetType::Other,
                "Abyssinian Guinea Pig",
                2.0,
                "Pepper is a chatty guinea pig who squeaks whenever the fridge opens. She is easy to handle, enjoys floor time, and would love a companion of her own kind.",
                PetType::Other.default_image_url(),
                &["Social", "Gentle", "Vocal"],
            ),
            sample(
                "Shelly",
                PetType::Other,
                "Hermann's Tortoise",
                12.0,
                "Shelly is a slow and steady tortoise who spends her days basking and munching greens. She needs a warm enclosure and very little attention, and will be around for decades.",
                PetType::Other.default_image_url(),
                &["Calm", "Quiet", "Independent"],
            ),
        ]
    }
}

fn sample(
    name: &str,
    pet_type: PetType,
    breed: &str,
    age: f64,
    description: &str,
    image_url: &str,
    personality: &[&str],
) -> NewPet {
    NewPet {
        name: name.to_string(),
        pet_type,
        breed: Some(breed.to_string()),
        age,
        description: description.to_string(),
        image_url: Some(image_url.to_string()),
        personality: personality.iter().map(|t| t.to_string()).collect(),
    }
}

impl Seeder for SampleCatalog {
    fn seed(&self, store: &Store, force: bool) {
        let existing = store.pet_count();
        tracing::debug!("Before seeding: {} pets exist", existing);

        if existing > 0 && !force {
            tracing::debug!("Skipping sample data: {} pets already exist", existing);
            return;
        }

        if existing > 0 {
            tracing::info!("Force seeding: clearing {} existing pets", existing);
            store.clear_pets();
        }

        for pet in Self::pets() {
            store.create_pet(pet);
        }

        let seeded = store.pet_count();
        if seeded == 0 {
            tracing::error!("Seeding finished but the pet list is still empty");
        } else {
            tracing::info!("Seeded {} sample pets", seeded);
        }
    }
}
