// Criterion benchmarks for Pet Match

use criterion::{black_box, criterion_group, criterion_main, Criterion, BenchmarkId};
use pet_match::core::{build_prompt, heuristic_scores, parse_reply};
use pet_match::models::{Experience, Lifestyle, NewPet, NewUser, PetType};
use pet_match::{SampleCatalog, Seeder, Store};
use rand::rngs::StdRng;
use rand::SeedableRng;

fn create_store(extra_pets: usize) -> Store {
    let store = Store::new();
    SampleCatalog.seed(&store, false);

    for i in 0..extra_pets {
        let pet_type = PetType::ALL[i % PetType::ALL.len()];
        store.create_pet(NewPet {
            name: format!("Pet {}", i),
            pet_type,
            breed: None,
            age: (i % 15) as f64,
            description: "Benchmark pet".to_string(),
            image_url: None,
            personality: vec!["Playful".to_string(), "Calm".to_string()],
        });
    }

    store
}

fn create_user(store: &Store) -> pet_match::User {
    store.create_user(NewUser {
        name: "Bench".to_string(),
        email: "bench@example.com".to_string(),
        preferences: vec!["Dogs".to_string(), "Small animals".to_string()],
        lifestyle: Lifestyle::Active,
        experience: Experience::Experienced,
    })
}

fn bench_heuristic_scoring(c: &mut Criterion) {
    let mut group = c.benchmark_group("heuristic_scores");

    for extra in [0usize, 100, 1000] {
        let store = create_store(extra);
        let user = create_user(&store);
        let pets = store.all_pets();
        let mut rng = StdRng::seed_from_u64(1);

        group.bench_with_input(BenchmarkId::from_parameter(pets.len()), &pets, |b, pets| {
            b.iter(|| heuristic_scores(black_box(&user), black_box(pets), &mut rng));
        });
    }

    group.finish();
}

fn bench_prompt(c: &mut Criterion) {
    let store = create_store(0);
    let user = create_user(&store);
    let pets = store.all_pets();

    c.bench_function("build_prompt_catalog", |b| {
        b.iter(|| build_prompt(black_box(&user), black_box(&pets)));
    });

    let reply = serde_json::json!({
        "matches": pets.iter().map(|p| serde_json::json!({"petId": p.id, "score": 0.61})).collect::<Vec<_>>()
    })
    .to_string();

    c.bench_function("parse_reply_catalog", |b| {
        b.iter(|| parse_reply(black_box(&reply), black_box(&pets)));
    });
}

fn bench_matches_for_user(c: &mut Criterion) {
    let store = create_store(0);
    let user = create_user(&store);
    let mut rng = StdRng::seed_from_u64(2);

    for _ in 0..50 {
        for scored in heuristic_scores(&user, &store.all_pets(), &mut rng) {
            store.record_match(&scored.pet_id, &user.id, scored.score, "pending");
        }
    }

    c.bench_function("matches_for_user_600_rows", |b| {
        b.iter(|| store.matches_for_user(black_box(&user.id)));
    });
}

criterion_group!(benches, bench_heuristic_scoring, bench_prompt, bench_matches_for_user);
criterion_main!(benches);
