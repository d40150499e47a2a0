use actix_web::{web, HttpResponse};
use validator::{Validate, ValidationErrors};
use crate::errors::ApiError;
use crate::models::{CreatePetRequest, NewPet, PetResponse, PetType, PetsResponse};
use crate::routes::AppState;

pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.route("/pets", web::get().to(list_pets))
        .route("/pets", web::post().to(create_pet));
}

/// List every pet
///
/// GET /api/v1/pets
async fn list_pets(state: web::Data<AppState>) -> HttpResponse {
    state.ensure_store_ready();

    let pets = state.store.all_pets();
    tracing::info!("Listing {} pets", pets.len());

    HttpResponse::Ok().json(PetsResponse { pets })
}

/// Create a pet
///
/// POST /api/v1/pets
///
/// Request body:
/// ```json
/// {
///   "name": "string",
///   "type": "Dog|Cat|Rabbit|Hamster|Bird|Other",
///   "breed": "string (optional)",
///   "age": 2,
///   "description": "string",
///   "imageUrl": "string (optional)",
///   "personality": ["string"] | "string"
/// }
/// ```
async fn create_pet(
    state: web::Data<AppState>,
    req: web::Json<CreatePetRequest>,
) -> Result<HttpResponse, ApiError> {
    state.ensure_store_ready();

    let new_pet = validate_pet(req.into_inner())?;
    let pet = state.store.create_pet(new_pet);

    tracing::info!("Created new pet: {} ({})", pet.name, pet.pet_type);

    Ok(HttpResponse::Ok().json(PetResponse { pet }))
}

fn validate_pet(req: CreatePetRequest) -> Result<NewPet, ApiError> {
    if let Err(errors) = req.validate() {
        tracing::info!("Pet creation rejected: {}", errors);
        return Err(rejection(&errors));
    }

    let (Some(name), Some(type_name), Some(age), Some(description), Some(personality)) =
        (req.name, req.pet_type, req.age, req.description, req.personality)
    else {
        return Err(ApiError::missing_fields(&CreatePetRequest::REQUIRED_FIELDS));
    };

    let pet_type = PetType::parse(&type_name).ok_or_else(|| {
        let allowed: Vec<&str> = PetType::ALL.iter().map(PetType::as_str).collect();
        ApiError::validation(format!(
            "Unknown pet type '{}', expected one of: {}",
            type_name,
            allowed.join(", ")
        ))
    })?;

    let personality: Vec<String> = personality
        .into_vec()
        .into_iter()
        .map(|trait_label| trait_label.trim().to_string())
        .filter(|trait_label| !trait_label.is_empty())
        .collect();
    if personality.is_empty() {
        return Err(ApiError::missing_fields(&CreatePetRequest::REQUIRED_FIELDS));
    }

    let breed = req.breed.filter(|b| !b.trim().is_empty());
    let image_url = req
        .image_url
        .filter(|url| !url.trim().is_empty())
        .unwrap_or_else(|| pet_type.default_image_url().to_string());

    Ok(NewPet {
        name,
        pet_type,
        breed,
        age,
        description,
        image_url: Some(image_url),
        personality,
    })
}

/// Absent or blank fields report the required list; a bad value reports its own message
fn rejection(errors: &ValidationErrors) -> ApiError {
    let field_errors = errors.field_errors();
    let mut failures = field_errors.values().flat_map(|errs| errs.iter());

    if failures.clone().any(|e| e.code != "range") {
        return ApiError::missing_fields(&CreatePetRequest::REQUIRED_FIELDS);
    }

    match failures.find_map(|e| e.message.as_ref()) {
        Some(message) => ApiError::validation(message.to_string()),
        None => ApiError::missing_fields(&CreatePetRequest::REQUIRED_FIELDS),
    }
}
