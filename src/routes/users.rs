use actix_web::{web, HttpResponse};
use validator::Validate;
use crate::errors::ApiError;
use crate::models::{CreateUserRequest, CreateUserResponse, NewUser};
use crate::routes::AppState;

pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.route("/users", web::post().to(create_user));
}

/// Submit an adopter profile
///
/// POST /api/v1/users
///
/// Request body:
/// ```json
/// {
///   "name": "string",
///   "email": "string",
///   "preferences": ["Dogs", "Good with children"],
///   "lifestyle": "Very Active|Active|Moderate|Relaxed|Sedentary",
///   "experience": "First-time owner|Some experience|Experienced|Professional"
/// }
/// ```
async fn create_user(
    state: web::Data<AppState>,
    req: web::Json<CreateUserRequest>,
) -> Result<HttpResponse, ApiError> {
    if let Err(errors) = req.validate() {
        tracing::info!("User creation rejected: {}", errors);
        return Err(ApiError::missing_fields(&CreateUserRequest::REQUIRED_FIELDS));
    }

    let CreateUserRequest {
        name: Some(name),
        email: Some(email),
        preferences: Some(preferences),
        lifestyle: Some(lifestyle),
        experience: Some(experience),
    } = req.into_inner()
    else {
        return Err(ApiError::missing_fields(&CreateUserRequest::REQUIRED_FIELDS));
    };

    let user = state.store.create_user(NewUser {
        name,
        email,
        preferences,
        lifestyle,
        experience,
    });

    tracing::info!(
        "Created user {} (lifestyle: {}, experience: {}, {} preferences)",
        user.id,
        user.lifestyle.as_str(),
        user.experience.as_str(),
        user.preferences.len()
    );

    Ok(HttpResponse::Ok().json(CreateUserResponse { user_id: user.id }))
}
