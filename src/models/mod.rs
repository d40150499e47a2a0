// Model exports
pub mod domain;
pub mod requests;
pub mod responses;

pub use domain::{Pet, NewPet, PetType, User, NewUser, Lifestyle, Experience, Match, MatchWithPet, PetScore, MATCH_STATUS_PENDING};
pub use requests::{CreatePetRequest, CreateUserRequest, MatchRequest, MatchesQuery, ReseedRequest, OneOrMany};
pub use responses::{MatchWarning, MatchesResponse, PetsResponse, PetResponse, CreateUserResponse, HealthResponse, PetSample, DebugStatusResponse, ReseedResponse, ErrorResponse};
