// Service exports
pub mod initializer;
pub mod openai;
pub mod seeder;
pub mod store;

pub use initializer::Initializer;
pub use openai::{OpenAiClient, OpenAiError};
pub use seeder::{SampleCatalog, Seeder};
pub use store::Store;
