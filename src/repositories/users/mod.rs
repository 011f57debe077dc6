pub mod memory_repo;
pub mod user_repo;

pub use memory_repo::InMemoryUserRepository;
pub use user_repo::{MongoUserRepository, UserRepository};
