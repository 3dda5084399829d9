//! Domain ports and supporting types for the hexagonal boundary.

mod limerick_store;
mod user_repository;

pub use limerick_store::{LimerickStore, LimerickStoreError};
pub use user_repository::{UserPersistenceError, UserRepository};
