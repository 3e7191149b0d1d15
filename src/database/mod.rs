pub mod manager;
pub mod models;
pub mod repository;
pub mod update;

pub use manager::{DatabaseError, DatabaseManager};
pub use update::{UpdateBuilder, UpdateFragment};
