pub mod catalog;
pub mod category;
pub mod tag;
pub mod user;

pub use catalog::{CatalogRepository, PgCatalogRepository};
pub use category::{CategoryRepository, PgCategoryRepository};
pub use tag::{PgTagRepository, TagRepository};
pub use user::{PgUserRepository, UserRepository};
