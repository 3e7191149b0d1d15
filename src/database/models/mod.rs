pub mod catalog;
pub mod taxonomy;
pub mod user;

pub use catalog::Catalog;
pub use taxonomy::{Category, Tag};
pub use user::{User, UserFullInfo};
