use serde::{Deserialize, Serialize};

use crate::database::models::{Category, Tag};

#[derive(Debug, Deserialize)]
pub struct TagRequest {
    pub name: String,
    pub color: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct TagResponse {
    pub id: i64,
    pub name: String,
    pub color: Option<String>,
    pub is_active: bool,
}

impl From<Tag> for TagResponse {
    fn from(tag: Tag) -> Self {
        Self {
            id: tag.id,
            name: tag.name,
            color: tag.color,
            is_active: tag.is_active,
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct CategoryRequest {
    pub code: String,
    pub name: String,
}

#[derive(Debug, Serialize)]
pub struct CategoryResponse {
    pub id: i64,
    pub code: String,
    pub name: String,
}

impl From<Category> for CategoryResponse {
    fn from(category: Category) -> Self {
        Self {
            id: category.id,
            code: category.code,
            name: category.name,
        }
    }
}
