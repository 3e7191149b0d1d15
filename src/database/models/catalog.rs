use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use crate::dto::catalog::CatalogResponse;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Catalog {
    pub id: i64,
    pub name: String,
    pub description: String,
    pub price: f32,
    pub amount: i32,
    pub discount_percent: f32,
    pub sku: String,
    pub category_id: i64,
    pub image_url: Option<String>,
}

impl Catalog {
    /// Map to the wire shape, resolving the stored filename against the
    /// static serving prefix.
    pub fn into_response(self, image_prefix: &str) -> CatalogResponse {
        let image_url = self
            .image_url
            .map(|file| format!("{}{}", image_prefix, file));

        CatalogResponse {
            id: self.id,
            name: self.name,
            description: self.description,
            price: self.price,
            amount: self.amount,
            discount_percent: self.discount_percent,
            sku: self.sku,
            category_id: self.category_id,
            image_url,
        }
    }
}
