use serde::{Deserialize, Serialize};

use crate::validation::Validator;

#[derive(Debug, Serialize)]
pub struct CatalogResponse {
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

#[derive(Debug, Deserialize)]
pub struct CatalogCreateRequest {
    pub name: String,
    pub description: String,
    pub price: f32,
    pub amount: i32,
    pub discount_percent: f32,
    pub sku: String,
    pub category_id: i64,
}

impl CatalogCreateRequest {
    pub fn validate(&self) -> Result<(), Vec<String>> {
        let mut v = Validator::new();
        v.check_string(&self.name, "Name").is_min(3).is_max(50);
        v.check_string(&self.description, "Description").is_min(20).is_max(1500);
        v.check_number(self.price, "Price").is_min(1.0).is_max(100000.0);
        v.check_number(self.discount_percent, "Discount").is_min(0.0).is_max(100.0);
        v.check_string(&self.sku, "Sku").is_min(10).is_max(64);
        v.check_number(self.category_id, "CategoryId").is_min(1.0);

        if v.has_errors() {
            Err(v.into_errors())
        } else {
            Ok(())
        }
    }
}

/// Catalog PATCH body: every updatable column is optional, absent fields
/// stay untouched in storage.
#[derive(Debug, Default, Deserialize)]
pub struct CatalogUpdateRequest {
    pub id: i64,
    pub name: Option<String>,
    pub description: Option<String>,
    pub price: Option<f32>,
    pub amount: Option<i32>,
    pub discount_percent: Option<f32>,
    pub sku: Option<String>,
    pub category_id: Option<i64>,
}

impl CatalogUpdateRequest {
    pub fn validate(&self) -> Result<(), Vec<String>> {
        let mut v = Validator::new();

        if let Some(name) = &self.name {
            v.check_string(name, "Name").is_min(3).is_max(50);
        }
        if let Some(description) = &self.description {
            v.check_string(description, "Description").is_min(20).is_max(1500);
        }
        if let Some(price) = self.price {
            v.check_number(price, "Price").is_min(1.0).is_max(100000.0);
        }
        if let Some(discount_percent) = self.discount_percent {
            v.check_number(discount_percent, "Discount").is_max(100.0);
        }
        if let Some(sku) = &self.sku {
            v.check_string(sku, "Sku").is_min(10).is_max(64);
        }
        if let Some(category_id) = self.category_id {
            v.check_number(category_id, "CategoryId").is_min(1.0);
        }

        if v.has_errors() {
            Err(v.into_errors())
        } else {
            Ok(())
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct AddImageRequest {
    pub id: i64,
    pub image: String,
}
