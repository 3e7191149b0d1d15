use serde::{Deserialize, Serialize};
use sqlx::FromRow;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct User {
    pub id: i64,
    pub email: String,
    pub username: String,
    #[serde(skip_serializing)]
    pub password: String,
    pub role_code: Option<String>,
}

/// Full account row including profile and address columns. Profile and
/// address fields are nullable until the user fills them in.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct UserFullInfo {
    pub id: i64,
    pub email: String,
    pub username: String,
    #[serde(skip_serializing)]
    pub password: String,
    pub role_code: Option<String>,
    pub first_name: Option<String>,
    pub second_name: Option<String>,
    pub phone_number: Option<String>,
    pub apartment: Option<String>,
    pub house: Option<String>,
    pub street: Option<String>,
    pub city: Option<String>,
    pub region: Option<String>,
}
