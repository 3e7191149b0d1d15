use serde::{Deserialize, Serialize};

use crate::database::models::UserFullInfo;
use crate::validation::Validator;

#[derive(Debug, Deserialize)]
pub struct UserCreateRequest {
    pub email: String,
    pub username: String,
    pub password: String,
}

impl UserCreateRequest {
    pub fn validate(&self) -> Result<(), Vec<String>> {
        let mut v = Validator::new();
        v.check_string(&self.email, "Email").is_email().is_max(254);
        v.check_string(&self.username, "Username").is_valid_username();
        v.check_string(&self.password, "Password").is_password();

        if v.has_errors() {
            Err(v.into_errors())
        } else {
            Ok(())
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct UserLoginRequest {
    pub email: String,
    pub password: String,
}

#[derive(Debug, Serialize)]
pub struct UserGetResponse {
    pub id: i64,
    pub email: String,
    pub username: String,
    pub first_name: String,
    pub second_name: String,
}

impl From<UserFullInfo> for UserGetResponse {
    fn from(user: UserFullInfo) -> Self {
        Self {
            id: user.id,
            email: user.email,
            username: user.username,
            first_name: user.first_name.unwrap_or_default(),
            second_name: user.second_name.unwrap_or_default(),
        }
    }
}

/// Profile PATCH body. Absent fields are left untouched in storage, so
/// checks run only on fields that were actually provided.
#[derive(Debug, Default, Deserialize)]
pub struct UserUpdateRequest {
    #[serde(skip)]
    pub id: i64,
    pub first_name: Option<String>,
    pub second_name: Option<String>,
}

impl UserUpdateRequest {
    pub fn validate(&self) -> Result<(), Vec<String>> {
        let mut v = Validator::new();

        if let Some(first_name) = &self.first_name {
            v.check_string(first_name, "FirstName").is_min(2).is_max(10);
        }
        if let Some(second_name) = &self.second_name {
            v.check_string(second_name, "SecondName").is_min(4).is_max(20);
        }

        if v.has_errors() {
            Err(v.into_errors())
        } else {
            Ok(())
        }
    }
}

/// Address replacement body. All fields are plain strings: an empty value
/// is a legitimate "clear this field" update.
#[derive(Debug, Default, Deserialize)]
pub struct UserAddressUpdateRequest {
    #[serde(skip)]
    pub id: i64,
    pub apartment: String,
    pub house: String,
    pub street: String,
    pub city: String,
    pub region: String,
}

impl UserAddressUpdateRequest {
    pub fn validate(&self) -> Result<(), Vec<String>> {
        let mut v = Validator::new();
        v.check_string(&self.apartment, "Apartment").is_min(0).is_max(10);
        v.check_string(&self.house, "House").is_min(1).is_max(5);
        v.check_string(&self.street, "Street").is_min(2).is_max(173);
        v.check_string(&self.city, "City").is_min(3).is_max(25);
        v.check_string(&self.region, "Region").is_min(4).is_max(25);

        if v.has_errors() {
            Err(v.into_errors())
        } else {
            Ok(())
        }
    }
}
