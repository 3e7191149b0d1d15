use crate::auth::{self, Claims};
use crate::database::repository::UserRepository;
use crate::database::update::UpdateBuilder;
use crate::database::DatabaseError;
use crate::dto::user::{
    UserAddressUpdateRequest, UserCreateRequest, UserGetResponse, UserUpdateRequest,
};
use crate::error::ERROR_NOT_FOUND_BY_ID;
use crate::services::ServiceError;

pub struct UserService<R> {
    repo: R,
}

impl<R: UserRepository> UserService<R> {
    pub fn new(repo: R) -> Self {
        Self { repo }
    }

    /// Create an account with a hashed password. A violated unique
    /// constraint maps to a 409 naming the conflicting field.
    pub async fn register(&self, req: &UserCreateRequest) -> Result<i64, ServiceError> {
        let password_hash =
            auth::hash_password(&req.password).map_err(|e| ServiceError::Internal(e.to_string()))?;

        match self.repo.create(&req.email, &req.username, &password_hash).await {
            Ok(id) => Ok(id),
            Err(DatabaseError::UniqueViolation { constraint }) => {
                Err(self.conflict_for(&constraint, req))
            }
            Err(e) => Err(e.into()),
        }
    }

    pub async fn login(
        &self,
        email: &str,
        password: &str,
    ) -> Result<(UserGetResponse, String), ServiceError> {
        let user = self.repo.find_by_email(email).await?;

        // one message for both unknown email and wrong password
        let user = match user {
            Some(u) if auth::verify_password(password, &u.password) => u,
            _ => {
                return Err(ServiceError::BadRequest(
                    "Invalid username or password".to_string(),
                ))
            }
        };

        let token = auth::generate_jwt(Claims::new(user.email.clone(), user.id))
            .map_err(|e| ServiceError::Internal(e.to_string()))?;

        Ok((UserGetResponse::from(user), token))
    }

    pub async fn profile(&self, email: &str) -> Result<UserGetResponse, ServiceError> {
        let user = self.repo.find_by_email(email).await?.ok_or_else(|| {
            ServiceError::BadRequest("Cant find user by provided email".to_string())
        })?;

        Ok(UserGetResponse::from(user))
    }

    /// PATCH profile fields; absent fields stay untouched.
    pub async fn update_profile(&self, req: &UserUpdateRequest) -> Result<(), ServiceError> {
        let fragment = UpdateBuilder::new(false)
            .set("first_name", req.first_name.clone())
            .set("second_name", req.second_name.clone())
            .build(req.id);

        if fragment.is_empty() {
            return Err(ServiceError::BadRequest(
                "No fields provided for update".to_string(),
            ));
        }

        let updated = self.repo.update(&fragment).await?;
        if !updated {
            return Err(ServiceError::BadRequest(ERROR_NOT_FOUND_BY_ID.to_string()));
        }

        Ok(())
    }

    /// Replace the whole address. Empty strings are written as-is —
    /// clearing a field is a legitimate update here.
    pub async fn update_address(&self, req: &UserAddressUpdateRequest) -> Result<(), ServiceError> {
        let fragment = UpdateBuilder::new(true)
            .set("apartment", Some(req.apartment.clone()))
            .set("house", Some(req.house.clone()))
            .set("street", Some(req.street.clone()))
            .set("city", Some(req.city.clone()))
            .set("region", Some(req.region.clone()))
            .build(req.id);

        let updated = self.repo.update(&fragment).await?;
        if !updated {
            return Err(ServiceError::BadRequest(ERROR_NOT_FOUND_BY_ID.to_string()));
        }

        Ok(())
    }

    fn conflict_for(&self, constraint: &str, req: &UserCreateRequest) -> ServiceError {
        if constraint.contains("email") {
            ServiceError::Conflict(format!(
                "User with this email= [{}] already exists",
                req.email
            ))
        } else if constraint.contains("username") {
            ServiceError::Conflict(format!(
                "User with this username= [{}] already exists",
                req.username
            ))
        } else {
            ServiceError::Conflict("Please check provided data".to_string())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::database::models::UserFullInfo;
    use crate::database::update::UpdateFragment;
    use async_trait::async_trait;
    use serde_json::json;
    use std::sync::Mutex;

    #[derive(Default)]
    struct MockUserRepo {
        create_result: Option<Result<i64, DatabaseError>>,
        stored_user: Option<UserFullInfo>,
        update_result: bool,
        updates: Mutex<Vec<UpdateFragment>>,
    }

    fn full_info(password_hash: &str) -> UserFullInfo {
        UserFullInfo {
            id: 42,
            email: "user@example.com".into(),
            username: "john_doe".into(),
            password: password_hash.into(),
            role_code: None,
            first_name: Some("John".into()),
            second_name: None,
            phone_number: None,
            apartment: None,
            house: None,
            street: None,
            city: None,
            region: None,
        }
    }

    #[async_trait]
    impl UserRepository for MockUserRepo {
        async fn create(&self, _: &str, _: &str, _: &str) -> Result<i64, DatabaseError> {
            match &self.create_result {
                Some(Ok(id)) => Ok(*id),
                Some(Err(DatabaseError::UniqueViolation { constraint })) => {
                    Err(DatabaseError::UniqueViolation {
                        constraint: constraint.clone(),
                    })
                }
                Some(Err(_)) => Err(DatabaseError::QueryError("boom".into())),
                None => panic!("unexpected create call"),
            }
        }

        async fn find_by_email(&self, _: &str) -> Result<Option<UserFullInfo>, DatabaseError> {
            Ok(self.stored_user.clone())
        }

        async fn update(&self, fragment: &UpdateFragment) -> Result<bool, DatabaseError> {
            self.updates.lock().unwrap().push(fragment.clone());
            Ok(self.update_result)
        }
    }

    fn create_request() -> UserCreateRequest {
        UserCreateRequest {
            email: "user@example.com".into(),
            username: "john_doe".into(),
            password: "abcdefghi".into(),
        }
    }

    #[tokio::test]
    async fn register_returns_new_id() {
        let service = UserService::new(MockUserRepo {
            create_result: Some(Ok(7)),
            ..Default::default()
        });
        assert_eq!(service.register(&create_request()).await.unwrap(), 7);
    }

    #[tokio::test]
    async fn register_maps_email_constraint_to_conflict() {
        let service = UserService::new(MockUserRepo {
            create_result: Some(Err(DatabaseError::UniqueViolation {
                constraint: "users_email_key".into(),
            })),
            ..Default::default()
        });

        let err = service.register(&create_request()).await.unwrap_err();
        assert_eq!(err.status(), 409);
        assert!(err.to_string().contains("user@example.com"));
    }

    #[tokio::test]
    async fn register_maps_username_constraint_to_conflict() {
        let service = UserService::new(MockUserRepo {
            create_result: Some(Err(DatabaseError::UniqueViolation {
                constraint: "users_username_key".into(),
            })),
            ..Default::default()
        });

        let err = service.register(&create_request()).await.unwrap_err();
        assert_eq!(err.status(), 409);
        assert!(err.to_string().contains("john_doe"));
    }

    #[tokio::test]
    async fn login_verifies_password_and_issues_token() {
        let hash = auth::hash_password("abcdefghi").unwrap();
        let service = UserService::new(MockUserRepo {
            stored_user: Some(full_info(&hash)),
            ..Default::default()
        });

        let (user, token) = service.login("user@example.com", "abcdefghi").await.unwrap();
        assert_eq!(user.id, 42);

        let claims = auth::validate_jwt(&token).unwrap();
        assert_eq!(claims.sub, "user@example.com");
        assert_eq!(claims.user_id, 42);
    }

    #[tokio::test]
    async fn login_rejects_wrong_password_and_unknown_email_alike() {
        let hash = auth::hash_password("abcdefghi").unwrap();
        let service = UserService::new(MockUserRepo {
            stored_user: Some(full_info(&hash)),
            ..Default::default()
        });
        let err = service.login("user@example.com", "wrong-pass").await.unwrap_err();
        assert_eq!(err.to_string(), "Invalid username or password");

        let service = UserService::new(MockUserRepo::default());
        let err = service.login("nobody@example.com", "abcdefghi").await.unwrap_err();
        assert_eq!(err.to_string(), "Invalid username or password");
    }

    #[tokio::test]
    async fn profile_update_skips_absent_fields() {
        let repo = MockUserRepo {
            update_result: true,
            ..Default::default()
        };
        let service = UserService::new(repo);

        let req = UserUpdateRequest {
            id: 42,
            first_name: Some("Jane".into()),
            second_name: None,
        };
        service.update_profile(&req).await.unwrap();

        let updates = service.repo.updates.lock().unwrap();
        assert_eq!(updates[0].set_clause, "first_name = $2");
        assert_eq!(updates[0].params, vec![json!(42), json!("Jane")]);
    }

    #[tokio::test]
    async fn profile_update_with_no_fields_is_rejected_before_storage() {
        // the mock would record any update call; none must arrive
        let service = UserService::new(MockUserRepo::default());
        let req = UserUpdateRequest {
            id: 42,
            first_name: None,
            second_name: None,
        };
        let err = service.update_profile(&req).await.unwrap_err();
        assert_eq!(err.status(), 400);
        assert!(service.repo.updates.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn address_update_writes_every_field_including_empty() {
        let service = UserService::new(MockUserRepo {
            update_result: true,
            ..Default::default()
        });

        let req = UserAddressUpdateRequest {
            id: 42,
            apartment: String::new(),
            house: "12".into(),
            street: "Baker Street".into(),
            city: "London".into(),
            region: "Greater London".into(),
        };
        service.update_address(&req).await.unwrap();

        let updates = service.repo.updates.lock().unwrap();
        assert_eq!(
            updates[0].set_clause,
            "apartment = $2, house = $3, street = $4, city = $5, region = $6"
        );
        assert_eq!(updates[0].params[1], json!(""));
    }

    #[tokio::test]
    async fn update_of_missing_user_reports_not_found() {
        let service = UserService::new(MockUserRepo {
            update_result: false,
            ..Default::default()
        });
        let req = UserUpdateRequest {
            id: 99,
            first_name: Some("Jane".into()),
            second_name: None,
        };
        let err = service.update_profile(&req).await.unwrap_err();
        assert_eq!(err.to_string(), ERROR_NOT_FOUND_BY_ID);
    }
}
