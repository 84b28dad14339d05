use super::not_blank;
use crate::models::User;
use serde::{Deserialize, Serialize};
use validator::Validate;

/// Body of `POST /users/{user_id}`. Every field is required.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct RegisterUserRequest {
    #[validate(custom(function = "not_blank"))]
    pub name: String,
    #[validate(range(min = 1, max = 150))]
    pub age: i64,
    #[validate(custom(function = "not_blank"))]
    pub email: String,
    #[validate(custom(function = "not_blank"))]
    pub mobile_no: String,
    #[validate(custom(function = "not_blank"))]
    pub preferred_language: String,
    #[serde(alias = "marrital_status")]
    #[validate(custom(function = "not_blank"))]
    pub marital_status: String,
    #[validate(custom(function = "not_blank"))]
    pub city: String,
    #[validate(custom(function = "not_blank"))]
    pub career_stage: String,
}

impl RegisterUserRequest {
    pub fn into_user(self, id: String) -> User {
        User {
            id,
            name: self.name,
            age: self.age,
            email: self.email,
            mobile_no: self.mobile_no,
            preferred_language: self.preferred_language,
            marital_status: self.marital_status,
            city: self.city,
            career_stage: self.career_stage,
        }
    }
}

#[derive(Debug, Serialize, Deserialize)]
pub struct UserRegisteredResponse {
    pub message: String,
    pub user: User,
}

impl From<User> for UserRegisteredResponse {
    fn from(user: User) -> Self {
        Self {
            message: "User registered successfully".to_string(),
            user,
        }
    }
}
