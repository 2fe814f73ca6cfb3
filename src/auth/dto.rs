use lazy_static::lazy_static;
use regex::Regex;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::ApiError;

fn is_valid_email(email: &str) -> bool {
    lazy_static! {
        static ref EMAIL_RE: Regex = Regex::new(r"^[^@\s]+@[^@\s]+\.[^@\s]+$").unwrap();
    }
    EMAIL_RE.is_match(email)
}

/// Request body for user registration. Form fields arrive as loose strings;
/// `validate` turns them into a checked `NewUser` before any business logic.
#[derive(Debug, Deserialize)]
pub struct RegisterRequest {
    pub username: String,
    #[serde(default)]
    pub email: String,
    pub password: String,
}

/// Validated registration input.
#[derive(Debug)]
pub struct NewUser {
    pub username: String,
    pub email: String,
    pub password: String,
}

impl RegisterRequest {
    pub fn validate(self) -> Result<NewUser, ApiError> {
        let username = self.username.trim().to_string();
        let email = self.email.trim().to_lowercase();

        if username.is_empty() {
            return Err(ApiError::MissingField("username"));
        }
        if email.is_empty() {
            return Err(ApiError::MissingField("email"));
        }
        if !is_valid_email(&email) {
            return Err(ApiError::Validation("invalid email".into()));
        }
        if self.password.len() < 8 {
            return Err(ApiError::Validation("password too short".into()));
        }

        Ok(NewUser {
            username,
            email,
            password: self.password,
        })
    }
}

/// Request body for login.
#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

/// Response returned after login.
#[derive(Debug, Serialize)]
pub struct AuthResponse {
    pub token: String,
    pub user: PublicUser,
}

/// Public part of the user returned to the client.
#[derive(Debug, Serialize)]
pub struct PublicUser {
    pub id: Uuid,
    pub username: String,
    pub email: String,
}

impl From<crate::auth::repo::User> for PublicUser {
    fn from(user: crate::auth::repo::User) -> Self {
        Self {
            id: user.id,
            username: user.username,
            email: user.email,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request(username: &str, email: &str, password: &str) -> RegisterRequest {
        RegisterRequest {
            username: username.into(),
            email: email.into(),
            password: password.into(),
        }
    }

    #[test]
    fn validate_accepts_well_formed_input() {
        let new_user = request("alice", "  Alice@Example.COM ", "long-enough")
            .validate()
            .expect("should validate");
        assert_eq!(new_user.username, "alice");
        assert_eq!(new_user.email, "alice@example.com");
    }

    #[test]
    fn validate_requires_email() {
        let err = request("alice", "", "long-enough").validate().unwrap_err();
        assert!(matches!(err, ApiError::MissingField("email")));
    }

    #[test]
    fn validate_rejects_malformed_email() {
        let err = request("alice", "not-an-email", "long-enough")
            .validate()
            .unwrap_err();
        assert!(matches!(err, ApiError::Validation(_)));
    }

    #[test]
    fn validate_rejects_short_password() {
        let err = request("alice", "alice@example.com", "short")
            .validate()
            .unwrap_err();
        assert!(matches!(err, ApiError::Validation(_)));
    }

    #[test]
    fn public_user_never_serializes_password_hash() {
        let user = PublicUser {
            id: Uuid::new_v4(),
            username: "alice".into(),
            email: "alice@example.com".into(),
        };
        let json = serde_json::to_string(&user).unwrap();
        assert!(json.contains("alice@example.com"));
        assert!(!json.contains("password"));
    }
}
