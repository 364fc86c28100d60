//! User model
//!
//! This module defines the signed-in user's profile and the inputs of the
//! login and registration forms.

use serde::{Deserialize, Serialize};

/// Profile of the signed-in user, as returned by `GET /api/users/me`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserProfile {
    /// Unique identifier
    pub id: i64,
    /// Display name
    pub user_name: String,
    /// Email address (also the login ID)
    pub email: String,
}

/// Input of the registration form, sent as JSON
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegisterInput {
    pub user_name: String,
    pub email: String,
    pub password: String,
}

impl RegisterInput {
    /// Create a new registration input
    pub fn new(user_name: impl Into<String>, email: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            user_name: user_name.into(),
            email: email.into(),
            password: password.into(),
        }
    }
}

/// Input of the login form, sent form-encoded
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LoginInput {
    pub email: String,
    pub password: String,
}

impl LoginInput {
    /// Create a new login input
    pub fn new(email: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            email: email.into(),
            password: password.into(),
        }
    }

    /// Encode as `application/x-www-form-urlencoded`.
    ///
    /// The server's login endpoint reads the email from the `username` field.
    pub fn to_form_body(&self) -> String {
        format!(
            "username={}&password={}",
            urlencoding::encode(&self.email),
            urlencoding::encode(&self.password)
        )
    }
}
