//! User endpoints
//!
//! Raw calls behind the session store. These return typed replies for the
//! statuses each endpoint defines and `ClientError` for everything else;
//! turning them into notices is the session store's job.

use reqwest::header::CONTENT_TYPE;
use reqwest::StatusCode;

use super::{paths, ApiClient, ClientError, FieldError};
use crate::models::{LoginInput, RegisterInput, UserProfile};

/// Reply of `GET /api/users/me`
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CurrentUser {
    Authenticated(UserProfile),
    Unauthenticated,
}

/// Reply of `POST /api/users/register`
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RegisterReply {
    Registered,
    Rejected(Vec<FieldError>),
}

impl ApiClient {
    /// Look up the user bound to the session cookie
    pub async fn current_user(&self) -> Result<CurrentUser, ClientError> {
        let request = self.http().get(self.url(paths::CURRENT_USER));
        let response = self.send(request).await?;

        match response.status() {
            StatusCode::OK => Ok(CurrentUser::Authenticated(Self::read_json(response).await?)),
            StatusCode::UNAUTHORIZED => Ok(CurrentUser::Unauthenticated),
            _ => Err(ClientError::from_response(response).await),
        }
    }

    /// Submit credentials; the server sets the session cookie on success
    pub async fn login(&self, input: &LoginInput) -> Result<(), ClientError> {
        let request = self
            .http()
            .post(self.url(paths::LOGIN))
            .header(CONTENT_TYPE, "application/x-www-form-urlencoded")
            .body(input.to_form_body());
        let response = self.send(request).await?;

        if response.status().is_success() {
            Ok(())
        } else {
            Err(ClientError::from_response(response).await)
        }
    }

    /// End the server session
    pub async fn logout(&self) -> Result<(), ClientError> {
        let request = self.http().post(self.url(paths::LOGOUT));
        let response = self.send(request).await?;

        if response.status().is_success() {
            Ok(())
        } else {
            Err(ClientError::from_response(response).await)
        }
    }

    /// Create an account
    pub async fn register(&self, input: &RegisterInput) -> Result<RegisterReply, ClientError> {
        let request = self.http().post(self.url(paths::REGISTER)).json(input);
        let response = self.send(request).await?;
        let status = response.status();

        if status.is_success() {
            Ok(RegisterReply::Registered)
        } else if status == StatusCode::BAD_REQUEST {
            Ok(RegisterReply::Rejected(Self::read_json(response).await?))
        } else {
            Err(ClientError::from_response(response).await)
        }
    }
}
