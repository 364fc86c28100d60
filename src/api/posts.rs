//! Post resource client
//!
//! Status handling per endpoint:
//! - list: any failure → "could not load posts", `None`
//! - get: 404 → "post not found", other failure → "could not load posts", `None`
//! - create/update: 400 → joined validation messages; update also maps
//!   404 and 403 to their own messages
//! - delete: 403 → no-permission message instead of the generic failure

use reqwest::{Response, StatusCode};

use super::{paths, responses, ApiClient, ClientError, ResourceClient};
use crate::models::{Post, PostInput};
use crate::services::{messages, show_error};

/// Result of a create or update request
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SaveOutcome {
    /// Stored by the server
    Saved,
    /// Rejected by server-side validation; carries the message shown
    Invalid(String),
    /// The post no longer exists
    NotFound,
    /// The session user does not own the post
    Forbidden,
    /// Transport failure or unexpected status
    Failed,
}

/// Result of a delete request
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeleteOutcome {
    Deleted,
    Forbidden,
    Failed,
}

impl ResourceClient {
    /// Fetch every post; `None` when the list could not be loaded
    pub async fn list_posts(&self) -> Option<Vec<Post>> {
        let result: Result<Vec<Post>, ClientError> = async {
            let api = self.api();
            let response = api.send(api.http().get(api.url(paths::POSTS_ALL))).await?;
            if !response.status().is_success() {
                return Err(ClientError::from_response(response).await);
            }
            ApiClient::read_json(response).await
        }
        .await;

        match result {
            Ok(posts) => Some(posts),
            Err(e) => {
                show_error(self.notifier(), &e, messages::POST_GET_FAILED);
                None
            }
        }
    }

    /// Fetch one post; `None` when it is missing or could not be loaded
    pub async fn get_post(&self, id: i64) -> Option<Post> {
        let result: Result<Option<Post>, ClientError> = async {
            let api = self.api();
            let response = api.send(api.http().get(api.url(&paths::post(id)))).await?;
            match response.status() {
                s if s.is_success() => Ok(Some(ApiClient::read_json(response).await?)),
                StatusCode::NOT_FOUND => Ok(None),
                _ => Err(ClientError::from_response(response).await),
            }
        }
        .await;

        match result {
            Ok(Some(post)) => Some(post),
            Ok(None) => {
                tracing::warn!(post_id = id, "post not found");
                self.notifier().error(messages::POST_NOT_FOUND);
                None
            }
            Err(e) => {
                show_error(self.notifier(), &e, messages::POST_GET_FAILED);
                None
            }
        }
    }

    /// Create a post owned by the session user
    pub async fn create_post(&self, input: &PostInput) -> SaveOutcome {
        let api = self.api();
        let request = api.http().post(api.url(paths::POSTS)).json(input);
        match api.send(request).await {
            Ok(response) => self.save_outcome(response, messages::POST_CREATE_FAILED).await,
            Err(e) => {
                show_error(self.notifier(), &e, messages::POST_CREATE_FAILED);
                SaveOutcome::Failed
            }
        }
    }

    /// Replace the editable fields of a post
    pub async fn update_post(&self, id: i64, input: &PostInput) -> SaveOutcome {
        let api = self.api();
        let request = api.http().put(api.url(&paths::post(id))).json(input);
        match api.send(request).await {
            Ok(response) => self.save_outcome(response, messages::POST_UPDATE_FAILED).await,
            Err(e) => {
                show_error(self.notifier(), &e, messages::POST_UPDATE_FAILED);
                SaveOutcome::Failed
            }
        }
    }

    /// Delete a post; only its owner may do so
    pub async fn delete_post(&self, id: i64) -> DeleteOutcome {
        let api = self.api();
        let response = match api.send(api.http().delete(api.url(&paths::post(id)))).await {
            Ok(response) => response,
            Err(e) => {
                show_error(self.notifier(), &e, messages::POST_DELETE_FAILED);
                return DeleteOutcome::Failed;
            }
        };

        let status = response.status();
        if status.is_success() {
            DeleteOutcome::Deleted
        } else if status == StatusCode::FORBIDDEN {
            tracing::warn!(post_id = id, "delete refused: not the owner");
            self.notifier().error(messages::NO_PERMISSION);
            DeleteOutcome::Forbidden
        } else {
            let e = ClientError::from_response(response).await;
            show_error(self.notifier(), &e, messages::POST_DELETE_FAILED);
            DeleteOutcome::Failed
        }
    }

    async fn save_outcome(&self, response: Response, failed_message: &str) -> SaveOutcome {
        match response.status() {
            s if s.is_success() => SaveOutcome::Saved,
            StatusCode::BAD_REQUEST => {
                match responses::show_validated_message(response, self.notifier()).await {
                    Some(message) => SaveOutcome::Invalid(message),
                    None => SaveOutcome::Failed,
                }
            }
            StatusCode::NOT_FOUND => {
                self.notifier().error(messages::POST_NOT_FOUND);
                SaveOutcome::NotFound
            }
            StatusCode::FORBIDDEN => {
                self.notifier().error(messages::NO_PERMISSION);
                SaveOutcome::Forbidden
            }
            _ => {
                let e = ClientError::from_response(response).await;
                show_error(self.notifier(), &e, failed_message);
                SaveOutcome::Failed
            }
        }
    }
}
