//! Post action coordinator
//!
//! Decides whether the session may show, edit or delete a post and runs the
//! delete flow. The ownership check here is advisory; the server enforces it
//! again on every write.

use std::sync::Arc;

use super::confirm::Confirm;
use super::messages;
use crate::api::{DeleteOutcome, ResourceClient};
use crate::models::{Post, Session};
use crate::shell::Route;

/// True when the session is signed in as the post's owner
pub fn can_modify(post: &Post, session: &Session) -> bool {
    session.user_id().is_some_and(|id| post.is_owned_by(id))
}

/// What a delete request ended with
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActionOutcome {
    /// The session may not modify the post; nothing was sent
    Denied,
    /// The user declined the confirmation; nothing was sent
    Cancelled,
    /// The post is gone; the caller refreshes its list or navigates away
    Deleted,
    /// The request failed; the reason has been shown
    Failed,
}

/// Show/edit/delete handlers shared by the list and detail views
#[derive(Clone)]
pub struct PostActions {
    resources: ResourceClient,
    confirm: Arc<dyn Confirm>,
}

impl PostActions {
    pub fn new(resources: ResourceClient, confirm: Arc<dyn Confirm>) -> Self {
        Self { resources, confirm }
    }

    /// Detail route of a post; anyone may view
    pub fn handle_show(&self, post: &Post) -> Route {
        Route::PostShow(post.id)
    }

    /// Edit route of a post, or `None` with a notice when not permitted
    pub fn handle_edit(&self, post: &Post, session: &Session) -> Option<Route> {
        if !can_modify(post, session) {
            self.resources.notifier().error(messages::NO_PERMISSION);
            return None;
        }
        Some(Route::PostEdit(post.id))
    }

    /// Check ownership, ask for confirmation, then delete
    pub async fn handle_delete(&self, post: &Post, session: &Session) -> ActionOutcome {
        if !can_modify(post, session) {
            tracing::debug!(post_id = post.id, "delete blocked: not the owner");
            self.resources.notifier().error(messages::NO_PERMISSION);
            return ActionOutcome::Denied;
        }

        if !self.confirm.confirm(messages::POST_EXECUTE_CONFIRM).await {
            return ActionOutcome::Cancelled;
        }

        match self.resources.delete_post(post.id).await {
            DeleteOutcome::Deleted => {
                tracing::info!(post_id = post.id, "post deleted");
                self.resources.notifier().info(messages::POST_DELETE_SUCCEEDED);
                ActionOutcome::Deleted
            }
            DeleteOutcome::Forbidden => ActionOutcome::Denied,
            DeleteOutcome::Failed => ActionOutcome::Failed,
        }
    }
}
