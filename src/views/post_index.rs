//! Post list view

use std::fmt::Write as _;
use std::sync::{Mutex, MutexGuard};

use super::Mount;
use crate::models::Post;
use crate::services::{can_modify, ActionOutcome};
use crate::shell::{AppContext, Route};

pub const EMPTY_STATE: &str = "No posts yet.";

/// Every post, with show/edit/delete per row
pub struct PostIndex {
    ctx: AppContext,
    posts: Mutex<Vec<Post>>,
}

impl PostIndex {
    /// Load the list. A failed load shows an empty list; the notice has
    /// already been raised by the resource client.
    pub async fn mount(ctx: AppContext) -> Mount<PostIndex> {
        let view = PostIndex {
            ctx,
            posts: Mutex::new(Vec::new()),
        };
        view.refresh().await;
        Mount::Ready(view)
    }

    fn lock(&self) -> MutexGuard<'_, Vec<Post>> {
        self.posts.lock().unwrap_or_else(|e| e.into_inner())
    }

    /// Re-read the list from the server; keeps the old rows on failure
    pub async fn refresh(&self) {
        if let Some(posts) = self.ctx.resources.list_posts().await {
            tracing::debug!(count = posts.len(), "post list loaded");
            *self.lock() = posts;
        }
    }

    pub fn posts(&self) -> Vec<Post> {
        self.lock().clone()
    }

    fn find(&self, id: i64) -> Option<Post> {
        self.lock().iter().find(|p| p.id == id).cloned()
    }

    /// Whether the "new post" action is offered
    pub fn can_create(&self) -> bool {
        self.ctx.session.current().is_authenticated()
    }

    pub fn show(&self, id: i64) -> Option<Route> {
        self.find(id).map(|post| self.ctx.actions.handle_show(&post))
    }

    pub fn edit(&self, id: i64) -> Option<Route> {
        let post = self.find(id)?;
        self.ctx.actions.handle_edit(&post, &self.ctx.session.current())
    }

    /// Delete a row and reload the list when it is gone
    pub async fn delete(&self, id: i64) -> Option<ActionOutcome> {
        let post = self.find(id)?;
        let outcome = self
            .ctx
            .actions
            .handle_delete(&post, &self.ctx.session.current())
            .await;
        if outcome == ActionOutcome::Deleted {
            self.refresh().await;
        }
        Some(outcome)
    }

    pub fn render(&self) -> String {
        let session = self.ctx.session.current();
        let posts = self.lock();
        let mut out = String::from("== Posts ==\n");

        if posts.is_empty() {
            out.push_str(EMPTY_STATE);
            out.push('\n');
        }
        for post in posts.iter() {
            let actions = if can_modify(post, &session) {
                "[show] [edit] [delete]"
            } else {
                "[show] (edit) (delete)"
            };
            let _ = writeln!(out, "#{:<4} {:<20} {}", post.id, post.title, actions);
        }
        if session.is_authenticated() {
            out.push_str("[new]\n");
        }
        out
    }
}
