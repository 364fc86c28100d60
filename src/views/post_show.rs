//! Post detail view

use std::fmt::Write as _;

use super::Mount;
use crate::models::Post;
use crate::services::{can_modify, ActionOutcome};
use crate::shell::{AppContext, Route};

/// One post with its owner actions
pub struct PostShow {
    ctx: AppContext,
    post: Post,
}

impl PostShow {
    /// Load the post; a missing post sends the user back to the list
    pub async fn mount(ctx: AppContext, id: i64) -> Mount<PostShow> {
        match ctx.resources.get_post(id).await {
            Some(post) => Mount::Ready(PostShow { ctx, post }),
            None => Mount::Redirect(Route::PostIndex),
        }
    }

    pub fn post(&self) -> &Post {
        &self.post
    }

    pub fn edit(&self) -> Option<Route> {
        self.ctx.actions.handle_edit(&self.post, &self.ctx.session.current())
    }

    /// Delete this post; on success the view should be left for the list
    pub async fn delete(&self) -> (ActionOutcome, Option<Route>) {
        let outcome = self
            .ctx
            .actions
            .handle_delete(&self.post, &self.ctx.session.current())
            .await;
        let next = (outcome == ActionOutcome::Deleted).then_some(Route::PostIndex);
        (outcome, next)
    }

    pub fn render(&self) -> String {
        let post = &self.post;
        let mut out = String::new();
        let _ = writeln!(out, "== {} ==", post.title);
        let _ = writeln!(out, "{}", post.content);
        match &post.age_value {
            Some(age) => {
                let _ = writeln!(out, "age:   {}", age);
            }
            None => {
                let _ = writeln!(out, "age:   #{}", post.age_id);
            }
        }
        let _ = writeln!(out, "image: {}", post.image_url);
        if let Some(created) = post.created_at {
            let _ = writeln!(out, "posted {}", created.format("%Y-%m-%d %H:%M"));
        }
        if can_modify(post, &self.ctx.session.current()) {
            out.push_str("[edit] [delete]\n");
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::messages;
    use crate::test_support::{sample_post, FakeBackend};

    #[tokio::test]
    async fn test_missing_post_redirects_to_index() {
        let backend = FakeBackend::start().await;
        let (ctx, notifier) = backend.context(true).await;

        let mount = PostShow::mount(ctx, 42).await;

        assert!(matches!(mount, Mount::Redirect(Route::PostIndex)));
        assert_eq!(notifier.messages(), vec![messages::POST_NOT_FOUND.to_string()]);
    }

    #[tokio::test]
    async fn test_owner_sees_actions_and_can_delete() {
        let backend = FakeBackend::start().await;
        backend.insert_post(sample_post(3, 10));
        backend.login_as(10);
        let (ctx, _notifier) = backend.context(true).await;
        let Mount::Ready(view) = PostShow::mount(ctx, 3).await else {
            panic!("post should load");
        };

        assert!(view.render().contains("[edit] [delete]"));
        assert_eq!(view.edit(), Some(Route::PostEdit(3)));
        assert_eq!(view.delete().await, (ActionOutcome::Deleted, Some(Route::PostIndex)));
        assert_eq!(backend.post_count(), 0);
    }

    #[tokio::test]
    async fn test_visitor_sees_no_actions() {
        let backend = FakeBackend::start().await;
        backend.insert_post(sample_post(3, 10));
        let (ctx, _notifier) = backend.context(true).await;
        let Mount::Ready(view) = PostShow::mount(ctx, 3).await else {
            panic!("post should load");
        };

        assert!(!view.render().contains("[edit]"));
        assert_eq!(view.delete().await, (ActionOutcome::Denied, None));
        assert_eq!(backend.request_count("DELETE"), 0);
    }
}
