//! Post create/edit form
//!
//! States: `LoadingReferenceData` → `Ready` ⇄ `Submitting`.
//! A submit that arrives while another is in flight is dropped, and a form
//! that has been unmounted ignores any response that comes back late.

use std::fmt::Write as _;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Mutex, MutexGuard};

use super::{Mount, SubmitOutcome};
use crate::api::SaveOutcome;
use crate::models::{Age, PostInput};
use crate::services::{can_modify, is_post_valid, messages};
use crate::shell::{AppContext, Route};

/// Lifecycle of the form
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormState {
    LoadingReferenceData,
    Ready,
    Submitting,
}

/// Whether the form creates a post or edits an existing one
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormMode {
    Create,
    Edit(i64),
}

struct FormInner {
    state: FormState,
    draft: PostInput,
    ages: Vec<Age>,
}

/// Create/edit form for a post
pub struct PostForm {
    ctx: AppContext,
    mode: FormMode,
    inner: Mutex<FormInner>,
    mounted: AtomicBool,
}

impl PostForm {
    fn new(ctx: AppContext, mode: FormMode, draft: PostInput) -> Self {
        Self {
            ctx,
            mode,
            inner: Mutex::new(FormInner {
                state: FormState::LoadingReferenceData,
                draft,
                ages: Vec::new(),
            }),
            mounted: AtomicBool::new(true),
        }
    }

    /// Open an empty form; requires a signed-in session
    pub async fn mount_new(ctx: AppContext) -> Mount<PostForm> {
        if !ctx.session.wait_until_loaded().await.is_authenticated() {
            ctx.notifier.error(messages::LOGIN_REQUIRED);
            return Mount::Redirect(Route::UserLogin);
        }

        let form = PostForm::new(ctx, FormMode::Create, PostInput::default());
        form.load_reference_data().await;
        Mount::Ready(form)
    }

    /// Open the form on an existing post owned by the session user
    pub async fn mount_edit(ctx: AppContext, id: i64) -> Mount<PostForm> {
        let (session, post) = tokio::join!(ctx.session.wait_until_loaded(), ctx.resources.get_post(id));
        let Some(post) = post else {
            return Mount::Redirect(Route::PostIndex);
        };

        if !can_modify(&post, &session) {
            tracing::warn!(post_id = id, owner = post.user_id, "edit denied: not the owner");
            ctx.notifier.error(messages::NO_PERMISSION);
            return Mount::Redirect(Route::PostIndex);
        }

        let form = PostForm::new(ctx, FormMode::Edit(id), PostInput::from(&post));
        form.load_reference_data().await;
        Mount::Ready(form)
    }

    /// Fetch the age list and, when the draft has none, a dog image
    async fn load_reference_data(&self) {
        let needs_image = self.lock().draft.image_url.trim().is_empty();
        let resources = &self.ctx.resources;

        let (ages, image) = tokio::join!(resources.list_ages(), async {
            if needs_image {
                resources.fetch_dog_image().await
            } else {
                None
            }
        });

        if !self.is_mounted() {
            return;
        }

        let mut inner = self.lock();
        inner.ages = ages.unwrap_or_default();
        if let Some(url) = image {
            inner.draft.image_url = url;
        }
        inner.state = FormState::Ready;
    }

    fn lock(&self) -> MutexGuard<'_, FormInner> {
        self.inner.lock().unwrap_or_else(|e| e.into_inner())
    }

    pub fn mode(&self) -> FormMode {
        self.mode
    }

    pub fn state(&self) -> FormState {
        self.lock().state
    }

    /// Copy of the current draft
    pub fn draft(&self) -> PostInput {
        self.lock().draft.clone()
    }

    /// Age options loaded at mount
    pub fn ages(&self) -> Vec<Age> {
        self.lock().ages.clone()
    }

    pub fn is_mounted(&self) -> bool {
        self.mounted.load(Ordering::SeqCst)
    }

    /// Stop applying responses to this form
    pub fn unmount(&self) {
        self.mounted.store(false, Ordering::SeqCst);
    }

    /// Apply an edit to the draft; ignored unless the form is `Ready`
    fn edit(&self, apply: impl FnOnce(&mut PostInput)) -> bool {
        let mut inner = self.lock();
        if inner.state != FormState::Ready {
            return false;
        }
        apply(&mut inner.draft);
        true
    }

    pub fn set_title(&self, title: impl Into<String>) -> bool {
        let title = title.into();
        self.edit(|d| d.title = title)
    }

    pub fn set_content(&self, content: impl Into<String>) -> bool {
        let content = content.into();
        self.edit(|d| d.content = content)
    }

    pub fn set_age(&self, age_id: Option<i64>) -> bool {
        self.edit(|d| d.age_id = age_id)
    }

    /// Replace the image with another random one
    pub async fn reroll_image(&self) -> bool {
        let Some(url) = self.ctx.resources.fetch_dog_image().await else {
            return false;
        };
        self.is_mounted() && self.edit(|d| d.image_url = url)
    }

    /// Validate and send the draft.
    ///
    /// The `Ready` → `Submitting` check happens before the first await, so a
    /// second call while a request is in flight returns `Ignored`.
    pub async fn submit(&self) -> SubmitOutcome {
        let draft = {
            let mut inner = self.lock();
            if inner.state != FormState::Ready {
                tracing::debug!(state = ?inner.state, "submit ignored");
                return SubmitOutcome::Ignored;
            }
            inner.state = FormState::Submitting;
            inner.draft.clone()
        };

        let outcome = self.send(&draft).await;

        if !self.is_mounted() {
            tracing::debug!("form unmounted; dropping submit result");
            return SubmitOutcome::Ignored;
        }
        self.lock().state = FormState::Ready;
        outcome
    }

    async fn send(&self, draft: &PostInput) -> SubmitOutcome {
        let ctx = &self.ctx;
        if !is_post_valid(draft, ctx.limits(), ctx.notifier.as_ref()) {
            return SubmitOutcome::Rejected;
        }

        match self.mode {
            FormMode::Create => match ctx.resources.create_post(draft).await {
                SaveOutcome::Saved => {
                    ctx.notifier.info(messages::POST_CREATE_SUCCEEDED);
                    SubmitOutcome::Navigate(Route::PostIndex)
                }
                SaveOutcome::Invalid(_) => SubmitOutcome::Rejected,
                SaveOutcome::NotFound | SaveOutcome::Forbidden | SaveOutcome::Failed => {
                    SubmitOutcome::Failed
                }
            },
            FormMode::Edit(id) => {
                if !ctx.confirm.confirm(messages::POST_EXECUTE_CONFIRM).await {
                    ctx.notifier.info(messages::CANCELLED);
                    return SubmitOutcome::Cancelled;
                }
                match ctx.resources.update_post(id, draft).await {
                    SaveOutcome::Saved => {
                        ctx.notifier.info(messages::POST_UPDATE_SUCCEEDED);
                        SubmitOutcome::Navigate(Route::PostIndex)
                    }
                    SaveOutcome::Invalid(_) => SubmitOutcome::Rejected,
                    SaveOutcome::NotFound | SaveOutcome::Forbidden => {
                        SubmitOutcome::Navigate(Route::PostIndex)
                    }
                    SaveOutcome::Failed => SubmitOutcome::Failed,
                }
            }
        }
    }

    pub fn render(&self) -> String {
        let inner = self.lock();
        let mut out = String::new();

        let heading = match self.mode {
            FormMode::Create => "New post".to_string(),
            FormMode::Edit(id) => format!("Edit post #{}", id),
        };
        let _ = writeln!(out, "== {} ==", heading);

        if inner.state == FormState::LoadingReferenceData {
            out.push_str("Loading...\n");
            return out;
        }

        let _ = writeln!(out, "title:   {}", inner.draft.title);
        let _ = writeln!(out, "content: {}", inner.draft.content);
        out.push_str("age:\n");
        for age in &inner.ages {
            let mark = if inner.draft.age_id == Some(age.id) { "x" } else { " " };
            let _ = writeln!(out, "  [{}] {} {}", mark, age.id, age.value);
        }
        let _ = writeln!(out, "image:   {}", inner.draft.image_url);
        if inner.state == FormState::Submitting {
            out.push_str("(submitting...)\n");
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{sample_post, FakeBackend};
    use std::time::Duration;

    async fn ready(mount: Mount<PostForm>) -> PostForm {
        match mount {
            Mount::Ready(form) => form,
            Mount::Redirect(route) => panic!("unexpected redirect to {}", route),
        }
    }

    fn fill(form: &PostForm) {
        assert!(form.set_title("Rex"));
        assert!(form.set_content("Good boy"));
        assert!(form.set_age(Some(1)));
    }

    #[tokio::test]
    async fn test_mount_new_loads_reference_data() {
        let backend = FakeBackend::start().await;
        backend.login_as(10);
        let (ctx, notifier) = backend.context(true).await;

        let form = ready(PostForm::mount_new(ctx).await).await;

        assert_eq!(form.state(), FormState::Ready);
        assert_eq!(form.ages().len(), 3);
        assert!(!form.draft().image_url.is_empty());
        assert!(notifier.notices().is_empty());
    }

    #[tokio::test]
    async fn test_mount_new_requires_login() {
        let backend = FakeBackend::start().await;
        let (ctx, notifier) = backend.context(true).await;

        let mount = PostForm::mount_new(ctx).await;

        assert!(matches!(mount, Mount::Redirect(Route::UserLogin)));
        assert_eq!(notifier.messages(), vec![messages::LOGIN_REQUIRED.to_string()]);
    }

    #[tokio::test]
    async fn test_mount_new_waits_for_session_lookup() {
        let backend = FakeBackend::start().await;
        backend.login_as(10);
        let (ctx, notifier) = backend.fresh_context(true);

        let (_, mount) = tokio::join!(ctx.session.initialize(), PostForm::mount_new(ctx.clone()));

        assert!(matches!(mount, Mount::Ready(_)));
        assert_eq!(ctx.session.current().user_id(), Some(10));
        assert!(notifier.notices().is_empty());
    }

    #[tokio::test]
    async fn test_mount_edit_waits_for_session_lookup() {
        let backend = FakeBackend::start().await;
        backend.insert_post(sample_post(1, 10));
        backend.login_as(10);
        let (ctx, notifier) = backend.fresh_context(true);

        let (_, mount) = tokio::join!(ctx.session.initialize(), PostForm::mount_edit(ctx.clone(), 1));

        let form = ready(mount).await;
        assert_eq!(form.mode(), FormMode::Edit(1));
        assert!(notifier.notices().is_empty());
    }

    #[tokio::test]
    async fn test_create_submits_and_navigates() {
        let backend = FakeBackend::start().await;
        backend.login_as(10);
        let (ctx, notifier) = backend.context(true).await;
        let form = ready(PostForm::mount_new(ctx).await).await;
        fill(&form);

        let outcome = form.submit().await;

        assert_eq!(outcome, SubmitOutcome::Navigate(Route::PostIndex));
        assert_eq!(backend.post_count(), 1);
        assert_eq!(notifier.messages(), vec![messages::POST_CREATE_SUCCEEDED.to_string()]);
    }

    #[tokio::test]
    async fn test_double_submit_sends_one_request() {
        let backend = FakeBackend::start().await;
        backend.login_as(10);
        backend.set_write_delay(Duration::from_millis(100));
        let (ctx, _notifier) = backend.context(true).await;
        let form = ready(PostForm::mount_new(ctx).await).await;
        fill(&form);

        let (first, second) = tokio::join!(form.submit(), form.submit());

        assert_eq!(first, SubmitOutcome::Navigate(Route::PostIndex));
        assert_eq!(second, SubmitOutcome::Ignored);
        assert_eq!(backend.request_count("POST /api/posts"), 1);
        assert_eq!(form.state(), FormState::Ready);
    }

    #[tokio::test]
    async fn test_invalid_draft_never_reaches_network() {
        let backend = FakeBackend::start().await;
        backend.login_as(10);
        let (ctx, notifier) = backend.context(true).await;
        let form = ready(PostForm::mount_new(ctx).await).await;
        form.set_title("Rex");
        form.set_content("Good boy");

        let outcome = form.submit().await;

        assert_eq!(outcome, SubmitOutcome::Rejected);
        assert_eq!(form.state(), FormState::Ready);
        assert_eq!(backend.request_count("POST /api/posts"), 0);
        assert_eq!(notifier.messages(), vec![messages::VALIDATE_POST_AGE_ID_EMPTY.to_string()]);
    }

    #[tokio::test]
    async fn test_server_validation_returns_to_ready() {
        let backend = FakeBackend::start().await;
        backend.login_as(10);
        backend.reject_with(vec!["Title must be unique"]);
        let (ctx, _notifier) = backend.context(true).await;
        let form = ready(PostForm::mount_new(ctx).await).await;
        fill(&form);

        assert_eq!(form.submit().await, SubmitOutcome::Rejected);
        assert_eq!(form.state(), FormState::Ready);
    }

    #[tokio::test]
    async fn test_edit_other_users_post_redirects() {
        let backend = FakeBackend::start().await;
        backend.insert_post(sample_post(1, 10));
        backend.login_as(11);
        let (ctx, notifier) = backend.context(true).await;

        let mount = PostForm::mount_edit(ctx, 1).await;

        assert!(matches!(mount, Mount::Redirect(Route::PostIndex)));
        assert_eq!(notifier.messages(), vec![messages::NO_PERMISSION.to_string()]);
        assert_eq!(backend.request_count("PUT"), 0);
    }

    #[tokio::test]
    async fn test_edit_missing_post_redirects() {
        let backend = FakeBackend::start().await;
        backend.login_as(10);
        let (ctx, notifier) = backend.context(true).await;

        let mount = PostForm::mount_edit(ctx, 404).await;

        assert!(matches!(mount, Mount::Redirect(Route::PostIndex)));
        assert_eq!(notifier.messages(), vec![messages::POST_NOT_FOUND.to_string()]);
    }

    #[tokio::test]
    async fn test_edit_own_post_updates() {
        let backend = FakeBackend::start().await;
        backend.insert_post(sample_post(1, 10));
        backend.login_as(10);
        let (ctx, _notifier) = backend.context(true).await;
        let form = ready(PostForm::mount_edit(ctx, 1).await).await;

        assert_eq!(form.draft().image_url, sample_post(1, 10).image_url);
        assert_eq!(backend.request_count("GET /dog/random"), 0);
        form.set_title("Renamed");

        assert_eq!(form.submit().await, SubmitOutcome::Navigate(Route::PostIndex));
        assert_eq!(backend.post(1).map(|p| p.title), Some("Renamed".to_string()));
    }

    #[tokio::test]
    async fn test_edit_declined_confirmation_sends_nothing() {
        let backend = FakeBackend::start().await;
        backend.insert_post(sample_post(1, 10));
        backend.login_as(10);
        let (ctx, notifier) = backend.context(false).await;
        let form = ready(PostForm::mount_edit(ctx, 1).await).await;

        assert_eq!(form.submit().await, SubmitOutcome::Cancelled);
        assert_eq!(backend.request_count("PUT"), 0);
        assert_eq!(notifier.messages(), vec![messages::CANCELLED.to_string()]);
    }

    #[tokio::test]
    async fn test_unmounted_form_ignores_late_result() {
        let backend = FakeBackend::start().await;
        backend.login_as(10);
        backend.set_write_delay(Duration::from_millis(100));
        let (ctx, _notifier) = backend.context(true).await;
        let form = ready(PostForm::mount_new(ctx).await).await;
        fill(&form);

        let (outcome, ()) = tokio::join!(form.submit(), async {
            tokio::time::sleep(Duration::from_millis(20)).await;
            form.unmount();
        });

        assert_eq!(outcome, SubmitOutcome::Ignored);
        assert_eq!(form.state(), FormState::Submitting);
    }

    #[tokio::test]
    async fn test_reroll_image_replaces_url() {
        let backend = FakeBackend::start().await;
        backend.login_as(10);
        let (ctx, _notifier) = backend.context(true).await;
        let form = ready(PostForm::mount_new(ctx).await).await;
        let before = form.draft().image_url;

        assert!(form.reroll_image().await);
        assert_ne!(form.draft().image_url, before);
    }

    #[tokio::test]
    async fn test_render_marks_selected_age() {
        let backend = FakeBackend::start().await;
        backend.login_as(10);
        let (ctx, _notifier) = backend.context(true).await;
        let form = ready(PostForm::mount_new(ctx).await).await;
        form.set_age(Some(2));

        let text = form.render();

        assert!(text.starts_with("== New post =="));
        assert!(text.contains("[x] 2"));
        assert!(text.contains("[ ] 1"));
    }
}
