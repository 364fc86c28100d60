//! Confirmation affordance
//!
//! Destructive actions ask before they run. The question is asynchronous so a
//! surface can render its own prompt without blocking the event loop.

use async_trait::async_trait;

/// Asks the user to confirm an action
#[async_trait]
pub trait Confirm: Send + Sync {
    async fn confirm(&self, prompt: &str) -> bool;
}

/// Answers every prompt with the same value
#[derive(Debug, Clone, Copy)]
pub struct AutoConfirm(pub bool);

#[async_trait]
impl Confirm for AutoConfirm {
    async fn confirm(&self, prompt: &str) -> bool {
        tracing::debug!(prompt, answer = self.0, "auto-confirm");
        self.0
    }
}
