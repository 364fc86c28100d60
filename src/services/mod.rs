//! Services layer - Client logic
//!
//! This module contains the logic shared by every view:
//! - Session store (authentication state and its operations)
//! - Input validation
//! - Post action coordination (ownership checks, delete flow)
//! - User notifications and confirmation prompts

pub mod actions;
pub mod confirm;
pub mod messages;
pub mod notifier;
pub mod session;
pub mod validation;

pub use actions::{can_modify, ActionOutcome, PostActions};
pub use confirm::{AutoConfirm, Confirm};
pub use notifier::{
    show_error, ConsoleNotifier, Notice, NoticeLevel, Notifier, RecordingNotifier, TracingNotifier,
};
pub use session::SessionStore;
pub use validation::{
    is_post_valid, is_user_valid, validate_post, validate_user, UserForm, ValidationError,
};
