//! Form and view components
//!
//! Each view is mounted with the `AppContext`, loads what it needs, and
//! reports navigation as a value instead of performing it. Views render to
//! plain text for the terminal shell.

mod login;
mod post_form;
mod post_index;
mod post_show;
mod register;

use std::sync::atomic::{AtomicBool, Ordering};

use crate::shell::Route;

pub use login::LoginView;
pub use post_form::{FormMode, FormState, PostForm};
pub use post_index::PostIndex;
pub use post_show::PostShow;
pub use register::RegisterView;

/// Result of mounting a view
pub enum Mount<T> {
    /// The view is ready to render
    Ready(T),
    /// The view refused to open; go here instead
    Redirect(Route),
}

/// Result of submitting a form
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmitOutcome {
    /// A submission was already in flight (or the form was not ready)
    Ignored,
    /// Client or server validation failed; the message has been shown
    Rejected,
    /// The user declined the confirmation
    Cancelled,
    /// The request failed; the form stays open
    Failed,
    /// Done; leave the form for this route
    Navigate(Route),
}

/// In-flight flag held for the duration of one submission
pub(crate) struct InFlight<'a>(&'a AtomicBool);

impl<'a> InFlight<'a> {
    /// Claim the flag, or `None` if a submission is already running
    pub(crate) fn begin(flag: &'a AtomicBool) -> Option<Self> {
        if flag.swap(true, Ordering::SeqCst) {
            None
        } else {
            Some(Self(flag))
        }
    }
}

impl Drop for InFlight<'_> {
    fn drop(&mut self) {
        self.0.store(false, Ordering::SeqCst);
    }
}
