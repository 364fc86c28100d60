//! Login view

use std::sync::atomic::AtomicBool;
use std::sync::{Mutex, MutexGuard};

use super::{InFlight, Mount, SubmitOutcome};
use crate::models::LoginInput;
use crate::services::{is_user_valid, messages, UserForm};
use crate::shell::{AppContext, Route};

/// Email/password sign-in form
pub struct LoginView {
    ctx: AppContext,
    input: Mutex<LoginInput>,
    in_flight: AtomicBool,
}

impl LoginView {
    /// Open the form; a signed-in session is sent to the post list
    pub async fn mount(ctx: AppContext) -> Mount<LoginView> {
        if ctx.session.wait_until_loaded().await.is_authenticated() {
            ctx.notifier.info(messages::ALREADY_LOGGED_IN);
            return Mount::Redirect(Route::PostIndex);
        }
        Mount::Ready(LoginView {
            ctx,
            input: Mutex::new(LoginInput::default()),
            in_flight: AtomicBool::new(false),
        })
    }

    fn lock(&self) -> MutexGuard<'_, LoginInput> {
        self.input.lock().unwrap_or_else(|e| e.into_inner())
    }

    pub fn set_email(&self, email: impl Into<String>) {
        self.lock().email = email.into();
    }

    pub fn set_password(&self, password: impl Into<String>) {
        self.lock().password = password.into();
    }

    pub fn input(&self) -> LoginInput {
        self.lock().clone()
    }

    pub async fn submit(&self) -> SubmitOutcome {
        let Some(_guard) = InFlight::begin(&self.in_flight) else {
            return SubmitOutcome::Ignored;
        };

        let input = self.input();
        let ctx = &self.ctx;
        if !is_user_valid(UserForm::Login(&input), ctx.limits(), ctx.notifier.as_ref()) {
            return SubmitOutcome::Rejected;
        }

        if ctx.session.login(&input).await {
            SubmitOutcome::Navigate(Route::PostIndex)
        } else {
            SubmitOutcome::Failed
        }
    }

    pub fn render(&self) -> String {
        let input = self.lock();
        format!(
            "== Log in ==\nemail:    {}\npassword: {}\n",
            input.email,
            "*".repeat(input.password.chars().count())
        )
    }
}
