//! Registration view

use std::sync::atomic::AtomicBool;
use std::sync::{Mutex, MutexGuard};

use super::{InFlight, Mount, SubmitOutcome};
use crate::models::RegisterInput;
use crate::services::{is_user_valid, messages, UserForm};
use crate::shell::{AppContext, Route};

/// Name/email/password sign-up form
pub struct RegisterView {
    ctx: AppContext,
    input: Mutex<RegisterInput>,
    in_flight: AtomicBool,
}

impl RegisterView {
    pub async fn mount(ctx: AppContext) -> Mount<RegisterView> {
        if ctx.session.wait_until_loaded().await.is_authenticated() {
            ctx.notifier.info(messages::ALREADY_LOGGED_IN);
            return Mount::Redirect(Route::PostIndex);
        }
        Mount::Ready(RegisterView {
            ctx,
            input: Mutex::new(RegisterInput::default()),
            in_flight: AtomicBool::new(false),
        })
    }

    fn lock(&self) -> MutexGuard<'_, RegisterInput> {
        self.input.lock().unwrap_or_else(|e| e.into_inner())
    }

    pub fn set_user_name(&self, user_name: impl Into<String>) {
        self.lock().user_name = user_name.into();
    }

    pub fn set_email(&self, email: impl Into<String>) {
        self.lock().email = email.into();
    }

    pub fn set_password(&self, password: impl Into<String>) {
        self.lock().password = password.into();
    }

    pub fn input(&self) -> RegisterInput {
        self.lock().clone()
    }

    /// Validate and create the account; success leads to the login form
    pub async fn submit(&self) -> SubmitOutcome {
        let Some(_guard) = InFlight::begin(&self.in_flight) else {
            return SubmitOutcome::Ignored;
        };

        let input = self.input();
        let ctx = &self.ctx;
        if !is_user_valid(UserForm::Register(&input), ctx.limits(), ctx.notifier.as_ref()) {
            return SubmitOutcome::Rejected;
        }

        if ctx.session.register(&input).await {
            SubmitOutcome::Navigate(Route::UserLogin)
        } else {
            SubmitOutcome::Failed
        }
    }

    pub fn render(&self) -> String {
        let input = self.lock();
        format!(
            "== Sign up ==\nusername: {}\nemail:    {}\npassword: {}\n",
            input.user_name,
            input.email,
            "*".repeat(input.password.chars().count())
        )
    }
}
