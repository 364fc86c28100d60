//! Session store
//!
//! Holds the client's authentication state and the operations that change it:
//! - initialize: one-time current-user lookup at application start
//! - login / logout / register against the post API
//!
//! The store is a single instance shared through `AppContext`; views read a
//! snapshot or subscribe to changes through a `watch` channel.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tokio::sync::watch;

use super::messages;
use super::notifier::{show_error, Notifier};
use crate::api::{responses::join_messages, ApiClient, CurrentUser, RegisterReply};
use crate::models::{LoginInput, RegisterInput, Session};

/// Process-wide authentication state
pub struct SessionStore {
    api: Arc<ApiClient>,
    notifier: Arc<dyn Notifier>,
    state: watch::Sender<Session>,
    initialized: AtomicBool,
}

impl SessionStore {
    /// Create a store in the `Loading` state
    pub fn new(api: Arc<ApiClient>, notifier: Arc<dyn Notifier>) -> Self {
        let (state, _) = watch::channel(Session::Loading);
        Self {
            api,
            notifier,
            state,
            initialized: AtomicBool::new(false),
        }
    }

    /// Snapshot of the current session
    pub fn current(&self) -> Session {
        self.state.borrow().clone()
    }

    /// Receive every future session change
    pub fn subscribe(&self) -> watch::Receiver<Session> {
        self.state.subscribe()
    }

    /// Wait until the first lookup has finished and return the session.
    ///
    /// Starts the lookup if nobody has yet.
    pub async fn wait_until_loaded(&self) -> Session {
        self.initialize().await;
        let mut rx = self.subscribe();
        let loaded = rx.wait_for(|s| !s.is_loading()).await.map(|s| s.clone());
        loaded.unwrap_or_else(|_| self.current())
    }

    /// Look up the current user once per application start.
    ///
    /// Later calls return immediately; returns whether this call did the lookup.
    pub async fn initialize(&self) -> bool {
        if self.initialized.swap(true, Ordering::SeqCst) {
            tracing::debug!("session already initialized");
            return false;
        }
        self.refresh().await;
        true
    }

    /// Re-read the current user from the server.
    ///
    /// Always leaves the store out of `Loading`: any failure other than a
    /// plain 401 is reported and treated as signed out.
    pub async fn refresh(&self) {
        let next = match self.api.current_user().await {
            Ok(CurrentUser::Authenticated(user)) => {
                tracing::info!(user_id = user.id, "session restored");
                Session::Authenticated(user)
            }
            Ok(CurrentUser::Unauthenticated) => {
                tracing::debug!("no active session");
                Session::Anonymous
            }
            Err(e) => {
                show_error(self.notifier.as_ref(), &e, messages::USER_INFO_GET_FAILED);
                Session::Anonymous
            }
        };
        self.state.send_replace(next);
    }

    /// Sign in and refresh the session; returns whether it succeeded
    pub async fn login(&self, input: &LoginInput) -> bool {
        match self.api.login(input).await {
            Ok(()) => {
                self.notifier.info(messages::LOG_IN_SUCCESS);
                self.refresh().await;
                true
            }
            Err(e) => {
                show_error(self.notifier.as_ref(), &e, messages::LOG_IN_FAILED);
                false
            }
        }
    }

    /// Create an account; returns whether it succeeded
    pub async fn register(&self, input: &RegisterInput) -> bool {
        match self.api.register(input).await {
            Ok(RegisterReply::Registered) => {
                self.notifier.info(messages::USER_REGISTER_SUCCEEDED);
                true
            }
            Ok(RegisterReply::Rejected(errors)) => {
                tracing::warn!(count = errors.len(), "registration rejected");
                self.notifier.error(&join_messages(&errors));
                false
            }
            Err(e) => {
                show_error(self.notifier.as_ref(), &e, messages::USER_REGISTER_FAILED);
                false
            }
        }
    }

    /// Sign out.
    ///
    /// On failure the session is left as it was, so the client never shows a
    /// signed-out state the server does not share.
    pub async fn logout(&self) -> bool {
        match self.api.logout().await {
            Ok(()) => {
                self.notifier.info(messages::LOG_OUT_SUCCESS);
                self.state.send_replace(Session::Anonymous);
                true
            }
            Err(e) => {
                show_error(self.notifier.as_ref(), &e, messages::LOG_OUT_FAILED);
                false
            }
        }
    }
}
