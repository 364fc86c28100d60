//! Application context
//!
//! Everything a view needs, built once at start-up and passed down
//! explicitly instead of living in globals.

use std::sync::Arc;

use crate::api::{ApiClient, ClientError, ResourceClient};
use crate::config::{Config, ValidationConfig};
use crate::services::{Confirm, Notifier, PostActions, SessionStore};

/// Shared dependencies of every view
#[derive(Clone)]
pub struct AppContext {
    pub config: Arc<Config>,
    pub session: Arc<SessionStore>,
    pub resources: ResourceClient,
    pub actions: PostActions,
    pub notifier: Arc<dyn Notifier>,
    pub confirm: Arc<dyn Confirm>,
}

impl AppContext {
    /// Wire the HTTP client, session store and resource clients together
    pub fn new(
        config: Config,
        notifier: Arc<dyn Notifier>,
        confirm: Arc<dyn Confirm>,
    ) -> Result<Self, ClientError> {
        let api = Arc::new(ApiClient::new(&config.api)?);
        let session = Arc::new(SessionStore::new(api.clone(), notifier.clone()));
        let resources = ResourceClient::new(api, notifier.clone());
        let actions = PostActions::new(resources.clone(), confirm.clone());

        Ok(Self {
            config: Arc::new(config),
            session,
            resources,
            actions,
            notifier,
            confirm,
        })
    }

    /// Client-side input limits
    pub fn limits(&self) -> &ValidationConfig {
        &self.config.validation
    }
}
