//! Age reference data

use reqwest::StatusCode;

use super::{paths, responses, ApiClient, ResourceClient};
use crate::models::Age;
use crate::services::{messages, show_error};

impl ResourceClient {
    /// Fetch every age category; `None` when they could not be loaded
    pub async fn list_ages(&self) -> Option<Vec<Age>> {
        let api = self.api();
        let response = match api.send(api.http().get(api.url(paths::AGES_ALL))).await {
            Ok(response) => response,
            Err(e) => {
                show_error(self.notifier(), &e, messages::AGE_GET_ERROR);
                return None;
            }
        };

        if response.status().is_success() {
            match ApiClient::read_json(response).await {
                Ok(ages) => return Some(ages),
                Err(e) => show_error(self.notifier(), &e, messages::AGE_GET_ERROR),
            }
        } else if response.status() == StatusCode::BAD_REQUEST {
            responses::show_validated_message(response, self.notifier()).await;
        } else {
            let e = super::ClientError::from_response(response).await;
            show_error(self.notifier(), &e, messages::AGE_GET_ERROR);
        }

        None
    }
}
