//! Random dog image API (third party)

use serde::Deserialize;

use super::{ApiClient, ClientError, ResourceClient};
use crate::services::{messages, show_error};

/// `{"message": "<image url>", "status": "success"}`
#[derive(Debug, Deserialize)]
struct RandomImage {
    message: String,
}

impl ResourceClient {
    /// Fetch a random dog image URL; `None` when the API is unavailable
    pub async fn fetch_dog_image(&self) -> Option<String> {
        match self.try_fetch_dog_image().await {
            Ok(url) => Some(url),
            Err(e) => {
                show_error(self.notifier(), &e, messages::DOG_API_ERROR);
                None
            }
        }
    }

    async fn try_fetch_dog_image(&self) -> Result<String, ClientError> {
        let api = self.api();
        let response = api.send(api.http().get(api.dog_image_url())).await?;
        if !response.status().is_success() {
            return Err(ClientError::from_response(response).await);
        }
        let image: RandomImage = ApiClient::read_json(response).await?;
        Ok(image.message)
    }
}
