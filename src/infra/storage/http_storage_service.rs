use crate::domain::ports::StorageService;
use crate::error::AppError;
use async_trait::async_trait;
use reqwest::multipart::{Form, Part};
use reqwest::Client;
use serde::Deserialize;
use std::time::Duration;
use tracing::{error, warn};

pub struct HttpStorageService {
    client: Client,
    api_url: String,
    api_key: String,
}

impl HttpStorageService {
    pub fn new(api_url: String, api_key: String) -> Self {
        Self {
            client: Client::builder()
                .timeout(Duration::from_secs(30))
                .build()
                .unwrap_or_else(|_| Client::new()),
            api_url,
            api_key,
        }
    }
}

#[derive(Deserialize)]
struct UploadResponse {
    url: String,
}

#[async_trait]
impl StorageService for HttpStorageService {
    async fn upload(&self, filename: &str, content_type: &str, bytes: Vec<u8>) -> Result<String, AppError> {
        let part = Part::bytes(bytes)
            .file_name(filename.to_string())
            .mime_str(content_type)
            .map_err(|_| AppError::Validation("Invalid content type".into()))?;

        let form = Form::new().part("file", part);

        let res = self.client.post(&self.api_url)
            .header("Authorization", format!("Bearer {}", self.api_key))
            .multipart(form)
            .send()
            .await
            .map_err(|e| {
                let msg = format!("Storage service connection error: {}", e);
                error!("{}", msg);
                AppError::ServiceUnavailable(msg)
            })?;

        if !res.status().is_success() {
            let status = res.status();
            let text = res.text().await.unwrap_or_default();
            let msg = format!("Storage upload failed. Status: {}, Body: {}", status, text);
            error!("{}", msg);
            return Err(AppError::ServiceUnavailable(msg));
        }

        let body: UploadResponse = res.json().await.map_err(|e| {
            error!("Storage service returned unparsable body: {}", e);
            AppError::ServiceUnavailable("Storage service returned an invalid response".into())
        })?;

        Ok(body.url)
    }

    async fn delete(&self, url: &str) -> Result<(), AppError> {
        let res = self.client.delete(&self.api_url)
            .header("Authorization", format!("Bearer {}", self.api_key))
            .query(&[("url", url)])
            .send()
            .await
            .map_err(|e| AppError::ServiceUnavailable(format!("Storage service connection error: {}", e)))?;

        if !res.status().is_success() {
            warn!("Storage delete for {} returned {}", url, res.status());
        }
        Ok(())
    }
}
