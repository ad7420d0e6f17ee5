use crate::domain::ports::ChatService;
use crate::error::AppError;
use async_trait::async_trait;
use reqwest::Client;
use serde_json::{json, Value};
use std::time::Duration;
use tracing::{error, info};

const UPSTREAM_TIMEOUT_SECS: u64 = 10;

/// Stateless relay to the external conversational service. One attempt per
/// request, bounded by a fixed timeout; the caller decides whether to retry.
pub struct HttpChatService {
    client: Client,
    api_url: String,
}

impl HttpChatService {
    pub fn new(api_url: String) -> Self {
        Self {
            client: Client::builder()
                .timeout(Duration::from_secs(UPSTREAM_TIMEOUT_SECS))
                .build()
                .unwrap_or_else(|_| Client::new()),
            api_url,
        }
    }
}

#[async_trait]
impl ChatService for HttpChatService {
    async fn relay(&self, message: &str, session_id: &str, context: Option<&Value>) -> Result<Value, AppError> {
        let payload = json!({
            "message": message,
            "session_id": session_id,
            "context": context,
        });

        let res = self.client.post(&self.api_url)
            .json(&payload)
            .send()
            .await
            .map_err(|e| {
                error!("Chat upstream unreachable: {}", e);
                AppError::ServiceUnavailable("Assistant is currently unavailable".into())
            })?;

        let status = res.status();
        if !status.is_success() {
            let text = res.text().await.unwrap_or_default();
            error!("Chat upstream error {}: {}", status, text);
            return Err(AppError::ServiceUnavailable("Assistant is currently unavailable".into()));
        }

        let body: Value = res.json().await.map_err(|e| {
            error!("Chat upstream returned unparsable body: {}", e);
            AppError::ServiceUnavailable("Assistant returned an invalid response".into())
        })?;

        info!("Chat relay completed for session {}", session_id);
        Ok(body)
    }
}
