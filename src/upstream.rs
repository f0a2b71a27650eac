use crate::config::Credentials;
use crate::error::ProxyError;
use crate::models::{CompletionRequest, CompletionResponse};

// Client for the DashScope apps completion endpoint. Exactly one outbound
// call per invocation; no retries, transport-default timeout.
pub struct UpstreamClient {
    client: reqwest::Client,
    base_url: String,
}

impl UpstreamClient {
    pub fn new(base_url: String) -> Self {
        Self {
            client: reqwest::Client::new(),
            base_url,
        }
    }

    pub fn completion_url(&self, app_id: &str) -> String {
        format!("{}/api/v1/apps/{}/completion", self.base_url, app_id)
    }

    // Forward one prompt upstream and map the outcome. The caller must have
    // already passed the admission gate and resolved the credentials.
    pub async fn complete(
        &self,
        creds: Credentials<'_>,
        prompt: &str,
    ) -> Result<String, ProxyError> {
        let url = self.completion_url(creds.app_id);

        let result = self
            .client
            .post(&url)
            .bearer_auth(creds.api_key)
            .json(&CompletionRequest::new(prompt))
            .send()
            .await;

        let response = match result {
            Ok(response) => response,
            Err(e) => return Err(ProxyError::Network(e.to_string())),
        };

        let status = response.status();
        if !status.is_success() {
            // body text is best-effort; a read failure leaves it empty
            let body = response.text().await.unwrap_or_default();
            eprintln!("[Upstream] error status {}: {}", status, body);
            return Err(ProxyError::Upstream {
                status: status.as_u16(),
                body,
            });
        }

        match response.json::<CompletionResponse>().await {
            Ok(body) => Ok(body.reply_text()),
            Err(e) => Err(ProxyError::Malformed(e.to_string())),
        }
    }
}
