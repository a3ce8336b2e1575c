#[cfg(test)]
#[path = "client_test.rs"]
mod tests;

use anyhow::bail;
use anyhow::Result;

use crate::config::Config;
use crate::config::ConfigKey;
use crate::domain::models::RelayErrorBody;
use crate::domain::models::RelayReply;
use crate::domain::models::RelayRequest;

#[derive(Clone)]
pub struct RelayClient {
    url: String,
}

impl Default for RelayClient {
    fn default() -> RelayClient {
        return RelayClient {
            url: Config::get(ConfigKey::RelayURL),
        };
    }
}

impl RelayClient {
    pub async fn send(&self, text: &str) -> Result<RelayReply> {
        let res = reqwest::Client::new()
            .post(format!("{url}/api/empathic-chatbot", url = self.url))
            .json(&RelayRequest {
                text: text.to_string(),
            })
            .send()
            .await?;

        if !res.status().is_success() {
            let status = res.status().as_u16();
            let body = res.text().await?;
            let message = serde_json::from_str::<RelayErrorBody>(&body)
                .unwrap_or_default()
                .error;

            tracing::error!(status = status, body = body.as_str(), "relay request failed");

            if message.is_empty() {
                bail!("An API error occurred.");
            }
            bail!(message);
        }

        let reply = res.json::<RelayReply>().await?;
        tracing::debug!(total_tokens = reply.usage.total_tokens, "relay reply received");

        return Ok(reply);
    }
}
