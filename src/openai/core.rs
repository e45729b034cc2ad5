use anyhow::{Error, Result, anyhow};
use serde::{Deserialize, Serialize};
use serde_json::{Value, json};

/// Azure only accepts requests pinned to a dated API version.
pub const API_VERSION: &str = "2024-02-15-preview";

#[derive(Clone, Copy, Serialize, Deserialize, Debug, PartialEq, Eq)]
pub enum Role {
    #[serde(rename = "system")]
    System,
    #[serde(rename = "assistant")]
    Assistant,
    #[serde(rename = "user")]
    User,
}

#[derive(Clone, Serialize, Deserialize, Debug, PartialEq, Eq)]
pub struct Message {
    pub role: Role,
    pub content: String,
}

impl Message {
    pub fn new(role: Role, content: &str) -> Self {
        Message {
            role,
            content: content.to_string(),
        }
    }
}

/// Connection settings for an Azure OpenAI deployment.
#[derive(Clone, Debug, Default)]
pub struct ProviderConfig {
    pub api_key: String,
    pub endpoint: String,
    pub deployment: String,
    pub api_version: String,
}

impl ProviderConfig {
    pub fn new(api_key: &str, endpoint: &str, deployment: &str) -> Self {
        Self {
            api_key: api_key.to_string(),
            endpoint: endpoint.to_string(),
            deployment: deployment.to_string(),
            api_version: API_VERSION.to_string(),
        }
    }

    fn completions_url(&self) -> String {
        format!(
            "{}/openai/deployments/{}/chat/completions?api-version={}",
            self.endpoint.trim_end_matches("/"),
            self.deployment,
            self.api_version
        )
    }
}

/// Request a chat completion for `messages` and return the raw JSON
/// response. Non-success statuses are returned as errors.
pub async fn completion(
    messages: &[Message],
    config: &ProviderConfig,
    max_tokens: u32,
    temperature: f64,
) -> Result<Value, Error> {
    let payload = json!({
        "messages": messages,
        "max_tokens": max_tokens,
        "temperature": temperature,
    });
    let response = reqwest::Client::new()
        .post(config.completions_url())
        .header("api-key", &config.api_key)
        .header("Content-Type", "application/json")
        .json(&payload)
        .send()
        .await?
        .error_for_status()?
        .json()
        .await?;

    Ok(response)
}

/// Pull the assistant's text out of a completion response.
pub fn completion_content(resp: &Value) -> Result<String, Error> {
    resp["choices"][0]["message"]["content"]
        .as_str()
        .map(String::from)
        .ok_or(anyhow!("No message received. Resp:\n\n {}", resp))
}
