use std::env;

use crate::ai::chat::{DEFAULT_MAX_RESPONSE_TOKENS, DEFAULT_TOKEN_LIMIT};
use crate::openai::ProviderConfig;

#[derive(Clone, Debug)]
pub struct AppConfig {
    pub sessions_path: String,
    pub static_path: String,
    pub prompt_path: String,
    pub token_limit: usize,
    pub max_response_tokens: usize,
    pub provider: ProviderConfig,
}

fn env_usize(key: &str, default: usize) -> usize {
    env::var(key)
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(default)
}

impl Default for AppConfig {
    fn default() -> Self {
        let sessions_path =
            env::var("PARLEY_SESSIONS_PATH").unwrap_or_else(|_| "./sessions".to_string());
        let static_path = env::var("PARLEY_STATIC_PATH").unwrap_or_else(|_| "./dist".to_string());
        let prompt_path = env::var("PARLEY_PROMPT_PATH")
            .unwrap_or_else(|_| "./prompts/system_prompt.txt".to_string());
        let token_limit = env_usize("PARLEY_TOKEN_LIMIT", DEFAULT_TOKEN_LIMIT);
        let max_response_tokens =
            env_usize("PARLEY_MAX_RESPONSE_TOKENS", DEFAULT_MAX_RESPONSE_TOKENS);

        // Missing provider settings aren't checked here. Requests to
        // the provider fail instead and surface as a chat error.
        let api_key = env::var("AZURE_OPENAI_API_KEY").unwrap_or_default();
        let endpoint = env::var("AZURE_OPENAI_ENDPOINT").unwrap_or_default();
        let deployment = env::var("AZURE_OPENAI_DEPLOYMENT_NAME").unwrap_or_default();

        Self {
            sessions_path,
            static_path,
            prompt_path,
            token_limit,
            max_response_tokens,
            provider: ProviderConfig::new(&api_key, &endpoint, &deployment),
        }
    }
}
