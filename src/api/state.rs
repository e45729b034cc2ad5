use std::sync::Arc;

use anyhow::{Error, Result};
use tiktoken_rs::CoreBPE;

use crate::ai::chat::{Chat, ChatBuilder, Transcript, tokenizer};
use crate::chat::SessionStore;
use crate::core::AppConfig;

pub struct AppState {
    pub config: AppConfig,
    pub store: SessionStore,
    // Loading the encoding is slow so it's shared across requests
    pub bpe: Arc<CoreBPE>,
}

impl AppState {
    pub fn new(config: AppConfig) -> Result<Self, Error> {
        let store = SessionStore::new(&config.sessions_path)?;
        let bpe = Arc::new(tokenizer()?);
        Ok(Self { config, store, bpe })
    }

    /// Build a chat for a single turn over `transcript`.
    pub fn chat(&self, transcript: Transcript) -> Chat {
        ChatBuilder::new(&self.config.provider, Arc::clone(&self.bpe))
            .transcript(transcript)
            .token_budget(self.config.max_response_tokens, self.config.token_limit)
            .build()
    }
}
