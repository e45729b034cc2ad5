use std::path::Path;
use std::sync::Arc;

use anyhow::{Context, Error, Result};
use tiktoken_rs::CoreBPE;

use super::models::Transcript;
use crate::ai::prompt;
use crate::openai::{Message, ProviderConfig, Role, completion, completion_content};

pub const DEFAULT_MAX_RESPONSE_TOKENS: usize = 250;
pub const DEFAULT_TOKEN_LIMIT: usize = 50000;

const COMPLETION_MAX_TOKENS: u32 = 800;
const COMPLETION_TEMPERATURE: f64 = 0.7;

// Rough allowance for the framing the API adds around each message
// and around the whole transcript.
const TOKENS_PER_MESSAGE: usize = 3;
const TOKENS_PER_TRANSCRIPT: usize = 3;

/// Load the tokenizer used for budgeting. `cl100k_base` is the
/// encoding for the GPT-4 family of deployments.
pub fn tokenizer() -> Result<CoreBPE, Error> {
    tiktoken_rs::cl100k_base()
}

/// Estimate the number of tokens `messages` take up in a request.
pub fn token_count(bpe: &CoreBPE, messages: &[Message]) -> usize {
    messages
        .iter()
        .map(|m| bpe.encode_ordinary(&m.content).len() + TOKENS_PER_MESSAGE)
        .sum::<usize>()
        + TOKENS_PER_TRANSCRIPT
}

/// A single conversation with an LLM using an Azure OpenAI chat
/// completion deployment. A `Chat` is cheap to build and is meant to
/// be rebuilt from the persisted transcript for every turn.
///
/// Use `ChatBuilder` to construct a valid `Chat`.
pub struct Chat {
    provider: ProviderConfig,
    bpe: Arc<CoreBPE>,
    transcript: Transcript,
    max_response_tokens: usize,
    token_limit: usize,
}

impl Chat {
    pub fn transcript(&self) -> &Transcript {
        &self.transcript
    }

    pub fn into_transcript(self) -> Transcript {
        self.transcript
    }

    pub fn token_count(&self) -> usize {
        token_count(&self.bpe, self.transcript.as_slice())
    }

    /// Replace the transcript with a lone system message built from
    /// the prompt file at `prompt_path` and today's date.
    pub async fn reset_system_message(&mut self, prompt_path: &Path) -> Result<(), Error> {
        let text = tokio::fs::read_to_string(prompt_path)
            .await
            .with_context(|| format!("Failed to read prompt file {}", prompt_path.display()))?;
        let content = prompt::system_message(&text, &prompt::today())?;
        self.transcript = Transcript::new_with_messages(vec![Message::new(Role::System, &content)]);
        Ok(())
    }

    /// Evict the oldest messages after the system message until the
    /// transcript plus room for a response fits under `token_limit`.
    /// The first message is never evicted, even if it alone is over
    /// the limit.
    pub fn enforce_token_budget(&mut self, max_response_tokens: usize, token_limit: usize) {
        while self.token_count() + max_response_tokens >= token_limit && self.transcript.len() > 1 {
            let evicted = self.transcript.remove(1);
            tracing::debug!("Evicted {:?} message to stay under token budget", evicted.role);
        }
    }

    /// Runs the next turn of the chat. The user's message is added to
    /// the transcript first and stays there even if the completion
    /// fails. The assistant's reply is only added on success.
    pub async fn next_msg(&mut self, user_input: &str) -> Result<String, Error> {
        self.transcript.push(Message::new(Role::User, user_input));
        self.enforce_token_budget(self.max_response_tokens, self.token_limit);

        let resp = completion(
            self.transcript.as_slice(),
            &self.provider,
            COMPLETION_MAX_TOKENS,
            COMPLETION_TEMPERATURE,
        )
        .await?;
        let content = completion_content(&resp)?;

        self.transcript.push(Message::new(Role::Assistant, &content));
        Ok(content)
    }
}

pub struct ChatBuilder {
    provider: ProviderConfig,
    bpe: Arc<CoreBPE>,
    transcript: Transcript,
    max_response_tokens: usize,
    token_limit: usize,
}

impl ChatBuilder {
    pub fn new(provider: &ProviderConfig, bpe: Arc<CoreBPE>) -> Self {
        Self {
            provider: provider.clone(),
            bpe,
            transcript: Transcript::new(),
            max_response_tokens: DEFAULT_MAX_RESPONSE_TOKENS,
            token_limit: DEFAULT_TOKEN_LIMIT,
        }
    }

    pub fn build(self) -> Chat {
        Chat {
            provider: self.provider,
            bpe: self.bpe,
            transcript: self.transcript,
            max_response_tokens: self.max_response_tokens,
            token_limit: self.token_limit,
        }
    }

    pub fn transcript(mut self, transcript: Transcript) -> Self {
        self.transcript = transcript;
        self
    }

    pub fn token_budget(mut self, max_response_tokens: usize, token_limit: usize) -> Self {
        self.max_response_tokens = max_response_tokens;
        self.token_limit = token_limit;
        self
    }
}
