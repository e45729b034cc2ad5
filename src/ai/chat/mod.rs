mod core;
mod models;

pub use self::core::{
    Chat, ChatBuilder, DEFAULT_MAX_RESPONSE_TOKENS, DEFAULT_TOKEN_LIMIT, token_count, tokenizer,
};
pub use models::Transcript;
