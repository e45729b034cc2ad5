pub mod chat;
pub mod prompt;
