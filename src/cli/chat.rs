use std::path::Path;
use std::sync::Arc;

use anyhow::Result;
use rustyline::DefaultEditor;
use rustyline::error::ReadlineError;
use uuid::Uuid;

use crate::ai::chat::{ChatBuilder, Transcript, tokenizer};
use crate::api::public::chat::ChatResponse;
use crate::chat::SessionStore;
use crate::core::AppConfig;

/// Chat from the terminal. Turns are saved to the session store the
/// same way the API does so the session can be picked up later.
pub async fn run(session_id: Option<String>, config: AppConfig) -> Result<()> {
    let mut rl = DefaultEditor::new()?;
    let store = SessionStore::new(&config.sessions_path)?;
    let bpe = Arc::new(tokenizer()?);

    let new_chat = |transcript: Transcript| {
        ChatBuilder::new(&config.provider, Arc::clone(&bpe))
            .transcript(transcript)
            .token_budget(config.max_response_tokens, config.token_limit)
            .build()
    };

    let session_id = match session_id {
        Some(id) => id,
        None => {
            let id = Uuid::new_v4().to_string();
            let mut chat = new_chat(Transcript::new());
            chat.reset_system_message(Path::new(&config.prompt_path))
                .await?;
            store.create(&id, chat.transcript()).await?;
            id
        }
    };
    println!("Session {}", session_id);

    loop {
        let readline = rl.readline(">>> ");
        match readline {
            Ok(line) => {
                if line.trim().is_empty() {
                    continue;
                }
                let transcript = store.load(&session_id).await?;
                let mut chat = new_chat(transcript);
                let result = chat.next_msg(&line).await;
                store.save(&session_id, chat.transcript()).await?;
                println!("{}", ChatResponse::from_result(result).response);
            }
            Err(ReadlineError::Interrupted) => break,
            Err(ReadlineError::Eof) => break,
            Err(err) => {
                println!("Error: {:?}", err);
                break;
            }
        }
    }

    Ok(())
}
