use anyhow::Result;

use crate::chat::SessionStore;
use crate::core::AppConfig;

pub async fn run(session_id: &str, config: AppConfig) -> Result<()> {
    let store = SessionStore::new(&config.sessions_path)?;
    let transcript = store.load(session_id).await?;
    println!("{}", serde_json::to_string_pretty(&transcript)?);
    Ok(())
}
