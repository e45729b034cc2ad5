//! API routes module

pub mod chat;

use std::sync::Arc;

use crate::api::state::AppState;
use axum::Router;

type SharedState = Arc<AppState>;

/// Create the combined API router
pub fn router() -> Router<SharedState> {
    // Session routes live at the root for compatibility with the
    // existing web client
    Router::new().merge(chat::router())
}
