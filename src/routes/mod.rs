mod contact;
mod health;
mod message;

use axum::{
    Router,
    routing::{get, post},
};
use contactus_form::MESSAGE_PATH;
use sqlx::SqlitePool;
use tower_http::trace::TraceLayer;

pub use contact::{ActionInput, CONTACT_PATH, ContactTemplate, StoreClient};

#[derive(Clone)]
pub struct AppState {
    pub command: contactus_message::Command,
}

impl AppState {
    pub fn new(pool: SqlitePool) -> Self {
        Self {
            command: contactus_message::Command(pool),
        }
    }
}

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health))
        .route(MESSAGE_PATH, post(message::create))
        .route(CONTACT_PATH, get(contact::page).post(contact::action))
        .with_state(state)
        .layer(TraceLayer::new_for_http())
}
