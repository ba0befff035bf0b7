use axum::{
    Json,
    extract::{State, rejection::JsonRejection},
    http::StatusCode,
};
use contactus_message::CreateMessageRequest;
use contactus_shared::Message;

use crate::{error::AppError, routes::AppState};

/// POST /api/message
pub async fn create(
    State(state): State<AppState>,
    payload: Result<Json<CreateMessageRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<Message>), AppError> {
    let Json(input) = payload?;
    let message = state.command.create(input).await?;

    Ok((StatusCode::CREATED, Json(message)))
}
