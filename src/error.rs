use axum::{
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use thiserror::Error;

pub const SERVER_ERROR_MESSAGE: &str = "Something went wrong, please retry later";

#[derive(Error, Debug)]
pub enum AppError {
    #[error(transparent)]
    Command(#[from] contactus_shared::Error),

    #[error("Invalid request body: {0}")]
    Body(#[from] JsonRejection),

    #[error("Template error: {0}")]
    Template(#[from] askama::Error),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        match self {
            AppError::Command(contactus_shared::Error::Validate(errors)) => (
                StatusCode::BAD_REQUEST,
                contactus_message::error_messages(&errors).join("\n"),
            )
                .into_response(),
            AppError::Body(rejection) => {
                tracing::warn!("Rejected request body: {rejection}");
                (rejection.status(), rejection.body_text()).into_response()
            }
            err => {
                tracing::error!("{err}");
                (StatusCode::INTERNAL_SERVER_ERROR, SERVER_ERROR_MESSAGE).into_response()
            }
        }
    }
}
