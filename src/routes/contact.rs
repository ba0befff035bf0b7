use std::str::FromStr;

use askama::Template;
use async_trait::async_trait;
use axum::{
    extract::{Form, State},
    response::Html,
};
use contactus_form::{ClientError, ContactForm, ContactFormData, MessageClient, Toasts};
use contactus_shared::{ContactMessage, Message, QueryType, boolean_string};
use serde::Deserialize;

use crate::{error::AppError, routes::AppState};

pub const CONTACT_PATH: &str = "/contact";

#[derive(Template)]
#[template(path = "contact.html")]
pub struct ContactTemplate {
    pub form: String,
    pub toasts: String,
}

/// Submits straight to the message store, for form posts handled by the
/// server itself.
pub struct StoreClient(pub contactus_message::Command);

#[async_trait]
impl MessageClient for StoreClient {
    async fn create_message(&self, payload: &ContactMessage) -> Result<Message, ClientError> {
        self.0.create(payload.clone().into()).await.map_err(|err| {
            tracing::error!("An error occurred while storing the contact message: {err}");
            ClientError::Rejected(err.to_string())
        })
    }
}

/// Urlencoded contact form. Unchecked boxes and unselected radios are absent.
#[derive(Deserialize, Default)]
#[serde(rename_all = "camelCase", default)]
pub struct ActionInput {
    pub first_name: String,
    pub last_name: String,
    pub email_address: String,
    pub query_type: Option<String>,
    pub message: String,
    pub service_agreement: Option<String>,
}

impl From<ActionInput> for ContactFormData {
    fn from(input: ActionInput) -> Self {
        Self {
            first_name: input.first_name,
            last_name: input.last_name,
            email_address: input.email_address,
            query_type: input
                .query_type
                .and_then(|value| QueryType::from_str(&value).ok()),
            message: input.message,
            service_agreement: input
                .service_agreement
                .as_deref()
                .and_then(boolean_string::parse)
                .unwrap_or(false),
        }
    }
}

fn render<C: MessageClient>(form: &ContactForm<C>) -> Result<Html<String>, AppError> {
    let template = ContactTemplate {
        form: form.template(CONTACT_PATH).render()?,
        toasts: form.toasts().template().render()?,
    };

    Ok(Html(template.render()?))
}

pub async fn page(State(state): State<AppState>) -> Result<Html<String>, AppError> {
    let form = ContactForm::new(StoreClient(state.command), Toasts::default());

    render(&form)
}

pub async fn action(
    State(state): State<AppState>,
    Form(input): Form<ActionInput>,
) -> Result<Html<String>, AppError> {
    let form =
        ContactForm::new(StoreClient(state.command), Toasts::default()).with_data(input.into());
    form.submit().await;

    render(&form)
}
