use std::{borrow::Cow, str::FromStr};

use contactus_db::table::Message as MessageTable;
use contactus_shared::{
    ContactMessage, Error, Message, QueryType, boolean_string, lenient_string,
};
use sea_query::{Query, SqliteQueryBuilder};
use sea_query_sqlx::SqlxBinder;
use serde::Deserialize;
use strum::VariantArray;
use time::OffsetDateTime;
use validator::{Validate, ValidationError, ValidationErrors};

/// Body of `POST /api/message`.
///
/// Missing, `null` and mistyped fields deserialize to an empty string so the
/// constraints below report them with their own messages.
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateMessageRequest {
    #[serde(default, deserialize_with = "lenient_string::deserialize")]
    #[validate(length(min = 1, message = "First name is required."))]
    pub first_name: String,
    #[serde(default, deserialize_with = "lenient_string::deserialize")]
    #[validate(length(min = 1, message = "Last name is required."))]
    pub last_name: String,
    #[serde(default, deserialize_with = "lenient_string::deserialize")]
    #[validate(email(message = "Invalid email format."))]
    pub email_address: String,
    #[serde(default, deserialize_with = "lenient_string::deserialize")]
    #[validate(custom(function = "validate_query_type"))]
    pub query_type: String,
    #[serde(default, deserialize_with = "lenient_string::deserialize")]
    #[validate(length(min = 1, message = "Message is required."))]
    pub message: String,
    #[serde(default, deserialize_with = "boolean_string::deserialize")]
    #[validate(custom(function = "validate_boolean_string"))]
    pub service_agreement: String,
}

impl CreateMessageRequest {
    const FIELDS: [&'static str; 6] = [
        "first_name",
        "last_name",
        "email_address",
        "query_type",
        "message",
        "service_agreement",
    ];

    fn into_contact(self) -> contactus_shared::Result<ContactMessage> {
        let query_type = QueryType::from_str(&self.query_type)
            .map_err(|_| Error::Server(format!("unknown query type `{}`", self.query_type)))?;
        let service_agreement = boolean_string::parse(&self.service_agreement).ok_or_else(|| {
            Error::Server(format!(
                "unknown service agreement `{}`",
                self.service_agreement
            ))
        })?;

        Ok(ContactMessage {
            first_name: self.first_name,
            last_name: self.last_name,
            email_address: self.email_address,
            query_type,
            message: self.message,
            service_agreement,
        })
    }
}

impl From<ContactMessage> for CreateMessageRequest {
    fn from(value: ContactMessage) -> Self {
        Self {
            first_name: value.first_name,
            last_name: value.last_name,
            email_address: value.email_address,
            query_type: value.query_type.to_string(),
            message: value.message,
            service_agreement: value.service_agreement.to_string(),
        }
    }
}

fn validate_query_type(value: &str) -> Result<(), ValidationError> {
    if QueryType::VARIANTS.iter().any(|v| v.as_ref() == value) {
        return Ok(());
    }

    Err(ValidationError::new("query_type").with_message(Cow::Borrowed("Invalid query type.")))
}

fn validate_boolean_string(value: &str) -> Result<(), ValidationError> {
    if boolean_string::parse(value).is_some() {
        return Ok(());
    }

    Err(ValidationError::new("service_agreement")
        .with_message(Cow::Borrowed("Service agreement must be accepted.")))
}

/// Flattens validation errors into their messages, in request field order.
pub fn error_messages(errors: &ValidationErrors) -> Vec<String> {
    let normalize = |name: &str| name.replace('_', "").to_lowercase();
    let position = |name: &str| {
        let name = normalize(name);
        CreateMessageRequest::FIELDS
            .iter()
            .position(|field| normalize(field) == name)
            .unwrap_or(CreateMessageRequest::FIELDS.len())
    };

    let mut fields = errors.field_errors().into_iter().collect::<Vec<_>>();
    fields.sort_by_key(|(name, _)| position(name));

    fields
        .into_iter()
        .flat_map(|(_, errors)| errors.iter())
        .map(|error| match &error.message {
            Some(message) => message.to_string(),
            None => error.code.to_string(),
        })
        .collect()
}

impl super::Command {
    pub async fn create(&self, input: CreateMessageRequest) -> contactus_shared::Result<Message> {
        input.validate()?;

        let contact = input.into_contact()?;
        let created_at = OffsetDateTime::now_utc().unix_timestamp();

        let statement = Query::insert()
            .into_table(MessageTable::Table)
            .columns([
                MessageTable::FirstName,
                MessageTable::LastName,
                MessageTable::EmailAddress,
                MessageTable::QueryType,
                MessageTable::Message,
                MessageTable::ServiceAgreement,
                MessageTable::CreatedAt,
            ])
            .values_panic([
                contact.first_name.to_owned().into(),
                contact.last_name.to_owned().into(),
                contact.email_address.to_owned().into(),
                contact.query_type.to_string().into(),
                contact.message.to_owned().into(),
                contact.service_agreement.into(),
                created_at.into(),
            ])
            .to_owned();

        let (sql, values) = statement.build_sqlx(SqliteQueryBuilder);
        let id = sqlx::query_with(&sql, values)
            .execute(&self.0)
            .await?
            .last_insert_rowid();

        tracing::info!(id, query_type = %contact.query_type, "contact message stored");

        Ok(Message::new(id, contact))
    }
}
