use serde::{Deserialize, Serialize};
use strum::{AsRefStr, Display, EnumString, VariantArray};

#[derive(
    EnumString,
    Display,
    VariantArray,
    Default,
    Clone,
    Copy,
    Debug,
    PartialEq,
    Eq,
    Serialize,
    Deserialize,
    AsRefStr,
)]
pub enum QueryType {
    #[default]
    #[serde(rename = "General Enquiry")]
    #[strum(serialize = "General Enquiry")]
    GeneralEnquiry,
    #[serde(rename = "Support Request")]
    #[strum(serialize = "Support Request")]
    SupportRequest,
}

/// Payload a visitor sends through the contact form.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContactMessage {
    pub first_name: String,
    pub last_name: String,
    pub email_address: String,
    pub query_type: QueryType,
    pub message: String,
    #[serde(deserialize_with = "boolean_string::deserialize_bool")]
    pub service_agreement: bool,
}

/// A contact message accepted by the server.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Message {
    pub id: i64,
    pub first_name: String,
    pub last_name: String,
    pub email_address: String,
    pub query_type: QueryType,
    pub message: String,
    #[serde(deserialize_with = "boolean_string::deserialize_bool")]
    pub service_agreement: bool,
}

impl Message {
    pub fn new(id: i64, contact: ContactMessage) -> Self {
        Self {
            id,
            first_name: contact.first_name,
            last_name: contact.last_name,
            email_address: contact.email_address,
            query_type: contact.query_type,
            message: contact.message,
            service_agreement: contact.service_agreement,
        }
    }
}

/// Values accepted where a boolean may also travel as a string
/// (`"true"`, `"false"`, `"1"`, `"0"`).
pub mod boolean_string {
    use serde::{
        Deserialize, Deserializer,
        de::{Error, IgnoredAny},
    };

    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Raw {
        Bool(bool),
        Text(String),
        Other(IgnoredAny),
    }

    pub fn parse(value: &str) -> Option<bool> {
        match value {
            "true" | "1" => Some(true),
            "false" | "0" => Some(false),
            _ => None,
        }
    }

    /// Keeps the raw text so validators can reject it with their own message.
    /// `null` and values that are neither booleans nor strings become an empty
    /// string.
    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<String, D::Error> {
        Ok(match Raw::deserialize(deserializer)? {
            Raw::Bool(value) => value.to_string(),
            Raw::Text(value) => value,
            Raw::Other(_) => String::new(),
        })
    }

    pub fn deserialize_bool<'de, D: Deserializer<'de>>(deserializer: D) -> Result<bool, D::Error> {
        match Raw::deserialize(deserializer)? {
            Raw::Bool(value) => Ok(value),
            Raw::Text(value) => {
                parse(&value).ok_or_else(|| D::Error::custom(format!("invalid boolean `{value}`")))
            }
            Raw::Other(_) => Err(D::Error::custom("expected a boolean or a boolean string")),
        }
    }
}

/// String fields of request bodies. `null` and non-string values read as an
/// empty string, so field validators report them.
pub mod lenient_string {
    use serde::{Deserialize, Deserializer, de::IgnoredAny};

    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Raw {
        Text(String),
        Other(IgnoredAny),
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<String, D::Error> {
        Ok(match Raw::deserialize(deserializer)? {
            Raw::Text(value) => value,
            Raw::Other(_) => String::new(),
        })
    }
}
