//! Client-side validation of the contact form.
//!
//! Each field owns an ordered list of `(rule, message)` pairs. Fields are
//! checked independently and every failing field is reported; within a field
//! the first failing rule wins.

use std::collections::BTreeMap;

use contactus_shared::{ContactMessage, QueryType};
use strum::{AsRefStr, Display, EnumString, VariantArray};
use validator::ValidateEmail;

pub const REQUIRED: &str = "This field is required";
pub const INVALID_EMAIL: &str = "Please enter a valid email address";
pub const MISSING_QUERY_TYPE: &str = "Please select a query type";
pub const MISSING_CONSENT: &str = "To submit this form, please consent to being contacted";

/// Form fields, in display order.
#[derive(
    Display,
    EnumString,
    AsRefStr,
    VariantArray,
    Clone,
    Copy,
    Debug,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
)]
#[strum(serialize_all = "kebab-case")]
pub enum Field {
    FirstName,
    LastName,
    EmailAddress,
    QueryType,
    Message,
    ServiceAgreement,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct ContactFormData {
    pub first_name: String,
    pub last_name: String,
    pub email_address: String,
    pub query_type: Option<QueryType>,
    pub message: String,
    pub service_agreement: bool,
}

impl ContactFormData {
    /// Clears every field still holding the value that was `sent`. Edits made
    /// since then are kept.
    pub fn clear_sent(&mut self, sent: &ContactFormData) {
        fn clear<T: PartialEq + Default>(value: &mut T, sent: &T) {
            if value == sent {
                *value = T::default();
            }
        }

        clear(&mut self.first_name, &sent.first_name);
        clear(&mut self.last_name, &sent.last_name);
        clear(&mut self.email_address, &sent.email_address);
        clear(&mut self.query_type, &sent.query_type);
        clear(&mut self.message, &sent.message);
        clear(&mut self.service_agreement, &sent.service_agreement);
    }

    fn value(&self, field: Field) -> Value<'_> {
        match field {
            Field::FirstName => Value::Text(&self.first_name),
            Field::LastName => Value::Text(&self.last_name),
            Field::EmailAddress => Value::Text(&self.email_address),
            Field::QueryType => Value::Choice(self.query_type),
            Field::Message => Value::Text(&self.message),
            Field::ServiceAgreement => Value::Flag(self.service_agreement),
        }
    }
}

enum Value<'a> {
    Text(&'a str),
    Choice(Option<QueryType>),
    Flag(bool),
}

#[derive(Debug, Clone, Copy)]
enum Rule {
    Required,
    Email,
    Selected,
    Accepted,
}

impl Rule {
    fn passes(self, value: &Value<'_>) -> bool {
        match (self, value) {
            (Rule::Required, Value::Text(text)) => !text.is_empty(),
            (Rule::Email, Value::Text(text)) => text.validate_email(),
            (Rule::Required | Rule::Selected, Value::Choice(choice)) => choice.is_some(),
            (Rule::Required | Rule::Accepted, Value::Flag(flag)) => *flag,
            _ => false,
        }
    }
}

// The email format rule runs before the required rule, so an empty address
// reports INVALID_EMAIL.
const SCHEMA: [(Field, &[(Rule, &str)]); 6] = [
    (Field::FirstName, &[(Rule::Required, REQUIRED)]),
    (Field::LastName, &[(Rule::Required, REQUIRED)]),
    (
        Field::EmailAddress,
        &[(Rule::Email, INVALID_EMAIL), (Rule::Required, REQUIRED)],
    ),
    (Field::QueryType, &[(Rule::Selected, MISSING_QUERY_TYPE)]),
    (Field::Message, &[(Rule::Required, REQUIRED)]),
    (Field::ServiceAgreement, &[(Rule::Accepted, MISSING_CONSENT)]),
];

/// Field errors ordered by [`Field`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FieldErrors(BTreeMap<Field, &'static str>);

impl FieldErrors {
    pub fn get(&self, field: Field) -> Option<&'static str> {
        self.0.get(&field).copied()
    }

    pub fn iter(&self) -> impl Iterator<Item = (Field, &'static str)> + '_ {
        self.0.iter().map(|(field, message)| (*field, *message))
    }

    pub fn fields(&self) -> Vec<Field> {
        self.0.keys().copied().collect()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

pub fn validate(data: &ContactFormData) -> Result<(), FieldErrors> {
    let mut errors = BTreeMap::new();

    for (field, rules) in SCHEMA {
        let value = data.value(field);

        if let Some((_, message)) = rules.iter().find(|(rule, _)| !rule.passes(&value)) {
            errors.insert(field, *message);
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(FieldErrors(errors))
    }
}

/// Validates `data` and turns it into the payload sent to the server.
pub fn parse(data: &ContactFormData) -> Result<ContactMessage, FieldErrors> {
    validate(data)?;

    let Some(query_type) = data.query_type else {
        let mut errors = BTreeMap::new();
        errors.insert(Field::QueryType, MISSING_QUERY_TYPE);

        return Err(FieldErrors(errors));
    };

    Ok(ContactMessage {
        first_name: data.first_name.to_owned(),
        last_name: data.last_name.to_owned(),
        email_address: data.email_address.to_owned(),
        query_type,
        message: data.message.to_owned(),
        service_agreement: data.service_agreement,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn valid() -> ContactFormData {
        ContactFormData {
            first_name: "John".to_owned(),
            last_name: "Doe".to_owned(),
            email_address: "john.doe@example.com".to_owned(),
            query_type: Some(QueryType::SupportRequest),
            message: "This is a test message.".to_owned(),
            service_agreement: true,
        }
    }

    #[test]
    fn test_valid_data_passes() {
        assert_eq!(validate(&valid()), Ok(()));

        let message = parse(&valid()).unwrap();
        assert_eq!(message.query_type, QueryType::SupportRequest);
        assert!(message.service_agreement);
    }

    #[test]
    fn test_empty_form_reports_every_field() {
        let errors = validate(&ContactFormData::default()).unwrap_err();

        assert_eq!(
            errors.iter().collect::<Vec<_>>(),
            vec![
                (Field::FirstName, REQUIRED),
                (Field::LastName, REQUIRED),
                (Field::EmailAddress, INVALID_EMAIL),
                (Field::QueryType, MISSING_QUERY_TYPE),
                (Field::Message, REQUIRED),
                (Field::ServiceAgreement, MISSING_CONSENT),
            ]
        );
        assert_eq!(errors.iter().filter(|(_, m)| *m == REQUIRED).count(), 3);
    }

    #[test]
    fn test_empty_email_reports_format_message() {
        let data = ContactFormData {
            email_address: String::new(),
            ..valid()
        };

        let errors = validate(&data).unwrap_err();
        assert_eq!(errors.len(), 1);
        assert_eq!(errors.get(Field::EmailAddress), Some(INVALID_EMAIL));
    }

    #[test]
    fn test_malformed_email() {
        let data = ContactFormData {
            email_address: "john.doe".to_owned(),
            ..valid()
        };

        assert_eq!(
            validate(&data).unwrap_err().get(Field::EmailAddress),
            Some(INVALID_EMAIL)
        );
    }

    #[test]
    fn test_consent_required() {
        let data = ContactFormData {
            service_agreement: false,
            ..valid()
        };

        let errors = parse(&data).unwrap_err();
        assert_eq!(errors.fields(), vec![Field::ServiceAgreement]);
    }

    #[test]
    fn test_clear_sent_keeps_later_edits() {
        let sent = valid();
        let mut data = ContactFormData {
            last_name: "Smith".to_owned(),
            ..valid()
        };

        data.clear_sent(&sent);

        assert_eq!(
            data,
            ContactFormData {
                last_name: "Smith".to_owned(),
                ..ContactFormData::default()
            }
        );
    }

    #[test]
    fn test_validation_is_idempotent() {
        let data = ContactFormData {
            first_name: String::new(),
            query_type: None,
            ..valid()
        };

        assert_eq!(validate(&data), validate(&data));
    }

    #[test]
    fn test_field_names_match_ui_hooks() {
        assert_eq!(Field::FirstName.as_ref(), "first-name");
        assert_eq!(Field::ServiceAgreement.to_string(), "service-agreement");
    }
}
