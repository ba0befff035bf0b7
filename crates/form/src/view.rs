use std::str::FromStr;

use askama::Template;
use contactus_shared::QueryType;
use strum::VariantArray;

use crate::{
    client::MessageClient,
    form::ContactForm,
    schema::{ContactFormData, Field, FieldErrors},
    toast::{Toast, Toasts},
};

#[derive(Template)]
#[template(path = "contact-form.html")]
pub struct ContactFormTemplate<'a> {
    pub action: &'a str,
    pub data: ContactFormData,
    pub errors: FieldErrors,
    pub attention: Vec<Field>,
    pub query_types: &'static [QueryType],
    pub submitting: bool,
}

impl ContactFormTemplate<'_> {
    pub fn error(&self, field: &str) -> Option<&'static str> {
        Field::from_str(field)
            .ok()
            .and_then(|field| self.errors.get(field))
    }

    pub fn shake(&self, field: &str) -> bool {
        Field::from_str(field).is_ok_and(|field| self.attention.contains(&field))
    }

    pub fn is_selected(&self, query_type: &QueryType) -> bool {
        self.data.query_type.as_ref() == Some(query_type)
    }
}

#[derive(Template)]
#[template(path = "toast-stack.html")]
pub struct ToastStackTemplate {
    pub toasts: Vec<Toast>,
}

impl<C: MessageClient> ContactForm<C> {
    /// Consumes pending attention targets, so the effect plays on one render.
    pub fn template<'a>(&self, action: &'a str) -> ContactFormTemplate<'a> {
        let (data, errors, attention) = self.snapshot();

        ContactFormTemplate {
            action,
            data,
            errors,
            attention: attention.unwrap_or_default(),
            query_types: QueryType::VARIANTS,
            submitting: self.is_submitting(),
        }
    }
}

impl Toasts {
    pub fn template(&self) -> ToastStackTemplate {
        ToastStackTemplate {
            toasts: self.snapshot(),
        }
    }
}
