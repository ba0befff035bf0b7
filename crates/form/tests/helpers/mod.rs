#![allow(dead_code)]

use std::sync::{
    Arc,
    atomic::{AtomicBool, AtomicUsize, Ordering},
};

use async_trait::async_trait;
use contactus_form::{ClientError, ContactFormData, MessageClient};
use contactus_shared::{ContactMessage, Message, QueryType};
use tokio::sync::Notify;

/// In-memory [`MessageClient`] counting the calls it receives.
#[derive(Default)]
pub struct FakeClient {
    calls: AtomicUsize,
    fail: AtomicBool,
    gate: Option<Arc<Notify>>,
}

impl FakeClient {
    pub fn failing() -> Self {
        let client = Self::default();
        client.set_failing(true);
        client
    }

    /// Holds every call until the gate is notified.
    pub fn gated(gate: Arc<Notify>) -> Self {
        Self {
            gate: Some(gate),
            ..Self::default()
        }
    }

    pub fn set_failing(&self, fail: bool) {
        self.fail.store(fail, Ordering::SeqCst);
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl MessageClient for FakeClient {
    async fn create_message(&self, payload: &ContactMessage) -> Result<Message, ClientError> {
        let call = self.calls.fetch_add(1, Ordering::SeqCst) + 1;

        if let Some(gate) = &self.gate {
            gate.notified().await;
        }

        if self.fail.load(Ordering::SeqCst) {
            return Err(ClientError::Rejected("storage unavailable".to_owned()));
        }

        Ok(Message::new(call as i64, payload.clone()))
    }
}

pub fn valid_data() -> ContactFormData {
    ContactFormData {
        first_name: "Ada".to_owned(),
        last_name: "Lovelace".to_owned(),
        email_address: "ada@example.com".to_owned(),
        query_type: Some(QueryType::SupportRequest),
        message: "The engine needs a new card reader.".to_owned(),
        service_agreement: true,
    }
}

pub fn valid_message() -> ContactMessage {
    ContactMessage {
        first_name: "Ada".to_owned(),
        last_name: "Lovelace".to_owned(),
        email_address: "ada@example.com".to_owned(),
        query_type: QueryType::SupportRequest,
        message: "The engine needs a new card reader.".to_owned(),
        service_agreement: true,
    }
}
