//! Contact form orchestration: validation, a single in-flight submission and
//! the toasts reporting its outcome.

use std::sync::{
    Mutex, MutexGuard, PoisonError,
    atomic::{AtomicBool, Ordering},
};

use contactus_shared::Message;
use strum::Display;

use crate::{
    client::{ClientError, MessageClient},
    schema::{self, ContactFormData, Field, FieldErrors},
    toast::{NewToast, Toasts},
};

pub const SUCCESS_TITLE: &str = "Message Sent!";
pub const SUCCESS_MESSAGE: &str = "Thanks for completing the form. We’ll be in touch soon!";
pub const FAILURE_TITLE: &str = "Submission Failed";
pub const FAILURE_MESSAGE: &str = "There was an error submitting the form. Please try again.";

#[derive(Display, Default, Clone, Copy, Debug, PartialEq, Eq)]
pub enum FormState {
    #[default]
    Idle,
    Validating,
    Submitting,
    Success,
    Failed,
}

#[derive(Debug)]
pub enum SubmitOutcome {
    Invalid(FieldErrors),
    Sent(Message),
    Failed(ClientError),
    /// Another submission of the same form was still in flight.
    Ignored,
}

#[derive(Default)]
struct Inner {
    data: ContactFormData,
    errors: FieldErrors,
    state: FormState,
    attention: Option<Vec<Field>>,
}

impl Inner {
    fn transition(&mut self, state: FormState) {
        tracing::debug!(from = %self.state, to = %state, "contact form state");
        self.state = state;
    }
}

/// Releases the in-flight flag even if the submit future is dropped.
struct InFlight<'a>(&'a AtomicBool);

impl<'a> InFlight<'a> {
    fn acquire(flag: &'a AtomicBool) -> Option<Self> {
        if flag.swap(true, Ordering::AcqRel) {
            return None;
        }

        Some(Self(flag))
    }
}

impl Drop for InFlight<'_> {
    fn drop(&mut self) {
        self.0.store(false, Ordering::Release);
    }
}

pub struct ContactForm<C> {
    client: C,
    toasts: Toasts,
    inner: Mutex<Inner>,
    in_flight: AtomicBool,
}

impl<C: MessageClient> ContactForm<C> {
    pub fn new(client: C, toasts: Toasts) -> Self {
        Self {
            client,
            toasts,
            inner: Mutex::new(Inner::default()),
            in_flight: AtomicBool::new(false),
        }
    }

    pub fn with_data(self, data: ContactFormData) -> Self {
        self.edit(|current| *current = data);
        self
    }

    pub fn client(&self) -> &C {
        &self.client
    }

    pub fn toasts(&self) -> &Toasts {
        &self.toasts
    }

    pub fn edit(&self, f: impl FnOnce(&mut ContactFormData)) {
        f(&mut self.lock().data);
    }

    pub fn data(&self) -> ContactFormData {
        self.lock().data.clone()
    }

    pub fn errors(&self) -> FieldErrors {
        self.lock().errors.clone()
    }

    pub fn state(&self) -> FormState {
        self.lock().state
    }

    pub fn is_submitting(&self) -> bool {
        self.in_flight.load(Ordering::Acquire)
    }

    /// Fields whose error messages should play the attention effect. Each
    /// failed validation yields its targets once.
    pub fn take_attention(&self) -> Option<Vec<Field>> {
        self.lock().attention.take()
    }

    pub async fn submit(&self) -> SubmitOutcome {
        let Some(_in_flight) = InFlight::acquire(&self.in_flight) else {
            tracing::debug!("contact form submission already in flight");
            return SubmitOutcome::Ignored;
        };

        let (payload, sent) = {
            let mut inner = self.lock();
            inner.transition(FormState::Validating);

            match schema::parse(&inner.data) {
                Ok(payload) => {
                    inner.errors = FieldErrors::default();
                    inner.attention = None;
                    inner.transition(FormState::Submitting);
                    (payload, inner.data.clone())
                }
                Err(errors) => {
                    inner.errors = errors.clone();
                    inner.attention = Some(errors.fields());
                    inner.transition(FormState::Idle);

                    return SubmitOutcome::Invalid(errors);
                }
            }
        };

        let result = self.client.create_message(&payload).await;
        let mut inner = self.lock();

        let outcome = match result {
            Ok(message) => {
                inner.transition(FormState::Success);
                self.toasts
                    .add(NewToast::success(SUCCESS_TITLE, SUCCESS_MESSAGE));
                inner.data.clear_sent(&sent);

                SubmitOutcome::Sent(message)
            }
            Err(err) => {
                inner.transition(FormState::Failed);
                self.toasts
                    .add(NewToast::error(FAILURE_TITLE, FAILURE_MESSAGE).close_button(true));

                SubmitOutcome::Failed(err)
            }
        };

        inner.transition(FormState::Idle);

        outcome
    }

    pub(crate) fn snapshot(&self) -> (ContactFormData, FieldErrors, Option<Vec<Field>>) {
        let mut inner = self.lock();
        let attention = inner.attention.take();

        (inner.data.clone(), inner.errors.clone(), attention)
    }

    fn lock(&self) -> MutexGuard<'_, Inner> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }
}
