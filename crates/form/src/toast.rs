//! Transient notifications.
//!
//! [`Toasts`] is a cheap handle over a shared queue. Every toast added to it
//! removes itself once its duration plus [`EXPIRY_GRACE`] has elapsed, unless
//! it was dismissed earlier through [`Toasts::remove`].

use std::{
    collections::HashMap,
    sync::{Arc, Mutex, MutexGuard, PoisonError},
    time::Duration,
};

use strum::{AsRefStr, Display, EnumString};
use time::OffsetDateTime;
use tokio::{task::JoinHandle, time::Instant};

pub type ToastId = i64;

pub const DEFAULT_DURATION: Duration = Duration::from_millis(3000);
pub const EXPIRY_GRACE: Duration = Duration::from_millis(500);

#[derive(EnumString, Display, AsRefStr, Default, Clone, Copy, Debug, PartialEq, Eq)]
#[strum(serialize_all = "lowercase")]
pub enum ToastKind {
    #[default]
    Success,
    Error,
    Warning,
    Info,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Toast {
    pub id: ToastId,
    pub kind: ToastKind,
    pub title: String,
    pub message: String,
    pub duration: Duration,
    pub close_button: bool,
}

impl Toast {
    /// Time the toast stays in the queue.
    pub fn ttl(&self) -> Duration {
        self.duration + EXPIRY_GRACE
    }

    pub fn ttl_ms(&self) -> u128 {
        self.ttl().as_millis()
    }
}

#[derive(Debug, Clone)]
pub struct NewToast {
    pub title: String,
    pub message: String,
    pub kind: ToastKind,
    pub duration: Duration,
    pub close_button: bool,
}

impl NewToast {
    pub fn new(title: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            message: message.into(),
            kind: ToastKind::default(),
            duration: DEFAULT_DURATION,
            close_button: false,
        }
    }

    pub fn success(title: impl Into<String>, message: impl Into<String>) -> Self {
        Self::new(title, message)
    }

    pub fn error(title: impl Into<String>, message: impl Into<String>) -> Self {
        Self::new(title, message).kind(ToastKind::Error)
    }

    pub fn kind(mut self, kind: ToastKind) -> Self {
        self.kind = kind;
        self
    }

    pub fn duration(mut self, duration: Duration) -> Self {
        self.duration = duration;
        self
    }

    pub fn close_button(mut self, close_button: bool) -> Self {
        self.close_button = close_button;
        self
    }
}

#[derive(Default)]
struct Queue {
    toasts: Vec<Toast>,
    timers: HashMap<ToastId, JoinHandle<()>>,
    last_id: ToastId,
}

#[derive(Clone, Default)]
pub struct Toasts {
    queue: Arc<Mutex<Queue>>,
}

impl Toasts {
    /// Appends a toast and schedules its removal. Must be called from within a
    /// tokio runtime.
    pub fn add(&self, toast: NewToast) -> ToastId {
        let mut queue = self.lock();

        // millisecond timestamps, bumped when two toasts land in the same tick
        let now = (OffsetDateTime::now_utc().unix_timestamp_nanos() / 1_000_000) as ToastId;
        let id = now.max(queue.last_id + 1);
        queue.last_id = id;

        let toast = Toast {
            id,
            kind: toast.kind,
            title: toast.title,
            message: toast.message,
            duration: toast.duration,
            close_button: toast.close_button,
        };
        let deadline = Instant::now() + toast.ttl();

        tracing::debug!(id, kind = %toast.kind, title = %toast.title, "toast added");
        queue.toasts.push(toast);

        let weak = Arc::downgrade(&self.queue);
        let timer = tokio::spawn(async move {
            tokio::time::sleep_until(deadline).await;

            if let Some(queue) = weak.upgrade() {
                Toasts { queue }.expire(id);
            }
        });

        // the timer cannot run `expire` before this insert: it needs the lock we hold
        queue.timers.insert(id, timer);

        id
    }

    /// Dismisses a toast. Unknown ids are ignored, so calling this twice or
    /// after the toast expired is fine.
    pub fn remove(&self, id: ToastId) {
        let mut queue = self.lock();
        queue.toasts.retain(|toast| toast.id != id);

        if let Some(timer) = queue.timers.remove(&id) {
            timer.abort();
            tracing::debug!(id, "toast dismissed");
        }
    }

    pub fn snapshot(&self) -> Vec<Toast> {
        self.lock().toasts.clone()
    }

    pub fn contains(&self, id: ToastId) -> bool {
        self.lock().toasts.iter().any(|toast| toast.id == id)
    }

    pub fn len(&self) -> usize {
        self.lock().toasts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lock().toasts.is_empty()
    }

    fn expire(&self, id: ToastId) {
        let mut queue = self.lock();
        queue.toasts.retain(|toast| toast.id != id);
        queue.timers.remove(&id);

        tracing::debug!(id, "toast expired");
    }

    fn lock(&self) -> MutexGuard<'_, Queue> {
        self.queue.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl Drop for Queue {
    fn drop(&mut self) {
        for (_, timer) in self.timers.drain() {
            timer.abort();
        }
    }
}
