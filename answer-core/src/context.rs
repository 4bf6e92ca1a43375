//! Query normalization and the per-call context threaded through plugins
//!
//! The core never suspends on I/O. The context exists so collaborator
//! plugins that do perform network calls can observe cancellation and
//! deadlines set by the embedding service.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};

use uuid::Uuid;

use crate::error::{AnswerError, Result};

/// Strip surrounding whitespace; `None` when nothing is left
pub fn normalize_query(raw: &str) -> Option<&str> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed)
    }
}

/// Per-call context: request id, optional deadline and a cancellation flag
///
/// Cloning shares the cancellation flag, so a caller can keep one clone and
/// cancel while a plugin holds another.
#[derive(Debug, Clone)]
pub struct QueryContext {
    request_id: String,
    deadline: Option<Instant>,
    cancelled: Arc<AtomicBool>,
}

impl QueryContext {
    /// Create a context with a fresh request id and no deadline
    pub fn new() -> Self {
        Self {
            request_id: Uuid::new_v4().to_string(),
            deadline: None,
            cancelled: Arc::new(AtomicBool::new(false)),
        }
    }

    /// Use a caller-supplied request id
    pub fn with_request_id(mut self, id: impl Into<String>) -> Self {
        self.request_id = id.into();
        self
    }

    /// Expire the context after `timeout`
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.deadline = Some(Instant::now() + timeout);
        self
    }

    /// Expire the context at `deadline`
    pub fn with_deadline(mut self, deadline: Instant) -> Self {
        self.deadline = Some(deadline);
        self
    }

    pub fn request_id(&self) -> &str {
        &self.request_id
    }

    pub fn deadline(&self) -> Option<Instant> {
        self.deadline
    }

    /// Time left before the deadline, if one is set
    pub fn remaining(&self) -> Option<Duration> {
        self.deadline
            .map(|d| d.saturating_duration_since(Instant::now()))
    }

    /// Signal cancellation to every clone of this context
    pub fn cancel(&self) {
        self.cancelled.store(true, Ordering::Release);
    }

    pub fn is_cancelled(&self) -> bool {
        self.cancelled.load(Ordering::Acquire)
    }

    pub fn is_expired(&self) -> bool {
        self.deadline.is_some_and(|d| Instant::now() >= d)
    }

    /// `Err(Cancelled)` when cancelled or past the deadline
    pub fn check(&self) -> Result<()> {
        if self.is_cancelled() || self.is_expired() {
            Err(AnswerError::Cancelled)
        } else {
            Ok(())
        }
    }
}

impl Default for QueryContext {
    fn default() -> Self {
        Self::new()
    }
}
