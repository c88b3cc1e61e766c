//! # Toast Notifications
//!
//! Transient messages raised when an operation is rejected. A toast lives for
//! a fixed duration and can be dismissed early. Time is passed in explicitly
//! so expiry is testable without sleeping.

use std::time::{Duration, Instant};

/// How long a toast stays on screen unless configured otherwise.
pub const DEFAULT_TOAST_DURATION: Duration = Duration::from_millis(3000);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToastLevel {
    Error,
    Warning,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Toast {
    pub message: String,
    pub level: ToastLevel,
    pub raised_at: Instant,
    pub duration: Duration,
}

impl Toast {
    pub fn new(message: impl Into<String>, level: ToastLevel, raised_at: Instant, duration: Duration) -> Self {
        Self {
            message: message.into(),
            level,
            raised_at,
            duration,
        }
    }

    pub fn is_expired_at(&self, now: Instant) -> bool {
        now.saturating_duration_since(self.raised_at) >= self.duration
    }
}

/// Ordered stack of live toasts, oldest first.
#[derive(Debug)]
pub struct Toasts {
    items: Vec<Toast>,
    duration: Duration,
}

impl Toasts {
    pub fn new(duration: Duration) -> Self {
        Self {
            items: Vec::new(),
            duration,
        }
    }

    pub fn raise(&mut self, message: impl Into<String>, level: ToastLevel, now: Instant) {
        let toast = Toast::new(message, level, now, self.duration);
        log::info!("Toast ({:?}): {}", toast.level, toast.message);
        self.items.push(toast);
    }

    /// Dismiss the newest toast. Returns false when nothing was showing.
    pub fn dismiss_latest(&mut self) -> bool {
        self.items.pop().is_some()
    }

    /// Drop every toast whose lifetime has elapsed. Returns true if any were removed.
    pub fn expire(&mut self, now: Instant) -> bool {
        let before = self.items.len();
        self.items.retain(|t| !t.is_expired_at(now));
        before != self.items.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Toast> {
        self.items.iter()
    }

    pub fn latest(&self) -> Option<&Toast> {
        self.items.last()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}
