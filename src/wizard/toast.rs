use chrono::{DateTime, Duration, Utc};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToastKind {
    Success,
    Error,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Toast {
    pub message: String,
    pub kind: ToastKind,
    pub shown_at: DateTime<Utc>,
}

/// Holds at most one toast; a new one replaces whatever is showing.
#[derive(Debug, Clone)]
pub struct ToastSlot {
    current: Option<Toast>,
    duration: Duration,
}

impl ToastSlot {
    pub fn new(duration: Duration) -> Self {
        Self {
            current: None,
            duration,
        }
    }

    pub fn current(&self) -> Option<&Toast> {
        self.current.as_ref()
    }

    pub fn success(&mut self, message: impl Into<String>) {
        self.show(message.into(), ToastKind::Success, Utc::now());
    }

    pub fn error(&mut self, message: impl Into<String>) {
        self.show(message.into(), ToastKind::Error, Utc::now());
    }

    pub fn show(&mut self, message: String, kind: ToastKind, now: DateTime<Utc>) {
        self.current = Some(Toast {
            message,
            kind,
            shown_at: now,
        });
    }

    pub fn close(&mut self) {
        self.current = None;
    }

    /// Dismisses the toast once it has been visible for the configured
    /// duration. Returns whether it was dismissed.
    pub fn tick(&mut self, now: DateTime<Utc>) -> bool {
        match &self.current {
            Some(toast) if now - toast.shown_at >= self.duration => {
                self.current = None;
                true
            }
            _ => false,
        }
    }
}
