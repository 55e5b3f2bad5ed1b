use std::time::{Duration, Instant};

pub const DEFAULT_TOAST_DURATION: Duration = Duration::from_millis(3000);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum NoticeKind {
    #[default]
    Info,
    Success,
    Warning,
    Error,
}

/// Fire-and-forget sink for short user-facing messages.
pub trait Notifier {
    fn notify(&mut self, message: &str, kind: NoticeKind, duration: Duration);
}

#[derive(Debug, Clone, PartialEq)]
pub struct Toast {
    pub message: String,
    pub kind: NoticeKind,
    pub expires_at: Instant,
}

/// Visible toast notifications, each dismissed automatically after its duration.
#[derive(Debug, Clone, Default)]
pub struct Toasts {
    toasts: Vec<Toast>,
}

impl Toasts {
    pub fn push(&mut self, message: &str, kind: NoticeKind, duration: Duration, now: Instant) {
        self.toasts.push(Toast {
            message: message.to_string(),
            kind,
            expires_at: now + duration,
        });
    }

    /// Drop expired toasts.
    pub fn prune(&mut self, now: Instant) {
        self.toasts.retain(|t| t.expires_at > now);
    }

    pub fn iter(&self) -> impl Iterator<Item = &Toast> {
        self.toasts.iter()
    }

    pub fn is_empty(&self) -> bool {
        self.toasts.is_empty()
    }

    /// Time until the next toast expires.
    pub fn next_expiry(&self, now: Instant) -> Option<Duration> {
        self.toasts
            .iter()
            .map(|t| t.expires_at.saturating_duration_since(now))
            .min()
    }
}

impl Notifier for Toasts {
    fn notify(&mut self, message: &str, kind: NoticeKind, duration: Duration) {
        self.push(message, kind, duration, Instant::now());
    }
}
