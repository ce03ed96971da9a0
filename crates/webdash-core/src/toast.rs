// ── Toast notifications ──
//
// The only user-visible error surface. Pages publish toasts on a
// broadcast channel; whatever front end is attached renders them.
// Publishing with no subscriber is not an error.

use std::time::Duration;

use tokio::sync::broadcast;
use tracing::{info, warn};

const CHANNEL_CAPACITY: usize = 64;

#[derive(Debug, Clone, Copy, PartialEq, Eq, strum::Display, strum::AsRefStr)]
#[strum(serialize_all = "lowercase")]
pub enum ToastKind {
    Success,
    Error,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Toast {
    pub kind: ToastKind,
    pub title: String,
    pub description: Option<String>,
}

impl Toast {
    pub fn success(title: impl Into<String>, description: Option<String>) -> Self {
        Self {
            kind: ToastKind::Success,
            title: title.into(),
            description,
        }
    }

    pub fn error(title: impl Into<String>, description: Option<String>) -> Self {
        Self {
            kind: ToastKind::Error,
            title: title.into(),
            description,
        }
    }

    /// `title` and `description` on separate lines, trimmed.
    pub fn message(&self) -> String {
        let joined = match &self.description {
            Some(d) => format!("{}\n{d}", self.title),
            None => self.title.clone(),
        };
        joined.trim().to_owned()
    }

    /// Stable identity; identical toasts replace each other.
    pub fn id(&self) -> String {
        format!("{}-{}", self.kind, self.message())
    }

    pub fn duration(&self) -> Duration {
        match self.kind {
            ToastKind::Success => Duration::from_millis(3000),
            ToastKind::Error => Duration::from_millis(4000),
        }
    }
}

/// Cloneable publisher for toasts.
#[derive(Debug, Clone)]
pub struct Toaster {
    tx: broadcast::Sender<Toast>,
}

impl Default for Toaster {
    fn default() -> Self {
        Self::new()
    }
}

impl Toaster {
    pub fn new() -> Self {
        let (tx, _) = broadcast::channel(CHANNEL_CAPACITY);
        Self { tx }
    }

    pub fn subscribe(&self) -> broadcast::Receiver<Toast> {
        self.tx.subscribe()
    }

    pub fn push(&self, toast: Toast) {
        match toast.kind {
            ToastKind::Success => info!(id = %toast.id(), "toast"),
            ToastKind::Error => warn!(id = %toast.id(), "toast"),
        }
        // No receivers just means nobody is rendering.
        let _ = self.tx.send(toast);
    }

    pub fn success(&self, title: impl Into<String>, description: Option<String>) {
        self.push(Toast::success(title, description));
    }

    pub fn error(&self, title: impl Into<String>, description: Option<String>) {
        self.push(Toast::error(title, description));
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]

    use super::*;

    #[test]
    fn message_and_id() {
        let toast = Toast::error("Error", Some("Name taken".into()));
        assert_eq!(toast.message(), "Error\nName taken");
        assert_eq!(toast.id(), "error-Error\nName taken");
        assert_eq!(toast.duration(), Duration::from_millis(4000));

        let toast = Toast::success("  Saved  ", None);
        assert_eq!(toast.message(), "Saved");
        assert_eq!(toast.duration(), Duration::from_millis(3000));
    }

    #[test]
    fn subscribers_receive_toasts() {
        let toaster = Toaster::new();
        let mut rx = toaster.subscribe();
        toaster.success("Done", None);
        assert_eq!(rx.try_recv().unwrap().title, "Done");
    }

    #[test]
    fn push_without_subscribers_is_fine() {
        Toaster::new().error("Nobody listening", None);
    }
}
