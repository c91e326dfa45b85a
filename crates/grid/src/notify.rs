//! Toast notifications.

use std::sync::Mutex;

use chrono::{FixedOffset, Utc};
use tracareer_core::format::format_toast_time;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToastKind {
    Success,
    Error,
}

/// A transient message with the local time it was raised as its subtitle.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Toast {
    pub message: String,
    pub description: String,
    pub kind: ToastKind,
}

impl Toast {
    pub fn success(message: impl Into<String>, offset: FixedOffset) -> Self {
        Self::now(message.into(), ToastKind::Success, offset)
    }

    pub fn error(message: impl Into<String>, offset: FixedOffset) -> Self {
        Self::now(message.into(), ToastKind::Error, offset)
    }

    fn now(message: String, kind: ToastKind, offset: FixedOffset) -> Self {
        Self {
            message,
            description: format_toast_time(Utc::now(), offset),
            kind,
        }
    }
}

/// Where toasts go. Implemented by the UI shell.
pub trait Notifier: Send + Sync {
    fn notify(&self, toast: Toast);
}

/// Keeps every toast in memory, newest last.
#[derive(Debug, Default)]
pub struct ToastLog {
    toasts: Mutex<Vec<Toast>>,
}

impl ToastLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn toasts(&self) -> Vec<Toast> {
        self.toasts.lock().unwrap_or_else(|e| e.into_inner()).clone()
    }
}

impl Notifier for ToastLog {
    fn notify(&self, toast: Toast) {
        self.toasts
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .push(toast);
    }
}

/// Emits toasts as log events, for headless use.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingNotifier;

impl Notifier for TracingNotifier {
    fn notify(&self, toast: Toast) {
        match toast.kind {
            ToastKind::Success => {
                tracing::info!(toast = %toast.message, at = %toast.description, "Notification")
            }
            ToastKind::Error => {
                tracing::warn!(toast = %toast.message, at = %toast.description, "Error notification")
            }
        }
    }
}
