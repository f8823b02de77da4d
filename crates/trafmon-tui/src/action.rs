//! All possible UI actions. Actions are the sole mechanism for state mutation.

use std::fmt;
use std::time::{Duration, Instant};

use chrono::{DateTime, Utc};

use trafmon_core::{ActionKind, DELETE_USER_PROMPT, Resource, TableView, TrafficSummary, TrafficView};

use crate::screen::ScreenId;

/// How long a toast stays on screen.
pub const NOTIFICATION_TTL: Duration = Duration::from_secs(5);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotificationLevel {
    Info,
    Success,
    Error,
}

/// A toast notification.
#[derive(Debug, Clone)]
pub struct Notification {
    pub message: String,
    pub level: NotificationLevel,
}

impl Notification {
    pub fn success(msg: impl Into<String>) -> Self {
        Self {
            message: msg.into(),
            level: NotificationLevel::Success,
        }
    }

    pub fn error(msg: impl Into<String>) -> Self {
        Self {
            message: msg.into(),
            level: NotificationLevel::Error,
        }
    }

    pub fn info(msg: impl Into<String>) -> Self {
        Self {
            message: msg.into(),
            level: NotificationLevel::Info,
        }
    }
}

/// A notification plus the moment it was shown.
#[derive(Debug, Clone)]
pub struct Toast {
    pub notification: Notification,
    pub shown_at: Instant,
}

impl Toast {
    pub fn new(notification: Notification, shown_at: Instant) -> Self {
        Self {
            notification,
            shown_at,
        }
    }

    pub fn is_expired(&self, now: Instant) -> bool {
        now.saturating_duration_since(self.shown_at) >= NOTIFICATION_TTL
    }
}

/// A destructive action waiting for a y/n answer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfirmAction {
    DeleteUser { id: i64, name: String },
}

impl fmt::Display for ConfirmAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::DeleteUser { name, .. } => write!(f, "{DELETE_USER_PROMPT} ({name})"),
        }
    }
}

#[derive(Debug, Clone)]
pub enum Action {
    // ── Lifecycle ──
    Quit,
    Tick,
    Render,
    Resize(u16, u16),

    // ── Navigation ──
    SwitchScreen(ScreenId),
    ToggleHelp,
    /// Re-fetch the resource behind the active tab.
    Refresh,

    // ── Data (from the bridge) ──
    TrafficUpdated(TrafficView),
    TableUpdated(TableView),
    SummaryUpdated(TrafficSummary),
    /// A fetch for `Resource` was applied at the given time.
    Fetched(Resource, DateTime<Utc>),

    // ── Row actions ──
    RequestToggle(i64),
    RequestResolve(i64),
    RequestDelete(i64),
    ActionFinished(ActionKind, i64),

    // ── Confirmation dialog ──
    ShowConfirm(ConfirmAction),
    ConfirmYes,
    ConfirmNo,

    // ── Notifications ──
    Notify(Notification),
    DismissNotification,
}
