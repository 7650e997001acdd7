//! Session-completion notifications.
//!
//! Two independent channels fire on every completion:
//! - a local notification, shown only when permission was granted
//! - a push request to the relay, sent only when a subscription is stored
//!
//! Neither channel can affect timer or progress state.

mod push;

pub use push::{PushRelayClient, PushRequest};

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use tokio::task::JoinHandle;
use tracing::{debug, warn};

use crate::error::ValidationError;
use crate::timer::Phase;

pub const APP_TITLE: &str = "Pomodoro Timer";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NotificationPermission {
    #[default]
    Granted,
    Denied,
    /// Never asked. Treated like `Denied`.
    #[serde(rename = "default")]
    NotAsked,
}

impl NotificationPermission {
    pub fn is_granted(self) -> bool {
        self == NotificationPermission::Granted
    }
}

impl fmt::Display for NotificationPermission {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            NotificationPermission::Granted => "granted",
            NotificationPermission::Denied => "denied",
            NotificationPermission::NotAsked => "default",
        })
    }
}

impl FromStr for NotificationPermission {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "granted" => Ok(NotificationPermission::Granted),
            "denied" => Ok(NotificationPermission::Denied),
            "default" => Ok(NotificationPermission::NotAsked),
            other => Err(ValidationError::UnknownPermission(other.to_string())),
        }
    }
}

/// Title and body of a completion notification.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NotificationContent {
    pub title: String,
    pub body: String,
}

impl NotificationContent {
    /// Text for the local notification.
    pub fn local(phase: Phase) -> Self {
        let body = match phase {
            Phase::Break => "Перерыв завершён!",
            Phase::Work => "Рабочая сессия завершена!",
        };
        Self {
            title: APP_TITLE.into(),
            body: body.into(),
        }
    }

    /// Text for the background push, which is read out of context.
    pub fn push(phase: Phase) -> Self {
        let body = match phase {
            Phase::Break => "Перерыв завершён! 🎉",
            Phase::Work => "Сессия завершена! Пора на перерыв или новую помодоро.",
        };
        Self {
            title: APP_TITLE.into(),
            body: body.into(),
        }
    }
}

/// Displays a notification on the local device.
pub trait LocalNotifier {
    fn show(&self, content: &NotificationContent);
}

/// Fans a completion out to the local notifier and the push relay.
pub struct Notifier<L> {
    local: L,
    permission: NotificationPermission,
    relay: Option<PushRelayClient>,
    subscription: Option<serde_json::Value>,
}

impl<L: LocalNotifier> Notifier<L> {
    pub fn new(local: L, permission: NotificationPermission) -> Self {
        Self {
            local,
            permission,
            relay: None,
            subscription: None,
        }
    }

    /// Enable push delivery. Without a subscription push stays disabled.
    pub fn with_push(
        mut self,
        relay: PushRelayClient,
        subscription: Option<serde_json::Value>,
    ) -> Self {
        self.relay = Some(relay);
        self.subscription = subscription;
        self
    }

    pub fn local(&self) -> &L {
        &self.local
    }

    /// Handle one completion. Returns the push task handle when a push was
    /// dispatched; callers may ignore it.
    pub fn session_completed(&self, phase: Phase) -> Option<JoinHandle<()>> {
        if self.permission.is_granted() {
            self.local.show(&NotificationContent::local(phase));
        } else {
            debug!(permission = %self.permission, "local notification skipped");
        }

        let (Some(relay), Some(subscription)) = (&self.relay, &self.subscription) else {
            return None;
        };
        match PushRequest::new(subscription.clone(), &NotificationContent::push(phase)) {
            Ok(request) => relay.dispatch(request),
            Err(e) => {
                warn!(error = %e, "could not build push request");
                None
            }
        }
    }
}
