//! Client for the push relay endpoint.
//!
//! The relay accepts `{ subscription, payload }`, forwards `payload` to the
//! subscribed endpoint and answers `{ success: true }` or `{ error }` with a
//! non-2xx status. Only the status is inspected here; the error text is kept
//! for logging.

use reqwest::Client;
use serde::{Deserialize, Serialize};
use tokio::runtime::Handle;
use tokio::task::JoinHandle;
use tracing::{debug, warn};

use super::NotificationContent;
use crate::error::{PushError, Result};

/// Body sent to the relay.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PushRequest {
    /// Opaque subscription object owned by the registration collaborator.
    pub subscription: serde_json::Value,
    /// Stringified JSON `{ "title": ..., "body": ... }`.
    pub payload: String,
}

impl PushRequest {
    pub fn new(subscription: serde_json::Value, content: &NotificationContent) -> Result<Self> {
        Ok(Self {
            subscription,
            payload: serde_json::to_string(content)?,
        })
    }
}

#[derive(Debug, Deserialize)]
struct RelayError {
    error: String,
}

#[derive(Debug, Clone)]
pub struct PushRelayClient {
    client: Client,
    relay_url: String,
}

impl PushRelayClient {
    pub fn new(relay_url: impl Into<String>) -> Result<Self> {
        let relay_url = relay_url.into();
        if let Err(e) = url::Url::parse(&relay_url) {
            return Err(PushError::InvalidUrl {
                url: relay_url,
                message: e.to_string(),
            }
            .into());
        }
        Ok(Self {
            client: Client::new(),
            relay_url,
        })
    }

    pub fn relay_url(&self) -> &str {
        &self.relay_url
    }

    /// POST the request and wait for the relay's verdict.
    pub async fn send(&self, request: &PushRequest) -> Result<()> {
        let resp = self
            .client
            .post(&self.relay_url)
            .json(request)
            .send()
            .await
            .map_err(PushError::from)?;

        let status = resp.status();
        if status.is_success() {
            debug!(%status, "push relayed");
            return Ok(());
        }

        let text = resp.text().await.unwrap_or_default();
        let message = serde_json::from_str::<RelayError>(&text)
            .map(|e| e.error)
            .unwrap_or(text);
        Err(PushError::Rejected {
            status: status.as_u16(),
            message,
        }
        .into())
    }

    /// Send in the background. Failures are logged and never retried.
    ///
    /// Returns `None` without sending when called outside a tokio runtime.
    pub fn dispatch(&self, request: PushRequest) -> Option<JoinHandle<()>> {
        let runtime = match Handle::try_current() {
            Ok(handle) => handle,
            Err(e) => {
                warn!(error = %e, "no async runtime, push notification dropped");
                return None;
            }
        };
        let client = self.clone();
        Some(runtime.spawn(async move {
            if let Err(e) = client.send(&request).await {
                warn!(error = %e, "push notification failed");
            }
        }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::CoreError;
    use crate::timer::Phase;
    use mockito::Matcher;

    fn subscription() -> serde_json::Value {
        serde_json::json!({ "endpoint": "https://push.example.com/sub/1" })
    }

    #[test]
    fn payload_is_stringified_json() {
        let request = PushRequest::new(subscription(), &NotificationContent::push(Phase::Work)).unwrap();
        let inner: serde_json::Value = serde_json::from_str(&request.payload).unwrap();
        assert_eq!(inner["title"], "Pomodoro Timer");
        assert!(inner["body"].as_str().unwrap().starts_with("Сессия завершена!"));
    }

    #[test]
    fn rejects_unparseable_relay_url() {
        assert!(matches!(
            PushRelayClient::new("not a url"),
            Err(CoreError::Push(PushError::InvalidUrl { .. }))
        ));
    }

    #[tokio::test]
    async fn send_posts_subscription_and_payload() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("POST", "/api/send-push")
            .match_header("content-type", "application/json")
            .match_body(Matcher::PartialJson(serde_json::json!({
                "subscription": { "endpoint": "https://push.example.com/sub/1" }
            })))
            .with_status(200)
            .with_body(r#"{"success":true}"#)
            .create_async()
            .await;

        let client = PushRelayClient::new(format!("{}/api/send-push", server.url())).unwrap();
        let request = PushRequest::new(subscription(), &NotificationContent::push(Phase::Break)).unwrap();
        client.send(&request).await.unwrap();
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn non_success_status_is_rejected() {
        let mut server = mockito::Server::new_async().await;
        let _mock = server
            .mock("POST", "/api/send-push")
            .with_status(500)
            .with_body(r#"{"error":"Failed to send push"}"#)
            .create_async()
            .await;

        let client = PushRelayClient::new(format!("{}/api/send-push", server.url())).unwrap();
        let request = PushRequest::new(subscription(), &NotificationContent::push(Phase::Work)).unwrap();
        match client.send(&request).await {
            Err(CoreError::Push(PushError::Rejected { status, message })) => {
                assert_eq!(status, 500);
                assert_eq!(message, "Failed to send push");
            }
            other => panic!("expected rejection, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn dispatch_swallows_failures() {
        let client = PushRelayClient::new("http://127.0.0.1:9/api/send-push").unwrap();
        let request = PushRequest::new(subscription(), &NotificationContent::push(Phase::Work)).unwrap();
        client.dispatch(request).unwrap().await.unwrap();
    }

    #[test]
    fn dispatch_without_runtime_is_dropped() {
        let client = PushRelayClient::new("http://127.0.0.1:9/api/send-push").unwrap();
        let request = PushRequest::new(subscription(), &NotificationContent::push(Phase::Break)).unwrap();
        assert!(client.dispatch(request).is_none());
    }
}
