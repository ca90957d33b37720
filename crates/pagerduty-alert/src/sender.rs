use reqwest::StatusCode;
use serde_json::Value;
use tracing::{debug, info};

use crate::error::SendError;
use crate::payload::AlertEvent;

pub const DEFAULT_EVENTS_URL: &str = "https://events.pagerduty.com/v2/enqueue";

/// What the Events API said about an accepted event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Delivery {
    /// Response body, compacted when it is JSON.
    pub body: String,
    pub dedup_key: Option<String>,
}

/// Posts events to a PagerDuty Events API v2 endpoint. One request per call.
pub struct AlertSender {
    client: reqwest::Client,
    endpoint: String,
}

impl AlertSender {
    pub fn new(endpoint: impl Into<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            endpoint: endpoint.into(),
        }
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    pub async fn send(&self, event: &AlertEvent) -> Result<Delivery, SendError> {
        if event.routing_key.is_empty() {
            return Err(SendError::MissingRoutingKey);
        }

        debug!(endpoint = %self.endpoint, "Posting PagerDuty event");
        let resp = self.client.post(&self.endpoint).json(event).send().await?;

        let status = resp.status();
        let raw = resp.text().await?;
        let parsed = serde_json::from_str::<Value>(&raw).ok();
        let body = parsed
            .as_ref()
            .map_or_else(|| raw.clone(), Value::to_string);

        if status != StatusCode::ACCEPTED {
            return Err(SendError::Status {
                status: status.as_u16(),
                body,
            });
        }

        let dedup_key = parsed
            .as_ref()
            .and_then(|v| v.get("dedup_key"))
            .and_then(Value::as_str)
            .map(str::to_string);
        info!("Successfully sent PagerDuty alert. Response: {body}");

        Ok(Delivery { body, dedup_key })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Inputs;
    use crate::context::RunContext;
    use assert_matches::assert_matches;
    use mockito::Matcher;
    use serde_json::json;

    fn event(routing_key: &str) -> AlertEvent {
        let inputs = Inputs {
            integration_key: Some(routing_key.to_string()),
            ..Inputs::default()
        };
        AlertEvent::build(&RunContext::default(), &inputs, chrono::Utc::now())
    }

    #[tokio::test]
    async fn accepted_event_is_success() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("POST", "/v2/enqueue")
            .match_header("content-type", "application/json")
            .match_body(Matcher::PartialJson(json!({
                "routing_key": "R0UT1NG",
                "event_action": "trigger",
                "payload": { "source": "GitHub Actions", "severity": "critical" }
            })))
            .with_status(202)
            .with_header("content-type", "application/json")
            .with_body(r#"{"status":"success","message":"Event processed","dedup_key":"srv-key"}"#)
            .create_async()
            .await;

        let sender = AlertSender::new(format!("{}/v2/enqueue", server.url()));
        let delivery = sender.send(&event("R0UT1NG")).await.unwrap();

        mock.assert_async().await;
        assert_eq!(delivery.dedup_key.as_deref(), Some("srv-key"));
        assert!(delivery.body.contains("Event processed"));
    }

    #[tokio::test]
    async fn other_status_is_failure_with_body() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("POST", "/v2/enqueue")
            .with_status(400)
            .with_body(r#"{"status":"invalid event","errors":["'routing_key' is invalid"]}"#)
            .create_async()
            .await;

        let sender = AlertSender::new(format!("{}/v2/enqueue", server.url()));
        let err = sender.send(&event("bad-key")).await.unwrap_err();

        mock.assert_async().await;
        assert_matches!(err, SendError::Status { status: 400, .. });
        let msg = err.to_string();
        assert!(msg.contains("400"), "{msg}");
        assert!(msg.contains("invalid event"), "{msg}");
    }

    #[tokio::test]
    async fn even_200_is_not_accepted() {
        let mut server = mockito::Server::new_async().await;
        let _mock = server
            .mock("POST", "/")
            .with_status(200)
            .with_body("ok")
            .create_async()
            .await;

        let sender = AlertSender::new(server.url());
        let err = sender.send(&event("R0UT1NG")).await.unwrap_err();
        assert_eq!(err.to_string(), "PagerDuty API returned status code 200 - ok");
    }

    #[tokio::test]
    async fn connection_refused_is_transport_error() {
        // Grab a free port, then release it so nothing is listening.
        let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);

        let sender = AlertSender::new(format!("http://{addr}/v2/enqueue"));
        let err = sender.send(&event("R0UT1NG")).await.unwrap_err();

        let SendError::Transport(inner) = &err else {
            panic!("expected transport error, got {err:?}");
        };
        assert!(err.to_string().contains(&inner.to_string()));
    }

    #[tokio::test]
    async fn empty_routing_key_sends_nothing() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("POST", Matcher::Any)
            .expect(0)
            .create_async()
            .await;

        let sender = AlertSender::new(server.url());
        let err = sender.send(&event("")).await.unwrap_err();

        mock.assert_async().await;
        assert_matches!(err, SendError::MissingRoutingKey);
    }
}
