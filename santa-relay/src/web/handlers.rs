//! Slash command endpoint handlers.
//!
//! Every reply is HTTP 200 with a plain-text body, errors included. Slack
//! shows the body to the person who ran the command.

use std::sync::Arc;

use axum::{
    extract::{rejection::FormRejection, Form, State},
    Json,
};
use serde::Serialize;
use tracing::{info, warn};

use crate::command::{CommandError, Relay, SlashCommand};

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    pub relay: Arc<Relay>,
}

impl AppState {
    pub fn new(relay: Relay) -> Self {
        Self {
            relay: Arc::new(relay),
        }
    }
}

// =============================================================================
// Health Check
// =============================================================================

/// Health check response.
#[derive(Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
}

/// Health check endpoint.
pub async fn health() -> Json<HealthResponse> {
    Json(HealthResponse { status: "ok" })
}

// =============================================================================
// Slash Command
// =============================================================================

/// Slash command endpoint, mounted on every path.
///
/// The returned `String` is sent verbatim as `text/plain`.
pub async fn slash_command(
    State(state): State<AppState>,
    form: Result<Form<Vec<(String, String)>>, FormRejection>,
) -> String {
    let command = match form {
        Ok(Form(pairs)) => SlashCommand::from_pairs(pairs),
        Err(rejection) => {
            warn!(error = %rejection, "slash_command_malformed");
            return CommandError::Malformed(rejection.body_text()).to_string();
        }
    };

    info!(
        command = ?command.command,
        has_token = command.token.is_some(),
        has_text = command.text.is_some(),
        "slash_command_received"
    );

    match state.relay.handle(command).await {
        Ok(reply) => {
            info!("slash_command_forwarded");
            reply
        }
        Err(CommandError::Delivery(e)) => {
            warn!(error = %e, "slash_command_delivery_failed");
            CommandError::Delivery(e).to_string()
        }
        Err(e) => e.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use axum::{
        body::{to_bytes, Body},
        http::{header::CONTENT_TYPE, Method, Request, StatusCode},
        Router,
    };
    use reqwest::Client;
    use tower::ServiceExt;
    use url::Url;
    use wiremock::matchers::{header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    use crate::command::{CONFIG_ERROR, MISSING_TEXT, SEND_FAILED, USAGE_HINT};
    use crate::forward::Forwarder;
    use crate::identity::{NameGenerator, ANIMALS};
    use crate::web::router;

    const TOKEN: &str = "xoxo-token";

    fn app(webhook: &str) -> Router {
        let forwarder = Forwarder::new(
            Client::new(),
            Url::parse(webhook).unwrap(),
            Arc::new(NameGenerator::with_seed(11)),
        );
        router(AppState::new(Relay::new(TOKEN, forwarder)))
    }

    fn form_request(uri: &str, body: &str) -> Request<Body> {
        Request::builder()
            .method(Method::POST)
            .uri(uri)
            .header(CONTENT_TYPE, "application/x-www-form-urlencoded")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    async fn send(app: Router, request: Request<Body>) -> (StatusCode, String) {
        let response = app.oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        (status, String::from_utf8(bytes.to_vec()).unwrap())
    }

    #[tokio::test]
    async fn test_health() {
        let request = Request::builder()
            .uri("/health")
            .body(Body::empty())
            .unwrap();
        let (status, body) = send(app("http://127.0.0.1:9/"), request).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, r#"{"status":"ok"}"#);
    }

    #[tokio::test]
    async fn test_wrong_token() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200))
            .expect(0)
            .mount(&server)
            .await;

        let (status, body) = send(
            app(&server.uri()),
            form_request("/", "token=wrong&text=%40ashwin+hi&team_id=T1&user_name=someone"),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, CONFIG_ERROR);

        let (_, body) = send(app(&server.uri()), form_request("/", "text=%40ashwin+hi")).await;
        assert_eq!(body, CONFIG_ERROR);
    }

    #[tokio::test]
    async fn test_repeated_token_uses_first() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200))
            .expect(0)
            .mount(&server)
            .await;

        let (status, body) = send(
            app(&server.uri()),
            form_request(
                "/",
                &format!("token=wrong&token={}&text=%40ashwin+hi", TOKEN),
            ),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, CONFIG_ERROR);
    }

    #[tokio::test]
    async fn test_repeated_text_forwards_first() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200))
            .expect(1)
            .mount(&server)
            .await;

        let (status, body) = send(
            app(&server.uri()),
            form_request(
                "/",
                &format!(
                    "token={}&token=other&text=%40ashwin+first&text=%23general+second",
                    TOKEN
                ),
            ),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, "Anonymously sent [first] to @ashwin");

        let requests = server.received_requests().await.unwrap();
        let payload: serde_json::Value = serde_json::from_slice(&requests[0].body).unwrap();
        assert_eq!(payload["channel"], "@ashwin");
        assert_eq!(payload["text"], "first");
    }

    #[tokio::test]
    async fn test_missing_text() {
        let (status, body) = send(
            app("http://127.0.0.1:9/"),
            form_request("/", &format!("token={}&command=%2Fanon", TOKEN)),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, MISSING_TEXT);
    }

    #[tokio::test]
    async fn test_usage_hint() {
        let (status, body) = send(
            app("http://127.0.0.1:9/"),
            form_request("/", &format!("token={}&text=hello+there", TOKEN)),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, USAGE_HINT);
    }

    #[tokio::test]
    async fn test_malformed_form() {
        let request = Request::builder()
            .method(Method::POST)
            .uri("/")
            .header(CONTENT_TYPE, "application/json")
            .body(Body::from(r#"{"token":"xoxo-token"}"#))
            .unwrap();

        let (status, body) = send(app("http://127.0.0.1:9/"), request).await;
        assert_eq!(status, StatusCode::OK);
        assert!(body.contains("Content-Type"), "body: {}", body);
    }

    #[tokio::test]
    async fn test_forwarded_on_any_path() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/services/T0/B0/abc"))
            .and(header("content-type", "application/json"))
            .respond_with(ResponseTemplate::new(200).set_body_string("ok"))
            .expect(1)
            .mount(&server)
            .await;

        let (status, body) = send(
            app(&format!("{}/services/T0/B0/abc", server.uri())),
            form_request(
                "/slack/anon",
                &format!(
                    "token={}&team_id=T1&channel_id=C1&user_id=U1&user_name=alice&command=%2Fanon&text=%40ashwin%3A+hey+what%27s+up%3F",
                    TOKEN
                ),
            ),
        )
        .await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, "Anonymously sent [hey what's up?] to @ashwin");

        let requests = server.received_requests().await.unwrap();
        let payload: serde_json::Value = serde_json::from_slice(&requests[0].body).unwrap();
        assert_eq!(payload["channel"], "@ashwin");
        assert_eq!(payload["text"], "hey what's up?");

        let username = payload["username"].as_str().unwrap();
        let animal = username.strip_prefix("Santa ").unwrap();
        assert!(ANIMALS.contains(&animal));
        assert!(!username.contains("alice"));
    }

    #[tokio::test]
    async fn test_transport_failure() {
        let port = {
            let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
            listener.local_addr().unwrap().port()
        };

        let (status, body) = send(
            app(&format!("http://127.0.0.1:{}/hook", port)),
            form_request("/", &format!("token={}&text=%23general+hello", TOKEN)),
        )
        .await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, SEND_FAILED);
    }
}
