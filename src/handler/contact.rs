//! Contact form handler
//!
//! Accepts the JSON payload from the portfolio contact form, renders it
//! into a plain-text email, and relays it through the configured SMTP
//! relay. One synchronous pass per request: no retry, no persistence,
//! no partial-success state. Any failure along the way collapses into
//! the single "Email failed!" acknowledgment.

use crate::config::AppState;
use crate::http;
use crate::logger;
use crate::mail::{self, ContactMessage};
use http_body_util::{BodyExt, Full};
use hyper::body::Bytes;
use hyper::{Request, Response, StatusCode};
use std::sync::Arc;

/// Handle POST /send-message
pub async fn handle_send_message(
    req: Request<hyper::body::Incoming>,
    state: Arc<AppState>,
) -> Response<Full<Bytes>> {
    let enable_cors = state.config.http.enable_cors;

    let body = match req.into_body().collect().await {
        Ok(collected) => collected.to_bytes(),
        Err(e) => return failure_response(&e.to_string(), enable_cors),
    };

    let message: ContactMessage = match serde_json::from_slice(&body) {
        Ok(m) => m,
        Err(e) => return failure_response(&e.to_string(), enable_cors),
    };

    // lettre's SmtpTransport is blocking; keep it off the connection thread
    let smtp = state.config.smtp.clone();
    let send_result =
        tokio::task::spawn_blocking(move || mail::send_contact_message(&smtp, &message)).await;

    match send_result {
        Ok(Ok(())) => {
            logger::log_mail_sent(state.config.smtp.recipient());
            success_response(enable_cors)
        }
        Ok(Err(e)) => {
            logger::log_mail_failed(&e.to_string());
            failure_response(&e.to_string(), enable_cors)
        }
        Err(e) => {
            logger::log_error(&format!("Mail task panicked: {e}"));
            failure_response(&e.to_string(), enable_cors)
        }
    }
}

fn success_response(enable_cors: bool) -> Response<Full<Bytes>> {
    http::build_json_response(
        StatusCode::OK,
        &serde_json::json!({"message": "Message sent successfully!"}),
        enable_cors,
    )
}

fn failure_response(error: &str, enable_cors: bool) -> Response<Full<Bytes>> {
    http::build_json_response(
        StatusCode::INTERNAL_SERVER_ERROR,
        &serde_json::json!({"message": "Email failed!", "error": error}),
        enable_cors,
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    async fn body_string(resp: Response<Full<Bytes>>) -> String {
        let bytes = resp.into_body().collect().await.unwrap().to_bytes();
        String::from_utf8(bytes.to_vec()).unwrap()
    }

    #[tokio::test]
    async fn test_success_response_shape() {
        let resp = success_response(false);
        assert_eq!(resp.status(), StatusCode::OK);
        assert_eq!(
            resp.headers().get("content-type").unwrap(),
            "application/json"
        );

        let body: serde_json::Value = serde_json::from_str(&body_string(resp).await).unwrap();
        assert_eq!(body["message"], "Message sent successfully!");
    }

    #[tokio::test]
    async fn test_failure_response_carries_error_text() {
        let resp = failure_response("relay unreachable", false);
        assert_eq!(resp.status(), StatusCode::INTERNAL_SERVER_ERROR);

        let body: serde_json::Value = serde_json::from_str(&body_string(resp).await).unwrap();
        assert_eq!(body["message"], "Email failed!");
        assert_eq!(body["error"], "relay unreachable");
    }

    #[test]
    fn test_cors_header_on_acknowledgment() {
        let resp = success_response(true);
        assert_eq!(
            resp.headers().get("access-control-allow-origin").unwrap(),
            "*"
        );
    }

    #[test]
    fn test_payload_missing_fields_default_to_empty() {
        let msg: ContactMessage = serde_json::from_str(r#"{"name": "Ada"}"#).unwrap();
        assert_eq!(msg.name, "Ada");
        assert_eq!(msg.email, "");
        assert_eq!(msg.subject, "");
        assert_eq!(msg.message, "");
    }

    #[test]
    fn test_payload_all_fields() {
        let msg: ContactMessage = serde_json::from_str(
            r#"{"name": "Ada", "email": "ada@example.com", "subject": "Hi", "message": "Hello there"}"#,
        )
        .unwrap();
        assert_eq!(msg.name, "Ada");
        assert_eq!(msg.email, "ada@example.com");
        assert_eq!(msg.subject, "Hi");
        assert_eq!(msg.message, "Hello there");
    }

    #[test]
    fn test_malformed_payload_is_rejected() {
        assert!(serde_json::from_str::<ContactMessage>("not json").is_err());
        assert!(serde_json::from_str::<ContactMessage>("").is_err());
    }
}
