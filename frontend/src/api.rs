use gloo_net::http::{Request, Response};
use serde::Serialize;
use serde_json::Value;
use thiserror::Error;
use web_sys::RequestCredentials;

use crate::config;
use crate::csrf;

/// Everything that can end a request attempt. All of them are terminal for the
/// attempt and leave the page interactive.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ApiError {
    #[error("CSRF token missing")]
    CsrfMissing,
    #[error("network error: {0}")]
    Network(String),
    #[error("malformed server response: {0}")]
    ServerResponse(String),
    #[error("non-JSON response with status {status}")]
    NonJson { status: u16, body: String },
    #[error("request rejected with status {status}")]
    Rejected { status: u16, body: Value },
}

impl From<gloo_net::Error> for ApiError {
    fn from(err: gloo_net::Error) -> Self {
        match err {
            gloo_net::Error::JsError(e) => ApiError::Network(e.to_string()),
            gloo_net::Error::SerdeError(e) => ApiError::ServerResponse(e.to_string()),
            gloo_net::Error::GlooError(msg) => classify_failure(&msg),
        }
    }
}

/// Fetch rejections only carry text, so sort them by what the browser said.
fn classify_failure(msg: &str) -> ApiError {
    if msg.contains("JSON") {
        ApiError::ServerResponse(msg.to_string())
    } else {
        ApiError::Network(msg.to_string())
    }
}

/// Which fields of an error body to try, in what order, and what to say when
/// none of them has anything.
#[derive(Debug, Clone, Copy)]
pub struct ErrorPolicy {
    pub fields: &'static [&'static str],
    pub scan_all: bool,
    pub fallback: &'static str,
}

pub const LOGIN_ERRORS: ErrorPolicy = ErrorPolicy {
    fields: &["error", "email", "password", "non_field_errors"],
    scan_all: false,
    fallback: "Login failed. Please check your credentials.",
};

pub const SIGNUP_ERRORS: ErrorPolicy = ErrorPolicy {
    fields: &["error", "email", "password", "first_name", "last_name", "non_field_errors"],
    scan_all: true,
    fallback: "Failed to send verification code. Please try again.",
};

pub const VERIFY_ERRORS: ErrorPolicy = ErrorPolicy {
    fields: &["error"],
    scan_all: false,
    fallback: "Verification failed. Please try again.",
};

pub const RESEND_ERRORS: ErrorPolicy = ErrorPolicy {
    fields: &["error"],
    scan_all: false,
    fallback: "Failed to resend code. Please try again.",
};

pub const GOOGLE_ERRORS: ErrorPolicy = ErrorPolicy {
    fields: &["error"],
    scan_all: false,
    fallback: "Failed to get Google OAuth URL",
};

pub const CONTACT_ERRORS: ErrorPolicy = ErrorPolicy {
    fields: &["error"],
    scan_all: false,
    fallback: "Failed to send message. Please try again.",
};

fn truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().map_or(false, |f| f != 0.0),
        Value::String(s) => !s.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}

/// A string, or the first element of an array of them.
fn message_of(value: &Value) -> Option<String> {
    match value {
        Value::String(s) if !s.is_empty() => Some(s.clone()),
        Value::Array(items) => items.first().and_then(message_of),
        Value::Number(_) | Value::Bool(_) if truthy(value) => Some(value.to_string()),
        _ => None,
    }
}

/// Picks the first usable message out of a structured error body.
pub fn extract_error_message(body: &Value, policy: &ErrorPolicy) -> String {
    if let Some(fields) = body.as_object() {
        for field in policy.fields {
            if let Some(value) = fields.get(*field).filter(|v| truthy(v)) {
                // A present but empty field ends the search, like the first match would.
                return message_of(value).unwrap_or_else(|| policy.fallback.to_string());
            }
        }
        if policy.scan_all {
            if let Some(msg) = fields.values().filter(|v| truthy(v)).find_map(message_of) {
                return msg;
            }
        }
    }
    policy.fallback.to_string()
}

impl ApiError {
    /// Text for the notification shown to the user.
    pub fn user_message(&self, policy: &ErrorPolicy) -> String {
        match self {
            ApiError::CsrfMissing => "CSRF token missing. Please refresh the page.".to_string(),
            ApiError::Network(_) => "Network error. Please check your internet connection.".to_string(),
            ApiError::ServerResponse(_) => "Server response error. Please try again.".to_string(),
            ApiError::NonJson { .. } => "Server error. Please try again later.".to_string(),
            ApiError::Rejected { body, .. } => extract_error_message(body, policy),
        }
    }
}

fn is_json(response: &Response) -> bool {
    response
        .headers()
        .get("content-type")
        .map_or(false, |ct| ct.contains("application/json"))
}

async fn read_json(response: Response) -> Result<Value, ApiError> {
    let status = response.status();
    if !is_json(&response) {
        let body = response.text().await.unwrap_or_default();
        gloo_console::error!("Non-JSON response:", &body);
        return Err(ApiError::NonJson { status, body });
    }
    let ok = response.ok();
    let body: Value = response.json().await?;
    if ok {
        Ok(body)
    } else {
        log::warn!("Request failed with status {}", status);
        Err(ApiError::Rejected { status, body })
    }
}

/// State-changing call: JSON body, CSRF header, cookies included.
pub async fn post_json<B: Serialize>(path: &str, body: &B) -> Result<Value, ApiError> {
    let token = csrf::csrf_token().ok_or(ApiError::CsrfMissing)?;
    let response = Request::post(&config::api_url(path))
        .header("X-CSRFToken", &token)
        .credentials(RequestCredentials::Include)
        .json(body)?
        .send()
        .await?;
    read_json(response).await
}

pub async fn get_json(path: &str) -> Result<Value, ApiError> {
    let response = Request::get(&config::api_url(path))
        .header("Accept", "application/json")
        .credentials(RequestCredentials::Include)
        .send()
        .await?;
    read_json(response).await
}

/// Status of a credential-bearing GET, body ignored.
pub async fn probe(path: &str) -> Result<u16, ApiError> {
    let response = Request::get(&config::api_url(path))
        .header("Content-Type", "application/json")
        .credentials(RequestCredentials::Include)
        .send()
        .await?;
    Ok(response.status())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn non_field_errors_surface_for_login() {
        let body = json!({"non_field_errors": ["bad creds"]});
        assert_eq!(extract_error_message(&body, &LOGIN_ERRORS), "bad creds");
    }

    #[test]
    fn error_field_has_top_priority() {
        let body = json!({"email": ["taken"], "error": "Invalid email or password"});
        assert_eq!(extract_error_message(&body, &LOGIN_ERRORS), "Invalid email or password");
    }

    #[test]
    fn field_order_follows_policy() {
        let body = json!({"password": ["too common"], "email": ["Enter a valid email address."]});
        assert_eq!(extract_error_message(&body, &SIGNUP_ERRORS), "Enter a valid email address.");
        let body = json!({"last_name": "required", "first_name": ["required too"]});
        assert_eq!(extract_error_message(&body, &SIGNUP_ERRORS), "required too");
    }

    #[test]
    fn signup_scans_unknown_fields() {
        let body = json!({"username": ["A user with that username already exists."]});
        assert_eq!(
            extract_error_message(&body, &SIGNUP_ERRORS),
            "A user with that username already exists."
        );
        // Login does not scan.
        assert_eq!(extract_error_message(&body, &LOGIN_ERRORS), LOGIN_ERRORS.fallback);
    }

    #[test]
    fn falsy_fields_are_passed_over() {
        let body = json!({"error": "", "email": null, "password": ["short"]});
        assert_eq!(extract_error_message(&body, &LOGIN_ERRORS), "short");
    }

    #[test]
    fn empty_array_falls_back() {
        let body = json!({"non_field_errors": []});
        assert_eq!(extract_error_message(&body, &LOGIN_ERRORS), LOGIN_ERRORS.fallback);
    }

    #[test]
    fn non_object_bodies_use_fallback() {
        assert_eq!(extract_error_message(&json!(["x"]), &VERIFY_ERRORS), VERIFY_ERRORS.fallback);
        assert_eq!(extract_error_message(&json!(null), &SIGNUP_ERRORS), SIGNUP_ERRORS.fallback);
    }

    #[test]
    fn taxonomy_maps_to_distinct_messages() {
        let network = ApiError::Network("Failed to fetch".into()).user_message(&LOGIN_ERRORS);
        let non_json = ApiError::NonJson { status: 502, body: "<html>".into() }.user_message(&LOGIN_ERRORS);
        let decode = ApiError::ServerResponse("eof".into()).user_message(&LOGIN_ERRORS);
        let csrf = ApiError::CsrfMissing.user_message(&LOGIN_ERRORS);
        assert_eq!(network, "Network error. Please check your internet connection.");
        assert_eq!(non_json, "Server error. Please try again later.");
        assert_eq!(decode, "Server response error. Please try again.");
        assert_eq!(csrf, "CSRF token missing. Please refresh the page.");
        let rejected = ApiError::Rejected { status: 400, body: json!({"error": "Invalid OTP or email"}) };
        assert_eq!(rejected.user_message(&VERIFY_ERRORS), "Invalid OTP or email");
    }

    #[test]
    fn gloo_failures_are_classified_by_text() {
        assert!(matches!(classify_failure("NetworkError when attempting to fetch"), ApiError::Network(_)));
        assert!(matches!(classify_failure("unexpected JSON token"), ApiError::ServerResponse(_)));
    }
}
