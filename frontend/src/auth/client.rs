use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::api::{self, ApiError, GOOGLE_ERRORS};
use crate::auth::flow::AuthSuccess;
use crate::config;

#[derive(Serialize)]
pub struct LoginRequest {
    pub username_or_email: String,
    pub password: String,
}

#[derive(Serialize, Debug, PartialEq)]
pub struct SendOtpRequest {
    pub email: String,
    pub password: String,
    pub first_name: String,
    pub last_name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub username: Option<String>,
}

impl SendOtpRequest {
    /// Username is optional on the form; blank means "let the server pick".
    pub fn new(email: String, password: String, first_name: String, last_name: String, username: &str) -> Self {
        let username = Some(username.trim().to_string()).filter(|u| !u.is_empty());
        SendOtpRequest { email, password, first_name, last_name, username }
    }
}

#[derive(Serialize)]
pub struct VerifyOtpRequest {
    pub email: String,
    pub otp: String,
}

#[derive(Serialize)]
pub struct ResendOtpRequest {
    pub email: String,
}

#[derive(Deserialize)]
struct GoogleAuthResponse {
    auth_url: Option<String>,
}

fn parse<T: for<'de> Deserialize<'de>>(body: Value) -> Result<T, ApiError> {
    serde_json::from_value(body).map_err(|e| ApiError::ServerResponse(e.to_string()))
}

pub async fn login(request: &LoginRequest) -> Result<AuthSuccess, ApiError> {
    log::info!("Attempting login for {}", request.username_or_email);
    parse(api::post_json(config::LOGIN_PATH, request).await?)
}

pub async fn send_otp(request: &SendOtpRequest) -> Result<Value, ApiError> {
    log::info!("Requesting signup code for {}", request.email);
    api::post_json(config::SEND_OTP_PATH, request).await
}

pub async fn verify_otp(request: &VerifyOtpRequest) -> Result<AuthSuccess, ApiError> {
    parse(api::post_json(config::VERIFY_OTP_PATH, request).await?)
}

pub async fn resend_otp(request: &ResendOtpRequest) -> Result<Value, ApiError> {
    api::post_json(config::RESEND_OTP_PATH, request).await
}

/// Authorization URL for the Google consent screen. A 2xx without a URL is
/// reported as a rejection carrying the body, so its `error` field surfaces.
pub async fn google_auth_url() -> Result<String, ApiError> {
    let body = api::get_json(config::GOOGLE_AUTH_PATH).await?;
    let parsed: GoogleAuthResponse = parse(body.clone())?;
    match parsed.auth_url.filter(|u| !u.is_empty()) {
        Some(url) => Ok(url),
        None => {
            log::error!("No auth_url in response: {}", body);
            Err(ApiError::Rejected { status: 200, body })
        }
    }
}

/// Notice text for a failed Google sign-in. A 2xx without a URL surfaces the
/// body's `error` and a 2xx that is not JSON reads as a server error; every
/// other failure gets the generic text plus detail.
pub fn google_error_message(err: &ApiError) -> String {
    let detail = match err {
        ApiError::Rejected { status: 200, .. } => return err.user_message(&GOOGLE_ERRORS),
        // A 2xx that is not JSON is a server fault, not an HTTP error.
        ApiError::NonJson { status: 200..=299, .. } => return err.user_message(&GOOGLE_ERRORS),
        ApiError::Rejected { status, .. } | ApiError::NonJson { status, .. } => {
            format!("HTTP error! status: {}", status)
        }
        ApiError::Network(msg) | ApiError::ServerResponse(msg) => msg.clone(),
        ApiError::CsrfMissing => err.to_string(),
    };
    format!("An error occurred. Please try again. {}", detail)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn blank_username_is_left_out() {
        let req = SendOtpRequest::new("a@b.com".into(), "password1".into(), "A".into(), "B".into(), "   ");
        assert_eq!(
            serde_json::to_value(&req).unwrap(),
            json!({"email": "a@b.com", "password": "password1", "first_name": "A", "last_name": "B"})
        );
    }

    #[test]
    fn username_is_trimmed() {
        let req = SendOtpRequest::new("a@b.com".into(), "password1".into(), "A".into(), "B".into(), " ana ");
        assert_eq!(req.username.as_deref(), Some("ana"));
        assert_eq!(serde_json::to_value(&req).unwrap()["username"], "ana");
    }

    #[test]
    fn login_body_field_names() {
        let req = LoginRequest { username_or_email: "a@b.com".into(), password: "x".into() };
        assert_eq!(
            serde_json::to_value(&req).unwrap(),
            json!({"username_or_email": "a@b.com", "password": "x"})
        );
    }

    #[test]
    fn otp_bodies() {
        let verify = VerifyOtpRequest { email: "a@b.com".into(), otp: "123456".into() };
        assert_eq!(serde_json::to_value(&verify).unwrap(), json!({"email": "a@b.com", "otp": "123456"}));
        let resend = ResendOtpRequest { email: "a@b.com".into() };
        assert_eq!(serde_json::to_value(&resend).unwrap(), json!({"email": "a@b.com"}));
    }

    #[test]
    fn unexpected_success_shape_is_a_server_response_error() {
        let res: Result<AuthSuccess, ApiError> = parse(json!({"user": "not an object"}));
        assert!(matches!(res, Err(ApiError::ServerResponse(_))));
    }

    #[test]
    fn google_missing_url_uses_body_error() {
        let err = ApiError::Rejected { status: 200, body: json!({"error": "OAuth not configured"}) };
        assert_eq!(google_error_message(&err), "OAuth not configured");
        let err = ApiError::Rejected { status: 200, body: json!({}) };
        assert_eq!(google_error_message(&err), "Failed to get Google OAuth URL");
    }

    #[test]
    fn google_http_failures_carry_status() {
        let err = ApiError::Rejected { status: 500, body: json!({"error": "boom"}) };
        assert_eq!(google_error_message(&err), "An error occurred. Please try again. HTTP error! status: 500");
        let err = ApiError::NonJson { status: 502, body: "<html>".into() };
        assert_eq!(google_error_message(&err), "An error occurred. Please try again. HTTP error! status: 502");
        let err = ApiError::Network("Failed to fetch".into());
        assert_eq!(google_error_message(&err), "An error occurred. Please try again. Failed to fetch");
        let err = ApiError::ServerResponse("expected value at line 1".into());
        assert_eq!(google_error_message(&err), "An error occurred. Please try again. expected value at line 1");
    }

    #[test]
    fn google_success_without_json_is_a_server_error() {
        let err = ApiError::NonJson { status: 200, body: "<html>".into() };
        assert_eq!(google_error_message(&err), "Server error. Please try again later.");
    }
}
