use once_cell::sync::Lazy;
use regex::Regex;
use thiserror::Error;

use crate::config::{MIN_PASSWORD_LEN, OTP_LEN};

static OTP_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^\d{6}$").unwrap());
static EMAIL_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").unwrap());

/// Client-side failures. None of these ever reach the network.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("Passwords do not match!")]
    PasswordMismatch,
    #[error("Password must be at least 8 characters long")]
    WeakPassword,
    #[error("Please enter a valid 6-digit code")]
    MalformedOtp,
    #[error("Please fill in all fields")]
    MissingFields,
    #[error("Please enter a valid email address")]
    InvalidEmail,
}

pub fn validate_signup(password: &str, confirm: &str) -> Result<(), ValidationError> {
    if password != confirm {
        return Err(ValidationError::PasswordMismatch);
    }
    // Length in UTF-16 units, the way the browser counts form input.
    if password.encode_utf16().count() < MIN_PASSWORD_LEN {
        return Err(ValidationError::WeakPassword);
    }
    Ok(())
}

/// Checks a code as typed, surrounding whitespace ignored.
pub fn validate_otp(code: &str) -> Result<(), ValidationError> {
    let code = code.trim();
    if code.len() != OTP_LEN || !OTP_RE.is_match(code) {
        return Err(ValidationError::MalformedOtp);
    }
    Ok(())
}

/// Live filter for the OTP field: anything that is not an ASCII digit is dropped.
pub fn sanitize_otp(input: &str) -> String {
    input.chars().filter(|c| c.is_ascii_digit()).collect()
}

pub fn is_valid_email(email: &str) -> bool {
    EMAIL_RE.is_match(email)
}
