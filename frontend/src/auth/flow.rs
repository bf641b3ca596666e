use serde::Deserialize;

use crate::config::{ADMIN_DASHBOARD_PATH, DASHBOARD_PATH};
use crate::validation::ValidationError;

/// Which auth card is on screen. The pending signup email only exists while
/// the OTP card is shown.
#[derive(Clone, Debug, PartialEq, Eq, Default)]
pub enum AuthView {
    #[default]
    Login,
    Signup,
    OtpPending { email: String },
}

impl AuthView {
    /// Initial card from the `action` query parameter.
    pub fn from_action(action: Option<&str>) -> Self {
        match action {
            Some("signup") => AuthView::Signup,
            _ => AuthView::Login,
        }
    }

    pub fn show_signup(&self) -> Self {
        AuthView::Signup
    }

    pub fn show_login(&self) -> Self {
        AuthView::Login
    }

    /// Signup accepted by the backend, the code is on its way.
    pub fn otp_sent(&self, email: impl Into<String>) -> Self {
        AuthView::OtpPending { email: email.into() }
    }

    /// Back to an empty signup card, forgetting the pending email.
    pub fn reset_signup(&self) -> Self {
        AuthView::Signup
    }

    pub fn pending_email(&self) -> Option<&str> {
        match self {
            AuthView::OtpPending { email } if !email.is_empty() => Some(email),
            _ => None,
        }
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize)]
pub struct SessionUser {
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub is_staff: bool,
    #[serde(default)]
    pub is_superuser: bool,
}

impl SessionUser {
    pub fn is_admin(&self) -> bool {
        self.is_staff || self.is_superuser
    }
}

/// Body of a successful login or OTP verification.
#[derive(Clone, Debug, Default, Deserialize)]
pub struct AuthSuccess {
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub user: Option<SessionUser>,
}

/// A stored redirect wins, then admins go to the admin dashboard, everyone
/// else to the regular one.
pub fn post_auth_destination(stored: Option<String>, user: Option<&SessionUser>) -> String {
    if let Some(target) = stored.filter(|t| !t.is_empty()) {
        return target;
    }
    match user {
        Some(user) if user.is_admin() => ADMIN_DASHBOARD_PATH.to_string(),
        _ => DASHBOARD_PATH.to_string(),
    }
}

/// Idle and busy captions of a submit control.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SubmitLabels {
    pub idle: &'static str,
    pub busy: &'static str,
}

pub const LOGIN_SUBMIT: SubmitLabels = SubmitLabels { idle: "Log In", busy: "Logging in..." };
pub const SIGNUP_SUBMIT: SubmitLabels = SubmitLabels { idle: "Create Account", busy: "Sending verification code..." };
pub const VERIFY_SUBMIT: SubmitLabels = SubmitLabels { idle: "Verify & Create Account", busy: "Verifying..." };
pub const RESEND_SUBMIT: SubmitLabels = SubmitLabels { idle: "Resend code", busy: "Sending..." };

/// Submit control state. Disabled while busy; a failure restores it, a
/// success leaves it busy because the page is about to navigate away.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum SubmitState {
    #[default]
    Idle,
    Busy,
}

impl SubmitState {
    pub fn start(self) -> Self {
        SubmitState::Busy
    }

    pub fn fail(self) -> Self {
        SubmitState::Idle
    }

    pub fn succeed(self) -> Self {
        self
    }

    /// Controls that do not navigate (resend) come back after either outcome.
    pub fn settle(self) -> Self {
        SubmitState::Idle
    }

    pub fn is_busy(self) -> bool {
        self == SubmitState::Busy
    }

    pub fn label(self, labels: &SubmitLabels) -> &'static str {
        match self {
            SubmitState::Idle => labels.idle,
            SubmitState::Busy => labels.busy,
        }
    }
}

/// Builds the request only once the client-side check has passed, so invalid
/// input never produces anything to send.
pub fn after_validation<T>(check: Result<(), ValidationError>, build: impl FnOnce() -> T) -> Result<T, ValidationError> {
    check.map(|()| build())
}

#[cfg(test)]
mod tests {
    use std::cell::Cell;

    use super::*;
    use crate::api::{ApiError, LOGIN_ERRORS};
    use crate::validation::{validate_otp, validate_signup};

    #[test]
    fn action_param_selects_initial_card() {
        assert_eq!(AuthView::from_action(Some("signup")), AuthView::Signup);
        assert_eq!(AuthView::from_action(Some("login")), AuthView::Login);
        assert_eq!(AuthView::from_action(None), AuthView::Login);
    }

    #[test]
    fn pending_email_only_while_otp_card_is_visible() {
        let view = AuthView::Login.show_signup();
        assert_eq!(view.pending_email(), None);

        let view = view.otp_sent("a@b.com");
        assert_eq!(view.pending_email(), Some("a@b.com"));

        let view = view.reset_signup();
        assert_eq!(view, AuthView::Signup);
        assert_eq!(view.pending_email(), None);
    }

    #[test]
    fn new_signup_overwrites_pending_email() {
        let view = AuthView::Signup.otp_sent("old@b.com").reset_signup().otp_sent("new@b.com");
        assert_eq!(view.pending_email(), Some("new@b.com"));
    }

    #[test]
    fn empty_pending_email_counts_as_absent() {
        assert_eq!(AuthView::Signup.otp_sent("").pending_email(), None);
    }

    #[test]
    fn destination_prefers_stored_redirect() {
        let admin = SessionUser { is_staff: true, ..Default::default() };
        assert_eq!(
            post_auth_destination(Some("/enrollment/?language=French".into()), Some(&admin)),
            "/enrollment/?language=French"
        );
    }

    #[test]
    fn admins_and_superusers_get_admin_dashboard() {
        let staff = SessionUser { is_staff: true, ..Default::default() };
        let root = SessionUser { is_superuser: true, ..Default::default() };
        assert_eq!(post_auth_destination(None, Some(&staff)), ADMIN_DASHBOARD_PATH);
        assert_eq!(post_auth_destination(None, Some(&root)), ADMIN_DASHBOARD_PATH);
    }

    #[test]
    fn everyone_else_gets_dashboard() {
        let student = SessionUser::default();
        assert_eq!(post_auth_destination(None, Some(&student)), DASHBOARD_PATH);
        assert_eq!(post_auth_destination(None, None), DASHBOARD_PATH);
        assert_eq!(post_auth_destination(Some(String::new()), None), DASHBOARD_PATH);
    }

    #[test]
    fn success_body_parses_role_flags() {
        let body = serde_json::json!({
            "message": "Login successful",
            "user": {"id": 3, "email": "a@b.com", "is_staff": false, "is_superuser": true}
        });
        let parsed: AuthSuccess = serde_json::from_value(body).unwrap();
        assert!(parsed.user.unwrap().is_admin());
    }

    #[test]
    fn rejected_login_restores_the_button() {
        let state = SubmitState::default().start();
        assert!(state.is_busy());
        assert_eq!(state.label(&LOGIN_SUBMIT), "Logging in...");

        let err = ApiError::Rejected { status: 400, body: serde_json::json!({"non_field_errors": ["bad creds"]}) };
        assert_eq!(err.user_message(&LOGIN_ERRORS), "bad creds");
        let state = state.fail();
        assert!(!state.is_busy());
        assert_eq!(state.label(&LOGIN_SUBMIT), "Log In");
    }

    #[test]
    fn successful_submit_stays_busy() {
        for labels in [LOGIN_SUBMIT, SIGNUP_SUBMIT, VERIFY_SUBMIT] {
            let state = SubmitState::Idle.start().succeed();
            assert!(state.is_busy());
            assert_eq!(state.label(&labels), labels.busy);
        }
    }

    #[test]
    fn resend_comes_back_either_way() {
        let state = SubmitState::Idle.start();
        assert_eq!(state.label(&RESEND_SUBMIT), "Sending...");
        assert_eq!(state.settle().label(&RESEND_SUBMIT), "Resend code");
    }

    #[test]
    fn invalid_input_builds_no_request() {
        let built = Cell::new(0);
        let build = || built.set(built.get() + 1);

        assert_eq!(after_validation(validate_signup("password1", "password2"), build), Err(ValidationError::PasswordMismatch));
        assert_eq!(after_validation(validate_signup("short", "short"), build), Err(ValidationError::WeakPassword));
        assert_eq!(after_validation(validate_otp("12345"), build), Err(ValidationError::MalformedOtp));
        assert_eq!(built.get(), 0);

        assert_eq!(after_validation(validate_signup("password1", "password1"), build), Ok(()));
        assert_eq!(after_validation(validate_otp("123456"), build), Ok(()));
        assert_eq!(built.get(), 2);
    }
}
