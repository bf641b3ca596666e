#[cfg(debug_assertions)]
pub fn get_backend_url() -> &'static str {
    "http://localhost:8000"  // Django dev server when running locally
}

#[cfg(not(debug_assertions))]
pub fn get_backend_url() -> &'static str {
    ""  // Same origin in production
}

pub fn api_url(path: &str) -> String {
    format!("{}{}", get_backend_url(), path)
}

// Backend endpoints
pub const LOGIN_PATH: &str = "/api/auth/login/";
pub const SEND_OTP_PATH: &str = "/api/auth/send-otp/";
pub const VERIFY_OTP_PATH: &str = "/api/auth/verify-otp/";
pub const RESEND_OTP_PATH: &str = "/api/auth/resend-otp/";
pub const GOOGLE_AUTH_PATH: &str = "/api/auth/google/";
pub const PROFILE_PATH: &str = "/api/auth/profile/";
pub const CONTACT_PATH: &str = "/api/contact/submit/";

// Full-page destinations rendered by the server
pub const DASHBOARD_PATH: &str = "/dashboard/";
pub const ADMIN_DASHBOARD_PATH: &str = "/api/courses/admin/dashboard/";
pub const ENROLLMENT_PATH: &str = "/enrollment/";
pub const SIGNUP_ENTRY: &str = "/auth/?action=signup";

pub const REDIRECT_AFTER_LOGIN_KEY: &str = "redirectAfterLogin";

pub const MIN_PASSWORD_LEN: usize = 8;
pub const OTP_LEN: usize = 6;

// Timings, milliseconds
pub const NOTIFICATION_ENTER_DELAY: u32 = 10;
pub const NOTIFICATION_DISMISS_AFTER: u32 = 5_000;
pub const NOTIFICATION_EXIT_DURATION: u32 = 300;
pub const AUTH_REDIRECT_DELAY: u32 = 1_500;
pub const CONTACT_BUTTON_RESET: u32 = 3_000;
pub const REVIEWS_FETCH_DELAY: u32 = 1_000;
pub const COUNTER_DURATION: f64 = 1_500.0;

// Scroll handling
pub const NAVBAR_THRESHOLD_SITE: f64 = 100.0;
pub const NAVBAR_THRESHOLD_AUTH: f64 = 50.0;
pub const NAVBAR_THROTTLE: u32 = 100;
pub const PARALLAX_THROTTLE: u32 = 50;

// Google Places, placeholders mean "not configured" and the demo reviews are shown
pub const GOOGLE_PLACES_API_KEY: &str = "YOUR_GOOGLE_API_KEY";
pub const GOOGLE_PLACE_ID: &str = "YOUR_PLACE_ID";

pub fn google_places_configured() -> bool {
    !GOOGLE_PLACES_API_KEY.is_empty() && GOOGLE_PLACES_API_KEY != "YOUR_GOOGLE_API_KEY"
}
