use crate::api::{self, ApiError};
use crate::config::{ENROLLMENT_PATH, PROFILE_PATH, SIGNUP_ENTRY};
use crate::session;

pub fn enrollment_url(language_name: &str) -> String {
    format!("{}?language={}", ENROLLMENT_PATH, urlencoding::encode(language_name))
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EnrollDecision {
    /// Signed in, go straight to the enrollment page.
    Enroll(String),
    /// Not signed in (or we could not tell): sign up first, then resume here.
    Signup { resume: String },
}

/// Turns the profile probe into a destination. Anything but a 2xx, including
/// a failed request, sends the visitor through signup.
pub fn decide_enrollment(language_name: &str, probe: &Result<u16, ApiError>) -> EnrollDecision {
    let url = enrollment_url(language_name);
    match probe {
        Ok(status) if (200..300).contains(status) => EnrollDecision::Enroll(url),
        _ => EnrollDecision::Signup { resume: url },
    }
}

pub async fn check_and_enroll(language_name: &str) {
    log::info!("Enroll button clicked for language: {}", language_name);
    let probe = api::probe(PROFILE_PATH).await;
    match &probe {
        Ok(status) => log::info!("Auth check response status: {}", status),
        Err(err) => log::warn!("Auth check failed, treating as signed out: {}", err),
    }
    match decide_enrollment(language_name, &probe) {
        EnrollDecision::Enroll(url) => session::navigate(&url),
        EnrollDecision::Signup { resume } => {
            session::store_redirect(&resume);
            session::navigate(SIGNUP_ENTRY);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn url_encodes_language_name() {
        assert_eq!(enrollment_url("French"), "/enrollment/?language=French");
        assert_eq!(enrollment_url("Old Norse"), "/enrollment/?language=Old%20Norse");
    }

    #[test]
    fn success_statuses_enroll_directly() {
        for status in [200, 204, 299] {
            assert_eq!(
                decide_enrollment("Korean", &Ok(status)),
                EnrollDecision::Enroll("/enrollment/?language=Korean".into())
            );
        }
    }

    #[test]
    fn unauthenticated_goes_through_signup() {
        for status in [401, 403, 500, 302] {
            assert_eq!(
                decide_enrollment("Korean", &Ok(status)),
                EnrollDecision::Signup { resume: "/enrollment/?language=Korean".into() }
            );
        }
    }

    #[test]
    fn network_failure_also_goes_through_signup() {
        let probe = Err(ApiError::Network("Failed to fetch".into()));
        assert_eq!(
            decide_enrollment("German", &probe),
            EnrollDecision::Signup { resume: "/enrollment/?language=German".into() }
        );
    }
}
