use wasm_bindgen::{JsCast, JsValue};
use js_sys::Reflect;
use web_sys::{window, HtmlDocument, HtmlInputElement};

const COOKIE_NAMES: [&str; 2] = ["csrftoken", "csrfmiddlewaretoken"];

/// Resolves the anti-forgery token the backend expects on mutating requests.
///
/// Sources in order, first non-empty wins: the `window.csrfToken` global set by
/// the server template, the hidden `csrfmiddlewaretoken` form field, the
/// `csrf-token` meta tag, and finally the cookie jar.
pub fn csrf_token() -> Option<String> {
    let window = window()?;
    let document = window.document()?;

    let from_global = || {
        Reflect::get(&window, &JsValue::from_str("csrfToken"))
            .ok()
            .and_then(|v| v.as_string())
    };
    let from_input = || {
        document
            .query_selector("[name=csrfmiddlewaretoken]")
            .ok()
            .flatten()
            .and_then(|el| el.dyn_into::<HtmlInputElement>().ok())
            .map(|input| input.value())
    };
    let from_meta = || {
        document
            .query_selector("meta[name=csrf-token]")
            .ok()
            .flatten()
            .and_then(|el| el.get_attribute("content"))
    };
    let cookies = document
        .clone()
        .dyn_into::<HtmlDocument>()
        .ok()
        .and_then(|doc| doc.cookie().ok())
        .unwrap_or_default();

    let token = first_present([from_global(), from_input(), from_meta()])
        .or_else(|| token_from_cookies(&cookies));
    if token.is_none() {
        log::error!("CSRF token not found. Available cookies: {}", cookies);
    }
    token
}

fn first_present<const N: usize>(candidates: [Option<String>; N]) -> Option<String> {
    candidates.into_iter().flatten().find(|v| !v.is_empty())
}

/// Scans a `document.cookie` string in order and returns the first CSRF cookie
/// with a value. Pairs that do not split into exactly `name=value` are skipped.
pub fn token_from_cookies(cookies: &str) -> Option<String> {
    cookies.split(';').find_map(|cookie| {
        let parts: Vec<&str> = cookie.trim().split('=').collect();
        match parts.as_slice() {
            [name, value] if !value.is_empty() && COOKIE_NAMES.contains(name) => Some(
                urlencoding::decode(value)
                    .map(|v| v.into_owned())
                    .unwrap_or_else(|_| value.to_string()),
            ),
            _ => None,
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn finds_csrftoken_among_other_cookies() {
        let jar = "sessionid=abc; csrftoken=tok123; theme=dark";
        assert_eq!(token_from_cookies(jar).as_deref(), Some("tok123"));
    }

    #[test]
    fn middleware_cookie_name_is_accepted() {
        assert_eq!(
            token_from_cookies("csrfmiddlewaretoken=mw").as_deref(),
            Some("mw")
        );
    }

    #[test]
    fn first_matching_cookie_wins() {
        let jar = "csrfmiddlewaretoken=first; csrftoken=second";
        assert_eq!(token_from_cookies(jar).as_deref(), Some("first"));
    }

    #[test]
    fn values_are_percent_decoded() {
        assert_eq!(token_from_cookies("csrftoken=a%2Bb%3D").as_deref(), Some("a+b="));
    }

    #[test]
    fn empty_and_malformed_pairs_are_skipped() {
        assert_eq!(token_from_cookies(""), None);
        assert_eq!(token_from_cookies("csrftoken="), None);
        assert_eq!(token_from_cookies("csrftoken=a=b"), None);
        assert_eq!(
            token_from_cookies("csrftoken=; csrftoken=later").as_deref(),
            Some("later")
        );
    }

    #[test]
    fn earlier_sources_take_precedence() {
        assert_eq!(
            first_present([None, Some("input".into()), Some("meta".into())]).as_deref(),
            Some("input")
        );
        assert_eq!(
            first_present([Some(String::new()), None, Some("meta".into())]).as_deref(),
            Some("meta")
        );
        assert_eq!(first_present::<3>([None, None, None]), None);
    }
}
