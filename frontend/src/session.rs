use web_sys::{window, Storage};

use crate::config::REDIRECT_AFTER_LOGIN_KEY;

fn session_storage() -> Option<Storage> {
    window().and_then(|w| w.session_storage().ok()).flatten()
}

/// Remembers where to send the user once they have signed in.
pub fn store_redirect(url: &str) {
    match session_storage() {
        Some(storage) => {
            if storage.set_item(REDIRECT_AFTER_LOGIN_KEY, url).is_err() {
                log::warn!("Could not persist redirect target {}", url);
            }
        }
        None => log::warn!("Session storage unavailable, dropping redirect target {}", url),
    }
}

/// Reads and deletes the stored redirect target. Consumed at most once.
pub fn take_redirect() -> Option<String> {
    let storage = session_storage()?;
    let target = storage.get_item(REDIRECT_AFTER_LOGIN_KEY).ok().flatten()?;
    let _ = storage.remove_item(REDIRECT_AFTER_LOGIN_KEY);
    Some(target).filter(|t| !t.is_empty())
}

/// Full-page navigation, leaving the single page app.
pub fn navigate(url: &str) {
    if let Some(window) = window() {
        log::info!("Navigating to {}", url);
        if window.location().set_href(url).is_err() {
            log::error!("Navigation to {} was refused", url);
        }
    }
}

/// Drops the query string from the address bar without reloading.
pub fn strip_query() {
    let Some(window) = window() else { return };
    let Ok(path) = window.location().pathname() else { return };
    let title = window.document().map(|d| d.title()).unwrap_or_default();
    if let Ok(history) = window.history() {
        let _ = history.replace_state_with_url(&wasm_bindgen::JsValue::NULL, &title, Some(&path));
    }
}
