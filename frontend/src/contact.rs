use gloo_timers::future::TimeoutFuture;
use serde::Serialize;
use serde_json::Value;
use wasm_bindgen_futures::spawn_local;
use web_sys::{HtmlInputElement, HtmlSelectElement, HtmlTextAreaElement};
use yew::prelude::*;

use crate::api::{self, ApiError, CONTACT_ERRORS};
use crate::components::notification::use_notifier;
use crate::config::{CONTACT_BUTTON_RESET, CONTACT_PATH};
use crate::pricing::catalog::CATALOG;
use crate::validation::{is_valid_email, ValidationError};

#[derive(Serialize, Clone, Debug, Default, PartialEq)]
pub struct ContactMessage {
    pub name: String,
    pub email: String,
    pub language: String,
    pub message: String,
}

impl ContactMessage {
    pub fn validate(&self) -> Result<(), ValidationError> {
        let fields = [&self.name, &self.email, &self.language, &self.message];
        if fields.iter().any(|f| f.is_empty()) {
            return Err(ValidationError::MissingFields);
        }
        if !is_valid_email(&self.email) {
            return Err(ValidationError::InvalidEmail);
        }
        Ok(())
    }
}

pub async fn submit_contact(message: &ContactMessage) -> Result<Value, ApiError> {
    api::post_json(CONTACT_PATH, message).await
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SendPhase {
    Idle,
    Sending,
    Sent,
    Failed,
}

impl SendPhase {
    pub fn label(self) -> &'static str {
        match self {
            SendPhase::Idle => "Send Message",
            SendPhase::Sending => "Sending...",
            SendPhase::Sent => "Message Sent!",
            SendPhase::Failed => "Failed to Send",
        }
    }

    fn style(self) -> &'static str {
        match self {
            SendPhase::Idle => "background: linear-gradient(135deg, #5856D6 0%, #7B68EE 100%); opacity: 1;",
            SendPhase::Sending => "background: linear-gradient(135deg, #5856D6 0%, #7B68EE 100%); opacity: 0.7;",
            SendPhase::Sent => "background: linear-gradient(135deg, #4CAF50 0%, #45a049 100%); opacity: 0.7;",
            SendPhase::Failed => "background: linear-gradient(135deg, #FF6B6B 0%, #EE5A52 100%); opacity: 0.7;",
        }
    }
}

#[function_component]
pub fn ContactForm() -> Html {
    let notifier = use_notifier();
    let form = use_state(ContactMessage::default);
    let phase = use_state(|| SendPhase::Idle);

    let update = |apply: fn(&mut ContactMessage, String)| {
        let form = form.clone();
        move |value: String| {
            let mut next = (*form).clone();
            apply(&mut next, value);
            form.set(next);
        }
    };
    let on_name = {
        let set = update(|m, v| m.name = v);
        Callback::from(move |e: InputEvent| set(e.target_unchecked_into::<HtmlInputElement>().value()))
    };
    let on_email = {
        let set = update(|m, v| m.email = v);
        Callback::from(move |e: InputEvent| set(e.target_unchecked_into::<HtmlInputElement>().value()))
    };
    let on_language = {
        let set = update(|m, v| m.language = v);
        Callback::from(move |e: Event| set(e.target_unchecked_into::<HtmlSelectElement>().value()))
    };
    let on_message = {
        let set = update(|m, v| m.message = v);
        Callback::from(move |e: InputEvent| set(e.target_unchecked_into::<HtmlTextAreaElement>().value()))
    };

    let onsubmit = {
        let form = form.clone();
        let phase = phase.clone();
        let notifier = notifier.clone();
        Callback::from(move |e: SubmitEvent| {
            e.prevent_default();
            let message = (*form).clone();
            if let Err(invalid) = message.validate() {
                notifier.error(invalid.to_string());
                return;
            }
            let form = form.clone();
            let phase = phase.clone();
            let notifier = notifier.clone();
            phase.set(SendPhase::Sending);
            spawn_local(async move {
                match submit_contact(&message).await {
                    Ok(_) => {
                        phase.set(SendPhase::Sent);
                        form.set(ContactMessage::default());
                        notifier.success("Thank you! Your message has been sent successfully. We'll get back to you soon!");
                    }
                    Err(err) => {
                        log::error!("Contact form error: {}", err);
                        phase.set(SendPhase::Failed);
                        notifier.error(err.user_message(&CONTACT_ERRORS));
                    }
                }
                TimeoutFuture::new(CONTACT_BUTTON_RESET).await;
                phase.set(SendPhase::Idle);
            });
        })
    };

    html! {
        <form class="contact-form" onsubmit={onsubmit}>
            <div class="form-row">
                <input name="name" type="text" placeholder="Your Name" value={form.name.clone()} oninput={on_name} />
                <input name="email" type="email" placeholder="Your Email" value={form.email.clone()} oninput={on_email} />
            </div>
            <select name="language" onchange={on_language}>
                <option value="" selected={form.language.is_empty()}>{"Language you're interested in"}</option>
                { for CATALOG.iter().map(|entry| html! {
                    <option value={entry.name} selected={form.language == entry.name}>{entry.name}</option>
                }) }
            </select>
            <textarea name="message" rows="5" placeholder="Your Message" value={form.message.clone()} oninput={on_message} />
            <button
                type="submit"
                class="form-submit-btn"
                disabled={*phase != SendPhase::Idle}
                style={phase.style()}
            >
                <span>{phase.label()}</span>
            </button>
        </form>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn filled() -> ContactMessage {
        ContactMessage {
            name: "Asha".into(),
            email: "asha@example.com".into(),
            language: "French".into(),
            message: "When does the next A1 batch start?".into(),
        }
    }

    #[test]
    fn complete_message_passes() {
        assert_eq!(filled().validate(), Ok(()));
    }

    #[test]
    fn any_empty_field_blocks_submission() {
        let mut m = filled();
        m.language.clear();
        assert_eq!(m.validate(), Err(ValidationError::MissingFields));
        let mut m = filled();
        m.message.clear();
        assert_eq!(m.validate(), Err(ValidationError::MissingFields));
    }

    #[test]
    fn malformed_email_blocks_submission() {
        let mut m = filled();
        m.email = "asha@example".into();
        assert_eq!(m.validate(), Err(ValidationError::InvalidEmail));
    }

    #[test]
    fn body_matches_backend_fields() {
        let body = serde_json::to_value(filled()).unwrap();
        let mut keys: Vec<_> = body.as_object().unwrap().keys().cloned().collect();
        keys.sort();
        assert_eq!(keys, ["email", "language", "message", "name"]);
    }

    #[test]
    fn button_labels() {
        assert_eq!(SendPhase::Sending.label(), "Sending...");
        assert_eq!(SendPhase::Sent.label(), "Message Sent!");
        assert_eq!(SendPhase::Failed.label(), "Failed to Send");
    }
}
