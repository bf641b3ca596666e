use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::spawn_local;
use web_sys::KeyboardEvent;
use yew::prelude::*;

use crate::pricing::catalog::LanguageEntry;
use crate::pricing::enroll;

#[derive(Properties, PartialEq)]
pub struct PricingModalProps {
    pub entry: &'static LanguageEntry,
    pub on_close: Callback<()>,
}

/// Mounted only while open. Locks page scroll and listens for Escape for as
/// long as it is on screen.
#[function_component(PricingModal)]
pub fn pricing_modal(props: &PricingModalProps) -> Html {
    {
        let on_close = props.on_close.clone();
        use_effect_with_deps(
            move |_| {
                let document = web_sys::window().and_then(|w| w.document());
                let body = document.as_ref().and_then(|d| d.body());
                if let Some(body) = &body {
                    let _ = body.style().set_property("overflow", "hidden");
                }

                let keydown = Closure::wrap(Box::new(move |e: KeyboardEvent| {
                    if e.key() == "Escape" {
                        on_close.emit(());
                    }
                }) as Box<dyn FnMut(KeyboardEvent)>);
                if let Some(document) = &document {
                    let _ = document.add_event_listener_with_callback("keydown", keydown.as_ref().unchecked_ref());
                }

                move || {
                    if let Some(document) = &document {
                        let _ = document
                            .remove_event_listener_with_callback("keydown", keydown.as_ref().unchecked_ref());
                    }
                    if let Some(body) = &body {
                        let _ = body.style().remove_property("overflow");
                    }
                }
            },
            (),
        );
    }

    let entry = props.entry;
    let close = {
        let on_close = props.on_close.clone();
        Callback::from(move |_: MouseEvent| on_close.emit(()))
    };
    let on_enroll = Callback::from(move |e: MouseEvent| {
        e.prevent_default();
        e.stop_propagation();
        spawn_local(enroll::check_and_enroll(entry.name));
    });

    html! {
        <div class="pricing-modal active" id="pricingModal">
            <div class="pricing-modal-overlay" onclick={close.clone()}></div>
            <div class="pricing-modal-content" role="dialog" aria-labelledby="modalTitle">
                <button class="modal-close" onclick={close} aria-label="Close">{"×"}</button>
                <div class="modal-header">
                    <span class="modal-flag" id="modalFlag">{entry.flag}</span>
                    <h2 id="modalTitle">{entry.name}</h2>
                </div>
                <p class="modal-description" id="modalDescription">{entry.description}</p>
                <div class="pricing-levels" id="pricingLevels">
                    { for entry.pricing.iter().map(|level| html! {
                        <div class="pricing-level">
                            <span class="level-name">{level.level}</span>
                            <span class="level-price">{format!("{} + taxes", level.price)}</span>
                        </div>
                    }) }
                </div>
                <button class="modal-cta-btn" id="enrollNowBtn" data-language={entry.name} onclick={on_enroll}>
                    {"Enroll Now"}
                </button>
            </div>
        </div>
    }
}
