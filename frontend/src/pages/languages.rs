use web_sys::{HtmlInputElement, KeyboardEvent};
use yew::prelude::*;

use crate::components::notification::{NotificationClass, NotificationProvider};
use crate::effects::FadeIn;
use crate::pricing::catalog::{self, LanguageEntry, CATALOG};
use crate::pricing::modal::PricingModal;

#[function_component]
pub fn Languages() -> Html {
    let term = use_state(String::new);
    let open = use_state(|| None::<&'static LanguageEntry>);
    let search_ref = use_node_ref();

    let clear = {
        let term = term.clone();
        let search_ref = search_ref.clone();
        move || {
            term.set(String::new());
            if let Some(input) = search_ref.cast::<HtmlInputElement>() {
                let _ = input.focus();
            }
        }
    };
    let on_input = {
        let term = term.clone();
        Callback::from(move |e: InputEvent| {
            term.set(e.target_unchecked_into::<HtmlInputElement>().value());
        })
    };
    let on_keydown = {
        let clear = clear.clone();
        Callback::from(move |e: KeyboardEvent| {
            if e.key() == "Escape" {
                clear();
            }
        })
    };
    let on_clear = Callback::from(move |_: MouseEvent| clear());

    let open_pricing = |key: &'static str| {
        let open = open.clone();
        Callback::from(move |e: MouseEvent| {
            e.prevent_default();
            match catalog::lookup(key) {
                Some(entry) => open.set(Some(entry)),
                None => log::warn!("No pricing data for language: {}", key),
            }
        })
    };
    let on_close = {
        let open = open.clone();
        Callback::from(move |_: ()| open.set(None))
    };

    let visible = catalog::search(&term).len();
    let summary = catalog::search_summary(&term, visible, CATALOG.len());
    let searching = !term.trim().is_empty();

    html! {
        <NotificationProvider class={NotificationClass::Site}>
            <main class="languages-page">
                <FadeIn class="languages-header">
                    <h1>{"Choose your language"}</h1>
                    <p>{"Every course runs from A1 to C2 with live, certified instructors."}</p>
                </FadeIn>
                <div class="search-bar-container">
                    <input
                        id="languageSearch"
                        type="text"
                        placeholder="Search languages..."
                        autocomplete="off"
                        ref={search_ref}
                        value={(*term).clone()}
                        oninput={on_input}
                        onkeydown={on_keydown}
                    />
                    <button
                        id="clearSearch"
                        class="clear-search"
                        aria-label="Clear search"
                        style={if searching { "display: flex;" } else { "display: none;" }}
                        onclick={on_clear}
                    >
                        {"×"}
                    </button>
                    <div
                        id="searchResultsCount"
                        class={classes!("search-results-count", (searching && visible == 0).then_some("empty"))}
                    >
                        {summary}
                    </div>
                </div>
                <div class="languages-grid">
                    { for CATALOG.iter().map(|entry| html! {
                        <div
                            class={classes!("language-card", (!catalog::matches(entry, &term)).then_some("hidden"))}
                            data-language={entry.key}
                        >
                            <span class="language-flag">{entry.flag}</span>
                            <h3>{entry.name}</h3>
                            <span class="language-tier">{format!("Tier {}", entry.tier.number())}</span>
                            <button class="language-btn" data-language={entry.key} onclick={open_pricing(entry.key)}>
                                {"View Pricing"}
                            </button>
                        </div>
                    }) }
                </div>
                {
                    if let Some(entry) = *open {
                        html! { <PricingModal entry={entry} on_close={on_close} /> }
                    } else {
                        html! {}
                    }
                }
            </main>
        </NotificationProvider>
    }
}
