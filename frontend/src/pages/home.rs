use yew::prelude::*;
use yew_router::components::Link;

use crate::components::notification::{NotificationClass, NotificationProvider};
use crate::config::PARALLAX_THROTTLE;
use crate::contact::ContactForm;
use crate::effects::{parallax_offsets, use_autoplay_once, use_throttled_scroll, Counter, FadeIn, ParallaxOffsets};
use crate::pricing::catalog::CATALOG;
use crate::reviews::ReviewsGrid;
use crate::Route;

const STATS: &[(&str, &str)] = &[
    ("500+", "Students enrolled"),
    ("12", "Languages offered"),
    ("98%", "Student satisfaction"),
    ("25+", "Certified instructors"),
];

// Contact section and footer rise further and slower than the default fade.
const SECTION_SHIFT: u32 = 30;
const SECTION_DURATION: f64 = 0.8;
const FOOTER_DELAY: f64 = 0.2;

fn viewport_height() -> f64 {
    web_sys::window()
        .and_then(|w| w.inner_height().ok())
        .and_then(|h| h.as_f64())
        .unwrap_or(0.0)
}

fn translate(px: f64) -> String {
    format!("transform: translateY({}px);", px)
}

/// Keeps the last offsets once the hero has scrolled out of view.
#[hook]
fn use_parallax() -> ParallaxOffsets {
    let scrolled = use_throttled_scroll(PARALLAX_THROTTLE);
    let last = use_mut_ref(|| ParallaxOffsets { background: 0.0, content: 0.0, visual: 0.0 });
    if let Some(offsets) = parallax_offsets(scrolled, viewport_height()) {
        *last.borrow_mut() = offsets;
    }
    let offsets = *last.borrow();
    offsets
}

#[function_component]
fn Hero() -> Html {
    let offsets = use_parallax();

    html! {
        <section class="hero">
            <div class="hero-background-gradient" style={translate(offsets.background)}></div>
            <div class="hero-content-section" style={translate(offsets.content)}>
                <h1 class="hero-title">{"Speak the world's languages"}</h1>
                <p class="hero-subtitle">
                    {"Live classes with certified instructors, from your first word to full proficiency."}
                </p>
                <div class="hero-cta">
                    <Link<Route> to={Route::Languages} classes="hero-cta-primary">
                        {"Explore Languages"}
                    </Link<Route>>
                    <a href="#contact" class="hero-cta-secondary">{"Talk to us"}</a>
                </div>
            </div>
            <div class="hero-visual-section" style={translate(offsets.visual)}>
                <VideoCard />
            </div>
        </section>
    }
}

#[function_component]
fn VideoCard() -> Html {
    let card = use_node_ref();
    let video = use_node_ref();
    use_autoplay_once(card.clone(), video.clone());

    html! {
        <div class="card-video" ref={card}>
            <video
                class="card-video-element"
                ref={video}
                src="/static/videos/classroom.mp4"
                muted={true}
                loop={true}
                playsinline={true}
            />
        </div>
    }
}

#[function_component]
fn Stats() -> Html {
    html! {
        <section class="stats-section">
            <FadeIn class="stats-title">
                <h2>{"Learning that shows results"}</h2>
            </FadeIn>
            <FadeIn class="stats-subtitle" delay={0.1}>
                <p>{"Numbers from our classrooms"}</p>
            </FadeIn>
            <div class="stats-grid">
                { for STATS.iter().enumerate().map(|(index, (value, label))| html! {
                    <FadeIn class="stat-card" shift={30} delay={index as f64 * 0.1}>
                        <Counter value={*value} />
                        <span class="metric-label">{*label}</span>
                    </FadeIn>
                }) }
            </div>
        </section>
    }
}

#[function_component]
fn LanguagesStrip() -> Html {
    html! {
        <section class="languages-section">
            <FadeIn class="languages-header">
                <h2>{"Languages we teach"}</h2>
            </FadeIn>
            <FadeIn class="languages-scroller" delay={0.1}>
                { for CATALOG.iter().map(|entry| html! {
                    <Link<Route> to={Route::Languages} classes="language-pill">
                        <span class="language-flag">{entry.flag}</span>
                        <span>{entry.name}</span>
                    </Link<Route>>
                }) }
            </FadeIn>
        </section>
    }
}

#[function_component]
pub fn Home() -> Html {
    html! {
        <NotificationProvider class={NotificationClass::Site}>
            <main class="home">
                <Hero />
                <Stats />
                <LanguagesStrip />
                <section class="reviews-section">
                    <h2 class="reviews-title">{"What our students say"}</h2>
                    <ReviewsGrid />
                </section>
                <FadeIn class="contact-section" id="contact" shift={SECTION_SHIFT} duration={SECTION_DURATION}>
                    <h2>{"Get in touch"}</h2>
                    <ContactForm />
                </FadeIn>
                <FadeIn class="footer" shift={SECTION_SHIFT} duration={SECTION_DURATION} delay={FOOTER_DELAY}>
                    <footer>
                        <p>{"© IFLA - International Foreign Language Academy"}</p>
                    </footer>
                </FadeIn>
            </main>
        </NotificationProvider>
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::effects::fade_style;

    #[test]
    fn footer_fades_in_after_the_contact_section() {
        let contact = fade_style(false, SECTION_SHIFT, SECTION_DURATION, 0.0);
        assert!(contact.contains("translateY(30px)"));
        assert!(contact.contains("opacity 0.8s ease 0s"));
        let footer = fade_style(false, SECTION_SHIFT, SECTION_DURATION, FOOTER_DELAY);
        assert!(footer.contains("opacity 0.8s ease 0.2s, transform 0.8s ease 0.2s"));
    }
}
