use std::cell::RefCell;
use std::rc::Rc;

use gloo_timers::callback::Timeout;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::{JsCast, JsValue};
use wasm_bindgen_futures::{spawn_local, JsFuture};
use js_sys::Array;
use web_sys::{Element, HtmlVideoElement, IntersectionObserver, IntersectionObserverEntry, IntersectionObserverInit};
use yew::prelude::*;

use crate::config::COUNTER_DURATION;

pub const FADE_THRESHOLD: f64 = 0.1;
pub const FADE_ROOT_MARGIN: &str = "0px 0px -50px 0px";
pub const COUNTER_THRESHOLD: f64 = 0.5;
pub const VIDEO_THRESHOLD: f64 = 0.3;

pub fn navbar_scrolled(offset: f64, threshold: f64) -> bool {
    offset > threshold
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ParallaxOffsets {
    pub background: f64,
    pub content: f64,
    pub visual: f64,
}

/// Hero layer shifts in px. Past the first viewport the hero is off screen and
/// the last applied offsets are left alone.
pub fn parallax_offsets(scrolled: f64, viewport_height: f64) -> Option<ParallaxOffsets> {
    if scrolled >= viewport_height {
        return None;
    }
    Some(ParallaxOffsets {
        background: scrolled * 0.3,
        content: scrolled * 0.1,
        visual: scrolled * -0.05,
    })
}

pub fn ease_out_quad(progress: f64) -> f64 {
    progress * (2.0 - progress)
}

/// Counter value at `elapsed` ms, and whether the animation is done.
pub fn counter_frame(target: u32, elapsed: f64, duration: f64) -> (u32, bool) {
    let progress = (elapsed / duration).clamp(0.0, 1.0);
    let value = (f64::from(target) * ease_out_quad(progress)).floor() as u32;
    (value, progress >= 1.0)
}

pub fn counter_suffix(text: &str) -> &'static str {
    if text.contains('+') {
        "+"
    } else if text.contains('%') {
        "%"
    } else {
        ""
    }
}

/// Leading integer of a label such as "500+" or " 98%", like `parseInt`.
pub fn leading_int(text: &str) -> Option<i64> {
    let text = text.trim_start();
    let (sign, rest) = match text.strip_prefix('-') {
        Some(rest) => (-1, rest),
        None => (1, text.strip_prefix('+').unwrap_or(text)),
    };
    let digits: String = rest.chars().take_while(|c| c.is_ascii_digit()).collect();
    digits.parse::<i64>().ok().map(|n| sign * n)
}

/// Trailing-edge rate limiter. The first call arms it; calls while armed are
/// dropped; the caller runs its work and releases when the timer fires.
#[derive(Debug, Default)]
pub struct Throttle {
    armed: bool,
}

impl Throttle {
    pub fn try_arm(&mut self) -> bool {
        if self.armed {
            false
        } else {
            self.armed = true;
            true
        }
    }

    pub fn release(&mut self) {
        self.armed = false;
    }
}

fn scroll_offset() -> f64 {
    web_sys::window().and_then(|w| w.scroll_y().ok()).unwrap_or(0.0)
}

/// Vertical scroll offset, refreshed at most once per `interval_ms`.
#[hook]
pub fn use_throttled_scroll(interval_ms: u32) -> f64 {
    let offset = use_state(scroll_offset);

    {
        let offset = offset.clone();
        use_effect_with_deps(
            move |interval_ms| {
                let interval_ms = *interval_ms;
                let throttle = Rc::new(RefCell::new(Throttle::default()));
                let pending: Rc<RefCell<Option<Timeout>>> = Rc::new(RefCell::new(None));
                let window = web_sys::window();

                let on_scroll = {
                    let pending = pending.clone();
                    Closure::wrap(Box::new(move || {
                        if !throttle.borrow_mut().try_arm() {
                            return;
                        }
                        let throttle = throttle.clone();
                        let offset = offset.clone();
                        *pending.borrow_mut() = Some(Timeout::new(interval_ms, move || {
                            throttle.borrow_mut().release();
                            offset.set(scroll_offset());
                        }));
                    }) as Box<dyn FnMut()>)
                };

                if let Some(window) = &window {
                    let _ = window.add_event_listener_with_callback("scroll", on_scroll.as_ref().unchecked_ref());
                }

                move || {
                    if let Some(window) = &window {
                        let _ = window
                            .remove_event_listener_with_callback("scroll", on_scroll.as_ref().unchecked_ref());
                    }
                    pending.borrow_mut().take();
                }
            },
            interval_ms,
        );
    }

    *offset
}

/// Keeps an IntersectionObserver alive until the element has been seen once.
pub struct OnceObserver {
    observer: IntersectionObserver,
    _callback: Closure<dyn FnMut(Array, IntersectionObserver)>,
}

impl Drop for OnceObserver {
    fn drop(&mut self) {
        self.observer.disconnect();
    }
}

/// Calls `on_visible` the first time `target` intersects the viewport, then
/// stops observing it.
pub fn observe_once(
    target: &Element,
    threshold: f64,
    root_margin: Option<&str>,
    on_visible: impl FnOnce() + 'static,
) -> Option<OnceObserver> {
    let mut on_visible = Some(on_visible);
    let callback = Closure::wrap(Box::new(move |entries: Array, observer: IntersectionObserver| {
        for entry in entries.iter() {
            let entry: IntersectionObserverEntry = entry.unchecked_into();
            if entry.is_intersecting() {
                observer.unobserve(&entry.target());
                if let Some(f) = on_visible.take() {
                    f();
                }
            }
        }
    }) as Box<dyn FnMut(Array, IntersectionObserver)>);

    let init = IntersectionObserverInit::new();
    init.set_threshold(&JsValue::from_f64(threshold));
    if let Some(margin) = root_margin {
        init.set_root_margin(margin);
    }
    match IntersectionObserver::new_with_options(callback.as_ref().unchecked_ref(), &init) {
        Ok(observer) => {
            observer.observe(target);
            Some(OnceObserver { observer, _callback: callback })
        }
        Err(e) => {
            log::error!("IntersectionObserver unavailable: {:?}", e);
            None
        }
    }
}

/// True once the referenced element has scrolled into view. Never goes back.
#[hook]
pub fn use_seen_once(node: NodeRef, threshold: f64, root_margin: Option<&'static str>) -> bool {
    let seen = use_state(|| false);

    {
        let seen = seen.clone();
        use_effect_with_deps(
            move |node| {
                let observer = node.cast::<Element>().and_then(|el| {
                    observe_once(&el, threshold, root_margin, move || seen.set(true))
                });
                move || drop(observer)
            },
            node,
        );
    }

    *seen
}

/// Inline style for a fade-in element: hidden and shifted down until seen.
pub fn fade_style(seen: bool, shift_px: u32, duration_s: f64, delay_s: f64) -> String {
    let transition = format!(
        "transition: opacity {d}s ease {delay}s, transform {d}s ease {delay}s;",
        d = duration_s,
        delay = delay_s
    );
    if seen {
        format!("opacity: 1; transform: translateY(0); {}", transition)
    } else {
        format!("opacity: 0; transform: translateY({}px); {}", shift_px, transition)
    }
}

#[derive(Properties, PartialEq)]
pub struct FadeInProps {
    #[prop_or_default]
    pub class: Classes,
    #[prop_or(20)]
    pub shift: u32,
    #[prop_or(0.6)]
    pub duration: f64,
    #[prop_or_default]
    pub delay: f64,
    #[prop_or_default]
    pub id: Option<AttrValue>,
    pub children: Children,
}

/// Wrapper that fades its children in the first time they become visible.
#[function_component(FadeIn)]
pub fn fade_in(props: &FadeInProps) -> Html {
    let node = use_node_ref();
    let seen = use_seen_once(node.clone(), FADE_THRESHOLD, Some(FADE_ROOT_MARGIN));

    html! {
        <div
            ref={node}
            id={props.id.clone()}
            class={props.class.clone()}
            style={fade_style(seen, props.shift, props.duration, props.delay)}
        >
            { for props.children.iter() }
        </div>
    }
}

fn run_counter(target: u32, suffix: &'static str, display: UseStateHandle<String>) {
    let Some(window) = web_sys::window() else { return };
    let Some(performance) = window.performance() else {
        display.set(format!("{}{}", target, suffix));
        return;
    };
    let start = performance.now();

    let frame: Rc<RefCell<Option<Closure<dyn FnMut(f64)>>>> = Rc::new(RefCell::new(None));
    let handle = frame.clone();
    *handle.borrow_mut() = Some(Closure::wrap(Box::new(move |now: f64| {
        let (value, done) = counter_frame(target, now - start, COUNTER_DURATION);
        display.set(format!("{}{}", value, suffix));
        if done {
            // Breaks the Rc cycle so the closure is freed after this call.
            let _ = frame.borrow_mut().take();
        } else if let (Some(window), Some(cb)) = (web_sys::window(), frame.borrow().as_ref()) {
            let _ = window.request_animation_frame(cb.as_ref().unchecked_ref());
        }
    }) as Box<dyn FnMut(f64)>));

    if let Some(cb) = handle.borrow().as_ref() {
        let _ = window.request_animation_frame(cb.as_ref().unchecked_ref());
    };
}

fn metric_class() -> Classes {
    classes!("metric-value")
}

#[derive(Properties, PartialEq)]
pub struct CounterProps {
    pub value: AttrValue,
    #[prop_or_else(metric_class)]
    pub class: Classes,
}

/// Number that counts up from zero once it is half visible. Labels without a
/// positive leading integer are shown as-is.
#[function_component(Counter)]
pub fn counter(props: &CounterProps) -> Html {
    let node = use_node_ref();
    let target = leading_int(&props.value)
        .filter(|n| *n > 0)
        .and_then(|n| u32::try_from(n).ok());
    let display = use_state(|| props.value.to_string());

    {
        let display = display.clone();
        let suffix = counter_suffix(&props.value);
        use_effect_with_deps(
            move |(node, target)| {
                let observer = target.and_then(|target| {
                    let el = node.cast::<Element>()?;
                    observe_once(&el, COUNTER_THRESHOLD, None, move || run_counter(target, suffix, display))
                });
                move || drop(observer)
            },
            (node.clone(), target),
        );
    }

    html! {
        <span ref={node} class={props.class.clone()}>{ (*display).clone() }</span>
    }
}

/// Starts the video the first time its card is 30% visible. Browsers may
/// refuse autoplay; that is fine.
#[hook]
pub fn use_autoplay_once(card: NodeRef, video: NodeRef) {
    use_effect_with_deps(
        move |(card, video)| {
            let video = video.clone();
            let observer = card.cast::<Element>().and_then(|el| {
                observe_once(&el, VIDEO_THRESHOLD, None, move || {
                    let Some(video) = video.cast::<HtmlVideoElement>() else { return };
                    if !video.paused() {
                        return;
                    }
                    if let Ok(promise) = video.play() {
                        spawn_local(async move {
                            if JsFuture::from(promise).await.is_err() {
                                log::debug!("Autoplay blocked by the browser");
                            }
                        });
                    }
                })
            });
            move || drop(observer)
        },
        (card, video),
    );
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn navbar_threshold_is_exclusive() {
        assert!(!navbar_scrolled(0.0, 100.0));
        assert!(!navbar_scrolled(100.0, 100.0));
        assert!(navbar_scrolled(100.5, 100.0));
    }

    #[test]
    fn parallax_only_inside_first_viewport() {
        let o = parallax_offsets(100.0, 800.0).unwrap();
        assert!((o.background - 30.0).abs() < 1e-9);
        assert!((o.content - 10.0).abs() < 1e-9);
        assert!((o.visual + 5.0).abs() < 1e-9);
        assert_eq!(parallax_offsets(800.0, 800.0), None);
        assert_eq!(parallax_offsets(0.0, 800.0).map(|o| o.background), Some(0.0));
    }

    #[test]
    fn counter_eases_out_and_lands_on_target() {
        assert_eq!(counter_frame(500, 0.0, 1500.0), (0, false));
        assert_eq!(counter_frame(500, 750.0, 1500.0), (375, false));
        assert_eq!(counter_frame(500, 1500.0, 1500.0), (500, true));
        assert_eq!(counter_frame(500, 9000.0, 1500.0), (500, true));
        // Clock skew before the start frame.
        assert_eq!(counter_frame(500, -5.0, 1500.0), (0, false));
    }

    #[test]
    fn counter_never_decreases() {
        let mut last = 0;
        for step in 0..=30 {
            let (value, _) = counter_frame(1000, f64::from(step) * 50.0, 1500.0);
            assert!(value >= last);
            last = value;
        }
        assert_eq!(last, 1000);
    }

    #[test]
    fn suffix_prefers_plus() {
        assert_eq!(counter_suffix("500+"), "+");
        assert_eq!(counter_suffix("98%"), "%");
        assert_eq!(counter_suffix("+5%"), "+");
        assert_eq!(counter_suffix("12"), "");
    }

    #[test]
    fn leading_int_behaves_like_parse_int() {
        assert_eq!(leading_int("500+"), Some(500));
        assert_eq!(leading_int("  98%"), Some(98));
        assert_eq!(leading_int("-3 days"), Some(-3));
        assert_eq!(leading_int("+7"), Some(7));
        assert_eq!(leading_int("N/A"), None);
        assert_eq!(leading_int(""), None);
    }

    #[test]
    fn throttle_drops_calls_while_armed() {
        let mut throttle = Throttle::default();
        assert!(throttle.try_arm());
        assert!(!throttle.try_arm());
        assert!(!throttle.try_arm());
        throttle.release();
        assert!(throttle.try_arm());
    }

    #[test]
    fn fade_style_switches_on_first_sight() {
        let hidden = fade_style(false, 30, 0.6, 0.2);
        assert!(hidden.starts_with("opacity: 0; transform: translateY(30px);"));
        assert!(hidden.contains("opacity 0.6s ease 0.2s"));
        let shown = fade_style(true, 30, 0.6, 0.2);
        assert!(shown.starts_with("opacity: 1; transform: translateY(0);"));
    }
}
