use std::rc::Rc;

use gloo_timers::callback::Timeout;
use stylist::yew::styled_component;
use yew::prelude::*;

use crate::config::{NOTIFICATION_DISMISS_AFTER, NOTIFICATION_ENTER_DELAY, NOTIFICATION_EXIT_DURATION};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Severity {
    Success,
    Error,
}

/// CSS class of the toast node. The auth page and the marketing pages style
/// theirs differently.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum NotificationClass {
    #[default]
    Site,
    Auth,
}

impl NotificationClass {
    fn as_str(self) -> &'static str {
        match self {
            NotificationClass::Site => "notification",
            NotificationClass::Auth => "auth-notification",
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct Notice {
    pub id: u32,
    pub message: String,
    pub severity: Severity,
}

/// Holds the single live notice. Showing a new one replaces the old one, there
/// is no queue.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct NoticeSlot {
    pub current: Option<Notice>,
    next_id: u32,
}

pub enum NoticeAction {
    Show(String, Severity),
    Dismiss(u32),
}

impl Reducible for NoticeSlot {
    type Action = NoticeAction;

    fn reduce(self: Rc<Self>, action: Self::Action) -> Rc<Self> {
        match action {
            NoticeAction::Show(message, severity) => {
                let id = self.next_id.wrapping_add(1);
                Rc::new(NoticeSlot {
                    current: Some(Notice { id, message, severity }),
                    next_id: id,
                })
            }
            // Timers of a replaced notice may still fire; they must not take the newer one down.
            NoticeAction::Dismiss(id) if self.current.as_ref().map(|n| n.id) == Some(id) => {
                Rc::new(NoticeSlot { current: None, next_id: self.next_id })
            }
            NoticeAction::Dismiss(_) => self,
        }
    }
}

/// Handle given to components through context.
#[derive(Clone, PartialEq)]
pub struct Notifier {
    show: Callback<(String, Severity)>,
}

impl Notifier {
    pub fn show(&self, message: impl Into<String>, severity: Severity) {
        self.show.emit((message.into(), severity));
    }

    pub fn success(&self, message: impl Into<String>) {
        self.show(message, Severity::Success);
    }

    pub fn error(&self, message: impl Into<String>) {
        self.show(message, Severity::Error);
    }
}

#[hook]
pub fn use_notifier() -> Notifier {
    match use_context::<Notifier>() {
        Some(notifier) => notifier,
        None => {
            log::error!("use_notifier called outside a NotificationProvider");
            Notifier { show: Callback::from(|(msg, _): (String, Severity)| log::warn!("{}", msg)) }
        }
    }
}

#[derive(Properties, PartialEq)]
pub struct NotificationProviderProps {
    #[prop_or_default]
    pub class: NotificationClass,
    pub children: Children,
}

#[function_component(NotificationProvider)]
pub fn notification_provider(props: &NotificationProviderProps) -> Html {
    let slot = use_reducer(NoticeSlot::default);

    let notifier = {
        let dispatcher = slot.dispatcher();
        let show = use_memo(
            move |_| {
                Callback::from(move |(message, severity): (String, Severity)| {
                    dispatcher.dispatch(NoticeAction::Show(message, severity));
                })
            },
            (),
        );
        Notifier { show: (*show).clone() }
    };

    let on_dismissed = {
        let dispatcher = slot.dispatcher();
        Callback::from(move |id: u32| dispatcher.dispatch(NoticeAction::Dismiss(id)))
    };

    html! {
        <ContextProvider<Notifier> context={notifier}>
            { for props.children.iter() }
            {
                if let Some(notice) = slot.current.clone() {
                    let key = notice.id.to_string();
                    html! {
                        <Toast
                            key={key}
                            notice={notice}
                            class={props.class}
                            on_dismissed={on_dismissed}
                        />
                    }
                } else {
                    html! {}
                }
            }
        </ContextProvider<Notifier>>
    }
}

#[derive(Clone, Copy, PartialEq)]
enum Phase {
    Entering,
    Shown,
    Leaving,
}

#[derive(Properties, PartialEq)]
struct ToastProps {
    notice: Notice,
    class: NotificationClass,
    on_dismissed: Callback<u32>,
}

#[styled_component(Toast)]
fn toast(props: &ToastProps) -> Html {
    let phase = use_state(|| Phase::Entering);

    {
        let phase = phase.clone();
        let id = props.notice.id;
        let on_dismissed = props.on_dismissed.clone();
        use_effect_with_deps(
            move |_| {
                let enter = {
                    let phase = phase.clone();
                    Timeout::new(NOTIFICATION_ENTER_DELAY, move || phase.set(Phase::Shown))
                };
                let leave = Timeout::new(NOTIFICATION_DISMISS_AFTER, move || phase.set(Phase::Leaving));
                let remove = Timeout::new(
                    NOTIFICATION_DISMISS_AFTER + NOTIFICATION_EXIT_DURATION,
                    move || on_dismissed.emit(id),
                );
                // Dropping a Timeout cancels it.
                move || {
                    drop(enter);
                    drop(leave);
                    drop(remove);
                }
            },
            (),
        );
    }

    let base = css!(
        r#"
        position: fixed;
        top: 100px;
        right: 20px;
        color: white;
        border-radius: 12px;
        font-family: 'Montserrat', sans-serif;
        font-size: 14px;
        font-weight: 500;
        box-shadow: 0 8px 24px rgba(0, 0, 0, 0.3);
        z-index: 10000;
        transition: all 0.3s ease-out;
        max-width: 350px;
        border: 1px solid rgba(255, 255, 255, 0.2);
        "#
    );

    let background = match props.notice.severity {
        Severity::Success => "linear-gradient(135deg, #4CAF50 0%, #45a049 100%)",
        Severity::Error => "linear-gradient(135deg, #FF6B6B 0%, #EE5A52 100%)",
    };
    let padding = match props.class {
        NotificationClass::Site => "20px 30px",
        NotificationClass::Auth => "16px 24px",
    };
    let motion = match *phase {
        Phase::Shown => "opacity: 1; transform: translateX(0);",
        Phase::Entering | Phase::Leaving => "opacity: 0; transform: translateX(400px);",
    };

    html! {
        <div
            class={classes!(props.class.as_str(), base)}
            role="status"
            style={format!("background: {}; padding: {}; {}", background, padding, motion)}
        >
            { &props.notice.message }
        </div>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn show(slot: Rc<NoticeSlot>, msg: &str) -> Rc<NoticeSlot> {
        slot.reduce(NoticeAction::Show(msg.to_string(), Severity::Error))
    }

    #[test]
    fn new_notice_replaces_the_previous_one() {
        let slot = show(Rc::new(NoticeSlot::default()), "first");
        let first_id = slot.current.as_ref().map(|n| n.id);
        let slot = show(slot, "second");
        let current = slot.current.as_ref().expect("a notice is live");
        assert_eq!(current.message, "second");
        assert_ne!(Some(current.id), first_id);
    }

    #[test]
    fn stale_dismiss_keeps_newer_notice() {
        let slot = show(Rc::new(NoticeSlot::default()), "first");
        let stale = slot.current.as_ref().map(|n| n.id).unwrap();
        let slot = show(slot, "second");
        let slot = slot.reduce(NoticeAction::Dismiss(stale));
        assert_eq!(slot.current.as_ref().map(|n| n.message.as_str()), Some("second"));
    }

    #[test]
    fn dismiss_of_current_clears_slot() {
        let slot = show(Rc::new(NoticeSlot::default()), "only");
        let id = slot.current.as_ref().map(|n| n.id).unwrap();
        let slot = slot.reduce(NoticeAction::Dismiss(id));
        assert!(slot.current.is_none());
        // ids keep increasing after a clear
        let slot = show(slot, "again");
        assert!(slot.current.as_ref().unwrap().id > id);
    }

    #[test]
    fn class_names() {
        assert_eq!(NotificationClass::Site.as_str(), "notification");
        assert_eq!(NotificationClass::Auth.as_str(), "auth-notification");
    }
}
