use gloo_timers::future::TimeoutFuture;
use wasm_bindgen_futures::spawn_local;
use web_sys::HtmlInputElement;
use yew::prelude::*;
use yew_hooks::prelude::*;

use crate::api::{LOGIN_ERRORS, RESEND_ERRORS, SIGNUP_ERRORS, VERIFY_ERRORS};
use crate::auth::client::{self, LoginRequest, ResendOtpRequest, SendOtpRequest, VerifyOtpRequest};
use crate::auth::flow::{
    after_validation, post_auth_destination, AuthSuccess, AuthView, SubmitState, LOGIN_SUBMIT, RESEND_SUBMIT,
    SIGNUP_SUBMIT, VERIFY_SUBMIT,
};
use crate::components::notification::{use_notifier, NotificationClass, NotificationProvider, Notifier};
use crate::config::AUTH_REDIRECT_DELAY;
use crate::session;
use crate::validation::{sanitize_otp, validate_otp, validate_signup};

/// Success of login or OTP verification: announce, wait, then leave the page.
/// UI is left disabled on purpose, the navigation replaces it.
async fn complete_sign_in(notifier: Notifier, message: &str, success: AuthSuccess) {
    notifier.success(message);
    TimeoutFuture::new(AUTH_REDIRECT_DELAY).await;
    let target = post_auth_destination(session::take_redirect(), success.user.as_ref());
    session::navigate(&target);
}

fn text_input(state: &UseStateHandle<String>) -> Callback<InputEvent> {
    let state = state.clone();
    Callback::from(move |e: InputEvent| {
        let input: HtmlInputElement = e.target_unchecked_into();
        state.set(input.value());
    })
}

#[function_component]
pub fn AuthPage() -> Html {
    html! {
        <NotificationProvider class={NotificationClass::Auth}>
            <style>{AUTH_CSS}</style>
            <section class="auth-section">
                <AuthCards />
            </section>
        </NotificationProvider>
    }
}

#[function_component]
fn AuthCards() -> Html {
    let notifier = use_notifier();
    let action = use_search_param("action".to_string());
    let oauth_error = use_search_param("error".to_string());
    let oauth_message = use_search_param("message".to_string());
    let view = use_state(|| AuthView::from_action(action.as_deref()));

    // OAuth callback failures come back as query parameters.
    {
        let notifier = notifier.clone();
        use_effect_with_deps(
            move |(error, message)| {
                if error.is_some() {
                    let text = message
                        .clone()
                        .filter(|m| !m.is_empty())
                        .unwrap_or_else(|| "Authentication failed. Please try again.".to_string());
                    log::warn!("OAuth error returned: {:?}", error);
                    notifier.error(text);
                    session::strip_query();
                }
                || ()
            },
            (oauth_error, oauth_message),
        );
    }

    let to_signup = {
        let view = view.clone();
        Callback::from(move |e: MouseEvent| {
            e.prevent_default();
            view.set(view.show_signup());
        })
    };
    let to_login = {
        let view = view.clone();
        Callback::from(move |e: MouseEvent| {
            e.prevent_default();
            view.set(view.show_login());
        })
    };
    let on_otp_sent = {
        let view = view.clone();
        Callback::from(move |email: String| view.set(view.otp_sent(email)))
    };
    let on_restart = {
        let view = view.clone();
        Callback::from(move |_: ()| view.set(view.reset_signup()))
    };

    match &*view {
        AuthView::Login => html! { <LoginCard on_switch={to_signup} /> },
        AuthView::Signup => html! { <SignupCard on_switch={to_login} on_otp_sent={on_otp_sent} /> },
        AuthView::OtpPending { email } => html! {
            <OtpCard email={email.clone()} on_restart={on_restart} />
        },
    }
}

#[derive(Properties, PartialEq)]
struct LoginCardProps {
    on_switch: Callback<MouseEvent>,
}

#[function_component]
fn LoginCard(props: &LoginCardProps) -> Html {
    let notifier = use_notifier();
    let identifier = use_state(String::new);
    let password = use_state(String::new);
    let busy = use_state(SubmitState::default);

    let onsubmit = {
        let identifier = identifier.clone();
        let password = password.clone();
        let busy = busy.clone();
        let notifier = notifier.clone();
        Callback::from(move |e: SubmitEvent| {
            e.prevent_default();
            let request = LoginRequest {
                username_or_email: (*identifier).clone(),
                password: (*password).clone(),
            };
            let busy = busy.clone();
            let notifier = notifier.clone();
            busy.set(busy.start());
            spawn_local(async move {
                match client::login(&request).await {
                    Ok(success) => {
                        busy.set(busy.succeed());
                        complete_sign_in(notifier, "Login successful! Redirecting...", success).await;
                    }
                    Err(err) => {
                        log::error!("Login error: {}", err);
                        notifier.error(err.user_message(&LOGIN_ERRORS));
                        busy.set(busy.fail());
                    }
                }
            });
        })
    };

    html! {
        <div class="auth-card" id="loginCard">
            <h1>{"Welcome Back"}</h1>
            <p class="auth-subtitle">{"Log in to continue your language journey"}</p>
            <form onsubmit={onsubmit}>
                <label for="loginEmail">{"Email or Username"}</label>
                <input
                    id="loginEmail"
                    type="text"
                    autocomplete="username"
                    required=true
                    value={(*identifier).clone()}
                    oninput={text_input(&identifier)}
                />
                <label for="loginPassword">{"Password"}</label>
                <PasswordField id="loginPassword" autocomplete="current-password" value={(*password).clone()} on_input={text_input(&password)} />
                <button type="submit" class="auth-submit" disabled={busy.is_busy()}>
                    <span>{busy.label(&LOGIN_SUBMIT)}</span>
                </button>
            </form>
            <div class="auth-divider"><span>{"or"}</span></div>
            <GoogleButton label="Continue with Google" />
            <p class="auth-switch">
                {"Don't have an account? "}
                <a href="#" onclick={props.on_switch.clone()}>{"Sign up"}</a>
            </p>
        </div>
    }
}

#[derive(Properties, PartialEq)]
struct SignupCardProps {
    on_switch: Callback<MouseEvent>,
    on_otp_sent: Callback<String>,
}

#[function_component]
fn SignupCard(props: &SignupCardProps) -> Html {
    let notifier = use_notifier();
    let first_name = use_state(String::new);
    let last_name = use_state(String::new);
    let email = use_state(String::new);
    let username = use_state(String::new);
    let password = use_state(String::new);
    let confirm = use_state(String::new);
    let busy = use_state(SubmitState::default);

    let onsubmit = {
        let first_name = first_name.clone();
        let last_name = last_name.clone();
        let email = email.clone();
        let username = username.clone();
        let password = password.clone();
        let confirm = confirm.clone();
        let busy = busy.clone();
        let notifier = notifier.clone();
        let on_otp_sent = props.on_otp_sent.clone();
        Callback::from(move |e: SubmitEvent| {
            e.prevent_default();
            let built = after_validation(validate_signup(&password, &confirm), || {
                SendOtpRequest::new(
                    (*email).clone(),
                    (*password).clone(),
                    (*first_name).clone(),
                    (*last_name).clone(),
                    &username,
                )
            });
            let request = match built {
                Ok(request) => request,
                Err(invalid) => {
                    notifier.error(invalid.to_string());
                    return;
                }
            };
            let busy = busy.clone();
            let notifier = notifier.clone();
            let on_otp_sent = on_otp_sent.clone();
            busy.set(busy.start());
            spawn_local(async move {
                match client::send_otp(&request).await {
                    Ok(_) => {
                        busy.set(busy.succeed());
                        notifier.success("Verification code sent to your email!");
                        on_otp_sent.emit(request.email);
                    }
                    Err(err) => {
                        log::error!("Signup error: {}", err);
                        notifier.error(err.user_message(&SIGNUP_ERRORS));
                        busy.set(busy.fail());
                    }
                }
            });
        })
    };

    html! {
        <div class="auth-card" id="signupCard">
            <h1>{"Create Account"}</h1>
            <p class="auth-subtitle">{"Start learning a new language today"}</p>
            <form onsubmit={onsubmit}>
                <div class="auth-row">
                    <div>
                        <label for="firstName">{"First Name"}</label>
                        <input id="firstName" type="text" required=true value={(*first_name).clone()} oninput={text_input(&first_name)} />
                    </div>
                    <div>
                        <label for="lastName">{"Last Name"}</label>
                        <input id="lastName" type="text" required=true value={(*last_name).clone()} oninput={text_input(&last_name)} />
                    </div>
                </div>
                <label for="signupEmail">{"Email"}</label>
                <input id="signupEmail" type="email" autocomplete="email" required=true value={(*email).clone()} oninput={text_input(&email)} />
                <label for="signupUsername">{"Username (optional)"}</label>
                <input id="signupUsername" type="text" autocomplete="username" value={(*username).clone()} oninput={text_input(&username)} />
                <label for="signupPassword">{"Password"}</label>
                <PasswordField id="signupPassword" autocomplete="new-password" value={(*password).clone()} on_input={text_input(&password)} />
                <label for="confirmPassword">{"Confirm Password"}</label>
                <PasswordField id="confirmPassword" autocomplete="new-password" value={(*confirm).clone()} on_input={text_input(&confirm)} />
                <button type="submit" class="auth-submit" disabled={busy.is_busy()}>
                    <span>{busy.label(&SIGNUP_SUBMIT)}</span>
                </button>
            </form>
            <div class="auth-divider"><span>{"or"}</span></div>
            <GoogleButton label="Sign up with Google" />
            <p class="auth-switch">
                {"Already have an account? "}
                <a href="#" onclick={props.on_switch.clone()}>{"Log in"}</a>
            </p>
        </div>
    }
}

#[derive(Properties, PartialEq)]
struct OtpCardProps {
    email: String,
    on_restart: Callback<()>,
}

#[function_component]
fn OtpCard(props: &OtpCardProps) -> Html {
    let notifier = use_notifier();
    let code = use_state(String::new);
    let busy = use_state(SubmitState::default);
    let resending = use_state(SubmitState::default);
    let input_ref = use_node_ref();

    {
        let input_ref = input_ref.clone();
        use_effect_with_deps(
            move |_| {
                if let Some(input) = input_ref.cast::<HtmlInputElement>() {
                    let _ = input.focus();
                }
                || ()
            },
            (),
        );
    }

    let oninput = {
        let code = code.clone();
        Callback::from(move |e: InputEvent| {
            let input: HtmlInputElement = e.target_unchecked_into();
            let digits = sanitize_otp(&input.value());
            input.set_value(&digits);
            code.set(digits);
        })
    };

    let onsubmit = {
        let code = code.clone();
        let busy = busy.clone();
        let notifier = notifier.clone();
        let email = props.email.clone();
        Callback::from(move |e: SubmitEvent| {
            e.prevent_default();
            let otp = code.trim().to_string();
            let request = match after_validation(validate_otp(&otp), || VerifyOtpRequest { email: email.clone(), otp: otp.clone() }) {
                Ok(request) => request,
                Err(invalid) => {
                    notifier.error(invalid.to_string());
                    return;
                }
            };
            let code = code.clone();
            let busy = busy.clone();
            let notifier = notifier.clone();
            busy.set(busy.start());
            spawn_local(async move {
                match client::verify_otp(&request).await {
                    Ok(success) => {
                        busy.set(busy.succeed());
                        complete_sign_in(notifier, "Account created successfully! Redirecting...", success).await;
                    }
                    Err(err) => {
                        log::error!("OTP verification error: {}", err);
                        notifier.error(err.user_message(&VERIFY_ERRORS));
                        busy.set(busy.fail());
                        code.set(String::new());
                    }
                }
            });
        })
    };

    let onresend = {
        let code = code.clone();
        let resending = resending.clone();
        let notifier = notifier.clone();
        let email = props.email.clone();
        let input_ref = input_ref.clone();
        Callback::from(move |e: MouseEvent| {
            e.prevent_default();
            if email.is_empty() {
                notifier.error("No email found. Please start registration again.");
                return;
            }
            let request = ResendOtpRequest { email: email.clone() };
            let code = code.clone();
            let resending = resending.clone();
            let notifier = notifier.clone();
            let input_ref = input_ref.clone();
            resending.set(resending.start());
            spawn_local(async move {
                match client::resend_otp(&request).await {
                    Ok(_) => {
                        notifier.success("Verification code resent! Please check your email.");
                        code.set(String::new());
                        if let Some(input) = input_ref.cast::<HtmlInputElement>() {
                            let _ = input.focus();
                        }
                    }
                    Err(err) => {
                        log::error!("Resend OTP error: {}", err);
                        notifier.error(err.user_message(&RESEND_ERRORS));
                    }
                }
                resending.set(resending.settle());
            });
        })
    };

    let restart = {
        let on_restart = props.on_restart.clone();
        Callback::from(move |e: MouseEvent| {
            e.prevent_default();
            on_restart.emit(());
        })
    };

    html! {
        <div class="auth-card" id="otpCard">
            <h1>{"Verify Your Email"}</h1>
            <p class="auth-subtitle">
                {"We sent a 6-digit code to "}
                <strong id="otpEmailDisplay">{&props.email}</strong>
            </p>
            <form onsubmit={onsubmit}>
                <input
                    id="otpInput"
                    ref={input_ref}
                    class="otp-input"
                    type="text"
                    inputmode="numeric"
                    autocomplete="one-time-code"
                    maxlength="6"
                    placeholder="000000"
                    value={(*code).clone()}
                    oninput={oninput}
                />
                <button type="submit" class="auth-submit" disabled={busy.is_busy()}>
                    <span>{busy.label(&VERIFY_SUBMIT)}</span>
                </button>
            </form>
            <p class="auth-switch">
                {"Didn't get the code? "}
                <button id="resendOtpBtn" class="link-button" disabled={resending.is_busy()} onclick={onresend}>
                    {resending.label(&RESEND_SUBMIT)}
                </button>
            </p>
            <p class="auth-switch">
                <a href="#" onclick={restart}>{"Use a different email"}</a>
            </p>
        </div>
    }
}

#[derive(Properties, PartialEq)]
struct GoogleButtonProps {
    label: AttrValue,
}

#[function_component]
fn GoogleButton(props: &GoogleButtonProps) -> Html {
    let notifier = use_notifier();
    let onclick = {
        let notifier = notifier.clone();
        Callback::from(move |e: MouseEvent| {
            e.prevent_default();
            e.stop_propagation();
            let notifier = notifier.clone();
            spawn_local(async move {
                match client::google_auth_url().await {
                    Ok(url) => session::navigate(&url),
                    Err(err) => {
                        log::error!("Google login error: {}", err);
                        notifier.error(client::google_error_message(&err));
                    }
                }
            });
        })
    };

    html! {
        <button type="button" class="google-btn" onclick={onclick}>
            <svg width="18" height="18" viewBox="0 0 48 48">
                <path fill="#EA4335" d="M24 9.5c3.54 0 6.71 1.22 9.21 3.6l6.85-6.85C35.9 2.38 30.47 0 24 0 14.62 0 6.51 5.38 2.56 13.22l7.98 6.19C12.43 13.72 17.74 9.5 24 9.5z"/>
                <path fill="#4285F4" d="M46.98 24.55c0-1.57-.15-3.09-.38-4.55H24v9.02h12.94c-.58 2.96-2.26 5.48-4.78 7.18l7.73 6c4.51-4.18 7.09-10.36 7.09-17.65z"/>
                <path fill="#FBBC05" d="M10.53 28.59c-.48-1.45-.76-2.99-.76-4.59s.27-3.14.76-4.59l-7.98-6.19C.92 16.46 0 20.12 0 24c0 3.88.92 7.54 2.56 10.78l7.97-6.19z"/>
                <path fill="#34A853" d="M24 48c6.48 0 11.93-2.13 15.89-5.81l-7.73-6c-2.15 1.45-4.92 2.3-8.16 2.3-6.26 0-11.57-4.22-13.47-9.91l-7.98 6.19C6.51 42.62 14.62 48 24 48z"/>
            </svg>
            <span>{props.label.clone()}</span>
        </button>
    }
}

#[derive(Properties, PartialEq)]
struct PasswordFieldProps {
    id: AttrValue,
    autocomplete: AttrValue,
    value: String,
    on_input: Callback<InputEvent>,
}

#[function_component]
fn PasswordField(props: &PasswordFieldProps) -> Html {
    let visible = use_state(|| false);
    let toggle = {
        let visible = visible.clone();
        Callback::from(move |e: MouseEvent| {
            e.prevent_default();
            visible.set(!*visible);
        })
    };

    html! {
        <div class="password-wrapper">
            <input
                id={props.id.clone()}
                type={ if *visible { "text" } else { "password" } }
                autocomplete={props.autocomplete.clone()}
                required=true
                value={props.value.clone()}
                oninput={props.on_input.clone()}
            />
            <button type="button" class="password-toggle" onclick={toggle} aria-label="Toggle password visibility">
                {
                    if *visible {
                        html! {
                            <svg class="eye-icon" width="20" height="20" viewBox="0 0 20 20" fill="none">
                                <path d="M14.12 14.12A7.5 7.5 0 0 1 5.88 5.88M1 10s3-6 9-6c1.5 0 2.87.35 4.12.94M19 10s-1.5 3-4.12 4.12M9 9l6 6" stroke="currentColor" stroke-width="2" stroke-linecap="round" stroke-linejoin="round"/>
                                <line x1="1" y1="1" x2="19" y2="19" stroke="currentColor" stroke-width="2" stroke-linecap="round" stroke-linejoin="round"/>
                            </svg>
                        }
                    } else {
                        html! {
                            <svg class="eye-icon" width="20" height="20" viewBox="0 0 20 20" fill="none">
                                <path d="M1 10s3-6 9-6 9 6 9 6-3 6-9 6-9-6-9-6z" stroke="currentColor" stroke-width="2" stroke-linecap="round" stroke-linejoin="round"/>
                                <circle cx="10" cy="10" r="3" stroke="currentColor" stroke-width="2" stroke-linecap="round" stroke-linejoin="round"/>
                            </svg>
                        }
                    }
                }
            </button>
        </div>
    }
}

const AUTH_CSS: &str = r#"
.auth-section {
    min-height: 100vh;
    display: flex;
    align-items: center;
    justify-content: center;
    padding: 120px 1.5rem 3rem;
    background: radial-gradient(circle at top, #1f1d3a 0%, #0f0f14 60%);
}
.auth-card {
    width: 100%;
    max-width: 460px;
    background: rgba(30, 30, 40, 0.7);
    border: 1px solid rgba(255, 255, 255, 0.08);
    border-radius: 20px;
    padding: 2.5rem;
    backdrop-filter: blur(12px);
    box-shadow: 0 8px 32px rgba(0, 0, 0, 0.35);
    animation: cardIn 0.4s ease;
}
@keyframes cardIn {
    from { opacity: 0; transform: translateY(20px); }
    to { opacity: 1; transform: translateY(0); }
}
.auth-card h1 {
    font-size: 2rem;
    margin-bottom: 0.5rem;
    text-align: center;
    color: #fff;
}
.auth-subtitle, .auth-switch {
    text-align: center;
    color: rgba(255, 255, 255, 0.7);
    font-size: 0.95rem;
    margin-bottom: 1.5rem;
}
.auth-card form { display: flex; flex-direction: column; gap: 0.5rem; }
.auth-card label { color: rgba(255, 255, 255, 0.8); font-size: 0.85rem; }
.auth-card input {
    width: 100%;
    padding: 0.8rem 1rem;
    border-radius: 10px;
    border: 1px solid rgba(255, 255, 255, 0.15);
    background: rgba(15, 15, 20, 0.6);
    color: #fff;
    margin-bottom: 0.5rem;
}
.auth-row { display: grid; grid-template-columns: 1fr 1fr; gap: 0.75rem; }
.password-wrapper { position: relative; }
.password-toggle {
    position: absolute;
    right: 10px;
    top: 10px;
    background: none;
    border: none;
    color: rgba(255, 255, 255, 0.6);
    cursor: pointer;
}
.otp-input { text-align: center; letter-spacing: 0.6em; font-size: 1.5rem; }
.auth-submit, .google-btn {
    width: 100%;
    padding: 0.9rem;
    border-radius: 10px;
    border: none;
    cursor: pointer;
    font-weight: 600;
    margin-top: 0.5rem;
}
.auth-submit { background: linear-gradient(135deg, #5856D6 0%, #7B68EE 100%); color: #fff; }
.auth-submit:disabled { opacity: 0.7; cursor: wait; }
.google-btn { display: flex; gap: 0.6rem; align-items: center; justify-content: center; background: #fff; color: #333; }
.auth-divider { text-align: center; color: rgba(255, 255, 255, 0.4); margin: 1.25rem 0 0.5rem; }
.auth-switch a, .link-button { color: #9d8cff; background: none; border: none; cursor: pointer; font: inherit; }
@media (max-width: 600px) {
    .auth-card { padding: 1.75rem; }
    .auth-row { grid-template-columns: 1fr; }
}
"#;
