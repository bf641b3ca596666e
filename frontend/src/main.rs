use yew::prelude::*;
use yew_router::prelude::*;
use log::{info, Level};

mod config;
mod api;
mod csrf;
mod session;
mod validation;
mod effects;
mod reviews;
mod contact;
mod components {
    pub mod notification;
}
mod auth {
    pub mod flow;
    pub mod client;
    pub mod page;
}
mod pricing {
    pub mod catalog;
    pub mod enroll;
    pub mod modal;
}
mod pages {
    pub mod home;
    pub mod languages;
}

use pages::{
    home::Home,
    languages::Languages,
};
use auth::page::AuthPage;
use config::{NAVBAR_THRESHOLD_AUTH, NAVBAR_THRESHOLD_SITE, NAVBAR_THROTTLE};
use effects::{navbar_scrolled, use_throttled_scroll};


#[derive(Clone, Routable, PartialEq)]
pub enum Route {
    #[at("/")]
    Home,
    #[at("/languages/")]
    Languages,
    #[at("/auth/")]
    Auth,
    #[not_found]
    #[at("/404")]
    NotFound,
}


fn switch(routes: Route) -> Html {
    match routes {
        Route::Home => {
            info!("Rendering Home page");
            html! { <Home /> }
        },
        Route::Languages => {
            info!("Rendering Languages page");
            html! { <Languages /> }
        },
        Route::Auth => {
            info!("Rendering Auth page");
            html! { <AuthPage /> }
        },
        Route::NotFound => {
            info!("Rendering NotFound page");
            html! {
                <main class="not-found">
                    <h1>{"Page not found"}</h1>
                    <Link<Route> to={Route::Home}>{"Back to home"}</Link<Route>>
                </main>
            }
        },
    }
}


#[function_component(Nav)]
pub fn nav() -> Html {
    let route = use_route::<Route>();
    let menu_open = use_state(|| false);

    // The auth screens have a shorter header, so the bar turns solid sooner.
    let threshold = match route {
        Some(Route::Auth) => NAVBAR_THRESHOLD_AUTH,
        _ => NAVBAR_THRESHOLD_SITE,
    };
    let is_scrolled = navbar_scrolled(use_throttled_scroll(NAVBAR_THROTTLE), threshold);

    let toggle_menu = {
        let menu_open = menu_open.clone();
        Callback::from(move |e: MouseEvent| {
            e.prevent_default();
            menu_open.set(!*menu_open);
        })
    };

    let close_menu = {
        let menu_open = menu_open.clone();
        Callback::from(move |_: MouseEvent| {
            menu_open.set(false);
        })
    };

    let menu_class = if *menu_open {
        "nav-right mobile-menu-open"
    } else {
        "nav-right"
    };

    html! {
        <nav class={classes!("navbar", is_scrolled.then_some("scrolled"))}>
            <div class="nav-content">
                <Link<Route> to={Route::Home} classes="nav-logo">
                    {"IFLA"}
                </Link<Route>>

                <button class="burger-menu" onclick={toggle_menu}>
                    <span></span>
                    <span></span>
                    <span></span>
                </button>
                <div class={menu_class}>
                    <div onclick={close_menu.clone()}>
                        <Link<Route> to={Route::Languages} classes="nav-link">
                            {"Languages"}
                        </Link<Route>>
                    </div>
                    <div onclick={close_menu.clone()}>
                        <a href="/#contact" class="nav-link">{"Contact"}</a>
                    </div>
                    <div onclick={close_menu}>
                        <Link<Route> to={Route::Auth} classes="nav-login-button">
                            {"Login"}
                        </Link<Route>>
                    </div>
                </div>
            </div>
        </nav>
    }
}


#[function_component]
fn App() -> Html {
    html! {
        <BrowserRouter>
            <Nav />
            <Switch<Route> render={switch} />
        </BrowserRouter>
    }
}


fn main() {
    // Initialize console error panic hook for better error messages
    console_error_panic_hook::set_once();

    // Initialize logging
    console_log::init_with_level(Level::Info).expect("error initializing log");

    info!("Starting application");
    yew::Renderer::<App>::new().render();
}
