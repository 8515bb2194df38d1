// Login and registration. Both forms validate locally before touching the
// API; backend error bodies are surfaced inline and as a toast.

use std::rc::Rc;

use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::spawn_local;
use web_sys::Document;

use crate::constants::{ROUTE_HOME, ROUTE_LOGIN, ROUTE_REGISTER};
use crate::dom_utils;
use crate::messages::Message;
use crate::models::LoginResponse;
use crate::network::api_client;
use crate::network::ApiClient;
use crate::router::{PageKind, PageView, Producer, ProducerFuture, Router, SetupFn};
use crate::state::AppContext;
use crate::toast;
use crate::utils::{validate_email, validate_password};

pub fn login_producer(_ctx: &Rc<AppContext>) -> Producer {
    Rc::new(|| -> ProducerFuture {
        Box::pin(async {
            Ok(PageView {
                kind: PageKind::Login,
                markup: r#"<div class="auth-page card">
                <h2>Log in</h2>
                <form id="loginForm">
                    <label for="login-email">Email</label>
                    <input id="login-email" type="email" autocomplete="username">
                    <label for="login-password">Password</label>
                    <input id="login-password" type="password" autocomplete="current-password">
                    <button type="submit" class="btn-primary">Log in</button>
                </form>
                <p id="login-message" class="form-message"></p>
                <p>New here? <button id="goto-register" class="btn-link" type="button">Create an account</button></p>
            </div>"#
                    .to_string(),
            })
        })
    })
}

pub fn register_producer(_ctx: &Rc<AppContext>) -> Producer {
    Rc::new(|| -> ProducerFuture {
        Box::pin(async {
            Ok(PageView {
                kind: PageKind::Register,
                markup: r#"<div class="auth-page card">
                <h2>Create an account</h2>
                <form id="registerForm">
                    <label for="register-name">Name</label>
                    <input id="register-name" type="text" autocomplete="name">
                    <label for="register-email">Email</label>
                    <input id="register-email" type="email" autocomplete="username">
                    <label for="register-password">Password</label>
                    <input id="register-password" type="password" autocomplete="new-password">
                    <button type="submit" class="btn-primary">Register</button>
                </form>
                <p id="register-message" class="form-message"></p>
                <p>Already have an account? <button id="goto-login" class="btn-link" type="button">Log in</button></p>
            </div>"#
                    .to_string(),
            })
        })
    })
}

fn set_form_message(document: &Document, id: &str, text: &str) {
    if let Some(el) = document.get_element_by_id(id) {
        el.set_text_content(Some(text));
    }
}

fn bind_nav_button(document: &Document, id: &str, router: &Rc<Router>, path: &'static str) {
    if let Some(button) = document.get_element_by_id(id) {
        let router = router.clone();
        let on_click = Closure::wrap(Box::new(move |_e: web_sys::MouseEvent| {
            router.navigate(path);
        }) as Box<dyn FnMut(_)>);
        let _ = button.add_event_listener_with_callback("click", on_click.as_ref().unchecked_ref());
        on_click.forget();
    }
}

pub fn setup_login(ctx: &Rc<AppContext>) -> SetupFn {
    let ctx = ctx.clone();
    Box::new(move |router: &Rc<Router>| {
        let document = match web_sys::window().and_then(|w| w.document()) {
            Some(d) => d,
            None => return,
        };
        crate::ui::setup::highlight_nav(&document, None);
        bind_nav_button(&document, "goto-register", router, ROUTE_REGISTER);

        let form = match document.get_element_by_id("loginForm") {
            Some(f) => f,
            None => return,
        };

        let ctx = ctx.clone();
        let router = router.clone();
        let document = document.clone();
        let on_submit = Closure::wrap(Box::new(move |e: web_sys::Event| {
            e.prevent_default();

            let email = dom_utils::input_value(&document, "login-email").trim().to_string();
            let password = dom_utils::input_value(&document, "login-password");
            if !validate_email(&email) {
                set_form_message(&document, "login-message", "Enter a valid email address");
                return;
            }
            if password.is_empty() {
                set_form_message(&document, "login-message", "Enter your password");
                return;
            }
            set_form_message(&document, "login-message", "");

            let ctx = ctx.clone();
            let router = router.clone();
            let document = document.clone();
            spawn_local(async move {
                match ApiClient::login(&email, &password).await {
                    Ok(json) => match serde_json::from_str::<LoginResponse>(&json) {
                        Ok(resp) => {
                            let name = resp.user.name.clone();
                            ctx.dispatch(Message::LoggedIn {
                                token: resp.token,
                                user: resp.user,
                            });
                            toast::success(&format!("Welcome back, {}", name));
                            router.navigate(ROUTE_HOME);
                        }
                        Err(e) => {
                            web_sys::console::error_1(
                                &format!("Bad login payload: {}", e).into(),
                            );
                            set_form_message(
                                &document,
                                "login-message",
                                "Unexpected response from the server",
                            );
                        }
                    },
                    Err(e) => {
                        let msg = api_client::error_message(&e);
                        set_form_message(&document, "login-message", &msg);
                        toast::error(&msg);
                    }
                }
            });
        }) as Box<dyn FnMut(_)>);

        if form
            .add_event_listener_with_callback("submit", on_submit.as_ref().unchecked_ref())
            .is_err()
        {
            web_sys::console::warn_1(&"Failed to bind loginForm handler".into());
        }
        on_submit.forget();
    })
}

pub fn setup_register(_ctx: &Rc<AppContext>) -> SetupFn {
    Box::new(move |router: &Rc<Router>| {
        let document = match web_sys::window().and_then(|w| w.document()) {
            Some(d) => d,
            None => return,
        };
        crate::ui::setup::highlight_nav(&document, None);
        bind_nav_button(&document, "goto-login", router, ROUTE_LOGIN);

        let form = match document.get_element_by_id("registerForm") {
            Some(f) => f,
            None => return,
        };

        let router = router.clone();
        let document = document.clone();
        let on_submit = Closure::wrap(Box::new(move |e: web_sys::Event| {
            e.prevent_default();

            let name = dom_utils::input_value(&document, "register-name").trim().to_string();
            let email = dom_utils::input_value(&document, "register-email").trim().to_string();
            let password = dom_utils::input_value(&document, "register-password");
            if name.is_empty() {
                set_form_message(&document, "register-message", "Tell us your name");
                return;
            }
            if !validate_email(&email) {
                set_form_message(&document, "register-message", "Enter a valid email address");
                return;
            }
            if let Err(why) = validate_password(&password) {
                set_form_message(&document, "register-message", why);
                return;
            }
            set_form_message(&document, "register-message", "");

            let router = router.clone();
            let document = document.clone();
            spawn_local(async move {
                match ApiClient::register(&name, &email, &password).await {
                    Ok(_) => {
                        toast::success("Registration successful! Please log in.");
                        router.navigate(ROUTE_LOGIN);
                    }
                    Err(e) => {
                        let msg = api_client::error_message(&e);
                        set_form_message(&document, "register-message", &msg);
                        toast::error(&msg);
                    }
                }
            });
        }) as Box<dyn FnMut(_)>);

        if form
            .add_event_listener_with_callback("submit", on_submit.as_ref().unchecked_ref())
            .is_err()
        {
            web_sys::console::warn_1(&"Failed to bind registerForm handler".into());
        }
        on_submit.forget();
    })
}
