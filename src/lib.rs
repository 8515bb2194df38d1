use std::rc::Rc;

use wasm_bindgen::closure::Closure;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::Document;

mod constants;
mod dom_utils;
mod messages;
mod models;
mod network;
mod pages;
mod router;
mod state;
mod storage;
mod toast;
mod ui;
mod update;
mod utils;

mod feed_invariants_tests;
mod text_prop_test;

use constants::{MOUNT_ID, ROUTE_HOME, ROUTE_LOGIN, ROUTE_MESSAGES, ROUTE_PROFILE, ROUTE_REGISTER};
use messages::Message;
use router::Router;
use state::AppContext;

// Main entry point for the WASM application
#[wasm_bindgen(start)]
pub fn start() -> Result<(), JsValue> {
    // Initialize better panic messages
    console_error_panic_hook::set_once();

    let window = web_sys::window().expect("no global `window` exists");
    let document = window.document().expect("should have a document on window");
    let storage = window
        .local_storage()?
        .ok_or_else(|| JsValue::from_str("localStorage unavailable"))?;

    // The application store: localStorage handle + in-memory state, restored
    // from the persisted snapshot before anything renders.
    let ctx = AppContext::new(storage);
    {
        let mut state = ctx.state.borrow_mut();
        storage::load_snapshot(ctx.storage(), &mut state);
    }

    ui::setup::create_base_ui(&document)?;
    ui::theme::apply(&ctx, &document)?;

    // Hand the mount element and the route table to the router; it renders
    // the current location and follows history events from here on.
    let mount = document
        .get_element_by_id(MOUNT_ID)
        .ok_or_else(|| JsValue::from_str("app-content missing"))?;
    let router = Router::new(pages::route_table(&ctx), mount);
    pages::register_setups(&router, &ctx);
    router.start()?;

    wire_chrome(&document, &ctx, &router)?;

    // Anonymous visitors land on the login page.
    if ctx.token().is_none() {
        let path = window.location().pathname().unwrap_or_default();
        if path != ROUTE_LOGIN && path != ROUTE_REGISTER {
            router.navigate(ROUTE_LOGIN);
        }
    }

    Ok(())
}

// Click handlers for the fixed chrome: navigation tabs, theme controls and
// logout. Bound once; the elements live for the whole session.
fn wire_chrome(
    document: &Document,
    ctx: &Rc<AppContext>,
    router: &Rc<Router>,
) -> Result<(), JsValue> {
    for (id, path) in [
        ("nav-home", ROUTE_HOME),
        ("nav-profile", ROUTE_PROFILE),
        ("nav-messages", ROUTE_MESSAGES),
    ] {
        if let Some(tab) = document.get_element_by_id(id) {
            let router = router.clone();
            let on_click = Closure::wrap(Box::new(move |_e: web_sys::MouseEvent| {
                router.navigate(path);
            }) as Box<dyn FnMut(_)>);
            tab.add_event_listener_with_callback("click", on_click.as_ref().unchecked_ref())?;
            on_click.forget();
        }
    }

    if let Some(toggle) = document.get_element_by_id("theme-toggle") {
        let ctx = ctx.clone();
        let on_click = Closure::wrap(Box::new(move |_e: web_sys::MouseEvent| {
            ctx.dispatch(Message::ToggleDarkMode);
        }) as Box<dyn FnMut(_)>);
        toggle.add_event_listener_with_callback("click", on_click.as_ref().unchecked_ref())?;
        on_click.forget();
    }

    if let Some(select) = document.get_element_by_id("color-scheme") {
        let ctx = ctx.clone();
        let document = document.clone();
        let on_change = Closure::wrap(Box::new(move |_e: web_sys::Event| {
            let value = document
                .get_element_by_id("color-scheme")
                .and_then(|el| el.dyn_into::<web_sys::HtmlSelectElement>().ok())
                .map(|s| s.value())
                .unwrap_or_default();
            ctx.dispatch(Message::SetColorScheme(value));
        }) as Box<dyn FnMut(_)>);
        select.add_event_listener_with_callback("change", on_change.as_ref().unchecked_ref())?;
        on_change.forget();
    }

    if let Some(button) = document.get_element_by_id("logout-btn") {
        let ctx = ctx.clone();
        let router = router.clone();
        let on_click = Closure::wrap(Box::new(move |_e: web_sys::MouseEvent| {
            ctx.dispatch(Message::LoggedOut);
            toast::info("Signed out");
            router.navigate(ROUTE_LOGIN);
        }) as Box<dyn FnMut(_)>);
        button.add_event_listener_with_callback("click", on_click.as_ref().unchecked_ref())?;
        on_click.forget();
    }

    Ok(())
}
