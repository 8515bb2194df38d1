use wasm_bindgen::prelude::*;
use web_sys::Document;

use crate::constants::{APP_TITLE, COLOR_SCHEMES, LOADING_OVERLAY_ID, MOUNT_ID};
use crate::dom_utils::{hide, set_active, set_inactive, show};
use crate::router::PageKind;

/// Build the fixed chrome: header with title, navigation tabs and display
/// controls, plus the mount element all routed content renders into.
pub fn create_base_ui(document: &Document) -> Result<(), JsValue> {
    ensure_styles(document)?;

    let body = document.body().ok_or(JsValue::from_str("No body found"))?;

    // Header
    let header = document.create_element("div")?;
    header.set_class_name("header");

    let title = document.create_element("h1")?;
    title.set_inner_html(APP_TITLE);
    header.append_child(&title)?;

    let nav = document.create_element("div")?;
    nav.set_class_name("nav");
    for (id, label) in [
        ("nav-home", "Home"),
        ("nav-profile", "Profile"),
        ("nav-messages", "Messages"),
    ] {
        let tab = document.create_element("button")?;
        tab.set_id(id);
        tab.set_class_name("nav-tab");
        tab.set_inner_html(label);
        nav.append_child(&tab)?;
    }
    header.append_child(&nav)?;

    // Display controls + logout
    let controls = document.create_element("div")?;
    controls.set_class_name("header-controls");

    let theme_toggle = document.create_element("button")?;
    theme_toggle.set_id("theme-toggle");
    theme_toggle.set_class_name("icon-button");
    theme_toggle.set_attribute("title", "Toggle dark mode")?;
    theme_toggle.set_inner_html("◐");
    controls.append_child(&theme_toggle)?;

    let scheme_select = document.create_element("select")?;
    scheme_select.set_id("color-scheme");
    for scheme in COLOR_SCHEMES {
        let option = document.create_element("option")?;
        option.set_attribute("value", scheme)?;
        option.set_text_content(Some(scheme));
        scheme_select.append_child(&option)?;
    }
    controls.append_child(&scheme_select)?;

    let logout = document.create_element("button")?;
    logout.set_id("logout-btn");
    logout.set_class_name("icon-button");
    logout.set_inner_html("Log out");
    controls.append_child(&logout)?;

    header.append_child(&controls)?;

    // The router's single write surface.
    let content = document.create_element("div")?;
    content.set_id(MOUNT_ID);
    content.set_class_name("app-content");

    // Spinner shown while a page producer is off fetching.
    let overlay = document.create_element("div")?;
    overlay.set_id(LOADING_OVERLAY_ID);
    overlay.set_class_name("loading-overlay hidden");
    overlay.set_inner_html(r#"<div class="spinner"></div>"#);

    body.append_child(&header)?;
    body.append_child(&content)?;
    body.append_child(&overlay)?;

    Ok(())
}

pub fn show_loader() {
    if let Some(overlay) = web_sys::window()
        .and_then(|w| w.document())
        .and_then(|d| d.get_element_by_id(LOADING_OVERLAY_ID))
    {
        show(&overlay);
    }
}

pub fn hide_loader() {
    if let Some(overlay) = web_sys::window()
        .and_then(|w| w.document())
        .and_then(|d| d.get_element_by_id(LOADING_OVERLAY_ID))
    {
        hide(&overlay);
    }
}

/// Restyle the navigation tabs for the page that just rendered. `None`
/// clears the highlight (auth pages, 404).
pub fn highlight_nav(document: &Document, active: Option<PageKind>) {
    for (id, kind) in [
        ("nav-home", PageKind::Home),
        ("nav-profile", PageKind::Profile),
        ("nav-messages", PageKind::Messages),
    ] {
        if let Some(tab) = document.get_element_by_id(id) {
            if active == Some(kind) {
                set_active(&tab);
            } else {
                set_inactive(&tab);
            }
        }
    }
}

fn ensure_styles(document: &Document) -> Result<(), JsValue> {
    if document.get_element_by_id("app-styles").is_some() {
        return Ok(());
    }

    let css = "
body{margin:0;font-family:Arial,Helvetica,sans-serif;background:#f3f4f6;color:#111827}
body.dark-mode{background:#111827;color:#e5e7eb}
.header{display:flex;align-items:center;gap:24px;padding:12px 24px;background:#fff;box-shadow:0 1px 3px rgba(0,0,0,.1)}
body.dark-mode .header{background:#1f2937}
.header h1{margin:0;font-size:20px}
.nav{display:flex;gap:8px}
.nav-tab{border:none;background:none;padding:8px 12px;border-radius:6px;cursor:pointer;color:inherit}
.nav-tab.active{background:#2563eb;color:#fff}
.red-scheme .nav-tab.active{background:#dc2626}
.green-scheme .nav-tab.active{background:#16a34a}
.purple-scheme .nav-tab.active{background:#7c3aed}
.header-controls{margin-left:auto;display:flex;gap:8px;align-items:center}
.icon-button{border:none;background:none;cursor:pointer;color:inherit;font-size:14px}
.app-content{max-width:720px;margin:24px auto;padding:0 16px}
.card{background:#fff;border-radius:8px;box-shadow:0 1px 3px rgba(0,0,0,.1);padding:16px;margin-bottom:16px}
body.dark-mode .card{background:#1f2937}
.notice{text-align:center;color:#6b7280}
.composer textarea,.composer input,.auth-page input,.profile-page input,.profile-page textarea,#peer-filter,#chat-input{width:100%;box-sizing:border-box;margin:4px 0 12px;padding:8px;border:1px solid #d1d5db;border-radius:6px;background:inherit;color:inherit}
.btn-primary{background:#2563eb;color:#fff;border:none;border-radius:6px;padding:8px 16px;cursor:pointer}
.red-scheme .btn-primary{background:#dc2626}
.green-scheme .btn-primary{background:#16a34a}
.purple-scheme .btn-primary{background:#7c3aed}
.btn-link{border:none;background:none;color:#2563eb;cursor:pointer;padding:0}
.post-header{display:flex;justify-content:space-between;margin-bottom:8px}
.post-author{font-weight:bold}
.post-time,.bubble-time,.peer-email{color:#6b7280;font-size:12px}
.post-image{max-width:100%;border-radius:6px}
.messages-page{display:flex;gap:16px}
.peer-pane{flex:0 0 220px}
.thread-pane{flex:1;display:flex;flex-direction:column}
#peer-list{list-style:none;margin:0;padding:0}
#peer-list .peer{padding:8px;border-radius:6px;cursor:pointer;display:flex;flex-direction:column}
#peer-list .peer.active{background:#dbeafe}
body.dark-mode #peer-list .peer.active{background:#374151}
#chat-thread{flex:1;min-height:240px;display:flex;flex-direction:column;gap:8px;margin-bottom:12px}
.bubble{max-width:75%;padding:8px 12px;border-radius:12px;background:#e5e7eb}
body.dark-mode .bubble{background:#374151}
.bubble.mine{align-self:flex-end;background:#2563eb;color:#fff}
.bubble p{margin:0}
.form-message{color:#dc2626;min-height:1em}
.avatar{width:64px;height:64px;border-radius:50%;object-fit:cover}
.toast-root{position:fixed;top:16px;right:16px;display:flex;flex-direction:column;gap:8px;z-index:9999}
.toast{padding:10px 16px;border-radius:4px;color:#fff;box-shadow:0 2px 4px rgba(0,0,0,.1)}
.toast-success{background:#16a34a}
.toast-error{background:#dc2626}
.toast-info{background:#2563eb}
.hidden{display:none!important}
.loading-overlay{position:fixed;inset:0;display:flex;align-items:center;justify-content:center;background:rgba(0,0,0,.15);z-index:999}
.spinner{width:28px;height:28px;border:3px solid #fff;border-top-color:transparent;border-radius:50%;animation:spin 1s linear infinite}
@keyframes spin{to{transform:rotate(360deg)}}
";

    let style = document.create_element("style")?;
    style.set_id("app-styles");
    style.set_text_content(Some(css));
    match document.query_selector("head")? {
        Some(head) => head.append_child(&style)?,
        None => document
            .body()
            .ok_or(JsValue::from_str("No body found"))?
            .append_child(&style)?,
    };

    Ok(())
}
