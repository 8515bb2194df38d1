// Direct messaging: a peer list on the left, the selected thread plus the
// chat composer on the right.

use std::rc::Rc;

use wasm_bindgen::closure::Closure;
use wasm_bindgen::{JsCast, JsValue};
use wasm_bindgen_futures::spawn_local;
use web_sys::{Document, Element};

use crate::dom_utils;
use crate::messages::Message;
use crate::models::{ChatMessage, MessageCreate, User};
use crate::network::api_client;
use crate::network::ApiClient;
use crate::router::{PageKind, PageView, Producer, ProducerFuture, Router, SetupFn};
use crate::state::{AppContext, AppState};
use crate::toast;
use crate::utils::{escape_html, format_relative_time, now_ms, Debouncer};

pub fn producer(ctx: &Rc<AppContext>) -> Producer {
    let ctx = ctx.clone();
    Rc::new(move || -> ProducerFuture {
        let ctx = ctx.clone();
        Box::pin(async move {
            if ctx.token().is_none() {
                return Ok(PageView {
                    kind: PageKind::Other,
                    markup: r#"<div class="card notice"><p>Log in to read your messages.</p></div>"#
                        .to_string(),
                });
            }
            sync_directory(&ctx).await;
            let state = ctx.state.borrow();
            Ok(PageView {
                kind: PageKind::Messages,
                markup: page_markup(&state),
            })
        })
    })
}

/// Refresh the user directory and, when a peer is already selected, that
/// peer's thread. Failures fall back to the stored snapshot.
async fn sync_directory(ctx: &Rc<AppContext>) {
    let token = match ctx.token() {
        Some(t) => t,
        None => return,
    };
    ctx.state.borrow_mut().api_load_attempted = true;
    crate::ui::setup::show_loader();
    match ApiClient::get_users(&token).await {
        Ok(json) => match serde_json::from_str::<Vec<User>>(&json) {
            Ok(users) => ctx.dispatch(Message::UsersLoaded(users)),
            Err(e) => {
                web_sys::console::warn_1(&format!("Bad users payload: {}", e).into());
            }
        },
        Err(e) => {
            web_sys::console::warn_1(
                &format!("Directory fetch failed, using stored copy: {:?}", e).into(),
            );
        }
    }

    let selected = ctx.state.borrow().selected_peer.clone();
    if let Some(peer) = selected {
        load_thread(ctx, &peer).await;
    }
    crate::ui::setup::hide_loader();
}

async fn load_thread(ctx: &Rc<AppContext>, peer: &str) {
    let token = match ctx.token() {
        Some(t) => t,
        None => return,
    };
    match ApiClient::get_messages(&token, peer).await {
        Ok(json) => match serde_json::from_str::<Vec<ChatMessage>>(&json) {
            Ok(messages) => ctx.dispatch(Message::ThreadLoaded {
                peer: peer.to_string(),
                messages,
            }),
            Err(e) => {
                web_sys::console::warn_1(&format!("Bad messages payload: {}", e).into());
            }
        },
        Err(e) => {
            web_sys::console::warn_1(
                &format!("Thread fetch failed, showing stored copy: {:?}", e).into(),
            );
        }
    }
}

fn page_markup(state: &AppState) -> String {
    format!(
        r#"<div class="messages-page">
        <aside class="peer-pane card">
            <input id="peer-filter" type="text" placeholder="Search people">
            <ul id="peer-list">{}</ul>
        </aside>
        <section class="thread-pane card">
            <div id="chat-thread">{}</div>
            <form id="chatForm">
                <input id="chat-input" type="text" placeholder="Type a message…" autocomplete="off">
                <button type="submit" class="btn-primary">Send</button>
            </form>
        </section>
    </div>"#,
        peer_list_markup(state),
        thread_markup(state),
    )
}

fn peer_list_markup(state: &AppState) -> String {
    let peers = state.peers();
    if peers.is_empty() {
        return if state.data_loaded || !state.peer_filter.is_empty() {
            r#"<li class="peer-empty">No one else is here yet.</li>"#.to_string()
        } else {
            r#"<li class="peer-empty">Loading people…</li>"#.to_string()
        };
    }
    let mut out = String::new();
    for peer in peers {
        let active = state.selected_peer.as_deref() == Some(peer.email.as_str());
        out.push_str(&format!(
            r#"<li class="peer{}" data-peer="{}">
                <span class="peer-name">{}</span>
                <span class="peer-email">{}</span>
            </li>"#,
            if active { " active" } else { "" },
            escape_html(&peer.email),
            escape_html(&peer.name),
            escape_html(&peer.email),
        ));
    }
    out
}

fn thread_markup(state: &AppState) -> String {
    let peer = match &state.selected_peer {
        Some(p) => p,
        None => return r#"<div class="notice">Pick a person to start chatting.</div>"#.to_string(),
    };
    let me = state
        .current_user
        .as_ref()
        .map(|u| u.email.clone())
        .unwrap_or_default();
    let thread = state.thread_with(peer);
    if thread.is_empty() {
        return r#"<div class="notice">No messages yet — say hi.</div>"#.to_string();
    }
    let mut out = String::new();
    for message in thread {
        let mine = message.from == me;
        out.push_str(&format!(
            r#"<div class="bubble {}">
                <p>{}</p>
                <span class="bubble-time">{}</span>
            </div>"#,
            if mine { "mine" } else { "theirs" },
            escape_html(&message.text),
            format_relative_time(message.ts),
        ));
    }
    out
}

/// Re-render the peer list in place. No-op off the messages page.
pub fn refresh_peer_list(ctx: &AppContext, document: &Document) -> Result<(), JsValue> {
    if let Some(list) = document.get_element_by_id("peer-list") {
        let state = ctx.state.borrow();
        list.set_inner_html(&peer_list_markup(&state));
    }
    Ok(())
}

/// Re-render the conversation in place. No-op off the messages page.
pub fn refresh_thread(ctx: &AppContext, document: &Document) -> Result<(), JsValue> {
    if let Some(thread) = document.get_element_by_id("chat-thread") {
        let state = ctx.state.borrow();
        thread.set_inner_html(&thread_markup(&state));
    }
    Ok(())
}

pub fn setup(ctx: &Rc<AppContext>) -> SetupFn {
    let ctx = ctx.clone();
    Box::new(move |_router: &Rc<Router>| {
        let document = match web_sys::window().and_then(|w| w.document()) {
            Some(d) => d,
            None => return,
        };
        crate::ui::setup::highlight_nav(&document, Some(PageKind::Messages));

        // Peer selection is delegated from the list element, which survives
        // the in-place innerHTML refreshes of its children.
        if let Some(list) = document.get_element_by_id("peer-list") {
            let ctx_click = ctx.clone();
            let on_click = Closure::wrap(Box::new(move |e: web_sys::MouseEvent| {
                let target = match e.target().and_then(|t| t.dyn_into::<Element>().ok()) {
                    Some(el) => el,
                    None => return,
                };
                let item = match target.closest("li[data-peer]").ok().flatten() {
                    Some(el) => el,
                    None => return,
                };
                let peer = match item.get_attribute("data-peer") {
                    Some(p) => p,
                    None => return,
                };
                ctx_click.dispatch(Message::SelectPeer(peer.clone()));
                let ctx = ctx_click.clone();
                spawn_local(async move {
                    load_thread(&ctx, &peer).await;
                });
            }) as Box<dyn FnMut(_)>);
            let _ = list.add_event_listener_with_callback("click", on_click.as_ref().unchecked_ref());
            on_click.forget();
        }

        // Debounced directory filter.
        if let Some(filter) = document.get_element_by_id("peer-filter") {
            let ctx_filter = ctx.clone();
            let document_filter = document.clone();
            let debouncer = Debouncer::new(250);
            let on_input = Closure::wrap(Box::new(move |_e: web_sys::Event| {
                let value = dom_utils::input_value(&document_filter, "peer-filter");
                let ctx = ctx_filter.clone();
                debouncer.call(move || ctx.dispatch(Message::SetPeerFilter(value)));
            }) as Box<dyn FnMut(_)>);
            let _ = filter.add_event_listener_with_callback("input", on_input.as_ref().unchecked_ref());
            on_input.forget();
        }

        if let Some(form) = document.get_element_by_id("chatForm") {
            let ctx_send = ctx.clone();
            let document_send = document.clone();
            let on_submit = Closure::wrap(Box::new(move |e: web_sys::Event| {
                e.prevent_default();

                let text = dom_utils::input_value(&document_send, "chat-input");
                let text = text.trim().to_string();
                if text.is_empty() {
                    return;
                }
                let (me, peer) = {
                    let state = ctx_send.state.borrow();
                    (
                        state
                            .current_user
                            .as_ref()
                            .map(|u| u.email.clone())
                            .unwrap_or_default(),
                        state.selected_peer.clone(),
                    )
                };
                let peer = match peer {
                    Some(p) => p,
                    None => {
                        toast::error("Pick someone to message first");
                        return;
                    }
                };

                let message = ChatMessage {
                    from: me,
                    to: peer.clone(),
                    text: text.clone(),
                    ts: now_ms(),
                };
                ctx_send.dispatch(Message::MessageSent(message));
                dom_utils::set_input_value(&document_send, "chat-input", "");

                if let Some(token) = ctx_send.token() {
                    spawn_local(async move {
                        let payload = MessageCreate { to: peer, text };
                        if let Err(e) = ApiClient::send_message(&token, &payload).await {
                            web_sys::console::warn_1(
                                &format!("Message not synced to API: {:?}", e).into(),
                            );
                            toast::error(&api_client::error_message(&e));
                        }
                    });
                }
            }) as Box<dyn FnMut(_)>);
            let _ = form.add_event_listener_with_callback("submit", on_submit.as_ref().unchecked_ref());
            on_submit.forget();
        }
    })
}
