// The posts feed: a composer on top, everyone's posts below, newest first.

use std::rc::Rc;

use uuid::Uuid;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::{JsCast, JsValue};
use wasm_bindgen_futures::spawn_local;
use web_sys::Document;

use crate::constants::FEED_PREVIEW_GRAPHEMES;
use crate::dom_utils;
use crate::messages::Message;
use crate::models::{Post, PostCreate};
use crate::network::api_client;
use crate::network::ApiClient;
use crate::router::{PageKind, PageView, Producer, ProducerFuture, Router, SetupFn};
use crate::state::{AppContext, AppState};
use crate::toast;
use crate::utils::{escape_html, format_relative_time, now_ms, truncate_text};

pub fn producer(ctx: &Rc<AppContext>) -> Producer {
    let ctx = ctx.clone();
    Rc::new(move || -> ProducerFuture {
        let ctx = ctx.clone();
        Box::pin(async move {
            if ctx.token().is_none() {
                return Ok(PageView {
                    kind: PageKind::Other,
                    markup: logged_out_markup(),
                });
            }
            sync_feed(&ctx).await;
            let state = ctx.state.borrow();
            Ok(PageView {
                kind: PageKind::Home,
                markup: page_markup(&state),
            })
        })
    })
}

/// API first, stored snapshot as the fallback: a successful fetch is written
/// through to state (and from there to localStorage); a failed one leaves
/// whatever the snapshot already holds.
async fn sync_feed(ctx: &Rc<AppContext>) {
    let token = match ctx.token() {
        Some(t) => t,
        None => return,
    };
    ctx.state.borrow_mut().api_load_attempted = true;
    crate::ui::setup::show_loader();
    match ApiClient::get_posts(&token).await {
        Ok(json) => match serde_json::from_str::<Vec<Post>>(&json) {
            Ok(posts) => ctx.dispatch(Message::PostsLoaded(posts)),
            Err(e) => {
                web_sys::console::warn_1(&format!("Bad posts payload: {}", e).into());
            }
        },
        Err(e) => {
            web_sys::console::warn_1(
                &format!("Feed fetch failed, serving stored snapshot: {:?}", e).into(),
            );
        }
    }
    crate::ui::setup::hide_loader();
}

fn logged_out_markup() -> String {
    r#"<div class="card notice">
        <h2>Welcome to Circle</h2>
        <p>Log in to see your feed.</p>
    </div>"#
        .to_string()
}

fn page_markup(state: &AppState) -> String {
    format!(
        r#"<div class="feed-page">
        <form id="postForm" class="card composer">
            <textarea id="post-text" rows="3" placeholder="What's on your mind?"></textarea>
            <input id="post-image" type="text" placeholder="Image URL (optional)">
            <button type="submit" class="btn-primary">Post</button>
        </form>
        <div id="post-feed">{}</div>
    </div>"#,
        post_list_markup(state)
    )
}

fn post_list_markup(state: &AppState) -> String {
    if state.posts.is_empty() {
        return if state.api_load_attempted {
            r#"<div class="card notice">No posts yet. Be the first!</div>"#.to_string()
        } else {
            r#"<div class="card notice">Loading feed…</div>"#.to_string()
        };
    }
    let mut out = String::new();
    for post in &state.posts {
        let image = if post.image_url.is_empty() {
            String::new()
        } else {
            format!(
                r#"<img class="post-image" src="{}" alt="">"#,
                escape_html(&post.image_url)
            )
        };
        out.push_str(&format!(
            r#"<article class="card post">
            <div class="post-header">
                <span class="post-author">{}</span>
                <span class="post-time">{}</span>
            </div>
            <p class="post-body">{}</p>
            {}
        </article>"#,
            escape_html(&post.author_name),
            format_relative_time(post.created_at),
            escape_html(&truncate_text(&post.text, FEED_PREVIEW_GRAPHEMES)),
            image,
        ));
    }
    out
}

/// Re-render just the post list in place. No-op off the home page.
pub fn refresh_feed(ctx: &AppContext, document: &Document) -> Result<(), JsValue> {
    if let Some(feed) = document.get_element_by_id("post-feed") {
        let state = ctx.state.borrow();
        feed.set_inner_html(&post_list_markup(&state));
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
        crate::ui::setup::highlight_nav(&document, Some(PageKind::Home));

        let form = match document.get_element_by_id("postForm") {
            Some(f) => f,
            None => return,
        };

        let ctx = ctx.clone();
        let document = document.clone();
        let on_submit = Closure::wrap(Box::new(move |e: web_sys::Event| {
            e.prevent_default();

            let text = dom_utils::textarea_value(&document, "post-text");
            let text = text.trim().to_string();
            if text.is_empty() {
                toast::error("Write something first");
                return;
            }
            let image_url = dom_utils::input_value(&document, "post-image").trim().to_string();

            let author = ctx.state.borrow().current_user.clone();
            let author = match author {
                Some(user) => user,
                None => {
                    toast::error("You need to log in first");
                    return;
                }
            };

            let post = Post {
                id: Uuid::new_v4().to_string(),
                author: author.email,
                author_name: author.name,
                text: text.clone(),
                image_url: image_url.clone(),
                created_at: now_ms(),
            };

            // Optimistic: the post lands in the local feed (and the
            // snapshot) immediately; the API write follows.
            ctx.dispatch(Message::PostCreated(post));
            dom_utils::clear_textarea(&document, "post-text");
            dom_utils::set_input_value(&document, "post-image", "");

            if let Some(token) = ctx.token() {
                spawn_local(async move {
                    let payload = PostCreate { text, image_url };
                    if let Err(e) = ApiClient::create_post(&token, &payload).await {
                        web_sys::console::warn_1(
                            &format!("Post not synced to API: {:?}", e).into(),
                        );
                        toast::error(&api_client::error_message(&e));
                    }
                });
            }
        }) as Box<dyn FnMut(_)>);

        if form
            .add_event_listener_with_callback("submit", on_submit.as_ref().unchecked_ref())
            .is_err()
        {
            web_sys::console::warn_1(&"Failed to bind postForm handler".into());
        }
        on_submit.forget();
    })
}
