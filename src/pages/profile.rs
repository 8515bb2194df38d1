// Profile page: edit display name, bio and avatar image URL.

use std::rc::Rc;

use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::spawn_local;

use crate::dom_utils;
use crate::messages::Message;
use crate::models::{ProfileUpdate, User};
use crate::network::api_client;
use crate::network::ApiClient;
use crate::router::{PageKind, PageView, Producer, ProducerFuture, Router, SetupFn};
use crate::state::AppContext;
use crate::toast;
use crate::utils::escape_html;

pub fn producer(ctx: &Rc<AppContext>) -> Producer {
    let ctx = ctx.clone();
    Rc::new(move || -> ProducerFuture {
        let ctx = ctx.clone();
        Box::pin(async move {
            if ctx.token().is_none() {
                return Ok(PageView {
                    kind: PageKind::Other,
                    markup: r#"<div class="card notice"><p>Log in to edit your profile.</p></div>"#
                        .to_string(),
                });
            }
            sync_profile(&ctx).await;
            let state = ctx.state.borrow();
            let user = state.current_user.clone().unwrap_or(User {
                name: String::new(),
                email: String::new(),
                bio: String::new(),
                image: String::new(),
            });
            Ok(PageView {
                kind: PageKind::Profile,
                markup: page_markup(&user),
            })
        })
    })
}

async fn sync_profile(ctx: &Rc<AppContext>) {
    let token = match ctx.token() {
        Some(t) => t,
        None => return,
    };
    ctx.state.borrow_mut().api_load_attempted = true;
    crate::ui::setup::show_loader();
    match ApiClient::get_profile(&token).await {
        Ok(json) => match serde_json::from_str::<User>(&json) {
            Ok(user) => ctx.dispatch(Message::CurrentUserLoaded(user)),
            Err(e) => {
                web_sys::console::warn_1(&format!("Bad profile payload: {}", e).into());
            }
        },
        Err(e) => {
            web_sys::console::warn_1(
                &format!("Profile fetch failed, using stored copy: {:?}", e).into(),
            );
        }
    }
    crate::ui::setup::hide_loader();
}

fn page_markup(user: &User) -> String {
    let avatar = if user.image.is_empty() {
        String::new()
    } else {
        format!(
            r#"<img class="avatar" src="{}" alt="avatar">"#,
            escape_html(&user.image)
        )
    };
    format!(
        r#"<div class="profile-page card">
        <h2>Your profile</h2>
        {avatar}
        <form id="profileForm">
            <label for="profile-name">Display name</label>
            <input id="profile-name" type="text" value="{name}">
            <label for="profile-bio">Bio</label>
            <textarea id="profile-bio" rows="3">{bio}</textarea>
            <label for="profile-image">Avatar URL</label>
            <input id="profile-image" type="text" value="{image}">
            <button type="submit" class="btn-primary">Save</button>
        </form>
    </div>"#,
        avatar = avatar,
        name = escape_html(&user.name),
        bio = escape_html(&user.bio),
        image = escape_html(&user.image),
    )
}

pub fn setup(ctx: &Rc<AppContext>) -> SetupFn {
    let ctx = ctx.clone();
    Box::new(move |_router: &Rc<Router>| {
        let document = match web_sys::window().and_then(|w| w.document()) {
            Some(d) => d,
            None => return,
        };
        crate::ui::setup::highlight_nav(&document, Some(PageKind::Profile));

        let form = match document.get_element_by_id("profileForm") {
            Some(f) => f,
            None => return,
        };

        let ctx = ctx.clone();
        let document = document.clone();
        let on_submit = Closure::wrap(Box::new(move |e: web_sys::Event| {
            e.prevent_default();

            let name = dom_utils::input_value(&document, "profile-name").trim().to_string();
            if name.is_empty() {
                toast::error("Display name can't be empty");
                return;
            }
            let patch = ProfileUpdate {
                name,
                bio: dom_utils::textarea_value(&document, "profile-bio").trim().to_string(),
                image: dom_utils::input_value(&document, "profile-image").trim().to_string(),
            };

            // Apply locally first so the header and feed pick the new name
            // up immediately, then push to the API.
            ctx.dispatch(Message::ProfileSaved(patch.clone()));

            match ctx.token() {
                Some(token) => {
                    spawn_local(async move {
                        match ApiClient::update_profile(&token, &patch).await {
                            Ok(_) => toast::success("Profile updated"),
                            Err(e) => toast::error(&api_client::error_message(&e)),
                        }
                    });
                }
                None => toast::error("You need to log in first"),
            }
        }) as Box<dyn FnMut(_)>);

        if form
            .add_event_listener_with_callback("submit", on_submit.as_ref().unchecked_ref())
            .is_err()
        {
            web_sys::console::warn_1(&"Failed to bind profileForm handler".into());
        }
        on_submit.forget();
    })
}
