//! Reducer invariants: feed ordering, thread bookkeeping and what survives a
//! logout.

#![cfg(test)]

use wasm_bindgen_test::*;

use crate::messages::Message;
use crate::models::{ChatMessage, Post, ProfileUpdate, User};
use crate::state::AppState;
use crate::update::update;

wasm_bindgen_test_configure!(run_in_browser);

fn user(name: &str, email: &str) -> User {
    User {
        name: name.to_string(),
        email: email.to_string(),
        bio: String::new(),
        image: String::new(),
    }
}

fn post(id: &str, created_at: u64) -> Post {
    Post {
        id: id.to_string(),
        author: "ada@example.com".to_string(),
        author_name: "Ada".to_string(),
        text: format!("post {}", id),
        image_url: String::new(),
        created_at,
    }
}

fn message(from: &str, to: &str, ts: u64) -> ChatMessage {
    ChatMessage {
        from: from.to_string(),
        to: to.to_string(),
        text: format!("msg at {}", ts),
        ts,
    }
}

#[wasm_bindgen_test]
fn feed_stays_newest_first() {
    let mut state = AppState::new();

    // Out-of-order API payload gets sorted on load.
    update(
        &mut state,
        Message::PostsLoaded(vec![post("a", 100), post("b", 300), post("c", 200)]),
    );
    let order: Vec<&str> = state.posts.iter().map(|p| p.id.as_str()).collect();
    assert_eq!(order, vec!["b", "c", "a"]);

    // A new post goes to the front.
    update(&mut state, Message::PostCreated(post("d", 400)));
    assert_eq!(state.posts[0].id, "d");

    // Re-delivering the same post must not duplicate it.
    update(&mut state, Message::PostCreated(post("d", 400)));
    assert_eq!(state.posts.iter().filter(|p| p.id == "d").count(), 1);
}

#[wasm_bindgen_test]
fn logout_keeps_display_preferences() {
    let mut state = AppState::new();
    update(&mut state, Message::ToggleDarkMode);
    update(
        &mut state,
        Message::LoggedIn {
            token: "jwt".to_string(),
            user: user("Ada", "ada@example.com"),
        },
    );
    update(&mut state, Message::SelectPeer("bob@example.com".to_string()));

    update(&mut state, Message::LoggedOut);
    assert!(state.token.is_none());
    assert!(state.current_user.is_none());
    assert!(state.selected_peer.is_none());
    assert!(state.dark_mode, "dark mode survives logout");
}

#[wasm_bindgen_test]
fn thread_reload_replaces_instead_of_appending() {
    let mut state = AppState::new();
    let peer = "bob@example.com";

    update(
        &mut state,
        Message::ThreadLoaded {
            peer: peer.to_string(),
            messages: vec![message(peer, "me", 2), message("me", peer, 1)],
        },
    );
    assert_eq!(state.thread_with(peer).len(), 2);
    // Sorted by timestamp regardless of payload order.
    assert_eq!(state.thread_with(peer)[0].ts, 1);

    update(
        &mut state,
        Message::ThreadLoaded {
            peer: peer.to_string(),
            messages: vec![message("me", peer, 1)],
        },
    );
    assert_eq!(state.thread_with(peer).len(), 1, "reload replaces the thread");
}

#[wasm_bindgen_test]
fn sent_and_received_messages_share_one_thread() {
    let mut state = AppState::new();
    update(
        &mut state,
        Message::LoggedIn {
            token: "jwt".to_string(),
            user: user("Ada", "ada@example.com"),
        },
    );

    update(
        &mut state,
        Message::MessageSent(message("ada@example.com", "bob@example.com", 10)),
    );
    update(
        &mut state,
        Message::MessageSent(message("bob@example.com", "ada@example.com", 5)),
    );

    // Both directions land under the peer's email, oldest first.
    let thread = state.thread_with("bob@example.com");
    assert_eq!(thread.len(), 2);
    assert_eq!(thread[0].ts, 5);
    assert_eq!(thread[1].ts, 10);
}

#[wasm_bindgen_test]
fn profile_save_updates_directory_entry() {
    let mut state = AppState::new();
    update(
        &mut state,
        Message::LoggedIn {
            token: "jwt".to_string(),
            user: user("Ada", "ada@example.com"),
        },
    );
    update(
        &mut state,
        Message::UsersLoaded(vec![user("Ada", "ada@example.com"), user("Bob", "bob@example.com")]),
    );

    update(
        &mut state,
        Message::ProfileSaved(ProfileUpdate {
            name: "Ada L.".to_string(),
            bio: "Analyst".to_string(),
            image: String::new(),
        }),
    );

    assert_eq!(state.current_user.as_ref().map(|u| u.name.as_str()), Some("Ada L."));
    let directory_entry = state
        .users
        .iter()
        .find(|u| u.email == "ada@example.com")
        .expect("self stays in directory");
    assert_eq!(directory_entry.name, "Ada L.");
    assert_eq!(directory_entry.bio, "Analyst");
}

#[wasm_bindgen_test]
fn peer_filter_is_case_insensitive_and_skips_self() {
    let mut state = AppState::new();
    update(
        &mut state,
        Message::LoggedIn {
            token: "jwt".to_string(),
            user: user("Ada", "ada@example.com"),
        },
    );
    update(
        &mut state,
        Message::UsersLoaded(vec![
            user("Ada", "ada@example.com"),
            user("Bob", "bob@example.com"),
            user("Carol", "carol@example.com"),
        ]),
    );

    let names: Vec<&str> = state.peers().iter().map(|u| u.name.as_str()).collect();
    assert_eq!(names, vec!["Bob", "Carol"], "self is excluded");

    update(&mut state, Message::SetPeerFilter("CAR".to_string()));
    let names: Vec<&str> = state.peers().iter().map(|u| u.name.as_str()).collect();
    assert_eq!(names, vec!["Carol"]);
}
