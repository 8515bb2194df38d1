//! localStorage persistence: the serialized snapshot of users / posts /
//! threads, the session token, and display preferences. Every entry is a
//! `serde_json` string under a fixed key; absent or corrupt entries fall back
//! to defaults instead of failing the boot.

use serde::de::DeserializeOwned;
use serde::Serialize;
use wasm_bindgen::JsValue;
use web_sys::Storage;

use crate::constants::{
    DEFAULT_COLOR_SCHEME, KEY_COLOR_SCHEME, KEY_CURRENT_USER, KEY_DARK_MODE, KEY_POSTS,
    KEY_THREADS, KEY_TOKEN, KEY_USERS,
};
use crate::state::AppState;

fn read_json<T: DeserializeOwned>(storage: &Storage, key: &str) -> Option<T> {
    let raw = storage.get_item(key).ok().flatten()?;
    match serde_json::from_str(&raw) {
        Ok(value) => Some(value),
        Err(e) => {
            web_sys::console::warn_1(
                &format!("Discarding corrupt localStorage entry {}: {}", key, e).into(),
            );
            None
        }
    }
}

fn write_json<T: Serialize>(storage: &Storage, key: &str, value: &T) -> Result<(), JsValue> {
    let raw = serde_json::to_string(value).map_err(|e| JsValue::from_str(&e.to_string()))?;
    storage.set_item(key, &raw)
}

/// Restore everything we persist into a fresh `AppState`. Called once at
/// boot, before the router renders anything.
pub fn load_snapshot(storage: &Storage, state: &mut AppState) {
    state.token = storage.get_item(KEY_TOKEN).ok().flatten();
    state.current_user = read_json(storage, KEY_CURRENT_USER);
    if let Some(users) = read_json(storage, KEY_USERS) {
        state.users = users;
    }
    if let Some(posts) = read_json(storage, KEY_POSTS) {
        state.posts = posts;
    }
    if let Some(threads) = read_json(storage, KEY_THREADS) {
        state.threads = threads;
    }

    state.dark_mode = storage
        .get_item(KEY_DARK_MODE)
        .ok()
        .flatten()
        .map(|v| v == "true")
        .unwrap_or(false);
    state.color_scheme = storage
        .get_item(KEY_COLOR_SCHEME)
        .ok()
        .flatten()
        .unwrap_or_else(|| DEFAULT_COLOR_SCHEME.to_string());
}

/// Write the full snapshot back. Runs after every dirty dispatch, so it stays
/// cheap: a handful of small JSON strings.
pub fn save_snapshot(storage: &Storage, state: &AppState) -> Result<(), JsValue> {
    match &state.token {
        Some(token) => storage.set_item(KEY_TOKEN, token)?,
        None => storage.remove_item(KEY_TOKEN)?,
    }
    match &state.current_user {
        Some(user) => write_json(storage, KEY_CURRENT_USER, user)?,
        None => storage.remove_item(KEY_CURRENT_USER)?,
    }
    write_json(storage, KEY_USERS, &state.users)?;
    write_json(storage, KEY_POSTS, &state.posts)?;
    write_json(storage, KEY_THREADS, &state.threads)?;

    storage.set_item(KEY_DARK_MODE, if state.dark_mode { "true" } else { "false" })?;
    storage.set_item(KEY_COLOR_SCHEME, &state.color_scheme)?;
    Ok(())
}

/// Drop all persisted data, preferences included. Only used by tests and the
/// browser console; logout keeps preferences by going through the reducer.
#[allow(dead_code)]
pub fn clear_storage(storage: &Storage) -> Result<(), JsValue> {
    for key in [
        KEY_TOKEN,
        KEY_CURRENT_USER,
        KEY_USERS,
        KEY_POSTS,
        KEY_THREADS,
        KEY_DARK_MODE,
        KEY_COLOR_SCHEME,
    ] {
        storage.remove_item(key)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Post, User};
    use wasm_bindgen_test::*;

    wasm_bindgen_test_configure!(run_in_browser);

    fn test_storage() -> Storage {
        web_sys::window()
            .and_then(|w| w.local_storage().ok().flatten())
            .expect("localStorage available in test browser")
    }

    #[wasm_bindgen_test]
    fn snapshot_round_trips() {
        let storage = test_storage();
        clear_storage(&storage).unwrap();

        let mut state = AppState::new();
        state.token = Some("jwt".to_string());
        state.current_user = Some(User {
            name: "Ada".to_string(),
            email: "ada@example.com".to_string(),
            bio: "maths".to_string(),
            image: String::new(),
        });
        state.posts.push(Post {
            id: "p1".to_string(),
            author: "ada@example.com".to_string(),
            author_name: "Ada".to_string(),
            text: "hello".to_string(),
            image_url: String::new(),
            created_at: 1_700_000_000_000,
        });
        state.dark_mode = true;
        save_snapshot(&storage, &state).unwrap();

        let mut restored = AppState::new();
        load_snapshot(&storage, &mut restored);
        assert_eq!(restored.token.as_deref(), Some("jwt"));
        assert_eq!(restored.current_user, state.current_user);
        assert_eq!(restored.posts.len(), 1);
        assert_eq!(restored.posts[0].text, "hello");
        assert!(restored.dark_mode);

        clear_storage(&storage).unwrap();
    }

    #[wasm_bindgen_test]
    fn corrupt_entries_fall_back_to_defaults() {
        let storage = test_storage();
        clear_storage(&storage).unwrap();
        storage.set_item(KEY_POSTS, "{not json").unwrap();

        let mut state = AppState::new();
        load_snapshot(&storage, &mut state);
        assert!(state.posts.is_empty());
        assert_eq!(state.color_scheme, DEFAULT_COLOR_SCHEME);

        clear_storage(&storage).unwrap();
    }
}
