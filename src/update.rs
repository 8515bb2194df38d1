// Reducer for the application state. Every mutation of `AppState` flows
// through here; side effects come back as `Command`s so callers can run them
// once the state borrow is released.

use crate::messages::{Command, Message};
use crate::state::AppState;

pub fn update(state: &mut AppState, msg: Message) -> Vec<Command> {
    let mut commands = Vec::new();

    match msg {
        Message::ToggleDarkMode => {
            state.dark_mode = !state.dark_mode;
            state.state_modified = true;
            commands.push(Command::ApplyTheme);
        }

        Message::SetColorScheme(scheme) => {
            if crate::constants::COLOR_SCHEMES.contains(&scheme.as_str()) {
                state.color_scheme = scheme;
                state.state_modified = true;
                commands.push(Command::ApplyTheme);
            } else {
                web_sys::console::warn_1(&format!("Ignoring unknown color scheme: {}", scheme).into());
            }
        }

        Message::LoggedIn { token, user } => {
            state.token = Some(token);
            state.upsert_user(user.clone());
            state.current_user = Some(user);
            state.state_modified = true;
        }

        Message::LoggedOut => {
            // Display preferences survive logout on purpose.
            state.token = None;
            state.current_user = None;
            state.selected_peer = None;
            state.peer_filter.clear();
            state.state_modified = true;
        }

        Message::CurrentUserLoaded(user) => {
            state.upsert_user(user.clone());
            state.current_user = Some(user);
            state.state_modified = true;
        }

        Message::UsersLoaded(users) => {
            state.users = users;
            state.data_loaded = true;
            state.state_modified = true;
            commands.push(Command::RefreshPeerList);
        }

        Message::PostsLoaded(mut posts) => {
            // The feed is newest-first regardless of what the API returned.
            posts.sort_by(|a, b| b.created_at.cmp(&a.created_at));
            state.posts = posts;
            state.data_loaded = true;
            state.state_modified = true;
            commands.push(Command::RefreshFeed);
        }

        Message::PostCreated(post) => {
            if !state.posts.iter().any(|p| p.id == post.id) {
                state.posts.insert(0, post);
                state.state_modified = true;
            }
            commands.push(Command::RefreshFeed);
        }

        Message::ProfileSaved(patch) => {
            if let Some(user) = state.current_user.as_mut() {
                user.name = patch.name;
                user.bio = patch.bio;
                user.image = patch.image;
                let updated = user.clone();
                state.upsert_user(updated);
                state.state_modified = true;
            }
        }

        Message::SelectPeer(peer) => {
            state.selected_peer = Some(peer);
            commands.push(Command::RefreshPeerList);
            commands.push(Command::RefreshThread);
        }

        Message::SetPeerFilter(filter) => {
            state.peer_filter = filter;
            commands.push(Command::RefreshPeerList);
        }

        Message::ThreadLoaded { peer, mut messages } => {
            // Replaces any previously loaded thread for this peer.
            messages.sort_by_key(|m| m.ts);
            state.threads.insert(peer, messages);
            state.state_modified = true;
            commands.push(Command::RefreshThread);
        }

        Message::MessageSent(message) => {
            state.record_message(message);
            state.state_modified = true;
            commands.push(Command::RefreshThread);
        }
    }

    commands
}
