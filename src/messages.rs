// The events that can occur in the UI. Expand as needed.

use crate::models::{ChatMessage, Post, ProfileUpdate, User};

#[derive(Debug, Clone)]
pub enum Message {
    // Display preferences
    ToggleDarkMode,
    SetColorScheme(String),

    // Session
    LoggedIn { token: String, user: User },
    LoggedOut,
    CurrentUserLoaded(User),

    // Directory
    UsersLoaded(Vec<User>),

    // Feed
    PostsLoaded(Vec<Post>),
    PostCreated(Post),

    // Profile
    ProfileSaved(ProfileUpdate),

    // Direct messaging
    SelectPeer(String),
    SetPeerFilter(String),
    ThreadLoaded { peer: String, messages: Vec<ChatMessage> },
    MessageSent(ChatMessage),
}

/// UI side effects returned by `update` and executed by
/// `AppContext::dispatch` once the state borrow has been released.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    RefreshFeed,
    RefreshPeerList,
    RefreshThread,
    ApplyTheme,
}
