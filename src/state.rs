use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

use web_sys::Storage;

use crate::constants::DEFAULT_COLOR_SCHEME;
use crate::messages::{Command, Message};
use crate::models::{ChatMessage, Post, User};
use crate::update::update;

/// In-memory application state. One instance per `AppContext`.
pub struct AppState {
    pub current_user: Option<User>,
    pub token: Option<String>,

    /// Everyone the backend knows about (including ourselves).
    pub users: Vec<User>,
    /// Feed entries, newest first.
    pub posts: Vec<Post>,
    /// Direct-message threads keyed by peer email, each sorted by `ts`.
    pub threads: HashMap<String, Vec<ChatMessage>>,
    pub selected_peer: Option<String>,
    pub peer_filter: String,

    // Display preferences
    pub dark_mode: bool,
    pub color_scheme: String,

    // Loading bookkeeping
    pub data_loaded: bool,
    pub api_load_attempted: bool,
    /// Whether state has been modified since last save.
    pub state_modified: bool,
}

impl AppState {
    pub fn new() -> Self {
        Self {
            current_user: None,
            token: None,
            users: Vec::new(),
            posts: Vec::new(),
            threads: HashMap::new(),
            selected_peer: None,
            peer_filter: String::new(),
            dark_mode: false,
            color_scheme: DEFAULT_COLOR_SCHEME.to_string(),
            data_loaded: false,
            api_load_attempted: false,
            state_modified: false,
        }
    }

    /// Insert or replace a user in the directory, matching on email.
    pub fn upsert_user(&mut self, user: User) {
        match self.users.iter_mut().find(|u| u.email == user.email) {
            Some(existing) => *existing = user,
            None => self.users.push(user),
        }
    }

    /// Messages exchanged with `peer`, oldest first. Empty slice when no
    /// thread has been loaded yet.
    pub fn thread_with(&self, peer: &str) -> &[ChatMessage] {
        self.threads.get(peer).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Append a message to the right thread, keeping the `ts` ordering.
    pub fn record_message(&mut self, message: ChatMessage) {
        let me = self
            .current_user
            .as_ref()
            .map(|u| u.email.clone())
            .unwrap_or_default();
        let peer = if message.from == me {
            message.to.clone()
        } else {
            message.from.clone()
        };
        let thread = self.threads.entry(peer).or_default();
        thread.push(message);
        thread.sort_by_key(|m| m.ts);
    }

    /// The peer list for the messages page: everyone but ourselves, filtered
    /// by the current search string (case-insensitive, name or email).
    pub fn peers(&self) -> Vec<&User> {
        let me = self
            .current_user
            .as_ref()
            .map(|u| u.email.as_str())
            .unwrap_or("");
        let needle = self.peer_filter.to_lowercase();
        self.users
            .iter()
            .filter(|u| u.email != me)
            .filter(|u| {
                needle.is_empty()
                    || u.name.to_lowercase().contains(&needle)
                    || u.email.to_lowercase().contains(&needle)
            })
            .collect()
    }
}

/// The application store: localStorage handle plus the mutable state, passed
/// explicitly to the router's producers and setup routines at construction.
/// Its lifetime is the application instance; nothing here is a process-wide
/// global.
pub struct AppContext {
    storage: Storage,
    pub state: RefCell<AppState>,
}

impl AppContext {
    pub fn new(storage: Storage) -> Rc<Self> {
        Rc::new(Self {
            storage,
            state: RefCell::new(AppState::new()),
        })
    }

    pub fn storage(&self) -> &Storage {
        &self.storage
    }

    pub fn token(&self) -> Option<String> {
        self.state.borrow().token.clone()
    }

    /// Run a message through the reducer, persist if anything changed, then
    /// execute the returned UI commands. The state borrow is released before
    /// any persistence or DOM work happens.
    pub fn dispatch(&self, msg: Message) {
        let (commands, modified) = {
            let mut state = self.state.borrow_mut();
            let commands = update(&mut state, msg);
            let modified = std::mem::take(&mut state.state_modified);
            (commands, modified)
        };

        if modified {
            let state = self.state.borrow();
            if let Err(e) = crate::storage::save_snapshot(&self.storage, &state) {
                web_sys::console::warn_1(&format!("Failed to save state: {:?}", e).into());
            }
        }

        for command in commands {
            self.run_command(command);
        }
    }

    fn run_command(&self, command: Command) {
        let document = match web_sys::window().and_then(|w| w.document()) {
            Some(d) => d,
            None => return,
        };
        let result = match command {
            Command::RefreshFeed => crate::pages::home::refresh_feed(self, &document),
            Command::RefreshPeerList => crate::pages::messages::refresh_peer_list(self, &document),
            Command::RefreshThread => crate::pages::messages::refresh_thread(self, &document),
            Command::ApplyTheme => crate::ui::theme::apply(self, &document),
        };
        if let Err(e) = result {
            web_sys::console::warn_1(&format!("Failed to run {:?}: {:?}", command, e).into());
        }
    }
}
