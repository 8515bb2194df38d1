// Well-known identifiers and default values - these are the single source of
// truth for DOM ids, route paths and localStorage keys.

pub const APP_TITLE: &str = "Circle";

// DOM ids
pub const MOUNT_ID: &str = "app-content";
pub const LOADING_OVERLAY_ID: &str = "loading-overlay";

// Route paths
pub const ROUTE_ROOT: &str = "/";
pub const ROUTE_HOME: &str = "/home";
pub const ROUTE_PROFILE: &str = "/profile";
pub const ROUTE_MESSAGES: &str = "/messages";
pub const ROUTE_LOGIN: &str = "/login";
pub const ROUTE_REGISTER: &str = "/register";
pub const ROUTE_NOT_FOUND: &str = "/404";

// localStorage keys
pub const KEY_TOKEN: &str = "token";
pub const KEY_CURRENT_USER: &str = "current_user";
pub const KEY_USERS: &str = "users";
pub const KEY_POSTS: &str = "posts";
pub const KEY_THREADS: &str = "threads";
pub const KEY_DARK_MODE: &str = "darkMode";
pub const KEY_COLOR_SCHEME: &str = "colorScheme";

// Display defaults
pub const DEFAULT_COLOR_SCHEME: &str = "default";
pub const COLOR_SCHEMES: [&str; 5] = ["default", "red", "blue", "green", "purple"];

// Feed bodies longer than this many graphemes are shortened in the list view.
pub const FEED_PREVIEW_GRAPHEMES: usize = 280;

pub const MIN_PASSWORD_LEN: usize = 6;
