use serde::{Deserialize, Serialize};

/// User represents an account as the backend and the localStorage snapshot
/// store it. `email` doubles as the stable identifier across the API.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct User {
    pub name: String,
    pub email: String,
    #[serde(default)]
    pub bio: String,
    #[serde(default)]
    pub image: String,
}

/// A single feed entry. `created_at` is milliseconds since the UNIX epoch.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Post {
    pub id: String,
    pub author: String, // author email
    pub author_name: String,
    pub text: String,
    #[serde(default)]
    pub image_url: String,
    pub created_at: u64,
}

/// One direct message between two users. `ts` is milliseconds since epoch.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ChatMessage {
    pub from: String,
    pub to: String,
    pub text: String,
    pub ts: u64,
}

// API request / response payloads -------------------------------------------

#[derive(Serialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

#[derive(Clone, Deserialize)]
pub struct LoginResponse {
    pub token: String,
    pub user: User,
}

#[derive(Serialize)]
pub struct RegisterRequest {
    pub name: String,
    pub email: String,
    pub password: String,
}

/// Patch sent to the profile endpoint. Empty strings are sent as-is; the
/// backend treats them as "clear this field".
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ProfileUpdate {
    pub name: String,
    pub bio: String,
    pub image: String,
}

#[derive(Serialize)]
pub struct PostCreate {
    pub text: String,
    pub image_url: String,
}

#[derive(Serialize)]
pub struct MessageCreate {
    pub to: String,
    pub text: String,
}

/// Error body the backend returns for non-2xx responses.
#[derive(Deserialize)]
pub struct ApiError {
    pub error: String,
}
