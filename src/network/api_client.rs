use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::JsFuture;

use crate::models::{LoginRequest, MessageCreate, PostCreate, ProfileUpdate, RegisterRequest};

/// REST client for the social backend. Methods return the raw JSON body as a
/// `String`; callers decode with `serde_json`. Non-2xx responses come back as
/// `Err` carrying the response body so pages can surface the backend's
/// `{"error": …}` message.
pub struct ApiClient;

impl ApiClient {
    fn api_base_url() -> String {
        super::get_api_base_url()
    }

    // ---------------- Auth ----------------

    pub async fn login(email: &str, password: &str) -> Result<String, JsValue> {
        let url = format!("{}/api/login", Self::api_base_url());
        let body = encode(&LoginRequest {
            email: email.to_string(),
            password: password.to_string(),
        })?;
        Self::fetch_json(&url, "POST", None, Some(&body)).await
    }

    pub async fn register(name: &str, email: &str, password: &str) -> Result<String, JsValue> {
        let url = format!("{}/api/register", Self::api_base_url());
        let body = encode(&RegisterRequest {
            name: name.to_string(),
            email: email.to_string(),
            password: password.to_string(),
        })?;
        Self::fetch_json(&url, "POST", None, Some(&body)).await
    }

    // ---------------- Profile ----------------

    pub async fn get_profile(token: &str) -> Result<String, JsValue> {
        let url = format!("{}/api/profile", Self::api_base_url());
        Self::fetch_json(&url, "GET", Some(token), None).await
    }

    pub async fn update_profile(token: &str, patch: &ProfileUpdate) -> Result<String, JsValue> {
        let url = format!("{}/api/profile", Self::api_base_url());
        let body = encode(patch)?;
        Self::fetch_json(&url, "POST", Some(token), Some(&body)).await
    }

    // ---------------- Directory ----------------

    pub async fn get_users(token: &str) -> Result<String, JsValue> {
        let url = format!("{}/api/users", Self::api_base_url());
        Self::fetch_json(&url, "GET", Some(token), None).await
    }

    // ---------------- Posts ----------------

    pub async fn get_posts(token: &str) -> Result<String, JsValue> {
        let url = format!("{}/api/posts", Self::api_base_url());
        Self::fetch_json(&url, "GET", Some(token), None).await
    }

    pub async fn create_post(token: &str, post: &PostCreate) -> Result<String, JsValue> {
        let url = format!("{}/api/posts", Self::api_base_url());
        let body = encode(post)?;
        Self::fetch_json(&url, "POST", Some(token), Some(&body)).await
    }

    // ---------------- Messages ----------------

    pub async fn get_messages(token: &str, peer: &str) -> Result<String, JsValue> {
        let url = format!("{}/api/messages?peer={}", Self::api_base_url(), urlencode(peer));
        Self::fetch_json(&url, "GET", Some(token), None).await
    }

    pub async fn send_message(token: &str, message: &MessageCreate) -> Result<String, JsValue> {
        let url = format!("{}/api/messages", Self::api_base_url());
        let body = encode(message)?;
        Self::fetch_json(&url, "POST", Some(token), Some(&body)).await
    }

    // ---------------- Plumbing ----------------

    async fn fetch_json(
        url: &str,
        method: &str,
        token: Option<&str>,
        body: Option<&str>,
    ) -> Result<String, JsValue> {
        use web_sys::{Headers, Request, RequestInit, RequestMode, Response};

        let opts = RequestInit::new();
        opts.set_method(method);
        opts.set_mode(RequestMode::Cors);

        let headers = Headers::new()?;
        if let Some(token) = token {
            headers.append("Authorization", &format!("Bearer {}", token))?;
        }
        if let Some(data) = body {
            let js_body = JsValue::from_str(data);
            opts.set_body(&js_body);
            headers.append("Content-Type", "application/json")?;
        }
        opts.set_headers(&headers);

        let request = Request::new_with_str_and_init(url, &opts)?;

        let window = web_sys::window().ok_or_else(|| JsValue::from_str("no global window"))?;
        let resp_value = JsFuture::from(window.fetch_with_request(&request)).await?;
        let resp: Response = resp_value.dyn_into()?;

        let text = JsFuture::from(resp.text()?).await?;
        let text = text.as_string().unwrap_or_default();

        if resp.ok() {
            Ok(text)
        } else if !text.is_empty() {
            Err(JsValue::from_str(&text))
        } else {
            Err(JsValue::from_str(&format!(
                "API request failed: {} {}",
                resp.status(),
                resp.status_text()
            )))
        }
    }
}

fn encode<T: serde::Serialize>(value: &T) -> Result<String, JsValue> {
    serde_json::to_string(value).map_err(|e| JsValue::from_str(&e.to_string()))
}

fn urlencode(value: &str) -> String {
    js_sys::encode_uri_component(value).into()
}

/// Turn an `Err(JsValue)` from the client into a human-readable line,
/// preferring the backend's `{"error": …}` body when present.
pub fn error_message(err: &JsValue) -> String {
    let raw = err.as_string().unwrap_or_else(|| format!("{:?}", err));
    match serde_json::from_str::<crate::models::ApiError>(&raw) {
        Ok(api_err) => api_err.error,
        Err(_) => raw,
    }
}
