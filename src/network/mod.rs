pub mod api_client;

pub use api_client::ApiClient;

// Helper function to get API base URL
pub(crate) fn get_api_base_url() -> String {
    #[cfg(debug_assertions)]
    {
        "http://localhost:3000".to_string()
    }
    #[cfg(not(debug_assertions))]
    {
        // In release builds the API is served from the same origin.
        web_sys::window()
            .and_then(|w| w.location().origin().ok())
            .unwrap_or_else(|| "http://localhost:3000".to_string())
    }
}
