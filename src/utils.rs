//! Utility helpers shared across the WASM frontend.

use std::cell::RefCell;
use std::rc::Rc;

use gloo_timers::callback::Timeout;
use unicode_segmentation::UnicodeSegmentation;

use crate::constants::MIN_PASSWORD_LEN;

/// Return the current timestamp in **milliseconds** since UNIX epoch.
///
/// We use JS Date here because it is available in browser/WASM without
/// touching any system clock APIs that don't exist on this target.
pub fn now_ms() -> u64 {
    js_sys::Date::now() as u64
}

/// Format an epoch-milliseconds timestamp as e.g. `"Mar 4, 2026"`.
pub fn format_date(ms: u64) -> String {
    match chrono::DateTime::from_timestamp_millis(ms as i64) {
        Some(dt) => dt.format("%b %-d, %Y").to_string(),
        None => String::new(),
    }
}

/// Compact relative timestamp for feed entries and chat bubbles:
/// `"just now"`, `"5 m ago"`, `"3 h ago"`, `"2 d ago"`, then the full date.
pub fn format_relative_time(ms: u64) -> String {
    let elapsed_s = now_ms().saturating_sub(ms) / 1000;
    if elapsed_s < 60 {
        "just now".to_string()
    } else if elapsed_s < 60 * 60 {
        format!("{} m ago", elapsed_s / 60)
    } else if elapsed_s < 24 * 60 * 60 {
        format!("{} h ago", elapsed_s / (60 * 60))
    } else if elapsed_s < 7 * 24 * 60 * 60 {
        format!("{} d ago", elapsed_s / (24 * 60 * 60))
    } else {
        format_date(ms)
    }
}

/// Loose structural email check: one `@`, a non-empty local part and a domain
/// with at least one interior dot. The backend performs the real validation;
/// this only exists to catch typos before a round-trip.
pub fn validate_email(email: &str) -> bool {
    if email.chars().any(char::is_whitespace) {
        return false;
    }
    let mut parts = email.splitn(2, '@');
    let local = parts.next().unwrap_or("");
    let domain = parts.next().unwrap_or("");
    if local.is_empty() || domain.is_empty() || domain.contains('@') {
        return false;
    }
    let dot = match domain.rfind('.') {
        Some(i) => i,
        None => return false,
    };
    dot > 0 && dot + 1 < domain.len()
}

/// Password policy mirrored from the backend: minimum length only.
pub fn validate_password(password: &str) -> Result<(), &'static str> {
    if password.len() >= MIN_PASSWORD_LEN {
        Ok(())
    } else {
        Err("Password must be at least 6 characters")
    }
}

/// Escape text for interpolation into an HTML fragment. All user-provided
/// strings go through this before ending up in `set_inner_html`.
pub fn escape_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(ch),
        }
    }
    out
}

/// Shorten `text` to at most `max_graphemes` grapheme clusters, appending an
/// ellipsis when anything was cut. Splitting on graphemes rather than bytes
/// keeps emoji and combining characters intact.
pub fn truncate_text(text: &str, max_graphemes: usize) -> String {
    let mut graphemes = text.grapheme_indices(true);
    match graphemes.nth(max_graphemes) {
        Some((byte_idx, _)) => format!("{}…", &text[..byte_idx]),
        None => text.to_string(),
    }
}

/// Trailing-edge debouncer: each `call` cancels the previously scheduled
/// callback and re-arms the timer.
pub struct Debouncer {
    delay_ms: u32,
    pending: Rc<RefCell<Option<Timeout>>>,
}

impl Debouncer {
    pub fn new(delay_ms: u32) -> Self {
        Self {
            delay_ms,
            pending: Rc::new(RefCell::new(None)),
        }
    }

    pub fn call<F: FnOnce() + 'static>(&self, f: F) {
        let pending = self.pending.clone();
        let timeout = Timeout::new(self.delay_ms, move || {
            pending.borrow_mut().take();
            f();
        });
        // Dropping the previous Timeout cancels it.
        *self.pending.borrow_mut() = Some(timeout);
    }
}

// wasm-bindgen tests ----------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use wasm_bindgen_test::*;

    wasm_bindgen_test_configure!(run_in_browser);

    #[wasm_bindgen_test]
    fn test_validate_email() {
        assert!(validate_email("ada@example.com"));
        assert!(validate_email("a.b+c@sub.example.org"));
        assert!(!validate_email("adaexample.com"));
        assert!(!validate_email("ada@"));
        assert!(!validate_email("@example.com"));
        assert!(!validate_email("ada@example"));
        assert!(!validate_email("ada@.com"));
        assert!(!validate_email("ada @example.com"));
    }

    #[wasm_bindgen_test]
    fn test_validate_password() {
        assert!(validate_password("hunter2!").is_ok());
        assert!(validate_password("12345").is_err());
    }

    #[wasm_bindgen_test]
    fn test_escape_html() {
        assert_eq!(
            escape_html(r#"<img src="x" onerror='pwn()'>"#),
            "&lt;img src=&quot;x&quot; onerror=&#39;pwn()&#39;&gt;"
        );
        assert_eq!(escape_html("a & b"), "a &amp; b");
    }

    #[wasm_bindgen_test]
    fn test_truncate_text() {
        assert_eq!(truncate_text("short", 10), "short");
        assert_eq!(truncate_text("exact", 5), "exact");
        assert_eq!(truncate_text("abcdef", 3), "abc…");
        // Family emoji is a single grapheme built from several code points.
        assert_eq!(truncate_text("👨‍👩‍👧‍👦xy", 2), "👨‍👩‍👧‍👦x…");
    }

    #[wasm_bindgen_test]
    fn test_format_relative_time_buckets() {
        let now = now_ms();
        assert_eq!(format_relative_time(now), "just now");
        assert_eq!(format_relative_time(now - 5 * 60 * 1000), "5 m ago");
        assert_eq!(format_relative_time(now - 3 * 60 * 60 * 1000), "3 h ago");
        assert_eq!(format_relative_time(now - 2 * 24 * 60 * 60 * 1000), "2 d ago");
    }
}
