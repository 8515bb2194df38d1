//! dom_utils.rs – thin helper layer for repetitive DOM operations.
//!
//! Small wrappers for the show / hide / read-input patterns the pages repeat,
//! so `set_attribute("style", …)` and `dyn_into` casts don't get sprinkled
//! across the code-base.

use wasm_bindgen::JsCast;
use web_sys::{Document, Element, HtmlInputElement, HtmlTextAreaElement};

/// Make the element visible by toggling CSS classes.
pub fn show(el: &Element) {
    let _ = el.class_list().remove_1("hidden");
    let _ = el.class_list().add_1("visible");
}

/// Hide the element by toggling CSS classes.
pub fn hide(el: &Element) {
    let _ = el.class_list().remove_1("visible");
    let _ = el.class_list().add_1("hidden");
}

/// Mark a navigation tab as the active one.
pub fn set_active(tab: &Element) {
    tab.set_class_name("nav-tab active");
}

/// Remove the `active` modifier from a navigation tab.
pub fn set_inactive(tab: &Element) {
    tab.set_class_name("nav-tab");
}

/// Read the value of an `<input>` by id. Missing or mistyped elements read as
/// the empty string so form handlers stay total.
pub fn input_value(document: &Document, id: &str) -> String {
    document
        .get_element_by_id(id)
        .and_then(|el| el.dyn_into::<HtmlInputElement>().ok())
        .map(|input| input.value())
        .unwrap_or_default()
}

/// Write the value of an `<input>` by id; no-op when the element is missing.
pub fn set_input_value(document: &Document, id: &str, value: &str) {
    if let Some(input) = document
        .get_element_by_id(id)
        .and_then(|el| el.dyn_into::<HtmlInputElement>().ok())
    {
        input.set_value(value);
    }
}

/// Read the value of a `<textarea>` by id.
pub fn textarea_value(document: &Document, id: &str) -> String {
    document
        .get_element_by_id(id)
        .and_then(|el| el.dyn_into::<HtmlTextAreaElement>().ok())
        .map(|area| area.value())
        .unwrap_or_default()
}

/// Clear a `<textarea>` by id; no-op when the element is missing.
pub fn clear_textarea(document: &Document, id: &str) {
    if let Some(area) = document
        .get_element_by_id(id)
        .and_then(|el| el.dyn_into::<HtmlTextAreaElement>().ok())
    {
        area.set_value("");
    }
}
