// Display preferences: dark mode and the color scheme, applied as classes on
// `<body>` and kept in sync with the header controls.

use wasm_bindgen::{JsCast, JsValue};
use web_sys::{Document, HtmlSelectElement};

use crate::constants::COLOR_SCHEMES;
use crate::state::AppContext;

pub fn apply(ctx: &AppContext, document: &Document) -> Result<(), JsValue> {
    let (dark_mode, scheme) = {
        let state = ctx.state.borrow();
        (state.dark_mode, state.color_scheme.clone())
    };

    let body = document.body().ok_or_else(|| JsValue::from_str("No body found"))?;
    let classes = body.class_list();

    if dark_mode {
        classes.add_1("dark-mode")?;
    } else {
        classes.remove_1("dark-mode")?;
    }

    for candidate in COLOR_SCHEMES {
        classes.remove_1(&format!("{}-scheme", candidate))?;
    }
    classes.add_1(&format!("{}-scheme", scheme))?;

    // Keep the header select showing the active scheme.
    if let Some(select) = document
        .get_element_by_id("color-scheme")
        .and_then(|el| el.dyn_into::<HtmlSelectElement>().ok())
    {
        select.set_value(&scheme);
    }

    Ok(())
}
