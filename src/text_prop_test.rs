//! Internal property tests (compiled to WASM) for the text helpers every
//! piece of rendered markup goes through.

#![cfg(test)]

use proptest::prelude::*;
use unicode_segmentation::UnicodeSegmentation;
use wasm_bindgen_test::*;

use crate::utils::{escape_html, truncate_text};

// Make wasm-bindgen execute the tests in a headless browser when available.
wasm_bindgen_test_configure!(run_in_browser);

#[wasm_bindgen_test]
fn escaped_text_carries_no_markup_metacharacters() {
    let mut runner = proptest::test_runner::TestRunner::default();

    runner
        .run(&any::<String>(), |text| {
            let escaped = escape_html(&text);
            assert!(!escaped.contains('<'));
            assert!(!escaped.contains('>'));
            assert!(!escaped.contains('"'));
            assert!(!escaped.contains('\''));
            Ok(())
        })
        .expect("property test failed");
}

#[wasm_bindgen_test]
fn truncation_respects_the_grapheme_budget() {
    let mut runner = proptest::test_runner::TestRunner::default();
    let strategy = (any::<String>(), 0usize..64);

    runner
        .run(&strategy, |(text, budget)| {
            let count = text.graphemes(true).count();
            let out = truncate_text(&text, budget);
            if count <= budget {
                // Untouched: the input already fit.
                assert_eq!(out, text);
            } else {
                // Shortened: exactly `budget` graphemes plus an ellipsis.
                let body = out.strip_suffix('…').expect("shortened text ends in ellipsis");
                assert_eq!(body.graphemes(true).count(), budget);
                assert!(text.starts_with(body));
            }
            Ok(())
        })
        .expect("property test failed");
}
