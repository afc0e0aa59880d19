use wasm_bindgen::JsValue;
use web_sys::{Document, Element, Event, Window};

use crate::dom;

pub fn is_scrolled(scroll_y: f64, threshold: f64) -> bool {
    scroll_y > threshold
}

fn apply(window: &Window, nav: &Element, threshold: f64, class: &str) {
    let scroll_y = window.scroll_y().unwrap_or(0.0);
    let classes = nav.class_list();
    let _ = if is_scrolled(scroll_y, threshold) {
        classes.add_1(class)
    } else {
        classes.remove_1(class)
    };
}

/// Toggles `class` on the nav bar depending on how far the page is scrolled.
pub fn install(
    window: &Window,
    document: &Document,
    selector: &str,
    threshold: f64,
    class: &'static str,
) -> Result<(), JsValue> {
    let Some(nav) = document.query_selector(selector)? else {
        return Ok(());
    };

    // Page may have been restored mid-scroll
    apply(window, &nav, threshold, class);

    let window_clone = window.clone();
    dom::listen_passive(window, "scroll", move |_: Event| {
        apply(&window_clone, &nav, threshold, class);
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn threshold_is_exclusive() {
        assert!(!is_scrolled(0.0, 50.0));
        assert!(!is_scrolled(50.0, 50.0));
        assert!(is_scrolled(50.5, 50.0));
        assert!(is_scrolled(900.0, 20.0));
    }
}
