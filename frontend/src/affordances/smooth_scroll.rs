use log::debug;
use wasm_bindgen::{JsCast, JsValue};
use web_sys::{Document, Element, HtmlElement, MouseEvent, ScrollBehavior, ScrollToOptions, Window};

use crate::affordances::menu::MenuElements;
use crate::dom;

/// The selector an in-page link points at, or `None` for the bare `#`
/// placeholder and anything that isn't a fragment link.
pub fn fragment_target(href: &str) -> Option<&str> {
    match href {
        "#" => None,
        h if h.starts_with('#') => Some(h),
        _ => None,
    }
}

/// Document position to scroll to so the target sits just below the nav bar.
pub fn scroll_destination(target_top: f64, scroll_y: f64, nav_height: f64, margin: f64) -> f64 {
    (target_top + scroll_y - nav_height - margin).max(0.0)
}

fn nav_height(document: &Document, nav_selector: &str) -> f64 {
    document
        .query_selector(nav_selector)
        .ok()
        .flatten()
        .and_then(|nav| nav.dyn_into::<HtmlElement>().ok())
        .map(|nav| nav.offset_height() as f64)
        .unwrap_or(0.0)
}

fn scroll_to(window: &Window, document: &Document, target: &Element, nav_selector: &str, margin: f64) {
    let top = scroll_destination(
        target.get_bounding_client_rect().top(),
        window.scroll_y().unwrap_or(0.0),
        nav_height(document, nav_selector),
        margin,
    );
    let options = ScrollToOptions::new();
    options.set_top(top);
    options.set_behavior(ScrollBehavior::Smooth);
    window.scroll_to_with_scroll_to_options(&options);
}

pub fn install(
    window: &Window,
    document: &Document,
    anchors_selector: &str,
    nav_selector: &'static str,
    margin: f64,
    menu: Option<MenuElements>,
) -> Result<(), JsValue> {
    for anchor in dom::query_all(document, anchors_selector)? {
        let window = window.clone();
        let document = document.clone();
        let menu = menu.clone();
        let link = anchor.clone();
        dom::listen(&anchor, "click", move |e: MouseEvent| {
            let Some(href) = link.get_attribute("href") else { return };
            let Some(selector) = fragment_target(&href) else { return };
            // Invalid selectors and dangling fragments keep the default jump
            let Ok(Some(target)) = document.query_selector(selector) else {
                debug!("No element for {}", selector);
                return;
            };
            e.prevent_default();
            scroll_to(&window, &document, &target, nav_selector, margin);
            if let Some(menu) = &menu {
                menu.close();
            }
        })?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn only_real_fragments_are_intercepted() {
        assert_eq!(fragment_target("#pricing"), Some("#pricing"));
        assert_eq!(fragment_target("#"), None);
        assert_eq!(fragment_target("/pricing"), None);
        assert_eq!(fragment_target("https://example.com/#faq"), None);
    }

    #[test]
    fn destination_clears_nav_and_margin() {
        // Target 400px below the viewport top, page already scrolled 100px
        assert_eq!(scroll_destination(400.0, 100.0, 64.0, 20.0), 416.0);
    }

    #[test]
    fn destination_never_negative() {
        assert_eq!(scroll_destination(10.0, 0.0, 64.0, 20.0), 0.0);
    }
}
