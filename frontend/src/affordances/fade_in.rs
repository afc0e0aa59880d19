use wasm_bindgen::JsValue;
use web_sys::{Document, Window};

use crate::dom;

pub fn install(
    window: &Window,
    document: &Document,
    selector: &str,
    threshold: f64,
    root_margin: &str,
    class: &'static str,
) -> Result<(), JsValue> {
    let elements = dom::query_all(document, selector)?;
    if elements.is_empty() {
        return Ok(());
    }

    if !dom::supports_intersection_observer(window) {
        for element in &elements {
            let _ = element.class_list().add_1(class);
        }
        return Ok(());
    }

    // Reveal is one-way: observe_once never fires twice for an element
    dom::observe_once(&elements, threshold, Some(root_margin), move |element| {
        let _ = element.class_list().add_1(class);
    })
}
