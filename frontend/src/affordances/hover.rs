use wasm_bindgen::{JsCast, JsValue};
use web_sys::{Document, HtmlElement, MouseEvent};

use crate::dom;

static LIFTED: [(&str, &str); 3] = [
    ("transform", "translateY(-8px)"),
    ("transition", "transform 0.3s ease, box-shadow 0.3s ease"),
    ("box-shadow", "0 12px 24px rgba(0, 0, 0, 0.15)"),
];

static RESTING: [(&str, &str); 2] = [("transform", "translateY(0)"), ("box-shadow", "")];

/// Inline style properties to set when the pointer enters or leaves a card.
pub fn card_style(hovered: bool) -> &'static [(&'static str, &'static str)] {
    if hovered { &LIFTED[..] } else { &RESTING[..] }
}

fn apply(card: &HtmlElement, hovered: bool) {
    let style = card.style();
    for (property, value) in card_style(hovered) {
        let _ = style.set_property(property, value);
    }
}

pub fn install(document: &Document, selector: &str) -> Result<(), JsValue> {
    let cards = dom::query_all(document, selector)?
        .into_iter()
        .filter_map(|card| card.dyn_into::<HtmlElement>().ok());

    for card in cards {
        let entered = card.clone();
        dom::listen(&card, "mouseenter", move |_: MouseEvent| apply(&entered, true))?;
        let left = card.clone();
        dom::listen(&card, "mouseleave", move |_: MouseEvent| apply(&left, false))?;
    }
    Ok(())
}
