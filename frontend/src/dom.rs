use log::debug;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::convert::FromWasmAbi;
use wasm_bindgen::{JsCast, JsValue};
use web_sys::js_sys;
use web_sys::{
    AddEventListenerOptions, Document, Element, EventTarget, IntersectionObserver,
    IntersectionObserverEntry, IntersectionObserverInit,
};

use crate::pricing::presenter::{DisplaySlots, Slot};

/// Subscribes `handler` to `event` on `target` for the rest of the page's life.
pub fn listen<E>(
    target: &EventTarget,
    event: &str,
    handler: impl FnMut(E) + 'static,
) -> Result<(), JsValue>
where
    E: FromWasmAbi + 'static,
{
    let callback = Closure::wrap(Box::new(handler) as Box<dyn FnMut(E)>);
    target.add_event_listener_with_callback(event, callback.as_ref().unchecked_ref())?;
    callback.forget();
    Ok(())
}

/// Same as [`listen`], but tells the browser the handler never calls
/// `prevent_default`, so scrolling stays on the fast path.
pub fn listen_passive<E>(
    target: &EventTarget,
    event: &str,
    handler: impl FnMut(E) + 'static,
) -> Result<(), JsValue>
where
    E: FromWasmAbi + 'static,
{
    let options = AddEventListenerOptions::new();
    options.set_passive(true);
    let callback = Closure::wrap(Box::new(handler) as Box<dyn FnMut(E)>);
    target.add_event_listener_with_callback_and_add_event_listener_options(
        event,
        callback.as_ref().unchecked_ref(),
        &options,
    )?;
    callback.forget();
    Ok(())
}

pub fn query_all(document: &Document, selector: &str) -> Result<Vec<Element>, JsValue> {
    let list = document.query_selector_all(selector)?;
    Ok((0..list.length())
        .filter_map(|i| list.get(i))
        .filter_map(|node| node.dyn_into::<Element>().ok())
        .collect())
}

pub fn supports_intersection_observer(window: &web_sys::Window) -> bool {
    js_sys::Reflect::has(window, &JsValue::from_str("IntersectionObserver")).unwrap_or(false)
}

/// Elements still waiting for their first intersection.
pub struct OnceTracker<K> {
    pending: Vec<K>,
}

impl<K: PartialEq> OnceTracker<K> {
    pub fn new(pending: Vec<K>) -> Self {
        Self { pending }
    }

    /// True exactly once per watched key: on its first intersecting entry.
    /// Later entries for the same key, and keys never watched, are ignored.
    pub fn on_entry(&mut self, key: &K, intersecting: bool) -> bool {
        if !intersecting {
            return false;
        }
        match self.pending.iter().position(|k| k == key) {
            Some(i) => {
                self.pending.swap_remove(i);
                true
            }
            None => false,
        }
    }

    pub fn is_done(&self) -> bool {
        self.pending.is_empty()
    }
}

/// Calls `on_enter` the first time each element becomes visible, then stops
/// watching that element.
pub fn observe_once(
    elements: &[Element],
    threshold: f64,
    root_margin: Option<&str>,
    mut on_enter: impl FnMut(&Element) + 'static,
) -> Result<(), JsValue> {
    let mut tracker = OnceTracker::new(elements.to_vec());
    let callback = Closure::wrap(Box::new(move |entries: js_sys::Array, observer: IntersectionObserver| {
        for entry in entries.iter() {
            let entry = entry.unchecked_into::<IntersectionObserverEntry>();
            let target = entry.target();
            if tracker.on_entry(&target, entry.is_intersecting()) {
                observer.unobserve(&target);
                on_enter(&target);
            }
        }
        if tracker.is_done() {
            observer.disconnect();
        }
    }) as Box<dyn FnMut(js_sys::Array, IntersectionObserver)>);

    let options = IntersectionObserverInit::new();
    options.set_threshold(&JsValue::from_f64(threshold));
    if let Some(margin) = root_margin {
        options.set_root_margin(margin);
    }
    let observer = IntersectionObserver::new_with_options(callback.as_ref().unchecked_ref(), &options)?;
    callback.forget();

    for element in elements {
        observer.observe(element);
    }
    Ok(())
}

/// Display slots backed by elements of the live document, looked up by id.
pub struct DocumentSlots {
    document: Document,
}

impl DocumentSlots {
    pub fn new(document: Document) -> Self {
        Self { document }
    }

    fn element(&self, slot: Slot) -> Option<Element> {
        let element = self.document.get_element_by_id(slot.id());
        if element.is_none() {
            debug!("slot #{} not on this page", slot.id());
        }
        element
    }
}

impl DisplaySlots for DocumentSlots {
    fn set_text(&self, slot: Slot, text: &str) {
        if let Some(element) = self.element(slot) {
            element.set_text_content(Some(text));
        }
    }

    fn set_link(&self, slot: Slot, href: &str) {
        if let Some(element) = self.element(slot) {
            let _ = element.set_attribute("href", href);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn each_element_fires_once_across_reentries() {
        let mut tracker = OnceTracker::new(vec![1, 2]);
        let entries = [(1, false), (1, true), (2, true), (1, false), (1, true), (2, true), (1, true)];

        let fired: Vec<u32> = entries
            .iter()
            .filter(|(key, intersecting)| tracker.on_entry(key, *intersecting))
            .map(|(key, _)| *key)
            .collect();

        assert_eq!(fired, vec![1, 2]);
        assert!(tracker.is_done());
    }

    #[test]
    fn leaving_the_viewport_does_not_fire() {
        let mut tracker = OnceTracker::new(vec!["hero"]);
        assert!(!tracker.on_entry(&"hero", false));
        assert!(!tracker.is_done());
        assert!(tracker.on_entry(&"hero", true));
    }

    #[test]
    fn unwatched_elements_never_fire() {
        let mut tracker = OnceTracker::new(vec!["hero"]);
        assert!(!tracker.on_entry(&"footer", true));
        assert!(!tracker.is_done());
    }
}
