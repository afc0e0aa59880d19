use std::cell::RefCell;
use std::rc::Rc;

use log::debug;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::{JsCast, JsValue};
use web_sys::{Document, Element, Window};

use crate::dom;

const TARGET_ATTR: &str = "data-target";

/// Reads a counter target the way it is usually written on the page:
/// leading digits, thousands separators allowed ("12,500+" is 12500).
pub fn parse_target(raw: &str) -> Option<u64> {
    let digits: String = raw
        .trim()
        .chars()
        .filter(|c| !matches!(c, ',' | '_' | ' ' | '\u{a0}'))
        .take_while(char::is_ascii_digit)
        .collect();
    digits.parse().ok()
}

pub fn format_thousands(value: u64) -> String {
    let digits = value.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(c);
    }
    out
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Frame {
    pub value: u64,
    pub done: bool,
}

/// Counts from zero to `target` in equal steps, one step per frame.
#[derive(Clone, Debug)]
pub struct CounterAnimation {
    target: u64,
    step: f64,
    current: f64,
}

impl CounterAnimation {
    pub fn new(target: u64, duration_ms: f64, frame_ms: f64) -> Self {
        let frames = duration_ms / frame_ms;
        let frames = if frames.is_finite() && frames >= 1.0 { frames } else { 1.0 };
        Self { target, step: target as f64 / frames, current: 0.0 }
    }

    /// Advances one frame. The last frame always shows exactly `target`.
    pub fn tick(&mut self) -> Frame {
        self.current += self.step;
        if self.current < self.target as f64 {
            Frame { value: (self.current.floor() as u64).min(self.target), done: false }
        } else {
            Frame { value: self.target, done: true }
        }
    }
}

fn animate(window: &Window, element: Element, mut animation: CounterAnimation) {
    let frame: Rc<RefCell<Option<Closure<dyn FnMut()>>>> = Rc::new(RefCell::new(None));
    let next_frame = frame.clone();
    let window_loop = window.clone();

    *frame.borrow_mut() = Some(Closure::wrap(Box::new(move || {
        let Frame { value, done } = animation.tick();
        element.set_text_content(Some(&format_thousands(value)));
        if done {
            // Drop ourselves so the loop stops and the Rc cycle is freed
            let _ = next_frame.borrow_mut().take();
            return;
        }
        if let Some(callback) = next_frame.borrow().as_ref() {
            let _ = window_loop.request_animation_frame(callback.as_ref().unchecked_ref());
        }
    }) as Box<dyn FnMut()>));

    if let Some(callback) = frame.borrow().as_ref() {
        let _ = window.request_animation_frame(callback.as_ref().unchecked_ref());
    };
}

pub fn install(
    window: &Window,
    document: &Document,
    selector: &str,
    threshold: f64,
    duration_ms: f64,
    frame_ms: f64,
) -> Result<(), JsValue> {
    let counters = dom::query_all(document, selector)?;
    if counters.is_empty() || !dom::supports_intersection_observer(window) {
        return Ok(());
    }

    let mut armed = Vec::with_capacity(counters.len());
    for counter in counters {
        let raw = match counter.get_attribute(TARGET_ATTR) {
            Some(raw) => raw,
            None => {
                let text = counter.text_content().unwrap_or_default();
                counter.set_attribute(TARGET_ATTR, text.trim())?;
                text
            }
        };
        if parse_target(&raw).is_none() {
            debug!("Counter target {:?} is not a number, leaving it alone", raw);
            continue;
        }
        counter.set_text_content(Some("0"));
        armed.push(counter);
    }

    let window = window.clone();
    dom::observe_once(&armed, threshold, None, move |element| {
        let target = element
            .get_attribute(TARGET_ATTR)
            .and_then(|raw| parse_target(&raw))
            .unwrap_or(0);
        animate(&window, element.clone(), CounterAnimation::new(target, duration_ms, frame_ms));
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn run(mut animation: CounterAnimation) -> Vec<Frame> {
        let mut frames = Vec::new();
        loop {
            let frame = animation.tick();
            frames.push(frame);
            if frame.done || frames.len() > 10_000 {
                return frames;
            }
        }
    }

    #[test]
    fn ends_exactly_on_target() {
        for target in [1, 7, 125, 999, 12_500, 1_000_003] {
            let frames = run(CounterAnimation::new(target, 2000.0, 16.0));
            let last = frames.last().unwrap();
            assert!(last.done);
            assert_eq!(last.value, target);
            assert!(frames.iter().all(|f| f.value <= target));
            assert!(frames.windows(2).all(|w| w[0].value <= w[1].value));
        }
    }

    #[test]
    fn takes_about_duration_over_frame_frames() {
        let frames = run(CounterAnimation::new(10_000, 2000.0, 16.0));
        assert!((124..=126).contains(&frames.len()), "{} frames", frames.len());
    }

    #[test]
    fn zero_target_finishes_immediately() {
        let frames = run(CounterAnimation::new(0, 2000.0, 16.0));
        assert_eq!(frames, vec![Frame { value: 0, done: true }]);
    }

    #[test]
    fn degenerate_timing_still_finishes() {
        let frames = run(CounterAnimation::new(50, 2000.0, 0.0));
        assert_eq!(frames.last().unwrap().value, 50);
        let frames = run(CounterAnimation::new(50, 0.0, 16.0));
        assert_eq!(frames.len(), 1);
    }

    #[test]
    fn targets() {
        assert_eq!(parse_target("2500"), Some(2500));
        assert_eq!(parse_target(" 12,500+ "), Some(12_500));
        assert_eq!(parse_target("98%"), Some(98));
        assert_eq!(parse_target("∞"), None);
        assert_eq!(parse_target(""), None);
    }

    #[test]
    fn thousands() {
        assert_eq!(format_thousands(0), "0");
        assert_eq!(format_thousands(999), "999");
        assert_eq!(format_thousands(1000), "1,000");
        assert_eq!(format_thousands(1_234_567), "1,234,567");
    }
}
