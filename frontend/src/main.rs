use log::{error, info, Level};
use web_sys::window;

mod affordances;
mod config;
mod dom;
mod error;
mod pricing;

use config::LandingConfig;
use dom::DocumentSlots;

fn main() {
    // Initialize console error panic hook for better error messages
    console_error_panic_hook::set_once();

    let level = if cfg!(debug_assertions) { Level::Debug } else { Level::Info };
    // Page behaviours still run without console logging
    let _ = console_log::init_with_level(level);

    info!("Starting landing page scripts");

    let Some(window) = window() else {
        error!("No window, nothing to attach to");
        return;
    };
    let Some(document) = window.document() else {
        error!("No document, nothing to attach to");
        return;
    };

    let config = LandingConfig::default();

    affordances::install_all(&window, &document, &config);

    let slots = DocumentSlots::new(document);
    wasm_bindgen_futures::spawn_local(pricing::run_in_browser(config.pricing, slots));
}
