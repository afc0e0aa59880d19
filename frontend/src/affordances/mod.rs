pub mod counter;
pub mod fade_in;
pub mod hover;
pub mod menu;
pub mod nav;
pub mod smooth_scroll;

use log::{error, info};
use wasm_bindgen::JsValue;
use web_sys::{Document, Window};

use crate::config::LandingConfig;
use menu::MenuElements;

fn report(name: &str, result: Result<(), JsValue>) {
    match result {
        Ok(()) => info!("{} ready", name),
        Err(e) => error!("Failed to set up {}: {:?}", name, e),
    }
}

/// Wires every page behavior. Each one is independent: a failure in one is
/// logged and the rest still get installed.
pub fn install_all(window: &Window, document: &Document, config: &LandingConfig) {
    let selectors = &config.selectors;
    let classes = &config.classes;

    report(
        "nav styling",
        nav::install(window, document, selectors.nav, config.nav_scroll_threshold, classes.scrolled),
    );

    let menu = match MenuElements::find(document, selectors.menu_toggle, selectors.mobile_nav, classes.clone()) {
        Ok(menu) => menu,
        Err(e) => {
            error!("Failed to look up mobile menu: {:?}", e);
            None
        }
    };
    if let Some(menu) = &menu {
        report("mobile menu", menu::install(document, menu));
    }

    report(
        "smooth scroll",
        smooth_scroll::install(
            window,
            document,
            selectors.anchors,
            selectors.nav,
            config.anchor_scroll_margin,
            menu,
        ),
    );
    report(
        "fade-in",
        fade_in::install(
            window,
            document,
            selectors.fade_targets,
            config.fade_threshold,
            config.fade_root_margin,
            classes.visible,
        ),
    );
    report("card hover", hover::install(document, selectors.cards));
    report(
        "counters",
        counter::install(
            window,
            document,
            selectors.counters,
            config.counter_threshold,
            config.counter_duration_ms,
            config.counter_frame_ms,
        ),
    );
}
