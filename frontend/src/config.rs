#[cfg(debug_assertions)]
pub fn get_backend_url() -> &'static str {
    "http://localhost:3001"  // Development URL when running locally
}

#[cfg(not(debug_assertions))]
pub fn get_backend_url() -> &'static str {
    ""  // Production URL
}

/// Where the pricing pipeline looks things up.
#[derive(Clone, Debug, PartialEq)]
pub struct PipelineSettings {
    pub backend_url: String,
    pub geo_endpoint: String,
    pub geo_timeout_ms: u32,
}

#[derive(Clone, Debug, PartialEq)]
pub struct Selectors {
    pub nav: &'static str,
    pub anchors: &'static str,
    pub fade_targets: &'static str,
    pub menu_toggle: &'static str,
    pub mobile_nav: &'static str,
    pub cards: &'static str,
    pub counters: &'static str,
}

#[derive(Clone, Debug, PartialEq)]
pub struct ClassNames {
    pub scrolled: &'static str,
    pub visible: &'static str,
    pub toggle_active: &'static str,
    pub nav_open: &'static str,
    pub body_menu_open: &'static str,
}

#[derive(Clone, Debug, PartialEq)]
pub struct LandingConfig {
    pub pricing: PipelineSettings,
    pub nav_scroll_threshold: f64,
    pub anchor_scroll_margin: f64,
    pub fade_threshold: f64,
    pub fade_root_margin: &'static str,
    pub counter_duration_ms: f64,
    pub counter_frame_ms: f64,
    pub counter_threshold: f64,
    pub selectors: Selectors,
    pub classes: ClassNames,
}

impl Default for LandingConfig {
    fn default() -> Self {
        Self {
            pricing: PipelineSettings {
                backend_url: get_backend_url().to_string(),
                geo_endpoint: "https://ipapi.co/json/".to_string(),
                geo_timeout_ms: 3000,
            },
            nav_scroll_threshold: 50.0,
            anchor_scroll_margin: 20.0,
            fade_threshold: 0.1,
            fade_root_margin: "0px 0px -50px 0px",
            counter_duration_ms: 2000.0,
            counter_frame_ms: 16.0, // ~60fps
            counter_threshold: 0.5,
            selectors: Selectors {
                nav: ".nav, nav, header",
                anchors: "a[href^=\"#\"]",
                fade_targets: ".fade-in, .animate-on-scroll, [data-animate]",
                menu_toggle: ".menu-toggle, .hamburger, [data-menu-toggle]",
                mobile_nav: ".nav, .mobile-nav, [data-mobile-nav]",
                cards: ".feature-card, .card, [data-hover-animate]",
                counters: ".counter, .stat-number, [data-counter]",
            },
            classes: ClassNames {
                scrolled: "scrolled",
                visible: "visible",
                toggle_active: "active",
                nav_open: "nav-open",
                body_menu_open: "menu-open",
            },
        }
    }
}
