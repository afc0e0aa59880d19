pub mod models;
pub mod presenter;
pub mod region;
pub mod source;

use log::info;

use crate::config::PipelineSettings;
use crate::pricing::presenter::DisplaySlots;
use crate::pricing::region::{BrowserTimezone, GeoLookup, IpGeolocation, RegionDetector, TimezoneSource};
use crate::pricing::source::{BackendPricing, PricingFetcher, PricingSource};

/// Detects the region and loads prices side by side, then renders once
/// both have settled.
pub async fn run<G, T, F, S>(detector: &RegionDetector<G, T>, source: &PricingSource<F>, slots: &S)
where
    G: GeoLookup,
    T: TimezoneSource,
    F: PricingFetcher,
    S: DisplaySlots,
{
    let (region, config) = futures::join!(detector.detect(), source.load());
    if let Ok(summary) = presenter::present(&config, &region, slots) {
        info!("Showing {} pricing: {}/month", region, summary.monthly_price);
    }
}

/// Pipeline wired to the real network and the visitor's browser.
pub async fn run_in_browser(settings: PipelineSettings, slots: impl DisplaySlots) {
    let detector = RegionDetector::new(
        IpGeolocation::new(settings.geo_endpoint, settings.geo_timeout_ms),
        BrowserTimezone,
    );
    let source = PricingSource::new(BackendPricing::new(settings.backend_url));
    run(&detector, &source, &slots).await;
}
