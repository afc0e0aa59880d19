use std::future::Future;

use async_trait::async_trait;
use chrono_tz::Tz;
use futures::future::{self, Either};
use gloo_net::http::Request;
use gloo_timers::future::TimeoutFuture;
use log::{debug, info, warn};
use serde::Deserialize;
use web_sys::js_sys;

use crate::error::FetchError;
use crate::pricing::models::RegionCode;

#[async_trait(?Send)]
pub trait GeoLookup {
    /// The visitor's country code as reported by the service, if it had one.
    async fn country_code(&self) -> Result<Option<String>, FetchError>;
}

pub trait TimezoneSource {
    fn time_zone(&self) -> Option<String>;
}

/// Resolves `request`, or fails with [`FetchError::Timeout`] as soon as
/// `timer` fires first. The request is dropped, not aborted.
pub async fn race_timeout<F, T>(request: F, timer: T, timeout_ms: u32) -> Result<F::Output, FetchError>
where
    F: Future,
    T: Future<Output = ()>,
{
    futures::pin_mut!(request, timer);
    match future::select(request, timer).await {
        Either::Left((output, _)) => Ok(output),
        Either::Right(((), _)) => Err(FetchError::Timeout(timeout_ms)),
    }
}

#[derive(Deserialize)]
struct GeoResponse {
    country_code: Option<String>,
}

/// IP geolocation over HTTP (ipapi.co style JSON with a `country_code` field).
pub struct IpGeolocation {
    endpoint: String,
    timeout_ms: u32,
}

impl IpGeolocation {
    pub fn new(endpoint: impl Into<String>, timeout_ms: u32) -> Self {
        Self { endpoint: endpoint.into(), timeout_ms }
    }
}

#[async_trait(?Send)]
impl GeoLookup for IpGeolocation {
    async fn country_code(&self) -> Result<Option<String>, FetchError> {
        let lookup = async {
            let response = Request::get(&self.endpoint).send().await?;
            if !response.ok() {
                return Err(FetchError::Status(response.status()));
            }
            let body = response.json::<GeoResponse>().await?;
            Ok::<_, FetchError>(body.country_code)
        };
        race_timeout(lookup, TimeoutFuture::new(self.timeout_ms), self.timeout_ms).await?
    }
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct ResolvedDateTimeOptions {
    time_zone: Option<String>,
}

/// Reads `Intl.DateTimeFormat().resolvedOptions().timeZone`.
pub struct BrowserTimezone;

impl TimezoneSource for BrowserTimezone {
    fn time_zone(&self) -> Option<String> {
        let format = js_sys::Intl::DateTimeFormat::new(&js_sys::Array::new(), &js_sys::Object::new());
        serde_wasm_bindgen::from_value::<ResolvedDateTimeOptions>(format.resolved_options().into())
            .ok()
            .and_then(|options| options.time_zone)
    }
}

/// True for zones that only exist in India. `Asia/Calcutta` is the legacy
/// alias some browsers still report.
pub fn is_india_time_zone(name: &str) -> bool {
    matches!(name.parse::<Tz>(), Ok(Tz::Asia__Kolkata) | Ok(Tz::Asia__Calcutta))
}

pub struct RegionDetector<G, T> {
    geo: G,
    timezone: T,
}

impl<G: GeoLookup, T: TimezoneSource> RegionDetector<G, T> {
    pub fn new(geo: G, timezone: T) -> Self {
        Self { geo, timezone }
    }

    /// Geolocation first, then the timezone heuristic, then the default region.
    pub async fn detect(&self) -> RegionCode {
        match self.geo.country_code().await {
            Ok(Some(raw)) => match RegionCode::from_country_code(&raw) {
                Some(region) => {
                    info!("Detected region {} from geolocation", region);
                    return region;
                }
                None => warn!("Geolocation returned unusable country code {:?}", raw),
            },
            Ok(None) => debug!("Geolocation response had no country code"),
            Err(e) => warn!("Geolocation lookup failed: {}", e),
        }

        if let Some(zone) = self.timezone.time_zone() {
            if is_india_time_zone(&zone) {
                info!("Detected region IN from time zone {}", zone);
                return RegionCode::india();
            }
        }

        RegionCode::default_region()
    }
}
