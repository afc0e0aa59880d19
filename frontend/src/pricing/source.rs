use async_trait::async_trait;
use gloo_net::http::Request;
use log::{info, warn};

use crate::error::FetchError;
use crate::pricing::models::{ApiResponse, PricingConfig};

#[async_trait(?Send)]
pub trait PricingFetcher {
    async fn fetch(&self) -> Result<PricingConfig, FetchError>;
}

/// `GET {backend}/api/pricing/config`.
pub struct BackendPricing {
    backend_url: String,
}

impl BackendPricing {
    pub fn new(backend_url: impl Into<String>) -> Self {
        Self { backend_url: backend_url.into() }
    }

    pub fn endpoint(&self) -> String {
        format!("{}/api/pricing/config", self.backend_url.trim_end_matches('/'))
    }
}

#[async_trait(?Send)]
impl PricingFetcher for BackendPricing {
    async fn fetch(&self) -> Result<PricingConfig, FetchError> {
        let response = Request::get(&self.endpoint()).send().await?;
        if !response.ok() {
            return Err(FetchError::Status(response.status()));
        }
        let body = response.json::<ApiResponse<PricingConfig>>().await?;
        unwrap_envelope(body)
    }
}

fn unwrap_envelope(body: ApiResponse<PricingConfig>) -> Result<PricingConfig, FetchError> {
    match body {
        ApiResponse { success: true, data: Some(config) } => match config.invalid_region() {
            Some(region) => Err(FetchError::Decode(format!("bad amounts for region {}", region))),
            None => Ok(config),
        },
        _ => Err(FetchError::Unsuccessful),
    }
}

/// Produces a pricing config no matter what: the backend's if it answers
/// properly, the built-in one otherwise. No retries.
pub struct PricingSource<F> {
    fetcher: F,
}

impl<F: PricingFetcher> PricingSource<F> {
    pub fn new(fetcher: F) -> Self {
        Self { fetcher }
    }

    pub async fn load(&self) -> PricingConfig {
        match self.fetcher.fetch().await {
            Ok(config) => {
                info!("Loaded pricing for {} regions", config.regions.len());
                config
            }
            Err(e) => {
                warn!("Pricing fetch failed, using built-in prices: {}", e);
                PricingConfig::fallback()
            }
        }
    }
}
