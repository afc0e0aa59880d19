use thiserror::Error;

/// Why a network lookup did not produce a usable value.
///
/// None of these reach the visitor: the region detector and the pricing
/// source turn every variant into their next fallback.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum FetchError {
    #[error("request failed: {0}")]
    Network(String),
    #[error("request timed out after {0} ms")]
    Timeout(u32),
    #[error("server answered with status {0}")]
    Status(u16),
    #[error("could not decode response: {0}")]
    Decode(String),
    #[error("response carried no usable data")]
    Unsuccessful,
}

impl From<gloo_net::Error> for FetchError {
    fn from(err: gloo_net::Error) -> Self {
        match err {
            gloo_net::Error::SerdeError(e) => FetchError::Decode(e.to_string()),
            other => FetchError::Network(other.to_string()),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Error)]
pub enum PresentError {
    #[error("no pricing entry for region {0:?} and no default entry")]
    NoPricingForRegion(String),
}
