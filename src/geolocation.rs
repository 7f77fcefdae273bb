//! IP-based geolocation lookup
//!
//! Posts an empty request to the Google Geolocation API, which locates the
//! caller from its network address. Failures come back as data with a
//! message and code rather than as errors, matching what the endpoint
//! forwards to the browser.

use std::time::Instant;

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::{error, info, instrument, warn};

use crate::config::MapsConfig;
use crate::{Result, WanderLensError};

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LatLng {
    pub lat: f64,
    pub lng: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GeolocationFailure {
    pub message: String,
    pub code: u16,
}

/// Either a position with accuracy radius (meters) or an error object
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum GeolocationOutcome {
    Located { location: LatLng, accuracy: f64 },
    Failed { error: GeolocationFailure },
}

impl GeolocationOutcome {
    pub fn failed(message: impl Into<String>, code: u16) -> Self {
        Self::Failed {
            error: GeolocationFailure {
                message: message.into(),
                code,
            },
        }
    }
}

#[async_trait]
pub trait GeolocationProvider: Send + Sync {
    async fn locate(&self) -> GeolocationOutcome;
}

/// Stand-in used when no maps key is configured
pub struct UnconfiguredGeolocation;

#[async_trait]
impl GeolocationProvider for UnconfiguredGeolocation {
    async fn locate(&self) -> GeolocationOutcome {
        GeolocationOutcome::failed("Geolocation API key is not configured.", 500)
    }
}

pub struct GoogleGeolocationClient {
    client: Client,
    base_url: String,
    api_key: String,
}

#[derive(Debug, Deserialize)]
struct UpstreamError {
    error: UpstreamErrorBody,
}

#[derive(Debug, Deserialize)]
struct UpstreamErrorBody {
    code: Option<u16>,
    message: Option<String>,
}

impl GoogleGeolocationClient {
    pub fn new(base_url: impl Into<String>, api_key: impl Into<String>) -> Result<Self> {
        let api_key = api_key.into();
        if api_key.trim().is_empty() {
            return Err(WanderLensError::config("Maps API key is not configured."));
        }

        let client = Client::builder()
            .user_agent(concat!("WanderLens/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| WanderLensError::config(format!("Failed to create HTTP client: {e}")))?;

        Ok(Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            api_key,
        })
    }

    /// The maps key is required; missing it is a configuration error
    pub fn from_config(config: &MapsConfig) -> Result<Self> {
        let api_key = config.resolved_api_key().ok_or_else(|| {
            WanderLensError::config(
                "No maps API key found. Set maps.api_key or GOOGLE_MAPS_API_KEY.",
            )
        })?;
        Self::new(&config.base_url, api_key)
    }

    fn endpoint(&self) -> String {
        format!(
            "{}/geolocation/v1/geolocate?key={}",
            self.base_url,
            urlencoding::encode(&self.api_key)
        )
    }
}

#[async_trait]
impl GeolocationProvider for GoogleGeolocationClient {
    #[instrument(skip(self))]
    async fn locate(&self) -> GeolocationOutcome {
        let start_time = Instant::now();

        let response = match self
            .client
            .post(self.endpoint())
            .header(reqwest::header::CONTENT_LENGTH, 0)
            .send()
            .await
        {
            Ok(response) => response,
            Err(e) => {
                error!("Geolocation request failed: {}", e);
                return GeolocationOutcome::failed(
                    "Could not reach the geolocation service.",
                    503,
                );
            }
        };

        let status = response.status();
        let body = match response.text().await {
            Ok(body) => body,
            Err(e) => {
                error!("Failed to read geolocation response: {}", e);
                return GeolocationOutcome::failed(
                    "Could not read the geolocation response.",
                    502,
                );
            }
        };

        if status.is_success() {
            return match serde_json::from_str::<GeolocationOutcome>(&body) {
                Ok(outcome @ GeolocationOutcome::Located { .. }) => {
                    info!(
                        "Located caller in {:.3}s",
                        start_time.elapsed().as_secs_f64()
                    );
                    outcome
                }
                _ => {
                    warn!("Unexpected geolocation payload: {}", body);
                    GeolocationOutcome::failed("Invalid response from the geolocation service.", 502)
                }
            };
        }

        warn!("Geolocation service returned {}: {}", status, body);
        match serde_json::from_str::<UpstreamError>(&body) {
            Ok(UpstreamError { error }) => GeolocationOutcome::failed(
                error
                    .message
                    .unwrap_or_else(|| "Geolocation failed.".to_string()),
                error.code.unwrap_or(status.as_u16()),
            ),
            Err(_) => GeolocationOutcome::failed(
                format!(
                    "Geolocation failed: {}",
                    status.canonical_reason().unwrap_or("unknown error")
                ),
                status.as_u16(),
            ),
        }
    }
}
