use async_trait::async_trait;
use reqwest::{header, Client, StatusCode};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use std::time::Duration;
use thiserror::Error;

use crate::models::Coordinates;

/// Host failure code: the user refused access
pub const PERMISSION_DENIED: u16 = 1;
/// Host failure code: no fix could be determined
pub const POSITION_UNAVAILABLE: u16 = 2;
/// Host failure code: no fix within the timeout
pub const TIMEOUT: u16 = 3;

/// Options passed to the host location service
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PositionOptions {
    pub high_accuracy: bool,
    pub timeout: Duration,
    /// Oldest cached fix the caller accepts; zero demands a fresh one
    pub maximum_age: Duration,
}

impl Default for PositionOptions {
    fn default() -> Self {
        Self {
            high_accuracy: true,
            timeout: Duration::from_millis(10_000),
            maximum_age: Duration::ZERO,
        }
    }
}

/// Failure reported by a host location service
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("position error {code}: {message}")]
pub struct HostPositionError {
    pub code: u16,
    pub message: String,
}

impl HostPositionError {
    pub fn new(code: u16, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
        }
    }
}

/// Why a location could not be acquired
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Error, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LocationError {
    #[error("Geolocation is not supported on this host")]
    Unsupported,

    #[error("Location permission denied. Please enable location access in your settings.")]
    PermissionDenied,

    #[error("Location information is unavailable")]
    PositionUnavailable,

    #[error("Location request timed out")]
    Timeout,

    #[error("Unable to retrieve your location")]
    Unknown,
}

impl LocationError {
    /// Map a host failure code onto the error taxonomy
    pub fn from_code(code: u16) -> Self {
        match code {
            PERMISSION_DENIED => Self::PermissionDenied,
            POSITION_UNAVAILABLE => Self::PositionUnavailable,
            TIMEOUT => Self::Timeout,
            _ => Self::Unknown,
        }
    }
}

impl From<HostPositionError> for LocationError {
    fn from(err: HostPositionError) -> Self {
        Self::from_code(err.code)
    }
}

/// Host capability that reports the current position
#[async_trait]
pub trait PositionSource: Send + Sync {
    async fn current_position(&self, options: &PositionOptions) -> Result<Coordinates, HostPositionError>;
}

/// Acquires the caller's position through an optional host source
///
/// Callers are expected to keep at most one request in flight.
#[derive(Clone)]
pub struct LocationProvider {
    source: Option<Arc<dyn PositionSource>>,
    options: PositionOptions,
}

impl LocationProvider {
    pub fn new(source: Arc<dyn PositionSource>) -> Self {
        Self {
            source: Some(source),
            options: PositionOptions::default(),
        }
    }

    /// A provider for hosts without any location capability
    pub fn unsupported() -> Self {
        Self {
            source: None,
            options: PositionOptions::default(),
        }
    }

    pub fn with_options(mut self, options: PositionOptions) -> Self {
        self.options = options;
        self
    }

    pub fn options(&self) -> &PositionOptions {
        &self.options
    }

    pub fn is_supported(&self) -> bool {
        self.source.is_some()
    }

    /// Issue a single position request
    ///
    /// Every failure is returned as a [`LocationError`] value; the timeout from
    /// the options is enforced here even if the source ignores it.
    pub async fn acquire_location(&self) -> Result<Coordinates, LocationError> {
        let Some(source) = &self.source else {
            tracing::warn!("Location requested but no position source is configured");
            return Err(LocationError::Unsupported);
        };

        let result = match tokio::time::timeout(self.options.timeout, source.current_position(&self.options)).await {
            Ok(Ok(coords)) => Ok(coords),
            Ok(Err(e)) => {
                tracing::warn!("Position source failed: {}", e);
                Err(LocationError::from(e))
            }
            Err(_) => {
                tracing::warn!("Position source did not answer within {:?}", self.options.timeout);
                Err(LocationError::Timeout)
            }
        };

        if let Ok(coords) = &result {
            tracing::info!("Location acquired: {:.4}, {:.4}", coords.latitude, coords.longitude);
        }

        result
    }
}

impl std::fmt::Debug for LocationProvider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LocationProvider")
            .field("supported", &self.is_supported())
            .field("options", &self.options)
            .finish()
    }
}

/// Position source that always reports the same coordinates
#[derive(Debug, Clone, Copy)]
pub struct FixedPosition {
    coords: Coordinates,
}

impl FixedPosition {
    pub fn new(coords: Coordinates) -> Self {
        Self { coords }
    }
}

#[async_trait]
impl PositionSource for FixedPosition {
    async fn current_position(&self, _options: &PositionOptions) -> Result<Coordinates, HostPositionError> {
        Ok(self.coords)
    }
}

/// Position source backed by an IP geolocation HTTP endpoint
///
/// The endpoint must answer `GET` with a JSON object carrying
/// `latitude`/`longitude` (or `lat`/`lon`). IP lookups have a fixed
/// precision, so `high_accuracy` has no effect.
pub struct IpGeolocation {
    endpoint: String,
    client: Client,
}

#[derive(Debug, Deserialize)]
struct IpLookupResponse {
    #[serde(default, alias = "lat")]
    latitude: Option<f64>,
    #[serde(default, alias = "lon")]
    longitude: Option<f64>,
    #[serde(default)]
    status: Option<String>,
}

impl IpGeolocation {
    pub fn new(endpoint: impl Into<String>) -> Result<Self, reqwest::Error> {
        let client = Client::builder().build()?;

        Ok(Self {
            endpoint: endpoint.into(),
            client,
        })
    }
}

#[async_trait]
impl PositionSource for IpGeolocation {
    async fn current_position(&self, options: &PositionOptions) -> Result<Coordinates, HostPositionError> {
        let mut request = self.client.get(&self.endpoint).timeout(options.timeout);
        if options.maximum_age.is_zero() {
            request = request.header(header::CACHE_CONTROL, "no-cache");
        }

        tracing::debug!("Requesting IP geolocation from: {}", self.endpoint);

        let response = request.send().await.map_err(|e| {
            let code = if e.is_timeout() { TIMEOUT } else { POSITION_UNAVAILABLE };
            HostPositionError::new(code, e.to_string())
        })?;

        let status = response.status();
        if !status.is_success() {
            let code = match status {
                StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => PERMISSION_DENIED,
                StatusCode::NOT_FOUND => POSITION_UNAVAILABLE,
                StatusCode::REQUEST_TIMEOUT | StatusCode::GATEWAY_TIMEOUT => TIMEOUT,
                _ => 0,
            };
            return Err(HostPositionError::new(code, format!("lookup returned {}", status)));
        }

        let body: IpLookupResponse = response
            .json()
            .await
            .map_err(|e| HostPositionError::new(POSITION_UNAVAILABLE, format!("invalid lookup response: {}", e)))?;

        if body.status.as_deref().is_some_and(|s| s.eq_ignore_ascii_case("fail")) {
            return Err(HostPositionError::new(POSITION_UNAVAILABLE, "lookup reported failure"));
        }

        match (body.latitude, body.longitude) {
            (Some(latitude), Some(longitude)) => {
                let coords = Coordinates::new(latitude, longitude);
                if coords.is_valid() {
                    Ok(coords)
                } else {
                    Err(HostPositionError::new(POSITION_UNAVAILABLE, "lookup returned out-of-range coordinates"))
                }
            }
            _ => Err(HostPositionError::new(POSITION_UNAVAILABLE, "lookup response has no coordinates")),
        }
    }
}
