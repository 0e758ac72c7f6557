//! Location acquisition: permission gating, a single coordinate fetch and
//! classification of device failures into [`LocationResult`].
//!
//! The platform APIs are consumed through [`PermissionService`] and
//! [`PositionService`]. The shell-backed implementation lives in
//! `capabilities::location`; tests plug in recording mocks.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, info, warn};

use crate::config::{PermissionRationale, Platform};
use crate::{
    DEFAULT_POSITION_MAX_AGE_MS, DEFAULT_POSITION_TIMEOUT_MS, MAX_POSITION_AGE_MS,
    MAX_POSITION_TIMEOUT_MS, MIN_POSITION_TIMEOUT_MS, PERMISSION_NOT_GRANTED_MESSAGE,
};

// --- Coordinates: validated, NaN-safe ---

#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Coordinates {
    pub latitude: f64,
    pub longitude: f64,
}

#[derive(Debug, Clone, PartialEq, Error)]
pub enum CoordinateError {
    #[error("Latitude {0} is out of valid range [-90, 90]")]
    LatitudeOutOfRange(f64),
    #[error("Longitude {0} is out of valid range [-180, 180]")]
    LongitudeOutOfRange(f64),
    #[error("Coordinate value is not finite (NaN or Infinity)")]
    NonFinite,
}

impl Coordinates {
    pub fn new(latitude: f64, longitude: f64) -> Result<Self, CoordinateError> {
        if !latitude.is_finite() || !longitude.is_finite() {
            return Err(CoordinateError::NonFinite);
        }
        if !(-90.0..=90.0).contains(&latitude) {
            return Err(CoordinateError::LatitudeOutOfRange(latitude));
        }
        if !(-180.0..=180.0).contains(&longitude) {
            return Err(CoordinateError::LongitudeOutOfRange(longitude));
        }
        Ok(Self {
            latitude,
            longitude,
        })
    }
}

// --- Error taxonomy ---

/// Classification of a failed location fix.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ErrorKind {
    PermissionDenied,
    PositionUnavailable,
    Timeout,
    Unknown,
}

impl ErrorKind {
    /// Platform geolocation error codes.
    pub const PERMISSION_DENIED_CODE: i32 = 1;
    pub const POSITION_UNAVAILABLE_CODE: i32 = 2;
    pub const TIMEOUT_CODE: i32 = 3;

    /// Maps a raw device error code. Unrecognized codes are `Unknown`.
    #[must_use]
    pub const fn from_code(code: i32) -> Self {
        match code {
            Self::PERMISSION_DENIED_CODE => Self::PermissionDenied,
            Self::POSITION_UNAVAILABLE_CODE => Self::PositionUnavailable,
            Self::TIMEOUT_CODE => Self::Timeout,
            _ => Self::Unknown,
        }
    }

    #[must_use]
    pub const fn code(self) -> &'static str {
        match self {
            Self::PermissionDenied => "LOCATION_PERMISSION_DENIED",
            Self::PositionUnavailable => "POSITION_UNAVAILABLE",
            Self::Timeout => "TIMEOUT",
            Self::Unknown => "UNKNOWN_ERROR",
        }
    }

    #[must_use]
    pub const fn default_message(self) -> &'static str {
        match self {
            Self::PermissionDenied => {
                "Location permission denied. You can still search for a location manually."
            }
            Self::PositionUnavailable => {
                "Location unavailable. Please check that GPS is enabled and you are connected."
            }
            Self::Timeout => "Timed out while obtaining your location. Please try again.",
            Self::Unknown => "Could not obtain your location.",
        }
    }

    #[must_use]
    pub const fn is_retryable(self) -> bool {
        matches!(self, Self::PositionUnavailable | Self::Timeout)
    }
}

// --- Result of an acquisition ---

/// Last known outcome of a location acquisition.
///
/// A `Success` never carries an error kind and a `Failure` never carries
/// coordinates; the variants make the two unrepresentable together.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum LocationResult {
    #[default]
    Unset,
    Success {
        latitude: f64,
        longitude: f64,
    },
    Failure {
        kind: ErrorKind,
        message: String,
    },
}

impl LocationResult {
    pub fn success(coordinates: Coordinates) -> Self {
        Self::Success {
            latitude: coordinates.latitude,
            longitude: coordinates.longitude,
        }
    }

    pub fn failure(kind: ErrorKind, message: impl Into<String>) -> Self {
        Self::Failure {
            kind,
            message: message.into(),
        }
    }

    /// Failure carrying the kind's default user-facing message.
    pub fn from_kind(kind: ErrorKind) -> Self {
        Self::failure(kind, kind.default_message())
    }

    pub fn is_set(&self) -> bool {
        !matches!(self, Self::Unset)
    }

    pub fn is_success(&self) -> bool {
        matches!(self, Self::Success { .. })
    }

    pub fn is_failure(&self) -> bool {
        matches!(self, Self::Failure { .. })
    }

    pub fn coordinates(&self) -> Option<Coordinates> {
        match self {
            Self::Success {
                latitude,
                longitude,
            } => Some(Coordinates {
                latitude: *latitude,
                longitude: *longitude,
            }),
            _ => None,
        }
    }

    pub fn error_kind(&self) -> Option<ErrorKind> {
        match self {
            Self::Failure { kind, .. } => Some(*kind),
            _ => None,
        }
    }

    pub fn error_message(&self) -> Option<&str> {
        match self {
            Self::Failure { message, .. } => Some(message.as_str()),
            _ => None,
        }
    }
}

// --- Permission service ---

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Permission {
    AccessFineLocation,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PermissionStatus {
    Granted,
    Denied,
    NeverAskAgain,
}

impl PermissionStatus {
    pub fn is_granted(&self) -> bool {
        matches!(self, PermissionStatus::Granted)
    }
}

#[derive(Debug, Clone, Error, PartialEq, Eq, Serialize, Deserialize)]
#[error("permission query failed: {message}")]
pub struct PermissionError {
    pub message: String,
}

impl PermissionError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

#[async_trait]
pub trait PermissionService: Send + Sync {
    async fn request(
        &self,
        permission: Permission,
        rationale: &PermissionRationale,
    ) -> Result<PermissionStatus, PermissionError>;
}

// --- Position service ---

/// Options forwarded to the device location API.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PositionOptions {
    pub high_accuracy: bool,
    pub timeout_ms: u64,
    /// Cached fixes up to this age are acceptable.
    pub maximum_age_ms: u64,
}

impl Default for PositionOptions {
    fn default() -> Self {
        Self {
            high_accuracy: true,
            timeout_ms: DEFAULT_POSITION_TIMEOUT_MS,
            maximum_age_ms: DEFAULT_POSITION_MAX_AGE_MS,
        }
    }
}

impl PositionOptions {
    pub fn with_timeout_ms(mut self, timeout_ms: u64) -> Self {
        self.timeout_ms = timeout_ms;
        self.validated()
    }

    pub fn with_maximum_age_ms(mut self, maximum_age_ms: u64) -> Self {
        self.maximum_age_ms = maximum_age_ms;
        self.validated()
    }

    pub fn validated(mut self) -> Self {
        self.timeout_ms = self
            .timeout_ms
            .clamp(MIN_POSITION_TIMEOUT_MS, MAX_POSITION_TIMEOUT_MS);
        self.maximum_age_ms = self.maximum_age_ms.min(MAX_POSITION_AGE_MS);
        self
    }
}

/// Error reported by the device location API, with its raw platform code.
#[derive(Debug, Clone, Error, PartialEq, Eq, Serialize, Deserialize)]
#[error("position error {code}: {message}")]
pub struct PositionError {
    pub code: i32,
    pub message: String,
}

impl PositionError {
    pub fn new(code: i32, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
        }
    }

    pub fn kind(&self) -> ErrorKind {
        ErrorKind::from_code(self.code)
    }
}

#[async_trait]
pub trait PositionService: Send + Sync {
    async fn get_current_position(
        &self,
        options: PositionOptions,
    ) -> Result<Coordinates, PositionError>;
}

/// Maps a device failure to the failure surfaced to the user.
pub fn classify_position_error(error: &PositionError) -> LocationResult {
    LocationResult::from_kind(error.kind())
}

// --- Orchestration ---

/// Decides whether fine-location access is available.
pub struct PermissionGate<P> {
    service: P,
    platform: Platform,
    rationale: PermissionRationale,
}

impl<P> PermissionGate<P>
where
    P: PermissionService,
{
    pub fn new(service: P, platform: Platform, rationale: PermissionRationale) -> Self {
        Self {
            service,
            platform,
            rationale,
        }
    }

    pub fn service(&self) -> &P {
        &self.service
    }

    pub fn platform(&self) -> Platform {
        self.platform
    }

    /// Never fails: a permission query error counts as "not granted".
    pub async fn request_location_permission(&self) -> bool {
        if !self.platform.requires_runtime_permission() {
            debug!(platform = ?self.platform, "location permission requested implicitly");
            return true;
        }

        match self
            .service
            .request(Permission::AccessFineLocation, &self.rationale)
            .await
        {
            Ok(status) => {
                debug!(?status, "location permission answered");
                status.is_granted()
            }
            Err(e) => {
                warn!(error = %e, "location permission query failed");
                false
            }
        }
    }
}

/// Runs one permission-gated coordinate fetch.
pub struct LocationAcquirer<P, L> {
    gate: PermissionGate<P>,
    positions: L,
    options: PositionOptions,
}

impl<P, L> LocationAcquirer<P, L>
where
    P: PermissionService,
    L: PositionService,
{
    pub fn new(gate: PermissionGate<P>, positions: L, options: PositionOptions) -> Self {
        Self {
            gate,
            positions,
            options,
        }
    }

    pub fn gate(&self) -> &PermissionGate<P> {
        &self.gate
    }

    pub fn positions(&self) -> &L {
        &self.positions
    }

    pub fn options(&self) -> PositionOptions {
        self.options
    }

    /// The position service is never called when permission is not granted.
    pub async fn acquire_current_location(&self) -> LocationResult {
        if !self.gate.request_location_permission().await {
            info!("location permission not granted");
            return LocationResult::failure(
                ErrorKind::PermissionDenied,
                PERMISSION_NOT_GRANTED_MESSAGE,
            );
        }

        match self.positions.get_current_position(self.options).await {
            Ok(coordinates) => {
                info!("location fix obtained");
                LocationResult::success(coordinates)
            }
            Err(e) => {
                let result = classify_position_error(&e);
                warn!(error = %e, kind = ?e.kind(), "location fix failed");
                result
            }
        }
    }
}
