use async_trait::async_trait;
use crux_core::capability::{Capability, CapabilityContext, Operation};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::config::{AppConfig, PermissionRationale};
use crate::location::{
    Coordinates, ErrorKind, LocationAcquirer, LocationResult, Permission, PermissionError,
    PermissionGate, PermissionService, PermissionStatus, PositionError, PositionOptions,
    PositionService,
};

pub struct Location<Ev> {
    context: CapabilityContext<LocationOperation, Ev>,
}

impl<Ev> Clone for Location<Ev> {
    fn clone(&self) -> Self {
        Self {
            context: self.context.clone(),
        }
    }
}

impl<Ev> Capability<Ev> for Location<Ev> {
    type Operation = LocationOperation;
    type MappedSelf<MappedEv> = Location<MappedEv>;

    fn map_event<F, NewEv>(&self, f: F) -> Self::MappedSelf<NewEv>
    where
        F: Fn(NewEv) -> Ev + Send + Sync + 'static,
        Ev: 'static,
        NewEv: 'static + Send,
    {
        Location::new(self.context.map_event(f))
    }
}

impl<Ev> Location<Ev> {
    pub fn new(context: CapabilityContext<LocationOperation, Ev>) -> Self {
        Self { context }
    }
}

impl<Ev> Location<Ev>
where
    Ev: Send + 'static,
{
    /// Runs the permission-gated fetch against the shell and hands the
    /// classified result back to the app.
    pub fn acquire_current_location<F>(&self, config: &AppConfig, callback: F)
    where
        F: FnOnce(LocationResult) -> Ev + Send + 'static,
    {
        let bridge = ShellBridge {
            context: self.context.clone(),
        };
        let acquirer = LocationAcquirer::new(
            PermissionGate::new(bridge.clone(), config.platform, config.rationale.clone()),
            bridge,
            config.position,
        );

        let context = self.context.clone();
        self.context.spawn(async move {
            let result = acquirer.acquire_current_location().await;
            context.update_app(callback(result));
        });
    }
}

/// Implements the platform services over shell requests.
struct ShellBridge<Ev> {
    context: CapabilityContext<LocationOperation, Ev>,
}

impl<Ev> Clone for ShellBridge<Ev> {
    fn clone(&self) -> Self {
        Self {
            context: self.context.clone(),
        }
    }
}

#[async_trait]
impl<Ev> PermissionService for ShellBridge<Ev>
where
    Ev: Send + 'static,
{
    async fn request(
        &self,
        permission: Permission,
        rationale: &PermissionRationale,
    ) -> Result<PermissionStatus, PermissionError> {
        let operation = LocationOperation::RequestPermission {
            permission,
            rationale: rationale.clone(),
        };

        match self.context.request_from_shell(operation).await {
            Ok(LocationOutput::Permission(status)) => Ok(status),
            Ok(other) => Err(PermissionError::new(format!(
                "unexpected shell output: {other:?}"
            ))),
            Err(e) => Err(PermissionError::new(e.to_string())),
        }
    }
}

#[async_trait]
impl<Ev> PositionService for ShellBridge<Ev>
where
    Ev: Send + 'static,
{
    async fn get_current_position(
        &self,
        options: PositionOptions,
    ) -> Result<Coordinates, PositionError> {
        let operation = LocationOperation::GetCurrentPosition { options };

        match self.context.request_from_shell(operation).await {
            Ok(LocationOutput::Position {
                latitude,
                longitude,
            }) => Coordinates::new(latitude, longitude).map_err(|e| {
                PositionError::new(ErrorKind::POSITION_UNAVAILABLE_CODE, e.to_string())
            }),
            Ok(other) => Err(PositionError::new(
                0,
                format!("unexpected shell output: {other:?}"),
            )),
            Err(e) => Err(e.into()),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub enum LocationOperation {
    RequestPermission {
        permission: Permission,
        rationale: PermissionRationale,
    },
    GetCurrentPosition {
        options: PositionOptions,
    },
}

impl Operation for LocationOperation {
    type Output = LocationShellResult;
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub enum LocationOutput {
    Permission(PermissionStatus),
    Position { latitude: f64, longitude: f64 },
}

#[derive(Debug, Clone, Error, Serialize, Deserialize, PartialEq, Eq)]
pub enum LocationShellError {
    #[error("permission query failed: {message}")]
    PermissionQueryFailed { message: String },

    #[error("position error {code}: {message}")]
    Position { code: i32, message: String },

    #[error("location services not supported on this platform")]
    NotSupported,
}

impl From<LocationShellError> for PositionError {
    fn from(e: LocationShellError) -> Self {
        match e {
            LocationShellError::Position { code, message } => PositionError::new(code, message),
            LocationShellError::NotSupported => {
                PositionError::new(ErrorKind::POSITION_UNAVAILABLE_CODE, e.to_string())
            }
            LocationShellError::PermissionQueryFailed { .. } => PositionError::new(0, e.to_string()),
        }
    }
}

pub type LocationShellResult = Result<LocationOutput, LocationShellError>;
