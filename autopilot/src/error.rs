use dynamics::DynamicsError;
use pid::PIDError;
use thiserror::Error;
use wind::{WindError, WindSourceId};

#[derive(Error, Debug, Clone, PartialEq)]
pub enum SimulationError {
    #[error("invalid dynamics config: {0}")]
    Dynamics(#[from] DynamicsError),

    #[error("invalid controller setup: {0}")]
    Controller(#[from] PIDError),

    #[error("invalid wind source: {0}")]
    Wind(#[from] WindError),

    #[error("wind source {0} already exists")]
    DuplicateWindSource(WindSourceId),

    #[error("no wind source with id {0}")]
    UnknownWindSource(WindSourceId),
}
