use dynamics::DynamicsConfig;
use pid::GainSet;
use serde::{Deserialize, Serialize};
use wind::WindSource;

use crate::ControllerConfig;

/// Everything needed to start a session. Every section may be omitted.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimConfig {
    pub dynamics: DynamicsConfig,
    pub controller: ControllerConfig,
    /// Active gains at session start
    pub gains: GainSet,
    pub wind: Vec<WindSource>,
}
