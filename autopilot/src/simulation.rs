use dynamics::{Actuators, DynamicsConfig, Integrator, KinematicState};
use nalgebra as na;
use pid::{GainSet, PIDError};
use tuning::{CompileError, Telemetry};
use wind::{WindField, WindSource, WindSourceId};

use crate::{Attitude, AttitudeController, ControlInput, SimConfig, SimulationError};

/// One flight session: the vehicle, its controller, the wind around it and the clock.
///
/// The host owns the value and drives it with [`Simulation::tick`]. Gain changes and
/// resets are applied between ticks simply by calling the matching method.
#[derive(Debug, Clone)]
pub struct Simulation {
    integrator: Integrator,
    controller: AttitudeController,
    state: KinematicState,
    wind_sources: Vec<WindSource>,

    time: f64,
    ticks: u64,
    setpoints: ControlInput,
    commands: Actuators,
}

impl Simulation {
    pub fn new(config: SimConfig) -> Result<Self, SimulationError> {
        let integrator = Integrator::new(config.dynamics)?;
        let controller = AttitudeController::new(&config.gains, &config.controller)?;

        let mut sim = Simulation {
            state: integrator.initial_state(),
            integrator,
            controller,
            wind_sources: Vec::with_capacity(config.wind.len()),
            time: 0.0,
            ticks: 0,
            setpoints: ControlInput::default(),
            commands: Actuators::default(),
        };
        for source in config.wind {
            sim.add_wind_source(source)?;
        }

        log::info!(
            "simulation ready: altitude {:.2} m, {} wind source(s)",
            sim.state.altitude(),
            sim.wind_sources.len()
        );
        Ok(sim)
    }

    /// Advance the session by `elapsed` seconds.
    ///
    /// The step is clamped to the integrator's `max_dt`; a non-positive or non-finite
    /// `elapsed` leaves everything untouched.
    pub fn tick(&mut self, setpoints: &ControlInput, elapsed: f32) -> &KinematicState {
        let dt = self.integrator.effective_dt(elapsed);
        if dt == 0.0 {
            log::trace!("ignoring tick with elapsed time {elapsed}");
            return &self.state;
        }
        if dt < elapsed {
            log::trace!("elapsed time {elapsed} clamped to {dt}");
        }

        self.setpoints = setpoints.sanitized();
        let attitude = Attitude::from(&self.state);
        self.commands = self.controller.update(&attitude, &self.setpoints, dt);

        let wind = self.wind_at_vehicle();
        self.state = self.integrator.advance(self.state, &self.commands, &wind, dt);
        self.time += f64::from(dt);
        self.ticks += 1;

        &self.state
    }

    /// Back to the initial state with a clean controller and clock.
    /// Gains and wind sources are kept.
    pub fn reset(&mut self) {
        self.state = self.integrator.initial_state();
        self.controller.reset();
        self.time = 0.0;
        self.ticks = 0;
        self.setpoints = ControlInput::default();
        self.commands = Actuators::default();
        log::info!("simulation reset");
    }

    /// Compile a gain script against the current telemetry and apply it.
    ///
    /// On error the active gains are left as they were.
    pub fn compile_gains(&mut self, source: &str) -> Result<GainSet, CompileError> {
        let gains = match tuning::compile(source, &self.telemetry()) {
            Ok(gains) => gains,
            Err(err) => {
                log::warn!("gain script rejected, keeping active gains: {err}");
                return Err(err);
            }
        };

        self.controller.update_gains(&gains)?;
        log::info!("gain script applied");
        Ok(gains)
    }

    pub fn update_gains(&mut self, gains: &GainSet) -> Result<(), PIDError> {
        self.controller.update_gains(gains)
    }

    pub fn gains(&self) -> GainSet {
        self.controller.gains()
    }

    pub fn add_wind_source(&mut self, source: WindSource) -> Result<(), SimulationError> {
        source.validate()?;
        if self.wind_sources.iter().any(|s| s.id == source.id) {
            return Err(SimulationError::DuplicateWindSource(source.id));
        }

        log::debug!("wind source {} added at {:?}", source.id, source.position);
        self.wind_sources.push(source);
        Ok(())
    }

    pub fn remove_wind_source(&mut self, id: WindSourceId) -> Result<WindSource, SimulationError> {
        let index = self
            .wind_sources
            .iter()
            .position(|s| s.id == id)
            .ok_or(SimulationError::UnknownWindSource(id))?;
        Ok(self.wind_sources.remove(index))
    }

    pub fn set_wind_enabled(&mut self, id: WindSourceId, enabled: bool) -> Result<(), SimulationError> {
        let source = self
            .wind_sources
            .iter_mut()
            .find(|s| s.id == id)
            .ok_or(SimulationError::UnknownWindSource(id))?;
        source.enabled = enabled;
        Ok(())
    }

    pub fn wind_sources(&self) -> &[WindSource] {
        &self.wind_sources
    }

    pub fn wind_field(&self) -> WindField<'_> {
        WindField::new(&self.wind_sources)
    }

    /// Wind acting on the vehicle right now
    pub fn wind_at_vehicle(&self) -> na::Vector3<f32> {
        wind::wind_at(&self.wind_sources, &self.state.position, self.time as f32)
    }

    pub fn telemetry(&self) -> Telemetry {
        Telemetry {
            altitude: self.state.altitude(),
            speed: self.state.speed(),
            pitch: self.state.pitch(),
            roll: self.state.roll(),
            yaw: self.state.yaw(),
            throttle: self.setpoints.throttle,
        }
    }

    pub fn state(&self) -> &KinematicState {
        &self.state
    }

    pub fn dynamics(&self) -> &DynamicsConfig {
        self.integrator.config()
    }

    /// Simulated seconds since start or the last reset
    pub fn time(&self) -> f64 {
        self.time
    }

    pub fn ticks(&self) -> u64 {
        self.ticks
    }

    /// Setpoints of the last tick, after sanitizing
    pub fn setpoints(&self) -> &ControlInput {
        &self.setpoints
    }

    /// Actuator commands of the last tick
    pub fn commands(&self) -> &Actuators {
        &self.commands
    }
}
