use std::{
    sync::{mpsc, Arc, PoisonError, RwLock},
    thread::JoinHandle,
    time::{Duration, Instant},
};

use anyhow::{anyhow, Context};
use autopilot::{ControlInput, Simulation, Telemetry, WindSourceId};

use crate::command::Stick;

/// Rate the worker ticks the simulation at
pub const TICK_RATE_HZ: u64 = 50;

/// Messages from the host to the worker. Applied between ticks.
#[derive(Debug, Clone, PartialEq)]
pub enum SimCommand {
    /// Gain script source text
    Gains(String),
    Reset,
    Stick(Stick, f32),
    Wind(WindSourceId, bool),
    Stop,
}

pub struct SimWorker {
    sim: Simulation,
    setpoints: ControlInput,
}

impl SimWorker {
    pub fn new(sim: Simulation) -> Self {
        Self {
            sim,
            setpoints: ControlInput::default(),
        }
    }

    pub fn run(
        mut self,
        state: &Arc<RwLock<Telemetry>>,
        to_worker_rx: mpsc::Receiver<SimCommand>,
    ) -> JoinHandle<()> {
        let state = state.clone();
        std::thread::spawn(move || {
            let mut last_loop_time = Instant::now();
            let minimum_elapsed_duration = Duration::from_millis(1000 / TICK_RATE_HZ);
            loop {
                loop {
                    match to_worker_rx.try_recv() {
                        Ok(SimCommand::Stop) | Err(mpsc::TryRecvError::Disconnected) => return,
                        Ok(command) => self.apply(command),
                        Err(mpsc::TryRecvError::Empty) => break,
                    }
                }

                let now = Instant::now();
                let dt = now.duration_since(last_loop_time);
                if dt < minimum_elapsed_duration {
                    std::thread::sleep(minimum_elapsed_duration - dt);
                    continue;
                }
                last_loop_time = now;

                self.tick(dt.as_secs_f32());
                *state.write().unwrap_or_else(PoisonError::into_inner) = self.sim.telemetry();
            }
        })
    }

    fn apply(&mut self, command: SimCommand) {
        match command {
            SimCommand::Gains(source) => match self.sim.compile_gains(&source) {
                Ok(gains) => println!("gains applied:\n{}", gains.to_script()),
                Err(err) => println!("gains rejected: {err}"),
            },
            SimCommand::Reset => {
                self.sim.reset();
                self.setpoints = ControlInput::default();
            }
            SimCommand::Stick(stick, value) => stick.apply(&mut self.setpoints, value),
            SimCommand::Wind(id, enabled) => {
                if let Err(err) = self.sim.set_wind_enabled(id, enabled) {
                    println!("{err}");
                }
            }
            SimCommand::Stop => {}
        }
    }

    fn tick(&mut self, elapsed: f32) {
        let position = self.sim.tick(&self.setpoints, elapsed).position;
        log::trace!("t={:.2}s position={position:?}", self.sim.time());
    }
}

pub struct SimHost {
    state: Arc<RwLock<Telemetry>>,
    to_worker_tx: Option<mpsc::Sender<SimCommand>>,
    worker_thread: Option<JoinHandle<()>>,
}

impl Default for SimHost {
    fn default() -> Self {
        Self::new()
    }
}

impl SimHost {
    pub fn new() -> Self {
        Self {
            state: Arc::new(RwLock::new(Telemetry::default())),
            to_worker_tx: None,
            worker_thread: None,
        }
    }

    /// Latest telemetry published by the worker
    pub fn telemetry(&self) -> Telemetry {
        *self.state.read().unwrap_or_else(PoisonError::into_inner)
    }

    pub fn start(&mut self, sim: Simulation) {
        *self.state.write().unwrap_or_else(PoisonError::into_inner) = sim.telemetry();
        let (to_worker_tx, to_worker_rx) = mpsc::channel();
        self.worker_thread = Some(SimWorker::new(sim).run(&self.state, to_worker_rx));
        self.to_worker_tx = Some(to_worker_tx);
    }

    pub fn send(&self, command: SimCommand) -> anyhow::Result<()> {
        let tx = self.to_worker_tx.as_ref().context("simulation is not running")?;
        tx.send(command).map_err(|_| anyhow!("simulation worker has stopped"))
    }

    pub fn stop(&mut self) -> anyhow::Result<()> {
        if let Some(tx) = self.to_worker_tx.take() {
            let _ = tx.send(SimCommand::Stop);
        }
        if let Some(handle) = self.worker_thread.take() {
            handle.join().map_err(|_| anyhow!("simulation worker panicked"))?;
        }
        Ok(())
    }
}
