use std::{
    fs,
    io::{self, BufRead},
    path::Path,
    sync::mpsc,
    time::{Duration, Instant},
};

use anyhow::Context;
use autopilot::{Simulation, Telemetry};
use command::Command;
use sim_worker::{SimCommand, SimHost};

mod command;
mod config;
mod sim_worker;

const PRINT_INTERVAL: Duration = Duration::from_secs(1);

fn main() -> anyhow::Result<()> {
    env_logger::init();

    let config = config::load()?;
    let mut sim = Simulation::new(config).context("failed to create simulation")?;
    if let Some(path) = std::env::args().nth(1) {
        let source = read_script(Path::new(&path))?;
        sim.compile_gains(&source)
            .with_context(|| format!("gain script {path} rejected"))?;
    }

    let mut host = SimHost::new();
    host.start(sim);
    println!("{}", command::HELP);

    // stdin blocks, so lines are forwarded from their own thread
    let (line_tx, line_rx) = mpsc::channel();
    std::thread::spawn(move || {
        for line in io::stdin().lock().lines() {
            if line_tx.send(line).is_err() {
                break;
            }
        }
    });

    let mut last_print = Instant::now();
    loop {
        match line_rx.recv_timeout(PRINT_INTERVAL) {
            Ok(line) => {
                let line = line.context("failed to read stdin")?;
                match command::parse(&line) {
                    Ok(Some(Command::Quit)) => break,
                    Ok(Some(Command::Status)) => print_telemetry(&host.telemetry()),
                    Ok(Some(command)) => {
                        if let Some(command) = to_sim_command(command) {
                            host.send(command)?;
                        }
                    }
                    Ok(None) => {}
                    Err(err) => println!("{err:#}"),
                }
            }
            Err(mpsc::RecvTimeoutError::Timeout) => {}
            // stdin closed
            Err(mpsc::RecvTimeoutError::Disconnected) => break,
        }

        if last_print.elapsed() >= PRINT_INTERVAL {
            print_telemetry(&host.telemetry());
            last_print = Instant::now();
        }
    }

    println!("Stopping");
    host.stop()
}

fn read_script(path: &Path) -> anyhow::Result<String> {
    fs::read_to_string(path).with_context(|| format!("failed to read gain script {}", path.display()))
}

fn to_sim_command(command: Command) -> Option<SimCommand> {
    match command {
        Command::Gains(path) => match read_script(&path) {
            Ok(source) => Some(SimCommand::Gains(source)),
            Err(err) => {
                println!("{err:#}");
                None
            }
        },
        Command::Reset => Some(SimCommand::Reset),
        Command::Stick(stick, value) => Some(SimCommand::Stick(stick, value)),
        Command::Wind(id, enabled) => Some(SimCommand::Wind(id, enabled)),
        Command::Status | Command::Quit => None,
    }
}

fn print_telemetry(telemetry: &Telemetry) {
    println!(
        "alt {:7.2} m | speed {:6.2} m/s | pitch {:6.1}° roll {:6.1}° yaw {:7.1}° | throttle {:5.2}",
        telemetry.altitude,
        telemetry.speed,
        telemetry.pitch.to_degrees(),
        telemetry.roll.to_degrees(),
        telemetry.yaw.to_degrees(),
        telemetry.throttle,
    );
}
