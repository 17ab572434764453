use std::{fs, path::Path};

use anyhow::Context;
use autopilot::SimConfig;

/// Environment variable naming an optional YAML session config
pub const CONFIG_ENV: &str = "SITL_CONFIG";

/// Load the session config from `SITL_CONFIG`, or the defaults when it is unset.
pub fn load() -> anyhow::Result<SimConfig> {
    match std::env::var_os(CONFIG_ENV) {
        Some(path) => load_file(Path::new(&path)),
        None => {
            log::info!("{CONFIG_ENV} not set, using default config");
            Ok(SimConfig::default())
        }
    }
}

pub fn load_file(path: &Path) -> anyhow::Result<SimConfig> {
    let contents = fs::read_to_string(path).with_context(|| format!("failed to read {}", path.display()))?;
    let config = parse(&contents).with_context(|| format!("invalid config in {}", path.display()))?;
    log::info!("loaded config from {}", path.display());
    Ok(config)
}

pub fn parse(contents: &str) -> anyhow::Result<SimConfig> {
    Ok(serde_yaml::from_str(contents)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use autopilot::{Gains, Variability};

    #[test]
    fn test_partial_config() {
        let yaml = r#"
dynamics:
  mass: 1.5
  initial_altitude: 10.0
gains:
  yaw: { kp: 1.0, ki: 0.0, kd: 0.2 }
wind:
  - id: 7
    position: [0.0, 5.0, 0.0]
    radius: 20.0
    base_force: 3.0
    direction: 1.57
    enabled: true
    variability: { kind: sinusoidal, frequency: 0.5, amplitude: 1.0 }
"#;
        let config = parse(yaml).unwrap();
        assert_eq!(config.dynamics.mass, 1.5);
        assert_eq!(config.dynamics.initial_altitude, 10.0);
        assert_eq!(config.dynamics.gravity, 9.81);
        assert_eq!(config.gains.yaw, Gains::new(1.0, 0.0, 0.2));
        assert_eq!(config.gains.pitch, SimConfig::default().gains.pitch);
        assert_eq!(config.wind.len(), 1);
        assert_eq!(
            config.wind[0].variability,
            Variability::Sinusoidal {
                frequency: 0.5,
                amplitude: 1.0
            }
        );
    }

    #[test]
    fn test_empty_config_is_default() {
        assert_eq!(parse("{}").unwrap(), SimConfig::default());
    }

    #[test]
    fn test_malformed_config() {
        assert!(parse("dynamics: [1, 2").is_err());
        assert!(parse("dynamics:\n  mass: heavy").is_err());
    }
}
