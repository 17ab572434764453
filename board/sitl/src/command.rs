use std::path::PathBuf;

use anyhow::{anyhow, bail, Context};
use autopilot::{ControlInput, WindSourceId};

/// Stick a `<stick> <value>` command moves
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Stick {
    Pitch,
    Roll,
    Yaw,
    Throttle,
}

impl Stick {
    fn from_name(name: &str) -> Option<Self> {
        match name {
            "pitch" => Some(Stick::Pitch),
            "roll" => Some(Stick::Roll),
            "yaw" => Some(Stick::Yaw),
            "throttle" => Some(Stick::Throttle),
            _ => None,
        }
    }

    pub fn apply(self, input: &mut ControlInput, value: f32) {
        match self {
            Stick::Pitch => input.pitch = value,
            Stick::Roll => input.roll = value,
            Stick::Yaw => input.yaw = value,
            Stick::Throttle => input.throttle = value,
        }
    }
}

/// A line typed on stdin
#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    Gains(PathBuf),
    Reset,
    Stick(Stick, f32),
    Wind(WindSourceId, bool),
    Status,
    Quit,
}

pub const HELP: &str = "commands: gains <path> | reset | throttle|pitch|roll|yaw <value> | wind <id> on|off | status | quit";

/// Parse one stdin line. Blank lines yield `None`.
pub fn parse(line: &str) -> anyhow::Result<Option<Command>> {
    let words: Vec<&str> = line.split_whitespace().collect();

    let command = match words.as_slice() {
        [] => return Ok(None),
        ["gains", path] => Command::Gains(PathBuf::from(*path)),
        ["reset"] => Command::Reset,
        ["status"] => Command::Status,
        ["quit" | "exit"] => Command::Quit,
        ["wind", id, state] => {
            let id: WindSourceId = id.parse().with_context(|| format!("invalid wind source id '{id}'"))?;
            let enabled = match *state {
                "on" => true,
                "off" => false,
                _ => bail!("wind source state must be 'on' or 'off', got '{state}'"),
            };
            Command::Wind(id, enabled)
        }
        [name, value] => {
            let stick = Stick::from_name(name).ok_or_else(|| anyhow!("unrecognized command '{name}'. {HELP}"))?;
            let value: f32 = value.parse().with_context(|| format!("invalid {name} value '{value}'"))?;
            Command::Stick(stick, value)
        }
        _ => bail!("unrecognized command '{}'. {HELP}", line.trim()),
    };
    Ok(Some(command))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_commands() {
        assert_eq!(parse("   ").unwrap(), None);
        assert_eq!(parse("reset").unwrap(), Some(Command::Reset));
        assert_eq!(parse(" quit ").unwrap(), Some(Command::Quit));
        assert_eq!(
            parse("gains tune.txt").unwrap(),
            Some(Command::Gains(PathBuf::from("tune.txt")))
        );
        assert_eq!(parse("throttle 0.5").unwrap(), Some(Command::Stick(Stick::Throttle, 0.5)));
        assert_eq!(parse("yaw -1").unwrap(), Some(Command::Stick(Stick::Yaw, -1.0)));
        assert_eq!(parse("wind 3 off").unwrap(), Some(Command::Wind(3, false)));
    }

    #[test]
    fn test_reject_malformed() {
        assert!(parse("throttle").is_err());
        assert!(parse("throttle full").is_err());
        assert!(parse("reset now").is_err());
        assert!(parse("gains a b").is_err());
        assert!(parse("land").is_err());
        assert!(parse("wind 3 maybe").is_err());
        assert!(parse("wind north on").is_err());
    }

    #[test]
    fn test_stick_apply() {
        let mut input = ControlInput::default();
        Stick::Roll.apply(&mut input, 0.3);
        Stick::Throttle.apply(&mut input, 0.9);
        assert_eq!(input, ControlInput::new(0.3, 0.0, 0.0, 0.9));
    }
}
