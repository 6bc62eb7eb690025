//! Console command parsing

use clap::ValueEnum;
use std::{str::FromStr, time::Duration};

use crate::state::Theme;

/// Help text listing every console command
pub const HELP: &str = "\
Commands:
  start                 Start the countdown (idle only)
  pause                 Pause a running countdown
  resume                Resume a paused countdown
  tap                   Start, pause or resume depending on state
  stop                  Stop and clear the countdown
  reset [minutes]       Reset to the given or default duration
  press <secs> <px>     Press the timer for <secs>, moving <px>
  drag <px>             Drag the control by <px> since the drag started
  release <px>          Release a drag of <px>, committing the value
  status                Show timer, control and settings
  clock                 Show the wall clock
  theme <name>          Switch colour theme
  brightness <0..1>     Set display brightness
  help                  Show this help
  quit                  End the session";

/// One line of console input
#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    Start,
    Pause,
    Resume,
    Tap,
    Stop,
    Reset(Option<u64>),
    Press { held: Duration, movement: f64 },
    Drag(f64),
    Release(f64),
    Status,
    Clock,
    Theme(Theme),
    Brightness(f32),
    Help,
    Quit,
}

impl FromStr for Command {
    type Err = String;

    fn from_str(line: &str) -> Result<Self, Self::Err> {
        let mut words = line.split_whitespace();
        let name = words.next().ok_or_else(|| "Empty command".to_string())?;
        let args: Vec<&str> = words.collect();

        let command = match (name.to_lowercase().as_str(), args.as_slice()) {
            ("start", []) => Command::Start,
            ("pause", []) => Command::Pause,
            ("resume", []) => Command::Resume,
            ("tap" | "toggle", []) => Command::Tap,
            ("stop", []) => Command::Stop,
            ("reset", []) => Command::Reset(None),
            ("reset", [minutes]) => Command::Reset(Some(parse_arg(minutes, "minutes")?)),
            ("press", [held, movement]) => {
                let held = parse_finite(held, "seconds")?;
                let held = Duration::try_from_secs_f64(held)
                    .map_err(|e| format!("Invalid press duration '{}': {}", held, e))?;
                Command::Press {
                    held,
                    movement: parse_finite(movement, "pixels")?,
                }
            }
            ("drag", [translation]) => Command::Drag(parse_finite(translation, "pixels")?),
            ("release", [translation]) => Command::Release(parse_finite(translation, "pixels")?),
            ("status", []) => Command::Status,
            ("clock", []) => Command::Clock,
            ("theme", [name]) => Command::Theme(<Theme as ValueEnum>::from_str(name, true)
                .map_err(|_| format!("Unknown theme '{}'", name))?),
            ("brightness", [value]) => Command::Brightness(parse_finite(value, "brightness")? as f32),
            ("help", []) => Command::Help,
            ("quit" | "exit", []) => Command::Quit,
            (name, _) => return Err(format!("Unknown command or arguments: '{}' (try 'help')", name)),
        };
        Ok(command)
    }
}

fn parse_arg<T: FromStr>(value: &str, what: &str) -> Result<T, String> {
    value.parse()
        .map_err(|_| format!("Invalid {}: '{}'", what, value))
}

/// Parse a number, rejecting NaN and infinities
fn parse_finite(value: &str, what: &str) -> Result<f64, String> {
    let number: f64 = parse_arg(value, what)?;
    if number.is_finite() {
        Ok(number)
    } else {
        Err(format!("Invalid {}: '{}' is not a finite number", what, value))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_simple_commands() {
        assert_eq!("start".parse(), Ok(Command::Start));
        assert_eq!("  TAP ".parse(), Ok(Command::Tap));
        assert_eq!("reset".parse(), Ok(Command::Reset(None)));
        assert_eq!("reset 25".parse(), Ok(Command::Reset(Some(25))));
        assert_eq!("exit".parse(), Ok(Command::Quit));
    }

    #[test]
    fn parses_gesture_commands() {
        assert_eq!("drag -400".parse(), Ok(Command::Drag(-400.0)));
        assert_eq!("release 12.5".parse(), Ok(Command::Release(12.5)));
        assert_eq!(
            "press 1.5 10".parse(),
            Ok(Command::Press {
                held: Duration::from_millis(1500),
                movement: 10.0
            })
        );
    }

    #[test]
    fn parses_settings_commands() {
        assert_eq!("theme sunset".parse(), Ok(Command::Theme(Theme::Sunset)));
        assert_eq!("brightness 0.3".parse(), Ok(Command::Brightness(0.3)));
    }

    #[test]
    fn rejects_bad_input() {
        assert!("".parse::<Command>().is_err());
        assert!("launch".parse::<Command>().is_err());
        assert!("reset ten".parse::<Command>().is_err());
        assert!("reset -5".parse::<Command>().is_err());
        assert!("drag".parse::<Command>().is_err());
        assert!("press -1 0".parse::<Command>().is_err());
        assert!("theme neon".parse::<Command>().is_err());
    }

    #[test]
    fn rejects_non_finite_numbers() {
        for line in ["drag NaN", "release inf", "release -inf", "press NaN 0", "press 1 inf", "brightness nan"] {
            assert!(line.parse::<Command>().is_err(), "{} should be rejected", line);
        }
    }
}
