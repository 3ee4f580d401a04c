//! Command-line flags → [`AppConfig`].

use std::path::PathBuf;
use std::str::FromStr;

use crate::app::AppConfig;
use crate::error::ShooterError;
use crate::stream;

pub const USAGE: &str = "\
usage: balloon_shooter [options]

  --width N          field width in pixels   (default 1280)
  --height N         field height in pixels  (default 720)
  --seed N           balloon spawn seed      (default: random)
  --camera           play with the webcam via helper/hand_landmarks.py
                     (needs python3 with opencv-python and mediapipe)
  --landmarks CMD    run CMD as landmark helper instead of the mouse simulator
  --mirror           mirror helper landmarks horizontally
  --pop-sound PATH   load a pop sound clip at start-up
  --help             show this text";

/// Process exit status for a command line that did not parse.
pub const USAGE_EXIT: u8 = 2;

/// Parsed command line: either a config to run or a request for help.
#[derive(Debug, PartialEq)]
pub enum Command {
    Run(AppConfig),
    Help,
}

pub fn parse<I>(args: I) -> Result<Command, ShooterError>
where
    I: IntoIterator<Item = String>,
{
    let mut cfg  = AppConfig::default();
    let mut args = args.into_iter();

    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--help" | "-h" => return Ok(Command::Help),
            "--mirror"      => cfg.mirror = true,
            "--camera"      => cfg.landmarks = Some(stream::camera_command()),
            "--width"       => cfg.field.width  = number(&arg, args.next())?,
            "--height"      => cfg.field.height = number(&arg, args.next())?,
            "--seed"        => cfg.seed = Some(number(&arg, args.next())?),
            "--landmarks"   => cfg.landmarks = Some(value(&arg, args.next())?),
            "--pop-sound"   => cfg.pop_sound = Some(PathBuf::from(value(&arg, args.next())?)),
            _ => return Err(ShooterError::UnknownArgument(arg.clone())),
        }
    }

    if cfg.field.width == 0 || cfg.field.height == 0 {
        return Err(ShooterError::BadFlagValue {
            flag:  "--width/--height".into(),
            value: format!("{}x{}", cfg.field.width, cfg.field.height),
        });
    }
    Ok(Command::Run(cfg))
}

/// Message for a rejected command line: the error, then the usage text.
pub fn usage_error(e: &ShooterError) -> String {
    format!("{}\n\n{}", e, USAGE)
}

fn value(flag: &str, next: Option<String>) -> Result<String, ShooterError> {
    next.ok_or_else(|| ShooterError::MissingValue(flag.to_string()))
}

fn number<T: FromStr>(flag: &str, next: Option<String>) -> Result<T, ShooterError> {
    let raw = value(flag, next)?;
    raw.trim().parse().map_err(|_| ShooterError::BadFlagValue { flag: flag.to_string(), value: raw })
}

#[cfg(test)]
mod tests {
    use super::*;
    use balloon_field::Field;

    fn args(s: &str) -> Vec<String> {
        s.split_whitespace().map(String::from).collect()
    }

    #[test]
    fn no_flags_is_default() {
        assert_eq!(parse(args("")).unwrap(), Command::Run(AppConfig::default()));
    }

    #[test]
    fn all_flags() {
        let cmd = parse(args(
            "--width 800 --height 600 --seed 7 --landmarks hands.py --mirror --pop-sound pop.wav",
        ))
        .unwrap();
        let Command::Run(cfg) = cmd else { panic!("expected a run config") };
        assert_eq!(cfg.field, Field::new(800, 600));
        assert_eq!(cfg.seed, Some(7));
        assert_eq!(cfg.landmarks.as_deref(), Some("hands.py"));
        assert!(cfg.mirror);
        assert_eq!(cfg.pop_sound, Some(PathBuf::from("pop.wav")));
    }

    #[test]
    fn camera_runs_bundled_helper() {
        let Command::Run(cfg) = parse(args("--camera")).unwrap() else {
            panic!("expected a run config")
        };
        let cmd = cfg.landmarks.expect("camera mode sets a helper command");
        assert!(cmd.ends_with("helper/hand_landmarks.py'"));
        assert!(!cfg.mirror);
    }

    #[test]
    fn usage_error_names_the_problem_then_usage() {
        let e = parse(args("--fullscreen")).unwrap_err();
        let msg = usage_error(&e);
        assert!(msg.starts_with(&e.to_string()));
        assert!(msg.contains("--fullscreen"));
        assert!(msg.ends_with(USAGE));
        assert_ne!(USAGE_EXIT, 0);
        assert_ne!(USAGE_EXIT, 1);
    }

    #[test]
    fn help_wins() {
        assert_eq!(parse(args("--seed 3 --help --bogus")).unwrap(), Command::Help);
    }

    #[test]
    fn bad_values_are_rejected() {
        assert!(matches!(
            parse(args("--width wide")),
            Err(ShooterError::BadFlagValue { .. })
        ));
        assert!(matches!(parse(args("--seed")), Err(ShooterError::MissingValue(_))));
        assert!(matches!(parse(args("--fullscreen")), Err(ShooterError::UnknownArgument(_))));
        assert!(matches!(parse(args("--height 0")), Err(ShooterError::BadFlagValue { .. })));
    }
}
