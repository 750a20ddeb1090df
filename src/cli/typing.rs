//! `type` command: decode scripted gestures.

use clap::Args;
use std::path::PathBuf;

use crate::cli::common::{load_action_map, CliError, CliResult};
use crate::cli::session::Session;
use crate::config::Config;
use crate::constants::{DEFAULT_KEYPAD_HEIGHT, DEFAULT_KEYPAD_WIDTH};
use crate::models::{Dimension, MovementSequence};
use crate::services::gesture_synth::synthesize;
use crate::services::text_input::{EditorInfo, FieldClass, ImeAction};

/// Type text by drawing gestures
#[derive(Args, Debug)]
pub struct TypeArgs {
    /// Gesture to draw, e.g. "N,NE"; append "@N" to loop N extra times
    #[arg(long = "gesture", short = 'g', value_name = "SECTORS[@LOOPS]", required = true)]
    gestures: Vec<String>,

    /// Layout file (YAML or JSON); defaults to the configured or built-in layout
    #[arg(long, value_name = "FILE")]
    layout: Option<PathBuf>,

    /// Keypad width in pixels
    #[arg(long, default_value_t = DEFAULT_KEYPAD_WIDTH)]
    width: u32,

    /// Keypad height in pixels
    #[arg(long, default_value_t = DEFAULT_KEYPAD_HEIGHT)]
    height: u32,

    /// Input class of the target field (text, number, phone, datetime)
    #[arg(long, default_value = "text")]
    field: FieldClass,

    /// Editor action the field advertises for enter (go, search, send, next, done, previous)
    #[arg(long, default_value = "unspecified", value_name = "ACTION")]
    ime_action: ImeAction,

    /// The field asks for a plain enter key even when it advertises an action
    #[arg(long)]
    no_enter_action: bool,

    /// Input method id to treat as installed
    #[arg(long = "input-method", value_name = "ID")]
    input_methods: Vec<String>,

    /// Output as JSON
    #[arg(long)]
    json: bool,
}

impl TypeArgs {
    /// Execute the type command
    pub fn execute(&self, config: &Config) -> CliResult<()> {
        let gestures = self
            .gestures
            .iter()
            .map(|gesture| parse_gesture(gesture.as_str()))
            .collect::<CliResult<Vec<_>>>()?;

        let map = load_action_map(self.layout.as_deref(), config)?;
        let mut session = Session::start(
            map,
            config,
            Dimension::new(self.width, self.height),
            EditorInfo::new(self.field).with_ime_action(self.ime_action, self.no_enter_action),
            &self.input_methods,
        );

        let geometry = session.geometry();
        for (sequence, loops) in &gestures {
            session.feed(&synthesize(&geometry, sequence, *loops));
        }

        session.print(self.json)
    }
}

/// Parses `SECTORS[@LOOPS]`.
fn parse_gesture(gesture: &str) -> CliResult<(MovementSequence, u8)> {
    let (sectors, loops) = match gesture.split_once('@') {
        Some((sectors, loops)) => {
            let loops = loops.trim().parse::<u8>().map_err(|_| {
                CliError::validation(format!("Invalid loop count in gesture '{gesture}'"))
            })?;
            (sectors, loops)
        }
        None => (gesture, 0),
    };

    let sequence = sectors
        .parse::<MovementSequence>()
        .map_err(|e| CliError::validation(format!("Invalid gesture '{gesture}': {e}")))?;
    Ok((sequence, loops))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Sector;

    #[test]
    fn test_parse_gesture() {
        let (sequence, loops) = parse_gesture("N,NE").unwrap();
        assert_eq!(sequence.sectors(), &[Sector::N, Sector::NE]);
        assert_eq!(loops, 0);

        let (sequence, loops) = parse_gesture("s@2").unwrap();
        assert_eq!(sequence.sectors(), &[Sector::S]);
        assert_eq!(loops, 2);
    }

    #[test]
    fn test_parse_gesture_errors() {
        assert!(parse_gesture("").is_err());
        assert!(parse_gesture("N,N").is_err());
        assert!(parse_gesture("N@x").is_err());
        assert!(parse_gesture("UP").is_err());
    }
}
