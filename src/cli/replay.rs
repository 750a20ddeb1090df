//! `replay` command: decode a recorded touch trace.

use clap::Args;
use std::path::PathBuf;

use crate::cli::common::{load_action_map, CliError, CliResult};
use crate::cli::session::Session;
use crate::config::Config;
use crate::constants::{DEFAULT_KEYPAD_HEIGHT, DEFAULT_KEYPAD_WIDTH};
use crate::models::Dimension;
use crate::parser::parse_trace_file;
use crate::services::text_input::{EditorInfo, FieldClass, ImeAction};

/// Replay a recorded touch trace
#[derive(Args, Debug)]
pub struct ReplayArgs {
    /// Trace file (YAML or JSON)
    #[arg(long, value_name = "FILE")]
    trace: PathBuf,

    /// Layout file (YAML or JSON); defaults to the configured or built-in layout
    #[arg(long, value_name = "FILE")]
    layout: Option<PathBuf>,

    /// Keypad width in pixels (overrides the trace)
    #[arg(long)]
    width: Option<u32>,

    /// Keypad height in pixels (overrides the trace)
    #[arg(long)]
    height: Option<u32>,

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

impl ReplayArgs {
    /// Execute the replay command
    pub fn execute(&self, config: &Config) -> CliResult<()> {
        if !self.trace.exists() {
            return Err(CliError::io(format!(
                "Trace file not found: {}",
                self.trace.display()
            )));
        }
        let trace = parse_trace_file(&self.trace)
            .map_err(|e| CliError::validation(format!("{e:#}")))?;

        let width = self.width.or(trace.width).unwrap_or(DEFAULT_KEYPAD_WIDTH);
        let height = self.height.or(trace.height).unwrap_or(DEFAULT_KEYPAD_HEIGHT);

        let map = load_action_map(self.layout.as_deref(), config)?;
        let mut session = Session::start(
            map,
            config,
            Dimension::new(width, height),
            EditorInfo::new(self.field).with_ime_action(self.ime_action, self.no_enter_action),
            &self.input_methods,
        );
        session.feed(&trace.events);
        session.print(self.json)
    }
}
