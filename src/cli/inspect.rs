//! `inspect` command: summary of a layout's action map.

use clap::Args;
use serde::Serialize;
use std::path::PathBuf;

use crate::cli::common::{load_action_map, print_json, CliResult};
use crate::config::Config;
use crate::models::{ActionMap, KeyboardActionType, LayerLevel};

/// Inspect a layout
#[derive(Args, Debug)]
pub struct InspectArgs {
    /// Layout file (YAML or JSON); defaults to the configured or built-in layout
    #[arg(long, value_name = "FILE")]
    layout: Option<PathBuf>,

    /// Output as JSON
    #[arg(long)]
    json: bool,
}

#[derive(Serialize, Debug)]
struct InspectOutput {
    name: String,
    total_layers: usize,
    total_entries: usize,
    layers: Vec<LayerOutput>,
}

#[derive(Serialize, Debug)]
struct LayerOutput {
    index: usize,
    name: String,
    entries: usize,
    actions: Vec<ActionOutput>,
}

#[derive(Serialize, Debug)]
struct ActionOutput {
    sequence: String,
    #[serde(rename = "type")]
    action_type: KeyboardActionType,
    #[serde(skip_serializing_if = "String::is_empty")]
    text: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    caps_lock_text: String,
    key_code: i32,
    #[serde(skip_serializing_if = "Option::is_none")]
    custom: Option<String>,
}

impl InspectArgs {
    /// Execute the inspect command
    pub fn execute(&self, config: &Config) -> CliResult<()> {
        let map = load_action_map(self.layout.as_deref(), config)?;
        let output = build_output(&map);

        if self.json {
            print_json(&output)?;
        } else {
            print_human_readable(&output);
        }
        Ok(())
    }
}

fn build_output(map: &ActionMap) -> InspectOutput {
    let layers = (0..map.total_layers())
        .map(|index| {
            let layer = LayerLevel::new(index as u8);
            let actions = map
                .entries(layer)
                .into_iter()
                .map(|(sequence, action)| ActionOutput {
                    sequence: sequence.to_string(),
                    action_type: action.action_type,
                    text: action.text.clone(),
                    caps_lock_text: action.caps_lock_text.clone(),
                    key_code: action.key_code,
                    custom: match action.action_type {
                        KeyboardActionType::CustomKey | KeyboardActionType::InputKey => {
                            action.custom_keycode().map(|code| code.to_string())
                        }
                        _ => None,
                    },
                })
                .collect::<Vec<_>>();
            LayerOutput {
                index,
                name: layer.to_string(),
                entries: actions.len(),
                actions,
            }
        })
        .collect();

    InspectOutput {
        name: map.name().to_string(),
        total_layers: map.total_layers(),
        total_entries: map.len(),
        layers,
    }
}

fn print_human_readable(output: &InspectOutput) {
    println!("Layout: {}", output.name);
    println!(
        "Layers: {} ({} entries)",
        output.total_layers, output.total_entries
    );

    for layer in &output.layers {
        println!();
        println!("Layer {} ({}): {} entries", layer.index, layer.name, layer.entries);
        for action in &layer.actions {
            let detail = match (&action.custom, action.action_type) {
                (Some(custom), _) => custom.clone(),
                (None, KeyboardActionType::InputText) => format!("{:?}", action.text),
                (None, action_type) => format!("{action_type:?} {}", action.key_code),
            };
            println!("  {:<16} {}", action.sequence, detail);
        }
    }
}
