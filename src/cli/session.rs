//! Decoding session shared by the `type` and `replay` commands.

use serde::Serialize;

use crate::cli::common::{print_json, CliResult};
use crate::config::Config;
use crate::decoder::{Decoder, ModifierState, Resolution, TouchEvent};
use crate::models::{ActionMap, CircleGeometry, Dimension};
use crate::services::text_input::{EditorInfo, KeypadKind, SinkEvent, TextBuffer};

/// A decoder wired to an in-memory text buffer.
pub struct Session {
    layout: String,
    decoder: Decoder,
    sink: TextBuffer,
    resolutions: Vec<Resolution>,
}

#[derive(Serialize, Debug)]
struct SessionOutput<'a> {
    layout: &'a str,
    text: &'a str,
    keypad: KeypadKind,
    hidden: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    active_input_method: Option<&'a str>,
    modifiers: ModifierState,
    gestures: &'a [Resolution],
    log: &'a [SinkEvent],
}

impl Session {
    /// Starts an input session on a keypad of the given size.
    pub fn start(
        map: ActionMap,
        config: &Config,
        dimension: Dimension,
        editor: EditorInfo,
        input_methods: &[String],
    ) -> Self {
        let geometry = CircleGeometry::for_keypad(dimension, &config.decoder);
        let layout = map.name().to_string();
        let mut decoder = Decoder::new(map, geometry, &config.decoder);
        decoder.set_emoticon_keyboard(config.input.emoticon_keyboard.clone());

        let mut sink = TextBuffer::new();
        for id in input_methods {
            sink.install_input_method(id.clone());
        }
        decoder.start_input_session(editor, &mut sink);

        Self {
            layout,
            decoder,
            sink,
            resolutions: Vec::new(),
        }
    }

    /// Ring used for synthesizing gestures.
    pub fn geometry(&self) -> CircleGeometry {
        *self.decoder.geometry()
    }

    /// Feeds events through the decoder.
    pub fn feed(&mut self, events: &[TouchEvent]) {
        for event in events {
            if let Some(resolution) = self.decoder.handle(event, &mut self.sink) {
                self.resolutions.push(resolution);
            }
        }
    }

    /// Prints the outcome.
    pub fn print(&self, json: bool) -> CliResult<()> {
        let output = SessionOutput {
            layout: &self.layout,
            text: self.sink.text(),
            keypad: self.sink.keypad(),
            hidden: self.sink.is_hidden(),
            active_input_method: self.sink.active_input_method(),
            modifiers: self.decoder.modifier_state(),
            gestures: &self.resolutions,
            log: self.sink.log(),
        };

        if json {
            return print_json(&output);
        }

        println!("Layout: {}", output.layout);
        for resolution in output.gestures {
            let sequence = resolution
                .sequence
                .as_ref()
                .map_or_else(|| "(tap)".to_string(), ToString::to_string);
            let fallback = if resolution.fell_back { " via first layer" } else { "" };
            println!(
                "  {:<16} {} layer{}: {:?}",
                sequence, resolution.layer, fallback, resolution.effect
            );
        }
        println!("Text: {:?}", output.text);
        println!("Keypad: {}", output.keypad);
        if output.hidden {
            println!("Keyboard hidden");
        }
        Ok(())
    }
}
