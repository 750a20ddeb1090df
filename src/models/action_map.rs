//! Immutable layered lookup from movement sequences to actions.

use std::collections::HashMap;
use thiserror::Error;
use tracing::warn;

use crate::models::action::{KeyboardAction, KeyboardActionType, LayerLevel, MAX_LAYERS};
use crate::models::layout::LayoutData;
use crate::models::movement::MovementSequence;

/// Load-time failures building an `ActionMap` from layout data.
///
/// These are configuration errors; the decoder refuses the layout and keeps
/// whatever map it had before.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LayoutError {
    /// The layout declares no layers
    #[error("layout '{name}' has no layers")]
    NoLayers {
        /// Layout name
        name: String,
    },
    /// Layers are declared but none has an action
    #[error("layout '{name}' defines no actions")]
    EmptyLayout {
        /// Layout name
        name: String,
    },
    /// A layer index beyond what the decoder supports
    #[error("layer {index} exceeds the maximum of {max} layers", max = MAX_LAYERS)]
    TooManyLayers {
        /// Offending zero-based index
        index: usize,
    },
    /// A custom action whose key code is not a known sentinel
    #[error("sequence {sequence}: key code {key_code} is not a custom key code")]
    InvalidCustomKey {
        /// Sequence of the entry
        sequence: String,
        /// Offending key code
        key_code: i32,
    },
    /// A layer switch targeting a layer the layout does not have
    #[error("sequence {sequence}: layer switch targets layer {target} but only {total} exist")]
    LayerOutOfRange {
        /// Sequence of the entry
        sequence: String,
        /// Requested zero-based layer
        target: i32,
        /// Layers present
        total: usize,
    },
}

/// Mapping from (layer, movement sequence) to action.
///
/// Built once per layout load and never mutated afterwards; a layout change
/// replaces the whole map.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActionMap {
    name: String,
    layers: Vec<HashMap<MovementSequence, KeyboardAction>>,
}

impl ActionMap {
    /// Starts building a map with the given display name.
    pub fn builder(name: impl Into<String>) -> ActionMapBuilder {
        ActionMapBuilder {
            name: name.into(),
            layers: Vec::new(),
        }
    }

    /// Builds a map from parsed layout data.
    pub fn from_layout(layout: &LayoutData) -> Result<Self, LayoutError> {
        if layout.layers.is_empty() {
            return Err(LayoutError::NoLayers {
                name: layout.name.clone(),
            });
        }

        let mut builder = Self::builder(layout.name.clone());
        for layer in &layout.layers {
            builder.declare_layer(layer.layer)?;
            for entry in &layer.actions {
                let action = entry.to_action(layer.layer)?;
                builder.insert(layer.layer, entry.sequence.clone(), action)?;
            }
        }
        builder.build()
    }

    /// Display name of the layout.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Number of layers present (highest declared layer + 1).
    #[must_use]
    pub fn total_layers(&self) -> usize {
        self.layers.len()
    }

    /// Exact lookup; no prefix matching.
    #[must_use]
    pub fn resolve(
        &self,
        layer: LayerLevel,
        sequence: &MovementSequence,
    ) -> Option<&KeyboardAction> {
        self.layers.get(layer.index())?.get(sequence)
    }

    /// Number of entries on a layer.
    #[must_use]
    pub fn layer_len(&self, layer: LayerLevel) -> usize {
        self.layers.get(layer.index()).map_or(0, HashMap::len)
    }

    /// Total entries across all layers.
    #[must_use]
    pub fn len(&self) -> usize {
        self.layers.iter().map(HashMap::len).sum()
    }

    /// Whether the map holds no entries (never true for a built map).
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Entries of one layer sorted by sequence.
    #[must_use]
    pub fn entries(&self, layer: LayerLevel) -> Vec<(&MovementSequence, &KeyboardAction)> {
        let mut entries: Vec<_> = self
            .layers
            .get(layer.index())
            .map(|table| table.iter().collect())
            .unwrap_or_default();
        entries.sort_by(|a, b| a.0.cmp(b.0));
        entries
    }
}

/// Incremental builder for `ActionMap`.
#[derive(Debug)]
pub struct ActionMapBuilder {
    name: String,
    layers: Vec<HashMap<MovementSequence, KeyboardAction>>,
}

impl ActionMapBuilder {
    /// Ensures the layer exists even if it ends up with no entries.
    pub fn declare_layer(&mut self, layer: LayerLevel) -> Result<&mut Self, LayoutError> {
        let index = layer.index();
        if index >= usize::from(MAX_LAYERS) {
            return Err(LayoutError::TooManyLayers { index });
        }
        if self.layers.len() <= index {
            self.layers.resize_with(index + 1, HashMap::new);
        }
        Ok(self)
    }

    /// Registers an action. A repeated sequence on the same layer replaces the
    /// earlier action.
    pub fn insert(
        &mut self,
        layer: LayerLevel,
        sequence: MovementSequence,
        action: KeyboardAction,
    ) -> Result<&mut Self, LayoutError> {
        self.declare_layer(layer)?;
        let table = &mut self.layers[layer.index()];
        if let Some(previous) = table.get(&sequence) {
            warn!(
                layout = %self.name,
                %layer,
                %sequence,
                previous = ?previous.action_type,
                "duplicate movement sequence in layout, keeping the last entry"
            );
        }
        table.insert(sequence, action);
        Ok(self)
    }

    /// Finishes the map, rejecting layouts with no layers or no actions.
    pub fn build(self) -> Result<ActionMap, LayoutError> {
        if self.layers.is_empty() {
            return Err(LayoutError::NoLayers { name: self.name });
        }
        if self.layers.iter().all(HashMap::is_empty) {
            return Err(LayoutError::EmptyLayout { name: self.name });
        }

        let total = self.layers.len();
        for table in &self.layers {
            for (sequence, action) in table {
                if action.action_type == KeyboardActionType::SwitchLayer
                    && (action.key_code < 0 || action.key_code as usize >= total)
                {
                    return Err(LayoutError::LayerOutOfRange {
                        sequence: sequence.to_string(),
                        target: action.key_code,
                        total,
                    });
                }
            }
        }

        Ok(ActionMap {
            name: self.name,
            layers: self.layers,
        })
    }
}
