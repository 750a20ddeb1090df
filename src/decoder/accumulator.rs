//! Per-gesture state machine turning classified zones into a movement
//! sequence.

use serde::Serialize;
use std::fmt;
use tracing::debug;

use crate::models::{MovementSequence, Sector, Zone};

/// Where the finger is within the current gesture.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(tag = "state", content = "sector", rename_all = "snake_case")]
pub enum GestureState {
    /// No gesture in progress
    #[default]
    Idle,
    /// Finger down inside the dead zone, nothing visited yet
    InCenter,
    /// Finger in a sector; the sequence ends with it
    InSector(Sector),
    /// Back in the dead zone after visiting at least one sector
    Completing,
}

impl fmt::Display for GestureState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GestureState::Idle => f.write_str("idle"),
            GestureState::InCenter => f.write_str("in center"),
            GestureState::InSector(sector) => write!(f, "in sector {sector}"),
            GestureState::Completing => f.write_str("completing"),
        }
    }
}

/// Result of a gesture that ended with touch-up.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CompletedGesture {
    /// Sectors visited; `None` when the finger never left the dead zone
    pub sequence: Option<MovementSequence>,
    /// How many times the finger left the dead zone again after returning
    pub loops: u8,
}

/// Movement sequence accumulator.
///
/// Feeds on zones already classified by the caller; [`Self::last_zone`] is
/// what the caller hands back to the hysteresis classifier.
#[derive(Debug, Clone, Default)]
pub struct GestureAccumulator {
    state: GestureState,
    last_zone: Option<Zone>,
    path: Vec<Sector>,
    loops: u8,
}

impl GestureAccumulator {
    /// Creates an idle accumulator.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Current state.
    #[must_use]
    pub fn state(&self) -> GestureState {
        self.state
    }

    /// Whether a gesture is in progress.
    #[must_use]
    pub fn is_active(&self) -> bool {
        self.state != GestureState::Idle
    }

    /// Zone of the most recent sample, if a gesture is active.
    #[must_use]
    pub fn last_zone(&self) -> Option<Zone> {
        self.last_zone
    }

    /// Sectors appended so far.
    #[must_use]
    pub fn path(&self) -> &[Sector] {
        &self.path
    }

    /// Loops recorded so far.
    #[must_use]
    pub fn loops(&self) -> u8 {
        self.loops
    }

    /// Starts a gesture. A touch-down outside the dead zone counts as
    /// entering that sector straight away.
    pub fn touch_down(&mut self, zone: Zone) {
        self.path.clear();
        self.loops = 0;
        self.state = GestureState::InCenter;
        self.last_zone = Some(Zone::Center);
        self.advance(zone);
    }

    /// Consumes one classified sample. Ignored while idle.
    pub fn advance(&mut self, zone: Zone) {
        let next = match (self.state, zone) {
            (GestureState::Idle, _) => return,
            (GestureState::InCenter, Zone::Center) | (GestureState::Completing, Zone::Center) => {
                self.state
            }
            (GestureState::InCenter, Zone::Sector(sector)) => {
                self.path.push(sector);
                GestureState::InSector(sector)
            }
            (GestureState::InSector(current), Zone::Sector(sector)) => {
                if sector != current {
                    // Samples can skip sectors; fill in the shorter arc
                    self.path.extend(current.path_to(sector));
                }
                GestureState::InSector(sector)
            }
            (GestureState::InSector(_), Zone::Center) => GestureState::Completing,
            (GestureState::Completing, Zone::Sector(sector)) => {
                self.loops = self.loops.saturating_add(1);
                // Passing through the center is not a skip: no reconstruction
                if self.path.last() != Some(&sector) {
                    self.path.push(sector);
                }
                GestureState::InSector(sector)
            }
        };

        if next != self.state {
            debug!(from = %self.state, to = %next, loops = self.loops, "gesture transition");
        }
        self.state = next;
        self.last_zone = Some(zone);
    }

    /// Ends the gesture and hands back what was traced.
    ///
    /// Returns `None` if no gesture was in progress.
    pub fn touch_up(&mut self) -> Option<CompletedGesture> {
        if !self.is_active() {
            return None;
        }
        let path = std::mem::take(&mut self.path);
        let loops = self.loops;
        self.reset();

        // The accumulator never appends a sector equal to the previous one
        let sequence = MovementSequence::new(path).ok();
        Some(CompletedGesture { sequence, loops })
    }

    /// Abandons the gesture without producing anything.
    pub fn cancel(&mut self) {
        if self.is_active() {
            debug!(state = %self.state, "gesture cancelled");
        }
        self.reset();
    }

    fn reset(&mut self) {
        self.state = GestureState::Idle;
        self.last_zone = None;
        self.path.clear();
        self.loops = 0;
    }
}
