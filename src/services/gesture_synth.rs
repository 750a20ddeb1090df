//! Synthetic touch streams for scripted gestures.
//!
//! Produces the events a finger would generate drawing a movement sequence:
//! down at the center, through the midpoint of each sector, back to the
//! center, and up. Used by the `type` command and by tests.

use crate::decoder::{TouchEvent, TouchPhase};
use crate::models::{CircleGeometry, MovementSequence, Point};

/// Milliseconds between synthesized samples.
const SAMPLE_INTERVAL_MS: u64 = 16;

/// Events for one gesture drawing `sequence`, looped `loops` extra times.
///
/// Each extra loop dips back out from the center into the last sector of the
/// sequence, which escalates the layer without extending the path.
/// Consecutive sectors that are not neighbours are jumped in one sample, so
/// the decoder fills in the skipped sectors as it would for a fast swipe.
#[must_use]
pub fn synthesize(
    geometry: &CircleGeometry,
    sequence: &MovementSequence,
    loops: u8,
) -> Vec<TouchEvent> {
    let radius = geometry.mid_radius();
    let waypoints: Vec<Point> = sequence
        .sectors()
        .iter()
        .map(|sector| geometry.center.offset_polar(radius, sector.center_angle()))
        .collect();

    let mut events = Vec::with_capacity(waypoints.len() + 2 * usize::from(loops) + 3);
    let mut clock = 0;
    let mut push = |phase: TouchPhase, point: Point| {
        events.push(TouchEvent::new(phase, point.x, point.y, clock));
        clock += SAMPLE_INTERVAL_MS;
    };

    push(TouchPhase::Down, geometry.center);
    for point in &waypoints {
        push(TouchPhase::Move, *point);
    }
    push(TouchPhase::Move, geometry.center);
    if let Some(last) = waypoints.last() {
        for _ in 0..loops {
            push(TouchPhase::Move, *last);
            push(TouchPhase::Move, geometry.center);
        }
    }
    push(TouchPhase::Up, geometry.center);
    events
}

/// Events for a gesture drawing `sequence` and then cancelled before lift.
#[must_use]
pub fn synthesize_cancelled(
    geometry: &CircleGeometry,
    sequence: &MovementSequence,
) -> Vec<TouchEvent> {
    let mut events = synthesize(geometry, sequence, 0);
    if let Some(last) = events.last_mut() {
        last.phase = TouchPhase::Cancel;
    }
    events
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Sector;

    fn geometry() -> CircleGeometry {
        CircleGeometry::new(Point::new(100.0, 100.0), 20.0, 80.0)
    }

    #[test]
    fn test_shape_of_single_gesture() {
        let seq: MovementSequence = "N,E".parse().unwrap();
        let events = synthesize(&geometry(), &seq, 0);

        let phases: Vec<_> = events.iter().map(|e| e.phase).collect();
        assert_eq!(
            phases,
            vec![
                TouchPhase::Down,
                TouchPhase::Move,
                TouchPhase::Move,
                TouchPhase::Move,
                TouchPhase::Up
            ]
        );

        // N midpoint sits straight above the center
        assert!((events[1].x - 100.0).abs() < 0.01);
        assert!((events[1].y - 50.0).abs() < 0.01);
        assert!(events.windows(2).all(|w| w[0].timestamp_ms < w[1].timestamp_ms));
    }

    #[test]
    fn test_loops_revisit_last_sector() {
        let seq: MovementSequence = "S,SW".parse().unwrap();
        let events = synthesize(&geometry(), &seq, 2);
        assert_eq!(events.len(), 1 + 3 + 2 * 2 + 1);
        assert_eq!(events[4], TouchEvent { timestamp_ms: events[4].timestamp_ms, ..events[2] });
    }

    #[test]
    fn test_cancelled_gesture_ends_with_cancel() {
        let seq = MovementSequence::single(Sector::S);
        let events = synthesize_cancelled(&geometry(), &seq);
        assert_eq!(events.last().map(|e| e.phase), Some(TouchPhase::Cancel));
    }
}
