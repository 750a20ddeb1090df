//! Keypad and circle geometry.
//!
//! All coordinates are keypad-local pixels with the origin at the top-left
//! corner and Y growing downwards, as delivered by the host view.

use serde::{Deserialize, Serialize};

use crate::config::DecoderConfig;

/// A 2D point in keypad-local coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Point {
    /// Horizontal position in pixels
    pub x: f32,
    /// Vertical position in pixels (down is positive)
    pub y: f32,
}

impl Point {
    /// Creates a new point.
    #[must_use]
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    /// Euclidean distance to another point.
    #[must_use]
    pub fn distance_to(self, other: Self) -> f32 {
        (self.x - other.x).hypot(self.y - other.y)
    }

    /// Point at `radius` from `self` in direction `degrees`
    /// (0° = east, 90° = north).
    #[must_use]
    pub fn offset_polar(self, radius: f32, degrees: f32) -> Self {
        let radians = degrees.to_radians();
        Self {
            x: self.x + radius * radians.cos(),
            y: self.y - radius * radians.sin(),
        }
    }
}

/// Screen orientation reported by the host when measuring the keypad.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Orientation {
    /// Taller than wide
    #[default]
    Portrait,
    /// Wider than tall
    Landscape,
}

/// Width and height of the keypad view in pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Dimension {
    /// Width in pixels
    pub width: u32,
    /// Height in pixels
    pub height: u32,
}

impl Dimension {
    /// Creates a new dimension.
    #[must_use]
    pub const fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    /// Whether the point lies inside the view bounds.
    #[must_use]
    pub fn contains(self, point: Point) -> bool {
        point.x >= 0.0
            && point.y >= 0.0
            && point.x <= self.width as f32
            && point.y <= self.height as f32
    }
}

/// Space reserved beside the ring in portrait mode (three 60px side buttons).
const PORTRAIT_SIDE_BUTTONS_PX: f32 = 60.0 * 3.0;

/// Computes the keypad size the host should lay out for the given measure
/// request.
///
/// Landscape keeps the height and derives a 4:3 width. Portrait keeps the
/// width and derives the height from what is left after the side buttons.
#[must_use]
pub fn measure_keypad(width: u32, height: u32, orientation: Orientation) -> Dimension {
    match orientation {
        Orientation::Landscape => {
            Dimension::new((1.33 * height as f32).round() as u32, height)
        }
        Orientation::Portrait => {
            let usable = (width as f32 - PORTRAIT_SIDE_BUTTONS_PX).max(0.0);
            Dimension::new(width, (0.8 * usable).round() as u32)
        }
    }
}

/// Center and radii of the gesture ring.
///
/// Immutable per keypad size; rebuilt on resize.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CircleGeometry {
    /// Ring center
    pub center: Point,
    /// Dead-zone radius: points closer than this are `Center`
    pub inner_radius: f32,
    /// Visual outer radius of the ring
    pub outer_radius: f32,
}

impl CircleGeometry {
    /// Creates geometry from explicit values.
    #[must_use]
    pub const fn new(center: Point, inner_radius: f32, outer_radius: f32) -> Self {
        Self {
            center,
            inner_radius,
            outer_radius,
        }
    }

    /// Derives the ring for a keypad of the given size.
    ///
    /// The ring is centered in the view; the outer radius is `ring_ratio` of
    /// half the shorter side and the dead zone is `dead_zone_ratio` of that.
    #[must_use]
    pub fn for_keypad(dimension: Dimension, config: &DecoderConfig) -> Self {
        let width = dimension.width as f32;
        let height = dimension.height as f32;
        let outer_radius = width.min(height) / 2.0 * config.ring_ratio;

        Self {
            center: Point::new(width / 2.0, height / 2.0),
            inner_radius: outer_radius * config.dead_zone_ratio,
            outer_radius,
        }
    }

    /// Radius halfway between the dead zone and the outer edge.
    #[must_use]
    pub fn mid_radius(&self) -> f32 {
        (self.inner_radius + self.outer_radius) / 2.0
    }

    /// Angle from the center to `point` in degrees in `[0, 360)`,
    /// 0° = east, counterclockwise.
    #[must_use]
    pub fn angle_of(&self, point: Point) -> f32 {
        let dx = point.x - self.center.x;
        let dy = self.center.y - point.y;
        let degrees = dy.atan2(dx).to_degrees();
        let normalized = degrees.rem_euclid(360.0);
        // rem_euclid can round up to exactly 360.0 for tiny negative inputs
        if normalized >= 360.0 {
            0.0
        } else {
            normalized
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn approx(a: f32, b: f32) -> bool {
        (a - b).abs() < 1e-3
    }

    #[test]
    fn test_point_distance() {
        assert!(approx(Point::new(0.0, 0.0).distance_to(Point::new(3.0, 4.0)), 5.0));
    }

    #[test]
    fn test_offset_polar_flips_y() {
        let north = Point::new(100.0, 100.0).offset_polar(10.0, 90.0);
        assert!(approx(north.x, 100.0));
        assert!(approx(north.y, 90.0));

        let east = Point::new(100.0, 100.0).offset_polar(10.0, 0.0);
        assert!(approx(east.x, 110.0));
        assert!(approx(east.y, 100.0));
    }

    #[test]
    fn test_measure_keypad_portrait() {
        let dim = measure_keypad(1080, 2000, Orientation::Portrait);
        assert_eq!(dim.width, 1080);
        assert_eq!(dim.height, 720);
    }

    #[test]
    fn test_measure_keypad_landscape() {
        let dim = measure_keypad(2000, 600, Orientation::Landscape);
        assert_eq!(dim.width, 798);
        assert_eq!(dim.height, 600);
    }

    #[test]
    fn test_measure_keypad_narrow_portrait_clamps() {
        let dim = measure_keypad(100, 500, Orientation::Portrait);
        assert_eq!(dim.height, 0);
    }

    #[test]
    fn test_for_keypad_centers_ring() {
        let config = DecoderConfig::default();
        let geometry = CircleGeometry::for_keypad(Dimension::new(400, 300), &config);

        assert!(approx(geometry.center.x, 200.0));
        assert!(approx(geometry.center.y, 150.0));
        assert!(approx(geometry.outer_radius, 150.0 * config.ring_ratio));
        assert!(approx(
            geometry.inner_radius,
            geometry.outer_radius * config.dead_zone_ratio
        ));
    }

    #[test]
    fn test_angle_of() {
        let geometry = CircleGeometry::new(Point::new(0.0, 0.0), 10.0, 100.0);
        assert!(approx(geometry.angle_of(Point::new(50.0, 0.0)), 0.0));
        assert!(approx(geometry.angle_of(Point::new(0.0, -50.0)), 90.0));
        assert!(approx(geometry.angle_of(Point::new(-50.0, 0.0)), 180.0));
        assert!(approx(geometry.angle_of(Point::new(0.0, 50.0)), 270.0));
    }

    #[test]
    fn test_dimension_contains() {
        let dim = Dimension::new(100, 50);
        assert!(dim.contains(Point::new(10.0, 10.0)));
        assert!(!dim.contains(Point::new(-1.0, 10.0)));
        assert!(!dim.contains(Point::new(10.0, 51.0)));
    }
}
