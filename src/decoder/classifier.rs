//! Sector classification of touch points.

use crate::config::DecoderConfig;
use crate::models::{CircleGeometry, Point, Sector, Zone, SECTOR_COUNT, SECTOR_WIDTH_DEGREES};

/// Maps a point to the dead zone or one of the eight sectors.
///
/// Pure and total: every point, including ones outside the outer radius,
/// lands in exactly one zone. `rotation_offset` shifts the sector grid so
/// that sector bisectors sit on the compass directions; with the default
/// half-sector offset, east covers `[-22.5°, 22.5°)`.
#[must_use]
pub fn classify(point: Point, geometry: &CircleGeometry, rotation_offset: f32) -> Zone {
    if point.distance_to(geometry.center) < geometry.inner_radius {
        return Zone::Center;
    }

    let angle = geometry.angle_of(point);
    Zone::Sector(sector_for_angle(angle, rotation_offset))
}

/// Sector whose arc contains `angle` (degrees, 0° = east, counterclockwise).
#[must_use]
pub fn sector_for_angle(angle: f32, rotation_offset: f32) -> Sector {
    let shifted = (angle + rotation_offset).rem_euclid(360.0);
    let index = (shifted / SECTOR_WIDTH_DEGREES).floor() as usize;
    // A shifted angle that rounds to exactly 360.0 wraps back to index 0
    Sector::from_index(index % SECTOR_COUNT)
}

/// Signed angular difference `a - b` folded into `(-180, 180]`.
fn angular_difference(a: f32, b: f32) -> f32 {
    let diff = (a - b).rem_euclid(360.0);
    if diff > 180.0 {
        diff - 360.0
    } else {
        diff
    }
}

/// Stateful classifier that damps flicker near sector boundaries.
///
/// Once a sector has been entered it is kept until the finger is more than
/// `hysteresis` degrees past that sector's edge, so a finger resting on a
/// spoke does not bounce between neighbours. The dead-zone edge gets the same
/// treatment radially: leaving the center needs `inner + band`, returning to
/// it needs `inner - band`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SectorClassifier {
    geometry: CircleGeometry,
    rotation_offset: f32,
    hysteresis: f32,
    radial_hysteresis: f32,
}

impl SectorClassifier {
    /// Creates a classifier for the given ring.
    #[must_use]
    pub fn new(geometry: CircleGeometry, config: &DecoderConfig) -> Self {
        Self {
            geometry,
            rotation_offset: config.rotation_offset_degrees,
            hysteresis: config.hysteresis_degrees,
            radial_hysteresis: config.dead_zone_hysteresis_ratio,
        }
    }

    /// Ring the classifier works against.
    #[must_use]
    pub fn geometry(&self) -> &CircleGeometry {
        &self.geometry
    }

    /// Replaces the ring after a resize.
    pub fn set_geometry(&mut self, geometry: CircleGeometry) {
        self.geometry = geometry;
    }

    /// Memoryless classification.
    #[must_use]
    pub fn classify(&self, point: Point) -> Zone {
        classify(point, &self.geometry, self.rotation_offset)
    }

    /// Classification that keeps `previous` while the point is within the
    /// hysteresis band around it.
    #[must_use]
    pub fn classify_from(&self, point: Point, previous: Zone) -> Zone {
        let distance = point.distance_to(self.geometry.center);
        let inner = self.geometry.inner_radius;
        let band = inner * self.radial_hysteresis;
        let angle = self.geometry.angle_of(point);

        let raw = match previous {
            Zone::Center if distance < inner + band => return Zone::Center,
            Zone::Sector(_) if distance >= inner - band => {
                Zone::Sector(sector_for_angle(angle, self.rotation_offset))
            }
            _ => self.classify(point),
        };

        let (Zone::Sector(current), Zone::Sector(new)) = (previous, raw) else {
            return raw;
        };
        if current == new || !current.is_adjacent(new) {
            return raw;
        }

        let center = current.center_angle() - self.rotation_offset + SECTOR_WIDTH_DEGREES / 2.0;
        let half_width = SECTOR_WIDTH_DEGREES / 2.0;
        if angular_difference(angle, center).abs() <= half_width + self.hysteresis {
            previous
        } else {
            raw
        }
    }
}
