//! Directional sectors of the gesture ring.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::models::movement::SequenceError;

/// Number of equal angular divisions of the ring.
pub const SECTOR_COUNT: usize = 8;

/// Angular width of one sector in degrees.
pub const SECTOR_WIDTH_DEGREES: f32 = 360.0 / SECTOR_COUNT as f32;

/// One of the eight 45° divisions of the ring.
///
/// Variants are declared counterclockwise starting at east, so the
/// discriminant is also the sector's position on the ring. Angles follow the
/// mathematical convention (0° = east, 90° = north) with screen Y flipped.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Sector {
    /// East (0°)
    E,
    /// North-east (45°)
    NE,
    /// North (90°)
    N,
    /// North-west (135°)
    NW,
    /// West (180°)
    W,
    /// South-west (225°)
    SW,
    /// South (270°)
    S,
    /// South-east (315°)
    SE,
}

impl Sector {
    /// All sectors in ring order.
    pub const ALL: [Sector; SECTOR_COUNT] = [
        Sector::E,
        Sector::NE,
        Sector::N,
        Sector::NW,
        Sector::W,
        Sector::SW,
        Sector::S,
        Sector::SE,
    ];

    /// Position on the ring (0 = east, counterclockwise).
    #[must_use]
    pub const fn index(self) -> usize {
        self as usize
    }

    /// Sector at the given ring position, wrapping modulo 8.
    #[must_use]
    pub const fn from_index(index: usize) -> Self {
        Self::ALL[index % SECTOR_COUNT]
    }

    /// Direction of the sector's bisector in degrees.
    #[must_use]
    pub fn center_angle(self) -> f32 {
        self.index() as f32 * SECTOR_WIDTH_DEGREES
    }

    /// Next sector counterclockwise.
    #[must_use]
    pub const fn counterclockwise(self) -> Self {
        Self::from_index(self.index() + 1)
    }

    /// Next sector clockwise.
    #[must_use]
    pub const fn clockwise(self) -> Self {
        Self::from_index(self.index() + SECTOR_COUNT - 1)
    }

    /// Number of sector steps between `self` and `other` along the shorter arc.
    #[must_use]
    pub const fn distance(self, other: Self) -> usize {
        let forward = (other.index() + SECTOR_COUNT - self.index()) % SECTOR_COUNT;
        let backward = SECTOR_COUNT - forward;
        if forward <= backward {
            forward
        } else {
            backward
        }
    }

    /// Whether the two sectors share a boundary.
    #[must_use]
    pub const fn is_adjacent(self, other: Self) -> bool {
        self.distance(other) == 1
    }

    /// Sectors a finger crosses moving from `self` to `to`, excluding `self`
    /// and including `to`.
    ///
    /// Walks the shorter rotational arc. Diametrically opposite sectors have
    /// no shorter arc, so the jump is reported directly as `[to]`.
    #[must_use]
    pub fn path_to(self, to: Self) -> Vec<Sector> {
        let forward = (to.index() + SECTOR_COUNT - self.index()) % SECTOR_COUNT;
        let half = SECTOR_COUNT / 2;

        if forward == 0 {
            return Vec::new();
        }
        if forward == half {
            return vec![to];
        }

        let mut path = Vec::with_capacity(half);
        let mut current = self;
        while current != to {
            current = if forward < half {
                current.counterclockwise()
            } else {
                current.clockwise()
            };
            path.push(current);
        }
        path
    }

    /// Short compass label ("N", "SE", ...).
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Sector::E => "E",
            Sector::NE => "NE",
            Sector::N => "N",
            Sector::NW => "NW",
            Sector::W => "W",
            Sector::SW => "SW",
            Sector::S => "S",
            Sector::SE => "SE",
        }
    }
}

impl fmt::Display for Sector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for Sector {
    type Err = SequenceError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized: String = s
            .trim()
            .chars()
            .filter(|c| !matches!(c, '-' | '_' | ' '))
            .collect::<String>()
            .to_ascii_lowercase();

        let sector = match normalized.as_str() {
            "e" | "east" => Sector::E,
            "ne" | "northeast" => Sector::NE,
            "n" | "north" => Sector::N,
            "nw" | "northwest" => Sector::NW,
            "w" | "west" => Sector::W,
            "sw" | "southwest" => Sector::SW,
            "s" | "south" => Sector::S,
            "se" | "southeast" => Sector::SE,
            _ => return Err(SequenceError::UnknownSector(s.trim().to_string())),
        };
        Ok(sector)
    }
}

/// Classification result for a single point: the dead zone or a sector.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Zone {
    /// Inside the dead-zone radius
    Center,
    /// On the ring
    Sector(Sector),
}

impl Zone {
    /// The sector, if this zone is on the ring.
    #[must_use]
    pub const fn sector(self) -> Option<Sector> {
        match self {
            Zone::Center => None,
            Zone::Sector(sector) => Some(sector),
        }
    }

    /// Whether this is the dead zone.
    #[must_use]
    pub const fn is_center(self) -> bool {
        matches!(self, Zone::Center)
    }
}

impl fmt::Display for Zone {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Zone::Center => f.write_str("CENTER"),
            Zone::Sector(sector) => sector.fmt(f),
        }
    }
}

impl From<Sector> for Zone {
    fn from(sector: Sector) -> Self {
        Zone::Sector(sector)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_index_round_trip_and_wrap() {
        for (idx, sector) in Sector::ALL.iter().enumerate() {
            assert_eq!(sector.index(), idx);
            assert_eq!(Sector::from_index(idx), *sector);
        }
        assert_eq!(Sector::from_index(8), Sector::E);
        assert_eq!(Sector::from_index(10), Sector::N);
    }

    #[test]
    fn test_neighbors() {
        assert_eq!(Sector::E.counterclockwise(), Sector::NE);
        assert_eq!(Sector::E.clockwise(), Sector::SE);
        assert_eq!(Sector::SE.counterclockwise(), Sector::E);
        assert!(Sector::N.is_adjacent(Sector::NW));
        assert!(!Sector::N.is_adjacent(Sector::W));
    }

    #[test]
    fn test_distance_uses_shorter_arc() {
        assert_eq!(Sector::N.distance(Sector::N), 0);
        assert_eq!(Sector::N.distance(Sector::E), 2);
        assert_eq!(Sector::E.distance(Sector::N), 2);
        assert_eq!(Sector::NE.distance(Sector::SE), 2);
        assert_eq!(Sector::N.distance(Sector::SE), 3);
        assert_eq!(Sector::N.distance(Sector::S), 4);
    }

    #[test]
    fn test_path_to_adjacent() {
        assert_eq!(Sector::N.path_to(Sector::NE), vec![Sector::NE]);
        assert!(Sector::N.path_to(Sector::N).is_empty());
    }

    #[test]
    fn test_path_to_reconstructs_intermediates() {
        // N -> E is two steps clockwise through NE
        assert_eq!(Sector::N.path_to(Sector::E), vec![Sector::NE, Sector::E]);
        // SE -> NE wraps through E
        assert_eq!(Sector::SE.path_to(Sector::NE), vec![Sector::E, Sector::NE]);
        // W -> N runs clockwise through NW
        assert_eq!(Sector::W.path_to(Sector::N), vec![Sector::NW, Sector::N]);
        // Three steps
        assert_eq!(
            Sector::N.path_to(Sector::SW),
            vec![Sector::NW, Sector::W, Sector::SW]
        );
    }

    #[test]
    fn test_path_to_opposite_is_direct() {
        assert_eq!(Sector::N.path_to(Sector::S), vec![Sector::S]);
        assert_eq!(Sector::NE.path_to(Sector::SW), vec![Sector::SW]);
    }

    #[test]
    fn test_from_str() {
        assert_eq!("N".parse::<Sector>().unwrap(), Sector::N);
        assert_eq!("se".parse::<Sector>().unwrap(), Sector::SE);
        assert_eq!("North-West".parse::<Sector>().unwrap(), Sector::NW);
        assert_eq!(" south ".parse::<Sector>().unwrap(), Sector::S);
        assert!("up".parse::<Sector>().is_err());
    }

    #[test]
    fn test_zone_display() {
        assert_eq!(Zone::Center.to_string(), "CENTER");
        assert_eq!(Zone::Sector(Sector::NW).to_string(), "NW");
        assert_eq!(Zone::from(Sector::S).sector(), Some(Sector::S));
        assert!(Zone::Center.is_center());
    }
}
