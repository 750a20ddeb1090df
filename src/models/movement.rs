//! Movement sequences: the ordered sector path of one gesture.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

use crate::models::sector::Sector;

/// Reasons a list of sectors is not a valid movement sequence.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SequenceError {
    /// No sectors at all
    #[error("movement sequence must contain at least one sector")]
    Empty,
    /// The same sector twice in a row
    #[error("movement sequence repeats sector {sector} at position {position}")]
    SelfTransition {
        /// Repeated sector
        sector: Sector,
        /// Index of the second occurrence
        position: usize,
    },
    /// A token that names no sector
    #[error("unknown sector '{0}'")]
    UnknownSector(String),
}

/// Ordered, non-empty list of sectors traversed by a single gesture.
///
/// Two sequences are equal iff their sector lists are equal. Consecutive
/// entries are always distinct.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "Vec<Sector>", into = "Vec<Sector>")]
pub struct MovementSequence(Vec<Sector>);

impl MovementSequence {
    /// Builds a sequence, rejecting empty lists and self-transitions.
    pub fn new(sectors: Vec<Sector>) -> Result<Self, SequenceError> {
        if sectors.is_empty() {
            return Err(SequenceError::Empty);
        }
        if let Some(position) = sectors.windows(2).position(|pair| pair[0] == pair[1]) {
            return Err(SequenceError::SelfTransition {
                sector: sectors[position],
                position: position + 1,
            });
        }
        Ok(Self(sectors))
    }

    /// Single-sector sequence.
    #[must_use]
    pub fn single(sector: Sector) -> Self {
        Self(vec![sector])
    }

    /// The sectors in traversal order.
    #[must_use]
    pub fn sectors(&self) -> &[Sector] {
        &self.0
    }

    /// First sector departed into.
    #[must_use]
    pub fn first(&self) -> Sector {
        self.0[0]
    }

    /// Last sector before return to center or lift.
    #[must_use]
    pub fn last(&self) -> Sector {
        self.0[self.0.len() - 1]
    }

    /// Number of sectors.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Always false; kept for API symmetry with collections.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl TryFrom<Vec<Sector>> for MovementSequence {
    type Error = SequenceError;

    fn try_from(sectors: Vec<Sector>) -> Result<Self, Self::Error> {
        Self::new(sectors)
    }
}

impl From<MovementSequence> for Vec<Sector> {
    fn from(sequence: MovementSequence) -> Self {
        sequence.0
    }
}

impl fmt::Display for MovementSequence {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (idx, sector) in self.0.iter().enumerate() {
            if idx > 0 {
                f.write_str(",")?;
            }
            write!(f, "{sector}")?;
        }
        Ok(())
    }
}

/// Parses `"N,E"`, `"N E"` or `"N>E"`.
impl FromStr for MovementSequence {
    type Err = SequenceError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let sectors = s
            .split(|c: char| c == ',' || c == '>' || c.is_whitespace())
            .filter(|token| !token.is_empty())
            .map(str::parse)
            .collect::<Result<Vec<Sector>, _>>()?;
        Self::new(sectors)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_rejects_empty() {
        assert_eq!(MovementSequence::new(vec![]), Err(SequenceError::Empty));
    }

    #[test]
    fn test_new_rejects_self_transition() {
        let err = MovementSequence::new(vec![Sector::N, Sector::E, Sector::E]).unwrap_err();
        assert_eq!(
            err,
            SequenceError::SelfTransition {
                sector: Sector::E,
                position: 2
            }
        );
    }

    #[test]
    fn test_revisiting_sector_later_is_allowed() {
        let seq = MovementSequence::new(vec![Sector::N, Sector::E, Sector::N]).unwrap();
        assert_eq!(seq.len(), 3);
        assert_eq!(seq.first(), Sector::N);
        assert_eq!(seq.last(), Sector::N);
    }

    #[test]
    fn test_equality_is_ordered() {
        let a = MovementSequence::new(vec![Sector::N, Sector::E]).unwrap();
        let b = MovementSequence::new(vec![Sector::E, Sector::N]).unwrap();
        assert_ne!(a, b);
        assert_eq!(a, "N,E".parse().unwrap());
    }

    #[test]
    fn test_parse_separators() {
        let expected = MovementSequence::new(vec![Sector::N, Sector::NE, Sector::E]).unwrap();
        assert_eq!("N,NE,E".parse::<MovementSequence>().unwrap(), expected);
        assert_eq!("n ne e".parse::<MovementSequence>().unwrap(), expected);
        assert_eq!("N>NE>E".parse::<MovementSequence>().unwrap(), expected);
        assert!("".parse::<MovementSequence>().is_err());
        assert!(matches!(
            "N,UP".parse::<MovementSequence>(),
            Err(SequenceError::UnknownSector(token)) if token == "UP"
        ));
    }

    #[test]
    fn test_display() {
        let seq = MovementSequence::new(vec![Sector::S, Sector::SW]).unwrap();
        assert_eq!(seq.to_string(), "S,SW");
    }

    #[test]
    fn test_serde_as_list() {
        let seq: MovementSequence = serde_json::from_str(r#"["N","E"]"#).unwrap();
        assert_eq!(seq.sectors(), &[Sector::N, Sector::E]);
        assert_eq!(serde_json::to_string(&seq).unwrap(), r#"["N","E"]"#);
        assert!(serde_json::from_str::<MovementSequence>("[]").is_err());
    }
}
