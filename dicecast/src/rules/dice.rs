use derive_more::{Deref, Display, Into};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::statistics::roller::Roller;

/// Number of faces on every die this crate rolls.
pub const SIDES: u32 = 6;

/// Fewest dice a single cast may roll.
pub const MIN_DICE: u32 = 1;

/// Most dice a single cast may roll. The glyph row stops fitting the window past this.
pub const MAX_DICE: u32 = 5;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DiceCountError {
    #[error("`{0}` is not a whole number")]
    NotANumber(String),
    #[error("cannot roll {0} dice, expected between {min} and {max}", min = MIN_DICE, max = MAX_DICE)]
    OutOfRange(String),
}

/// A validated number of dice in `MIN_DICE..=MAX_DICE`.
///
/// The only ways to obtain one are [`str::parse`] and [`TryFrom<u32>`], so any
/// `DiceCount` in hand is already known to be rollable.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Deref, Display, Into, Serialize,
    Deserialize,
)]
#[serde(try_from = "u32", into = "u32")]
pub struct DiceCount(u32);

impl DiceCount {
    pub fn get(self) -> u32 {
        self.0
    }

    /// Every valid dice count, smallest first.
    pub fn all() -> impl Iterator<Item = DiceCount> {
        (MIN_DICE..=MAX_DICE).map(DiceCount)
    }

    /// Smallest total this many dice can show.
    pub fn min_total(self) -> u32 {
        self.0
    }

    /// Largest total this many dice can show.
    pub fn max_total(self) -> u32 {
        self.0 * SIDES
    }
}

impl TryFrom<u32> for DiceCount {
    type Error = DiceCountError;

    fn try_from(value: u32) -> Result<Self, Self::Error> {
        if (MIN_DICE..=MAX_DICE).contains(&value) {
            Ok(DiceCount(value))
        } else {
            Err(DiceCountError::OutOfRange(value.to_string()))
        }
    }
}

impl std::str::FromStr for DiceCount {
    type Err = DiceCountError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        // Signs and decimal points are rejected here rather than by `parse`, which
        // would happily accept "+3".
        if s.is_empty() || !s.chars().all(|c| c.is_ascii_digit()) {
            return Err(DiceCountError::NotANumber(s.to_string()));
        }
        match s.parse::<u32>() {
            Ok(value) => DiceCount::try_from(value),
            Err(_) => Err(DiceCountError::OutOfRange(s.to_string())),
        }
    }
}

/// The value showing on a single die, always in `1..=SIDES`.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Deref, Display, Into, Serialize,
    Deserialize,
)]
#[serde(try_from = "u32", into = "u32")]
pub struct Face(u32);

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{0} is not a face of a d{sides}", sides = SIDES)]
pub struct FaceError(u32);

impl Face {
    pub fn new(value: u32) -> Option<Self> {
        (1..=SIDES).contains(&value).then_some(Face(value))
    }

    pub fn random(roller: &mut Roller) -> Self {
        Face(roller.d(SIDES))
    }

    pub fn value(self) -> u32 {
        self.0
    }

    /// Zero-based position of this face, for indexing per-face tables.
    pub fn index(self) -> usize {
        (self.0 - 1) as usize
    }
}

impl TryFrom<u32> for Face {
    type Error = FaceError;

    fn try_from(value: u32) -> Result<Self, Self::Error> {
        Face::new(value).ok_or(FaceError(value))
    }
}

/// An ordered set of faces produced by one throw of the dice.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct Roll {
    faces: Vec<Face>,
}

impl Roll {
    pub fn random(dice: DiceCount, roller: &mut Roller) -> Self {
        (0..dice.get()).map(|_| Face::random(roller)).collect()
    }

    pub fn faces(&self) -> &[Face] {
        &self.faces
    }

    pub fn len(&self) -> usize {
        self.faces.len()
    }

    pub fn is_empty(&self) -> bool {
        self.faces.is_empty()
    }

    pub fn total(&self) -> u32 {
        self.faces.iter().map(|face| face.value()).sum()
    }

    pub fn pretty_print(&self, f: &mut impl std::fmt::Write) -> std::fmt::Result {
        write!(f, "Rolled {}d{}: [", self.faces.len(), SIDES)?;
        for (i, face) in self.faces.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{}", face)?;
        }
        write!(f, "] = {}", self.total())
    }
}

impl FromIterator<Face> for Roll {
    fn from_iter<I: IntoIterator<Item = Face>>(iter: I) -> Self {
        Roll {
            faces: iter.into_iter().collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_valid_counts() {
        for (input, expected) in [("1", 1), ("3", 3), ("5", 5), (" 2 ", 2), ("04", 4)] {
            let dice: DiceCount = input.parse().unwrap();
            assert_eq!(dice.get(), expected);
        }
    }

    #[test]
    fn test_parse_rejects_invalid_counts() {
        assert_eq!(
            "0".parse::<DiceCount>(),
            Err(DiceCountError::OutOfRange("0".into()))
        );
        assert_eq!(
            "6".parse::<DiceCount>(),
            Err(DiceCountError::OutOfRange("6".into()))
        );
        assert_eq!(
            "abc".parse::<DiceCount>(),
            Err(DiceCountError::NotANumber("abc".into()))
        );
        assert_eq!(
            "-1".parse::<DiceCount>(),
            Err(DiceCountError::NotANumber("-1".into()))
        );
        assert!("".parse::<DiceCount>().is_err());
        assert!("+3".parse::<DiceCount>().is_err());
        assert!("2.5".parse::<DiceCount>().is_err());
        assert!("99999999999999999999".parse::<DiceCount>().is_err());
    }

    #[test]
    fn test_dice_count_serde_validates() {
        let dice: DiceCount = serde_json::from_str("4").unwrap();
        assert_eq!(dice.get(), 4);
        assert_eq!(serde_json::to_string(&dice).unwrap(), "4");
        assert!(serde_json::from_str::<DiceCount>("9").is_err());
    }

    #[test]
    fn test_dice_count_totals() {
        let dice = DiceCount::try_from(3).unwrap();
        assert_eq!(dice.min_total(), 3);
        assert_eq!(dice.max_total(), 18);
        assert_eq!(DiceCount::all().count(), 5);
    }

    #[test]
    fn test_face_bounds() {
        assert!(Face::new(0).is_none());
        assert!(Face::new(7).is_none());
        assert_eq!(Face::new(6).unwrap().index(), 5);
        assert!(serde_json::from_str::<Face>("7").is_err());
    }

    #[test]
    fn test_random_roll() {
        let mut roller = Roller::test_rng();
        for dice in DiceCount::all() {
            for _ in 0..1000 {
                let roll = Roll::random(dice, &mut roller);
                assert_eq!(roll.len(), dice.get() as usize);
                assert!(roll.faces().iter().all(|f| (1..=SIDES).contains(&f.value())));
                let total = roll.total();
                assert!(total >= dice.min_total() && total <= dice.max_total());
            }
        }
    }

    #[test]
    fn test_pretty_print() {
        let roll: Roll = [3, 5, 1].into_iter().filter_map(Face::new).collect();
        let mut buf = String::new();
        roll.pretty_print(&mut buf).unwrap();
        assert_eq!(buf, "Rolled 3d6: [3, 5, 1] = 9");
    }
}
