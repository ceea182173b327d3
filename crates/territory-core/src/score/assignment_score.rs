//! AssignmentScore - two-level score for comparing assignments

use std::cmp::Ordering;
use std::fmt;
use std::ops::{Add, Neg, Sub};
use std::str::FromStr;

/// A score with a hard level (score-band violation) and a soft level
/// (compactness objective), both stored as non-positive penalties.
///
/// When comparing scores:
/// 1. Hard scores are compared first
/// 2. Soft scores are only compared when hard scores are equal
///
/// # Examples
///
/// ```
/// use territory_core::AssignmentScore;
///
/// let broken = AssignmentScore::of(-3, -10);  // 3 weight units outside some band
/// let feasible = AssignmentScore::of(0, -40);  // every band met, 40 differing edges
///
/// // Feasible assignments are always better than infeasible ones
/// assert!(feasible > broken);
/// assert!(feasible.is_feasible());
///
/// let tighter = AssignmentScore::of(0, -12);
/// assert!(tighter > feasible);
/// assert_eq!(tighter.to_string(), "0hard/-12soft");
/// ```
#[derive(Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AssignmentScore {
    hard: i64,
    soft: i64,
}

impl AssignmentScore {
    /// The zero score.
    pub const ZERO: AssignmentScore = AssignmentScore { hard: 0, soft: 0 };

    #[inline]
    pub const fn of(hard: i64, soft: i64) -> Self {
        AssignmentScore { hard, soft }
    }

    /// Returns the hard score component.
    #[inline]
    pub const fn hard(&self) -> i64 {
        self.hard
    }

    /// Returns the soft score component.
    #[inline]
    pub const fn soft(&self) -> i64 {
        self.soft
    }

    /// A score is feasible when no hard penalty remains.
    #[inline]
    pub fn is_feasible(&self) -> bool {
        self.hard >= 0
    }

    /// Parses the `"<hard>hard/<soft>soft"` form produced by `Display`.
    pub fn parse(s: &str) -> Result<Self, ScoreParseError> {
        let s = s.trim();
        let (hard_part, soft_part) = s.split_once('/').ok_or_else(|| ScoreParseError {
            message: format!(
                "Invalid AssignmentScore format '{}': expected 2 parts separated by '/'",
                s
            ),
        })?;
        let hard = parse_level(hard_part, "hard")?;
        let soft = parse_level(soft_part, "soft")?;
        Ok(AssignmentScore::of(hard, soft))
    }
}

fn parse_level(part: &str, suffix: &str) -> Result<i64, ScoreParseError> {
    let part = part.trim();
    let num_str = part.strip_suffix(suffix).ok_or_else(|| ScoreParseError {
        message: format!("{} part '{}' must end with '{}'", suffix, part, suffix),
    })?;
    num_str.parse::<i64>().map_err(|e| ScoreParseError {
        message: format!("Invalid {} score '{}': {}", suffix, num_str, e),
    })
}

impl Ord for AssignmentScore {
    fn cmp(&self, other: &Self) -> Ordering {
        match self.hard.cmp(&other.hard) {
            Ordering::Equal => self.soft.cmp(&other.soft),
            other => other,
        }
    }
}

impl PartialOrd for AssignmentScore {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Add for AssignmentScore {
    type Output = Self;

    fn add(self, other: Self) -> Self {
        AssignmentScore::of(self.hard + other.hard, self.soft + other.soft)
    }
}

impl Sub for AssignmentScore {
    type Output = Self;

    fn sub(self, other: Self) -> Self {
        AssignmentScore::of(self.hard - other.hard, self.soft - other.soft)
    }
}

impl Neg for AssignmentScore {
    type Output = Self;

    fn neg(self) -> Self {
        AssignmentScore::of(-self.hard, -self.soft)
    }
}

impl fmt::Debug for AssignmentScore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "AssignmentScore({}, {})", self.hard, self.soft)
    }
}

impl fmt::Display for AssignmentScore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}hard/{}soft", self.hard, self.soft)
    }
}

impl FromStr for AssignmentScore {
    type Err = ScoreParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        AssignmentScore::parse(s)
    }
}

/// Error when parsing a score from string
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScoreParseError {
    pub message: String,
}

impl fmt::Display for ScoreParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Score parse error: {}", self.message)
    }
}

impl std::error::Error for ScoreParseError {}
