//! Per-player score requirements and the tolerance band around them.

use std::ops::Index;

use crate::error::{Result, TerritoryError};

/// Numerator of the band ratio 6/5 = 1.2.
const BAND_NUMERATOR: i64 = 6;
/// Denominator of the band ratio 6/5 = 1.2.
const BAND_DENOMINATOR: i64 = 5;

/// Ordered score requirements, one per player.
///
/// Player `k` (0-based) is feasible when its accumulated score lies in
/// `[requirement[k], floor(requirement[k] * 1.2)]`. The upper bound is computed
/// in integer arithmetic so it never suffers from floating-point drift.
///
/// # Examples
///
/// ```
/// use territory_core::Requirements;
///
/// let reqs = Requirements::new(vec![10, 3]).unwrap();
/// assert_eq!(reqs.player_count(), 2);
/// assert_eq!(reqs.upper_bound(0), 12);
/// assert_eq!(reqs.upper_bound(1), 3); // floor(3.6)
/// assert!(reqs.in_band(0, 11));
/// assert!(!reqs.in_band(1, 4));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Requirements {
    values: Vec<i64>,
}

impl Requirements {
    /// Creates requirements, rejecting an empty list or a non-positive value.
    pub fn new(values: Vec<i64>) -> Result<Self> {
        if values.is_empty() {
            return Err(TerritoryError::InfeasibleInput(
                "at least one player is required".to_string(),
            ));
        }
        if let Some((k, v)) = values.iter().enumerate().find(|&(_, &v)| v <= 0) {
            return Err(TerritoryError::InfeasibleInput(format!(
                "requirement of player {} must be positive, got {}",
                k + 1,
                v
            )));
        }
        Ok(Requirements { values })
    }

    /// Number of players m.
    #[inline]
    pub fn player_count(&self) -> usize {
        self.values.len()
    }

    /// Requirement of player `k` (0-based).
    #[inline]
    pub fn get(&self, k: usize) -> i64 {
        self.values[k]
    }

    /// Lower edge of the band: the requirement itself.
    #[inline]
    pub fn lower_bound(&self, k: usize) -> i64 {
        self.values[k]
    }

    /// Upper edge of the band: `floor(requirement * 1.2)`.
    #[inline]
    pub fn upper_bound(&self, k: usize) -> i64 {
        self.values[k] * BAND_NUMERATOR / BAND_DENOMINATOR
    }

    /// Returns true if `score` lies within player `k`'s band.
    pub fn in_band(&self, k: usize, score: i64) -> bool {
        (self.lower_bound(k)..=self.upper_bound(k)).contains(&score)
    }

    /// Distance from `score` to player `k`'s band, zero inside it.
    pub fn band_distance(&self, k: usize, score: i64) -> i64 {
        let lower = self.lower_bound(k);
        let upper = self.upper_bound(k);
        if score < lower {
            lower - score
        } else if score > upper {
            score - upper
        } else {
            0
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = i64> + '_ {
        self.values.iter().copied()
    }

    pub fn as_slice(&self) -> &[i64] {
        &self.values
    }
}

impl Index<usize> for Requirements {
    type Output = i64;

    fn index(&self, k: usize) -> &i64 {
        &self.values[k]
    }
}
