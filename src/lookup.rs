//! Ordered lookup tables with a fall-back to the last entry.
//!
//! Several design rules take the form "choose the smallest standard size which can handle the
//! requirement, or the largest size if none can". [`TierTable`] captures this once so that the
//! tank, gutter, downpipe and tank material tables all share the same behaviour.
use anyhow::{Result, ensure};
use itertools::Itertools;
use serde::{Deserialize, Serialize};

/// An entry in a [`TierTable`]
pub trait Tier {
    /// The quantity which tiers are ordered by and compared against
    type Key: PartialOrd + Copy + std::fmt::Debug;

    /// The threshold for this tier (i.e. the largest target it can accommodate)
    fn threshold(&self) -> Self::Key;
}

/// A non-empty list of tiers in strictly increasing order of threshold
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "Vec<T>", bound(deserialize = "T: Tier + Deserialize<'de>"))]
pub struct TierTable<T>(Vec<T>);

impl<T: Tier> TierTable<T> {
    /// Create a new [`TierTable`], checking that the tiers are non-empty and strictly increasing
    pub fn new(tiers: Vec<T>) -> Result<Self> {
        ensure!(!tiers.is_empty(), "Tier table cannot be empty");
        ensure!(
            tiers
                .iter()
                .tuple_windows()
                .all(|(lower, upper)| lower.threshold() < upper.threshold()),
            "Tiers must be in strictly increasing order of threshold"
        );

        Ok(Self(tiers))
    }

    /// Select the first tier whose threshold is at least `target`, else the last tier.
    ///
    /// The second element of the returned tuple is false if no tier could accommodate the target
    /// and the last tier was returned as a fall-back.
    pub fn select(&self, target: T::Key) -> (&T, bool) {
        match self.0.iter().find(|tier| tier.threshold() >= target) {
            Some(tier) => (tier, true),
            None => (self.largest(), false),
        }
    }

    /// The tier with the largest threshold
    pub fn largest(&self) -> &T {
        self.0.last().expect("Tier table cannot be empty")
    }

    /// Iterate over the tiers in order
    pub fn iter(&self) -> impl Iterator<Item = &T> {
        self.0.iter()
    }
}

impl<T: Tier> TryFrom<Vec<T>> for TierTable<T> {
    type Error = anyhow::Error;

    fn try_from(tiers: Vec<T>) -> Result<Self> {
        Self::new(tiers)
    }
}
