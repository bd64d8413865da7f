//! Quarter-pizza combination rules expressed as data
//!
//! A tier says how many distinct quarter varieties combine into one meter
//! pizza and what flat supplement applies when any of them asked for one.

use serde::{Deserialize, Serialize};
use shared::{Price, Shortfall, SizeLabel};

/// One combinable size, e.g. "1/2m" from two quarters
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tier {
    pub label: SizeLabel,
    pub slices: usize,
    pub supplement: Price,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CombinationPolicy {
    /// Size label that routes a sized add into the quarter selection
    pub quarter_label: SizeLabel,
    /// Sorted by ascending slice count
    tiers: Vec<Tier>,
}

impl CombinationPolicy {
    pub const DEFAULT_HALF_SUPPLEMENT: Price = Price::from_dinars(3);
    pub const DEFAULT_FULL_SUPPLEMENT: Price = Price::from_dinars(5);

    /// Tiers with zero slices are dropped; duplicates keep the first entry
    pub fn new(quarter_label: SizeLabel, mut tiers: Vec<Tier>) -> Self {
        tiers.retain(|tier| tier.slices > 0);
        tiers.sort_by_key(|tier| tier.slices);
        tiers.dedup_by_key(|tier| tier.slices);
        Self { quarter_label, tiers }
    }

    /// Half (2 quarters) or full (4 quarters) meter with the given supplements
    pub fn half_or_full(half_supplement: Price, full_supplement: Price) -> Self {
        Self::new(
            label("1/4m"),
            vec![
                Tier { label: label("1/2m"), slices: 2, supplement: half_supplement },
                Tier { label: label("1m"), slices: 4, supplement: full_supplement },
            ],
        )
    }

    pub fn tiers(&self) -> &[Tier] {
        &self.tiers
    }

    /// Largest number of quarters that can be pending at once
    pub fn max_slices(&self) -> usize {
        self.tiers.last().map(|tier| tier.slices).unwrap_or(0)
    }

    /// The tier a pending count resolves to, if any
    pub fn tier_for(&self, count: usize) -> Option<&Tier> {
        self.tiers.iter().find(|tier| tier.slices == count)
    }

    /// Remaining quarters needed for every tier still reachable from `count`
    pub fn shortfalls(&self, count: usize) -> Vec<Shortfall> {
        self.tiers
            .iter()
            .filter(|tier| tier.slices > count)
            .map(|tier| Shortfall { tier: tier.label.clone(), needed: tier.slices - count })
            .collect()
    }

    pub fn is_quarter(&self, size: &SizeLabel) -> bool {
        *size == self.quarter_label
    }
}

impl Default for CombinationPolicy {
    fn default() -> Self {
        Self::half_or_full(Self::DEFAULT_HALF_SUPPLEMENT, Self::DEFAULT_FULL_SUPPLEMENT)
    }
}

fn label(text: &str) -> SizeLabel {
    SizeLabel::new(text).unwrap_or_else(|| unreachable!("static size label is non-empty"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_tiers() {
        let policy = CombinationPolicy::default();
        assert_eq!(policy.max_slices(), 4);
        assert_eq!(policy.tier_for(2).unwrap().label.as_str(), "1/2m");
        assert_eq!(policy.tier_for(4).unwrap().label.as_str(), "1m");
        assert!(policy.tier_for(1).is_none());
        assert!(policy.tier_for(3).is_none());
        assert!(policy.is_quarter(&SizeLabel::new("1/4 m").unwrap()));
    }

    #[test]
    fn test_shortfalls_list_reachable_tiers() {
        let policy = CombinationPolicy::default();

        let from_one = policy.shortfalls(1);
        assert_eq!(from_one.len(), 2);
        assert_eq!(from_one[0].needed, 1);
        assert_eq!(from_one[1].needed, 3);

        let from_three = policy.shortfalls(3);
        assert_eq!(from_three.len(), 1);
        assert_eq!(from_three[0].tier.as_str(), "1m");
        assert_eq!(from_three[0].needed, 1);
    }

    #[test]
    fn test_exactly_four_policy() {
        let policy = CombinationPolicy::new(
            label("1/4m"),
            vec![Tier { label: label("1m"), slices: 4, supplement: Price::ZERO }],
        );
        assert!(policy.tier_for(2).is_none());
        assert_eq!(policy.max_slices(), 4);
    }

    #[test]
    fn test_tiers_are_sorted_and_deduplicated() {
        let policy = CombinationPolicy::new(
            label("1/4m"),
            vec![
                Tier { label: label("1m"), slices: 4, supplement: Price::ZERO },
                Tier { label: label("none"), slices: 0, supplement: Price::ZERO },
                Tier { label: label("1/2m"), slices: 2, supplement: Price::ZERO },
                Tier { label: label("other"), slices: 4, supplement: Price::ZERO },
            ],
        );
        let labels: Vec<&str> = policy.tiers().iter().map(|t| t.label.as_str()).collect();
        assert_eq!(labels, vec!["1/2m", "1m"]);
    }
}
