//! Quarter-slice assembler
//!
//! Collects distinct pizza varieties ordered by the quarter and folds them
//! into one meter-pizza line once the count matches a combination tier.
//!
//! States: `Empty` -> `Collecting(n)` / `Ready` on each add, `Ready` ->
//! `Empty` on resolve, anything -> `Empty` on cancel.

use serde::{Deserialize, Serialize};
use shared::{CartKey, ItemId, Price, Shortfall, SizeLabel, ValidationError};

use super::catalog::Catalog;
use super::policy::CombinationPolicy;

/// A variety waiting to be combined
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PendingSlice {
    pub item: ItemId,
    pub has_supplement: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum AssemblerState {
    Empty,
    /// Pending count matches no tier yet
    Collecting(usize),
    /// Pending count matches a tier; `resolve` will succeed
    Ready { tier: SizeLabel, slices: usize },
}

/// Returned after every successful `add_quarter`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PendingState {
    pub count: usize,
    pub state: AssemblerState,
    /// Quarters still needed for each larger tier
    pub shortfalls: Vec<Shortfall>,
}

/// The outcome of a successful `resolve`, ready to become a cart line
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CombinedPizza {
    pub tier: SizeLabel,
    pub varieties: Vec<ItemId>,
    /// Display names in selection order
    pub names: Vec<String>,
    pub price: Price,
    pub supplement_applied: bool,
}

impl CombinedPizza {
    pub fn key(&self) -> CartKey {
        CartKey::combined(&self.tier, &self.varieties, self.supplement_applied)
    }

    pub fn item_name(&self) -> String {
        self.names.join(" + ")
    }
}

pub struct QuarterAssembler {
    policy: CombinationPolicy,
    pending: Vec<PendingSlice>,
}

impl QuarterAssembler {
    pub fn new(policy: CombinationPolicy) -> Self {
        Self { policy, pending: Vec::new() }
    }

    pub fn add_quarter(
        &mut self,
        item: &ItemId,
        has_supplement: bool,
    ) -> Result<PendingState, ValidationError> {
        if self.is_pending(item) {
            return Err(ValidationError::AlreadySelected { item: item.clone() });
        }
        let max = self.policy.max_slices();
        if self.pending.len() >= max {
            return Err(ValidationError::SelectionFull { max });
        }

        self.pending.push(PendingSlice { item: item.clone(), has_supplement });
        Ok(self.pending_state())
    }

    /// Fold the pending varieties into one priced combination and clear them.
    /// Varieties missing from the catalog contribute a zero quarter price.
    pub fn resolve(&mut self, catalog: &Catalog) -> Result<CombinedPizza, ValidationError> {
        let count = self.pending.len();
        let tier = self.policy.tier_for(count).ok_or_else(|| {
            ValidationError::IncompleteSelection {
                count,
                shortfalls: self.policy.shortfalls(count),
            }
        })?;

        let quarter = &self.policy.quarter_label;
        let mut price: Price = self
            .pending
            .iter()
            .map(|slice| catalog.price_for(&slice.item, Some(quarter)).unwrap_or(Price::ZERO))
            .sum();

        let supplement_applied = self.pending.iter().any(|slice| slice.has_supplement);
        if supplement_applied {
            price += tier.supplement;
        }

        let combined = CombinedPizza {
            tier: tier.label.clone(),
            varieties: self.pending.iter().map(|slice| slice.item.clone()).collect(),
            names: self
                .pending
                .iter()
                .map(|slice| {
                    catalog
                        .lookup(&slice.item)
                        .map(|entry| entry.display_name.clone())
                        .unwrap_or_else(|| slice.item.to_string())
                })
                .collect(),
            price,
            supplement_applied,
        };

        self.pending.clear();
        Ok(combined)
    }

    /// Drop the pending selection; returns how many varieties were discarded
    pub fn cancel(&mut self) -> usize {
        let dropped = self.pending.len();
        self.pending.clear();
        dropped
    }

    pub fn state(&self) -> AssemblerState {
        let count = self.pending.len();
        if count == 0 {
            return AssemblerState::Empty;
        }
        match self.policy.tier_for(count) {
            Some(tier) => AssemblerState::Ready { tier: tier.label.clone(), slices: count },
            None => AssemblerState::Collecting(count),
        }
    }

    pub fn pending_state(&self) -> PendingState {
        let count = self.pending.len();
        PendingState {
            count,
            state: self.state(),
            shortfalls: self.policy.shortfalls(count),
        }
    }

    pub fn is_pending(&self, item: &ItemId) -> bool {
        self.pending.iter().any(|slice| slice.item == *item)
    }

    pub fn pending(&self) -> &[PendingSlice] {
        &self.pending
    }

    pub fn count(&self) -> usize {
        self.pending.len()
    }

    pub fn policy(&self) -> &CombinationPolicy {
        &self.policy
    }
}
