//! One customer visit: the cart plus the pending quarter selection
//!
//! Every operation is synchronous and all-or-nothing; a `ValidationError`
//! leaves both the cart and the pending selection untouched.

use shared::{
    session_debug, session_info, session_warn, CallToOrder, CartKey, ItemId, Location,
    OrderSnapshot, Price, SessionId, SizeLabel, ValidationError,
};
use std::sync::Arc;

use super::cart::{CartLine, OrderBuilder, RemoveOutcome};
use super::catalog::Catalog;
use super::policy::CombinationPolicy;
use super::quarter::{AssemblerState, PendingState, QuarterAssembler};

/// What a sized add turned into
#[derive(Debug, Clone, PartialEq)]
pub enum SizedOutcome {
    Added(CartLine),
    /// The quarter size was routed to the quarter selection
    QuarterPending(PendingState),
}

pub struct OrderSession {
    id: SessionId,
    catalog: Arc<Catalog>,
    builder: OrderBuilder,
    assembler: QuarterAssembler,
}

impl OrderSession {
    pub fn new(catalog: Arc<Catalog>, policy: CombinationPolicy) -> Self {
        Self::with_id(SessionId::new(), catalog, policy)
    }

    pub fn with_id(id: SessionId, catalog: Arc<Catalog>, policy: CombinationPolicy) -> Self {
        Self {
            id,
            builder: OrderBuilder::new(Arc::clone(&catalog)),
            assembler: QuarterAssembler::new(policy),
            catalog,
        }
    }

    pub fn id(&self) -> &SessionId {
        &self.id
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn add_unit_item(&mut self, item: &ItemId, price_override: Option<Price>) -> CartLine {
        let line = self.builder.add_unit_item(item, price_override);
        session_debug!(
            self.id,
            key = %line.key,
            quantity = line.quantity,
            "Added {} at {}",
            line.item_name,
            line.unit_price
        );
        line
    }

    pub fn remove_unit_item(&mut self, item: &ItemId) -> RemoveOutcome {
        self.remove_line(&CartKey::unit(item))
    }

    /// Take one unit off any line, including sized and combined ones
    pub fn remove_line(&mut self, key: &CartKey) -> RemoveOutcome {
        let outcome = self.builder.remove_by_key(key);
        session_debug!(self.id, key = %key, "Remove: {:?}", outcome);
        outcome
    }

    /// Add one unit in the given size. An empty size fails with
    /// `NoSizeSelected`; the quarter size goes to the quarter selection,
    /// carrying the catalog's supplement flag.
    pub fn add_sized_item(
        &mut self,
        item: &ItemId,
        size: &str,
    ) -> Result<SizedOutcome, ValidationError> {
        let result = self.try_add_sized_item(item, size);
        self.log_rejection(result)
    }

    fn try_add_sized_item(
        &mut self,
        item: &ItemId,
        size: &str,
    ) -> Result<SizedOutcome, ValidationError> {
        let Some(size) = SizeLabel::new(size) else {
            return Err(ValidationError::NoSizeSelected { item: item.clone() });
        };

        if !self.assembler.policy().is_quarter(&size) {
            let line = self.builder.add_sized_item(item, Some(&size))?;
            session_debug!(
                self.id,
                key = %line.key,
                quantity = line.quantity,
                "Added {} at {}",
                line.display_name(),
                line.unit_price
            );
            return Ok(SizedOutcome::Added(line));
        }

        let entry = self.catalog.lookup(item);
        if entry.is_some_and(|entry| entry.size_price(&size).is_none()) {
            return Err(ValidationError::UnknownSize { item: item.clone(), size });
        }
        let has_supplement = entry.is_some_and(|entry| entry.supplement);

        self.assembler
            .add_quarter(item, has_supplement)
            .map(SizedOutcome::QuarterPending)
            .map_err(|err| match err {
                ValidationError::AlreadySelected { item } => {
                    ValidationError::DuplicateQuarterSelection { item }
                }
                other => other,
            })
    }

    pub fn add_quarter(
        &mut self,
        item: &ItemId,
        has_supplement: bool,
    ) -> Result<PendingState, ValidationError> {
        let result = self.assembler.add_quarter(item, has_supplement);
        if let Ok(state) = &result {
            session_debug!(
                self.id,
                item = %item,
                supplement = has_supplement,
                "Quarter pending ({} selected)",
                state.count
            );
        }
        self.log_rejection(result)
    }

    /// Combine the pending quarters into one cart line
    pub fn resolve(&mut self) -> Result<CartLine, ValidationError> {
        let result = self.assembler.resolve(&self.catalog);
        let combined = self.log_rejection(result)?;

        let line = self.builder.insert_line(
            combined.key(),
            combined.item_name(),
            Some(combined.tier.clone()),
            combined.price,
        );
        session_info!(
            self.id,
            key = %line.key,
            supplement = combined.supplement_applied,
            "Combined {} at {}",
            line.display_name(),
            line.unit_price
        );
        Ok(line)
    }

    /// Drop the pending quarter selection; always succeeds
    pub fn cancel(&mut self) -> usize {
        let dropped = self.assembler.cancel();
        if dropped > 0 {
            session_debug!(self.id, "Cancelled quarter selection ({} dropped)", dropped);
        }
        dropped
    }

    pub fn total(&self) -> Price {
        self.builder.total()
    }

    pub fn line_count(&self) -> u32 {
        self.builder.line_count()
    }

    pub fn lines(&self) -> impl Iterator<Item = &CartLine> {
        self.builder.lines()
    }

    pub fn get(&self, key: &CartKey) -> Option<&CartLine> {
        self.builder.get(key)
    }

    /// The first line whose rendered key is `rendered`
    pub fn line_key(&self, rendered: &str) -> Option<CartKey> {
        self.builder
            .lines()
            .find(|line| line.key.to_string() == rendered)
            .map(|line| line.key.clone())
    }

    pub fn quarter_state(&self) -> AssemblerState {
        self.assembler.state()
    }

    pub fn pending_quarters(&self) -> usize {
        self.assembler.count()
    }

    pub fn snapshot(&self) -> OrderSnapshot {
        OrderSnapshot {
            session_id: self.id.clone(),
            lines: self.builder.lines().map(CartLine::to_snapshot_line).collect(),
            total: self.total(),
            item_count: self.line_count(),
            pending_quarters: self
                .assembler
                .pending()
                .iter()
                .map(|slice| {
                    self.catalog
                        .lookup(&slice.item)
                        .map(|entry| entry.display_name.clone())
                        .unwrap_or_else(|| slice.item.to_string())
                })
                .collect(),
        }
    }

    /// "2x Margherita (Petit), 1x Coca Cola"
    pub fn order_text(&self) -> String {
        self.builder
            .lines()
            .map(|line| format!("{}x {}", line.quantity, line.display_name()))
            .collect::<Vec<_>>()
            .join(", ")
    }

    pub fn call_to_order(&self, locations: &[Location]) -> CallToOrder {
        CallToOrder {
            order_text: self.order_text(),
            total: self.total(),
            locations: locations.to_vec(),
        }
    }

    fn log_rejection<T>(&self, result: Result<T, ValidationError>) -> Result<T, ValidationError> {
        result.inspect_err(|err| session_warn!(self.id, "Rejected: {}", err))
    }
}
