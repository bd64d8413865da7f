//! Order desk: routes customer commands into a session and tells the
//! presenter what happened
//!
//! Decisions stay here and in the session; display stays behind the
//! `Presenter` trait. Every command yields an `OrderEvent`, and every
//! validation failure reaches the presenter as an error notice.

use shared::{session_debug, CartKey, ItemId, Notice, SessionId, SharedResult, ValidationError};
use std::sync::Arc;

use crate::command::{Command, HELP};
use crate::config::DeskConfig;
use crate::core::{
    AssemblerState, CartLine, Catalog, OrderSession, PendingState, RemoveOutcome, SizedOutcome,
};
use crate::error::OrderingResult;
use crate::traits::Presenter;

/// What a command did
#[derive(Debug, Clone, PartialEq)]
pub enum OrderEvent {
    ItemAdded(CartLine),
    ItemRemoved { key: CartKey, outcome: RemoveOutcome },
    QuarterPending(PendingState),
    PizzaCombined(CartLine),
    SelectionCancelled { dropped: usize },
    Rejected(ValidationError),
    /// Read-only commands (show, menu, call, help)
    Displayed,
    Quit,
}

impl OrderEvent {
    /// The notice to surface for this event, if any
    pub fn notice(&self) -> Option<Notice> {
        match self {
            OrderEvent::ItemAdded(line) => Some(Notice::success(
                "Added to order",
                format!("{} ({}), quantity {}", line.display_name(), line.unit_price, line.quantity),
            )),
            OrderEvent::ItemRemoved { key, outcome } => match outcome {
                RemoveOutcome::Absent => None,
                RemoveOutcome::Decremented { remaining } => {
                    Some(Notice::info("Removed one", format!("{key}: {remaining} left")))
                }
                RemoveOutcome::Removed => Some(Notice::info("Removed", format!("{key} removed"))),
            },
            OrderEvent::QuarterPending(state) => Some(Notice::info(
                "Quarter selected",
                describe_pending(state),
            )),
            OrderEvent::PizzaCombined(line) => Some(Notice::success(
                "Pizza combined",
                format!("{} at {}", line.display_name(), line.unit_price),
            )),
            OrderEvent::SelectionCancelled { dropped } if *dropped > 0 => Some(Notice::info(
                "Selection cancelled",
                format!("{dropped} quarter(s) dropped"),
            )),
            OrderEvent::SelectionCancelled { .. } => None,
            OrderEvent::Rejected(err) => Some(Notice::from(err)),
            OrderEvent::Displayed | OrderEvent::Quit => None,
        }
    }

    pub fn is_rejection(&self) -> bool {
        matches!(self, OrderEvent::Rejected(_))
    }
}

fn describe_pending(state: &PendingState) -> String {
    let ready = match &state.state {
        AssemblerState::Ready { tier, .. } => format!(", ready as {tier}"),
        _ => String::new(),
    };
    let more: Vec<String> = state
        .shortfalls
        .iter()
        .map(|s| format!("{} more for {}", s.needed, s.tier))
        .collect();
    if more.is_empty() {
        format!("{} selected{ready}", state.count)
    } else {
        format!("{} selected{ready}; {}", state.count, more.join(", "))
    }
}

pub struct OrderDesk<P: Presenter> {
    session: OrderSession,
    presenter: P,
    config: DeskConfig,
}

impl<P: Presenter> OrderDesk<P> {
    pub fn new(catalog: Arc<Catalog>, config: DeskConfig, presenter: P) -> Self {
        Self {
            session: OrderSession::new(catalog, config.policy.clone()),
            presenter,
            config,
        }
    }

    pub fn session(&self) -> &OrderSession {
        &self.session
    }

    pub fn session_id(&self) -> &SessionId {
        self.session.id()
    }

    pub fn presenter(&self) -> &P {
        &self.presenter
    }

    /// Parse and handle one input line; `None` for blanks and comments.
    /// Unparseable lines are reported to the presenter and returned as errors.
    pub fn handle_line(&mut self, line: &str) -> OrderingResult<Option<OrderEvent>> {
        match Command::parse_line(line) {
            Ok(Some(command)) => self.handle(command).map(Some),
            Ok(None) => Ok(None),
            Err(err) => {
                self.presenter.notify(&Notice::error("Unknown command", format!("{err}. Try: {HELP}")));
                Err(err)
            }
        }
    }

    /// Apply one command. Validation failures come back as
    /// `OrderEvent::Rejected`; `Err` is reserved for malformed commands.
    pub fn handle(&mut self, command: Command) -> OrderingResult<OrderEvent> {
        session_debug!(self.session.id(), "Command: {:?}", command);
        let mutation = command.is_mutation();

        let event = match self.dispatch(command) {
            Ok(event) => event,
            Err(err) => {
                self.presenter.notify(&Notice::error("Invalid command", err.to_string()));
                return Err(err);
            }
        };

        if let Some(notice) = event.notice() {
            self.presenter.notify(&notice);
        }
        if mutation && !event.is_rejection() {
            self.presenter.render(&self.session.snapshot());
        }
        Ok(event)
    }

    fn dispatch(&mut self, command: Command) -> OrderingResult<OrderEvent> {
        let event = match command {
            Command::AddUnit { item, price_override } => {
                let item = self.resolve_item(&item)?;
                OrderEvent::ItemAdded(self.session.add_unit_item(&item, price_override))
            }
            Command::Remove { target } => {
                let key = self.resolve_line_key(&target)?;
                let outcome = self.session.remove_line(&key);
                OrderEvent::ItemRemoved { key, outcome }
            }
            Command::AddSized { item, size } => {
                let item = self.resolve_item(&item)?;
                match self.session.add_sized_item(&item, &size) {
                    Ok(SizedOutcome::Added(line)) => OrderEvent::ItemAdded(line),
                    Ok(SizedOutcome::QuarterPending(state)) => OrderEvent::QuarterPending(state),
                    Err(err) => OrderEvent::Rejected(err),
                }
            }
            Command::AddQuarter { item, supplement } => {
                let item = self.resolve_item(&item)?;
                match self.session.add_quarter(&item, supplement) {
                    Ok(state) => OrderEvent::QuarterPending(state),
                    Err(err) => OrderEvent::Rejected(err),
                }
            }
            Command::Resolve => match self.session.resolve() {
                Ok(line) => OrderEvent::PizzaCombined(line),
                Err(err) => OrderEvent::Rejected(err),
            },
            Command::Cancel => OrderEvent::SelectionCancelled { dropped: self.session.cancel() },
            Command::Show => {
                self.presenter.render(&self.session.snapshot());
                OrderEvent::Displayed
            }
            Command::Menu => {
                self.presenter.show_menu(self.session.catalog());
                OrderEvent::Displayed
            }
            Command::Call => {
                let call = self.session.call_to_order(&self.config.locations);
                self.presenter.show_call_to_order(&call);
                OrderEvent::Displayed
            }
            Command::Help => {
                self.presenter.notify(&Notice::info("Commands", HELP));
                OrderEvent::Displayed
            }
            Command::Quit => OrderEvent::Quit,
        };
        Ok(event)
    }

    /// Catalog match when there is one, otherwise the raw text as an id
    fn resolve_item(&self, query: &str) -> SharedResult<ItemId> {
        match self.session.catalog().find(query) {
            Some(entry) => Ok(entry.id.clone()),
            None => ItemId::new(query),
        }
    }

    /// A line key as shown in the summary, or an item's unsized line
    fn resolve_line_key(&self, target: &str) -> SharedResult<CartKey> {
        if let Some(key) = self.session.line_key(target.trim()) {
            return Ok(key);
        }
        Ok(CartKey::unit(&self.resolve_item(target)?))
    }
}
