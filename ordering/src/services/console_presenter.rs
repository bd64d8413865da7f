//! Terminal presenter
//!
//! Prints the order summary, notifications, the menu and the call-to-order
//! dialog to stdout, either as aligned text or as JSON lines.

use shared::{CallToOrder, Notice, NoticeLevel, OrderSnapshot};
use std::fmt::Write;

use crate::core::{Catalog, CatalogItem};
use crate::traits::Presenter;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

pub struct ConsolePresenter {
    format: OutputFormat,
}

impl ConsolePresenter {
    pub fn new(format: OutputFormat) -> Self {
        Self { format }
    }

    fn emit_json<T: serde::Serialize>(&self, kind: &str, value: &T) {
        match serde_json::to_string(value) {
            Ok(json) => println!("{{\"{kind}\":{json}}}"),
            Err(e) => tracing::error!("Failed to serialize {}: {}", kind, e),
        }
    }
}

impl Presenter for ConsolePresenter {
    fn render(&self, snapshot: &OrderSnapshot) {
        match self.format {
            OutputFormat::Text => print!("{}", format_snapshot(snapshot)),
            OutputFormat::Json => self.emit_json("snapshot", snapshot),
        }
    }

    fn notify(&self, notice: &Notice) {
        match self.format {
            OutputFormat::Text => println!("{}", format_notice(notice)),
            OutputFormat::Json => self.emit_json("notice", notice),
        }
    }

    fn show_menu(&self, catalog: &Catalog) {
        // The menu is reference text; JSON mode prints it as text too
        print!("{}", format_menu(catalog));
    }

    fn show_call_to_order(&self, call: &CallToOrder) {
        match self.format {
            OutputFormat::Text => print!("{}", format_call_to_order(call)),
            OutputFormat::Json => self.emit_json("call", call),
        }
    }
}

pub fn format_notice(notice: &Notice) -> String {
    let marker = match notice.level {
        NoticeLevel::Success => "✅",
        NoticeLevel::Info => "ℹ️ ",
        NoticeLevel::Error => "❌",
    };
    format!("{marker} {}: {}", notice.title, notice.message)
}

pub fn format_snapshot(snapshot: &OrderSnapshot) -> String {
    let mut out = String::new();
    if snapshot.is_empty() {
        out.push_str("🛒 Cart is empty\n");
    } else {
        let _ = writeln!(out, "🛒 Order ({} items)", snapshot.item_count);
        for line in &snapshot.lines {
            let _ = writeln!(
                out,
                "  {:>3}x {:<40} {:>10} {:>10}",
                line.quantity, line.display_name, line.unit_price, line.line_total
            );
        }
        let _ = writeln!(out, "  {:<45} {:>21}", "Total:", snapshot.total);
    }
    if !snapshot.pending_quarters.is_empty() {
        let _ = writeln!(out, "  🍕 Quarters pending: {}", snapshot.pending_quarters.join(", "));
    }
    out
}

fn menu_price(item: &CatalogItem) -> String {
    let mut parts: Vec<String> = Vec::new();
    if let Some(price) = item.base_price {
        let sign = if item.supplement { "+" } else { "" };
        parts.push(format!("{sign}{price}"));
    }
    if let Some(sizes) = &item.size_variants {
        parts.extend(sizes.iter().map(|(label, price)| format!("{label} {price}")));
    }
    parts.join(" - ")
}

pub fn format_menu(catalog: &Catalog) -> String {
    let mut out = String::new();
    for category in catalog.categories() {
        let _ = writeln!(out, "== {category} ==");
        for item in catalog.items_in(category) {
            let description = item
                .description
                .as_deref()
                .map(|d| format!(" {d}"))
                .unwrap_or_default();
            let _ = writeln!(
                out,
                "  {:<34} {}{} : {}",
                item.id,
                item.display_name,
                description,
                menu_price(item)
            );
        }
    }
    out
}

pub fn format_call_to_order(call: &CallToOrder) -> String {
    let mut out = String::new();
    out.push_str("📞 Call one of our restaurants to order\n");
    if !call.order_text.is_empty() {
        let _ = writeln!(out, "  Your selection: {}", call.order_text);
        let _ = writeln!(out, "  Total: {}", call.total);
    }
    for location in &call.locations {
        let _ = writeln!(out, "  {:<24} {:<12} {}", location.name, location.phone, location.tel_uri());
    }
    out.push_str("  Mention your selection when calling\n");
    out
}
