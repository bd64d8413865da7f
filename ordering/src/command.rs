//! Text commands understood by the desk
//!
//! One command per line:
//!
//! ```text
//! add <item> [<n>dt]        one unit of an unsized item, optional price
//! remove <item|line-key>    one unit off a line
//! size <item> <size>        one unit in a size (the quarter size starts a combination)
//! quarter <item> [+]        a quarter variety, `+` asks for the supplement
//! resolve                   combine pending quarters
//! cancel                    drop pending quarters
//! show | menu | call | help | quit
//! ```

use shared::Price;
use std::str::FromStr;

use crate::error::{OrderingError, OrderingResult};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    AddUnit { item: String, price_override: Option<Price> },
    Remove { target: String },
    AddSized { item: String, size: String },
    AddQuarter { item: String, supplement: bool },
    Resolve,
    Cancel,
    Show,
    Menu,
    Call,
    Help,
    Quit,
}

pub const HELP: &str = "add <item> [<n>dt] | remove <item|line-key> | size <item> <size> | \
quarter <item> [+] | resolve | cancel | show | menu | call | help | quit";

impl FromStr for Command {
    type Err = OrderingError;

    fn from_str(line: &str) -> OrderingResult<Self> {
        let mut words = line.split_whitespace();
        let verb = words.next().map(str::to_lowercase).unwrap_or_default();
        let args: Vec<&str> = words.collect();
        let unrecognized = || OrderingError::command(line.trim());

        let command = match (verb.as_str(), args.as_slice()) {
            ("add", [item]) => Command::AddUnit { item: item.to_string(), price_override: None },
            ("add", [name @ .., last]) if !name.is_empty() => match price_word(last) {
                Some(price) => Command::AddUnit { item: name.join(" "), price_override: Some(price) },
                None => Command::AddUnit { item: args.join(" "), price_override: None },
            },
            ("remove" | "rm", [_, ..]) => Command::Remove { target: args.join(" ") },
            ("size", [item, size @ ..]) => Command::AddSized {
                item: item.to_string(),
                size: size.join(" "),
            },
            ("quarter", [item]) => Command::AddQuarter { item: item.to_string(), supplement: false },
            ("quarter", [item, "+"]) => Command::AddQuarter { item: item.to_string(), supplement: true },
            ("resolve", []) => Command::Resolve,
            ("cancel", []) => Command::Cancel,
            ("show", []) => Command::Show,
            ("menu", []) => Command::Menu,
            ("call", []) => Command::Call,
            ("help" | "?", []) => Command::Help,
            ("quit" | "exit", []) => Command::Quit,
            _ => return Err(unrecognized()),
        };
        Ok(command)
    }
}

/// A trailing price override must carry the `dt` suffix, e.g. `7.5dt`
fn price_word(word: &str) -> Option<Price> {
    if !word.to_ascii_lowercase().ends_with("dt") {
        return None;
    }
    word.to_ascii_lowercase().parse().ok()
}

impl Command {
    /// Blank lines and `#` comments parse to `None`
    pub fn parse_line(line: &str) -> OrderingResult<Option<Self>> {
        let trimmed = line.trim();
        if trimmed.is_empty() || trimmed.starts_with('#') {
            return Ok(None);
        }
        trimmed.parse().map(Some)
    }

    /// Whether the command can change the cart or pending quarters
    pub fn is_mutation(&self) -> bool {
        matches!(
            self,
            Command::AddUnit { .. }
                | Command::Remove { .. }
                | Command::AddSized { .. }
                | Command::AddQuarter { .. }
                | Command::Resolve
                | Command::Cancel
        )
    }
}
