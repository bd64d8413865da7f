//! Messages handed from the ordering core to a presenter
//!
//! - `snapshot`: read-only view of the cart and its total
//! - `notice`: user notifications (toasts, inline text, dialogs)
//! - `dialog`: call-to-order data (order summary and phone numbers)

pub mod dialog;
pub mod notice;
pub mod snapshot;

pub use dialog::{CallToOrder, Location};
pub use notice::{Notice, NoticeLevel};
pub use snapshot::{OrderSnapshot, SnapshotLine};
