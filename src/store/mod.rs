//! Collection view state
//!
//! Provides:
//! - `RosterState`: canonical records, query, edit workflow and error field
//! - `Action`: the discrete transitions
//! - `reduce`: the pure transition function
//! - `filter_records`: the derived visible set

pub mod action;
pub mod reducer;
pub mod state;

pub use action::Action;
pub use reducer::{filter_records, reduce, sort_records};
pub use state::{Draft, DraftField, EditState, RequestToken, RosterState};
