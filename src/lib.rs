//! Client for the student roster API
//!
//! Loads the student collection, filters it by name, mirrors edits and
//! deletes into local state, and exports single records as PDF documents.
//!
//! # Example
//!
//! ```rust,no_run
//! use student_roster::{AutoConfirm, ClientConfig, DraftField, RosterClient, RosterSession};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let client = RosterClient::new(ClientConfig::default())?;
//! let mut session = RosterSession::new(client);
//!
//! session.load().await?;
//! session.search("Ann");
//!
//! let id = session.visible()[0].id.clone();
//! session.begin_edit(&id)?;
//! session.edit_field(DraftField::Name, "Annie");
//! session.save_edit().await?;
//!
//! session.delete(&id, &AutoConfirm(true)).await?;
//! # Ok(())
//! # }
//! ```

pub mod api;
pub mod config;
pub mod error;
pub mod export;
pub mod form;
pub mod session;
pub mod store;
pub mod types;

// Re-export main types
pub use api::{MockApi, RosterApi, RosterClient};
pub use config::Config;
pub use error::{Result, RosterError};
pub use export::ExportDocument;
pub use form::EntryForm;
pub use session::{AutoConfirm, Confirm, RosterSession};
pub use store::{Action, Draft, DraftField, EditState, RequestToken, RosterState};
pub use types::*;
