//! Roster API abstraction layer.
//!
//! Provides a trait-based interface over the remote student API:
//! - HTTP client against the real service
//! - In-memory mock for tests and offline use

pub mod http;
pub mod mock;
pub mod traits;

pub use http::RosterClient;
pub use mock::MockApi;
pub use traits::RosterApi;
