//! Rust client library for the Libib library-management REST API.
//!
//! Public API layers:
//! - [`LibibClient`]/[`BlockingLibibClient`]: clients holding the credential
//!   headers, built from a [`ClientConfig`].
//! - [`Patrons`], [`Managers`], [`Accounts`] (and their `Blocking*`
//!   counterparts): sub-resource handles returned by the clients.
//! - [`LibibError`]: unified error type used by all operations.
//!
//! ```no_run
//! # async fn run() -> Result<(), libib_client::LibibError> {
//! use libib_client::{ClientConfig, LibibClient};
//!
//! let client = LibibClient::new(ClientConfig::new("api-key", "user-id"))?;
//! for patron in client.patrons().list().await? {
//!     println!("{:?} {:?}", patron.barcode, patron.email);
//! }
//! # Ok(())
//! # }
//! ```

mod accounts;
mod blocking_client;
mod client;
mod config;
mod error;
mod fields;
mod http;
mod managers;
mod patrons;
mod types;

/// Account sub-resource handles (async and blocking).
pub use accounts::{Accounts, BlockingAccounts};
/// Blocking Libib client.
pub use blocking_client::BlockingLibibClient;
/// Async Libib client.
pub use client::LibibClient;
/// Credentials and connection settings, with their defaults.
pub use config::{ClientConfig, DEFAULT_BASE_URL, DEFAULT_PAGE_DELAY};
/// Error type returned by all client operations, and its JSON shape.
pub use error::{ErrorResult, LibibError};
/// Patron create/update field mapping and its allow-list.
pub use fields::{Fields, PATRON_FIELDS};
/// Manager sub-resource handles (async and blocking).
pub use managers::{BlockingManagers, Managers};
/// Patron sub-resource handles (async and blocking).
pub use patrons::{BlockingPatrons, Patrons};
/// Records returned by the API.
pub use types::{Account, Manager, ManagerRole, Patron};
