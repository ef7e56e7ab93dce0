//! WOG fuel station directory client.
//!
//! Two read-only queries against the public directory API: the full
//! station list and a single station by identifier. Records are decoded
//! tolerantly because the API omits absent attributes instead of sending
//! nulls.

mod client;
mod error;
mod types;

pub use client::{DirectoryClient, DirectoryConfig};
pub use error::DirectoryError;
pub use types::{Coordinates, NamedEntry, Schedule, Station};
