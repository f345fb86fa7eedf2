//! Altos Research rental data - weekly snapshot listing, download and decompression

pub mod client;
pub mod config;
pub mod dates;
pub mod error;
pub mod sync;
pub mod types;
pub mod utils;

#[cfg(test)]
pub(crate) mod test_support;

pub use client::AltosClient;
pub use config::{ClientConfig, USERNAME_ENV};
pub use dates::{date_of_last_friday, last_friday_before, normalize_date, parse_date};
pub use error::{AltosError, Result};
pub use sync::sync_snapshot;
pub use types::*;
pub use utils::{deflate_downloaded_file, deflate_in_background};
