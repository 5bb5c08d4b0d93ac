#![forbid(unsafe_code)]

//! Vendor and device name lookup in the `pci.ids` database.
//!
//! Two strategies share one line classifier: [`VendorDatabase`] parses the file once into
//! maps, [`StreamingScanner`] rescans the raw text per query. Both give the same answer for
//! the same input. [`Resolver`] picks one at runtime from [`IdsConfig`].

mod config;
mod database;
mod error;
mod line;
mod resolve;
mod scan;

pub use config::{IdsConfig, Strategy, DEFAULT_SEARCH_PATHS, PATH_ENV, STRATEGY_ENV};
pub use database::{Vendor, VendorDatabase};
pub use error::{IdsError, Result};
pub use resolve::{Identity, IdentityResolver, Resolver};
pub use scan::StreamingScanner;
