//! Inmar bidder adapter.
//!
//! This crate translates the host auction framework's bid requests into the
//! Inmar exchange's HTTP request format, maps the exchange's response back to
//! host bids, and declares the exchange's cookie-sync pixel. It performs no
//! I/O: the host sends the described request and passes back the response.
//!
//! # Modules
//!
//! - [`auction`]: Bidder adapter trait, host request/response types and registry
//! - [`error`]: Error types and error handling utilities
//! - [`fpd`]: Legacy first-party data reshaping
//! - [`integrations`]: Exchange-specific adapters
//! - [`json_util`]: JSON helpers shared by adapters
//! - [`logging`]: Optional logger setup for hosts
//! - [`merge`]: Configurable deep merge of JSON objects
//! - [`settings`]: Configuration management and validation
//! - [`test_support`]: Testing utilities and fixtures

pub mod auction;
pub mod error;
pub mod fpd;
pub mod integrations;
pub mod json_util;
pub mod logging;
pub mod merge;
pub mod settings;
pub mod test_support;
