//! Bidder adapter framework.
//!
//! This module defines the contract between the host auction framework and
//! individual bidder adapters, plus the registry the host uses to look
//! adapters up by bidder code.
//!
//! Note: Individual adapters are located in the `integrations` module
//! (e.g., `crate::integrations::inmar`).

use crate::settings::Settings;
use std::sync::Arc;

pub mod provider;
pub mod registry;
pub mod types;

pub use provider::BidderAdapter;
pub use registry::BidderRegistry;
pub use types::{
    BidRequest, BidResponse, BidderRequest, GlobalConfig, MediaType, RefererInfo, ServerRequest,
    ServerResponse, SyncOptions, SyncType, UserSync,
};

/// Type alias for bidder builder functions.
type BidderBuilder = fn(&Settings) -> Vec<Arc<dyn BidderAdapter>>;

/// Returns the list of all available bidder builder functions.
///
/// Each builder checks the settings for its own configuration and returns any
/// enabled adapters.
fn bidder_builders() -> &'static [BidderBuilder] {
    &[crate::integrations::inmar::register_bidders]
}

/// Build a registry holding every adapter enabled in `settings`.
#[must_use]
pub fn build_registry(settings: &Settings) -> BidderRegistry {
    let mut registry = BidderRegistry::new();

    for builder in bidder_builders() {
        for adapter in builder(settings) {
            registry.register(adapter);
        }
    }

    log::info!("Bidder registry built with {} adapters", registry.len());

    registry
}
