//! Bidder adapters for individual exchanges.
//!
//! Each adapter exposes a `register_bidders` builder consumed by
//! [`crate::auction::build_registry`].

pub mod inmar;
