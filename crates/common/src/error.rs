//! Error types for the bidder adapter.
//!
//! Errors are carried in [`error_stack::Report`] so call sites can attach
//! context with `change_context` while keeping the original cause.

use derive_more::{Display, Error};

/// Errors raised by the adapter.
///
/// Invalid auction input is never reported through this type: it degrades to
/// `false`, an omitted field or an empty bid list instead.
#[derive(Debug, Display, Error)]
pub enum AdapterError {
    /// Settings could not be loaded or failed validation.
    #[display("Configuration error: {message}")]
    Configuration { message: String },

    /// The outbound payload could not be serialized.
    #[display("Serialization error: {message}")]
    Serialization { message: String },

    /// A response body from the exchange could not be mapped to a bid.
    #[display("Invalid response: {message}")]
    InvalidResponse { message: String },
}
