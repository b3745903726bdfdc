//! Trait definition for bidder adapters.

use error_stack::Report;

use crate::error::AdapterError;

use super::types::{
    BidRequest, BidResponse, BidderRequest, GlobalConfig, MediaType, ServerRequest,
    ServerResponse, SyncOptions, UserSync,
};

/// Trait implemented by every bidder adapter.
///
/// The host drives the calls in order: filter bids with
/// [`is_bid_request_valid`](Self::is_bid_request_valid), describe the
/// outbound call with [`build_requests`](Self::build_requests), send it
/// itself, then hand the reply to
/// [`interpret_response`](Self::interpret_response). Adapters never perform
/// I/O.
pub trait BidderAdapter: Send + Sync {
    /// Bidder code publishers use in their ad unit configuration.
    fn code(&self) -> &'static str;

    /// Alternative codes resolving to this adapter.
    fn aliases(&self) -> &'static [&'static str] {
        &[]
    }

    /// Media types this adapter can bid on.
    fn supported_media_types(&self) -> &'static [MediaType] {
        &[MediaType::Banner]
    }

    fn supports_media_type(&self, media_type: MediaType) -> bool {
        self.supported_media_types().contains(&media_type)
    }

    /// Check if this adapter is enabled.
    fn is_enabled(&self) -> bool {
        true
    }

    /// Decide whether a bid request carries the parameters the exchange needs.
    fn is_bid_request_valid(&self, bid: &BidRequest) -> bool;

    /// Describe the HTTP request for all valid bid requests of one auction.
    ///
    /// # Errors
    ///
    /// Returns an error if the request payload cannot be serialized.
    fn build_requests(
        &self,
        valid_bid_requests: &[BidRequest],
        bidder_request: &BidderRequest,
        config: &GlobalConfig,
    ) -> Result<ServerRequest, Report<AdapterError>>;

    /// Map an exchange response to bids. Malformed responses yield no bids.
    fn interpret_response(
        &self,
        response: &ServerResponse,
        request: &ServerRequest,
    ) -> Vec<BidResponse>;

    /// Cookie-sync endpoints to load after the auction.
    fn get_user_syncs(
        &self,
        sync_options: &SyncOptions,
        responses: &[ServerResponse],
    ) -> Vec<UserSync>;
}
