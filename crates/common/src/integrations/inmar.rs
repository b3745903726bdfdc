//! Inmar (OwnerIQ) bidder adapter.
//!
//! Forwards the whole auction to the Inmar exchange in a single POST and
//! reads back at most one bid. Cookie sync is a single image pixel.

use error_stack::{Report, ResultExt};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value as Json};
use std::sync::Arc;
use validator::Validate;

use crate::auction::provider::BidderAdapter;
use crate::auction::types::{
    BidRequest, BidResponse, BidderRequest, GlobalConfig, MediaType, ServerRequest, ServerResponse,
    SyncOptions, UserSync,
};
use crate::error::AdapterError;
use crate::fpd::legacy_fpd;
use crate::json_util::{is_truthy, is_truthy_opt};
use crate::merge::MergePolicy;
use crate::settings::Settings;

pub const BIDDER_CODE: &str = "inmar";
const ALIASES: &[&str] = &["inm"];
const SUPPORTED_MEDIA_TYPES: &[MediaType] = &[MediaType::Banner, MediaType::Video];
const PARTNER_ID_PARAM: &str = "partnerId";

/// Host framework version reported to the exchange, fixed at build time.
pub const PREBID_VERSION: &str = match option_env!("PREBID_VERSION") {
    Some(version) => version,
    None => env!("CARGO_PKG_VERSION"),
};

// ============================================================================
// Inmar API Types
// ============================================================================

/// Request body sent to `/bidder/pb/bid`.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct InmarPayload<'a> {
    bidder_code: &'a str,
    auction_id: &'a str,
    bidder_request_id: &'a str,

    /// Forwarded exactly as received from the host
    bid_requests: &'a [BidRequest],

    #[serde(skip_serializing_if = "Option::is_none")]
    auction_start: Option<u64>,

    #[serde(skip_serializing_if = "Option::is_none")]
    timeout: Option<u64>,

    /// Legacy referer layout only
    #[serde(skip_serializing_if = "Option::is_none")]
    referer_info: Option<&'a Json>,

    #[serde(skip_serializing_if = "Option::is_none")]
    start: Option<u64>,

    /// Forwarded verbatim, explicit `null` included
    #[serde(skip_serializing_if = "Option::is_none")]
    gdpr_consent: Option<&'a Json>,

    #[serde(skip_serializing_if = "Option::is_none")]
    usp_consent: Option<&'a str>,

    #[serde(skip_serializing_if = "Option::is_none")]
    currency_code: Option<&'a str>,

    #[serde(skip_serializing_if = "Option::is_none")]
    coppa: Option<bool>,

    #[serde(skip_serializing_if = "Option::is_none")]
    first_party_data: Option<Map<String, Json>>,

    prebid_version: &'static str,
}

// ============================================================================
// Inmar Adapter
// ============================================================================

/// Configuration for the Inmar integration.
#[derive(Debug, Clone, Deserialize, Serialize, Validate)]
pub struct InmarConfig {
    /// Whether the adapter is registered
    #[serde(default = "default_enabled")]
    pub enabled: bool,

    /// Exchange bid endpoint
    #[serde(default = "default_endpoint")]
    #[validate(url)]
    pub endpoint: String,

    /// Cookie-sync pixel
    #[serde(default = "default_sync_url")]
    #[validate(url)]
    pub sync_url: String,

    /// How `ext` contents are merged into legacy first-party data
    #[serde(default)]
    pub merge: MergePolicy,
}

fn default_enabled() -> bool {
    true
}

fn default_endpoint() -> String {
    "https://prebid.owneriq.net:8443/bidder/pb/bid".to_string()
}

fn default_sync_url() -> String {
    "https://px.owneriq.net/eucm/p/pb".to_string()
}

impl Default for InmarConfig {
    fn default() -> Self {
        Self {
            enabled: default_enabled(),
            endpoint: default_endpoint(),
            sync_url: default_sync_url(),
            merge: MergePolicy::default(),
        }
    }
}

/// Inmar bidder adapter.
pub struct InmarBidAdapter {
    config: InmarConfig,
}

impl InmarBidAdapter {
    /// Create a new Inmar adapter.
    #[must_use]
    pub fn new(config: InmarConfig) -> Self {
        Self { config }
    }

    fn to_payload<'a>(
        &self,
        valid_bid_requests: &'a [BidRequest],
        bidder_request: &'a BidderRequest,
        config: &'a GlobalConfig,
    ) -> InmarPayload<'a> {
        InmarPayload {
            bidder_code: &bidder_request.bidder_code,
            auction_id: &bidder_request.auction_id,
            bidder_request_id: &bidder_request.bidder_request_id,
            bid_requests: valid_bid_requests,
            auction_start: bidder_request.auction_start,
            timeout: bidder_request.timeout,
            referer_info: bidder_request
                .referer_info
                .as_ref()
                .and_then(|info| info.legacy.as_ref()),
            start: bidder_request.start,
            gdpr_consent: bidder_request.gdpr_consent.as_ref(),
            usp_consent: bidder_request.usp_consent.as_deref(),
            currency_code: config.ad_server_currency.as_deref(),
            coppa: config.coppa,
            first_party_data: legacy_fpd(bidder_request.ortb2.as_ref(), self.config.merge),
            prebid_version: PREBID_VERSION,
        }
    }

    /// Map a response body to a bid.
    ///
    /// A falsy body means no bid. An object body is copied field by field.
    /// Any other body cannot be read and is reported as an error.
    fn parse_bid(body: Option<&Json>) -> Result<Option<BidResponse>, Report<AdapterError>> {
        let Some(body) = body.filter(|body| is_truthy(body)) else {
            return Ok(None);
        };

        let fields = body.as_object().ok_or_else(|| {
            Report::new(AdapterError::InvalidResponse {
                message: format!("expected a JSON object body, got {}", json_kind(body)),
            })
        })?;
        let field = |name: &str| fields.get(name).cloned();

        Ok(Some(BidResponse {
            request_id: field("requestId"),
            cpm: field("cpm"),
            currency: field("currency"),
            width: field("width"),
            height: field("height"),
            ad: field("ad"),
            ttl: field("ttl"),
            creative_id: field("creativeId"),
            net_revenue: field("netRevenue"),
            vast_url: field("vastUrl"),
            deal_id: field("dealId"),
            meta: field("meta"),
        }))
    }
}

fn json_kind(value: &Json) -> &'static str {
    match value {
        Json::Null => "null",
        Json::Bool(_) => "boolean",
        Json::Number(_) => "number",
        Json::String(_) => "string",
        Json::Array(_) => "array",
        Json::Object(_) => "object",
    }
}

impl BidderAdapter for InmarBidAdapter {
    fn code(&self) -> &'static str {
        BIDDER_CODE
    }

    fn aliases(&self) -> &'static [&'static str] {
        ALIASES
    }

    fn supported_media_types(&self) -> &'static [MediaType] {
        SUPPORTED_MEDIA_TYPES
    }

    fn is_enabled(&self) -> bool {
        self.config.enabled
    }

    fn is_bid_request_valid(&self, bid: &BidRequest) -> bool {
        is_truthy_opt(bid.param(PARTNER_ID_PARAM))
    }

    fn build_requests(
        &self,
        valid_bid_requests: &[BidRequest],
        bidder_request: &BidderRequest,
        config: &GlobalConfig,
    ) -> Result<ServerRequest, Report<AdapterError>> {
        log::info!(
            "Inmar: building request for {} bids (auction_id: {})",
            valid_bid_requests.len(),
            bidder_request.auction_id
        );

        let payload = self.to_payload(valid_bid_requests, bidder_request, config);
        let data =
            serde_json::to_string(&payload).change_context(AdapterError::Serialization {
                message: "Failed to serialize Inmar bid request".to_string(),
            })?;

        log::debug!("Inmar: request payload: {}", data);

        Ok(ServerRequest::post(&self.config.endpoint, data))
    }

    fn interpret_response(
        &self,
        response: &ServerResponse,
        _request: &ServerRequest,
    ) -> Vec<BidResponse> {
        match Self::parse_bid(response.body.as_ref()) {
            Ok(Some(bid)) => {
                log::debug!("Inmar: parsed bid for request {:?}", bid.request_id);
                vec![bid]
            }
            Ok(None) => {
                log::debug!("Inmar: empty response body, no bid");
                Vec::new()
            }
            Err(e) => {
                log::error!("Error while parsing inmar response: {e:?}");
                Vec::new()
            }
        }
    }

    fn get_user_syncs(
        &self,
        sync_options: &SyncOptions,
        _responses: &[ServerResponse],
    ) -> Vec<UserSync> {
        if sync_options.pixel_enabled {
            vec![UserSync::image(&self.config.sync_url)]
        } else {
            Vec::new()
        }
    }
}

// ============================================================================
// Adapter Auto-Registration
// ============================================================================

/// Auto-register the Inmar adapter based on settings configuration.
#[must_use]
pub fn register_bidders(settings: &Settings) -> Vec<Arc<dyn BidderAdapter>> {
    let mut adapters: Vec<Arc<dyn BidderAdapter>> = Vec::new();

    if settings.inmar.enabled {
        log::info!(
            "Registering Inmar bidder (endpoint: {})",
            settings.inmar.endpoint
        );
        adapters.push(Arc::new(InmarBidAdapter::new(settings.inmar.clone())));
    } else {
        log::debug!("Inmar integration config found but is disabled");
    }

    adapters
}

// ============================================================================
// Tests
// ============================================================================
