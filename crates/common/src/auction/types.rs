//! Host framework request and response shapes shared by bidder adapters.

use error_stack::{Report, ResultExt};
use http::Method;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value as Json};

use crate::error::AdapterError;

/// Media type enumeration.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum MediaType {
    Banner,
    Video,
    Native,
}

/// One advertiser's request to bid on one ad slot.
///
/// Only `params` is interpreted by adapters. The host's object is held as-is,
/// explicit `null`s and unknown keys included, so it can be forwarded
/// unmodified. Typed accessors are read-only views over that object.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(transparent)]
pub struct BidRequest {
    fields: Map<String, Json>,
}

impl BidRequest {
    /// Raw value of a top-level key.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&Json> {
        self.fields.get(key)
    }

    #[must_use]
    pub fn bidder(&self) -> Option<&str> {
        self.get("bidder").and_then(Json::as_str)
    }

    #[must_use]
    pub fn bid_id(&self) -> Option<&str> {
        self.get("bidId").and_then(Json::as_str)
    }

    #[must_use]
    pub fn ad_unit_code(&self) -> Option<&str> {
        self.get("adUnitCode").and_then(Json::as_str)
    }

    /// Bidder-specific parameters configured by the publisher
    #[must_use]
    pub fn params(&self) -> Option<&Json> {
        self.get("params")
    }

    #[must_use]
    pub fn media_types(&self) -> Option<&Json> {
        self.get("mediaTypes")
    }

    /// Look up a single bidder parameter. Non-object `params` have no fields.
    #[must_use]
    pub fn param(&self, name: &str) -> Option<&Json> {
        self.params()?.get(name)
    }

    #[must_use]
    pub fn as_map(&self) -> &Map<String, Json> {
        &self.fields
    }
}

impl From<Map<String, Json>> for BidRequest {
    fn from(fields: Map<String, Json>) -> Self {
        Self { fields }
    }
}

/// Page location details collected by the host.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct RefererInfo {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub page: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub domain: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reached_top: Option<bool>,
    /// Older flat representation still consumed by some exchanges
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub legacy: Option<Json>,
    #[serde(default, flatten)]
    pub extra: Map<String, Json>,
}

/// Auction-scoped envelope handed to a bidder adapter.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct BidderRequest {
    pub bidder_code: String,
    pub auction_id: String,
    pub bidder_request_id: String,
    #[serde(default)]
    pub bids: Vec<BidRequest>,
    /// Auction start, epoch milliseconds
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub auction_start: Option<u64>,
    /// Timeout budget in milliseconds
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timeout: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub referer_info: Option<RefererInfo>,
    /// Time this bidder request was created, epoch milliseconds
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub start: Option<u64>,
    /// Consent object from the host consent module, forwarded verbatim. An
    /// explicit `null` is kept as `Some(Null)`.
    #[serde(
        default,
        deserialize_with = "present_value",
        skip_serializing_if = "Option::is_none"
    )]
    pub gdpr_consent: Option<Json>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub usp_consent: Option<String>,
    /// OpenRTB 2 shaped first-party data (`site`, `user`, `app`, ...)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ortb2: Option<Json>,
}

/// Deserialize a key that is present, `null` included, as `Some`. Absent
/// keys fall back to `None` via `#[serde(default)]`.
fn present_value<'de, D>(deserializer: D) -> Result<Option<Json>, D::Error>
where
    D: Deserializer<'de>,
{
    Json::deserialize(deserializer).map(Some)
}

/// Host-global values adapters may forward. Supplied explicitly by the host
/// instead of being read from process-wide state.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GlobalConfig {
    /// `currency.adServerCurrency`
    pub ad_server_currency: Option<String>,
    /// `coppa`
    pub coppa: Option<bool>,
}

/// Description of the HTTP request the host should send on the adapter's
/// behalf.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerRequest {
    pub method: Method,
    pub url: String,
    /// Serialized request body
    pub data: String,
}

impl ServerRequest {
    #[must_use]
    pub fn post(url: impl Into<String>, data: String) -> Self {
        Self {
            method: Method::POST,
            url: url.into(),
            data,
        }
    }
}

/// Raw response received by the host transport.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ServerResponse {
    pub body: Option<Json>,
}

impl ServerResponse {
    #[must_use]
    pub fn new(body: Json) -> Self {
        Self { body: Some(body) }
    }

    /// Decode a response body. An empty body yields a response without one.
    ///
    /// # Errors
    ///
    /// Returns [`AdapterError::InvalidResponse`] when the bytes are not JSON.
    pub fn from_slice(bytes: &[u8]) -> Result<Self, Report<AdapterError>> {
        if bytes.iter().all(u8::is_ascii_whitespace) {
            return Ok(Self::default());
        }
        let body = serde_json::from_slice(bytes).change_context(AdapterError::InvalidResponse {
            message: "Failed to parse response JSON".to_string(),
        })?;
        Ok(Self { body: Some(body) })
    }
}

/// Normalized bid returned to the host.
///
/// Values are copied from the exchange response without conversion. A field
/// absent upstream stays `None`; an explicit `null` is kept as `Some(Null)`.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct BidResponse {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub request_id: Option<Json>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cpm: Option<Json>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub currency: Option<Json>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub width: Option<Json>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub height: Option<Json>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ad: Option<Json>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ttl: Option<Json>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub creative_id: Option<Json>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub net_revenue: Option<Json>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub vast_url: Option<Json>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub deal_id: Option<Json>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub meta: Option<Json>,
}

/// Publisher user-sync settings passed to `get_user_syncs`.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct SyncOptions {
    #[serde(default)]
    pub pixel_enabled: bool,
    #[serde(default)]
    pub iframe_enabled: bool,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum SyncType {
    Image,
    Iframe,
}

/// A cookie-sync endpoint the host should load.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct UserSync {
    #[serde(rename = "type")]
    pub sync_type: SyncType,
    pub url: String,
}

impl UserSync {
    #[must_use]
    pub fn image(url: impl Into<String>) -> Self {
        Self {
            sync_type: SyncType::Image,
            url: url.into(),
        }
    }
}
