#[cfg(test)]
pub mod tests {
    use log::{Level, LevelFilter, Log, Metadata, Record};
    use serde_json::json;
    use std::sync::{Mutex, Once};
    use std::thread::{self, ThreadId};

    use crate::auction::types::{BidRequest, BidderRequest, RefererInfo};
    use crate::settings::Settings;

    pub fn crate_test_settings_str() -> String {
        r#"
            coppa = true

            [currency]
            ad_server_currency = "EUR"

            [inmar]
            enabled = true
            endpoint = "https://test-exchange.com/bidder/pb/bid"
            sync_url = "https://test-px.com/eucm/p/pb"

            [inmar.merge]
            arrays = "concat"
            conflicts = "keep_existing"
            "#
        .to_string()
    }

    /// Variables the settings tests override; cleared while loading fixtures.
    pub const OVERRIDE_VARS: [&str; 2] = [
        "INMAR_ADAPTER__INMAR__ENDPOINT",
        "INMAR_ADAPTER__CURRENCY__AD_SERVER_CURRENCY",
    ];

    pub fn create_test_settings() -> Settings {
        let toml_str = crate_test_settings_str();
        temp_env::with_vars_unset(OVERRIDE_VARS, || Settings::from_toml(&toml_str))
            .expect("Invalid config")
    }

    pub fn test_bid_request(bid_id: &str, partner_id: &str) -> BidRequest {
        serde_json::from_value(json!({
            "bidder": "inmar",
            "bidId": bid_id,
            "adUnitCode": format!("div-gpt-ad-{bid_id}"),
            "params": {"partnerId": partner_id},
            "mediaTypes": {"banner": {"sizes": [[300, 250], [728, 90]]}},
            "transactionId": format!("txn-{bid_id}"),
            "auctionId": "auction-123",
            "src": "client"
        }))
        .expect("valid bid request fixture")
    }

    pub fn test_bidder_request(bids: Vec<BidRequest>) -> BidderRequest {
        BidderRequest {
            bidder_code: "inmar".to_string(),
            auction_id: "auction-123".to_string(),
            bidder_request_id: "bidder-request-456".to_string(),
            bids,
            auction_start: Some(1_700_000_000_000),
            timeout: Some(1000),
            referer_info: Some(RefererInfo {
                page: Some("https://publisher.example/article".to_string()),
                domain: Some("publisher.example".to_string()),
                reached_top: Some(true),
                legacy: Some(json!({
                    "reachedTop": true,
                    "isAmp": false,
                    "numIframes": 0,
                    "stack": ["https://publisher.example/article"],
                    "referer": "https://publisher.example/article",
                    "canonicalUrl": null
                })),
                extra: serde_json::Map::new(),
            }),
            start: Some(1_700_000_000_005),
            gdpr_consent: Some(json!({
                "consentString": "COwGVJOOwGVJOADABBENAPCAAP",
                "gdprApplies": true,
                "apiVersion": 2
            })),
            usp_consent: Some("1YNN".to_string()),
            ortb2: Some(json!({
                "site": {
                    "page": "https://publisher.example/article",
                    "content": {"language": "en"},
                    "data": [{"name": "publisher.example", "segment": [{"id": "1"}]}],
                    "ext": {"data": {"section": "news"}}
                },
                "user": {
                    "keywords": "sports,tennis",
                    "data": [{"name": "dmp.example", "segment": [{"id": "42"}]}]
                },
                "device": {"ua": "Mozilla/5.0", "language": "en"}
            })),
        }
    }

    struct CapturedRecord {
        thread: ThreadId,
        level: Level,
        message: String,
    }

    /// Global `log` backend that keeps every record for later inspection.
    struct CapturingLogger {
        records: Mutex<Vec<CapturedRecord>>,
    }

    impl Log for CapturingLogger {
        fn enabled(&self, _metadata: &Metadata) -> bool {
            true
        }

        fn log(&self, record: &Record) {
            if let Ok(mut records) = self.records.lock() {
                records.push(CapturedRecord {
                    thread: thread::current().id(),
                    level: record.level(),
                    message: record.args().to_string(),
                });
            }
        }

        fn flush(&self) {}
    }

    static CAPTURE: CapturingLogger = CapturingLogger {
        records: Mutex::new(Vec::new()),
    };
    static INSTALL: Once = Once::new();

    /// Install the capturing logger as the process-wide `log` backend.
    pub fn install_capturing_logger() {
        INSTALL.call_once(|| {
            if log::set_logger(&CAPTURE).is_ok() {
                log::set_max_level(LevelFilter::Trace);
            }
        });
    }

    fn take_records(thread: ThreadId) -> Vec<(Level, String)> {
        let mut records = CAPTURE.records.lock().expect("log capture lock");
        let (mine, others): (Vec<_>, Vec<_>) =
            records.drain(..).partition(|record| record.thread == thread);
        *records = others;
        mine.into_iter()
            .map(|record| (record.level, record.message))
            .collect()
    }

    /// Run `f` and return its result with the records it logged on this
    /// thread.
    pub fn capture_logs<R>(f: impl FnOnce() -> R) -> (R, Vec<(Level, String)>) {
        install_capturing_logger();
        let thread = thread::current().id();
        take_records(thread);

        let result = f();
        (result, take_records(thread))
    }
}
