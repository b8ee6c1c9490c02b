//! Indodax REST client
//!
//! Every endpoint goes through the same three steps: a single GET, a status
//! check that only lets 200 through, and a JSON decode into the endpoint's
//! typed record. Nothing is retried or cached.

use super::error::ApiError;
use super::types::{Depth, ErrorEnvelope, ServerTime, Ticker, TickerResponse, Trade, TradingPair};
use super::{RawResponse, Transport};
use crate::config::ApiConfig;
use async_trait::async_trait;
use reqwest::Client;
use serde::de::DeserializeOwned;
use std::time::Duration;

/// Indodax public API base URL
pub const INDODAX_API_URL: &str = "https://indodax.com";

/// Path of the server time endpoint
pub const SERVER_TIME_PATH: &str = "/api/server_time";
/// Path of the trading pairs endpoint
pub const PAIRS_PATH: &str = "/api/pairs";

/// Path of the ticker endpoint for a symbol
pub fn ticker_path(symbol: &str) -> String {
    format!("/api/ticker/{symbol}")
}

/// Path of the recent trades endpoint for a symbol
pub fn trades_path(symbol: &str) -> String {
    format!("/api/trades/{symbol}")
}

/// Path of the order book depth endpoint for a symbol
pub fn depth_path(symbol: &str) -> String {
    format!("/api/depth/{symbol}")
}

/// reqwest-backed transport against a fixed base URL
pub struct HttpTransport {
    base_url: String,
    client: Client,
}

impl HttpTransport {
    /// Build a transport from API configuration
    ///
    /// No request timeout is set unless `timeout_secs` is configured.
    pub fn new(config: &ApiConfig) -> Result<Self, ApiError> {
        let mut builder = Client::builder();
        if let Some(secs) = config.timeout_secs {
            builder = builder.timeout(Duration::from_secs(secs));
        }

        Ok(Self {
            base_url: config.base_url.trim_end_matches('/').to_string(),
            client: builder.build()?,
        })
    }

    /// Base URL requests are issued against
    pub fn base_url(&self) -> &str {
        &self.base_url
    }
}

#[async_trait]
impl Transport for HttpTransport {
    async fn get(&self, path: &str) -> Result<RawResponse, ApiError> {
        let url = format!("{}{}", self.base_url, path);

        tracing::debug!(url = %url, "Fetching from Indodax API");

        let response = self.client.get(&url).send().await?;
        let status = response.status().as_u16();
        let body = response.bytes().await?.to_vec();

        tracing::debug!(status, body_len = body.len(), "Received response");

        Ok(RawResponse { status, body })
    }
}

/// Only HTTP 200 carries a body worth decoding
pub fn check_status(response: RawResponse) -> Result<Vec<u8>, ApiError> {
    if response.status == 200 {
        Ok(response.body)
    } else {
        Err(ApiError::Status(response.status))
    }
}

/// Decode a 200 body into `T`, surfacing the exchange's error envelope if present
pub fn decode<T: DeserializeOwned>(kind: &'static str, body: &[u8]) -> Result<T, ApiError> {
    if let Ok(envelope) = serde_json::from_slice::<ErrorEnvelope>(body) {
        return Err(ApiError::Remote {
            description: envelope
                .error_description
                .unwrap_or_else(|| envelope.error.clone()),
            code: envelope.error,
        });
    }

    serde_json::from_slice(body).map_err(|source| ApiError::Decode { kind, source })
}

/// Typed client over any [`Transport`]
pub struct ApiClient<T> {
    transport: T,
}

impl<T: Transport> ApiClient<T> {
    /// Wrap a transport
    pub fn new(transport: T) -> Self {
        Self { transport }
    }

    #[cfg(test)]
    pub(crate) fn transport(&self) -> &T {
        &self.transport
    }

    /// Exchange clock
    pub async fn server_time(&self) -> Result<ServerTime, ApiError> {
        self.fetch(SERVER_TIME_PATH, "server time").await
    }

    /// All tradable pairs, in exchange order
    pub async fn pairs(&self) -> Result<Vec<TradingPair>, ApiError> {
        self.fetch(PAIRS_PATH, "pairs").await
    }

    /// Ticker snapshot for `symbol`
    pub async fn ticker(&self, symbol: &str) -> Result<Ticker, ApiError> {
        let resp: TickerResponse = self.fetch(&ticker_path(symbol), "ticker").await?;
        Ok(resp.ticker)
    }

    /// Recent trades for `symbol`
    pub async fn trades(&self, symbol: &str) -> Result<Vec<Trade>, ApiError> {
        self.fetch(&trades_path(symbol), "trades").await
    }

    /// Order book depth for `symbol`
    pub async fn depth(&self, symbol: &str) -> Result<Depth, ApiError> {
        self.fetch(&depth_path(symbol), "depth").await
    }

    async fn fetch<D: DeserializeOwned>(
        &self,
        path: &str,
        kind: &'static str,
    ) -> Result<D, ApiError> {
        let response = self.transport.get(path).await?;
        let body = check_status(response)?;
        decode(kind, &body)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    /// Answers every request with the same response and counts calls
    struct FixedTransport {
        status: u16,
        body: &'static str,
        calls: Mutex<Vec<String>>,
    }

    impl FixedTransport {
        fn new(status: u16, body: &'static str) -> Self {
            Self {
                status,
                body,
                calls: Mutex::new(Vec::new()),
            }
        }
    }

    #[async_trait]
    impl Transport for FixedTransport {
        async fn get(&self, path: &str) -> Result<RawResponse, ApiError> {
            self.calls.lock().unwrap().push(path.to_string());
            Ok(RawResponse {
                status: self.status,
                body: self.body.as_bytes().to_vec(),
            })
        }
    }

    struct FailingTransport;

    #[async_trait]
    impl Transport for FailingTransport {
        async fn get(&self, _path: &str) -> Result<RawResponse, ApiError> {
            Err(ApiError::transport("dns error"))
        }
    }

    #[test]
    fn test_check_status_ok() {
        let body = check_status(RawResponse {
            status: 200,
            body: b"{}".to_vec(),
        })
        .unwrap();
        assert_eq!(body, b"{}");
    }

    #[test]
    fn test_check_status_rejects_non_200() {
        for status in [201, 204, 301, 400, 404, 429, 500, 503] {
            let result = check_status(RawResponse {
                status,
                body: b"{}".to_vec(),
            });
            assert!(matches!(result, Err(ApiError::Status(s)) if s == status));
        }
    }

    #[test]
    fn test_decode_error_envelope() {
        let body = br#"{"error":"invalid_pair","error_description":"Invalid Pair"}"#;
        let result: Result<Depth, _> = decode("depth", body);
        match result {
            Err(ApiError::Remote { code, description }) => {
                assert_eq!(code, "invalid_pair");
                assert_eq!(description, "Invalid Pair");
            }
            other => panic!("expected remote error, got {other:?}"),
        }
    }

    #[test]
    fn test_decode_failure_names_kind() {
        let result: Result<Vec<TradingPair>, _> = decode("pairs", b"not json");
        assert!(matches!(result, Err(ApiError::Decode { kind: "pairs", .. })));
    }

    #[test]
    fn test_paths() {
        assert_eq!(ticker_path("btcidr"), "/api/ticker/btcidr");
        assert_eq!(trades_path("ethidr"), "/api/trades/ethidr");
        assert_eq!(depth_path("usdtidr"), "/api/depth/usdtidr");
    }

    #[test]
    fn test_http_transport_trims_base_url() {
        let config = ApiConfig {
            base_url: "https://example.test/".to_string(),
            timeout_secs: Some(5),
        };
        let transport = HttpTransport::new(&config).unwrap();
        assert_eq!(transport.base_url(), "https://example.test");
    }

    #[tokio::test]
    async fn test_server_time_fetch() {
        let client = ApiClient::new(FixedTransport::new(
            200,
            r#"{"server_time":1700000000000,"timezone":"UTC"}"#,
        ));
        let st = client.server_time().await.unwrap();
        assert_eq!(st.server_time, 1_700_000_000_000);
        assert_eq!(
            client.transport().calls.lock().unwrap().as_slice(),
            ["/api/server_time"]
        );
    }

    #[tokio::test]
    async fn test_non_200_skips_decode() {
        // Body is valid JSON for the target shape; a decode would succeed
        let client = ApiClient::new(FixedTransport::new(
            500,
            r#"{"server_time":1700000000000,"timezone":"UTC"}"#,
        ));
        let err = client.server_time().await.unwrap_err();
        assert!(matches!(err, ApiError::Status(500)));
    }

    #[tokio::test]
    async fn test_symbol_used_verbatim() {
        let client = ApiClient::new(FixedTransport::new(200, r#"{"buy":[],"sell":[]}"#));
        client.depth("BTC idr").await.unwrap();
        assert_eq!(
            client.transport().calls.lock().unwrap().as_slice(),
            ["/api/depth/BTC idr"]
        );
    }

    #[tokio::test]
    async fn test_ticker_unwraps_envelope() {
        let client = ApiClient::new(FixedTransport::new(
            200,
            r#"{"ticker":{"high":"2","low":"1","vol_btc":"3","vol_idr":"4",
                "last":"1.5","buy":"1.4","sell":"1.6","server_time":1700000000}}"#,
        ));
        let ticker = client.ticker("btcidr").await.unwrap();
        assert_eq!(ticker.last, "1.5");
    }

    #[tokio::test]
    async fn test_transport_error_propagates() {
        let client = ApiClient::new(FailingTransport);
        let err = client.pairs().await.unwrap_err();
        assert!(matches!(err, ApiError::Transport(_)));
    }
}
