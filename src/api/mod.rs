//! Market data API module
//!
//! Typed access to the Indodax public REST endpoints

mod client;
mod error;
mod types;

pub use client::{
    check_status, decode, depth_path, ticker_path, trades_path, ApiClient, HttpTransport,
    INDODAX_API_URL, PAIRS_PATH, SERVER_TIME_PATH,
};
pub use error::ApiError;
pub use types::{Depth, DepthLevel, ServerTime, Ticker, Trade, TradingPair};

use async_trait::async_trait;

/// Status and body of one HTTP response
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawResponse {
    pub status: u16,
    pub body: Vec<u8>,
}

/// Trait for issuing a GET against the exchange
#[async_trait]
pub trait Transport: Send + Sync {
    /// GET `path` relative to the base endpoint
    async fn get(&self, path: &str) -> Result<RawResponse, ApiError>;
}
