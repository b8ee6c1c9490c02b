//! Wire types for Indodax public endpoints
//!
//! Numeric prices, amounts and volumes stay as the text the exchange sent.
//! The exchange is not consistent about quoting numbers (depth prices are bare
//! numbers on some pairs), so every numeric-as-string field accepts either a
//! JSON string or a JSON number and keeps its textual form.

use rust_decimal::Decimal;
use serde::{de, Deserialize, Deserializer};
use std::collections::BTreeMap;
use std::str::FromStr;

/// Response of `/api/server_time`
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ServerTime {
    /// Milliseconds since the unix epoch
    pub server_time: i64,
    /// Timezone label reported by the exchange
    pub timezone: String,
}

/// One entry of `/api/pairs`
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct TradingPair {
    pub id: String,
    pub symbol: String,
    pub base_currency: String,
    pub description: String,
}

/// Envelope of `/api/ticker/{symbol}`
#[derive(Debug, Clone, Deserialize)]
pub struct TickerResponse {
    pub ticker: Ticker,
}

/// Market snapshot for one pair
#[derive(Debug, Clone, Deserialize)]
pub struct Ticker {
    #[serde(deserialize_with = "text_or_number")]
    pub high: String,
    #[serde(deserialize_with = "text_or_number")]
    pub low: String,
    #[serde(deserialize_with = "text_or_number")]
    pub last: String,
    #[serde(deserialize_with = "text_or_number")]
    pub buy: String,
    #[serde(deserialize_with = "text_or_number")]
    pub sell: String,
    /// Seconds since the unix epoch
    #[serde(deserialize_with = "epoch")]
    pub server_time: i64,
    /// Remaining fields, including the per-currency `vol_<cur>` volumes
    #[serde(flatten)]
    pub extra: BTreeMap<String, serde_json::Value>,
}

impl Ticker {
    /// Volume fields as `(CURRENCY, amount)`, ordered by currency
    pub fn volumes(&self) -> Vec<(String, String)> {
        self.extra
            .iter()
            .filter_map(|(key, value)| {
                let currency = key.strip_prefix("vol_")?;
                let amount = match value {
                    serde_json::Value::String(s) => s.clone(),
                    serde_json::Value::Number(n) => n.to_string(),
                    _ => return None,
                };
                Some((currency.to_uppercase(), amount))
            })
            .collect()
    }
}

/// One entry of `/api/trades/{symbol}`
#[derive(Debug, Clone, Deserialize)]
pub struct Trade {
    #[serde(deserialize_with = "text_or_number")]
    pub tid: String,
    /// Seconds since the unix epoch
    #[serde(deserialize_with = "epoch")]
    pub date: i64,
    /// `buy` or `sell`
    #[serde(rename = "type")]
    pub side: String,
    #[serde(deserialize_with = "text_or_number")]
    pub price: String,
    #[serde(deserialize_with = "text_or_number")]
    pub amount: String,
}

/// Response of `/api/depth/{symbol}`
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Depth {
    #[serde(default)]
    pub buy: Vec<DepthLevel>,
    #[serde(default)]
    pub sell: Vec<DepthLevel>,
}

/// One aggregated price level, sent on the wire as `[price, amount]`
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(from = "(TextOrNumber, TextOrNumber)")]
pub struct DepthLevel {
    pub price: String,
    pub amount: String,
}

impl DepthLevel {
    /// Parse the price text as a decimal
    pub fn price_decimal(&self) -> Result<Decimal, rust_decimal::Error> {
        Decimal::from_str(&self.price)
            .or_else(|e| Decimal::from_scientific(&self.price).map_err(|_| e))
    }
}

impl From<(TextOrNumber, TextOrNumber)> for DepthLevel {
    fn from((price, amount): (TextOrNumber, TextOrNumber)) -> Self {
        Self {
            price: price.into_text(),
            amount: amount.into_text(),
        }
    }
}

/// Error body the exchange returns with a 200 status, e.g. for an unknown pair
#[derive(Debug, Clone, Deserialize)]
pub struct ErrorEnvelope {
    pub error: String,
    #[serde(default)]
    pub error_description: Option<String>,
}

/// A JSON scalar the exchange may send quoted or bare
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum TextOrNumber {
    Text(String),
    Number(serde_json::Number),
}

impl TextOrNumber {
    fn into_text(self) -> String {
        match self {
            Self::Text(s) => s,
            Self::Number(n) => n.to_string(),
        }
    }
}

fn text_or_number<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    TextOrNumber::deserialize(deserializer).map(TextOrNumber::into_text)
}

fn epoch<'de, D>(deserializer: D) -> Result<i64, D::Error>
where
    D: Deserializer<'de>,
{
    match TextOrNumber::deserialize(deserializer)? {
        TextOrNumber::Text(s) => s
            .trim()
            .parse()
            .map_err(|_| de::Error::custom(format!("invalid epoch timestamp: {s:?}"))),
        TextOrNumber::Number(n) => n
            .as_i64()
            .ok_or_else(|| de::Error::custom(format!("invalid epoch timestamp: {n}"))),
    }
}
