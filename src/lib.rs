//! indodax-cli: interactive client for the Indodax public market data API
//!
//! This library provides:
//! - Typed access to the server time, pairs, ticker, trades and depth endpoints
//! - Console rendering of each response
//! - The prompt loop that ties them together
//! - Configuration and logging setup

pub mod api;
pub mod cli;
pub mod config;
pub mod present;
pub mod repl;
pub mod telemetry;
