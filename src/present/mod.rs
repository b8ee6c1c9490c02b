//! Console presentation
//!
//! Renders decoded records as labeled, colored lines. Every renderer writes
//! to a caller-supplied sink so output can be captured.

pub mod style;

use crate::api::{Depth, DepthLevel, ServerTime, Ticker, Trade, TradingPair};
use chrono::{TimeZone, Utc};
use rust_decimal::RoundingStrategy;
use std::fmt::Display;
use std::io::{self, Write};

const TIME_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Format unix seconds as UTC `YYYY-MM-DD HH:MM:SS`
pub fn format_epoch_secs(secs: i64) -> String {
    match Utc.timestamp_opt(secs, 0).single() {
        Some(dt) => dt.format(TIME_FORMAT).to_string(),
        None => format!("invalid timestamp ({secs})"),
    }
}

/// Format unix milliseconds as UTC `YYYY-MM-DD HH:MM:SS`, dropping the fraction
pub fn format_epoch_millis(millis: i64) -> String {
    match Utc.timestamp_millis_opt(millis).single() {
        Some(dt) => dt.format(TIME_FORMAT).to_string(),
        None => format!("invalid timestamp ({millis})"),
    }
}

/// Startup banner
pub fn banner<W: Write>(out: &mut W) -> io::Result<()> {
    writeln!(
        out,
        "[{}] This program is using {}!",
        style::info("i"),
        style::success("Official IndoDax API")
    )
}

/// Main prompt, left open for input on the same line
pub fn prompt<W: Write>(out: &mut W) -> io::Result<()> {
    write!(
        out,
        "Use {} if you don't know the commands.\n--> ",
        style::prompt("help")
    )?;
    out.flush()
}

/// Follow-up prompt for commands that take a pair symbol
pub fn symbol_prompt<W: Write>(out: &mut W) -> io::Result<()> {
    write!(out, "Enter pair symbol (e.g., btcidr): ")?;
    out.flush()
}

/// Command list
pub fn help<W: Write>(out: &mut W) -> io::Result<()> {
    const GENERAL: [(&str, &str); 3] = [
        ("clear", "Clear prompt"),
        ("servertime", "Provide server time on exchange"),
        ("pairs", "Provide available pairs on exchange"),
    ];
    const PER_PAIR: [(&str, &str); 3] = [
        ("ticker", "Provide ticker information for a pair"),
        ("trades", "Provide recent trades for a pair"),
        ("depth", "Provide order book depth for a pair"),
    ];

    writeln!(out, "{}", style::header("[i] Command List"))?;
    for (name, about) in GENERAL {
        writeln!(out, "[{}] {} | {}", style::header("*"), name, about)?;
    }
    for (name, about) in PER_PAIR {
        writeln!(out, "[{}] {} | {}", style::header("="), name, about)?;
    }
    writeln!(out, "[{}] {} | {}", style::header("*"), "exit", "Leave the program")
}

/// Acknowledge `clear` before the screen is wiped
pub fn clearing<W: Write>(out: &mut W) -> io::Result<()> {
    writeln!(out, "[{}] Clearing prompt.", style::success("+"))?;
    out.flush()
}

/// Wipe scrollback and screen
pub fn clear_screen<W: Write>(out: &mut W) -> io::Result<()> {
    write!(out, "{}", style::CLEAR_SCREEN)?;
    out.flush()
}

/// Anything the dispatcher does not recognize
pub fn unknown_command<W: Write>(out: &mut W) -> io::Result<()> {
    writeln!(out, "[{}] Unknown command", style::error("!"))
}

/// A failed command
pub fn error<W: Write>(out: &mut W, err: &dyn Display) -> io::Result<()> {
    writeln!(out, "[{}] {}", style::error("!"), err)
}

/// `servertime`
pub fn server_time<W: Write>(out: &mut W, st: &ServerTime) -> io::Result<()> {
    writeln!(
        out,
        "[{}] Server Time: {} {}",
        style::success("+"),
        format_epoch_millis(st.server_time),
        st.timezone
    )
}

/// `pairs`, one block per pair in input order
pub fn pairs<W: Write>(out: &mut W, pairs: &[TradingPair]) -> io::Result<()> {
    for pair in pairs {
        writeln!(out, "[{}] ID: {}", style::success("+"), pair.id)?;
        writeln!(out, "[{}] Symbol: {}", style::header("-"), pair.symbol)?;
        writeln!(out, "[{}] Base Currency: {}", style::header("-"), pair.base_currency)?;
        writeln!(out, "[{}] Description: {}", style::header("-"), pair.description)?;
        writeln!(out)?;
    }
    Ok(())
}

/// `ticker`
pub fn ticker<W: Write>(out: &mut W, ticker: &Ticker) -> io::Result<()> {
    let label = style::header("-");

    writeln!(out, "[{}] Last Price: {}", style::success("+"), ticker.last)?;
    writeln!(out, "[{}] High: {}", label, ticker.high)?;
    writeln!(out, "[{}] Low: {}", label, ticker.low)?;
    for (currency, volume) in ticker.volumes() {
        writeln!(out, "[{}] Volume in {}: {}", label, currency, volume)?;
    }
    writeln!(out, "[{}] Buy: {}", label, ticker.buy)?;
    writeln!(out, "[{}] Sell: {}", label, ticker.sell)?;
    writeln!(
        out,
        "[{}] Server Time: {}",
        label,
        format_epoch_secs(ticker.server_time)
    )?;
    writeln!(out)
}

/// `trades`, one block per trade in input order
pub fn trades<W: Write>(out: &mut W, trades: &[Trade]) -> io::Result<()> {
    let label = style::header("-");

    for trade in trades {
        writeln!(out, "[{}] Trade ID: {}", style::success("+"), trade.tid)?;
        writeln!(out, "[{}] Date: {}", label, format_epoch_secs(trade.date))?;
        writeln!(out, "[{}] Type: {}", label, trade.side)?;
        writeln!(out, "[{}] Price: {}", label, trade.price)?;
        writeln!(out, "[{}] Amount: {}", label, trade.amount)?;
        writeln!(out)?;
    }
    Ok(())
}

/// `depth`, buy side then sell side
///
/// Returns how many levels were skipped because their price did not parse.
pub fn depth<W: Write>(out: &mut W, depth: &Depth) -> io::Result<usize> {
    writeln!(out, "{}", style::header("[Buy Orders]"))?;
    let mut skipped = levels(out, &depth.buy)?;
    writeln!(out)?;
    writeln!(out, "{}", style::header("[Sell Orders]"))?;
    skipped += levels(out, &depth.sell)?;
    Ok(skipped)
}

/// Prices are rounded half away from zero on the decimal text, so `1.005`
/// renders `1.01` where a binary float would give `1.00`.
fn levels<W: Write>(out: &mut W, levels: &[DepthLevel]) -> io::Result<usize> {
    let mut skipped = 0;
    for level in levels {
        match level.price_decimal() {
            Ok(price) => {
                let mut price =
                    price.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);
                price.rescale(2);
                writeln!(
                    out,
                    "[{}] Price: {}, Amount: {}",
                    style::success("+"),
                    price,
                    level.amount
                )?;
            }
            Err(e) => {
                tracing::warn!(price = %level.price, error = %e, "Skipping depth level");
                writeln!(out, "[{}] Error parsing price: {}", style::error("!"), e)?;
                skipped += 1;
            }
        }
    }
    Ok(skipped)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn render(f: impl FnOnce(&mut Vec<u8>) -> io::Result<()>) -> String {
        let mut buf = Vec::new();
        f(&mut buf).unwrap();
        String::from_utf8(buf).unwrap()
    }

    fn level(price: &str, amount: &str) -> DepthLevel {
        DepthLevel {
            price: price.to_string(),
            amount: amount.to_string(),
        }
    }

    #[test]
    fn test_format_epoch_millis() {
        assert_eq!(format_epoch_millis(1_700_000_000_000), "2023-11-14 22:13:20");
        assert_eq!(format_epoch_millis(1_700_000_000_999), "2023-11-14 22:13:20");
        assert_eq!(format_epoch_millis(0), "1970-01-01 00:00:00");
    }

    #[test]
    fn test_format_epoch_secs() {
        assert_eq!(format_epoch_secs(1_700_000_000), "2023-11-14 22:13:20");
        assert_eq!(format_epoch_secs(i64::MAX), format!("invalid timestamp ({})", i64::MAX));
    }

    #[test]
    fn test_server_time_line() {
        let st = ServerTime {
            server_time: 1_700_000_000_000,
            timezone: "UTC".to_string(),
        };
        let text = render(|out| server_time(out, &st));
        assert!(text.contains("Server Time: 2023-11-14 22:13:20 UTC"));
        assert_eq!(text.lines().count(), 1);
    }

    #[test]
    fn test_pairs_blocks_in_order() {
        let list: Vec<TradingPair> = ["btcidr", "ethidr", "usdtidr"]
            .iter()
            .map(|id| TradingPair {
                id: id.to_string(),
                symbol: id.to_uppercase(),
                base_currency: "idr".to_string(),
                description: format!("{} pair", id),
            })
            .collect();

        let text = render(|out| pairs(out, &list));
        let ids: Vec<&str> = text
            .lines()
            .filter_map(|l| l.split_once("ID: ").map(|(_, id)| id))
            .collect();
        assert_eq!(ids, ["btcidr", "ethidr", "usdtidr"]);
        assert_eq!(text.matches("Symbol: ").count(), 3);
        assert_eq!(text.matches("Base Currency: ").count(), 3);
        assert_eq!(text.matches("Description: ").count(), 3);
    }

    #[test]
    fn test_pairs_empty() {
        let text = render(|out| pairs(out, &[]));
        assert!(text.is_empty());
    }

    #[test]
    fn test_ticker_lines() {
        let snapshot: Ticker = serde_json::from_str(
            r#"{"high":"2","low":"1","vol_btc":"3","vol_idr":"4",
                "last":"1.5","buy":"1.4","sell":"1.6","server_time":1700000000}"#,
        )
        .unwrap();
        let text = render(|out| ticker(out, &snapshot));
        let order = [
            "Last Price: 1.5",
            "High: 2",
            "Low: 1",
            "Volume in BTC: 3",
            "Volume in IDR: 4",
            "Buy: 1.4",
            "Sell: 1.6",
            "Server Time: 2023-11-14 22:13:20",
        ];
        let mut from = 0;
        for needle in order {
            let at = text[from..]
                .find(needle)
                .unwrap_or_else(|| panic!("missing or out of order: {needle}"));
            from += at;
        }
    }

    #[test]
    fn test_trades_lines() {
        let list: Vec<Trade> = serde_json::from_str(
            r#"[{"date":"1700000000","price":"100","amount":"0.1","tid":"42","type":"sell"}]"#,
        )
        .unwrap();
        let text = render(|out| trades(out, &list));
        assert!(text.contains("Trade ID: 42"));
        assert!(text.contains("Date: 2023-11-14 22:13:20"));
        assert!(text.contains("Type: sell"));
        assert!(text.contains("Price: 100"));
        assert!(text.contains("Amount: 0.1"));
    }

    #[test]
    fn test_depth_level_format() {
        let book = Depth {
            buy: vec![level("123.45", "0.5")],
            sell: vec![level("1013000000", "0.00212870")],
        };
        let mut buf = Vec::new();
        let skipped = depth(&mut buf, &book).unwrap();
        let text = String::from_utf8(buf).unwrap();
        assert_eq!(skipped, 0);
        assert!(text.contains("Price: 123.45, Amount: 0.5"));
        assert!(text.contains("Price: 1013000000.00, Amount: 0.00212870"));
        assert!(text.find("[Buy Orders]").unwrap() < text.find("[Sell Orders]").unwrap());
    }

    #[test]
    fn test_depth_rounds_to_two_places() {
        let book = Depth {
            buy: vec![level("1.005", "1"), level("2.5", "1"), level("7", "1")],
            sell: vec![],
        };
        let mut buf = Vec::new();
        depth(&mut buf, &book).unwrap();
        let text = String::from_utf8(buf).unwrap();
        assert!(text.contains("Price: 1.01, Amount: 1"));
        assert!(text.contains("Price: 2.50, Amount: 1"));
        assert!(text.contains("Price: 7.00, Amount: 1"));
    }

    #[test]
    fn test_depth_skips_bad_price() {
        let book = Depth {
            buy: vec![level("abc", "1"), level("10", "2")],
            sell: vec![level("11", "3"), level("", "4")],
        };
        let mut buf = Vec::new();
        let skipped = depth(&mut buf, &book).unwrap();
        let text = String::from_utf8(buf).unwrap();
        assert_eq!(skipped, 2);
        assert_eq!(text.matches("Error parsing price").count(), 2);
        assert!(text.contains("Price: 10.00, Amount: 2"));
        assert!(text.contains("Price: 11.00, Amount: 3"));
        assert!(!text.contains("Amount: 1\n"));
        assert!(!text.contains("Amount: 4"));
    }

    #[test]
    fn test_help_lists_commands() {
        let text = render(help);
        for name in ["clear", "servertime", "pairs", "ticker", "trades", "depth", "exit"] {
            assert!(text.contains(&format!("{name} |")), "missing {name}");
        }
    }

    #[test]
    fn test_unknown_command_single_line() {
        let text = render(unknown_command);
        assert_eq!(text.lines().count(), 1);
        assert!(text.contains("Unknown command"));
    }
}
