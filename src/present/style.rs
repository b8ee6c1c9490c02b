//! Terminal colors
//!
//! Each helper maps a label to its styled form. Styling is skipped when
//! stdout is not a terminal or `NO_COLOR` is set.

use std::io::IsTerminal;
use std::sync::OnceLock;

const GREEN: &str = "32";
const YELLOW: &str = "33";
const RED: &str = "31";
const CYAN: &str = "36";
const BLUE_UNDERLINE: &str = "34;4";

/// Sequence that wipes scrollback and the visible screen
pub const CLEAR_SCREEN: &str = "\x1b[3;J\x1b[H\x1b[2J";

fn enabled() -> bool {
    static ENABLED: OnceLock<bool> = OnceLock::new();
    *ENABLED.get_or_init(|| {
        std::env::var_os("NO_COLOR").is_none() && std::io::stdout().is_terminal()
    })
}

fn paint(text: &str, code: &str) -> String {
    if enabled() {
        format!("\x1b[{code}m{text}\x1b[0m")
    } else {
        text.to_string()
    }
}

/// Success marker
pub fn success(text: &str) -> String {
    paint(text, GREEN)
}

/// Header and field-label marker
pub fn header(text: &str) -> String {
    paint(text, BLUE_UNDERLINE)
}

/// Informational marker
pub fn info(text: &str) -> String {
    paint(text, YELLOW)
}

/// Keyword shown in the prompt
pub fn prompt(text: &str) -> String {
    paint(text, CYAN)
}

/// Error marker
pub fn error(text: &str) -> String {
    paint(text, RED)
}
