use std::env;

use chess_core::NotationLocale;

/// Settings shared by every command. Built once at startup and passed down
/// explicitly.
#[derive(Clone, Debug)]
pub struct Config {
    /// Piece letters used in printed move lists.
    pub locale: NotationLocale,
    /// Pretty-print emitted blobs.
    pub pretty: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            locale: NotationLocale::Czech,
            pretty: true,
        }
    }
}

impl Config {
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            locale: env::var("ANNOTATOR_LOCALE")
                .ok()
                .and_then(|v| match v.parse() {
                    Ok(locale) => Some(locale),
                    Err(e) => {
                        tracing::warn!("Ignoring ANNOTATOR_LOCALE: {e}");
                        None
                    }
                })
                .unwrap_or(defaults.locale),
            pretty: env::var("ANNOTATOR_PRETTY")
                .ok()
                .and_then(|v| parse_flag(&v))
                .unwrap_or(defaults.pretty),
        }
    }
}

fn parse_flag(value: &str) -> Option<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}
