use std::path::PathBuf;
use std::time::Duration;

pub const API_BASE: &str = "https://api.scryfall.com";
pub const SETS_PATH: &str = "/sets";
pub const CARD_SEARCH_PATH: &str = "/cards/search";

/// Scryfall rejects requests without a descriptive agent and an explicit
/// `Accept` header.
pub const USER_AGENT: &str = concat!("mtg-spoiler-sdk/", env!("CARGO_PKG_VERSION"));
pub const ACCEPT: &str = "application/json;q=0.9,*/*;q=0.8";

/// Prerelease events run one week ahead of the general release date.
pub const PRERELEASE_OFFSET_DAYS: i64 = 7;

/// How long a release stays "current" after it has shipped.
pub const RECENT_GRACE_DAYS: i64 = 60;

/// Pause between consecutive search pages. Scryfall asks for 50-100ms.
pub const DEFAULT_PAGE_DELAY: Duration = Duration::from_millis(100);

pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Fallback wait on HTTP 429 when no `Retry-After` header is present.
pub const DEFAULT_RETRY_AFTER: Duration = Duration::from_secs(1);

pub const THEME_FILE: &str = "theme.txt";

pub fn sets_url(base: &str) -> String {
    format!("{}{}", base.trim_end_matches('/'), SETS_PATH)
}

pub fn set_url(base: &str, code: &str) -> String {
    format!(
        "{}{}/{}",
        base.trim_end_matches('/'),
        SETS_PATH,
        code.to_lowercase()
    )
}

pub fn card_search_url(base: &str) -> String {
    format!("{}{}", base.trim_end_matches('/'), CARD_SEARCH_PATH)
}

pub fn default_prefs_dir() -> PathBuf {
    if let Some(config) = dirs::config_dir() {
        config.join("mtg-spoiler-sdk")
    } else {
        PathBuf::from(".mtg-spoiler-sdk")
    }
}
