use chrono::{DateTime, Duration, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::config;

// ---------------------------------------------------------------------------
// ReleaseCategory — Scryfall `set_type`
// ---------------------------------------------------------------------------

/// The kind of product a release is, as reported by the upstream `set_type`.
///
/// Unknown values are kept verbatim in [`ReleaseCategory::Other`] so new
/// upstream categories never break deserialization.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum ReleaseCategory {
    Core,
    Expansion,
    Masters,
    DraftInnovation,
    Commander,
    Alchemy,
    Masterpiece,
    Arsenal,
    FromTheVault,
    Spellbook,
    PremiumDeck,
    DuelDeck,
    Planechase,
    Archenemy,
    Starter,
    Box,
    Promo,
    Token,
    Memorabilia,
    Minigame,
    Funny,
    TreasureChest,
    Other(String),
}

impl ReleaseCategory {
    /// Categories the resolver tracks unless configured otherwise.
    pub fn default_trackable() -> Vec<ReleaseCategory> {
        vec![
            ReleaseCategory::Expansion,
            ReleaseCategory::Core,
            ReleaseCategory::Masters,
            ReleaseCategory::DraftInnovation,
        ]
    }

    pub fn as_str(&self) -> &str {
        match self {
            ReleaseCategory::Core => "core",
            ReleaseCategory::Expansion => "expansion",
            ReleaseCategory::Masters => "masters",
            ReleaseCategory::DraftInnovation => "draft_innovation",
            ReleaseCategory::Commander => "commander",
            ReleaseCategory::Alchemy => "alchemy",
            ReleaseCategory::Masterpiece => "masterpiece",
            ReleaseCategory::Arsenal => "arsenal",
            ReleaseCategory::FromTheVault => "from_the_vault",
            ReleaseCategory::Spellbook => "spellbook",
            ReleaseCategory::PremiumDeck => "premium_deck",
            ReleaseCategory::DuelDeck => "duel_deck",
            ReleaseCategory::Planechase => "planechase",
            ReleaseCategory::Archenemy => "archenemy",
            ReleaseCategory::Starter => "starter",
            ReleaseCategory::Box => "box",
            ReleaseCategory::Promo => "promo",
            ReleaseCategory::Token => "token",
            ReleaseCategory::Memorabilia => "memorabilia",
            ReleaseCategory::Minigame => "minigame",
            ReleaseCategory::Funny => "funny",
            ReleaseCategory::TreasureChest => "treasure_chest",
            ReleaseCategory::Other(s) => s,
        }
    }
}

impl From<String> for ReleaseCategory {
    fn from(value: String) -> Self {
        match value.as_str() {
            "core" => ReleaseCategory::Core,
            "expansion" => ReleaseCategory::Expansion,
            "masters" => ReleaseCategory::Masters,
            "draft_innovation" => ReleaseCategory::DraftInnovation,
            "commander" => ReleaseCategory::Commander,
            "alchemy" => ReleaseCategory::Alchemy,
            "masterpiece" => ReleaseCategory::Masterpiece,
            "arsenal" => ReleaseCategory::Arsenal,
            "from_the_vault" => ReleaseCategory::FromTheVault,
            "spellbook" => ReleaseCategory::Spellbook,
            "premium_deck" => ReleaseCategory::PremiumDeck,
            "duel_deck" => ReleaseCategory::DuelDeck,
            "planechase" => ReleaseCategory::Planechase,
            "archenemy" => ReleaseCategory::Archenemy,
            "starter" => ReleaseCategory::Starter,
            "box" => ReleaseCategory::Box,
            "promo" => ReleaseCategory::Promo,
            "token" => ReleaseCategory::Token,
            "memorabilia" => ReleaseCategory::Memorabilia,
            "minigame" => ReleaseCategory::Minigame,
            "funny" => ReleaseCategory::Funny,
            "treasure_chest" => ReleaseCategory::TreasureChest,
            _ => ReleaseCategory::Other(value),
        }
    }
}

impl From<&str> for ReleaseCategory {
    fn from(value: &str) -> Self {
        ReleaseCategory::from(value.to_string())
    }
}

impl From<ReleaseCategory> for String {
    fn from(value: ReleaseCategory) -> Self {
        value.as_str().to_string()
    }
}

impl fmt::Display for ReleaseCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// Release — one entry of the `/sets` catalog
// ---------------------------------------------------------------------------

/// A named, dated publication of a card set.
///
/// `released_at` is kept as the raw upstream string: entries with a missing
/// or malformed date are skipped by the resolver rather than failing the
/// whole catalog decode.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Release {
    pub code: String,
    pub name: String,
    #[serde(default)]
    pub released_at: Option<String>,
    #[serde(rename = "set_type")]
    pub category: ReleaseCategory,
    #[serde(default)]
    pub card_count: Option<u32>,
    #[serde(default)]
    pub digital: bool,
    #[serde(default)]
    pub icon_svg_uri: Option<String>,
    #[serde(default)]
    pub search_uri: Option<String>,
}

impl Release {
    /// Parse `released_at` as an ISO calendar date.
    pub fn release_date(&self) -> Option<NaiveDate> {
        self.released_at
            .as_deref()
            .and_then(|s| NaiveDate::parse_from_str(s.trim(), "%Y-%m-%d").ok())
    }

    /// The release date as an instant (UTC midnight).
    pub fn release_instant(&self) -> Option<DateTime<Utc>> {
        self.release_date()
            .and_then(|d| d.and_hms_opt(0, 0, 0))
            .map(|dt| dt.and_utc())
    }

    /// Release code canonicalized for upstream queries.
    pub fn query_code(&self) -> String {
        self.code.to_lowercase()
    }
}

// ---------------------------------------------------------------------------
// TargetRelease — the release tracked for the session
// ---------------------------------------------------------------------------

/// The single release selected as "current", together with its derived
/// instants. Immutable once resolved.
#[derive(Debug, Clone, PartialEq)]
pub struct TargetRelease {
    release: Release,
    release_instant: DateTime<Utc>,
    prerelease_instant: DateTime<Utc>,
}

impl TargetRelease {
    /// Wrap a release; `None` if its date does not parse.
    pub fn new(release: Release) -> Option<Self> {
        let release_instant = release.release_instant()?;
        let prerelease_instant = release_instant - Duration::days(config::PRERELEASE_OFFSET_DAYS);
        Some(Self {
            release,
            release_instant,
            prerelease_instant,
        })
    }

    pub fn release(&self) -> &Release {
        &self.release
    }

    pub fn code(&self) -> &str {
        &self.release.code
    }

    pub fn name(&self) -> &str {
        &self.release.name
    }

    pub fn release_instant(&self) -> DateTime<Utc> {
        self.release_instant
    }

    /// Release date minus seven days; the countdown's zero point.
    pub fn prerelease_instant(&self) -> DateTime<Utc> {
        self.prerelease_instant
    }

    pub fn into_release(self) -> Release {
        self.release
    }
}
