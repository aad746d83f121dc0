//! Shared test fixtures for the spoiler SDK integration tests.
//!
//! Provides sample releases and cards built from Scryfall-shaped JSON, plus
//! `ScriptedSource`, a fake paginated card source that replays a fixed
//! sequence of pages (or failures) and records every target it was asked
//! for.

#![allow(dead_code)]

use chrono::{DateTime, Duration, TimeZone, Utc};
use mtg_spoiler_sdk::models::{Card, ListPage, Release};
use mtg_spoiler_sdk::{PageSource, PrintMode, Result, SpoilerError};
use std::cell::RefCell;

/// Fixed "now" used across tests: 2024-06-15 12:00:00 UTC.
pub fn fixed_now() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 6, 15, 12, 0, 0).unwrap()
}

/// `YYYY-MM-DD` of `now + days`.
pub fn date_offset(now: DateTime<Utc>, days: i64) -> String {
    (now + Duration::days(days)).format("%Y-%m-%d").to_string()
}

// ---------------------------------------------------------------------------
// Releases
// ---------------------------------------------------------------------------

pub fn release(code: &str, set_type: &str, released_at: Option<&str>) -> Release {
    serde_json::from_value(serde_json::json!({
        "object": "set",
        "code": code,
        "name": format!("Set {}", code.to_uppercase()),
        "released_at": released_at,
        "set_type": set_type,
        "card_count": 0,
        "digital": false,
        "icon_svg_uri": format!("https://svgs.scryfall.io/sets/{code}.svg"),
        "search_uri": format!("https://api.scryfall.com/cards/search?q=e%3A{code}")
    }))
    .unwrap()
}

/// Release of `set_type` dated `days` from `now`.
pub fn release_in(code: &str, set_type: &str, now: DateTime<Utc>, days: i64) -> Release {
    let date = date_offset(now, days);
    release(code, set_type, Some(&date))
}

// ---------------------------------------------------------------------------
// Cards
// ---------------------------------------------------------------------------

pub fn card(id: &str, name: &str, colors: &[&str], cmc: f64) -> Card {
    serde_json::from_value(serde_json::json!({
        "object": "card",
        "id": id,
        "name": name,
        "set": "tst",
        "collector_number": id,
        "mana_cost": "",
        "colors": colors,
        "cmc": cmc,
        "rarity": "common",
        "type_line": "Creature",
        "image_uris": {
            "small": format!("https://cards.scryfall.io/small/{id}.jpg"),
            "normal": format!("https://cards.scryfall.io/normal/{id}.jpg")
        },
        "scryfall_uri": format!("https://scryfall.com/card/tst/{id}")
    }))
    .unwrap()
}

/// Mono-white, 1-mana filler cards named `<prefix>-<n>`, so a stable sort
/// keeps them in arrival order.
pub fn filler_cards(prefix: &str, count: usize) -> Vec<Card> {
    (0..count)
        .map(|i| {
            let id = format!("{prefix}-{i}");
            card(&id, &format!("Filler {id}"), &["W"], 1.0)
        })
        .collect()
}

/// The four cards of the ordering example: R(3), colorless(1), W(1), UB(2).
pub fn ordering_sample() -> Vec<Card> {
    vec![
        card("red-3", "Goblin Bombardier", &["R"], 3.0),
        card("colorless-1", "Ornithopter", &[], 1.0),
        card("white-1", "Savannah Lions", &["W"], 1.0),
        card("ub-2", "Dimir Signet Thief", &["U", "B"], 2.0),
    ]
}

// ---------------------------------------------------------------------------
// ScriptedSource
// ---------------------------------------------------------------------------

pub enum Step {
    Page(Vec<Card>, bool),
    /// Claims more results but carries no `next_page`.
    Unlinked(Vec<Card>),
    Fail(SpoilerError),
}

/// Replays `steps` in order. Page `n` links to `page-{n+1}` when its
/// `has_more` flag is set.
pub struct ScriptedSource {
    steps: RefCell<Vec<Step>>,
    pub requested: RefCell<Vec<String>>,
    pub initial: RefCell<Option<(String, PrintMode)>>,
}

impl ScriptedSource {
    pub fn new(steps: Vec<Step>) -> Self {
        let mut steps = steps;
        steps.reverse();
        Self {
            steps: RefCell::new(steps),
            requested: RefCell::new(Vec::new()),
            initial: RefCell::new(None),
        }
    }

    pub fn pages(pages: Vec<(Vec<Card>, bool)>) -> Self {
        Self::new(
            pages
                .into_iter()
                .map(|(cards, more)| Step::Page(cards, more))
                .collect(),
        )
    }

    pub fn request_count(&self) -> usize {
        self.requested.borrow().len()
    }
}

impl PageSource for ScriptedSource {
    fn initial_target(&self, release_code: &str, mode: PrintMode) -> String {
        *self.initial.borrow_mut() = Some((release_code.to_string(), mode));
        "page-0".to_string()
    }

    fn fetch_page(&self, target: &str) -> Result<ListPage<Card>> {
        let index = self.requested.borrow().len();
        self.requested.borrow_mut().push(target.to_string());
        match self.steps.borrow_mut().pop() {
            Some(Step::Page(data, has_more)) => Ok(ListPage {
                has_more,
                next_page: has_more.then(|| format!("page-{}", index + 1)),
                total_cards: None,
                warnings: None,
                data,
            }),
            Some(Step::Unlinked(data)) => Ok(ListPage {
                has_more: true,
                next_page: None,
                total_cards: None,
                warnings: None,
                data,
            }),
            Some(Step::Fail(e)) => Err(e),
            None => Err(SpoilerError::NotFound(format!("unscripted request {target}"))),
        }
    }
}

pub fn network_error() -> SpoilerError {
    SpoilerError::Status {
        status: 503,
        url: "https://api.scryfall.com/cards/search".into(),
    }
}

/// A 404 answered by something other than the API (wrong base, proxy).
pub fn bare_not_found() -> SpoilerError {
    SpoilerError::Status {
        status: 404,
        url: "http://wrong-base.invalid/cards/search".into(),
    }
}

pub fn not_found() -> SpoilerError {
    SpoilerError::Api {
        status: 404,
        code: "not_found".into(),
        details: "Your query didn't match any cards.".into(),
    }
}
