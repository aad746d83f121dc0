//! Derived gallery view: search, color filter, selection and grouping.
//!
//! Everything here is synchronous and pure over the already-sorted card
//! list, so callers simply recompute on every input change.

use std::collections::HashSet;
use std::fmt;
use std::str::FromStr;

use crate::error::SpoilerError;
use crate::models::{Card, Color, ColorClass};

// ---------------------------------------------------------------------------
// ColorFilter
// ---------------------------------------------------------------------------

/// Active color filter of the gallery.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ColorFilter {
    /// Exactly this single color. Multicolor cards containing it do not pass.
    Mono(Color),
    Colorless,
    Multicolor,
}

impl ColorFilter {
    pub fn matches(self, colors: &[Color]) -> bool {
        match self {
            ColorFilter::Mono(c) => matches!(colors, [only] if *only == c),
            ColorFilter::Colorless => colors.is_empty(),
            ColorFilter::Multicolor => colors.len() > 1,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            ColorFilter::Mono(c) => c.symbol(),
            ColorFilter::Colorless => "colorless",
            ColorFilter::Multicolor => "multicolor",
        }
    }
}

impl FromStr for ColorFilter {
    type Err = SpoilerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        match trimmed.to_ascii_lowercase().as_str() {
            "colorless" | "c" => Ok(ColorFilter::Colorless),
            "multicolor" | "m" | "gold" => Ok(ColorFilter::Multicolor),
            _ => Color::from_symbol(trimmed)
                .map(ColorFilter::Mono)
                .ok_or_else(|| {
                    SpoilerError::InvalidArgument(format!("unknown color filter: {trimmed}"))
                }),
        }
    }
}

impl fmt::Display for ColorFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// ViewState
// ---------------------------------------------------------------------------

/// User inputs of the gallery. Not persisted.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ViewState {
    pub search_text: String,
    pub color_filter: Option<ColorFilter>,
}

impl ViewState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_search(mut self, text: impl Into<String>) -> Self {
        self.search_text = text.into();
        self
    }

    pub fn with_filter(mut self, filter: ColorFilter) -> Self {
        self.color_filter = Some(filter);
        self
    }

    pub fn set_search(&mut self, text: impl Into<String>) {
        self.search_text = text.into();
    }

    /// Activate `filter`, or clear it when it is already active.
    pub fn toggle_filter(&mut self, filter: ColorFilter) {
        self.color_filter = match self.color_filter {
            Some(active) if active == filter => None,
            _ => Some(filter),
        };
    }

    pub fn clear(&mut self) {
        self.search_text.clear();
        self.color_filter = None;
    }

    /// Both predicates must hold.
    pub fn matches(&self, card: &Card) -> bool {
        self.matches_search(card) && self.matches_filter(card)
    }

    fn matches_search(&self, card: &Card) -> bool {
        self.search_text.is_empty()
            || card
                .name
                .to_lowercase()
                .contains(&self.search_text.to_lowercase())
    }

    fn matches_filter(&self, card: &Card) -> bool {
        match self.color_filter {
            None => true,
            Some(filter) => filter.matches(&card.colors()),
        }
    }
}

/// Cards passing `view`, in input order.
pub fn derive<'c>(cards: &'c [Card], view: &ViewState) -> Vec<&'c Card> {
    cards.iter().filter(|c| view.matches(c)).collect()
}

// ---------------------------------------------------------------------------
// SelectionSet
// ---------------------------------------------------------------------------

/// Card ids marked by the user. Unordered and ephemeral.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SelectionSet {
    ids: HashSet<String>,
}

impl SelectionSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Flip membership of `id`; returns whether it is now selected.
    pub fn toggle(&mut self, id: &str) -> bool {
        if self.ids.remove(id) {
            false
        } else {
            self.ids.insert(id.to_string());
            true
        }
    }

    /// Value-returning form of [`toggle`](Self::toggle).
    pub fn toggled(mut self, id: &str) -> Self {
        self.toggle(id);
        self
    }

    pub fn contains(&self, id: &str) -> bool {
        self.ids.contains(id)
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    pub fn clear(&mut self) {
        self.ids.clear();
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.ids.iter().map(String::as_str)
    }

    /// Selected cards of `cards`, in list order.
    pub fn selected_cards<'c>(&self, cards: &'c [Card]) -> Vec<&'c Card> {
        cards.iter().filter(|c| self.contains(&c.id)).collect()
    }
}

// ---------------------------------------------------------------------------
// Annotation and grouping
// ---------------------------------------------------------------------------

/// A visible card with its selection flag.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CardView<'c> {
    pub card: &'c Card,
    pub selected: bool,
}

pub fn annotate<'c>(cards: &[&'c Card], selection: &SelectionSet) -> Vec<CardView<'c>> {
    cards
        .iter()
        .map(|&card| CardView {
            card,
            selected: selection.contains(&card.id),
        })
        .collect()
}

/// Bucket cards by color class in rank order, keeping input order inside
/// each bucket. Empty buckets are skipped.
pub fn group_by_color<'c>(cards: &[&'c Card]) -> Vec<(ColorClass, Vec<&'c Card>)> {
    ColorClass::ALL
        .iter()
        .filter_map(|class| {
            let bucket: Vec<&Card> = cards
                .iter()
                .copied()
                .filter(|c| c.color_class() == *class)
                .collect();
            if bucket.is_empty() {
                None
            } else {
                Some((*class, bucket))
            }
        })
        .collect()
}
