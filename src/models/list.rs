use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// ListPage — Scryfall's paginated `list` envelope
// ---------------------------------------------------------------------------

/// One page of a Scryfall list response.
///
/// `next_page` is an opaque, fully-qualified request target; it must be
/// followed verbatim.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ListPage<T> {
    #[serde(default)]
    pub has_more: bool,
    #[serde(default)]
    pub next_page: Option<String>,
    #[serde(default)]
    pub total_cards: Option<u32>,
    #[serde(default)]
    pub warnings: Option<Vec<String>>,
    #[serde(default = "Vec::new")]
    pub data: Vec<T>,
}

impl<T> ListPage<T> {
    /// Continuation to follow, if the page says there is one.
    pub fn continuation(&self) -> Option<&str> {
        if self.has_more {
            self.next_page.as_deref()
        } else {
            None
        }
    }
}

// ---------------------------------------------------------------------------
// ApiErrorBody — Scryfall's `error` object
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiErrorBody {
    pub status: u16,
    pub code: String,
    #[serde(default)]
    pub details: String,
    #[serde(default)]
    pub warnings: Option<Vec<String>>,
}
