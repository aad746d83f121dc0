use serde::{Deserialize, Serialize};
use std::fmt;

// ---------------------------------------------------------------------------
// Color / ColorClass
// ---------------------------------------------------------------------------

/// One letter of the fixed color alphabet, in canonical WUBRG order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Color {
    W,
    U,
    B,
    R,
    G,
}

impl Color {
    pub const ALL: [Color; 5] = [Color::W, Color::U, Color::B, Color::R, Color::G];

    /// Parse a color symbol (`"W"`, `"u"`, ...). Anything else is `None`.
    pub fn from_symbol(symbol: &str) -> Option<Color> {
        match symbol.trim().to_ascii_uppercase().as_str() {
            "W" => Some(Color::W),
            "U" => Some(Color::U),
            "B" => Some(Color::B),
            "R" => Some(Color::R),
            "G" => Some(Color::G),
            _ => None,
        }
    }

    pub fn symbol(self) -> &'static str {
        match self {
            Color::W => "W",
            Color::U => "U",
            Color::B => "B",
            Color::R => "R",
            Color::G => "G",
        }
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.symbol())
    }
}

/// Sorting and grouping class derived from a card's colors.
///
/// Declaration order is rank order: the derived `Ord` sorts
/// White < Blue < Black < Red < Green < Multicolor < Colorless.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum ColorClass {
    White,
    Blue,
    Black,
    Red,
    Green,
    Multicolor,
    Colorless,
}

impl ColorClass {
    pub const ALL: [ColorClass; 7] = [
        ColorClass::White,
        ColorClass::Blue,
        ColorClass::Black,
        ColorClass::Red,
        ColorClass::Green,
        ColorClass::Multicolor,
        ColorClass::Colorless,
    ];

    /// Classify a color set: none is colorless, one is that color, more is
    /// multicolor.
    pub fn of(colors: &[Color]) -> ColorClass {
        match colors {
            [] => ColorClass::Colorless,
            [single] => ColorClass::from(*single),
            _ => ColorClass::Multicolor,
        }
    }

    pub fn rank(self) -> u8 {
        match self {
            ColorClass::White => 0,
            ColorClass::Blue => 1,
            ColorClass::Black => 2,
            ColorClass::Red => 3,
            ColorClass::Green => 4,
            ColorClass::Multicolor => 5,
            ColorClass::Colorless => 6,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            ColorClass::White => "White",
            ColorClass::Blue => "Blue",
            ColorClass::Black => "Black",
            ColorClass::Red => "Red",
            ColorClass::Green => "Green",
            ColorClass::Multicolor => "Multicolor",
            ColorClass::Colorless => "Colorless",
        }
    }
}

impl From<Color> for ColorClass {
    fn from(color: Color) -> Self {
        match color {
            Color::W => ColorClass::White,
            Color::U => ColorClass::Blue,
            Color::B => ColorClass::Black,
            Color::R => ColorClass::Red,
            Color::G => ColorClass::Green,
        }
    }
}

// ---------------------------------------------------------------------------
// Rarity
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Rarity {
    #[default]
    Common,
    Uncommon,
    Rare,
    Mythic,
    Special,
    Bonus,
    Other(String),
}

impl Rarity {
    pub fn as_str(&self) -> &str {
        match self {
            Rarity::Common => "common",
            Rarity::Uncommon => "uncommon",
            Rarity::Rare => "rare",
            Rarity::Mythic => "mythic",
            Rarity::Special => "special",
            Rarity::Bonus => "bonus",
            Rarity::Other(s) => s,
        }
    }
}

impl From<String> for Rarity {
    fn from(value: String) -> Self {
        match value.as_str() {
            "common" => Rarity::Common,
            "uncommon" => Rarity::Uncommon,
            "rare" => Rarity::Rare,
            "mythic" => Rarity::Mythic,
            "special" => Rarity::Special,
            "bonus" => Rarity::Bonus,
            _ => Rarity::Other(value),
        }
    }
}

impl From<Rarity> for String {
    fn from(value: Rarity) -> Self {
        value.as_str().to_string()
    }
}

// ---------------------------------------------------------------------------
// ImageUris
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImageSize {
    Small,
    Normal,
    Large,
    Png,
    ArtCrop,
    BorderCrop,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ImageUris {
    pub small: Option<String>,
    pub normal: Option<String>,
    pub large: Option<String>,
    pub png: Option<String>,
    pub art_crop: Option<String>,
    pub border_crop: Option<String>,
}

impl ImageUris {
    pub fn get(&self, size: ImageSize) -> Option<&str> {
        let uri = match size {
            ImageSize::Small => &self.small,
            ImageSize::Normal => &self.normal,
            ImageSize::Large => &self.large,
            ImageSize::Png => &self.png,
            ImageSize::ArtCrop => &self.art_crop,
            ImageSize::BorderCrop => &self.border_crop,
        };
        uri.as_deref()
    }
}

// ---------------------------------------------------------------------------
// CardFace / Card
// ---------------------------------------------------------------------------

/// One face of a multi-faced card (transform, modal, split, ...).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CardFace {
    #[serde(default)]
    pub name: String,
    pub mana_cost: Option<String>,
    pub colors: Option<Vec<String>>,
    pub type_line: Option<String>,
    pub oracle_text: Option<String>,
    pub image_uris: Option<ImageUris>,
}

/// One printing of a card, as returned by the card search endpoint.
///
/// Multi-faced cards may omit `colors`, `mana_cost` and `image_uris` at the
/// top level; the accessors fall back to the first face.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Card {
    pub id: String,
    pub name: String,
    #[serde(default, rename = "set")]
    pub set_code: String,
    #[serde(default)]
    pub collector_number: String,
    pub mana_cost: Option<String>,
    pub colors: Option<Vec<String>>,
    #[serde(default)]
    pub cmc: f64,
    #[serde(default)]
    pub rarity: Rarity,
    pub type_line: Option<String>,
    pub oracle_text: Option<String>,
    pub image_uris: Option<ImageUris>,
    pub card_faces: Option<Vec<CardFace>>,
    #[serde(rename = "scryfall_uri")]
    pub details_uri: Option<String>,
}

impl Card {
    fn first_face(&self) -> Option<&CardFace> {
        self.card_faces.as_ref().and_then(|faces| faces.first())
    }

    /// Color identity as a deduplicated set in WUBRG order.
    ///
    /// Unknown symbols are ignored. Falls back to the first face when the
    /// top-level field is absent.
    pub fn colors(&self) -> Vec<Color> {
        let raw = self
            .colors
            .as_ref()
            .or_else(|| self.first_face().and_then(|f| f.colors.as_ref()));
        let mut colors: Vec<Color> = raw
            .map(|symbols| symbols.iter().filter_map(|s| Color::from_symbol(s)).collect())
            .unwrap_or_default();
        colors.sort();
        colors.dedup();
        colors
    }

    pub fn color_class(&self) -> ColorClass {
        ColorClass::of(&self.colors())
    }

    pub fn mana_cost(&self) -> Option<&str> {
        self.mana_cost
            .as_deref()
            .filter(|c| !c.is_empty())
            .or_else(|| self.first_face().and_then(|f| f.mana_cost.as_deref()))
    }

    /// Image reference at the requested size, if the card or its first face
    /// has one. `None` means the caller shows a placeholder.
    pub fn image(&self, size: ImageSize) -> Option<&str> {
        self.image_uris
            .as_ref()
            .and_then(|uris| uris.get(size))
            .or_else(|| {
                self.first_face()
                    .and_then(|f| f.image_uris.as_ref())
                    .and_then(|uris| uris.get(size))
            })
    }

    pub fn has_image(&self) -> bool {
        self.image(ImageSize::Normal).is_some()
    }
}
