//! Wire-format decoding tests for releases, cards and list pages.

use mtg_spoiler_sdk::models::{
    Card, Color, ColorClass, ImageSize, ListPage, Rarity, Release, ReleaseCategory,
};
use serde_json::json;

// ---------------------------------------------------------------------------
// Release
// ---------------------------------------------------------------------------

#[test]
fn release_decodes_scryfall_set_object() {
    let release: Release = serde_json::from_value(json!({
        "object": "set",
        "id": "a4a0db50-8826-4e73-833c-3fd934375f96",
        "code": "DSK",
        "name": "Duskmourn: House of Horror",
        "released_at": "2024-09-27",
        "set_type": "expansion",
        "card_count": 286,
        "digital": false,
        "foil_only": false,
        "icon_svg_uri": "https://svgs.scryfall.io/sets/dsk.svg"
    }))
    .unwrap();

    assert_eq!(release.category, ReleaseCategory::Expansion);
    assert_eq!(release.query_code(), "dsk");
    assert_eq!(release.card_count, Some(286));
    assert_eq!(
        release.release_date().unwrap().to_string(),
        "2024-09-27"
    );
}

#[test]
fn unknown_set_type_is_preserved() {
    let release: Release = serde_json::from_value(json!({
        "code": "xyz",
        "name": "Mystery",
        "set_type": "holiday_special"
    }))
    .unwrap();

    assert_eq!(
        release.category,
        ReleaseCategory::Other("holiday_special".into())
    );
    assert_eq!(release.category.to_string(), "holiday_special");
    assert!(release.release_date().is_none());
}

#[test]
fn malformed_date_does_not_fail_decoding() {
    let release: Release = serde_json::from_value(json!({
        "code": "bad",
        "name": "Bad Date",
        "set_type": "core",
        "released_at": "2024-13-45"
    }))
    .unwrap();

    assert!(release.release_instant().is_none());
}

#[test]
fn sets_list_page_decodes() {
    let page: ListPage<Release> = serde_json::from_value(json!({
        "object": "list",
        "has_more": false,
        "data": [
            {"code": "fdn", "name": "Foundations", "set_type": "core", "released_at": "2024-11-15"},
            {"code": "j25", "name": "Foundations Jumpstart", "set_type": "draft_innovation", "released_at": "2024-11-15"}
        ]
    }))
    .unwrap();

    assert_eq!(page.data.len(), 2);
    assert!(page.continuation().is_none());
}

// ---------------------------------------------------------------------------
// Card
// ---------------------------------------------------------------------------

#[test]
fn card_search_page_decodes_with_continuation() {
    let page: ListPage<Card> = serde_json::from_value(json!({
        "object": "list",
        "total_cards": 400,
        "has_more": true,
        "next_page": "https://api.scryfall.com/cards/search?format=json&order=spoiled&page=2&q=e%3Adsk&unique=prints",
        "data": [{
            "object": "card",
            "id": "0001",
            "name": "Lightning Bolt",
            "set": "dsk",
            "collector_number": "150",
            "mana_cost": "{R}",
            "cmc": 1.0,
            "colors": ["R"],
            "rarity": "uncommon",
            "type_line": "Instant",
            "image_uris": {"normal": "https://cards.scryfall.io/normal/0001.jpg"},
            "scryfall_uri": "https://scryfall.com/card/dsk/150/lightning-bolt"
        }]
    }))
    .unwrap();

    assert_eq!(page.total_cards, Some(400));
    assert!(page.continuation().unwrap().contains("page=2"));
    let bolt = &page.data[0];
    assert_eq!(bolt.colors(), vec![Color::R]);
    assert_eq!(bolt.rarity, Rarity::Uncommon);
    assert_eq!(bolt.mana_cost(), Some("{R}"));
    assert_eq!(
        bolt.details_uri.as_deref(),
        Some("https://scryfall.com/card/dsk/150/lightning-bolt")
    );
}

#[test]
fn has_more_without_next_page_stops() {
    let page: ListPage<Card> =
        serde_json::from_value(json!({"has_more": true, "data": []})).unwrap();
    assert!(page.continuation().is_none());
}

#[test]
fn multi_faced_card_reads_first_face() {
    let card: Card = serde_json::from_value(json!({
        "id": "dfc-1",
        "name": "Delver of Secrets // Insectile Aberration",
        "cmc": 1.0,
        "rarity": "common",
        "card_faces": [
            {
                "name": "Delver of Secrets",
                "mana_cost": "{U}",
                "colors": ["U"],
                "image_uris": {"normal": "https://cards.scryfall.io/normal/front/dfc-1.jpg"}
            },
            {
                "name": "Insectile Aberration",
                "mana_cost": "",
                "colors": ["U"],
                "image_uris": {"normal": "https://cards.scryfall.io/normal/back/dfc-1.jpg"}
            }
        ]
    }))
    .unwrap();

    assert_eq!(card.color_class(), ColorClass::Blue);
    assert_eq!(card.mana_cost(), Some("{U}"));
    assert_eq!(
        card.image(ImageSize::Normal),
        Some("https://cards.scryfall.io/normal/front/dfc-1.jpg")
    );
}

#[test]
fn missing_image_is_not_an_error() {
    let card: Card = serde_json::from_value(json!({
        "id": "noimg",
        "name": "Unrevealed",
        "colors": []
    }))
    .unwrap();

    assert!(!card.has_image());
    assert!(card.image(ImageSize::Large).is_none());
    assert_eq!(card.color_class(), ColorClass::Colorless);
    assert_eq!(card.cmc, 0.0);
}

#[test]
fn colors_are_canonical_and_deduplicated() {
    let card: Card = serde_json::from_value(json!({
        "id": "gold",
        "name": "Messy Gold",
        "colors": ["G", "W", "G", "X"]
    }))
    .unwrap();

    assert_eq!(card.colors(), vec![Color::W, Color::G]);
    assert_eq!(card.color_class(), ColorClass::Multicolor);
}

#[test]
fn color_class_ranks() {
    let ranks: Vec<u8> = ColorClass::ALL.iter().map(|c| c.rank()).collect();
    assert_eq!(ranks, vec![0, 1, 2, 3, 4, 5, 6]);
    assert_eq!(ColorClass::of(&[]), ColorClass::Colorless);
    assert_eq!(ColorClass::of(&[Color::B]), ColorClass::Black);
    assert_eq!(ColorClass::of(&[Color::B, Color::R]), ColorClass::Multicolor);
    assert!(ColorClass::Multicolor < ColorClass::Colorless);
}
