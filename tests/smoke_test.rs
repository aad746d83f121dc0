//! Live smoke test against the public Scryfall API.
//!
//! Run with:
//! ```sh
//! cargo test -- --ignored --nocapture
//! ```

use chrono::Utc;
use mtg_spoiler_sdk::{LoadStatus, SpoilerSdk};

#[test]
#[ignore]
fn smoke_test() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter("mtg_spoiler_sdk=debug")
        .with_test_writer()
        .try_init();

    let tmp = tempfile::tempdir().unwrap();
    let sdk = SpoilerSdk::builder().prefs_dir(tmp.path()).build().unwrap();
    eprintln!("{sdk}");

    let releases = sdk.releases().list().unwrap();
    eprintln!("catalog: {} releases", releases.len());
    assert!(releases.len() > 100);

    let lea = sdk.releases().get("LEA").unwrap().unwrap();
    assert_eq!(lea.code, "lea");
    assert!(sdk.releases().get("zzzzzz").unwrap().is_none());

    let dashboard = sdk.load_dashboard(Utc::now());
    eprintln!("status: {:?}", dashboard.status());
    match dashboard.target() {
        Some(target) => {
            eprintln!(
                "tracking {} ({}), {} cards, countdown {:?}",
                target.name(),
                target.code(),
                dashboard.cards().len(),
                dashboard.countdown(Utc::now())
            );
            assert!(matches!(
                dashboard.status(),
                LoadStatus::Ready | LoadStatus::Degraded(_)
            ));
        }
        None => assert_eq!(dashboard.status(), &LoadStatus::NothingTracked),
    }

    let collection = sdk.collect("lea");
    eprintln!("LEA: {} cards over {} pages", collection.len(), collection.pages);
    assert!(collection.is_complete());
    assert!(collection.len() > 250);
}
