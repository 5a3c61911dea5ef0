// Host-side tests for catalog parsing and lookups.

#![allow(dead_code)]
mod common;

use common::plaza::catalog::*;
use common::{dj, sample_catalog};

#[test]
fn parses_json_and_derives_lookup_lists() {
    let json = r#"{
        "djs": [
            { "name": "A", "genres": ["Electronic", "House"], "location": "Berlin", "bpm": "125-140" },
            { "name": "B", "genres": ["House"], "location": "Paris", "bpm": "90-110" },
            { "name": "C", "genres": ["Techno", "Electronic"], "location": "Berlin", "bpm": "125-140" }
        ]
    }"#;
    let catalog = Catalog::from_json(json).expect("valid catalog");
    assert_eq!(catalog.len(), 3);
    assert_eq!(catalog.genres, vec!["Electronic", "House", "Techno"]);
    assert_eq!(catalog.locations, vec!["Berlin", "Paris"]);
    // no explicit bands: first-appearance order
    assert_eq!(catalog.bpms, vec!["125-140", "90-110"]);
}

#[test]
fn explicit_bpm_bands_are_kept_in_order() {
    let json = r#"{ "bpms": ["90-110", "125-140", "155-170"], "djs": [] }"#;
    let catalog = Catalog::from_json(json).expect("valid catalog");
    assert!(catalog.is_empty());
    assert_eq!(catalog.bpms, vec!["90-110", "125-140", "155-170"]);
}

#[test]
fn malformed_json_is_an_error() {
    assert!(Catalog::from_json("{ \"djs\": 3 }").is_err());
    assert!(Catalog::from_json("not json").is_err());
}

#[test]
fn duplicate_genres_collapse() {
    let catalog = Catalog::new(
        vec![dj("A", &["House", "House", "Disco"], "Lisbon", "110-125")],
        Vec::new(),
    );
    assert_eq!(catalog.djs[0].genres, vec!["House", "Disco"]);
}

#[test]
fn featured_needs_both_band_and_genre() {
    assert!(is_featured(&dj("A", &["Electronic"], "Berlin", "125-140")));
    assert!(is_featured(&dj("A", &["House", "Electronic"], "Berlin", "125-140")));
    assert!(!is_featured(&dj("B", &["House"], "Berlin", "125-140")));
    assert!(!is_featured(&dj("C", &["Electronic"], "Berlin", "140-155")));
}

#[test]
fn unmapped_flag_locations_have_no_decoration() {
    assert_eq!(flag_for_location("London"), Some("FLAG=GB.svg"));
    assert_eq!(flag_for_location("Sydney"), Some("FLAG=AU.svg"));
    assert_eq!(flag_for_location("Tokyo"), None);
    assert_eq!(flag_for_location(""), None);
}

#[test]
fn top_stat_counts_and_breaks_ties_by_first_seen() {
    let catalog = sample_catalog();
    let top = catalog.top_stat(|_| true, |d| std::iter::once(&d.location));
    // Berlin (3) ties Paris (3); Berlin appears first
    assert_eq!(top, Some("Berlin"));

    let top_genre = catalog.top_stat(|d| d.location == "Paris", |d| d.genres.iter());
    assert_eq!(top_genre, Some("Electronic"));

    let none = catalog.top_stat(|_| false, |d| std::iter::once(&d.bpm));
    assert_eq!(none, None);
}

#[test]
fn bundled_catalog_parses() {
    let json = include_str!("../assets/djs.json");
    let catalog = Catalog::from_json(json).expect("bundled catalog");
    assert!(!catalog.is_empty());
    assert_eq!(catalog.bpms.len(), 5);
    assert!(catalog.djs.iter().any(is_featured));
}
