// The main crate is wasm-only, so host tests pull the pure engine modules in
// directly. Module names mirror `src/core/` so `super::` paths resolve.
#![allow(dead_code)]

pub mod plaza {
    pub mod basket {
        include!("../../src/core/basket.rs");
    }
    pub mod catalog {
        include!("../../src/core/catalog.rs");
    }
    pub mod constants {
        include!("../../src/core/constants.rs");
    }
    pub mod grid {
        include!("../../src/core/grid.rs");
    }
    pub mod layout {
        include!("../../src/core/layout.rs");
    }
    pub mod motion {
        include!("../../src/core/motion.rs");
    }
    pub mod projection {
        include!("../../src/core/projection.rs");
    }
    pub mod state {
        include!("../../src/core/state.rs");
    }
}

use plaza::catalog::{Catalog, DjRecord};

pub fn dj(name: &str, genres: &[&str], location: &str, bpm: &str) -> DjRecord {
    DjRecord {
        name: name.to_string(),
        genres: genres.iter().map(|g| g.to_string()).collect(),
        location: location.to_string(),
        bpm: bpm.to_string(),
    }
}

pub fn bands() -> Vec<String> {
    ["90-110", "110-125", "125-140", "140-155", "155-170"]
        .iter()
        .map(|s| s.to_string())
        .collect()
}

/// Small mixed catalog: featured DJs in Berlin/Paris/Tokyo plus non-featured ones.
pub fn sample_catalog() -> Catalog {
    Catalog::new(
        vec![
            dj("A", &["Electronic"], "Berlin", "125-140"),
            dj("B", &["House"], "Berlin", "90-110"),
            dj("C", &["Electronic", "Techno"], "Paris", "125-140"),
            dj("D", &["Electronic", "House"], "Berlin", "125-140"),
            dj("E", &["Techno"], "Paris", "140-155"),
            dj("F", &["Electronic"], "Tokyo", "125-140"),
            dj("G", &["Electronic", "Disco"], "Paris", "125-140"),
            dj("H", &["Ambient"], "Tokyo", "110-125"),
        ],
        bands(),
    )
}

/// `n` featured DJs spread over three locations.
pub fn featured_catalog(n: usize) -> Catalog {
    let locations = ["Berlin", "Paris", "London"];
    Catalog::new(
        (0..n)
            .map(|i| dj(&format!("DJ {i}"), &["Electronic"], locations[i % 3], "125-140"))
            .collect(),
        bands(),
    )
}
