use super::constants::{FEATURED_BPM, FEATURED_GENRE};
use anyhow::Context;
use fnv::FnvHashMap;
use serde::{Deserialize, Serialize};

/// One DJ as shipped in the catalog JSON. Identity is `name`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct DjRecord {
    pub name: String,
    pub genres: Vec<String>,
    pub location: String,
    pub bpm: String,
}

impl DjRecord {
    pub fn has_genre(&self, genre: &str) -> bool {
        self.genres.iter().any(|g| g == genre)
    }
}

#[derive(Deserialize)]
struct CatalogFile {
    djs: Vec<DjRecord>,
    #[serde(default)]
    bpms: Vec<String>,
}

/// Read-only DJ table plus the lookup lists the filter controls are built from.
///
/// - `genres` / `locations`: distinct values in first-appearance order
/// - `bpms`: ordered BPM bands (slider order); taken from the file when given
#[derive(Clone, Debug, Default)]
pub struct Catalog {
    pub djs: Vec<DjRecord>,
    pub genres: Vec<String>,
    pub locations: Vec<String>,
    pub bpms: Vec<String>,
}

impl Catalog {
    pub fn new(djs: Vec<DjRecord>, bpms: Vec<String>) -> Self {
        let mut djs = djs;
        for dj in &mut djs {
            dedup_in_order(&mut dj.genres);
        }
        let genres = distinct(djs.iter().flat_map(|d| d.genres.iter()));
        let locations = distinct(djs.iter().map(|d| &d.location));
        let bpms = if bpms.is_empty() {
            distinct(djs.iter().map(|d| &d.bpm))
        } else {
            bpms
        };
        Self {
            djs,
            genres,
            locations,
            bpms,
        }
    }

    pub fn from_json(json: &str) -> anyhow::Result<Self> {
        let file: CatalogFile = serde_json::from_str(json).context("parsing catalog json")?;
        Ok(Self::new(file.djs, file.bpms))
    }

    pub fn len(&self) -> usize {
        self.djs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.djs.is_empty()
    }

    /// Most common value of `extract` among DJs passing `keep`.
    /// Ties go to the value seen first.
    pub fn top_stat<'a, K, E, I>(&'a self, keep: K, extract: E) -> Option<&'a str>
    where
        K: Fn(&DjRecord) -> bool,
        E: Fn(&'a DjRecord) -> I,
        I: IntoIterator<Item = &'a String>,
    {
        let mut index: FnvHashMap<&str, usize> = FnvHashMap::default();
        let mut tallies: Vec<(&str, usize)> = Vec::new();
        for dj in self.djs.iter().filter(|d| keep(*d)) {
            for v in extract(dj) {
                let key = v.as_str();
                let slot = *index.entry(key).or_insert_with(|| {
                    tallies.push((key, 0));
                    tallies.len() - 1
                });
                tallies[slot].1 += 1;
            }
        }
        let mut top = None;
        let mut max = 0;
        for (key, count) in tallies {
            if count > max {
                max = count;
                top = Some(key);
            }
        }
        top
    }
}

/// The hard-coded "festival headliner" rule: only these DJs can be filtered into the grid.
#[inline]
pub fn is_featured(dj: &DjRecord) -> bool {
    dj.bpm == FEATURED_BPM && dj.has_genre(FEATURED_GENRE)
}

/// Flag image shown under an avatar in grid mode; `None` means no decoration.
pub fn flag_for_location(location: &str) -> Option<&'static str> {
    match location {
        "Berlin" | "Paris" => Some("FLAG.svg"),
        "London" => Some("FLAG=GB.svg"),
        "New York" | "Los Angeles" => Some("FLAG=US.svg"),
        "Melbourne" | "Sydney" => Some("FLAG=AU.svg"),
        "São Paulo" => Some("FLAG=BR.svg"),
        _ => None,
    }
}

fn distinct<'a>(values: impl Iterator<Item = &'a String>) -> Vec<String> {
    let mut out: Vec<String> = Vec::new();
    for v in values {
        if !out.contains(v) {
            out.push(v.clone());
        }
    }
    out
}

fn dedup_in_order(values: &mut Vec<String>) {
    let mut seen: Vec<String> = Vec::with_capacity(values.len());
    values.retain(|v| {
        if seen.contains(v) {
            false
        } else {
            seen.push(v.clone());
            true
        }
    });
}
