use super::catalog::DjRecord;
use super::state::Filters;
use fnv::FnvHashSet;
use smallvec::{smallvec, SmallVec};

/// Copy of a DJ taken when a selection is confirmed.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DjSnapshot {
    pub name: String,
    pub genres: Vec<String>,
    pub location: String,
    pub bpm: String,
    pub character: u32,
}

impl DjSnapshot {
    pub fn new(dj: &DjRecord, character: u32) -> Self {
        Self {
            name: dj.name.clone(),
            genres: dj.genres.clone(),
            location: dj.location.clone(),
            bpm: dj.bpm.clone(),
            character,
        }
    }
}

/// One confirmed selection. Entries created here always carry exactly one location.
#[derive(Clone, Debug, PartialEq)]
pub struct BasketEntry {
    pub id: u64,
    pub genres: Vec<String>,
    pub locations: SmallVec<[String; 1]>,
    pub bpms: Vec<String>,
    pub djs: Vec<DjSnapshot>,
}

impl BasketEntry {
    fn single_location(&self) -> Option<&str> {
        match self.locations.as_slice() {
            [only] => Some(only.as_str()),
            _ => None,
        }
    }
}

/// Confirmed selections, grouped by location, plus the set of basketed DJ names.
#[derive(Clone, Debug, Default)]
pub struct Basket {
    entries: Vec<BasketEntry>,
    names: FnvHashSet<String>,
    next_id: u64,
}

impl Basket {
    pub fn entries(&self) -> &[BasketEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    #[inline]
    pub fn contains(&self, name: &str) -> bool {
        self.names.contains(name)
    }

    pub fn dj_count(&self) -> usize {
        self.names.len()
    }

    /// Group `djs` by location (first-appearance order) and merge each group into
    /// the entry holding that single location, or append a new entry.
    /// DJs already present in the merged entry are skipped. Returns how many DJs were added.
    pub fn add_selection(&mut self, filters: &Filters, djs: Vec<DjSnapshot>) -> usize {
        let mut groups: Vec<(String, Vec<DjSnapshot>)> = Vec::new();
        for dj in djs {
            match groups.iter_mut().find(|(loc, _)| *loc == dj.location) {
                Some((_, group)) => group.push(dj),
                None => groups.push((dj.location.clone(), vec![dj])),
            }
        }

        let mut added = 0;
        for (location, group) in groups {
            let existing = self
                .entries
                .iter_mut()
                .find(|e| e.single_location() == Some(location.as_str()));
            match existing {
                Some(entry) => {
                    for dj in group {
                        if entry.djs.iter().any(|d| d.name == dj.name) {
                            continue;
                        }
                        self.names.insert(dj.name.clone());
                        entry.djs.push(dj);
                        added += 1;
                    }
                }
                None => {
                    self.next_id += 1;
                    let mut unique: Vec<DjSnapshot> = Vec::with_capacity(group.len());
                    for dj in group {
                        if !unique.iter().any(|d| d.name == dj.name) {
                            unique.push(dj);
                        }
                    }
                    for dj in &unique {
                        self.names.insert(dj.name.clone());
                    }
                    added += unique.len();
                    self.entries.push(BasketEntry {
                        id: self.next_id,
                        genres: filters.genres.clone(),
                        locations: smallvec![location],
                        bpms: filters.bpms.clone(),
                        djs: unique,
                    });
                }
            }
        }
        added
    }

    pub fn remove(&mut self, id: u64) -> bool {
        let before = self.entries.len();
        self.entries.retain(|e| e.id != id);
        if self.entries.len() == before {
            return false;
        }
        self.names = self
            .entries
            .iter()
            .flat_map(|e| e.djs.iter().map(|d| d.name.clone()))
            .collect();
        true
    }
}
