use super::basket::{Basket, DjSnapshot};
use super::catalog::{is_featured, Catalog, DjRecord};
use super::constants::DEFAULT_DISPLAY_CAP;
use super::grid::{grid_positions, GridParams};
use super::layout::{create_avatars, relayout, Avatar, LayoutParams, Viewport};
use super::motion::{self, DepthScroll, Parallax, ScrollInput};
use glam::Vec2;
use rand::prelude::*;

/// User-chosen constraints. Empty lists mean "any"; values within a list are
/// OR-ed, lists are AND-ed.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Filters {
    pub genres: Vec<String>,
    pub locations: Vec<String>,
    pub bpms: Vec<String>,
    /// BPM slider handles as band indices; `None` is the full range.
    pub bpm_range: Option<(usize, usize)>,
}

impl Filters {
    #[inline]
    pub fn is_active(&self) -> bool {
        !self.genres.is_empty() || !self.locations.is_empty() || !self.bpms.is_empty()
    }

    pub fn matches(&self, dj: &DjRecord) -> bool {
        let g = self.genres.is_empty() || dj.genres.iter().any(|x| self.genres.contains(x));
        let l = self.locations.is_empty() || self.locations.contains(&dj.location);
        let b = self.bpms.is_empty() || self.bpms.contains(&dj.bpm);
        g && l && b
    }

    pub fn toggle_genre(&self, genre: &str) -> Self {
        let mut next = self.clone();
        toggle(&mut next.genres, genre);
        next
    }

    pub fn toggle_location(&self, location: &str) -> Self {
        let mut next = self.clone();
        toggle(&mut next.locations, location);
        next
    }

    /// Select the BPM bands between two slider handles (inclusive, either order).
    /// Covering every band clears the BPM constraint.
    pub fn with_bpm_range(&self, bands: &[String], a: usize, b: usize) -> Self {
        let mut next = self.clone();
        let last = bands.len().saturating_sub(1);
        let (lo, hi) = (a.min(b).min(last), a.max(b).min(last));
        if bands.is_empty() || (lo == 0 && hi == last) {
            next.bpms.clear();
            next.bpm_range = None;
        } else {
            next.bpms = bands[lo..=hi].to_vec();
            next.bpm_range = Some((lo, hi));
        }
        next
    }

    /// Slider handles for display; the full range when unconstrained.
    pub fn bpm_handles(&self, band_count: usize) -> (usize, usize) {
        self.bpm_range
            .unwrap_or((0, band_count.saturating_sub(1)))
    }
}

fn toggle(list: &mut Vec<String>, value: &str) {
    if let Some(i) = list.iter().position(|v| v == value) {
        list.remove(i);
    } else {
        list.push(value.to_string());
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum BasketChange {
    Confirm,
    Remove(u64),
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Tick {
    Easing { dt_frames: f32 },
    Depth,
    Parallax { dt_frames: f32 },
}

#[derive(Clone, Debug, PartialEq)]
pub enum Event {
    FilterChanged(Filters),
    BasketChanged(BasketChange),
    DisplayCountChanged(usize),
    ViewportChanged(Viewport),
    Scroll(ScrollInput),
    PointerTarget(Vec2),
    EntryTransitionEnded(usize),
    Tick(Tick),
}

/// What an event asks of a frame loop.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum LoopCmd {
    #[default]
    Keep,
    Start,
    Stop,
}

/// Frame-loop commands produced by one event.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Transition {
    pub easing: LoopCmd,
    pub depth: LoopCmd,
    pub parallax: LoopCmd,
}

/// Whole plaza state: catalog, avatars, filters, basket and motion scalars.
///
/// Every change goes through [`PlazaState::apply`]; the host only schedules
/// frames according to the returned [`Transition`] and draws.
pub struct PlazaState {
    pub catalog: Catalog,
    pub avatars: Vec<Avatar>,
    pub filters: Filters,
    pub basket: Basket,
    pub viewport: Viewport,
    pub display_cap: usize,
    pub grid_scale: f32,
    pub depth: DepthScroll,
    pub parallax: Parallax,
    pub layout_params: LayoutParams,
    pub grid_params: GridParams,
    placed: usize,
    rng: StdRng,
}

impl PlazaState {
    /// Lay out `catalog` for `viewport`. `seed: None` draws from entropy so
    /// every session scatters differently.
    pub fn new(catalog: Catalog, viewport: Viewport, seed: Option<u64>) -> Self {
        let mut rng = match seed {
            Some(s) => StdRng::seed_from_u64(s),
            None => StdRng::from_entropy(),
        };
        let layout_params = LayoutParams::default();
        let avatars = create_avatars(&catalog, viewport, &layout_params, &mut rng);
        Self {
            catalog,
            avatars,
            filters: Filters::default(),
            basket: Basket::default(),
            viewport,
            display_cap: DEFAULT_DISPLAY_CAP,
            grid_scale: 1.0,
            depth: DepthScroll::default(),
            parallax: Parallax::default(),
            layout_params,
            grid_params: GridParams::default(),
            placed: 0,
            rng,
        }
    }

    #[inline]
    pub fn has_filter(&self) -> bool {
        self.filters.is_active()
    }

    /// Avatars currently eligible under the active filter (or all non-basketed ones).
    pub fn visible_count(&self) -> usize {
        self.avatars.iter().filter(|a| a.visible).count()
    }

    /// How many eligible avatars the grid shows; zero when unfiltered.
    pub fn display_count(&self) -> usize {
        if self.has_filter() {
            self.display_cap.min(self.visible_count())
        } else {
            0
        }
    }

    /// True when `dj` can be placed under `filters`.
    pub fn is_eligible(&self, dj: &DjRecord, filters: &Filters) -> bool {
        !self.basket.contains(&dj.name) && is_featured(dj) && filters.matches(dj)
    }

    pub fn apply(&mut self, event: Event) -> Transition {
        match event {
            Event::FilterChanged(filters) => self.set_filters(filters),
            Event::BasketChanged(change) => self.change_basket(change),
            Event::DisplayCountChanged(n) => self.set_display_cap(n),
            Event::ViewportChanged(v) => self.resize(v),
            Event::Scroll(input) => self.scroll(input),
            Event::PointerTarget(t) => {
                self.parallax.set_target(t);
                Transition {
                    parallax: LoopCmd::Start,
                    ..Transition::default()
                }
            }
            Event::EntryTransitionEnded(id) => {
                if let Some(a) = self.avatars.get_mut(id) {
                    a.fade_in = false;
                }
                Transition::default()
            }
            Event::Tick(tick) => self.tick(tick),
        }
    }

    fn set_filters(&mut self, filters: Filters) -> Transition {
        self.filters = filters;
        let mut t = Transition::default();
        if self.filters.is_active() {
            self.depth.reset();
            t.depth = LoopCmd::Stop;
        }
        self.apply_filters();
        log::info!(
            "[filter] genres={:?} locations={:?} bpms={:?} visible={} shown={}",
            self.filters.genres,
            self.filters.locations,
            self.filters.bpms,
            self.visible_count(),
            self.display_count()
        );
        t
    }

    fn change_basket(&mut self, change: BasketChange) -> Transition {
        match change {
            BasketChange::Confirm => {
                if !self.has_filter() {
                    return Transition::default();
                }
                let picked: Vec<DjSnapshot> = self
                    .avatars
                    .iter()
                    .filter(|a| a.visible)
                    .take(self.display_cap)
                    .filter_map(|a| {
                        self.catalog
                            .djs
                            .get(a.id)
                            .map(|dj| DjSnapshot::new(dj, a.character))
                    })
                    .collect();
                let added = self.basket.add_selection(&self.filters, picked);
                log::info!(
                    "[basket] confirmed {} DJs, entries={}",
                    added,
                    self.basket.len()
                );
                self.filters = Filters::default();
            }
            BasketChange::Remove(id) => {
                if self.basket.remove(id) {
                    log::info!("[basket] removed entry {}", id);
                }
            }
        }
        self.apply_filters();
        Transition::default()
    }

    /// Recompute eligibility and grid slots from `self.filters` and the basket.
    fn apply_filters(&mut self) {
        if !self.filters.is_active() {
            for a in &mut self.avatars {
                let basketed = self
                    .catalog
                    .djs
                    .get(a.id)
                    .is_some_and(|dj| self.basket.contains(&dj.name));
                a.position = a.home;
                a.target = None;
                a.visible = !basketed;
                a.fade_in = false;
            }
            self.placed = 0;
            return;
        }

        let matches: Vec<bool> = self
            .avatars
            .iter()
            .map(|a| {
                self.catalog
                    .djs
                    .get(a.id)
                    .is_some_and(|dj| self.is_eligible(dj, &self.filters))
            })
            .collect();
        let eligible = matches.iter().filter(|m| **m).count();
        let shown = self.display_cap.min(eligible);
        let grid = grid_positions(shown, self.viewport, &self.grid_params);
        self.grid_scale = grid.scale;
        self.placed = shown;

        let mut slots = grid.positions.into_iter();
        for (a, matched) in self.avatars.iter_mut().zip(matches) {
            if !matched {
                a.visible = false;
                a.target = None;
                a.fade_in = false;
                continue;
            }
            a.visible = true;
            match slots.next() {
                Some(pos) => {
                    a.position = pos;
                    a.target = Some(pos);
                    a.fade_in = true;
                }
                None => {
                    a.target = None;
                    a.fade_in = false;
                }
            }
        }
    }

    fn set_display_cap(&mut self, n: usize) -> Transition {
        self.display_cap = n.max(1);
        if !self.has_filter() {
            return Transition::default();
        }
        let shown = self.display_cap.min(self.visible_count());
        let grid = grid_positions(shown, self.viewport, &self.grid_params);
        self.grid_scale = grid.scale;

        let prev = self.placed;
        let mut retargeted = false;
        let mut slots = grid.positions.into_iter().enumerate();
        for a in self.avatars.iter_mut() {
            if !a.visible {
                a.fade_in = false;
                continue;
            }
            match slots.next() {
                Some((idx, pos)) if idx >= prev => {
                    a.position = pos;
                    a.target = Some(pos);
                    a.fade_in = true;
                }
                Some((_, pos)) => {
                    if a.target != Some(pos) {
                        retargeted = true;
                    }
                    a.target = Some(pos);
                    a.fade_in = false;
                }
                None => {
                    a.target = None;
                    a.fade_in = false;
                }
            }
        }
        self.placed = shown;
        Transition {
            easing: if retargeted {
                LoopCmd::Start
            } else {
                LoopCmd::Keep
            },
            ..Transition::default()
        }
    }

    fn resize(&mut self, viewport: Viewport) -> Transition {
        if viewport == self.viewport {
            return Transition::default();
        }
        self.viewport = viewport;
        relayout(
            &mut self.avatars,
            viewport,
            &self.layout_params,
            &mut self.rng,
        );
        self.apply_filters();
        log::info!(
            "[layout] viewport {}x{}",
            viewport.width as i32,
            viewport.height as i32
        );
        Transition::default()
    }

    fn scroll(&mut self, input: ScrollInput) -> Transition {
        if self.has_filter() {
            return Transition::default();
        }
        self.depth.impulse(input);
        Transition {
            depth: LoopCmd::Start,
            ..Transition::default()
        }
    }

    fn tick(&mut self, tick: Tick) -> Transition {
        let keep = |running: bool| {
            if running {
                LoopCmd::Keep
            } else {
                LoopCmd::Stop
            }
        };
        let mut t = Transition::default();
        match tick {
            Tick::Easing { dt_frames } => {
                t.easing = keep(motion::step(&mut self.avatars, dt_frames));
            }
            Tick::Depth => {
                t.depth = if self.has_filter() {
                    LoopCmd::Stop
                } else {
                    keep(self.depth.step())
                };
            }
            Tick::Parallax { dt_frames } => {
                t.parallax = keep(self.parallax.step(dt_frames));
            }
        }
        t
    }

    /// Most common genre among DJs matching the location/BPM constraints.
    pub fn top_genre(&self) -> Option<&str> {
        let f = &self.filters;
        if f.locations.is_empty() && f.bpms.is_empty() {
            return None;
        }
        let keep = Filters {
            genres: Vec::new(),
            ..f.clone()
        };
        self.catalog
            .top_stat(|dj| keep.matches(dj), |dj| dj.genres.iter())
    }

    /// Most common location among DJs matching the genre/BPM constraints.
    pub fn top_location(&self) -> Option<&str> {
        let f = &self.filters;
        if f.genres.is_empty() && f.bpms.is_empty() {
            return None;
        }
        let keep = Filters {
            locations: Vec::new(),
            ..f.clone()
        };
        self.catalog
            .top_stat(|dj| keep.matches(dj), |dj| std::iter::once(&dj.location))
    }

    /// Most common BPM band among DJs matching the genre/location constraints.
    pub fn top_bpm(&self) -> Option<&str> {
        let f = &self.filters;
        if f.genres.is_empty() && f.locations.is_empty() {
            return None;
        }
        let keep = Filters {
            bpms: Vec::new(),
            ..f.clone()
        };
        self.catalog
            .top_stat(|dj| keep.matches(dj), |dj| std::iter::once(&dj.bpm))
    }
}

/// Functional form of [`PlazaState::apply`] for callers that thread state by value.
pub fn reduce(mut state: PlazaState, event: Event) -> PlazaState {
    state.apply(event);
    state
}
