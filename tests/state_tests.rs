// Host-side tests for the plaza reducer: filtering, basket, display count and loops.

#![allow(dead_code)]
mod common;

use common::plaza::basket::{Basket, DjSnapshot};
use common::plaza::catalog::{is_featured, Catalog};
use common::plaza::layout::Viewport;
use common::plaza::motion::ScrollInput;
use common::plaza::state::*;
use common::{bands, dj, sample_catalog};
use glam::Vec2;

fn desktop() -> Viewport {
    Viewport::new(1440.0, 900.0)
}

fn plaza(catalog: Catalog) -> PlazaState {
    PlazaState::new(catalog, desktop(), Some(17))
}

fn genre(g: &str) -> Filters {
    Filters::default().toggle_genre(g)
}

fn location(l: &str) -> Filters {
    Filters::default().toggle_location(l)
}

fn names(state: &PlazaState, pred: impl Fn(&common::plaza::layout::Avatar) -> bool) -> Vec<String> {
    state
        .avatars
        .iter()
        .filter(|a| pred(a))
        .map(|a| state.catalog.djs[a.id].name.clone())
        .collect()
}

#[test]
fn only_featured_matches_are_placed() {
    let catalog = Catalog::new(
        vec![
            dj("A", &["Electronic"], "Berlin", "125-140"),
            dj("B", &["House"], "Berlin", "125-140"),
        ],
        bands(),
    );
    let mut s = plaza(catalog);
    assert_eq!(s.display_count(), 0);

    s.apply(Event::FilterChanged(location("Berlin")));
    assert!(s.has_filter());
    assert_eq!(s.visible_count(), 1);
    assert_eq!(s.display_count(), 1);
    assert!(s.avatars[0].visible && s.avatars[0].target.is_some() && s.avatars[0].fade_in);
    assert!(!s.avatars[1].visible && s.avatars[1].target.is_none());

    // matching the filter alone is not enough
    s.apply(Event::FilterChanged(genre("House")));
    assert_eq!(s.visible_count(), 0);
    assert_eq!(s.display_count(), 0);
}

#[test]
fn slots_only_go_to_eligible_avatars() {
    let mut s = plaza(sample_catalog());
    for f in [genre("Electronic"), location("Paris"), genre("Techno"), location("Tokyo")] {
        s.apply(Event::FilterChanged(f.clone()));
        for a in &s.avatars {
            let d = &s.catalog.djs[a.id];
            if a.target.is_some() {
                assert!(a.visible && is_featured(d) && f.matches(d), "{} placed", d.name);
            }
            if !(is_featured(d) && f.matches(d)) {
                assert!(!a.visible, "{} visible", d.name);
            }
        }
    }
}

#[test]
fn filters_or_within_and_across_fields() {
    let f = genre("Techno").toggle_genre("House").toggle_location("Paris");
    let catalog = sample_catalog();
    let hits: Vec<&str> = catalog
        .djs
        .iter()
        .filter(|d| f.matches(d))
        .map(|d| d.name.as_str())
        .collect();
    assert_eq!(hits, vec!["C", "E"]);

    // toggling twice removes the value again
    assert_eq!(genre("House").toggle_genre("House"), Filters::default());
    assert!(!Filters::default().is_active());
}

#[test]
fn bpm_range_selects_bands_between_handles() {
    let b = bands();
    let f = Filters::default().with_bpm_range(&b, 3, 1);
    assert_eq!(f.bpms, vec!["110-125", "125-140", "140-155"]);
    assert_eq!(f.bpm_range, Some((1, 3)));
    assert_eq!(f.bpm_handles(b.len()), (1, 3));

    let single = f.with_bpm_range(&b, 2, 2);
    assert_eq!(single.bpms, vec!["125-140"]);

    let full = f.with_bpm_range(&b, 0, 4);
    assert!(full.bpms.is_empty());
    assert_eq!(full.bpm_range, None);
    assert_eq!(full.bpm_handles(b.len()), (0, 4));
    assert!(!full.is_active());
}

#[test]
fn clearing_the_filter_sends_everyone_home() {
    let mut s = plaza(sample_catalog());
    s.apply(Event::FilterChanged(genre("Electronic")));
    let t = s.apply(Event::FilterChanged(Filters::default()));
    assert_eq!(t.depth, LoopCmd::Keep);
    assert_eq!(s.display_count(), 0);
    for a in &s.avatars {
        assert!(a.visible);
        assert_eq!(a.position, a.home);
        assert!(a.target.is_none());
        assert!(!a.fade_in);
    }
}

#[test]
fn confirm_baskets_the_shown_djs_and_clears_filters() {
    let mut s = plaza(sample_catalog());
    s.apply(Event::FilterChanged(genre("Electronic")));
    s.apply(Event::DisplayCountChanged(3));
    s.apply(Event::BasketChanged(BasketChange::Confirm));

    assert!(!s.has_filter());
    assert_eq!(s.basket.len(), 2);
    assert_eq!(s.basket.dj_count(), 3);
    let berlin = &s.basket.entries()[0];
    assert_eq!(berlin.locations.as_slice(), ["Berlin".to_string()]);
    assert_eq!(berlin.genres, vec!["Electronic"]);
    let in_berlin: Vec<&str> = berlin.djs.iter().map(|d| d.name.as_str()).collect();
    assert_eq!(in_berlin, vec!["A", "D"]);

    // basketed DJs leave the field
    assert_eq!(names(&s, |a| !a.visible), vec!["A", "C", "D"]);

    // the next selection merges Paris and opens Tokyo
    s.apply(Event::FilterChanged(genre("Electronic")));
    assert_eq!(names(&s, |a| a.visible), vec!["F", "G"]);
    s.apply(Event::BasketChanged(BasketChange::Confirm));
    assert_eq!(s.basket.len(), 3);
    assert_eq!(s.basket.dj_count(), 5);
    let paris = s
        .basket
        .entries()
        .iter()
        .find(|e| e.locations.as_slice() == ["Paris".to_string()])
        .map(|e| e.djs.len());
    assert_eq!(paris, Some(2));
}

#[test]
fn confirm_without_filter_is_a_no_op() {
    let mut s = plaza(sample_catalog());
    let t = s.apply(Event::BasketChanged(BasketChange::Confirm));
    assert_eq!(t, Transition::default());
    assert!(s.basket.is_empty());
}

#[test]
fn confirming_an_empty_result_adds_nothing() {
    let mut s = plaza(sample_catalog());
    s.apply(Event::FilterChanged(location("Tokyo")));
    s.apply(Event::BasketChanged(BasketChange::Confirm));
    assert_eq!(s.basket.len(), 1);

    s.apply(Event::FilterChanged(location("Tokyo")));
    assert_eq!(s.visible_count(), 0);
    s.apply(Event::BasketChanged(BasketChange::Confirm));
    assert_eq!(s.basket.len(), 1);
    assert_eq!(s.basket.dj_count(), 1);
}

#[test]
fn basket_add_is_idempotent_per_location() {
    let catalog = sample_catalog();
    let snaps = |ids: &[usize]| -> Vec<DjSnapshot> {
        ids.iter().map(|&i| DjSnapshot::new(&catalog.djs[i], 1)).collect()
    };
    let f = genre("Electronic");
    let mut basket = Basket::default();
    assert_eq!(basket.add_selection(&f, snaps(&[0, 2, 3])), 3);
    assert_eq!(basket.add_selection(&f, snaps(&[0, 2, 3])), 0);
    assert_eq!(basket.len(), 2);
    assert_eq!(basket.dj_count(), 3);

    // duplicates inside one selection collapse too
    let mut fresh = Basket::default();
    assert_eq!(fresh.add_selection(&f, snaps(&[5, 5])), 1);
}

#[test]
fn remove_restores_djs_and_refilters() {
    let mut s = plaza(sample_catalog());
    s.apply(Event::FilterChanged(location("Berlin")));
    s.apply(Event::BasketChanged(BasketChange::Confirm));
    let id = s.basket.entries()[0].id;
    assert!(s.basket.contains("A"));

    s.apply(Event::FilterChanged(location("Berlin")));
    assert_eq!(s.visible_count(), 0);

    s.apply(Event::BasketChanged(BasketChange::Remove(id)));
    assert!(s.basket.is_empty());
    assert!(!s.basket.contains("A"));
    // still filtered: A and D are placed again
    assert_eq!(names(&s, |a| a.target.is_some()), vec!["A", "D"]);

    assert!(!s.basket.remove(id));
}

#[test]
fn shrinking_the_display_eases_and_growing_snaps_new_slots() {
    let mut s = plaza(sample_catalog());
    s.apply(Event::FilterChanged(genre("Electronic")));
    assert_eq!(s.display_count(), 5);

    let t = s.apply(Event::DisplayCountChanged(2));
    assert_eq!(t.easing, LoopCmd::Start);
    assert_eq!(s.display_count(), 2);
    let a = &s.avatars[0];
    assert_ne!(Some(a.position), a.target);
    assert!(!a.fade_in);

    let t = s.apply(Event::DisplayCountChanged(4));
    assert_eq!(t.easing, LoopCmd::Start);
    // D takes the third slot: placed directly, fading in
    let d = &s.avatars[3];
    assert_eq!(Some(d.position), d.target);
    assert!(d.fade_in);

    s.apply(Event::DisplayCountChanged(0));
    assert_eq!(s.display_cap, 1);
}

#[test]
fn easing_ticks_until_every_target_is_reached() {
    let mut s = plaza(sample_catalog());
    s.apply(Event::FilterChanged(genre("Electronic")));
    s.apply(Event::DisplayCountChanged(2));

    let mut frames = 0;
    loop {
        let t = s.apply(Event::Tick(Tick::Easing { dt_frames: 1.0 }));
        if t.easing == LoopCmd::Stop {
            break;
        }
        frames += 1;
        assert!(frames < 200, "easing never settled");
    }
    assert!(s.avatars.iter().all(|a| a.target.map_or(true, |t| t == a.position)));
}

#[test]
fn entry_transition_end_clears_fade() {
    let mut s = plaza(sample_catalog());
    s.apply(Event::FilterChanged(genre("Electronic")));
    assert!(s.avatars[0].fade_in);
    let t = s.apply(Event::EntryTransitionEnded(0));
    assert_eq!(t, Transition::default());
    assert!(!s.avatars[0].fade_in);
    // unknown ids are ignored
    s.apply(Event::EntryTransitionEnded(999));
}

#[test]
fn filtering_resets_depth_and_blocks_scroll() {
    let mut s = plaza(sample_catalog());
    let t = s.apply(Event::Scroll(ScrollInput::Wheel { delta_y: 120.0 }));
    assert_eq!(t.depth, LoopCmd::Start);
    for _ in 0..5 {
        assert_eq!(s.apply(Event::Tick(Tick::Depth)).depth, LoopCmd::Keep);
    }
    assert!(s.depth.offset > 0.0);

    let t = s.apply(Event::FilterChanged(genre("Electronic")));
    assert_eq!(t.depth, LoopCmd::Stop);
    assert_eq!(s.depth.offset, 0.0);
    assert_eq!(s.depth.velocity, 0.0);

    let t = s.apply(Event::Scroll(ScrollInput::Touch { delta_y: 40.0 }));
    assert_eq!(t, Transition::default());
    assert_eq!(s.depth.velocity, 0.0);
    assert_eq!(s.apply(Event::Tick(Tick::Depth)).depth, LoopCmd::Stop);
}

#[test]
fn pointer_target_starts_parallax_until_settled() {
    let mut s = plaza(sample_catalog());
    let t = s.apply(Event::PointerTarget(Vec2::new(0.5, -0.25)));
    assert_eq!(t.parallax, LoopCmd::Start);

    let mut frames = 0;
    while s.apply(Event::Tick(Tick::Parallax { dt_frames: 2.0 })).parallax != LoopCmd::Stop {
        frames += 1;
        assert!(frames < 1000);
    }
    assert_eq!(s.parallax.current, Vec2::new(0.5, -0.25));
}

#[test]
fn resize_relayouts_and_regrids() {
    let mut s = plaza(sample_catalog());
    assert_eq!(s.apply(Event::ViewportChanged(desktop())), Transition::default());

    s.apply(Event::FilterChanged(genre("Electronic")));
    let phone = Viewport::new(375.0, 667.0);
    s.apply(Event::ViewportChanged(phone));
    assert_eq!(s.viewport, phone);
    assert!(s.grid_scale <= 1.0);
    for a in &s.avatars {
        if let Some(t) = a.target {
            assert!(t.x >= 0.0 && t.x <= phone.width && t.y >= 0.0 && t.y <= phone.height);
        }
        assert!(a.home.y <= phone.height);
    }
}

#[test]
fn top_stats_follow_the_other_filters() {
    let mut s = plaza(sample_catalog());
    assert_eq!(s.top_genre(), None);
    assert_eq!(s.top_location(), None);
    assert_eq!(s.top_bpm(), None);

    s.apply(Event::FilterChanged(location("Paris")));
    assert_eq!(s.top_genre(), Some("Electronic"));
    assert_eq!(s.top_bpm(), Some("125-140"));
    assert_eq!(s.top_location(), None);

    s.apply(Event::FilterChanged(genre("Techno")));
    assert_eq!(s.top_location(), Some("Paris"));
}

#[test]
fn reduce_threads_state_by_value() {
    let s = plaza(sample_catalog());
    let s = reduce(s, Event::FilterChanged(genre("Electronic")));
    let s = reduce(s, Event::DisplayCountChanged(2));
    assert!(s.has_filter());
    assert_eq!(s.display_count(), 2);
    let s = reduce(s, Event::BasketChanged(BasketChange::Confirm));
    assert!(!s.has_filter());
    assert_eq!(s.basket.dj_count(), 2);
}

#[test]
fn seeded_states_scatter_identically() {
    let a = plaza(sample_catalog());
    let b = plaza(sample_catalog());
    assert_eq!(a.avatars, b.avatars);
}
