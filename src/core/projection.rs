use super::constants::*;
use super::layout::{Avatar, Viewport};

/// Inputs shared by every avatar in one projection pass.
#[derive(Clone, Copy, Debug)]
pub struct ProjectionParams {
    pub viewport: Viewport,
    pub filtered: bool,
    pub depth_offset: f32,
    pub parallax_x: f32,
    pub grid_scale: f32,
    pub display_cap: usize,
}

/// Display parameters for one avatar, in paint order when returned from [`project`].
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Projected {
    pub id: usize,
    pub tx: f32,
    pub ty: f32,
    pub scale: f32,
    pub opacity: f32,
    pub blur: f32,
    pub shadow_opacity: f32,
    /// Cyclic depth in [0, 1); 0 in grid mode.
    pub depth: f32,
    /// Drawn at all (eligible and, in grid mode, within the display cap).
    pub shown: bool,
    /// Shown as a grid item (flag decoration, grid scale).
    pub in_grid: bool,
}

/// Wrap a depth rank shifted by the scroll offset back into [0, 1).
#[inline]
pub fn cyclic_depth(depth_rank: f32, offset: f32) -> f32 {
    let ez = (depth_rank + offset).rem_euclid(1.0);
    // rem_euclid can round up to exactly 1.0 for tiny negative inputs
    if ez >= 1.0 {
        0.0
    } else {
        ez
    }
}

/// Opacity ramp that hides the seam where the depth cycle wraps.
#[inline]
pub fn depth_opacity(ez: f32) -> f32 {
    if ez > 1.0 - DEPTH_FADE_BAND {
        1.0 - (ez - (1.0 - DEPTH_FADE_BAND)) / DEPTH_FADE_BAND
    } else if ez < DEPTH_FADE_BAND {
        ez / DEPTH_FADE_BAND
    } else {
        1.0
    }
}

#[inline]
pub fn depth_blur(ez: f32) -> f32 {
    if ez >= DEPTH_SHARP_THRESHOLD {
        0.0
    } else {
        (1.0 - ez / DEPTH_SHARP_THRESHOLD) * DEPTH_MAX_BLUR_PX
    }
}

fn project_depth(a: &Avatar, p: &ProjectionParams) -> Projected {
    let vh = p.viewport.height;
    let cx = p.viewport.center_x();
    let compact = p.viewport.is_compact();

    let ez = cyclic_depth(a.depth_rank, p.depth_offset);
    let scale = if compact {
        0.1 + ez * 0.45
    } else {
        0.25 + ez * 0.5
    };
    let ty = ez.powi(if compact { 8 } else { 7 }) * vh;
    let narrow = DEPTH_NARROW_BASE + ez * DEPTH_NARROW_SPAN;
    let parallax = p.parallax_x * (1.0 - ez) * -PARALLAX_SHIFT_PX;
    let tx = cx + (a.home.x - cx) * narrow + parallax;

    Projected {
        id: a.id,
        tx,
        ty,
        scale,
        opacity: depth_opacity(ez),
        blur: depth_blur(ez),
        shadow_opacity: 0.1 + ez * 0.4,
        depth: ez,
        shown: a.visible,
        in_grid: false,
    }
}

/// Map avatar state to display parameters.
///
/// Unfiltered: cyclic depth field, sorted far-to-near so nearer items paint last.
/// Filtered: flat grid at the avatars' current (eased) positions, catalog order.
pub fn project(avatars: &[Avatar], p: &ProjectionParams) -> Vec<Projected> {
    if !p.filtered {
        let mut items: Vec<Projected> = avatars.iter().map(|a| project_depth(a, p)).collect();
        items.sort_by(|a, b| a.depth.total_cmp(&b.depth));
        return items;
    }

    let mut shown_so_far = 0usize;
    avatars
        .iter()
        .map(|a| {
            let shown = a.visible && shown_so_far < p.display_cap;
            if a.visible {
                shown_so_far += 1;
            }
            Projected {
                id: a.id,
                tx: a.position.x,
                ty: a.position.y,
                scale: if shown {
                    p.grid_scale * GRID_ITEM_SCALE
                } else {
                    1.0
                },
                opacity: 1.0,
                blur: 0.0,
                shadow_opacity: GRID_SHADOW_OPACITY,
                depth: 0.0,
                shown,
                in_grid: shown,
            }
        })
        .collect()
}
