use super::constants::*;
use super::layout::Viewport;
use glam::Vec2;

/// Tuning for the filtered grid; defaults match the page chrome (search bar on
/// top, slider and basket at the bottom).
#[derive(Clone, Debug)]
pub struct GridParams {
    pub side_padding: f32,
    pub top_padding: f32,
    pub bottom_padding: f32,
    pub columns: usize,
    pub spacing_x: f32,
    pub spacing_y: f32,
}

impl Default for GridParams {
    fn default() -> Self {
        Self {
            side_padding: GRID_SIDE_PADDING,
            top_padding: GRID_TOP_PADDING,
            bottom_padding: GRID_BOTTOM_PADDING,
            columns: GRID_COLUMNS,
            spacing_x: GRID_SPACING_X,
            spacing_y: GRID_SPACING_Y,
        }
    }
}

/// Row-major slot positions plus the uniform scale (never above 1) that fits them.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct GridLayout {
    pub positions: Vec<Vec2>,
    pub scale: f32,
}

pub fn grid_positions(count: usize, viewport: Viewport, params: &GridParams) -> GridLayout {
    let cols = params.columns.max(1);
    let avail_w = (viewport.width - params.side_padding * 2.0).max(0.0);
    let avail_h = (viewport.height - params.top_padding - params.bottom_padding).max(0.0);
    let rows = count.div_ceil(cols).max(1);

    let grid_w = (cols - 1) as f32 * params.spacing_x;
    let grid_h = (rows - 1) as f32 * params.spacing_y;
    let scale_x = if grid_w > 0.0 { avail_w / grid_w } else { 1.0 };
    let scale_y = if grid_h > 0.0 { avail_h / grid_h } else { 1.0 };
    let scale = scale_x.min(scale_y).min(1.0);

    let spacing_x = params.spacing_x * scale;
    let spacing_y = params.spacing_y * scale;
    let total_h = (rows - 1) as f32 * spacing_y;
    let offset_y = params.top_padding + (avail_h - total_h) * 0.5;

    let positions = (0..count)
        .map(|index| {
            let col = index % cols;
            let row = index / cols;
            let in_row = cols.min(count - row * cols);
            let x = if in_row == 1 {
                viewport.center_x()
            } else {
                let row_w = (in_row - 1) as f32 * spacing_x;
                (avail_w - row_w) * 0.5 + params.side_padding + col as f32 * spacing_x
            };
            let y = offset_y + row as f32 * spacing_y;
            Vec2::new(
                x.min(viewport.width).max(0.0),
                y.min(viewport.height).max(0.0),
            )
        })
        .collect();

    GridLayout { positions, scale }
}
