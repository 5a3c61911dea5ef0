use super::catalog::{is_featured, Catalog};
use super::constants::*;
use glam::Vec2;
use rand::prelude::*;

/// CSS-pixel size of the area the plaza is drawn into.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Viewport {
    pub width: f32,
    pub height: f32,
}

impl Viewport {
    pub fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    #[inline]
    pub fn center_x(&self) -> f32 {
        self.width * 0.5
    }

    /// Narrow (phone-sized) viewports get a different depth curve and tap-driven hover.
    #[inline]
    pub fn is_compact(&self) -> bool {
        self.width <= COMPACT_MAX_WIDTH
    }
}

/// On-screen representation of one catalog DJ.
///
/// `home` and `depth_rank` come from the layout pass; `position`, `target`,
/// `visible` and `fade_in` are rewritten by filtering and easing.
#[derive(Clone, Debug, PartialEq)]
pub struct Avatar {
    pub id: usize,
    pub character: u32,
    pub home: Vec2,
    pub depth_rank: f32,
    pub position: Vec2,
    pub target: Option<Vec2>,
    pub visible: bool,
    pub fade_in: bool,
}

/// Tuning for the scattered depth field.
///
/// - `top_padding` / `bottom_padding`: vertical clamp for home positions
/// - `side_padding`: horizontal clamp
/// - `height_multiplier`: the virtual field is this many viewports tall before clamping
/// - `band_exponent`: how hard bands are pushed toward the far end
#[derive(Clone, Debug)]
pub struct LayoutParams {
    pub top_padding: f32,
    pub bottom_padding: f32,
    pub side_padding: f32,
    pub height_multiplier: f32,
    pub band_exponent: i32,
}

impl Default for LayoutParams {
    fn default() -> Self {
        Self {
            top_padding: FIELD_TOP_PADDING,
            bottom_padding: FIELD_BOTTOM_PADDING,
            side_padding: FIELD_SIDE_PADDING,
            height_multiplier: FIELD_HEIGHT_MULTIPLIER,
            band_exponent: FIELD_BAND_EXPONENT,
        }
    }
}

/// Build every avatar for `catalog`: scattered homes, even depth ranks and sprites.
pub fn create_avatars<R: Rng>(
    catalog: &Catalog,
    viewport: Viewport,
    params: &LayoutParams,
    rng: &mut R,
) -> Vec<Avatar> {
    let homes = scatter_homes(catalog.len(), viewport, params, rng);
    let ranks = depth_ranks(&homes);
    let sprites = assign_sprites(catalog, rng);
    homes
        .into_iter()
        .zip(ranks)
        .zip(sprites)
        .enumerate()
        .map(|(id, ((home, depth_rank), character))| Avatar {
            id,
            character,
            home,
            depth_rank,
            position: home,
            target: None,
            visible: true,
            fade_in: false,
        })
        .collect()
}

/// Recompute homes and depth ranks for a new viewport, keeping sprites.
pub fn relayout<R: Rng>(
    avatars: &mut [Avatar],
    viewport: Viewport,
    params: &LayoutParams,
    rng: &mut R,
) {
    let homes = scatter_homes(avatars.len(), viewport, params, rng);
    let ranks = depth_ranks(&homes);
    for ((a, home), rank) in avatars.iter_mut().zip(homes).zip(ranks) {
        a.home = home;
        a.depth_rank = rank;
    }
}

/// One scattered home per item. A random permutation picks each item's band,
/// `band^exponent` crowds bands toward the far (top) end, jitter spreads the
/// crowd, and x is drawn around the center in a row that narrows with depth.
pub fn scatter_homes<R: Rng>(
    count: usize,
    viewport: Viewport,
    params: &LayoutParams,
    rng: &mut R,
) -> Vec<Vec2> {
    if count == 0 {
        return Vec::new();
    }
    let mut perm: Vec<usize> = (0..count).collect();
    perm.shuffle(rng);

    let vh = viewport.height;
    let vw = viewport.width;
    let field_h = (vh - params.top_padding - params.bottom_padding) * params.height_multiplier;
    let slice = field_h / count as f32;
    let y_max = vh - params.bottom_padding;
    let x_max = vw - params.side_padding;

    perm.iter()
        .map(|&rank| {
            let band = rank as f32 / count as f32;
            let biased = band.powi(params.band_exponent);
            let jitter_amount = (1.0 - biased) * FIELD_JITTER_SPAN + FIELD_JITTER_BASE;
            let jitter = (rng.gen::<f32>() - 0.5) * slice * jitter_amount * 4.0;
            let raw_y = params.top_padding + biased * field_h + jitter;
            let y = params.top_padding.max(y_max.min(raw_y));

            let depth = if vh > 0.0 { y / vh } else { 0.0 };
            let row_width = vw * (FIELD_ROW_WIDTH_BASE - depth * FIELD_ROW_WIDTH_DEPTH);
            let center_bias = rng.gen::<f32>() * 0.6 + rng.gen::<f32>() * 0.4 - 0.5;
            let raw_x = viewport.center_x() + center_bias * row_width;
            let x = params.side_padding.max(x_max.min(raw_x));
            Vec2::new(x, y)
        })
        .collect()
}

/// Rank homes by y (ties keep input order) and spread the ranks evenly over [0, 1].
pub fn depth_ranks(homes: &[Vec2]) -> Vec<f32> {
    let mut order: Vec<usize> = (0..homes.len()).collect();
    order.sort_by(|&a, &b| homes[a].y.total_cmp(&homes[b].y));
    let denom = homes.len().saturating_sub(1).max(1) as f32;
    let mut ranks = vec![0.0_f32; homes.len()];
    for (rank, &i) in order.iter().enumerate() {
        ranks[i] = rank as f32 / denom;
    }
    ranks
}

/// General sprite pool: every sprite id that is not reserved for featured DJs.
pub fn general_sprites() -> Vec<u32> {
    (1..=SPRITE_COUNT)
        .filter(|n| !FEATURED_SPRITES.contains(n))
        .collect()
}

/// Featured DJs cycle through the shuffled featured pool, everyone else through
/// the shuffled general pool. Pools wrap, so sprites repeat on large catalogs.
pub fn assign_sprites<R: Rng>(catalog: &Catalog, rng: &mut R) -> Vec<u32> {
    let mut featured = FEATURED_SPRITES.to_vec();
    featured.shuffle(rng);
    let mut general = general_sprites();
    general.shuffle(rng);

    let mut next_featured = 0usize;
    let mut next_general = 0usize;
    catalog
        .djs
        .iter()
        .map(|dj| {
            if is_featured(dj) {
                let s = featured[next_featured % featured.len()];
                next_featured += 1;
                s
            } else {
                let s = general[next_general % general.len()];
                next_general += 1;
                s
            }
        })
        .collect()
}
