// Engine tuning shared by the layout, grid, motion and projection passes.

// Catalog / eligibility
pub const FEATURED_BPM: &str = "125-140";
pub const FEATURED_GENRE: &str = "Electronic";
pub const DEFAULT_DISPLAY_CAP: usize = 20;

// Sprites: CHARACTER-{n}.svg ids, n in 1..=SPRITE_COUNT
pub const SPRITE_COUNT: u32 = 143;
pub const FEATURED_SPRITES: [u32; 7] = [143, 111, 95, 78, 60, 42, 24];

// Scattered depth field
pub const FIELD_TOP_PADDING: f32 = 0.0;
pub const FIELD_BOTTOM_PADDING: f32 = 180.0;
pub const FIELD_SIDE_PADDING: f32 = 100.0;
pub const FIELD_HEIGHT_MULTIPLIER: f32 = 3.0; // virtual field is taller than the viewport
pub const FIELD_BAND_EXPONENT: i32 = 100;
pub const FIELD_JITTER_BASE: f32 = 0.1;
pub const FIELD_JITTER_SPAN: f32 = 0.4;
pub const FIELD_ROW_WIDTH_BASE: f32 = 0.55;
pub const FIELD_ROW_WIDTH_DEPTH: f32 = 0.2;

// Filtered grid
pub const GRID_SIDE_PADDING: f32 = 80.0;
pub const GRID_TOP_PADDING: f32 = 220.0;
pub const GRID_BOTTOM_PADDING: f32 = 250.0;
pub const GRID_COLUMNS: usize = 10;
pub const GRID_SPACING_X: f32 = 120.0;
pub const GRID_SPACING_Y: f32 = 180.0;

// Position easing (fraction of remaining distance per 60 Hz frame)
pub const EASE_FRACTION: f32 = 0.1;
pub const EASE_SNAP_PX: f32 = 1.0;
pub const EASE_MAX_FRAMES_PER_STEP: f32 = 4.0;

// Depth-scroll inertia
pub const WHEEL_VELOCITY_SCALE: f32 = 0.00002;
pub const TOUCH_VELOCITY_SCALE: f32 = 0.00005;
pub const DEPTH_VELOCITY_DECAY: f32 = 0.94;
pub const DEPTH_VELOCITY_EPSILON: f32 = 0.000005;

// Pointer/tilt parallax
pub const PARALLAX_LERP: f32 = 0.02;
pub const PARALLAX_SETTLE: f32 = 1e-4;
pub const PARALLAX_SHIFT_PX: f32 = 200.0;
pub const TILT_RANGE_DEG: f32 = 45.0;

// Projection
pub const COMPACT_MAX_WIDTH: f32 = 768.0;
pub const DEPTH_FADE_BAND: f32 = 0.08;
pub const DEPTH_SHARP_THRESHOLD: f32 = 0.825;
pub const DEPTH_MAX_BLUR_PX: f32 = 20.0;
pub const DEPTH_NARROW_BASE: f32 = 0.1;
pub const DEPTH_NARROW_SPAN: f32 = 1.7;
pub const GRID_SHADOW_OPACITY: f32 = 0.4;
pub const GRID_ITEM_SCALE: f32 = 0.5;
