// DOM contract: element ids, class names and asset paths used by the page.

// Containers and controls (everything except the avatar container is optional)
pub const PLAZA_ID: &str = "plaza";
pub const LOCATION_DROPDOWN_ID: &str = "location-dropdown";
pub const GENRE_DROPDOWN_ID: &str = "genre-dropdown";
pub const BPM_MIN_ID: &str = "bpm-min";
pub const BPM_MAX_ID: &str = "bpm-max";
pub const BPM_LABEL_ID: &str = "bpm-label";
pub const CLEAR_BUTTON_ID: &str = "clear-button";
pub const AVAILABLE_COUNT_ID: &str = "available-count";
pub const FILTER_PANEL_ID: &str = "filter-panel";
pub const DISPLAY_SLIDER_ID: &str = "dj-slider";
pub const CONFIRM_BUTTON_ID: &str = "dj-confirm";
pub const BASKET_PANEL_ID: &str = "basket-panel";

// Scroll/touch inside this subtree belongs to the dropdown, not the depth field
pub const DROPDOWN_SELECTOR: &str = ".section-dropdown";
pub const BASKET_REMOVE_SELECTOR: &str = ".basket-remove-btn";

// Avatar markup
pub const AVATAR_CLASS: &str = "mii";
pub const CHARACTER_CLASS: &str = "mii-character";
pub const REFLECTION_CLASS: &str = "mii-reflection";
pub const FLAG_CLASS: &str = "flag-shadow";
pub const HIDDEN_CLASS: &str = "hidden";
pub const ON_MAP_CLASS: &str = "on-map";
pub const FADE_IN_CLASS: &str = "fade-in";
pub const HOVER_ANIMATION: &str = "anim-pulse";

// Dropdown button states
pub const ACTIVE_CLASS: &str = "active";
pub const TOP_CLASS: &str = "top";

// Assets
pub const ASSET_BASE: &str = "./";
pub const FLAG_OPACITY: f32 = 0.65;
pub const FLAG_STRETCH: f32 = 1.1; // flag width counter-scales the avatar scale

// Display labels for the BPM slider handles, one per band
pub const BPM_HANDLE_LABELS: [&str; 5] = ["<110", "110", "125", "140", "155+"];
