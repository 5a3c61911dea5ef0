pub mod basket;
pub mod catalog;
pub mod constants;
pub mod grid;
pub mod layout;
pub mod motion;
pub mod projection;
pub mod state;

pub use basket::*;
pub use catalog::*;
pub use grid::*;
pub use layout::*;
pub use motion::*;
pub use projection::*;
pub use state::*;

// Demo catalog bundled with the page
pub static CATALOG_JSON: &str = include_str!("../../assets/djs.json");
