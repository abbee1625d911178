pub mod navigation;

pub use navigation::{DETAIL_FACTOR, Navigation};
