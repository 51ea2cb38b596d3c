pub mod hit;
pub mod marker;

pub use hit::hit_test;
pub use marker::{Marker, MarkerShape};
