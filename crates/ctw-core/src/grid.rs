//! Grid snapping.
//!
//! Every placed node sits on the center of a grid cell, so occupancy checks
//! compare exact, stable coordinates instead of raw pointer floats.

use kurbo::Point;

/// Snap a world position to the center of the grid cell containing it.
pub fn snap(p: Point, grid_size: f64) -> Point {
    Point::new(snap_axis(p.x, grid_size), snap_axis(p.y, grid_size))
}

fn snap_axis(v: f64, grid_size: f64) -> f64 {
    (v / grid_size).floor() * grid_size + grid_size / 2.0
}

/// Integer cell coordinates of the cell containing `p`.
pub fn cell_of(p: Point, grid_size: f64) -> (i64, i64) {
    (
        (p.x / grid_size).floor() as i64,
        (p.y / grid_size).floor() as i64,
    )
}

/// Whether `p` is already exactly a cell center.
pub fn is_cell_center(p: Point, grid_size: f64) -> bool {
    snap(p, grid_size) == p
}

/// Edge weight in grid cells: rounded Euclidean distance.
pub fn edge_weight(start: Point, end: Point, grid_size: f64) -> u32 {
    (start.distance(end) / grid_size).round() as u32
}
