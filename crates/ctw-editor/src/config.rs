//! Editor tuning knobs.

use ctw_core::{DEFAULT_GRID_SIZE, TeamPair};

/// Configuration for a `MapEditor` session.
#[derive(Debug, Clone, PartialEq)]
pub struct EditorConfig {
    /// World units per grid cell.
    pub grid_size: f64,
    /// Zoom clamp, inclusive.
    pub min_zoom: f64,
    pub max_zoom: f64,
    /// Zoom multiplier for one wheel notch away from the user.
    pub wheel_zoom_out: f64,
    /// Zoom multiplier for one wheel notch toward the user.
    pub wheel_zoom_in: f64,
    /// Oldest history entries are dropped past this many.
    pub history_depth: usize,
    /// How long a warning notice stays visible.
    pub notice_duration_ms: f64,
    /// Hit radius added around markers and edges, in screen pixels.
    pub hit_tolerance_px: f64,
    /// Teams assigned to the primary side and its reflection.
    pub teams: TeamPair,
}

impl Default for EditorConfig {
    fn default() -> Self {
        Self {
            grid_size: DEFAULT_GRID_SIZE,
            min_zoom: 0.1,
            max_zoom: 5.0,
            wheel_zoom_out: 0.9,
            wheel_zoom_in: 1.1,
            history_depth: 200,
            notice_duration_ms: 3000.0,
            hit_tolerance_px: 6.0,
            teams: TeamPair::default(),
        }
    }
}
