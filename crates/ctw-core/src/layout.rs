//! Map layout: the two team sides, the neutral gap between them, and the
//! symmetry policy relating the sides.
//!
//! All dimensions are in grid cells. World coordinates are derived by
//! multiplying with the grid size (pixels per cell).

use kurbo::Size;
use serde::{Deserialize, Serialize};

/// Default world units per grid cell.
pub const DEFAULT_GRID_SIZE: f64 = 50.0;

/// Smallest accepted team side width/height, in cells.
pub const MIN_SIDE_CELLS: u32 = 1;

/// Smallest accepted middle gap width, in cells.
pub const MIN_GAP_CELLS: u32 = 0;

/// How the two team sides relate to each other.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Symmetry {
    /// Reflection across the vertical axis through the middle of the gap.
    #[default]
    Mirror,
    /// 180° rotation about the map center. Selectable, but has no editing
    /// behavior yet.
    Rotate,
}

impl Symmetry {
    pub fn from_name(name: &str) -> Option<Self> {
        match name.trim().to_ascii_uppercase().as_str() {
            "MIRROR" => Some(Self::Mirror),
            "ROTATE" => Some(Self::Rotate),
            _ => None,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Self::Mirror => "MIRROR",
            Self::Rotate => "ROTATE",
        }
    }
}

/// Layout configuration defining the map structure and symmetry.
///
/// Constructed through [`MapLayout::new`] or [`MapLayout::from_form`], both of
/// which clamp dimensions to their floor instead of rejecting them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MapLayout {
    pub name: String,
    pub team_side_width: u32,
    pub team_side_height: u32,
    pub middle_gap_width: u32,
    pub symmetry: Symmetry,
    /// Whether each team's side is symmetric internally. Carried for the
    /// settings form; the editing engine does not read it.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub internal_team_symmetry: Option<bool>,
}

impl Default for MapLayout {
    fn default() -> Self {
        Self {
            name: "Untitled Map".to_string(),
            team_side_width: 10,
            team_side_height: 10,
            middle_gap_width: 2,
            symmetry: Symmetry::Mirror,
            internal_team_symmetry: None,
        }
    }
}

impl MapLayout {
    /// Build a layout, clamping each dimension to its minimum.
    pub fn new(
        name: impl Into<String>,
        team_side_width: i64,
        team_side_height: i64,
        middle_gap_width: i64,
        symmetry: Symmetry,
    ) -> Self {
        Self {
            name: name.into(),
            team_side_width: clamp_cells(team_side_width, MIN_SIDE_CELLS),
            team_side_height: clamp_cells(team_side_height, MIN_SIDE_CELLS),
            middle_gap_width: clamp_cells(middle_gap_width, MIN_GAP_CELLS),
            symmetry,
            internal_team_symmetry: None,
        }
    }

    /// Build a layout from raw settings-form fields.
    ///
    /// Each dimension is read from its leading integer, so "3.5" is 3 and
    /// "12px" is 12. Fields with no leading digits fall back to the floor
    /// value, as do non-positive ones. An unrecognized symmetry name falls back to
    /// [`Symmetry::Mirror`].
    pub fn from_form(name: &str, width: &str, height: &str, gap: &str, symmetry: &str) -> Self {
        let parse = |raw: &str, floor: u32| leading_int(raw).unwrap_or(i64::from(floor));
        let layout = Self::new(
            name.trim(),
            parse(width, MIN_SIDE_CELLS),
            parse(height, MIN_SIDE_CELLS),
            parse(gap, MIN_GAP_CELLS),
            Symmetry::from_name(symmetry).unwrap_or_default(),
        );
        log::debug!(
            "layout from form: {}x{} gap {} ({})",
            layout.team_side_width,
            layout.team_side_height,
            layout.middle_gap_width,
            layout.symmetry.name()
        );
        layout
    }

    /// Re-apply the dimension floors (for layouts built field by field).
    #[must_use]
    pub fn sanitized(mut self) -> Self {
        self.team_side_width = self.team_side_width.max(MIN_SIDE_CELLS);
        self.team_side_height = self.team_side_height.max(MIN_SIDE_CELLS);
        self.middle_gap_width = self.middle_gap_width.max(MIN_GAP_CELLS);
        self
    }

    /// Total map width in cells: both sides plus the gap.
    pub fn total_width_cells(&self) -> u32 {
        self.team_side_width
            .saturating_mul(2)
            .saturating_add(self.middle_gap_width)
    }

    /// Canvas dimensions in world units.
    pub fn canvas_size(&self, grid_size: f64) -> Size {
        Size::new(
            f64::from(self.total_width_cells()) * grid_size,
            f64::from(self.team_side_height) * grid_size,
        )
    }

    /// World x of the symmetry axis: the middle of the gap.
    pub fn axis_x(&self, grid_size: f64) -> f64 {
        (f64::from(self.team_side_width) + f64::from(self.middle_gap_width) / 2.0) * grid_size
    }
}

/// The optionally signed integer at the start of `raw`, after whitespace.
fn leading_int(raw: &str) -> Option<i64> {
    let s = raw.trim_start();
    let sign_len = usize::from(s.starts_with(['+', '-']));
    let digits = s[sign_len..].bytes().take_while(u8::is_ascii_digit).count();
    if digits == 0 {
        return None;
    }
    s[..sign_len + digits].parse().ok()
}

fn clamp_cells(value: i64, floor: u32) -> u32 {
    value.clamp(i64::from(floor), i64::from(u32::MAX)) as u32
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn axis_sits_in_middle_of_gap() {
        let layout = MapLayout::new("arena", 10, 10, 2, Symmetry::Mirror);
        assert_eq!(layout.axis_x(50.0), 550.0);
        let size = layout.canvas_size(50.0);
        assert_eq!(size.width, 1100.0);
        assert_eq!(size.height, 500.0);
    }

    #[test]
    fn odd_gap_puts_axis_on_cell_center() {
        let layout = MapLayout::new("odd", 4, 4, 1, Symmetry::Mirror);
        assert_eq!(layout.axis_x(50.0), 225.0);
    }

    #[test]
    fn non_positive_dimensions_are_clamped() {
        let layout = MapLayout::new("tiny", 0, -3, -1, Symmetry::Mirror);
        assert_eq!(layout.team_side_width, 1);
        assert_eq!(layout.team_side_height, 1);
        assert_eq!(layout.middle_gap_width, 0);
    }

    #[test]
    fn form_input_falls_back_on_garbage() {
        let layout = MapLayout::from_form(" Canyon ", "abc", "12", "", "rotate");
        assert_eq!(layout.name, "Canyon");
        assert_eq!(layout.team_side_width, 1);
        assert_eq!(layout.team_side_height, 12);
        assert_eq!(layout.middle_gap_width, 0);
        assert_eq!(layout.symmetry, Symmetry::Rotate);

        let layout = MapLayout::from_form("x", "8", "8", "3", "diagonal");
        assert_eq!(layout.symmetry, Symmetry::Mirror);
    }

    #[test]
    fn form_input_reads_leading_integer() {
        let layout = MapLayout::from_form("x", "3.5", "12px", " 2 cells", "mirror");
        assert_eq!(layout.team_side_width, 3);
        assert_eq!(layout.team_side_height, 12);
        assert_eq!(layout.middle_gap_width, 2);

        let layout = MapLayout::from_form("x", "-4", "+6", "-1", "mirror");
        assert_eq!(layout.team_side_width, 1);
        assert_eq!(layout.team_side_height, 6);
        assert_eq!(layout.middle_gap_width, 0);
    }

    #[test]
    fn sanitized_restores_floors() {
        let layout = MapLayout {
            team_side_width: 0,
            team_side_height: 0,
            ..MapLayout::default()
        }
        .sanitized();
        assert_eq!(layout.team_side_width, 1);
        assert_eq!(layout.team_side_height, 1);
    }
}
