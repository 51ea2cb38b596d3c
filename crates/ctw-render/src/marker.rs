//! Node marker geometry shared by the renderer and hit testing.
//!
//! Spawns draw as squares, wool rooms as hexagons, everything else as
//! circles. Sizes are in world units.

use ctw_core::NodeType;
use kurbo::{BezPath, Circle, Point, Rect, Shape, Size};
use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum MarkerShape {
    Square,
    Hexagon,
    Circle,
}

/// Shape, size and fill of a node marker.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Marker {
    pub shape: MarkerShape,
    /// Full width of the marker.
    pub size: f64,
    pub fill: &'static str,
}

impl Marker {
    pub fn for_type(node_type: NodeType) -> Self {
        match node_type {
            NodeType::Spawn => Self {
                shape: MarkerShape::Square,
                size: 20.0,
                fill: "#3B82F6",
            },
            NodeType::WoolRoom => Self {
                shape: MarkerShape::Hexagon,
                size: 24.0,
                fill: "#F59E0B",
            },
            _ => Self {
                shape: MarkerShape::Circle,
                size: 16.0,
                fill: "#6B7280",
            },
        }
    }

    /// Hexagon corners, pointy side up.
    pub fn hexagon_points(center: Point, size: f64) -> [Point; 6] {
        let h = size / 2.0;
        let q = size / 4.0;
        [
            Point::new(center.x, center.y - h),
            Point::new(center.x + h, center.y - q),
            Point::new(center.x + h, center.y + q),
            Point::new(center.x, center.y + h),
            Point::new(center.x - h, center.y + q),
            Point::new(center.x - h, center.y - q),
        ]
    }

    /// Whether `p` falls on the marker centered at `center`, grown by `slop`
    /// on every side.
    pub fn contains(&self, center: Point, p: Point, slop: f64) -> bool {
        let size = self.size + 2.0 * slop;
        match self.shape {
            MarkerShape::Square => {
                Rect::from_center_size(center, Size::new(size, size)).contains(p)
            }
            MarkerShape::Circle => Circle::new(center, size / 2.0).contains(p),
            MarkerShape::Hexagon => {
                let corners = Self::hexagon_points(center, size);
                let mut path = BezPath::new();
                path.move_to(corners[0]);
                for corner in &corners[1..] {
                    path.line_to(*corner);
                }
                path.close_path();
                path.contains(p)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn marker_per_type() {
        assert_eq!(Marker::for_type(NodeType::Spawn).shape, MarkerShape::Square);
        assert_eq!(Marker::for_type(NodeType::WoolRoom).shape, MarkerShape::Hexagon);
        assert_eq!(Marker::for_type(NodeType::Hub).shape, MarkerShape::Circle);
        assert_eq!(Marker::for_type(NodeType::Default).size, 16.0);
    }

    #[test]
    fn circle_contains_within_radius() {
        let m = Marker::for_type(NodeType::Default);
        let c = Point::new(100.0, 100.0);
        assert!(m.contains(c, Point::new(107.0, 100.0), 0.0));
        assert!(!m.contains(c, Point::new(109.0, 100.0), 0.0));
        assert!(m.contains(c, Point::new(109.0, 100.0), 2.0));
    }

    #[test]
    fn square_corners_hit_but_circle_corners_miss() {
        let c = Point::new(0.0, 0.0);
        let corner = Point::new(7.5, 7.5);
        assert!(Marker::for_type(NodeType::Spawn).contains(c, corner, 0.0));
        assert!(!Marker::for_type(NodeType::Default).contains(c, corner, 0.0));
    }

    #[test]
    fn hexagon_excludes_cut_corners() {
        let m = Marker::for_type(NodeType::WoolRoom);
        let c = Point::new(0.0, 0.0);
        assert!(m.contains(c, Point::new(0.0, -11.0), 0.0));
        assert!(m.contains(c, Point::new(11.0, 0.0), 0.0));
        // Top-right bounding box corner is outside the slanted edge.
        assert!(!m.contains(c, Point::new(11.0, -11.0), 0.0));
    }
}
