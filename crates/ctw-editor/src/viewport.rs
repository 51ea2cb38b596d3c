//! Screen ↔ world transform under pan and zoom.
//!
//! `screen = origin + pan + world * zoom`. Zoom is uniform on both axes.

use crate::config::EditorConfig;
use kurbo::{Point, Vec2};

#[derive(Debug, Clone, Copy, PartialEq)]
struct PanDrag {
    start_screen: Point,
    start_pan: Vec2,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Viewport {
    zoom: f64,
    pan: Vec2,
    /// Screen position of the drawing surface's top-left corner.
    origin: Point,
    min_zoom: f64,
    max_zoom: f64,
    wheel_zoom_out: f64,
    wheel_zoom_in: f64,
    drag: Option<PanDrag>,
}

impl Default for Viewport {
    fn default() -> Self {
        Self::new(&EditorConfig::default())
    }
}

impl Viewport {
    pub fn new(config: &EditorConfig) -> Self {
        Self {
            zoom: 1.0,
            pan: Vec2::ZERO,
            origin: Point::ORIGIN,
            min_zoom: config.min_zoom,
            max_zoom: config.max_zoom,
            wheel_zoom_out: config.wheel_zoom_out,
            wheel_zoom_in: config.wheel_zoom_in,
            drag: None,
        }
    }

    pub fn zoom(&self) -> f64 {
        self.zoom
    }

    pub fn pan(&self) -> Vec2 {
        self.pan
    }

    pub fn origin(&self) -> Point {
        self.origin
    }

    /// The host reports where the surface sits on screen (e.g. after layout).
    pub fn set_origin(&mut self, origin: Point) {
        self.origin = origin;
    }

    pub fn screen_to_world(&self, screen: Point) -> Point {
        Point::new(
            (screen.x - self.origin.x - self.pan.x) / self.zoom,
            (screen.y - self.origin.y - self.pan.y) / self.zoom,
        )
    }

    pub fn world_to_screen(&self, world: Point) -> Point {
        Point::new(
            world.x * self.zoom + self.pan.x + self.origin.x,
            world.y * self.zoom + self.pan.y + self.origin.y,
        )
    }

    /// Zoom one wheel step around `screen`, keeping the world point under
    /// the cursor fixed. Returns whether the view changed.
    pub fn wheel(&mut self, screen: Point, delta_y: f64) -> bool {
        if delta_y == 0.0 || !delta_y.is_finite() {
            return false;
        }
        let factor = if delta_y > 0.0 {
            self.wheel_zoom_out
        } else {
            self.wheel_zoom_in
        };
        let new_zoom = (self.zoom * factor).clamp(self.min_zoom, self.max_zoom);
        if new_zoom == self.zoom {
            return false;
        }

        let anchor = self.screen_to_world(screen);
        self.zoom = new_zoom;
        self.pan = Vec2::new(
            screen.x - self.origin.x - anchor.x * new_zoom,
            screen.y - self.origin.y - anchor.y * new_zoom,
        );
        // A drag in progress continues from the zoomed view.
        if let Some(drag) = self.drag.as_mut() {
            drag.start_screen = screen;
            drag.start_pan = self.pan;
        }
        log::trace!("zoom {:.3} pan ({:.1}, {:.1})", self.zoom, self.pan.x, self.pan.y);
        true
    }

    // ─── Panning ─────────────────────────────────────────────────────────

    pub fn begin_pan(&mut self, screen: Point) {
        self.drag = Some(PanDrag {
            start_screen: screen,
            start_pan: self.pan,
        });
    }

    /// Track the pointer while panning. Returns whether the view changed.
    pub fn drag_pan(&mut self, screen: Point) -> bool {
        let Some(drag) = self.drag else {
            return false;
        };
        let pan = drag.start_pan + (screen - drag.start_screen);
        if pan == self.pan {
            return false;
        }
        self.pan = pan;
        true
    }

    /// Stop panning (button release or pointer leaving the surface).
    pub fn end_pan(&mut self) -> bool {
        self.drag.take().is_some()
    }

    pub fn is_panning(&self) -> bool {
        self.drag.is_some()
    }

    /// Back to zoom 1 with no pan.
    pub fn reset(&mut self) -> bool {
        let changed = self.zoom != 1.0 || self.pan != Vec2::ZERO;
        self.zoom = 1.0;
        self.pan = Vec2::ZERO;
        self.drag = None;
        changed
    }
}
