//! Viewport and coordinate transformation between screen and badge space.
//!
//! Screen coordinates are host pixels inside the pan/zoom container (0,0 at
//! top-left). Badge coordinates are print pixels at the document DPI, also
//! top-left origin with +Y down. The badge is drawn at `pan + badge * zoom`.

use std::fmt;

use crate::model::{Bounds, Point};

pub const MIN_ZOOM: f64 = 0.1;
pub const MAX_ZOOM: f64 = 50.0;
const ZOOM_STEP: f64 = 1.2;

/// Maps a screen point into badge space given where the badge is rendered.
///
/// ```text
/// badge = (screen - rendered.origin) * (intrinsic / rendered.size)
/// ```
///
/// A degenerate rendered rect maps everything to the badge origin.
pub fn screen_to_badge(
    screen: Point,
    rendered: &Bounds,
    intrinsic_width: f64,
    intrinsic_height: f64,
) -> Point {
    if rendered.width <= 0.0 || rendered.height <= 0.0 {
        return Point::new(0.0, 0.0);
    }
    Point::new(
        (screen.x - rendered.x) * (intrinsic_width / rendered.width),
        (screen.y - rendered.y) * (intrinsic_height / rendered.height),
    )
}

/// Pan/zoom state of the container the badge is drawn in.
#[derive(Debug, Clone, PartialEq)]
pub struct Viewport {
    zoom: f64,
    pan_x: f64,
    pan_y: f64,
    canvas_width: f64,
    canvas_height: f64,
}

impl Viewport {
    /// Creates a viewport for a container of the given screen size.
    pub fn new(canvas_width: f64, canvas_height: f64) -> Self {
        Self {
            zoom: 1.0,
            pan_x: 0.0,
            pan_y: 0.0,
            canvas_width,
            canvas_height,
        }
    }

    pub fn canvas_width(&self) -> f64 {
        self.canvas_width
    }

    pub fn canvas_height(&self) -> f64 {
        self.canvas_height
    }

    /// Sets the container dimensions (typically called when the window resizes).
    pub fn set_canvas_size(&mut self, width: f64, height: f64) {
        self.canvas_width = width;
        self.canvas_height = height;
    }

    /// Gets the current zoom level (1.0 = one badge pixel per screen pixel).
    pub fn zoom(&self) -> f64 {
        self.zoom
    }

    /// Sets the zoom level, ignored outside 0.1..50.0.
    pub fn set_zoom(&mut self, zoom: f64) {
        if zoom > MIN_ZOOM && zoom < MAX_ZOOM {
            self.zoom = zoom;
        }
    }

    pub fn zoom_in(&mut self) {
        self.set_zoom(self.zoom * ZOOM_STEP);
    }

    pub fn zoom_out(&mut self) {
        self.set_zoom(self.zoom / ZOOM_STEP);
    }

    pub fn pan_x(&self) -> f64 {
        self.pan_x
    }

    pub fn pan_y(&self) -> f64 {
        self.pan_y
    }

    pub fn set_pan(&mut self, x: f64, y: f64) {
        self.pan_x = x;
        self.pan_y = y;
    }

    pub fn pan_by(&mut self, dx: f64, dy: f64) {
        self.pan_x += dx;
        self.pan_y += dy;
    }

    /// Screen rectangle the badge currently occupies.
    pub fn badge_rect(&self, badge_width: f64, badge_height: f64) -> Bounds {
        Bounds::new(
            self.pan_x,
            self.pan_y,
            badge_width * self.zoom,
            badge_height * self.zoom,
        )
    }

    /// Converts a screen point to badge coordinates.
    pub fn screen_to_badge(&self, screen: Point, badge_width: f64, badge_height: f64) -> Point {
        let rect = self.badge_rect(badge_width, badge_height);
        screen_to_badge(screen, &rect, badge_width, badge_height)
    }

    /// Converts badge coordinates to a screen point.
    pub fn badge_to_screen(&self, badge: Point) -> Point {
        Point::new(badge.x * self.zoom + self.pan_x, badge.y * self.zoom + self.pan_y)
    }

    /// Badge-space point under the center of the visible container.
    ///
    /// New elements are placed here.
    pub fn visible_center(&self, badge_width: f64, badge_height: f64) -> Point {
        self.screen_to_badge(
            Point::new(self.canvas_width / 2.0, self.canvas_height / 2.0),
            badge_width,
            badge_height,
        )
    }

    /// Fits the badge into the container with padding on every side.
    ///
    /// `padding` is the fraction of the container reserved per side (0.0 - 0.5).
    pub fn fit_badge(&mut self, badge_width: f64, badge_height: f64, padding: f64) {
        if badge_width <= 0.0 || badge_height <= 0.0 {
            return;
        }

        let padding_factor = 1.0 - (padding.clamp(0.0, 0.49) * 2.0);
        let zoom_x = (self.canvas_width * padding_factor) / badge_width;
        let zoom_y = (self.canvas_height * padding_factor) / badge_height;
        let new_zoom = zoom_x.min(zoom_y).clamp(MIN_ZOOM, MAX_ZOOM);

        self.zoom = new_zoom;
        self.pan_x = (self.canvas_width - badge_width * new_zoom) / 2.0;
        self.pan_y = (self.canvas_height - badge_height * new_zoom) / 2.0;
    }

    /// Zooms keeping the badge point under the cursor fixed on screen.
    pub fn zoom_to_point(&mut self, badge_point: &Point, new_zoom: f64) {
        if new_zoom <= MIN_ZOOM || new_zoom >= MAX_ZOOM {
            return;
        }

        let screen = self.badge_to_screen(*badge_point);
        self.zoom = new_zoom;
        self.pan_x = screen.x - badge_point.x * new_zoom;
        self.pan_y = screen.y - badge_point.y * new_zoom;
    }

    pub fn zoom_in_at(&mut self, badge_point: &Point) {
        self.zoom_to_point(badge_point, self.zoom * ZOOM_STEP);
    }

    pub fn zoom_out_at(&mut self, badge_point: &Point) {
        self.zoom_to_point(badge_point, self.zoom / ZOOM_STEP);
    }

    /// Resets to 1:1 zoom with the badge at the container origin.
    pub fn reset(&mut self) {
        self.zoom = 1.0;
        self.pan_x = 0.0;
        self.pan_y = 0.0;
    }
}

impl fmt::Display for Viewport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{:.0}% in {}x{} view, pan {:.1},{:.1}",
            self.zoom * 100.0,
            self.canvas_width,
            self.canvas_height,
            self.pan_x,
            self.pan_y
        )
    }
}

impl Default for Viewport {
    fn default() -> Self {
        Self::new(1200.0, 800.0)
    }
}
