//! Pointer gesture state machine and resize-handle geometry.
//!
//! Only one gesture is active at a time: `Idle -> Dragging | Resizing |
//! Marquee -> Idle`. Intermediate frames never touch history; the owner
//! commits once when the gesture ends.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::model::{Bounds, Element, ElementId, Point};
use crate::snapping::{SnapGuide, SnapTargets};

/// Modifier keys held during a pointer gesture.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PointerModifiers {
    /// Multi-select on click/marquee; keep aspect ratio while resizing.
    pub shift: bool,
    /// Fine movement: bypasses snapping.
    pub alt: bool,
}

impl PointerModifiers {
    pub const NONE: PointerModifiers = PointerModifiers {
        shift: false,
        alt: false,
    };

    pub fn shift() -> Self {
        Self {
            shift: true,
            ..Self::NONE
        }
    }

    pub fn alt() -> Self {
        Self {
            alt: true,
            ..Self::NONE
        }
    }
}

/// One of the eight resize handles around an element.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ResizeHandle {
    N,
    S,
    E,
    W,
    NE,
    NW,
    SE,
    SW,
}

impl ResizeHandle {
    pub const ALL: [ResizeHandle; 8] = [
        ResizeHandle::NW,
        ResizeHandle::N,
        ResizeHandle::NE,
        ResizeHandle::E,
        ResizeHandle::SE,
        ResizeHandle::S,
        ResizeHandle::SW,
        ResizeHandle::W,
    ];

    fn moves_left(self) -> bool {
        matches!(self, ResizeHandle::W | ResizeHandle::NW | ResizeHandle::SW)
    }

    fn moves_right(self) -> bool {
        matches!(self, ResizeHandle::E | ResizeHandle::NE | ResizeHandle::SE)
    }

    fn moves_top(self) -> bool {
        matches!(self, ResizeHandle::N | ResizeHandle::NE | ResizeHandle::NW)
    }

    fn moves_bottom(self) -> bool {
        matches!(self, ResizeHandle::S | ResizeHandle::SE | ResizeHandle::SW)
    }

    pub fn is_corner(self) -> bool {
        (self.moves_left() || self.moves_right()) && (self.moves_top() || self.moves_bottom())
    }

    /// Where the handle sits on `bounds`.
    pub fn position(self, bounds: &Bounds) -> Point {
        let x = if self.moves_left() {
            bounds.left()
        } else if self.moves_right() {
            bounds.right()
        } else {
            bounds.center_x()
        };
        let y = if self.moves_top() {
            bounds.top()
        } else if self.moves_bottom() {
            bounds.bottom()
        } else {
            bounds.center_y()
        };
        Point::new(x, y)
    }

    /// Handle within `radius` of `point`, nearest first.
    pub fn hit_test(bounds: &Bounds, point: &Point, radius: f64) -> Option<ResizeHandle> {
        ResizeHandle::ALL
            .into_iter()
            .map(|h| (h, h.position(bounds).distance_to(point)))
            .filter(|(_, d)| *d <= radius)
            .min_by(|a, b| a.1.total_cmp(&b.1))
            .map(|(h, _)| h)
    }

    /// New bounds after dragging this handle by `(dx, dy)` from `start`.
    ///
    /// Edges the handle does not own stay anchored. With `aspect_ratio`
    /// (width / height) set, the dominant delta axis drives and the other
    /// dimension follows. Sizes never drop below `min_size`.
    pub fn apply(
        self,
        start: &Bounds,
        dx: f64,
        dy: f64,
        aspect_ratio: Option<f64>,
        min_size: f64,
    ) -> Bounds {
        let mut width = start.width;
        let mut height = start.height;

        if self.moves_left() {
            width -= dx;
        } else if self.moves_right() {
            width += dx;
        }
        if self.moves_top() {
            height -= dy;
        } else if self.moves_bottom() {
            height += dy;
        }

        match aspect_ratio.filter(|r| r.is_finite() && *r > 0.0) {
            Some(ratio) => {
                let width_drives = if self.is_corner() {
                    dx.abs() >= dy.abs()
                } else {
                    self.moves_left() || self.moves_right()
                };
                if width_drives {
                    height = width / ratio;
                } else {
                    width = height * ratio;
                }
                if width < min_size || height < min_size {
                    let scale = (min_size / width.max(f64::EPSILON))
                        .max(min_size / height.max(f64::EPSILON));
                    width *= scale;
                    height *= scale;
                }
            }
            None => {
                width = width.max(min_size);
                height = height.max(min_size);
            }
        }

        let x = if self.moves_left() {
            start.right() - width
        } else {
            start.x
        };
        let y = if self.moves_top() {
            start.bottom() - height
        } else {
            start.y
        };

        Bounds::new(x, y, width, height)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            ResizeHandle::N => "n",
            ResizeHandle::S => "s",
            ResizeHandle::E => "e",
            ResizeHandle::W => "w",
            ResizeHandle::NE => "ne",
            ResizeHandle::NW => "nw",
            ResizeHandle::SE => "se",
            ResizeHandle::SW => "sw",
        }
    }
}

impl fmt::Display for ResizeHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// An element drag in progress.
#[derive(Debug, Clone)]
pub struct DragGesture {
    pub origin: Point,
    /// Elements being moved, as they were at pointer-down.
    pub moving: Vec<ElementId>,
    /// Full element list at pointer-down, restored on cancel.
    pub before: Vec<Element>,
    /// Document modified flag at pointer-down, restored on cancel.
    pub was_modified: bool,
    /// Guide candidates collected at pointer-down.
    pub targets: SnapTargets,
    /// Bounding box of the moving elements at pointer-down.
    pub start_bounds: Bounds,
    /// Total applied delta after snapping.
    pub delta: (f64, f64),
    pub guides: Vec<SnapGuide>,
    pub target_ids: Vec<ElementId>,
}

/// A resize-handle drag in progress.
#[derive(Debug, Clone)]
pub struct ResizeGesture {
    pub id: ElementId,
    pub handle: ResizeHandle,
    pub origin: Point,
    pub start: Bounds,
    pub before: Vec<Element>,
    pub was_modified: bool,
}

/// A marquee selection in progress.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MarqueeGesture {
    pub origin: Point,
    pub current: Point,
    pub additive: bool,
}

impl MarqueeGesture {
    /// Normalized selection rectangle.
    pub fn rect(&self) -> Bounds {
        Bounds::from_corners(self.origin, self.current)
    }
}

#[derive(Debug, Clone, Default)]
pub enum GestureState {
    #[default]
    Idle,
    Dragging(DragGesture),
    Resizing(ResizeGesture),
    Marquee(MarqueeGesture),
}

impl GestureState {
    pub fn is_idle(&self) -> bool {
        matches!(self, GestureState::Idle)
    }

    pub fn name(&self) -> &'static str {
        match self {
            GestureState::Idle => "idle",
            GestureState::Dragging(_) => "dragging",
            GestureState::Resizing(_) => "resizing",
            GestureState::Marquee(_) => "marquee",
        }
    }
}
