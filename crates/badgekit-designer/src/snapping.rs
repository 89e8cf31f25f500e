//! Snap-to-guide alignment for dragged elements.
//!
//! Guides come from the canvas (edges and center) and from every element
//! that is not part of the moving selection (edges and centers). Each axis
//! is snapped independently: the moving element's three reference lines
//! (start edge, center, end edge) are compared against every guide, and the
//! nearest pair within the threshold wins. An end edge meeting another
//! element's start edge (or the reverse) is reported as an adjacency guide.

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

use crate::model::{Bounds, Element, ElementId};

const ALIGN_EPSILON: f64 = 1e-6;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Axis {
    /// Vertical guide line; positions are x values.
    X,
    /// Horizontal guide line; positions are y values.
    Y,
}

/// Which line of a box along one axis.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Anchor {
    Start,
    Center,
    End,
}

impl Anchor {
    const ORDER: [Anchor; 3] = [Anchor::Start, Anchor::Center, Anchor::End];

    fn of(self, start: f64, size: f64) -> f64 {
        match self {
            Anchor::Start => start,
            Anchor::Center => start + size / 2.0,
            Anchor::End => start + size,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum GuideKind {
    CanvasEdge,
    CanvasCenter,
    ElementEdge,
    ElementCenter,
    Adjacency,
}

/// A guide line that the moving element aligned with.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SnapGuide {
    pub axis: Axis,
    pub position: f64,
    pub kind: GuideKind,
    pub source: Option<ElementId>,
}

#[derive(Debug, Clone, Copy, PartialEq)]
struct Candidate {
    position: f64,
    anchor: Anchor,
    source: Option<ElementId>,
}

impl Candidate {
    fn kind_against(&self, reference: Anchor) -> GuideKind {
        match (self.source, self.anchor, reference) {
            (None, Anchor::Center, _) => GuideKind::CanvasCenter,
            (None, _, _) => GuideKind::CanvasEdge,
            (Some(_), Anchor::Start, Anchor::End) | (Some(_), Anchor::End, Anchor::Start) => {
                GuideKind::Adjacency
            }
            (Some(_), Anchor::Center, _) => GuideKind::ElementCenter,
            (Some(_), _, _) => GuideKind::ElementEdge,
        }
    }
}

/// Precomputed guide candidates for one drag gesture.
#[derive(Debug, Clone, Default)]
pub struct SnapTargets {
    x: Vec<Candidate>,
    y: Vec<Candidate>,
}

impl SnapTargets {
    /// Collects guides from the canvas and every element not in `excluded`.
    pub fn collect<'a>(
        canvas: Bounds,
        elements: impl IntoIterator<Item = &'a Element>,
        excluded: &BTreeSet<ElementId>,
    ) -> Self {
        let mut targets = SnapTargets::default();
        targets.push_box(canvas, None);
        for element in elements {
            if excluded.contains(&element.id) {
                continue;
            }
            targets.push_box(element.bounds(), Some(element.id));
        }
        targets
    }

    fn push_box(&mut self, b: Bounds, source: Option<ElementId>) {
        for anchor in Anchor::ORDER {
            self.x.push(Candidate {
                position: anchor.of(b.x, b.width),
                anchor,
                source,
            });
            self.y.push(Candidate {
                position: anchor.of(b.y, b.height),
                anchor,
                source,
            });
        }
    }

    pub fn len(&self) -> usize {
        self.x.len()
    }

    pub fn is_empty(&self) -> bool {
        self.x.is_empty()
    }
}

/// Corrected position plus feedback for the interaction layer.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct SnapResult {
    pub x: f64,
    pub y: f64,
    pub snapped_x: bool,
    pub snapped_y: bool,
    pub guides: Vec<SnapGuide>,
    pub target_ids: Vec<ElementId>,
}

impl SnapResult {
    fn passthrough(proposed: &Bounds) -> Self {
        Self {
            x: proposed.x,
            y: proposed.y,
            ..Default::default()
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Snapper {
    threshold: f64,
    enabled: bool,
}

impl Snapper {
    pub fn new(threshold: f64) -> Self {
        Self {
            threshold: threshold.max(0.0),
            enabled: true,
        }
    }

    pub fn with_enabled(mut self, enabled: bool) -> Self {
        self.enabled = enabled;
        self
    }

    pub fn threshold(&self) -> f64 {
        self.threshold
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    /// Snaps `proposed` against freshly collected targets.
    pub fn snap(
        &self,
        proposed: Bounds,
        canvas: Bounds,
        elements: &[Element],
        excluded: &BTreeSet<ElementId>,
        fine_override: bool,
    ) -> SnapResult {
        if !self.enabled || fine_override {
            return SnapResult::passthrough(&proposed);
        }
        let targets = SnapTargets::collect(canvas, elements, excluded);
        self.snap_to(&targets, proposed, false)
    }

    /// Snaps `proposed` against precomputed targets.
    pub fn snap_to(
        &self,
        targets: &SnapTargets,
        proposed: Bounds,
        fine_override: bool,
    ) -> SnapResult {
        if !self.enabled || fine_override {
            return SnapResult::passthrough(&proposed);
        }

        let mut result = SnapResult::passthrough(&proposed);

        if let Some(offset) = self.best_offset(&targets.x, proposed.x, proposed.width) {
            result.x = proposed.x + offset;
            result.snapped_x = true;
            collect_aligned(&targets.x, Axis::X, result.x, proposed.width, &mut result);
        }
        if let Some(offset) = self.best_offset(&targets.y, proposed.y, proposed.height) {
            result.y = proposed.y + offset;
            result.snapped_y = true;
            collect_aligned(&targets.y, Axis::Y, result.y, proposed.height, &mut result);
        }

        if result.snapped_x || result.snapped_y {
            tracing::trace!(
                x = result.x,
                y = result.y,
                guides = result.guides.len(),
                "Snapped"
            );
        }
        result
    }

    /// Offset to apply on one axis, nearest reference/guide pair first.
    fn best_offset(&self, candidates: &[Candidate], start: f64, size: f64) -> Option<f64> {
        let mut best: Option<(f64, f64)> = None;
        for reference in Anchor::ORDER {
            let line = reference.of(start, size);
            for candidate in candidates {
                let delta = candidate.position - line;
                let distance = delta.abs();
                if distance > self.threshold {
                    continue;
                }
                if best.is_none_or(|(d, _)| distance < d) {
                    best = Some((distance, delta));
                }
            }
        }
        best.map(|(_, delta)| delta)
    }
}

impl Default for Snapper {
    fn default() -> Self {
        Self::new(badgekit_core::constants::SNAP_THRESHOLD_PX)
    }
}

fn collect_aligned(
    candidates: &[Candidate],
    axis: Axis,
    start: f64,
    size: f64,
    result: &mut SnapResult,
) {
    for reference in Anchor::ORDER {
        let line = reference.of(start, size);
        for candidate in candidates {
            if (candidate.position - line).abs() > ALIGN_EPSILON {
                continue;
            }
            let guide = SnapGuide {
                axis,
                position: candidate.position,
                kind: candidate.kind_against(reference),
                source: candidate.source,
            };
            if !result.guides.contains(&guide) {
                result.guides.push(guide);
            }
            if let Some(id) = candidate.source {
                if !result.target_ids.contains(&id) {
                    result.target_ids.push(id);
                }
            }
        }
    }
}
