//! Central-symmetry engine.
//!
//! A symmetry pair binds a *parent* element to a generated *clone* that is
//! the point reflection of the parent through the canvas center, turned an
//! extra 180 degrees. While a pair is registered, every mutation of either
//! half is mirrored onto the other:
//!
//! ```text
//! clone.center   = 2 * canvas_center - parent.center
//! clone.rotation = (parent.rotation + 180) mod 360
//! clone.size     = parent.size
//! ```
//!
//! The registry is a plain parent -> clone map at runtime. It serializes as
//! an explicit list of pairs for history snapshots and saved documents.

use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};

use badgekit_core::DocumentError;

use crate::model::{Element, ElementId, Point};

/// One registered pair, in its serialized form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SymmetryPair {
    pub parent_id: ElementId,
    pub clone_id: ElementId,
}

/// Which half of a pair an element is.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PairRole {
    Parent,
    Clone,
}

/// The other half of a pair, as seen from one element.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Partner {
    pub id: ElementId,
    /// Role of the element that was looked up (not of the partner).
    pub role: PairRole,
}

/// Parent -> clone registry. Keys are unique and every clone id appears once.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "Vec<SymmetryPair>", into = "Vec<SymmetryPair>")]
pub struct SymmetryRegistry {
    pairs: BTreeMap<ElementId, ElementId>,
}

impl SymmetryRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.pairs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }

    /// Registers a pair. Refused if either id already belongs to a pair.
    pub fn insert(&mut self, parent_id: ElementId, clone_id: ElementId) -> bool {
        if parent_id == clone_id || self.is_paired(parent_id) || self.is_paired(clone_id) {
            return false;
        }
        self.pairs.insert(parent_id, clone_id);
        true
    }

    pub fn clone_of(&self, parent_id: ElementId) -> Option<ElementId> {
        self.pairs.get(&parent_id).copied()
    }

    pub fn parent_of(&self, clone_id: ElementId) -> Option<ElementId> {
        self.pairs
            .iter()
            .find_map(|(&p, &c)| (c == clone_id).then_some(p))
    }

    pub fn partner_of(&self, id: ElementId) -> Option<Partner> {
        if let Some(clone_id) = self.clone_of(id) {
            return Some(Partner {
                id: clone_id,
                role: PairRole::Parent,
            });
        }
        self.parent_of(id).map(|parent_id| Partner {
            id: parent_id,
            role: PairRole::Clone,
        })
    }

    pub fn is_paired(&self, id: ElementId) -> bool {
        self.partner_of(id).is_some()
    }

    /// Removes the pair containing `id` (as parent or clone).
    pub fn remove_containing(&mut self, id: ElementId) -> Option<SymmetryPair> {
        let parent_id = if self.pairs.contains_key(&id) {
            id
        } else {
            self.parent_of(id)?
        };
        self.pairs.remove(&parent_id).map(|clone_id| SymmetryPair {
            parent_id,
            clone_id,
        })
    }

    pub fn iter(&self) -> impl Iterator<Item = SymmetryPair> + '_ {
        self.pairs.iter().map(|(&parent_id, &clone_id)| SymmetryPair {
            parent_id,
            clone_id,
        })
    }

    /// Serialized list-of-pairs form.
    pub fn entries(&self) -> Vec<SymmetryPair> {
        self.iter().collect()
    }

    /// Drops pairs whose halves are not both in `existing`.
    pub fn retain_existing(&mut self, existing: &BTreeSet<ElementId>) {
        self.pairs
            .retain(|p, c| existing.contains(p) && existing.contains(c));
    }
}

impl TryFrom<Vec<SymmetryPair>> for SymmetryRegistry {
    type Error = DocumentError;

    fn try_from(entries: Vec<SymmetryPair>) -> Result<Self, Self::Error> {
        let mut registry = SymmetryRegistry::new();
        for pair in entries {
            if !registry.insert(pair.parent_id, pair.clone_id) {
                return Err(DocumentError::MalformedSymmetry {
                    reason: format!(
                        "element {} or {} appears in more than one pair",
                        pair.parent_id, pair.clone_id
                    ),
                });
            }
        }
        Ok(registry)
    }
}

impl From<SymmetryRegistry> for Vec<SymmetryPair> {
    fn from(registry: SymmetryRegistry) -> Self {
        registry.entries()
    }
}

/// Builds the mirrored counterpart of `source` under `partner_id`.
///
/// `source_role` is the role of `source` in its pair: a parent produces a
/// clone turned +180 degrees, a clone produces its parent turned -180.
pub fn mirror_element(
    source: &Element,
    partner_id: ElementId,
    canvas_center: Point,
    source_role: PairRole,
) -> Element {
    let mut mirrored = source.clone();
    mirrored.id = partner_id;
    mirrored.set_center(source.center().reflect_through(&canvas_center));
    let rotation = match source_role {
        PairRole::Parent => source.rotation() + 180.0,
        PairRole::Clone => source.rotation() - 180.0,
    };
    mirrored.set_rotation(rotation);
    mirrored
}

/// Creates a clone for every selected element that is not yet paired.
///
/// Returns the new element list (clones appended) and the updated registry.
/// Elements that already belong to a pair are skipped.
pub fn create_symmetry(
    selected: &[ElementId],
    elements: &[Element],
    registry: &SymmetryRegistry,
    canvas_center: Point,
    mut next_id: impl FnMut() -> ElementId,
) -> (Vec<Element>, SymmetryRegistry) {
    let mut out = elements.to_vec();
    let mut pairs = registry.clone();

    for &id in selected {
        if pairs.is_paired(id) {
            tracing::debug!(id, "Element already mirrored, skipping");
            continue;
        }
        let Some(parent) = elements.iter().find(|e| e.id == id) else {
            continue;
        };
        let clone_id = next_id();
        let clone = mirror_element(parent, clone_id, canvas_center, PairRole::Parent);
        pairs.insert(id, clone_id);
        out.push(clone);
        tracing::debug!(parent = id, clone = clone_id, "Created symmetry pair");
    }

    (out, pairs)
}

/// Removes every pair that any selected id belongs to. Elements are kept.
pub fn break_symmetry(selected: &[ElementId], registry: &SymmetryRegistry) -> SymmetryRegistry {
    let mut pairs = registry.clone();
    for &id in selected {
        pairs.remove_containing(id);
    }
    pairs
}

/// Computes the partner update after one half of a pair changed.
///
/// Returns `None` when `element_id` is not paired.
pub fn propagate(
    element_id: ElementId,
    updated: &Element,
    registry: &SymmetryRegistry,
    canvas_center: Point,
) -> Option<Element> {
    let partner = registry.partner_of(element_id)?;
    Some(mirror_element(updated, partner.id, canvas_center, partner.role))
}

/// Expands a deletion set with partners and drops the affected pairs.
pub fn cascade_deletion(
    ids: &[ElementId],
    registry: &SymmetryRegistry,
) -> (BTreeSet<ElementId>, SymmetryRegistry) {
    let mut pairs = registry.clone();
    let mut doomed: BTreeSet<ElementId> = ids.iter().copied().collect();
    for &id in ids {
        if let Some(pair) = pairs.remove_containing(id) {
            doomed.insert(pair.parent_id);
            doomed.insert(pair.clone_id);
        }
    }
    (doomed, pairs)
}

/// A pair that does not satisfy the mirror invariant.
#[derive(Debug, Clone, PartialEq)]
pub struct SymmetryViolation {
    pub pair: SymmetryPair,
    pub reason: String,
}

/// Checks every registered pair against the mirror invariant.
pub fn check_invariant(
    elements: &[Element],
    registry: &SymmetryRegistry,
    canvas_center: Point,
    tolerance: f64,
) -> Vec<SymmetryViolation> {
    let find = |id: ElementId| elements.iter().find(|e| e.id == id);
    let mut violations = Vec::new();

    for pair in registry.iter() {
        let (Some(parent), Some(clone)) = (find(pair.parent_id), find(pair.clone_id)) else {
            violations.push(SymmetryViolation {
                pair,
                reason: "orphaned pair".to_string(),
            });
            continue;
        };

        let expected = parent.center().reflect_through(&canvas_center);
        if expected.distance_to(&clone.center()) > tolerance {
            violations.push(SymmetryViolation {
                pair,
                reason: format!(
                    "clone center ({:.2}, {:.2}) expected ({:.2}, {:.2})",
                    clone.center().x,
                    clone.center().y,
                    expected.x,
                    expected.y
                ),
            });
        }
        if (clone.width - parent.width).abs() > tolerance
            || (clone.height - parent.height).abs() > tolerance
        {
            violations.push(SymmetryViolation {
                pair,
                reason: "clone size differs from parent".to_string(),
            });
        }
        let expected_rotation = crate::transform::normalize_degrees(parent.rotation() + 180.0);
        let diff = (clone.rotation() - expected_rotation).rem_euclid(360.0);
        if diff > tolerance && 360.0 - diff > tolerance {
            violations.push(SymmetryViolation {
                pair,
                reason: format!(
                    "clone rotation {} expected {}",
                    clone.rotation(),
                    expected_rotation
                ),
            });
        }
    }

    violations
}
