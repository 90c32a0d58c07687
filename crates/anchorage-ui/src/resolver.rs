//! Anchor resolution: turns anchors and sizes into absolute rectangles.
//!
//! Resolution is demand-driven. Resolving an object first resolves every
//! object it is anchored to, using one memo per pass so each object is
//! computed at most once. The walk uses an explicit stack rather than native
//! recursion; an object met again while it is still on the stack closes a
//! cycle, and every object on that loop fails with `CyclicAnchor`.

use crate::anchor::{Axis, AxisRole};
use crate::error::{UiError, UiResult};
use crate::object::ObjectId;
use crate::tree::{TargetRef, UiTree};
use anchorage_core::alloc::{HashMap, HashSet};
use anchorage_core::geometry::Rect;
use anchorage_core::profiling::profile_function;

/// Counters for one resolution pass.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PassStats {
    /// Objects whose rectangle was computed this pass.
    pub resolved: usize,
    /// Objects that failed to resolve.
    pub failed: usize,
}

/// Per-pass memo and cycle detection state.
#[derive(Debug, Default)]
pub struct ResolvePass {
    outcomes: HashMap<ObjectId, UiResult<Rect<f32>>>,
    stack: Vec<ObjectId>,
    on_stack: HashSet<ObjectId>,
    diagnostics: Vec<UiError>,
    stats: PassStats,
}

impl ResolvePass {
    pub fn new() -> Self {
        Self::default()
    }

    /// Failures and dropped anchors collected so far.
    pub fn diagnostics(&self) -> &[UiError] {
        &self.diagnostics
    }

    pub fn into_diagnostics(self) -> Vec<UiError> {
        self.diagnostics
    }

    pub fn stats(&self) -> PassStats {
        self.stats
    }

    /// Rectangle of `id` usable by its dependents: this pass's outcome, or the
    /// cached rectangle of a clean object.
    fn usable_rect(&self, tree: &UiTree, id: ObjectId) -> Option<Rect<f32>> {
        match self.outcomes.get(&id) {
            Some(Ok(rect)) => Some(*rect),
            Some(Err(_)) => None,
            None => tree
                .object(id)
                .filter(|object| is_clean(object))
                .map(|object| object.rect),
        }
    }

    fn is_settled(&self, tree: &UiTree, id: ObjectId) -> bool {
        self.outcomes.contains_key(&id) || tree.object(id).is_none_or(is_clean)
    }

    /// Resolve `root` and, on demand, everything it depends on.
    pub fn resolve(&mut self, tree: &mut UiTree, root: ObjectId) -> UiResult<Rect<f32>> {
        profile_function!();

        let Some(object) = tree.object(root) else {
            return Err(UiError::UnknownObject(root));
        };
        if let Some(outcome) = self.outcomes.get(&root) {
            return outcome.clone();
        }
        if is_clean(object) {
            return Ok(object.rect);
        }

        self.push(root);
        while let Some(&id) = self.stack.last() {
            match self.next_unsettled(tree, id) {
                Next::Descend(target) => self.push(target),
                Next::Cycle(target) => self.fail_cycle(tree, target),
                Next::Ready => {
                    let outcome = self.compute(tree, id);
                    self.finish(tree, id, outcome);
                }
            }
        }

        self.outcomes
            .get(&root)
            .cloned()
            .unwrap_or(Err(UiError::UnknownObject(root)))
    }

    fn push(&mut self, id: ObjectId) {
        self.stack.push(id);
        self.on_stack.insert(id);
    }

    fn pop(&mut self) -> Option<ObjectId> {
        let id = self.stack.pop()?;
        self.on_stack.remove(&id);
        Some(id)
    }

    /// First dependency of `id` that still needs work this pass.
    fn next_unsettled(&self, tree: &UiTree, id: ObjectId) -> Next {
        for target in dependencies(tree, id) {
            if self.on_stack.contains(&target) {
                return Next::Cycle(target);
            }
            if !self.is_settled(tree, target) {
                return Next::Descend(target);
            }
        }
        Next::Ready
    }

    /// Fail every object on the loop from `target` to the top of the stack.
    fn fail_cycle(&mut self, tree: &mut UiTree, target: ObjectId) {
        let start = self
            .stack
            .iter()
            .position(|&id| id == target)
            .unwrap_or(0);
        let cycle: Vec<ObjectId> = self.stack[start..].to_vec();
        tracing::trace!("Anchor cycle through {:?}", cycle);
        while self.stack.len() > start {
            if let Some(id) = self.pop() {
                let error = UiError::CyclicAnchor {
                    object: id,
                    cycle: cycle.clone(),
                };
                self.record(tree, id, Err(error));
            }
        }
    }

    fn finish(&mut self, tree: &mut UiTree, id: ObjectId, outcome: UiResult<Rect<f32>>) {
        self.pop();
        self.record(tree, id, outcome);
    }

    fn record(&mut self, tree: &mut UiTree, id: ObjectId, outcome: UiResult<Rect<f32>>) {
        match &outcome {
            Ok(rect) => {
                tracing::trace!("Resolved {} to {:?}", id, rect);
                tree.commit_rect(id, *rect);
                self.stats.resolved += 1;
            }
            Err(error) => {
                if tree.commit_failure(id, error) {
                    tracing::warn!("Layout of {} failed: {}", id, error);
                }
                self.diagnostics.push(error.clone());
                self.stats.failed += 1;
            }
        }
        self.outcomes.insert(id, outcome);
    }

    /// Compute the rectangle of `id`, all of whose dependencies are settled.
    fn compute(&mut self, tree: &UiTree, id: ObjectId) -> UiResult<Rect<f32>> {
        let Some(object) = tree.object(id) else {
            return Err(UiError::UnknownObject(id));
        };
        let screen = tree.screen_rect();

        let mut horizontal = AxisConstraints::default();
        let mut vertical = AxisConstraints::default();
        let mut dropped = Vec::new();

        for anchor in object.anchors.iter() {
            let target_rect = match tree.lookup_target(id, &anchor.target) {
                TargetRef::Screen => Some(screen),
                TargetRef::Object(target) => self.usable_rect(tree, target),
                TargetRef::Missing(_) => None,
            };
            let Some(target_rect) = target_rect else {
                dropped.push(UiError::UnresolvedAnchor {
                    object: id,
                    point: anchor.point,
                    target: anchor.target.to_string(),
                });
                continue;
            };
            let pinned = anchor.project(&target_rect);
            horizontal.add(anchor.point.role(Axis::Horizontal), pinned.x);
            vertical.add(anchor.point.role(Axis::Vertical), pinned.y);
        }

        let reference = match tree.size_reference(id) {
            Some(parent) => self.usable_rect(tree, parent),
            None => Some(screen),
        };
        let width = reference.and_then(|r| object.width.resolve(r.width));
        let height = reference.and_then(|r| object.height.resolve(r.height));

        let x = horizontal.solve(width);
        let y = vertical.solve(height);
        match (x, y) {
            (Some((x, width)), Some((y, height))) => {
                self.diagnostics.extend(dropped);
                let rect = Rect::new(x, y, width, height);
                Ok(match tree.frame(id) {
                    Some(frame) => frame.constrain(rect, screen),
                    None => rect,
                })
            }
            (x, _) => {
                if let Some(first) = dropped.into_iter().next() {
                    return Err(first);
                }
                let axis = if x.is_none() {
                    Axis::Horizontal
                } else {
                    Axis::Vertical
                };
                Err(UiError::UnderconstrainedAxis { object: id, axis })
            }
        }
    }
}

enum Next {
    Descend(ObjectId),
    Cycle(ObjectId),
    Ready,
}

fn is_clean(object: &crate::object::UiObject) -> bool {
    object.has_valid_geometry && !object.dirty.needs_layout()
}

/// Objects `id` needs resolved before it can be computed, in anchor order.
fn dependencies(tree: &UiTree, id: ObjectId) -> Vec<ObjectId> {
    let Some(object) = tree.object(id) else {
        return Vec::new();
    };
    let mut out: Vec<ObjectId> = Vec::with_capacity(object.anchors.len() + 1);
    for anchor in object.anchors.iter() {
        if let TargetRef::Object(target) = tree.lookup_target(id, &anchor.target) {
            if !out.contains(&target) {
                out.push(target);
            }
        }
    }
    if object.width.is_percent() || object.height.is_percent() {
        if let Some(parent) = tree.size_reference(id) {
            if !out.contains(&parent) {
                out.push(parent);
            }
        }
    }
    out
}

/// Candidates collected for one axis.
#[derive(Debug, Default, Clone, Copy)]
struct AxisConstraints {
    min: Option<f32>,
    max: Option<f32>,
    center_sum: f32,
    center_count: u32,
}

impl AxisConstraints {
    fn add(&mut self, role: AxisRole, value: f32) {
        match role {
            AxisRole::Min => self.min = Some(self.min.map_or(value, |m| m.min(value))),
            AxisRole::Max => self.max = Some(self.max.map_or(value, |m| m.max(value))),
            AxisRole::Center => {
                self.center_sum += value;
                self.center_count += 1;
            }
        }
    }

    fn center(&self) -> Option<f32> {
        (self.center_count > 0).then(|| self.center_sum / self.center_count as f32)
    }

    /// Position and extent along the axis, if derivable.
    fn solve(&self, size: Option<f32>) -> Option<(f32, f32)> {
        match (self.min, self.max, self.center(), size) {
            (Some(min), Some(max), _, _) => Some((min, (max - min).max(0.0))),
            (Some(min), None, _, Some(size)) => Some((min, size)),
            (None, Some(max), _, Some(size)) => Some((max - size, size)),
            (Some(min), None, Some(center), None) => Some((min, (2.0 * (center - min)).max(0.0))),
            (None, Some(max), Some(center), None) => {
                let extent = (2.0 * (max - center)).max(0.0);
                Some((max - extent, extent))
            }
            (None, None, Some(center), Some(size)) => Some((center - size / 2.0, size)),
            _ => None,
        }
    }
}
