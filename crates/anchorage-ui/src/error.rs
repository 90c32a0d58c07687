//! Error taxonomy for layout resolution and hierarchy mutation.

use crate::anchor::{AnchorPoint, Axis};
use crate::object::ObjectId;

/// Errors reported by the UI core.
///
/// Resolution errors (`CyclicAnchor`, `UnderconstrainedAxis`,
/// `UnresolvedAnchor`) leave the object with its last valid rectangle and are
/// collected as diagnostics; hierarchy errors reject the mutation outright.
#[derive(Debug, Clone, PartialEq)]
pub enum UiError {
    /// Resolving `object` requires resolving `object` itself.
    CyclicAnchor {
        object: ObjectId,
        /// Objects forming the cycle, in the order they were entered.
        cycle: Vec<ObjectId>,
    },

    /// An axis has neither two pinned edges nor an edge/centre plus a size.
    UnderconstrainedAxis { object: ObjectId, axis: Axis },

    /// An anchor target does not exist or could not be laid out.
    UnresolvedAnchor {
        object: ObjectId,
        point: AnchorPoint,
        target: String,
    },

    /// `parent` tried to remove or destroy an object it does not own.
    InvalidOwnership { parent: ObjectId, child: ObjectId },

    /// Re-parenting would make a frame its own ancestor.
    HierarchyCycle { parent: ObjectId, child: ObjectId },

    /// The handle does not refer to a live object.
    UnknownObject(ObjectId),

    /// The operation needs a frame but the object is a region.
    NotAFrame(ObjectId),

    /// The operation needs a region but the object is a frame.
    NotARegion(ObjectId),

    /// An object may not be anchored to itself through `set_all_points`.
    AnchorToSelf(ObjectId),

    /// Another live object already uses this name.
    DuplicateName(String),
}

impl UiError {
    /// The object the error is about, if any.
    pub fn object(&self) -> Option<ObjectId> {
        match self {
            UiError::CyclicAnchor { object, .. }
            | UiError::UnderconstrainedAxis { object, .. }
            | UiError::UnresolvedAnchor { object, .. } => Some(*object),
            UiError::InvalidOwnership { child, .. } | UiError::HierarchyCycle { child, .. } => {
                Some(*child)
            }
            UiError::UnknownObject(id)
            | UiError::NotAFrame(id)
            | UiError::NotARegion(id)
            | UiError::AnchorToSelf(id) => Some(*id),
            UiError::DuplicateName(_) => None,
        }
    }

    /// Whether this error came out of anchor resolution.
    pub fn is_layout_error(&self) -> bool {
        matches!(
            self,
            UiError::CyclicAnchor { .. }
                | UiError::UnderconstrainedAxis { .. }
                | UiError::UnresolvedAnchor { .. }
        )
    }
}

impl std::fmt::Display for UiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            UiError::CyclicAnchor { object, cycle } => {
                write!(f, "Cyclic anchor dependency on {}: ", object)?;
                for (i, id) in cycle.iter().enumerate() {
                    if i > 0 {
                        write!(f, " -> ")?;
                    }
                    write!(f, "{}", id)?;
                }
                Ok(())
            }
            UiError::UnderconstrainedAxis { object, axis } => {
                write!(f, "{} axis of {} is underconstrained", axis, object)
            }
            UiError::UnresolvedAnchor {
                object,
                point,
                target,
            } => write!(
                f,
                "{} anchor of {} targets \"{}\", which does not exist or is not laid out",
                point, object, target
            ),
            UiError::InvalidOwnership { parent, child } => {
                write!(f, "{} is not a child of {}", child, parent)
            }
            UiError::HierarchyCycle { parent, child } => write!(
                f,
                "Adding {} under {} would make it its own ancestor",
                child, parent
            ),
            UiError::UnknownObject(id) => write!(f, "Unknown object {}", id),
            UiError::NotAFrame(id) => write!(f, "{} is not a frame", id),
            UiError::NotARegion(id) => write!(f, "{} is not a region", id),
            UiError::AnchorToSelf(id) => write!(f, "{} cannot be anchored to itself", id),
            UiError::DuplicateName(name) => write!(f, "An object named \"{}\" already exists", name),
        }
    }
}

impl std::error::Error for UiError {}

/// Result type for UI core operations.
pub type UiResult<T> = Result<T, UiError>;
