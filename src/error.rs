//! Error types for temporal-hierarchy operations.

use thiserror::Error;

use crate::sampling::Domain;
use crate::space::SpaceLabel;

/// The error type for temporal-hierarchy operations.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum Error {
    /// The requested space is not among the item's local spaces, or a step
    /// rule rejected it.
    #[error("space `{0}` is not available on this item")]
    UnsupportedSpace(SpaceLabel),

    /// The item has no bounds from which a topology can be built.
    #[error("no bounds available to build a topology")]
    MissingBounds,

    /// A container child produced a topology without input bounds.
    #[error("child produced a topology without input bounds")]
    InvalidChildTopology,

    /// A bounded topology was expected but an unbounded one was found.
    #[error("expected a bounded topology")]
    UnboundedTopology,

    /// Bounds violate a structural requirement.
    #[error("invalid bounds: {0}")]
    InvalidBounds(&'static str),

    /// A discrete-space projection was requested, but no partition exists
    /// for the space/domain pair.
    #[error("no discrete partition for space `{space}` in domain `{domain}`")]
    NoDiscreteInfoForSpace {
        /// The space the projection was requested in.
        space: SpaceLabel,
        /// The media domain the partition was looked up for.
        domain: Domain,
    },

    /// A continuous-to-discrete topology was requested on a space that
    /// carries no discrete specification.
    #[error("space `{0}` has no discrete specification on this object")]
    NoDiscreteSpecification(SpaceLabel),

    /// A space node was looked up in a temporal tree that does not contain it.
    #[error("space node `{0}` was not found in the temporal tree")]
    SpaceNotInTree(String),

    /// A space node was inserted twice; the caller's tree is malformed.
    #[error("space node `{0}` is already present in the temporal tree")]
    SpaceAlreadyInTree(String),

    /// An arithmetic result was not an ordinate (0/0, x/0, inf/inf).
    #[error("result is not an ordinate")]
    NotAnOrdinate,

    /// Two mappings were joined but their bounds do not overlap.
    #[error("mappings do not overlap")]
    NoOverlap,

    /// An ordinate fell outside a mapping's input bounds.
    #[error("ordinate is outside the mapping's bounds")]
    OutOfBounds,

    /// A mapping has no single-valued inverse.
    #[error("mapping is not invertible")]
    NotInvertible,

    /// The temporal tree has been pointer-locked and refuses mutation.
    #[error("the temporal tree is locked")]
    TreeLocked,
}

/// A specialized Result type for temporal-hierarchy operations.
pub type Result<T> = std::result::Result<T, Error>;
