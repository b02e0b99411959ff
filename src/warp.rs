//! Time warps: speed changes, reverses, and freeze frames.

use std::collections::BTreeMap;

use crate::item::Item;
use crate::macros::{impl_has_metadata, impl_named};
use crate::space::SpaceLabel;
use crate::transform::{AffineMapping, AffineTransform};
use crate::{ContinuousInterval, Error, Ordinate, Result, Topology};

/// A warp remaps its single child's presentation through a transform.
///
/// The transform is expressed in the warp's intrinsic space and lands in
/// the child's presentation space:
/// - `scale = 2.0` plays the child at double speed,
/// - `scale = -1.0` plays it backwards,
/// - `scale = 0.0` holds a single child instant (a freeze frame).
///
/// # Example
///
/// ```
/// use chronotope::{Clip, ContinuousInterval, Domain, MediaReference, Ordinate, Warp};
///
/// let mut media = MediaReference::new("/footage/run.mov", Domain::Picture);
/// media.set_available_bounds(ContinuousInterval::new(
///     Ordinate::new(0.0),
///     Ordinate::new(8.0),
/// ));
/// let fast = Warp::linear("2x", Clip::new("Run", media), 2.0).unwrap();
/// # let _ = fast;
/// ```
#[derive(Debug, Clone)]
pub struct Warp {
    name: Option<String>,
    child: Box<Item>,
    transform: Topology,
    metadata: BTreeMap<String, String>,
}

impl Warp {
    /// The temporal spaces every warp exposes.
    pub const AVAILABLE_SPACES: &'static [SpaceLabel] = &[SpaceLabel::Presentation];

    /// Create a warp from an explicit transform topology.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidBounds`] if the transform is empty or has
    /// instant input bounds — a warp must span time to remap it.
    pub fn new(name: &str, child: impl Into<Item>, transform: Topology) -> Result<Self> {
        match transform.input_bounds() {
            None => return Err(Error::InvalidBounds("warp transform must have bounds")),
            Some(bounds) if bounds.is_instant() => {
                return Err(Error::InvalidBounds(
                    "warp transform bounds must not be an instant",
                ));
            }
            Some(_) => {}
        }
        Ok(Self {
            name: Some(name.to_string()),
            child: Box::new(child.into()),
            transform,
            metadata: BTreeMap::new(),
        })
    }

    /// A constant-speed warp: `time_scalar` of `2.0` is double speed,
    /// negative values play in reverse.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidBounds`] if `time_scalar` is zero; freezes
    /// carry a held instant and a duration, use [`Warp::freeze_frame`].
    pub fn linear(name: &str, child: impl Into<Item>, time_scalar: f64) -> Result<Self> {
        if time_scalar == 0.0 {
            return Err(Error::InvalidBounds(
                "a zero time scalar is a freeze frame, not a linear warp",
            ));
        }
        Self::new(
            name,
            child,
            Topology::affine(AffineMapping {
                input_bounds: ContinuousInterval::EVERYTHING,
                xform: AffineTransform {
                    offset: Ordinate::ZERO,
                    scale: Ordinate::new(time_scalar),
                },
            }),
        )
    }

    /// A freeze frame: hold the child's instant `held_at` for `duration`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidBounds`] if `duration` is not strictly
    /// positive.
    pub fn freeze_frame(
        name: &str,
        child: impl Into<Item>,
        held_at: Ordinate,
        duration: Ordinate,
    ) -> Result<Self> {
        if duration <= Ordinate::ZERO {
            return Err(Error::InvalidBounds("freeze duration must be positive"));
        }
        Self::new(
            name,
            child,
            Topology::affine(AffineMapping {
                input_bounds: ContinuousInterval::from_start_duration(Ordinate::ZERO, duration),
                xform: AffineTransform {
                    offset: held_at,
                    scale: Ordinate::ZERO,
                },
            }),
        )
    }

    /// The warped child.
    #[must_use]
    pub fn child(&self) -> &Item {
        &self.child
    }

    /// The transform from the warp's intrinsic space into the child's
    /// presentation space.
    #[must_use]
    pub fn transform(&self) -> &Topology {
        &self.transform
    }
}

impl_named!(Warp);
impl_has_metadata!(Warp);
