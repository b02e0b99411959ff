//! Gaps: empty space in a composition.

use std::collections::BTreeMap;

use crate::macros::{impl_has_metadata, impl_named};
use crate::space::SpaceLabel;
use crate::{ContinuousInterval, Ordinate};

/// A gap holds a span of empty time, most often between clips in a track.
#[derive(Debug, Clone)]
pub struct Gap {
    name: Option<String>,
    duration: Ordinate,
    metadata: BTreeMap<String, String>,
}

impl Gap {
    /// The temporal spaces every gap exposes.
    pub const AVAILABLE_SPACES: &'static [SpaceLabel] =
        &[SpaceLabel::Presentation, SpaceLabel::Intrinsic];

    /// Create a new gap with the given duration.
    #[must_use]
    pub fn new(duration: Ordinate) -> Self {
        Self {
            name: None,
            duration,
            metadata: BTreeMap::new(),
        }
    }

    /// The gap's duration.
    #[must_use]
    pub fn duration(&self) -> Ordinate {
        self.duration
    }

    /// The gap's span, `[0, duration)`.
    #[must_use]
    pub fn bounds(&self) -> ContinuousInterval {
        ContinuousInterval::from_start_duration(Ordinate::ZERO, self.duration)
    }
}

impl_named!(Gap);
impl_has_metadata!(Gap);
