//! Timelines: the top-level container for editorial content.

use std::collections::BTreeMap;

use crate::macros::{impl_has_metadata, impl_named};
use crate::sampling::{DiscreteSpacePartitions, SampleIndexGenerator};
use crate::space::SpaceLabel;
use crate::stack::Stack;
use crate::track::Track;

/// A timeline owns a single root [`Stack`] of tracks and the discrete
/// partitions that quantize its presentation space per media domain.
///
/// # Example
///
/// ```
/// use chronotope::{SampleIndexGenerator, Timeline, Track};
///
/// let mut timeline = Timeline::new("My Timeline");
/// timeline.set_picture_partition(SampleIndexGenerator::new(24.0, 0));
/// timeline.add_track(Track::new("V1"));
/// assert_eq!(timeline.tracks().len(), 1);
/// ```
#[derive(Debug, Clone)]
pub struct Timeline {
    name: Option<String>,
    tracks: Stack,
    discrete_partitions: DiscreteSpacePartitions,
    metadata: BTreeMap<String, String>,
}

impl Timeline {
    /// The temporal spaces every timeline exposes.
    pub const AVAILABLE_SPACES: &'static [SpaceLabel] =
        &[SpaceLabel::Presentation, SpaceLabel::Intrinsic];

    /// Create a new timeline with the given name.
    #[must_use]
    pub fn new(name: &str) -> Self {
        Self {
            name: Some(name.to_string()),
            tracks: Stack::new("tracks"),
            discrete_partitions: DiscreteSpacePartitions::default(),
            metadata: BTreeMap::new(),
        }
    }

    /// Add a track to the timeline's root stack.
    pub fn add_track(&mut self, track: Track) {
        self.tracks.append(track);
    }

    /// The root stack holding this timeline's tracks.
    #[must_use]
    pub fn tracks(&self) -> &Stack {
        &self.tracks
    }

    /// Mutable access to the root stack.
    pub fn tracks_mut(&mut self) -> &mut Stack {
        &mut self.tracks
    }

    /// Quantize the picture domain of presentation space.
    pub fn set_picture_partition(&mut self, partition: SampleIndexGenerator) {
        self.discrete_partitions.picture = Some(partition);
    }

    /// Quantize the audio domain of presentation space.
    pub fn set_audio_partition(&mut self, partition: SampleIndexGenerator) {
        self.discrete_partitions.audio = Some(partition);
    }

    /// The per-domain partitions of presentation space.
    #[must_use]
    pub fn discrete_partitions(&self) -> &DiscreteSpacePartitions {
        &self.discrete_partitions
    }
}

impl_named!(Timeline);
impl_has_metadata!(Timeline);
