//! Builder pattern implementations for composition items.
//!
//! Builders provide a fluent API for constructing items with optional
//! fields.

use crate::item::Item;
use crate::sampling::SampleIndexGenerator;
use crate::traits::HasMetadata;
use crate::{Clip, ContinuousInterval, MediaReference, Timeline, Track};

/// Builder for creating [`Clip`] instances.
///
/// # Example
///
/// ```
/// use chronotope::{ClipBuilder, ContinuousInterval, Domain, MediaReference, Ordinate};
///
/// let clip = ClipBuilder::new("My Clip", MediaReference::new("/path/to/media.mov", Domain::Picture))
///     .bounds(ContinuousInterval::new(Ordinate::new(1.0), Ordinate::new(9.0)))
///     .metadata("author", "Jane Doe")
///     .build();
/// assert_eq!(clip.name(), Some("My Clip"));
/// ```
pub struct ClipBuilder {
    name: String,
    media: MediaReference,
    bounds: Option<ContinuousInterval>,
    metadata: Vec<(String, String)>,
}

impl ClipBuilder {
    /// Create a new clip builder with the required name and media.
    #[must_use]
    pub fn new(name: &str, media: MediaReference) -> Self {
        Self {
            name: name.to_string(),
            media,
            bounds: None,
            metadata: Vec::new(),
        }
    }

    /// Trim the clip to `bounds`, in media space.
    #[must_use]
    pub fn bounds(mut self, bounds: ContinuousInterval) -> Self {
        self.bounds = Some(bounds);
        self
    }

    /// Add a metadata key-value pair.
    #[must_use]
    pub fn metadata(mut self, key: &str, value: &str) -> Self {
        self.metadata.push((key.to_string(), value.to_string()));
        self
    }

    /// Build the clip.
    #[must_use]
    pub fn build(self) -> Clip {
        let mut clip = Clip::new(&self.name, self.media);
        if let Some(bounds) = self.bounds {
            clip.set_bounds(bounds);
        }
        for (key, value) in self.metadata {
            clip.set_metadata(&key, &value);
        }
        clip
    }
}

/// Builder for creating [`Track`] instances.
///
/// # Example
///
/// ```
/// use chronotope::{Gap, Ordinate, TrackBuilder};
///
/// let track = TrackBuilder::new("V1")
///     .child(Gap::new(Ordinate::new(3.0)))
///     .child(Gap::new(Ordinate::new(4.0)))
///     .build();
/// assert_eq!(track.len(), 2);
/// ```
pub struct TrackBuilder {
    name: String,
    children: Vec<Item>,
    metadata: Vec<(String, String)>,
}

impl TrackBuilder {
    /// Create a new track builder with the required name.
    #[must_use]
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            children: Vec::new(),
            metadata: Vec::new(),
        }
    }

    /// Append a child to the track.
    #[must_use]
    pub fn child(mut self, child: impl Into<Item>) -> Self {
        self.children.push(child.into());
        self
    }

    /// Add a metadata key-value pair.
    #[must_use]
    pub fn metadata(mut self, key: &str, value: &str) -> Self {
        self.metadata.push((key.to_string(), value.to_string()));
        self
    }

    /// Build the track.
    #[must_use]
    pub fn build(self) -> Track {
        let mut track = Track::new(&self.name);
        for child in self.children {
            track.append(child);
        }
        for (key, value) in self.metadata {
            track.set_metadata(&key, &value);
        }
        track
    }
}

/// Builder for creating [`Timeline`] instances.
///
/// # Example
///
/// ```
/// use chronotope::{SampleIndexGenerator, TimelineBuilder, Track};
///
/// let timeline = TimelineBuilder::new("My Project")
///     .picture_partition(SampleIndexGenerator::new(24.0, 0))
///     .track(Track::new("V1"))
///     .metadata("author", "John Smith")
///     .build();
/// assert_eq!(timeline.tracks().len(), 1);
/// ```
pub struct TimelineBuilder {
    name: String,
    picture_partition: Option<SampleIndexGenerator>,
    audio_partition: Option<SampleIndexGenerator>,
    tracks: Vec<Track>,
    metadata: Vec<(String, String)>,
}

impl TimelineBuilder {
    /// Create a new timeline builder with the required name.
    #[must_use]
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            picture_partition: None,
            audio_partition: None,
            tracks: Vec::new(),
            metadata: Vec::new(),
        }
    }

    /// Quantize the picture domain of the timeline's presentation space.
    #[must_use]
    pub fn picture_partition(mut self, partition: SampleIndexGenerator) -> Self {
        self.picture_partition = Some(partition);
        self
    }

    /// Quantize the audio domain of the timeline's presentation space.
    #[must_use]
    pub fn audio_partition(mut self, partition: SampleIndexGenerator) -> Self {
        self.audio_partition = Some(partition);
        self
    }

    /// Add a track to the timeline.
    #[must_use]
    pub fn track(mut self, track: Track) -> Self {
        self.tracks.push(track);
        self
    }

    /// Add a metadata key-value pair.
    #[must_use]
    pub fn metadata(mut self, key: &str, value: &str) -> Self {
        self.metadata.push((key.to_string(), value.to_string()));
        self
    }

    /// Build the timeline.
    #[must_use]
    pub fn build(self) -> Timeline {
        let mut timeline = Timeline::new(&self.name);
        if let Some(partition) = self.picture_partition {
            timeline.set_picture_partition(partition);
        }
        if let Some(partition) = self.audio_partition {
            timeline.set_audio_partition(partition);
        }
        for track in self.tracks {
            timeline.add_track(track);
        }
        for (key, value) in self.metadata {
            timeline.set_metadata(&key, &value);
        }
        timeline
    }
}

// Convenience methods on the types themselves

impl Clip {
    /// Create a builder for a new clip.
    #[must_use]
    pub fn builder(name: &str, media: MediaReference) -> ClipBuilder {
        ClipBuilder::new(name, media)
    }
}

impl Track {
    /// Create a builder for a new track.
    #[must_use]
    pub fn builder(name: &str) -> TrackBuilder {
        TrackBuilder::new(name)
    }
}

impl Timeline {
    /// Create a builder for a new timeline.
    #[must_use]
    pub fn builder(name: &str) -> TimelineBuilder {
        TimelineBuilder::new(name)
    }
}
