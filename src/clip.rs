//! Clips and the media they reference.

use std::collections::BTreeMap;

use crate::macros::{impl_has_metadata, impl_named};
use crate::sampling::{Domain, SampleIndexGenerator};
use crate::space::SpaceLabel;
use crate::{ContinuousInterval, Error, Result};

/// A reference to external media: a file, a signal generator, a device.
///
/// The available bounds, when present, are expressed in the media's own
/// coordinate space and bound what a clip may present of it.
#[derive(Debug, Clone)]
pub struct MediaReference {
    target_url: Option<String>,
    bounds: Option<ContinuousInterval>,
    domain: Domain,
    discrete_partition: Option<SampleIndexGenerator>,
    metadata: BTreeMap<String, String>,
}

impl MediaReference {
    /// Create a media reference to the given URL.
    #[must_use]
    pub fn new(target_url: &str, domain: Domain) -> Self {
        Self {
            target_url: Some(target_url.to_string()),
            bounds: None,
            domain,
            discrete_partition: None,
            metadata: BTreeMap::new(),
        }
    }

    /// Create a media reference with no target, for generated content.
    #[must_use]
    pub fn signal(domain: Domain) -> Self {
        Self {
            target_url: None,
            bounds: None,
            domain,
            discrete_partition: None,
            metadata: BTreeMap::new(),
        }
    }

    /// Set the available bounds of this media, in media space.
    pub fn set_available_bounds(&mut self, bounds: ContinuousInterval) {
        self.bounds = Some(bounds);
    }

    /// The available bounds of this media, if known.
    #[must_use]
    pub fn available_bounds(&self) -> Option<ContinuousInterval> {
        self.bounds
    }

    /// The target URL of this media, if it has one.
    #[must_use]
    pub fn target_url(&self) -> Option<&str> {
        self.target_url.as_deref()
    }

    /// The media domain this reference carries.
    #[must_use]
    pub fn domain(&self) -> &Domain {
        &self.domain
    }

    /// Register the media's discrete sample partition.
    pub fn set_discrete_partition(&mut self, partition: SampleIndexGenerator) {
        self.discrete_partition = Some(partition);
    }

    /// The media's discrete sample partition, if it has one.
    #[must_use]
    pub fn maybe_discrete_partition(&self) -> Option<SampleIndexGenerator> {
        self.discrete_partition
    }
}

impl_has_metadata!(MediaReference);

/// A clip presents a segment of media.
///
/// A clip's presentation space always starts at zero; its media space is
/// the referenced media's own coordinate space. The clip's bounds, when
/// set, trim the media; when omitted, the media's available bounds govern
/// the clip's duration.
///
/// # Example
///
/// ```
/// use chronotope::{Clip, ContinuousInterval, Domain, MediaReference, Ordinate};
///
/// let mut media = MediaReference::new("/footage/shot_010.mov", Domain::Picture);
/// media.set_available_bounds(ContinuousInterval::new(
///     Ordinate::new(1.0),
///     Ordinate::new(10.0),
/// ));
/// let clip = Clip::new("Shot 10", media);
/// ```
#[derive(Debug, Clone)]
pub struct Clip {
    name: Option<String>,
    bounds: Option<ContinuousInterval>,
    media: MediaReference,
    metadata: BTreeMap<String, String>,
}

impl Clip {
    /// The temporal spaces every clip exposes.
    pub const AVAILABLE_SPACES: &'static [SpaceLabel] =
        &[SpaceLabel::Presentation, SpaceLabel::Media];

    /// Create a new clip over the given media.
    #[must_use]
    pub fn new(name: &str, media: MediaReference) -> Self {
        Self {
            name: Some(name.to_string()),
            bounds: None,
            media,
            metadata: BTreeMap::new(),
        }
    }

    /// Trim the clip to `bounds`, expressed in media space.
    pub fn set_bounds(&mut self, bounds: ContinuousInterval) {
        self.bounds = Some(bounds);
    }

    /// The clip's own trim bounds, if set.
    #[must_use]
    pub fn bounds(&self) -> Option<ContinuousInterval> {
        self.bounds
    }

    /// The media this clip presents.
    #[must_use]
    pub fn media(&self) -> &MediaReference {
        &self.media
    }

    /// Mutable access to the media reference.
    pub fn media_mut(&mut self) -> &mut MediaReference {
        &mut self.media
    }

    /// The bounds the clip actually draws from: its own trim, or the
    /// media's available bounds.
    ///
    /// # Errors
    ///
    /// Returns [`Error::MissingBounds`] when neither is set.
    pub fn source_bounds(&self) -> Result<ContinuousInterval> {
        self.bounds
            .or(self.media.bounds)
            .ok_or(Error::MissingBounds)
    }
}

impl_named!(Clip);
impl_has_metadata!(Clip);
