//! Discrete sample partitions over continuous temporal spaces.

use std::fmt;

use crate::{ContinuousInterval, Ordinate};

/// A media-kind tag, used to disambiguate discrete partitions.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Domain {
    /// Image-stream media.
    Picture,
    /// Audio-stream media.
    Audio,
    /// Any other media kind, keyed by name.
    Other(String),
}

impl fmt::Display for Domain {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Picture => write!(f, "picture"),
            Self::Audio => write!(f, "audio"),
            Self::Other(tag) => write!(f, "other.{tag}"),
        }
    }
}

/// A regular partition of a continuous space into integer sample indices.
///
/// Sample `start_index` begins at ordinate zero; sample `k` covers the
/// half-open footprint `[(k - start_index) / rate, (k + 1 - start_index) / rate)`.
///
/// # Example
///
/// ```
/// use chronotope::{Ordinate, SampleIndexGenerator};
///
/// let frames = SampleIndexGenerator::new(24.0, 0);
/// assert_eq!(frames.project_instantaneous_cd(Ordinate::new(1.0)), 24);
/// assert_eq!(
///     frames.project_index_dc(24).start,
///     Ordinate::new(1.0),
/// );
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SampleIndexGenerator {
    /// Samples per second.
    pub sample_rate_hz: f64,
    /// The index of the sample whose footprint begins at ordinate zero.
    pub start_index: i64,
}

impl SampleIndexGenerator {
    /// Create a partition at `sample_rate_hz` starting from `start_index`.
    ///
    /// # Panics
    ///
    /// Panics in debug builds if the rate is not strictly positive.
    #[must_use]
    pub fn new(sample_rate_hz: f64, start_index: i64) -> Self {
        debug_assert!(
            sample_rate_hz > 0.0 && sample_rate_hz.is_finite(),
            "sample rate must be positive"
        );
        Self {
            sample_rate_hz,
            start_index,
        }
    }

    /// The held duration of one sample.
    #[must_use]
    pub fn sample_duration(&self) -> Ordinate {
        Ordinate::new(1.0 / self.sample_rate_hz)
    }

    /// The continuous half-open footprint of sample `index`.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn project_index_dc(&self, index: i64) -> ContinuousInterval {
        let relative = (index - self.start_index) as f64;
        ContinuousInterval::new(
            Ordinate::new(relative / self.sample_rate_hz),
            Ordinate::new((relative + 1.0) / self.sample_rate_hz),
        )
    }

    /// The index of the sample whose footprint contains `ord`.
    ///
    /// Ordinates that are an exact sample start (up to binary-division
    /// noise) land on their own index rather than flooring into the
    /// previous one.
    #[must_use]
    #[allow(clippy::cast_possible_truncation)]
    pub fn project_instantaneous_cd(&self, ord: Ordinate) -> i64 {
        let scaled = ord.value() * self.sample_rate_hz;
        let nearest = scaled.round();
        let cell = if (scaled - nearest).abs() < 1e-9 {
            nearest
        } else {
            scaled.floor()
        };
        cell as i64 + self.start_index
    }
}

/// The per-domain discrete partitions an object can carry.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DiscreteSpacePartitions {
    /// Partition of the picture domain.
    pub picture: Option<SampleIndexGenerator>,
    /// Partition of the audio domain.
    pub audio: Option<SampleIndexGenerator>,
    /// Reserved extension slot for named domains; consulted by nothing yet.
    pub other: Vec<(String, SampleIndexGenerator)>,
}

impl DiscreteSpacePartitions {
    /// The partition registered for `domain`, if any.
    ///
    /// `Other` domains always resolve to `None`; the `other` slot is an
    /// extension point, not a lookup table.
    #[must_use]
    pub fn for_domain(&self, domain: &Domain) -> Option<SampleIndexGenerator> {
        match domain {
            Domain::Picture => self.picture,
            Domain::Audio => self.audio,
            Domain::Other(_) => None,
        }
    }
}
