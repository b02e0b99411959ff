//! Tracks: sequential compositions.

use std::collections::BTreeMap;

use crate::item::Item;
use crate::macros::{impl_has_metadata, impl_named};
use crate::space::SpaceLabel;

/// A track sequences its children: each child's presentation begins exactly
/// where the previous child's ends (children are right-met).
///
/// # Example
///
/// ```
/// use chronotope::{Gap, Ordinate, Track};
///
/// let mut track = Track::new("V1");
/// track.append(Gap::new(Ordinate::new(3.0)));
/// track.append(Gap::new(Ordinate::new(4.0)));
/// assert_eq!(track.len(), 2);
/// ```
#[derive(Debug, Clone)]
pub struct Track {
    name: Option<String>,
    children: Vec<Item>,
    metadata: BTreeMap<String, String>,
}

impl Track {
    /// The temporal spaces every track exposes.
    pub const AVAILABLE_SPACES: &'static [SpaceLabel] =
        &[SpaceLabel::Presentation, SpaceLabel::Intrinsic];

    /// Create a new, empty track.
    #[must_use]
    pub fn new(name: &str) -> Self {
        Self {
            name: Some(name.to_string()),
            children: Vec::new(),
            metadata: BTreeMap::new(),
        }
    }

    /// Append a child; it begins where the previous child ends.
    pub fn append(&mut self, child: impl Into<Item>) {
        self.children.push(child.into());
    }

    /// The children, in sequence order.
    #[must_use]
    pub fn children(&self) -> &[Item] {
        &self.children
    }

    /// The number of children.
    #[must_use]
    pub fn len(&self) -> usize {
        self.children.len()
    }

    /// Whether the track has no children.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.children.is_empty()
    }
}

impl_named!(Track);
impl_has_metadata!(Track);
