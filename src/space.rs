//! Temporal space labels and space-graph vertices.

use std::fmt;
use std::hash::{Hash, Hasher};

use crate::item::ItemRef;

/// The name of one temporal space on a composition item.
///
/// Every item kind exposes a fixed set of these (see
/// [`ItemRef::available_local_spaces`]); coordinates only mean something
/// relative to a specific (item, label) pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SpaceLabel {
    /// The output-facing space. Always starts at zero and spans the item's
    /// duration.
    Presentation,
    /// The internal space between presentation and child spaces on
    /// container kinds.
    Intrinsic,
    /// The media-side space (clips only).
    Media,
    /// The synthesized space at child slot `i` of a container.
    Child(usize),
}

impl fmt::Display for SpaceLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Presentation => write!(f, "presentation"),
            Self::Intrinsic => write!(f, "intrinsic"),
            Self::Media => write!(f, "media"),
            Self::Child(i) => write!(f, "child.{i}"),
        }
    }
}

/// A vertex in the space graph: one temporal space on one item.
///
/// Identity is structural: the handle's referent (by address) plus the
/// label. Two nodes over the same item and label are the same vertex no
/// matter how their handles were obtained.
#[derive(Debug, Clone, Copy)]
pub struct SpaceNode<'a> {
    /// The item the space lives on.
    pub item: ItemRef<'a>,
    /// Which of the item's spaces this vertex names.
    pub label: SpaceLabel,
}

impl PartialEq for SpaceNode<'_> {
    fn eq(&self, other: &Self) -> bool {
        self.item.same_item(&other.item) && self.label == other.label
    }
}

impl Eq for SpaceNode<'_> {}

impl Hash for SpaceNode<'_> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.item.referent_addr().hash(state);
        self.label.hash(state);
    }
}

impl fmt::Display for SpaceNode<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}.{}.{}",
            self.item.maybe_name().unwrap_or("unnamed"),
            self.item.kind_name(),
            self.label
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn labels_print_their_tag() {
        assert_eq!(SpaceLabel::Presentation.to_string(), "presentation");
        assert_eq!(SpaceLabel::Child(3).to_string(), "child.3");
    }

    #[test]
    fn child_labels_compare_by_slot() {
        assert_eq!(SpaceLabel::Child(2), SpaceLabel::Child(2));
        assert_ne!(SpaceLabel::Child(2), SpaceLabel::Child(3));
        assert_ne!(SpaceLabel::Presentation, SpaceLabel::Intrinsic);
    }
}
