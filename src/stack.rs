//! Stacks: layered compositions.

use std::collections::BTreeMap;

use crate::item::Item;
use crate::macros::{impl_has_metadata, impl_named};
use crate::space::SpaceLabel;

/// A stack layers its children: every child's presentation begins at the
/// same ordinate in the stack's intrinsic space.
///
/// Stacks serve as a timeline's root track container, as nested
/// version-alternative containers inside tracks, and as the overlap holder
/// inside transitions.
#[derive(Debug, Clone)]
pub struct Stack {
    name: Option<String>,
    children: Vec<Item>,
    metadata: BTreeMap<String, String>,
}

impl Stack {
    /// The temporal spaces every stack exposes.
    pub const AVAILABLE_SPACES: &'static [SpaceLabel] =
        &[SpaceLabel::Presentation, SpaceLabel::Intrinsic];

    /// Create a new, empty stack.
    #[must_use]
    pub fn new(name: &str) -> Self {
        Self {
            name: Some(name.to_string()),
            children: Vec::new(),
            metadata: BTreeMap::new(),
        }
    }

    /// Append a child layer; it co-starts with every other layer.
    pub fn append(&mut self, child: impl Into<Item>) {
        self.children.push(child.into());
    }

    /// The children, bottom layer first.
    #[must_use]
    pub fn children(&self) -> &[Item] {
        &self.children
    }

    /// The number of children.
    #[must_use]
    pub fn len(&self) -> usize {
        self.children.len()
    }

    /// Whether the stack has no children.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.children.is_empty()
    }
}

impl_named!(Stack);
impl_has_metadata!(Stack);
