//! Transitions between neighbouring items.

use std::collections::BTreeMap;

use crate::macros::{impl_has_metadata, impl_named};
use crate::space::SpaceLabel;
use crate::stack::Stack;

/// A transition blends the material it overlaps.
///
/// The overlapping material lives in the transition's single inner
/// [`Stack`]; temporally the transition is transparent — its presentation
/// space delegates straight through to that stack. How the overlap is
/// blended (a dissolve, a wipe) is a free-form kind tag the core carries
/// but does not interpret.
#[derive(Debug, Clone)]
pub struct Transition {
    name: Option<String>,
    kind: String,
    inner: Stack,
    metadata: BTreeMap<String, String>,
}

impl Transition {
    /// The temporal spaces every transition exposes.
    pub const AVAILABLE_SPACES: &'static [SpaceLabel] = &[SpaceLabel::Presentation];

    /// Create a new transition.
    ///
    /// # Arguments
    ///
    /// * `name` - Display name for this transition
    /// * `kind` - Free-form blend kind, e.g. `"dissolve"` or `"wipe"`
    #[must_use]
    pub fn new(name: &str, kind: &str) -> Self {
        Self {
            name: Some(name.to_string()),
            kind: kind.to_string(),
            inner: Stack::new("overlap"),
            metadata: BTreeMap::new(),
        }
    }

    /// The blend kind this transition was tagged with.
    #[must_use]
    pub fn kind(&self) -> &str {
        &self.kind
    }

    /// The stack holding the overlapping material.
    #[must_use]
    pub fn inner(&self) -> &Stack {
        &self.inner
    }

    /// Mutable access to the overlap stack.
    pub fn inner_mut(&mut self) -> &mut Stack {
        &mut self.inner
    }
}

impl_named!(Transition);
impl_has_metadata!(Transition);
