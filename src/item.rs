//! Composition items and the tagged handle over them.
//!
//! [`Item`] is the owned sum of the seven schema kinds; [`ItemRef`] is the
//! borrowed, tagged handle the rest of the engine works through. The handle
//! carries the uniform operations (names, spaces, bounds, topologies), the
//! per-kind one-step transform rules the space-graph walker composes, and
//! the bridge between continuous ordinates and discrete sample indices.

use crate::clip::Clip;
use crate::gap::Gap;
use crate::sampling::{Domain, SampleIndexGenerator};
use crate::space::{SpaceLabel, SpaceNode};
use crate::stack::Stack;
use crate::timeline::Timeline;
use crate::track::Track;
use crate::transform::{AffineMapping, AffineTransform};
use crate::transition::Transition;
use crate::treecode::Step;
use crate::warp::Warp;
use crate::{ContinuousInterval, Error, Ordinate, Result, Topology};

/// An owned composition item: one of the seven schema kinds.
#[derive(Debug, Clone)]
pub enum Item {
    /// A clip presenting media.
    Clip(Clip),
    /// Empty space.
    Gap(Gap),
    /// A sequential composition.
    Track(Track),
    /// A layered composition.
    Stack(Stack),
    /// The top-level container.
    Timeline(Timeline),
    /// A time warp over one child.
    Warp(Warp),
    /// A transition with its overlap stack.
    Transition(Transition),
}

impl Item {
    /// A borrowed handle to this item.
    #[must_use]
    pub fn handle(&self) -> ItemRef<'_> {
        match self {
            Self::Clip(c) => ItemRef::Clip(c),
            Self::Gap(g) => ItemRef::Gap(g),
            Self::Track(t) => ItemRef::Track(t),
            Self::Stack(s) => ItemRef::Stack(s),
            Self::Timeline(t) => ItemRef::Timeline(t),
            Self::Warp(w) => ItemRef::Warp(w),
            Self::Transition(t) => ItemRef::Transition(t),
        }
    }
}

macro_rules! impl_item_from {
    ($($kind:ident),+) => {
        $(
            impl From<$kind> for Item {
                fn from(value: $kind) -> Self {
                    Self::$kind(value)
                }
            }

            impl<'a> From<&'a $kind> for ItemRef<'a> {
                fn from(value: &'a $kind) -> Self {
                    Self::$kind(value)
                }
            }
        )+
    };
}

impl_item_from!(Clip, Gap, Track, Stack, Timeline, Warp, Transition);

impl<'a> From<&'a Item> for ItemRef<'a> {
    fn from(item: &'a Item) -> Self {
        item.handle()
    }
}

/// A non-owning, tagged handle to a composition item.
///
/// Handles are `Copy` borrows; they cannot outlive the items they
/// reference, and two handles are the same item exactly when they refer to
/// the same object.
#[derive(Debug, Clone, Copy)]
pub enum ItemRef<'a> {
    /// A clip reference.
    Clip(&'a Clip),
    /// A gap reference.
    Gap(&'a Gap),
    /// A track reference.
    Track(&'a Track),
    /// A stack reference.
    Stack(&'a Stack),
    /// A timeline reference.
    Timeline(&'a Timeline),
    /// A warp reference.
    Warp(&'a Warp),
    /// A transition reference.
    Transition(&'a Transition),
}

impl<'a> ItemRef<'a> {
    /// The item's display name, if one was set.
    #[must_use]
    pub fn maybe_name(&self) -> Option<&'a str> {
        match self {
            Self::Clip(c) => c.name(),
            Self::Gap(g) => g.name(),
            Self::Track(t) => t.name(),
            Self::Stack(s) => s.name(),
            Self::Timeline(t) => t.name(),
            Self::Warp(w) => w.name(),
            Self::Transition(t) => t.name(),
        }
    }

    /// A short name for the item's kind.
    #[must_use]
    pub fn kind_name(&self) -> &'static str {
        match self {
            Self::Clip(_) => "clip",
            Self::Gap(_) => "gap",
            Self::Track(_) => "track",
            Self::Stack(_) => "stack",
            Self::Timeline(_) => "timeline",
            Self::Warp(_) => "warp",
            Self::Transition(_) => "transition",
        }
    }

    pub(crate) fn referent_addr(&self) -> usize {
        match self {
            Self::Clip(c) => *c as *const Clip as usize,
            Self::Gap(g) => *g as *const Gap as usize,
            Self::Track(t) => *t as *const Track as usize,
            Self::Stack(s) => *s as *const Stack as usize,
            Self::Timeline(t) => *t as *const Timeline as usize,
            Self::Warp(w) => *w as *const Warp as usize,
            Self::Transition(t) => *t as *const Transition as usize,
        }
    }

    /// Whether two handles refer to the same item.
    #[must_use]
    pub fn same_item(&self, other: &Self) -> bool {
        std::mem::discriminant(self) == std::mem::discriminant(other)
            && self.referent_addr() == other.referent_addr()
    }

    /// The fixed set of local spaces this item's kind exposes.
    ///
    /// Child spaces are synthesized per slot and are not listed here; see
    /// [`ItemRef::has_available_local_space`].
    #[must_use]
    pub fn available_local_spaces(&self) -> &'static [SpaceLabel] {
        match self {
            Self::Clip(_) => Clip::AVAILABLE_SPACES,
            Self::Gap(_) => Gap::AVAILABLE_SPACES,
            Self::Track(_) => Track::AVAILABLE_SPACES,
            Self::Stack(_) => Stack::AVAILABLE_SPACES,
            Self::Timeline(_) => Timeline::AVAILABLE_SPACES,
            Self::Warp(_) => Warp::AVAILABLE_SPACES,
            Self::Transition(_) => Transition::AVAILABLE_SPACES,
        }
    }

    /// Whether `label` names a space on this item, counting synthesized
    /// child spaces against the item's child slots.
    #[must_use]
    pub fn has_available_local_space(&self, label: SpaceLabel) -> bool {
        match label {
            SpaceLabel::Child(i) => i < self.child_slots(),
            other => self.available_local_spaces().contains(&other),
        }
    }

    fn child_slots(&self) -> usize {
        match self {
            Self::Clip(_) | Self::Gap(_) => 0,
            Self::Track(t) => t.len(),
            Self::Stack(s) => s.len(),
            Self::Timeline(_) | Self::Warp(_) | Self::Transition(_) => 1,
        }
    }

    /// Handles to the item's children, in slot order.
    #[must_use]
    pub fn children_refs(&self) -> Vec<ItemRef<'a>> {
        match self {
            Self::Clip(_) | Self::Gap(_) => Vec::new(),
            Self::Track(t) => t.children().iter().map(Item::handle).collect(),
            Self::Stack(s) => s.children().iter().map(Item::handle).collect(),
            Self::Timeline(t) => vec![ItemRef::Stack(t.tracks())],
            Self::Warp(w) => vec![w.child().handle()],
            Self::Transition(t) => vec![ItemRef::Stack(t.inner())],
        }
    }

    /// The vertex naming `label` on this item.
    ///
    /// # Errors
    ///
    /// Returns [`Error::UnsupportedSpace`] if the item does not expose the
    /// space.
    pub fn space_node(&self, label: SpaceLabel) -> Result<SpaceNode<'a>> {
        if !self.has_available_local_space(label) {
            return Err(Error::UnsupportedSpace(label));
        }
        Ok(SpaceNode { item: *self, label })
    }

    /// The bounds of `label` on this item.
    ///
    /// # Errors
    ///
    /// Returns [`Error::UnsupportedSpace`] for a space the item does not
    /// expose, and [`Error::UnboundedTopology`] when the space exists but
    /// carries no bounds (an empty container).
    pub fn bounds_of(&self, label: SpaceLabel) -> Result<ContinuousInterval> {
        if !self.has_available_local_space(label) {
            return Err(Error::UnsupportedSpace(label));
        }
        match label {
            SpaceLabel::Presentation => self
                .spanning_topology()?
                .input_bounds()
                .ok_or(Error::UnboundedTopology),
            SpaceLabel::Intrinsic => self
                .spanning_topology()?
                .output_bounds()
                .ok_or(Error::UnboundedTopology),
            SpaceLabel::Media => match self {
                Self::Clip(c) => c.source_bounds(),
                _ => Err(Error::UnsupportedSpace(label)),
            },
            SpaceLabel::Child(i) => self
                .children_refs()
                .get(i)
                .ok_or(Error::UnsupportedSpace(label))?
                .bounds_of(SpaceLabel::Presentation),
        }
    }

    /// The topology from presentation space to the item's deepest local
    /// space: media for clips, intrinsic (or the warped child) otherwise.
    ///
    /// # Errors
    ///
    /// Returns [`Error::MissingBounds`] for a clip with no bounds anywhere
    /// and [`Error::InvalidChildTopology`] when a container child has no
    /// input bounds.
    pub fn spanning_topology(&self) -> Result<Topology> {
        match self {
            Self::Clip(c) => {
                let bounds = c.source_bounds()?;
                Ok(Topology::affine(AffineMapping {
                    input_bounds: ContinuousInterval::from_start_duration(
                        Ordinate::ZERO,
                        bounds.duration(),
                    ),
                    xform: AffineTransform::from_offset(bounds.start),
                }))
            }
            Self::Gap(g) => Ok(Topology::identity(g.bounds())),
            Self::Track(t) => sequenced_span(t.children()),
            Self::Stack(s) => layered_span(s.children()),
            Self::Timeline(t) => ItemRef::Stack(t.tracks()).spanning_topology(),
            Self::Transition(t) => ItemRef::Stack(t.inner()).spanning_topology(),
            Self::Warp(w) => warp_presentation_to_child(w),
        }
    }

    /// The one-step topology for a walker at `(self, from)` stepping along
    /// `step` towards the next space-graph node.
    ///
    /// These are the edges the space graph composes: identities almost
    /// everywhere, with the interesting mappings concentrated at clips
    /// (presentation into media), warps (the warp transform), gaps (their
    /// own span), and track child hinges (the right-met offset).
    ///
    /// # Errors
    ///
    /// Returns [`Error::UnsupportedSpace`] when the rule rejects `from` for
    /// this kind, plus whatever bound errors the kind's topology raises.
    pub fn step_topology(&self, from: SpaceLabel, step: Step) -> Result<Topology> {
        match self {
            Self::Track(t) => match from {
                SpaceLabel::Presentation | SpaceLabel::Intrinsic => {
                    Ok(Topology::identity_infinite())
                }
                SpaceLabel::Child(i) => match step {
                    Step::Left => Ok(Topology::identity_infinite()),
                    Step::Right => {
                        let child = t
                            .children()
                            .get(i)
                            .ok_or(Error::UnsupportedSpace(from))?;
                        let d = child
                            .handle()
                            .bounds_of(SpaceLabel::Presentation)?
                            .duration();
                        // The right-met offset into the next child's space.
                        Ok(Topology::affine(AffineMapping {
                            input_bounds: ContinuousInterval::new(d, Ordinate::INFINITY),
                            xform: AffineTransform::from_offset(-d),
                        }))
                    }
                },
                SpaceLabel::Media => Err(Error::UnsupportedSpace(from)),
            },
            Self::Clip(c) => match from {
                SpaceLabel::Presentation => self.spanning_topology(),
                SpaceLabel::Media => Ok(Topology::identity(c.source_bounds()?)),
                other => Err(Error::UnsupportedSpace(other)),
            },
            Self::Warp(w) => match from {
                SpaceLabel::Presentation => warp_presentation_to_child(w),
                _ => Ok(Topology::identity_infinite()),
            },
            Self::Gap(g) => match from {
                SpaceLabel::Presentation => Ok(Topology::identity(g.bounds())),
                _ => Ok(Topology::identity_infinite()),
            },
            Self::Timeline(_) | Self::Stack(_) | Self::Transition(_) => {
                Ok(Topology::identity_infinite())
            }
        }
    }

    /// The discrete partition registered for `(in_space, domain)`, if any.
    ///
    /// Timelines quantize their presentation space per domain; clips expose
    /// their media's partition when the requested domain matches the
    /// media's. Every other combination has no discrete structure.
    #[must_use]
    pub fn discrete_partition_for_space(
        &self,
        in_space: SpaceLabel,
        domain: &Domain,
    ) -> Option<SampleIndexGenerator> {
        match (self, in_space) {
            (Self::Timeline(t), SpaceLabel::Presentation) => {
                t.discrete_partitions().for_domain(domain)
            }
            (Self::Clip(c), SpaceLabel::Media) if c.media().domain() == domain => {
                c.media().maybe_discrete_partition()
            }
            _ => None,
        }
    }

    /// The continuous footprint of sample `index` in `(in_space, domain)`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::NoDiscreteInfoForSpace`] when no partition exists
    /// for the pair.
    pub fn discrete_index_to_continuous_range(
        &self,
        index: i64,
        in_space: SpaceLabel,
        domain: &Domain,
    ) -> Result<ContinuousInterval> {
        self.discrete_partition_for_space(in_space, domain)
            .map(|p| p.project_index_dc(index))
            .ok_or_else(|| Error::NoDiscreteInfoForSpace {
                space: in_space,
                domain: domain.clone(),
            })
    }

    /// The sample index containing `ord` in `(in_space, domain)`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::NoDiscreteInfoForSpace`] when no partition exists
    /// for the pair.
    pub fn continuous_ordinate_to_discrete_index(
        &self,
        ord: Ordinate,
        in_space: SpaceLabel,
        domain: &Domain,
    ) -> Result<i64> {
        self.discrete_partition_for_space(in_space, domain)
            .map(|p| p.project_instantaneous_cd(ord))
            .ok_or_else(|| Error::NoDiscreteInfoForSpace {
                space: in_space,
                domain: domain.clone(),
            })
    }

    /// A staircase from continuous ordinates in `in_space` to the held
    /// sample indices of its partition, spanning the item's presentation.
    ///
    /// # Errors
    ///
    /// Returns [`Error::NoDiscreteSpecification`] when the space carries no
    /// partition, and [`Error::UnboundedTopology`] when the item has no
    /// presentation bounds to span.
    #[allow(clippy::cast_precision_loss)]
    pub fn continuous_to_discrete_topology(
        &self,
        in_space: SpaceLabel,
        domain: &Domain,
    ) -> Result<Topology> {
        let partition = self
            .discrete_partition_for_space(in_space, domain)
            .ok_or(Error::NoDiscreteSpecification(in_space))?;
        let bounds = self
            .spanning_topology()?
            .input_bounds()
            .ok_or(Error::UnboundedTopology)?;
        Topology::step_mapping(
            bounds,
            Ordinate::new(partition.start_index as f64),
            partition.sample_duration(),
            Ordinate::ONE,
        )
    }
}

fn sequenced_span(children: &[Item]) -> Result<Topology> {
    let mut union: Option<ContinuousInterval> = None;
    let mut offset = Ordinate::ZERO;
    for child in children {
        let span = child
            .handle()
            .spanning_topology()?
            .input_bounds()
            .ok_or(Error::InvalidChildTopology)?;
        let placed = ContinuousInterval::from_start_duration(offset, span.duration());
        offset = placed.end;
        union = Some(match union {
            None => placed,
            Some(u) => u.extended_by(&placed),
        });
    }
    Ok(union.map_or(Topology::Empty, Topology::identity))
}

fn layered_span(children: &[Item]) -> Result<Topology> {
    let mut union: Option<ContinuousInterval> = None;
    for child in children {
        let span = child
            .handle()
            .spanning_topology()?
            .input_bounds()
            .ok_or(Error::InvalidChildTopology)?;
        let placed = ContinuousInterval::from_start_duration(Ordinate::ZERO, span.duration());
        union = Some(match union {
            None => placed,
            Some(u) => u.extended_by(&placed),
        });
    }
    Ok(union.map_or(Topology::Empty, Topology::identity))
}

fn warp_presentation_to_child(warp: &Warp) -> Result<Topology> {
    let child_bounds = warp.child().handle().bounds_of(SpaceLabel::Presentation)?;
    let warped_to_child = Topology::identity(child_bounds);
    let intrinsic_to_child = Topology::join(warp.transform(), &warped_to_child)?;
    let Some(ib) = intrinsic_to_child.input_bounds() else {
        return Ok(Topology::Empty);
    };
    if !ib.start.is_finite() {
        return Err(Error::UnboundedTopology);
    }
    // Normalize presentation to [0, warped duration).
    let pres_to_intrinsic = Topology::affine(AffineMapping {
        input_bounds: ContinuousInterval::EVERYTHING,
        xform: AffineTransform::from_offset(ib.start),
    });
    Topology::join(&pres_to_intrinsic, &intrinsic_to_child)
}
