//! # `chronotope`
//!
//! A temporal-hierarchy engine for editorial timelines: named temporal
//! spaces on composition items, affine-bounded mappings between them, and a
//! space graph that answers "given a coordinate in space A on object X,
//! what is the corresponding coordinate in space B on object Y?"
//!
//! Every item — clip, gap, track, stack, timeline, warp, transition —
//! carries a fixed set of temporal spaces (presentation, intrinsic, media,
//! per-child). [`build_temporal_tree`] expands a composition into a graph
//! of `(item, space)` vertices keyed by binary path codes, and projection
//! composes the per-item mappings along the path between any two vertices.
//!
//! ## Example
//!
//! ```
//! use chronotope::{
//!     build_temporal_tree, Clip, ContinuousInterval, Domain, Gap, ItemRef, MediaReference,
//!     Ordinate, SpaceLabel, Track,
//! };
//!
//! // A track of a 3-second gap followed by a clip drawing media [1, 9).
//! let mut media = MediaReference::new("/footage/shot_010.mov", Domain::Picture);
//! media.set_available_bounds(ContinuousInterval::new(
//!     Ordinate::new(1.0),
//!     Ordinate::new(9.0),
//! ));
//! let mut track = Track::new("V1");
//! track.append(Gap::new(Ordinate::new(3.0)));
//! track.append(Clip::new("Shot 10", media));
//!
//! let track_ref = ItemRef::from(&track);
//! let tree = build_temporal_tree(track_ref.space_node(SpaceLabel::Presentation)?)?;
//!
//! // Where does track time 3.0 land in the clip's media?
//! let clip_ref = track_ref.children_refs()[1];
//! let in_media = tree.project_instantaneous(
//!     &track_ref.space_node(SpaceLabel::Presentation)?,
//!     &clip_ref.space_node(SpaceLabel::Media)?,
//!     Ordinate::new(3.0),
//! )?;
//! assert_eq!(in_media, Ordinate::new(1.0));
//! # Ok::<(), chronotope::Error>(())
//! ```

#![warn(missing_docs)]

mod macros;

mod traits;
pub use traits::HasMetadata;

mod error;
pub use error::{Error, Result};

mod ordinate;
pub use ordinate::Ordinate;

mod interval;
pub use interval::ContinuousInterval;

mod transform;
pub use transform::{AffineMapping, AffineTransform};

mod topology;
pub use topology::{StepMapping, Topology};

pub mod treecode;
pub use treecode::{BinaryTree, Step, Treecode};

mod sampling;
pub use sampling::{DiscreteSpacePartitions, Domain, SampleIndexGenerator};

mod space;
pub use space::{SpaceLabel, SpaceNode};

mod clip;
pub use clip::{Clip, MediaReference};

mod gap;
pub use gap::Gap;

mod track;
pub use track::Track;

mod stack;
pub use stack::Stack;

mod timeline;
pub use timeline::Timeline;

mod warp;
pub use warp::Warp;

mod transition;
pub use transition::Transition;

mod item;
pub use item::{Item, ItemRef};

mod graph;
pub use graph::{build_temporal_tree, TemporalTree};

mod builders;
pub use builders::{ClipBuilder, TimelineBuilder, TrackBuilder};
