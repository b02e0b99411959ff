//! Continuous projection through the space graph: clips, tracks, warps.

mod helpers;

use approx::assert_relative_eq;
use chronotope::{
    build_temporal_tree, Gap, ItemRef, Ordinate, SpaceLabel, Topology, Track, Warp,
};
use helpers::{quick_clip, seg};

/// A single clip with media `[1, 10)`: presentation is `[0, 9)` and the
/// one-step topology carries `0` to the media start, `duration` to the
/// media end.
#[test]
fn test_single_clip_presentation_to_media() {
    let clip = quick_clip("Shot", 1.0, 10.0);
    let handle = ItemRef::from(&clip);
    let tree = build_temporal_tree(handle.space_node(SpaceLabel::Presentation).unwrap()).unwrap();
    assert_eq!(tree.len(), 2);

    assert_eq!(
        handle.bounds_of(SpaceLabel::Presentation).unwrap(),
        seg(0.0, 9.0)
    );

    let topology = tree
        .topology_between(
            &handle.space_node(SpaceLabel::Presentation).unwrap(),
            &handle.space_node(SpaceLabel::Media).unwrap(),
        )
        .unwrap();
    assert_eq!(topology.input_bounds(), Some(seg(0.0, 9.0)));
    assert_eq!(topology.output_bounds(), Some(seg(1.0, 10.0)));
    assert_eq!(
        topology.project_instantaneous_cc(Ordinate::ZERO).unwrap(),
        Ordinate::new(1.0)
    );
    assert_eq!(
        topology
            .project_instantaneous_cc(Ordinate::new(4.0))
            .unwrap(),
        Ordinate::new(5.0)
    );
}

/// Projecting backwards from media to presentation inverts the trim offset.
#[test]
fn test_single_clip_media_to_presentation() {
    let clip = quick_clip("Shot", 1.0, 10.0);
    let handle = ItemRef::from(&clip);
    let tree = build_temporal_tree(handle.space_node(SpaceLabel::Presentation).unwrap()).unwrap();

    let back = tree
        .project_instantaneous(
            &handle.space_node(SpaceLabel::Media).unwrap(),
            &handle.space_node(SpaceLabel::Presentation).unwrap(),
            Ordinate::new(1.0),
        )
        .unwrap();
    assert_eq!(back, Ordinate::ZERO);
}

/// A track of `[gap(3s), clip [1,9), gap(4s)]`: the composed mapping from
/// track presentation into the clip's media has source bounds `[3, 11)`
/// and destination bounds `[1, 9)`, and the whole track spans `[0, 15)`.
#[test]
fn test_track_presentation_to_clip_media() {
    let mut track = Track::new("V1");
    track.append(Gap::new(Ordinate::new(3.0)));
    track.append(quick_clip("Shot", 1.0, 9.0));
    track.append(Gap::new(Ordinate::new(4.0)));

    let track_ref = ItemRef::from(&track);
    assert_eq!(
        track_ref.bounds_of(SpaceLabel::Presentation).unwrap(),
        seg(0.0, 15.0)
    );

    let tree =
        build_temporal_tree(track_ref.space_node(SpaceLabel::Presentation).unwrap()).unwrap();
    let clip_ref = track_ref.children_refs()[1];
    let topology = tree
        .topology_between(
            &track_ref.space_node(SpaceLabel::Presentation).unwrap(),
            &clip_ref.space_node(SpaceLabel::Media).unwrap(),
        )
        .unwrap();

    assert_eq!(topology.input_bounds(), Some(seg(3.0, 11.0)));
    assert_eq!(topology.output_bounds(), Some(seg(1.0, 9.0)));
    assert_eq!(
        topology
            .project_instantaneous_cc(Ordinate::new(3.0))
            .unwrap(),
        Ordinate::new(1.0)
    );
    assert_eq!(
        topology
            .project_instantaneous_cc(Ordinate::new(10.0))
            .unwrap(),
        Ordinate::new(8.0)
    );
}

/// Right-met sequencing: in a track of identical clips the accumulated
/// child durations land each clip's media start exactly at the seam.
#[test]
fn test_right_met_accumulation() {
    let track = helpers::track_with_clips("V1", 4, 1.0, 10.0);
    let track_ref = ItemRef::from(&track);
    let tree =
        build_temporal_tree(track_ref.space_node(SpaceLabel::Presentation).unwrap()).unwrap();

    for (k, clip_ref) in track_ref.children_refs().into_iter().enumerate() {
        #[allow(clippy::cast_precision_loss)]
        let seam = Ordinate::new(9.0 * k as f64);
        let projected = tree
            .project_instantaneous(
                &track_ref.space_node(SpaceLabel::Presentation).unwrap(),
                &clip_ref.space_node(SpaceLabel::Media).unwrap(),
                seam,
            )
            .unwrap();
        assert_eq!(projected, Ordinate::new(1.0), "seam of clip {k}");
    }
}

/// A reversing double-speed warp over a clip with presentation `[0, 8)`:
/// the warp presents `[0, 4)`, maps `0` to `8`, and inverts back.
#[test]
fn test_reverse_warp_projection() {
    let clip = quick_clip("Shot", 1.0, 9.0);
    let warp = Warp::linear("reverse 2x", clip, -2.0).unwrap();
    let warp_ref = ItemRef::from(&warp);

    assert_eq!(
        warp_ref.bounds_of(SpaceLabel::Presentation).unwrap(),
        seg(0.0, 4.0)
    );

    let tree = build_temporal_tree(warp_ref.space_node(SpaceLabel::Presentation).unwrap()).unwrap();
    let clip_ref = warp_ref.children_refs()[0];
    let topology = tree
        .topology_between(
            &warp_ref.space_node(SpaceLabel::Presentation).unwrap(),
            &clip_ref.space_node(SpaceLabel::Presentation).unwrap(),
        )
        .unwrap();

    assert_eq!(topology.input_bounds(), Some(seg(0.0, 4.0)));
    assert_eq!(topology.output_bounds(), Some(seg(0.0, 8.0)));
    assert_eq!(
        topology.project_instantaneous_cc(Ordinate::ZERO).unwrap(),
        Ordinate::new(8.0)
    );
    assert_eq!(
        topology
            .project_instantaneous_cc(Ordinate::new(3.0))
            .unwrap(),
        Ordinate::new(2.0)
    );

    let inverses = topology.invert();
    assert_eq!(inverses.len(), 1);
    assert_eq!(
        inverses[0].project_instantaneous_cc(Ordinate::ZERO).unwrap(),
        Ordinate::new(4.0)
    );
}

/// Composing an invertible warp's mapping with its inverse yields identity
/// on the warp's presentation bounds, up to floating point.
#[test]
fn test_warp_inversion_round_trip() {
    for scale in [-2.0, -0.5, 0.75, 3.0] {
        let clip = quick_clip("Shot", 1.0, 9.0);
        let warp = Warp::linear("w", clip, scale).unwrap();
        let warp_ref = ItemRef::from(&warp);
        let tree =
            build_temporal_tree(warp_ref.space_node(SpaceLabel::Presentation).unwrap()).unwrap();
        let clip_ref = warp_ref.children_refs()[0];
        let forward = tree
            .topology_between(
                &warp_ref.space_node(SpaceLabel::Presentation).unwrap(),
                &clip_ref.space_node(SpaceLabel::Presentation).unwrap(),
            )
            .unwrap();
        let inverses = forward.invert();
        assert_eq!(inverses.len(), 1, "scale {scale}");
        let round_trip = Topology::join(&forward, &inverses[0]).unwrap();

        let bounds = warp_ref.bounds_of(SpaceLabel::Presentation).unwrap();
        let probe = bounds.start + bounds.duration().checked_div(Ordinate::new(3.0)).unwrap();
        let out = round_trip.project_instantaneous_cc(probe).unwrap();
        assert_relative_eq!(out.value(), probe.value(), epsilon = 1e-9);
    }
}

/// Projection into the warped child of a warp reaches the child's media.
#[test]
fn test_warp_presentation_to_media() {
    let clip = quick_clip("Shot", 1.0, 9.0);
    let warp = Warp::linear("reverse 2x", clip, -2.0).unwrap();
    let warp_ref = ItemRef::from(&warp);
    let tree = build_temporal_tree(warp_ref.space_node(SpaceLabel::Presentation).unwrap()).unwrap();
    let clip_ref = warp_ref.children_refs()[0];

    // Presentation 3 lands at child presentation 2, media 3.
    let projected = tree
        .project_instantaneous(
            &warp_ref.space_node(SpaceLabel::Presentation).unwrap(),
            &clip_ref.space_node(SpaceLabel::Media).unwrap(),
            Ordinate::new(3.0),
        )
        .unwrap();
    assert_eq!(projected, Ordinate::new(3.0));
}
