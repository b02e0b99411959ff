//! The fluent builder layer.

mod helpers;

use chronotope::{
    Clip, ClipBuilder, Domain, Gap, HasMetadata, ItemRef, MediaReference, Ordinate,
    SampleIndexGenerator, SpaceLabel, Timeline, TimelineBuilder, Track, TrackBuilder,
};
use helpers::{picture_media, seg, DEFAULT_RATE};

#[test]
fn test_clip_builder() {
    let clip = ClipBuilder::new("My Clip", picture_media(0.0, 10.0))
        .bounds(seg(1.0, 9.0))
        .metadata("author", "Jane Doe")
        .metadata("project", "Demo")
        .build();

    assert_eq!(clip.name(), Some("My Clip"));
    assert_eq!(clip.bounds(), Some(seg(1.0, 9.0)));
    assert_eq!(clip.get_metadata("author"), Some("Jane Doe"));
    assert_eq!(clip.get_metadata("project"), Some("Demo"));
    // The trim wins over the media's available bounds.
    assert_eq!(
        ItemRef::from(&clip).bounds_of(SpaceLabel::Media).unwrap(),
        seg(1.0, 9.0)
    );
}

#[test]
fn test_clip_builder_convenience() {
    let clip = Clip::builder("Quick", picture_media(0.0, 4.0)).build();
    assert_eq!(clip.name(), Some("Quick"));
    assert_eq!(clip.bounds(), None);
}

#[test]
fn test_track_builder() {
    let track = TrackBuilder::new("V1")
        .child(Gap::new(Ordinate::new(3.0)))
        .child(Clip::builder("Shot", picture_media(1.0, 9.0)).build())
        .metadata("department", "editorial")
        .build();

    assert_eq!(track.name(), Some("V1"));
    assert_eq!(track.len(), 2);
    assert_eq!(track.get_metadata("department"), Some("editorial"));
    assert_eq!(
        ItemRef::from(&track)
            .bounds_of(SpaceLabel::Presentation)
            .unwrap(),
        seg(0.0, 11.0)
    );
}

#[test]
fn test_track_builder_convenience() {
    let track = Track::builder("A1").build();
    assert!(track.is_empty());
}

#[test]
fn test_timeline_builder() {
    let timeline = TimelineBuilder::new("My Project")
        .picture_partition(SampleIndexGenerator::new(DEFAULT_RATE, 0))
        .audio_partition(SampleIndexGenerator::new(48_000.0, 0))
        .track(
            TrackBuilder::new("V1")
                .child(Clip::builder("Shot", picture_media(0.0, 2.0)).build())
                .build(),
        )
        .metadata("author", "John Smith")
        .build();

    assert_eq!(timeline.name(), Some("My Project"));
    assert_eq!(timeline.tracks().len(), 1);
    assert_eq!(timeline.get_metadata("author"), Some("John Smith"));

    let handle = ItemRef::from(&timeline);
    let picture = handle
        .discrete_partition_for_space(SpaceLabel::Presentation, &Domain::Picture)
        .expect("picture partition registered");
    assert_eq!(picture.sample_rate_hz, DEFAULT_RATE);
    assert!(handle
        .discrete_partition_for_space(SpaceLabel::Presentation, &Domain::Audio)
        .is_some());
}

#[test]
fn test_timeline_builder_convenience() {
    let timeline = Timeline::builder("Empty").build();
    assert!(timeline.tracks().is_empty());
    assert_eq!(
        ItemRef::from(&timeline)
            .discrete_partition_for_space(SpaceLabel::Presentation, &Domain::Picture),
        None
    );
}

#[test]
fn test_media_reference_metadata() {
    let mut media = MediaReference::new("/m.mov", Domain::Picture);
    media.set_metadata("codec", "ProRes");
    assert_eq!(media.get_metadata("codec"), Some("ProRes"));
    assert_eq!(media.get_metadata("missing"), None);
    assert_eq!(media.target_url(), Some("/m.mov"));
}
