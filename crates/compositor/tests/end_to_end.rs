//! Whole-pipeline test on synthetic scenes: crop, reproject, render,
//! assemble, encode.

use campaign_common::{BoundingBox, FlightTrack, Phase, Region, TrackPoint};
use chrono::{Duration, TimeZone, Utc};
use compositor::{
    compose, encode_gif, encode_png, render_frame, AssemblyStyle, Frame, FrameStyle, Sequence,
    SequenceMode,
};
use scene_ops::{crop_to_region, reproject, testdata, Resampling};

fn flight() -> FlightTrack {
    let takeoff = Utc.with_ymd_and_hms(2025, 5, 4, 14, 30, 0).unwrap();
    FlightTrack::new(vec![
        TrackPoint {
            time: takeoff,
            lon: -79.2,
            lat: -1.0,
        },
        TrackPoint {
            time: takeoff + Duration::minutes(25),
            lon: -78.6,
            lat: -1.4,
        },
        TrackPoint {
            time: takeoff + Duration::minutes(50),
            lon: -78.0,
            lat: -1.8,
        },
    ])
    .unwrap()
}

fn frame_for(phase: Phase, minutes_after_takeoff: i64, region: &Region) -> Frame {
    let time = flight().takeoff() + Duration::minutes(minutes_after_takeoff);
    let scene = testdata::synthetic_scene_at(time);

    let cropped = crop_to_region(&scene, region).unwrap();
    let raster = reproject(&cropped, &region.bbox(), 96, 72, Resampling::Nearest).unwrap();

    render_frame(
        &raster,
        phase,
        Some(&flight()),
        Some(region),
        &FrameStyle::default(),
    )
}

#[test]
fn full_flight_figure() {
    let region = Region::Bbox(BoundingBox::new(-79.8, -2.5, -77.5, 0.0));

    let frames = vec![
        frame_for(Phase::Before, -60, &region),
        frame_for(Phase::During, 25, &region),
        frame_for(Phase::After, 110, &region),
    ];

    // frames carry the crop extent and ascend in time
    for frame in &frames {
        assert_eq!(frame.extent, region.bbox());
        assert_eq!(frame.image.width(), 96);
    }
    assert!(frames.windows(2).all(|w| w[0].time < w[1].time));

    let sequence = Sequence::new(frames, SequenceMode::Strict).unwrap();

    let style = AssemblyStyle::default();
    let figure = compose(&sequence, &style);
    assert_eq!(figure.width(), 3 * 96 + 2 * style.gutter);

    let png = encode_png(&figure).unwrap();
    assert_eq!(&png[..8], &[0x89, b'P', b'N', b'G', 0x0D, 0x0A, 0x1A, 0x0A]);

    let gif = encode_gif(&sequence, 400).unwrap();
    assert_eq!(&gif[..6], b"GIF89a");
}

#[test]
fn figure_is_reproducible() {
    let region = Region::Bbox(BoundingBox::new(-79.8, -2.5, -77.5, 0.0));

    let build = || {
        let frames = vec![
            frame_for(Phase::Before, -60, &region),
            frame_for(Phase::During, 25, &region),
            frame_for(Phase::After, 110, &region),
        ];
        let sequence = Sequence::new(frames, SequenceMode::Strict).unwrap();
        encode_png(&compose(&sequence, &AssemblyStyle::default())).unwrap()
    };

    assert_eq!(build(), build());
}

#[test]
fn partial_sequence_when_one_phase_missing() {
    let region = Region::Bbox(BoundingBox::new(-79.8, -2.5, -77.5, 0.0));

    let frames = vec![
        frame_for(Phase::During, 25, &region),
        frame_for(Phase::After, 110, &region),
    ];

    let sequence = Sequence::new(frames, SequenceMode::AllowPartial).unwrap();
    let figure = compose(&sequence, &AssemblyStyle::default());
    assert_eq!(figure.width(), 2 * 96 + AssemblyStyle::default().gutter);
}
