//! Motion and contact behaviour of the engine-free tendril core.

use std::f32::consts::{FRAC_PI_2, PI};

use approx::assert_relative_eq;
use glam::Vec2;
use magic_tendril::{AnchorRole, Tendril, TendrilError, TendrilSettings};
use rstest::{fixture, rstest};
use test_utils::{BallMap, PresentationCall, RecordingPresentation};

const SOURCE: u32 = 1;
const SINK: u32 = 2;

#[fixture]
fn line() -> BallMap {
    BallMap::with(&[(SOURCE, 0.0, 0.0), (SINK, 10.0, 0.0)])
}

fn settings(speed: f32) -> TendrilSettings {
    TendrilSettings {
        speed,
        contact_radius: 0.0,
        ..TendrilSettings::default()
    }
}

fn grow(balls: &BallMap, angle: f32, speed: f32) -> (Tendril<u32>, RecordingPresentation) {
    let mut presentation = RecordingPresentation::default();
    let tendril = Tendril::new(SOURCE, SINK, angle, settings(speed), balls, &mut presentation)
        .expect("source ball exists");
    (tendril, presentation)
}

/// Updates until contact or `limit` frames, returning the frame of contact.
fn frames_until_contact(
    tendril: &mut Tendril<u32>,
    balls: &BallMap,
    presentation: &mut RecordingPresentation,
    limit: u32,
) -> Option<u32> {
    (1..=limit).find(|_| {
        tendril
            .update(balls, presentation)
            .expect("anchors exist");
        tendril.is_touching_target()
    })
}

#[rstest]
fn straight_shot_touches_on_tenth_frame(line: BallMap) {
    let (mut tendril, mut presentation) = grow(&line, 0.0, 1.0);
    assert!(!tendril.is_touching_target());

    let contact = frames_until_contact(&mut tendril, &line, &mut presentation, 50);
    assert_eq!(contact, Some(10));
    assert_relative_eq!(tendril.lead().x, 10.0, epsilon = 1e-4);

    for _ in 0..20 {
        tendril
            .update(&line, &mut presentation)
            .expect("anchors exist");
        assert!(tendril.is_touching_target());
    }
    assert_eq!(presentation.attach_count(), 1);
    assert_eq!(presentation.redraw_count(), 30);
    assert_eq!(presentation.detach_count(), 0);
}

#[rstest]
#[case::sideways(FRAC_PI_2)]
#[case::backwards(PI)]
#[case::odd(-2.3)]
#[case::wrapped(7.5 * PI)]
fn any_launch_angle_eventually_arrives(line: BallMap, #[case] angle: f32) {
    let (mut tendril, mut presentation) = grow(&line, angle, 1.0);
    let contact = frames_until_contact(&mut tendril, &line, &mut presentation, 500);
    assert!(contact.is_some(), "tendril launched at {angle} never arrived");
}

#[rstest]
fn curved_approach_takes_longer_than_straight(line: BallMap) {
    let (mut straight, mut straight_view) = grow(&line, 0.0, 1.0);
    let (mut curved, mut curved_view) = grow(&line, PI, 1.0);

    let straight_frames = frames_until_contact(&mut straight, &line, &mut straight_view, 500);
    let curved_frames = frames_until_contact(&mut curved, &line, &mut curved_view, 500);
    assert!(curved_frames > straight_frames);
}

#[rstest]
fn same_anchors_different_angles_are_independent(line: BallMap) {
    let (mut east, mut east_view) = grow(&line, 0.0, 1.0);
    let (mut north, mut north_view) = grow(&line, FRAC_PI_2, 1.0);

    for _ in 0..3 {
        east.update(&line, &mut east_view).expect("anchors exist");
    }
    north.update(&line, &mut north_view).expect("anchors exist");

    assert_eq!(east.frames(), 3);
    assert_eq!(north.frames(), 1);
    assert_ne!(east.lead(), north.lead());
    assert!(north.lead().y > 0.0);

    east.terminate(&mut east_view);
    assert!(!north.is_terminated());
    assert_eq!(north_view.detach_count(), 0);
}

#[rstest]
fn slow_sink_stays_touched(mut line: BallMap) {
    let (mut tendril, mut presentation) = grow(&line, 0.0, 1.0);
    frames_until_contact(&mut tendril, &line, &mut presentation, 50);

    for step in 1..=10_u8 {
        line.place(SINK, Vec2::new(10.0 + 0.5 * f32::from(step), 0.0));
        tendril
            .update(&line, &mut presentation)
            .expect("anchors exist");
        assert!(tendril.is_touching_target(), "lost contact at step {step}");
    }
}

#[rstest]
fn contact_radius_is_inclusive(line: BallMap) {
    let mut presentation = RecordingPresentation::default();
    let lenient = TendrilSettings {
        speed: 1.0,
        contact_radius: 2.0,
        ..TendrilSettings::default()
    };
    let mut tendril = Tendril::new(SOURCE, SINK, 0.0, lenient, &line, &mut presentation)
        .expect("source ball exists");

    let contact = frames_until_contact(&mut tendril, &line, &mut presentation, 50);
    assert_eq!(contact, Some(8));
}

#[rstest]
fn vanished_sink_detaches_and_freezes(mut line: BallMap) {
    let (mut tendril, mut presentation) = grow(&line, 0.0, 1.0);
    tendril
        .update(&line, &mut presentation)
        .expect("anchors exist");
    line.remove(SINK);

    let err = tendril
        .update(&line, &mut presentation)
        .expect_err("sink was removed");
    assert_eq!(
        err,
        TendrilError::AnchorLost {
            role: AnchorRole::Sink,
            ball: SINK
        }
    );
    assert_eq!(presentation.calls.last(), Some(&PresentationCall::Detach));

    let lead = tendril.lead();
    line.place(SINK, Vec2::new(1.0, 0.0));
    assert!(tendril.update(&line, &mut presentation).is_ok());
    assert_eq!(tendril.lead(), lead);
    assert!(!tendril.is_touching_target());
    assert_eq!(presentation.detach_count(), 1);
}

#[rstest]
fn pose_spans_source_to_lead(line: BallMap) {
    let (mut tendril, mut presentation) = grow(&line, 0.0, 2.5);
    tendril
        .update(&line, &mut presentation)
        .expect("anchors exist");

    let pose = tendril.pose(&line).expect("source exists");
    assert_eq!(Some(pose), presentation.last_pose());
    assert_relative_eq!(pose.length(), 2.5);
}

#[test]
fn name_matches_across_instances() {
    let balls = BallMap::with(&[(SOURCE, 0.0, 0.0), (SINK, 1.0, 1.0)]);
    let mut presentation = RecordingPresentation::default();
    Tendril::new(SOURCE, SINK, 0.0, settings(1.0), &balls, &mut presentation)
        .expect("source ball exists");
    Tendril::new(SINK, SOURCE, 1.0, settings(1.0), &balls, &mut presentation)
        .expect("source ball exists");

    let labels: Vec<_> = presentation
        .calls
        .iter()
        .filter_map(|call| match call {
            PresentationCall::Attach(label, _) => Some(*label),
            _ => None,
        })
        .collect();
    assert_eq!(labels, vec![Tendril::<u32>::name(); 2]);
}
