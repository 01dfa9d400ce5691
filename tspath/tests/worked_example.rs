//! End-to-end resolution of the documented worked example and the
//! structural properties every resolved path must satisfy.

use tspath::core::cadence::{Cadence, LogicalForm};
use tspath::core::coordinate::Coordinate;
use tspath::core::distance::score;
use tspath::core::equivalence::{EquivalencePolicy, Identity, Metric, PitchClassEquivalence};
use tspath::core::notation::parse_form;
use tspath::core::path::TonalPath;
use tspath::core::resolve::{cadence_path, resolve};
use tspath::core::stitch::{Stitcher, stitch};
use tspath::test_support::{coord, coord_res, left, point, right, worked_example};

fn points(path: &TonalPath) -> Vec<(i64, i64)> {
    path.iter().map(|p| (p.x(), p.y())).collect()
}

#[test]
fn worked_example_cadence_paths() {
    let forms = worked_example();
    assert_eq!(
        points(&cadence_path(&forms[0]).expect("first")),
        vec![(-1, 0), (0, 0)]
    );
    assert_eq!(
        points(&cadence_path(&forms[1]).expect("second")),
        vec![(-1, 0), (-2, 0), (-1, 0), (0, 0)]
    );
}

#[test]
fn worked_example_stitches_under_identity() {
    let path = stitch(&worked_example()).expect("stitch");
    assert_eq!(
        points(&path),
        vec![(-1, 0), (0, 0), (-1, 0), (-2, 0), (-1, 0), (0, 0)]
    );
}

#[test]
fn notation_round_trips_the_worked_example() {
    let form = LogicalForm::new(worked_example());
    let parsed: LogicalForm = parse_form(&form.to_string()).expect("parse");
    assert_eq!(parsed, form);
}

#[test]
fn step_properties_hold() {
    let inners = [
        point(2, -1),
        coord(vec![right(coord_res())], point(0, 0)),
        left(coord(vec![left(coord_res()), coord_res()], right(point(1, 1)))),
    ];
    let context = Coordinate::new([3, 3]);
    for inner in inners {
        let base = resolve(&inner, context).expect("inner");
        for (wrapped, step) in [
            (left(inner.clone()), Coordinate::left_step()),
            (right(inner.clone()), Coordinate::right_step()),
        ] {
            let path = resolve(&wrapped, context).expect("wrapped");
            assert_eq!(path[0], base[0] + step, "{wrapped}");
            assert_eq!(&path[1..], &base[..], "{wrapped}");
        }
    }
}

#[test]
fn stitched_length_is_sum_of_cadence_lengths() {
    let forms = vec![
        left(left(point(0, 0))),
        coord(vec![left(coord_res()), right(coord_res())], left(point(0, 1))),
        point(0, 0),
    ];
    let total: usize = forms
        .iter()
        .map(|cadence| cadence_path(cadence).expect("path").len())
        .sum();
    let policy = PitchClassEquivalence::equal_temperament(Metric::Manhattan);
    let stitched = Stitcher::new(policy).stitch(&forms).expect("stitch");
    assert_eq!(stitched.len(), total);
}

#[test]
fn equivalence_shift_preserves_shape_and_scores_as_gold() {
    let forms: Vec<Cadence> = vec![left(point(3, 0)), point(0, 0)];
    let plain = stitch(&forms).expect("identity");
    let shifted = Stitcher::new(PitchClassEquivalence::equal_temperament(Metric::Manhattan))
        .stitch(&forms)
        .expect("pitch class");
    assert_ne!(plain, shifted);
    // The first cadence moved rigidly; its internal step is unchanged.
    assert_eq!(shifted[1] - shifted[0], plain[1] - plain[0]);
    let policy = PitchClassEquivalence::equal_temperament(Metric::Manhattan);
    assert_eq!(policy.class_of(&shifted[1]), policy.class_of(&plain[1]));
    assert_eq!(score(&shifted, &shifted).f_score, 1.0);
}

#[test]
fn identity_policy_is_a_no_op_for_any_anchor() {
    let path = cadence_path(&left(right(point(-2, 5)))).expect("path");
    for anchor in [Coordinate::new([0, 0]), Coordinate::new([9, -9])] {
        assert_eq!(Identity.nearest_to(&path, anchor), path);
    }
}
