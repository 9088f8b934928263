use plothelper::data::nearest::*;
use plothelper::PlotError;
use proptest::prelude::*;

#[test]
fn nearest_value_by_absolute_distance() {
    assert_eq!(find_nearest(&[1.0, 5.0, 9.0], 4.0, false).unwrap(), Nearest::Value(5.0));
    assert_eq!(find_nearest(&[1.0, 5.0, 9.0], 4.0, true).unwrap(), Nearest::Index(1));
}

#[test]
fn ties_go_to_first_occurrence() {
    assert_eq!(find_nearest_index(&[2.0, 2.0, 7.0], 2.0).unwrap(), 0);
    // 3 is equally far from 1 and 5
    assert_eq!(find_nearest_index(&[1.0, 5.0], 3.0).unwrap(), 0);
    assert_eq!(find_nearest_index(&[5.0, 1.0], 3.0).unwrap(), 0);
}

#[test]
fn empty_sequence_is_invalid_input() {
    assert!(matches!(find_nearest(&[], 1.0, false), Err(PlotError::InvalidInput(_))));
    assert!(matches!(find_nearest_value(&[], 1.0), Err(PlotError::InvalidInput(_))));
}

#[test]
fn nan_elements_never_win() {
    assert_eq!(find_nearest_index(&[f64::NAN, 10.0, 3.0], 2.0).unwrap(), 2);
    assert_eq!(find_nearest_index(&[f64::NAN, f64::NAN], 2.0).unwrap(), 0);
}

#[test]
fn negative_and_out_of_range_targets() {
    assert_eq!(find_nearest_value(&[-3.0, 0.5, 8.0], -100.0).unwrap(), -3.0);
    assert_eq!(find_nearest_value(&[-3.0, 0.5, 8.0], 1e9).unwrap(), 8.0);
}

proptest! {
    #[test]
    fn result_is_member_and_minimal(
        values in proptest::collection::vec(-1e6f64..1e6, 1..64),
        target in -1e6f64..1e6,
    ) {
        let idx = find_nearest_index(&values, target).unwrap();
        let best = values[idx];
        prop_assert_eq!(find_nearest_value(&values, target).unwrap(), best);
        for (i, &v) in values.iter().enumerate() {
            prop_assert!((best - target).abs() <= (v - target).abs());
            if i < idx {
                prop_assert!((v - target).abs() > (best - target).abs());
            }
        }
    }
}
