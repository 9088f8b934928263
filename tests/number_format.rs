use plothelper::data::number_format::*;
use plothelper::PlotError;
use proptest::prelude::*;

#[test]
fn special_values() {
    assert_eq!(scinote(0.0, 2).unwrap(), "0");
    assert_eq!(scinote(-0.0, 2).unwrap(), "0");
    assert_eq!(scinote(f64::NAN, 2).unwrap(), "nan");
    assert_eq!(scinote(f64::INFINITY, 2).unwrap(), "inf");
    assert_eq!(scinote(f64::NEG_INFINITY, 2).unwrap(), "-inf");
}

#[test]
fn general_case() {
    assert_eq!(scinote(12345.0, 2).unwrap(), "1.23e4");
    assert_eq!(scinote(1.0, 1).unwrap(), "1.0e0");
    assert_eq!(scinote(1000.0, 0).unwrap(), "1e3");
    assert_eq!(scinote(6.02214076e23, 3).unwrap(), "6.022e23");
}

#[test]
fn exponent_floors_below_one() {
    assert_eq!(scinote(0.005, 2).unwrap(), "5.00e-3");
    assert_eq!(scinote(0.05, 1).unwrap(), "5.0e-2");
    assert_eq!(scinote(0.001, 0).unwrap(), "1e-3");
}

#[test]
fn negative_sign_is_kept() {
    assert_eq!(scinote(-50.0, 0).unwrap(), "-5e1");
    assert_eq!(scinote(-0.00042, 1).unwrap(), "-4.2e-4");
}

#[test]
fn rounding_carry_renormalises() {
    assert_eq!(scinote(9.996, 2).unwrap(), "1.00e1");
    assert_eq!(scinote(0.0999999, 2).unwrap(), "1.00e-1");
}

#[test]
fn extreme_magnitudes_stay_in_defined_branches() {
    assert_eq!(scinote(f64::MAX, 2).unwrap(), "1.80e308");
    assert_eq!(scinote(f64::MIN_POSITIVE, 2).unwrap(), "2.23e-308");
    // smallest subnormal
    assert_eq!(scinote(5e-324, 1).unwrap(), "4.9e-324");
}

#[test]
fn unrepresentable_variant_formats() {
    let err = PlotError::UnrepresentableValue(1.5);
    assert!(err.to_string().contains("1.5"));
}

#[test]
fn decimals_for_step_matches_tick_spacing() {
    assert_eq!(decimals_for_step(1.0), 0);
    assert_eq!(decimals_for_step(0.5), 1);
    assert_eq!(decimals_for_step(0.02), 2);
    assert_eq!(decimals_for_step(200.0), 0);
    assert_eq!(decimals_for_step(0.0), 0);
}

#[test]
fn auto_formatter_decimal_and_scientific() {
    let f = TickFormatter::Auto;
    assert_eq!(f.format_tick(0.5, 0.5), "0.5");
    assert_eq!(f.format_tick(300.0, 100.0), "300");
    assert_eq!(f.format_tick(3e-5, 1e-5), "3e-5");
    assert_eq!(f.format_tick(2.5e-5, 5e-6), "2.5e-5");
    assert_eq!(f.format_tick(20000.0, 10000.0), "2e4");
    // float residue around zero prints as zero
    assert_eq!(f.format_tick(-1.3e-17, 0.1), "0.0");
}

#[test]
fn explicit_formatters_with_unit() {
    let d = TickFormatter::Decimal(DecimalFormatter {
        decimal_places: Some(2),
        unit: Some("V".to_string()),
    });
    assert_eq!(d.format_tick(3.14159, 1.0), "3.14 V");

    let s = TickFormatter::Scientific(ScientificFormatter {
        mantissa_digits: Some(1),
        unit: Some("Hz".to_string()),
    });
    assert_eq!(s.format_tick(2000.0, 500.0), "2.0e3 Hz");
    assert_eq!(TickFormatter::scientific(0).format_tick(0.0, 1.0), "0");
}

proptest! {
    #[test]
    fn mantissa_in_range_and_value_recovered(n in prop_oneof![-1e300f64..-1e-300, 1e-300f64..1e300]) {
        let s = scinote(n, 6).unwrap();
        let (mantissa, exp) = s.split_once('e').unwrap();
        let m: f64 = mantissa.parse().unwrap();
        let e: i32 = exp.parse().unwrap();
        prop_assert!((1.0..10.0).contains(&m.abs()));
        prop_assert_eq!(m < 0.0, n < 0.0);
        let back = m * 10f64.powi(e);
        prop_assert!(((back - n) / n).abs() < 1e-5);
    }
}
