use assert_matches::assert_matches;
use itertools::Itertools;

use velocidad::calculator::{
    calculate, sample_over_distance, sample_over_time, validate_and_compute, SampledSeries,
    ValidationError, SWEEP_POINTS,
};
use velocidad::util::{format_fixed, speed_kmh};

fn ascending(series: &SampledSeries) -> bool {
    series
        .points()
        .iter()
        .tuple_windows()
        .all(|(a, b)| a.at <= b.at)
}

#[test]
fn default_inputs_give_ten_metres_per_second() {
    let calc = calculate("100", "10").unwrap();
    assert_eq!(calc.result.speed, 10.0);
    assert_eq!(format_fixed(speed_kmh(calc.result.speed), 2), "36.00");
}

#[test]
fn zero_distance_falls_back_to_hundred_metre_sweep() {
    let calc = calculate("0", "5").unwrap();
    assert_eq!(calc.result.speed, 0.0);
    assert_eq!(calc.over_distance.last().unwrap().at, 100.0);
    assert!(calc.over_distance.points().iter().all(|p| p.value >= 0.0));
}

#[test]
fn negative_time_produces_no_result() {
    assert_matches!(calculate("50", "-1"), Err(ValidationError::NonPositiveTime));
}

#[test]
fn letters_are_non_numeric() {
    assert_matches!(calculate("xyz", "10"), Err(ValidationError::NonNumeric));
}

#[test]
fn validation_kinds() {
    assert_matches!(
        validate_and_compute("-5", "10"),
        Err(ValidationError::NegativeDistance)
    );
    assert_matches!(
        validate_and_compute("10", "0"),
        Err(ValidationError::NonPositiveTime)
    );
    assert_matches!(
        validate_and_compute("10", "-3"),
        Err(ValidationError::NonPositiveTime)
    );
    for raw in ["abc", "", "1,2"] {
        assert_matches!(validate_and_compute(raw, "1"), Err(ValidationError::NonNumeric));
    }
}

#[test]
fn speed_matches_division_over_a_grid() {
    let distances = [0.0, 0.001, 1.0, 3.7, 99.99, 1234.5, 1e12];
    let times = [1e-6, 0.3, 1.0, 2.5, 60.0, 3600.0];
    for (d, t) in distances.iter().cartesian_product(times.iter()) {
        let r = validate_and_compute(&d.to_string(), &t.to_string()).unwrap();
        assert_eq!(r.speed, d / t, "d={d} t={t}");

        let over_t = sample_over_time(*d, *t);
        let over_d = sample_over_distance(*d, *t);
        assert_eq!(over_t.len(), SWEEP_POINTS);
        assert_eq!(over_d.len(), SWEEP_POINTS);
        assert!(ascending(&over_t), "d={d} t={t}");
        assert!(ascending(&over_d), "d={d} t={t}");
    }
}

#[test]
fn repeated_calls_agree() {
    for (d, t) in [("100", "10"), ("-1", "2"), ("3", "x")] {
        assert_eq!(validate_and_compute(d, t), validate_and_compute(d, t));
    }
}
