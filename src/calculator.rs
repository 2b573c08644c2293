use serde::Serialize;

use crate::util::{format_fixed, round_to};

/// Number of intervals in a sweep; a sweep holds one more point than this.
pub const SWEEP_INTERVALS: usize = 20;
pub const SWEEP_POINTS: usize = SWEEP_INTERVALS + 1;

/// Upper bound of the distance sweep when the distance itself is zero
pub const ZERO_DISTANCE_SWEEP_MAX: f64 = 100.0;

/// Lowest time the time sweep starts from
pub const TIME_SWEEP_FLOOR: f64 = 1.0;

#[derive(thiserror::Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Please enter valid numeric values")]
    NonNumeric,
    #[error("Distance cannot be negative")]
    NegativeDistance,
    #[error("Time must be greater than zero")]
    NonPositiveTime,
}

/// A validated distance/time pair and the speed derived from it (m/s, unrounded)
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct CalculationResult {
    pub distance: f64,
    pub time: f64,
    pub speed: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SamplePoint {
    /// Independent variable of the sweep, unrounded
    #[serde(skip)]
    pub at: f64,
    pub label: String,
    pub value: f64,
}

impl SamplePoint {
    fn new(at: f64, value: f64) -> Self {
        Self {
            at,
            label: format_fixed(at, 1),
            value: round_to(value, 2),
        }
    }
}

/// Evenly spaced sweep over one independent variable
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(transparent)]
pub struct SampledSeries {
    points: Vec<SamplePoint>,
}

impl SampledSeries {
    fn sweep(lo: f64, hi: f64, f: impl Fn(f64) -> f64) -> Self {
        let step = (hi - lo) / SWEEP_INTERVALS as f64;
        let points = (0..SWEEP_POINTS)
            .map(|i| {
                let at = lo + step * i as f64;
                SamplePoint::new(at, f(at))
            })
            .collect();
        Self { points }
    }

    pub fn points(&self) -> &[SamplePoint] {
        &self.points
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn first(&self) -> Option<&SamplePoint> {
        self.points.first()
    }

    pub fn last(&self) -> Option<&SamplePoint> {
        self.points.last()
    }

    /// (independent variable, rounded value) pairs for plotting
    pub fn coords(&self) -> Vec<(f64, f64)> {
        self.points.iter().map(|p| (p.at, p.value)).collect()
    }
}

/// Output of one successful trigger: the result plus both sweeps
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Calculation {
    pub result: CalculationResult,
    pub over_time: SampledSeries,
    pub over_distance: SampledSeries,
}

fn parse_finite(raw: &str) -> Option<f64> {
    raw.trim().parse::<f64>().ok().filter(|v| v.is_finite())
}

// Doubling a value near f64::MAX would give an infinite bound and NaN samples.
fn doubled(v: f64) -> f64 {
    (v * 2.0).min(f64::MAX)
}

pub fn validate_and_compute(
    distance_raw: &str,
    time_raw: &str,
) -> Result<CalculationResult, ValidationError> {
    let (distance, time) = match (parse_finite(distance_raw), parse_finite(time_raw)) {
        (Some(d), Some(t)) => (d, t),
        _ => return Err(ValidationError::NonNumeric),
    };

    if distance < 0.0 {
        return Err(ValidationError::NegativeDistance);
    }
    if time <= 0.0 {
        return Err(ValidationError::NonPositiveTime);
    }

    // "-0" passes the sign check; store it as plain zero so speed is never -0
    let distance = if distance == 0.0 { 0.0 } else { distance };

    Ok(CalculationResult {
        distance,
        time,
        speed: distance / time,
    })
}

/// Speed as time sweeps from `max(1, time / 2)` to `2 * time`, distance fixed.
///
/// The lower bound never drops below one second, so for small times the sweep
/// is no longer centred on `time`. Below half a second the bounds cross; the
/// sweep then runs between them in ascending order.
pub fn sample_over_time(distance: f64, time: f64) -> SampledSeries {
    let min_t = TIME_SWEEP_FLOOR.max(time * 0.5);
    let max_t = doubled(time);
    let (lo, hi) = if max_t < min_t {
        (max_t, min_t)
    } else {
        (min_t, max_t)
    };
    SampledSeries::sweep(lo, hi, |t| distance / t)
}

/// Speed as distance sweeps from 0 to `2 * distance` (or 100 for zero), time fixed
pub fn sample_over_distance(distance: f64, time: f64) -> SampledSeries {
    let max_d = match doubled(distance) {
        d if d == 0.0 => ZERO_DISTANCE_SWEEP_MAX,
        d => d,
    };
    SampledSeries::sweep(0.0, max_d, |d| d / time)
}

/// Full pipeline for one trigger: validate, compute, then sample both sweeps
pub fn calculate(distance_raw: &str, time_raw: &str) -> Result<Calculation, ValidationError> {
    let result = validate_and_compute(distance_raw, time_raw)?;
    Ok(Calculation {
        over_time: sample_over_time(result.distance, result.time),
        over_distance: sample_over_distance(result.distance, result.time),
        result,
    })
}
