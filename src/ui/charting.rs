use itertools::{Itertools, MinMaxResult};

/// X and Y axis bounds for a sweep chart
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ChartBounds {
    pub x: [f64; 2],
    pub y: [f64; 2],
}

/// Compute bounds for a sweep. Y always starts at zero since speeds are never
/// negative; degenerate ranges are widened so the chart stays drawable.
pub fn compute_chart_bounds(coords: &[(f64, f64)]) -> ChartBounds {
    let x = match coords
        .iter()
        .map(|&(x, _)| x)
        .filter(|x| x.is_finite())
        .minmax_by(f64::total_cmp)
    {
        MinMaxResult::NoElements => [0.0, 1.0],
        MinMaxResult::OneElement(v) => [v, v + 1.0],
        MinMaxResult::MinMax(lo, hi) if lo == hi => [lo, hi + 1.0],
        MinMaxResult::MinMax(lo, hi) => [lo, hi],
    };

    let highest = coords
        .iter()
        .map(|&(_, y)| y)
        .filter(|y| y.is_finite())
        .fold(0.0_f64, f64::max);
    let y = [0.0, if highest > 0.0 { highest } else { 1.0 }];

    ChartBounds { x, y }
}

/// Two points forming a vertical marker at `x` spanning the Y bounds
pub fn reference_line(x: f64, bounds: &ChartBounds) -> [(f64, f64); 2] {
    [(x, bounds.y[0]), (x, bounds.y[1])]
}

/// Format a simple numeric label consistently
pub fn format_label(val: f64) -> String {
    if (val - val.round()).abs() < f64::EPSILON {
        format!("{}", val.round())
    } else {
        format!("{val:.2}")
    }
}
