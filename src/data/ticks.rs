//! Tick placement: nice tick intervals, axis limits snapped to whole ticks,
//! and major/minor tick positions.

/// Upper bound on generated ticks per axis, so degenerate inputs cannot explode.
const MAX_TICKS: usize = 1_000;

/// Pick a tick interval for a data range, aiming for about five ticks.
///
/// Candidates are 0.1, 0.2, 0.5, 1 and 2 times the range's decade; ties go to
/// the finer interval.
pub fn compute_tick_interval(range: f64) -> f64 {
    let range = range.abs();
    if !range.is_finite() || range == 0.0 {
        return 1.0;
    }
    let order_of_magnitude = 10f64.powi(range.log10().floor() as i32);
    let possible_tick_intervals = [0.1, 0.2, 0.5, 1.0, 2.0].map(|f| order_of_magnitude * f);
    // Try to get as close to 5 ticks as possible
    possible_tick_intervals
        .iter()
        .copied()
        .min_by_key(|interval| ((range / interval).round() as i64 - 5).abs())
        .unwrap_or(order_of_magnitude)
}

/// Data extents of a series as `(min, max)`, skipping non-finite values.
pub fn extents(values: impl IntoIterator<Item = f64>) -> Option<(f64, f64)> {
    values
        .into_iter()
        .filter(|v| v.is_finite())
        .fold(None, |acc, v| match acc {
            None => Some((v, v)),
            Some((lo, hi)) => Some((lo.min(v), hi.max(v))),
        })
}

/// Union of two optional extents.
pub fn union_extents(a: Option<(f64, f64)>, b: Option<(f64, f64)>) -> Option<(f64, f64)> {
    match (a, b) {
        (Some((a0, a1)), Some((b0, b1))) => Some((a0.min(b0), a1.max(b1))),
        (a, None) => a,
        (None, b) => b,
    }
}

/// Widen data extents outward to whole multiples of the tick interval.
///
/// Returns `(limits, interval)`. A zero-width extent is first padded so the
/// axis still has a visible span.
pub fn nice_limits(min: f64, max: f64) -> ((f64, f64), f64) {
    let (mut min, mut max) = if min <= max { (min, max) } else { (max, min) };
    if min == max {
        let pad = if min == 0.0 { 0.5 } else { min.abs() * 0.05 };
        min -= pad;
        max += pad;
    }
    let interval = compute_tick_interval(max - min);
    let lo = (min / interval).floor() * interval;
    let hi = (max / interval).ceil() * interval;
    ((lo, hi), interval)
}

/// Major tick positions within `limits` (inclusive), spaced `interval` apart.
pub fn major_ticks(limits: (f64, f64), interval: f64) -> Vec<f64> {
    let (lo, hi) = ordered(limits);
    let interval = interval.abs();
    if !interval.is_finite() || interval == 0.0 || !lo.is_finite() || !hi.is_finite() {
        return Vec::new();
    }
    let eps = interval * 1e-9;
    let first = ((lo - eps) / interval).ceil();
    (0..MAX_TICKS)
        .map(|i| (first + i as f64) * interval)
        .take_while(|&t| t <= hi + eps)
        .collect()
}

/// Minor tick positions: `per_major` subdivisions of each major interval,
/// excluding positions that coincide with a major tick.
pub fn minor_ticks(limits: (f64, f64), interval: f64, per_major: usize) -> Vec<f64> {
    if per_major < 2 {
        return Vec::new();
    }
    let minor = interval.abs() / per_major as f64;
    major_ticks(limits, minor)
        .into_iter()
        .filter(|&t| {
            let k = t / interval.abs();
            (k - k.round()).abs() > 1e-6
        })
        .collect()
}

fn ordered(limits: (f64, f64)) -> (f64, f64) {
    if limits.0 <= limits.1 {
        limits
    } else {
        (limits.1, limits.0)
    }
}
