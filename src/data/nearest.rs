//! Nearest-value lookup over a numeric slice.

use crate::error::{PlotError, Result};

/// Result of [`find_nearest`]: either the closest element itself or its position.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Nearest {
    Value(f64),
    Index(usize),
}

/// Find the element of `values` closest to `target` by absolute difference.
///
/// With `return_index` the zero-based position is returned instead of the
/// element. Ties resolve to the lowest index.
///
/// ```
/// # use plothelper::data::nearest::{find_nearest, Nearest};
/// assert_eq!(find_nearest(&[1.0, 5.0, 9.0], 4.0, false).unwrap(), Nearest::Value(5.0));
/// assert_eq!(find_nearest(&[1.0, 5.0, 9.0], 4.0, true).unwrap(), Nearest::Index(1));
/// ```
pub fn find_nearest(values: &[f64], target: f64, return_index: bool) -> Result<Nearest> {
    let idx = find_nearest_index(values, target)?;
    Ok(if return_index {
        Nearest::Index(idx)
    } else {
        Nearest::Value(values[idx])
    })
}

/// Closest element of `values` to `target`.
pub fn find_nearest_value(values: &[f64], target: f64) -> Result<f64> {
    find_nearest_index(values, target).map(|i| values[i])
}

/// Position of the element of `values` closest to `target`.
///
/// A distance that is NaN (NaN element or NaN target) never beats a comparable
/// distance; when nothing is comparable the first position is returned.
pub fn find_nearest_index(values: &[f64], target: f64) -> Result<usize> {
    if values.is_empty() {
        return Err(PlotError::invalid("find_nearest needs a non-empty sequence"));
    }

    let mut best_idx = 0;
    let mut best_dist = (values[0] - target).abs();
    for (i, &v) in values.iter().enumerate().skip(1) {
        let dist = (v - target).abs();
        // strict `<` keeps the first minimum
        if dist < best_dist || (best_dist.is_nan() && !dist.is_nan()) {
            best_idx = i;
            best_dist = dist;
        }
    }
    Ok(best_idx)
}
