//! Shared edge-sequence validation

use gridhist_core::{AxisValue, Error, Result};
use std::cmp::Ordering;

/// Relative tolerance for the uniform-spacing check on constant-width axes
pub(crate) const SPACING_TOL: f64 = 1e-6;

/// Edges must be strictly ascending; incomparable pairs count as violations.
pub(crate) fn check_ascending<V: AxisValue>(edges: &[V]) -> Result<()> {
    for (i, pair) in edges.windows(2).enumerate() {
        match pair[0].partial_cmp(&pair[1]) {
            Some(Ordering::Less) => {}
            _ => return Err(Error::edges_not_ascending(i + 1)),
        }
    }
    Ok(())
}
