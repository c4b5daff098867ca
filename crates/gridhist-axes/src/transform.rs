//! Value transforms for constant-width axes
//!
//! A transformed axis applies `forward` to every sample before comparing it
//! against `min`/`width`, which both live in transform space. Edge
//! materialization applies `inverse` so callers always see natural units.

use std::fmt::Debug;

/// A monotonic value transform applied ahead of bin resolution
pub trait ValueTransform: Clone + Copy + Debug + PartialEq + Send + Sync + 'static {
    /// Short name used in axis descriptions
    const NAME: &'static str;

    /// Natural units to transform space
    fn forward(value: f64) -> f64;

    /// Transform space back to natural units
    fn inverse(value: f64) -> f64;
}

/// No transform; comparisons happen in natural units
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Identity;

impl ValueTransform for Identity {
    const NAME: &'static str = "identity";

    fn forward(value: f64) -> f64 {
        value
    }

    fn inverse(value: f64) -> f64 {
        value
    }
}

/// Base-10 logarithmic transform
///
/// `forward` of a non-positive value is NaN (or negative infinity for zero);
/// axes treat that as "below the transform's domain".
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Log10;

impl ValueTransform for Log10 {
    const NAME: &'static str = "log10";

    fn forward(value: f64) -> f64 {
        value.log10()
    }

    fn inverse(value: f64) -> f64 {
        10f64.powf(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_identity_round_trip() {
        assert_eq!(Identity::forward(3.25), 3.25);
        assert_eq!(Identity::inverse(-7.0), -7.0);
    }

    #[test]
    fn test_log10_round_trip() {
        assert_relative_eq!(Log10::forward(100.0), 2.0);
        assert_relative_eq!(Log10::inverse(2.0), 100.0);
        assert_relative_eq!(Log10::inverse(Log10::forward(0.03)), 0.03, max_relative = 1e-12);
    }

    #[test]
    fn test_log10_domain() {
        assert!(Log10::forward(-1.0).is_nan());
        assert_eq!(Log10::forward(0.0), f64::NEG_INFINITY);
    }
}
