//! Tagged per-axis bin index
//!
//! Replaces out-of-range sentinel integers with an explicit tagged type. The
//! derived ordering puts `Underflow` below every real bin and `Overflow`
//! above, so resolution results compare the way the underlying values do.

use std::fmt;

/// Position along a single axis
///
/// Used in two places with one meaning, "where along the axis":
///
/// - as the result of axis resolution, where `Bin(i)` is a placeable storage
///   index and `Underflow`/`Overflow` mean the value lies beyond what the
///   axis can store today;
/// - as a grid-cursor coordinate, where `Underflow`/`Overflow` name the
///   dedicated flow bins of a non-extendable axis (and empty slots on an
///   extendable one).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum AxisIndex {
    /// Before the first storable bin
    Underflow,
    /// A storage bin index
    Bin(usize),
    /// Past the last storable bin
    Overflow,
}

impl AxisIndex {
    /// True for `Bin(_)`
    pub fn is_bin(&self) -> bool {
        matches!(self, AxisIndex::Bin(_))
    }

    /// True for `Underflow` or `Overflow`
    pub fn is_out_of_range(&self) -> bool {
        !self.is_bin()
    }

    /// The storage index, if this is a real bin
    pub fn bin(&self) -> Option<usize> {
        match self {
            AxisIndex::Bin(i) => Some(*i),
            _ => None,
        }
    }
}

impl fmt::Display for AxisIndex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AxisIndex::Underflow => write!(f, "underflow"),
            AxisIndex::Bin(i) => write!(f, "bin {i}"),
            AxisIndex::Overflow => write!(f, "overflow"),
        }
    }
}
