//! The per-bin aggregate record
//!
//! Every bin of a histogram stores three accumulators: the entry count, the
//! sum of weights, and the sum of squared weights. All bin mutation in the
//! engine goes through [`BinContent::fill`] and friends, which maintain the
//! invariant that a bin with zero entries carries zero sums.

use crate::num::Weight;
use std::fmt;

/// Aggregate content of a single histogram bin
///
/// `#[repr(C)]` keeps the field layout stable so persistence layers can rely
/// on the offsets published by [`BinContent::layout`].
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[repr(C)]
pub struct BinContent<W: Weight> {
    entries: u64,
    sum_w: W,
    sum_w2: W,
}

/// Field layout of a [`BinContent`] element, in bytes
///
/// Published so a persistence layer can read a raw bin buffer without
/// knowing the weight type at compile time. `weight_type` is advisory: it is
/// the compiler's name for `W` and is compared on load.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BinLayout {
    pub size: usize,
    pub entries_offset: usize,
    pub sum_w_offset: usize,
    pub sum_w2_offset: usize,
    pub weight_type: String,
}

impl<W: Weight> BinContent<W> {
    /// An empty bin
    pub fn zero() -> Self {
        Self {
            entries: 0,
            sum_w: W::zero(),
            sum_w2: W::zero(),
        }
    }

    /// Record one entry with the given weight
    pub fn fill(&mut self, weight: &W) {
        self.entries += 1;
        self.sum_w += weight.clone();
        self.sum_w2 += weight.clone() * weight.clone();
    }

    /// Add another bin's content field-wise
    pub fn merge(&mut self, other: &Self) {
        self.entries += other.entries;
        self.sum_w += other.sum_w.clone();
        self.sum_w2 += other.sum_w2.clone();
    }

    /// Multiply the weight sums by a factor
    ///
    /// The squared sum picks up the squared factor; the entry count is a
    /// plain event count and stays untouched.
    pub fn scale(&mut self, factor: &W) {
        self.sum_w = self.sum_w.clone() * factor.clone();
        self.sum_w2 = self.sum_w2.clone() * factor.clone() * factor.clone();
    }

    /// Reset to the empty state
    pub fn clear(&mut self) {
        *self = Self::zero();
    }

    /// Number of recorded entries
    pub fn entries(&self) -> u64 {
        self.entries
    }

    /// Sum of recorded weights
    pub fn sum_w(&self) -> &W {
        &self.sum_w
    }

    /// Sum of squared recorded weights
    pub fn sum_w2(&self) -> &W {
        &self.sum_w2
    }

    /// True when no entry has been recorded
    pub fn is_empty(&self) -> bool {
        self.entries == 0
    }

    /// Byte layout of one element of this type
    pub fn layout() -> BinLayout {
        BinLayout {
            size: std::mem::size_of::<Self>(),
            entries_offset: std::mem::offset_of!(Self, entries),
            sum_w_offset: std::mem::offset_of!(Self, sum_w),
            sum_w2_offset: std::mem::offset_of!(Self, sum_w2),
            weight_type: std::any::type_name::<W>().to_string(),
        }
    }
}

impl<W: Weight> Default for BinContent<W> {
    fn default() -> Self {
        Self::zero()
    }
}

impl<W: Weight> fmt::Display for BinContent<W> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} entries, sum_w={:?}, sum_w2={:?}",
            self.entries, self.sum_w, self.sum_w2
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_empty_bin_invariant() {
        let bin: BinContent<f64> = BinContent::zero();
        assert!(bin.is_empty());
        assert_eq!(bin.entries(), 0);
        assert_eq!(*bin.sum_w(), 0.0);
        assert_eq!(*bin.sum_w2(), 0.0);
        assert_eq!(bin, BinContent::default());
    }

    #[test]
    fn test_fill_accumulates() {
        let mut bin: BinContent<f64> = BinContent::zero();
        bin.fill(&2.0);
        bin.fill(&3.0);

        assert_eq!(bin.entries(), 2);
        assert_relative_eq!(*bin.sum_w(), 5.0);
        assert_relative_eq!(*bin.sum_w2(), 13.0);
    }

    #[test]
    fn test_integer_weights() {
        let mut bin: BinContent<u64> = BinContent::zero();
        bin.fill(&2);
        bin.fill(&2);
        assert_eq!(bin.entries(), 2);
        assert_eq!(*bin.sum_w(), 4);
        assert_eq!(*bin.sum_w2(), 8);
    }

    #[test]
    fn test_merge() {
        let mut a: BinContent<f64> = BinContent::zero();
        a.fill(&1.0);
        let mut b: BinContent<f64> = BinContent::zero();
        b.fill(&2.0);
        b.fill(&2.0);

        a.merge(&b);
        assert_eq!(a.entries(), 3);
        assert_relative_eq!(*a.sum_w(), 5.0);
        assert_relative_eq!(*a.sum_w2(), 9.0);
    }

    #[test]
    fn test_scale_leaves_entries() {
        let mut bin: BinContent<f64> = BinContent::zero();
        bin.fill(&2.0);
        bin.fill(&1.0);

        bin.scale(&3.0);
        assert_eq!(bin.entries(), 2);
        assert_relative_eq!(*bin.sum_w(), 9.0);
        // (4 + 1) * 9
        assert_relative_eq!(*bin.sum_w2(), 45.0);
    }

    #[test]
    fn test_clear() {
        let mut bin: BinContent<f64> = BinContent::zero();
        bin.fill(&5.0);
        bin.clear();
        assert!(bin.is_empty());
        assert_eq!(*bin.sum_w(), 0.0);
    }

    #[test]
    fn test_layout_offsets() {
        let layout = BinContent::<f64>::layout();
        assert_eq!(layout.entries_offset, 0);
        assert_eq!(layout.sum_w_offset, 8);
        assert_eq!(layout.sum_w2_offset, 16);
        assert_eq!(layout.size, 24);
        assert!(layout.weight_type.contains("f64"));

        let layout32 = BinContent::<f32>::layout();
        assert_eq!(layout32.sum_w_offset, 8);
        assert_eq!(layout32.sum_w2_offset, 12);
        assert_eq!(layout32.size, 16);
    }

    #[test]
    fn test_display() {
        let mut bin: BinContent<f64> = BinContent::zero();
        bin.fill(&1.5);
        let s = bin.to_string();
        assert!(s.contains("1 entries"));
        assert!(s.contains("1.5"));
    }
}
