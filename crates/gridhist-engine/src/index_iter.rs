//! Odometer cursors over the bin grid
//!
//! Two restartable cursors drive every whole-grid walk in the engine, both
//! advancing the rightmost floating axis fastest:
//!
//! - [`FullIndexIter`] walks tagged positions ([`AxisIndex`]) including the
//!   synthetic underflow/overflow slots at each end of every axis. On an axis
//!   that owns flow bins those slots alias its first and last storage bins,
//!   so every storage bin appears exactly once; on an extendable axis they
//!   are empty markers with no storage behind them.
//! - [`RangeIndexIter`] walks plain storage indices over per-axis sub-ranges.
//!
//! Dereferencing a cursor after it is exhausted is a programming error and
//! panics. Neither cursor can outlive a storage mutation: both borrow
//! nothing, but the engine only hands out bin references one position at a
//! time.

use gridhist_axes::AxisIndex;
use std::ops::Range;

/// Slot metadata of one axis: how many storage bins, and whether the outer
/// two are flow bins
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SlotSpec {
    n_bins: usize,
    has_flow_bins: bool,
}

impl SlotSpec {
    pub fn new(n_bins: usize, has_flow_bins: bool) -> Self {
        Self {
            n_bins,
            has_flow_bins,
        }
    }

    /// Tagged positions this axis contributes to a full-domain walk
    fn n_slots(&self) -> usize {
        if self.has_flow_bins {
            self.n_bins
        } else {
            self.n_bins + 2
        }
    }

    /// Tagged position at a slot offset
    fn slot(&self, position: usize) -> AxisIndex {
        if self.has_flow_bins {
            if position == 0 {
                AxisIndex::Underflow
            } else if position == self.n_bins - 1 {
                AxisIndex::Overflow
            } else {
                AxisIndex::Bin(position)
            }
        } else if position == 0 {
            AxisIndex::Underflow
        } else if position == self.n_bins + 1 {
            AxisIndex::Overflow
        } else {
            AxisIndex::Bin(position - 1)
        }
    }
}

/// Cursor over the full tagged domain, flow slots included
#[derive(Debug, Clone)]
pub struct FullIndexIter {
    axes: Vec<SlotSpec>,
    fixed: Vec<Option<AxisIndex>>,
    position: Vec<usize>,
    current: Vec<AxisIndex>,
    exhausted: bool,
}

impl FullIndexIter {
    /// Cursor positioned on the first combination
    pub fn new(axes: Vec<SlotSpec>) -> Self {
        let n = axes.len();
        let mut iter = Self {
            axes,
            fixed: vec![None; n],
            position: vec![0; n],
            current: vec![AxisIndex::Underflow; n],
            exhausted: false,
        };
        iter.reset();
        iter
    }

    /// Pin one axis to a single tagged position
    ///
    /// # Panics
    ///
    /// Panics when `axis` is out of range.
    pub fn fix(mut self, axis: usize, index: AxisIndex) -> Self {
        assert!(
            axis < self.axes.len(),
            "axis {} out of range for {} axes",
            axis,
            self.axes.len()
        );
        self.fixed[axis] = Some(index);
        self.reset();
        self
    }

    /// Rewind to the first combination
    pub fn reset(&mut self) {
        self.exhausted = false;
        for axis in 0..self.axes.len() {
            self.position[axis] = 0;
            self.current[axis] = match self.fixed[axis] {
                Some(index) => index,
                None => self.axes[axis].slot(0),
            };
        }
    }

    /// The combination under the cursor
    ///
    /// # Panics
    ///
    /// Panics when the cursor has run past the last combination.
    pub fn current(&self) -> &[AxisIndex] {
        assert!(!self.exhausted, "index cursor dereferenced past the end");
        &self.current
    }

    /// Step to the next combination; `false` once all are consumed
    pub fn advance(&mut self) -> bool {
        if self.exhausted {
            return false;
        }
        let mut axis = self.axes.len();
        while axis > 0 {
            axis -= 1;
            if self.fixed[axis].is_some() {
                continue;
            }
            self.position[axis] += 1;
            if self.position[axis] < self.axes[axis].n_slots() {
                self.current[axis] = self.axes[axis].slot(self.position[axis]);
                return true;
            }
            self.position[axis] = 0;
            self.current[axis] = self.axes[axis].slot(0);
        }
        self.exhausted = true;
        false
    }

    pub fn is_exhausted(&self) -> bool {
        self.exhausted
    }
}

/// Cursor over plain storage indices within per-axis sub-ranges
#[derive(Debug, Clone)]
pub struct RangeIndexIter {
    ranges: Vec<Range<usize>>,
    current: Vec<usize>,
    exhausted: bool,
}

impl RangeIndexIter {
    /// Cursor over the whole `[0, shape)` region
    pub fn new(shape: &[usize]) -> Self {
        let ranges: Vec<Range<usize>> = shape.iter().map(|&n| 0..n).collect();
        let current = ranges.iter().map(|r| r.start).collect();
        let exhausted = ranges.iter().any(|r| r.is_empty());
        Self {
            ranges,
            current,
            exhausted,
        }
    }

    /// Restrict one axis to `[min, max)`
    ///
    /// # Panics
    ///
    /// Panics when `axis` is out of range or the range is inverted or
    /// reaches past the axis's current extent.
    pub fn with_range(mut self, axis: usize, min: usize, max: usize) -> Self {
        assert!(
            axis < self.ranges.len(),
            "axis {} out of range for {} axes",
            axis,
            self.ranges.len()
        );
        assert!(
            min <= max && max <= self.ranges[axis].end,
            "range [{}, {}) invalid for axis {} with {} bins",
            min,
            max,
            axis,
            self.ranges[axis].end
        );
        self.ranges[axis] = min..max;
        self.reset();
        self
    }

    /// Pin one axis to a single storage bin
    pub fn fix(self, axis: usize, bin: usize) -> Self {
        self.with_range(axis, bin, bin + 1)
    }

    /// Rewind to the first index
    pub fn reset(&mut self) {
        for axis in 0..self.ranges.len() {
            self.current[axis] = self.ranges[axis].start;
        }
        self.exhausted = self.ranges.iter().any(|r| r.is_empty());
    }

    /// The index under the cursor
    ///
    /// # Panics
    ///
    /// Panics when the cursor has run past the last index.
    pub fn current(&self) -> &[usize] {
        assert!(!self.exhausted, "index cursor dereferenced past the end");
        &self.current
    }

    /// Step to the next index; `false` once all are consumed
    pub fn advance(&mut self) -> bool {
        if self.exhausted {
            return false;
        }
        let mut axis = self.ranges.len();
        while axis > 0 {
            axis -= 1;
            self.current[axis] += 1;
            if self.current[axis] < self.ranges[axis].end {
                return true;
            }
            self.current[axis] = self.ranges[axis].start;
        }
        self.exhausted = true;
        false
    }

    pub fn is_exhausted(&self) -> bool {
        self.exhausted
    }
}
