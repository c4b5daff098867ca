//! The histogram fill engine
//!
//! [`Histogram`] ties the axis strategies to the growable storage: it
//! resolves samples, applies in-range fills directly, parks out-of-range
//! samples for extendable axes in the fill buffer, and replays them after a
//! single combined growth.
//!
//! # Design Philosophy
//!
//! - **Deferred growth**: an out-of-range sample on an extendable axis never
//!   grows the storage by itself. It is buffered as raw signed offsets, and
//!   one flush later the storage grows once to cover the whole batch.
//! - **All-or-nothing**: a fill either updates exactly one bin or (on a
//!   failed growth during flush) leaves every bin untouched.
//! - **Reads see flushed state**: accessors and reading operations do not
//!   include pending buffered samples; call [`Histogram::flush`] first when
//!   that matters.
//!
//! # Examples
//!
//! ```
//! use gridhist_axes::Axis;
//! use gridhist_engine::Histogram;
//!
//! let mut hist: Histogram = Histogram::new(vec![
//!     Axis::uniform(&[f64::NEG_INFINITY, 0.0, 1.0, 2.0, f64::INFINITY])?,
//! ])?;
//! hist.fill(&[0.5])?;
//! hist.fill_weighted(&[1.5], 2.0)?;
//! assert_eq!(hist.total_entries(), 2);
//! assert_eq!(*hist.get_bin(&[2]).sum_w(), 2.0);
//! # Ok::<(), gridhist_core::Error>(())
//! ```

use crate::buffer::{FillBuffer, DEFAULT_BUFFER_CAPACITY};
use crate::index_iter::{FullIndexIter, RangeIndexIter, SlotSpec};
use crate::snapshot::{AxisSpec, Snapshot};
use crate::storage::GridStorage;
use gridhist_axes::{Axis, AxisIndex};
use gridhist_core::{BinContent, Coordinate, Error, Result, Weight};
use log::{debug, trace};

/// An n-dimensional histogram with lazily growable axes
#[derive(Debug, Clone)]
pub struct Histogram<T: Coordinate = f64, W: Weight = f64> {
    axes: Vec<Axis<T>>,
    storage: GridStorage<W>,
    buffer: FillBuffer<W>,
    scratch_indices: Vec<AxisIndex>,
    scratch_bins: Vec<usize>,
}

impl<T: Coordinate, W: Weight> Histogram<T, W> {
    /// Build a histogram over the given axes
    ///
    /// Storage is allocated for every axis's current bins plus its reserve
    /// margins, so early extensions are bookkeeping only.
    pub fn new(axes: Vec<Axis<T>>) -> Result<Self> {
        Self::with_buffer_capacity(axes, DEFAULT_BUFFER_CAPACITY)
    }

    /// Same as [`Histogram::new`] with a custom fill-buffer capacity
    pub fn with_buffer_capacity(axes: Vec<Axis<T>>, capacity: usize) -> Result<Self> {
        if axes.is_empty() {
            return Err(Error::Construction(
                "a histogram needs at least one axis".to_string(),
            ));
        }
        let shape: Vec<usize> = axes.iter().map(|a| a.n_bins()).collect();
        let front: Vec<usize> = axes.iter().map(|a| a.reserve().0).collect();
        let back: Vec<usize> = axes.iter().map(|a| a.reserve().1).collect();
        let storage = GridStorage::new(&shape, &front, &back)?;
        Ok(Self {
            axes,
            storage,
            buffer: FillBuffer::new(capacity),
            scratch_indices: Vec::new(),
            scratch_bins: Vec::new(),
        })
    }

    pub fn n_axes(&self) -> usize {
        self.axes.len()
    }

    /// # Panics
    ///
    /// Panics when `axis` is out of range.
    pub fn axis(&self, axis: usize) -> &Axis<T> {
        &self.axes[axis]
    }

    pub fn axes(&self) -> &[Axis<T>] {
        &self.axes
    }

    /// Storage bins per axis, flow bins included
    pub fn shape(&self) -> &[usize] {
        self.storage.shape()
    }

    /// Samples parked in the fill buffer, waiting for the next flush
    pub fn pending_fills(&self) -> usize {
        self.buffer.len()
    }

    /// Entries recorded across all bins (pending buffered samples excluded)
    pub fn total_entries(&self) -> u64 {
        self.storage.as_slice().iter().map(|b| b.entries()).sum()
    }

    /// True when nothing has been recorded and nothing is pending
    pub fn is_empty(&self) -> bool {
        self.buffer.is_empty() && self.total_entries() == 0
    }

    /// Record a sample with unit weight
    pub fn fill(&mut self, sample: &[T]) -> Result<()> {
        self.fill_weighted(sample, W::one())
    }

    /// Record a sample with an explicit weight
    ///
    /// A sample beyond the bounds of a non-extendable axis is dropped; a
    /// sample out of range only on extendable axes is buffered and applied
    /// on the next flush. Errors never mutate a bin.
    pub fn fill_weighted(&mut self, sample: &[T], weight: W) -> Result<()> {
        if sample.len() != self.axes.len() {
            return Err(Error::shape_mismatch(
                self.axes.len(),
                sample.len(),
                "sample",
            ));
        }
        for (axis_no, value) in sample.iter().enumerate() {
            if !value.is_finite() {
                return Err(Error::non_finite(axis_no));
            }
        }

        self.scratch_indices.clear();
        for (axis, &value) in self.axes.iter().zip(sample) {
            self.scratch_indices.push(axis.resolve(value));
        }

        // fast path: everything in range
        self.scratch_bins.clear();
        for index in &self.scratch_indices {
            if let AxisIndex::Bin(bin) = index {
                self.scratch_bins.push(*bin);
            }
        }
        if self.scratch_bins.len() == self.axes.len() {
            self.storage.get_mut(&self.scratch_bins).fill(&weight);
            return Ok(());
        }

        // out of range on a non-extendable axis: nowhere to put it
        for (axis_no, (axis, index)) in self.axes.iter().zip(&self.scratch_indices).enumerate() {
            if index.is_out_of_range() && !axis.is_extendable() {
                trace!("dropped sample beyond the bounds of axis {axis_no}");
                return Ok(());
            }
        }

        let mut offsets = Vec::with_capacity(self.axes.len());
        for (axis_no, ((axis, index), &value)) in self
            .axes
            .iter()
            .zip(&self.scratch_indices)
            .zip(sample)
            .enumerate()
        {
            match index {
                AxisIndex::Bin(bin) => offsets.push(*bin as isize),
                _ => match axis.unbounded_index(value) {
                    Some(raw) => offsets.push(raw),
                    None => {
                        trace!("dropped sample outside the transform domain of axis {axis_no}");
                        return Ok(());
                    }
                },
            }
        }

        if self.buffer.push(offsets, weight) {
            trace!("fill buffer reached capacity, flushing");
            self.flush()?;
        } else {
            trace!("buffered out-of-range sample ({} pending)", self.buffer.len());
        }
        Ok(())
    }

    /// Grow to cover every buffered sample and replay the batch
    ///
    /// On a failed growth the buffer is kept and no bin changes.
    pub fn flush(&mut self) -> Result<()> {
        if self.buffer.is_empty() {
            return Ok(());
        }
        let (front, back) = self.buffer.required_growth(self.storage.shape());
        let front_reserve: Vec<usize> = self.axes.iter().map(|a| a.reserve().0).collect();
        let back_reserve: Vec<usize> = self.axes.iter().map(|a| a.reserve().1).collect();
        self.storage
            .grow(&front, &back, &front_reserve, &back_reserve)?;
        for (axis_no, axis) in self.axes.iter_mut().enumerate() {
            if front[axis_no] > 0 || back[axis_no] > 0 {
                axis.extend(front[axis_no], back[axis_no]);
                debug!(
                    "extended axis {} by {} front / {} back bins",
                    axis_no, front[axis_no], back[axis_no]
                );
            }
        }

        let storage = &mut self.storage;
        let scratch = &mut self.scratch_bins;
        for entry in self.buffer.entries() {
            scratch.clear();
            for (axis_no, &offset) in entry.offsets.iter().enumerate() {
                scratch.push((front[axis_no] as isize + offset) as usize);
            }
            storage.get_mut(scratch).fill(&entry.weight);
        }
        trace!("replayed {} buffered fills", self.buffer.len());
        self.buffer.clear();
        Ok(())
    }

    /// Direct storage access by multi-index
    ///
    /// # Panics
    ///
    /// Panics when the index is outside the current shape.
    pub fn get_bin(&self, idx: &[usize]) -> &BinContent<W> {
        self.storage.get(idx)
    }

    /// Iterate `(index, bin)` over the whole logical region
    pub fn bins(&self) -> Bins<'_, W> {
        Bins {
            storage: &self.storage,
            iter: RangeIndexIter::new(self.storage.shape()),
            done: false,
        }
    }

    /// Reduce to a subset of axes, summing over the dropped ones
    ///
    /// The subset is sorted ascending; flow bins are summed like any other
    /// storage bin. Pending buffered samples are not included.
    pub fn project(&self, keep: &[usize]) -> Result<Histogram<T, W>> {
        if keep.is_empty() {
            return Err(Error::Construction(
                "projection needs at least one axis".to_string(),
            ));
        }
        let mut kept = keep.to_vec();
        kept.sort_unstable();
        for &axis in &kept {
            if axis >= self.axes.len() {
                return Err(Error::axis_out_of_range(axis, self.axes.len()));
            }
        }
        if kept.windows(2).any(|pair| pair[0] == pair[1]) {
            return Err(Error::IndexingFault(
                "projection axes contain a duplicate".to_string(),
            ));
        }

        let axes: Vec<Axis<T>> = kept.iter().map(|&a| self.axes[a].clone()).collect();
        let mut projected = Histogram::with_buffer_capacity(axes, self.buffer.capacity())?;
        let mut iter = RangeIndexIter::new(self.storage.shape());
        let mut dest = vec![0usize; kept.len()];
        loop {
            let src = iter.current();
            for (k, &a) in kept.iter().enumerate() {
                dest[k] = src[a];
            }
            projected.storage.get_mut(&dest).merge(self.storage.get(src));
            if !iter.advance() {
                break;
            }
        }
        Ok(projected)
    }

    /// True when every axis of `other` has the same edges and extendability
    pub fn is_compatible(&self, other: &Self) -> bool {
        self.axes.len() == other.axes.len()
            && self
                .axes
                .iter()
                .zip(&other.axes)
                .all(|(a, b)| a.is_extendable() == b.is_extendable() && a.edges() == b.edges())
    }

    /// Add another histogram's content bin-wise
    ///
    /// Both histograms are flushed first; they must be compatible.
    pub fn merge(&mut self, other: &mut Self) -> Result<()> {
        self.flush()?;
        other.flush()?;
        if !self.is_compatible(other) {
            return Err(Error::Construction(
                "histograms are not compatible (axis count or edges differ)".to_string(),
            ));
        }
        let mut iter = RangeIndexIter::new(self.storage.shape());
        loop {
            let idx = iter.current();
            self.storage.get_mut(idx).merge(other.storage.get(idx));
            if !iter.advance() {
                break;
            }
        }
        Ok(())
    }

    /// Multiply every bin's weight sums by a factor
    ///
    /// Entry counts stay untouched, as do pending buffered samples; flush
    /// first when those should be scaled too.
    pub fn scale(&mut self, factor: W) {
        let mut iter = RangeIndexIter::new(self.storage.shape());
        loop {
            let idx = iter.current();
            self.storage.get_mut(idx).scale(&factor);
            if !iter.advance() {
                break;
            }
        }
    }

    /// Zero every bin and drop pending buffered samples, keeping the axes
    pub fn clear(&mut self) {
        self.storage.clear();
        self.buffer.clear();
    }

    /// A fresh zeroed histogram with the same axes and buffer capacity
    pub fn empty_like(&self) -> Result<Self> {
        Self::with_buffer_capacity(self.axes.clone(), self.buffer.capacity())
    }

    /// Coalesce groups of `group` adjacent regular bins on one axis
    ///
    /// The regular bin count must divide evenly into groups; flow bins stay
    /// flow bins. Flushes first, then returns the regrouped histogram.
    pub fn merge_axis_bins(&mut self, axis: usize, group: usize) -> Result<Histogram<T, W>> {
        if axis >= self.axes.len() {
            return Err(Error::axis_out_of_range(axis, self.axes.len()));
        }
        if group == 0 {
            return Err(Error::Construction(
                "bin group size must be at least 1".to_string(),
            ));
        }
        self.flush()?;

        let n_regular = self.axes[axis].n_regular();
        if n_regular % group != 0 {
            return Err(Error::Construction(format!(
                "axis {axis} has {n_regular} regular bins, not divisible into groups of {group}"
            )));
        }

        let spec = AxisSpec::from_axis(&self.axes[axis]);
        let has_flows = self.axes[axis].has_flow_bins();
        let mut edges = Vec::with_capacity(n_regular / group + 3);
        if has_flows {
            edges.push(spec.edges[0]);
            for k in 0..=n_regular / group {
                edges.push(spec.edges[1 + k * group]);
            }
            edges.push(spec.edges[spec.edges.len() - 1]);
        } else {
            for k in 0..=n_regular / group {
                edges.push(spec.edges[k * group]);
            }
        }
        let grouped = AxisSpec {
            kind: spec.kind,
            edges,
            front_reserve: spec.front_reserve,
            back_reserve: spec.back_reserve,
            label: spec.label.clone(),
        }
        .to_axis()?;

        let mut axes = self.axes.clone();
        axes[axis] = grouped;
        let mut merged = Histogram::with_buffer_capacity(axes, self.buffer.capacity())?;

        let src_last = self.storage.shape()[axis] - 1;
        let dest_last = merged.storage.shape()[axis] - 1;
        let mut iter = RangeIndexIter::new(self.storage.shape());
        let mut dest = vec![0usize; self.axes.len()];
        loop {
            let src = iter.current();
            dest.copy_from_slice(src);
            dest[axis] = if has_flows {
                if src[axis] == 0 {
                    0
                } else if src[axis] == src_last {
                    dest_last
                } else {
                    1 + (src[axis] - 1) / group
                }
            } else {
                src[axis] / group
            };
            merged.storage.get_mut(&dest).merge(self.storage.get(src));
            if !iter.advance() {
                break;
            }
        }
        Ok(merged)
    }

    /// Everything recorded below the first regular bin of one axis
    ///
    /// Sums that axis's underflow bin over the full domain of the other
    /// axes, their flow bins included. Zero for extendable axes, which store
    /// nothing out of range.
    ///
    /// # Panics
    ///
    /// Panics when `axis` is out of range.
    pub fn underflow(&self, axis: usize) -> BinContent<W> {
        self.flow_total(axis, AxisIndex::Underflow)
    }

    /// Everything recorded at or above the last regular bin edge of one axis
    ///
    /// # Panics
    ///
    /// Panics when `axis` is out of range.
    pub fn overflow(&self, axis: usize) -> BinContent<W> {
        self.flow_total(axis, AxisIndex::Overflow)
    }

    fn flow_total(&self, axis: usize, slot: AxisIndex) -> BinContent<W> {
        assert!(
            axis < self.axes.len(),
            "axis {} out of range for {} axes",
            axis,
            self.axes.len()
        );
        if !self.axes[axis].has_flow_bins() {
            return BinContent::zero();
        }
        let slots: Vec<SlotSpec> = self
            .axes
            .iter()
            .map(|a| SlotSpec::new(a.n_bins(), a.has_flow_bins()))
            .collect();
        let mut iter = FullIndexIter::new(slots).fix(axis, slot);
        let mut position = Vec::with_capacity(self.axes.len());
        let mut total = BinContent::zero();
        loop {
            if self.storage_position(iter.current(), &mut position) {
                total.merge(self.storage.get(&position));
            }
            if !iter.advance() {
                break;
            }
        }
        total
    }

    /// Map tagged positions to storage bins; `false` when any position is an
    /// empty flow slot of an extendable axis
    fn storage_position(&self, tagged: &[AxisIndex], out: &mut Vec<usize>) -> bool {
        out.clear();
        for (axis, &index) in self.axes.iter().zip(tagged) {
            match axis.storage_index(index) {
                Some(bin) => out.push(bin),
                None => return false,
            }
        }
        true
    }

    /// Capture the complete current state (pending buffered samples are not
    /// included; flush first to capture them)
    pub fn snapshot(&self) -> Snapshot<T, W> {
        let mut bins = Vec::with_capacity(self.storage.shape().iter().product());
        let mut iter = RangeIndexIter::new(self.storage.shape());
        loop {
            bins.push(self.storage.get(iter.current()).clone());
            if !iter.advance() {
                break;
            }
        }
        Snapshot {
            axes: self.axes.iter().map(AxisSpec::from_axis).collect(),
            layout: BinContent::<W>::layout(),
            shape: self.storage.shape().to_vec(),
            bins,
        }
    }

    /// Rebuild a histogram from a captured state
    ///
    /// The bin layout must match the current weight type and the shape must
    /// agree with the axis specs.
    pub fn from_snapshot(snapshot: &Snapshot<T, W>) -> Result<Self> {
        let expected = BinContent::<W>::layout();
        if snapshot.layout != expected {
            return Err(Error::TypeMismatch {
                expected: format!("{} ({} bytes)", expected.weight_type, expected.size),
                actual: format!(
                    "{} ({} bytes)",
                    snapshot.layout.weight_type, snapshot.layout.size
                ),
            });
        }
        if snapshot.shape.len() != snapshot.axes.len() {
            return Err(Error::shape_mismatch(
                snapshot.axes.len(),
                snapshot.shape.len(),
                "snapshot shape",
            ));
        }
        let axes: Vec<Axis<T>> = snapshot
            .axes
            .iter()
            .map(|spec| spec.to_axis())
            .collect::<Result<_>>()?;
        for (axis_no, axis) in axes.iter().enumerate() {
            if axis.n_bins() != snapshot.shape[axis_no] {
                return Err(Error::shape_mismatch(
                    axis.n_bins(),
                    snapshot.shape[axis_no],
                    &format!("snapshot axis {axis_no}"),
                ));
            }
        }
        if snapshot.bins.len() != snapshot.n_bins() {
            return Err(Error::shape_mismatch(
                snapshot.n_bins(),
                snapshot.bins.len(),
                "snapshot bin count",
            ));
        }

        let mut hist = Histogram::new(axes)?;
        let mut iter = RangeIndexIter::new(&snapshot.shape);
        for bin in &snapshot.bins {
            *hist.storage.get_mut(iter.current()) = bin.clone();
            iter.advance();
        }
        Ok(hist)
    }
}

/// Iterator over `(index, bin)` pairs of the logical region
pub struct Bins<'a, W: Weight> {
    storage: &'a GridStorage<W>,
    iter: RangeIndexIter,
    done: bool,
}

impl<'a, W: Weight> Iterator for Bins<'a, W> {
    type Item = (Vec<usize>, &'a BinContent<W>);

    fn next(&mut self) -> Option<Self::Item> {
        if self.done || self.iter.is_exhausted() {
            return None;
        }
        let idx = self.iter.current().to_vec();
        let bin = self.storage.get(&idx);
        if !self.iter.advance() {
            self.done = true;
        }
        Some((idx, bin))
    }
}
