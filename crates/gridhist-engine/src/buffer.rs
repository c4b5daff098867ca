//! Deferred out-of-range fills
//!
//! A sample that misses the current range of an extendable axis cannot be
//! applied until the storage has grown. Instead of growing per sample, the
//! engine parks such samples here as signed raw bin offsets and replays the
//! whole batch after a single combined extension.
//!
//! A buffered sample mutates no bin until replay, so a failed growth leaves
//! the histogram untouched.

use gridhist_core::Weight;

/// Default number of parked samples that triggers an automatic flush
pub const DEFAULT_BUFFER_CAPACITY: usize = 65536;

/// One parked sample: per-axis signed raw bin offsets plus its weight
///
/// An offset is negative when the sample lies before the first bin of its
/// axis and `>= shape` when it lies past the last one.
#[derive(Debug, Clone, PartialEq)]
pub struct PendingFill<W: Weight> {
    pub offsets: Vec<isize>,
    pub weight: W,
}

/// Bounded batch of parked samples
#[derive(Debug, Clone)]
pub struct FillBuffer<W: Weight> {
    pending: Vec<PendingFill<W>>,
    capacity: usize,
}

impl<W: Weight> FillBuffer<W> {
    pub fn new(capacity: usize) -> Self {
        Self {
            pending: Vec::new(),
            capacity,
        }
    }

    /// Park a sample; `true` when the buffer has now reached capacity
    pub fn push(&mut self, offsets: Vec<isize>, weight: W) -> bool {
        self.pending.push(PendingFill { offsets, weight });
        self.pending.len() >= self.capacity
    }

    pub fn len(&self) -> usize {
        self.pending.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// The parked samples, oldest first
    pub fn entries(&self) -> &[PendingFill<W>] {
        &self.pending
    }

    pub fn clear(&mut self) {
        self.pending.clear();
    }

    /// Per-axis front/back extensions needed to cover every parked sample
    ///
    /// # Panics
    ///
    /// Panics when a parked sample's arity differs from `shape` (the engine
    /// never lets that happen).
    pub fn required_growth(&self, shape: &[usize]) -> (Vec<usize>, Vec<usize>) {
        let mut front = vec![0usize; shape.len()];
        let mut back = vec![0usize; shape.len()];
        for entry in &self.pending {
            assert_eq!(entry.offsets.len(), shape.len(), "parked sample arity");
            for (axis, &offset) in entry.offsets.iter().enumerate() {
                if offset < 0 {
                    front[axis] = front[axis].max(offset.unsigned_abs());
                } else if offset as usize >= shape[axis] {
                    back[axis] = back[axis].max(offset as usize - shape[axis] + 1);
                }
            }
        }
        (front, back)
    }
}

impl<W: Weight> Default for FillBuffer<W> {
    fn default() -> Self {
        Self::new(DEFAULT_BUFFER_CAPACITY)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_push_reports_capacity() {
        let mut buffer = FillBuffer::new(2);
        assert!(!buffer.push(vec![-1], 1.0));
        assert!(buffer.push(vec![5], 1.0));
        assert_eq!(buffer.len(), 2);
    }

    #[test]
    fn test_required_growth_takes_per_axis_maxima() {
        let mut buffer = FillBuffer::new(16);
        // shape is [4, 2]
        buffer.push(vec![-3, 0], 1.0);
        buffer.push(vec![-1, 5], 1.0);
        buffer.push(vec![6, -2], 1.0);
        buffer.push(vec![2, 1], 1.0);

        let (front, back) = buffer.required_growth(&[4, 2]);
        assert_eq!(front, vec![3, 2]);
        assert_eq!(back, vec![3, 4]);
    }

    #[test]
    fn test_in_range_offsets_need_no_growth() {
        let mut buffer = FillBuffer::new(16);
        buffer.push(vec![0, 1], 1.0);
        buffer.push(vec![3, 0], 1.0);
        let (front, back) = buffer.required_growth(&[4, 2]);
        assert_eq!(front, vec![0, 0]);
        assert_eq!(back, vec![0, 0]);
    }

    #[test]
    fn test_clear() {
        let mut buffer = FillBuffer::<f64>::new(4);
        buffer.push(vec![-1], 2.0);
        assert!(!buffer.is_empty());
        buffer.clear();
        assert!(buffer.is_empty());
        assert_eq!(buffer.capacity(), 4);
    }

    #[test]
    fn test_entries_keep_order_and_weights() {
        let mut buffer = FillBuffer::new(8);
        buffer.push(vec![-1], 0.5);
        buffer.push(vec![7], 2.5);
        let entries = buffer.entries();
        assert_eq!(entries[0].offsets, vec![-1]);
        assert_eq!(entries[0].weight, 0.5);
        assert_eq!(entries[1].offsets, vec![7]);
        assert_eq!(entries[1].weight, 2.5);
    }
}
