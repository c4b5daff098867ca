//! Irregular axes
//!
//! A [`VariableAxis`] stores its edges explicitly and resolves values by
//! binary search, so it only needs comparison on the value type. That makes
//! it the strategy for opaque user-defined ordered scalars, and for any grid
//! whose spacing is not constant.
//!
//! Variable axes are never extendable; the edge sequence must already cover
//! the flow bins (first and last bin), so at least four edges are required.

use crate::index::AxisIndex;
use crate::util::check_ascending;
use gridhist_core::{AxisValue, Error, Result};
use std::cmp::Ordering;

/// An axis with explicitly stored, strictly ascending edges
#[derive(Debug, Clone, PartialEq)]
pub struct VariableAxis<V: AxisValue> {
    edges: Vec<V>,
    label: Option<String>,
}

impl<V: AxisValue> VariableAxis<V> {
    /// Build from the full edge sequence, flow-bin boundaries included
    pub fn new(edges: Vec<V>) -> Result<Self> {
        if edges.len() < 4 {
            return Err(Error::too_few_edges(4, edges.len(), "a variable axis"));
        }
        check_ascending(&edges)?;
        Ok(Self { edges, label: None })
    }

    /// Attach a human-readable label
    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    pub fn label(&self) -> Option<&str> {
        self.label.as_deref()
    }

    /// Resolve a value to a storage bin by upper-bound binary search
    ///
    /// Values before the first edge resolve `Underflow`, values at or past
    /// the last edge resolve `Overflow`. A value incomparable to the edges
    /// (possible only for partially ordered user scalars) resolves
    /// `Underflow`.
    pub fn resolve(&self, value: &V) -> AxisIndex {
        // index of the first edge greater than the value
        let pos = self
            .edges
            .partition_point(|e| matches!(e.partial_cmp(value), Some(Ordering::Less | Ordering::Equal)));
        if pos == 0 {
            AxisIndex::Underflow
        } else if pos == self.edges.len() {
            AxisIndex::Overflow
        } else {
            AxisIndex::Bin(pos - 1)
        }
    }

    /// The stored edge sequence
    pub fn edges(&self) -> &[V] {
        &self.edges
    }

    /// Total storage bins, flow bins included
    pub fn n_bins(&self) -> usize {
        self.edges.len() - 1
    }

    /// Regular bins only
    pub fn n_regular(&self) -> usize {
        self.n_bins() - 2
    }

    /// Map a tagged position to its storage bin
    pub fn storage_index(&self, index: AxisIndex) -> Option<usize> {
        match index {
            AxisIndex::Bin(i) => (i < self.n_bins()).then_some(i),
            AxisIndex::Underflow => Some(0),
            AxisIndex::Overflow => Some(self.n_bins() - 1),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_resolve_by_search() {
        let axis = VariableAxis::new(vec![0.0, 2.0, 3.0, 10.0]).unwrap();
        assert_eq!(axis.n_bins(), 3);
        assert_eq!(axis.n_regular(), 1);

        assert_eq!(axis.resolve(&2.5), AxisIndex::Bin(1));
        assert_eq!(axis.resolve(&-1.0), AxisIndex::Underflow);
        assert_eq!(axis.resolve(&10.0), AxisIndex::Overflow);
        assert_eq!(axis.resolve(&0.0), AxisIndex::Bin(0));
        assert_eq!(axis.resolve(&9.99), AxisIndex::Bin(2));
    }

    #[test]
    fn test_lower_edge_inclusive() {
        let axis = VariableAxis::new(vec![1.0, 2.0, 4.0, 8.0, 16.0]).unwrap();
        assert_eq!(axis.resolve(&2.0), AxisIndex::Bin(1));
        assert_eq!(axis.resolve(&4.0), AxisIndex::Bin(2));
        assert_eq!(axis.resolve(&15.999), AxisIndex::Bin(3));
        assert_eq!(axis.resolve(&16.0), AxisIndex::Overflow);
    }

    #[test]
    fn test_construction_failures() {
        assert!(VariableAxis::new(vec![0.0, 1.0]).is_err());
        assert!(VariableAxis::new(vec![0.0, 1.0, 1.0, 2.0]).is_err());
        assert!(VariableAxis::new(vec![3.0, 2.0, 4.0, 5.0]).is_err());
    }

    #[test]
    fn test_opaque_ordered_scalar() {
        // comparison is the only capability this type offers
        #[derive(Debug, Clone, PartialEq, PartialOrd)]
        struct Version(u32, u32);

        let axis = VariableAxis::new(vec![
            Version(0, 0),
            Version(1, 0),
            Version(2, 0),
            Version(3, 0),
        ])
        .unwrap();

        assert_eq!(axis.resolve(&Version(1, 5)), AxisIndex::Bin(1));
        assert_eq!(axis.resolve(&Version(0, 0)), AxisIndex::Bin(0));
        assert_eq!(axis.resolve(&Version(9, 9)), AxisIndex::Overflow);
    }

    #[test]
    fn test_storage_index_mapping() {
        let axis = VariableAxis::new(vec![0.0, 2.0, 3.0, 10.0]).unwrap();
        assert_eq!(axis.storage_index(AxisIndex::Underflow), Some(0));
        assert_eq!(axis.storage_index(AxisIndex::Overflow), Some(2));
        assert_eq!(axis.storage_index(AxisIndex::Bin(1)), Some(1));
        assert_eq!(axis.storage_index(AxisIndex::Bin(3)), None);
    }

    proptest! {
        // Binary search agrees with a linear scan
        #[test]
        fn prop_search_matches_scan(value in -5.0..25.0f64) {
            let edges = vec![0.0, 1.0, 2.0, 4.0, 8.0, 16.0, 20.0];
            let axis = VariableAxis::new(edges.clone()).unwrap();

            let expected = if value < edges[0] {
                AxisIndex::Underflow
            } else if value >= *edges.last().unwrap() {
                AxisIndex::Overflow
            } else {
                let mut bin = 0;
                while value >= edges[bin + 1] {
                    bin += 1;
                }
                AxisIndex::Bin(bin)
            };
            prop_assert_eq!(axis.resolve(&value), expected);
        }
    }
}
