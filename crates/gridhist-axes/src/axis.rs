//! Axis strategy dispatch
//!
//! [`Axis`] wraps the concrete axis strategies behind one enum so a histogram
//! can hold a heterogeneous set of axes in a plain `Vec`. Every operation
//! delegates to the wrapped strategy; irregular axes answer the
//! extension-related queries with their fixed "never grows" semantics.
//!
//! # Examples
//!
//! ```
//! use gridhist_axes::{Axis, AxisIndex};
//!
//! let axis = Axis::uniform(&[-1.0, 0.0, 1.0, 2.0, 3.0])?;
//! assert_eq!(axis.resolve(0.5), AxisIndex::Bin(1));
//! assert_eq!(axis.resolve(-0.5), AxisIndex::Bin(0));
//! # Ok::<(), gridhist_core::Error>(())
//! ```

use crate::index::AxisIndex;
use crate::uniform::{Log10Axis, UniformAxis};
use crate::variable::VariableAxis;
use gridhist_core::{Coordinate, Error, Result};
use std::fmt;

/// One axis of a histogram, any strategy
#[derive(Debug, Clone, PartialEq)]
pub enum Axis<T: Coordinate> {
    /// Constant bin width in natural units
    Uniform(UniformAxis<T>),
    /// Constant bin width in log10 space
    Log10(Log10Axis<T>),
    /// Explicitly stored, irregular edges
    Variable(VariableAxis<T>),
}

impl<T: Coordinate> Axis<T> {
    /// Bounded constant-width axis from a full edge sequence
    pub fn uniform(edges: &[T]) -> Result<Self> {
        Ok(Self::Uniform(UniformAxis::bounded(edges)?))
    }

    /// Extendable constant-width axis with spare-capacity margins
    pub fn uniform_extendable(
        edges: &[T],
        front_reserve: usize,
        back_reserve: usize,
    ) -> Result<Self> {
        Ok(Self::Uniform(UniformAxis::extendable(
            edges,
            front_reserve,
            back_reserve,
        )?))
    }

    /// Bounded axis with constant bin width in log10 space
    pub fn log10(edges: &[T]) -> Result<Self> {
        Ok(Self::Log10(Log10Axis::bounded(edges)?))
    }

    /// Extendable axis with constant bin width in log10 space
    pub fn log10_extendable(
        edges: &[T],
        front_reserve: usize,
        back_reserve: usize,
    ) -> Result<Self> {
        Ok(Self::Log10(Log10Axis::extendable(
            edges,
            front_reserve,
            back_reserve,
        )?))
    }

    /// Irregular axis from explicit edges
    pub fn variable(edges: Vec<T>) -> Result<Self> {
        Ok(Self::Variable(VariableAxis::new(edges)?))
    }

    /// Bounded axis covering `[start, stop]` with bins of width `width`
    ///
    /// The bin count is rounded up when `width` does not divide the range
    /// evenly, shrinking the actual width so the edges land exactly on
    /// `start` and `stop`. The flow bins are unbounded (infinite boundary
    /// edges), so no value is ever out of range. Mostly useful for float
    /// coordinates; integer coordinates truncate the generated edges.
    pub fn linear(start: f64, stop: f64, width: f64) -> Result<Self> {
        if !width.is_finite() || width <= 0.0 {
            return Err(Error::Construction(format!(
                "bin width must be positive and finite, got {width}"
            )));
        }
        if !start.is_finite() || !stop.is_finite() || stop <= start {
            return Err(Error::Construction(format!(
                "range [{start}, {stop}] must be finite and non-empty"
            )));
        }
        let n_edges = ((stop - start) / width).ceil() as usize + 1;
        let step = (stop - start) / (n_edges - 1) as f64;
        let mut edges = Vec::with_capacity(n_edges + 2);
        edges.push(T::from_f64(f64::NEG_INFINITY));
        for i in 0..n_edges - 1 {
            edges.push(T::from_f64(start + i as f64 * step));
        }
        edges.push(T::from_f64(stop));
        edges.push(T::from_f64(f64::INFINITY));
        Self::uniform(&edges)
    }

    /// Attach a human-readable label
    pub fn with_label(self, label: impl Into<String>) -> Self {
        match self {
            Axis::Uniform(axis) => Axis::Uniform(axis.with_label(label)),
            Axis::Log10(axis) => Axis::Log10(axis.with_label(label)),
            Axis::Variable(axis) => Axis::Variable(axis.with_label(label)),
        }
    }

    pub fn label(&self) -> Option<&str> {
        match self {
            Axis::Uniform(axis) => axis.label(),
            Axis::Log10(axis) => axis.label(),
            Axis::Variable(axis) => axis.label(),
        }
    }

    /// Resolve a value to a storage bin
    pub fn resolve(&self, value: T) -> AxisIndex {
        match self {
            Axis::Uniform(axis) => axis.resolve(value),
            Axis::Log10(axis) => axis.resolve(value),
            Axis::Variable(axis) => axis.resolve(&value),
        }
    }

    /// Number of bins an extension must add to cover `value`
    pub fn request_extension(&self, value: T, index: AxisIndex) -> isize {
        match self {
            Axis::Uniform(axis) => axis.request_extension(value, index),
            Axis::Log10(axis) => axis.request_extension(value, index),
            Axis::Variable(_) => 0,
        }
    }

    /// Signed raw bin offset of a value, ignoring current bounds
    ///
    /// `None` on irregular axes, which have no grid to project onto, and for
    /// values outside the transform domain of a transformed axis.
    pub fn unbounded_index(&self, value: T) -> Option<isize> {
        match self {
            Axis::Uniform(axis) => axis.unbounded_index(value),
            Axis::Log10(axis) => axis.unbounded_index(value),
            Axis::Variable(_) => None,
        }
    }

    /// Grow the axis by whole bins at the front and/or back
    ///
    /// # Panics
    ///
    /// Panics on a non-extendable axis.
    pub fn extend(&mut self, front: usize, back: usize) {
        match self {
            Axis::Uniform(axis) => axis.extend(front, back),
            Axis::Log10(axis) => axis.extend(front, back),
            Axis::Variable(_) => panic!("extend called on a non-extendable axis"),
        }
    }

    /// Materialize the edge sequence in natural units
    pub fn edges(&self) -> Vec<T> {
        match self {
            Axis::Uniform(axis) => axis.edges(),
            Axis::Log10(axis) => axis.edges(),
            Axis::Variable(axis) => axis.edges().to_vec(),
        }
    }

    /// Total storage bins, flow bins included
    pub fn n_bins(&self) -> usize {
        match self {
            Axis::Uniform(axis) => axis.n_bins(),
            Axis::Log10(axis) => axis.n_bins(),
            Axis::Variable(axis) => axis.n_bins(),
        }
    }

    /// Regular bins only
    pub fn n_regular(&self) -> usize {
        match self {
            Axis::Uniform(axis) => axis.n_regular(),
            Axis::Log10(axis) => axis.n_regular(),
            Axis::Variable(axis) => axis.n_regular(),
        }
    }

    pub fn is_extendable(&self) -> bool {
        match self {
            Axis::Uniform(axis) => axis.is_extendable(),
            Axis::Log10(axis) => axis.is_extendable(),
            Axis::Variable(_) => false,
        }
    }

    pub fn has_flow_bins(&self) -> bool {
        match self {
            Axis::Uniform(axis) => axis.has_flow_bins(),
            Axis::Log10(axis) => axis.has_flow_bins(),
            Axis::Variable(_) => true,
        }
    }

    /// Spare-capacity margins (zero unless extendable)
    pub fn reserve(&self) -> (usize, usize) {
        match self {
            Axis::Uniform(axis) => axis.reserve(),
            Axis::Log10(axis) => axis.reserve(),
            Axis::Variable(_) => (0, 0),
        }
    }

    /// Map a tagged position to its storage bin, if it has one
    pub fn storage_index(&self, index: AxisIndex) -> Option<usize> {
        match self {
            Axis::Uniform(axis) => axis.storage_index(index),
            Axis::Log10(axis) => axis.storage_index(index),
            Axis::Variable(axis) => axis.storage_index(index),
        }
    }

    /// Natural-unit width of every storage bin, flow bins included
    pub fn bin_widths(&self) -> Vec<f64> {
        self.edges()
            .windows(2)
            .map(|pair| Coordinate::to_f64(&pair[1]) - Coordinate::to_f64(&pair[0]))
            .collect()
    }

    /// Natural-unit midpoint of every storage bin
    pub fn bin_centers(&self) -> Vec<f64> {
        self.edges()
            .windows(2)
            .map(|pair| 0.5 * (Coordinate::to_f64(&pair[0]) + Coordinate::to_f64(&pair[1])))
            .collect()
    }
}

impl<T: Coordinate> fmt::Display for Axis<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let kind = match self {
            Axis::Uniform(_) => "uniform",
            Axis::Log10(_) => "log10",
            Axis::Variable(_) => "variable",
        };
        match self.label() {
            Some(label) => write!(f, "{} axis '{}' with {} bins", kind, label, self.n_bins()),
            None => write!(f, "{} axis with {} bins", kind, self.n_bins()),
        }
    }
}
