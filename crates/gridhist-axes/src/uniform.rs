//! Constant-bin-width axes
//!
//! A [`UniformAxis`] resolves values arithmetically: `floor((t - min) / width)`
//! where `t` is the (optionally transformed) value and `min`/`width` describe
//! the regular grid in transform space. It comes in two modes:
//!
//! - **bounded**: constructed from at least four edges; the first and last
//!   bins are the dedicated underflow/overflow bins, whose widths are set by
//!   the outer edges and may differ from the regular width. Values inside
//!   them resolve by edge comparison, not by the width formula.
//! - **extendable**: constructed from at least two edges, no flow bins; values
//!   beyond the current range resolve `Underflow`/`Overflow` and the axis can
//!   grow to cover them.

use crate::index::AxisIndex;
use crate::transform::{Identity, Log10, ValueTransform};
use crate::util::{check_ascending, SPACING_TOL};
use gridhist_core::{Coordinate, Error, Result};
use std::marker::PhantomData;

/// A constant-bin-width axis, optionally value-transformed
#[derive(Debug, Clone, PartialEq)]
pub struct UniformAxis<T: Coordinate, F: ValueTransform = Identity> {
    n_bins: usize,
    /// Lower edge of the first regular bin, in transform space
    min: f64,
    /// Regular bin width, in transform space
    width: f64,
    mode: Mode<T>,
    label: Option<String>,
    _transform: PhantomData<F>,
}

/// Base-10 logarithmic constant-width axis
pub type Log10Axis<T> = UniformAxis<T, Log10>;

#[derive(Debug, Clone, PartialEq)]
enum Mode<T> {
    Extendable {
        front_reserve: usize,
        back_reserve: usize,
    },
    Bounded {
        underflow_edge: T,
        overflow_edge: T,
        /// Lower edge of the first regular bin in natural units, kept verbatim
        regular_min: f64,
    },
}

impl<T: Coordinate, F: ValueTransform> UniformAxis<T, F> {
    /// Build a non-extendable axis from a full edge sequence
    ///
    /// The first and last edges bound the flow bins; the interior edges must
    /// be uniformly spaced under the transform.
    pub fn bounded(edges: &[T]) -> Result<Self> {
        if edges.len() < 4 {
            return Err(Error::too_few_edges(
                4,
                edges.len(),
                "a bounded constant-width axis",
            ));
        }
        check_ascending(edges)?;
        let regular = &edges[1..edges.len() - 1];
        let (min, width) = regular_grid::<T, F>(regular)?;
        Ok(Self {
            n_bins: edges.len() - 1,
            min,
            width,
            mode: Mode::Bounded {
                underflow_edge: edges[0],
                overflow_edge: edges[edges.len() - 1],
                regular_min: Coordinate::to_f64(&edges[1]),
            },
            label: None,
            _transform: PhantomData,
        })
    }

    /// Build an extendable axis from its initial edge sequence
    ///
    /// The reserves are the spare-capacity margins the storage keeps on this
    /// axis so repeated extensions stay cheap.
    pub fn extendable(edges: &[T], front_reserve: usize, back_reserve: usize) -> Result<Self> {
        if edges.len() < 2 {
            return Err(Error::too_few_edges(
                2,
                edges.len(),
                "an extendable constant-width axis",
            ));
        }
        check_ascending(edges)?;
        let (min, width) = regular_grid::<T, F>(edges)?;
        Ok(Self {
            n_bins: edges.len() - 1,
            min,
            width,
            mode: Mode::Extendable {
                front_reserve,
                back_reserve,
            },
            label: None,
            _transform: PhantomData,
        })
    }

    /// Attach a human-readable label
    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    pub fn label(&self) -> Option<&str> {
        self.label.as_deref()
    }

    /// Resolve a value to a storage bin
    ///
    /// On a bounded axis the flow bins are real storage (`Bin(0)` and
    /// `Bin(n_bins - 1)`); `Underflow`/`Overflow` mean the value lies beyond
    /// even those. On an extendable axis they mean the axis would have to
    /// grow.
    pub fn resolve(&self, value: T) -> AxisIndex {
        let v = Coordinate::to_f64(&value);
        if v.is_nan() {
            return AxisIndex::Underflow;
        }
        match &self.mode {
            Mode::Bounded {
                underflow_edge,
                overflow_edge,
                regular_min,
            } => {
                if v < Coordinate::to_f64(underflow_edge) {
                    return AxisIndex::Underflow;
                }
                if v >= Coordinate::to_f64(overflow_edge) {
                    return AxisIndex::Overflow;
                }
                if v < *regular_min {
                    return AxisIndex::Bin(0);
                }
                let t = F::forward(v);
                let raw = ((t - self.min) / self.width).floor() as usize;
                if raw < self.n_bins - 2 {
                    AxisIndex::Bin(raw + 1)
                } else {
                    AxisIndex::Bin(self.n_bins - 1)
                }
            }
            Mode::Extendable { .. } => {
                let t = F::forward(v);
                if t.is_nan() || t < self.min {
                    return AxisIndex::Underflow;
                }
                let raw = ((t - self.min) / self.width).floor() as usize;
                if raw >= self.n_bins {
                    AxisIndex::Overflow
                } else {
                    AxisIndex::Bin(raw)
                }
            }
        }
    }

    /// Signed raw bin offset of a value, ignoring the current bounds
    ///
    /// Negative values count bins before the first one. Returns `None` when
    /// no finite extension could ever cover the value (outside the
    /// transform's domain, e.g. a non-positive value on a log axis).
    pub fn unbounded_index(&self, value: T) -> Option<isize> {
        let t = F::forward(Coordinate::to_f64(&value));
        if !t.is_finite() {
            return None;
        }
        Some(((t - self.min) / self.width).floor() as isize)
    }

    /// Number of bins an extension must add to cover `value`
    ///
    /// Negative for a front extension, positive for a back extension, zero
    /// when the value is already covered. Only meaningful on extendable axes.
    pub fn request_extension(&self, value: T, index: AxisIndex) -> isize {
        match index {
            AxisIndex::Bin(_) => 0,
            AxisIndex::Underflow => {
                let t = F::forward(Coordinate::to_f64(&value));
                -(((self.min - t) / self.width).ceil() as isize)
            }
            AxisIndex::Overflow => {
                let t = F::forward(Coordinate::to_f64(&value));
                ((t - self.min) / self.width).floor() as isize - (self.n_bins as isize - 1)
            }
        }
    }

    /// Grow the axis by whole bins at the front and/or back
    ///
    /// # Panics
    ///
    /// Panics on a bounded axis; extension is undefined there.
    pub fn extend(&mut self, front: usize, back: usize) {
        match self.mode {
            Mode::Extendable { .. } => {
                self.n_bins += front + back;
                self.min -= front as f64 * self.width;
            }
            Mode::Bounded { .. } => panic!("extend called on a non-extendable axis"),
        }
    }

    /// Materialize the edge sequence in natural units
    ///
    /// Regular edges are regenerated as `min + i * width` (back-transformed);
    /// the flow-bin boundary edges of a bounded axis are reproduced verbatim.
    pub fn edges(&self) -> Vec<T> {
        match &self.mode {
            Mode::Extendable { .. } => (0..=self.n_bins)
                .map(|i| T::from_f64(F::inverse(self.min + i as f64 * self.width)))
                .collect(),
            Mode::Bounded {
                underflow_edge,
                overflow_edge,
                ..
            } => {
                let mut edges = Vec::with_capacity(self.n_bins + 1);
                edges.push(*underflow_edge);
                for i in 0..self.n_bins - 1 {
                    edges.push(T::from_f64(F::inverse(self.min + i as f64 * self.width)));
                }
                edges.push(*overflow_edge);
                edges
            }
        }
    }

    /// Total storage bins, flow bins included
    pub fn n_bins(&self) -> usize {
        self.n_bins
    }

    /// Regular bins only
    pub fn n_regular(&self) -> usize {
        match self.mode {
            Mode::Extendable { .. } => self.n_bins,
            Mode::Bounded { .. } => self.n_bins - 2,
        }
    }

    pub fn is_extendable(&self) -> bool {
        matches!(self.mode, Mode::Extendable { .. })
    }

    pub fn has_flow_bins(&self) -> bool {
        matches!(self.mode, Mode::Bounded { .. })
    }

    /// Spare-capacity margins (zero on bounded axes)
    pub fn reserve(&self) -> (usize, usize) {
        match self.mode {
            Mode::Extendable {
                front_reserve,
                back_reserve,
            } => (front_reserve, back_reserve),
            Mode::Bounded { .. } => (0, 0),
        }
    }

    /// Regular bin width in transform space
    pub fn width(&self) -> f64 {
        self.width
    }

    /// Map a tagged position to its storage bin, if it has one
    pub fn storage_index(&self, index: AxisIndex) -> Option<usize> {
        match (index, &self.mode) {
            (AxisIndex::Bin(i), _) => (i < self.n_bins).then_some(i),
            (AxisIndex::Underflow, Mode::Bounded { .. }) => Some(0),
            (AxisIndex::Overflow, Mode::Bounded { .. }) => Some(self.n_bins - 1),
            _ => None,
        }
    }
}

/// Derive `(min, width)` in transform space and validate uniform spacing.
fn regular_grid<T: Coordinate, F: ValueTransform>(edges: &[T]) -> Result<(f64, f64)> {
    let transformed: Vec<f64> = edges.iter().map(|e| F::forward(Coordinate::to_f64(e))).collect();
    if transformed.iter().any(|t| !t.is_finite()) {
        return Err(Error::Construction(format!(
            "regular edges must be finite under the {} transform",
            F::NAME
        )));
    }
    let width = transformed[1] - transformed[0];
    if width <= 0.0 {
        return Err(Error::Construction(
            "bin width must be positive".to_string(),
        ));
    }
    for pair in transformed.windows(2) {
        let step = pair[1] - pair[0];
        if (step - width).abs() > SPACING_TOL * width {
            return Err(Error::Construction(format!(
                "edges are not uniformly spaced: step {step} differs from width {width}"
            )));
        }
    }
    Ok((transformed[0], width))
}
