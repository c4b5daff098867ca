//! N-dimensional histogram binning and storage with lazily growable axes
//!
//! This is the umbrella crate: it re-exports the whole public surface of the
//! workspace so a single dependency is enough.
//!
//! - `gridhist-core`: bin aggregates, numeric traits, and the shared error
//!   type.
//! - `gridhist-axes`: axis strategies that map sample values to bin indices
//!   (regular grids, log-spaced grids, arbitrary monotonic edges).
//! - `gridhist-engine`: the growable storage arena and the fill engine on
//!   top of it.
//!
//! # Usage
//!
//! ```rust
//! use gridhist::{Axis, AxisIndex, Histogram};
//!
//! // 20 regular bins of width 0.5 on [0, 10), flow bins catch the rest
//! let mut hist: Histogram = Histogram::new(vec![Axis::linear(0.0, 10.0, 0.5)?])?;
//! for v in [1.3, 1.4, 9.2, -2.0, 25.0] {
//!     hist.fill(&[v])?;
//! }
//!
//! // -2.0 and 25.0 land in the flow bins, so nothing is lost
//! assert_eq!(hist.total_entries(), 5);
//!
//! match hist.axis(0).resolve(1.3) {
//!     AxisIndex::Bin(i) => assert_eq!(hist.get_bin(&[i]).entries(), 2),
//!     _ => unreachable!(),
//! }
//! # Ok::<(), gridhist::Error>(())
//! ```

pub use gridhist_core::{BinContent, BinLayout, Coordinate, Error, Result, Weight};

pub use gridhist_axes::{
    Axis, AxisIndex, AxisValue, Identity, Log10, Log10Axis, UniformAxis, ValueTransform,
    VariableAxis,
};

pub use gridhist_engine::{
    AxisKind, AxisSpec, Bins, FillBuffer, FullIndexIter, GridStorage, Histogram, PendingFill,
    RangeIndexIter, SlotSpec, Snapshot, DEFAULT_BUFFER_CAPACITY,
};
