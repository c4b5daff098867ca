//! Growable n-dimensional histogram storage and fill engine
//!
//! This crate combines the axis strategies from `gridhist-axes` with a dense
//! growable bin arena: samples go in, bin aggregates (entry count, sum of
//! weights, sum of squared weights) come out, and extendable axes grow on
//! demand without per-sample reallocation.
//!
//! # Architecture
//!
//! - [`Histogram`]: the engine. Resolves samples against its axes, fills
//!   in-range samples directly, and parks out-of-range samples for
//!   extendable axes until one combined growth covers the whole batch.
//! - [`GridStorage`]: one row-major arena padded with spare capacity on
//!   every side of every axis, so the common growth is pure bookkeeping.
//! - [`FillBuffer`]: the parking lot for out-of-range samples, replayed on
//!   [`Histogram::flush`].
//! - [`FullIndexIter`] / [`RangeIndexIter`]: odometer cursors that drive
//!   projection, flow-bin aggregation, and snapshots.
//! - [`Snapshot`] / [`AxisSpec`]: the complete state as plain data, for
//!   persistence layers to encode however they like.
//!
//! # Usage
//!
//! ```rust
//! use gridhist_axes::Axis;
//! use gridhist_engine::Histogram;
//!
//! // 2-D: an extendable time axis and a bounded amplitude axis
//! let mut hist: Histogram = Histogram::new(vec![
//!     Axis::uniform_extendable(&[0.0, 1.0, 2.0], 0, 16)?.with_label("time"),
//!     Axis::uniform(&[f64::NEG_INFINITY, -1.0, 0.0, 1.0, f64::INFINITY])?,
//! ])?;
//!
//! hist.fill(&[0.3, -0.4])?;
//! hist.fill_weighted(&[7.9, 0.2], 2.0)?;
//! hist.flush()?;
//!
//! // the time axis grew to cover 7.9
//! assert_eq!(hist.axis(0).n_bins(), 8);
//! assert_eq!(hist.total_entries(), 2);
//! # Ok::<(), gridhist_core::Error>(())
//! ```

pub mod buffer;
pub mod histogram;
pub mod index_iter;
pub mod snapshot;
pub mod storage;

pub use buffer::{FillBuffer, PendingFill, DEFAULT_BUFFER_CAPACITY};
pub use histogram::{Bins, Histogram};
pub use index_iter::{FullIndexIter, RangeIndexIter, SlotSpec};
pub use snapshot::{AxisKind, AxisSpec, Snapshot};
pub use storage::GridStorage;
