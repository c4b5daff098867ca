//! Axis strategies for n-dimensional histogram binning
//!
//! This crate maps sample values to storage bin indices. It knows nothing
//! about bin contents or memory layout; it only answers "which bin does this
//! value belong to" and "how would this axis have to grow to cover it".
//!
//! # Strategies
//!
//! - [`UniformAxis`]: constant bin width, resolved arithmetically in O(1).
//!   Optionally value-transformed ([`Log10Axis`] bins uniformly in log10
//!   space) and optionally extendable, growing on demand to cover new values.
//! - [`VariableAxis`]: explicit irregular edges, resolved by binary search.
//!   Works for any ordered value type, including opaque user scalars.
//! - [`Axis`]: the enum a histogram actually stores, dispatching to either.
//!
//! # Flow bins
//!
//! A non-extendable axis dedicates its first and last storage bins to
//! underflow and overflow. [`AxisIndex::Underflow`] / [`AxisIndex::Overflow`]
//! therefore mean "beyond even the flow bins" on a bounded axis and "the axis
//! would have to grow" on an extendable one.
//!
//! # Usage
//!
//! ```rust
//! use gridhist_axes::{Axis, AxisIndex};
//!
//! // Four bins between five edges; outer bins catch under- and overflow.
//! let energy = Axis::uniform(&[f64::NEG_INFINITY, 0.0, 10.0, 20.0, f64::INFINITY])?;
//! assert_eq!(energy.resolve(12.0), AxisIndex::Bin(2));
//! assert_eq!(energy.resolve(-3.0), AxisIndex::Bin(0));
//!
//! // An extendable axis reports how far it falls short instead.
//! let time = Axis::uniform_extendable(&[0.0, 1.0, 2.0], 0, 16)?;
//! let index = time.resolve(5.5);
//! assert_eq!(index, AxisIndex::Overflow);
//! assert_eq!(time.request_extension(5.5, index), 4);
//! # Ok::<(), gridhist_core::Error>(())
//! ```

pub mod axis;
pub mod index;
pub mod transform;
pub mod uniform;
pub mod variable;

mod util;

pub use axis::Axis;
pub use index::AxisIndex;
pub use transform::{Identity, Log10, ValueTransform};
pub use uniform::{Log10Axis, UniformAxis};
pub use variable::VariableAxis;

// Axis strategies constrain their value types through these.
pub use gridhist_core::{AxisValue, Coordinate};
