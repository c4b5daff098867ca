//! Core traits and types for n-dimensional histogram binning
//!
//! This crate provides the shared foundation for the gridhist workspace: the
//! error type, the numeric capability traits for axis coordinates and bin
//! weights, and the per-bin aggregate record.
//!
//! # Design Philosophy
//!
//! - **Capability traits over concrete types**: axes and storage are generic
//!   over what a value can *do* (compare, convert, accumulate), so integer,
//!   float and opaque user scalars all work.
//! - **Fatal errors**: every [`Error`] variant ends the offending call; the
//!   engine never retries and never silently clamps.
//! - **Stable bin layout**: [`BinContent`] is `#[repr(C)]` and publishes its
//!   field offsets for persistence layers.
//!
//! # Example
//!
//! ```rust
//! use gridhist_core::BinContent;
//!
//! let mut bin: BinContent<f64> = BinContent::zero();
//! bin.fill(&2.0);
//! bin.fill(&3.0);
//!
//! assert_eq!(bin.entries(), 2);
//! assert_eq!(*bin.sum_w(), 5.0);
//! assert_eq!(*bin.sum_w2(), 13.0);
//! ```

pub mod bin;
pub mod error;
pub mod num;

pub use bin::{BinContent, BinLayout};
pub use error::{Error, Result};
pub use num::{AxisValue, Coordinate, Weight};
