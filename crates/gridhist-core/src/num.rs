//! Numeric capability traits for axis coordinates and bin weights
//!
//! This module defines the type foundation for the binning engine without
//! imposing any storage or axis strategy.
//!
//! # Design Philosophy
//!
//! - **Capability split**: irregular axes only compare values, constant-width
//!   axes also need arithmetic. [`AxisValue`] captures the first,
//!   [`Coordinate`] the second.
//! - **Arithmetic in f64**: constant-width bin resolution converts through
//!   [`Coordinate::to_f64`] instead of computing in the coordinate type, so
//!   integer axes get proper floor semantics for negative values.
//! - **Opaque scalars**: a user type that is merely ordered can drive an
//!   irregular axis; a user type with `+` and `*` can serve as a weight.

use bytemuck::Pod;
use num_traits::{Num, NumCast, One, Zero};
use std::fmt::Debug;
use std::ops::{AddAssign, Mul};

/// Comparison-only capability for axis values
///
/// Everything an irregular axis needs: ordering, cloning, and thread safety.
/// Blanket-implemented, so opaque user scalars qualify automatically.
pub trait AxisValue: Clone + PartialOrd + Debug + Send + Sync + 'static {}

impl<T: Clone + PartialOrd + Debug + Send + Sync + 'static> AxisValue for T {}

/// Arithmetic capability for constant-width axis coordinates
///
/// The `Pod` bound keeps edge arrays viewable as raw bytes by persistence
/// layers.
pub trait Coordinate: AxisValue + Copy + Pod + Num + NumCast {
    /// Convert from f64 (edge materialization)
    ///
    /// For integer coordinates this truncates the way `as` casts do; in
    /// particular an unsigned coordinate saturates at zero when an extendable
    /// axis has grown below it.
    fn from_f64(val: f64) -> Self;

    /// Convert to f64 (bin resolution arithmetic)
    fn to_f64(&self) -> f64;

    /// Check if value is finite (always true for integers)
    fn is_finite(&self) -> bool;
}

impl Coordinate for f64 {
    fn from_f64(val: f64) -> Self {
        val
    }

    fn to_f64(&self) -> f64 {
        *self
    }

    fn is_finite(&self) -> bool {
        f64::is_finite(*self)
    }
}

impl Coordinate for f32 {
    fn from_f64(val: f64) -> Self {
        val as f32
    }

    fn to_f64(&self) -> f64 {
        *self as f64
    }

    fn is_finite(&self) -> bool {
        f32::is_finite(*self)
    }
}

impl Coordinate for i32 {
    fn from_f64(val: f64) -> Self {
        val as i32
    }

    fn to_f64(&self) -> f64 {
        *self as f64
    }

    fn is_finite(&self) -> bool {
        true
    }
}

impl Coordinate for u32 {
    fn from_f64(val: f64) -> Self {
        val as u32
    }

    fn to_f64(&self) -> f64 {
        *self as f64
    }

    fn is_finite(&self) -> bool {
        true
    }
}

impl Coordinate for i64 {
    fn from_f64(val: f64) -> Self {
        val as i64
    }

    fn to_f64(&self) -> f64 {
        *self as f64
    }

    fn is_finite(&self) -> bool {
        true
    }
}

impl Coordinate for u64 {
    fn from_f64(val: f64) -> Self {
        val as u64
    }

    fn to_f64(&self) -> f64 {
        *self as f64
    }

    fn is_finite(&self) -> bool {
        true
    }
}

/// Capability required of bin weights
///
/// Filling accumulates the weight and its square into the bin aggregate, so a
/// weight must support addition and multiplication. Primitive floats and
/// integers qualify through the blanket impl, as does any user scalar that
/// implements the listed traits (the "opaque weight" case).
pub trait Weight:
    Clone + Debug + PartialEq + Send + Sync + 'static + Zero + One + AddAssign + Mul<Output = Self>
{
}

impl<T> Weight for T where
    T: Clone
        + Debug
        + PartialEq
        + Send
        + Sync
        + 'static
        + Zero
        + One
        + AddAssign
        + Mul<Output = Self>
{
}

#[cfg(test)]
mod tests {
    use super::*;

    fn resolve_width<T: Coordinate>(value: T, min: T, width: f64) -> isize {
        ((Coordinate::to_f64(&value) - Coordinate::to_f64(&min)) / width).floor() as isize
    }

    #[test]
    fn test_float_coordinates() {
        assert_eq!(resolve_width(5.5f64, 0.0, 1.0), 5);
        assert_eq!(resolve_width(-0.5f64, 0.0, 1.0), -1);
        assert_eq!(resolve_width(2.5f32, 0.0, 0.5), 5);
        assert!(f64::NAN.is_finite() == false);
        assert!(Coordinate::is_finite(&1.0f64));
        assert!(!Coordinate::is_finite(&f64::INFINITY));
    }

    #[test]
    fn test_integer_coordinates() {
        // Floor semantics hold for negative integer offsets
        assert_eq!(resolve_width(-3i64, 0, 2.0), -2);
        assert_eq!(resolve_width(-4i64, 0, 2.0), -2);
        assert_eq!(resolve_width(3i32, 0, 2.0), 1);
        assert!(Coordinate::is_finite(&i64::MIN));
        assert_eq!(i64::from_f64(7.9), 7);
        assert_eq!(u32::from_f64(-1.0), 0);
    }

    #[test]
    fn test_weight_primitives() {
        fn squared<W: Weight>(w: &W) -> W {
            w.clone() * w.clone()
        }

        assert_eq!(squared(&3.0f64), 9.0);
        assert_eq!(squared(&2u64), 4);

        let mut acc = f64::zero();
        acc += 2.5;
        acc += 0.5;
        assert_eq!(acc, 3.0);
    }

    // An opaque weight: ordered-free, but addable and multipliable.
    #[derive(Clone, Debug, PartialEq)]
    struct Tracked {
        value: f64,
        ops: u32,
    }

    impl Zero for Tracked {
        fn zero() -> Self {
            Tracked { value: 0.0, ops: 0 }
        }

        fn is_zero(&self) -> bool {
            self.value == 0.0
        }
    }

    impl One for Tracked {
        fn one() -> Self {
            Tracked { value: 1.0, ops: 0 }
        }
    }

    impl std::ops::Add for Tracked {
        type Output = Self;

        fn add(self, rhs: Self) -> Self {
            Tracked {
                value: self.value + rhs.value,
                ops: self.ops + rhs.ops + 1,
            }
        }
    }

    impl AddAssign for Tracked {
        fn add_assign(&mut self, rhs: Self) {
            self.value += rhs.value;
            self.ops += rhs.ops + 1;
        }
    }

    impl Mul for Tracked {
        type Output = Self;

        fn mul(self, rhs: Self) -> Self {
            Tracked {
                value: self.value * rhs.value,
                ops: self.ops + rhs.ops + 1,
            }
        }
    }

    #[test]
    fn test_opaque_weight_qualifies() {
        fn accumulate<W: Weight>(weights: &[W]) -> W {
            let mut total = W::zero();
            for w in weights {
                total += w.clone();
            }
            total
        }

        let ws = vec![
            Tracked { value: 2.0, ops: 0 },
            Tracked { value: 3.0, ops: 0 },
        ];
        let total = accumulate(&ws);
        assert_eq!(total.value, 5.0);
        assert!(total.ops >= 2);
    }
}
