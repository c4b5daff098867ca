//! Persistence-facing state descriptors
//!
//! A [`Snapshot`] captures everything needed to rebuild a histogram: one
//! [`AxisSpec`] per axis, the bin element layout, the logical shape, and a
//! row-major copy of the bin region. Encoding snapshots to a concrete format
//! is the caller's business; with the `serde` feature the types derive
//! `Serialize`/`Deserialize` so any serde format works directly.
//!
//! [`AxisSpec`] doubles as the canonical "axis as data" form: rebuilding an
//! axis from its spec runs the regular construction validation, so a
//! corrupted snapshot fails loudly instead of producing a broken axis.

use gridhist_axes::Axis;
use gridhist_core::{BinContent, BinLayout, Coordinate, Result, Weight};

/// Which axis strategy an [`AxisSpec`] describes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum AxisKind {
    Uniform,
    UniformExtendable,
    Log10,
    Log10Extendable,
    Variable,
}

/// One axis reduced to plain data
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AxisSpec<T: Coordinate> {
    pub kind: AxisKind,
    /// Full edge sequence in natural units, flow-bin boundaries included
    pub edges: Vec<T>,
    pub front_reserve: usize,
    pub back_reserve: usize,
    pub label: Option<String>,
}

impl<T: Coordinate> AxisSpec<T> {
    pub fn from_axis(axis: &Axis<T>) -> Self {
        let kind = match axis {
            Axis::Uniform(a) if a.is_extendable() => AxisKind::UniformExtendable,
            Axis::Uniform(_) => AxisKind::Uniform,
            Axis::Log10(a) if a.is_extendable() => AxisKind::Log10Extendable,
            Axis::Log10(_) => AxisKind::Log10,
            Axis::Variable(_) => AxisKind::Variable,
        };
        let (front_reserve, back_reserve) = axis.reserve();
        Self {
            kind,
            edges: axis.edges(),
            front_reserve,
            back_reserve,
            label: axis.label().map(str::to_string),
        }
    }

    /// Rebuild the axis, running full construction validation
    pub fn to_axis(&self) -> Result<Axis<T>> {
        let axis = match self.kind {
            AxisKind::Uniform => Axis::uniform(&self.edges)?,
            AxisKind::UniformExtendable => {
                Axis::uniform_extendable(&self.edges, self.front_reserve, self.back_reserve)?
            }
            AxisKind::Log10 => Axis::log10(&self.edges)?,
            AxisKind::Log10Extendable => {
                Axis::log10_extendable(&self.edges, self.front_reserve, self.back_reserve)?
            }
            AxisKind::Variable => Axis::variable(self.edges.clone())?,
        };
        Ok(match &self.label {
            Some(label) => axis.with_label(label.clone()),
            None => axis,
        })
    }
}

/// Complete histogram state, decoupled from the engine
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Snapshot<T: Coordinate, W: Weight> {
    pub axes: Vec<AxisSpec<T>>,
    /// Byte layout the bins had when captured, checked on load
    pub layout: BinLayout,
    /// Logical bins per axis
    pub shape: Vec<usize>,
    /// Logical bin region, row-major
    pub bins: Vec<BinContent<W>>,
}

impl<T: Coordinate, W: Weight> Snapshot<T, W> {
    /// Total bin count implied by the shape
    pub fn n_bins(&self) -> usize {
        self.shape.iter().product()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use gridhist_axes::AxisIndex;

    #[test]
    fn test_axis_spec_round_trip_bounded() {
        let axis = Axis::uniform(&[-1.0, 0.0, 1.0, 2.0, 3.0, 4.0, 5.0])
            .unwrap()
            .with_label("charge");
        let spec = AxisSpec::from_axis(&axis);
        assert_eq!(spec.kind, AxisKind::Uniform);
        assert_eq!(spec.edges.len(), 7);
        assert_eq!(spec.label.as_deref(), Some("charge"));

        let rebuilt = spec.to_axis().unwrap();
        assert_eq!(rebuilt, axis);
    }

    #[test]
    fn test_axis_spec_round_trip_extended() {
        let mut axis = Axis::uniform_extendable(&[0.0, 1.0, 2.0], 4, 8).unwrap();
        axis.extend(2, 3);
        let spec = AxisSpec::from_axis(&axis);
        assert_eq!(spec.kind, AxisKind::UniformExtendable);
        assert_eq!(spec.front_reserve, 4);
        assert_eq!(spec.back_reserve, 8);

        let rebuilt = spec.to_axis().unwrap();
        assert_eq!(rebuilt.n_bins(), 7);
        assert_eq!(rebuilt.resolve(-1.5), AxisIndex::Bin(0));
        assert_eq!(rebuilt.resolve(4.5), AxisIndex::Bin(6));
    }

    #[test]
    fn test_axis_spec_round_trip_log10_and_variable() {
        let log = Axis::log10(&[0.0, 1.0, 10.0, 100.0, 1000.0]).unwrap();
        let spec = AxisSpec::from_axis(&log);
        assert_eq!(spec.kind, AxisKind::Log10);
        assert_eq!(spec.to_axis().unwrap(), log);

        let var = Axis::variable(vec![0.0, 2.0, 3.0, 10.0]).unwrap();
        let spec = AxisSpec::from_axis(&var);
        assert_eq!(spec.kind, AxisKind::Variable);
        assert_eq!(spec.to_axis().unwrap(), var);
    }

    #[test]
    fn test_corrupted_spec_fails_validation() {
        let spec = AxisSpec::<f64> {
            kind: AxisKind::Variable,
            edges: vec![0.0, 5.0, 3.0, 10.0],
            front_reserve: 0,
            back_reserve: 0,
            label: None,
        };
        assert!(spec.to_axis().is_err());
    }
}
