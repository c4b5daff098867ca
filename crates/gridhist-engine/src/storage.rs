//! Growable dense bin storage
//!
//! [`GridStorage`] owns a single row-major arena of bin aggregates padded by
//! spare capacity on every side of every axis. The padding is what makes the
//! common growth case cheap: extending into spare capacity is pure
//! bookkeeping, with no data movement at all.
//!
//! The arena invariant: every cell outside the logical region is zero. It is
//! zeroed at allocation and never written until the logical region grows over
//! it, so consuming capacity needs no re-initialization.

use gridhist_core::{BinContent, Error, Result, Weight};
use log::debug;

/// Dense n-dimensional bin arena with capacity margins
#[derive(Debug, Clone)]
pub struct GridStorage<W: Weight> {
    arena: Vec<BinContent<W>>,
    /// Logical bins per axis
    shape: Vec<usize>,
    /// Spare bins before the logical region, per axis
    front_capacity: Vec<usize>,
    /// Spare bins after the logical region, per axis
    back_capacity: Vec<usize>,
    /// Element strides over the padded extents, rightmost axis fastest
    strides: Vec<usize>,
}

impl<W: Weight> GridStorage<W> {
    /// Allocate a zeroed arena for `shape` logical bins per axis plus the
    /// given capacity margins
    pub fn new(shape: &[usize], front_capacity: &[usize], back_capacity: &[usize]) -> Result<Self> {
        if shape.is_empty() {
            return Err(Error::Construction(
                "storage needs at least one axis".to_string(),
            ));
        }
        if front_capacity.len() != shape.len() {
            return Err(Error::shape_mismatch(
                shape.len(),
                front_capacity.len(),
                "front capacity vector",
            ));
        }
        if back_capacity.len() != shape.len() {
            return Err(Error::shape_mismatch(
                shape.len(),
                back_capacity.len(),
                "back capacity vector",
            ));
        }
        let extents = padded_extents(shape, front_capacity, back_capacity);
        let (strides, total) = strides_for(&extents)?;
        let arena = allocate_zeroed(total)?;
        Ok(Self {
            arena,
            shape: shape.to_vec(),
            front_capacity: front_capacity.to_vec(),
            back_capacity: back_capacity.to_vec(),
            strides,
        })
    }

    /// Logical bins per axis
    pub fn shape(&self) -> &[usize] {
        &self.shape
    }

    /// Number of axes
    pub fn n_axes(&self) -> usize {
        self.shape.len()
    }

    /// Element strides over the padded extents
    pub fn strides(&self) -> &[usize] {
        &self.strides
    }

    /// Spare bins before the logical region, per axis
    pub fn front_capacity(&self) -> &[usize] {
        &self.front_capacity
    }

    /// Spare bins after the logical region, per axis
    pub fn back_capacity(&self) -> &[usize] {
        &self.back_capacity
    }

    /// The raw arena, capacity padding included
    pub fn as_slice(&self) -> &[BinContent<W>] {
        &self.arena
    }

    /// Arena element offset of a logical multi-index
    ///
    /// # Panics
    ///
    /// Panics when the index has the wrong dimensionality or any component
    /// is outside the logical shape.
    pub fn offset_of(&self, idx: &[usize]) -> usize {
        assert_eq!(
            idx.len(),
            self.shape.len(),
            "index has {} components, storage has {} axes",
            idx.len(),
            self.shape.len()
        );
        let mut offset = 0;
        for axis in 0..idx.len() {
            assert!(
                idx[axis] < self.shape[axis],
                "bin {} out of range on axis {} ({} bins)",
                idx[axis],
                axis,
                self.shape[axis]
            );
            offset += (self.front_capacity[axis] + idx[axis]) * self.strides[axis];
        }
        offset
    }

    /// # Panics
    ///
    /// Panics when `idx` is outside the logical shape.
    pub fn get(&self, idx: &[usize]) -> &BinContent<W> {
        &self.arena[self.offset_of(idx)]
    }

    /// # Panics
    ///
    /// Panics when `idx` is outside the logical shape.
    pub fn get_mut(&mut self, idx: &[usize]) -> &mut BinContent<W> {
        let offset = self.offset_of(idx);
        &mut self.arena[offset]
    }

    /// Zero every bin, keeping shape and capacity
    pub fn clear(&mut self) {
        for cell in &mut self.arena {
            cell.clear();
        }
    }

    /// Grow the logical region by whole bins at the front and/or back of
    /// each axis
    ///
    /// When every axis's spare capacity covers its delta this is
    /// bookkeeping only. Otherwise a fresh zeroed arena is allocated with
    /// the capacity margins restored to `front_reserve`/`back_reserve` on
    /// the extended axes and the logical region is copied into its shifted
    /// position. Nothing is mutated if the allocation fails.
    pub fn grow(
        &mut self,
        front_extra: &[usize],
        back_extra: &[usize],
        front_reserve: &[usize],
        back_reserve: &[usize],
    ) -> Result<()> {
        let n = self.shape.len();
        assert_eq!(front_extra.len(), n, "front extension dimensionality");
        assert_eq!(back_extra.len(), n, "back extension dimensionality");

        let fits = (0..n).all(|axis| {
            front_extra[axis] <= self.front_capacity[axis]
                && back_extra[axis] <= self.back_capacity[axis]
        });
        if fits {
            for axis in 0..n {
                self.front_capacity[axis] -= front_extra[axis];
                self.back_capacity[axis] -= back_extra[axis];
                self.shape[axis] += front_extra[axis] + back_extra[axis];
            }
            return Ok(());
        }

        let mut new_shape = Vec::with_capacity(n);
        let mut new_front = Vec::with_capacity(n);
        let mut new_back = Vec::with_capacity(n);
        for axis in 0..n {
            new_shape.push(self.shape[axis] + front_extra[axis] + back_extra[axis]);
            new_front.push(if front_extra[axis] > 0 {
                front_reserve[axis]
            } else {
                self.front_capacity[axis]
            });
            new_back.push(if back_extra[axis] > 0 {
                back_reserve[axis]
            } else {
                self.back_capacity[axis]
            });
        }

        let extents = padded_extents(&new_shape, &new_front, &new_back);
        let (new_strides, total) = strides_for(&extents)?;
        let mut new_arena = allocate_zeroed(total)?;
        debug!(
            "storage reallocation: {} -> {} elements",
            self.arena.len(),
            total
        );

        // Move the logical region row by row; the rightmost axis is
        // contiguous in both arenas.
        let row = self.shape[n - 1];
        if self.shape.iter().all(|&s| s > 0) {
            let mut idx = vec![0usize; n];
            'rows: loop {
                let src = self.offset_of(&idx);
                let mut dst = 0;
                for axis in 0..n {
                    dst += (new_front[axis] + front_extra[axis] + idx[axis]) * new_strides[axis];
                }
                new_arena[dst..dst + row].clone_from_slice(&self.arena[src..src + row]);

                let mut axis = n - 1;
                loop {
                    if axis == 0 {
                        break 'rows;
                    }
                    axis -= 1;
                    idx[axis] += 1;
                    if idx[axis] < self.shape[axis] {
                        break;
                    }
                    idx[axis] = 0;
                }
            }
        }

        self.arena = new_arena;
        self.shape = new_shape;
        self.front_capacity = new_front;
        self.back_capacity = new_back;
        self.strides = new_strides;
        Ok(())
    }
}

fn padded_extents(shape: &[usize], front: &[usize], back: &[usize]) -> Vec<usize> {
    (0..shape.len())
        .map(|axis| front[axis] + shape[axis] + back[axis])
        .collect()
}

/// Row-major strides and total element count, overflow-checked
fn strides_for(extents: &[usize]) -> Result<(Vec<usize>, usize)> {
    let mut strides = vec![1usize; extents.len()];
    let mut total: usize = 1;
    for axis in (0..extents.len()).rev() {
        strides[axis] = total;
        total = total
            .checked_mul(extents[axis])
            .ok_or_else(|| Error::Allocation("bin count overflows usize".to_string()))?;
    }
    Ok((strides, total))
}

fn allocate_zeroed<W: Weight>(total: usize) -> Result<Vec<BinContent<W>>> {
    let mut arena = Vec::new();
    arena
        .try_reserve_exact(total)
        .map_err(|_| Error::allocation(total, "bin arena"))?;
    arena.resize(total, BinContent::zero());
    Ok(arena)
}
