/// Iterator for Morton-ordered traversal of a whole chunk
///
/// Walking offsets in order visits cells along the Z-order curve, which keeps
/// neighbouring cells close together in memory.

use super::error::MortonResult;
use super::nd::{decode_with_depth, encode_with_depth, Coordinates};

/// Offset width of a validated curve shape
fn width(dimensions: usize, depth: u32) -> u32 {
    (dimensions as u64 * depth as u64) as u32
}

/// Walks every cell of a `2^depth`-wide chunk in offset order.
///
/// A chunk using all 64 offset bits has more cells than `usize` can count, so
/// the size comes from [`MortonCurve::cell_count`] rather than `len()`.
#[derive(Debug, Clone)]
pub struct MortonCurve {
    dimensions: usize,
    depth: u32,
    current: u64,
    /// Exclusive; `None` when the chunk spans the whole 64-bit offset range
    end: Option<u64>,
    exhausted: bool,
}

impl MortonCurve {
    /// Curve over a chunk `2^depth` cells wide along each of `dimensions` axes
    pub fn new(dimensions: usize, depth: u32) -> MortonResult<Self> {
        // Validates both the dimensionality and the offset width
        decode_with_depth(0, dimensions, depth)?;

        let end = 1u64.checked_shl(width(dimensions, depth));
        Ok(Self {
            dimensions,
            depth,
            current: 0,
            end,
            exhausted: false,
        })
    }

    pub fn dimensions(&self) -> usize {
        self.dimensions
    }

    pub fn depth(&self) -> u32 {
        self.depth
    }

    /// Number of cells in the chunk, `2^(D·depth)`
    pub fn cell_count(&self) -> u128 {
        1u128 << width(self.dimensions, self.depth)
    }

    /// Offset of `coords` on this curve
    pub fn offset_of(&self, coords: &[u64]) -> MortonResult<u64> {
        encode_with_depth(coords, self.depth)
    }
}

impl Iterator for MortonCurve {
    type Item = (u64, Coordinates);

    fn next(&mut self) -> Option<Self::Item> {
        if self.exhausted || self.end.is_some_and(|end| self.current >= end) {
            return None;
        }

        let offset = self.current;
        let coords = decode_with_depth(offset, self.dimensions, self.depth).ok()?;
        match self.current.checked_add(1) {
            Some(next) => self.current = next,
            None => self.exhausted = true,
        }
        Some((offset, coords))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        if self.exhausted {
            return (0, Some(0));
        }
        let remaining = match self.end {
            Some(end) => (end - self.current.min(end)) as u128,
            None => (u64::MAX - self.current) as u128 + 1,
        };
        match usize::try_from(remaining) {
            Ok(n) => (n, Some(n)),
            Err(_) => (usize::MAX, None),
        }
    }
}
