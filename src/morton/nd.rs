/// Morton encoding/decoding for an arbitrary number of dimensions
///
/// An offset is consumed in groups of `D` bits, most significant group first.
/// Bit `k` of a group belongs to axis `k`, and the group's level `l` is the
/// weight (`2^l`) it adds to that axis.

use std::fmt;
use std::ops::Deref;

use super::error::{MortonError, MortonResult};
use super::exponent::exponent_covering;

/// Width of a Morton offset in bits
pub const OFFSET_BITS: u32 = u64::BITS;

/// Per-axis coordinates of a cell, axis 0 first
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, PartialOrd, Ord)]
pub struct Coordinates(Vec<u64>);

impl Coordinates {
    pub fn new(axes: Vec<u64>) -> Self {
        Self(axes)
    }

    /// Origin of a `dimensions`-dimensional space
    pub fn zeros(dimensions: usize) -> Self {
        Self(vec![0; dimensions])
    }

    pub fn dimensions(&self) -> usize {
        self.0.len()
    }

    pub fn as_slice(&self) -> &[u64] {
        &self.0
    }

    pub fn into_inner(self) -> Vec<u64> {
        self.0
    }
}

impl Deref for Coordinates {
    type Target = [u64];

    fn deref(&self) -> &[u64] {
        &self.0
    }
}

impl From<Vec<u64>> for Coordinates {
    fn from(axes: Vec<u64>) -> Self {
        Self(axes)
    }
}

impl<const D: usize> From<[u64; D]> for Coordinates {
    fn from(axes: [u64; D]) -> Self {
        Self(axes.to_vec())
    }
}

impl fmt::Display for Coordinates {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "(")?;
        for (axis, value) in self.0.iter().enumerate() {
            if axis > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{}", value)?;
        }
        write!(f, ")")
    }
}

fn check_dimensions(dimensions: usize) -> MortonResult<()> {
    if dimensions == 0 {
        return Err(MortonError::invalid("dimensionality must be at least 1"));
    }
    Ok(())
}

fn check_width(dimensions: usize, depth: u32) -> MortonResult<()> {
    if offset_width(dimensions, depth).is_none() {
        return Err(MortonError::invalid(format!(
            "{} axes of depth {} exceed a {}-bit offset",
            dimensions, depth, OFFSET_BITS
        )));
    }
    Ok(())
}

/// Total offset width for `dimensions` axes of `depth` bits, if it fits in a `u64`
fn offset_width(dimensions: usize, depth: u32) -> Option<u32> {
    let width = (dimensions as u64).checked_mul(depth as u64)?;
    if width > OFFSET_BITS as u64 {
        None
    } else {
        Some(width as u32)
    }
}

/// Number of `dimensions`-bit groups needed to hold `offset`
#[inline]
pub fn levels_for_offset(offset: u64, dimensions: usize) -> u32 {
    let bits = exponent_covering(offset) as usize;
    bits.div_ceil(dimensions) as u32
}

/// Core decomposition loop shared by every decode entry point.
///
/// `axes` must be zeroed and have length `D >= 1`. Bits of `offset` above the
/// `levels` groups are a residue no axis can absorb and are rejected.
fn decode_levels(offset: u64, levels: u32, axes: &mut [u64]) -> MortonResult<()> {
    let dimensions = axes.len() as u64;
    let width = dimensions.saturating_mul(levels as u64);
    let residue = if width >= OFFSET_BITS as u64 { 0 } else { offset >> width };
    if residue != 0 {
        return Err(MortonError::out_of_range(
            "offset",
            offset,
            width_limit(width as u32),
        ));
    }

    let mut remaining = offset;
    for level in (0..levels).rev() {
        // Below the top group every shift stays under the offset width
        let shift = (dimensions * level as u64) as u32;
        let group = remaining >> shift;
        remaining &= (1u64 << shift) - 1;

        for (axis, value) in axes.iter_mut().enumerate() {
            if axis < OFFSET_BITS as usize && (group >> axis) & 1 != 0 {
                *value |= 1u64 << level;
            }
        }
    }

    debug_assert_eq!(remaining, 0);
    Ok(())
}

/// Largest value representable in `width` bits
#[inline]
fn width_limit(width: u32) -> u64 {
    if width >= OFFSET_BITS {
        u64::MAX
    } else {
        (1u64 << width) - 1
    }
}

/// Decode an offset into `dimensions` coordinates, inferring the depth from
/// the offset itself.
pub fn decode(offset: u64, dimensions: usize) -> MortonResult<Coordinates> {
    check_dimensions(dimensions)?;
    let levels = levels_for_offset(offset, dimensions);
    let mut axes = vec![0u64; dimensions];
    decode_levels(offset, levels, &mut axes)?;
    Ok(Coordinates(axes))
}

/// Decode an offset that must address a cell of a chunk `2^depth` wide per axis.
pub fn decode_with_depth(offset: u64, dimensions: usize, depth: u32) -> MortonResult<Coordinates> {
    check_dimensions(dimensions)?;
    check_width(dimensions, depth)?;
    let mut axes = vec![0u64; dimensions];
    decode_levels(offset, depth, &mut axes)?;
    Ok(Coordinates(axes))
}

/// Const-generic form of [`decode`]
pub fn decode_array<const D: usize>(offset: u64) -> MortonResult<[u64; D]> {
    check_dimensions(D)?;
    let levels = levels_for_offset(offset, D);
    let mut axes = [0u64; D];
    decode_levels(offset, levels, &mut axes)?;
    Ok(axes)
}

/// Core interleaving loop shared by every encode entry point.
///
/// Returns `None` when the interleaved bits do not fit in a 64-bit offset.
fn encode_levels(coords: &[u64], depth: u32) -> Option<u64> {
    let dimensions = u32::try_from(coords.len()).unwrap_or(u32::MAX);
    let mut offset = 0u64;

    for level in (0..depth).rev() {
        if offset != 0 && offset.leading_zeros() < dimensions {
            return None;
        }

        let mut group = 0u64;
        for (axis, value) in coords.iter().enumerate() {
            if (value >> level) & 1 != 0 {
                if axis >= OFFSET_BITS as usize {
                    return None;
                }
                group |= 1u64 << axis;
            }
        }
        offset = offset.checked_shl(dimensions).unwrap_or(0) | group;
    }

    Some(offset)
}

/// Encode coordinates into an offset, inferring the depth from the largest axis.
pub fn encode(coords: &[u64]) -> MortonResult<u64> {
    check_dimensions(coords.len())?;
    let largest = coords.iter().copied().max().unwrap_or(0);
    encode_levels(coords, exponent_covering(largest)).ok_or_else(|| overflowing_axis(coords))
}

/// Largest value axis `axis` of a `dimensions`-axis offset can hold.
///
/// Bit `l` of the axis lands on offset bit `l·D + axis`, so lower axes get one
/// more bit than higher ones when `D` does not divide 64.
fn axis_limit(dimensions: usize, axis: usize) -> u64 {
    if axis >= OFFSET_BITS as usize {
        return 0;
    }
    width_limit((OFFSET_BITS as usize - axis).div_ceil(dimensions) as u32)
}

/// Error for the first coordinate whose bits fall past the offset width
fn overflowing_axis(coords: &[u64]) -> MortonError {
    coords
        .iter()
        .enumerate()
        .map(|(axis, &value)| (value, axis_limit(coords.len(), axis)))
        .find(|&(value, limit)| value > limit)
        .map(|(value, limit)| MortonError::out_of_range("coordinate", value, limit))
        .unwrap_or_else(|| {
            MortonError::out_of_range("offset width", OFFSET_BITS as u64 + 1, OFFSET_BITS as u64)
        })
}

/// Encode coordinates of a cell in a chunk `2^depth` wide per axis.
pub fn encode_with_depth(coords: &[u64], depth: u32) -> MortonResult<u64> {
    check_dimensions(coords.len())?;
    check_width(coords.len(), depth)?;
    let limit = width_limit(depth);
    if let Some(&value) = coords.iter().find(|&&value| value > limit) {
        return Err(MortonError::out_of_range("coordinate", value, limit));
    }
    encode_levels(coords, depth)
        .ok_or_else(|| MortonError::out_of_range("coordinate", limit, limit))
}

/// Const-generic form of [`encode`]
pub fn encode_array<const D: usize>(coords: [u64; D]) -> MortonResult<u64> {
    encode(&coords)
}
