/// Morton encoding/decoding for 3D coordinates
///
/// Uses the magic-bits sequence instead of the per-level loop in
/// [`super::nd`]. Produces the same codes for `D = 3`.

use super::error::{MortonError, MortonResult};

/// Bits available per axis in a 64-bit code
pub const AXIS_BITS_3D: u32 = 21;

/// Largest coordinate the 3D fast path accepts
pub const MAX_AXIS_3D: u32 = (1 << AXIS_BITS_3D) - 1;

/// Every 3rd bit, starting at the bit owned by each axis
pub const MAGIC_X: u64 = 0x1249249249249249;
pub const MAGIC_Y: u64 = MAGIC_X << 1;
pub const MAGIC_Z: u64 = MAGIC_X << 2;

/// Spreads bits of a 21-bit integer to every 3rd bit
#[inline(always)]
fn spread_bits(v: u32) -> u64 {
    let mut v = (v & MAX_AXIS_3D) as u64;
    v = (v | (v << 32)) & 0x001F_0000_0000_FFFF;
    v = (v | (v << 16)) & 0x001F_0000_FF00_00FF;
    v = (v | (v << 8)) & 0x100F_00F0_0F00_F00F;
    v = (v | (v << 4)) & 0x10C3_0C30_C30C_30C3;
    v = (v | (v << 2)) & MAGIC_X;
    v
}

/// Compacts every 3rd bit back to a 21-bit integer
#[inline(always)]
fn compact_bits(v: u64) -> u32 {
    let mut v = v & MAGIC_X;
    v = (v ^ (v >> 2)) & 0x10C3_0C30_C30C_30C3;
    v = (v ^ (v >> 4)) & 0x100F_00F0_0F00_F00F;
    v = (v ^ (v >> 8)) & 0x001F_0000_FF00_00FF;
    v = (v ^ (v >> 16)) & 0x001F_0000_0000_FFFF;
    v = (v ^ (v >> 32)) & MAX_AXIS_3D as u64;
    v as u32
}

/// Encode 3D coordinates into Morton code (Z-order)
/// Supports up to 21 bits per coordinate (2^21 = 2,097,152)
#[inline(always)]
pub fn morton_encode(x: u32, y: u32, z: u32) -> u64 {
    debug_assert!(x <= MAX_AXIS_3D, "x coordinate too large for Morton encoding");
    debug_assert!(y <= MAX_AXIS_3D, "y coordinate too large for Morton encoding");
    debug_assert!(z <= MAX_AXIS_3D, "z coordinate too large for Morton encoding");

    spread_bits(x) | (spread_bits(y) << 1) | (spread_bits(z) << 2)
}

/// Checked form of [`morton_encode`] for release builds
pub fn morton_encode_checked(x: u32, y: u32, z: u32) -> MortonResult<u64> {
    for value in [x, y, z] {
        if value > MAX_AXIS_3D {
            return Err(MortonError::out_of_range(
                "coordinate",
                value as u64,
                MAX_AXIS_3D as u64,
            ));
        }
    }
    Ok(morton_encode(x, y, z))
}

/// Decode Morton code back to 3D coordinates
///
/// The top bit of the code belongs to no axis and is ignored.
#[inline(always)]
pub fn morton_decode(morton: u64) -> (u32, u32, u32) {
    let x = compact_bits(morton);
    let y = compact_bits(morton >> 1);
    let z = compact_bits(morton >> 2);
    (x, y, z)
}
