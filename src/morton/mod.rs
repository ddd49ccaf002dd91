/// Morton encoding (Z-order curve) for chunk-local addressing
///
/// This module maps a linear offset inside a power-of-two chunk to the
/// coordinates of the cell it addresses and back, for any number of axes.

pub mod curve;
pub mod error;
pub mod exponent;
pub mod morton3d;
pub mod nd;

pub use curve::MortonCurve;
pub use error::{MortonError, MortonResult};
pub use exponent::{exponent_covering, next_power_of_two_exponent, smallest_exponent_covering};
pub use morton3d::{morton_decode, morton_encode, morton_encode_checked};
pub use nd::{
    decode, decode_array, decode_with_depth, encode, encode_array, encode_with_depth,
    levels_for_offset, Coordinates,
};

// The offset is consumed in groups of D bits, most significant group first.
// Each group carries one bit per axis, and the group's level is the power of
// two that bit is worth on its axis:
//
//   D = 2, depth 2      x: 0 1 2 3
//                   y 0:  0 1 4 5
//                   y 1:  2 3 6 7
//                   y 2:  8 9 12 13
//                   y 3: 10 11 14 15
