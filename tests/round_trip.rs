// Morton transform round-trip tests
//
// The offset <-> coordinate mapping must be a bijection for every
// dimensionality and depth a chunk can use.

use std::collections::HashSet;

use chunk_morton::morton::{
    decode, decode_with_depth, encode, encode_with_depth, morton_decode, morton_encode,
    smallest_exponent_covering, MortonCurve,
};
use proptest::prelude::*;

#[test]
fn test_offset_first_round_trip() {
    println!("Testing encode(decode(o)) == o...");

    for dimensions in 1..=4usize {
        for depth in 0..=4u32 {
            let cells = 1u64 << (dimensions as u32 * depth);
            for offset in 0..cells {
                let coords = decode(offset, dimensions).unwrap();
                assert_eq!(coords.dimensions(), dimensions);
                assert_eq!(
                    encode(&coords).unwrap(),
                    offset,
                    "D={} depth={} offset={}",
                    dimensions,
                    depth,
                    offset
                );
                assert_eq!(encode_with_depth(&coords, depth).unwrap(), offset);
            }
        }
    }

    println!("✅ Offset-first round trip passed");
}

#[test]
fn test_coordinate_first_round_trip() {
    println!("Testing decode(encode(c)) == c...");

    for dimensions in 1..=4usize {
        for depth in 0..=4u32 {
            let side = 1u64 << depth;
            let total = side.pow(dimensions as u32);
            for index in 0..total {
                // Enumerate the Cartesian product in row-major order
                let mut rest = index;
                let coords: Vec<u64> = (0..dimensions)
                    .map(|_| {
                        let axis = rest % side;
                        rest /= side;
                        axis
                    })
                    .collect();

                let offset = encode(&coords).unwrap();
                assert_eq!(decode(offset, dimensions).unwrap().as_slice(), coords.as_slice());
                assert_eq!(
                    decode_with_depth(offset, dimensions, depth).unwrap().as_slice(),
                    coords.as_slice()
                );
            }
        }
    }

    println!("✅ Coordinate-first round trip passed");
}

#[test]
fn test_decoding_covers_every_cell_exactly_once() {
    for dimensions in 1..=4usize {
        for depth in 0..=3u32 {
            let cells = 1u64 << (dimensions as u32 * depth);
            let side = 1u64 << depth;
            let mut seen = HashSet::new();
            for offset in 0..cells {
                let coords = decode_with_depth(offset, dimensions, depth).unwrap();
                assert!(coords.iter().all(|&axis| axis < side));
                assert!(seen.insert(coords), "collision at offset {}", offset);
            }
            assert_eq!(seen.len() as u64, cells);
        }
    }
}

#[test]
fn test_exponent_boundaries() {
    let expected = [(0, 0), (1, 1), (2, 2), (3, 2), (7, 3), (8, 4)];
    for (n, e) in expected {
        assert_eq!(smallest_exponent_covering(n).unwrap(), e, "n = {}", n);
    }
}

#[test]
fn test_error_scenarios() {
    assert!(smallest_exponent_covering(-1).unwrap_err().is_invalid_argument());
    assert!(decode(3, 0).unwrap_err().is_invalid_argument());
    assert!(encode(&[]).unwrap_err().is_invalid_argument());
    assert!(decode_with_depth(64, 3, 2).unwrap_err().is_out_of_range());
    assert!(encode_with_depth(&[0, 4], 2).unwrap_err().is_out_of_range());
}

#[test]
fn test_curve_matches_decode() {
    let curve = MortonCurve::new(3, 2).unwrap();
    assert_eq!(curve.cell_count(), 64);
    assert_eq!(curve.size_hint(), (64, Some(64)));
    for (offset, coords) in curve {
        assert_eq!(decode(offset, 3).unwrap(), coords);
    }
}

proptest! {
    #[test]
    fn prop_offset_round_trip(offset in any::<u64>(), dimensions in 1usize..=8) {
        let coords = decode(offset, dimensions).unwrap();
        prop_assert_eq!(encode(&coords).unwrap(), offset);
    }

    #[test]
    fn prop_coordinate_round_trip(x in 0u64..(1 << 21), y in 0u64..(1 << 21), z in 0u64..(1 << 21)) {
        let offset = encode(&[x, y, z]).unwrap();
        let back = decode(offset, 3).unwrap();
        prop_assert_eq!(back.as_slice(), &[x, y, z]);
    }

    #[test]
    fn prop_fast_path_agrees_with_generic(x in 0u32..(1 << 21), y in 0u32..(1 << 21), z in 0u32..(1 << 21)) {
        let fast = morton_encode(x, y, z);
        prop_assert_eq!(encode(&[x as u64, y as u64, z as u64]).unwrap(), fast);
        prop_assert_eq!(morton_decode(fast), (x, y, z));
    }

    #[test]
    fn prop_order_is_preserved_along_each_axis(x in 0u64..(1 << 16), y in 0u64..(1 << 16)) {
        // Moving forward on one axis never moves backward on the curve
        let here = encode(&[x, y]).unwrap();
        prop_assert!(encode(&[x + 1, y]).unwrap() > here);
        prop_assert!(encode(&[x, y + 1]).unwrap() > here);
    }
}
