pub mod chunk;
pub mod config;
pub mod morton;

pub use chunk::ChunkLayout;
pub use config::{ConfigError, LayoutConfig};
pub use morton::{
    decode, decode_array, decode_with_depth, encode, encode_array, encode_with_depth,
    smallest_exponent_covering, Coordinates, MortonCurve, MortonError, MortonResult,
};
