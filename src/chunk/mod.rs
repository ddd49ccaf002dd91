/// Chunked world addressing
///
/// Splits a world into a grid of chunks and stores each chunk's cells along
/// the Morton curve, so neighbouring cells of a chunk share cache lines.

pub mod layout;

pub use layout::ChunkLayout;
