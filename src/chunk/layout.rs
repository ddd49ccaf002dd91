use rayon::prelude::*;

use crate::morton::{
    decode_with_depth, encode_with_depth, next_power_of_two_exponent, Coordinates, MortonError,
    MortonResult,
};

/// A grid of equally sized chunks whose cells are stored chunk by chunk.
///
/// Chunks are numbered in row-major order (axis 0 fastest). Inside a chunk,
/// cells are stored along the Morton curve. Chunk sizes that are not a power
/// of two are rounded up, so every chunk occupies `chunk_volume()` slots and
/// the slots past `chunk_size` on any axis are padding.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChunkLayout {
    chunk_size: u64,
    chunk_span: Vec<u64>,
    depth: u32,
    chunk_volume: u64,
    chunk_count: u64,
}

impl ChunkLayout {
    pub fn new(chunk_size: u64, chunk_span: impl Into<Vec<u64>>) -> MortonResult<Self> {
        let chunk_span = chunk_span.into();
        if chunk_span.is_empty() {
            return Err(MortonError::invalid("chunk span needs at least one axis"));
        }
        if chunk_size == 0 {
            return Err(MortonError::invalid("chunk size must be at least 1"));
        }
        if let Some(axis) = chunk_span.iter().position(|&span| span == 0) {
            return Err(MortonError::invalid(format!("chunk span is empty along axis {}", axis)));
        }

        let dimensions = chunk_span.len();
        let depth = next_power_of_two_exponent(chunk_size);
        decode_with_depth(0, dimensions, depth)?;

        let too_large = || {
            MortonError::invalid(format!(
                "{} chunks of size {} do not fit a 64-bit index",
                chunk_span.len(),
                chunk_size
            ))
        };
        let chunk_volume = 1u64
            .checked_shl((dimensions as u64 * depth as u64) as u32)
            .ok_or_else(too_large)?;
        let chunk_count = chunk_span
            .iter()
            .try_fold(1u64, |acc, &span| acc.checked_mul(span))
            .ok_or_else(too_large)?;
        chunk_count.checked_mul(chunk_volume).ok_or_else(too_large)?;
        for &span in &chunk_span {
            span.checked_mul(chunk_size).ok_or_else(too_large)?;
        }

        log::debug!(
            "[ChunkLayout] {} axes, chunk size {} (depth {}), span {:?}, {} slots per chunk",
            dimensions,
            chunk_size,
            depth,
            chunk_span,
            chunk_volume
        );

        Ok(Self {
            chunk_size,
            chunk_span,
            depth,
            chunk_volume,
            chunk_count,
        })
    }

    pub fn dimensions(&self) -> usize {
        self.chunk_span.len()
    }

    pub fn chunk_size(&self) -> u64 {
        self.chunk_size
    }

    pub fn chunk_span(&self) -> &[u64] {
        &self.chunk_span
    }

    /// Morton depth of one chunk; `2^depth >= chunk_size`
    pub fn depth(&self) -> u32 {
        self.depth
    }

    /// Per-axis chunk size after rounding up to a power of two
    pub fn padded_chunk_size(&self) -> u64 {
        1u64 << self.depth
    }

    /// Index slots reserved per chunk, padding included
    pub fn chunk_volume(&self) -> u64 {
        self.chunk_volume
    }

    pub fn chunk_count(&self) -> u64 {
        self.chunk_count
    }

    /// Cells along each axis of the whole world
    pub fn world_extent(&self) -> Vec<u64> {
        self.chunk_span.iter().map(|span| span * self.chunk_size).collect()
    }

    /// Real cells in the world, padding excluded
    pub fn cell_count(&self) -> u64 {
        self.world_extent().iter().product()
    }

    /// Length of a chunkified buffer, padding included
    pub fn index_capacity(&self) -> u64 {
        self.chunk_count * self.chunk_volume
    }

    fn check_coordinates(&self, coords: &[u64]) -> MortonResult<()> {
        if coords.len() != self.dimensions() {
            return Err(MortonError::invalid(format!(
                "expected {} coordinates, got {}",
                self.dimensions(),
                coords.len()
            )));
        }
        for (&value, &span) in coords.iter().zip(&self.chunk_span) {
            let extent = span * self.chunk_size;
            if value >= extent {
                return Err(MortonError::out_of_range("coordinate", value, extent - 1));
            }
        }
        Ok(())
    }

    /// Position of the chunk holding `coords`, in chunk units
    pub fn chunk_coordinates(&self, coords: &[u64]) -> MortonResult<Coordinates> {
        self.check_coordinates(coords)?;
        Ok(coords.iter().map(|value| value / self.chunk_size).collect::<Vec<_>>().into())
    }

    /// Row-major number of the chunk holding `coords`
    pub fn chunk_index(&self, coords: &[u64]) -> MortonResult<u64> {
        let chunk = self.chunk_coordinates(coords)?;
        Ok(row_major_index(&chunk, &self.chunk_span))
    }

    /// Coordinates of `coords` relative to the origin of its chunk
    pub fn local_coordinates(&self, coords: &[u64]) -> MortonResult<Coordinates> {
        self.check_coordinates(coords)?;
        Ok(coords.iter().map(|value| value % self.chunk_size).collect::<Vec<_>>().into())
    }

    /// Index of `coords` in a chunkified buffer
    pub fn chunkified_index(&self, coords: &[u64]) -> MortonResult<u64> {
        let chunk_index = self.chunk_index(coords)?;
        let local = self.local_coordinates(coords)?;
        let local_offset = encode_with_depth(&local, self.depth)?;
        Ok(chunk_index * self.chunk_volume + local_offset)
    }

    /// Inverse of [`Self::chunkified_index`]. Padding slots are out of range.
    pub fn coordinates_of(&self, index: u64) -> MortonResult<Coordinates> {
        let capacity = self.index_capacity();
        if index >= capacity {
            return Err(MortonError::out_of_range("chunkified index", index, capacity - 1));
        }
        self.locate(index)?
            .ok_or_else(|| MortonError::out_of_range("padding slot", index, self.chunk_size - 1))
    }

    /// Cell stored at a chunkified slot, or `None` for padding
    fn locate(&self, index: u64) -> MortonResult<Option<Coordinates>> {
        let chunk = row_major_coordinates(index / self.chunk_volume, &self.chunk_span);
        let local = decode_with_depth(index % self.chunk_volume, self.dimensions(), self.depth)?;
        if local.iter().any(|&value| value >= self.chunk_size) {
            return Ok(None);
        }
        let coords: Vec<u64> = chunk
            .iter()
            .zip(local.iter())
            .map(|(chunk_axis, local_axis)| chunk_axis * self.chunk_size + local_axis)
            .collect();
        Ok(Some(coords.into()))
    }

    /// Index of `coords` in a plain row-major buffer of the whole world
    pub fn linear_index(&self, coords: &[u64]) -> MortonResult<u64> {
        self.check_coordinates(coords)?;
        Ok(row_major_index(coords, &self.world_extent()))
    }

    /// Inverse of [`Self::linear_index`]
    pub fn linear_coordinates(&self, index: u64) -> MortonResult<Coordinates> {
        let cells = self.cell_count();
        if index >= cells {
            return Err(MortonError::out_of_range("linear index", index, cells - 1));
        }
        Ok(row_major_coordinates(index, &self.world_extent()).into())
    }

    /// Reorders a row-major world buffer into chunkified order.
    ///
    /// Padding slots come back as `None`.
    pub fn chunkify<T>(&self, linear: &[T]) -> MortonResult<Vec<Option<T>>>
    where
        T: Clone + Send + Sync,
    {
        let cells = self.cell_count();
        if linear.len() as u64 != cells {
            return Err(MortonError::out_of_range("buffer length", linear.len() as u64, cells));
        }
        let capacity = buffer_len(self.index_capacity())?;
        let extent = self.world_extent();

        log::trace!("[ChunkLayout] chunkifying {} cells into {} slots", cells, capacity);

        (0..capacity)
            .into_par_iter()
            .map(|index| -> MortonResult<Option<T>> {
                let cell = self.locate(index as u64)?;
                Ok(cell.map(|coords| linear[row_major_index(&coords, &extent) as usize].clone()))
            })
            .collect()
    }

    /// Reorders a chunkified buffer back into row-major world order.
    pub fn unchunkify<T>(&self, chunked: &[Option<T>]) -> MortonResult<Vec<T>>
    where
        T: Clone + Send + Sync,
    {
        let capacity = self.index_capacity();
        if chunked.len() as u64 != capacity {
            return Err(MortonError::out_of_range("buffer length", chunked.len() as u64, capacity));
        }
        let cells = buffer_len(self.cell_count())?;

        log::trace!("[ChunkLayout] unchunkifying {} slots into {} cells", capacity, cells);

        (0..cells)
            .into_par_iter()
            .map(|index| -> MortonResult<T> {
                let coords = self.linear_coordinates(index as u64)?;
                let slot = self.chunkified_index(&coords)?;
                chunked[slot as usize].clone().ok_or_else(|| {
                    MortonError::invalid(format!("chunkified buffer has no value for cell {}", coords))
                })
            })
            .collect()
    }
}

fn buffer_len(len: u64) -> MortonResult<usize> {
    usize::try_from(len).map_err(|_| MortonError::out_of_range("buffer length", len, usize::MAX as u64))
}

/// `x + y·sx + z·sx·sy + ...`
fn row_major_index(coords: &[u64], extent: &[u64]) -> u64 {
    coords
        .iter()
        .zip(extent)
        .rev()
        .fold(0, |acc, (&value, &size)| acc * size + value)
}

fn row_major_coordinates(mut index: u64, extent: &[u64]) -> Vec<u64> {
    extent
        .iter()
        .map(|&size| {
            let value = index % size;
            index /= size;
            value
        })
        .collect()
}
