//! # Window Geometry
//!
//! Validates a `(buffer, data, axis)` triple once and resolves it into plain
//! integers: the buffer shape, the window length `L` and the chunk length `S`
//! along the buffer axis. The same geometry drives the index transform that
//! every output element of an update goes through:
//!
//! ```text
//! c = idx[axis]
//! c <  L - S  ->  buffer[idx with axis = c + S]
//! c >= L - S  ->  data  [idx with axis = c - (L - S)]
//! ```
//!
//! The transform only touches the axis coordinate, so it works for any rank.

use crate::error::{RingBufferError, RingBufferResult};

/// Operand an output element is read from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Source {
    /// Retained history from the previous window.
    Buffer,
    /// The incoming chunk.
    Data,
}

/// Validated shape information for one ring buffer update.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct WindowGeometry {
    shape: Vec<usize>,
    axis: usize,
    window_len: usize,
    chunk_len: usize,
}

impl WindowGeometry {
    /// Checks that `data` can be appended to `buffer` along `axis`.
    ///
    /// Checks run in order: rank, axis, non-axis dimensions, empty chunk,
    /// window overflow. The first failure is returned.
    pub fn infer(buffer: &[usize], data: &[usize], axis: usize) -> RingBufferResult<Self> {
        if buffer.len() != data.len() {
            return Err(RingBufferError::RankMismatch {
                buffer: buffer.len(),
                data: data.len(),
            });
        }
        if axis >= buffer.len() {
            return Err(RingBufferError::AxisOutOfRange {
                axis,
                rank: buffer.len(),
            });
        }
        if let Some(dim) = (0..buffer.len()).find(|&i| i != axis && buffer[i] != data[i]) {
            return Err(RingBufferError::DimensionMismatch {
                dim,
                buffer: buffer.to_vec(),
                data: data.to_vec(),
            });
        }

        let window_len = buffer[axis];
        let chunk_len = data[axis];
        if chunk_len == 0 {
            return Err(RingBufferError::EmptyChunk { axis });
        }
        if chunk_len > window_len {
            return Err(RingBufferError::WindowOverflow {
                axis,
                chunk: chunk_len,
                window: window_len,
            });
        }

        Ok(Self {
            shape: buffer.to_vec(),
            axis,
            window_len,
            chunk_len,
        })
    }

    /// Shape of the buffer, which is also the shape of the output.
    pub fn shape(&self) -> &[usize] {
        &self.shape
    }

    /// Shape of the data chunk.
    pub fn data_shape(&self) -> Vec<usize> {
        let mut shape = self.shape.clone();
        shape[self.axis] = self.chunk_len;
        shape
    }

    /// The axis the window slides along.
    pub const fn axis(&self) -> usize {
        self.axis
    }

    /// Number of dimensions of both operands.
    pub fn rank(&self) -> usize {
        self.shape.len()
    }

    /// Window length `L`.
    pub const fn window_len(&self) -> usize {
        self.window_len
    }

    /// Chunk length `S`.
    pub const fn chunk_len(&self) -> usize {
        self.chunk_len
    }

    /// Number of old slots kept by the update, `L - S`.
    pub const fn retained_len(&self) -> usize {
        self.window_len - self.chunk_len
    }

    /// Whether the chunk replaces the whole window.
    pub const fn is_full_replacement(&self) -> bool {
        self.chunk_len == self.window_len
    }

    /// Number of elements in the output.
    pub fn num_elements(&self) -> usize {
        self.shape.iter().product()
    }

    /// Maps an output index to its source index in place and returns the
    /// operand to read it from.
    ///
    /// `index` must be a valid index into [`Self::shape`].
    pub fn locate(&self, index: &mut [usize]) -> Source {
        debug_assert_eq!(index.len(), self.shape.len());
        let coord = index[self.axis];
        let retained = self.retained_len();
        if coord < retained {
            index[self.axis] = coord + self.chunk_len;
            Source::Buffer
        } else {
            index[self.axis] = coord - retained;
            Source::Data
        }
    }

    /// Allocating variant of [`Self::locate`].
    pub fn source_index(&self, index: &[usize]) -> (Source, Vec<usize>) {
        let mut source = index.to_vec();
        let operand = self.locate(&mut source);
        (operand, source)
    }
}
