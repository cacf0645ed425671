//! Error types for the ring buffer operator.
//!
//! Every failure is a validation failure detected before any element is
//! computed, so callers never observe a partially updated window.

use burn::tensor::DType;
use thiserror::Error;

/// Error type for ring buffer updates and their registration contract.
#[derive(Error, Debug, Clone)]
pub enum RingBufferError {
    /// Buffer and data have a different number of dimensions.
    #[error(
        "buffer and data must have the same number of dimensions, buffer has {buffer}, data has {data}"
    )]
    RankMismatch {
        /// Rank of the buffer.
        buffer: usize,
        /// Rank of the data chunk.
        data: usize,
    },

    /// A dimension other than the buffer axis differs between buffer and data.
    #[error(
        "data shape {data:?} is inconsistent with buffer shape {buffer:?} in dimension {dim}"
    )]
    DimensionMismatch {
        /// The first mismatching dimension.
        dim: usize,
        /// Buffer shape.
        buffer: Vec<usize>,
        /// Data shape.
        data: Vec<usize>,
    },

    /// The buffer axis is not a valid dimension index.
    #[error("buffer axis out of range: {axis} (rank {rank})")]
    AxisOutOfRange {
        /// Requested axis.
        axis: usize,
        /// Rank of the buffer.
        rank: usize,
    },

    /// The chunk is longer than the window along the buffer axis.
    #[error("data must be shorter than buffer in dimension {axis}: chunk {chunk} > window {window}")]
    WindowOverflow {
        /// Buffer axis.
        axis: usize,
        /// Chunk length along the axis.
        chunk: usize,
        /// Window length along the axis.
        window: usize,
    },

    /// The chunk has no elements along the buffer axis.
    #[error("data chunk is empty along buffer axis {axis}")]
    EmptyChunk {
        /// Buffer axis.
        axis: usize,
    },

    /// Buffer and data hold different element types.
    #[error("buffer and data must share an element type, buffer is {buffer:?}, data is {data:?}")]
    DTypeMismatch {
        /// Buffer element type.
        buffer: DType,
        /// Data element type.
        data: DType,
    },

    /// The operator was handed the wrong number of inputs.
    #[error("ring_buffer expects {expected} inputs, got {actual}")]
    ArityMismatch {
        /// Required number of inputs.
        expected: usize,
        /// Number of inputs received.
        actual: usize,
    },

    /// A required attribute is absent from the attribute set.
    #[error("missing required attribute '{name}'")]
    MissingAttribute {
        /// Attribute name.
        name: &'static str,
    },

    /// An attribute value could not be interpreted.
    #[error("invalid value '{value}' for attribute '{name}': {reason}")]
    InvalidAttribute {
        /// Attribute name.
        name: &'static str,
        /// Raw attribute value.
        value: String,
        /// Why the value was rejected.
        reason: String,
    },

    /// A host slice does not hold as many elements as its shape describes.
    #[error("{tensor} holds {actual} elements, its shape requires {expected}")]
    ElementCount {
        /// Which operand, `"buffer"` or `"data"`.
        tensor: &'static str,
        /// Element count implied by the shape.
        expected: usize,
        /// Length of the slice.
        actual: usize,
    },

    /// Reading tensor elements back to the host failed.
    #[error("failed to read tensor data: {reason}")]
    TensorData {
        /// Description of the underlying conversion error.
        reason: String,
    },
}

/// A specialized `Result` type for ring buffer operations.
pub type RingBufferResult<T> = Result<T, RingBufferError>;
