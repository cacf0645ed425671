//! # Ring Buffer Update
//!
//! Graph-level form of the sliding-window update. The retained region of the
//! old buffer is narrowed out along the buffer axis and the incoming chunk is
//! concatenated behind it, which is exactly the elementwise rule described in
//! [`crate::window`]. Lowering, fusion and parallelization are left to the
//! Burn backend.

use core::marker::PhantomData;

use burn::{prelude::*, tensor::BasicOps};

use crate::{
    error::{RingBufferError, RingBufferResult},
    window::WindowGeometry,
};

/// Evicts the oldest `S` entries of `buffer` along `axis` and appends `data`.
///
/// `S` is the length of `data` along `axis`. The output has the shape of
/// `buffer`. Neither operand is modified; ownership of the result goes to the
/// caller, who usually rebinds it as the buffer for the next step.
///
/// # Shapes
/// - buffer: `[d_0, ..., L, ..., d_{D-1}]`
/// - data: `[d_0, ..., S, ..., d_{D-1}]` with `1 <= S <= L`
/// - output: `[d_0, ..., L, ..., d_{D-1}]`
///
/// # Errors
/// Returns an error when the shapes, axis or element types are incompatible.
/// Validation happens before any tensor operation is issued.
pub fn ring_buffer<B, const D: usize, K>(
    buffer: Tensor<B, D, K>,
    data: Tensor<B, D, K>,
    axis: usize,
) -> RingBufferResult<Tensor<B, D, K>>
where
    B: Backend,
    K: BasicOps<B>,
{
    let geometry = validate(&buffer, &data, axis)?;

    tracing::trace!(
        axis,
        window = geometry.window_len(),
        chunk = geometry.chunk_len(),
        "ring buffer update"
    );

    // Burn rejects empty slice ranges, and an empty window has nothing to move.
    if geometry.num_elements() == 0 {
        return Ok(buffer);
    }
    if geometry.is_full_replacement() {
        return Ok(data);
    }

    let retained = buffer.narrow(axis, geometry.chunk_len(), geometry.retained_len());
    Ok(Tensor::cat(vec![retained, data], axis))
}

/// Resolves the geometry of an update and checks that both operands share an
/// element type.
pub(crate) fn validate<B, const D: usize, K>(
    buffer: &Tensor<B, D, K>,
    data: &Tensor<B, D, K>,
    axis: usize,
) -> RingBufferResult<WindowGeometry>
where
    B: Backend,
    K: BasicOps<B>,
{
    let geometry = WindowGeometry::infer(&buffer.dims(), &data.dims(), axis)?;

    let (buffer_dtype, data_dtype) = (buffer.dtype(), data.dtype());
    if buffer_dtype != data_dtype {
        return Err(RingBufferError::DTypeMismatch {
            buffer: buffer_dtype,
            data: data_dtype,
        });
    }

    Ok(geometry)
}

/// Configuration for the [`RingBuffer`] module.
#[derive(Config, Debug)]
pub struct RingBufferConfig {
    /// The axis along which to buffer previous inputs.
    pub axis: usize,
}

impl RingBufferConfig {
    /// Initializes a new [`RingBuffer`] module.
    pub const fn init<B: Backend>(&self, _device: &B::Device) -> RingBuffer<B> {
        RingBuffer {
            axis: self.axis,
            _phantom: PhantomData,
        }
    }
}

/// Ring buffer module, a stateless wrapper around [`ring_buffer`] with a fixed axis.
#[derive(Module, Debug)]
pub struct RingBuffer<B: Backend> {
    axis: usize,
    _phantom: PhantomData<B>,
}

impl<B: Backend> RingBuffer<B> {
    /// The configured buffer axis.
    pub const fn axis(&self) -> usize {
        self.axis
    }

    /// Applies one update step, see [`ring_buffer`].
    pub fn forward<const D: usize, K: BasicOps<B>>(
        &self,
        buffer: Tensor<B, D, K>,
        data: Tensor<B, D, K>,
    ) -> RingBufferResult<Tensor<B, D, K>> {
        ring_buffer(buffer, data, self.axis)
    }
}
