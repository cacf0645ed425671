//! # Streaming Window
//!
//! Caller-side helper for the step sequence of a streaming model: create a
//! buffer once, then feed it one chunk at a time. Each push runs one
//! [`ring_buffer`] update and rebinds the result as the current window.

use burn::{
    prelude::*,
    tensor::{BasicOps, Float},
};

use crate::{
    error::{RingBufferError, RingBufferResult},
    update::ring_buffer,
};

/// A sliding window over a stream of chunks along one axis.
///
/// Pushes take `&mut self`, so the updates of one stream are applied strictly
/// in order. Separate streams share nothing and can be driven independently.
pub struct RingBufferStream<B: Backend, const D: usize, K: BasicOps<B> = Float> {
    buffer: Tensor<B, D, K>,
    axis: usize,
    steps: usize,
}

impl<B: Backend, const D: usize> RingBufferStream<B, D> {
    /// Starts a stream from a zero-filled window of the given shape.
    pub fn zeros(shape: [usize; D], axis: usize, device: &B::Device) -> RingBufferResult<Self> {
        Self::new(Tensor::zeros(shape, device), axis)
    }
}

impl<B: Backend, const D: usize, K: BasicOps<B>> RingBufferStream<B, D, K> {
    /// Starts a stream from an existing window.
    pub fn new(buffer: Tensor<B, D, K>, axis: usize) -> RingBufferResult<Self> {
        if axis >= D {
            return Err(RingBufferError::AxisOutOfRange { axis, rank: D });
        }
        Ok(Self {
            buffer,
            axis,
            steps: 0,
        })
    }

    /// Admits `data` into the window and returns the new window.
    ///
    /// On error the current window is left as it was.
    pub fn push(&mut self, data: Tensor<B, D, K>) -> RingBufferResult<&Tensor<B, D, K>> {
        self.buffer = ring_buffer(self.buffer.clone(), data, self.axis)?;
        self.steps += 1;

        tracing::debug!(
            step = self.steps,
            axis = self.axis,
            window = self.window_len(),
            "ring buffer advanced"
        );

        Ok(&self.buffer)
    }

    /// The current window.
    pub const fn window(&self) -> &Tensor<B, D, K> {
        &self.buffer
    }

    /// Axis along which chunks are appended.
    pub const fn axis(&self) -> usize {
        self.axis
    }

    /// Window length along the stream axis.
    pub fn window_len(&self) -> usize {
        self.buffer.dims()[self.axis]
    }

    /// Number of successful pushes.
    pub const fn steps(&self) -> usize {
        self.steps
    }

    /// Consumes the stream and returns the current window.
    pub fn into_inner(self) -> Tensor<B, D, K> {
        self.buffer
    }
}
