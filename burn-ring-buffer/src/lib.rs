//! Sliding-window ring buffer update for the Burn deep learning framework
//!
//! A buffer tensor keeps the most recent `L` entries along one axis. Each
//! update evicts the oldest `S` entries and appends a new chunk of length `S`,
//! producing a fresh tensor of the buffer's shape. This lets streaming models
//! consume their input in chunks while keeping a fixed history window.
//!
//! The update works for any rank and any axis. It is available as a Burn
//! tensor operation ([`ring_buffer`], [`RingBuffer`]), as a direct per-element
//! evaluation ([`gather_window`], [`ring_buffer_host`]) and through an
//! operator descriptor for compute-graph runtimes ([`RingBufferOp`]).

use burn::{prelude::*, tensor::BasicOps};

mod error;
mod host;
mod registry;
mod stream;
mod update;
mod window;

// Convenient re-exports
#[doc(inline)]
pub use error::{RingBufferError, RingBufferResult};
#[doc(inline)]
pub use host::{gather_window, ring_buffer_host};
#[doc(inline)]
pub use registry::{OpArgument, OpRegistration, RingBufferOp, Schedule, ScheduleKind, Target};
#[doc(inline)]
pub use stream::RingBufferStream;
#[doc(inline)]
pub use update::{ring_buffer, RingBuffer, RingBufferConfig};
#[doc(inline)]
pub use window::{Source, WindowGeometry};

/// Ring buffer operations for Burn tensors
pub trait TensorRingBufferOps<B: Backend, const D: usize, K: BasicOps<B>>: Sized {
    /// Treats `self` as the buffer and appends `data` along `axis`, see [`ring_buffer`].
    fn ring_buffer_update(self, data: Tensor<B, D, K>, axis: usize) -> RingBufferResult<Self>;
}

impl<B: Backend, const D: usize, K: BasicOps<B>> TensorRingBufferOps<B, D, K>
    for Tensor<B, D, K>
{
    fn ring_buffer_update(self, data: Self, axis: usize) -> RingBufferResult<Self> {
        ring_buffer(self, data, axis)
    }
}
