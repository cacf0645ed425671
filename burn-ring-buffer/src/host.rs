//! # Host Evaluation
//!
//! Direct evaluation of the ring buffer update: one pass over the output
//! elements, each resolved through [`WindowGeometry::locate`]. Elements do not
//! depend on each other, so the visiting order is irrelevant to the result.
//!
//! Operands are row-major contiguous slices. [`ring_buffer_host`] wraps the
//! same loop for Burn float tensors by reading them back to host memory.

use burn::{prelude::*, tensor::TensorData};

use crate::{
    error::{RingBufferError, RingBufferResult},
    update::validate,
    window::{Source, WindowGeometry},
};

/// Evaluates the update over row-major slices laid out per `geometry`.
///
/// `buffer` must hold `geometry.shape()` elements and `data` must hold
/// `geometry.data_shape()` elements.
pub fn gather_window<T: Copy>(
    geometry: &WindowGeometry,
    buffer: &[T],
    data: &[T],
) -> RingBufferResult<Vec<T>> {
    let data_shape = geometry.data_shape();
    let expected = geometry.num_elements();
    check_len("buffer", expected, buffer.len())?;
    check_len("data", data_shape.iter().product(), data.len())?;

    let buffer_strides = row_major_strides(geometry.shape());
    let data_strides = row_major_strides(&data_shape);

    let mut index = vec![0; geometry.rank()];
    let mut source = vec![0; geometry.rank()];
    let mut output = Vec::with_capacity(expected);
    for _ in 0..expected {
        source.copy_from_slice(&index);
        let value = match geometry.locate(&mut source) {
            Source::Buffer => buffer[offset(&source, &buffer_strides)],
            Source::Data => data[offset(&source, &data_strides)],
        };
        output.push(value);
        advance(&mut index, geometry.shape());
    }

    Ok(output)
}

/// Evaluates the update element by element on the host.
///
/// Produces the same values as [`crate::ring_buffer`] for float tensors. The
/// result is placed on the device of `buffer`.
pub fn ring_buffer_host<B: Backend, const D: usize>(
    buffer: Tensor<B, D>,
    data: Tensor<B, D>,
    axis: usize,
) -> RingBufferResult<Tensor<B, D>> {
    let geometry = validate(&buffer, &data, axis)?;
    let device = buffer.device();

    let buffer = read_host::<B, D>(buffer)?;
    let data = read_host::<B, D>(data)?;
    let output = gather_window(&geometry, &buffer, &data)?;

    tracing::trace!(
        axis,
        elements = output.len(),
        "evaluated ring buffer update on host"
    );

    Ok(Tensor::from_data(
        TensorData::new(output, geometry.shape().to_vec()),
        &device,
    ))
}

fn read_host<B: Backend, const D: usize>(
    tensor: Tensor<B, D>,
) -> RingBufferResult<Vec<B::FloatElem>> {
    tensor
        .into_data()
        .convert::<B::FloatElem>()
        .to_vec::<B::FloatElem>()
        .map_err(|e| RingBufferError::TensorData {
            reason: format!("{e:?}"),
        })
}

fn check_len(tensor: &'static str, expected: usize, actual: usize) -> RingBufferResult<()> {
    if expected == actual {
        Ok(())
    } else {
        Err(RingBufferError::ElementCount {
            tensor,
            expected,
            actual,
        })
    }
}

fn row_major_strides(shape: &[usize]) -> Vec<usize> {
    let mut strides = vec![1; shape.len()];
    for i in (0..shape.len().saturating_sub(1)).rev() {
        strides[i] = strides[i + 1] * shape[i + 1];
    }
    strides
}

fn offset(index: &[usize], strides: &[usize]) -> usize {
    index.iter().zip(strides).map(|(i, s)| i * s).sum()
}

/// Steps `index` to the next position in row-major order.
fn advance(index: &mut [usize], shape: &[usize]) {
    for dim in (0..shape.len()).rev() {
        index[dim] += 1;
        if index[dim] < shape[dim] {
            return;
        }
        index[dim] = 0;
    }
}
