use burn::{
    backend::{ndarray::NdArrayDevice, NdArray},
    prelude::*,
};
use burn_ring_buffer::{
    ring_buffer, ring_buffer_host, RingBufferError, RingBufferStream, TensorRingBufferOps,
};

type TestBackend = NdArray<f32>;
type TestDevice = NdArrayDevice;

/// Tensor of `shape` holding `start, start + 1, ...` in row-major order.
fn arange<const D: usize>(
    shape: [usize; D],
    start: i64,
    device: &TestDevice,
) -> Tensor<TestBackend, D> {
    let len = shape.iter().product::<usize>() as i64;
    Tensor::<TestBackend, 1, Int>::arange(start..start + len, device)
        .float()
        .reshape(shape)
}

fn values<const D: usize>(tensor: Tensor<TestBackend, D>) -> Vec<f32> {
    tensor.into_data().to_vec::<f32>().unwrap()
}

/// Checks shape, chunk and history preservation, and agreement with the host
/// evaluation for one update.
fn check_update<const D: usize>(shape: [usize; D], axis: usize, chunk: usize) {
    let device = TestDevice::default();
    let mut data_shape = shape;
    data_shape[axis] = chunk;
    let buffer = arange(shape, 0, &device);
    let data = arange(data_shape, 10_000, &device);
    let retained = shape[axis] - chunk;

    let output = ring_buffer(buffer.clone(), data.clone(), axis).unwrap();

    assert_eq!(output.dims(), shape, "shape for {shape:?} axis {axis}");
    assert_eq!(
        values(output.clone().narrow(axis, retained, chunk)),
        values(data.clone()),
        "chunk preserved for {shape:?} axis {axis}"
    );
    if retained > 0 {
        assert_eq!(
            values(output.clone().narrow(axis, 0, retained)),
            values(buffer.clone().narrow(axis, chunk, retained)),
            "history preserved for {shape:?} axis {axis}"
        );
    }

    let host = ring_buffer_host(buffer, data, axis).unwrap();
    assert_eq!(values(host), values(output), "host evaluation for {shape:?} axis {axis}");
}

#[test]
fn concrete_scenario_rank_one() {
    let device = TestDevice::default();
    let buffer = Tensor::<TestBackend, 1>::from_floats([10.0, 20.0, 30.0, 40.0], &device);
    let data = Tensor::<TestBackend, 1>::from_floats([50.0, 60.0], &device);

    let output = buffer.ring_buffer_update(data, 0).unwrap();

    assert_eq!(values(output), vec![30.0, 40.0, 50.0, 60.0]);
}

#[test]
fn updates_every_axis_rank_two_and_three() {
    for axis in 0..2 {
        check_update([5, 4], axis, 2);
    }
    for axis in 0..3 {
        check_update([3, 4, 5], axis, 3);
    }
}

#[test]
fn updates_every_axis_rank_four() {
    for axis in 0..4 {
        check_update([4, 3, 5, 2], axis, 2);
    }
}

#[test]
fn updates_every_axis_rank_five_and_six() {
    for axis in 0..5 {
        check_update([3, 2, 4, 2, 3], axis, 1);
    }
    for axis in 0..6 {
        check_update([2, 3, 2, 2, 3, 2], axis, 2);
    }
}

#[test]
fn full_replacement_keeps_no_history() {
    for axis in 0..3 {
        let shape = [3, 4, 2];
        check_update(shape, axis, shape[axis]);

        let device = TestDevice::default();
        let buffer = arange(shape, 0, &device);
        let data = arange(shape, 500, &device);
        let output = ring_buffer(buffer, data.clone(), axis).unwrap();
        assert_eq!(values(output), values(data));
    }
}

/// Updates a window with a zero-sized dimension off the stream axis through
/// the tensor form, the host form and a stream.
fn check_empty_update<const D: usize>(shape: [usize; D], axis: usize, chunk: usize) {
    let device = TestDevice::default();
    let mut data_shape = shape;
    data_shape[axis] = chunk;
    let buffer = Tensor::<TestBackend, D>::zeros(shape, &device);
    let data = Tensor::<TestBackend, D>::zeros(data_shape, &device);

    let output = ring_buffer(buffer.clone(), data.clone(), axis).unwrap();
    assert_eq!(output.dims(), shape, "shape for {shape:?} axis {axis}");

    let host = ring_buffer_host(buffer, data.clone(), axis).unwrap();
    assert_eq!(host.dims(), shape, "host shape for {shape:?} axis {axis}");
    assert_eq!(values(host), values(output));

    let mut stream = RingBufferStream::<TestBackend, D>::zeros(shape, axis, &device).unwrap();
    let window = stream.push(data).unwrap();
    assert_eq!(window.dims(), shape, "stream shape for {shape:?} axis {axis}");
    assert_eq!(stream.steps(), 1);
}

#[test]
fn zero_sized_dimension_off_axis_is_valid() {
    check_empty_update([3, 0], 0, 1);
    check_empty_update([3, 0], 0, 3);
    check_empty_update([0, 4, 2], 1, 2);
    check_empty_update([2, 5, 0, 3], 1, 4);
}

#[test]
fn minimal_update_shifts_by_one() {
    let device = TestDevice::default();
    let buffer = Tensor::<TestBackend, 2>::from_floats(
        [[1.0, 2.0], [3.0, 4.0], [5.0, 6.0], [7.0, 8.0]],
        &device,
    );
    let data = Tensor::<TestBackend, 2>::from_floats([[9.0, 10.0]], &device);

    let output = ring_buffer(buffer, data, 0).unwrap();

    assert_eq!(values(output), vec![3.0, 4.0, 5.0, 6.0, 7.0, 8.0, 9.0, 10.0]);
}

#[test]
fn precondition_violations_map_to_error_variants() {
    let device = TestDevice::default();
    let buffer = Tensor::<TestBackend, 4>::zeros([4, 8, 8, 3], &device);

    let err = ring_buffer(buffer.clone(), Tensor::zeros([1, 8, 8, 3], &device), 5).unwrap_err();
    assert!(matches!(err, RingBufferError::AxisOutOfRange { axis: 5, rank: 4 }));

    let err = ring_buffer(buffer.clone(), Tensor::zeros([6, 8, 8, 3], &device), 0).unwrap_err();
    assert!(matches!(
        err,
        RingBufferError::WindowOverflow { axis: 0, chunk: 6, window: 4 }
    ));

    let err = ring_buffer(buffer, Tensor::zeros([1, 8, 4, 3], &device), 0).unwrap_err();
    assert!(matches!(err, RingBufferError::DimensionMismatch { dim: 2, .. }));
}

#[test]
fn stream_matches_tail_of_history() {
    let device = TestDevice::default();
    let window = 5;
    let mut stream = RingBufferStream::<TestBackend, 2>::zeros([window, 2], 0, &device).unwrap();

    // Zero-initialized window followed by every chunk, one row per time step.
    let mut history = vec![0.0_f32; window * 2];
    let mut next = 1_i64;
    for chunk in [2, 1, 3, 5, 1, 4] {
        let data = arange([chunk, 2], next, &device);
        history.extend(values(data.clone()));
        next += (chunk * 2) as i64;

        let current = stream.push(data).unwrap();

        let tail = history[history.len() - window * 2..].to_vec();
        assert_eq!(values(current.clone()), tail);
    }
    assert_eq!(stream.steps(), 6);
}

#[test]
fn independent_streams_do_not_interfere() {
    let device = TestDevice::default();
    let mut left = RingBufferStream::<TestBackend, 1>::zeros([3], 0, &device).unwrap();
    let mut right = RingBufferStream::<TestBackend, 1>::zeros([3], 0, &device).unwrap();

    left.push(Tensor::from_floats([1.0, 2.0], &device)).unwrap();
    right.push(Tensor::from_floats([7.0], &device)).unwrap();
    left.push(Tensor::from_floats([3.0], &device)).unwrap();

    assert_eq!(values(left.into_inner()), vec![1.0, 2.0, 3.0]);
    assert_eq!(values(right.into_inner()), vec![0.0, 0.0, 7.0]);
}
