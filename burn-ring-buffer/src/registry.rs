//! # Operator Registration
//!
//! Describes the ring buffer operator to a compute-graph runtime: its name,
//! arity, attribute parsing, shape and type inference, the compute function
//! and the schedule it wants. Registering the descriptor with a concrete
//! runtime is up to the caller.

use std::collections::BTreeMap;

use burn::{
    prelude::*,
    tensor::{BasicOps, DType},
};

use crate::{
    error::{RingBufferError, RingBufferResult},
    update::{ring_buffer, RingBufferConfig},
    window::WindowGeometry,
};

/// Named input slot of an operator.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OpArgument {
    /// Slot name, e.g. `"buffer"`.
    pub name: &'static str,
    /// Kind of value the slot accepts, e.g. `"Tensor"`.
    pub type_info: &'static str,
    pub description: &'static str,
}

/// Device a schedule is generated for, e.g. `"llvm"` or `"cuda"`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Target {
    name: String,
}

impl Target {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }

    pub fn name(&self) -> &str {
        &self.name
    }
}

/// Schedule families understood by the backend.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ScheduleKind {
    /// Every output element is computed independently; any elementwise
    /// schedule is valid.
    Injective,
}

/// Schedule requested for an operator's outputs on a target.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Schedule {
    pub kind: ScheduleKind,
    pub target: Target,
    /// Shapes of the output tensors covered by the schedule.
    pub outputs: Vec<Vec<usize>>,
    /// Tag attached to the generated kernel, e.g. `"injective,ring_buffer"`.
    pub tag: String,
}

/// Registration contract for a compute-graph operator.
pub trait OpRegistration {
    /// Parsed attribute set.
    type Attrs;

    /// Name the operator is registered under.
    const NAME: &'static str;
    /// Number of tensor inputs the operator takes.
    const NUM_INPUTS: usize;
    /// Number of tensor outputs the operator produces.
    const NUM_OUTPUTS: usize;
    /// Maturity level reported to the runtime; lower is more widely supported.
    const SUPPORT_LEVEL: u32;

    /// Human readable description of the operator.
    fn describe() -> &'static str;

    /// Input slots, in call order.
    fn arguments() -> &'static [OpArgument];

    /// Input slots the runtime rebinds to the output after each call.
    fn mutate_inputs() -> &'static [usize] {
        &[]
    }

    /// Parses the raw string attributes of a graph node.
    fn parse_attrs(attrs: &BTreeMap<String, String>) -> RingBufferResult<Self::Attrs>;

    /// Output shape for the given input shapes, or the violated precondition.
    fn infer_shape(attrs: &Self::Attrs, inputs: &[&[usize]]) -> RingBufferResult<Vec<usize>>;

    /// Output element type for the given input element types.
    fn infer_type(attrs: &Self::Attrs, inputs: &[DType]) -> RingBufferResult<DType>;

    /// Evaluates the operator on concrete tensors, one entry per input slot.
    fn compute<B: Backend, const D: usize, K: BasicOps<B>>(
        attrs: &Self::Attrs,
        inputs: Vec<Tensor<B, D, K>>,
    ) -> RingBufferResult<Vec<Tensor<B, D, K>>>;

    /// Schedule for the operator's outputs, given their shapes. Defaults to a
    /// generic injective schedule tagged with the operator name.
    fn schedule(target: &Target, outputs: &[&[usize]]) -> Schedule {
        Schedule {
            kind: ScheduleKind::Injective,
            target: target.clone(),
            outputs: outputs.iter().map(|shape| shape.to_vec()).collect(),
            tag: format!("injective,{}", Self::NAME),
        }
    }
}

/// The `ring_buffer` operator.
#[derive(Debug, Clone, Copy, Default)]
pub struct RingBufferOp;

const AXIS_ATTR: &str = "axis";

const ARGUMENTS: [OpArgument; 2] = [
    OpArgument {
        name: "buffer",
        type_info: "Tensor",
        description: "Buffer storing the latest [length_buffer] inputs",
    },
    OpArgument {
        name: "data",
        type_info: "Tensor",
        description: "Latest input",
    },
];

fn check_arity(actual: usize) -> RingBufferResult<()> {
    if actual == RingBufferOp::NUM_INPUTS {
        Ok(())
    } else {
        Err(RingBufferError::ArityMismatch {
            expected: RingBufferOp::NUM_INPUTS,
            actual,
        })
    }
}

impl OpRegistration for RingBufferOp {
    type Attrs = RingBufferConfig;

    const NAME: &'static str = "ring_buffer";
    const NUM_INPUTS: usize = 2;
    const NUM_OUTPUTS: usize = 1;
    const SUPPORT_LEVEL: u32 = 1;

    fn describe() -> &'static str {
        "Implements a ring buffer, in which a set number of past inputs are cached. \
         The output is the latest [length_buffer] entries along the buffer axis."
    }

    fn arguments() -> &'static [OpArgument] {
        &ARGUMENTS
    }

    fn mutate_inputs() -> &'static [usize] {
        &[0]
    }

    fn parse_attrs(attrs: &BTreeMap<String, String>) -> RingBufferResult<RingBufferConfig> {
        let raw = attrs
            .get(AXIS_ATTR)
            .ok_or(RingBufferError::MissingAttribute { name: AXIS_ATTR })?;
        let axis = raw
            .trim()
            .parse::<i64>()
            .map_err(|e| RingBufferError::InvalidAttribute {
                name: AXIS_ATTR,
                value: raw.clone(),
                reason: e.to_string(),
            })?;
        let axis = usize::try_from(axis).map_err(|_| RingBufferError::InvalidAttribute {
            name: AXIS_ATTR,
            value: raw.clone(),
            reason: "axis must be non-negative".to_string(),
        })?;

        Ok(RingBufferConfig::new(axis))
    }

    fn infer_shape(
        attrs: &RingBufferConfig,
        inputs: &[&[usize]],
    ) -> RingBufferResult<Vec<usize>> {
        check_arity(inputs.len())?;
        let geometry = WindowGeometry::infer(inputs[0], inputs[1], attrs.axis)?;
        Ok(geometry.shape().to_vec())
    }

    fn infer_type(_attrs: &RingBufferConfig, inputs: &[DType]) -> RingBufferResult<DType> {
        check_arity(inputs.len())?;
        let (buffer, data) = (inputs[0], inputs[1]);
        if buffer != data {
            return Err(RingBufferError::DTypeMismatch { buffer, data });
        }
        Ok(buffer)
    }

    fn compute<B: Backend, const D: usize, K: BasicOps<B>>(
        attrs: &RingBufferConfig,
        inputs: Vec<Tensor<B, D, K>>,
    ) -> RingBufferResult<Vec<Tensor<B, D, K>>> {
        let [buffer, data]: [Tensor<B, D, K>; 2] = inputs.try_into().map_err(|inputs: Vec<_>| {
            RingBufferError::ArityMismatch {
                expected: Self::NUM_INPUTS,
                actual: inputs.len(),
            }
        })?;
        Ok(vec![ring_buffer(buffer, data, attrs.axis)?])
    }
}
