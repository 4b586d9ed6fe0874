//! The normalization stage, expressed as a tract graph.
//!
//! The frozen Inception graphs take inputs already mapped into their
//! training range. Rather than normalizing pixel by pixel on the host, the
//! adapter hands the runtime a two-node elementwise graph (subtract the
//! mean, divide by the scale) and runs it in front of the network, so both
//! stages go through the same execution engine.

use tract_core::ops::math;
use tract_core::prelude::*;

/// A planned `(x - mean) / scale` graph over `[1, side, side, 3]` frames.
pub struct Normalizer {
    plan: TypedSimplePlan<TypedModel>,
}

impl Normalizer {
    pub fn new(side: u32, mean: f32, scale: f32) -> TractResult<Normalizer> {
        let side = side as usize;
        let mut model = TypedModel::default();
        let frame = model.add_source("frame", f32::fact([1, side, side, 3]))?;
        let mean = model.add_const("mean", tensor4(&[[[[mean]]]]))?;
        let scale = model.add_const("scale", tensor4(&[[[[scale]]]]))?;
        let centered = model.wire_node("center", math::sub(), &[frame, mean])?[0];
        let rescaled = model.wire_node("rescale", math::div(), &[centered, scale])?[0];
        model.set_output_outlets(&[rescaled])?;
        let plan = model.into_optimized()?.into_runnable()?;
        Ok(Normalizer { plan })
    }

    pub fn run(&self, frame: Tensor) -> TractResult<Tensor> {
        let mut outputs = self.plan.run(tvec!(frame.into()))?;
        Ok(outputs.remove(0).into_tensor())
    }
}
