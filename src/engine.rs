//! The seam to the external graph-execution runtime.

use std::path::Path;

use tract_tensorflow::prelude::*;

use crate::errors::LabelingResult;

/// Runs a trained network on a normalized input tensor and hands back the
/// per-class probability vector.
///
/// The orchestration and ranking layers only see this trait, so they can be
/// exercised against a fake engine returning fixed vectors, with no model
/// binary anywhere near the tests.
pub trait InferenceEngine {
    fn infer(&self, input: Tensor) -> TractResult<Vec<f32>>;
}

/// An execution plan for a frozen TensorFlow classification graph.
pub struct InceptionEngine {
    plan: TypedSimplePlan<TypedModel>,
}

impl InceptionEngine {
    /// Loads a frozen graph protobuf, pins its input and output nodes and
    /// the `[1, side, side, 3]` f32 input fact, and builds an optimized
    /// execution plan.
    pub fn from_frozen_graph(
        path: &Path,
        input_node: &str,
        output_node: &str,
        side: u32,
    ) -> LabelingResult<InceptionEngine> {
        info!("loading frozen graph from {path:?}");
        let side = side as usize;
        let mut model = tract_tensorflow::tensorflow().model_for_path(path)?;
        model.set_input_names([input_node])?;
        model.set_output_names([output_node])?;
        model.set_input_fact(0, f32::fact([1, side, side, 3]).into())?;
        let plan = model.into_optimized()?.into_runnable()?;
        debug!("execution plan ready, output node {output_node:?}");
        Ok(InceptionEngine { plan })
    }
}

impl InferenceEngine for InceptionEngine {
    fn infer(&self, input: Tensor) -> TractResult<Vec<f32>> {
        let mut outputs = self.plan.run(tvec!(input.into()))?;
        let scores = outputs.remove(0).into_tensor();
        Ok(scores.to_array_view::<f32>()?.iter().copied().collect())
    }
}
