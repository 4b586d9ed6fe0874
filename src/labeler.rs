//! Orchestration: framebuffer in, ranked labels out.

use std::path::{Path, PathBuf};

use crate::engine::{InceptionEngine, InferenceEngine};
use crate::errors::{LabelingError, LabelingResult};
use crate::frame::Frame;
use crate::labels::LabelTable;
use crate::preprocess::Normalizer;
use crate::ranking::{rank, RankedLabel};

/// How many labels a sketch typically asks for.
pub const DEFAULT_TOP_K: usize = 5;

/// Input geometry and node names of the 2016-08-28 Inception v3 release.
pub const DEFAULT_INPUT_SIDE: u32 = 299;
pub const DEFAULT_INPUT_NODE: &str = "input";
pub const DEFAULT_OUTPUT_NODE: &str = "InceptionV3/Predictions/Reshape_1";

/// That release takes input in `[0, 1]`.
pub const DEFAULT_MEAN: f32 = 0.0;
pub const DEFAULT_SCALE: f32 = 255.0;

/// A ready-to-use labeler: an inference engine, the label table it was
/// trained against, and the normalization graph run in front of it.
///
/// Each call reads its inputs and allocates its own output, so a labeler
/// can be shared across call sites without coordination.
pub struct ImageLabeler<E> {
    engine: E,
    labels: LabelTable,
    normalizer: Normalizer,
    side: u32,
}

impl ImageLabeler<InceptionEngine> {
    pub fn builder() -> LabelerBuilder {
        LabelerBuilder::default()
    }
}

impl<E> std::fmt::Debug for ImageLabeler<E> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ImageLabeler")
            .field("labels", &self.labels.len())
            .field("side", &self.side)
            .finish_non_exhaustive()
    }
}

impl<E: InferenceEngine> ImageLabeler<E> {
    /// Wires an arbitrary engine with default geometry and normalization.
    /// This is the entry point for embedding and for fake-engine tests.
    pub fn with_engine(engine: E, labels: LabelTable) -> LabelingResult<ImageLabeler<E>> {
        let normalizer = Normalizer::new(DEFAULT_INPUT_SIDE, DEFAULT_MEAN, DEFAULT_SCALE)?;
        Ok(ImageLabeler { engine, labels, normalizer, side: DEFAULT_INPUT_SIDE })
    }

    pub fn labels(&self) -> &LabelTable {
        &self.labels
    }

    /// Labels one framebuffer: resize and cast, normalize through the
    /// first graph, infer through the second, rank the probabilities.
    pub fn label(&self, frame: &Frame, k: usize) -> LabelingResult<Vec<RankedLabel>> {
        debug!("labeling a {}x{} frame, keeping top {k}", frame.width(), frame.height());
        let tensor = frame.to_tensor(self.side)?;
        let normalized = self.normalizer.run(tensor)?;
        let scores = self.engine.infer(normalized)?;
        debug!("network returned {} class scores", scores.len());
        rank(&scores, self.labels.names(), k)
    }

    /// Decodes an image file and labels it. Convenience for sketches that
    /// work from disk rather than from a live framebuffer.
    pub fn label_file<P: AsRef<Path>>(&self, path: P, k: usize) -> LabelingResult<Vec<RankedLabel>> {
        let image = image::open(path)?.to_rgb8();
        let (width, height) = image.dimensions();
        let frame = Frame::rgb8(image.as_raw(), width, height)?;
        self.label(&frame, k)
    }
}

/// Code-level configuration for a frozen-graph labeler.
///
/// Only the model and label paths are mandatory; everything else defaults
/// to the Inception v3 2016-08-28 release.
#[derive(Clone, Debug)]
pub struct LabelerBuilder {
    model: Option<PathBuf>,
    labels: Option<PathBuf>,
    input_node: String,
    output_node: String,
    side: u32,
    mean: f32,
    scale: f32,
}

impl Default for LabelerBuilder {
    fn default() -> LabelerBuilder {
        LabelerBuilder {
            model: None,
            labels: None,
            input_node: DEFAULT_INPUT_NODE.to_string(),
            output_node: DEFAULT_OUTPUT_NODE.to_string(),
            side: DEFAULT_INPUT_SIDE,
            mean: DEFAULT_MEAN,
            scale: DEFAULT_SCALE,
        }
    }
}

impl LabelerBuilder {
    pub fn model_path<P: Into<PathBuf>>(mut self, path: P) -> Self {
        self.model = Some(path.into());
        self
    }

    pub fn labels_path<P: Into<PathBuf>>(mut self, path: P) -> Self {
        self.labels = Some(path.into());
        self
    }

    pub fn input_node<S: Into<String>>(mut self, name: S) -> Self {
        self.input_node = name.into();
        self
    }

    pub fn output_node<S: Into<String>>(mut self, name: S) -> Self {
        self.output_node = name.into();
        self
    }

    pub fn input_side(mut self, side: u32) -> Self {
        self.side = side;
        self
    }

    /// Input range mapping, for graphs trained with another contract.
    pub fn normalization(mut self, mean: f32, scale: f32) -> Self {
        self.mean = mean;
        self.scale = scale;
        self
    }

    /// Fails with [`LabelingError::NotReady`] until both the model graph
    /// and the label table have been supplied.
    pub fn build(self) -> LabelingResult<ImageLabeler<InceptionEngine>> {
        let model = self.model.ok_or(LabelingError::NotReady("no model graph configured"))?;
        let labels_path =
            self.labels.ok_or(LabelingError::NotReady("no label table configured"))?;
        let labels = LabelTable::from_path(&labels_path)?;
        info!("loaded {} labels from {labels_path:?}", labels.len());
        let engine =
            InceptionEngine::from_frozen_graph(&model, &self.input_node, &self.output_node, self.side)?;
        let normalizer = Normalizer::new(self.side, self.mean, self.scale)?;
        Ok(ImageLabeler { engine, labels, normalizer, side: self.side })
    }
}
