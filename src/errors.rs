use thiserror::Error;
use tract_core::prelude::TractError;

pub type LabelingResult<T> = Result<T, LabelingError>;

/// Everything that can go wrong between a framebuffer and a label list.
///
/// Failures inside the external runtime (graph analysis, plan execution)
/// surface through the transparent `Inference` variant; the other variants
/// are this crate's own conditions.
#[derive(Error, Debug)]
pub enum LabelingError {
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    #[error("labeler is not ready: {0}")]
    NotReady(&'static str),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("image decoding failed: {0}")]
    Image(#[from] image::ImageError),

    #[error(transparent)]
    Inference(#[from] TractError),
}
