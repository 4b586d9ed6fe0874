//! # Simple image labeling
//!
//! A thin adapter exposing a pre-trained Inception classification network
//! to creative-coding sketches. The heavy lifting (graph optimization,
//! convolutional inference) is delegated to
//! [tract](https://crates.io/crates/tract-tensorflow); this crate only
//! loads the frozen graph and its label table, turns a sketch framebuffer
//! into the tensor layout the network expects, and ranks the resulting
//! class probabilities into a top-K label list.
//!
//! ## Example
//!
//! ```no_run
//! use simple_image_labeling::{Frame, ImageLabeler, DEFAULT_TOP_K};
//!
//! # fn main() -> simple_image_labeling::LabelingResult<()> {
//! let labeler = ImageLabeler::builder()
//!     .model_path("inception_v3_2016_08_28_frozen.pb")
//!     .labels_path("imagenet_slim_labels.txt")
//!     .build()?;
//!
//! // a 640x480 RGBA framebuffer grabbed from the sketch
//! # let pixels = vec![0u8; 640 * 480 * 4];
//! let frame = Frame::rgba8(&pixels, 640, 480)?;
//! for ranked in labeler.label(&frame, DEFAULT_TOP_K)? {
//!     println!("{:0.5} {}", ranked.score, ranked.label);
//! }
//! # Ok(())
//! # }
//! ```

#[allow(unused_imports)]
#[macro_use]
extern crate log;

pub mod engine;
pub mod errors;
pub mod frame;
pub mod labeler;
pub mod labels;
pub mod preprocess;
pub mod ranking;

pub use engine::{InceptionEngine, InferenceEngine};
pub use errors::{LabelingError, LabelingResult};
pub use frame::{Frame, PixelFormat};
pub use labeler::{ImageLabeler, LabelerBuilder, DEFAULT_TOP_K};
pub use labels::LabelTable;
pub use preprocess::Normalizer;
pub use ranking::{rank, RankedLabel};

#[cfg(test)]
#[allow(dead_code)]
pub fn setup_test_logger() {
    env_logger::Builder::from_default_env().filter_level(log::LevelFilter::Trace).init();
}
