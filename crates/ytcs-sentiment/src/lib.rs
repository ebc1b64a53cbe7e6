//! Comment sentiment classification for `ytcs`.
//!
//! Loads a pre-trained sequence-classification model (ModernBERT or
//! DistilBERT via candle) from a local cache directory, downloading it from
//! the Hugging Face hub on first use, and labels each comment with the
//! model's top class. Inference failures degrade to the [`UNKNOWN_LABEL`]
//! sentinel instead of aborting.

pub mod classifier;
mod distilbert;
pub mod error;
pub mod loader;
pub mod model;
pub mod pipeline;
pub mod types;

pub use classifier::{truncate_chars, TextClassifier, MAX_INPUT_CHARS, UNKNOWN_LABEL};
pub use error::SentimentError;
pub use model::{Architecture, SentimentModel, MAX_INPUT_TOKENS};
pub use pipeline::{classify_comment, label_comments};
pub use types::ModelSettings;
