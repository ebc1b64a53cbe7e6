use thiserror::Error;

#[derive(Debug, Error)]
pub enum SentimentError {
    #[error("model download failed: {0}")]
    Download(String),

    #[error("model load error: {0}")]
    ModelLoad(String),

    #[error("tokenizer error: {0}")]
    Tokenizer(String),

    #[error("inference error: {0}")]
    Inference(String),

    #[error("tensor error: {0}")]
    Candle(#[from] candle_core::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}
