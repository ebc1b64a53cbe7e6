//! Model file retrieval through the Hugging Face hub, cached on disk.
//!
//! Files live under the configured cache directory in the hub's standard
//! layout. The first run downloads them; later runs find them locally and
//! make no network calls.

use std::path::PathBuf;

use hf_hub::api::tokio::{ApiBuilder, ApiRepo};
use hf_hub::Cache;

use crate::error::SentimentError;
use crate::types::ModelSettings;

const CONFIG_FILE: &str = "config.json";
const TOKENIZER_FILE: &str = "tokenizer.json";
const SAFETENSORS_FILE: &str = "model.safetensors";
const PTH_FILE: &str = "pytorch_model.bin";

/// Local paths to everything needed to build the classifier.
#[derive(Debug, Clone)]
pub struct ModelFiles {
    pub config: PathBuf,
    pub tokenizer: PathBuf,
    pub weights: PathBuf,
}

/// Resolve the model's files, downloading whatever is not cached yet.
///
/// Weights are taken from `model.safetensors`, falling back to
/// `pytorch_model.bin` for repositories that only ship the latter.
///
/// # Errors
///
/// Returns [`SentimentError::Io`] if the cache directory cannot be created
/// and [`SentimentError::Download`] if a required file is neither cached
/// nor downloadable.
pub async fn fetch_model_files(settings: &ModelSettings) -> Result<ModelFiles, SentimentError> {
    tokio::fs::create_dir_all(&settings.cache_dir).await?;

    let api = ApiBuilder::new()
        .with_cache_dir(settings.cache_dir.clone())
        .with_progress(false)
        .build()
        .map_err(|e| {
            SentimentError::Download(format!("failed to initialize Hugging Face API: {e}"))
        })?;
    let repo = api.model(settings.model_id.clone());

    let config = fetch_file(settings, &repo, CONFIG_FILE).await?;
    let tokenizer = fetch_file(settings, &repo, TOKENIZER_FILE).await?;
    let weights = match fetch_file(settings, &repo, SAFETENSORS_FILE).await {
        Ok(path) => path,
        Err(e) => {
            tracing::debug!(error = %e, "no safetensors weights; trying {PTH_FILE}");
            fetch_file(settings, &repo, PTH_FILE).await?
        }
    };

    Ok(ModelFiles {
        config,
        tokenizer,
        weights,
    })
}

/// Path of `filename` if it is already in the local cache.
pub(crate) fn cached_path(settings: &ModelSettings, filename: &str) -> Option<PathBuf> {
    Cache::new(settings.cache_dir.clone())
        .model(settings.model_id.clone())
        .get(filename)
}

async fn fetch_file(
    settings: &ModelSettings,
    repo: &ApiRepo,
    filename: &str,
) -> Result<PathBuf, SentimentError> {
    if let Some(path) = cached_path(settings, filename) {
        tracing::debug!(model = %settings.model_id, file = filename, "using cached model file");
        return Ok(path);
    }

    tracing::info!(
        model = %settings.model_id,
        file = filename,
        cache_dir = %settings.cache_dir.display(),
        "downloading model file"
    );
    repo.get(filename).await.map_err(|e| {
        SentimentError::Download(format!(
            "failed to download '{filename}' from '{}': {e}",
            settings.model_id
        ))
    })
}
