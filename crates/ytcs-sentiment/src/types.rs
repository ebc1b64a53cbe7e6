use std::path::PathBuf;

use ytcs_core::AppConfig;

/// Where the classifier comes from and where its files are cached.
#[derive(Debug, Clone)]
pub struct ModelSettings {
    /// Hugging Face repository id, e.g. `tabularisai/multilingual-sentiment-analysis`.
    pub model_id: String,
    /// Local cache directory. Files are downloaded here once and reused.
    pub cache_dir: PathBuf,
}

impl ModelSettings {
    #[must_use]
    pub fn from_app_config(config: &AppConfig) -> Self {
        Self {
            model_id: config.model_id.clone(),
            cache_dir: config.model_dir.clone(),
        }
    }
}
