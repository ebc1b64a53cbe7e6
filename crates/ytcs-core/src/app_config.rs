use std::path::PathBuf;

pub const DEFAULT_YOUTUBE_BASE_URL: &str = "https://www.googleapis.com/youtube/v3";
pub const DEFAULT_MODEL_ID: &str = "tabularisai/multilingual-sentiment-analysis";

#[derive(Clone)]
pub struct AppConfig {
    pub youtube_api_key: String,
    pub youtube_base_url: String,
    pub model_id: String,
    pub model_dir: PathBuf,
    pub output_dir: PathBuf,
    pub request_timeout_secs: u64,
    pub log_level: String,
}

impl std::fmt::Debug for AppConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppConfig")
            .field("youtube_api_key", &"[redacted]")
            .field("youtube_base_url", &self.youtube_base_url)
            .field("model_id", &self.model_id)
            .field("model_dir", &self.model_dir)
            .field("output_dir", &self.output_dir)
            .field("request_timeout_secs", &self.request_timeout_secs)
            .field("log_level", &self.log_level)
            .finish()
    }
}
