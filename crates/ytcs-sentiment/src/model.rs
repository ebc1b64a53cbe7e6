//! Sequence-classification models running on candle.
//!
//! The architecture is picked from `model_type` in the checkpoint's
//! `config.json`. ModernBERT and DistilBERT are supported.

use std::collections::HashMap;
use std::path::Path;

use candle_core::{DType, Device, Tensor, D};
use candle_nn::VarBuilder;
use candle_transformers::models::distilbert::Config as DistilBertConfig;
use candle_transformers::models::modernbert::{
    ClassifierConfig, ClassifierPooling, Config as ModernBertConfig,
    ModernBertForSequenceClassification,
};
use serde::Deserialize;
use tokenizers::{Tokenizer, TruncationParams};

use crate::classifier::TextClassifier;
use crate::distilbert::DistilBertClassifier;
use crate::error::SentimentError;
use crate::loader::{fetch_model_files, ModelFiles};
use crate::types::ModelSettings;

/// Longest token sequence fed to the encoder, special tokens included.
pub const MAX_INPUT_TOKENS: usize = 512;

/// Encoder families this crate can run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Architecture {
    ModernBert,
    DistilBert,
}

impl Architecture {
    fn from_model_type(model_type: Option<&str>) -> Result<Self, SentimentError> {
        match model_type {
            Some("modernbert") => Ok(Self::ModernBert),
            Some("distilbert") => Ok(Self::DistilBert),
            Some(other) => Err(SentimentError::ModelLoad(format!(
                "unsupported model_type '{other}' (expected modernbert or distilbert)"
            ))),
            None => Err(SentimentError::ModelLoad(
                "config.json has no model_type".to_string(),
            )),
        }
    }
}

enum EncoderConfig {
    ModernBert(ModernBertConfig),
    DistilBert(DistilBertConfig),
}

enum Backbone {
    ModernBert(ModernBertForSequenceClassification),
    DistilBert(DistilBertClassifier),
}

impl Backbone {
    fn forward(&self, input_ids: &Tensor, attention_mask: &Tensor) -> candle_core::Result<Tensor> {
        match self {
            Self::ModernBert(model) => model.forward(input_ids, attention_mask),
            Self::DistilBert(model) => model.forward(input_ids, attention_mask),
        }
    }
}

/// Loaded sentiment model plus its tokenizer and label map.
///
/// Built once with [`SentimentModel::load`] before any comment is
/// processed and owned by the caller for the whole run. Dropping the
/// handle releases the weights.
pub struct SentimentModel {
    backbone: Backbone,
    architecture: Architecture,
    tokenizer: Tokenizer,
    id2label: HashMap<String, String>,
    device: Device,
}

/// The parts of `config.json` read independently of the architecture.
#[derive(Deserialize)]
struct CheckpointConfig {
    #[serde(default)]
    model_type: Option<String>,
    #[serde(default)]
    id2label: HashMap<String, String>,
    #[serde(default)]
    classifier_pooling: ClassifierPooling,
}

impl SentimentModel {
    /// Resolve the model files (downloading on first use) and build the
    /// classifier on the CPU.
    ///
    /// # Errors
    ///
    /// Any [`SentimentError`] here is fatal for the run: download failure,
    /// unreadable files, an unsupported or incompatible checkpoint, or a
    /// broken tokenizer.
    pub async fn load(settings: &ModelSettings) -> Result<Self, SentimentError> {
        let files = fetch_model_files(settings).await?;
        let model = tokio::task::spawn_blocking(move || Self::from_files(&files, Device::Cpu))
            .await
            .map_err(|e| SentimentError::ModelLoad(format!("model load task failed: {e}")))??;
        tracing::info!(
            model = %settings.model_id,
            architecture = ?model.architecture,
            labels = ?model.labels(),
            "sentiment model loaded"
        );
        Ok(model)
    }

    /// Build the classifier from files already on disk.
    ///
    /// # Errors
    ///
    /// Returns [`SentimentError::Io`]/[`SentimentError::Json`] for unreadable
    /// config, [`SentimentError::ModelLoad`] for an unknown `model_type`,
    /// missing labels or weights that do not match the architecture, and
    /// [`SentimentError::Tokenizer`] if `tokenizer.json` cannot be used.
    pub fn from_files(files: &ModelFiles, device: Device) -> Result<Self, SentimentError> {
        let config_str = std::fs::read_to_string(&files.config)?;
        let checkpoint: CheckpointConfig = serde_json::from_str(&config_str)?;

        if checkpoint.id2label.is_empty() {
            return Err(SentimentError::ModelLoad(format!(
                "no id2label in {}",
                files.config.display()
            )));
        }
        let architecture = Architecture::from_model_type(checkpoint.model_type.as_deref())?;

        let encoder_config = match architecture {
            Architecture::ModernBert => {
                let mut config: ModernBertConfig = serde_json::from_str(&config_str)?;
                apply_labels(&mut config, &checkpoint.id2label, checkpoint.classifier_pooling);
                EncoderConfig::ModernBert(config)
            }
            Architecture::DistilBert => {
                EncoderConfig::DistilBert(serde_json::from_str(&config_str)?)
            }
        };

        let vb = load_weights(&files.weights, &device)?;
        let backbone = match encoder_config {
            EncoderConfig::ModernBert(config) => {
                ModernBertForSequenceClassification::load(vb, &config).map(Backbone::ModernBert)
            }
            EncoderConfig::DistilBert(config) => {
                DistilBertClassifier::load(vb, &config, checkpoint.id2label.len())
                    .map(Backbone::DistilBert)
            }
        }
        .map_err(|e| SentimentError::ModelLoad(format!("incompatible checkpoint: {e}")))?;

        let tokenizer = load_tokenizer(&files.tokenizer)?;

        Ok(Self {
            backbone,
            architecture,
            tokenizer,
            id2label: checkpoint.id2label,
            device,
        })
    }

    #[must_use]
    pub fn architecture(&self) -> Architecture {
        self.architecture
    }

    /// Labels this model can emit, ordered by class id.
    #[must_use]
    pub fn labels(&self) -> Vec<&str> {
        let mut ids: Vec<(&String, &String)> = self.id2label.iter().collect();
        ids.sort_by_key(|(id, _)| id.parse::<u32>().unwrap_or(u32::MAX));
        ids.into_iter().map(|(_, label)| label.as_str()).collect()
    }
}

impl TextClassifier for SentimentModel {
    fn classify(&self, text: &str) -> Result<String, SentimentError> {
        let tokens = self.tokenizer.encode(text, true).map_err(|e| {
            SentimentError::Tokenizer(format!(
                "tokenization failed on '{}': {e}",
                text.chars().take(50).collect::<String>()
            ))
        })?;

        let input_ids = Tensor::new(tokens.get_ids(), &self.device)?.unsqueeze(0)?;
        let attention_mask =
            Tensor::new(tokens.get_attention_mask(), &self.device)?.unsqueeze(0)?;

        let logits = self.backbone.forward(&input_ids, &attention_mask)?;
        let pred_id = logits.argmax(D::Minus1)?.squeeze(0)?.to_scalar::<u32>()?;

        label_for(&self.id2label, pred_id)
    }
}

/// Make the classifier block in `config` match the checkpoint.
///
/// candle only picks up `classifier_config` when the whole block parses,
/// and checkpoints usually store `label2id` values as integers, so it is
/// rebuilt here from the separately parsed labels and pooling mode.
fn apply_labels(
    config: &mut ModernBertConfig,
    id2label: &HashMap<String, String>,
    pooling: ClassifierPooling,
) {
    let label2id: HashMap<String, String> = id2label
        .iter()
        .map(|(id, label)| (label.clone(), id.clone()))
        .collect();

    config.classifier_config = Some(ClassifierConfig {
        id2label: id2label.clone(),
        label2id,
        classifier_pooling: pooling,
    });
}

fn load_tokenizer(path: &Path) -> Result<Tokenizer, SentimentError> {
    let mut tokenizer = Tokenizer::from_file(path).map_err(|e| {
        SentimentError::Tokenizer(format!(
            "failed to load tokenizer from '{}': {e}",
            path.display()
        ))
    })?;
    tokenizer
        .with_truncation(Some(TruncationParams {
            max_length: MAX_INPUT_TOKENS,
            ..TruncationParams::default()
        }))
        .map_err(|e| SentimentError::Tokenizer(format!("invalid truncation settings: {e}")))?;
    Ok(tokenizer)
}

fn load_weights(path: &Path, device: &Device) -> Result<VarBuilder<'static>, SentimentError> {
    let vb = if path.extension().is_some_and(|e| e == "safetensors") {
        VarBuilder::from_buffered_safetensors(std::fs::read(path)?, DType::F32, device)?
    } else {
        VarBuilder::from_pth(path, DType::F32, device)?
    };
    Ok(vb)
}

fn label_for(id2label: &HashMap<String, String>, pred_id: u32) -> Result<String, SentimentError> {
    id2label.get(&pred_id.to_string()).cloned().ok_or_else(|| {
        let mut available: Vec<&str> = id2label.keys().map(String::as_str).collect();
        available.sort_unstable();
        SentimentError::Inference(format!(
            "predicted label id {pred_id} not in id2label (available: {})",
            available.join(", ")
        ))
    })
}
