//! DistilBERT with the sequence-classification head used by
//! `DistilBertForSequenceClassification` checkpoints.

use candle_core::{IndexOp, Result, Tensor};
use candle_nn::{linear, Linear, Module, VarBuilder};
use candle_transformers::models::distilbert::{Config, DistilBertModel};

pub(crate) struct DistilBertClassifier {
    encoder: DistilBertModel,
    pre_classifier: Linear,
    classifier: Linear,
}

impl DistilBertClassifier {
    /// Load the encoder plus `pre_classifier`/`classifier` projections
    /// sized for `num_labels` classes.
    pub(crate) fn load(vb: VarBuilder, config: &Config, num_labels: usize) -> Result<Self> {
        let encoder = DistilBertModel::load(vb.clone(), config)?;
        let pre_classifier = linear(config.dim, config.dim, vb.pp("pre_classifier"))?;
        let classifier = linear(config.dim, num_labels, vb.pp("classifier"))?;
        Ok(Self {
            encoder,
            pre_classifier,
            classifier,
        })
    }

    /// Logits of shape `(batch, num_labels)`.
    ///
    /// `attention_mask` uses the tokenizer convention (1 = real token).
    pub(crate) fn forward(&self, input_ids: &Tensor, attention_mask: &Tensor) -> Result<Tensor> {
        let hidden = self
            .encoder
            .forward(input_ids, &padding_mask(attention_mask)?)?;
        let pooled = hidden.i((.., 0))?;
        let pooled = self.pre_classifier.forward(&pooled)?.relu()?;
        self.classifier.forward(&pooled)
    }
}

/// candle's DistilBERT blanks out positions where the mask is non-zero,
/// the inverse of the tokenizer's attention mask. Shape `(batch, 1, 1, seq)`
/// so it broadcasts over heads and query positions.
fn padding_mask(attention_mask: &Tensor) -> Result<Tensor> {
    let (batch, seq_len) = attention_mask.dims2()?;
    attention_mask.eq(0u32)?.reshape((batch, 1, 1, seq_len))
}

#[cfg(test)]
mod tests {
    use candle_core::{DType, Device};
    use candle_nn::VarMap;

    use super::*;

    fn tiny_config() -> Config {
        serde_json::from_value(serde_json::json!({
            "model_type": "distilbert",
            "vocab_size": 32,
            "dim": 8,
            "n_layers": 1,
            "n_heads": 2,
            "hidden_dim": 16,
            "activation": "gelu",
            "max_position_embeddings": 16,
            "initializer_range": 0.02,
            "pad_token_id": 0
        }))
        .unwrap()
    }

    #[test]
    fn padding_mask_flags_padding_positions() {
        let mask = Tensor::new(&[[1u32, 1, 0]], &Device::Cpu).unwrap();
        let inverted = padding_mask(&mask).unwrap();
        assert_eq!(inverted.dims(), &[1, 1, 1, 3]);
        assert_eq!(
            inverted.flatten_all().unwrap().to_vec1::<u8>().unwrap(),
            vec![0, 0, 1]
        );
    }

    #[test]
    fn forward_yields_one_logit_per_label() {
        let varmap = VarMap::new();
        let vb = VarBuilder::from_varmap(&varmap, DType::F32, &Device::Cpu);
        let model = DistilBertClassifier::load(vb, &tiny_config(), 5).unwrap();

        let ids = Tensor::new(&[[2u32, 7, 9, 3]], &Device::Cpu).unwrap();
        let mask = Tensor::new(&[[1u32, 1, 1, 1]], &Device::Cpu).unwrap();
        let logits = model.forward(&ids, &mask).unwrap();
        assert_eq!(logits.dims(), &[1, 5]);
    }
}
