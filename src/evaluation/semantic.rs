//! Semantic similarity scoring backed by sentence embeddings.
//!
//! The pipeline only depends on the narrow [`SemanticScorer`] seam; the
//! production backend runs a rust-bert sentence-embeddings model on CPU.

use std::{str::FromStr, sync::Arc};

use anyhow::{Context, Result};
use async_trait::async_trait;
use rust_bert::pipelines::sentence_embeddings::{
    SentenceEmbeddingsBuilder, SentenceEmbeddingsModel, SentenceEmbeddingsModelType,
};
use tokio::sync::Mutex;
use tracing::warn;

use crate::{evaluation::rouge::harmonic_mean, util::text::split_sentences};

/// Semantic similarity result on a [0,1] scale.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct SemanticScore {
    pub precision: f32,
    pub recall: f32,
    pub f1: f32,
}

/// Supported sentence-embeddings models, keyed by their configuration names.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SemanticModel {
    DistiluseBaseMultilingualCased,
    AllMiniLmL12V2,
    AllMiniLmL6V2,
    BertBaseNliMeanTokens,
}

impl SemanticModel {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::DistiluseBaseMultilingualCased => "distiluse-base-multilingual-cased",
            Self::AllMiniLmL12V2 => "all-mini-lm-l12-v2",
            Self::AllMiniLmL6V2 => "all-mini-lm-l6-v2",
            Self::BertBaseNliMeanTokens => "bert-base-nli-mean-tokens",
        }
    }

    fn model_type(self) -> SentenceEmbeddingsModelType {
        match self {
            Self::DistiluseBaseMultilingualCased => {
                SentenceEmbeddingsModelType::DistiluseBaseMultilingualCased
            }
            Self::AllMiniLmL12V2 => SentenceEmbeddingsModelType::AllMiniLmL12V2,
            Self::AllMiniLmL6V2 => SentenceEmbeddingsModelType::AllMiniLmL6V2,
            Self::BertBaseNliMeanTokens => SentenceEmbeddingsModelType::BertBaseNliMeanTokens,
        }
    }
}

impl FromStr for SemanticModel {
    type Err = anyhow::Error;

    fn from_str(raw: &str) -> Result<Self> {
        match raw {
            "distiluse-base-multilingual-cased" => Ok(Self::DistiluseBaseMultilingualCased),
            "all-mini-lm-l12-v2" => Ok(Self::AllMiniLmL12V2),
            "all-mini-lm-l6-v2" => Ok(Self::AllMiniLmL6V2),
            "bert-base-nli-mean-tokens" => Ok(Self::BertBaseNliMeanTokens),
            other => Err(anyhow::anyhow!("unknown sentence embedding model: {other}")),
        }
    }
}

/// Narrow seam between the pipeline and the embedding backend.
///
/// Implementations receive whole documents, never pre-tokenized input.
#[async_trait]
pub trait SemanticScorer: Send + Sync {
    /// Score one pair of whole documents.
    ///
    /// # Errors
    /// Returns any backend failure; callers that need the sentinel contract
    /// go through [`score_or_sentinel`] instead.
    async fn score(&self, hyp_text: &str, ref_text: &str) -> Result<SemanticScore>;
}

/// Scores the pair and downgrades any backend failure to the zero sentinel.
///
/// This is the only entry point the pipeline calls; a broken backend is
/// reported through tracing and never aborts the lexical metrics.
pub async fn score_or_sentinel(
    scorer: &dyn SemanticScorer,
    hyp_text: &str,
    ref_text: &str,
) -> SemanticScore {
    match scorer.score(hyp_text, ref_text).await {
        Ok(score) => score,
        Err(error) => {
            warn!(error = %error, "semantic backend failed, reporting sentinel zeros");
            SemanticScore::default()
        }
    }
}

/// Semantic scorer using rust-bert sentence embeddings. Runs on CPU.
#[derive(Clone)]
pub struct BertScorer {
    model: Arc<Mutex<SentenceEmbeddingsModel>>,
}

impl std::fmt::Debug for BertScorer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BertScorer")
            .field("model", &"<SentenceEmbeddingsModel>")
            .finish()
    }
}

impl BertScorer {
    /// Initialize the embedding model.
    /// This might take a while to download the model on first run.
    ///
    /// # Errors
    /// Returns an error when the model cannot be downloaded or loaded.
    pub fn new(model: SemanticModel) -> Result<Self> {
        let model_type = model.model_type();
        // Use a separate thread to initialize the model because it's blocking and heavy
        let model = std::thread::spawn(move || {
            SentenceEmbeddingsBuilder::remote(model_type).create_model()
        })
        .join()
        .map_err(|_| anyhow::anyhow!("failed to join model creation thread"))??;

        Ok(Self {
            model: Arc::new(Mutex::new(model)),
        })
    }

    /// Generate embeddings for a batch of sentence units.
    async fn encode(&self, texts: Vec<String>) -> Result<Vec<Vec<f32>>> {
        let model = Arc::clone(&self.model);

        // Offload to blocking thread
        tokio::task::spawn_blocking(move || {
            let model = model.blocking_lock();
            model.encode(&texts)
        })
        .await
        .context("failed to join embedding task")?
        .context("failed to encode sentences")
    }
}

#[async_trait]
impl SemanticScorer for BertScorer {
    async fn score(&self, hyp_text: &str, ref_text: &str) -> Result<SemanticScore> {
        let hyp_units = split_sentences(hyp_text);
        let ref_units = split_sentences(ref_text);
        if hyp_units.is_empty() || ref_units.is_empty() {
            return Ok(SemanticScore::default());
        }

        let hyp_vectors = self.encode(hyp_units).await?;
        let ref_vectors = self.encode(ref_units).await?;
        Ok(greedy_overlap(&hyp_vectors, &ref_vectors))
    }
}

/// Placeholder backend used when semantic scoring is disabled; always returns
/// the zero triple.
#[derive(Debug, Clone, Copy, Default)]
pub struct NullScorer;

#[async_trait]
impl SemanticScorer for NullScorer {
    async fn score(&self, _hyp_text: &str, _ref_text: &str) -> Result<SemanticScore> {
        Ok(SemanticScore::default())
    }
}

/// Greedy max-cosine matching between two embedded unit sets.
///
/// Precision is the mean best match of each hypothesis unit against the
/// reference units; recall is symmetric. Means are clamped to [0,1] so that
/// anti-correlated embeddings cannot push the triple out of range.
fn greedy_overlap(hyp: &[Vec<f32>], reference: &[Vec<f32>]) -> SemanticScore {
    if hyp.is_empty() || reference.is_empty() {
        return SemanticScore::default();
    }

    let precision = best_match_mean(hyp, reference);
    let recall = best_match_mean(reference, hyp);

    SemanticScore {
        precision,
        recall,
        f1: harmonic_mean(precision, recall),
    }
}

fn best_match_mean(from: &[Vec<f32>], against: &[Vec<f32>]) -> f32 {
    let total: f32 = from
        .iter()
        .map(|vector| {
            against
                .iter()
                .map(|other| cosine_similarity(vector, other))
                .fold(0.0f32, f32::max)
        })
        .sum();

    (total / from.len() as f32).clamp(0.0, 1.0)
}

/// Compute cosine similarity between two vectors.
fn cosine_similarity(a: &[f32], b: &[f32]) -> f32 {
    let dot_product: f32 = a.iter().zip(b).map(|(x, y)| x * y).sum();
    let norm_a: f32 = a.iter().map(|x| x * x).sum::<f32>().sqrt();
    let norm_b: f32 = b.iter().map(|x| x * x).sum::<f32>().sqrt();

    if norm_a == 0.0 || norm_b == 0.0 {
        return 0.0;
    }

    dot_product / (norm_a * norm_b)
}
