//! スコアリングパイプライン。
//!
//! 1組のテキストペアに対して、語彙重複3ファミリーと意味類似スコアを
//! 計算し、固定順レポートに集約する。4つの計算は互いにデータ依存が
//! ないため、意味スコアは並行タスク、重複ファミリーはrayonで並列実行する。

use std::sync::Arc;

use tracing::{debug, warn};

use crate::evaluation::{
    report::{Report, build_report},
    rouge::{score_lcs, score_ngram},
    semantic::{SemanticScore, SemanticScorer, score_or_sentinel},
    tokenize::tokenize,
};

/// 注入された意味スコアラーを保持するパイプライン。
pub struct ScoringPipeline {
    semantic: Arc<dyn SemanticScorer>,
}

impl ScoringPipeline {
    #[must_use]
    pub fn new(semantic: Arc<dyn SemanticScorer>) -> Self {
        Self { semantic }
    }

    /// 仮説と参照のペアを評価し、レポートを返す。
    ///
    /// 入力エラーは存在しない：空テキストは警告付きでゼロスコアに解決し、
    /// バックエンド障害はセンチネルに解決するため、この関数は失敗しない。
    pub async fn score_pair(&self, hyp_text: &str, ref_text: &str) -> Report {
        let semantic_task = {
            let scorer = Arc::clone(&self.semantic);
            let hypothesis = hyp_text.to_owned();
            let reference = ref_text.to_owned();
            tokio::spawn(async move {
                score_or_sentinel(scorer.as_ref(), &hypothesis, &reference).await
            })
        };

        let hyp_tokens = tokenize(hyp_text);
        let ref_tokens = tokenize(ref_text);
        if hyp_tokens.is_empty() {
            warn!(side = "hypothesis", "empty token sequence, lexical metrics resolve to zero");
        }
        if ref_tokens.is_empty() {
            warn!(side = "reference", "empty token sequence, lexical metrics resolve to zero");
        }

        let ((unigram, bigram), lcs) = rayon::join(
            || {
                rayon::join(
                    || score_ngram(&hyp_tokens, &ref_tokens, 1),
                    || score_ngram(&hyp_tokens, &ref_tokens, 2),
                )
            },
            || score_lcs(&hyp_tokens, &ref_tokens),
        );

        let semantic = match semantic_task.await {
            Ok(score) => score,
            Err(error) => {
                warn!(error = %error, "semantic scoring task aborted, reporting sentinel zeros");
                SemanticScore::default()
            }
        };

        debug!(
            hyp_tokens = hyp_tokens.len(),
            ref_tokens = ref_tokens.len(),
            "scored summary pair"
        );

        build_report(unigram, bigram, lcs, semantic)
    }
}
