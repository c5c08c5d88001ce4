//! ROUGE系の語彙重複スコア計算。

use crate::evaluation::tokenize::{lcs_length, ngrams};

/// 1つのメトリクスファミリーの計算結果。
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct OverlapScore {
    pub precision: f32,
    pub recall: f32,
    pub f1: f32,
}

/// クリップ付きカウントでn-gram重複のPrecision/Recall/F1を計算する。
///
/// 分子は各n-gramごとの `min(仮説側出現数, 参照側出現数)` の総和。
/// Precisionは仮説側の総n-gram数、Recallは参照側の総n-gram数で割る。
/// どちらかの側にn-gramが存在しない場合、対応する比率は0と定義する。
#[must_use]
pub fn score_ngram(hypothesis: &[String], reference: &[String], n: usize) -> OverlapScore {
    let hyp_counts = ngrams(hypothesis, n);
    let ref_counts = ngrams(reference, n);

    let hyp_total: usize = hyp_counts.values().sum();
    let ref_total: usize = ref_counts.values().sum();

    let matched: usize = hyp_counts
        .iter()
        .map(|(gram, count)| (*count).min(ref_counts.get(gram).copied().unwrap_or(0)))
        .sum();

    let precision = ratio(matched, hyp_total);
    let recall = ratio(matched, ref_total);

    OverlapScore {
        precision,
        recall,
        f1: harmonic_mean(precision, recall),
    }
}

/// 最長共通部分列に基づくPrecision/Recall/F1を計算する。
///
/// Precision = LCS長 / 仮説トークン数、Recall = LCS長 / 参照トークン数。
/// どちらかの列が空の場合は全て0。
#[must_use]
pub fn score_lcs(hypothesis: &[String], reference: &[String]) -> OverlapScore {
    if hypothesis.is_empty() || reference.is_empty() {
        return OverlapScore::default();
    }

    let lcs = lcs_length(hypothesis, reference);
    let precision = ratio(lcs, hypothesis.len());
    let recall = ratio(lcs, reference.len());

    OverlapScore {
        precision,
        recall,
        f1: harmonic_mean(precision, recall),
    }
}

fn ratio(numerator: usize, denominator: usize) -> f32 {
    if denominator == 0 {
        0.0
    } else {
        numerator as f32 / denominator as f32
    }
}

pub(crate) fn harmonic_mean(a: f32, b: f32) -> f32 {
    if a == 0.0 && b == 0.0 {
        0.0
    } else {
        (2.0 * a * b) / (a + b)
    }
}
