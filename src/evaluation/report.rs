//! メトリクス結果を固定順のレポートに集約する。

use serde::Serialize;

use crate::evaluation::{rouge::OverlapScore, semantic::SemanticScore};

/// レポートの列見出し（固定順）。
pub const COLUMNS: [&str; 3] = ["Precision", "Recall", "F1-score"];

/// レポートの1行。全フィールドは構築時に小数第4位へ丸め済み。
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct MetricRow {
    pub precision: f32,
    pub recall: f32,
    pub f1: f32,
}

/// メトリクスファミリー名から結果への固定順マッピング。
///
/// 行順は ROUGE-1、ROUGE-2、ROUGE-L、SemanticScore で不変。
/// シリアライズ順もフィールド宣言順に一致する。
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Report {
    #[serde(rename = "ROUGE-1")]
    rouge1: MetricRow,
    #[serde(rename = "ROUGE-2")]
    rouge2: MetricRow,
    #[serde(rename = "ROUGE-L")]
    rouge_l: MetricRow,
    #[serde(rename = "SemanticScore")]
    semantic: MetricRow,
}

impl Report {
    /// 固定順の行リストを返す。
    #[must_use]
    pub fn rows(&self) -> [(&'static str, MetricRow); 4] {
        [
            ("ROUGE-1", self.rouge1),
            ("ROUGE-2", self.rouge2),
            ("ROUGE-L", self.rouge_l),
            ("SemanticScore", self.semantic),
        ]
    }

    #[must_use]
    pub fn rouge1(&self) -> MetricRow {
        self.rouge1
    }

    #[must_use]
    pub fn rouge2(&self) -> MetricRow {
        self.rouge2
    }

    #[must_use]
    pub fn rouge_l(&self) -> MetricRow {
        self.rouge_l
    }

    #[must_use]
    pub fn semantic(&self) -> MetricRow {
        self.semantic
    }
}

/// 4つのメトリクス結果からレポートを構築する純関数。
///
/// 丸めはここで一度だけ行う。途中計算の値は丸めずに渡すこと。
#[must_use]
pub fn build_report(
    unigram: OverlapScore,
    bigram: OverlapScore,
    lcs: OverlapScore,
    semantic: SemanticScore,
) -> Report {
    Report {
        rouge1: rounded(unigram.precision, unigram.recall, unigram.f1),
        rouge2: rounded(bigram.precision, bigram.recall, bigram.f1),
        rouge_l: rounded(lcs.precision, lcs.recall, lcs.f1),
        semantic: rounded(semantic.precision, semantic.recall, semantic.f1),
    }
}

fn rounded(precision: f32, recall: f32, f1: f32) -> MetricRow {
    MetricRow {
        precision: round4(precision),
        recall: round4(recall),
        f1: round4(f1),
    }
}

fn round4(value: f32) -> f32 {
    (value * 10_000.0).round() / 10_000.0
}

#[cfg(test)]
mod tests {
    use super::*;

    fn overlap(precision: f32, recall: f32, f1: f32) -> OverlapScore {
        OverlapScore {
            precision,
            recall,
            f1,
        }
    }

    #[test]
    fn build_report_is_deterministic() {
        let unigram = overlap(2.0 / 3.0, 2.0 / 3.0, 2.0 / 3.0);
        let bigram = overlap(0.5, 0.25, 1.0 / 3.0);
        let lcs = overlap(0.75, 0.6, 2.0 / 3.0);
        let semantic = SemanticScore {
            precision: 0.9123456,
            recall: 0.85,
            f1: 0.88,
        };

        let first = build_report(unigram, bigram, lcs, semantic);
        let second = build_report(unigram, bigram, lcs, semantic);
        assert_eq!(first, second);
    }

    #[test]
    fn build_report_rounds_to_four_places_once() {
        let score = overlap(2.0 / 3.0, 2.0 / 3.0, 2.0 / 3.0);
        let report = build_report(score, score, score, SemanticScore::default());
        assert!((report.rouge1().precision - 0.6667).abs() < 1e-6);
        assert!((report.rouge1().recall - 0.6667).abs() < 1e-6);
        assert!((report.rouge1().f1 - 0.6667).abs() < 1e-6);
    }

    #[test]
    fn rows_preserve_fixed_order() {
        let report = build_report(
            OverlapScore::default(),
            OverlapScore::default(),
            OverlapScore::default(),
            SemanticScore::default(),
        );
        let labels: Vec<&str> = report.rows().iter().map(|(label, _)| *label).collect();
        assert_eq!(labels, vec!["ROUGE-1", "ROUGE-2", "ROUGE-L", "SemanticScore"]);
    }

    #[test]
    fn serialization_follows_row_order() {
        let report = build_report(
            overlap(1.0, 1.0, 1.0),
            OverlapScore::default(),
            OverlapScore::default(),
            SemanticScore::default(),
        );
        let json = serde_json::to_string(&report).expect("report serializes");

        let positions: Vec<usize> = ["ROUGE-1", "ROUGE-2", "ROUGE-L", "SemanticScore"]
            .iter()
            .map(|label| json.find(label).expect("label present"))
            .collect();
        assert!(positions.windows(2).all(|pair| pair[0] < pair[1]));
    }

    #[test]
    fn sentinel_semantic_row_serializes_as_zeros() {
        let report = build_report(
            OverlapScore::default(),
            OverlapScore::default(),
            OverlapScore::default(),
            SemanticScore::default(),
        );
        let row = report.semantic();
        assert!((row.precision - 0.0).abs() < f32::EPSILON);
        assert!((row.recall - 0.0).abs() < f32::EPSILON);
        assert!((row.f1 - 0.0).abs() < f32::EPSILON);
    }
}
