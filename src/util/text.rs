//! テキスト処理ユーティリティ。

use unicode_segmentation::UnicodeSegmentation;

/// テキストを文に分割する。
///
/// Unicode UAX#29に準拠した文境界検出を使用します。
/// 空白のみの文は除外されます。
#[must_use]
pub(crate) fn split_sentences(text: &str) -> Vec<String> {
    text.unicode_sentences()
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .collect()
}
