//! トークン化・n-gram・LCSユーティリティ。

use rustc_hash::FxHashMap;

/// テキストを単語トークン列に分割する。
///
/// 分割ポリシーは固定：Unicode空白文字での分割（`split_whitespace`）と
/// 小文字への正規化のみを行う。ステミングや句読点除去は行わない。
/// 空入力は空のトークン列になり、失敗することはない。
#[must_use]
pub fn tokenize(text: &str) -> Vec<String> {
    text.split_whitespace().map(str::to_lowercase).collect()
}

/// トークン列からn-gramの多重集合（出現回数マップ）を構築する。
///
/// トークンは空白を含まないため、空白1つで連結したキーは単射になる。
/// `tokens` が `n` より短い場合、および `n == 0` の場合は空のマップを返す。
#[must_use]
pub fn ngrams(tokens: &[String], n: usize) -> FxHashMap<String, usize> {
    let mut counts = FxHashMap::default();
    if n == 0 || tokens.len() < n {
        return counts;
    }
    for window in tokens.windows(n) {
        *counts.entry(window.join(" ")).or_insert(0) += 1;
    }
    counts
}

/// 最長共通部分列の長さをO(|a|·|b|)の動的計画法で計算する。
///
/// どちらかが空の場合は0。
#[must_use]
pub fn lcs_length(a: &[String], b: &[String]) -> usize {
    let m = a.len();
    let n = b.len();
    if m == 0 || n == 0 {
        return 0;
    }

    let mut dp = vec![vec![0usize; n + 1]; m + 1];
    for i in 0..m {
        for j in 0..n {
            if a[i] == b[j] {
                dp[i + 1][j + 1] = dp[i][j] + 1;
            } else {
                dp[i + 1][j + 1] = dp[i + 1][j].max(dp[i][j + 1]);
            }
        }
    }
    dp[m][n]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tokenize_folds_case_and_splits_on_whitespace() {
        let tokens = tokenize("The  Cat\tsat\non the MAT");
        assert_eq!(tokens, vec!["the", "cat", "sat", "on", "the", "mat"]);
    }

    #[test]
    fn tokenize_handles_empty_input() {
        assert!(tokenize("").is_empty());
        assert!(tokenize("   \t\n ").is_empty());
    }

    #[test]
    fn ngrams_counts_repeated_grams() {
        let tokens = tokenize("the cat sat on the mat");
        let unigrams = ngrams(&tokens, 1);
        assert_eq!(unigrams.get("the"), Some(&2));
        assert_eq!(unigrams.get("cat"), Some(&1));
        assert_eq!(unigrams.values().sum::<usize>(), 6);
    }

    #[test]
    fn ngrams_builds_contiguous_windows() {
        let tokens = tokenize("a b c");
        let bigrams = ngrams(&tokens, 2);
        assert_eq!(bigrams.len(), 2);
        assert_eq!(bigrams.get("a b"), Some(&1));
        assert_eq!(bigrams.get("b c"), Some(&1));
    }

    #[test]
    fn ngrams_returns_empty_for_short_or_degenerate_input() {
        let tokens = tokenize("a b");
        assert!(ngrams(&tokens, 3).is_empty());
        assert!(ngrams(&tokens, 0).is_empty());
        assert!(ngrams(&[], 1).is_empty());
    }

    #[test]
    fn lcs_length_matches_known_value() {
        let a = tokenize("a b c d e");
        let b = tokenize("a c e");
        assert_eq!(lcs_length(&a, &b), 3);
    }

    #[test]
    fn lcs_length_is_symmetric() {
        let a = tokenize("the quick brown fox");
        let b = tokenize("the slow brown dog");
        assert_eq!(lcs_length(&a, &b), lcs_length(&b, &a));
    }

    #[test]
    fn lcs_length_handles_empty_sides() {
        let a = tokenize("a b c");
        assert_eq!(lcs_length(&a, &[]), 0);
        assert_eq!(lcs_length(&[], &a), 0);
        assert_eq!(lcs_length(&[], &[]), 0);
    }
}
