//! ドキュメント読み込みコラボレーター。
//!
//! 拡張子でフォーマットを判定し、本文テキストを1つの文字列として返す。
//! 対応フォーマットは閉じた集合で、追加はこのモジュールだけで完結する。

use std::{fs, io, path::Path};

use thiserror::Error;

/// 読み込み失敗の分類。いずれも呼び出し元へそのまま伝播する致命的エラー。
#[derive(Debug, Error)]
pub enum ReadError {
    #[error("unsupported document format: {0} (only .txt and .pdf are allowed)")]
    UnsupportedFormat(String),
    #[error("failed to read {path}")]
    Io {
        path: String,
        #[source]
        source: io::Error,
    },
    #[error("failed to extract text from {path}")]
    Extraction {
        path: String,
        #[source]
        source: pdf_extract::OutputError,
    },
}

/// 対応するドキュメントフォーマット。
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocumentFormat {
    PlainText,
    Paginated,
}

impl DocumentFormat {
    /// 拡張子（大文字小文字は無視）からフォーマットを判定する。
    #[must_use]
    pub fn from_path(path: &Path) -> Option<Self> {
        let extension = path.extension()?.to_str()?.to_ascii_lowercase();
        match extension.as_str() {
            "txt" => Some(Self::PlainText),
            "pdf" => Some(Self::Paginated),
            _ => None,
        }
    }
}

/// ドキュメントを読み込み、本文テキストを返す。
///
/// プレーンテキストはUTF-8として読み込み、ページ分割フォーマットは
/// 全ページのテキストを連結して返す。
///
/// # Errors
/// 拡張子が未対応の場合、ファイルが読めない場合、テキスト抽出に
/// 失敗した場合は [`ReadError`] を返す。
pub fn read_document(path: &Path) -> Result<String, ReadError> {
    let format = DocumentFormat::from_path(path)
        .ok_or_else(|| ReadError::UnsupportedFormat(path.display().to_string()))?;

    match format {
        DocumentFormat::PlainText => fs::read_to_string(path).map_err(|source| ReadError::Io {
            path: path.display().to_string(),
            source,
        }),
        DocumentFormat::Paginated => {
            pdf_extract::extract_text(path).map_err(|source| ReadError::Extraction {
                path: path.display().to_string(),
                source,
            })
        }
    }
}

#[cfg(test)]
mod tests {
    use std::io::Write as _;
    use std::path::PathBuf;

    use super::*;

    #[test]
    fn from_path_dispatches_known_extensions() {
        assert_eq!(
            DocumentFormat::from_path(Path::new("summary.txt")),
            Some(DocumentFormat::PlainText)
        );
        assert_eq!(
            DocumentFormat::from_path(Path::new("Summary.PDF")),
            Some(DocumentFormat::Paginated)
        );
        assert_eq!(DocumentFormat::from_path(Path::new("summary.docx")), None);
        assert_eq!(DocumentFormat::from_path(Path::new("summary")), None);
    }

    #[test]
    fn read_document_returns_plain_text_content() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("summary.txt");
        let mut file = fs::File::create(&path).expect("create file");
        write!(file, "the cat sat on the mat").expect("write file");

        let text = read_document(&path).expect("document loads");
        assert_eq!(text, "the cat sat on the mat");
    }

    #[test]
    fn read_document_rejects_unsupported_extension() {
        let error = read_document(Path::new("summary.docx")).expect_err("must fail");
        assert!(matches!(error, ReadError::UnsupportedFormat(_)));
    }

    #[test]
    fn read_document_surfaces_missing_file() {
        let path = PathBuf::from("does-not-exist.txt");
        let error = read_document(&path).expect_err("must fail");
        assert!(matches!(error, ReadError::Io { .. }));
    }
}
