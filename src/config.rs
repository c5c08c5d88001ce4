use std::{env, path::Path, path::PathBuf, str::FromStr};

use thiserror::Error;

use crate::evaluation::semantic::SemanticModel;

#[cfg(test)]
use once_cell::sync::Lazy;
#[cfg(test)]
pub(crate) static ENV_MUTEX: Lazy<std::sync::Mutex<()>> = Lazy::new(|| std::sync::Mutex::new(()));

/// 評価ツールの設定値。
#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    semantic_model: SemanticModel,
    semantic_enabled: bool,
    output_dir: PathBuf,
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid value for {name}: {source}")]
    Invalid {
        name: &'static str,
        #[source]
        source: anyhow::Error,
    },
}

impl Config {
    /// 環境変数から設定値を読み込み、検証する。
    ///
    /// 全ての項目に既定値があるため、未設定の環境変数はエラーにならない。
    ///
    /// # Errors
    /// 値のパースに失敗した場合は [`ConfigError`] を返す。
    pub fn from_env() -> Result<Self, ConfigError> {
        let semantic_model = parse_model(
            "SUMMARY_EVAL_SEMANTIC_MODEL",
            SemanticModel::DistiluseBaseMultilingualCased,
        )?;
        let semantic_enabled = parse_bool("SUMMARY_EVAL_SEMANTIC_ENABLED", true)?;
        let output_dir =
            PathBuf::from(env::var("SUMMARY_EVAL_OUTPUT_DIR").unwrap_or_else(|_| "metrics".to_string()));

        Ok(Self {
            semantic_model,
            semantic_enabled,
            output_dir,
        })
    }

    #[must_use]
    pub fn semantic_model(&self) -> SemanticModel {
        self.semantic_model
    }

    #[must_use]
    pub fn semantic_enabled(&self) -> bool {
        self.semantic_enabled
    }

    #[must_use]
    pub fn output_dir(&self) -> &Path {
        &self.output_dir
    }

    /// 意味スコアリングを無効化した設定を返す（CLIの上書き用）。
    #[must_use]
    pub fn with_semantic_disabled(mut self) -> Self {
        self.semantic_enabled = false;
        self
    }
}

fn parse_model(name: &'static str, default: SemanticModel) -> Result<SemanticModel, ConfigError> {
    match env::var(name) {
        Ok(raw) => SemanticModel::from_str(&raw).map_err(|source| ConfigError::Invalid { name, source }),
        Err(_) => Ok(default),
    }
}

fn parse_bool(name: &'static str, default: bool) -> Result<bool, ConfigError> {
    let raw = env::var(name).unwrap_or_else(|_| default.to_string());
    match raw.to_lowercase().as_str() {
        "true" | "1" | "yes" | "on" => Ok(true),
        "false" | "0" | "no" | "off" => Ok(false),
        _ => Err(ConfigError::Invalid {
            name,
            source: anyhow::anyhow!("invalid boolean value: {raw}"),
        }),
    }
}
