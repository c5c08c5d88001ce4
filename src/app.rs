use std::sync::Arc;

use anyhow::{Context, Result};
use tracing::{info, warn};

use crate::{
    config::Config,
    evaluation::semantic::{BertScorer, NullScorer, SemanticScorer},
    pipeline::ScoringPipeline,
};

/// 長寿命の依存（設定と意味スコアラー）をまとめて保持するレジストリ。
///
/// 埋め込みモデルのロードは1回限りの高コスト処理なので、ここで獲得して
/// パイプラインへ注入する。
pub struct ComponentRegistry {
    config: Arc<Config>,
    semantic: Arc<dyn SemanticScorer>,
}

impl ComponentRegistry {
    /// 構成情報と依存をまとめて初期化する。
    ///
    /// # Errors
    /// 意味スコアラーのモデルロードに失敗した場合はエラーを返す。
    pub fn build(config: Config) -> Result<Self> {
        let config = Arc::new(config);

        let semantic: Arc<dyn SemanticScorer> = if config.semantic_enabled() {
            info!(
                model = config.semantic_model().as_str(),
                "loading sentence embedding model"
            );
            Arc::new(
                BertScorer::new(config.semantic_model())
                    .context("failed to initialize semantic scoring backend")?,
            )
        } else {
            warn!("semantic scoring disabled, SemanticScore row will report zeros");
            Arc::new(NullScorer)
        };

        Ok(Self { config, semantic })
    }

    #[must_use]
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// 保持している依存からスコアリングパイプラインを構築する。
    #[must_use]
    pub fn pipeline(&self) -> ScoringPipeline {
        ScoringPipeline::new(Arc::clone(&self.semantic))
    }
}
