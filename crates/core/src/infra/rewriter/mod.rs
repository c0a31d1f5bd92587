pub mod gemini;
pub mod openai;
pub mod prompts;

mod noop;

pub use noop::NoopRewriter;

use async_trait::async_trait;

use crate::domain::error::AppError;
use crate::domain::settings::ResolvedConfig;
use crate::domain::types::{Mode, Provider};

/// 入力テキストの上限文字数。超過はネットワークに出る前に拒否する。
pub const MAX_TEXT_LEN: usize = 10_000;

/// リライトエラー
#[derive(Debug, thiserror::Error)]
pub enum RewriteError {
    #[error("Text is too long. Maximum length is {} characters.", MAX_TEXT_LEN)]
    InvalidInput,
    #[error("API key not configured. Please set it in the extension options.")]
    Auth,
    /// APIは応答したが結果が得られなかった（プロバイダ自身のメッセージを保持）
    #[error("{0}")]
    Provider(String),
    #[error("Failed to connect to API: {0}")]
    Network(String),
}

impl From<RewriteError> for AppError {
    fn from(err: RewriteError) -> Self {
        let message = err.to_string();
        match err {
            RewriteError::InvalidInput => AppError::invalid_input(message),
            RewriteError::Auth => AppError::auth(message),
            RewriteError::Provider(_) => AppError::provider(message),
            RewriteError::Network(_) => AppError::network(message),
        }
    }
}

/// リライター trait（プロバイダごとに1実装、設定値で選択）
#[async_trait]
pub trait Rewriter: Send + Sync {
    async fn rewrite(&self, text: &str, mode: Mode) -> Result<String, RewriteError>;

    fn name(&self) -> &str;
}

/// 実効設定からリライターを生成する
pub fn for_config(config: &ResolvedConfig) -> Box<dyn Rewriter> {
    match config.provider {
        Provider::OpenAi => Box::new(openai::OpenAiRewriter::new(config.clone())),
        Provider::Gemini => Box::new(gemini::GeminiRewriter::new(config.clone())),
    }
}

/// 共通プリチェック: 長さ上限 → APIキー。どちらもネットワーク呼び出し前。
pub(crate) fn precheck(text: &str, api_key: &str) -> Result<(), RewriteError> {
    if text.chars().count() > MAX_TEXT_LEN {
        return Err(RewriteError::InvalidInput);
    }
    if api_key.is_empty() {
        return Err(RewriteError::Auth);
    }
    Ok(())
}
