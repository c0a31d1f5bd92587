use serde::{Deserialize, Serialize};

use super::types::Provider;

/// OpenAI 系デフォルト
pub const OPENAI_DEFAULT_ENDPOINT: &str = "https://api.openai.com/v1/chat/completions";
pub const OPENAI_DEFAULT_MODEL: &str = "gpt-4o-mini";

/// Gemini 系デフォルト
pub const GEMINI_DEFAULT_ENDPOINT: &str = "https://generativelanguage.googleapis.com/v1beta";
pub const GEMINI_DEFAULT_MODEL: &str = "gemini-2.5-flash";

/// 永続化される設定（オプション surface が書き、Orchestrator が毎回読む）
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    /// 使用プロバイダ
    pub provider: Provider,
    /// 旧バージョンの単一APIキー（プロバイダ別キーが無い場合のフォールバック）
    pub api_key: Option<String>,
    /// OpenAI 用 APIキー
    pub api_key_openai: Option<String>,
    /// Gemini 用 APIキー
    pub api_key_gemini: Option<String>,
    /// カスタムエンドポイント（未設定ならプロバイダ既定値）
    pub api_endpoint: Option<String>,
    /// モデル名（未設定ならプロバイダ既定値）
    pub model: Option<String>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            provider: Provider::OpenAi,
            api_key: None,
            api_key_openai: None,
            api_key_gemini: None,
            api_endpoint: None,
            model: None,
        }
    }
}

/// プロバイダ既定値を適用した実効設定
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ResolvedConfig {
    pub provider: Provider,
    pub api_key: String,
    pub api_endpoint: String,
    pub model: String,
}

impl Settings {
    /// 実効設定を導出する。
    /// APIキーはプロバイダ別キーが設定済みならそれを（空文字でも）使い、
    /// 未設定のときだけ旧 api_key にフォールバックする。
    pub fn resolve(&self) -> ResolvedConfig {
        let legacy = self.api_key.clone().unwrap_or_default();
        let api_key = match self.provider {
            Provider::OpenAi => self.api_key_openai.clone().unwrap_or(legacy),
            Provider::Gemini => self.api_key_gemini.clone().unwrap_or(legacy),
        };

        let api_endpoint = self
            .api_endpoint
            .clone()
            .filter(|s| !s.is_empty())
            .unwrap_or_else(|| default_endpoint(self.provider).to_string());

        let model = self
            .model
            .clone()
            .filter(|s| !s.is_empty())
            .unwrap_or_else(|| default_model(self.provider).to_string());

        ResolvedConfig {
            provider: self.provider,
            api_key,
            api_endpoint,
            model,
        }
    }
}

pub fn default_endpoint(provider: Provider) -> &'static str {
    match provider {
        Provider::OpenAi => OPENAI_DEFAULT_ENDPOINT,
        Provider::Gemini => GEMINI_DEFAULT_ENDPOINT,
    }
}

pub fn default_model(provider: Provider) -> &'static str {
    match provider {
        Provider::OpenAi => OPENAI_DEFAULT_MODEL,
        Provider::Gemini => GEMINI_DEFAULT_MODEL,
    }
}
