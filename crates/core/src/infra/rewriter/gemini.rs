use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use super::{precheck, prompts, RewriteError, Rewriter};
use crate::domain::settings::ResolvedConfig;
use crate::domain::types::Mode;

/// Gemini generateContent API を使用するリライター
pub struct GeminiRewriter {
    client: reqwest::Client,
    config: ResolvedConfig,
}

#[derive(Debug, Serialize)]
struct GenerateContentRequest {
    contents: Vec<Content>,
    #[serde(rename = "generationConfig")]
    generation_config: GenerationConfig,
}

#[derive(Debug, Serialize)]
struct Content {
    parts: Vec<Part>,
}

#[derive(Debug, Serialize)]
struct Part {
    text: String,
}

#[derive(Debug, Serialize)]
struct GenerationConfig {
    temperature: f64,
    #[serde(rename = "maxOutputTokens")]
    max_output_tokens: u32,
}

#[derive(Debug, Deserialize)]
struct GenerateContentResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    content: Option<CandidateContent>,
}

#[derive(Debug, Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<ResponsePart>,
}

#[derive(Debug, Deserialize)]
struct ResponsePart {
    text: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
struct ApiErrorBody {
    error: Option<ApiErrorDetail>,
}

#[derive(Debug, Deserialize)]
struct ApiErrorDetail {
    message: Option<String>,
}

/// 設定されたエンドポイント文字列を正規 API ベース URL に正規化する。
/// 末尾スラッシュと誤って付いた `/models` サフィックスを除去し、
/// APIバージョンセグメント（`/v1beta` または `/v1`）を保証する。冪等。
pub fn normalize_base_url(endpoint: &str) -> String {
    let mut base = endpoint.trim().to_string();

    if base.ends_with('/') {
        base.pop();
    }
    if let Some(stripped) = base.strip_suffix("/models") {
        base = stripped.to_string();
    }
    if !base.ends_with("/v1beta") && !base.ends_with("/v1") {
        base.push_str("/v1beta");
    }

    base
}

impl GeminiRewriter {
    pub fn new(config: ResolvedConfig) -> Self {
        let client = reqwest::Client::builder()
            .timeout(std::time::Duration::from_secs(30))
            .build()
            .expect("Failed to create HTTP client");

        Self { client, config }
    }

    /// generateContent の呼び出しURLを組み立てる（キーはクエリパラメータ）
    fn request_url(&self) -> String {
        let base = normalize_base_url(&self.config.api_endpoint);
        format!(
            "{base}/models/{model}:generateContent?key={key}",
            model = self.config.model,
            key = self.config.api_key
        )
    }
}

/// Gemini は system ロールを持たないため、非翻訳モードでは言語維持ガードを
/// プロンプト先頭に連結する。
fn build_full_prompt(text: &str, mode: Mode) -> String {
    let prompt = prompts::build_prompt(text, mode);
    match prompts::language_guard_for_mode(mode) {
        Some(guard) => format!("{guard}\n\n{prompt}"),
        None => prompt,
    }
}

fn build_request(text: &str, mode: Mode) -> GenerateContentRequest {
    GenerateContentRequest {
        contents: vec![Content {
            parts: vec![Part {
                text: build_full_prompt(text, mode),
            }],
        }],
        generation_config: GenerationConfig {
            temperature: 0.7,
            max_output_tokens: 2000,
        },
    }
}

/// 応答から結果テキストを取り出す（candidates[0].content.parts[0].text、トリム済み）
fn extract_content(response: GenerateContentResponse) -> Option<String> {
    response
        .candidates
        .into_iter()
        .next()
        .and_then(|c| c.content)
        .and_then(|content| content.parts.into_iter().next())
        .and_then(|part| part.text)
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
}

#[async_trait]
impl Rewriter for GeminiRewriter {
    async fn rewrite(&self, text: &str, mode: Mode) -> Result<String, RewriteError> {
        precheck(text, &self.config.api_key)?;

        let request = build_request(text, mode);

        let response = self
            .client
            .post(self.request_url())
            .json(&request)
            .send()
            .await
            .map_err(|e| RewriteError::Network(e.to_string()))?;

        if !response.status().is_success() {
            let status = response.status();
            let body: ApiErrorBody = response.json().await.unwrap_or_default();
            let message = body
                .error
                .and_then(|e| e.message)
                .unwrap_or_else(|| format!("API error: {status}"));
            return Err(RewriteError::Provider(message));
        }

        let data: GenerateContentResponse = response
            .json()
            .await
            .map_err(|e| RewriteError::Network(format!("Response parse error: {e}")))?;

        extract_content(data).ok_or_else(|| {
            RewriteError::Provider("No result returned from Gemini API".to_string())
        })
    }

    fn name(&self) -> &str {
        "gemini"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::settings::Settings;
    use crate::domain::types::Provider;

    fn gemini_config() -> ResolvedConfig {
        let mut config = Settings {
            provider: Provider::Gemini,
            ..Settings::default()
        }
        .resolve();
        config.api_key = "test-key".to_string();
        config
    }

    #[test]
    fn test_normalize_strips_trailing_models_segment() {
        assert_eq!(
            normalize_base_url("https://generativelanguage.googleapis.com/v1beta/models/"),
            "https://generativelanguage.googleapis.com/v1beta"
        );
    }

    #[test]
    fn test_normalize_appends_version_segment() {
        assert_eq!(
            normalize_base_url("https://generativelanguage.googleapis.com"),
            "https://generativelanguage.googleapis.com/v1beta"
        );
    }

    #[test]
    fn test_normalize_keeps_v1() {
        assert_eq!(
            normalize_base_url("https://generativelanguage.googleapis.com/v1/"),
            "https://generativelanguage.googleapis.com/v1"
        );
    }

    #[test]
    fn test_normalize_trims_whitespace() {
        assert_eq!(
            normalize_base_url("  https://generativelanguage.googleapis.com/v1beta "),
            "https://generativelanguage.googleapis.com/v1beta"
        );
    }

    #[test]
    fn test_normalize_is_idempotent() {
        let inputs = [
            "https://generativelanguage.googleapis.com/v1beta/models/",
            "https://generativelanguage.googleapis.com/v1beta",
            "https://generativelanguage.googleapis.com/",
            "https://generativelanguage.googleapis.com/v1",
            "https://proxy.example.com/gemini",
        ];
        for input in inputs {
            let once = normalize_base_url(input);
            assert_eq!(normalize_base_url(&once), once, "not idempotent for {input}");
        }
    }

    #[test]
    fn test_request_url() {
        let rewriter = GeminiRewriter::new(gemini_config());
        assert_eq!(
            rewriter.request_url(),
            "https://generativelanguage.googleapis.com/v1beta/models/gemini-2.5-flash:generateContent?key=test-key"
        );
    }

    #[test]
    fn test_full_prompt_has_guard_except_translate() {
        let prompt = build_full_prompt("Hallo", Mode::Friendly);
        assert!(prompt.starts_with(prompts::LANGUAGE_GUARD));
        assert!(prompt.contains("Hallo"));

        let prompt = build_full_prompt("Hallo", Mode::Translate);
        assert!(!prompt.contains(prompts::LANGUAGE_GUARD));
    }

    #[test]
    fn test_request_wire_format() {
        let request = build_request("hi", Mode::Shorten);
        let json = serde_json::to_value(&request).unwrap();
        assert_eq!(json["generationConfig"]["temperature"], 0.7);
        assert_eq!(json["generationConfig"]["maxOutputTokens"], 2000);
        assert!(json["contents"][0]["parts"][0]["text"]
            .as_str()
            .unwrap()
            .contains("hi"));
    }

    #[test]
    fn test_extract_content() {
        let data: GenerateContentResponse = serde_json::from_value(serde_json::json!({
            "candidates": [{
                "content": { "parts": [{ "text": " Short.\n" }] }
            }]
        }))
        .unwrap();
        assert_eq!(extract_content(data).as_deref(), Some("Short."));
    }

    #[test]
    fn test_extract_content_missing_candidates() {
        let data: GenerateContentResponse =
            serde_json::from_value(serde_json::json!({})).unwrap();
        assert!(extract_content(data).is_none());
    }

    #[tokio::test]
    async fn test_rewrite_without_key_fails_before_network() {
        let mut config = gemini_config();
        config.api_key = String::new();
        let rewriter = GeminiRewriter::new(config);

        let result = rewriter.rewrite("Hello", Mode::Grammar).await;
        assert!(matches!(result, Err(RewriteError::Auth)));
    }

    #[test]
    fn test_name() {
        assert_eq!(GeminiRewriter::new(gemini_config()).name(), "gemini");
    }
}
