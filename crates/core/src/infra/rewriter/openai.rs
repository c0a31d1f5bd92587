use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use super::{precheck, prompts, RewriteError, Rewriter};
use crate::domain::settings::ResolvedConfig;
use crate::domain::types::Mode;

/// OpenAI 互換 chat-completions API を使用するリライター
pub struct OpenAiRewriter {
    client: reqwest::Client,
    config: ResolvedConfig,
}

#[derive(Debug, Serialize)]
struct ChatMessage {
    role: &'static str,
    content: String,
}

#[derive(Debug, Serialize)]
struct ChatCompletionRequest {
    model: String,
    messages: Vec<ChatMessage>,
    temperature: f64,
    max_tokens: u32,
}

#[derive(Debug, Deserialize)]
struct ChatCompletionResponse {
    #[serde(default)]
    choices: Vec<ChatChoice>,
}

#[derive(Debug, Deserialize)]
struct ChatChoice {
    message: ChatMessageBody,
}

#[derive(Debug, Deserialize)]
struct ChatMessageBody {
    content: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
struct ApiErrorBody {
    error: Option<ApiErrorDetail>,
}

#[derive(Debug, Deserialize)]
struct ApiErrorDetail {
    message: Option<String>,
}

impl OpenAiRewriter {
    pub fn new(config: ResolvedConfig) -> Self {
        let client = reqwest::Client::builder()
            .timeout(std::time::Duration::from_secs(30))
            .build()
            .expect("Failed to create HTTP client");

        Self { client, config }
    }
}

/// リクエスト本体を構築する。翻訳モード以外は言語維持ガードを
/// system メッセージとして先頭に積む。
fn build_request(config: &ResolvedConfig, text: &str, mode: Mode) -> ChatCompletionRequest {
    let prompt = prompts::build_prompt(text, mode);

    let mut messages = Vec::new();
    if let Some(guard) = prompts::language_guard_for_mode(mode) {
        messages.push(ChatMessage {
            role: "system",
            content: guard.to_string(),
        });
    }
    messages.push(ChatMessage {
        role: "user",
        content: prompt,
    });

    ChatCompletionRequest {
        model: config.model.clone(),
        messages,
        temperature: 0.7,
        max_tokens: 2000,
    }
}

/// 応答から結果テキストを取り出す（choices[0].message.content、トリム済み）
fn extract_content(response: ChatCompletionResponse) -> Option<String> {
    response
        .choices
        .into_iter()
        .next()
        .and_then(|choice| choice.message.content)
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
}

#[async_trait]
impl Rewriter for OpenAiRewriter {
    async fn rewrite(&self, text: &str, mode: Mode) -> Result<String, RewriteError> {
        precheck(text, &self.config.api_key)?;

        let request = build_request(&self.config, text, mode);

        let response = self
            .client
            .post(&self.config.api_endpoint)
            .bearer_auth(&self.config.api_key)
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

        let data: ChatCompletionResponse = response
            .json()
            .await
            .map_err(|e| RewriteError::Network(format!("Response parse error: {e}")))?;

        extract_content(data)
            .ok_or_else(|| RewriteError::Provider("No result returned from API".to_string()))
    }

    fn name(&self) -> &str {
        "openai"
    }
}
