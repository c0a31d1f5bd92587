use serde::{Deserialize, Serialize};

/// リライトモード
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Mode {
    Professional,
    Friendly,
    Shorten,
    Expand,
    Grammar,
    Translate,
}

/// 文章生成APIプロバイダ
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Provider {
    OpenAi,
    Gemini,
}

/// ブラウザタブ識別子
pub type TabId = u64;

/// リライト要求（ユーザー操作ごとに生成、永続化しない）
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RewriteRequest {
    pub text: String,
    pub mode: Mode,
}

/// ページの選択状態（拡張境界を越えるのは text + bool のみ）
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SelectionInfo {
    pub text: String,
    pub is_editable: bool,
}

/// Orchestrator → ページエージェントへのコマンド
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "action", rename_all = "camelCase")]
pub enum PageCommand {
    #[serde(rename_all = "camelCase")]
    ShowResult {
        original_text: String,
        result: String,
        mode: Mode,
    },
    ShowError {
        error: String,
    },
    GetSelection,
    ReplaceText {
        text: String,
    },
}

/// ページエージェントからの応答
#[derive(Debug, Clone, PartialEq)]
pub enum PageAck {
    Ok,
    Selection(SelectionInfo),
    Failed { error: String },
}
