use serde::{Deserialize, Serialize};

use aw_core::domain::error::AppError;
use aw_core::domain::settings::{ResolvedConfig, Settings};
use aw_core::domain::types::{Mode, SelectionInfo, TabId};

/// アクション名定数（surface 間メッセージの種別）
pub const ACTION_REWRITE: &str = "rewrite";
pub const ACTION_GET_SETTINGS: &str = "getSettings";
pub const ACTION_UPDATE_SETTINGS: &str = "updateSettings";
pub const ACTION_GET_SELECTION: &str = "getSelection";
pub const ACTION_REPLACE_TEXT: &str = "replaceText";

/// surface → バックグラウンドへの要求
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "action", rename_all = "camelCase")]
pub enum RuntimeRequest {
    /// パネルの明示的リライト要求（任意テキスト）
    Rewrite { text: String, mode: Mode },
    /// 実効設定の問い合わせ（オプション/パネル surface）
    GetSettings,
    /// 設定の更新（オプション surface）
    UpdateSettings { settings: Settings },
    /// パネル表示時の選択プリロード
    #[serde(rename_all = "camelCase")]
    GetSelection { tab_id: TabId },
    /// パネルの Replace 操作
    #[serde(rename_all = "camelCase")]
    ReplaceText { tab_id: TabId, text: String },
}

/// リライト要求への応答
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RewriteResponse {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub result: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<AppError>,
}

impl RewriteResponse {
    pub fn ok(result: String) -> Self {
        Self {
            success: true,
            result: Some(result),
            error: None,
        }
    }

    pub fn err(error: AppError) -> Self {
        Self {
            success: false,
            result: None,
            error: Some(error),
        }
    }
}

/// 結果データを伴わない操作への応答
#[derive(Debug, Clone, Serialize)]
pub struct AckResponse {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<AppError>,
}

impl AckResponse {
    pub fn from_result(result: Result<(), AppError>) -> Self {
        match result {
            Ok(()) => Self {
                success: true,
                error: None,
            },
            Err(error) => Self {
                success: false,
                error: Some(error),
            },
        }
    }
}

/// バックグラウンド → surface への応答
#[derive(Debug, Clone, Serialize)]
#[serde(untagged)]
pub enum RuntimeResponse {
    Rewrite(RewriteResponse),
    Settings(ResolvedConfig),
    Selection(SelectionInfo),
    Ack(AckResponse),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_request_action_tags() {
        let json = serde_json::to_value(RuntimeRequest::Rewrite {
            text: "hi".into(),
            mode: Mode::Friendly,
        })
        .unwrap();
        assert_eq!(json["action"], ACTION_REWRITE);
        assert_eq!(json["mode"], "friendly");

        let json = serde_json::to_value(RuntimeRequest::GetSettings).unwrap();
        assert_eq!(json["action"], ACTION_GET_SETTINGS);

        let json = serde_json::to_value(RuntimeRequest::GetSelection { tab_id: 3 }).unwrap();
        assert_eq!(json["action"], ACTION_GET_SELECTION);
        assert_eq!(json["tabId"], 3);

        let json = serde_json::to_value(RuntimeRequest::ReplaceText {
            tab_id: 3,
            text: "x".into(),
        })
        .unwrap();
        assert_eq!(json["action"], ACTION_REPLACE_TEXT);

        let json = serde_json::to_value(RuntimeRequest::UpdateSettings {
            settings: Settings::default(),
        })
        .unwrap();
        assert_eq!(json["action"], ACTION_UPDATE_SETTINGS);
    }

    #[test]
    fn test_request_roundtrip() {
        let json = r#"{"action":"rewrite","text":"Hello","mode":"professional"}"#;
        let request: RuntimeRequest = serde_json::from_str(json).unwrap();
        match request {
            RuntimeRequest::Rewrite { text, mode } => {
                assert_eq!(text, "Hello");
                assert_eq!(mode, Mode::Professional);
            }
            other => panic!("unexpected request: {other:?}"),
        }
    }

    #[test]
    fn test_rewrite_response_shape() {
        let json = serde_json::to_value(RewriteResponse::ok("done".into())).unwrap();
        assert_eq!(json["success"], true);
        assert_eq!(json["result"], "done");
        assert!(json.get("error").is_none());

        let json =
            serde_json::to_value(RewriteResponse::err(AppError::auth("no key"))).unwrap();
        assert_eq!(json["success"], false);
        assert_eq!(json["error"]["code"], "E_AUTH");
        assert!(json.get("result").is_none());
    }
}
