use serde::Serialize;

/// アプリケーション共通エラーコード
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum ErrorCode {
    #[serde(rename = "E_INVALID_INPUT")]
    InvalidInput,
    #[serde(rename = "E_AUTH")]
    Auth,
    #[serde(rename = "E_PROVIDER")]
    Provider,
    #[serde(rename = "E_NETWORK")]
    Network,
    #[serde(rename = "E_NO_EDITABLE")]
    NoEditable,
    #[serde(rename = "E_DELIVERY")]
    Delivery,
    #[serde(rename = "E_STORAGE")]
    Storage,
    #[serde(rename = "E_INTERNAL")]
    Internal,
}

/// アプリケーションエラー（surface へ返すペイロード兼用）
#[derive(Debug, Clone, Serialize)]
pub struct AppError {
    pub code: ErrorCode,
    pub message: String,
    pub recoverable: bool,
}

impl AppError {
    pub fn invalid_input(msg: impl Into<String>) -> Self {
        Self {
            code: ErrorCode::InvalidInput,
            message: msg.into(),
            recoverable: true,
        }
    }

    pub fn auth(msg: impl Into<String>) -> Self {
        Self {
            code: ErrorCode::Auth,
            message: msg.into(),
            recoverable: true,
        }
    }

    pub fn provider(msg: impl Into<String>) -> Self {
        Self {
            code: ErrorCode::Provider,
            message: msg.into(),
            recoverable: true,
        }
    }

    pub fn network(msg: impl Into<String>) -> Self {
        Self {
            code: ErrorCode::Network,
            message: msg.into(),
            recoverable: true,
        }
    }

    pub fn no_editable(msg: impl Into<String>) -> Self {
        Self {
            code: ErrorCode::NoEditable,
            message: msg.into(),
            recoverable: true,
        }
    }

    pub fn delivery(msg: impl Into<String>) -> Self {
        Self {
            code: ErrorCode::Delivery,
            message: msg.into(),
            recoverable: true,
        }
    }

    pub fn storage(msg: impl Into<String>) -> Self {
        Self {
            code: ErrorCode::Storage,
            message: msg.into(),
            recoverable: false,
        }
    }

    pub fn internal(msg: impl Into<String>) -> Self {
        Self {
            code: ErrorCode::Internal,
            message: msg.into(),
            recoverable: false,
        }
    }
}

impl std::fmt::Display for AppError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{:?}] {}", self.code, self.message)
    }
}

impl std::error::Error for AppError {}
