mod clipboard;

pub use clipboard::ClipboardOutput;

use crate::domain::error::AppError;

/// 配信フォールバック先 trait。
/// ページに届けられなかった結果テキストの最終的な受け皿。
pub trait OutputTarget: Send + Sync {
    fn deliver(&self, text: &str) -> Result<(), AppError>;

    fn name(&self) -> &str;
}

/// テスト用: 配信呼び出しを記録する OutputTarget
#[derive(Default)]
pub struct MockOutput {
    delivered: std::sync::Mutex<Vec<String>>,
    fail: bool,
}

impl MockOutput {
    pub fn new() -> Self {
        Self::default()
    }

    /// 常に失敗するモック（クリップボードが使えない環境）
    pub fn failing() -> Self {
        Self {
            delivered: std::sync::Mutex::new(Vec::new()),
            fail: true,
        }
    }

    pub fn delivered(&self) -> Vec<String> {
        self.delivered.lock().unwrap().clone()
    }
}

impl OutputTarget for MockOutput {
    fn deliver(&self, text: &str) -> Result<(), AppError> {
        if self.fail {
            return Err(AppError::delivery("クリップボードが利用できません"));
        }
        self.delivered.lock().unwrap().push(text.to_string());
        Ok(())
    }

    fn name(&self) -> &str {
        "mock"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mock_output_records() {
        let output = MockOutput::new();
        output.deliver("hello").unwrap();
        assert_eq!(output.delivered(), vec!["hello".to_string()]);
    }

    #[test]
    fn test_failing_mock() {
        let output = MockOutput::failing();
        assert!(output.deliver("hello").is_err());
        assert!(output.delivered().is_empty());
    }
}
