use super::OutputTarget;
use crate::domain::error::AppError;

/// システムクリップボードへの配信（arboard 使用）。
/// ページエージェントに到達できなかったときの最終フォールバック。
pub struct ClipboardOutput;

impl ClipboardOutput {
    pub fn new() -> Self {
        Self
    }
}

impl Default for ClipboardOutput {
    fn default() -> Self {
        Self::new()
    }
}

impl OutputTarget for ClipboardOutput {
    fn deliver(&self, text: &str) -> Result<(), AppError> {
        let mut ctx = arboard::Clipboard::new()
            .map_err(|e| AppError::delivery(format!("クリップボード初期化失敗: {e}")))?;
        ctx.set_text(text)
            .map_err(|e| AppError::delivery(format!("クリップボード書き込み失敗: {e}")))?;
        log::info!("結果をクリップボードに退避: {} 文字", text.chars().count());
        Ok(())
    }

    fn name(&self) -> &str {
        "clipboard"
    }
}
