use async_trait::async_trait;

use super::{RewriteError, Rewriter, MAX_TEXT_LEN};
use crate::domain::types::Mode;

/// NoopRewriter: ネットワークに出ずにテキストをそのまま返すモック実装。
/// Orchestrator のテストで実プロバイダの代わりに使う。
/// 長さ上限だけは実アダプタと同じく適用する。
pub struct NoopRewriter;

#[async_trait]
impl Rewriter for NoopRewriter {
    async fn rewrite(&self, text: &str, _mode: Mode) -> Result<String, RewriteError> {
        if text.chars().count() > MAX_TEXT_LEN {
            return Err(RewriteError::InvalidInput);
        }
        Ok(format!("[rewritten] {text}"))
    }

    fn name(&self) -> &str {
        "noop"
    }
}
