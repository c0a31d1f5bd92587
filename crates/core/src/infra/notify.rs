/// プラットフォーム通知ポート（配信失敗時の最終フォールバック表示）
pub trait Notifier: Send + Sync {
    /// 通知を表示する。プラットフォームが通知をサポートしていなければ false。
    fn notify(&self, title: &str, message: &str) -> bool;
}

/// 通知機構を持たない環境向けの実装。ログに残すだけで「未サポート」を返す。
pub struct LogNotifier;

impl Notifier for LogNotifier {
    fn notify(&self, title: &str, message: &str) -> bool {
        log::info!("通知（未サポート環境）: {title}: {message}");
        false
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_log_notifier_reports_unsupported() {
        assert!(!LogNotifier.notify("Ai Writer", "Result copied to clipboard!"));
    }
}
