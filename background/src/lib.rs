mod menu;
mod messages;
mod router;

pub use menu::{mode_for_menu_id, MENU_ITEMS};
pub use messages::{AckResponse, RewriteResponse, RuntimeRequest, RuntimeResponse};
pub use router::{RequestSender, Router};

use std::sync::Arc;

use aw_core::infra::notify::LogNotifier;
use aw_core::infra::output::ClipboardOutput;
use aw_core::infra::storage::Storage;
use aw_core::infra::tabs::{PageChannel, TabHub};
use aw_core::usecase::app_service::AppService;

/// 稼働中のバックグラウンドプロセス一式。
/// surface は `requests` 経由で要求を送り、タブは `tabs` に登録される。
pub struct Background {
    pub service: Arc<AppService>,
    pub tabs: Arc<TabHub>,
    pub requests: RequestSender,
}

/// 設定DBの置き場所。AW_DB_PATH 環境変数で上書きできる。
fn db_path() -> String {
    std::env::var("AW_DB_PATH").unwrap_or_else(|_| {
        let dir = dirs::data_local_dir()
            .unwrap_or_else(|| std::path::PathBuf::from("."))
            .join("ai-writer");
        std::fs::create_dir_all(&dir).ok();
        dir.join("aiwriter.db").to_string_lossy().to_string()
    })
}

/// バックグラウンドプロセスを構築して受信ループを起動する。
/// Tokio ランタイム上で呼ぶこと。
pub fn run() -> Background {
    let storage = Storage::open(&db_path()).expect("設定ストアの初期化に失敗しました");

    let tabs = Arc::new(TabHub::new());
    let service = Arc::new(AppService::new(
        storage,
        Arc::clone(&tabs) as Arc<dyn PageChannel>,
        Arc::new(ClipboardOutput::new()),
        Arc::new(LogNotifier),
    ));
    let requests = Router::new(Arc::clone(&service)).spawn();

    Background {
        service,
        tabs,
        requests,
    }
}
