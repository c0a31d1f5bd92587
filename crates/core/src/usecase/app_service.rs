use std::sync::{Arc, Mutex};

use crate::domain::error::AppError;
use crate::domain::settings::{ResolvedConfig, Settings};
use crate::domain::types::{Mode, PageAck, PageCommand, RewriteRequest, SelectionInfo, TabId};
use crate::infra::notify::Notifier;
use crate::infra::output::OutputTarget;
use crate::infra::rewriter::{self, RewriteError, Rewriter};
use crate::infra::storage::Storage;
use crate::infra::tabs::PageChannel;

use super::delivery::{deliver_with_reinjection, REINJECT_DELAY};

/// 設定からリライターを生成するファクトリ（テストで差し替える）
pub type RewriterFactory = Box<dyn Fn(&ResolvedConfig) -> Box<dyn Rewriter> + Send + Sync>;

/// 1リクエスト分の配信がどこで終わったか
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeliveryOutcome {
    /// ページエージェントに到達した
    Delivered,
    /// クリップボードへのフォールバックで退避した
    CopiedToClipboard,
    /// どこにも届けられず、ログにだけ残った
    Dropped,
}

/// Orchestrator。リライト要求を受け、設定を解決し、アダプタを呼び、
/// 結果かエラーを要求元へ届ける。リクエストごとに独立で、
/// 未完了リクエスト間の協調は行わない。
pub struct AppService {
    storage: Mutex<Storage>,
    channel: Arc<dyn PageChannel>,
    clipboard: Arc<dyn OutputTarget>,
    notifier: Arc<dyn Notifier>,
    rewriter_factory: RewriterFactory,
}

impl AppService {
    pub fn new(
        storage: Storage,
        channel: Arc<dyn PageChannel>,
        clipboard: Arc<dyn OutputTarget>,
        notifier: Arc<dyn Notifier>,
    ) -> Self {
        Self {
            storage: Mutex::new(storage),
            channel,
            clipboard,
            notifier,
            rewriter_factory: Box::new(|config| rewriter::for_config(config)),
        }
    }

    /// リライターの生成方法を差し替える（テスト・カスタムプロバイダ用）
    pub fn with_rewriter_factory(mut self, factory: RewriterFactory) -> Self {
        self.rewriter_factory = factory;
        self
    }

    // ==================== Settings ====================

    pub fn get_settings(&self) -> Result<Settings, AppError> {
        self.storage.lock().unwrap().get_settings()
    }

    pub fn update_settings(&self, settings: Settings) -> Result<(), AppError> {
        self.storage.lock().unwrap().save_settings(&settings)
    }

    /// プロバイダ既定値を適用した実効設定（surface の getSettings 応答）
    pub fn resolved_config(&self) -> Result<ResolvedConfig, AppError> {
        Ok(self.get_settings()?.resolve())
    }

    // ==================== Rewrite ====================

    /// リライト本体。長さ上限 → 設定解決 → アダプタ呼び出しの順で、
    /// 不正入力とキー未設定はネットワークに出る前にここで短絡する。
    pub async fn rewrite(&self, request: &RewriteRequest) -> Result<String, AppError> {
        if request.text.chars().count() > rewriter::MAX_TEXT_LEN {
            return Err(RewriteError::InvalidInput.into());
        }

        let config = self.resolved_config()?;
        if config.api_key.is_empty() {
            return Err(RewriteError::Auth.into());
        }

        let rewriter = (self.rewriter_factory)(&config);
        log::info!(
            "リライト開始: provider={} mode={:?} len={}",
            rewriter.name(),
            request.mode,
            request.text.chars().count()
        );

        rewriter
            .rewrite(&request.text, request.mode)
            .await
            .map_err(Into::into)
    }

    /// コンテキストメニュー起点のリライト。結果（またはエラー）を
    /// 発生元タブへ届けるところまでが1リクエスト。
    pub async fn handle_menu_rewrite(
        &self,
        tab: TabId,
        mode: Mode,
        selected_text: &str,
    ) -> DeliveryOutcome {
        let request_id = uuid::Uuid::new_v4();
        log::info!("[{request_id}] コンテキストメニュー要求: tab={tab} mode={mode:?}");

        let request = RewriteRequest {
            text: selected_text.to_string(),
            mode,
        };

        match self.rewrite(&request).await {
            Ok(result) => {
                self.deliver_result(request_id, tab, &request.text, &result, mode)
                    .await
            }
            Err(err) => {
                log::error!("[{request_id}] リライト失敗: {err}");
                self.report_error(request_id, tab, &err).await
            }
        }
    }

    // ==================== Delivery ====================

    /// 結果をタブへ配信する。2回の試行が尽きたらクリップボードに1回だけ
    /// 退避し、可能なら通知を出す。
    async fn deliver_result(
        &self,
        request_id: uuid::Uuid,
        tab: TabId,
        original: &str,
        result: &str,
        mode: Mode,
    ) -> DeliveryOutcome {
        let command = PageCommand::ShowResult {
            original_text: original.to_string(),
            result: result.to_string(),
            mode,
        };

        match deliver_with_reinjection(&*self.channel, tab, command).await {
            Ok(_) => {
                log::info!("[{request_id}] 結果を配信");
                DeliveryOutcome::Delivered
            }
            Err(err) => {
                log::error!("[{request_id}] コンテンツスクリプトに到達できない: {err}");
                match self.clipboard.deliver(result) {
                    Ok(()) => {
                        self.notifier
                            .notify("Ai Writer", "Result copied to clipboard!");
                        DeliveryOutcome::CopiedToClipboard
                    }
                    Err(clip_err) => {
                        if !self
                            .notifier
                            .notify("Ai Writer", "Could not deliver the result")
                        {
                            log::error!("[{request_id}] フォールバックも失敗: {clip_err}");
                        }
                        DeliveryOutcome::Dropped
                    }
                }
            }
        }
    }

    /// エラーをタブへ配信する。配信パターンは結果と同じ最大2回。
    /// 尽きたら通知、通知が無い環境ではログのみ（意図的に握りつぶす）。
    async fn report_error(
        &self,
        request_id: uuid::Uuid,
        tab: TabId,
        error: &AppError,
    ) -> DeliveryOutcome {
        let command = PageCommand::ShowError {
            error: error.message.clone(),
        };

        match deliver_with_reinjection(&*self.channel, tab, command).await {
            Ok(_) => DeliveryOutcome::Delivered,
            Err(err) => {
                log::error!("[{request_id}] エラーを届けられない: {err}");
                if self.notifier.notify("Ai Writer Error", &error.message) {
                    DeliveryOutcome::Delivered
                } else {
                    log::error!("[{request_id}] エラー報告を断念: {}", error.message);
                    DeliveryOutcome::Dropped
                }
            }
        }
    }

    // ==================== Panel surface ====================

    /// パネル表示時の選択プリロード。エージェントが居なければ先に注入する。
    /// どこかで失敗しても空の選択として返す（ユーザーは手で貼り付けられる）。
    pub async fn get_selection(&self, tab: TabId) -> SelectionInfo {
        if let Err(e) = self.channel.inject(tab).await {
            log::info!("インジェクション備考: {e}");
        }
        tokio::time::sleep(REINJECT_DELAY).await;

        match self.channel.send(tab, PageCommand::GetSelection).await {
            Ok(PageAck::Selection(info)) => info,
            Ok(other) => {
                log::warn!("getSelection への想定外応答: {other:?}");
                SelectionInfo::default()
            }
            Err(e) => {
                log::info!("選択を取得できない（ページ未対応の可能性）: {e}");
                SelectionInfo::default()
            }
        }
    }

    /// パネルの Replace 操作。編集可能要素が無ければ失敗を返す。
    pub async fn replace_selection(&self, tab: TabId, text: &str) -> Result<(), AppError> {
        let command = PageCommand::ReplaceText {
            text: text.to_string(),
        };
        match self.channel.send(tab, command).await {
            Ok(PageAck::Ok) => Ok(()),
            Ok(PageAck::Failed { error }) => Err(AppError::no_editable(error)),
            Ok(other) => Err(AppError::internal(format!("想定外応答: {other:?}"))),
            Err(e) => Err(AppError::delivery(e.to_string())),
        }
    }
}
