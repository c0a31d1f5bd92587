use std::sync::Arc;

use tokio::sync::{mpsc, oneshot};

use aw_core::domain::types::{Mode, RewriteRequest, TabId};
use aw_core::usecase::app_service::{AppService, DeliveryOutcome};

use crate::menu;
use crate::messages::{AckResponse, RewriteResponse, RuntimeRequest, RuntimeResponse};

/// surface からの要求チャネル。応答は要求ごとの oneshot で返り、
/// チャネル上で同時に処理される要求は常に1つ。
pub type RequestSender = mpsc::Sender<(RuntimeRequest, oneshot::Sender<RuntimeResponse>)>;

/// surface からの要求を AppService に振り分けるルーター
#[derive(Clone)]
pub struct Router {
    service: Arc<AppService>,
}

impl Router {
    pub fn new(service: Arc<AppService>) -> Self {
        Self { service }
    }

    /// 受信ループを起動して送信側ハンドルを返す
    pub fn spawn(&self) -> RequestSender {
        let (tx, mut rx) =
            mpsc::channel::<(RuntimeRequest, oneshot::Sender<RuntimeResponse>)>(16);
        let router = self.clone();
        tokio::spawn(async move {
            while let Some((request, reply)) = rx.recv().await {
                let response = router.dispatch(request).await;
                if reply.send(response).is_err() {
                    log::warn!("応答チャネルが閉じられている（surface が先に終了）");
                }
            }
        });
        tx
    }

    /// 1要求を処理して応答を生成する
    pub async fn dispatch(&self, request: RuntimeRequest) -> RuntimeResponse {
        match request {
            RuntimeRequest::Rewrite { text, mode } => {
                let request = RewriteRequest { text, mode };
                match self.service.rewrite(&request).await {
                    Ok(result) => RuntimeResponse::Rewrite(RewriteResponse::ok(result)),
                    Err(error) => RuntimeResponse::Rewrite(RewriteResponse::err(error)),
                }
            }
            RuntimeRequest::GetSettings => match self.service.resolved_config() {
                Ok(config) => RuntimeResponse::Settings(config),
                Err(error) => RuntimeResponse::Ack(AckResponse::from_result(Err(error))),
            },
            RuntimeRequest::UpdateSettings { settings } => {
                RuntimeResponse::Ack(AckResponse::from_result(
                    self.service.update_settings(settings),
                ))
            }
            RuntimeRequest::GetSelection { tab_id } => {
                RuntimeResponse::Selection(self.service.get_selection(tab_id).await)
            }
            RuntimeRequest::ReplaceText { tab_id, text } => {
                RuntimeResponse::Ack(AckResponse::from_result(
                    self.service.replace_selection(tab_id, &text).await,
                ))
            }
        }
    }

    /// コンテキストメニュークリックのエントリポイント。
    /// 選択テキストが無ければ何もしない。未知のメニューIDは professional 扱い。
    pub async fn on_menu_clicked(
        &self,
        menu_id: &str,
        tab: TabId,
        selection_text: &str,
    ) -> Option<DeliveryOutcome> {
        if selection_text.is_empty() {
            return None;
        }
        let mode = menu::mode_for_menu_id(menu_id).unwrap_or(Mode::Professional);
        Some(
            self.service
                .handle_menu_rewrite(tab, mode, selection_text)
                .await,
        )
    }
}
