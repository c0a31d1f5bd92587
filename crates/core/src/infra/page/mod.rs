pub mod editor;
pub mod model;
pub mod overlay;
pub mod selection;

pub use model::{Element, ElementId, PageModel, SelectionRange};
pub use overlay::{DismissReason, Overlay, OverlayHost};

use std::sync::{Arc, Mutex};

use crate::domain::types::{PageAck, PageCommand};

/// ページ相互作用のエラー
#[derive(Debug, thiserror::Error)]
pub enum PageError {
    #[error("No editable element found")]
    NoEditableTarget,
    #[error("Clipboard access denied")]
    ClipboardDenied,
}

/// コンテンツスクリプト相当。1タブにつき1つ注入され、
/// Orchestrator からのコマンドを処理してオーバーレイと置換を担う。
pub struct PageAgent {
    page: Arc<Mutex<PageModel>>,
    overlay: OverlayHost,
}

impl PageAgent {
    pub fn new(page: Arc<Mutex<PageModel>>) -> Self {
        Self {
            page,
            overlay: OverlayHost::new(),
        }
    }

    /// 受信コマンドを処理して応答を返す
    pub fn handle(&mut self, command: PageCommand) -> PageAck {
        match command {
            PageCommand::ShowResult {
                original_text,
                result,
                mode,
            } => {
                // Replace の可否は表示時点の選択位置で決まる
                let replace_enabled = {
                    let page = self.page.lock().unwrap();
                    page.selection()
                        .and_then(|sel| selection::find_editable_target(&page, sel.element))
                        .is_some()
                };
                self.overlay
                    .show_result(original_text, result, mode, replace_enabled);
                PageAck::Ok
            }
            PageCommand::ShowError { error } => {
                self.overlay.show_error(error);
                PageAck::Ok
            }
            PageCommand::GetSelection => {
                let page = self.page.lock().unwrap();
                PageAck::Selection(selection::query_selection(&page))
            }
            PageCommand::ReplaceText { text } => {
                let mut page = self.page.lock().unwrap();
                let target = page
                    .selection()
                    .and_then(|sel| selection::find_editable_target(&page, sel.element));
                match target {
                    Some(_) => {
                        editor::replace_or_copy(&mut page, &text);
                        PageAck::Ok
                    }
                    None => PageAck::Failed {
                        error: PageError::NoEditableTarget.to_string(),
                    },
                }
            }
        }
    }

    /// Copy ボタン: 結果テキストをコピーする（execCommand 経路なので常に成功）
    pub fn press_copy(&mut self) -> bool {
        let Some(Overlay::Result(result)) = self.overlay.current().cloned() else {
            return false;
        };
        self.page.lock().unwrap().manual_copy(&result.result);
        true
    }

    /// Replace ボタン: 有効なら選択を置換してオーバーレイを閉じる
    pub fn press_replace(&mut self) -> bool {
        let Some(Overlay::Result(result)) = self.overlay.current().cloned() else {
            return false;
        };
        if !result.replace_enabled {
            return false;
        }
        {
            let mut page = self.page.lock().unwrap();
            editor::replace_or_copy(&mut page, &result.result);
        }
        self.overlay.dismiss(DismissReason::Close);
        true
    }

    pub fn dismiss(&mut self, reason: DismissReason) -> bool {
        self.overlay.dismiss(reason)
    }

    pub fn overlay(&self) -> Option<&Overlay> {
        self.overlay.current()
    }

    pub fn page(&self) -> Arc<Mutex<PageModel>> {
        Arc::clone(&self.page)
    }
}
