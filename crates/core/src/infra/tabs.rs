use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;

use crate::domain::types::{PageAck, PageCommand, TabId};
use crate::infra::page::{PageAgent, PageModel};

/// タブへの到達エラー
#[derive(Debug, thiserror::Error)]
pub enum ChannelError {
    /// タブにページエージェント（リスナー）が居ない
    #[error("No listener in tab {0}")]
    NoListener(TabId),
    #[error("Tab {0} not found")]
    NoSuchTab(TabId),
    /// ページが注入を許可していない（ブラウザ設定ページ等）
    #[error("Injection not allowed in tab {0}")]
    InjectionRefused(TabId),
}

/// 配信ポート: タブ上のページエージェントへコマンドを届ける手段。
/// `send` はリスナー不在で失敗し、`inject` がエージェントを（再）インストールする。
#[async_trait]
pub trait PageChannel: Send + Sync {
    async fn send(&self, tab: TabId, command: PageCommand) -> Result<PageAck, ChannelError>;

    async fn inject(&self, tab: TabId) -> Result<(), ChannelError>;
}

struct TabEntry {
    page: Arc<Mutex<PageModel>>,
    agent: Option<PageAgent>,
    allow_injection: bool,
}

/// タブとページエージェントのレジストリ。
/// ブラウザのタブ + スクリプト注入APIに相当するインプロセス実装。
#[derive(Default)]
pub struct TabHub {
    tabs: Mutex<HashMap<TabId, TabEntry>>,
}

impl TabHub {
    pub fn new() -> Self {
        Self::default()
    }

    /// タブを登録する。エージェントは注入されるまで存在しない。
    /// テストや shell がページ状態を観察できるようハンドルを返す。
    pub fn register_tab(&self, tab: TabId, page: PageModel) -> Arc<Mutex<PageModel>> {
        let page = Arc::new(Mutex::new(page));
        self.tabs.lock().unwrap().insert(
            tab,
            TabEntry {
                page: Arc::clone(&page),
                agent: None,
                allow_injection: true,
            },
        );
        page
    }

    /// 注入を拒否するタブを登録する（注入が禁止されたページのモデル化）
    pub fn register_tab_no_injection(&self, tab: TabId, page: PageModel) -> Arc<Mutex<PageModel>> {
        let page = self.register_tab(tab, page);
        if let Some(entry) = self.tabs.lock().unwrap().get_mut(&tab) {
            entry.allow_injection = false;
        }
        page
    }

    /// エージェントを取り除く（タブ遷移でコンテンツスクリプトが消えた状況）
    pub fn drop_agent(&self, tab: TabId) {
        if let Some(entry) = self.tabs.lock().unwrap().get_mut(&tab) {
            entry.agent = None;
        }
    }

    /// エージェントの有無（テスト用）
    pub fn has_agent(&self, tab: TabId) -> bool {
        self.tabs
            .lock()
            .unwrap()
            .get(&tab)
            .is_some_and(|entry| entry.agent.is_some())
    }

    /// エージェントに対する操作（オーバーレイのボタン操作などをテストから駆動する）
    pub fn with_agent<R>(&self, tab: TabId, f: impl FnOnce(&mut PageAgent) -> R) -> Option<R> {
        let mut tabs = self.tabs.lock().unwrap();
        tabs.get_mut(&tab)
            .and_then(|entry| entry.agent.as_mut())
            .map(f)
    }
}

#[async_trait]
impl PageChannel for TabHub {
    async fn send(&self, tab: TabId, command: PageCommand) -> Result<PageAck, ChannelError> {
        let mut tabs = self.tabs.lock().unwrap();
        let entry = tabs.get_mut(&tab).ok_or(ChannelError::NoSuchTab(tab))?;
        let agent = entry
            .agent
            .as_mut()
            .ok_or(ChannelError::NoListener(tab))?;
        Ok(agent.handle(command))
    }

    async fn inject(&self, tab: TabId) -> Result<(), ChannelError> {
        let mut tabs = self.tabs.lock().unwrap();
        let entry = tabs.get_mut(&tab).ok_or(ChannelError::NoSuchTab(tab))?;
        if !entry.allow_injection {
            return Err(ChannelError::InjectionRefused(tab));
        }
        // 既に注入済みなら何もしない（コンテンツスクリプトの二重初期化ガード）
        if entry.agent.is_none() {
            entry.agent = Some(PageAgent::new(Arc::clone(&entry.page)));
            log::info!("タブ {tab} にページエージェントを注入");
        }
        Ok(())
    }
}
