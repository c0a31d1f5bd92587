use std::time::Duration;

use crate::domain::types::{PageAck, PageCommand, TabId};
use crate::infra::tabs::{ChannelError, PageChannel};

/// 再インジェクション後、コンテンツスクリプトの初期化を待つ固定時間
pub const REINJECT_DELAY: Duration = Duration::from_millis(100);

/// 最大2回試行の配信。
/// 1回目はページエージェントが既に居る前提で送る。失敗したら
/// エージェントを（再）インストールし、固定待ちの後に1回だけ再送する。
/// それ以上のリトライはしない。
pub async fn deliver_with_reinjection(
    channel: &dyn PageChannel,
    tab: TabId,
    command: PageCommand,
) -> Result<PageAck, ChannelError> {
    match channel.send(tab, command.clone()).await {
        Ok(ack) => Ok(ack),
        Err(first_err) => {
            log::warn!("タブ {tab} への配信失敗、再インジェクションを試行: {first_err}");
            if let Err(e) = channel.inject(tab).await {
                // 注入失敗でも再送は1回だけ行う（既に注入済みの可能性がある）
                log::info!("インジェクション備考: {e}");
            }
            tokio::time::sleep(REINJECT_DELAY).await;
            channel.send(tab, command).await
        }
    }
}
