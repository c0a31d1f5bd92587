use crate::domain::types::Mode;

/// オーバーレイの種類
#[derive(Debug, Clone, PartialEq)]
pub enum Overlay {
    Result(ResultOverlay),
    Error(ErrorOverlay),
}

/// リライト結果の表示。Replace は選択が編集可能要素内のときだけ有効。
#[derive(Debug, Clone, PartialEq)]
pub struct ResultOverlay {
    pub original: String,
    pub result: String,
    pub mode: Mode,
    pub replace_enabled: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ErrorOverlay {
    pub message: String,
}

/// 閉じる操作の由来
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DismissReason {
    Close,
    Backdrop,
    EscapeKey,
}

/// オーバーレイの保持者。同時に存在できるインスタンスは1つだけで、
/// 新しい表示は既存のものを置き換える。
#[derive(Debug, Default)]
pub struct OverlayHost {
    current: Option<Overlay>,
}

impl OverlayHost {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn show_result(
        &mut self,
        original: String,
        result: String,
        mode: Mode,
        replace_enabled: bool,
    ) {
        self.current = Some(Overlay::Result(ResultOverlay {
            original,
            result,
            mode,
            replace_enabled,
        }));
    }

    pub fn show_error(&mut self, message: String) {
        self.current = Some(Overlay::Error(ErrorOverlay { message }));
    }

    /// オーバーレイを閉じる。閉じたら true。
    pub fn dismiss(&mut self, reason: DismissReason) -> bool {
        if self.current.is_none() {
            return false;
        }
        log::debug!("オーバーレイを閉じる: {reason:?}");
        self.current = None;
        true
    }

    pub fn current(&self) -> Option<&Overlay> {
        self.current.as_ref()
    }

    pub fn is_open(&self) -> bool {
        self.current.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_single_instance() {
        let mut host = OverlayHost::new();
        host.show_result("a".into(), "b".into(), Mode::Professional, true);
        host.show_error("boom".into());

        // 新しいオーバーレイが既存を置き換える
        match host.current() {
            Some(Overlay::Error(e)) => assert_eq!(e.message, "boom"),
            other => panic!("unexpected overlay: {other:?}"),
        }
    }

    #[test]
    fn test_dismiss_reasons() {
        let mut host = OverlayHost::new();
        assert!(!host.dismiss(DismissReason::Close));

        for reason in [
            DismissReason::Close,
            DismissReason::Backdrop,
            DismissReason::EscapeKey,
        ] {
            host.show_error("x".into());
            assert!(host.dismiss(reason));
            assert!(!host.is_open());
        }
    }

    #[test]
    fn test_replace_disabled_outside_editable() {
        let mut host = OverlayHost::new();
        host.show_result("a".into(), "b".into(), Mode::Grammar, false);
        match host.current() {
            Some(Overlay::Result(r)) => assert!(!r.replace_enabled),
            other => panic!("unexpected overlay: {other:?}"),
        }
    }
}
