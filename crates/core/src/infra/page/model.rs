use super::PageError;

/// ページ内要素の識別子（ページローカル、拡張境界を越えない）
pub type ElementId = usize;

/// ページ内要素。ホスト DOM ノードの代役となる最小モデル。
#[derive(Debug, Clone)]
pub struct Element {
    pub tag: String,
    /// input 要素の type 属性（input 以外は None）
    pub input_type: Option<String>,
    pub content_editable: bool,
    pub parent: Option<ElementId>,
    /// input/textarea の値、または contenteditable コンテナのテキスト内容
    pub value: String,
    /// input/textarea が記録している選択オフセット（文字単位）
    pub selection_start: usize,
    pub selection_end: usize,
}

/// ページ全体の選択範囲。オフセットは要素のテキスト内容への文字単位の位置。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectionRange {
    pub element: ElementId,
    pub start: usize,
    pub end: usize,
}

/// 1ページ分の状態。ページエージェントが所有し、グローバルには共有しない。
#[derive(Debug, Default)]
pub struct PageModel {
    elements: Vec<Element>,
    selection: Option<SelectionRange>,
    /// ページコンテキストのクリップボード。権限拒否をモデル化できる。
    clipboard_denied: bool,
    clipboard: Option<String>,
    /// 発火済み合成 input イベントの記録（ホストページのリスナー相当）
    input_events: Vec<ElementId>,
}

impl PageModel {
    pub fn new() -> Self {
        Self::default()
    }

    fn push_element(&mut self, element: Element) -> ElementId {
        self.elements.push(element);
        self.elements.len() - 1
    }

    /// 汎用要素を追加する（div, span, p など）
    pub fn add_element(&mut self, tag: &str, parent: Option<ElementId>) -> ElementId {
        self.push_element(Element {
            tag: tag.to_string(),
            input_type: None,
            content_editable: false,
            parent,
            value: String::new(),
            selection_start: 0,
            selection_end: 0,
        })
    }

    /// input 要素を追加する
    pub fn add_input(&mut self, input_type: &str, parent: Option<ElementId>) -> ElementId {
        self.push_element(Element {
            tag: "input".to_string(),
            input_type: Some(input_type.to_string()),
            content_editable: false,
            parent,
            value: String::new(),
            selection_start: 0,
            selection_end: 0,
        })
    }

    /// textarea 要素を追加する
    pub fn add_textarea(&mut self, parent: Option<ElementId>) -> ElementId {
        self.push_element(Element {
            tag: "textarea".to_string(),
            input_type: None,
            content_editable: false,
            parent,
            value: String::new(),
            selection_start: 0,
            selection_end: 0,
        })
    }

    /// contenteditable なコンテナを追加する
    pub fn add_content_editable(&mut self, tag: &str, parent: Option<ElementId>) -> ElementId {
        self.push_element(Element {
            tag: tag.to_string(),
            input_type: None,
            content_editable: true,
            parent,
            value: String::new(),
            selection_start: 0,
            selection_end: 0,
        })
    }

    pub fn element(&self, id: ElementId) -> &Element {
        &self.elements[id]
    }

    pub fn element_mut(&mut self, id: ElementId) -> &mut Element {
        &mut self.elements[id]
    }

    pub fn set_value(&mut self, id: ElementId, value: &str) {
        self.elements[id].value = value.to_string();
    }

    /// 選択範囲を設定する。input/textarea では要素側のオフセットも同期する
    /// （ブラウザが selectionStart/End を保持するのと同じ）。
    pub fn select_range(&mut self, id: ElementId, start: usize, end: usize) {
        self.selection = Some(SelectionRange {
            element: id,
            start,
            end,
        });
        let element = &mut self.elements[id];
        if element.tag.eq_ignore_ascii_case("input") || element.tag.eq_ignore_ascii_case("textarea")
        {
            element.selection_start = start;
            element.selection_end = end;
        }
    }

    /// 選択をオフセット位置に折り畳む（カーソル移動）
    pub fn collapse_selection_at(&mut self, id: ElementId, offset: usize) {
        self.selection = Some(SelectionRange {
            element: id,
            start: offset,
            end: offset,
        });
    }

    pub fn clear_selection(&mut self) {
        self.selection = None;
    }

    pub fn selection(&self) -> Option<&SelectionRange> {
        self.selection.as_ref()
    }

    /// 現在の選択テキスト（トリムしない生の値）
    pub fn selected_text(&self) -> Option<String> {
        let sel = self.selection.as_ref()?;
        let value = &self.elements[sel.element].value;
        let text: String = value
            .chars()
            .skip(sel.start)
            .take(sel.end.saturating_sub(sel.start))
            .collect();
        Some(text)
    }

    // --- ページコンテキストのクリップボード ---

    /// クリップボード権限の拒否をシミュレートする
    pub fn deny_clipboard(&mut self) {
        self.clipboard_denied = true;
    }

    /// navigator.clipboard.writeText 相当。権限が無ければ失敗する。
    pub fn write_clipboard(&mut self, text: &str) -> Result<(), PageError> {
        if self.clipboard_denied {
            return Err(PageError::ClipboardDenied);
        }
        self.clipboard = Some(text.to_string());
        Ok(())
    }

    /// 一時要素の選択 + コピーコマンドによる手動コピー。権限に依存しない。
    pub fn manual_copy(&mut self, text: &str) {
        self.clipboard = Some(text.to_string());
    }

    pub fn clipboard_text(&self) -> Option<&str> {
        self.clipboard.as_deref()
    }

    // --- 合成イベント ---

    /// 合成 input イベントを発火する（ページ側リスナーへの変更通知）
    pub fn dispatch_input(&mut self, id: ElementId) {
        self.input_events.push(id);
    }

    pub fn input_events(&self) -> &[ElementId] {
        &self.input_events
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_selected_text() {
        let mut page = PageModel::new();
        let textarea = page.add_textarea(None);
        page.set_value(textarea, "foo bar baz");
        page.select_range(textarea, 4, 7);

        assert_eq!(page.selected_text().as_deref(), Some("bar"));
        assert_eq!(page.element(textarea).selection_start, 4);
        assert_eq!(page.element(textarea).selection_end, 7);
    }

    #[test]
    fn test_selected_text_multibyte() {
        let mut page = PageModel::new();
        let textarea = page.add_textarea(None);
        page.set_value(textarea, "こんにちは世界");
        page.select_range(textarea, 5, 7);

        assert_eq!(page.selected_text().as_deref(), Some("世界"));
    }

    #[test]
    fn test_select_range_on_div_leaves_offsets_alone() {
        let mut page = PageModel::new();
        let div = page.add_content_editable("div", None);
        page.set_value(div, "some text");
        page.select_range(div, 0, 4);

        // contenteditable は要素側オフセットを持たない
        assert_eq!(page.element(div).selection_start, 0);
        assert_eq!(page.element(div).selection_end, 0);
        assert_eq!(page.selected_text().as_deref(), Some("some"));
    }

    #[test]
    fn test_clipboard_denied() {
        let mut page = PageModel::new();
        assert!(page.write_clipboard("x").is_ok());
        assert_eq!(page.clipboard_text(), Some("x"));

        page.deny_clipboard();
        assert!(page.write_clipboard("y").is_err());
        // 手動コピーは権限に依存しない
        page.manual_copy("y");
        assert_eq!(page.clipboard_text(), Some("y"));
    }
}
