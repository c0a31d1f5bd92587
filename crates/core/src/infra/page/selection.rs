use super::model::{Element, ElementId, PageModel};
use crate::domain::types::SelectionInfo;

/// 編集可能要素を探すときに遡る祖先の最大階層数
pub const ANCESTOR_SEARCH_DEPTH: usize = 5;

/// 要素自体が編集可能か: textarea、input[type=text]、contenteditable
fn is_editable(element: &Element) -> bool {
    if element.tag.eq_ignore_ascii_case("textarea") {
        return true;
    }
    if element.tag.eq_ignore_ascii_case("input")
        && element.input_type.as_deref() == Some("text")
    {
        return true;
    }
    element.content_editable
}

/// 選択を含む要素から編集可能要素を探す。
/// 要素自身、続いて祖先を最大5階層まで調べ、最初に見つかったものを返す。
pub fn find_editable_target(page: &PageModel, start: ElementId) -> Option<ElementId> {
    if is_editable(page.element(start)) {
        return Some(start);
    }

    let mut current = page.element(start).parent;
    let mut depth = 0;
    while let Some(id) = current {
        if depth >= ANCESTOR_SEARCH_DEPTH {
            break;
        }
        if is_editable(page.element(id)) {
            return Some(id);
        }
        current = page.element(id).parent;
        depth += 1;
    }

    None
}

/// 現在の選択状態を問い合わせる。テキストは前後トリム。
/// トリム後に空なら「選択なし」として扱う。
pub fn query_selection(page: &PageModel) -> SelectionInfo {
    let Some(sel) = page.selection() else {
        return SelectionInfo::default();
    };

    let text = page
        .selected_text()
        .unwrap_or_default()
        .trim()
        .to_string();
    if text.is_empty() {
        return SelectionInfo::default();
    }

    SelectionInfo {
        text,
        is_editable: find_editable_target(page, sel.element).is_some(),
    }
}
