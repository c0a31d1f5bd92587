use super::model::{ElementId, PageModel};
use super::selection::find_editable_target;
use super::PageError;

/// value の [start, end)（文字単位）を insert で置き換える
fn splice_chars(value: &str, start: usize, end: usize, insert: &str) -> String {
    let mut result: String = value.chars().take(start).collect();
    result.push_str(insert);
    result.extend(value.chars().skip(end.max(start)));
    result
}

/// 現在の選択テキストを new_text で置換する。
/// input/textarea は要素が記録しているオフセット位置で値をスプライスし、
/// カーソルを挿入テキスト直後に置く。contenteditable は選択範囲の内容を
/// 削除して単一テキストノードとして挿入し、カーソルを直後に折り畳む。
/// どちらも置換後に合成 input イベントを発火する。
pub fn replace_selection(page: &mut PageModel, new_text: &str) -> Result<ElementId, PageError> {
    let sel = page.selection().cloned().ok_or(PageError::NoEditableTarget)?;
    let target = find_editable_target(page, sel.element).ok_or(PageError::NoEditableTarget)?;

    let element = page.element(target);
    let inserted_len = new_text.chars().count();

    if element.tag.eq_ignore_ascii_case("textarea") || element.tag.eq_ignore_ascii_case("input") {
        let (start, end) = (element.selection_start, element.selection_end);
        let new_value = splice_chars(&element.value, start, end, new_text);
        let cursor = start + inserted_len;

        let element = page.element_mut(target);
        element.value = new_value;
        element.selection_start = cursor;
        element.selection_end = cursor;
        page.collapse_selection_at(target, cursor);
    } else {
        let new_value = splice_chars(&element.value, sel.start, sel.end, new_text);
        let cursor = sel.start + inserted_len;

        page.element_mut(target).value = new_value;
        page.collapse_selection_at(target, cursor);
    }

    page.dispatch_input(target);
    Ok(target)
}

/// 置換できなければクリップボードへ、それも拒否されたら手動コピーへ
/// フォールバックする。
pub fn replace_or_copy(page: &mut PageModel, new_text: &str) {
    if replace_selection(page, new_text).is_ok() {
        return;
    }
    log::warn!("テキスト置換に失敗、クリップボードにフォールバック");
    if page.write_clipboard(new_text).is_err() {
        page.manual_copy(new_text);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_replace_in_textarea() {
        let mut page = PageModel::new();
        let textarea = page.add_textarea(None);
        page.set_value(textarea, "foo bar baz");
        page.select_range(textarea, 4, 7);

        replace_selection(&mut page, "BAZ").unwrap();

        let element = page.element(textarea);
        assert_eq!(element.value, "foo BAZ baz");
        assert_eq!(element.selection_start, 7);
        assert_eq!(element.selection_end, 7);
        assert_eq!(page.input_events(), &[textarea]);
    }

    #[test]
    fn test_replace_in_text_input() {
        let mut page = PageModel::new();
        let input = page.add_input("text", None);
        page.set_value(input, "hello world");
        page.select_range(input, 0, 5);

        replace_selection(&mut page, "goodbye").unwrap();

        let element = page.element(input);
        assert_eq!(element.value, "goodbye world");
        assert_eq!(element.selection_start, 7);
    }

    #[test]
    fn test_replace_longer_selection_with_shorter_text() {
        let mut page = PageModel::new();
        let textarea = page.add_textarea(None);
        page.set_value(textarea, "aaa bbb ccc");
        page.select_range(textarea, 4, 11);

        replace_selection(&mut page, "x").unwrap();
        assert_eq!(page.element(textarea).value, "aaa x");
        assert_eq!(page.element(textarea).selection_start, 5);
    }

    #[test]
    fn test_replace_in_content_editable() {
        let mut page = PageModel::new();
        let div = page.add_content_editable("div", None);
        page.set_value(div, "one two three");
        page.select_range(div, 4, 7);

        replace_selection(&mut page, "2").unwrap();

        assert_eq!(page.element(div).value, "one 2 three");
        // カーソルは挿入テキスト直後に折り畳まれる
        assert_eq!(
            page.selection().map(|s| (s.start, s.end)),
            Some((5, 5))
        );
        assert_eq!(page.input_events(), &[div]);
    }

    #[test]
    fn test_replace_from_descendant_of_editable() {
        let mut page = PageModel::new();
        let div = page.add_content_editable("div", None);
        let span = page.add_element("span", Some(div));
        page.set_value(div, "abc def");
        // 選択はテキスト子要素から始まるが、対象は祖先の contenteditable
        page.select_range(span, 0, 3);

        let target = replace_selection(&mut page, "xyz").unwrap();
        assert_eq!(target, div);
        assert_eq!(page.element(div).value, "xyz def");
    }

    #[test]
    fn test_replace_without_editable_target_fails() {
        let mut page = PageModel::new();
        let p = page.add_element("p", None);
        page.set_value(p, "static");
        page.select_range(p, 0, 6);

        assert!(matches!(
            replace_selection(&mut page, "x"),
            Err(PageError::NoEditableTarget)
        ));
        assert!(page.input_events().is_empty());
    }

    #[test]
    fn test_replace_multibyte() {
        let mut page = PageModel::new();
        let textarea = page.add_textarea(None);
        page.set_value(textarea, "これはペンです");
        page.select_range(textarea, 3, 5);

        replace_selection(&mut page, "本").unwrap();
        assert_eq!(page.element(textarea).value, "これは本です");
        assert_eq!(page.element(textarea).selection_start, 4);
    }

    #[test]
    fn test_replace_or_copy_falls_back_to_clipboard() {
        let mut page = PageModel::new();
        let p = page.add_element("p", None);
        page.set_value(p, "static");
        page.select_range(p, 0, 6);

        replace_or_copy(&mut page, "result text");
        assert_eq!(page.clipboard_text(), Some("result text"));
    }

    #[test]
    fn test_replace_or_copy_manual_fallback_when_denied() {
        let mut page = PageModel::new();
        page.deny_clipboard();
        let p = page.add_element("p", None);
        page.set_value(p, "static");
        page.select_range(p, 0, 6);

        replace_or_copy(&mut page, "result text");
        // 手動コピー経路でもクリップボードに到達する
        assert_eq!(page.clipboard_text(), Some("result text"));
    }

    #[test]
    fn test_splice_chars() {
        assert_eq!(splice_chars("foo bar baz", 4, 7, "BAZ"), "foo BAZ baz");
        assert_eq!(splice_chars("abc", 0, 0, "x"), "xabc");
        assert_eq!(splice_chars("abc", 3, 3, "x"), "abcx");
        assert_eq!(splice_chars("", 0, 0, "x"), "x");
    }
}
