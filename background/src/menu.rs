use aw_core::domain::types::Mode;

/// コンテキストメニュー項目とリライトモードの対応表。
/// 項目はインストール時に選択コンテキストへ登録される。
pub const MENU_ITEMS: &[(&str, Mode)] = &[
    ("rewrite-professional", Mode::Professional),
    ("fix-grammar", Mode::Grammar),
    ("shorten", Mode::Shorten),
    ("expand", Mode::Expand),
    ("make-friendly", Mode::Friendly),
    ("translate", Mode::Translate),
];

/// メニューIDからモードを引く
pub fn mode_for_menu_id(menu_id: &str) -> Option<Mode> {
    MENU_ITEMS
        .iter()
        .find(|(id, _)| *id == menu_id)
        .map(|(_, mode)| *mode)
}
