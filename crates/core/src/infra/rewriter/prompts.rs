/// モード別リライト指示文テンプレート

use crate::domain::types::Mode;

/// Professional: 明瞭かつフォーマルに
pub const INSTRUCTION_PROFESSIONAL: &str = "Rewrite the following text to be clearer and more professional while keeping the same meaning. IMPORTANT: Keep the text in the same language as the input - do not translate it. Preserve names, URLs, and product names. Return only the rewritten text without any explanations:";

/// Grammar: 文法・綴りの修正のみ
pub const INSTRUCTION_GRAMMAR: &str = "Fix grammar and spelling mistakes in the following text. Keep the meaning and language exactly the same - do not translate. Preserve names, URLs, and product names. Return only the corrected text without any explanations:";

/// Friendly: 砕けた調子に
pub const INSTRUCTION_FRIENDLY: &str = "Rewrite the following text to be warmer and more casual while keeping the same meaning. IMPORTANT: Keep the text in the same language as the input - do not translate it. Preserve names, URLs, and product names. Return only the rewritten text without any explanations:";

/// Shorten: 要点を保って短縮
pub const INSTRUCTION_SHORTEN: &str = "Shorten the following text while preserving all key points. IMPORTANT: Keep the text in the same language as the input - do not translate it. Preserve names, URLs, and product names. Return only the shortened text without any explanations:";

/// Expand: 意味を変えずに詳細化
pub const INSTRUCTION_EXPAND: &str = "Expand the following text by adding clarity and detail without changing the meaning. IMPORTANT: Keep the text in the same language as the input - do not translate it. Preserve names, URLs, and product names. Return only the expanded text without any explanations:";

/// Translate: 英語へ翻訳（唯一、言語維持の指示を持たない）
pub const INSTRUCTION_TRANSLATE: &str = "Translate the following text to English. Preserve names, URLs, and product names. Return only the translated text without any explanations:";

/// 非翻訳モードでリクエストに添えるシステムレベルの言語維持ガード
pub const LANGUAGE_GUARD: &str = "You must preserve the original language of the input text. Do not translate unless explicitly asked to translate. Keep the output in the same language as the input.";

/// モードに対応する指示文を取得する
pub fn instruction_for_mode(mode: Mode) -> &'static str {
    match mode {
        Mode::Professional => INSTRUCTION_PROFESSIONAL,
        Mode::Grammar => INSTRUCTION_GRAMMAR,
        Mode::Friendly => INSTRUCTION_FRIENDLY,
        Mode::Shorten => INSTRUCTION_SHORTEN,
        Mode::Expand => INSTRUCTION_EXPAND,
        Mode::Translate => INSTRUCTION_TRANSLATE,
    }
}

/// 指示文 + 空行 + 本文を結合してユーザープロンプトを構築する
pub fn build_prompt(text: &str, mode: Mode) -> String {
    format!("{}\n\n{}", instruction_for_mode(mode), text)
}

/// 翻訳モードだけ言語維持ガードを付けない
pub fn language_guard_for_mode(mode: Mode) -> Option<&'static str> {
    match mode {
        Mode::Translate => None,
        _ => Some(LANGUAGE_GUARD),
    }
}
