//! AI Writer コア。
//!
//! 選択テキストを外部の文章生成APIでリライトするための3コンポーネント:
//! - `infra::rewriter`: プロバイダ別リクエストアダプタ
//! - `usecase`: 設定解決・アダプタ呼び出し・配信のオーケストレーション
//! - `infra::page`: ページ側の選択検出・テキスト置換・オーバーレイ

pub mod domain;
pub mod infra;
pub mod usecase;
