//! # 通知メール
//!
//! レンダリング → 設定検証 → 送信を統合する。
//!
//! ## 設計方針
//!
//! - **fail-fast**: 最初に発生したエラーをそのまま返し、再試行しない
//! - **依存性注入**: レンダラーと送信手段は trait で抽象化し、テストで差し替える
//! - **固定コンテンツ**: ロゴ・製品名・フッターはレンダラーが定数として所有する

mod markdown;
mod service;
mod template_renderer;

pub use service::{MailService, send_mail};
pub use template_renderer::{ContentRenderer, TemplateRenderer};
