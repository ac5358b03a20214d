//! # notifymail インフラ層
//!
//! SMTP サーバーとの通信を担当するインフラストラクチャ層。
//!
//! ## 設計方針
//!
//! ドメイン層の値（[`SmtpConfig`](notifymail_domain::mail::SmtpConfig) など）から
//! MIME メッセージを組み立て、lettre で送信する。送信手段は
//! [`MailTransport`](notification::MailTransport) trait で抽象化し、
//! 上位層はモックに差し替えてテストできる。
//!
//! ## 依存関係
//!
//! ```text
//! mailer → infra → domain
//! ```
//!
//! ## モジュール構成
//!
//! - [`notification`] - メッセージ構築と送信
//! - `mock` - テスト用モック（`test-utils` feature）

pub mod notification;

#[cfg(any(test, feature = "test-utils"))]
pub mod mock;
