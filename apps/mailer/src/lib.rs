//! # notifymail メーラー
//!
//! Markdown 本文から HTML/プレーンテキストの通知メールを生成し、SMTP で送信する。
//!
//! ## 処理の流れ
//!
//! ```text
//! MailSettings ─┐
//!               ├→ SmtpConfig / SendOptions ─┐
//! to, cc, title ┘                            ├→ 検証 → MIME 構築 → SMTP 送信
//! content ──→ TemplateRenderer ──────────────┘
//! ```
//!
//! いずれかの段階で失敗した時点で処理を打ち切り、そのエラーを返す。
//!
//! ## 使用例
//!
//! ```rust,ignore
//! use notifymail_domain::mail::MailSettings;
//!
//! async fn notify(settings: &MailSettings) -> Result<(), notifymail_domain::NotificationError> {
//!     notifymail_mailer::send_mail(settings, "a@example.com", "", "Hi", "Hello").await
//! }
//! ```

pub mod config;
pub mod usecase;

pub use usecase::notification::{ContentRenderer, MailService, TemplateRenderer, send_mail};
