//! # 通知送信
//!
//! メール通知の送信を担当するインフラストラクチャモジュール。
//!
//! ## 設計方針
//!
//! - **trait による抽象化**: `MailTransport` trait でメール送信を抽象化
//! - **2 つの実装**: SMTP（本番）、Noop（ドライラン）
//! - **検証してから送信**: [`deliver`] は設定検証に失敗した時点で返り、送信手段を呼ばない
//! - **接続は呼び出し単位**: 接続を使い回さず、送信ごとに接続して切断する

mod message;
mod noop;
mod smtp;

use async_trait::async_trait;
use lettre::Message;
pub use message::build_message;
pub use noop::NoopMailTransport;
use notifymail_domain::{
    NotificationError,
    mail::{RenderedMail, SendOptions, SmtpConfig},
};
pub use smtp::SmtpMailTransport;

/// メール送信トレイト
///
/// 組み立て済みのメッセージを、接続設定に従って 1 通送信する。
#[async_trait]
pub trait MailTransport: Send + Sync {
    /// メッセージを送信する
    async fn send(&self, config: &SmtpConfig, message: Message) -> Result<(), NotificationError>;
}

/// 設定を検証し、メッセージを組み立てて送信する
///
/// 検証またはメッセージ構築に失敗した場合、`transport` は呼び出されない。
pub async fn deliver(
    transport: &dyn MailTransport,
    config: &SmtpConfig,
    options: &SendOptions,
    rendered: &RenderedMail,
) -> Result<(), NotificationError> {
    config.validate(options)?;

    let message = build_message(config, options, rendered)?;

    transport.send(config, message).await
}
