//! Noop 通知送信実装
//!
//! メールを実際に送信せず、ログ出力のみ行う。
//! ドライランや送信先サーバーがない環境で使用する。

use async_trait::async_trait;
use lettre::Message;
use notifymail_domain::{NotificationError, mail::SmtpConfig};

use super::MailTransport;

/// Noop 通知送信（ログ出力のみ）
#[derive(Debug, Clone, Default)]
pub struct NoopMailTransport;

#[async_trait]
impl MailTransport for NoopMailTransport {
    async fn send(&self, config: &SmtpConfig, message: Message) -> Result<(), NotificationError> {
        let recipients = message
            .envelope()
            .to()
            .iter()
            .map(ToString::to_string)
            .collect::<Vec<_>>()
            .join(", ");

        tracing::info!(
            server = %config.server,
            port = config.port,
            recipients = %recipients,
            "Noop: メール送信をスキップ"
        );
        Ok(())
    }
}
