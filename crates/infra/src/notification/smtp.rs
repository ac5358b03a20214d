//! SMTP 通知送信実装
//!
//! lettre の `AsyncSmtpTransport` を使用してメールを送信する。
//! 送信ごとに接続・認証し、1 通送信したら切断する（コネクションプールは使わない）。

use async_trait::async_trait;
use lettre::{
    AsyncSmtpTransport,
    AsyncTransport,
    Message,
    Tokio1Executor,
    transport::smtp::{
        authentication::Credentials,
        client::{Tls, TlsParameters},
    },
};
use notifymail_domain::{NotificationError, mail::SmtpConfig};

use super::MailTransport;

/// 暗黙的 TLS（SMTPS）で接続するポート
const IMPLICIT_TLS_PORT: u16 = 465;

/// SMTP 通知送信
///
/// 接続設定は送信ごとに受け取るため、インスタンス自体は状態を持たない。
///
/// TLS の扱い:
/// - ポート 465: 接続直後から TLS（SMTPS）
/// - それ以外: サーバーが対応していれば STARTTLS に昇格する
#[derive(Debug, Clone, Default)]
pub struct SmtpMailTransport;

impl SmtpMailTransport {
    pub fn new() -> Self {
        Self
    }

    fn build_transport(
        config: &SmtpConfig,
    ) -> Result<AsyncSmtpTransport<Tokio1Executor>, NotificationError> {
        let tls_parameters = TlsParameters::new(config.server.clone())
            .map_err(|e| NotificationError::SendFailed(e.to_string()))?;
        let tls = if config.port == IMPLICIT_TLS_PORT {
            Tls::Wrapper(tls_parameters)
        } else {
            Tls::Opportunistic(tls_parameters)
        };

        let credentials = Credentials::new(
            config.user.clone(),
            config.password.as_str().to_string(),
        );

        Ok(
            AsyncSmtpTransport::<Tokio1Executor>::builder_dangerous(&config.server)
                .port(config.port)
                .tls(tls)
                .credentials(credentials)
                .build(),
        )
    }
}

#[async_trait]
impl MailTransport for SmtpMailTransport {
    #[tracing::instrument(
        skip_all,
        level = "debug",
        fields(server = %config.server, port = config.port)
    )]
    async fn send(&self, config: &SmtpConfig, message: Message) -> Result<(), NotificationError> {
        let transport = Self::build_transport(config)?;

        let response = transport
            .send(message)
            .await
            .map_err(|e| NotificationError::SendFailed(e.to_string()))?;

        tracing::debug!(code = %response.code(), "SMTP サーバーがメッセージを受理");

        Ok(())
    }
}
