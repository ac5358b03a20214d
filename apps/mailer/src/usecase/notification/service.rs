//! # 通知メール送信サービス
//!
//! テンプレートレンダリング → 設定検証 → メール送信を統合するサービス。
//!
//! ## 設計方針
//!
//! - **最初のエラーを返す**: レンダリングに失敗した場合は送信手段を呼ばない
//! - **エラーは境界で 1 回だけ記録**: `SpanTrace` を添えて `tracing::error!` で出力し、
//!   エラー自体は変換せずに返す
//! - **依存性注入**: `ContentRenderer` と `MailTransport` は trait で抽象化

use std::sync::Arc;

use notifymail_domain::{
    NotificationError,
    mail::{MailSettings, SendOptions, SmtpConfig},
};
use notifymail_infra::notification::{MailTransport, SmtpMailTransport, deliver};
use notifymail_shared::{
    event_log::{error as error_fields, event},
    log_business_event,
};
use tracing_error::SpanTrace;

use super::{ContentRenderer, TemplateRenderer};

/// 通知メール送信サービス
///
/// 保持するのは不変の依存コンポーネントのみで、呼び出し間で状態を共有しない。
/// 複数タスクから同時に呼び出してよい。
#[derive(Clone)]
pub struct MailService {
    renderer:  Arc<dyn ContentRenderer>,
    transport: Arc<dyn MailTransport>,
}

impl MailService {
    pub fn new(renderer: Arc<dyn ContentRenderer>, transport: Arc<dyn MailTransport>) -> Self {
        Self {
            renderer,
            transport,
        }
    }

    /// 通知メールを送信する
    ///
    /// # 引数
    ///
    /// - `settings`: 呼び出し元のメール設定（ポートは文字列）
    /// - `to`: 宛先（カンマ区切りで複数指定可）
    /// - `cc`: CC（空文字列なら CC ヘッダーを付与しない）
    /// - `title`: 件名
    /// - `content`: Markdown 本文
    #[tracing::instrument(skip_all, fields(to = %to, cc = %cc, subject = %title))]
    pub async fn send_mail(
        &self,
        settings: &MailSettings,
        to: &str,
        cc: &str,
        title: &str,
        content: &str,
    ) -> Result<(), NotificationError> {
        let config = SmtpConfig::from_settings(settings);
        let options = SendOptions::new(to, cc, title);

        let result = self.render_and_deliver(&config, &options, content).await;

        match &result {
            Ok(()) => {
                log_business_event!(
                    event.category = event::category::NOTIFICATION,
                    event.action = event::action::NOTIFICATION_SENT,
                    event.result = event::result::SUCCESS,
                    notification.recipient = %options.to,
                    "通知メール送信成功"
                );
            }
            Err(e) => {
                let span_trace = SpanTrace::capture();
                tracing::error!(
                    error = %e,
                    error.category = error_category(e),
                    span_trace = %span_trace,
                    "通知メールの送信に失敗"
                );
                log_business_event!(
                    event.category = event::category::NOTIFICATION,
                    event.action = event::action::NOTIFICATION_FAILED,
                    event.result = event::result::FAILURE,
                    notification.recipient = %options.to,
                    "通知メール送信失敗"
                );
            }
        }

        result
    }

    async fn render_and_deliver(
        &self,
        config: &SmtpConfig,
        options: &SendOptions,
        content: &str,
    ) -> Result<(), NotificationError> {
        let rendered = self.renderer.render(content)?;

        deliver(self.transport.as_ref(), config, options, &rendered).await
    }
}

fn error_category(error: &NotificationError) -> &'static str {
    match error {
        NotificationError::InvalidConfig(_) | NotificationError::InvalidAddress(_) => {
            error_fields::category::CONFIGURATION
        }
        NotificationError::TemplateFailed(_) => error_fields::category::RENDERING,
        NotificationError::MessageBuildFailed(_) | NotificationError::SendFailed(_) => {
            error_fields::category::TRANSPORT
        }
    }
}

/// 埋め込みテンプレートと SMTP 送信で通知メールを送信する
///
/// [`MailService::send_mail`] の簡易版。呼び出しごとにレンダラーと送信手段を生成する。
pub async fn send_mail(
    settings: &MailSettings,
    to: &str,
    cc: &str,
    title: &str,
    content: &str,
) -> Result<(), NotificationError> {
    let renderer = TemplateRenderer::new().inspect_err(|e| {
        tracing::error!(error = %e, "通知テンプレートの登録に失敗");
    })?;

    MailService::new(Arc::new(renderer), Arc::new(SmtpMailTransport::new()))
        .send_mail(settings, to, cc, title, content)
        .await
}
