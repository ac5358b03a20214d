//! # テスト用モック
//!
//! ユースケーステストで使用するインメモリの送信手段。
//! `test-utils` feature を有効にすることで、他クレートからも利用可能。
//!
//! ```toml
//! [dev-dependencies]
//! notifymail-infra = { workspace = true, features = ["test-utils"] }
//! ```

use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use lettre::Message;
use notifymail_domain::{NotificationError, mail::SmtpConfig};

use crate::notification::MailTransport;

// ===== MockMailTransport =====

/// 送信されたメッセージを記録するモック
///
/// `failing()` で生成した場合は常に [`NotificationError::SendFailed`] を返す。
/// 失敗時もメッセージは記録しない。
#[derive(Clone, Default)]
pub struct MockMailTransport {
    sent:    Arc<Mutex<Vec<Message>>>,
    failure: Option<String>,
}

impl MockMailTransport {
    pub fn new() -> Self {
        Self::default()
    }

    /// 常に送信失敗するモックを作成する
    pub fn failing(message: impl Into<String>) -> Self {
        Self {
            sent:    Arc::default(),
            failure: Some(message.into()),
        }
    }

    /// 送信されたメッセージを返す
    pub fn sent_messages(&self) -> Vec<Message> {
        self.sent.lock().unwrap().clone()
    }
}

#[async_trait]
impl MailTransport for MockMailTransport {
    async fn send(&self, _config: &SmtpConfig, message: Message) -> Result<(), NotificationError> {
        if let Some(failure) = &self.failure {
            return Err(NotificationError::SendFailed(failure.clone()));
        }
        self.sent.lock().unwrap().push(message);
        Ok(())
    }
}
