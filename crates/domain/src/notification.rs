//! # 通知送信エラー
//!
//! メール通知の各段階（設定検証、レンダリング、メッセージ構築、送信）で
//! 発生するエラーを定義する。
//!
//! ## 設計方針
//!
//! - **最初のエラーで打ち切り**: 複数の設定不備を集約せず、最初に検出したものを返す
//! - **再試行しない**: いずれのエラーも呼び出し元にそのまま返す
//! - **設定エラーは通信前に検出**: [`MailConfigError`] はネットワーク I/O の前に確定する

use thiserror::Error;

/// SMTP 設定の検証エラー
///
/// [`SmtpConfig::validate`](crate::mail::SmtpConfig::validate) が検証順に返す。
/// 呼び出し元が設定を修正しない限り再試行しても成功しない。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum MailConfigError {
    #[error("SMTP サーバーが設定されていません")]
    ServerEmpty,

    /// ポート文字列が数値として解釈できなかった場合もこれになる
    #[error("SMTP ポートが設定されていません")]
    PortEmpty,

    #[error("SMTP ユーザーが設定されていません")]
    UserEmpty,

    #[error("送信者名が設定されていません")]
    SenderIdentityEmpty,

    #[error("送信元メールアドレスが設定されていません")]
    SenderEmailEmpty,

    #[error("宛先メールアドレスが設定されていません")]
    RecipientEmpty,
}

/// 通知送信エラー
#[derive(Debug, Error)]
pub enum NotificationError {
    /// SMTP 設定または宛先の不備
    #[error(transparent)]
    InvalidConfig(#[from] MailConfigError),

    /// テンプレートレンダリングに失敗（tera のメッセージをそのまま保持する）
    #[error("{0}")]
    TemplateFailed(String),

    /// メールアドレスの解析に失敗
    #[error("メールアドレスが不正です: {0}")]
    InvalidAddress(String),

    /// MIME メッセージの構築に失敗
    #[error("メッセージ構築に失敗: {0}")]
    MessageBuildFailed(String),

    /// SMTP 接続・認証・送信に失敗（lettre のメッセージをそのまま保持する）
    #[error("{0}")]
    SendFailed(String),
}

impl NotificationError {
    /// 設定エラーの場合、その種別を返す
    pub fn as_config_error(&self) -> Option<MailConfigError> {
        match self {
            Self::InvalidConfig(e) => Some(*e),
            _ => None,
        }
    }
}
