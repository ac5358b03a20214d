//! # メーラー設定
//!
//! 環境変数または JSON ファイルからメール設定を読み込む。
//!
//! ## 環境変数
//!
//! | 変数名 | 説明 |
//! |--------|------|
//! | `MAIL_BACKEND` | 送信バックエンド（`smtp` \| `noop`、デフォルト: `smtp`） |
//! | `MAIL_SERVER` | SMTP サーバーのホスト名 |
//! | `MAIL_PORT` | SMTP サーバーのポート番号 |
//! | `MAIL_SENDER_EMAIL` | 送信元メールアドレス |
//! | `MAIL_SENDER_IDENTITY` | 送信者の表示名 |
//! | `MAIL_USER` | SMTP 認証ユーザー |
//! | `MAIL_PASSWORD` | SMTP 認証パスワード |
//!
//! 未設定の項目は空文字列として読み込み、送信時の検証でエラーにする。

use std::{env, path::Path};

use notifymail_domain::mail::{MailSettings, SmtpPassword};
use thiserror::Error;

/// 送信バックエンド
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MailBackend {
    /// SMTP サーバー経由で送信
    #[default]
    Smtp,
    /// 送信しない（ログ出力のみ）
    Noop,
}

impl MailBackend {
    /// 文字列から送信バックエンドをパースする
    ///
    /// 不正な値の場合は [`Smtp`](MailBackend::Smtp) にフォールバックし、警告を出力する。
    pub fn parse(s: &str) -> Self {
        match s {
            "smtp" => Self::Smtp,
            "noop" => Self::Noop,
            other => {
                tracing::warn!(value = other, "不明な MAIL_BACKEND のため smtp を使用します");
                Self::Smtp
            }
        }
    }
}

/// 設定ファイルの読み込みエラー
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("設定ファイルを読み込めません: {path}")]
    Io {
        path:   String,
        #[source]
        source: std::io::Error,
    },

    #[error("設定ファイルの形式が不正です: {path}")]
    Parse {
        path:   String,
        #[source]
        source: serde_json::Error,
    },
}

/// メーラーの設定
#[derive(Debug, Clone, Default)]
pub struct MailerConfig {
    /// 送信バックエンド
    pub backend:  MailBackend,
    /// メール設定
    pub settings: MailSettings,
}

impl MailerConfig {
    /// 環境変数から設定を読み込む
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// 任意の参照関数から設定を読み込む
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let var = |key: &str| lookup(key).unwrap_or_default();

        Self {
            backend:  lookup("MAIL_BACKEND")
                .map(|v| MailBackend::parse(&v))
                .unwrap_or_default(),
            settings: MailSettings {
                server:          var("MAIL_SERVER"),
                port:            var("MAIL_PORT"),
                sender_email:    var("MAIL_SENDER_EMAIL"),
                sender_identity: var("MAIL_SENDER_IDENTITY"),
                user:            var("MAIL_USER"),
                password:        SmtpPassword::new(var("MAIL_PASSWORD")),
            },
        }
    }
}

/// JSON ファイルからメール設定を読み込む
///
/// キーは camelCase（`server`, `port`, `senderEmail`, `senderIdentity`, `user`, `password`）。
pub fn load_settings_file(path: &Path) -> Result<MailSettings, ConfigError> {
    let display = path.display().to_string();

    let raw = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
        path: display.clone(),
        source,
    })?;

    serde_json::from_str(&raw).map_err(|source| ConfigError::Parse {
        path: display,
        source,
    })
}
