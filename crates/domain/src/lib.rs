//! # notifymail ドメイン層
//!
//! メール通知に必要な値オブジェクトとエラー型を定義する。
//!
//! ## 設計方針
//!
//! - **外部ライブラリ非依存**: SMTP クライアントやテンプレートエンジンには依存しない
//! - **呼び出し単位の値**: 設定・送信オプションは送信ごとに生成して破棄する
//! - **秘匿情報の保護**: パスワードは `Debug` 出力でマスクする
//!
//! ## 依存関係の方向
//!
//! ```text
//! mailer → infra → domain
//!    ↘                ↑
//!      ──────────────
//! ```
//!
//! ## モジュール構成
//!
//! - [`mail`] - SMTP 設定・送信オプション・レンダリング結果
//! - [`notification`] - 通知送信エラー
//!
//! ## 使用例
//!
//! ```rust
//! use notifymail_domain::mail::{MailSettings, SendOptions, SmtpConfig};
//!
//! let settings = MailSettings {
//!     server: "smtp.example.com".to_string(),
//!     port: "587".to_string(),
//!     ..MailSettings::default()
//! };
//! let config = SmtpConfig::from_settings(&settings);
//! assert_eq!(config.port, 587);
//!
//! // user 以降が未設定なので検証エラーになる
//! let options = SendOptions::new("a@example.com", "", "件名");
//! assert!(config.validate(&options).is_err());
//! ```

pub mod mail;
pub mod notification;

pub use notification::{MailConfigError, NotificationError};

/// `Debug` 出力で秘匿値の代わりに表示する文字列
pub const REDACTED: &str = "[REDACTED]";
