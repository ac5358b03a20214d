//! # メール送信の値オブジェクト
//!
//! ## ドメイン用語
//!
//! | 型 | ドメイン用語 | 用途 |
//! |---|------------|------|
//! | [`MailSettings`] | メール設定 | 呼び出し元が保持する外部設定（ポートは文字列） |
//! | [`SmtpConfig`] | SMTP 接続設定 | 送信 1 回分の接続情報 |
//! | [`SendOptions`] | 送信オプション | 宛先・CC・件名 |
//! | [`RenderedMail`] | レンダリング結果 | HTML 本文とプレーンテキスト本文 |
//!
//! いずれも送信ごとに生成され、送信完了後は保持しない。

use serde::Deserialize;

use crate::{REDACTED, notification::MailConfigError};

/// SMTP パスワード
///
/// # セキュリティ
///
/// Debug 出力ではパスワードの値をマスクする。
#[derive(Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(transparent)]
pub struct SmtpPassword(String);

impl std::fmt::Debug for SmtpPassword {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_tuple("SmtpPassword").field(&REDACTED).finish()
    }
}

impl SmtpPassword {
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// メール設定
///
/// 呼び出し元が所有する外部設定。JSON 文書や環境変数から読み込まれる。
/// ポート番号は文字列のまま保持し、[`SmtpConfig::from_settings`] で数値に変換する。
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct MailSettings {
    pub server:          String,
    pub port:            String,
    pub sender_email:    String,
    pub sender_identity: String,
    pub user:            String,
    pub password:        SmtpPassword,
}

/// SMTP 接続設定
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SmtpConfig {
    /// SMTP サーバーのホスト名
    pub server:          String,
    /// SMTP サーバーのポート番号（0 は未設定）
    pub port:            u16,
    /// 送信元メールアドレス
    pub sender_email:    String,
    /// 送信者の表示名
    pub sender_identity: String,
    /// SMTP 認証ユーザー
    pub user:            String,
    /// SMTP 認証パスワード
    pub password:        SmtpPassword,
}

impl SmtpConfig {
    /// メール設定から SMTP 接続設定を組み立てる
    ///
    /// ポート文字列が `u16` として解釈できない場合は 0 になり、
    /// [`validate`](Self::validate) で [`MailConfigError::PortEmpty`] として検出される。
    pub fn from_settings(settings: &MailSettings) -> Self {
        Self {
            server:          settings.server.clone(),
            port:            parse_port(&settings.port),
            sender_email:    settings.sender_email.clone(),
            sender_identity: settings.sender_identity.clone(),
            user:            settings.user.clone(),
            password:        settings.password.clone(),
        }
    }

    /// 送信前の設定検証
    ///
    /// 以下の順に検証し、最初の不備を返す:
    ///
    /// 1. サーバー
    /// 2. ポート
    /// 3. ユーザー
    /// 4. 送信者名
    /// 5. 送信元メールアドレス
    /// 6. 宛先
    ///
    /// パスワードは検証しない（認証不要なリレーを許容する）。
    pub fn validate(&self, options: &SendOptions) -> Result<(), MailConfigError> {
        if self.server.is_empty() {
            return Err(MailConfigError::ServerEmpty);
        }
        if self.port == 0 {
            return Err(MailConfigError::PortEmpty);
        }
        if self.user.is_empty() {
            return Err(MailConfigError::UserEmpty);
        }
        if self.sender_identity.is_empty() {
            return Err(MailConfigError::SenderIdentityEmpty);
        }
        if self.sender_email.is_empty() {
            return Err(MailConfigError::SenderEmailEmpty);
        }
        if options.to.is_empty() {
            return Err(MailConfigError::RecipientEmpty);
        }
        Ok(())
    }
}

fn parse_port(value: &str) -> u16 {
    value.parse().unwrap_or(0)
}

/// 送信オプション
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SendOptions {
    /// 宛先（カンマ区切りで複数指定可）
    pub to:      String,
    /// CC（空文字列は CC なし）
    pub cc:      String,
    /// 件名
    pub subject: String,
}

impl SendOptions {
    pub fn new(to: impl Into<String>, cc: impl Into<String>, subject: impl Into<String>) -> Self {
        Self {
            to:      to.into(),
            cc:      cc.into(),
            subject: subject.into(),
        }
    }

    /// CC が指定されているか
    pub fn has_cc(&self) -> bool {
        !self.cc.is_empty()
    }
}

/// レンダリング済みメール本文
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedMail {
    /// HTML 本文
    pub html: String,
    /// プレーンテキスト本文
    pub text: String,
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    use super::*;

    fn valid_settings() -> MailSettings {
        MailSettings {
            server:          "smtp.example.com".to_string(),
            port:            "587".to_string(),
            sender_email:    "noreply@example.com".to_string(),
            sender_identity: "Crawlab".to_string(),
            user:            "mailer".to_string(),
            password:        SmtpPassword::new("secret"),
        }
    }

    fn valid_options() -> SendOptions {
        SendOptions::new("a@example.com", "", "Hi")
    }

    #[test]
    fn test_有効な設定は検証を通過する() {
        let config = SmtpConfig::from_settings(&valid_settings());
        assert_eq!(config.validate(&valid_options()), Ok(()));
    }

    #[rstest]
    #[case("587", 587)]
    #[case("465", 465)]
    #[case("+25", 25)]
    #[case("abc", 0)]
    #[case("", 0)]
    #[case(" 25", 0)]
    #[case("-1", 0)]
    #[case("70000", 0)]
    fn test_ポート文字列の解釈(#[case] input: &str, #[case] expected: u16) {
        let settings = MailSettings {
            port: input.to_string(),
            ..valid_settings()
        };
        assert_eq!(SmtpConfig::from_settings(&settings).port, expected);
    }

    #[test]
    fn test_数値でないポートは0と同じ検証エラーになる() {
        let non_numeric = SmtpConfig::from_settings(&MailSettings {
            port: "smtp".to_string(),
            ..valid_settings()
        });
        let zero = SmtpConfig::from_settings(&MailSettings {
            port: "0".to_string(),
            ..valid_settings()
        });

        assert_eq!(
            non_numeric.validate(&valid_options()),
            Err(MailConfigError::PortEmpty)
        );
        assert_eq!(
            non_numeric.validate(&valid_options()),
            zero.validate(&valid_options())
        );
    }

    #[rstest]
    #[case::server(|s: &mut MailSettings| s.server.clear(), MailConfigError::ServerEmpty)]
    #[case::port(|s: &mut MailSettings| s.port.clear(), MailConfigError::PortEmpty)]
    #[case::user(|s: &mut MailSettings| s.user.clear(), MailConfigError::UserEmpty)]
    #[case::sender_identity(
        |s: &mut MailSettings| s.sender_identity.clear(),
        MailConfigError::SenderIdentityEmpty
    )]
    #[case::sender_email(
        |s: &mut MailSettings| s.sender_email.clear(),
        MailConfigError::SenderEmailEmpty
    )]
    fn test_必須項目が欠けると対応する検証エラーを返す(
        #[case] clear: fn(&mut MailSettings),
        #[case] expected: MailConfigError,
    ) {
        let mut settings = valid_settings();
        clear(&mut settings);
        let config = SmtpConfig::from_settings(&settings);

        assert_eq!(config.validate(&valid_options()), Err(expected));
    }

    #[test]
    fn test_宛先が空だと検証エラーを返す() {
        let config = SmtpConfig::from_settings(&valid_settings());
        let options = SendOptions::new("", "b@example.com", "Hi");

        assert_eq!(
            config.validate(&options),
            Err(MailConfigError::RecipientEmpty)
        );
    }

    #[test]
    fn test_複数の不備がある場合はサーバーのエラーを優先する() {
        let config = SmtpConfig::from_settings(&MailSettings::default());
        let options = SendOptions::new("", "", "");

        assert_eq!(config.validate(&options), Err(MailConfigError::ServerEmpty));
    }

    #[test]
    fn test_パスワードが空でも検証を通過する() {
        let settings = MailSettings {
            password: SmtpPassword::default(),
            ..valid_settings()
        };
        let config = SmtpConfig::from_settings(&settings);

        assert_eq!(config.validate(&valid_options()), Ok(()));
    }

    #[test]
    fn test_パスワードのdebug出力はマスクされる() {
        let settings = valid_settings();
        let config = SmtpConfig::from_settings(&settings);

        for debug in [format!("{settings:?}"), format!("{config:?}")] {
            assert!(debug.contains(REDACTED));
            assert!(!debug.contains("secret"));
        }
    }

    #[test]
    fn test_json文書からメール設定を読み込める() {
        let json = r#"{
            "server": "smtp.example.com",
            "port": "465",
            "senderEmail": "noreply@example.com",
            "senderIdentity": "Crawlab",
            "user": "mailer",
            "password": "secret"
        }"#;

        let settings: MailSettings = serde_json::from_str(json).unwrap();

        assert_eq!(settings.server, "smtp.example.com");
        assert_eq!(settings.port, "465");
        assert_eq!(settings.sender_identity, "Crawlab");
        assert_eq!(settings.password.as_str(), "secret");
    }

    #[test]
    fn test_json文書で欠けた項目は空文字列になる() {
        let settings: MailSettings = serde_json::from_str(r#"{"server": "smtp"}"#).unwrap();

        assert_eq!(settings.port, "");
        assert_eq!(settings.user, "");
        assert_eq!(settings.password.as_str(), "");
    }

    #[test]
    fn test_ccの有無を判定できる() {
        assert!(!SendOptions::new("a@example.com", "", "Hi").has_cc());
        assert!(SendOptions::new("a@example.com", "b@example.com", "Hi").has_cc());
    }
}
