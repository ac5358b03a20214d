//! MailService の結合テスト
//!
//! 実際のテンプレートレンダラーとモック送信手段を組み合わせ、
//! 送信されるメッセージの内容とログ出力を検証する。

use std::{
    io,
    sync::{Arc, Mutex},
};

use lettre::{
    Message,
    message::{SinglePart, header, header::ContentType},
};
use notifymail_domain::{
    MailConfigError,
    mail::{MailSettings, SmtpPassword},
};
use notifymail_infra::mock::MockMailTransport;
use notifymail_mailer::{ContentRenderer, MailService, TemplateRenderer};
use pretty_assertions::assert_eq;
use rstest::rstest;
use tracing_subscriber::{fmt::MakeWriter, layer::SubscriberExt as _};

fn settings() -> MailSettings {
    MailSettings {
        server:          "smtp.example.com".to_string(),
        port:            "587".to_string(),
        sender_email:    "noreply@example.com".to_string(),
        sender_identity: "Crawlab".to_string(),
        user:            "mailer".to_string(),
        password:        SmtpPassword::new("s3cr3t-passw0rd"),
    }
}

fn make_service(transport: &MockMailTransport) -> MailService {
    MailService::new(
        Arc::new(TemplateRenderer::new().unwrap()),
        Arc::new(transport.clone()),
    )
}

fn formatted(message: &Message) -> String {
    String::from_utf8(message.formatted()).unwrap()
}

/// ログ出力をメモリに蓄積する writer
#[derive(Clone, Default)]
struct CapturedLogs(Arc<Mutex<Vec<u8>>>);

impl CapturedLogs {
    fn contents(&self) -> String {
        String::from_utf8_lossy(&self.0.lock().unwrap()).into_owned()
    }
}

impl io::Write for CapturedLogs {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.0.lock().unwrap().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

impl<'a> MakeWriter<'a> for CapturedLogs {
    type Writer = Self;

    fn make_writer(&'a self) -> Self::Writer {
        self.clone()
    }
}

#[tokio::test]
async fn 正常系ではプレーンテキストとhtmlの代替パートを持つメッセージを送信する() {
    let transport = MockMailTransport::new();
    let service = make_service(&transport);

    service
        .send_mail(&settings(), "a@example.com", "", "Hi", "Hello")
        .await
        .unwrap();

    let sent = transport.sent_messages();
    assert_eq!(sent.len(), 1);

    let raw = formatted(&sent[0]);
    assert!(raw.contains("From: Crawlab <noreply@example.com>\r\n"));
    assert!(raw.contains("To: a@example.com\r\n"));
    assert!(raw.contains("Subject: Hi\r\n"));
    assert!(raw.contains("multipart/alternative"));
    assert!(raw.contains("Content-Type: text/plain; charset=utf-8"));
    assert!(raw.contains("Content-Type: text/html; charset=utf-8"));
    assert!(sent[0].headers().get::<header::Cc>().is_none());
}

#[tokio::test]
async fn 送信されるテキスト本文とhtml本文はレンダラーの出力と一致する() {
    let transport = MockMailTransport::new();
    let service = make_service(&transport);
    let content = "# Task finished\n\n- spider: demo\n- status: success";

    service
        .send_mail(&settings(), "a@example.com", "", "Hi", content)
        .await
        .unwrap();

    let rendered = TemplateRenderer::new().unwrap().render(content).unwrap();
    let raw = formatted(&transport.sent_messages()[0]);
    let text_part = SinglePart::builder()
        .header(ContentType::TEXT_PLAIN)
        .body(rendered.text.clone())
        .formatted();
    let html_part = SinglePart::builder()
        .header(ContentType::TEXT_HTML)
        .body(rendered.html.clone())
        .formatted();

    assert!(raw.contains(&String::from_utf8(text_part).unwrap()), "{raw}");
    assert!(raw.contains(&String::from_utf8(html_part).unwrap()), "{raw}");
    assert!(rendered.text.contains("- spider: demo\n- status: success"));
    assert!(!rendered.text.contains('<'));
    assert!(rendered.html.contains("<h1>Task finished</h1>"));
}

#[rstest]
#[case::ccあり("b@example.com", Some("Cc: b@example.com\r\n"))]
#[case::ccなし("", None)]
#[tokio::test]
async fn ccヘッダーは指定時のみ付与される(#[case] cc: &str, #[case] expected: Option<&str>) {
    let transport = MockMailTransport::new();
    let service = make_service(&transport);

    service
        .send_mail(&settings(), "a@example.com", cc, "Hi", "Hello")
        .await
        .unwrap();

    let sent = transport.sent_messages();
    let raw = formatted(&sent[0]);
    match expected {
        Some(line) => assert!(raw.contains(line), "Cc ヘッダーを含むこと: {raw}"),
        None => assert!(!raw.contains("Cc:"), "Cc ヘッダーを含まないこと: {raw}"),
    }
}

#[rstest]
#[case::server(MailSettings { server: String::new(), ..settings() }, "a@example.com", MailConfigError::ServerEmpty)]
#[case::port(MailSettings { port: "0".to_string(), ..settings() }, "a@example.com", MailConfigError::PortEmpty)]
#[case::port_not_numeric(MailSettings { port: "abc".to_string(), ..settings() }, "a@example.com", MailConfigError::PortEmpty)]
#[case::user(MailSettings { user: String::new(), ..settings() }, "a@example.com", MailConfigError::UserEmpty)]
#[case::sender_identity(MailSettings { sender_identity: String::new(), ..settings() }, "a@example.com", MailConfigError::SenderIdentityEmpty)]
#[case::sender_email(MailSettings { sender_email: String::new(), ..settings() }, "a@example.com", MailConfigError::SenderEmailEmpty)]
#[case::recipient(settings(), "", MailConfigError::RecipientEmpty)]
#[tokio::test]
async fn 設定不備は送信前に検出され送信手段は呼ばれない(
    #[case] settings: MailSettings,
    #[case] to: &str,
    #[case] expected: MailConfigError,
) {
    let transport = MockMailTransport::new();
    let service = make_service(&transport);

    let err = service
        .send_mail(&settings, to, "", "Hi", "Hello")
        .await
        .unwrap_err();

    assert_eq!(err.as_config_error(), Some(expected));
    assert_eq!(err.to_string(), expected.to_string());
    assert!(transport.sent_messages().is_empty());
}

#[tokio::test]
async fn 失敗時はスパントレース付きでエラーを記録しパスワードは出力しない() {
    let logs = CapturedLogs::default();
    let subscriber = tracing_subscriber::registry()
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(logs.clone())
                .with_ansi(false),
        )
        .with(tracing_error::ErrorLayer::default());
    let _guard = tracing::subscriber::set_default(subscriber);

    let transport = MockMailTransport::failing("535 authentication failed");
    let service = make_service(&transport);

    let err = service
        .send_mail(&settings(), "a@example.com", "", "Hi", "Hello")
        .await
        .unwrap_err();

    let output = logs.contents();
    assert!(err.to_string().contains("535 authentication failed"));
    assert!(output.contains("535 authentication failed"), "{output}");
    assert!(output.contains("span_trace"), "{output}");
    assert!(output.contains("send_mail"), "{output}");
    assert!(!output.contains("s3cr3t-passw0rd"), "{output}");
}
