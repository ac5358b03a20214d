//! MIME メッセージの構築
//!
//! プレーンテキストを主パート、HTML を代替パートとする `multipart/alternative`
//! メッセージを組み立てる。

use lettre::{
    Address,
    Message,
    message::{Mailbox, Mailboxes, MultiPart, SinglePart, header::ContentType},
};
use notifymail_domain::{
    NotificationError,
    mail::{RenderedMail, SendOptions, SmtpConfig},
};

/// 送信用メッセージを組み立てる
///
/// - `From`: `送信者名 <送信元アドレス>`
/// - `To`: `options.to` のカンマ区切りアドレスすべて
/// - `Cc`: `options.cc` が空でない場合のみ付与する
pub fn build_message(
    config: &SmtpConfig,
    options: &SendOptions,
    rendered: &RenderedMail,
) -> Result<Message, NotificationError> {
    let sender: Address = config.sender_email.parse().map_err(|e| {
        NotificationError::InvalidAddress(format!("送信元 {}: {e}", config.sender_email))
    })?;
    let from = Mailbox::new(Some(config.sender_identity.clone()), sender);

    let mut builder = Message::builder().from(from).subject(&options.subject);

    for mailbox in parse_mailboxes("宛先", &options.to)? {
        builder = builder.to(mailbox);
    }

    if options.has_cc() {
        for mailbox in parse_mailboxes("CC", &options.cc)? {
            builder = builder.cc(mailbox);
        }
    }

    builder
        .multipart(
            MultiPart::alternative()
                .singlepart(
                    SinglePart::builder()
                        .header(ContentType::TEXT_PLAIN)
                        .body(rendered.text.clone()),
                )
                .singlepart(
                    SinglePart::builder()
                        .header(ContentType::TEXT_HTML)
                        .body(rendered.html.clone()),
                ),
        )
        .map_err(|e| NotificationError::MessageBuildFailed(e.to_string()))
}

fn parse_mailboxes(label: &str, value: &str) -> Result<Mailboxes, NotificationError> {
    value
        .parse()
        .map_err(|e| NotificationError::InvalidAddress(format!("{label} {value}: {e}")))
}
