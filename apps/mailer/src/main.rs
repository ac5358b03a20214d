//! # notifymail
//!
//! Markdown 本文を HTML/プレーンテキストの通知メールにして SMTP で送信する CLI。
//!
//! ## 使い方
//!
//! ```bash
//! # 環境変数（または .env）の設定で送信
//! notifymail --to a@example.com --title "Task finished" --content "Spider **demo** finished."
//!
//! # JSON 設定ファイルを使い、送信せずにログだけ出す
//! notifymail --settings mail.json --to a@example.com --title Hi --content-file body.md --dry-run
//!
//! # レンダリング結果（プレーンテキスト）を確認する
//! notifymail --content-file body.md --render-only
//! ```
//!
//! 設定項目は [`notifymail_mailer::config`] を参照。

use std::{path::PathBuf, sync::Arc};

use anyhow::Context as _;
use clap::Parser;
use notifymail_infra::notification::{MailTransport, NoopMailTransport, SmtpMailTransport};
use notifymail_mailer::{
    ContentRenderer,
    MailService,
    TemplateRenderer,
    config::{MailBackend, MailerConfig, load_settings_file},
};
use notifymail_shared::observability::{TracingConfig, init_tracing};
use tracing::Instrument as _;

#[derive(Parser)]
#[command(name = "notifymail")]
#[command(about = "Markdown 本文から通知メールを生成して SMTP で送信する", long_about = None)]
struct Cli {
    /// 宛先（カンマ区切りで複数指定可）
    #[arg(long, default_value = "")]
    to: String,

    /// CC（カンマ区切りで複数指定可）
    #[arg(long, default_value = "")]
    cc: String,

    /// 件名
    #[arg(long, default_value = "")]
    title: String,

    /// Markdown 本文
    #[arg(long, conflicts_with = "content_file", required_unless_present = "content_file")]
    content: Option<String>,

    /// Markdown 本文を読み込むファイル
    #[arg(long)]
    content_file: Option<PathBuf>,

    /// メール設定の JSON ファイル（省略時は環境変数から読み込む）
    #[arg(long, short = 's')]
    settings: Option<PathBuf>,

    /// 送信せずにログ出力のみ行う
    #[arg(long)]
    dry_run: bool,

    /// レンダリングしたプレーンテキスト本文を表示して終了する
    #[arg(long)]
    render_only: bool,
}

impl Cli {
    fn read_content(&self) -> anyhow::Result<String> {
        match (&self.content, &self.content_file) {
            (Some(content), _) => Ok(content.clone()),
            (None, Some(path)) => std::fs::read_to_string(path)
                .with_context(|| format!("本文ファイルを読み込めません: {}", path.display())),
            (None, None) => anyhow::bail!("--content または --content-file を指定してください"),
        }
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // .env ファイルを読み込む（存在する場合）
    dotenvy::dotenv().ok();

    let tracing_config = TracingConfig::from_env("notifymail");
    init_tracing(&tracing_config);

    run(Cli::parse())
        .instrument(tracing_config.root_span())
        .await
}

async fn run(cli: Cli) -> anyhow::Result<()> {
    let config = MailerConfig::from_env();

    let settings = match &cli.settings {
        Some(path) => load_settings_file(path)?,
        None => config.settings,
    };
    let content = cli.read_content()?;

    let renderer = TemplateRenderer::new().context("通知テンプレートの登録に失敗しました")?;

    if cli.render_only {
        let rendered = renderer.render(&content)?;
        println!("{}", rendered.text);
        return Ok(());
    }

    let transport: Arc<dyn MailTransport> = if cli.dry_run || config.backend == MailBackend::Noop {
        Arc::new(NoopMailTransport)
    } else {
        Arc::new(SmtpMailTransport::new())
    };

    let service = MailService::new(Arc::new(renderer), transport);
    service
        .send_mail(&settings, &cli.to, &cli.cc, &cli.title, &content)
        .await?;

    tracing::info!(to = %cli.to, "通知メールを送信しました");

    Ok(())
}
