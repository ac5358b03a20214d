//! # テンプレートレンダラー
//!
//! tera テンプレートエンジンで通知メールを HTML/plaintext 両形式で生成する。
//!
//! ## 設計方針
//!
//! - **`include_str!` によるコンパイル時埋め込み**: テンプレートはバイナリに埋め込まれる
//! - **本文は Markdown**: 本文にスタイル定義とフッターを連結してから変換する
//! - **決定的な出力**: 同じ本文からは常にバイト単位で同一の結果を生成する（時刻や乱数を含めない）

use notifymail_domain::{NotificationError, mail::RenderedMail};
use tera::{Context, Tera};

use super::markdown;

const HTML_TEMPLATE: &str = "notification.html";
const TEXT_TEMPLATE: &str = "notification.txt";

const PRODUCT_NAME: &str = "Crawlab";
const COPYRIGHT: &str = "© 2021 Crawlab-Team";
const SIGNATURE: &str = "Happy Crawling ☺";
const LOGO: &str = "data:image/svg+xml;base64,PHN2ZyB3aWR0aD0iMzAwIiBoZWlnaHQ9IjMwMCIgeG1sbnM9Imh0dHA6Ly93d3cudzMub3JnLzIwMDAvc3ZnIj4KICAgIDxnIGZpbGw9Im5vbmUiPgogICAgICAgIDxjaXJjbGUgY3g9IjE1MCIgY3k9IjE1MCIgcj0iMTMwIiBmaWxsPSJub25lIiBzdHJva2Utd2lkdGg9IjQwIiBzdHJva2U9IiM0MDllZmYiPgogICAgICAgIDwvY2lyY2xlPgogICAgICAgIDxjaXJjbGUgY3g9IjE1MCIgY3k9IjE1MCIgcj0iMTEwIiBmaWxsPSJ3aGl0ZSI+CiAgICAgICAgPC9jaXJjbGU+CiAgICAgICAgPGNpcmNsZSBjeD0iMTUwIiBjeT0iMTUwIiByPSI3MCIgZmlsbD0iIzQwOWVmZiI+CiAgICAgICAgPC9jaXJjbGU+CiAgICAgICAgPHBhdGggZD0iCiAgICAgICAgICAgIE0gMTUwLDE1MAogICAgICAgICAgICBMIDI4MCwyMjUKICAgICAgICAgICAgQSAxNTAsMTUwIDkwIDAgMCAyODAsNzUKICAgICAgICAgICAgIiBmaWxsPSIjNDA5ZWZmIj4KICAgICAgICA8L3BhdGg+CiAgICA8L2c+Cjwvc3ZnPgo=";

/// 本文の HTML に適用するスタイル（プレーンテキストからは除去される）
const STYLE: &str = "<style>
h1, h2, h3 { color: #409eff; }
a { color: #409eff; }
table { border-collapse: collapse; }
th, td { border: 1px solid #ebeef5; padding: 4px 8px; }
code { background-color: #f4f4f5; padding: 0 4px; }
</style>";

/// 全通知メール共通のフッター
const FOOTER: &str = "[Github](https://github.com/crawlab-team/crawlab) | \
                      [Documentation](http://docs.crawlab.cn) | \
                      [Docker](https://hub.docker.com/r/tikazyq/crawlab)";

/// 本文レンダリングトレイト
///
/// Markdown 本文から HTML 本文とプレーンテキスト本文を生成する。
pub trait ContentRenderer: Send + Sync {
    fn render(&self, content: &str) -> Result<RenderedMail, NotificationError>;
}

/// テンプレートレンダラー
///
/// tera テンプレートエンジンをラップし、Markdown 本文から [`RenderedMail`] を生成する。
pub struct TemplateRenderer {
    engine: Tera,
}

impl TemplateRenderer {
    /// 新しいレンダラーインスタンスを作成
    ///
    /// `include_str!` で埋め込んだテンプレートを tera に登録する。
    pub fn new() -> Result<Self, NotificationError> {
        Self::from_templates(
            include_str!("../../../templates/notification.html"),
            include_str!("../../../templates/notification.txt"),
        )
    }

    /// 任意のテンプレートからレンダラーを作成する
    ///
    /// テンプレートの構文エラーはこの時点で [`NotificationError::TemplateFailed`] になる。
    pub fn from_templates(html: &str, text: &str) -> Result<Self, NotificationError> {
        let mut engine = Tera::default();

        engine
            .add_raw_templates(vec![(HTML_TEMPLATE, html), (TEXT_TEMPLATE, text)])
            .map_err(|e| NotificationError::TemplateFailed(template_error_message(&e)))?;

        Ok(Self { engine })
    }

    /// 本文にスタイルとフッターを連結した Markdown を返す
    fn compose_markdown(content: &str) -> String {
        format!("{content}\n\n{STYLE}\n\n{FOOTER}\n")
    }

    fn build_context(body: &str) -> Context {
        let mut context = Context::new();
        context.insert("product_name", PRODUCT_NAME);
        context.insert("product_logo", LOGO);
        context.insert("copyright", COPYRIGHT);
        context.insert("signature", SIGNATURE);
        context.insert("body", body);
        context
    }

    fn render_template(&self, name: &str, context: &Context) -> Result<String, NotificationError> {
        self.engine
            .render(name, context)
            .map_err(|e| NotificationError::TemplateFailed(template_error_message(&e)))
    }
}

impl ContentRenderer for TemplateRenderer {
    fn render(&self, content: &str) -> Result<RenderedMail, NotificationError> {
        let markdown = Self::compose_markdown(content);

        let html = self.render_template(
            HTML_TEMPLATE,
            &Self::build_context(&markdown::to_html(&markdown)),
        )?;

        let text = self.render_template(
            TEXT_TEMPLATE,
            &Self::build_context(&markdown::to_plain_text(&markdown)),
        )?;

        Ok(RenderedMail { html, text })
    }
}

/// tera のエラーは原因を `source` に持つため、連結して 1 行にする
fn template_error_message(error: &tera::Error) -> String {
    let mut message = error.to_string();
    let mut source = std::error::Error::source(error);
    while let Some(cause) = source {
        message.push_str(": ");
        message.push_str(&cause.to_string());
        source = cause.source();
    }
    message
}
