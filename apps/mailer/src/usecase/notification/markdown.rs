//! Markdown 変換
//!
//! 通知本文の Markdown を HTML 断片とプレーンテキストに変換する。
//! プレーンテキスト変換では生 HTML（スタイル定義など）を取り除き、
//! リンクは `ラベル (URL)` の形に展開する。

use pulldown_cmark::{Event, Options, Parser, Tag, TagEnd, html};

fn parser_options() -> Options {
    Options::ENABLE_TABLES | Options::ENABLE_STRIKETHROUGH
}

/// Markdown を HTML 断片に変換する
///
/// 生 HTML はそのまま出力される。
pub(super) fn to_html(markdown: &str) -> String {
    let mut out = String::with_capacity(markdown.len() * 2);
    html::push_html(&mut out, Parser::new_ext(markdown, parser_options()));
    out
}

/// Markdown をプレーンテキストに変換する
///
/// ブロック同士は空行で区切る。コードブロックの中身は空行も含めてそのまま残す。
pub(super) fn to_plain_text(markdown: &str) -> String {
    let mut writer = PlainTextWriter::default();

    for event in Parser::new_ext(markdown, parser_options()) {
        writer.handle(event);
    }

    writer.finish()
}

#[derive(Default)]
struct PlainTextWriter {
    out:   String,
    /// 入れ子のリストごとの次の番号（箇条書きは `None`）
    lists: Vec<Option<u64>>,
    /// (リンク先 URL, リンクテキストの開始位置)
    links: Vec<(String, usize)>,
}

impl PlainTextWriter {
    fn handle(&mut self, event: Event<'_>) {
        match event {
            Event::Text(text) | Event::Code(text) => self.out.push_str(&text),
            Event::SoftBreak | Event::HardBreak => self.out.push('\n'),
            Event::Start(Tag::Link { dest_url, .. }) => {
                self.links.push((dest_url.into_string(), self.out.len()));
            }
            Event::End(TagEnd::Link) => self.close_link(),
            Event::Start(Tag::List(start)) => {
                self.start_block();
                self.lists.push(start);
            }
            Event::End(TagEnd::List(_)) => {
                self.lists.pop();
                self.end_block();
            }
            Event::Start(Tag::Item) => self.start_item(),
            Event::Start(Tag::TableCell) => {
                if !self.at_line_start() {
                    self.out.push_str(" | ");
                }
            }
            // リスト項目内の段落は項目の行に続けて書く
            Event::Start(Tag::Paragraph) if self.in_list() => {}
            Event::Start(
                Tag::Paragraph
                | Tag::Heading { .. }
                | Tag::CodeBlock(_)
                | Tag::BlockQuote(_)
                | Tag::Table(_),
            ) => self.start_block(),
            Event::End(TagEnd::Item | TagEnd::TableHead | TagEnd::TableRow) => self.new_line(),
            Event::End(
                TagEnd::Paragraph
                | TagEnd::Heading(_)
                | TagEnd::CodeBlock
                | TagEnd::BlockQuote
                | TagEnd::Table,
            ) => self.end_block(),
            Event::Rule => {
                self.start_block();
                self.out.push_str("---");
                self.end_block();
            }
            _ => {}
        }
    }

    fn finish(self) -> String {
        self.out.trim_end().to_string()
    }

    fn in_list(&self) -> bool {
        !self.lists.is_empty()
    }

    fn at_line_start(&self) -> bool {
        self.out.is_empty() || self.out.ends_with('\n')
    }

    fn new_line(&mut self) {
        if !self.at_line_start() {
            self.out.push('\n');
        }
    }

    /// 直前のブロックとの間に空行を入れる（リスト内では改行のみ）
    fn start_block(&mut self) {
        self.new_line();
        if !self.in_list() && !self.out.is_empty() && !self.out.ends_with("\n\n") {
            self.out.push('\n');
        }
    }

    fn end_block(&mut self) {
        self.new_line();
    }

    fn start_item(&mut self) {
        self.new_line();

        let depth = self.lists.len().saturating_sub(1);
        self.out.push_str(&"  ".repeat(depth));

        match self.lists.last_mut() {
            Some(Some(number)) => {
                self.out.push_str(&format!("{number}. "));
                *number += 1;
            }
            _ => self.out.push_str("- "),
        }
    }

    fn close_link(&mut self) {
        let Some((url, start)) = self.links.pop() else {
            return;
        };
        // 自動リンク（テキストが URL そのもの）は重複させない
        if self.out[start..] != url {
            self.out.push_str(" (");
            self.out.push_str(&url);
            self.out.push(')');
        }
    }
}
