//! Markdown rendering with syntax highlighting

use pulldown_cmark::{html, CodeBlockKind, CowStr, Event, Options, Parser, Tag, TagEnd};
use syntect::highlighting::ThemeSet;
use syntect::html::highlighted_html_for_string;
use syntect::parsing::SyntaxSet;

use crate::helpers::escape_html;

/// Markdown renderer with syntect-based code highlighting
pub struct MarkdownRenderer {
    syntax_set: SyntaxSet,
    theme_set: ThemeSet,
    theme_name: String,
}

impl MarkdownRenderer {
    /// Create a renderer using the given syntect theme
    pub fn new(theme: &str) -> Self {
        Self {
            syntax_set: SyntaxSet::load_defaults_newlines(),
            theme_set: ThemeSet::load_defaults(),
            theme_name: theme.to_string(),
        }
    }

    /// Render a Markdown body to HTML
    pub fn render(&self, markdown: &str) -> String {
        let options = Options::ENABLE_TABLES
            | Options::ENABLE_FOOTNOTES
            | Options::ENABLE_STRIKETHROUGH
            | Options::ENABLE_TASKLISTS
            | Options::ENABLE_GFM;

        // Code-block text is buffered and replaced by highlighted HTML;
        // everything else passes through untouched.
        let mut events: Vec<Event> = Vec::new();
        let mut code: Option<(Option<String>, String)> = None;

        for event in Parser::new_ext(markdown, options) {
            match event {
                Event::Start(Tag::CodeBlock(kind)) => {
                    let lang = match kind {
                        CodeBlockKind::Fenced(lang) if !lang.is_empty() => Some(lang.to_string()),
                        _ => None,
                    };
                    code = Some((lang, String::new()));
                }
                Event::End(TagEnd::CodeBlock) => {
                    if let Some((lang, source)) = code.take() {
                        let highlighted = self.highlight(&source, lang.as_deref());
                        events.push(Event::Html(CowStr::from(highlighted)));
                    }
                }
                Event::Text(text) => match code.as_mut() {
                    Some((_, source)) => source.push_str(&text),
                    None => events.push(Event::Text(text)),
                },
                other => {
                    if code.is_none() {
                        events.push(other);
                    }
                }
            }
        }

        let mut out = String::new();
        html::push_html(&mut out, events.into_iter());
        out
    }

    /// Highlight one fenced code block.
    ///
    /// An unrecognized language falls back to first-line detection, then to
    /// plain text.
    fn highlight(&self, source: &str, lang: Option<&str>) -> String {
        let syntax = lang
            .and_then(|l| {
                self.syntax_set
                    .find_syntax_by_token(l)
                    .or_else(|| self.syntax_set.find_syntax_by_extension(l))
            })
            .or_else(|| self.syntax_set.find_syntax_by_first_line(source))
            .unwrap_or_else(|| self.syntax_set.find_syntax_plain_text());

        let theme = match self
            .theme_set
            .themes
            .get(&self.theme_name)
            .or_else(|| self.theme_set.themes.values().next())
        {
            Some(theme) => theme,
            None => return plain_block(source, lang),
        };

        match highlighted_html_for_string(source, &self.syntax_set, syntax, theme) {
            Ok(highlighted) => format!(r#"<div class="highlight">{}</div>"#, highlighted),
            Err(_) => plain_block(source, lang),
        }
    }
}

/// Unhighlighted fallback code block
fn plain_block(source: &str, lang: Option<&str>) -> String {
    format!(
        r#"<pre><code class="language-{}">{}</code></pre>"#,
        lang.unwrap_or("text"),
        escape_html(source)
    )
}
