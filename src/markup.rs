//! Markdown to HTML, and the truncation used for body fallbacks.

use std::borrow::Cow;

use pulldown_cmark::{html, Options, Parser};

/// Appended to a truncated body.
pub const OMISSION: &str = "...";

/// Turns lightweight markup into display HTML. Must be pure.
pub trait MarkupRenderer: Send + Sync {
    fn render(&self, markup: &str) -> String;
}

/// CommonMark renderer. Inline HTML (the `<em>` tags of highlighted
/// snippets) passes through untouched.
#[derive(Debug, Clone, Copy, Default)]
pub struct MarkdownRenderer;

impl MarkupRenderer for MarkdownRenderer {
    fn render(&self, markup: &str) -> String {
        let parser = Parser::new_ext(markup, Options::empty());
        let mut out = String::with_capacity(markup.len() * 3 / 2);
        html::push_html(&mut out, parser);
        out
    }
}

/// Cut `text` so the result, omission included, is at most `length` chars.
///
/// Text already within `length` comes back borrowed and unchanged. When
/// `length` can't even hold the omission, the omission alone is returned.
pub fn truncate(text: &str, length: usize) -> Cow<'_, str> {
    if text.chars().count() <= length {
        return Cow::Borrowed(text);
    }
    let keep = length.saturating_sub(OMISSION.chars().count());
    if keep == 0 {
        return Cow::Borrowed(OMISSION);
    }
    let cut = text
        .char_indices()
        .nth(keep)
        .map_or(text.len(), |(byte, _)| byte);
    Cow::Owned(format!("{}{}", &text[..cut], OMISSION))
}
