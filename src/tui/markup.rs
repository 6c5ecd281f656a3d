//! Rendering of processed text.
//!
//! The text backend wraps emphasised fragments in `<strong>` and may use
//! `<br>` for line breaks. Other tags are dropped and the common entities
//! are decoded.

use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span, Text};

/// A run of text with uniform weight.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Segment {
    /// Decoded text, may contain `\n`.
    pub text: String,
    /// Inside `<strong>`.
    pub bold: bool,
}

/// Splits `html` into plain and bold segments.
pub fn parse(html: &str) -> Vec<Segment> {
    let mut segments: Vec<Segment> = Vec::new();
    let mut bold_depth = 0usize;
    let mut buf = String::new();
    let mut rest = html;

    while let Some(start) = rest.find('<') {
        buf.push_str(&rest[..start]);
        let after = &rest[start..];
        if !starts_tag(&after[1..]) {
            buf.push('<');
            rest = &after[1..];
            continue;
        }
        let Some(end) = after.find('>') else {
            // Unterminated tag: keep it as text.
            buf.push_str(after);
            rest = "";
            break;
        };
        let tag = after[1..end].trim().to_ascii_lowercase();
        rest = &after[end + 1..];

        match tag.trim_end_matches('/').trim() {
            "strong" | "b" => {
                flush(&mut segments, &mut buf, bold_depth > 0);
                bold_depth += 1;
            }
            "/strong" | "/b" => {
                flush(&mut segments, &mut buf, bold_depth > 0);
                bold_depth = bold_depth.saturating_sub(1);
            }
            "br" => buf.push('\n'),
            _ => {}
        }
    }
    buf.push_str(rest);
    flush(&mut segments, &mut buf, bold_depth > 0);
    segments
}

/// A tag name, closing slash or `!` must follow `<` directly.
fn starts_tag(s: &str) -> bool {
    s.chars()
        .next()
        .is_some_and(|c| c.is_ascii_alphabetic() || c == '/' || c == '!')
}

fn flush(segments: &mut Vec<Segment>, buf: &mut String, bold: bool) {
    if buf.is_empty() {
        return;
    }
    let text = decode_entities(buf);
    buf.clear();
    match segments.last_mut() {
        Some(last) if last.bold == bold => last.text.push_str(&text),
        _ => segments.push(Segment { text, bold }),
    }
}

fn decode_entities(s: &str) -> String {
    s.replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&quot;", "\"")
        .replace("&#39;", "'")
        .replace("&nbsp;", " ")
        .replace("&amp;", "&")
}

/// Converts `html` into styled ratatui text.
pub fn to_text(html: &str, bold_style: Style) -> Text<'static> {
    let mut lines: Vec<Line<'static>> = Vec::new();
    let mut current: Vec<Span<'static>> = Vec::new();

    for segment in parse(html) {
        let style = if segment.bold {
            bold_style.add_modifier(Modifier::BOLD)
        } else {
            Style::default()
        };
        let mut parts = segment.text.split('\n').peekable();
        while let Some(part) = parts.next() {
            if !part.is_empty() {
                current.push(Span::styled(part.to_string(), style));
            }
            if parts.peek().is_some() {
                lines.push(Line::from(std::mem::take(&mut current)));
            }
        }
    }
    lines.push(Line::from(current));
    Text::from(lines)
}
