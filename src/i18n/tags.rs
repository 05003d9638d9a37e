//! Rich-text tags inside localized messages.
//!
//! Messages may wrap parts of their text in simple tags, e.g.
//! `"Deze pagina <strong>bestaat niet</strong>."`. Tags carry no attributes
//! and may nest. Rendering only emits tags from an allow-list; everything
//! else is reduced to its (escaped) text.

use crate::error::TagError;
use crate::markup::escape;
use regex::Regex;
use std::sync::OnceLock;

/// A parsed piece of a message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Segment<'a> {
    Text(&'a str),
    Tagged {
        tag: &'a str,
        children: Vec<Segment<'a>>,
    },
}

static TAG_REGEX: OnceLock<Regex> = OnceLock::new();

fn tag_regex() -> &'static Regex {
    TAG_REGEX.get_or_init(|| {
        Regex::new(r"<(/?)([a-zA-Z][a-zA-Z0-9]*)>").expect("tag pattern is valid")
    })
}

/// Parse a message into text and tagged segments.
pub fn parse(message: &str) -> Result<Vec<Segment<'_>>, TagError> {
    // Each frame is (open tag, children collected so far); the root has no tag.
    let mut stack: Vec<(Option<&str>, Vec<Segment<'_>>)> = vec![(None, Vec::new())];
    let mut cursor = 0;

    for caps in tag_regex().captures_iter(message) {
        let (Some(whole), Some(name)) = (caps.get(0), caps.get(2)) else {
            continue;
        };
        let is_close = caps.get(1).is_some_and(|m| !m.as_str().is_empty());

        if whole.start() > cursor {
            push_child(&mut stack, Segment::Text(&message[cursor..whole.start()]));
        }
        cursor = whole.end();

        if !is_close {
            stack.push((Some(name.as_str()), Vec::new()));
            continue;
        }

        match stack.pop() {
            Some((Some(open), children)) if open == name.as_str() => {
                push_child(&mut stack, Segment::Tagged { tag: open, children });
            }
            Some((Some(open), _)) => {
                return Err(TagError::Mismatched {
                    expected: open.to_string(),
                    found: name.as_str().to_string(),
                });
            }
            _ => return Err(TagError::UnexpectedClose(name.as_str().to_string())),
        }
    }

    if cursor < message.len() {
        push_child(&mut stack, Segment::Text(&message[cursor..]));
    }

    match stack.pop() {
        Some((None, root)) if stack.is_empty() => Ok(root),
        Some((Some(open), _)) => Err(TagError::Unclosed(open.to_string())),
        _ => Err(TagError::Unclosed(String::new())),
    }
}

fn push_child<'a>(stack: &mut [(Option<&'a str>, Vec<Segment<'a>>)], segment: Segment<'a>) {
    if let Some((_, children)) = stack.last_mut() {
        children.push(segment);
    }
}

/// Render a message as HTML, keeping only the allowed tags.
///
/// A message that fails to parse is rendered as escaped plain text.
pub fn render_html(message: &str, allowed: &[&str]) -> String {
    match parse(message) {
        Ok(segments) => {
            let mut out = String::with_capacity(message.len());
            render_segments(&segments, allowed, &mut out);
            out
        }
        Err(e) => {
            tracing::warn!("Rendering message as plain text: {}", e);
            escape(message).into_owned()
        }
    }
}

/// Strip all tags, keeping the text (for `<title>` and meta descriptions).
pub fn plain_text(message: &str) -> String {
    match parse(message) {
        Ok(segments) => {
            let mut out = String::with_capacity(message.len());
            collect_text(&segments, &mut out);
            out
        }
        Err(_) => message.to_string(),
    }
}

fn render_segments(segments: &[Segment<'_>], allowed: &[&str], out: &mut String) {
    for segment in segments {
        match segment {
            Segment::Text(text) => out.push_str(&escape(text)),
            Segment::Tagged { tag, children } => {
                let keep = allowed.contains(tag);
                if keep {
                    out.push('<');
                    out.push_str(tag);
                    out.push('>');
                }
                render_segments(children, allowed, out);
                if keep {
                    out.push_str("</");
                    out.push_str(tag);
                    out.push('>');
                }
            }
        }
    }
}

fn collect_text(segments: &[Segment<'_>], out: &mut String) {
    for segment in segments {
        match segment {
            Segment::Text(text) => out.push_str(text),
            Segment::Tagged { children, .. } => collect_text(children, out),
        }
    }
}
