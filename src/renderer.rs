//! Markup renderer for resolved inline trees

use crate::ast::{Document, Node};

pub struct HtmlRenderer;

impl HtmlRenderer {
    pub fn new() -> Self {
        HtmlRenderer
    }

    pub fn render(&self, document: &Document) -> String {
        let mut out = String::with_capacity(document.source.len());
        for node in &document.nodes {
            render_node(&mut out, document.source, node);
        }
        out
    }
}

impl Default for HtmlRenderer {
    fn default() -> Self {
        Self::new()
    }
}

fn render_node(out: &mut String, source: &str, node: &Node) {
    match node {
        Node::Span(span) if span.is_code => {
            out.push_str("<code>");
            out.push_str(&normalize_code(span.as_str(source)));
            out.push_str("</code>");
        }
        Node::Span(span) => push_unescaped(out, span.as_str(source)),
        Node::Emphasis { kind, children } => {
            out.push_str(&format!("<{}>", kind.tag()));
            for child in children {
                render_node(out, source, child);
            }
            out.push_str(&format!("</{}>", kind.tag()));
        }
    }
}

/// Line endings become spaces; one space is stripped from each end when
/// both ends have one and the content is not all spaces.
fn normalize_code(code: &str) -> String {
    let content = code.replace(['\n', '\r'], " ");
    if content.len() > 2
        && content.starts_with(' ')
        && content.ends_with(' ')
        && content.bytes().any(|b| b != b' ')
    {
        return content[1..content.len() - 1].to_string();
    }
    content
}

/// Copy `text` to `out`, resolving backslash escapes of ASCII punctuation.
/// Any other backslash is literal.
fn push_unescaped(out: &mut String, text: &str) {
    let bytes = text.as_bytes();
    let mut start_of_text = 0;
    let mut pos = 0;
    while let Some(offset) = bytes[pos..].iter().position(|&b| b == b'\\') {
        let backslash = pos + offset;
        let Some(&escaped) = bytes.get(backslash + 1) else {
            break;
        };
        if escaped.is_ascii_punctuation() {
            out.push_str(&text[start_of_text..backslash]);
            out.push(escaped as char);
            start_of_text = backslash + 2;
        }
        pos = backslash + 2;
    }
    out.push_str(&text[start_of_text..]);
}
