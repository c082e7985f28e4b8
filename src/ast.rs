//! AST node types for resolved inline markup

use serde::{Deserialize, Serialize};

/// A byte range `[start, end)` into the parsed input.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Span {
    pub start: usize,
    pub end: usize,
    pub is_code: bool, // Content of a code span, rendered without escapes
}

impl Span {
    pub fn text(start: usize, end: usize) -> Self {
        Span {
            start,
            end,
            is_code: false,
        }
    }

    pub fn code(start: usize, end: usize) -> Self {
        Span {
            start,
            end,
            is_code: true,
        }
    }

    pub fn len(&self) -> usize {
        self.end - self.start
    }

    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }

    /// The slice of `source` covered by this span.
    pub fn as_str<'a>(&self, source: &'a str) -> &'a str {
        &source[self.start..self.end]
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EmphasisKind {
    Italic,
    Bold,
    Underline,
    Strikethrough,
    Spoiler,
}

impl EmphasisKind {
    /// Name of the markup tag this kind renders to.
    pub fn tag(self) -> &'static str {
        match self {
            EmphasisKind::Italic => "em",
            EmphasisKind::Bold => "strong",
            EmphasisKind::Underline => "uline",
            EmphasisKind::Strikethrough => "del",
            EmphasisKind::Spoiler => "spoiler",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Node {
    Span(Span),
    Emphasis {
        kind: EmphasisKind,
        children: Vec<Node>,
    },
}

/// A fully resolved parse of one input buffer.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Document<'a> {
    pub source: &'a str,
    pub nodes: Vec<Node>,
}

impl Document<'_> {
    /// Indented listing of the tree, one node per line.
    pub fn dump(&self) -> String {
        let mut out = String::new();
        for node in &self.nodes {
            dump_node(&mut out, self.source, node, 0);
        }
        out
    }
}

fn dump_node(out: &mut String, source: &str, node: &Node, indent: usize) {
    let pad = " ".repeat(indent);
    match node {
        Node::Span(span) if span.is_code => {
            out.push_str(&format!("{}Code: '{}'\n", pad, span.as_str(source)));
        }
        Node::Span(span) => {
            out.push_str(&format!("{}Span: '{}'\n", pad, span.as_str(source)));
        }
        Node::Emphasis { kind, children } => {
            out.push_str(&format!("{}Emphasis {}:\n", pad, kind.tag()));
            for child in children {
                dump_node(out, source, child, indent + 1);
            }
        }
    }
}
