//! Inline scanner: splits input into text, code spans and delimiter runs

use crate::arena::Arena;
use crate::ast::{Document, Span};
use crate::delimiter::{Delimiter, DelimiterKind, DelimiterStack, Flanking};
use crate::emphasis::process_emphasis;
use crate::options::Options;
use std::collections::HashMap;

pub struct Parser {
    options: Options,
}

impl Parser {
    pub fn new() -> Self {
        Parser {
            options: Options::default(),
        }
    }

    pub fn with_options(options: Options) -> Self {
        Parser { options }
    }

    /// Parse `input` and resolve all emphasis.
    pub fn parse<'a>(&self, input: &'a str) -> Document<'a> {
        let mut scanner = Scanner {
            input: input.as_bytes(),
            options: &self.options,
            arena: Arena::new(),
            stack: DelimiterStack::new(),
            backtick_runs: None,
        };
        scanner.scan();

        let Scanner {
            mut arena,
            mut stack,
            ..
        } = scanner;
        process_emphasis(&mut arena, &mut stack);

        let document = Document {
            source: input,
            nodes: arena.into_nodes(),
        };
        if tracing::enabled!(tracing::Level::TRACE) {
            tracing::trace!("resolved tree:\n{}", document.dump());
        }
        document
    }
}

impl Default for Parser {
    fn default() -> Self {
        Self::new()
    }
}

struct Scanner<'a> {
    input: &'a [u8],
    options: &'a Options,
    arena: Arena,
    stack: DelimiterStack,
    /// Start of the last backtick run of each length, indexed the first
    /// time a code span fails to close.
    backtick_runs: Option<HashMap<usize, usize>>,
}

impl Scanner<'_> {
    fn is_trigger(&self, byte: u8) -> bool {
        byte == b'`'
            || DelimiterKind::from_byte(byte).is_some_and(|kind| self.options.enables(kind))
    }

    /// Length of the run of `byte` starting at `start`.
    fn run_length(&self, start: usize, byte: u8) -> usize {
        self.input[start..].iter().take_while(|&&b| b == byte).count()
    }

    fn push_text(&mut self, start: usize, end: usize) {
        if start < end {
            self.arena.push(Span::text(start, end));
        }
    }

    fn scan(&mut self) {
        let len = self.input.len();
        let mut pos = 0;
        let mut start_of_text = 0;

        while pos < len {
            let Some(offset) = self.input[pos..].iter().position(|&b| self.is_trigger(b)) else {
                break;
            };
            let start = pos + offset;

            // Odd number of backslashes: the trigger is escaped and stays in
            // the text for the renderer to unescape.
            let backslashes = self.input[..start]
                .iter()
                .rev()
                .take_while(|&&b| b == b'\\')
                .count();
            if backslashes % 2 == 1 {
                pos = start + 1;
                continue;
            }

            let byte = self.input[start];
            let count = self.run_length(start, byte);

            if byte == b'`' {
                match self.find_code_span_end(start, count) {
                    Some(end) => {
                        self.push_text(start_of_text, start);
                        self.arena.push(Span::code(start + count, end));
                        pos = end + count;
                        start_of_text = pos;
                    }
                    // Unmatched backticks are literal.
                    None => pos = start + count,
                }
                continue;
            }

            let Some(kind) = DelimiterKind::from_byte(byte) else {
                pos = start + 1;
                continue;
            };
            if count >= kind.min_run() && self.classify(start_of_text, start, start + count, kind) {
                start_of_text = start + count;
            }
            pos = start + count;
        }

        self.push_text(start_of_text, len);
    }

    /// Start of the backtick string closing a code span opened by `count`
    /// backticks at `start`. Longer backtick strings are skipped whole.
    fn find_code_span_end(&mut self, start: usize, count: usize) -> Option<usize> {
        if let Some(runs) = &self.backtick_runs
            && runs.get(&count).is_none_or(|&last| last <= start)
        {
            return None;
        }

        let input = self.input;
        let fence = &input[start..start + count];
        let mut search_start = start + count;
        loop {
            let Some(offset) = input[search_start..]
                .windows(count)
                .position(|window| window == fence)
            else {
                self.index_backtick_runs();
                return None;
            };
            let end = search_start + offset;
            let run = count + self.run_length(end + count, b'`');
            if run == count {
                return Some(end);
            }
            search_start = end + run;
        }
    }

    fn index_backtick_runs(&mut self) {
        let mut runs = HashMap::new();
        let mut pos = 0;
        while let Some(offset) = self.input[pos..].iter().position(|&b| b == b'`') {
            let start = pos + offset;
            let count = self.run_length(start, b'`');
            runs.insert(count, start);
            pos = start + count;
        }
        self.backtick_runs = Some(runs);
    }

    /// Decide whether the run `[start, end)` is a delimiter. If so, flush the
    /// pending text, push the run as its own span, and record it on the stack.
    fn classify(
        &mut self,
        start_of_text: usize,
        start: usize,
        end: usize,
        kind: DelimiterKind,
    ) -> bool {
        let prev = start.checked_sub(1).map(|i| self.input[i]);
        let next = self.input.get(end).copied();

        let Some(flanking) = Flanking::classify(kind, prev, next) else {
            return false;
        };

        self.push_text(start_of_text, start);
        let node = self.arena.push(Span::text(start, end));
        let delimiter = Delimiter::new(node, kind, end - start, flanking);
        tracing::trace!(
            start,
            end,
            ?kind,
            can_open = delimiter.can_open,
            can_close = delimiter.can_close,
            preceded_by_punct = delimiter.preceded_by_punct,
            followed_by_punct = delimiter.followed_by_punct,
            "delimiter run"
        );
        self.stack.push(delimiter);
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ast::{EmphasisKind, Node};
    use pretty_assertions::assert_eq;

    fn spans(input: &str) -> Vec<Node> {
        Parser::new().parse(input).nodes
    }

    #[test]
    fn test_empty_input_has_no_nodes() {
        assert!(Parser::new().parse("").nodes.is_empty());
    }

    #[test]
    fn test_plain_text_is_one_span() {
        assert_eq!(spans("hello world"), vec![Node::Span(Span::text(0, 11))]);
    }

    #[test]
    fn test_unmatched_delimiter_splits_text() {
        assert_eq!(
            spans("foo *bar"),
            vec![
                Node::Span(Span::text(0, 4)),
                Node::Span(Span::text(4, 5)),
                Node::Span(Span::text(5, 8)),
            ]
        );
    }

    #[test]
    fn test_non_delimiter_run_stays_in_text() {
        // Surrounded by spaces: neither left- nor right-flanking.
        assert_eq!(spans("a * b"), vec![Node::Span(Span::text(0, 5))]);
    }

    #[test]
    fn test_code_span_node() {
        assert_eq!(
            spans("a `b` c"),
            vec![
                Node::Span(Span::text(0, 2)),
                Node::Span(Span::code(3, 4)),
                Node::Span(Span::text(5, 7)),
            ]
        );
    }

    #[test]
    fn test_code_span_skips_longer_backtick_strings() {
        assert_eq!(spans("` `` `"), vec![Node::Span(Span::code(1, 5))]);
    }

    #[test]
    fn test_code_span_after_unmatched_backticks() {
        assert_eq!(
            spans("``` a `b` ``"),
            vec![
                Node::Span(Span::text(0, 6)),
                Node::Span(Span::code(7, 8)),
                Node::Span(Span::text(9, 12)),
            ]
        );
    }

    #[test]
    fn test_rising_unmatched_backtick_runs_are_text() {
        let input: String = (1..=2000).map(|n| "`".repeat(n) + "a").collect();
        assert_eq!(spans(&input), vec![Node::Span(Span::text(0, input.len()))]);
    }

    #[test]
    fn test_escaped_delimiter_is_text() {
        assert_eq!(
            spans("\\*a*"),
            vec![Node::Span(Span::text(0, 3)), Node::Span(Span::text(3, 4))]
        );
    }

    #[test]
    fn test_single_tilde_is_text() {
        assert_eq!(spans("a~b~"), vec![Node::Span(Span::text(0, 4))]);
    }

    #[test]
    fn test_disabled_extension_is_text() {
        let doc = Parser::with_options(Options::commonmark()).parse("~~a~~");
        assert_eq!(doc.nodes, vec![Node::Span(Span::text(0, 5))]);
    }

    #[test]
    fn test_resolved_tree() {
        let doc = Parser::new().parse("**a**");
        assert_eq!(
            doc.nodes,
            vec![Node::Emphasis {
                kind: EmphasisKind::Bold,
                children: vec![Node::Span(Span::text(2, 3))],
            }]
        );
    }

    #[test]
    fn test_leftover_opener_keeps_one_char() {
        let doc = Parser::new().parse("**foo*");
        assert_eq!(
            doc.nodes,
            vec![
                Node::Span(Span::text(1, 2)),
                Node::Emphasis {
                    kind: EmphasisKind::Italic,
                    children: vec![Node::Span(Span::text(2, 5))],
                },
            ]
        );
    }
}
