//! Delimiter runs: kinds, flanking classification and the delimiter stack

use crate::arena::{Arena, NodeId};
use crate::ast::EmphasisKind;

/// Characters that can form emphasis delimiter runs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DelimiterKind {
    Asterisk,
    Underscore,
    Tilde,
    Pipe,
}

/// How a kind decides whether it may open or close.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Family {
    /// Opens when left-flanking, closes when right-flanking.
    Symmetric,
    /// Like `Symmetric`, but may not open or close inside a word unless
    /// the other side of the run is punctuation.
    Intraword,
}

impl DelimiterKind {
    pub const COUNT: usize = 4;

    pub fn from_byte(byte: u8) -> Option<Self> {
        match byte {
            b'*' => Some(DelimiterKind::Asterisk),
            b'_' => Some(DelimiterKind::Underscore),
            b'~' => Some(DelimiterKind::Tilde),
            b'|' => Some(DelimiterKind::Pipe),
            _ => None,
        }
    }

    pub(crate) fn index(self) -> usize {
        match self {
            DelimiterKind::Asterisk => 0,
            DelimiterKind::Underscore => 1,
            DelimiterKind::Tilde => 2,
            DelimiterKind::Pipe => 3,
        }
    }

    pub fn family(self) -> Family {
        match self {
            DelimiterKind::Underscore => Family::Intraword,
            DelimiterKind::Asterisk | DelimiterKind::Tilde | DelimiterKind::Pipe => {
                Family::Symmetric
            }
        }
    }

    /// Shortest run that counts as a delimiter; shorter runs are plain text.
    pub fn min_run(self) -> usize {
        match self {
            DelimiterKind::Asterisk | DelimiterKind::Underscore => 1,
            DelimiterKind::Tilde | DelimiterKind::Pipe => 2,
        }
    }

    /// Kinds with a single visual form regardless of run length.
    pub fn always_strong(self) -> bool {
        matches!(self, DelimiterKind::Tilde | DelimiterKind::Pipe)
    }

    pub fn emphasis(self, strong: bool) -> EmphasisKind {
        match (self, strong || self.always_strong()) {
            (DelimiterKind::Asterisk, true) => EmphasisKind::Bold,
            (DelimiterKind::Underscore, true) => EmphasisKind::Underline,
            (DelimiterKind::Asterisk | DelimiterKind::Underscore, false) => EmphasisKind::Italic,
            (DelimiterKind::Tilde, _) => EmphasisKind::Strikethrough,
            (DelimiterKind::Pipe, _) => EmphasisKind::Spoiler,
        }
    }
}

// Same set as C's `isspace`.
fn is_space(byte: u8) -> bool {
    matches!(byte, b' ' | b'\t' | b'\n' | b'\x0b' | b'\x0c' | b'\r')
}

/// Left-flanking test for a run between `prev` and `next`; swap the
/// arguments for right-flanking. `None` is the start or end of input.
fn is_flanking(prev: Option<u8>, next: Option<u8>) -> bool {
    let Some(next) = next else { return false };
    if is_space(next) {
        return false;
    }
    if !next.is_ascii_punctuation() {
        return true;
    }
    match prev {
        None => true,
        Some(prev) => is_space(prev) || prev.is_ascii_punctuation(),
    }
}

/// Open/close eligibility of one delimiter run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Flanking {
    pub can_open: bool,
    pub can_close: bool,
    pub preceded_by_punct: bool,
    pub followed_by_punct: bool,
}

impl Flanking {
    /// Classify a run of `kind` surrounded by `prev` and `next`. Returns
    /// `None` when the run can neither open nor close.
    pub fn classify(kind: DelimiterKind, prev: Option<u8>, next: Option<u8>) -> Option<Self> {
        let left_flanking = is_flanking(prev, next);
        let right_flanking = is_flanking(next, prev);
        let preceded_by_punct = prev.is_some_and(|b| b.is_ascii_punctuation());
        let followed_by_punct = next.is_some_and(|b| b.is_ascii_punctuation());

        let (can_open, can_close) = match kind.family() {
            Family::Symmetric => (left_flanking, right_flanking),
            Family::Intraword => (
                left_flanking && (!right_flanking || preceded_by_punct),
                right_flanking && (!left_flanking || followed_by_punct),
            ),
        };

        if !can_open && !can_close {
            return None;
        }
        Some(Flanking {
            can_open,
            can_close,
            preceded_by_punct,
            followed_by_punct,
        })
    }
}

/// An unresolved delimiter run, referring to the span node holding it.
#[derive(Debug, Clone)]
pub(crate) struct Delimiter {
    pub node: NodeId,
    pub kind: DelimiterKind,
    pub can_open: bool,
    pub can_close: bool,
    pub can_open_strong: bool,
    pub can_close_strong: bool,
    pub preceded_by_punct: bool,
    pub followed_by_punct: bool,
}

impl Delimiter {
    pub fn new(node: NodeId, kind: DelimiterKind, run_len: usize, flanking: Flanking) -> Self {
        let strong = run_len > 1;
        Delimiter {
            node,
            kind,
            can_open: flanking.can_open,
            can_close: flanking.can_close,
            can_open_strong: strong && flanking.can_open,
            can_close_strong: strong && flanking.can_close,
            preceded_by_punct: flanking.preceded_by_punct,
            followed_by_punct: flanking.followed_by_punct,
        }
    }

    /// Can both open and close.
    pub fn clopen(&self) -> bool {
        self.can_open && self.can_close
    }

    /// Characters left in the run.
    pub fn count(&self, arena: &Arena) -> usize {
        arena.span(self.node).len()
    }

    /// Consume `count` characters from the front of the run.
    pub fn remove(&self, arena: &mut Arena, count: usize) {
        arena.shrink_front(self.node, count);
    }
}

#[derive(Debug)]
struct Entry {
    delimiter: Delimiter,
    prev: Option<usize>,
    next: Option<usize>,
}

/// Delimiters in document order.
///
/// Entries are addressed by their push index, which only grows, so comparing
/// indices compares document positions even after entries are removed.
/// `None` plays the role of the bottom of the stack: it is below every
/// entry and never opens or closes.
#[derive(Debug, Default)]
pub(crate) struct DelimiterStack {
    entries: Vec<Entry>,
    first: Option<usize>,
    last: Option<usize>,
}

impl DelimiterStack {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, delimiter: Delimiter) -> usize {
        let index = self.entries.len();
        self.entries.push(Entry {
            delimiter,
            prev: self.last,
            next: None,
        });
        match self.last {
            Some(last) => self.entries[last].next = Some(index),
            None => self.first = Some(index),
        }
        self.last = Some(index);
        index
    }

    pub fn is_empty(&self) -> bool {
        self.first.is_none()
    }

    /// The entry just above the bottom of the stack.
    pub fn first(&self) -> Option<usize> {
        self.first
    }

    pub fn next(&self, index: usize) -> Option<usize> {
        self.entries[index].next
    }

    pub fn prev(&self, index: usize) -> Option<usize> {
        self.entries[index].prev
    }

    /// Remove one entry, returning the entry that followed it.
    pub fn remove(&mut self, index: usize) -> Option<usize> {
        let (prev, next) = (self.entries[index].prev, self.entries[index].next);
        match prev {
            Some(prev) => self.entries[prev].next = next,
            None => self.first = next,
        }
        match next {
            Some(next) => self.entries[next].prev = prev,
            None => self.last = prev,
        }
        next
    }

    /// Remove every entry strictly between `lower` and `upper`.
    pub fn remove_between(&mut self, lower: usize, upper: usize) {
        self.entries[lower].next = Some(upper);
        self.entries[upper].prev = Some(lower);
    }
}

impl std::ops::Index<usize> for DelimiterStack {
    type Output = Delimiter;

    fn index(&self, index: usize) -> &Delimiter {
        &self.entries[index].delimiter
    }
}
