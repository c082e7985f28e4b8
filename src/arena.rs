//! Node storage used while emphasis is being resolved
//!
//! Nodes live in a flat `Vec` and are threaded into sibling lists through
//! `prev`/`next` indices, so a `NodeId` stays valid no matter how the tree
//! is rearranged. Wrapping a run of siblings in a new emphasis node is a
//! constant-time relink rather than a copy.

use crate::ast::{EmphasisKind, Node, Span};

pub(crate) type NodeId = usize;

#[derive(Debug)]
enum Item {
    Span(Span),
    Emphasis {
        kind: EmphasisKind,
        first: Option<NodeId>,
    },
}

#[derive(Debug)]
struct Slot {
    item: Item,
    prev: Option<NodeId>,
    next: Option<NodeId>,
}

#[derive(Debug, Default)]
pub(crate) struct Arena {
    slots: Vec<Slot>,
    first: Option<NodeId>,
    last: Option<NodeId>,
}

impl Arena {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a span to the top-level sequence.
    pub fn push(&mut self, span: Span) -> NodeId {
        let id = self.slots.len();
        self.slots.push(Slot {
            item: Item::Span(span),
            prev: self.last,
            next: None,
        });
        match self.last {
            Some(last) => self.slots[last].next = Some(id),
            None => self.first = Some(id),
        }
        self.last = Some(id);
        id
    }

    pub fn span(&self, id: NodeId) -> Span {
        match self.slots[id].item {
            Item::Span(span) => span,
            Item::Emphasis { .. } => unreachable!("node {id} is not a span"),
        }
    }

    /// Drop `count` bytes from the front of a span.
    pub fn shrink_front(&mut self, id: NodeId, count: usize) {
        if let Item::Span(span) = &mut self.slots[id].item {
            span.start += count;
            debug_assert!(span.start <= span.end);
        }
    }

    /// Move every node strictly between the siblings `after` and `before`
    /// into a new emphasis node, which takes their place.
    pub fn wrap(&mut self, after: NodeId, before: NodeId, kind: EmphasisKind) -> NodeId {
        let id = self.slots.len();
        let first = self.slots[after].next.filter(|&n| n != before);
        if let Some(first) = first {
            let last = self.slots[before].prev;
            self.slots[first].prev = None;
            if let Some(last) = last {
                self.slots[last].next = None;
            }
        }
        self.slots.push(Slot {
            item: Item::Emphasis { kind, first },
            prev: Some(after),
            next: Some(before),
        });
        self.slots[after].next = Some(id);
        self.slots[before].prev = Some(id);
        id
    }

    /// Unlink a top-level node.
    pub fn detach(&mut self, id: NodeId) {
        let (prev, next) = (self.slots[id].prev, self.slots[id].next);
        match prev {
            Some(prev) => self.slots[prev].next = next,
            None => self.first = next,
        }
        match next {
            Some(next) => self.slots[next].prev = prev,
            None => self.last = prev,
        }
        self.slots[id].prev = None;
        self.slots[id].next = None;
    }

    /// Build the owned tree, in document order.
    pub fn into_nodes(self) -> Vec<Node> {
        self.collect(self.first)
    }

    fn collect(&self, mut cursor: Option<NodeId>) -> Vec<Node> {
        let mut nodes = Vec::new();
        while let Some(id) = cursor {
            let slot = &self.slots[id];
            nodes.push(match slot.item {
                Item::Span(span) => Node::Span(span),
                Item::Emphasis { kind, first } => Node::Emphasis {
                    kind,
                    children: self.collect(first),
                },
            });
            cursor = slot.next;
        }
        nodes
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_push_keeps_order() {
        let mut arena = Arena::new();
        arena.push(Span::text(0, 1));
        arena.push(Span::code(2, 3));
        assert_eq!(
            arena.into_nodes(),
            vec![Node::Span(Span::text(0, 1)), Node::Span(Span::code(2, 3))]
        );
    }

    #[test]
    fn test_wrap_moves_range_into_children() {
        let mut arena = Arena::new();
        let open = arena.push(Span::text(0, 1));
        arena.push(Span::text(1, 2));
        arena.push(Span::text(2, 3));
        let close = arena.push(Span::text(3, 4));
        arena.wrap(open, close, EmphasisKind::Bold);
        assert_eq!(
            arena.into_nodes(),
            vec![
                Node::Span(Span::text(0, 1)),
                Node::Emphasis {
                    kind: EmphasisKind::Bold,
                    children: vec![Node::Span(Span::text(1, 2)), Node::Span(Span::text(2, 3))],
                },
                Node::Span(Span::text(3, 4)),
            ]
        );
    }

    #[test]
    fn test_wrap_adjacent_siblings_is_empty() {
        let mut arena = Arena::new();
        let open = arena.push(Span::text(0, 1));
        let close = arena.push(Span::text(1, 2));
        arena.wrap(open, close, EmphasisKind::Italic);
        assert_eq!(
            arena.into_nodes()[1],
            Node::Emphasis {
                kind: EmphasisKind::Italic,
                children: vec![],
            }
        );
    }

    #[test]
    fn test_detach_first_and_last() {
        let mut arena = Arena::new();
        let a = arena.push(Span::text(0, 1));
        arena.push(Span::text(1, 2));
        let c = arena.push(Span::text(2, 3));
        arena.detach(a);
        arena.detach(c);
        assert_eq!(arena.into_nodes(), vec![Node::Span(Span::text(1, 2))]);
    }

    #[test]
    fn test_shrink_front() {
        let mut arena = Arena::new();
        let id = arena.push(Span::text(0, 3));
        arena.shrink_front(id, 2);
        assert_eq!(arena.span(id), Span::text(2, 3));
    }
}
