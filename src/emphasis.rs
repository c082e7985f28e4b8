//! Delimiter stack resolution ("process emphasis")

use crate::arena::Arena;
use crate::delimiter::{Delimiter, DelimiterKind, DelimiterStack};

/// Per kind and closer length modulo 3, the highest stack entry known to
/// have no usable opener at or below it. `None` is the stack bottom.
struct OpenersBottom([[Option<usize>; 3]; DelimiterKind::COUNT]);

impl OpenersBottom {
    fn new() -> Self {
        OpenersBottom([[None; 3]; DelimiterKind::COUNT])
    }

    fn get(&self, kind: DelimiterKind, count: usize) -> Option<usize> {
        self.0[kind.index()][count % 3]
    }

    fn set(&mut self, kind: DelimiterKind, count: usize, bottom: Option<usize>) {
        self.0[kind.index()][count % 3] = bottom;
    }
}

/// Whether `opener` may pair with `closer` (rules 9 and 10: a clopen run
/// cannot pair when the lengths sum to a multiple of 3, unless both are).
fn can_pair(
    opener: &Delimiter,
    opener_len: usize,
    closer: &Delimiter,
    closer_len: usize,
) -> bool {
    if opener.kind != closer.kind || !opener.can_open {
        return false;
    }
    if !opener.clopen() && !closer.clopen() {
        return true;
    }
    if opener_len.is_multiple_of(3) && closer_len.is_multiple_of(3) {
        return true;
    }
    !(opener_len + closer_len).is_multiple_of(3)
}

/// Pair up openers and closers on `stack`, wrapping the nodes between each
/// pair in an emphasis node. Runs left unmatched stay as literal text.
pub(crate) fn process_emphasis(arena: &mut Arena, stack: &mut DelimiterStack) {
    if stack.is_empty() {
        return;
    }

    let mut openers_bottom = OpenersBottom::new();
    let mut current = stack.first();

    loop {
        // Find the next potential closer.
        while let Some(index) = current
            && !stack[index].can_close
        {
            current = stack.next(index);
        }
        let Some(closer) = current else { return };

        let closer_kind = stack[closer].kind;
        let closer_len = stack[closer].count(arena);
        let bottom = openers_bottom.get(closer_kind, closer_len);

        // Look back for the nearest matching opener, staying above the bottom.
        let mut candidate = stack.prev(closer);
        let mut opener = None;
        while let Some(index) = candidate
            && Some(index) > bottom
        {
            let len = stack[index].count(arena);
            if can_pair(&stack[index], len, &stack[closer], closer_len) {
                opener = Some(index);
                break;
            }
            candidate = stack.prev(index);
        }

        let Some(opener) = opener else {
            openers_bottom.set(closer_kind, closer_len, stack.prev(closer));
            let next = stack.next(closer);
            if !stack[closer].can_open {
                tracing::trace!(closer, "dropping unmatched closer");
                stack.remove(closer);
            }
            current = next;
            continue;
        };

        let opener_len = stack[opener].count(arena);
        let strong = stack[opener].can_open_strong
            && stack[closer].can_close_strong
            && opener_len >= 2
            && closer_len >= 2;
        let kind = closer_kind.emphasis(strong);
        tracing::trace!(opener, closer, ?kind, "matched delimiters");

        arena.wrap(stack[opener].node, stack[closer].node, kind);
        stack.remove_between(opener, closer);

        let used = if strong { 2 } else { 1 };
        stack[opener].remove(arena, used);
        stack[closer].remove(arena, used);

        if stack[opener].count(arena) == 0 {
            arena.detach(stack[opener].node);
            stack.remove(opener);
        }
        if stack[closer].count(arena) == 0 {
            arena.detach(stack[closer].node);
            current = stack.remove(closer);
        }
    }
}
