//! Namespace string scanner.
//!
//! Hand-written maximal-munch scanner for the namespace grammar. Each
//! optional segment is its own clause so the edge cases (bare semver
//! termination, colon-chained generator segments, the methods charset)
//! stay independently testable.

use crate::namespace::{Flag, Namespace};

/// First character of an identifier (scope, unscoped, generator segment,
/// instance id).
fn is_ident_first(b: u8) -> bool {
    b.is_ascii_lowercase() || b.is_ascii_digit() || b == b'-' || b == b'~'
}

/// Non-first identifier character.
fn is_ident(b: u8) -> bool {
    is_ident_first(b) || b == b'.' || b == b'_'
}

/// Semver constraint character. Deliberately permissive: comparison
/// operators, wildcards, and spaces all pass through verbatim. `+` is part
/// of this set, so a method list after a semver needs the `@` terminator.
fn is_semver(b: u8) -> bool {
    b.is_ascii_lowercase()
        || b.is_ascii_digit()
        || matches!(b, b'-' | b'.' | b'~' | b'>' | b'<' | b'+' | b'=' | b'^' | b'*' | b' ')
}

/// First character of a method token. Wider than identifiers: uppercase is
/// allowed.
fn is_method_first(b: u8) -> bool {
    b.is_ascii_alphanumeric()
}

/// Non-first method token character.
fn is_method(b: u8) -> bool {
    b.is_ascii_alphanumeric() || b == b'_'
}

struct Cursor<'a> {
    input: &'a str,
    pos: usize,
}

impl<'a> Cursor<'a> {
    fn new(input: &'a str) -> Self {
        Self { input, pos: 0 }
    }

    fn peek(&self) -> Option<u8> {
        self.input.as_bytes().get(self.pos).copied()
    }

    fn eat(&mut self, b: u8) -> bool {
        if self.peek() == Some(b) {
            self.pos += 1;
            true
        } else {
            false
        }
    }

    /// Consume the maximal run satisfying `pred`, returning the consumed
    /// slice. All predicates here match ASCII only, so slicing at `pos` is
    /// always on a char boundary.
    fn take_run(&mut self, pred: fn(u8) -> bool) -> &'a str {
        let start = self.pos;
        while self.peek().map_or(false, pred) {
            self.pos += 1;
        }
        &self.input[start..self.pos]
    }

    /// Consume one identifier: an ident-first character followed by ident
    /// characters. Empty when the next character cannot start one.
    fn take_ident(&mut self) -> &'a str {
        let start = self.pos;
        if self.peek().map_or(false, is_ident_first) {
            self.pos += 1;
            self.take_run(is_ident);
        }
        &self.input[start..self.pos]
    }

    fn done(&self) -> bool {
        self.pos == self.input.len()
    }
}

/// Scan a complete namespace string. Returns `None` when the input does not
/// match the grammar; any unconsumed trailing input is a mismatch.
pub(crate) fn scan(input: &str) -> Option<Namespace> {
    let mut cur = Cursor::new(input);

    // "@" scope "/" — the whole production or nothing. An input starting
    // with "@" that lacks the closing "/" cannot be anything else either,
    // since "@" never starts an unscoped name.
    let scope = if cur.eat(b'@') {
        let name = cur.take_ident();
        if name.is_empty() || !cur.eat(b'/') {
            return None;
        }
        Some(name.to_string())
    } else {
        None
    };

    let unscoped = cur.take_ident();
    if unscoped.is_empty() {
        return None;
    }

    // ":" generator — greedy chain of colon-delimited segments. A trailing
    // colon after a segment is consumed and preserved verbatim; an empty
    // capture leaves the field absent.
    let generator = if cur.eat(b':') {
        let start = cur.pos;
        while cur.peek().map_or(false, is_ident_first) {
            cur.take_ident();
            cur.eat(b':');
        }
        non_empty(&cur.input[start..cur.pos])
    } else {
        None
    };

    // "@" semver ["@"] — maximal run over the semver charset, optionally
    // closed by a bare "@" so trailing instance/method data stays
    // unambiguous.
    let semver = if cur.eat(b'@') {
        let run = cur.take_run(is_semver);
        let run = non_empty(run);
        cur.eat(b'@');
        run
    } else {
        None
    };

    // "#" instance — an identifier or the literal "*".
    let instance_id = if cur.eat(b'#') {
        if cur.eat(b'*') {
            Some("*".to_string())
        } else {
            let id = cur.take_ident();
            if id.is_empty() {
                return None;
            }
            Some(id.to_string())
        }
    } else {
        None
    };

    // "+" methods — "+"-delimited tokens; an empty capture is accepted and
    // leaves the field absent.
    let methods: Vec<String> = if cur.eat(b'+') {
        let start = cur.pos;
        while cur.peek().map_or(false, is_method_first) {
            cur.take_run(is_method);
            cur.eat(b'+');
        }
        cur.input[start..cur.pos]
            .split('+')
            .filter(|m| !m.is_empty())
            .map(String::from)
            .collect()
    } else {
        Vec::new()
    };

    let flag = if cur.eat(b'?') { Some(Flag::Optional) } else { None };

    if !cur.done() {
        return None;
    }

    Some(Namespace {
        scope,
        unscoped: unscoped.to_string(),
        generator,
        semver,
        instance_id,
        methods,
        flag,
    })
}

fn non_empty(s: &str) -> Option<String> {
    if s.is_empty() {
        None
    } else {
        Some(s.to_string())
    }
}
