//! Thompson construction of NFA fragments.
//!
//! Every grammar rule yields a `Fragment`: a start node and an end node in
//! a shared `StateArena`. The end node is always `Empty` until something
//! is attached after it. Composition rewires those ends:
//!
//! - union: new epsilon start fans into both operands, both ends fan into
//!   a new shared end
//! - concatenation: the left end node takes over the right start node's
//!   content (no extra epsilon edge)
//! - closure: new epsilon start/end bracket the operand, plus bypass and
//!   back edges depending on the operator

use crate::automaton::{ByteSet, EdgeType, NfaNode, StateArena, StateId};

/// A partially built NFA: its entry and exit nodes.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Fragment {
    pub start: StateId,
    pub end: StateId,
}

/// The three closure operators.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Repetition {
    /// `*`: zero or more
    Star,
    /// `+`: one or more
    Plus,
    /// `?`: zero or one
    Question,
}

impl Repetition {
    pub fn from_byte(b: u8) -> Option<Self> {
        match b {
            b'*' => Some(Repetition::Star),
            b'+' => Some(Repetition::Plus),
            b'?' => Some(Repetition::Question),
            _ => None,
        }
    }

    fn allows_zero(self) -> bool {
        matches!(self, Repetition::Star | Repetition::Question)
    }

    fn allows_repeat(self) -> bool {
        matches!(self, Repetition::Star | Repetition::Plus)
    }
}

/// One byte out of `edge`: `start --edge--> end`.
pub fn make_class_fragment(arena: &mut StateArena, edge: ByteSet) -> Fragment {
    let end = arena.alloc();
    let start = arena.alloc_node(NfaNode::character_class(edge, end));
    Fragment { start, end }
}

/// `a | b`
pub fn make_union(arena: &mut StateArena, a: Fragment, b: Fragment) -> Fragment {
    let start = arena.alloc_node(NfaNode::epsilon(&[a.start, b.start]));
    let end = arena.alloc();
    for arm_end in [a.end, b.end] {
        let node = &mut arena[arm_end];
        node.edge_type = EdgeType::Epsilon;
        node.next.push(end);
    }
    Fragment { start, end }
}

/// `lhs rhs`
///
/// The content of `rhs.start` (edge type, edge set and successors) is copied
/// over `lhs.end`. Edges already pointing at `lhs.end` now lead straight into
/// the right operand. `rhs.start` itself is left behind unreferenced.
pub fn make_concatenation(arena: &mut StateArena, lhs: Fragment, rhs: Fragment) -> Fragment {
    arena[lhs.end] = arena[rhs.start].clone();
    Fragment {
        start: lhs.start,
        end: rhs.end,
    }
}

/// `operand*`, `operand+` or `operand?`
pub fn make_closure(arena: &mut StateArena, operand: Fragment, rep: Repetition) -> Fragment {
    let end = arena.alloc();
    let mut start = NfaNode::epsilon(&[operand.start]);
    if rep.allows_zero() {
        start.next.push(end);
    }
    let start = arena.alloc_node(start);

    let inner_end = &mut arena[operand.end];
    inner_end.edge_type = EdgeType::Epsilon;
    inner_end.next.push(end);
    if rep.allows_repeat() {
        inner_end.next.push(operand.start);
    }

    Fragment { start, end }
}

/// `^body`: a `\n` must be consumed before `body` starts.
pub fn make_start_anchor(arena: &mut StateArena, body: Fragment) -> Fragment {
    let start = arena.alloc_node(NfaNode::character_class(ByteSet::single(b'\n'), body.start));
    Fragment {
        start,
        end: body.end,
    }
}

/// `body$`: a `\n` or `\r` must be consumed after `body` ends.
pub fn make_end_anchor(arena: &mut StateArena, body: Fragment) -> Fragment {
    let end = arena.alloc();
    let node = &mut arena[body.end];
    node.edge_type = EdgeType::CharacterClass;
    node.edge.insert(b'\n');
    node.edge.insert(b'\r');
    node.next.push(end);
    Fragment {
        start: body.start,
        end,
    }
}
