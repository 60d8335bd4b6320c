//! Arena-based node storage for NFAs.
//!
//! Thompson construction produces a graph with shared nodes (both arms of
//! a union fan into one end node) and cycles (`*` and `+` add back edges).
//! Nodes are therefore stored in a flat arena and reference each other by
//! `StateId`, which is just an index and can be copied freely.
//!
//! ## Example: `a*`
//!
//! ```text
//!           ε            a            ε
//!  start ──────> s_a ───────> e_a ──────> end
//!    │            ^            │
//!    │            ╰─────ε──────╯
//!    ╰───────────────ε────────────────────^
//! ```

use smallvec::SmallVec;

use super::byte_set::ByteSet;

/// A node identifier - just an index into the arena.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Debug)]
pub struct StateId(u32);

impl StateId {
    #[inline]
    pub fn index(self) -> usize {
        self.0 as usize
    }

    #[inline]
    pub(crate) fn from_index(index: usize) -> Self {
        StateId(index as u32)
    }
}

/// What a node's outgoing edges mean.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum EdgeType {
    /// Every successor is reachable without consuming input.
    Epsilon,
    /// No outgoing semantics yet. Fresh nodes and fragment ends.
    #[default]
    Empty,
    /// The single successor is reached by consuming a byte in `edge`.
    CharacterClass,
}

/// Anchors a pattern was built under, as a 2-bit flag set.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct Anchor(u8);

impl Anchor {
    pub const NONE: Anchor = Anchor(0);
    /// `^`: the pattern must follow a `\n`.
    pub const START: Anchor = Anchor(0b01);
    /// `$`: the pattern must be followed by `\n` or `\r`.
    pub const END: Anchor = Anchor(0b10);

    #[inline]
    pub fn contains(self, other: Anchor) -> bool {
        self.0 & other.0 == other.0
    }

    #[inline]
    pub fn insert(&mut self, other: Anchor) {
        self.0 |= other.0;
    }

    #[inline]
    pub fn is_empty(self) -> bool {
        self.0 == 0
    }

    #[inline]
    pub fn bits(self) -> u8 {
        self.0
    }
}

/// A node in the NFA graph.
#[derive(Clone, Debug, Default)]
pub struct NfaNode {
    pub edge_type: EdgeType,
    /// Bytes consumed by the outgoing edge; only meaningful for `CharacterClass`.
    pub edge: ByteSet,
    /// Epsilon nodes: 0-2 free transitions. Character-class nodes: exactly one.
    pub next: SmallVec<[StateId; 2]>,
    pub is_accepting: bool,
    /// Action tag captured after the pattern body. Empty when none was given.
    pub accept_string: String,
    pub anchor: Anchor,
}

impl NfaNode {
    pub fn new() -> Self {
        Self::default()
    }

    /// A node consuming one byte of `edge` and moving to `next`.
    pub fn character_class(edge: ByteSet, next: StateId) -> Self {
        let mut node = Self {
            edge_type: EdgeType::CharacterClass,
            edge,
            ..Self::default()
        };
        node.next.push(next);
        node
    }

    /// A node with free transitions to every state in `next`.
    pub fn epsilon(next: &[StateId]) -> Self {
        Self {
            edge_type: EdgeType::Epsilon,
            next: SmallVec::from_slice(next),
            ..Self::default()
        }
    }

    /// The destination of a character-class node.
    #[inline]
    pub fn class_target(&self) -> Option<StateId> {
        match self.edge_type {
            EdgeType::CharacterClass => self.next.last().copied(),
            _ => None,
        }
    }

    /// Successors reachable without consuming input.
    #[inline]
    pub fn epsilons(&self) -> &[StateId] {
        match self.edge_type {
            EdgeType::Epsilon => &self.next,
            _ => &[],
        }
    }
}

/// Arena for allocating NFA nodes.
///
/// Nodes are never freed individually; the arena owns all of them and
/// drops them together.
#[derive(Clone, Default)]
pub struct StateArena {
    nodes: Vec<NfaNode>,
}

impl std::fmt::Debug for StateArena {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StateArena")
            .field("nodes_count", &self.nodes.len())
            .finish()
    }
}

impl StateArena {
    pub fn new() -> Self {
        Self { nodes: Vec::new() }
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            nodes: Vec::with_capacity(capacity),
        }
    }

    /// Allocate a fresh `Empty` node, returning its ID.
    pub fn alloc(&mut self) -> StateId {
        self.alloc_node(NfaNode::new())
    }

    pub fn alloc_node(&mut self, node: NfaNode) -> StateId {
        let id = StateId::from_index(self.nodes.len());
        self.nodes.push(node);
        id
    }

    #[inline]
    pub fn get(&self, id: StateId) -> Option<&NfaNode> {
        self.nodes.get(id.index())
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (StateId, &NfaNode)> {
        self.nodes
            .iter()
            .enumerate()
            .map(|(i, node)| (StateId::from_index(i), node))
    }
}

impl std::ops::Index<StateId> for StateArena {
    type Output = NfaNode;

    #[inline]
    fn index(&self, id: StateId) -> &Self::Output {
        &self.nodes[id.index()]
    }
}

impl std::ops::IndexMut<StateId> for StateArena {
    #[inline]
    fn index_mut(&mut self, id: StateId) -> &mut Self::Output {
        &mut self.nodes[id.index()]
    }
}

/// A completed NFA: the arena plus its designated start and end nodes.
///
/// Only the parser and `from_parts` produce one, so `start` and `end` always
/// refer to nodes of `states`.
#[derive(Clone, Debug)]
pub struct Nfa {
    states: StateArena,
    start: StateId,
    end: StateId,
}

impl Nfa {
    /// Assemble an NFA from a hand-built arena.
    ///
    /// Returns `None` if either endpoint or any successor is not a node of
    /// `states`, or if a character-class node does not have exactly one
    /// successor.
    pub fn from_parts(states: StateArena, start: StateId, end: StateId) -> Option<Self> {
        if states.get(start).is_none() || states.get(end).is_none() {
            return None;
        }
        for (_, node) in states.iter() {
            if node.next.iter().any(|succ| succ.index() >= states.len()) {
                return None;
            }
            if node.edge_type == EdgeType::CharacterClass && node.next.len() != 1 {
                return None;
            }
        }
        Some(Self { states, start, end })
    }

    /// Wrap the arena of a finished parse. `start` and `end` were allocated
    /// in `states`.
    pub(crate) fn from_fragment(states: StateArena, start: StateId, end: StateId) -> Self {
        debug_assert!(states.get(start).is_some() && states.get(end).is_some());
        Self { states, start, end }
    }

    #[inline]
    pub fn start(&self) -> StateId {
        self.start
    }

    #[inline]
    pub fn end(&self) -> StateId {
        self.end
    }

    #[inline]
    pub fn states(&self) -> &StateArena {
        &self.states
    }

    /// The node at `id`. Panics if `id` did not come from this NFA.
    #[inline]
    pub fn node(&self, id: StateId) -> &NfaNode {
        &self.states[id]
    }

    /// The accepting end node.
    pub fn end_node(&self) -> &NfaNode {
        &self.states[self.end]
    }

    pub fn len(&self) -> usize {
        self.states.len()
    }

    pub fn is_empty(&self) -> bool {
        self.states.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_arena_alloc() {
        let mut arena = StateArena::new();
        let id1 = arena.alloc();
        let id2 = arena.alloc();

        assert_eq!(id1.index(), 0);
        assert_eq!(id2.index(), 1);
        assert_eq!(arena.len(), 2);
        assert_eq!(arena[id1].edge_type, EdgeType::Empty);
    }

    #[test]
    fn test_arena_cyclic_reference() {
        let mut arena = StateArena::new();

        let state_a = arena.alloc();
        let state_b = arena.alloc();
        arena[state_a] = NfaNode::epsilon(&[state_b]);
        arena[state_b] = NfaNode::epsilon(&[state_a]);

        assert_eq!(arena[state_a].epsilons(), &[state_b]);
        assert_eq!(arena[state_b].epsilons(), &[state_a]);
    }

    #[test]
    fn test_class_target_only_for_character_class() {
        let mut arena = StateArena::new();
        let end = arena.alloc();
        let class = arena.alloc_node(NfaNode::character_class(ByteSet::single(b'x'), end));
        let eps = arena.alloc_node(NfaNode::epsilon(&[end]));

        assert_eq!(arena[class].class_target(), Some(end));
        assert!(arena[class].epsilons().is_empty());
        assert_eq!(arena[eps].class_target(), None);
    }

    #[test]
    fn test_anchor_flags() {
        let mut anchor = Anchor::NONE;
        assert!(anchor.is_empty());
        anchor.insert(Anchor::END);
        assert!(anchor.contains(Anchor::END));
        assert!(!anchor.contains(Anchor::START));
        anchor.insert(Anchor::START);
        assert_eq!(anchor.bits(), 0b11);
    }

    #[test]
    fn test_from_parts_rejects_foreign_ids() {
        let mut arena = StateArena::new();
        let only = arena.alloc();
        assert!(Nfa::from_parts(arena.clone(), only, StateId::from_index(5)).is_none());
        assert!(Nfa::from_parts(arena, only, only).is_some());
    }

    #[test]
    fn test_from_parts_rejects_dangling_successor() {
        let mut arena = StateArena::new();
        let a = arena.alloc_node(NfaNode::epsilon(&[StateId::from_index(7)]));
        assert!(Nfa::from_parts(arena, a, a).is_none());

        let mut arena = StateArena::new();
        let end = arena.alloc();
        let class = arena.alloc_node(NfaNode::character_class(
            ByteSet::single(b'a'),
            StateId::from_index(9),
        ));
        assert!(Nfa::from_parts(arena, class, end).is_none());
    }

    #[test]
    fn test_from_parts_requires_single_class_successor() {
        let mut arena = StateArena::new();
        let end = arena.alloc();
        let mut none = NfaNode::character_class(ByteSet::single(b'a'), end);
        none.next.clear();
        let start = arena.alloc_node(none);
        assert!(Nfa::from_parts(arena, start, end).is_none());

        let mut arena = StateArena::new();
        let end = arena.alloc();
        let mut two = NfaNode::character_class(ByteSet::single(b'a'), end);
        two.next.push(end);
        let start = arena.alloc_node(two);
        assert!(Nfa::from_parts(arena, start, end).is_none());

        let mut arena = StateArena::new();
        let end = arena.alloc();
        let start = arena.alloc_node(NfaNode::character_class(ByteSet::single(b'a'), end));
        assert!(Nfa::from_parts(arena, start, end).is_some());
    }
}
