//! NFA to DFA conversion by subset construction.
//!
//! Each DFA state stands for the set of NFA nodes the NFA could be in at
//! the same time. Starting from the epsilon-closure of the NFA start node,
//! every unmarked DFA state is expanded once per alphabet byte:
//!
//! 1. move-closure: the targets of all character-class nodes in the state
//!    whose edge contains the byte
//! 2. epsilon-closure of those targets
//! 3. look the resulting set up among existing states (set equality), and
//!    add it as a new unmarked state if it is not there yet
//!
//! The loop ends when every state is marked. There are at most
//! 2^|NFA nodes| distinct sets, so it always terminates.

use std::fmt;

use log::{debug, trace};
use rustc_hash::FxHashMap;

use super::arena::{EdgeType, Nfa, StateId};
use super::byte_set::ALPHABET_SIZE;
use super::small_table::{SmallTable, UnpackedTable};
use super::sparse_set::StateSet;

/// Index of a state in a `Dfa`.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Debug)]
pub struct DfaStateId(u32);

impl DfaStateId {
    #[inline]
    pub fn index(self) -> usize {
        self.0 as usize
    }

    #[inline]
    pub(crate) fn from_index(index: usize) -> Self {
        DfaStateId(index as u32)
    }
}

/// A state of the DFA.
#[derive(Clone, Debug)]
pub struct DfaState {
    /// NFA nodes this state represents, sorted by id.
    identifier: Box<[StateId]>,
    marked: bool,
    table: SmallTable,
    is_accepting: bool,
    accept_string: String,
}

impl DfaState {
    fn from_closure(closure: Closure) -> Self {
        let (is_accepting, accept_string) = match closure.accept {
            Some(s) => (true, s),
            None => (false, String::new()),
        };
        Self {
            identifier: closure.identifier,
            marked: false,
            table: SmallTable::new(),
            is_accepting,
            accept_string,
        }
    }

    pub fn identifier(&self) -> &[StateId] {
        &self.identifier
    }

    /// True once the outgoing transitions have been computed.
    pub fn is_marked(&self) -> bool {
        self.marked
    }

    pub fn is_accepting(&self) -> bool {
        self.is_accepting
    }

    /// Accept string of the accepting NFA node that won the closure.
    pub fn accept_string(&self) -> &str {
        &self.accept_string
    }

    #[inline]
    pub fn next(&self, byte: u8) -> Option<DfaStateId> {
        self.table.dstep(byte)
    }

    pub fn table(&self) -> &SmallTable {
        &self.table
    }

    /// `(byte, target)` for every outgoing transition, ascending by byte.
    pub fn transitions(&self) -> impl Iterator<Item = (u8, DfaStateId)> + '_ {
        self.table.iter()
    }
}

/// A deterministic automaton built from one NFA.
#[derive(Clone, Debug)]
pub struct Dfa {
    states: Vec<DfaState>,
}

impl Dfa {
    /// The state for the epsilon-closure of the NFA start node.
    #[inline]
    pub fn start(&self) -> DfaStateId {
        DfaStateId(0)
    }

    #[inline]
    pub fn state(&self, id: DfaStateId) -> &DfaState {
        &self.states[id.index()]
    }

    pub fn states(&self) -> impl Iterator<Item = (DfaStateId, &DfaState)> {
        self.states
            .iter()
            .enumerate()
            .map(|(i, state)| (DfaStateId::from_index(i), state))
    }

    pub fn len(&self) -> usize {
        self.states.len()
    }

    pub fn is_empty(&self) -> bool {
        self.states.is_empty()
    }

    /// Find the state whose identifier equals `nodes` as a set.
    pub fn find(&self, nodes: &[StateId]) -> Option<DfaStateId> {
        let mut wanted = nodes.to_vec();
        wanted.sort_unstable();
        wanted.dedup();
        self.states()
            .find(|(_, state)| *state.identifier == *wanted)
            .map(|(id, _)| id)
    }

    /// Run the whole of `input` and return the accept string if the DFA ends
    /// in an accepting state.
    pub fn accepts(&self, input: &[u8]) -> Option<&str> {
        let end = super::nfa::traverse_dfa(self, input)?;
        let state = self.state(end);
        state.is_accepting.then_some(state.accept_string.as_str())
    }

    pub fn transition_count(&self) -> usize {
        self.states.iter().map(|s| s.table.transition_count()).sum()
    }

    fn push(&mut self, state: DfaState) -> DfaStateId {
        let id = DfaStateId::from_index(self.states.len());
        self.states.push(state);
        id
    }
}

impl fmt::Display for Dfa {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (id, state) in self.states() {
            let marker = if state.is_accepting { "*" } else { " " };
            write!(f, "{}{:>4}", marker, id.index())?;
            if state.is_accepting && !state.accept_string.is_empty() {
                write!(f, " <{}>", state.accept_string)?;
            }
            writeln!(f)?;
            for (byte, target) in state.transitions() {
                writeln!(f, "      {:?} -> {}", byte as char, target.index())?;
            }
        }
        Ok(())
    }
}

/// Result of an epsilon-closure.
#[derive(Debug)]
pub(crate) struct Closure {
    pub identifier: Box<[StateId]>,
    /// Accept string of the last accepting node visited, if any.
    pub accept: Option<String>,
}

/// Scratch space shared by every closure computed over one NFA.
pub(crate) struct ClosureBuffers {
    stack: Vec<StateId>,
    seen: StateSet,
}

impl ClosureBuffers {
    pub fn new(nfa: &Nfa) -> Self {
        Self {
            stack: Vec::with_capacity(16),
            seen: StateSet::new(nfa.len()),
        }
    }

    /// Every node reachable from `seeds` through epsilon edges, seeds
    /// included.
    ///
    /// Seeds are pushed in the order given and popped from a stack. When
    /// several accepting nodes are visited, the last one popped decides the
    /// accept string.
    pub fn epsilon_closure(
        &mut self,
        nfa: &Nfa,
        seeds: impl IntoIterator<Item = StateId>,
    ) -> Closure {
        self.stack.clear();
        self.seen.clear();
        for id in seeds {
            if self.seen.insert(id) {
                self.stack.push(id);
            }
        }

        let mut winner = None;
        while let Some(id) = self.stack.pop() {
            let node = nfa.node(id);
            if node.is_accepting {
                winner = Some(id);
            }
            for &succ in node.epsilons() {
                if self.seen.insert(succ) {
                    self.stack.push(succ);
                }
            }
        }

        Closure {
            identifier: self.seen.to_sorted(),
            accept: winner.map(|id| nfa.node(id).accept_string.clone()),
        }
    }
}

/// Collect into `out` the target of every character-class node in `nodes`
/// whose edge contains `byte`.
pub(crate) fn move_closure(nfa: &Nfa, nodes: &[StateId], byte: u8, out: &mut StateSet) {
    out.clear();
    for &id in nodes {
        let node = nfa.node(id);
        if node.edge_type == EdgeType::CharacterClass && node.edge.contains(byte) {
            if let Some(target) = node.class_target() {
                out.insert(target);
            }
        }
    }
}

/// Convert an NFA into a DFA by subset construction.
pub fn make_dfa(nfa: &Nfa) -> Dfa {
    let mut bufs = ClosureBuffers::new(nfa);
    let mut moved = StateSet::new(nfa.len());
    let mut dfa = Dfa { states: Vec::new() };
    let mut known: FxHashMap<Box<[StateId]>, DfaStateId> = FxHashMap::default();
    let mut unmarked = Vec::new();

    let start = bufs.epsilon_closure(nfa, [nfa.start()]);
    known.insert(start.identifier.clone(), DfaStateId(0));
    unmarked.push(dfa.push(DfaState::from_closure(start)));

    while let Some(current) = unmarked.pop() {
        dfa.states[current.index()].marked = true;
        let mut unpacked: UnpackedTable = [None; ALPHABET_SIZE];

        for byte in 0..ALPHABET_SIZE as u8 {
            move_closure(nfa, &dfa.states[current.index()].identifier, byte, &mut moved);
            if moved.is_empty() {
                continue;
            }
            let closure = bufs.epsilon_closure(nfa, moved.to_sorted().iter().copied());
            let target = match known.get(&closure.identifier) {
                Some(&existing) => existing,
                None => {
                    let key = closure.identifier.clone();
                    let id = dfa.push(DfaState::from_closure(closure));
                    known.insert(key, id);
                    unmarked.push(id);
                    id
                }
            };
            unpacked[byte as usize] = Some(target);
        }

        let state = &mut dfa.states[current.index()];
        state.table = SmallTable::from_unpacked(&unpacked);
        trace!(
            "marked DFA state {} ({} NFA nodes, {} transitions, accepting: {})",
            current.index(),
            state.identifier.len(),
            state.table.transition_count(),
            state.is_accepting
        );
    }

    debug!(
        "built DFA with {} states from NFA with {} nodes",
        dfa.len(),
        nfa.len()
    );
    dfa
}
