//! NFA/DFA traversal functions.
//!
//! Executing automata is not what this crate is for, but both walks are
//! needed to check that a constructed DFA recognizes what its NFA does:
//! - `traverse_dfa`: deterministic walk, one table lookup per byte
//! - `traverse_nfa`: direct simulation over sets of NFA nodes

use super::arena::Nfa;
use super::sparse_set::StateSet;
use super::subset::{move_closure, ClosureBuffers, Dfa, DfaStateId};

/// Walk `input` through the DFA from its start state.
///
/// Returns the state reached after the last byte, or `None` if some byte had
/// no transition.
#[inline]
pub fn traverse_dfa(dfa: &Dfa, input: &[u8]) -> Option<DfaStateId> {
    let mut current = dfa.start();
    for &byte in input {
        current = dfa.state(current).next(byte)?;
    }
    Some(current)
}

/// Simulate the NFA on the whole of `input`.
///
/// Returns the accept string if the NFA can be in an accepting node after
/// consuming every byte.
pub fn traverse_nfa(nfa: &Nfa, input: &[u8]) -> Option<String> {
    let mut bufs = ClosureBuffers::new(nfa);
    let mut moved = StateSet::new(nfa.len());

    let mut current = bufs.epsilon_closure(nfa, [nfa.start()]);
    for &byte in input {
        move_closure(nfa, &current.identifier, byte, &mut moved);
        if moved.is_empty() {
            return None;
        }
        current = bufs.epsilon_closure(nfa, moved.to_sorted().iter().copied());
    }
    current.accept
}
