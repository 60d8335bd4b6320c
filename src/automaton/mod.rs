//! Finite automata over the 7-bit byte alphabet.
//!
//! The key components are:
//!
//! - `StateArena` / `Nfa`: NFA nodes stored by index, so cycles and shared
//!   ends need no reference counting
//! - `ByteSet`: the set of bytes a character-class edge consumes
//! - `Dfa`: states built by subset construction, each with a packed
//!   `SmallTable` of transitions
//!
//! # Module Organization
//!
//! - `arena`: NFA node storage and the `Nfa` handle
//! - `byte_set`: 128-bit byte sets and alphabet constants
//! - `sparse_set`: visited-set used by the closure computations
//! - `small_table`: ceilings/steps transition table
//! - `subset`: epsilon-closure, move-closure and `make_dfa`
//! - `nfa`: NFA/DFA traversal functions

mod arena;
mod byte_set;
mod nfa;
mod small_table;
mod sparse_set;
mod subset;

pub use arena::{Anchor, EdgeType, Nfa, NfaNode, StateArena, StateId};
pub use byte_set::{ByteSet, ALPHABET_SIZE, CONTROL_RANGE_HI, CONTROL_RANGE_LO};
pub use nfa::{traverse_dfa, traverse_nfa};
pub use small_table::{SmallTable, UnpackedTable};
pub use sparse_set::StateSet;
pub use subset::{make_dfa, Dfa, DfaState, DfaStateId};
