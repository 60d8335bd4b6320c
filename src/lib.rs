//! lexfa: regular expressions to DFAs for scanner generators
//!
//! A pattern line is a regexp body, optional whitespace, and an accept
//! string naming what the pattern recognizes:
//!
//! ```
//! let nfa = lexfa::build_nfa("[0-9]+ NUMBER").unwrap();
//! let dfa = lexfa::build_dfa(&nfa);
//!
//! assert_eq!(dfa.accepts(b"42"), Some("NUMBER"));
//! assert_eq!(dfa.accepts(b"4a"), None);
//! ```
//!
//! Building goes through two stages:
//! - `regexp`: a recursive-descent parser that emits Thompson NFA fragments
//! - `automaton`: the NFA arena and subset construction of the DFA

pub mod automaton;
pub mod regexp;

use log::debug;

pub use automaton::{make_dfa, traverse_dfa, traverse_nfa, Dfa, DfaState, DfaStateId, Nfa};
pub use regexp::{parse_regexp, RegexpError, RegexpErrorKind};

/// Parse a pattern line into an NFA whose end node is accepting and carries
/// the accept string.
pub fn build_nfa(pattern: &str) -> Result<Nfa, RegexpError> {
    match parse_regexp(pattern) {
        Ok(nfa) => {
            debug!("parsed {:?} into NFA with {} nodes", pattern, nfa.len());
            Ok(nfa)
        }
        Err(err) => {
            debug!("rejected pattern {:?}: {}", pattern, err);
            Err(err)
        }
    }
}

/// Convert an NFA into an equivalent DFA over bytes 0..=127.
pub fn build_dfa(nfa: &Nfa) -> Dfa {
    make_dfa(nfa)
}
