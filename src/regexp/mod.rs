//! Regexp parsing and Thompson NFA construction.
//!
//! Supported syntax:
//! - literal bytes (no escape character)
//! - `.` any printable byte
//! - `[...]` classes with `a-z` ranges, `[^...]` pre-filled with `.`
//! - `|` alternation, `(...)` grouping
//! - `*`, `+`, `?` closures
//! - `^` / `$` anchors at the very start / end of the pattern
//!
//! Text after the first whitespace byte is the accept string.

mod nfa;
mod parser;

pub use nfa::{
    make_class_fragment, make_closure, make_concatenation, make_end_anchor, make_start_anchor,
    make_union, Fragment, Repetition,
};
pub use parser::{parse_regexp, RegexpError, RegexpErrorKind, MAX_NESTING_DEPTH};

#[cfg(test)]
mod tests {
    use super::*;
    use crate::automaton::{make_dfa, traverse_nfa, EdgeType};

    #[test]
    fn test_parse_simple() {
        let nfa = parse_regexp("abc").unwrap();
        assert_eq!(traverse_nfa(&nfa, b"abc").as_deref(), Some(""));
        assert_eq!(traverse_nfa(&nfa, b"ab"), None);
        assert_eq!(traverse_nfa(&nfa, b"abcd"), None);
    }

    #[test]
    fn test_parse_alternation() {
        let nfa = parse_regexp("ab|cd PAIR").unwrap();
        assert_eq!(nfa.node(nfa.start()).edge_type, EdgeType::Epsilon);
        assert_eq!(traverse_nfa(&nfa, b"ab").as_deref(), Some("PAIR"));
        assert_eq!(traverse_nfa(&nfa, b"cd").as_deref(), Some("PAIR"));
        assert_eq!(traverse_nfa(&nfa, b"ad"), None);
    }

    #[test]
    fn test_alternation_binds_looser_than_concatenation() {
        let nfa = parse_regexp("a|bc").unwrap();
        assert!(traverse_nfa(&nfa, b"a").is_some());
        assert!(traverse_nfa(&nfa, b"bc").is_some());
        assert!(traverse_nfa(&nfa, b"ac").is_none());
    }

    #[test]
    fn test_parse_group() {
        let nfa = parse_regexp("(a|b)c").unwrap();
        assert!(traverse_nfa(&nfa, b"ac").is_some());
        assert!(traverse_nfa(&nfa, b"bc").is_some());
        assert!(traverse_nfa(&nfa, b"c").is_none());
    }

    #[test]
    fn test_parse_quantifiers() {
        let star = parse_regexp("ab*").unwrap();
        let inputs: [&[u8]; 3] = [b"a", b"ab", b"abbbb"];
        for input in inputs {
            assert!(traverse_nfa(&star, input).is_some(), "{:?}", input);
        }

        let plus = parse_regexp("ab+").unwrap();
        assert!(traverse_nfa(&plus, b"a").is_none());
        assert!(traverse_nfa(&plus, b"abb").is_some());

        let optional = parse_regexp("ab?c").unwrap();
        assert!(traverse_nfa(&optional, b"ac").is_some());
        assert!(traverse_nfa(&optional, b"abc").is_some());
        assert!(traverse_nfa(&optional, b"abbc").is_none());
    }

    #[test]
    fn test_quantifier_applies_to_group() {
        let nfa = parse_regexp("(ab)+").unwrap();
        assert!(traverse_nfa(&nfa, b"abab").is_some());
        assert!(traverse_nfa(&nfa, b"aba").is_none());
    }

    #[test]
    fn test_parse_dot() {
        let nfa = parse_regexp("a.b").unwrap();
        assert!(traverse_nfa(&nfa, b"a-b").is_some());
        assert!(traverse_nfa(&nfa, b"a\x7fb").is_some());
        assert!(traverse_nfa(&nfa, b"a\nb").is_none());
        assert!(traverse_nfa(&nfa, b"a\rb").is_none());
        assert!(traverse_nfa(&nfa, b"a\x00b").is_none());
    }

    #[test]
    fn test_anchored_pattern() {
        let nfa = parse_regexp("^ab$ LINE").unwrap();
        assert_eq!(traverse_nfa(&nfa, b"\nab\n").as_deref(), Some("LINE"));
        assert_eq!(traverse_nfa(&nfa, b"\nab\r").as_deref(), Some("LINE"));
        assert_eq!(traverse_nfa(&nfa, b"ab"), None);
    }

    #[test]
    fn test_parse_then_convert() {
        let nfa = parse_regexp("[0-9]+ NUMBER").unwrap();
        let dfa = make_dfa(&nfa);
        assert_eq!(dfa.accepts(b"2024"), Some("NUMBER"));
        assert_eq!(dfa.accepts(b""), None);
        assert_eq!(dfa.accepts(b"12a"), None);
    }

    #[test]
    fn test_parse_invalid_unclosed_bracket() {
        let result = parse_regexp("[invalid");
        assert!(result.is_err(), "Unclosed bracket should fail parsing");
    }
}
