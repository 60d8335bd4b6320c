//! Regexp parsing straight into NFA fragments.
//!
//! Grammar, one rule per function below:
//!
//! ```text
//! expression    := ['^'] union ['$']
//! union         := concatenation ('|' concatenation)*
//! concatenation := closure+
//! closure       := atom ['*' | '+' | '?']
//! atom          := literal | '.' | '[' class ']' | '(' union ')'
//! class         := ['^'] classitem*
//! classitem     := char | char '-' char
//! ```
//!
//! The tokenizer reads one byte per token with a single token of
//! lookahead. There is no escape character. The first whitespace byte ends
//! the pattern body; the text after it (leading whitespace skipped) becomes
//! the accept string of the NFA's end node.

use std::fmt;

use crate::automaton::{Anchor, ByteSet, Nfa, StateArena};

use super::nfa::{
    make_class_fragment, make_closure, make_concatenation, make_end_anchor, make_start_anchor,
    make_union, Fragment, Repetition,
};

/// Deepest group nesting accepted. Each level costs several stack frames
/// of recursive descent.
pub const MAX_NESTING_DEPTH: usize = 256;

/// Token classes. Every byte not listed here is a `Literal`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Token {
    Literal,
    EndOfInput,
    Pipe,
    Caret,
    Dollar,
    LeftBracket,
    RightBracket,
    Hyphen,
    LeftParen,
    RightParen,
    Period,
    LeftBrace,
    RightBrace,
    Asterisk,
    Plus,
    Question,
}

impl Token {
    fn classify(b: u8) -> Token {
        match b {
            b'|' => Token::Pipe,
            b'.' => Token::Period,
            b'^' => Token::Caret,
            b'$' => Token::Dollar,
            b']' => Token::RightBracket,
            b'[' => Token::LeftBracket,
            b'}' => Token::RightBrace,
            b')' => Token::RightParen,
            b'{' => Token::LeftBrace,
            b'(' => Token::LeftParen,
            b'*' => Token::Asterisk,
            b'-' => Token::Hyphen,
            b'?' => Token::Question,
            b'+' => Token::Plus,
            _ => Token::Literal,
        }
    }
}

/// The whitespace set of C's `isspace`: space, `\t`, `\n`, `\v`, `\f`, `\r`.
fn is_space(b: u8) -> bool {
    matches!(b, b' ' | b'\t' | b'\n' | 0x0B | 0x0C | b'\r')
}

/// What went wrong while parsing a pattern.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RegexpErrorKind {
    /// `*`, `+` or `?` with no atom in front of it.
    MisplacedQuantifier,
    /// `^` anywhere but the start of the pattern or of a bracket.
    MisplacedCaret,
    /// `]` outside a bracket.
    UnmatchedRightBracket,
    /// `(` never closed.
    UnmatchedLeftParen,
    /// `)` with no `(` to close.
    UnmatchedRightParen,
    /// `$` followed by more pattern text.
    MisplacedDollar,
    /// `[` never closed before the end of the pattern body.
    UnclosedBracket,
    /// Nothing to match: an empty pattern, alternative or group.
    MissingExpression,
    /// A pattern byte above 127.
    NonAscii(u8),
    /// Groups nested deeper than `MAX_NESTING_DEPTH`.
    NestingTooDeep,
}

impl fmt::Display for RegexpErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RegexpErrorKind::MisplacedQuantifier => {
                write!(f, "encountered a *, +, or ? operator in an invalid position")
            }
            RegexpErrorKind::MisplacedCaret => {
                write!(f, "encountered a ^ operator in an invalid position")
            }
            RegexpErrorKind::UnmatchedRightBracket => write!(f, "encountered a mismatched ] symbol"),
            RegexpErrorKind::UnmatchedLeftParen => write!(f, "mismatched ( symbol"),
            RegexpErrorKind::UnmatchedRightParen => write!(f, "mismatched ) symbol"),
            RegexpErrorKind::MisplacedDollar => {
                write!(f, "encountered a $ operator before the end of the pattern")
            }
            RegexpErrorKind::UnclosedBracket => write!(f, "unclosed character class"),
            RegexpErrorKind::MissingExpression => write!(f, "expected an expression"),
            RegexpErrorKind::NonAscii(b) => write!(f, "byte {:#04x} is not 7-bit ASCII", b),
            RegexpErrorKind::NestingTooDeep => {
                write!(f, "groups nested deeper than {}", MAX_NESTING_DEPTH)
            }
        }
    }
}

/// Error type for regexp parsing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RegexpError {
    pub kind: RegexpErrorKind,
    /// Byte offset into the pattern.
    pub offset: usize,
}

impl fmt::Display for RegexpError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} at offset {}", self.kind, self.offset)
    }
}

impl std::error::Error for RegexpError {}

/// Parser state: the input, the lookahead token and the arena fragments are
/// allocated in.
struct RegexpParse<'a> {
    pattern: &'a str,
    /// Next unread byte.
    index: usize,
    token: Token,
    lexeme: u8,
    /// Where the lookahead token starts.
    token_offset: usize,
    arena: StateArena,
    /// Open groups around the lookahead token.
    depth: usize,
}

impl<'a> RegexpParse<'a> {
    fn new(pattern: &'a str) -> Self {
        Self {
            pattern,
            index: 0,
            token: Token::EndOfInput,
            lexeme: 0,
            token_offset: 0,
            arena: StateArena::with_capacity(pattern.len() * 2 + 4),
            depth: 0,
        }
    }

    /// Read the next token. End of input and whitespace both yield
    /// `EndOfInput` without consuming anything.
    fn advance(&mut self) -> Result<(), RegexpError> {
        let bytes = self.pattern.as_bytes();
        self.token_offset = self.index;
        match bytes.get(self.index) {
            None => {
                self.token = Token::EndOfInput;
                self.lexeme = 0;
            }
            Some(&b) if is_space(b) => {
                self.token = Token::EndOfInput;
                self.lexeme = 0;
            }
            Some(&b) if !b.is_ascii() => {
                return Err(self.error(RegexpErrorKind::NonAscii(b)));
            }
            Some(&b) => {
                self.token = Token::classify(b);
                self.lexeme = b;
                self.index += 1;
            }
        }
        Ok(())
    }

    fn error(&self, kind: RegexpErrorKind) -> RegexpError {
        RegexpError {
            kind,
            offset: self.token_offset,
        }
    }

    /// Whether the lookahead token can begin a closure. Tokens that may
    /// legitimately end a concatenation give `Ok(false)`; tokens that can
    /// never appear here are errors.
    fn can_start_expression(&self) -> Result<bool, RegexpError> {
        match self.token {
            Token::RightParen | Token::Dollar | Token::Pipe | Token::EndOfInput => Ok(false),
            Token::Asterisk | Token::Plus | Token::Question => {
                Err(self.error(RegexpErrorKind::MisplacedQuantifier))
            }
            Token::RightBracket => Err(self.error(RegexpErrorKind::UnmatchedRightBracket)),
            Token::Caret => Err(self.error(RegexpErrorKind::MisplacedCaret)),
            _ => Ok(true),
        }
    }

    /// Everything after the pattern body, leading whitespace skipped.
    fn accept_string(&self) -> &'a str {
        let rest = &self.pattern[self.index..];
        rest.trim_start_matches(|c: char| c.is_ascii() && is_space(c as u8))
    }
}

/// Parse a pattern into an NFA.
pub fn parse_regexp(pattern: &str) -> Result<Nfa, RegexpError> {
    let mut parse = RegexpParse::new(pattern);
    parse_expression(&mut parse)
}

/// `expression := ['^'] union ['$']`, then the accept string.
fn parse_expression(parse: &mut RegexpParse) -> Result<Nfa, RegexpError> {
    parse.advance()?;

    let mut anchor = Anchor::NONE;
    let mut result = if parse.token == Token::Caret {
        anchor.insert(Anchor::START);
        parse.advance()?;
        let body = parse_union(parse)?;
        make_start_anchor(&mut parse.arena, body)
    } else {
        parse_union(parse)?
    };

    if parse.token == Token::Dollar {
        parse.advance()?;
        result = make_end_anchor(&mut parse.arena, result);
        anchor.insert(Anchor::END);
    }

    match parse.token {
        Token::EndOfInput => {}
        Token::RightParen => return Err(parse.error(RegexpErrorKind::UnmatchedRightParen)),
        _ => return Err(parse.error(RegexpErrorKind::MisplacedDollar)),
    }

    let accept_string = parse.accept_string().to_string();
    let end = &mut parse.arena[result.end];
    end.is_accepting = true;
    end.accept_string = accept_string;
    end.anchor = anchor;

    let arena = std::mem::take(&mut parse.arena);
    Ok(Nfa::from_fragment(arena, result.start, result.end))
}

/// `union := concatenation ('|' concatenation)*`, folded to the left.
fn parse_union(parse: &mut RegexpParse) -> Result<Fragment, RegexpError> {
    let mut result = parse_concatenation(parse)?;
    while parse.token == Token::Pipe {
        parse.advance()?;
        let rhs = parse_concatenation(parse)?;
        result = make_union(&mut parse.arena, result, rhs);
    }
    Ok(result)
}

/// `concatenation := closure+`
fn parse_concatenation(parse: &mut RegexpParse) -> Result<Fragment, RegexpError> {
    if !parse.can_start_expression()? {
        return Err(parse.error(RegexpErrorKind::MissingExpression));
    }
    let mut result = parse_closure(parse)?;
    while parse.can_start_expression()? {
        let rhs = parse_closure(parse)?;
        result = make_concatenation(&mut parse.arena, result, rhs);
    }
    Ok(result)
}

/// `closure := atom ['*' | '+' | '?']`
fn parse_closure(parse: &mut RegexpParse) -> Result<Fragment, RegexpError> {
    let atom = parse_atom(parse)?;
    let rep = match parse.token {
        Token::Asterisk | Token::Plus | Token::Question => Repetition::from_byte(parse.lexeme),
        _ => None,
    };
    match rep {
        Some(rep) => {
            parse.advance()?;
            Ok(make_closure(&mut parse.arena, atom, rep))
        }
        None => Ok(atom),
    }
}

/// `atom := literal | '.' | '[' class ']' | '(' union ')'`
fn parse_atom(parse: &mut RegexpParse) -> Result<Fragment, RegexpError> {
    match parse.token {
        Token::LeftParen => {
            let open = parse.token_offset;
            if parse.depth >= MAX_NESTING_DEPTH {
                return Err(parse.error(RegexpErrorKind::NestingTooDeep));
            }
            parse.depth += 1;
            parse.advance()?;
            let inner = parse_union(parse)?;
            parse.depth -= 1;
            if parse.token != Token::RightParen {
                return Err(RegexpError {
                    kind: RegexpErrorKind::UnmatchedLeftParen,
                    offset: open,
                });
            }
            parse.advance()?;
            Ok(inner)
        }
        Token::Period => {
            parse.advance()?;
            Ok(make_class_fragment(&mut parse.arena, ByteSet::printable()))
        }
        Token::LeftBracket => {
            let edge = parse_bracket(parse)?;
            Ok(make_class_fragment(&mut parse.arena, edge))
        }
        _ => {
            let literal = ByteSet::single(parse.lexeme);
            parse.advance()?;
            Ok(make_class_fragment(&mut parse.arena, literal))
        }
    }
}

/// `'[' ['^'] classitem* ']'`
///
/// A leading `^` fills in everything `.` matches and the listed items are
/// then added on top of that, not removed. A bracket with no items at all
/// (`[]`, `[^]`) adds the control range 0x00..=0x20.
fn parse_bracket(parse: &mut RegexpParse) -> Result<ByteSet, RegexpError> {
    let open = parse.token_offset;
    parse.advance()?;

    let mut set = ByteSet::empty();
    if parse.token == Token::Caret {
        parse.advance()?;
        set.union_with(&ByteSet::printable());
    }

    if parse.token == Token::RightBracket {
        set.union_with(&ByteSet::control());
    } else {
        parse_class_items(parse, &mut set, open)?;
    }

    // Consume the ']'.
    parse.advance()?;
    Ok(set)
}

/// `classitem*`, stopping on the closing `]` without consuming it.
///
/// Every token except `]`, `-` and the end of input stands for its own byte.
/// A `-` with no item before it, or right before `]`, is a literal `-`.
fn parse_class_items(
    parse: &mut RegexpParse,
    set: &mut ByteSet,
    open: usize,
) -> Result<(), RegexpError> {
    let unclosed = RegexpError {
        kind: RegexpErrorKind::UnclosedBracket,
        offset: open,
    };
    let mut range_lo: Option<u8> = None;

    loop {
        match parse.token {
            Token::EndOfInput => return Err(unclosed),
            Token::RightBracket => return Ok(()),
            Token::Hyphen => {
                let Some(lo) = range_lo else {
                    set.insert(b'-');
                    range_lo = Some(b'-');
                    parse.advance()?;
                    continue;
                };
                parse.advance()?;
                match parse.token {
                    Token::EndOfInput => return Err(unclosed),
                    Token::RightBracket => {
                        set.insert(b'-');
                        return Ok(());
                    }
                    _ => {
                        set.insert_range(lo, parse.lexeme);
                        range_lo = None;
                        parse.advance()?;
                    }
                }
            }
            _ => {
                set.insert(parse.lexeme);
                range_lo = Some(parse.lexeme);
                parse.advance()?;
            }
        }
    }
}
