//! The streaming lexer.

use crate::cursor::Cursor;
use crate::error::LexError;
use crate::token::{Keyword, Position, Token};
use log::trace;

const IDENT_WANT_BYTES: usize = 13;

/// Tokenizes GraphQL source text one token at a time.
///
/// `Lexer` borrows its input for `'a`; every [`Token`] it produces
/// borrows the same buffer, so tokens cannot outlive the source they
/// were read from.
///
/// ```
/// use gql_lexer::{Keyword, Lexer};
///
/// let mut lexer = Lexer::new("{ name }");
/// assert_eq!(lexer.read().unwrap().keyword, Keyword::CurlyBracketOpen);
/// assert_eq!(lexer.read().unwrap().keyword, Keyword::Ident);
/// ```
pub struct Lexer<'a> {
    cursor: Cursor<'a>,
}

impl<'a> Lexer<'a> {
    /// Create a lexer positioned at the start of `input`.
    pub fn new(input: &'a str) -> Self {
        Self {
            cursor: Cursor::new(input),
        }
    }

    /// Reset this lexer to tokenize a new input from the start.
    pub fn set_input(&mut self, input: &'a str) {
        self.cursor.set_input(input);
    }

    /// Current byte offset into the input.
    pub fn position(&self) -> usize {
        self.cursor.position()
    }

    fn here(&self) -> Position {
        Position::new(self.cursor.line(), self.cursor.column())
    }

    /// Emit the next token, advancing past it. This cannot be undone.
    pub fn read(&mut self) -> Result<Token<'a>, LexError> {
        self.skip_whitespace();

        let start_pos = self.here();
        let c = self.cursor.current_char();

        if let Some(keyword) = self.single_rune_keyword(c) {
            self.cursor.advance();
            return Ok(Token::punctuation(keyword, start_pos));
        }

        let result = match c {
            '"' => self.read_string(start_pos),
            '.' => self.read_spread(start_pos),
            '$' => self.read_variable(start_pos),
            c if c.is_ascii_digit() => self.read_number(start_pos),
            _ => self.read_ident(start_pos),
        };
        if let Err(ref err) = result {
            trace!("{err} at {start_pos:?}");
        }
        result
    }

    /// Classify the next token without consuming it.
    ///
    /// If `ignore_whitespace` is true, leading whitespace is skipped first
    /// (a side effect that persists: the whitespace is gone for any
    /// subsequent `read`, but since `read` always skips leading
    /// whitespace anyway, this is unobservable). If false, the immediate
    /// next code unit is classified as-is, which can yield one of the
    /// whitespace keywords.
    pub fn peek(&mut self, ignore_whitespace: bool) -> Result<Keyword, LexError> {
        if ignore_whitespace {
            self.skip_whitespace();
        }
        self.keyword_from_rune(self.cursor.current_char())
    }

    fn skip_whitespace(&mut self) {
        while !self.cursor.is_at_end() && Self::rune_is_whitespace(self.cursor.current_char()) {
            self.cursor.advance();
        }
    }

    fn single_rune_keyword(&self, c: char) -> Option<Keyword> {
        if self.cursor.is_at_end() {
            return Some(Keyword::Eof);
        }
        Some(match c {
            '|' => Keyword::Pipe,
            '=' => Keyword::Equals,
            '@' => Keyword::At,
            ':' => Keyword::Colon,
            '!' => Keyword::Bang,
            '(' => Keyword::BracketOpen,
            ')' => Keyword::BracketClose,
            '{' => Keyword::CurlyBracketOpen,
            '}' => Keyword::CurlyBracketClose,
            '[' => Keyword::SquareBracketOpen,
            ']' => Keyword::SquareBracketClose,
            '&' => Keyword::And,
            _ => return None,
        })
    }

    fn keyword_from_rune(&self, c: char) -> Result<Keyword, LexError> {
        if self.cursor.is_at_end() {
            return Ok(Keyword::Eof);
        }
        match c {
            ' ' => return Ok(Keyword::Space),
            '\t' => return Ok(Keyword::Tab),
            ',' => return Ok(Keyword::Comma),
            '\n' => return Ok(Keyword::LineTerminator),
            '"' => return Ok(Keyword::String),
            '$' => return Ok(Keyword::Variable),
            '|' => return Ok(Keyword::Pipe),
            '=' => return Ok(Keyword::Equals),
            '@' => return Ok(Keyword::At),
            ':' => return Ok(Keyword::Colon),
            '!' => return Ok(Keyword::Bang),
            '(' => return Ok(Keyword::BracketOpen),
            ')' => return Ok(Keyword::BracketClose),
            '{' => return Ok(Keyword::CurlyBracketOpen),
            '}' => return Ok(Keyword::CurlyBracketClose),
            '[' => return Ok(Keyword::SquareBracketOpen),
            ']' => return Ok(Keyword::SquareBracketClose),
            '&' => return Ok(Keyword::And),
            '.' => {
                return if self.cursor.peek_equals("...") {
                    Ok(Keyword::Spread)
                } else {
                    Err(LexError::InvalidSpread(self.here()))
                };
            }
            _ => {}
        }
        if c.is_ascii_digit() {
            return Ok(if self.peek_is_float() {
                Keyword::Float
            } else {
                Keyword::Integer
            });
        }
        Ok(self.peek_ident())
    }

    /// Best-effort float classification matching [`Lexer::read_number`]
    /// only when at least one digit follows the dot; see the crate docs
    /// for why `peek` cannot fully agree with `read` at end of input.
    fn peek_is_float(&self) -> bool {
        let mut has_dot = false;
        for b in self.cursor.remaining().bytes() {
            let c = b as char;
            if Self::rune_is_whitespace(c) {
                return has_dot;
            } else if c == '.' {
                if has_dot {
                    return false;
                }
                has_dot = true;
            } else if !c.is_ascii_digit() {
                return false;
            }
        }
        has_dot
    }

    fn peek_ident(&self) -> Keyword {
        let remaining = self.cursor.remaining();
        let end = remaining.len().min(IDENT_WANT_BYTES);
        let mut window = &remaining[..end];
        if let Some((byte_pos, _)) = window
            .char_indices()
            .find(|&(_, c)| !Self::rune_is_ident(c))
        {
            window = &window[..byte_pos];
        }
        Keyword::from_ident_str(window)
    }

    fn read_spread(&mut self, start_pos: Position) -> Result<Token<'a>, LexError> {
        if self.cursor.peek_equals("...") {
            self.cursor.advance();
            self.cursor.advance();
            self.cursor.advance();
            Ok(Token::punctuation(Keyword::Spread, start_pos))
        } else {
            Err(LexError::InvalidSpread(start_pos))
        }
    }

    fn read_variable(&mut self, start_pos: Position) -> Result<Token<'a>, LexError> {
        self.cursor.advance(); // consume '$'

        if self.cursor.is_at_end() || Self::rune_is_whitespace(self.cursor.current_char()) {
            return Err(LexError::VariableWithoutName(start_pos));
        }

        let ident_start = self.cursor.position();
        while Self::rune_is_ident(self.cursor.current_char()) {
            self.cursor.advance();
        }
        let literal = self.cursor.slice_from(ident_start);
        Ok(Token {
            keyword: Keyword::Variable,
            literal,
            position: start_pos,
        })
    }

    fn read_number(&mut self, start_pos: Position) -> Result<Token<'a>, LexError> {
        let start = self.cursor.position();
        while self.cursor.current_char().is_ascii_digit() {
            self.cursor.advance();
        }

        if self.cursor.current_char() != '.' {
            let literal = self.cursor.slice_from(start);
            return Ok(Token {
                keyword: Keyword::Integer,
                literal,
                position: start_pos,
            });
        }

        self.cursor.advance(); // consume '.'
        let digits_start = self.cursor.position();
        while self.cursor.current_char().is_ascii_digit() {
            self.cursor.advance();
        }
        if self.cursor.position() == digits_start {
            return Err(LexError::IncompleteFloat(start_pos));
        }

        let literal = self.cursor.slice_from(start);
        Ok(Token {
            keyword: Keyword::Float,
            literal,
            position: start_pos,
        })
    }

    /// Any non-whitespace code unit that isn't otherwise recognized
    /// becomes a (possibly single-character) identifier — there is no
    /// "unexpected character" error in this lexer.
    fn read_ident(&mut self, start_pos: Position) -> Result<Token<'a>, LexError> {
        let start = self.cursor.position();
        self.cursor.advance();
        while Self::rune_is_ident(self.cursor.current_char()) {
            self.cursor.advance();
        }
        let literal = self.cursor.slice_from(start);
        Ok(Token {
            keyword: Keyword::from_ident_str(literal),
            literal,
            position: start_pos,
        })
    }

    fn read_string(&mut self, start_pos: Position) -> Result<Token<'a>, LexError> {
        self.cursor.advance(); // consume opening '"'
        if self.cursor.peek_equals("\"\"") {
            self.cursor.advance();
            self.cursor.advance();
            self.read_block_string(start_pos)
        } else {
            self.read_single_line_string(start_pos)
        }
    }

    fn read_single_line_string(&mut self, start_pos: Position) -> Result<Token<'a>, LexError> {
        let start = self.cursor.position();
        let mut escaped = false;
        loop {
            if self.cursor.is_at_end() {
                return Err(LexError::UnterminatedString(start_pos));
            }
            let content_end = self.cursor.position();
            let c = self.cursor.current_char();
            self.cursor.advance();
            match c {
                '"' if !escaped => {
                    let literal = self.cursor.slice(start, content_end);
                    return Ok(Token {
                        keyword: Keyword::String,
                        literal,
                        position: start_pos,
                    });
                }
                '"' => escaped = false,
                '\\' => escaped = !escaped,
                _ => escaped = false,
            }
        }
    }

    fn read_block_string(&mut self, start_pos: Position) -> Result<Token<'a>, LexError> {
        let start = self.cursor.position();
        let mut escaped = false;
        loop {
            if self.cursor.is_at_end() {
                return Err(LexError::UnterminatedString(start_pos));
            }
            let c = self.cursor.current_char();
            self.cursor.advance();
            match c {
                '"' if !escaped => {
                    if self.cursor.peek_equals("\"\"") {
                        let end = self.cursor.position() - 1;
                        self.cursor.advance();
                        self.cursor.advance();
                        let raw = self.cursor.slice(start, end);
                        return Ok(Token {
                            keyword: Keyword::String,
                            literal: trim_one_newline_each_end(raw),
                            position: start_pos,
                        });
                    }
                    escaped = false;
                }
                '"' => escaped = false,
                '\\' => escaped = !escaped,
                _ => escaped = false,
            }
        }
    }

    fn rune_is_whitespace(c: char) -> bool {
        matches!(c, ' ' | '\t' | '\n' | ',')
    }

    /// The identifier character class: ASCII letters, digits, `_`, `-`.
    ///
    /// Accepting digits and `-` at the *start* of an identifier (not just
    /// mid-run) is a deliberate, documented quirk of this lexer — see
    /// [`crate`] docs and `identifier_start_quirk_*` tests.
    fn rune_is_ident(c: char) -> bool {
        c.is_ascii_alphanumeric() || c == '_' || c == '-'
    }
}

fn trim_one_newline_each_end(s: &str) -> &str {
    let s = s.strip_prefix('\n').unwrap_or(s);
    s.strip_suffix('\n').unwrap_or(s)
}

impl<'a> Iterator for Lexer<'a> {
    type Item = Result<Token<'a>, LexError>;

    fn next(&mut self) -> Option<Self::Item> {
        match self.read() {
            Ok(tok) if tok.keyword == Keyword::Eof => None,
            other => Some(other),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lex_all(source: &str) -> Vec<Token<'_>> {
        let mut lexer = Lexer::new(source);
        let mut tokens = Vec::new();
        loop {
            let tok = lexer.read().expect("lex error");
            let done = tok.keyword == Keyword::Eof;
            tokens.push(tok);
            if done {
                break;
            }
        }
        tokens
    }

    #[test]
    fn punctuation_is_single_char() {
        let tokens = lex_all("!$():=@[]{|}&");
        let kinds: Vec<_> = tokens.iter().map(|t| t.keyword).collect();
        assert!(kinds.starts_with(&[Keyword::Bang]));
    }

    #[test]
    fn spread_requires_exactly_three_dots() {
        let mut lexer = Lexer::new("...");
        assert_eq!(lexer.read().unwrap().keyword, Keyword::Spread);

        let mut lexer = Lexer::new("..");
        assert_eq!(lexer.read().unwrap_err(), LexError::InvalidSpread(Position::new(1, 1)));
    }

    #[test]
    fn s1_spread_vs_float() {
        let tokens = lex_all("{ ... on User { age } 3.14 }");
        let kinds: Vec<_> = tokens.iter().map(|t| t.keyword).collect();
        assert_eq!(
            kinds,
            vec![
                Keyword::CurlyBracketOpen,
                Keyword::Spread,
                Keyword::On,
                Keyword::Ident,
                Keyword::CurlyBracketOpen,
                Keyword::Ident,
                Keyword::CurlyBracketClose,
                Keyword::Float,
                Keyword::CurlyBracketClose,
                Keyword::Eof,
            ]
        );
        let float_tok = tokens[7];
        assert_eq!(float_tok.literal, "3.14");
    }

    #[test]
    fn s2_variable() {
        let tok = Lexer::new("$first").read().unwrap();
        assert_eq!(tok.keyword, Keyword::Variable);
        assert_eq!(tok.literal, "first");

        let err = Lexer::new("$ first").read().unwrap_err();
        assert_eq!(err, LexError::VariableWithoutName(Position::new(1, 1)));
    }

    #[test]
    fn variable_at_eof_errors() {
        let err = Lexer::new("$").read().unwrap_err();
        assert_eq!(err, LexError::VariableWithoutName(Position::new(1, 1)));
    }

    #[test]
    fn float_with_single_trailing_digit_is_valid() {
        let tok = Lexer::new("1.5").read().unwrap();
        assert_eq!(tok.keyword, Keyword::Float);
        assert_eq!(tok.literal, "1.5");
    }

    #[test]
    fn incomplete_float_errors() {
        let err = Lexer::new("1.").read().unwrap_err();
        assert_eq!(err, LexError::IncompleteFloat(Position::new(1, 1)));
    }

    #[test]
    fn block_string_trims_one_newline_each_end() {
        let tok = Lexer::new("\"\"\"\nhello\n\"\"\"").read().unwrap();
        assert_eq!(tok.keyword, Keyword::String);
        assert_eq!(tok.literal, "hello\n");
    }

    #[test]
    fn single_line_string_handles_escaped_quotes() {
        let tok = Lexer::new(r#""a\"b""#).read().unwrap();
        assert_eq!(tok.keyword, Keyword::String);
        assert_eq!(tok.literal, r#"a\"b"#);
    }

    #[test]
    fn unterminated_single_line_string_errors_instead_of_looping() {
        let err = Lexer::new("\"abc").read().unwrap_err();
        assert_eq!(err, LexError::UnterminatedString(Position::new(1, 1)));
    }

    #[test]
    fn unterminated_block_string_errors_instead_of_looping() {
        let err = Lexer::new("\"\"\"abc").read().unwrap_err();
        assert_eq!(err, LexError::UnterminatedString(Position::new(1, 1)));
    }

    #[test]
    fn identifier_start_quirk_digit_and_hyphen() {
        assert_eq!(Lexer::new("1abc").read().unwrap().keyword, Keyword::Integer);
        let tok = Lexer::new("-abc ").read().unwrap();
        assert_eq!(tok.keyword, Keyword::Ident);
        assert_eq!(tok.literal, "-abc");
    }

    #[test]
    fn any_stray_byte_becomes_a_one_char_ident() {
        let tok = Lexer::new("#").read().unwrap();
        assert_eq!(tok.keyword, Keyword::Ident);
        assert_eq!(tok.literal, "#");
    }

    #[test]
    fn peek_does_not_consume_the_token() {
        let mut lexer = Lexer::new("query");
        assert_eq!(lexer.peek(true).unwrap(), Keyword::Query);
        assert_eq!(lexer.read().unwrap().keyword, Keyword::Query);
    }

    #[test]
    fn peek_without_ignoring_whitespace_sees_whitespace_kinds() {
        let mut lexer = Lexer::new(" query");
        assert_eq!(lexer.peek(false).unwrap(), Keyword::Space);
        assert_eq!(lexer.peek(true).unwrap(), Keyword::Query);
    }

    #[test]
    fn position_tracks_line_and_column_across_newlines() {
        let mut lexer = Lexer::new("a\nb");
        let first = lexer.read().unwrap();
        assert_eq!(first.position, Position::new(1, 1));
        let second = lexer.read().unwrap();
        assert_eq!(second.position, Position::new(2, 1));
    }

    #[test]
    fn commas_and_tabs_are_whitespace() {
        let tokens = lex_all("a,\tb");
        assert_eq!(tokens[0].literal, "a");
        assert_eq!(tokens[1].literal, "b");
    }
}
