use crate::frontend::token::Token;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Span {
    pub line: usize,
    pub col: usize,
}

#[derive(Debug, Clone)]
pub struct Spanned {
    pub token: Token,
    pub span: Span,
}

#[derive(Debug)]
pub struct LexerError {
    pub message: String,
    pub line: usize,
    pub col: usize,
}

impl std::fmt::Display for LexerError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}:{}: {}", self.line, self.col, self.message)
    }
}

/// A byte the scanner does not recognize. Skipped by default; fatal in
/// strict mode.
#[derive(Debug, Clone, PartialEq)]
pub struct LexerWarning {
    pub ch: char,
    pub line: usize,
    pub col: usize,
}

impl std::fmt::Display for LexerWarning {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}:{}: skipped unexpected character {:?}",
            self.line, self.col, self.ch
        )
    }
}

pub struct Lexer {
    source: Vec<char>,
    pos: usize,
    line: usize,
    col: usize,
    warnings: Vec<LexerWarning>,
}

impl Lexer {
    pub fn new(source: &str) -> Self {
        Lexer {
            source: source.chars().collect(),
            pos: 0,
            line: 1,
            col: 1,
            warnings: Vec::new(),
        }
    }

    /// Unknown characters skipped during the last `tokenize` call.
    pub fn warnings(&self) -> &[LexerWarning] {
        &self.warnings
    }

    fn current(&self) -> Option<char> {
        self.source.get(self.pos).copied()
    }

    fn advance(&mut self) -> Option<char> {
        let ch = self.current();
        if ch == Some('\n') {
            self.line += 1;
            self.col = 1;
        } else {
            self.col += 1;
        }
        self.pos += 1;
        ch
    }

    fn span(&self) -> Span {
        Span {
            line: self.line,
            col: self.col,
        }
    }

    fn skip_whitespace(&mut self) {
        while let Some(ch) = self.current() {
            if ch == ' ' || ch == '\n' || ch == '\t' || ch == '\r' {
                self.advance();
            } else {
                break;
            }
        }
    }

    /// Reads a string literal. Only `\n` and `\t` produce a character; any
    /// other `\<c>` consumes both characters and emits nothing. `\"`
    /// therefore never terminates the literal, and `\\` cannot be written.
    fn read_string(&mut self) -> Result<Token, LexerError> {
        let start_line = self.line;
        let start_col = self.col;
        self.advance();

        let mut string = String::new();
        loop {
            match self.current() {
                Some('"') => {
                    self.advance();
                    return Ok(Token::String(string));
                }
                Some('\\') => {
                    self.advance();
                    match self.current() {
                        Some('n') => string.push('\n'),
                        Some('t') => string.push('\t'),
                        Some(_) => {} // dropped, nothing emitted
                        None => {
                            return Err(LexerError {
                                message: "unexpected EOF in escape sequence".to_string(),
                                line: start_line,
                                col: start_col,
                            });
                        }
                    }
                    self.advance();
                }
                Some(ch) => {
                    string.push(ch);
                    self.advance();
                }
                None => {
                    return Err(LexerError {
                        message: "unterminated string literal".to_string(),
                        line: start_line,
                        col: start_col,
                    });
                }
            }
        }
    }

    /// Reads an integer literal: a maximal alphanumeric run, then a strict
    /// decimal parse. The wide scan predicate means `12ab` is one token and
    /// a numeric error, not `12` followed by `ab`.
    fn read_number(&mut self) -> Result<Token, LexerError> {
        let start_line = self.line;
        let start_col = self.col;

        let mut digits = String::new();
        while let Some(ch) = self.current() {
            if ch.is_alphanumeric() {
                digits.push(ch);
                self.advance();
            } else {
                break;
            }
        }

        let value: i64 = digits.parse().map_err(|_| LexerError {
            message: format!("invalid integer literal: {}", digits),
            line: start_line,
            col: start_col,
        })?;

        Ok(Token::Integer(value))
    }

    /// Reads a maximal alphabetic run and classifies it against the keyword
    /// vocabulary.
    fn read_identifier(&mut self) -> Token {
        let mut ident = String::new();
        while let Some(ch) = self.current() {
            if ch.is_alphabetic() {
                ident.push(ch);
                self.advance();
            } else {
                break;
            }
        }

        match ident.as_str() {
            "pushi" => Token::Pushi,
            "pushs" => Token::Pushs,
            "puts" => Token::Puts,
            "exit" => Token::Exit,
            _ => Token::Ident(ident),
        }
    }

    pub fn tokenize(&mut self) -> Result<Vec<Spanned>, LexerError> {
        let mut tokens = Vec::new();

        loop {
            self.skip_whitespace();
            let span = self.span();

            match self.current() {
                None => {
                    tokens.push(Spanned {
                        token: Token::Eof,
                        span,
                    });
                    break;
                }
                Some(';') => {
                    self.advance();
                    tokens.push(Spanned {
                        token: Token::Semi,
                        span,
                    });
                }
                Some('"') => {
                    let token = self.read_string()?;
                    tokens.push(Spanned { token, span });
                }
                Some(ch) if ch.is_alphabetic() => {
                    let token = self.read_identifier();
                    tokens.push(Spanned { token, span });
                }
                Some(ch) if ch.is_ascii_digit() => {
                    let token = self.read_number()?;
                    tokens.push(Spanned { token, span });
                }
                Some(ch) => {
                    // skip-and-continue, but visibly
                    self.warnings.push(LexerWarning {
                        ch,
                        line: self.line,
                        col: self.col,
                    });
                    self.advance();
                }
            }
        }

        Ok(tokens)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tokens(source: &str) -> Vec<Token> {
        let mut lexer = Lexer::new(source);
        lexer
            .tokenize()
            .unwrap()
            .into_iter()
            .map(|s| s.token)
            .filter(|t| !matches!(t, Token::Eof))
            .collect()
    }

    #[test]
    fn test_keywords() {
        let t = tokens("pushi pushs puts exit");
        assert_eq!(t, vec![Token::Pushi, Token::Pushs, Token::Puts, Token::Exit]);
    }

    #[test]
    fn test_keyword_vs_ident() {
        // exact matches become keywords, others remain identifiers
        let t = tokens("puts putsx push pushing");
        assert_eq!(
            t,
            vec![
                Token::Puts,
                Token::Ident("putsx".to_string()),
                Token::Ident("push".to_string()),
                Token::Ident("pushing".to_string()),
            ]
        );
    }

    #[test]
    fn test_statement() {
        let t = tokens("pushi 42;");
        assert_eq!(t, vec![Token::Pushi, Token::Integer(42), Token::Semi]);
    }

    #[test]
    fn test_ident_stops_at_digit() {
        // the identifier scan is alphabetic-only, so `pushi2` splits into a
        // keyword and an integer, same as `pushi 2`
        let t = tokens("pushi2;");
        assert_eq!(t, vec![Token::Pushi, Token::Integer(2), Token::Semi]);
    }

    #[test]
    fn test_string_literal() {
        let t = tokens(r#"pushs "hello";"#);
        assert_eq!(
            t,
            vec![
                Token::Pushs,
                Token::String("hello".to_string()),
                Token::Semi
            ]
        );
    }

    #[test]
    fn test_escape_sequences() {
        let t = tokens(r#""a\nb\tc""#);
        assert_eq!(t, vec![Token::String("a\nb\tc".to_string())]);
    }

    #[test]
    fn test_unknown_escape_dropped() {
        // \q consumes both characters and emits nothing
        let t = tokens(r#""a\qb""#);
        assert_eq!(t, vec![Token::String("ab".to_string())]);
    }

    #[test]
    fn test_escaped_quote_does_not_terminate() {
        // \" is in the dropped set, but still consumes the quote, so the
        // literal runs on to the next bare quote
        let t = tokens(r#""a\"b""#);
        assert_eq!(t, vec![Token::String("ab".to_string())]);
    }

    #[test]
    fn test_unterminated_string_error() {
        let mut lexer = Lexer::new("\"hello");
        let err = lexer.tokenize().unwrap_err();
        assert!(
            err.message.contains("unterminated string"),
            "msg was: {}",
            err.message
        );
    }

    #[test]
    fn test_eof_in_escape_error() {
        let mut lexer = Lexer::new("\"hello\\");
        let err = lexer.tokenize().unwrap_err();
        assert!(
            err.message.contains("escape sequence"),
            "msg was: {}",
            err.message
        );
    }

    #[test]
    fn test_invalid_integer_error() {
        // alnum scan swallows the letters, decimal parse rejects them
        let mut lexer = Lexer::new("pushi 12ab;");
        let err = lexer.tokenize().unwrap_err();
        assert!(
            err.message.contains("invalid integer literal: 12ab"),
            "msg was: {}",
            err.message
        );
    }

    #[test]
    fn test_integer_overflow_error() {
        let mut lexer = Lexer::new("pushi 99999999999999999999;");
        assert!(lexer.tokenize().is_err());
    }

    #[test]
    fn test_whitespace_insignificant() {
        let t = tokens("pushi\n\t  42\r\n;");
        assert_eq!(t, vec![Token::Pushi, Token::Integer(42), Token::Semi]);
    }

    #[test]
    fn test_unknown_byte_warns_and_continues() {
        let mut lexer = Lexer::new("pushi @ 42;");
        let toks: Vec<Token> = lexer
            .tokenize()
            .unwrap()
            .into_iter()
            .map(|s| s.token)
            .collect();
        assert_eq!(
            toks,
            vec![Token::Pushi, Token::Integer(42), Token::Semi, Token::Eof]
        );
        assert_eq!(lexer.warnings().len(), 1);
        assert_eq!(lexer.warnings()[0].ch, '@');
        assert_eq!(lexer.warnings()[0].col, 7);
    }

    #[test]
    fn test_spans() {
        let mut lexer = Lexer::new("pushi 42;\nexit;");
        let sp = lexer.tokenize().unwrap();

        assert_eq!(sp[0].token, Token::Pushi);
        assert_eq!((sp[0].span.line, sp[0].span.col), (1, 1));
        assert_eq!(sp[1].token, Token::Integer(42));
        assert_eq!((sp[1].span.line, sp[1].span.col), (1, 7));
        assert_eq!(sp[2].token, Token::Semi);
        assert_eq!((sp[2].span.line, sp[2].span.col), (1, 9));
        assert_eq!(sp[3].token, Token::Exit);
        assert_eq!((sp[3].span.line, sp[3].span.col), (2, 1));
        assert_eq!(sp[4].token, Token::Semi);
        assert_eq!((sp[4].span.line, sp[4].span.col), (2, 5));
        assert_eq!(sp[5].token, Token::Eof);
        assert_eq!((sp[5].span.line, sp[5].span.col), (2, 6));
    }

    #[test]
    fn test_empty_source() {
        let mut lexer = Lexer::new("");
        let sp = lexer.tokenize().unwrap();
        assert_eq!(sp.len(), 1);
        assert_eq!(sp[0].token, Token::Eof);
    }
}
