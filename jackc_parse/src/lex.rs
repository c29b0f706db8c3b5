use crate::{
    reserved::{get_keywords, is_symbol, is_valid_ident, INT_CONST_MAX},
    token::{Keyword, Symbol, Token, TokenTy},
};
use jackc_err::lex_err::{LexErr, LexErrTy};
use std::{
    collections::HashMap,
    io::{BufRead, BufReader, Read},
};

#[derive(Debug)]
pub struct Lexer<T>
where
    T: Read,
{
    /// Current character in input buffer
    curr: Option<char>,

    /// Current line number, starting at 1 once the first line is read
    pub line_num: usize,

    /// Current char position in line
    pub line_pos: usize,

    /// Buffer over the input. Any reader works, which is mostly intended to
    /// handle files or in-memory strings.
    reader: BufReader<T>,

    /// Buffer holding the current line
    buffer: Vec<char>,

    /// Keyword mapping
    keywords: HashMap<String, Keyword>,

    /// Set once the first line has been read from the reader.
    primed: bool,

    /// One token of lookahead, filled by `peek()`.
    peeked: Option<Result<Token, LexErr>>,

    /// The most recently consumed token.
    curr_tkn: Option<Token>,
}

impl<T> Lexer<T>
where
    T: Read,
{
    pub fn new(input: T) -> Lexer<T> {
        Lexer {
            curr: None,
            line_num: 0,
            line_pos: 0,
            reader: BufReader::new(input),
            buffer: Vec::new(),
            keywords: get_keywords(),
            primed: false,
            peeked: None,
            curr_tkn: None,
        }
    }

    /// True while there are tokens left before the end of the input. A pending
    /// lexical error counts as remaining input: it is reported by `advance()`.
    pub fn has_more(&mut self) -> bool {
        match self.peek() {
            Ok(tkn) => !tkn.is_eof(),
            Err(_) => true,
        }
    }

    /// Consume the next token and record it as the current one. Once the input
    /// is exhausted this keeps returning an Eof token.
    pub fn advance(&mut self) -> Result<Token, LexErr> {
        let next = match self.peeked.take() {
            Some(next) => next,
            None => self.lex(),
        };

        let tkn = next?;
        self.curr_tkn = Some(tkn.clone());
        Ok(tkn)
    }

    /// Look at the next token without consuming it.
    pub fn peek(&mut self) -> Result<&Token, LexErr> {
        let next = match self.peeked.take() {
            Some(next) => next,
            None => self.lex(),
        };

        match self.peeked.insert(next) {
            Ok(tkn) => Ok(tkn),
            Err(e) => Err(e.clone()),
        }
    }

    /// The token returned by the last call to `advance()`.
    pub fn curr(&self) -> Option<&Token> {
        self.curr_tkn.as_ref()
    }

    /// Scan the next token from the input.
    fn lex(&mut self) -> Result<Token, LexErr> {
        if !self.primed {
            self.primed = true;
            self.next_line()?;
        }

        self.skip_ignored()?;

        let ch = match self.curr {
            Some(ch) => ch,
            None => return Ok(self.eof_tkn()),
        };

        if ch == '"' {
            return self.lex_str();
        }

        match Symbol::from_char(ch) {
            Some(sym) => self.consume(TokenTy::Symbol(sym)),
            None => self.lex_word(),
        }
    }

    /// Skip whitespace and comments until the start of the next token or the
    /// end of the input.
    fn skip_ignored(&mut self) -> Result<(), LexErr> {
        loop {
            match self.curr {
                Some(ch) if ch.is_whitespace() => self.bump()?,
                Some('/') => match self.peek_char() {
                    Some('/') => self.skip_line_comment()?,
                    Some('*') => self.skip_block_comment()?,
                    _ => return Ok(()),
                },
                _ => return Ok(()),
            }
        }
    }

    /// Stops on the terminating newline, which is skipped as whitespace.
    fn skip_line_comment(&mut self) -> Result<(), LexErr> {
        while let Some(ch) = self.curr {
            if ch == '\n' {
                break;
            }
            self.bump()?;
        }

        Ok(())
    }

    /// Skips a `/* */` or `/** */` comment, which may span any number of lines.
    fn skip_block_comment(&mut self) -> Result<(), LexErr> {
        let startline = self.line_num;
        let startpos = self.line_pos;

        // Consume "/*"
        self.bump()?;
        self.bump()?;

        loop {
            match self.curr {
                Some('*') if self.peek_char() == Some('/') => {
                    self.bump()?;
                    self.bump()?;
                    return Ok(());
                }
                Some(_) => self.bump()?,
                None => {
                    return Err(LexErr::new(
                        startline,
                        startpos,
                        LexErrTy::UnterminatedComment,
                    ))
                }
            }
        }
    }

    /// Lex a string constant. We expect to have a " character when this
    /// function is called, and we consume the closing " during this call.
    /// String constants cannot span lines.
    fn lex_str(&mut self) -> Result<Token, LexErr> {
        let mut lit = String::new();
        let startpos = self.line_pos;
        let startline = self.line_num;

        // Consume '"'
        self.bump()?;

        loop {
            match self.curr {
                Some('"') => {
                    self.bump()?;
                    return Ok(Token::new(TokenTy::StrConst(lit), startline, startpos));
                }
                Some('\n') | Some('\r') | None => {
                    return Err(LexErr::new(
                        startline,
                        startpos,
                        LexErrTy::UnterminatedString(lit),
                    ));
                }
                Some(ch) => {
                    lit.push(ch);
                    self.bump()?;
                }
            }
        }
    }

    /// Lex a keyword, integer constant or identifier. The lexeme runs until a
    /// symbol or whitespace character, then gets classified.
    fn lex_word(&mut self) -> Result<Token, LexErr> {
        let mut lit = String::new();
        let startpos = self.line_pos;
        let startline = self.line_num;

        while let Some(ch) = self.curr {
            if ch.is_whitespace() || is_symbol(ch) {
                break;
            }
            lit.push(ch);
            self.bump()?;
        }

        let ty = self
            .classify(&lit)
            .map_err(|ty| LexErr::new(startline, startpos, ty))?;

        Ok(Token::new(ty, startline, startpos))
    }

    fn classify(&self, lit: &str) -> Result<TokenTy, LexErrTy> {
        if let Some(kw) = self.keywords.get(lit) {
            return Ok(TokenTy::Keyword(*kw));
        }

        if lit.chars().all(|ch| ch.is_ascii_digit()) {
            return match lit.parse::<u16>() {
                Ok(val) if val <= INT_CONST_MAX => Ok(TokenTy::IntConst(val)),
                _ => Err(LexErrTy::IntOutOfRange(lit.to_string())),
            };
        }

        if is_valid_ident(lit) {
            Ok(TokenTy::Ident(lit.to_string()))
        } else {
            Err(LexErrTy::InvalidIdent(lit.to_string()))
        }
    }

    /// Consume current char and return a token from it.
    fn consume(&mut self, ty: TokenTy) -> Result<Token, LexErr> {
        let tkn = Token::new(ty, self.line_num, self.line_pos);
        self.bump()?;
        Ok(tkn)
    }

    /// Return the next char in the current line, if any.
    fn peek_char(&self) -> Option<char> {
        self.buffer.get(self.line_pos + 1).copied()
    }

    /// Move the char position ahead by 1. At the end of the current buffer,
    /// reads the next line of the input and sets the position to 0.
    fn bump(&mut self) -> Result<(), LexErr> {
        if self.line_pos + 1 < self.buffer.len() {
            self.line_pos += 1;
            self.curr = Some(self.buffer[self.line_pos]);
            Ok(())
        } else {
            self.next_line()
        }
    }

    /// Read the next line of the input into the buffer. An empty buffer
    /// afterwards means we're at the end of the input.
    fn next_line(&mut self) -> Result<(), LexErr> {
        let mut buf = String::new();
        let line_bytes = self.reader.read_line(&mut buf).map_err(|e| {
            LexErr::new(self.line_num, self.line_pos, LexErrTy::Io(e.to_string()))
        })?;

        if line_bytes > 0 {
            self.line_num += 1;
        }

        self.buffer = buf.chars().collect();
        self.line_pos = 0;
        self.curr = self.buffer.first().copied();
        Ok(())
    }

    /// Empty input still reports line 1.
    fn eof_tkn(&self) -> Token {
        Token::new(TokenTy::Eof, self.line_num.max(1), self.line_pos)
    }
}

/// Yields every token up to, but not including, the Eof token. Iteration
/// stops after the first lexical error.
impl<T> Iterator for Lexer<T>
where
    T: Read,
{
    type Item = Result<Token, LexErr>;

    fn next(&mut self) -> Option<Self::Item> {
        match self.advance() {
            Ok(tkn) if tkn.is_eof() => None,
            Ok(tkn) => Some(Ok(tkn)),
            Err(e) => {
                self.peeked = Some(Ok(self.eof_tkn()));
                Some(Err(e))
            }
        }
    }
}
