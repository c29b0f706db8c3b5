use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Keyword {
    Class,
    Constructor,
    Function,
    Method,
    Field,
    Static,
    Var,
    Int,
    Char,
    Boolean,
    Void,
    True,
    False,
    Null,
    This,
    Let,
    Do,
    If,
    Else,
    While,
    Return,
}

impl Keyword {
    /// True if the keyword names a primitive type.
    pub fn is_primitive_ty(&self) -> bool {
        matches!(self, Keyword::Int | Keyword::Char | Keyword::Boolean)
    }

    /// True if the keyword is one of the constants allowed as a term.
    pub fn is_const(&self) -> bool {
        matches!(
            self,
            Keyword::True | Keyword::False | Keyword::Null | Keyword::This
        )
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Keyword::Class => "class",
            Keyword::Constructor => "constructor",
            Keyword::Function => "function",
            Keyword::Method => "method",
            Keyword::Field => "field",
            Keyword::Static => "static",
            Keyword::Var => "var",
            Keyword::Int => "int",
            Keyword::Char => "char",
            Keyword::Boolean => "boolean",
            Keyword::Void => "void",
            Keyword::True => "true",
            Keyword::False => "false",
            Keyword::Null => "null",
            Keyword::This => "this",
            Keyword::Let => "let",
            Keyword::Do => "do",
            Keyword::If => "if",
            Keyword::Else => "else",
            Keyword::While => "while",
            Keyword::Return => "return",
        }
    }
}

impl fmt::Display for Keyword {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Symbol {
    LeftBrace,
    RightBrace,
    LeftParen,
    RightParen,
    LeftBracket,
    RightBracket,
    Period,
    Comma,
    Semicolon,
    Plus,
    Minus,
    Star,
    Slash,
    Amp,
    Pipe,
    Lt,
    Gt,
    Eq,
    Tilde,
}

impl Symbol {
    pub fn from_char(ch: char) -> Option<Symbol> {
        let sym = match ch {
            '{' => Symbol::LeftBrace,
            '}' => Symbol::RightBrace,
            '(' => Symbol::LeftParen,
            ')' => Symbol::RightParen,
            '[' => Symbol::LeftBracket,
            ']' => Symbol::RightBracket,
            '.' => Symbol::Period,
            ',' => Symbol::Comma,
            ';' => Symbol::Semicolon,
            '+' => Symbol::Plus,
            '-' => Symbol::Minus,
            '*' => Symbol::Star,
            '/' => Symbol::Slash,
            '&' => Symbol::Amp,
            '|' => Symbol::Pipe,
            '<' => Symbol::Lt,
            '>' => Symbol::Gt,
            '=' => Symbol::Eq,
            '~' => Symbol::Tilde,
            _ => return None,
        };

        Some(sym)
    }

    pub fn as_char(&self) -> char {
        match self {
            Symbol::LeftBrace => '{',
            Symbol::RightBrace => '}',
            Symbol::LeftParen => '(',
            Symbol::RightParen => ')',
            Symbol::LeftBracket => '[',
            Symbol::RightBracket => ']',
            Symbol::Period => '.',
            Symbol::Comma => ',',
            Symbol::Semicolon => ';',
            Symbol::Plus => '+',
            Symbol::Minus => '-',
            Symbol::Star => '*',
            Symbol::Slash => '/',
            Symbol::Amp => '&',
            Symbol::Pipe => '|',
            Symbol::Lt => '<',
            Symbol::Gt => '>',
            Symbol::Eq => '=',
            Symbol::Tilde => '~',
        }
    }

    pub fn is_unary_op(&self) -> bool {
        matches!(self, Symbol::Minus | Symbol::Tilde)
    }
}

impl fmt::Display for Symbol {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.as_char())
    }
}

/// The lexical class of a token, without its payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenKind {
    Keyword,
    Symbol,
    IntConst,
    StrConst,
    Ident,
    Eof,
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let pretty = match self {
            TokenKind::Keyword => "keyword",
            TokenKind::Symbol => "symbol",
            TokenKind::IntConst => "integerConstant",
            TokenKind::StrConst => "stringConstant",
            TokenKind::Ident => "identifier",
            TokenKind::Eof => "EOF",
        };

        write!(f, "{}", pretty)
    }
}

#[derive(Debug, PartialEq, Clone)]
pub enum TokenTy {
    Keyword(Keyword),
    Symbol(Symbol),
    IntConst(u16),
    StrConst(String),
    Ident(String),

    // Special type marking the end of the input
    Eof,
}

impl TokenTy {
    pub fn kind(&self) -> TokenKind {
        match self {
            TokenTy::Keyword(_) => TokenKind::Keyword,
            TokenTy::Symbol(_) => TokenKind::Symbol,
            TokenTy::IntConst(_) => TokenKind::IntConst,
            TokenTy::StrConst(_) => TokenKind::StrConst,
            TokenTy::Ident(_) => TokenKind::Ident,
            TokenTy::Eof => TokenKind::Eof,
        }
    }

    pub fn is_sym(&self, sym: Symbol) -> bool {
        *self == TokenTy::Symbol(sym)
    }

    pub fn is_kw(&self, kw: Keyword) -> bool {
        *self == TokenTy::Keyword(kw)
    }
}

impl fmt::Display for TokenTy {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            TokenTy::Keyword(kw) => write!(f, "{}", kw),
            TokenTy::Symbol(sym) => write!(f, "{}", sym),
            TokenTy::IntConst(val) => write!(f, "{}", val),
            TokenTy::StrConst(s) => write!(f, "{}", s),
            TokenTy::Ident(name) => write!(f, "{}", name),
            TokenTy::Eof => write!(f, "EOF"),
        }
    }
}

#[derive(Debug, PartialEq, Clone)]
pub struct Token {
    pub ty: TokenTy,
    pub line: usize,
    pub pos: usize,
}

impl Token {
    pub fn new(ty: TokenTy, line: usize, pos: usize) -> Token {
        Token { ty, line, pos }
    }

    pub fn kind(&self) -> TokenKind {
        self.ty.kind()
    }

    /// Returns the identifier name, if this token is an identifier.
    pub fn get_name(&self) -> Option<&str> {
        match self.ty {
            TokenTy::Ident(ref name) => Some(name),
            _ => None,
        }
    }

    pub fn is_ident(&self) -> bool {
        matches!(self.ty, TokenTy::Ident(_))
    }

    pub fn is_eof(&self) -> bool {
        self.ty == TokenTy::Eof
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.ty)
    }
}
