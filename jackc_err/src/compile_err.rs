use crate::{
    err::JackErr,
    lex_err::LexErr,
    parse_err::{ParseErr, ParseErrTy},
    sym_err::{SymErr, SymErrTy},
};
use std::{error::Error, fmt};

/// Coarse classification of a compile failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrKind {
    Lexical,
    UnexpectedToken,
    UnknownSymbol,
    DuplicateDeclaration,
    InvalidCallShape,
}

/// Any error that stops compilation of a source unit.
#[derive(Debug, Clone, PartialEq)]
pub enum CompileErr {
    Lex(LexErr),
    Parse(ParseErr),
    Sym { line: usize, pos: usize, err: SymErr },
}

impl CompileErr {
    pub fn sym(line: usize, pos: usize, err: SymErr) -> CompileErr {
        CompileErr::Sym { line, pos, err }
    }

    pub fn kind(&self) -> ErrKind {
        match self {
            CompileErr::Lex(_) => ErrKind::Lexical,
            CompileErr::Parse(e) => match e.ty {
                ParseErrTy::InvalidCallShape(_) => ErrKind::InvalidCallShape,
                _ => ErrKind::UnexpectedToken,
            },
            CompileErr::Sym { err, .. } => match err.ty {
                SymErrTy::Undeclared(_) => ErrKind::UnknownSymbol,
                SymErrTy::DuplicateDecl(_) => ErrKind::DuplicateDeclaration,
            },
        }
    }

    /// Source line the error was raised on.
    pub fn line(&self) -> usize {
        match self {
            CompileErr::Lex(e) => e.line,
            CompileErr::Parse(e) => e.line,
            CompileErr::Sym { line, .. } => *line,
        }
    }
}

impl JackErr for CompileErr {
    fn emit(&self) {
        match self {
            CompileErr::Lex(e) => e.emit(),
            CompileErr::Parse(e) => e.emit(),
            CompileErr::Sym { .. } => eprintln!("jackc: Symbol error - {}", self.to_msg()),
        }
    }

    fn to_msg(&self) -> String {
        match self {
            CompileErr::Lex(e) => e.to_msg(),
            CompileErr::Parse(e) => e.to_msg(),
            CompileErr::Sym { line, pos, err } => {
                format!("[Line {}:{}] {}", line, pos, err.to_msg())
            }
        }
    }
}

impl fmt::Display for CompileErr {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.to_msg())
    }
}

impl Error for CompileErr {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            CompileErr::Lex(e) => Some(e),
            CompileErr::Parse(e) => Some(e),
            CompileErr::Sym { err, .. } => Some(err),
        }
    }
}

impl From<LexErr> for CompileErr {
    fn from(e: LexErr) -> CompileErr {
        CompileErr::Lex(e)
    }
}

impl From<ParseErr> for CompileErr {
    fn from(e: ParseErr) -> CompileErr {
        CompileErr::Parse(e)
    }
}
