use crate::err::JackErr;
use std::{error::Error, fmt};

#[derive(Debug, Clone, PartialEq)]
pub enum LexErrTy {
    InvalidIdent(String),
    IntOutOfRange(String),
    UnterminatedString(String),
    UnterminatedComment,
    Io(String),
}

#[derive(Debug, Clone, PartialEq)]
pub struct LexErr {
    pub line: usize,
    pub pos: usize,
    pub ty: LexErrTy,
}

impl LexErr {
    pub fn new(line: usize, pos: usize, ty: LexErrTy) -> LexErr {
        LexErr { line, pos, ty }
    }
}

impl JackErr for LexErr {
    fn emit(&self) {
        eprintln!("jackc: Lex error - {}", self.to_msg());
    }

    fn to_msg(&self) -> String {
        let str_pos = format!("[Line {}:{}]", self.line, self.pos);

        match self.ty {
            LexErrTy::InvalidIdent(ref found) => {
                format!("{} Invalid identifier '{}'", str_pos, found)
            }
            LexErrTy::IntOutOfRange(ref found) => format!(
                "{} Integer constant '{}' is outside the range 0..=32767",
                str_pos, found
            ),
            LexErrTy::UnterminatedString(ref found) => {
                format!("{} Unterminated string literal '{}'", str_pos, found)
            }
            LexErrTy::UnterminatedComment => {
                format!("{} Unterminated block comment", str_pos)
            }
            LexErrTy::Io(ref msg) => format!("{} Could not read source: {}", str_pos, msg),
        }
    }
}

impl fmt::Display for LexErr {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.to_msg())
    }
}

impl Error for LexErr {}
