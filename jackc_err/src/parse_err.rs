use crate::err::JackErr;
use std::{error::Error, fmt};

#[derive(Debug, Clone, PartialEq)]
pub enum ParseErrTy {
    /// A required literal value or token kind was not found.
    TknMismatch(String, String),
    InvalidType(String),
    InvalidTerm(String),
    InvalidCallShape(String),
}

#[derive(Debug, Clone, PartialEq)]
pub struct ParseErr {
    pub line: usize,
    pub pos: usize,
    pub ty: ParseErrTy,
}

impl ParseErr {
    pub fn new(line: usize, pos: usize, ty: ParseErrTy) -> ParseErr {
        ParseErr { line, pos, ty }
    }
}

impl JackErr for ParseErr {
    fn emit(&self) {
        eprintln!("jackc: Parse error - {}", self.to_msg());
    }

    fn to_msg(&self) -> String {
        let str_pos = format!("[Line {}:{}]", self.line, self.pos);

        match self.ty {
            ParseErrTy::TknMismatch(ref expected, ref found) => format!(
                "{} Expected token '{}', but found '{}'",
                str_pos, expected, found
            ),
            ParseErrTy::InvalidType(ref found) => {
                format!("{} '{}' is not a valid type", str_pos, found)
            }
            ParseErrTy::InvalidTerm(ref found) => {
                format!("{} A term cannot start with '{}'", str_pos, found)
            }
            ParseErrTy::InvalidCallShape(ref found) => format!(
                "{} '{}' is not a valid subroutine call",
                str_pos, found
            ),
        }
    }
}

impl fmt::Display for ParseErr {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.to_msg())
    }
}

impl Error for ParseErr {}
