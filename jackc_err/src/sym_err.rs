use crate::err::JackErr;
use std::{error::Error, fmt};

#[derive(Debug, Clone, PartialEq)]
pub enum SymErrTy {
    Undeclared(String),
    DuplicateDecl(String),
}

/// Symbol table errors carry no position: the table never sees tokens. The
/// compiler attaches the position of the offending token when it wraps them.
#[derive(Debug, Clone, PartialEq)]
pub struct SymErr {
    pub ty: SymErrTy,
}

impl SymErr {
    pub fn new(ty: SymErrTy) -> SymErr {
        SymErr { ty }
    }
}

impl JackErr for SymErr {
    fn emit(&self) {
        eprintln!("jackc: Symbol error - {}", self.to_msg());
    }

    fn to_msg(&self) -> String {
        match self.ty {
            SymErrTy::Undeclared(ref name) => format!("Undeclared symbol '{}' found", name),
            SymErrTy::DuplicateDecl(ref name) => {
                format!("Symbol '{}' is already declared in this scope", name)
            }
        }
    }
}

impl fmt::Display for SymErr {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.to_msg())
    }
}

impl Error for SymErr {}
