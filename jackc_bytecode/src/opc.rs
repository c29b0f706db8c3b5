use jackc_parse::{symtab::SymKind, token::Symbol};
use std::fmt;

/// Addressing regions of the virtual machine.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Segment {
    Constant,
    Argument,
    Local,
    Static,
    This,
    That,
    Pointer,
    Temp,
}

impl From<SymKind> for Segment {
    /// Fields are addressed through the `this` segment once the object base
    /// has been placed in `pointer 0`.
    fn from(kind: SymKind) -> Segment {
        match kind {
            SymKind::Static => Segment::Static,
            SymKind::Field => Segment::This,
            SymKind::Arg => Segment::Argument,
            SymKind::Local => Segment::Local,
        }
    }
}

impl fmt::Display for Segment {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let seg = match self {
            Segment::Constant => "constant",
            Segment::Argument => "argument",
            Segment::Local => "local",
            Segment::Static => "static",
            Segment::This => "this",
            Segment::That => "that",
            Segment::Pointer => "pointer",
            Segment::Temp => "temp",
        };

        write!(f, "{}", seg)
    }
}

/// Arithmetic and logical commands understood directly by the VM.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ArithOp {
    Add,
    Sub,
    Neg,
    Eq,
    Gt,
    Lt,
    And,
    Or,
    Not,
}

impl fmt::Display for ArithOp {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let op = match self {
            ArithOp::Add => "add",
            ArithOp::Sub => "sub",
            ArithOp::Neg => "neg",
            ArithOp::Eq => "eq",
            ArithOp::Gt => "gt",
            ArithOp::Lt => "lt",
            ArithOp::And => "and",
            ArithOp::Or => "or",
            ArithOp::Not => "not",
        };

        write!(f, "{}", op)
    }
}

/// Binary operators of the source language.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum BinOpKind {
    Add,
    Sub,
    Mul,
    Div,
    And,
    Or,
    Lt,
    Gt,
    Eq,
}

impl BinOpKind {
    pub fn from_sym(sym: Symbol) -> Option<BinOpKind> {
        let kind = match sym {
            Symbol::Plus => BinOpKind::Add,
            Symbol::Minus => BinOpKind::Sub,
            Symbol::Star => BinOpKind::Mul,
            Symbol::Slash => BinOpKind::Div,
            Symbol::Amp => BinOpKind::And,
            Symbol::Pipe => BinOpKind::Or,
            Symbol::Lt => BinOpKind::Lt,
            Symbol::Gt => BinOpKind::Gt,
            Symbol::Eq => BinOpKind::Eq,
            _ => return None,
        };

        Some(kind)
    }
}

/// Unary operators of the source language.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum UnOpKind {
    /// Arithmetic negation, `-`
    Nneg,
    /// Bitwise complement, `~`
    Lnot,
}

impl UnOpKind {
    pub fn from_sym(sym: Symbol) -> Option<UnOpKind> {
        match sym {
            Symbol::Minus => Some(UnOpKind::Nneg),
            Symbol::Tilde => Some(UnOpKind::Lnot),
            _ => None,
        }
    }
}
