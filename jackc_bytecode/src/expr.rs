use crate::{
    compiler::{ident_name, Compiler},
    observer::NodeKind,
    opc::{ArithOp, BinOpKind, Segment, UnOpKind},
};
use jackc_err::{
    compile_err::CompileErr,
    parse_err::{ParseErr, ParseErrTy},
};
use jackc_parse::{
    symtab::SymEntry,
    token::{Keyword, Symbol, Token, TokenTy},
};
use log::trace;
use std::io::Read;

/// How a subroutine call site names its callee. Decided once per call site,
/// from the token after the callee name and whether that name is a declared
/// variable.
#[derive(Clone, Debug, PartialEq)]
enum CallShape {
    /// `name(args)`: a method of the current class, called on `this`.
    Bare,
    /// `var.name(args)`: a method called on the object held by `var`.
    Variable(SymEntry),
    /// `Class.name(args)`: a function or constructor, no receiver.
    Class(String),
}

impl<'o, T> Compiler<'o, T>
where
    T: Read,
{
    /// Operators are applied strictly left to right, there is no precedence.
    ///
    /// expr ::= term { op term } ;
    pub(crate) fn expr(&mut self) -> Result<(), CompileErr> {
        self.enter(NodeKind::Expression);
        self.term()?;

        loop {
            let kind = match self.peek_ty()? {
                TokenTy::Symbol(sym) => BinOpKind::from_sym(sym),
                _ => None,
            };

            let kind = match kind {
                Some(kind) => kind,
                None => break,
            };

            self.consume()?;
            self.term()?;
            self.writer.write_binary(kind);
        }

        self.exit(NodeKind::Expression);
        Ok(())
    }

    /// term ::= INT | STRING | "true" | "false" | "null" | "this"
    ///        | IDENT | IDENT "[" expr "]" | subroutinecall
    ///        | "(" expr ")" | ( "-" | "~" ) term ;
    fn term(&mut self) -> Result<(), CompileErr> {
        self.enter(NodeKind::Term);

        let tkn = self.peek()?;
        match tkn.ty {
            TokenTy::IntConst(val) => {
                self.consume()?;
                self.writer.write_push(Segment::Constant, val as usize);
            }
            TokenTy::StrConst(ref s) => {
                self.consume()?;
                self.writer.write_str_const(s);
            }
            TokenTy::Keyword(kw) if kw.is_const() => {
                self.consume()?;
                self.keyword_const(kw);
            }
            TokenTy::Ident(_) => {
                self.consume()?;
                self.ident_term(&tkn)?;
            }
            TokenTy::Symbol(Symbol::LeftParen) => {
                self.consume()?;
                self.expr()?;
                self.expect_sym(Symbol::RightParen)?;
            }
            TokenTy::Symbol(sym) if sym.is_unary_op() => {
                self.consume()?;
                self.term()?;
                if let Some(kind) = UnOpKind::from_sym(sym) {
                    self.writer.write_unary(kind);
                }
            }
            _ => {
                return Err(CompileErr::from(ParseErr::new(
                    tkn.line,
                    tkn.pos,
                    ParseErrTy::InvalidTerm(tkn.to_string()),
                )))
            }
        }

        self.exit(NodeKind::Term);
        Ok(())
    }

    /// `true` is all ones, `false` and `null` are zero.
    fn keyword_const(&mut self, kw: Keyword) {
        match kw {
            Keyword::True => {
                self.writer.write_push(Segment::Constant, 1);
                self.writer.write_arith(ArithOp::Neg);
            }
            Keyword::This => self.writer.write_push(Segment::Pointer, 0),
            _ => self.writer.write_push(Segment::Constant, 0),
        }
    }

    /// Term starting with an identifier, which has already been consumed. The
    /// next token tells a variable, an array element and a call apart.
    fn ident_term(&mut self, name_tkn: &Token) -> Result<(), CompileErr> {
        match self.peek_ty()? {
            TokenTy::Symbol(Symbol::LeftBracket) => {
                let arr = self.lookup(name_tkn)?;
                self.consume()?;
                self.expr()?;
                self.expect_sym(Symbol::RightBracket)?;

                self.writer.write_push_sym(arr.kind, arr.idx);
                self.writer.write_arith(ArithOp::Add);
                self.writer.write_pop(Segment::Pointer, 1);
                self.writer.write_push(Segment::That, 0);
            }
            TokenTy::Symbol(Symbol::LeftParen) | TokenTy::Symbol(Symbol::Period) => {
                self.subroutine_call(name_tkn)?;
            }
            _ => {
                let var = self.lookup(name_tkn)?;
                self.writer.write_push_sym(var.kind, var.idx);
            }
        }

        Ok(())
    }

    /// Compiles a call whose callee name has already been consumed. The
    /// receiver of a method call is pushed ahead of the arguments and counted
    /// as one of them.
    ///
    /// subroutinecall ::= IDENT "(" exprlist ")"
    ///                  | IDENT "." IDENT "(" exprlist ")" ;
    pub(crate) fn subroutine_call(&mut self, callee: &Token) -> Result<(), CompileErr> {
        let shape = self.classify_call(callee)?;

        let (name, receiver) = match shape {
            CallShape::Bare => {
                self.writer.write_push(Segment::Pointer, 0);
                let name = format!("{}.{}", self.class_name, ident_name(callee));
                (name, 1)
            }
            CallShape::Variable(ref var) => {
                self.writer.write_push_sym(var.kind, var.idx);
                let sub_tkn = self.expect_ident()?;
                (format!("{}.{}", var.ty, ident_name(&sub_tkn)), 1)
            }
            CallShape::Class(ref class) => {
                let sub_tkn = self.expect_ident()?;
                (format!("{}.{}", class, ident_name(&sub_tkn)), 0)
            }
        };

        trace!("call {} as {:?}", name, shape);

        self.expect_sym(Symbol::LeftParen)?;
        let nargs = self.expression_list()?;
        self.expect_sym(Symbol::RightParen)?;

        self.writer.write_call(&name, nargs + receiver);
        Ok(())
    }

    /// Consumes the `.` of a qualified call.
    fn classify_call(&mut self, callee: &Token) -> Result<CallShape, CompileErr> {
        let next = self.peek()?;

        if next.ty.is_sym(Symbol::LeftParen) {
            return Ok(CallShape::Bare);
        }

        if !next.ty.is_sym(Symbol::Period) {
            return Err(call_shape_err(&next, callee));
        }
        self.consume()?;

        let name = ident_name(callee);
        match self.sym_tab.retrieve(&name) {
            Some(var) if is_primitive(&var.ty) => Err(call_shape_err(callee, callee)),
            Some(var) => Ok(CallShape::Variable(var.clone())),
            None => Ok(CallShape::Class(name)),
        }
    }

    /// Compiles a possibly empty, comma separated list of arguments and
    /// returns how many there were.
    ///
    /// exprlist ::= [ expr { "," expr } ] ;
    fn expression_list(&mut self) -> Result<usize, CompileErr> {
        self.enter(NodeKind::ExpressionList);

        let mut count = 0;
        if !self.peek_ty()?.is_sym(Symbol::RightParen) {
            loop {
                self.expr()?;
                count += 1;

                if !self.optional_sym(Symbol::Comma)? {
                    break;
                }
            }
        }

        self.exit(NodeKind::ExpressionList);
        Ok(count)
    }
}

fn is_primitive(ty: &str) -> bool {
    matches!(ty, "int" | "char" | "boolean")
}

fn call_shape_err(at: &Token, callee: &Token) -> CompileErr {
    CompileErr::from(ParseErr::new(
        at.line,
        at.pos,
        ParseErrTy::InvalidCallShape(callee.to_string()),
    ))
}
