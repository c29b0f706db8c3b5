use crate::{
    compiler::Compiler,
    observer::NodeKind,
    opc::{ArithOp, Segment},
};
use jackc_err::compile_err::CompileErr;
use jackc_parse::token::{Keyword, Symbol, TokenTy};
use std::io::Read;

/// Contains compiler functions for statements.

impl<'o, T> Compiler<'o, T>
where
    T: Read,
{
    /// Compiles statements until the next token doesn't start one. The caller
    /// matches the closing brace.
    ///
    /// statements ::= { letstmt | ifstmt | whilestmt | dostmt | returnstmt } ;
    pub(crate) fn statements(&mut self) -> Result<(), CompileErr> {
        self.enter(NodeKind::Statements);

        loop {
            match self.peek_ty()? {
                TokenTy::Keyword(Keyword::Let) => self.letstmt()?,
                TokenTy::Keyword(Keyword::If) => self.ifstmt()?,
                TokenTy::Keyword(Keyword::While) => self.whilestmt()?,
                TokenTy::Keyword(Keyword::Do) => self.dostmt()?,
                TokenTy::Keyword(Keyword::Return) => self.returnstmt()?,
                _ => break,
            }
        }

        self.exit(NodeKind::Statements);
        Ok(())
    }

    /// letstmt ::= "let" IDENT [ "[" expr "]" ] "=" expr ";" ;
    fn letstmt(&mut self) -> Result<(), CompileErr> {
        self.enter(NodeKind::LetStatement);
        self.expect_kw(Keyword::Let)?;

        let name_tkn = self.expect_ident()?;
        let target = self.lookup(&name_tkn)?;

        let indexed = self.optional_sym(Symbol::LeftBracket)?;
        if indexed {
            // Address of the target cell goes on the stack before the value.
            self.expr()?;
            self.expect_sym(Symbol::RightBracket)?;
            self.writer.write_push_sym(target.kind, target.idx);
            self.writer.write_arith(ArithOp::Add);
        }

        self.expect_sym(Symbol::Eq)?;
        self.expr()?;
        self.expect_sym(Symbol::Semicolon)?;

        if indexed {
            // The value is parked in temp 0 while `that` is pointed at the cell.
            self.writer.write_pop(Segment::Temp, 0);
            self.writer.write_pop(Segment::Pointer, 1);
            self.writer.write_push(Segment::Temp, 0);
            self.writer.write_pop(Segment::That, 0);
        } else {
            self.writer.write_pop_sym(target.kind, target.idx);
        }

        self.exit(NodeKind::LetStatement);
        Ok(())
    }

    /// Both labels are minted before any code for the statement is written.
    /// The else label is placed even when there is no else block.
    ///
    /// ifstmt ::= "if" "(" expr ")" "{" statements "}"
    ///            [ "else" "{" statements "}" ] ;
    fn ifstmt(&mut self) -> Result<(), CompileErr> {
        self.enter(NodeKind::IfStatement);
        self.expect_kw(Keyword::If)?;

        let else_lbl = self.new_lbl("IF_ELSE");
        let end_lbl = self.new_lbl("IF_END");

        self.expect_sym(Symbol::LeftParen)?;
        self.expr()?;
        self.expect_sym(Symbol::RightParen)?;

        self.writer.write_if(&else_lbl);

        self.block()?;
        self.writer.write_goto(&end_lbl);
        self.writer.write_label(&else_lbl);

        if self.peek_ty()?.is_kw(Keyword::Else) {
            self.consume()?;
            self.block()?;
        }

        self.writer.write_label(&end_lbl);

        self.exit(NodeKind::IfStatement);
        Ok(())
    }

    /// whilestmt ::= "while" "(" expr ")" "{" statements "}" ;
    fn whilestmt(&mut self) -> Result<(), CompileErr> {
        self.enter(NodeKind::WhileStatement);
        self.expect_kw(Keyword::While)?;

        let exp_lbl = self.new_lbl("WHILE_EXP");
        let end_lbl = self.new_lbl("WHILE_END");

        self.writer.write_label(&exp_lbl);

        self.expect_sym(Symbol::LeftParen)?;
        self.expr()?;
        self.expect_sym(Symbol::RightParen)?;

        self.writer.write_if(&end_lbl);

        self.block()?;
        self.writer.write_goto(&exp_lbl);
        self.writer.write_label(&end_lbl);

        self.exit(NodeKind::WhileStatement);
        Ok(())
    }

    /// The value returned by the call is discarded.
    ///
    /// dostmt ::= "do" subroutinecall ";" ;
    fn dostmt(&mut self) -> Result<(), CompileErr> {
        self.enter(NodeKind::DoStatement);
        self.expect_kw(Keyword::Do)?;

        let callee = self.expect_ident()?;
        self.subroutine_call(&callee)?;

        self.expect_sym(Symbol::Semicolon)?;
        self.writer.write_pop(Segment::Temp, 0);

        self.exit(NodeKind::DoStatement);
        Ok(())
    }

    /// Every subroutine returns a value. A bare return pushes 0.
    ///
    /// returnstmt ::= "return" [ expr ] ";" ;
    fn returnstmt(&mut self) -> Result<(), CompileErr> {
        self.enter(NodeKind::ReturnStatement);
        self.expect_kw(Keyword::Return)?;

        if self.peek_ty()?.is_sym(Symbol::Semicolon) {
            self.writer.write_push(Segment::Constant, 0);
        } else {
            self.expr()?;
        }

        self.expect_sym(Symbol::Semicolon)?;
        self.writer.write_return();

        self.exit(NodeKind::ReturnStatement);
        Ok(())
    }

    /// "{" statements "}"
    fn block(&mut self) -> Result<(), CompileErr> {
        self.expect_sym(Symbol::LeftBrace)?;
        self.statements()?;
        self.expect_sym(Symbol::RightBrace)?;
        Ok(())
    }
}
