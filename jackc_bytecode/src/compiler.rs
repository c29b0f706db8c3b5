use crate::{
    config::CompileConfig,
    instr::Instr,
    observer::{NodeKind, ParseObserver},
    opc::Segment,
    writer::VmWriter,
};
use jackc_err::{
    compile_err::CompileErr,
    parse_err::{ParseErr, ParseErrTy},
    sym_err::{SymErr, SymErrTy},
};
use jackc_parse::{
    lex::Lexer,
    symtab::{SymEntry, SymKind, SymTab},
    token::{Keyword, Symbol, Token, TokenTy},
};
use log::{debug, trace};
use std::io::Read;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SubKind {
    Constructor,
    Function,
    Method,
}

/// Output of compiling one source unit.
#[derive(Debug)]
pub struct CompileResult {
    /// Name of the compiled class, once the class header has been read.
    pub class_name: Option<String>,

    /// Instructions emitted for the unit. When `err` is set this is only
    /// the prefix emitted before the failure and is not a valid program.
    pub program: Vec<Instr>,

    /// The error that stopped compilation, if any.
    pub err: Option<CompileErr>,
}

impl CompileResult {
    pub fn has_err(&self) -> bool {
        self.err.is_some()
    }

    /// Discards partial output of a failed unit.
    pub fn into_result(self) -> Result<Vec<Instr>, CompileErr> {
        match self.err {
            Some(e) => Err(e),
            None => Ok(self.program),
        }
    }
}

/// [`Compiler`] is a single pass, recursive descent parser for one Jack class
/// that generates VM code as it recognizes each production. There is no AST:
/// every routine consumes its tokens and emits the instructions for its
/// construct as soon as the values it needs are on the stack.
///
/// Routines for optional or repeated productions peek at the next token and
/// return `Ok(false)` when the production does not apply. Required tokens
/// are matched with the `expect_*` helpers, which fail with a token mismatch
/// pointing at the offending token. Every error is fatal for the unit.
///
/// The compiler owns its lexer, symbol table and writer for the lifetime of
/// one unit, and is consumed by `compile()`.
pub struct Compiler<'o, T>
where
    T: Read,
{
    lexer: Lexer<T>,

    pub(crate) sym_tab: SymTab,

    pub(crate) writer: VmWriter,

    conf: CompileConfig,

    /// Optional hooks notified of every token and grammar node.
    observer: Option<&'o mut dyn ParseObserver>,

    /// Grammar nodes currently open, innermost last.
    nodes: Vec<NodeKind>,

    /// Name of the class being compiled. Used for subroutine names, bare
    /// method calls and the type of `this`.
    pub(crate) class_name: String,

    /// Name and kind of the subroutine being compiled.
    sub_name: String,
    sub_kind: SubKind,

    /// Number of labels minted so far in this unit.
    lbl_cnt: usize,
}

impl<'o, T> Compiler<'o, T>
where
    T: Read,
{
    pub fn new(input: T, conf: CompileConfig) -> Compiler<'o, T> {
        Compiler {
            lexer: Lexer::new(input),
            sym_tab: SymTab::new(),
            writer: VmWriter::new(),
            conf,
            observer: None,
            nodes: Vec::new(),
            class_name: String::new(),
            sub_name: String::new(),
            sub_kind: SubKind::Function,
            lbl_cnt: 0,
        }
    }

    /// Attach hooks that are notified as tokens are consumed and grammar
    /// nodes are entered and exited.
    pub fn with_observer(mut self, observer: &'o mut dyn ParseObserver) -> Compiler<'o, T> {
        self.observer = Some(observer);
        self
    }

    /// Compiles the whole source unit. Compilation stops at the first error.
    pub fn compile(mut self) -> CompileResult {
        let res = self.class();

        if let Err(ref e) = res {
            debug!("compilation stopped: {}", e);
        }

        let class_name = match self.class_name.is_empty() {
            true => None,
            false => Some(self.class_name),
        };

        CompileResult {
            class_name,
            program: self.writer.into_prog(),
            err: res.err(),
        }
    }

    /// Compiles a class, which must be the only thing in the unit.
    ///
    /// class ::= "class" IDENT "{" { classvardec } { subroutinedec } "}" ;
    fn class(&mut self) -> Result<(), CompileErr> {
        self.enter(NodeKind::Class);
        self.expect_kw(Keyword::Class)?;

        let name_tkn = self.expect_ident()?;
        self.class_name = ident_name(&name_tkn);

        if self.conf.header_comment {
            let header = format!("Compiled {}.jack", self.class_name);
            self.writer.write_comment(&header);
        }

        self.expect_sym(Symbol::LeftBrace)?;

        while self.class_var_dec()? {}

        if self.conf.dump_symbols {
            self.dump_symbols(&self.class_name, self.sym_tab.class_entries());
        }

        while self.subroutine_dec()? {}

        self.expect_sym(Symbol::RightBrace)?;
        self.exit(NodeKind::Class);

        let tkn = self.peek()?;
        if !tkn.is_eof() {
            return Err(mismatch(&tkn, "EOF"));
        }

        Ok(())
    }

    /// Compiles a static or field declaration. Nothing is emitted.
    ///
    /// classvardec ::= ( "static" | "field" ) type IDENT { "," IDENT } ";" ;
    fn class_var_dec(&mut self) -> Result<bool, CompileErr> {
        let kind = match self.peek_ty()? {
            TokenTy::Keyword(Keyword::Static) => SymKind::Static,
            TokenTy::Keyword(Keyword::Field) => SymKind::Field,
            _ => return Ok(false),
        };

        self.enter(NodeKind::ClassVarDec);
        self.consume()?;

        let ty = self.match_type(false)?;
        self.var_names(&ty, kind)?;

        self.exit(NodeKind::ClassVarDec);
        Ok(true)
    }

    /// Compiles a constructor, function or method. Resets the subroutine scope;
    /// methods get `this` defined as argument 0 ahead of the declared
    /// parameters.
    ///
    /// subroutinedec ::= ( "constructor" | "function" | "method" )
    ///                   ( "void" | type ) IDENT "(" paramlist ")" subroutinebody ;
    fn subroutine_dec(&mut self) -> Result<bool, CompileErr> {
        let sub_kind = match self.peek_ty()? {
            TokenTy::Keyword(Keyword::Constructor) => SubKind::Constructor,
            TokenTy::Keyword(Keyword::Function) => SubKind::Function,
            TokenTy::Keyword(Keyword::Method) => SubKind::Method,
            _ => return Ok(false),
        };

        self.enter(NodeKind::SubroutineDec);
        let kw_tkn = self.consume()?;

        self.sub_kind = sub_kind;
        self.sym_tab.start_subroutine();

        if sub_kind == SubKind::Method {
            let class_name = self.class_name.clone();
            self.sym_tab
                .define("this", &class_name, SymKind::Arg)
                .map_err(|e| sym_err(&kw_tkn, e))?;
        }

        self.match_type(true)?;
        let name_tkn = self.expect_ident()?;
        self.sub_name = ident_name(&name_tkn);

        self.expect_sym(Symbol::LeftParen)?;
        self.parameter_list()?;
        self.expect_sym(Symbol::RightParen)?;

        self.subroutine_body()?;

        self.exit(NodeKind::SubroutineDec);
        Ok(true)
    }

    /// Compiles a possibly empty parameter list and returns the number of
    /// declared parameters.
    ///
    /// paramlist ::= [ type IDENT { "," type IDENT } ] ;
    fn parameter_list(&mut self) -> Result<usize, CompileErr> {
        self.enter(NodeKind::ParameterList);

        let mut count = 0;
        if !self.peek_ty()?.is_sym(Symbol::RightParen) {
            loop {
                let ty = self.match_type(false)?;
                self.define_name(&ty, SymKind::Arg)?;
                count += 1;

                if !self.optional_sym(Symbol::Comma)? {
                    break;
                }
            }
        }

        self.exit(NodeKind::ParameterList);
        Ok(count)
    }

    /// Compiles a subroutine body. The function header is written once all
    /// locals are known; constructors then allocate the object and methods
    /// anchor `this` from argument 0 before any statement runs.
    ///
    /// subroutinebody ::= "{" { vardec } statements "}" ;
    fn subroutine_body(&mut self) -> Result<(), CompileErr> {
        self.enter(NodeKind::SubroutineBody);
        self.expect_sym(Symbol::LeftBrace)?;

        while self.var_dec()? {}

        let full_name = format!("{}.{}", self.class_name, self.sub_name);
        let nlocals = self.sym_tab.var_count(SymKind::Local);
        debug!(
            "compiling {:?} {} ({} args, {} locals)",
            self.sub_kind,
            full_name,
            self.sym_tab.var_count(SymKind::Arg),
            nlocals
        );

        if self.conf.dump_symbols {
            self.dump_symbols(&full_name, self.sym_tab.sub_entries());
        }

        self.writer.write_function(&full_name, nlocals);

        match self.sub_kind {
            SubKind::Constructor => {
                let nfields = self.sym_tab.var_count(SymKind::Field);
                self.writer.write_push(Segment::Constant, nfields);
                self.writer.write_call("Memory.alloc", 1);
                self.writer.write_pop(Segment::Pointer, 0);
            }
            SubKind::Method => {
                self.writer.write_push(Segment::Argument, 0);
                self.writer.write_pop(Segment::Pointer, 0);
            }
            SubKind::Function => {}
        }

        self.statements()?;

        self.expect_sym(Symbol::RightBrace)?;
        self.exit(NodeKind::SubroutineBody);
        Ok(())
    }

    /// Compiles a local variable declaration.
    ///
    /// vardec ::= "var" type IDENT { "," IDENT } ";" ;
    fn var_dec(&mut self) -> Result<bool, CompileErr> {
        if !self.peek_ty()?.is_kw(Keyword::Var) {
            return Ok(false);
        }

        self.enter(NodeKind::VarDec);
        self.consume()?;

        let ty = self.match_type(false)?;
        self.var_names(&ty, SymKind::Local)?;

        self.exit(NodeKind::VarDec);
        Ok(true)
    }

    /// Defines a comma separated list of names sharing one type and kind, up to
    /// and including the closing semicolon.
    fn var_names(&mut self, ty: &str, kind: SymKind) -> Result<(), CompileErr> {
        loop {
            self.define_name(ty, kind)?;

            if !self.optional_sym(Symbol::Comma)? {
                break;
            }
        }

        self.expect_sym(Symbol::Semicolon)?;
        Ok(())
    }

    /// Consumes an identifier and defines it in the symbol table.
    fn define_name(&mut self, ty: &str, kind: SymKind) -> Result<usize, CompileErr> {
        let tkn = self.expect_ident()?;
        self.sym_tab
            .define(&ident_name(&tkn), ty, kind)
            .map_err(|e| sym_err(&tkn, e))
    }

    /// Matches a type name: a primitive type, a class name or, where allowed,
    /// `void`. Returns the type's spelling.
    ///
    /// type ::= "int" | "char" | "boolean" | IDENT ;
    fn match_type(&mut self, allow_void: bool) -> Result<String, CompileErr> {
        let tkn = self.peek()?;

        let is_type = match tkn.ty {
            TokenTy::Keyword(kw) if kw.is_primitive_ty() => true,
            TokenTy::Keyword(Keyword::Void) => allow_void,
            TokenTy::Ident(_) => true,
            _ => false,
        };

        if !is_type {
            return Err(CompileErr::from(ParseErr::new(
                tkn.line,
                tkn.pos,
                ParseErrTy::InvalidType(tkn.to_string()),
            )));
        }

        let tkn = self.consume()?;
        Ok(tkn.to_string())
    }

    /// Look up a variable referenced by `tkn`.
    pub(crate) fn lookup(&self, tkn: &Token) -> Result<SymEntry, CompileErr> {
        let name = ident_name(tkn);
        match self.sym_tab.retrieve(&name) {
            Some(entry) => Ok(entry.clone()),
            None => Err(sym_err(tkn, SymErr::new(SymErrTy::Undeclared(name)))),
        }
    }

    /// Mints a label that is unique within the unit.
    pub(crate) fn new_lbl(&mut self, prefix: &str) -> String {
        let lbl = format!("{}_{}", prefix, self.lbl_cnt);
        self.lbl_cnt += 1;
        lbl
    }

    /// Return a copy of the next token without consuming it.
    pub(crate) fn peek(&mut self) -> Result<Token, CompileErr> {
        let tkn = self.lexer.peek()?;
        Ok(tkn.clone())
    }

    pub(crate) fn peek_ty(&mut self) -> Result<TokenTy, CompileErr> {
        Ok(self.peek()?.ty)
    }

    /// Advance to the next token, reporting it to the observer.
    pub(crate) fn consume(&mut self) -> Result<Token, CompileErr> {
        let tkn = self.lexer.advance()?;

        if let Some(obs) = self.observer.as_mut() {
            obs.token(&tkn);
        }

        Ok(tkn)
    }

    /// Check that the next token is the symbol we expect. If it is, consume the
    /// token. If it isn't, report a mismatch.
    pub(crate) fn expect_sym(&mut self, sym: Symbol) -> Result<Token, CompileErr> {
        let tkn = self.peek()?;
        match tkn.ty.is_sym(sym) {
            true => self.consume(),
            false => Err(mismatch(&tkn, &sym.to_string())),
        }
    }

    pub(crate) fn expect_kw(&mut self, kw: Keyword) -> Result<Token, CompileErr> {
        let tkn = self.peek()?;
        match tkn.ty.is_kw(kw) {
            true => self.consume(),
            false => Err(mismatch(&tkn, kw.as_str())),
        }
    }

    pub(crate) fn expect_ident(&mut self) -> Result<Token, CompileErr> {
        let tkn = self.peek()?;
        match tkn.is_ident() {
            true => self.consume(),
            false => Err(mismatch(&tkn, "identifier")),
        }
    }

    /// Consumes the symbol and returns true if it is next. Otherwise nothing
    /// is consumed and false is returned.
    pub(crate) fn optional_sym(&mut self, sym: Symbol) -> Result<bool, CompileErr> {
        if self.peek_ty()?.is_sym(sym) {
            self.consume()?;
            return Ok(true);
        }
        Ok(false)
    }

    pub(crate) fn enter(&mut self, node: NodeKind) {
        trace!("{:indent$}<{}>", "", node.tag(), indent = self.nodes.len() * 2);
        self.nodes.push(node);

        if let Some(obs) = self.observer.as_mut() {
            obs.enter(node);
        }
    }

    pub(crate) fn exit(&mut self, node: NodeKind) {
        self.nodes.pop();

        if let Some(obs) = self.observer.as_mut() {
            obs.exit(node);
        }
    }

    fn dump_symbols(&self, scope: &str, entries: Vec<(&str, &SymEntry)>) {
        debug!("symbol table for {}:", scope);
        for (name, entry) in entries {
            debug!(
                "  {:<16} {:<12} {:<10} {}",
                name, entry.ty, entry.kind, entry.idx
            );
        }
    }
}

/// Build a token mismatch error pointing at `found`.
pub(crate) fn mismatch(found: &Token, expected: &str) -> CompileErr {
    CompileErr::from(ParseErr::new(
        found.line,
        found.pos,
        ParseErrTy::TknMismatch(expected.to_string(), found.to_string()),
    ))
}

pub(crate) fn sym_err(tkn: &Token, e: SymErr) -> CompileErr {
    CompileErr::sym(tkn.line, tkn.pos, e)
}

/// Name of an identifier token. Callers only pass tokens already matched as
/// identifiers.
pub(crate) fn ident_name(tkn: &Token) -> String {
    tkn.get_name().unwrap_or_default().to_string()
}
