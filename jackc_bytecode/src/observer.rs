use jackc_parse::token::Token;

/// Grammar productions reported to a [`ParseObserver`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum NodeKind {
    Class,
    ClassVarDec,
    SubroutineDec,
    ParameterList,
    SubroutineBody,
    VarDec,
    Statements,
    LetStatement,
    IfStatement,
    WhileStatement,
    DoStatement,
    ReturnStatement,
    Expression,
    Term,
    ExpressionList,
}

impl NodeKind {
    /// Conventional tag name of the production, as used by parse tree dumps.
    pub fn tag(&self) -> &'static str {
        match self {
            NodeKind::Class => "class",
            NodeKind::ClassVarDec => "classVarDec",
            NodeKind::SubroutineDec => "subroutineDec",
            NodeKind::ParameterList => "parameterList",
            NodeKind::SubroutineBody => "subroutineBody",
            NodeKind::VarDec => "varDec",
            NodeKind::Statements => "statements",
            NodeKind::LetStatement => "letStatement",
            NodeKind::IfStatement => "ifStatement",
            NodeKind::WhileStatement => "whileStatement",
            NodeKind::DoStatement => "doStatement",
            NodeKind::ReturnStatement => "returnStatement",
            NodeKind::Expression => "expression",
            NodeKind::Term => "term",
            NodeKind::ExpressionList => "expressionList",
        }
    }
}

/// Hooks fired by the compiler while it recognizes a source unit: once per
/// token consumed and once per grammar node entered and exited. Entry and
/// exit calls are always balanced for a unit that compiles successfully.
pub trait ParseObserver {
    fn token(&mut self, _tkn: &Token) {}

    fn enter(&mut self, _node: NodeKind) {}

    fn exit(&mut self, _node: NodeKind) {}
}
