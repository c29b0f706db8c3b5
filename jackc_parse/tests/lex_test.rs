use jackc_err::lex_err::LexErrTy;
use jackc_parse::{
    lex::Lexer,
    token::{Keyword, Symbol, TokenKind, TokenTy},
};
use std::fs::File;

fn lexer_for(name: &str) -> Lexer<File> {
    let path = format!("./tests/lex_input/{}", name);
    let infile = File::open(&path).unwrap();
    Lexer::new(infile)
}

#[test]
fn test_lex_single_char() {
    let lexer = lexer_for("single_char");
    let syms: Vec<TokenTy> = lexer.map(|tkn| tkn.unwrap().ty).collect();

    let expected = vec![
        Symbol::LeftBrace,
        Symbol::RightBrace,
        Symbol::LeftParen,
        Symbol::RightParen,
        Symbol::LeftBracket,
        Symbol::RightBracket,
        Symbol::Period,
        Symbol::Comma,
        Symbol::Semicolon,
        Symbol::Plus,
        Symbol::Minus,
        Symbol::Star,
        Symbol::Slash,
        Symbol::Amp,
        Symbol::Pipe,
        Symbol::Lt,
        Symbol::Gt,
        Symbol::Eq,
        Symbol::Tilde,
    ];
    let expected: Vec<TokenTy> = expected.into_iter().map(TokenTy::Symbol).collect();

    assert_eq!(syms, expected);
}

#[test]
fn test_lex_keywords() {
    let lexer = lexer_for("keywords");
    let tkns: Vec<TokenTy> = lexer.map(|tkn| tkn.unwrap().ty).collect();

    assert_eq!(tkns.len(), 21);
    assert_eq!(tkns[0], TokenTy::Keyword(Keyword::Class));
    assert_eq!(tkns[7], TokenTy::Keyword(Keyword::Int));
    assert_eq!(tkns[14], TokenTy::Keyword(Keyword::This));
    assert_eq!(tkns[20], TokenTy::Keyword(Keyword::Return));
    assert!(tkns.iter().all(|ty| ty.kind() == TokenKind::Keyword));
}

#[test]
fn test_lex_skips_comments() {
    let lexer = lexer_for("comments");
    let tkns: Vec<TokenTy> = lexer.map(|tkn| tkn.unwrap().ty).collect();

    assert_eq!(
        tkns,
        vec![
            TokenTy::Keyword(Keyword::Let),
            TokenTy::Ident(String::from("x")),
            TokenTy::Symbol(Symbol::Eq),
            TokenTy::IntConst(12),
            TokenTy::Symbol(Symbol::Semicolon),
            TokenTy::StrConst(String::from("a // not a comment")),
        ]
    );
}

#[test]
fn test_lex_positions() {
    let mut lexer = lexer_for("positions");

    let class_tkn = lexer.advance().unwrap();
    assert_eq!((class_tkn.line, class_tkn.pos), (1, 0));

    let name_tkn = lexer.advance().unwrap();
    assert_eq!(name_tkn.get_name(), Some("Main"));
    assert_eq!((name_tkn.line, name_tkn.pos), (1, 6));

    lexer.advance().unwrap();
    let let_tkn = lexer.advance().unwrap();
    assert_eq!((let_tkn.line, let_tkn.pos), (2, 2));

    lexer.advance().unwrap();
    lexer.advance().unwrap();
    let str_tkn = lexer.advance().unwrap();
    assert_eq!(str_tkn.ty, TokenTy::StrConst(String::from("hello world")));
    assert_eq!((str_tkn.line, str_tkn.pos), (2, 10));
}

#[test]
fn test_lex_peek_then_advance() {
    let mut lexer = lexer_for("positions");

    assert!(lexer.curr().is_none());
    assert!(lexer.has_more());

    let peeked = lexer.peek().unwrap().clone();
    assert_eq!(peeked.ty, TokenTy::Keyword(Keyword::Class));

    // Peeking twice doesn't move ahead.
    assert_eq!(lexer.peek().unwrap(), &peeked);

    let tkn = lexer.advance().unwrap();
    assert_eq!(tkn, peeked);
    assert_eq!(lexer.curr(), Some(&peeked));
}

#[test]
fn test_lex_eof_repeats() {
    let mut lexer = Lexer::new("x".as_bytes());

    assert!(lexer.advance().unwrap().is_ident());
    assert!(!lexer.has_more());
    assert!(lexer.advance().unwrap().is_eof());
    assert!(lexer.advance().unwrap().is_eof());
}

#[test]
fn test_lex_empty_input_eof_on_line_one() {
    let mut lexer = Lexer::new("".as_bytes());

    let tkn = lexer.advance().unwrap();
    assert!(tkn.is_eof());
    assert_eq!((tkn.line, tkn.pos), (1, 0));
}

#[test]
fn test_lex_unterminated_str() {
    let mut lexer = lexer_for("unterminated_str");

    let err = lexer.advance().unwrap_err();
    assert_eq!(
        err.ty,
        LexErrTy::UnterminatedString(String::from("never closed"))
    );
    assert_eq!((err.line, err.pos), (1, 0));
}

#[test]
fn test_lex_unterminated_comment() {
    let mut lexer = lexer_for("unterminated_comment");

    for _ in 0..3 {
        lexer.advance().unwrap();
    }

    let err = lexer.advance().unwrap_err();
    assert_eq!(err.ty, LexErrTy::UnterminatedComment);
    assert_eq!((err.line, err.pos), (1, 7));
}

#[test]
fn test_lex_int_range() {
    let mut lexer = lexer_for("int_range");

    assert_eq!(lexer.advance().unwrap().ty, TokenTy::IntConst(32767));

    let err = lexer.advance().unwrap_err();
    assert_eq!(err.ty, LexErrTy::IntOutOfRange(String::from("32768")));
}

#[test]
fn test_lex_invalid_ident() {
    let lexer = lexer_for("invalid_ident");
    let results: Vec<_> = lexer.collect();

    // Iteration stops after the first error.
    assert_eq!(results.len(), 2);
    assert!(results[0].is_ok());
    assert_eq!(
        results[1].as_ref().unwrap_err().ty,
        LexErrTy::InvalidIdent(String::from("9lives"))
    );
}
