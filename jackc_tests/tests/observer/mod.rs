use jackc_bytecode::{
    compiler::Compiler,
    config::CompileConfig,
    observer::{NodeKind, ParseObserver},
};
use jackc_parse::{lex::Lexer, token::Token};
use std::fs::File;

const INPUT_PATH: &str = "./tests/observer/inputs";

#[derive(Debug, PartialEq)]
enum Event {
    Token(Token),
    Enter(NodeKind),
    Exit(NodeKind),
}

#[derive(Default)]
struct Recorder {
    events: Vec<Event>,
}

impl ParseObserver for Recorder {
    fn token(&mut self, tkn: &Token) {
        self.events.push(Event::Token(tkn.clone()));
    }

    fn enter(&mut self, node: NodeKind) {
        self.events.push(Event::Enter(node));
    }

    fn exit(&mut self, node: NodeKind) {
        self.events.push(Event::Exit(node));
    }
}

fn record(name: &str) -> Recorder {
    let path = format!("{}/{}.jack", INPUT_PATH, name);
    let mut rec = Recorder::default();

    let result = Compiler::new(File::open(path).unwrap(), CompileConfig::default())
        .with_observer(&mut rec)
        .compile();
    assert!(result.err.is_none(), "{:?}", result.err);

    rec
}

#[test]
fn nodes_balanced() {
    let rec = record("square");

    let mut open = Vec::new();
    for event in &rec.events {
        match event {
            Event::Enter(node) => open.push(*node),
            Event::Exit(node) => assert_eq!(open.pop(), Some(*node)),
            Event::Token(_) => assert!(!open.is_empty()),
        }
    }
    assert!(open.is_empty());

    assert_eq!(rec.events.first(), Some(&Event::Enter(NodeKind::Class)));
    assert_eq!(rec.events.last(), Some(&Event::Exit(NodeKind::Class)));
}

#[test]
fn every_token_reported_once() {
    let rec = record("square");

    let seen: Vec<Token> = rec
        .events
        .into_iter()
        .filter_map(|event| match event {
            Event::Token(tkn) => Some(tkn),
            _ => None,
        })
        .collect();

    let path = format!("{}/square.jack", INPUT_PATH);
    let lexed: Vec<Token> = Lexer::new(File::open(path).unwrap())
        .map(|tkn| tkn.unwrap())
        .collect();

    assert_eq!(seen, lexed);
}

#[test]
fn subroutine_structure() {
    let rec = record("square");

    let decs = rec
        .events
        .iter()
        .filter(|event| **event == Event::Enter(NodeKind::SubroutineDec))
        .count();
    let class_vars = rec
        .events
        .iter()
        .filter(|event| **event == Event::Enter(NodeKind::ClassVarDec))
        .count();
    let lists = rec
        .events
        .iter()
        .filter(|event| **event == Event::Enter(NodeKind::ParameterList))
        .count();

    assert_eq!(decs, 3);
    assert_eq!(class_vars, 2);
    assert_eq!(lists, 3);
}
