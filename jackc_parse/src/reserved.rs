use crate::token::{Keyword, Symbol};

use std::collections::HashMap;

/// Largest value an integer constant may hold.
pub const INT_CONST_MAX: u16 = 32767;

pub fn get_keywords() -> HashMap<String, Keyword> {
    [
        (String::from("class"), Keyword::Class),
        (String::from("constructor"), Keyword::Constructor),
        (String::from("function"), Keyword::Function),
        (String::from("method"), Keyword::Method),
        (String::from("field"), Keyword::Field),
        (String::from("static"), Keyword::Static),
        (String::from("var"), Keyword::Var),
        (String::from("int"), Keyword::Int),
        (String::from("char"), Keyword::Char),
        (String::from("boolean"), Keyword::Boolean),
        (String::from("void"), Keyword::Void),
        (String::from("true"), Keyword::True),
        (String::from("false"), Keyword::False),
        (String::from("null"), Keyword::Null),
        (String::from("this"), Keyword::This),
        (String::from("let"), Keyword::Let),
        (String::from("do"), Keyword::Do),
        (String::from("if"), Keyword::If),
        (String::from("else"), Keyword::Else),
        (String::from("while"), Keyword::While),
        (String::from("return"), Keyword::Return),
    ]
    .iter()
    .cloned()
    .collect()
}

pub fn is_symbol(ch: char) -> bool {
    Symbol::from_char(ch).is_some()
}

/// True if the word is a valid identifier: a letter or underscore followed by
/// letters, digits or underscores.
pub fn is_valid_ident(word: &str) -> bool {
    let mut chars = word.chars();
    match chars.next() {
        Some(ch) if ch.is_ascii_alphabetic() || ch == '_' => {
            chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
        }
        _ => false,
    }
}
