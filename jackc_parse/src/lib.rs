pub mod lex;
pub mod reserved;
pub mod symtab;
pub mod token;
