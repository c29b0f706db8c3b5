pub mod compile_err;
pub mod err;
pub mod lex_err;
pub mod parse_err;
pub mod sym_err;
