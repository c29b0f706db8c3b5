extern crate jackc_bytecode;
extern crate jackc_err;
extern crate jackc_parse;

mod compile_fail;
mod compiler;
mod observer;
