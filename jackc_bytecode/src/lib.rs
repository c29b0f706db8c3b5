pub mod compiler;
pub mod config;
pub mod instr;
pub mod observer;
pub mod opc;
pub mod writer;

mod expr;
mod stmt;
