//! Command-line front end: lexing and command parsing.

mod command;
mod lexer;

pub use command::{Command, GrammarError, USAGE};
pub use lexer::{lex, Lexed};
