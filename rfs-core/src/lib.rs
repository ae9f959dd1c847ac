//! Remote node filesystem core
//!
//! This crate provides the pieces of an interactive shell over a tree of
//! directories and files that are only reachable through opaque handles:
//! - Node handles and entry descriptors
//! - The node registry contract and an in-memory reference registry
//! - A lexer and parser for the shell grammar
//! - The command interpreter with its navigation stack
//!
//! # Architecture
//!
//! The shell is layered:
//! - `Registry` trait: every operation on a node goes through a handle
//! - `LineSource` trait: where input lines come from
//! - `ShellConsole` trait: where output and diagnostics go
//! - `Interpreter`: turns parsed commands into registry calls

pub mod config;
pub mod console;
pub mod error;
pub mod input;
pub mod interpreter;
pub mod node;
pub mod parser;
pub mod prompt;
pub mod registry;

pub use config::{ShellConfig, DEFAULT_MAX_LINE_LEN};
pub use console::{HeadlessConsole, ShellConsole, StdConsole};
pub use error::{RfsError, RfsResult};
pub use input::{check_line_len, script_source, InputLine, LineSource, ReaderSource};
pub use interpreter::{CommandStatus, Interpreter};
pub use node::{DirectoryHandle, FileHandle, Handle, NodeDesc, NodeKind, NodeRef};
pub use parser::{Command, GrammarError, USAGE};
pub use prompt::PromptState;
pub use registry::{
    load_seed, load_seed_from_path, DirectoryOps, FileOps, MemoryRegistry, NodeOps, Registry,
    SeedNode, SeedTree,
};
