//! Parsed shell commands.

use thiserror::Error;

/// Grammar-level failures. Each one counts toward the session's exit status.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum GrammarError {
    #[error("unknown command '{0}'")]
    UnknownCommand(String),

    #[error("'{0}' takes no arguments")]
    NoArguments(&'static str),

    #[error("'{0}' takes at most one argument")]
    AtMostOne(&'static str),

    #[error("'{0}' requires exactly one argument")]
    ExactlyOne(&'static str),

    #[error("'{0}' requires at least one argument")]
    AtLeastOne(&'static str),

    #[error("input line too long")]
    LineTooLong,

    #[error("input line is not valid UTF-8")]
    MalformedLine,

    #[error("unexpected end of input")]
    UnexpectedEof,
}

/// One command of the shell grammar.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Help,
    Pwd,
    Cd(Option<String>),
    Ls,
    Lr,
    Mkdir(Vec<String>),
    Mkfile(Vec<String>),
    Rm(Vec<String>),
    Cat(String),
    Write { file: String, lines: Vec<String> },
    Exit,
}

impl Command {
    /// Build a command from its words. The first word is the keyword.
    pub fn parse(words: Vec<String>) -> Result<Self, GrammarError> {
        let mut words = words.into_iter();
        let Some(keyword) = words.next() else {
            return Err(GrammarError::UnexpectedEof);
        };
        let args: Vec<String> = words.collect();

        let command = match keyword.as_str() {
            "help" => no_args("help", args, Command::Help)?,
            "pwd" => no_args("pwd", args, Command::Pwd)?,
            "ls" => no_args("ls", args, Command::Ls)?,
            "lr" => no_args("lr", args, Command::Lr)?,
            "exit" => no_args("exit", args, Command::Exit)?,
            "quit" => no_args("quit", args, Command::Exit)?,
            "cd" => {
                if args.len() > 1 {
                    return Err(GrammarError::AtMostOne("cd"));
                }
                Command::Cd(args.into_iter().next())
            }
            "cat" => {
                let mut args = args.into_iter();
                match (args.next(), args.next()) {
                    (Some(file), None) => Command::Cat(file),
                    _ => return Err(GrammarError::ExactlyOne("cat")),
                }
            }
            "mkdir" => Command::Mkdir(at_least_one("mkdir", args)?),
            "mkfile" => Command::Mkfile(at_least_one("mkfile", args)?),
            "rm" => Command::Rm(at_least_one("rm", args)?),
            "write" => {
                let mut args = at_least_one("write", args)?.into_iter();
                let file = args.next().ok_or(GrammarError::AtLeastOne("write"))?;
                Command::Write {
                    file,
                    lines: args.collect(),
                }
            }
            _ => return Err(GrammarError::UnknownCommand(keyword)),
        };
        Ok(command)
    }

    /// Keyword used to label diagnostics for this command.
    pub fn keyword(&self) -> &'static str {
        match self {
            Command::Help => "help",
            Command::Pwd => "pwd",
            Command::Cd(_) => "cd",
            Command::Ls => "ls",
            Command::Lr => "lr",
            Command::Mkdir(_) => "mkdir",
            Command::Mkfile(_) => "mkfile",
            Command::Rm(_) => "rm",
            Command::Cat(_) => "cat",
            Command::Write { .. } => "write",
            Command::Exit => "exit",
        }
    }
}

fn no_args(
    keyword: &'static str,
    args: Vec<String>,
    command: Command,
) -> Result<Command, GrammarError> {
    if args.is_empty() {
        Ok(command)
    } else {
        Err(GrammarError::NoArguments(keyword))
    }
}

fn at_least_one(keyword: &'static str, args: Vec<String>) -> Result<Vec<String>, GrammarError> {
    if args.is_empty() {
        Err(GrammarError::AtLeastOne(keyword))
    } else {
        Ok(args)
    }
}

/// Command summary printed by `help`.
pub const USAGE: &str = "\
help                    Print this message.
pwd                     Print current directory (/ = root).
cd [DIR]                Change directory (/ or empty = root).
ls                      List current directory.
lr                      Recursively list current directory.
mkdir DIR [DIR...]      Create directories DIR in current directory.
mkfile FILE [FILE...]   Create files FILE in current directory.
rm NAME [NAME...]       Delete directory or file NAME (rm * to delete all).
cat FILE                List the contents of FILE.
write FILE [STRING...]  Write STRING to FILE.
exit, quit              Exit this program.";
