//! Command interpreter - runs shell commands against a node registry.
//!
//! The interpreter keeps the navigation stack on the client side: the front
//! of the deque is the current directory, the back is always the root.
//! Named remote failures (`NameInUse`, `NoSuchName`, `PermissionDenied`) are
//! turned into one-line diagnostics where they happen; any other failure
//! aborts the current command only.

use std::collections::VecDeque;
use std::fmt;

use log::{debug, warn};

use crate::config::ShellConfig;
use crate::console::ShellConsole;
use crate::error::{RfsError, RfsResult};
use crate::input::{InputLine, LineSource};
use crate::node::{DirectoryHandle, Handle, NodeDesc, NodeKind, NodeRef};
use crate::parser::{lex, Command, GrammarError, Lexed, USAGE};
use crate::prompt::PromptState;
use crate::registry::Registry;

/// Result of executing a single command.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommandStatus {
    /// Continue reading commands.
    Continue,
    /// End the session.
    Quit,
}

/// Shell driver: owns the navigation stack and the session's error count.
pub struct Interpreter<R: Registry, C: ShellConsole> {
    registry: R,
    console: C,
    dirs: VecDeque<DirectoryHandle>,
    prompt: PromptState,
    errors: usize,
    config: ShellConfig,
}

impl<R: Registry, C: ShellConsole> Interpreter<R, C> {
    /// Create an interpreter positioned at the registry's root.
    pub fn new(registry: R, console: C) -> Self {
        Self::with_config(registry, console, ShellConfig::default())
    }

    pub fn with_config(registry: R, console: C, config: ShellConfig) -> Self {
        let mut dirs = VecDeque::new();
        dirs.push_front(registry.root());
        let prompt = PromptState::new(config.prompt.clone(), config.continuation_prompt.clone());
        Self {
            registry,
            console,
            dirs,
            prompt,
            errors: 0,
            config,
        }
    }

    pub fn registry(&self) -> &R {
        &self.registry
    }

    pub fn console(&self) -> &C {
        &self.console
    }

    pub fn console_mut(&mut self) -> &mut C {
        &mut self.console
    }

    /// Consume the interpreter and return the registry and console.
    pub fn into_parts(self) -> (R, C) {
        (self.registry, self.console)
    }

    /// Directory at the top of the navigation stack.
    pub fn current_dir(&self) -> DirectoryHandle {
        // The root is never popped, so the stack always has a front.
        self.dirs
            .front()
            .copied()
            .unwrap_or_else(|| self.registry.root())
    }

    /// Number of entries on the navigation stack (1 at the root).
    pub fn depth(&self) -> usize {
        self.dirs.len()
    }

    /// Grammar errors reported so far.
    pub fn errors(&self) -> usize {
        self.errors
    }

    /// Session exit status: 0 without grammar errors, 1 otherwise.
    pub fn exit_status(&self) -> i32 {
        if self.errors == 0 {
            0
        } else {
            1
        }
    }

    /// Print the command summary.
    pub fn usage(&mut self) {
        for line in USAGE.lines() {
            self.console.out_line(line);
        }
    }

    /// Report a grammar error; counts toward the exit status.
    pub fn error(&mut self, message: impl fmt::Display) {
        self.console.err_line(&format!("error: {}", message));
        self.errors += 1;
    }

    /// Report a grammar warning; does not affect the exit status.
    pub fn warning(&mut self, message: impl fmt::Display) {
        self.console.err_line(&format!("warning: {}", message));
    }

    /// The current command continues on the next input line.
    pub fn continue_line(&mut self) {
        self.prompt.continue_line();
    }

    /// Prompt for the next input line.
    pub fn get_prompt(&mut self) -> String {
        self.prompt.get_prompt().to_string()
    }

    /// Run a session until `exit`, `quit` or end of input.
    ///
    /// Returns the session exit status.
    pub fn run<L: LineSource>(&mut self, source: &mut L) -> RfsResult<i32> {
        self.errors = 0;
        self.prompt.reset();
        if self.config.banner {
            self.usage();
        }

        let mut pending = String::new();
        loop {
            let prompt = self.get_prompt();
            match source.read_line(&prompt)? {
                InputLine::Eof => {
                    if !pending.is_empty() {
                        self.error(GrammarError::UnexpectedEof);
                    }
                    break;
                }
                InputLine::TooLong => {
                    pending.clear();
                    self.error(GrammarError::LineTooLong);
                }
                InputLine::Malformed => {
                    pending.clear();
                    self.error(GrammarError::MalformedLine);
                }
                InputLine::Interrupted => {
                    pending.clear();
                    self.prompt.reset();
                }
                InputLine::Line(line) => {
                    if !pending.is_empty() {
                        pending.push('\n');
                    }
                    pending.push_str(&line);
                    match lex(&pending) {
                        Lexed::Incomplete => self.continue_line(),
                        Lexed::Complete(commands) => {
                            pending.clear();
                            if self.run_commands(commands) == CommandStatus::Quit {
                                break;
                            }
                        }
                    }
                }
            }
        }
        Ok(self.exit_status())
    }

    /// Lex, parse and run one complete line of input.
    pub fn execute_line(&mut self, line: &str) -> CommandStatus {
        match lex(line) {
            Lexed::Complete(commands) => self.run_commands(commands),
            Lexed::Incomplete => {
                self.error(GrammarError::UnexpectedEof);
                CommandStatus::Continue
            }
        }
    }

    fn run_commands(&mut self, commands: Vec<Vec<String>>) -> CommandStatus {
        for words in commands {
            match Command::parse(words) {
                Ok(command) => {
                    if self.dispatch(command) == CommandStatus::Quit {
                        return CommandStatus::Quit;
                    }
                }
                Err(err) => self.error(err),
            }
        }
        CommandStatus::Continue
    }

    /// Run a command, reporting unexpected failures without ending the session.
    pub fn dispatch(&mut self, command: Command) -> CommandStatus {
        debug!("dispatching {:?}", command);
        let keyword = command.keyword();
        match self.execute(command) {
            Ok(status) => status,
            Err(err) => {
                warn!("{} failed: {}", keyword, err);
                self.console.err_line(&format!("{}: {}", keyword, err));
                CommandStatus::Continue
            }
        }
    }

    /// Execute a single command.
    ///
    /// Named remote failures are reported here and never returned.
    pub fn execute(&mut self, command: Command) -> RfsResult<CommandStatus> {
        match command {
            Command::Help => self.usage(),
            Command::Pwd => {
                let path = self.current_path()?;
                self.console.out_line(&path);
            }
            Command::Cd(dir) => self.cd(dir.as_deref())?,
            Command::Ls => self.list(self.current_dir(), false, 0)?,
            Command::Lr => self.list(self.current_dir(), true, 0)?,
            Command::Mkdir(names) => self.create(names, NodeKind::Directory)?,
            Command::Mkfile(names) => self.create(names, NodeKind::File)?,
            Command::Rm(names) => self.destroy(names)?,
            Command::Cat(file) => self.cat(&file)?,
            Command::Write { file, lines } => self.write(&file, lines)?,
            Command::Exit => return Ok(CommandStatus::Quit),
        }
        Ok(CommandStatus::Continue)
    }

    /// Path of the current directory, `/` at the root.
    pub fn current_path(&self) -> RfsResult<String> {
        if self.dirs.len() == 1 {
            return Ok("/".to_string());
        }
        let mut path = String::new();
        for dir in self.dirs.iter().rev().skip(1) {
            path.push('/');
            path.push_str(&self.registry.name(dir.handle())?);
        }
        Ok(path)
    }

    fn cd(&mut self, name: Option<&str>) -> RfsResult<()> {
        match name {
            None | Some("/") => {
                while self.dirs.len() > 1 {
                    self.dirs.pop_front();
                }
            }
            Some("..") => {
                if self.dirs.len() > 1 {
                    self.dirs.pop_front();
                }
            }
            Some(name) => {
                let Some(desc) = self.lookup(name, "no such directory")? else {
                    return Ok(());
                };
                match desc.resolve() {
                    NodeRef::Directory(dir) => self.dirs.push_front(dir),
                    NodeRef::File(_) => self.report(&format!("{}: not a directory", name)),
                }
            }
        }
        Ok(())
    }

    fn list(&mut self, dir: DirectoryHandle, recursive: bool, depth: usize) -> RfsResult<()> {
        let indent = "\t".repeat(depth);
        for entry in self.registry.list(dir)? {
            match entry.resolve() {
                NodeRef::Directory(child) if recursive => {
                    self.console
                        .out_line(&format!("{}{} (directory):", indent, entry.name));
                    self.list(child, true, depth + 1)?;
                }
                _ => self.console.out_line(&format!(
                    "{}{} ({})",
                    indent,
                    entry.name,
                    entry.kind.label()
                )),
            }
        }
        Ok(())
    }

    fn create(&mut self, names: Vec<String>, kind: NodeKind) -> RfsResult<()> {
        let dir = self.current_dir();
        for name in names {
            if name.is_empty() {
                self.report(&format!("cannot create a {} with an empty name", kind.label()));
                continue;
            }
            if name == ".." {
                self.report(&format!("cannot create a {} named '..'", kind.label()));
                continue;
            }
            let created = match kind {
                NodeKind::File => self.registry.create_file(dir, &name).map(Handle::from),
                NodeKind::Directory => self
                    .registry
                    .create_directory(dir, &name)
                    .map(Handle::from),
            };
            match created {
                Ok(_) => {}
                Err(RfsError::NameInUse(_)) => self.report(&format!("{}: exists already", name)),
                Err(err) => return Err(err),
            }
        }
        Ok(())
    }

    fn cat(&mut self, name: &str) -> RfsResult<()> {
        let Some(desc) = self.lookup(name, "no such file")? else {
            return Ok(());
        };
        let NodeRef::File(file) = desc.resolve() else {
            self.report(&format!("{}: not a file", name));
            return Ok(());
        };
        for line in self.registry.read(file)? {
            self.console.out_line(&line);
        }
        Ok(())
    }

    fn write(&mut self, name: &str, lines: Vec<String>) -> RfsResult<()> {
        let Some(desc) = self.lookup(name, "no such file")? else {
            return Ok(());
        };
        let NodeRef::File(file) = desc.resolve() else {
            self.report(&format!("{}: not a file", name));
            return Ok(());
        };
        self.registry.write(file, lines)
    }

    fn destroy(&mut self, names: Vec<String>) -> RfsResult<()> {
        let dir = self.current_dir();
        let mut names = names.into_iter();
        while let Some(name) = names.next() {
            if name == "*" {
                if names.next().is_some() {
                    self.warning("'rm *' ignores the remaining arguments");
                }
                for entry in self.registry.list(dir)? {
                    self.destroy_one(&entry.name, entry.handle)?;
                }
                return Ok(());
            }

            let Some(desc) = self.lookup(&name, "no such file or directory")? else {
                return Ok(());
            };
            self.destroy_one(&name, desc.handle)?;
        }
        Ok(())
    }

    fn destroy_one(&mut self, name: &str, node: Handle) -> RfsResult<()> {
        match self.registry.destroy(node) {
            Ok(()) => Ok(()),
            Err(RfsError::PermissionDenied(reason)) => {
                self.report(&format!("cannot remove {}: {}", name, reason));
                Ok(())
            }
            Err(err) => Err(err),
        }
    }

    /// Find `name` in the current directory, reporting `missing` if absent.
    fn lookup(&mut self, name: &str, missing: &str) -> RfsResult<Option<NodeDesc>> {
        match self.registry.find(self.current_dir(), name) {
            Ok(desc) => Ok(Some(desc)),
            Err(RfsError::NoSuchName(_)) => {
                self.report(&format!("{}: {}", name, missing));
                Ok(None)
            }
            Err(err) => Err(err),
        }
    }

    fn report(&mut self, diagnostic: &str) {
        self.console.err_line(diagnostic);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::console::HeadlessConsole;
    use crate::registry::{DirectoryOps, FileOps, MemoryRegistry, NodeOps};

    fn shell() -> Interpreter<MemoryRegistry, HeadlessConsole> {
        Interpreter::new(MemoryRegistry::new(), HeadlessConsole::new())
    }

    fn run(interp: &mut Interpreter<MemoryRegistry, HeadlessConsole>, line: &str) -> Vec<String> {
        interp.console_mut().clear();
        interp.execute_line(line);
        interp.console().out_lines().to_vec()
    }

    fn errors(interp: &Interpreter<MemoryRegistry, HeadlessConsole>) -> Vec<String> {
        interp.console().err_lines().to_vec()
    }

    #[test]
    fn test_pwd_at_root() {
        let mut interp = shell();
        assert_eq!(run(&mut interp, "pwd"), ["/"]);
    }

    #[test]
    fn test_cd_and_back() {
        let mut interp = shell();
        run(&mut interp, "mkdir a; cd a; mkdir b; cd b");
        assert_eq!(run(&mut interp, "pwd"), ["/a/b"]);
        assert_eq!(interp.depth(), 3);

        run(&mut interp, "cd ..");
        assert_eq!(run(&mut interp, "pwd"), ["/a"]);

        run(&mut interp, "cd b; cd /");
        assert_eq!(run(&mut interp, "pwd"), ["/"]);
        assert_eq!(interp.depth(), 1);
    }

    #[test]
    fn test_cd_empty_goes_to_root() {
        let mut interp = shell();
        run(&mut interp, "mkdir a; cd a; cd");
        assert_eq!(interp.current_dir(), interp.registry().root());
    }

    #[test]
    fn test_cd_dotdot_at_root_stays() {
        let mut interp = shell();
        run(&mut interp, "cd ..");
        assert_eq!(interp.depth(), 1);
        assert!(errors(&interp).is_empty());
    }

    #[test]
    fn test_cd_errors_leave_stack() {
        let mut interp = shell();
        run(&mut interp, "mkfile f; cd nope");
        assert_eq!(errors(&interp), ["nope: no such directory"]);
        run(&mut interp, "cd f");
        assert_eq!(errors(&interp), ["f: not a directory"]);
        assert_eq!(interp.depth(), 1);
        assert_eq!(interp.errors(), 0);
    }

    #[test]
    fn test_ls_labels_in_creation_order() {
        let mut interp = shell();
        run(&mut interp, "mkfile z; mkdir a; mkfile m");
        assert_eq!(
            run(&mut interp, "ls"),
            ["z (file)", "a (directory)", "m (file)"]
        );
    }

    #[test]
    fn test_lr_indents_by_depth() {
        let mut interp = shell();
        run(&mut interp, "mkdir a; cd a; mkdir b; mkfile f; cd b; mkfile g; cd /; mkfile top");
        assert_eq!(
            run(&mut interp, "lr"),
            [
                "a (directory):",
                "\tb (directory):",
                "\t\tg (file)",
                "\tf (file)",
                "top (file)",
            ]
        );
        assert_eq!(run(&mut interp, "ls"), ["a (directory)", "top (file)"]);
    }

    #[test]
    fn test_create_duplicates_and_reserved() {
        let mut interp = shell();
        run(&mut interp, "mkdir a .. b a; mkfile b ..");
        assert_eq!(
            errors(&interp),
            [
                "cannot create a directory named '..'",
                "a: exists already",
                "b: exists already",
                "cannot create a file named '..'",
            ]
        );
        assert_eq!(run(&mut interp, "ls"), ["a (directory)", "b (directory)"]);
        assert_eq!(interp.errors(), 0);
    }

    #[test]
    fn test_create_refuses_empty_name() {
        let mut interp = shell();
        run(&mut interp, "mkdir '' a; mkfile \"\"");
        assert_eq!(
            errors(&interp),
            [
                "cannot create a directory with an empty name",
                "cannot create a file with an empty name",
            ]
        );
        assert_eq!(run(&mut interp, "ls"), ["a (directory)"]);
        assert_eq!(interp.errors(), 0);
    }

    #[test]
    fn test_write_then_cat_replaces() {
        let mut interp = shell();
        run(&mut interp, "mkfile f; write f old content here");
        run(&mut interp, "write f a b c");
        assert_eq!(run(&mut interp, "cat f"), ["a", "b", "c"]);
        run(&mut interp, "write f");
        assert!(run(&mut interp, "cat f").is_empty());
    }

    #[test]
    fn test_cat_and_write_errors() {
        let mut interp = shell();
        run(&mut interp, "mkdir d; cat nope; cat d; write nope x; write d x");
        assert_eq!(
            errors(&interp),
            [
                "nope: no such file",
                "d: not a file",
                "nope: no such file",
                "d: not a file",
            ]
        );
    }

    #[test]
    fn test_rm_missing_aborts_rest() {
        let mut interp = shell();
        run(&mut interp, "mkfile a b; rm a nope b");
        assert_eq!(errors(&interp), ["nope: no such file or directory"]);
        assert_eq!(run(&mut interp, "ls"), ["b (file)"]);
    }

    #[test]
    fn test_rm_star_partial_failure() {
        let mut interp = shell();
        run(&mut interp, "mkfile a; mkdir full; mkfile c; cd full; mkfile inner; cd ..");
        let c = interp.registry().find(interp.current_dir(), "c").unwrap();
        interp.registry().protect(c.handle).unwrap();

        run(&mut interp, "rm *");
        assert_eq!(
            errors(&interp),
            [
                "cannot remove full: directory not empty",
                "cannot remove c: node is protected",
            ]
        );
        assert_eq!(run(&mut interp, "ls"), ["full (directory)", "c (file)"]);
    }

    #[test]
    fn test_rm_star_consumes_command() {
        let mut interp = shell();
        run(&mut interp, "mkfile a; rm * nope");
        assert_eq!(
            errors(&interp),
            ["warning: 'rm *' ignores the remaining arguments"]
        );
        assert!(run(&mut interp, "ls").is_empty());
        assert_eq!(interp.errors(), 0);
    }

    #[test]
    fn test_rm_star_in_empty_directory() {
        let mut interp = shell();
        run(&mut interp, "mkdir d; cd d; rm *");
        assert!(errors(&interp).is_empty());
        assert_eq!(run(&mut interp, "pwd"), ["/d"]);
    }

    #[test]
    fn test_grammar_errors_counted() {
        let mut interp = shell();
        run(&mut interp, "frob; ls extra");
        assert_eq!(
            errors(&interp),
            [
                "error: unknown command 'frob'",
                "error: 'ls' takes no arguments",
            ]
        );
        assert_eq!(interp.errors(), 2);
        assert_eq!(interp.exit_status(), 1);
    }

    #[test]
    fn test_exit_and_quit() {
        let mut interp = shell();
        assert_eq!(interp.execute_line("exit"), CommandStatus::Quit);
        assert_eq!(interp.execute_line("quit"), CommandStatus::Quit);
        assert_eq!(interp.execute_line("pwd; quit; mkdir late"), CommandStatus::Quit);
        assert!(interp.registry().list(interp.current_dir()).unwrap().is_empty());
    }

    #[test]
    fn test_removed_current_directory_is_reported() {
        let mut interp = shell();
        run(&mut interp, "mkdir d; cd d");
        let d = interp.current_dir();
        interp.registry().destroy(d.handle()).unwrap();

        assert_eq!(interp.execute_line("ls"), CommandStatus::Continue);
        assert_eq!(errors(&interp), [format!("ls: object does not exist: {}", d.handle())]);
        assert_eq!(interp.errors(), 0);

        run(&mut interp, "cd ..");
        assert_eq!(run(&mut interp, "pwd"), ["/"]);
    }

    #[test]
    fn test_help_prints_usage() {
        let mut interp = shell();
        let out = run(&mut interp, "help");
        assert_eq!(out.len(), USAGE.lines().count());
        assert!(out[0].starts_with("help"));
    }

    #[test]
    fn test_write_preserves_quoted_lines() {
        let mut interp = shell();
        run(&mut interp, "mkfile f; write f 'first line' \"second\\tline\"");
        let f = interp.registry().find(interp.current_dir(), "f").unwrap();
        let NodeRef::File(file) = f.resolve() else {
            panic!("expected a file");
        };
        assert_eq!(
            interp.registry().read(file).unwrap(),
            ["first line", "second\tline"]
        );
    }
}
