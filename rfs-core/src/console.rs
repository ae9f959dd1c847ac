//! Output abstraction for the shell.
//!
//! The `ShellConsole` trait separates regular output from diagnostics so the
//! interpreter works identically against a terminal (StdConsole) and in tests
//! (HeadlessConsole).

use std::io::Write;

/// Line-oriented output for the interpreter.
pub trait ShellConsole: Send {
    /// Write one line of regular output.
    fn out_line(&mut self, line: &str);

    /// Write one line to the diagnostic stream.
    fn err_line(&mut self, line: &str);
}

/// Console writing to the process's stdout and stderr.
#[derive(Default)]
pub struct StdConsole;

impl StdConsole {
    pub fn new() -> Self {
        Self
    }
}

impl ShellConsole for StdConsole {
    fn out_line(&mut self, line: &str) {
        let stdout = std::io::stdout();
        let mut handle = stdout.lock();
        let _ = writeln!(handle, "{}", line);
        let _ = handle.flush();
    }

    fn err_line(&mut self, line: &str) {
        let stderr = std::io::stderr();
        let mut handle = stderr.lock();
        let _ = writeln!(handle, "{}", line);
    }
}

/// Headless console for testing - captures both streams.
#[derive(Default)]
pub struct HeadlessConsole {
    out: Vec<String>,
    err: Vec<String>,
}

impl HeadlessConsole {
    pub fn new() -> Self {
        Self::default()
    }

    /// Regular output lines, oldest first.
    pub fn out_lines(&self) -> &[String] {
        &self.out
    }

    /// Diagnostic lines, oldest first.
    pub fn err_lines(&self) -> &[String] {
        &self.err
    }

    /// Regular output joined with newlines.
    pub fn output_string(&self) -> String {
        join_lines(&self.out)
    }

    /// Diagnostics joined with newlines.
    pub fn error_string(&self) -> String {
        join_lines(&self.err)
    }

    /// Clear both buffers.
    pub fn clear(&mut self) {
        self.out.clear();
        self.err.clear();
    }
}

fn join_lines(lines: &[String]) -> String {
    let mut text = String::new();
    for line in lines {
        text.push_str(line);
        text.push('\n');
    }
    text
}

impl ShellConsole for HeadlessConsole {
    fn out_line(&mut self, line: &str) {
        self.out.push(line.to_string());
    }

    fn err_line(&mut self, line: &str) {
        self.err.push(line.to_string());
    }
}
