//! Shell configuration.

use crate::prompt::{DEFAULT_CONTINUATION_PROMPT, DEFAULT_PROMPT};

/// Default maximum length of one input line, in bytes.
pub const DEFAULT_MAX_LINE_LEN: usize = 4096;

/// Settings for an interpreter session.
#[derive(Debug, Clone)]
pub struct ShellConfig {
    /// Prompt for a new command.
    pub prompt: String,
    /// Prompt while a command spans several lines.
    pub continuation_prompt: String,
    /// Longest accepted input line, in bytes (excluding the newline).
    pub max_line_len: usize,
    /// Print the command summary when the session starts.
    pub banner: bool,
}

impl Default for ShellConfig {
    fn default() -> Self {
        Self {
            prompt: DEFAULT_PROMPT.to_string(),
            continuation_prompt: DEFAULT_CONTINUATION_PROMPT.to_string(),
            max_line_len: DEFAULT_MAX_LINE_LEN,
            banner: true,
        }
    }
}
