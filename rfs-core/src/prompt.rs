//! Prompt selection for multi-line commands.

/// Default prompt for a new command.
pub const DEFAULT_PROMPT: &str = "> ";

/// Default prompt while a command spans several lines.
pub const DEFAULT_CONTINUATION_PROMPT: &str = "(cont) ";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum PromptMode {
    Normal,
    Continuation,
}

/// Single-bit state machine: a continuation request is consumed by the next
/// prompt.
#[derive(Debug, Clone)]
pub struct PromptState {
    mode: PromptMode,
    prompt: String,
    continuation: String,
}

impl Default for PromptState {
    fn default() -> Self {
        Self::new(DEFAULT_PROMPT, DEFAULT_CONTINUATION_PROMPT)
    }
}

impl PromptState {
    pub fn new(prompt: impl Into<String>, continuation: impl Into<String>) -> Self {
        Self {
            mode: PromptMode::Normal,
            prompt: prompt.into(),
            continuation: continuation.into(),
        }
    }

    /// The current command continues on the next input line.
    pub fn continue_line(&mut self) {
        self.mode = PromptMode::Continuation;
    }

    /// Prompt for the next input line.
    pub fn get_prompt(&mut self) -> &str {
        match self.mode {
            PromptMode::Continuation => {
                self.mode = PromptMode::Normal;
                &self.continuation
            }
            PromptMode::Normal => &self.prompt,
        }
    }

    /// Drop a pending continuation request.
    pub fn reset(&mut self) {
        self.mode = PromptMode::Normal;
    }

    pub fn is_continuation(&self) -> bool {
        self.mode == PromptMode::Continuation
    }
}
