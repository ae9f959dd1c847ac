//! Interactive line source backed by rustyline.

use std::path::PathBuf;

use log::{debug, warn};
use rustyline::error::ReadlineError;
use rustyline::DefaultEditor;

use rfs_core::{check_line_len, InputLine, LineSource, RfsError, RfsResult};

/// Line editor with history, optionally persisted to a file.
pub struct EditorSource {
    editor: DefaultEditor,
    max_len: usize,
    history: Option<PathBuf>,
}

impl EditorSource {
    pub fn new(max_len: usize, history: Option<PathBuf>) -> RfsResult<Self> {
        let mut editor = DefaultEditor::new().map_err(|e| RfsError::Input(e.to_string()))?;
        if let Some(path) = &history {
            // A missing history file is normal on first use.
            if let Err(err) = editor.load_history(path) {
                debug!("no history loaded from {}: {}", path.display(), err);
            }
        }
        Ok(Self {
            editor,
            max_len,
            history,
        })
    }

    /// Write the history file, if one was configured.
    pub fn save_history(&mut self) {
        if let Some(path) = &self.history {
            if let Err(err) = self.editor.save_history(path) {
                warn!("failed to save history to {}: {}", path.display(), err);
            }
        }
    }
}

impl LineSource for EditorSource {
    fn read_line(&mut self, prompt: &str) -> RfsResult<InputLine> {
        match self.editor.readline(prompt) {
            Ok(line) => {
                let input = check_line_len(line, self.max_len);
                if let InputLine::Line(text) = &input {
                    if !text.trim().is_empty() {
                        let _ = self.editor.add_history_entry(text.as_str());
                    }
                }
                Ok(input)
            }
            Err(ReadlineError::Interrupted) => Ok(InputLine::Interrupted),
            Err(ReadlineError::Eof) => Ok(InputLine::Eof),
            Err(ReadlineError::Io(err)) => Err(err.into()),
            Err(err) => Err(RfsError::Input(err.to_string())),
        }
    }
}
