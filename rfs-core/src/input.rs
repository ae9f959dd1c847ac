//! Line sources feeding the interpreter.

use std::io::{BufRead, Read, Write};

use crate::error::RfsResult;

/// One request for input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InputLine {
    /// A line, without its terminator.
    Line(String),
    /// The line exceeded the maximum length and was discarded.
    TooLong,
    /// The line was not valid UTF-8 and was discarded.
    Malformed,
    /// The user abandoned the current command (Ctrl-C in an editor).
    Interrupted,
    /// No more input.
    Eof,
}

/// Supplier of input lines.
pub trait LineSource {
    /// Read one line, showing `prompt` if the source is interactive.
    fn read_line(&mut self, prompt: &str) -> RfsResult<InputLine>;
}

/// Apply the line length guard to a line read by any source.
pub fn check_line_len(line: String, max_len: usize) -> InputLine {
    if line.len() > max_len {
        InputLine::TooLong
    } else {
        InputLine::Line(line)
    }
}

/// Line-based source over any buffered reader.
///
/// The prompt is written to `prompt_out` before each read.
pub struct ReaderSource<R: BufRead, W: Write> {
    reader: R,
    prompt_out: W,
    max_len: usize,
}

impl<R: BufRead, W: Write> ReaderSource<R, W> {
    pub fn new(reader: R, prompt_out: W, max_len: usize) -> Self {
        Self {
            reader,
            prompt_out,
            max_len,
        }
    }

    /// Skip input up to and including the next newline.
    fn discard_rest_of_line(&mut self) -> RfsResult<()> {
        loop {
            let (done, used) = {
                let available = self.reader.fill_buf()?;
                if available.is_empty() {
                    return Ok(());
                }
                match available.iter().position(|&byte| byte == b'\n') {
                    Some(end) => (true, end + 1),
                    None => (false, available.len()),
                }
            };
            self.reader.consume(used);
            if done {
                return Ok(());
            }
        }
    }
}

impl<R: BufRead, W: Write> LineSource for ReaderSource<R, W> {
    fn read_line(&mut self, prompt: &str) -> RfsResult<InputLine> {
        write!(self.prompt_out, "{}", prompt)?;
        self.prompt_out.flush()?;

        // Room for the terminator; anything longer is rejected unread.
        let limit = self.max_len as u64 + 2;
        let mut buf = Vec::new();
        let read = self.reader.by_ref().take(limit).read_until(b'\n', &mut buf)?;
        if read == 0 {
            return Ok(InputLine::Eof);
        }
        if buf.last() == Some(&b'\n') {
            buf.pop();
            if buf.last() == Some(&b'\r') {
                buf.pop();
            }
        } else if read as u64 == limit {
            self.discard_rest_of_line()?;
            return Ok(InputLine::TooLong);
        }
        if buf.len() > self.max_len {
            return Ok(InputLine::TooLong);
        }
        match String::from_utf8(buf) {
            Ok(line) => Ok(InputLine::Line(line)),
            Err(_) => Ok(InputLine::Malformed),
        }
    }
}

/// Source that never prompts, for reading scripts.
pub fn script_source<R: BufRead>(reader: R, max_len: usize) -> ReaderSource<R, std::io::Sink> {
    ReaderSource::new(reader, std::io::sink(), max_len)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    #[test]
    fn test_reader_source_lines() {
        let mut out = Vec::new();
        {
            let mut source = ReaderSource::new(Cursor::new("ls\r\npwd"), &mut out, 80);
            assert_eq!(source.read_line("> ").unwrap(), InputLine::Line("ls".into()));
            assert_eq!(source.read_line("> ").unwrap(), InputLine::Line("pwd".into()));
            assert_eq!(source.read_line("> ").unwrap(), InputLine::Eof);
        }
        assert_eq!(String::from_utf8(out).unwrap(), "> > > ");
    }

    #[test]
    fn test_reader_source_too_long() {
        let input = format!("{}\nls\n", "x".repeat(11));
        let mut source = script_source(Cursor::new(input), 10);
        assert_eq!(source.read_line("").unwrap(), InputLine::TooLong);
        assert_eq!(source.read_line("").unwrap(), InputLine::Line("ls".into()));
    }

    #[test]
    fn test_unterminated_long_line_is_skipped() {
        let input = format!("{} tail\npwd\n", "y".repeat(4096));
        let mut source = script_source(Cursor::new(input), 8);
        assert_eq!(source.read_line("").unwrap(), InputLine::TooLong);
        assert_eq!(source.read_line("").unwrap(), InputLine::Line("pwd".into()));
        assert_eq!(source.read_line("").unwrap(), InputLine::Eof);
    }

    #[test]
    fn test_long_line_at_end_of_input() {
        let mut source = script_source(Cursor::new("z".repeat(100)), 8);
        assert_eq!(source.read_line("").unwrap(), InputLine::TooLong);
        assert_eq!(source.read_line("").unwrap(), InputLine::Eof);
    }

    #[test]
    fn test_crlf_fits_exact_limit() {
        let mut source = script_source(Cursor::new("abcd\r\nabcde\r\n"), 4);
        assert_eq!(source.read_line("").unwrap(), InputLine::Line("abcd".into()));
        assert_eq!(source.read_line("").unwrap(), InputLine::TooLong);
        assert_eq!(source.read_line("").unwrap(), InputLine::Eof);
    }

    #[test]
    fn test_invalid_utf8_is_malformed() {
        let input: &[u8] = b"mkdir a\n\xff\xfe\nls\n";
        let mut source = script_source(Cursor::new(input), 80);
        assert_eq!(
            source.read_line("").unwrap(),
            InputLine::Line("mkdir a".into())
        );
        assert_eq!(source.read_line("").unwrap(), InputLine::Malformed);
        assert_eq!(source.read_line("").unwrap(), InputLine::Line("ls".into()));
    }

    #[test]
    fn test_limit_is_inclusive() {
        assert_eq!(
            check_line_len("x".repeat(10), 10),
            InputLine::Line("x".repeat(10))
        );
    }
}
