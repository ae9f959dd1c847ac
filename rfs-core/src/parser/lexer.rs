//! Splits input text into commands and words.

/// Result of lexing a chunk of input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Lexed {
    /// Every command in the input, each as its list of words.
    Complete(Vec<Vec<String>>),
    /// Input ends inside a quote or after a trailing backslash.
    Incomplete,
}

#[derive(Clone, Copy, PartialEq)]
enum Quote {
    None,
    Single,
    Double,
}

/// Lex `input` into commands.
///
/// Words are whitespace separated; `;` and newline end a command. Single
/// quotes are literal, double quotes honour `\\ \" \n \t`. Outside quotes a
/// backslash escapes the next character and backslash-newline joins lines.
/// `#` at the start of a word comments out the rest of the line.
pub fn lex(input: &str) -> Lexed {
    let mut commands = Vec::new();
    let mut words: Vec<String> = Vec::new();
    let mut word = String::new();
    let mut in_word = false;
    let mut quote = Quote::None;
    let mut chars = input.chars().peekable();

    while let Some(c) = chars.next() {
        match quote {
            Quote::Single => {
                if c == '\'' {
                    quote = Quote::None;
                } else {
                    word.push(c);
                }
            }
            Quote::Double => match c {
                '"' => quote = Quote::None,
                '\\' => match chars.next() {
                    Some('n') => word.push('\n'),
                    Some('t') => word.push('\t'),
                    Some('\n') => {}
                    Some(other @ ('\\' | '"')) => word.push(other),
                    Some(other) => {
                        word.push('\\');
                        word.push(other);
                    }
                    None => return Lexed::Incomplete,
                },
                _ => word.push(c),
            },
            Quote::None => match c {
                '\'' => {
                    quote = Quote::Single;
                    in_word = true;
                }
                '"' => {
                    quote = Quote::Double;
                    in_word = true;
                }
                '\\' => match chars.next() {
                    Some('\n') => {}
                    Some(other) => {
                        word.push(other);
                        in_word = true;
                    }
                    None => return Lexed::Incomplete,
                },
                '#' if !in_word => {
                    // Comment runs to end of line; the newline still ends the command.
                    while chars.peek().is_some_and(|&next| next != '\n') {
                        chars.next();
                    }
                }
                ';' | '\n' => {
                    finish_word(&mut words, &mut word, &mut in_word);
                    if !words.is_empty() {
                        commands.push(std::mem::take(&mut words));
                    }
                }
                c if c.is_whitespace() => finish_word(&mut words, &mut word, &mut in_word),
                _ => {
                    word.push(c);
                    in_word = true;
                }
            },
        }
    }

    if quote != Quote::None {
        return Lexed::Incomplete;
    }
    finish_word(&mut words, &mut word, &mut in_word);
    if !words.is_empty() {
        commands.push(words);
    }
    Lexed::Complete(commands)
}

fn finish_word(words: &mut Vec<String>, word: &mut String, in_word: &mut bool) {
    if *in_word {
        words.push(std::mem::take(word));
        *in_word = false;
    }
}
