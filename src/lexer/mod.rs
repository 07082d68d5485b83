use thiserror::Error;

pub mod lexer;

#[derive(Debug, Clone, PartialEq)]
pub enum LexerTokenKind {
    // `>`: Increment the `data pointer` by one
    Increment,
    // `<`: Decrement the `data pointer` by one
    Decrement,

    // `+`: Increment the cell at the `data pointer` by one
    DerefIncrement,
    // `-`: Decrement the cell at the `data pointer` by one
    DerefDecrement,

    // `.`: Write the cell at the `data pointer` to the output buffer as a character
    Write,
    // `,`: Read the next character from the input stream and store its code point at the `data pointer`
    Read,

    // `[`: Start of a loop that runs while the cell at the `data pointer` is non-zero
    JumpStart,
    // `]`: End of the innermost open loop
    JumpEnd,

    // End of file: no more tokens left
    EOF,

    // Comment every other character
    Comment(String),
}

impl LexerTokenKind {
    /// The source character for a token, `None` for comments and EOF
    pub fn symbol(&self) -> Option<char> {
        match self {
            LexerTokenKind::Increment => Some('>'),
            LexerTokenKind::Decrement => Some('<'),
            LexerTokenKind::DerefIncrement => Some('+'),
            LexerTokenKind::DerefDecrement => Some('-'),
            LexerTokenKind::Write => Some('.'),
            LexerTokenKind::Read => Some(','),
            LexerTokenKind::JumpStart => Some('['),
            LexerTokenKind::JumpEnd => Some(']'),
            LexerTokenKind::EOF | LexerTokenKind::Comment(_) => None,
        }
    }
}

/// Is `c` one of the 8 program symbols?
pub fn is_token_char(c: char) -> bool {
    matches!(c, '>' | '<' | '+' | '-' | '.' | ',' | '[' | ']')
}

/// Strips out every character that isn't a program symbol
pub fn normalize(source: &str) -> String {
    source.chars().filter(|c| is_token_char(*c)).collect()
}

/// Human readable location of a token (1-based)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Position {
    pub line: usize,
    pub col: usize,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Token {
    pub kind: LexerTokenKind,
    pub position: Position,
}

#[derive(Error, Debug)]
pub enum LexerError {
    #[error("IO Error")]
    FileIO(
        #[from]
        std::io::Error,
    ),
}
