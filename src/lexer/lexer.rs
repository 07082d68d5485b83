use colored::Colorize;

use super::{is_token_char, LexerError, LexerTokenKind, Position, Token};

#[derive(Debug, Clone)]
pub struct Lexer<'a> {
    /** Human Readable positions in file */
    pub cur_line: usize,
    pub cur_col: usize,

    chars: std::iter::Peekable<std::str::Chars<'a>>,
}

impl<'a> Lexer<'a> {
    pub fn new(chars: &'a str) -> Lexer<'a> {
        Lexer {
            cur_col: 1,
            cur_line: 1,

            chars: chars.chars().peekable(),
        }
    }

    fn transform_to_type(&mut self, c: char) -> LexerTokenKind {
        match c {
            '>' => LexerTokenKind::Increment,
            '<' => LexerTokenKind::Decrement,
            '+' => LexerTokenKind::DerefIncrement,
            '-' => LexerTokenKind::DerefDecrement,
            '.' => LexerTokenKind::Write,
            ',' => LexerTokenKind::Read,
            '[' => LexerTokenKind::JumpStart,
            ']' => LexerTokenKind::JumpEnd,
            c => {
                // Simplify the comment stream down to strings
                let mut comment = String::from(c);
                while let Some(next) = self.chars.peek() {
                    if is_token_char(*next) {
                        break;
                    }
                    if let Some(next) = self.consume_char() {
                        comment.push(next);
                    }
                }

                LexerTokenKind::Comment(comment)
            }
        }
    }

    fn consume_char(&mut self) -> Option<char> {
        match self.chars.next() {
            Some(c) => {
                self.cur_col += 1;
                if c == '\n' {
                    self.cur_line += 1;
                    self.cur_col = 1;
                }
                Some(c)
            }
            None => None,
        }
    }

    fn skip_whitespace(&mut self) {
        while let Some(c) = self.chars.peek() {
            if !c.is_whitespace() {
                break;
            }
            self.consume_char();
        }
    }

    pub fn next_token(&mut self) -> Token {
        self.skip_whitespace();

        let position = Position {
            line: self.cur_line,
            col: self.cur_col,
        };
        let kind = match self.consume_char() {
            Some(c) => self.transform_to_type(c),
            None => LexerTokenKind::EOF,
        };

        Token { kind, position }
    }

    /// All significant tokens, comments are dropped
    pub fn collect_results(&mut self) -> Vec<Token> {
        let mut v = vec![];
        loop {
            let token = self.next_token();
            match token.kind {
                LexerTokenKind::EOF => return v,
                LexerTokenKind::Comment(_) => continue,
                _ => v.push(token),
            }
        }
    }

    /// Every token including comments, used for the token dump
    pub fn collect(&mut self) -> Vec<Token> {
        let mut v = vec![];
        loop {
            let token = self.next_token();
            if token.kind == LexerTokenKind::EOF {
                break v;
            }
            v.push(token);
        }
    }

    /// Reads a program from disk and lexes it
    pub fn lex_file(path: &str) -> Result<(String, Vec<Token>), LexerError> {
        let text = std::fs::read_to_string(path)?;
        let tokens = Lexer::new(&text).collect_results();
        Ok((text, tokens))
    }

    /// Prints tokens back as source, comments are dimmed
    pub fn print_tokens(tokens: &[Token]) {
        for token in tokens.iter() {
            match (&token.kind, token.kind.symbol()) {
                (LexerTokenKind::Comment(c), _) => print!("{}", c.as_str().dimmed()),
                (_, Some(symbol)) => print!("{}", symbol),
                (_, None) => {}
            }
        }
        println!();
    }
}
