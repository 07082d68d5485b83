use tracing::debug;

use crate::lexer::{lexer::Lexer, LexerTokenKind, Position, Token};

use super::{AstKind, BasicBlock, ParseError, Program};

/// A loop that has been opened but not yet closed
struct LoopFrame {
    start: Position,
    block: BasicBlock,
}

/// Builds the instruction tree from tokens.
///
/// Nesting is tracked with an explicit stack of frames rather than recursion
/// so deeply nested programs can't blow the native stack.
/// The parser keeps no state between calls so it can be reused freely.
#[derive(Debug, Default, Clone, Copy)]
pub struct Parser;

impl Parser {
    pub fn new() -> Parser {
        Parser
    }

    pub fn parse_source(&self, source: &str) -> Result<Program, ParseError> {
        let tokens = Lexer::new(source).collect_results();
        self.parse_program(&tokens)
    }

    pub fn parse_program(&self, tokens: &[Token]) -> Result<Program, ParseError> {
        let mut root = BasicBlock::default();
        let mut frames: Vec<LoopFrame> = vec![];

        for token in tokens.iter() {
            let instruction = match token.kind {
                LexerTokenKind::Increment => AstKind::Increment,
                LexerTokenKind::Decrement => AstKind::Decrement,
                LexerTokenKind::DerefIncrement => AstKind::DerefIncrement,
                LexerTokenKind::DerefDecrement => AstKind::DerefDecrement,
                LexerTokenKind::Write => AstKind::Write,
                LexerTokenKind::Read => AstKind::Read,
                LexerTokenKind::JumpStart => {
                    frames.push(LoopFrame {
                        start: token.position,
                        block: BasicBlock::default(),
                    });
                    continue;
                }
                LexerTokenKind::JumpEnd => match frames.pop() {
                    Some(frame) => AstKind::Loop(frame.block),
                    None => {
                        return Err(ParseError::UnmatchedClose {
                            line: token.position.line,
                            col: token.position.col,
                        })
                    }
                },
                // we aren't outputting comments to AST
                LexerTokenKind::Comment(_) => continue,
                LexerTokenKind::EOF => break,
            };

            match frames.last_mut() {
                Some(frame) => frame.block.instructions.push(instruction),
                None => root.instructions.push(instruction),
            }
        }

        // report the innermost loop that never closed
        if let Some(frame) = frames.pop() {
            return Err(ParseError::UnterminatedLoop {
                line: frame.start.line,
                col: frame.start.col,
            });
        }

        debug!(
            tokens = tokens.len(),
            nodes = root.node_count(),
            "parsed program"
        );
        Ok(root)
    }
}
