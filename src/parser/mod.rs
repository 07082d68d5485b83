use thiserror::Error;

pub mod parser;

#[derive(Debug, Clone, PartialEq)]
pub enum AstKind {
    Increment,
    Decrement,

    DerefIncrement,
    DerefDecrement,

    Write,
    Read,

    Loop(BasicBlock),
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct BasicBlock {
    pub instructions: Vec<AstKind>,
}

pub type Program = BasicBlock;

impl BasicBlock {
    /// Renders the tree back into normalized source
    pub fn unparse(&self) -> String {
        let mut out = String::new();
        let mut frames: Vec<(&BasicBlock, usize)> = vec![(self, 0)];

        while let Some(&(block, pc)) = frames.last() {
            let top = frames.len() - 1;
            match block.instructions.get(pc) {
                Some(instruction) => {
                    frames[top].1 += 1;
                    match instruction {
                        AstKind::Increment => out.push('>'),
                        AstKind::Decrement => out.push('<'),
                        AstKind::DerefIncrement => out.push('+'),
                        AstKind::DerefDecrement => out.push('-'),
                        AstKind::Write => out.push('.'),
                        AstKind::Read => out.push(','),
                        AstKind::Loop(body) => {
                            out.push('[');
                            frames.push((body, 0));
                        }
                    }
                }
                None => {
                    frames.pop();
                    // every frame but the root is a loop body
                    if !frames.is_empty() {
                        out.push(']');
                    }
                }
            }
        }
        out
    }

    /// Total number of nodes in the tree, loops included
    pub fn node_count(&self) -> usize {
        let mut count = 0;
        let mut pending = vec![self];
        while let Some(block) = pending.pop() {
            count += block.instructions.len();
            for instruction in block.instructions.iter() {
                if let AstKind::Loop(body) = instruction {
                    pending.push(body);
                }
            }
        }
        count
    }
}

impl Drop for BasicBlock {
    // nested loops are freed one at a time so deep trees don't overflow the stack
    fn drop(&mut self) {
        let mut pending: Vec<BasicBlock> = vec![];
        for instruction in self.instructions.drain(..) {
            if let AstKind::Loop(body) = instruction {
                pending.push(body);
            }
        }
        while let Some(mut block) = pending.pop() {
            for instruction in block.instructions.drain(..) {
                if let AstKind::Loop(body) = instruction {
                    pending.push(body);
                }
            }
        }
    }
}

#[derive(Error, Debug, Clone, PartialEq)]
pub enum ParseError {
    #[error("Unmatched ']' at {line}:{col}, there is no open '[' for it")]
    UnmatchedClose { line: usize, col: usize },

    #[error("Unterminated '[' at {line}:{col}, there is no ']' for it")]
    UnterminatedLoop { line: usize, col: usize },
}
