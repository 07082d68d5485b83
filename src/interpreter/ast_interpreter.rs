use crate::parser;

use super::RuntimeError;

pub struct AstInterpreter {}

impl AstInterpreter {
    pub fn new() -> Self {
        Self {}
    }

    pub fn interpret(
        &mut self,
        runtime: &mut super::Runtime,
        program: &crate::parser::Program,
    ) -> Result<(), RuntimeError> {
        self.interpret_block(runtime, program)
    }

    fn interpret_block(
        &mut self,
        runtime: &mut super::Runtime,
        block: &parser::BasicBlock,
    ) -> Result<(), RuntimeError> {
        // (block, next instruction) pairs, the bottom one is the program itself
        // and is the only block that doesn't repeat
        let mut frames: Vec<(&parser::BasicBlock, usize)> = vec![(block, 0)];

        while let Some(&(block, pc)) = frames.last() {
            let top = frames.len() - 1;
            let Some(instruction) = block.instructions.get(pc) else {
                // end of a loop body, go round again while the cell is non-zero
                if top > 0 && !runtime.value_is_zero() {
                    frames[top].1 = 0;
                } else {
                    frames.pop();
                }
                continue;
            };
            frames[top].1 += 1;

            match instruction {
                parser::AstKind::Increment => runtime.increment_data_pointer()?,
                parser::AstKind::Decrement => runtime.decrement_data_pointer()?,
                parser::AstKind::DerefIncrement => runtime.deref_and_add_value()?,
                parser::AstKind::DerefDecrement => runtime.deref_and_sub_value()?,
                parser::AstKind::Write => runtime.write()?,
                parser::AstKind::Read => runtime.read()?,
                parser::AstKind::Loop(sub_block) => {
                    // checked before every pass, including the first
                    if !runtime.value_is_zero() {
                        frames.push((sub_block, 0));
                    }
                }
            }
        }
        Ok(())
    }
}

impl Default for AstInterpreter {
    fn default() -> Self {
        Self::new()
    }
}
