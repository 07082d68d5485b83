pub mod ast_interpreter;

use std::{
    collections::VecDeque,
    io::{self, BufRead, BufReader},
};

use thiserror::Error;
use tracing::debug;

use crate::{
    memory::SparseMemory,
    parser::{parser::Parser, ParseError, Program},
};

use self::ast_interpreter::AstInterpreter;

/// Default number of addressable cells
pub const MAX_SLOTS: usize = 30_000;

#[derive(Error, Debug)]
pub enum RuntimeError {
    #[error("Data pointer overflow, can't move past cell {} (memory size {size})", .size - 1)]
    PointerOverflow { size: usize },

    #[error("Data pointer underflow, can't move left of cell 0")]
    PointerUnderflow,

    #[error("Cell {pointer} overflowed")]
    CellOverflow { pointer: usize },

    #[error("Cell {pointer} holds {value} which isn't a valid character")]
    InvalidCodepoint { value: i64, pointer: usize },

    #[error("Input stream ended")]
    EndOfInput,

    #[error("IO Error")]
    Io(
        #[from]
        io::Error,
    ),
}

#[derive(Error, Debug)]
pub enum ExecuteError {
    #[error(transparent)]
    Parse(#[from] ParseError),

    #[error(transparent)]
    Runtime(#[from] RuntimeError),
}

pub struct Runtime {
    /// Pointer into the heap, always in `0..heap_size`
    data_pointer: usize,

    /// Sparse heap, only touched cells are stored
    heap: SparseMemory,
    heap_size: usize,

    output: String,

    in_stream: Box<dyn BufRead>,
    /// What's left of the last line read from `in_stream`
    pending_input: VecDeque<char>,
}

impl Runtime {
    pub fn new(heap_size: usize, in_stream: Box<dyn BufRead>) -> Self {
        Self {
            data_pointer: 0,
            heap: SparseMemory::new(),
            heap_size: heap_size.max(1),
            output: String::new(),
            in_stream,
            pending_input: VecDeque::new(),
        }
    }

    /// Clears the heap, pointer and output.
    /// Buffered input belongs to the stream so it survives a reset.
    pub fn reset(&mut self) {
        self.heap.clear();
        self.data_pointer = 0;
        self.output.clear();
    }

    /// Read one character from the input stream into the data pointer
    pub fn read(&mut self) -> Result<(), RuntimeError> {
        let c = self.next_input_char()?;
        self.heap.set(self.data_pointer, c as i64);
        Ok(())
    }

    fn next_input_char(&mut self) -> Result<char, RuntimeError> {
        if self.pending_input.is_empty() {
            let mut line = String::new();
            if self.in_stream.read_line(&mut line)? == 0 {
                return Err(RuntimeError::EndOfInput);
            }
            self.pending_input.extend(line.chars());
        }
        self.pending_input
            .pop_front()
            .ok_or(RuntimeError::EndOfInput)
    }

    /// Append the data pointer's cell to the output as a character
    pub fn write(&mut self) -> Result<(), RuntimeError> {
        let value = self.heap.get(self.data_pointer);
        let c = u32::try_from(value)
            .ok()
            .and_then(char::from_u32)
            .ok_or(RuntimeError::InvalidCodepoint {
                value,
                pointer: self.data_pointer,
            })?;
        self.output.push(c);
        Ok(())
    }

    pub fn deref_and_add_value(&mut self) -> Result<(), RuntimeError> {
        let value = self
            .heap
            .get(self.data_pointer)
            .checked_add(1)
            .ok_or(RuntimeError::CellOverflow {
                pointer: self.data_pointer,
            })?;
        self.heap.set(self.data_pointer, value);
        Ok(())
    }

    pub fn deref_and_sub_value(&mut self) -> Result<(), RuntimeError> {
        let value = self
            .heap
            .get(self.data_pointer)
            .checked_sub(1)
            .ok_or(RuntimeError::CellOverflow {
                pointer: self.data_pointer,
            })?;
        self.heap.set(self.data_pointer, value);
        Ok(())
    }

    pub fn increment_data_pointer(&mut self) -> Result<(), RuntimeError> {
        if self.data_pointer + 1 >= self.heap_size {
            return Err(RuntimeError::PointerOverflow {
                size: self.heap_size,
            });
        }
        self.data_pointer += 1;
        Ok(())
    }

    pub fn decrement_data_pointer(&mut self) -> Result<(), RuntimeError> {
        if self.data_pointer == 0 {
            return Err(RuntimeError::PointerUnderflow);
        }
        self.data_pointer -= 1;
        Ok(())
    }

    /// is the value at the data pointer zero?
    pub fn value_is_zero(&self) -> bool {
        self.heap.get(self.data_pointer) == 0
    }

    pub fn data_pointer(&self) -> usize {
        self.data_pointer
    }

    pub fn cell(&self, index: usize) -> i64 {
        self.heap.get(index)
    }

    pub fn heap_size(&self) -> usize {
        self.heap_size
    }

    pub fn output(&self) -> &str {
        &self.output
    }

    fn take_output(&mut self) -> String {
        std::mem::take(&mut self.output)
    }
}

/// Parses and runs programs, one `execute` at a time
pub struct Interpreter {
    runtime: Runtime,
    parser: Parser,
}

impl Interpreter {
    pub fn new(heap_size: usize, in_stream: Box<dyn BufRead>) -> Self {
        Self {
            runtime: Runtime::new(heap_size, in_stream),
            parser: Parser::new(),
        }
    }

    /// Interpreter reading `,` input from stdin
    pub fn with_stdin(heap_size: usize) -> Self {
        Self::new(heap_size, Box::new(BufReader::new(io::stdin())))
    }

    /// Runs `source` against fresh memory and returns everything it wrote.
    /// Nothing is returned on failure, partial output is dropped.
    pub fn execute(&mut self, source: &str) -> Result<String, ExecuteError> {
        self.runtime.reset();
        let program = self.parser.parse_source(source)?;
        Ok(self.run_program(&program)?)
    }

    /// Runs an already parsed program against fresh memory
    pub fn run_program(&mut self, program: &Program) -> Result<String, RuntimeError> {
        self.runtime.reset();
        let result = AstInterpreter::new().interpret(&mut self.runtime, program);
        let output = self.runtime.take_output();
        result?;

        debug!(
            output_chars = output.chars().count(),
            data_pointer = self.runtime.data_pointer,
            heap_size = self.runtime.heap_size(),
            touched_cells = self.runtime.heap.touched(),
            "program finished"
        );
        Ok(output)
    }

    pub fn runtime(&self) -> &Runtime {
        &self.runtime
    }
}

impl Default for Interpreter {
    fn default() -> Self {
        Self::with_stdin(MAX_SLOTS)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    fn runtime_with_input(input: &str) -> Runtime {
        Runtime::new(MAX_SLOTS, Box::new(Cursor::new(input.to_string())))
    }

    #[test]
    fn pointer_cannot_go_below_zero() {
        let mut runtime = runtime_with_input("");
        assert!(matches!(
            runtime.decrement_data_pointer(),
            Err(RuntimeError::PointerUnderflow)
        ));
        assert_eq!(runtime.data_pointer(), 0);
    }

    #[test]
    fn pointer_stops_at_last_slot() {
        let mut runtime = Runtime::new(3, Box::new(Cursor::new(String::new())));
        assert_eq!(runtime.heap_size(), 3);
        runtime.increment_data_pointer().unwrap();
        runtime.increment_data_pointer().unwrap();
        assert!(matches!(
            runtime.increment_data_pointer(),
            Err(RuntimeError::PointerOverflow { size: 3 })
        ));
        assert_eq!(runtime.data_pointer(), 2);
    }

    #[test]
    fn cells_go_negative_without_wrapping() {
        let mut runtime = runtime_with_input("");
        runtime.deref_and_sub_value().unwrap();
        runtime.deref_and_sub_value().unwrap();
        assert_eq!(runtime.cell(0), -2);
        assert!(!runtime.value_is_zero());
    }

    #[test]
    fn write_rejects_invalid_codepoints() {
        let mut runtime = runtime_with_input("");
        runtime.deref_and_sub_value().unwrap();
        assert!(matches!(
            runtime.write(),
            Err(RuntimeError::InvalidCodepoint {
                value: -1,
                pointer: 0
            })
        ));
        assert_eq!(runtime.output(), "");
    }

    #[test]
    fn read_hands_out_one_char_per_call() {
        let mut runtime = runtime_with_input("hé\nx");
        let mut seen = vec![];
        for _ in 0..4 {
            runtime.read().unwrap();
            seen.push(runtime.cell(0));
        }
        assert_eq!(seen, vec!['h' as i64, 'é' as i64, '\n' as i64, 'x' as i64]);
        assert!(matches!(runtime.read(), Err(RuntimeError::EndOfInput)));
    }

    #[test]
    fn reset_clears_state() {
        let mut runtime = runtime_with_input("");
        runtime.deref_and_add_value().unwrap();
        runtime.increment_data_pointer().unwrap();
        runtime.reset();
        assert_eq!(runtime.data_pointer(), 0);
        assert_eq!(runtime.cell(0), 0);
        assert_eq!(runtime.output(), "");
    }
}
