//! Encode text as a Brainf**k program and run it back.
//!
//! ```text
//! text → generator → source → lexer → parser → AST → interpreter → text
//! ```

pub mod generator;
pub mod interpreter;
pub mod lexer;
pub mod memory;
pub mod parser;
pub mod roundtrip;

pub use generator::{generator::Generator, GeneratorError};
pub use interpreter::{ExecuteError, Interpreter, RuntimeError, MAX_SLOTS};
pub use parser::ParseError;
