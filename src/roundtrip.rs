//! Generates a program for some text, runs it and checks the text comes back.

use thiserror::Error;
use tracing::debug;

use crate::{
    generator::{generator::Generator, GeneratorError},
    interpreter::{ExecuteError, Interpreter},
};

#[derive(Error, Debug)]
pub enum RoundTripError {
    #[error(transparent)]
    Generate(#[from] GeneratorError),

    #[error(transparent)]
    Execute(#[from] ExecuteError),
}

#[derive(Debug, Clone, PartialEq)]
pub struct RoundTrip {
    pub original: String,
    pub source: String,
    pub output: String,
}

impl RoundTrip {
    /// Number of program symbols in the generated source
    pub fn command_count(&self) -> usize {
        self.source.chars().count()
    }

    pub fn succeeded(&self) -> bool {
        self.output == self.original
    }
}

pub fn run(text: &str, interpreter: &mut Interpreter) -> Result<RoundTrip, RoundTripError> {
    let source = Generator::new().text_to_program(text)?;
    let output = interpreter.execute(&source)?;

    let round_trip = RoundTrip {
        original: text.to_string(),
        source,
        output,
    };
    debug!(
        commands = round_trip.command_count(),
        succeeded = round_trip.succeeded(),
        "round trip finished"
    );
    Ok(round_trip)
}
