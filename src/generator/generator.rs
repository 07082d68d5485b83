use rustc_hash::FxHashSet;
use tracing::{debug, trace};

use super::{bin_size, nearest_bin, GeneratorError};

/// Turns text into a program that prints that text.
///
/// The prologue fills cells `0..glyphs` with evenly spaced values ("bins"),
/// then every character moves to the bin closest to it, nudges the value
/// into place and prints it. The bin keeps that value for later characters.
#[derive(Debug, Default, Clone, Copy)]
pub struct Generator;

impl Generator {
    pub fn new() -> Generator {
        Generator
    }

    pub fn text_to_program(&self, text: &str) -> Result<String, GeneratorError> {
        let glyphs = text.chars().collect::<FxHashSet<char>>().len();
        let max_code_point = text
            .chars()
            .map(u32::from)
            .max()
            .ok_or(GeneratorError::EmptyInput)?;

        let number_of_bins = bin_size(max_code_point, glyphs)?;
        let mut bins: Vec<i64> = (1..=glyphs as i64).map(|i| i * number_of_bins).collect();
        debug!(glyphs, number_of_bins, max_code_point, "laid out bins");

        let mut code = String::new();
        write_prologue(&mut code, glyphs, number_of_bins);

        let mut current_bin = 0usize;
        for c in text.chars() {
            let code_point = u32::from(c) as i64;
            let new_bin = nearest_bin(&bins, code_point);

            if new_bin > current_bin {
                push_repeated(&mut code, '>', new_bin - current_bin);
            } else {
                push_repeated(&mut code, '<', current_bin - new_bin);
            }

            let delta = code_point - bins[new_bin];
            let adjust = if delta > 0 { '+' } else { '-' };
            push_repeated(&mut code, adjust, delta.unsigned_abs() as usize);
            code.push('.');

            trace!(character = ?c, bin = new_bin, delta, "encoded character");
            bins[new_bin] = code_point;
            current_bin = new_bin;
        }

        debug!(commands = code.len(), "generated program");
        Ok(code)
    }
}

/// Leaves cell `i` holding `(i + 1) * number_of_bins` with the pointer back on cell 0
fn write_prologue(code: &mut String, glyphs: usize, number_of_bins: i64) {
    push_repeated(code, '+', number_of_bins as usize);
    code.push('[');
    for i in 1..glyphs {
        code.push('>');
        push_repeated(code, '+', i + 1);
    }
    push_repeated(code, '<', glyphs - 1);
    code.push_str("-]");
    // the counter cell is zero after the loop
    push_repeated(code, '+', number_of_bins as usize);
}

fn push_repeated(code: &mut String, c: char, count: usize) {
    code.extend(std::iter::repeat(c).take(count));
}
