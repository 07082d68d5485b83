use thiserror::Error;

pub mod generator;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum GeneratorError {
    #[error("Can't generate a program for empty text, there are no glyphs to lay out")]
    EmptyInput,
}

/// Value spacing between neighbouring bins in the prologue layout
pub fn bin_size(max_code_point: u32, glyphs: usize) -> Result<i64, GeneratorError> {
    let size = i64::from(max_code_point)
        .checked_div(glyphs as i64)
        .ok_or(GeneratorError::EmptyInput)?;
    Ok(size.max(1))
}

/// Index of the bin whose value is closest to `code_point`, lowest index wins ties
pub fn nearest_bin(bins: &[i64], code_point: i64) -> usize {
    let mut best = 0;
    for (i, bin) in bins.iter().enumerate() {
        if (code_point - bin).abs() < (code_point - bins[best]).abs() {
            best = i;
        }
    }
    best
}
