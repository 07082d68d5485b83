use rustc_hash::FxHashMap;

/// Integer cells indexed from 0 that read as zero until written.
///
/// Only touched indices take up space. Bounds are the caller's problem.
#[derive(Debug, Default, Clone)]
pub struct SparseMemory {
    cells: FxHashMap<usize, i64>,
}

impl SparseMemory {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, index: usize) -> i64 {
        self.cells.get(&index).copied().unwrap_or(0)
    }

    pub fn set(&mut self, index: usize, value: i64) {
        self.cells.insert(index, value);
    }

    pub fn clear(&mut self) {
        self.cells.clear();
    }

    /// Number of distinct indices that have been written
    pub fn touched(&self) -> usize {
        self.cells.len()
    }
}
