use crate::bank::Bank;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum MemError {
    #[error("Invalid bank {0} (banks are 0 through 7)")]
    InvalidBank(u16),

    #[error("Invalid offset 0o{0:o} (offsets are 0 through 0o7777)")]
    InvalidOffset(u32),

    #[error("No terminator 0o{sentinel:o} within {bound} bytes of byte {start}")]
    UnterminatedScan { start: usize, sentinel: u8, bound: usize },

    #[error("Byte 0o{value:o} at index {index} does not fit in a 6-bit sub-field")]
    Truncation { index: usize, value: u8 },

    #[error("Byte range {start}..{end} exceeds capacity of {capacity} bytes")]
    OutOfBounds { start: usize, end: usize, capacity: usize },

    #[error("Bank {0} is the kernel bank")]
    KernelBankDenied(Bank),

    #[error("{segment} segment needs 0o{len:o} words, budget is 0o{budget:o}")]
    SegmentOverflow { segment: &'static str, len: usize, budget: u16 },

    #[error("Entry point 0o{0:o} is outside the text segment")]
    BadEntry(u16),

    #[error("Bad image magic 0o{0:o}")]
    BadMagic(u16),

    #[error("Trailing data after image")]
    TrailingData,

    #[error(transparent)]
    Io(#[from] std::io::Error),
}
