use crate::constants::{BYTES_PER_WORD, SUBFIELD_MASK};

pub trait IsEven: Copy {
    #[allow(clippy::wrong_self_convention)]
    fn is_even(self) -> bool;
}

impl IsEven for usize {
    fn is_even(self) -> bool {
        self & 0x1 != 1
    }
}

////////////////////////////////////////////////////////////////////////////////

pub trait FitsSubfield: Copy {
    fn fits_subfield(self) -> bool;
}

impl FitsSubfield for u8 {
    fn fits_subfield(self) -> bool {
        self & !SUBFIELD_MASK == 0
    }
}

////////////////////////////////////////////////////////////////////////////////

// Number of words needed to hold `bytes` packed bytes.
pub fn words_for_bytes(bytes: usize) -> usize {
    bytes.div_ceil(BYTES_PER_WORD)
}
