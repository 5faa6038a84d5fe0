use crate::constants::{WORD_MASK, WORD_MODULUS};

use derive_more::Display;
use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("Value 0o{0:o} does not fit in a 12-bit word")]
pub struct WordError(pub u32);

/// A 12-bit machine word. The upper four bits of the backing `u16` are always
/// zero; every constructor either checks or masks.
#[derive(Debug, Display, Default, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[display(fmt = "{:04o}", _0)]
pub struct Word(u16);

impl Word {
    pub const ZERO: Word = Word(0);
    pub const MAX: Word = Word(WORD_MASK);

    pub fn new(val: u16) -> Result<Word, WordError> {
        if val & !WORD_MASK != 0 {
            return Err(WordError(val as u32));
        }
        Ok(Word(val))
    }

    /// Discards everything above bit 11.
    pub const fn masked(val: u16) -> Word {
        Word(val & WORD_MASK)
    }

    pub const fn to_raw(self) -> u16 {
        self.0
    }

    pub fn wrapping_add(self, rhs: Word) -> Word {
        Word((((self.0 as u32) + (rhs.0 as u32)) % WORD_MODULUS) as u16)
    }

}

impl TryFrom<u16> for Word {
    type Error = WordError;

    fn try_from(val: u16) -> Result<Self, Self::Error> {
        Word::new(val)
    }
}

impl From<Word> for u16 {
    fn from(w: Word) -> u16 {
        w.0
    }
}
