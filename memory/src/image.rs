use crate::bank::{Address, AddressSpace, Bank};
use crate::error::MemError;
use crate::layout::UserSegment;

use common::mem::{as_byte_slice, raw_words, ReadWord, WriteWord};
use common::Word;

use std::io::{Read, Write};

use log::debug;

/// A user process image: text and data, loaded at the bases of their
/// segments in a user bank. Heap and stack start zeroed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserImage {
    pub text: Vec<Word>,
    pub data: Vec<Word>,
    pub entry: u16, // Offset into text
}

/// Where a loaded image ended up.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LoadedImage {
    pub bank: Bank,
    pub entry: Address,
    pub heap_base: Address,
    pub stack_top: Address, // Last word of the stack segment
}

impl UserImage {
    const MAGIC: u16 = 0o7407;

    pub fn empty() -> UserImage {
        UserImage { text: vec![], data: vec![], entry: 0 }
    }

    pub fn validate(&self) -> Result<(), MemError> {
        check_segment(UserSegment::Text, self.text.len())?;
        check_segment(UserSegment::Data, self.data.len())?;
        if self.entry as usize >= self.text.len() {
            return Err(MemError::BadEntry(self.entry));
        }
        Ok(())
    }

    // Header is magic, text length, data length, entry, one word each.
    pub fn read_from(reader: &mut impl Read) -> Result<UserImage, MemError> {
        let magic = reader.read_word()?.to_raw();
        if magic != Self::MAGIC {
            return Err(MemError::BadMagic(magic));
        }

        let text_len = reader.read_word()?.to_raw() as usize;
        let data_len = reader.read_word()?.to_raw() as usize;
        let entry = reader.read_word()?.to_raw();

        check_segment(UserSegment::Text, text_len)?;
        check_segment(UserSegment::Data, data_len)?;

        let text = (0..text_len).map(|_| reader.read_word()).collect::<Result<Vec<_>, _>>()?;
        let data = (0..data_len).map(|_| reader.read_word()).collect::<Result<Vec<_>, _>>()?;

        // Make sure we read the whole file.
        let mut buf = [0u8; 1];
        if reader.read(&mut buf)? != 0 {
            return Err(MemError::TrailingData);
        }

        let image = UserImage { text, data, entry };
        image.validate()?;
        Ok(image)
    }

    pub fn write_to(&self, writer: &mut impl Write) -> Result<(), MemError> {
        self.validate()?;

        // Lengths fit: validate() held them to their segment budgets.
        writer.write_word(Word::masked(Self::MAGIC))?;
        writer.write_word(Word::masked(self.text.len() as u16))?;
        writer.write_word(Word::masked(self.data.len() as u16))?;
        writer.write_word(Word::masked(self.entry))?;

        writer.write_all(as_byte_slice(&raw_words(&self.text)))?;
        writer.write_all(as_byte_slice(&raw_words(&self.data)))?;
        Ok(())
    }

    /// Copies text and data into `bank` and zeroes heap and stack. The kernel
    /// bank can't hold a user image.
    pub fn load_into(&self, space: &mut AddressSpace, bank: Bank) -> Result<LoadedImage, MemError> {
        if !bank.is_user() {
            return Err(MemError::KernelBankDenied(bank));
        }
        self.validate()?;

        debug!(
            "Image: loading {} text words, {} data words into bank {bank}",
            self.text.len(),
            self.data.len()
        );
        let seg_addr = |seg: UserSegment| Address::new(bank, seg.base());

        let mut text = self.text.clone();
        text.resize(UserSegment::Text.size() as usize, Word::ZERO);
        space.load(seg_addr(UserSegment::Text)?, &text)?;

        let mut data = self.data.clone();
        data.resize(UserSegment::Data.size() as usize, Word::ZERO);
        space.load(seg_addr(UserSegment::Data)?, &data)?;

        for seg in [UserSegment::Heap, UserSegment::Stack] {
            space.load(seg_addr(seg)?, &vec![Word::ZERO; seg.size() as usize])?;
        }

        let stack = UserSegment::Stack;
        Ok(LoadedImage {
            bank,
            entry: Address::new(bank, UserSegment::Text.base() + self.entry)?,
            heap_base: seg_addr(UserSegment::Heap)?,
            stack_top: Address::new(bank, stack.base() + stack.size() - 1)?,
        })
    }
}

fn check_segment(segment: UserSegment, len: usize) -> Result<(), MemError> {
    if len > segment.size() as usize {
        return Err(MemError::SegmentOverflow { segment: segment.name(), len, budget: segment.size() });
    }
    Ok(())
}
