use crate::word::Word;

use std::io::{self, Read, Write};

use bytemuck::cast_slice;

// Word images are stored one word per little-endian u16, upper four bits zero.

pub fn as_byte_slice(input: &[u16]) -> &[u8] {
    cast_slice(input)
}

// Already byte-swapped for the host, so `as_byte_slice` of the result is the
// on-disk form.
pub fn raw_words(input: &[Word]) -> Vec<u16> {
    input.iter().map(|w| w.to_raw().to_le()).collect()
}

pub fn words_from_bytes(input: &[u8]) -> io::Result<Vec<Word>> {
    if input.len() % 2 != 0 {
        return Err(io::Error::new(io::ErrorKind::InvalidData, "odd length word image"));
    }
    input
        .chunks_exact(2)
        .map(|c| {
            Word::new(u16::from_le_bytes([c[0], c[1]]))
                .map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))
        })
        .collect()
}

////////////////////////////////////////////////////////////////////////////////

pub trait ReadWord {
    fn read_word(&mut self) -> io::Result<Word>;
}

impl<T: Read> ReadWord for T {
    fn read_word(&mut self) -> io::Result<Word> {
        let mut buf = [0u8; 2];
        self.read_exact(&mut buf)?;
        let lower = buf[0] as u16;
        let upper = buf[1] as u16;
        Word::new(lower | (upper << u8::BITS))
            .map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))
    }
}

////////////////////////////////////////////////////////////////////////////////

pub trait WriteWord {
    fn write_word(&mut self, val: Word) -> io::Result<()>;
}

impl<T: Write> WriteWord for T {
    fn write_word(&mut self, val: Word) -> io::Result<()> {
        let val = val.to_raw();
        let lower = val as u8;
        let upper = (val >> u8::BITS) as u8;
        self.write_all(&[lower, upper])
    }
}
